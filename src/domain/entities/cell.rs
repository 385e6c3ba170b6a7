use std::fmt;

/// A single spreadsheet cell as read from an input file.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    /// Builds a text cell, folding the empty string into `Empty`.
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(value)
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(value) => f.write_str(value),
            CellValue::Number(value) => write!(f, "{value}"),
            CellValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::text(value)
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::text(value)
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

impl From<bool> for CellValue {
    fn from(value: bool) -> Self {
        CellValue::Bool(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_becomes_empty_cell() {
        assert_eq!(CellValue::text(""), CellValue::Empty);
        assert_eq!(CellValue::from("x"), CellValue::Text("x".to_string()));
    }

    #[test]
    fn display_matches_spreadsheet_text() {
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Number(1.0).to_string(), "1");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Bool(false).to_string(), "false");
        assert_eq!(CellValue::from("Paris").to_string(), "Paris");
    }
}
