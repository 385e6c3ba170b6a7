use std::path::Path;

use crate::domain::entities::cell::CellValue;

/// Raw bytes of one file picked by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }

    /// Lower-cased extension of the file name, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
    }
}

/// First sheet of a file split into its header row and data rows.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DecodedSheet {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl DecodedSheet {
    /// Trailing blank header cells are dropped; the exporter writes no cell for a
    /// blank header, so they would not come back on re-import.
    pub fn new(mut headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        while headers.last().is_some_and(|header| header.is_empty()) {
            headers.pop();
        }
        Self { headers, rows }
    }

    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.rows.is_empty()
    }
}
