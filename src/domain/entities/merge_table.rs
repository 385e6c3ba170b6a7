use std::collections::HashMap;

use crate::domain::entities::cell::CellValue;
use crate::domain::entities::sheet::DecodedSheet;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub header: String,
    pub values: Vec<CellValue>,
}

/// Header name to accumulated column values, in first-seen header order.
///
/// Columns are allowed to be ragged: a header that only some files carry keeps a
/// shorter sequence than the others. [`MergeTable::to_grid`] pads them out.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergeTable {
    columns: Vec<Column>,
    index: HashMap<String, usize>,
}

impl MergeTable {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.header.as_str())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[cfg(test)]
    pub fn column(&self, header: &str) -> Option<&[CellValue]> {
        self.index
            .get(header)
            .map(|&slot| self.columns[slot].values.as_slice())
    }

    /// Longest column length; zero for a table without columns.
    pub fn row_count(&self) -> usize {
        self.columns
            .iter()
            .map(|column| column.values.len())
            .max()
            .unwrap_or(0)
    }

    fn ensure_column(&mut self, header: &str) -> usize {
        if let Some(&slot) = self.index.get(header) {
            return slot;
        }
        let slot = self.columns.len();
        self.columns.push(Column {
            header: header.to_string(),
            values: Vec::new(),
        });
        self.index.insert(header.to_string(), slot);
        slot
    }

    /// Registers the sheet's headers and appends every data row under them.
    ///
    /// Cells missing from a short row are appended as `Empty`; cells beyond the
    /// header row's width are dropped.
    pub fn append_sheet(&mut self, sheet: &DecodedSheet) {
        let slots: Vec<usize> = sheet
            .headers
            .iter()
            .map(|header| self.ensure_column(header))
            .collect();

        for row in &sheet.rows {
            for (idx, &slot) in slots.iter().enumerate() {
                let value = row.get(idx).cloned().unwrap_or_default();
                self.columns[slot].values.push(value);
            }
        }
    }

    pub fn to_grid(&self) -> MergedGrid {
        let headers: Vec<String> = self.headers().map(str::to_string).collect();
        let rows = (0..self.row_count())
            .map(|row_idx| {
                self.columns
                    .iter()
                    .map(|column| column.values.get(row_idx).cloned().unwrap_or_default())
                    .collect()
            })
            .collect();
        MergedGrid { headers, rows }
    }
}

/// Rectangular view of a [`MergeTable`]: every row is as wide as the header row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergedGrid {
    headers: Vec<String>,
    rows: Vec<Vec<CellValue>>,
}

impl MergedGrid {
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[Vec<CellValue>] {
        &self.rows
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    #[cfg(test)]
    pub fn display_rows(&self) -> Vec<Vec<String>> {
        self.rows
            .iter()
            .map(|row| row.iter().map(CellValue::to_string).collect())
            .collect()
    }
}
