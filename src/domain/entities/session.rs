use crate::domain::entities::merge_table::MergeTable;
use crate::domain::entities::sheet::DecodedSheet;

/// What a new file selection does to the current merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchMode {
    /// Discard the previous merge and start over with the new files.
    #[default]
    Replace,
    /// Fold the new files on top of the previous merge.
    Append,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileHeaders {
    pub file_name: String,
    pub headers: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFailure {
    pub file_name: String,
    pub message: String,
}

/// Outcome of one ingestion pass, threaded into export.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MergeSession {
    file_names: Vec<String>,
    file_headers: Vec<FileHeaders>,
    failures: Vec<FileFailure>,
    merged_files: usize,
    table: MergeTable,
    created_at: i64,
}

impl MergeSession {
    /// Starting point for a new batch. Failures are never carried over.
    pub fn begin(previous: Option<&MergeSession>, mode: BatchMode, created_at: i64) -> Self {
        match (mode, previous) {
            (BatchMode::Append, Some(previous)) => Self {
                file_names: previous.file_names.clone(),
                file_headers: previous.file_headers.clone(),
                failures: Vec::new(),
                merged_files: previous.merged_files,
                table: previous.table.clone(),
                created_at,
            },
            _ => Self {
                created_at,
                ..Self::default()
            },
        }
    }

    /// Folds one decoded file into the session. A sheet without any rows leaves no trace
    /// besides the file name.
    pub fn absorb(&mut self, file_name: &str, sheet: &DecodedSheet) {
        self.file_names.push(file_name.to_string());
        self.merged_files += 1;
        if sheet.is_empty() {
            return;
        }

        let entry = FileHeaders {
            file_name: file_name.to_string(),
            headers: sheet.headers.clone(),
        };
        match self
            .file_headers
            .iter_mut()
            .find(|existing| existing.file_name == file_name)
        {
            Some(existing) => *existing = entry,
            None => self.file_headers.push(entry),
        }
        self.table.append_sheet(sheet);
    }

    pub fn record_failure(&mut self, file_name: &str, message: impl Into<String>) {
        self.file_names.push(file_name.to_string());
        self.failures.push(FileFailure {
            file_name: file_name.to_string(),
            message: message.into(),
        });
    }

    pub fn file_names(&self) -> &[String] {
        &self.file_names
    }

    pub fn file_headers(&self) -> &[FileHeaders] {
        &self.file_headers
    }

    pub fn failures(&self) -> &[FileFailure] {
        &self.failures
    }

    /// Files decoded successfully, across every batch folded into this session.
    pub fn merged_file_count(&self) -> usize {
        self.merged_files
    }

    pub fn table(&self) -> &MergeTable {
        &self.table
    }

    /// Unix timestamp stamped into exported workbooks.
    pub fn created_at(&self) -> i64 {
        self.created_at
    }

    pub fn has_data(&self) -> bool {
        !self.table.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::cell::CellValue;

    fn one_column(header: &str, values: &[&str]) -> DecodedSheet {
        DecodedSheet::new(
            vec![header.to_string()],
            values.iter().map(|&v| vec![CellValue::from(v)]).collect(),
        )
    }

    #[test]
    fn replace_mode_discards_previous_batch() {
        let mut first = MergeSession::begin(None, BatchMode::Replace, 1);
        first.absorb("a.xlsx", &one_column("A", &["1"]));

        let second = MergeSession::begin(Some(&first), BatchMode::Replace, 2);

        assert!(!second.has_data());
        assert!(second.file_names().is_empty());
        assert_eq!(second.created_at(), 2);
    }

    #[test]
    fn append_mode_keeps_previous_table() {
        let mut first = MergeSession::begin(None, BatchMode::Replace, 1);
        first.absorb("a.xlsx", &one_column("A", &["1"]));
        first.record_failure("broken.xlsx", "bad zip");

        let mut second = MergeSession::begin(Some(&first), BatchMode::Append, 2);
        second.absorb("b.xlsx", &one_column("A", &["2"]));

        let values: Vec<String> = second
            .table()
            .column("A")
            .expect("A should exist")
            .iter()
            .map(CellValue::to_string)
            .collect();
        assert_eq!(values, vec!["1", "2"]);
        assert_eq!(second.file_names(), &["a.xlsx", "broken.xlsx", "b.xlsx"]);
        assert!(second.failures().is_empty(), "failures belong to one batch");
        assert_eq!(
            second.merged_file_count(),
            2,
            "the failed file from the first batch must not count as merged"
        );
    }

    #[test]
    fn reingesting_a_file_name_replaces_its_header_entry() {
        let mut session = MergeSession::begin(None, BatchMode::Replace, 0);
        session.absorb("a.xlsx", &one_column("A", &["1"]));
        session.absorb("a.xlsx", &one_column("B", &["2"]));

        assert_eq!(session.file_headers().len(), 1);
        assert_eq!(session.file_headers()[0].headers, vec!["B".to_string()]);
    }

    #[test]
    fn empty_sheet_registers_nothing() {
        let mut session = MergeSession::begin(None, BatchMode::Replace, 0);
        session.absorb("blank.xlsx", &DecodedSheet::default());

        assert_eq!(session.file_names(), &["blank.xlsx"]);
        assert!(session.file_headers().is_empty());
        assert!(!session.has_data());
    }
}
