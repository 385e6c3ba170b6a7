use std::path::PathBuf;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{info, warn};

use crate::domain::entities::session::{BatchMode, MergeSession};
use crate::domain::entities::sheet::{DecodedSheet, UploadedFile};
use crate::infra::fs::files::{display_name, read_upload};
use crate::usecase::ports::codec::SheetDecoder;

type Decoded = (String, Result<DecodedSheet, String>);

/// Decodes a batch of files concurrently and folds them into a [`MergeSession`]
/// in the order the files were given, whatever order the decodes finish in.
pub struct ImportService<D> {
    decoder: Arc<D>,
}

impl<D: SheetDecoder> ImportService<D> {
    pub fn new(decoder: Arc<D>) -> Self {
        Self { decoder }
    }

    pub fn import_paths(
        &self,
        paths: &[PathBuf],
        mode: BatchMode,
        previous: Option<&MergeSession>,
    ) -> MergeSession {
        let decoded: Vec<Decoded> = paths
            .par_iter()
            .map(|path| match read_upload(path) {
                Ok(file) => self.decode_one(&file),
                Err(err) => (display_name(path), Err(format!("{err:#}"))),
            })
            .collect();
        fold_batch(decoded, mode, previous)
    }

    #[cfg(test)]
    pub fn import_files(
        &self,
        files: &[UploadedFile],
        mode: BatchMode,
        previous: Option<&MergeSession>,
    ) -> MergeSession {
        let decoded: Vec<Decoded> = files
            .par_iter()
            .map(|file| self.decode_one(file))
            .collect();
        fold_batch(decoded, mode, previous)
    }

    fn decode_one(&self, file: &UploadedFile) -> Decoded {
        let result = self.decoder.decode(file).map_err(|err| err.to_string());
        (file.name.clone(), result)
    }
}

fn fold_batch(
    decoded: Vec<Decoded>,
    mode: BatchMode,
    previous: Option<&MergeSession>,
) -> MergeSession {
    let created_at = chrono::Utc::now().timestamp();
    let mut session = MergeSession::begin(previous, mode, created_at);

    for (file_name, result) in decoded {
        match result {
            Ok(sheet) => session.absorb(&file_name, &sheet),
            Err(message) => {
                warn!(file = %file_name, error = %message, "failed to decode file");
                session.record_failure(&file_name, message);
            }
        }
    }

    info!(
        files = session.file_names().len(),
        failures = session.failures().len(),
        columns = session.table().headers().count(),
        rows = session.table().row_count(),
        ?mode,
        "merged batch"
    );
    session
}

#[cfg(test)]
mod tests {
    use std::thread;
    use std::time::Duration;

    use super::*;
    use crate::domain::entities::cell::CellValue;
    use crate::usecase::ports::codec::CodecError;

    /// Treats the file bytes as `header;value;value...` and sleeps for the number of
    /// milliseconds given in the file name, so later files can finish first.
    struct DelayedDecoder;

    impl SheetDecoder for DelayedDecoder {
        fn decode(&self, file: &UploadedFile) -> Result<DecodedSheet, CodecError> {
            let delay: u64 = file.name.parse().unwrap_or(0);
            thread::sleep(Duration::from_millis(delay));
            if file.bytes.is_empty() {
                return Err(CodecError::NoSheets);
            }
            let text = String::from_utf8_lossy(&file.bytes).into_owned();
            let mut parts = text.split(';');
            let header = parts.next().unwrap_or_default().to_string();
            let rows = parts.map(|value| vec![CellValue::from(value)]).collect();
            Ok(DecodedSheet::new(vec![header], rows))
        }
    }

    fn service() -> ImportService<DelayedDecoder> {
        ImportService::new(Arc::new(DelayedDecoder))
    }

    #[test]
    fn fold_follows_input_order_not_completion_order() {
        let files = vec![
            UploadedFile::new("80", b"A;first".to_vec()),
            UploadedFile::new("0", b"A;second;third".to_vec()),
        ];

        let session = service().import_files(&files, BatchMode::Replace, None);

        let values: Vec<String> = session
            .table()
            .column("A")
            .expect("A should exist")
            .iter()
            .map(CellValue::to_string)
            .collect();
        assert_eq!(values, vec!["first", "second", "third"]);
        assert_eq!(session.file_names(), &["80", "0"]);
    }

    #[test]
    fn failed_file_does_not_block_the_rest() {
        let files = vec![
            UploadedFile::new("0", Vec::new()),
            UploadedFile::new("1", b"B;x".to_vec()),
        ];

        let session = service().import_files(&files, BatchMode::Replace, None);

        assert_eq!(session.failures().len(), 1);
        assert_eq!(session.failures()[0].file_name, "0");
        assert_eq!(session.table().headers().collect::<Vec<_>>(), vec!["B"]);
    }

    #[test]
    fn unreadable_path_is_reported_as_failure() {
        let missing = std::env::temp_dir().join("sheet-merge-does-not-exist.xlsx");

        let session = service().import_paths(&[missing], BatchMode::Replace, None);

        assert_eq!(session.failures().len(), 1);
        assert_eq!(
            session.failures()[0].file_name,
            "sheet-merge-does-not-exist.xlsx"
        );
        assert!(session.failures()[0].message.contains("failed to read file"));
    }
}
