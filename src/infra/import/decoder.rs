use crate::domain::entities::sheet::{DecodedSheet, UploadedFile};
use crate::infra::import::csv::decode_csv;
use crate::infra::import::xlsx::decode_workbook;
use crate::usecase::ports::codec::{CodecError, SheetDecoder};

/// Picks the CSV reader for `.csv` files and lets calamine sniff everything else.
#[derive(Debug, Clone, Copy, Default)]
pub struct SpreadsheetDecoder;

impl SheetDecoder for SpreadsheetDecoder {
    fn decode(&self, file: &UploadedFile) -> Result<DecodedSheet, CodecError> {
        match file.extension().as_deref() {
            Some("csv") => decode_csv(&file.bytes),
            _ => decode_workbook(&file.bytes),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_extension_is_case_insensitive() {
        let file = UploadedFile::new("People.CSV", b"name\nAda\n".to_vec());

        let sheet = SpreadsheetDecoder
            .decode(&file)
            .expect("csv should decode by extension");

        assert_eq!(sheet.headers, vec!["name"]);
    }
}
