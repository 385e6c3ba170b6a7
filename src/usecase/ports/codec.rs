use thiserror::Error;

use crate::domain::entities::merge_table::MergedGrid;
use crate::domain::entities::sheet::{DecodedSheet, UploadedFile};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to read workbook: {0}")]
    Workbook(#[from] calamine::Error),
    #[error("workbook has no sheets")]
    NoSheets,
    #[error("failed to parse csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to write xlsx: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    #[error(
        "merged data is {rows} rows by {columns} columns, over the xlsx limit of {max_rows} by {max_columns}"
    )]
    GridTooLarge {
        rows: usize,
        columns: usize,
        max_rows: usize,
        max_columns: usize,
    },
}

pub trait SheetDecoder: Send + Sync {
    /// Decodes the first sheet of `file`; the first row becomes the header row.
    fn decode(&self, file: &UploadedFile) -> Result<DecodedSheet, CodecError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodeOptions {
    pub sheet_name: String,
    pub created_at: i64,
}

pub trait GridEncoder: Send + Sync {
    fn encode(&self, grid: &MergedGrid, options: &EncodeOptions) -> Result<Vec<u8>, CodecError>;
}
