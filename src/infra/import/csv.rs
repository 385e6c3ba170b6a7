use csv::ReaderBuilder;

use crate::domain::entities::cell::CellValue;
use crate::domain::entities::sheet::DecodedSheet;
use crate::usecase::ports::codec::CodecError;

/// Decodes CSV bytes; every cell is kept as text.
pub fn decode_csv(bytes: &[u8]) -> Result<DecodedSheet, CodecError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);
    let mut records = reader.records();

    let headers: Vec<String> = match records.next() {
        Some(record) => record?.iter().map(str::to_string).collect(),
        None => return Ok(DecodedSheet::default()),
    };

    let mut rows = Vec::new();
    for record in records {
        let record = record?;
        rows.push(record.iter().map(CellValue::text).collect());
    }

    Ok(DecodedSheet::new(headers, rows))
}
