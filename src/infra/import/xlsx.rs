use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, ExcelDateTime, Range, Reader};
use chrono::Timelike;

use crate::domain::entities::cell::CellValue;
use crate::domain::entities::sheet::DecodedSheet;
use crate::usecase::ports::codec::CodecError;

pub fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(v) => CellValue::text(v.as_str()),
        Data::Float(v) => CellValue::Number(*v),
        Data::Int(v) => CellValue::Number(*v as f64),
        Data::Bool(v) => CellValue::Bool(*v),
        Data::DateTime(v) => date_time_value(v),
        Data::DateTimeIso(v) => CellValue::text(v.as_str()),
        Data::DurationIso(v) => CellValue::text(v.as_str()),
        Data::Error(v) => CellValue::text(format!("{v:?}")),
        Data::Empty => CellValue::Empty,
    }
}

/// Dates become their `yyyy-mm-dd[ hh:mm:ss]` text; durations and serials outside
/// the date range keep the raw Excel number.
fn date_time_value(value: &ExcelDateTime) -> CellValue {
    if value.is_duration() {
        return CellValue::Number(value.as_f64());
    }
    // Serials carry float noise; round to the nearest second before formatting.
    let rounded = value
        .as_datetime()
        .map(|datetime| datetime + chrono::Duration::milliseconds(500));
    match rounded {
        Some(datetime) if datetime.num_seconds_from_midnight() == 0 => {
            CellValue::text(datetime.format("%Y-%m-%d").to_string())
        }
        Some(datetime) => CellValue::text(datetime.format("%Y-%m-%d %H:%M:%S").to_string()),
        None => CellValue::Number(value.as_f64()),
    }
}

/// Decodes the first worksheet of an xlsx/xlsm/xlsb/xls/ods workbook held in memory.
pub fn decode_workbook(bytes: &[u8]) -> Result<DecodedSheet, CodecError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or(CodecError::NoSheets)??;
    Ok(sheet_from_range(&range))
}

pub fn sheet_from_range(range: &Range<Data>) -> DecodedSheet {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return DecodedSheet::default();
    };

    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell_value(cell).to_string())
        .collect();

    let data = rows
        .map(|row| row.iter().map(cell_value).collect())
        .collect();
    DecodedSheet::new(headers, data)
}
