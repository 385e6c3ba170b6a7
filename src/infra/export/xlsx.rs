use rust_xlsxwriter::{DocProperties, ExcelDateTime, Workbook, Worksheet, XlsxError};

use crate::domain::entities::cell::CellValue;
use crate::domain::entities::merge_table::MergedGrid;
use crate::usecase::ports::codec::{CodecError, EncodeOptions, GridEncoder};

pub const MAX_ROWS: usize = 1_048_576;
pub const MAX_COLUMNS: usize = 16_384;

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxEncoder;

impl GridEncoder for XlsxEncoder {
    fn encode(&self, grid: &MergedGrid, options: &EncodeOptions) -> Result<Vec<u8>, CodecError> {
        check_limits(grid)?;

        let mut workbook = Workbook::new();
        // Pinned so that exporting the same merge twice gives identical bytes.
        let created = ExcelDateTime::from_timestamp(options.created_at)?;
        workbook.set_properties(&DocProperties::new().set_creation_datetime(&created));

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(&options.sheet_name)?;
        for (col_idx, header) in grid.headers().iter().enumerate() {
            if !header.is_empty() {
                worksheet.write_string(0, col_idx as u16, header)?;
            }
        }
        for (row_idx, row) in grid.rows().iter().enumerate() {
            for (col_idx, cell) in row.iter().enumerate() {
                write_cell(worksheet, (row_idx + 1) as u32, col_idx as u16, cell)?;
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}

fn check_limits(grid: &MergedGrid) -> Result<(), CodecError> {
    // One row is taken by the header.
    let rows = grid.rows().len() + 1;
    let columns = grid.width();
    if rows > MAX_ROWS || columns > MAX_COLUMNS {
        return Err(CodecError::GridTooLarge {
            rows,
            columns,
            max_rows: MAX_ROWS,
            max_columns: MAX_COLUMNS,
        });
    }
    Ok(())
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &CellValue,
) -> Result<(), XlsxError> {
    match cell {
        CellValue::Empty => {}
        CellValue::Text(value) => {
            worksheet.write_string(row, col, value)?;
        }
        CellValue::Number(value) => {
            worksheet.write_number(row, col, *value)?;
        }
        CellValue::Bool(value) => {
            worksheet.write_boolean(row, col, *value)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::merge_table::MergeTable;
    use crate::domain::entities::sheet::DecodedSheet;

    fn options() -> EncodeOptions {
        EncodeOptions {
            sheet_name: "Merged Data".to_string(),
            created_at: 1_700_000_000,
        }
    }

    #[test]
    fn encodes_a_zip_container() {
        let mut table = MergeTable::new();
        table.append_sheet(&DecodedSheet::new(
            vec!["A".to_string()],
            vec![vec![CellValue::Number(1.0)]],
        ));

        let bytes = XlsxEncoder
            .encode(&table.to_grid(), &options())
            .expect("grid should encode");

        assert!(bytes.starts_with(b"PK"), "xlsx output should be a zip archive");
    }

    #[test]
    fn empty_grid_still_encodes() {
        let bytes = XlsxEncoder
            .encode(&MergedGrid::default(), &options())
            .expect("empty grid should encode");

        assert!(!bytes.is_empty());
    }

    #[test]
    fn too_many_columns_is_rejected() {
        let mut table = MergeTable::new();
        let headers: Vec<String> = (0..=MAX_COLUMNS).map(|idx| format!("c{idx}")).collect();
        table.append_sheet(&DecodedSheet::new(headers, Vec::new()));

        let result = XlsxEncoder.encode(&table.to_grid(), &options());

        assert!(
            matches!(result, Err(CodecError::GridTooLarge { columns, .. }) if columns == MAX_COLUMNS + 1),
            "expected GridTooLarge, got {result:?}"
        );
    }
}
