use std::io::Cursor;

use calamine::{Data, Reader, open_workbook_auto_from_rs};
use serde_json::{Number, Value};

use super::{DecodeError, Row, SheetRow};

/// Decode the first sheet of a workbook into header-keyed rows.
///
/// The first non-empty row supplies the headers. Columns without a header are
/// dropped, empty cells are left out of their row, and rows with no cells left
/// are skipped. Each row keeps its 1-based number in the sheet.
pub fn decode_first_sheet(bytes: &[u8]) -> Result<Vec<SheetRow>, DecodeError> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))
        .map_err(|e| DecodeError(e.to_string()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| DecodeError("workbook contains no sheets".to_string()))?
        .map_err(|e| DecodeError(e.to_string()))?;

    // zero-based; the used range need not start at A1
    let header_index = range.start().map_or(0, |(row, _)| row as usize);

    let mut rows = range.rows();
    let Some(header_cells) = rows.next() else {
        return Ok(Vec::new());
    };
    let headers: Vec<Option<String>> = header_cells.iter().map(header_text).collect();

    Ok(rows
        .enumerate()
        .map(|(offset, cells)| SheetRow {
            number: header_index + offset + 2,
            cells: to_row(&headers, cells),
        })
        .filter(|row| !row.cells.is_empty())
        .collect())
}

fn header_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        other => {
            let text = other.to_string();
            if text.trim().is_empty() { None } else { Some(text) }
        }
    }
}

fn to_row(headers: &[Option<String>], cells: &[Data]) -> Row {
    headers
        .iter()
        .zip(cells)
        .filter_map(|(header, cell)| {
            let header = header.as_ref()?;
            cell_value(cell).map(|value| (header.clone(), value))
        })
        .collect()
}

/// Convert a cell to its JSON form. `None` means the cell counts as absent.
pub(crate) fn cell_value(cell: &Data) -> Option<Value> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) => Some(Value::String(s.clone())),
        Data::Int(i) => Some(Value::from(*i)),
        Data::Float(f) => float_value(*f),
        Data::Bool(b) => Some(Value::Bool(*b)),
        // serial day number, the same figure the cell stores
        Data::DateTime(dt) => float_value(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(Value::String(s.clone())),
    }
}

fn float_value(f: f64) -> Option<Value> {
    const MAX_SAFE_INT: f64 = 9_007_199_254_740_991.0;

    if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INT {
        Some(Value::from(f as i64))
    } else {
        Number::from_f64(f).map(Value::Number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_garbage_bytes() {
        let err = decode_first_sheet(b"definitely not a workbook").unwrap_err();
        assert!(!err.0.is_empty());
    }

    #[test]
    fn rejects_empty_payload() {
        assert!(decode_first_sheet(&[]).is_err());
    }

    #[test]
    fn integral_floats_become_integers() {
        assert_eq!(cell_value(&Data::Float(2024.0)), Some(json!(2024)));
        assert_eq!(cell_value(&Data::Float(0.16)), Some(json!(0.16)));
        assert_eq!(cell_value(&Data::Float(f64::NAN)), None);
    }

    #[test]
    fn empty_and_error_cells_are_absent() {
        assert_eq!(cell_value(&Data::Empty), None);
        assert_eq!(
            cell_value(&Data::Error(calamine::CellErrorType::Div0)),
            None
        );
    }

    #[test]
    fn header_only_sheet_has_no_rows() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "city_name").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        assert_eq!(decode_first_sheet(&bytes).unwrap(), Vec::new());
    }

    #[test]
    fn rows_keep_their_sheet_numbers() {
        let mut workbook = rust_xlsxwriter::Workbook::new();
        let sheet = workbook.add_worksheet();
        // header on row 3, a gap on row 5
        sheet.write_string(2, 0, "city_name").unwrap();
        sheet.write_string(3, 0, "佛山").unwrap();
        sheet.write_string(5, 0, "广州").unwrap();
        let bytes = workbook.save_to_buffer().unwrap();

        let rows = decode_first_sheet(&bytes).unwrap();

        let numbers: Vec<usize> = rows.iter().map(|row| row.number).collect();
        assert_eq!(numbers, vec![4, 6]);
        assert_eq!(rows[1].cells["city_name"], json!("广州"));
    }

    #[test]
    fn rows_skip_unlabelled_columns() {
        let headers = vec![Some("city_name".to_string()), None];
        let cells = vec![Data::String("佛山".into()), Data::Float(1.0)];

        let row = to_row(&headers, &cells);

        assert_eq!(row.len(), 1);
        assert_eq!(row["city_name"], json!("佛山"));
    }
}
