use derive_more::Display;
use serde_json::{Map, Value};

pub mod dataset;
pub mod normalizer;
pub mod spreadsheet;

pub use dataset::{CellWarning, Parsed, WarningKind, parse_cities, parse_salaries};
pub use normalizer::{normalize_field_name, normalize_row};

/// One decoded sheet row: column header -> cell value.
pub type Row = Map<String, Value>;

/// A data row together with its 1-based row number in the sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    pub number: usize,
    pub cells: Row,
}

/// The workbook bytes could not be read as a spreadsheet.
#[derive(Debug, Display)]
#[display(fmt = "{}", _0)]
pub struct DecodeError(pub String);

impl std::error::Error for DecodeError {}
