use serde::Serialize;
use serde_json::Value;
use strum_macros::Display;
use utoipa::ToSchema;

use super::{DecodeError, Row, SheetRow, normalize_row, spreadsheet::decode_first_sheet};
use crate::model::{City, Salary};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Display, ToSchema)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum WarningKind {
    /// Numeric field absent or blank, stored as 0.
    Missing,
    /// Numeric field present but unreadable as a number, stored as 0.
    NotNumeric,
    /// `base_min` is greater than `base_max`.
    InvertedBand,
}

/// A cell that was accepted with a substituted value.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CellWarning {
    #[schema(example = 3)]
    pub row: usize,
    #[schema(example = "base_min")]
    pub field: String,
    pub kind: WarningKind,
    #[schema(example = "n/a")]
    pub raw: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parsed<T> {
    pub records: Vec<T>,
    pub warnings: Vec<CellWarning>,
}

pub fn parse_cities(bytes: &[u8]) -> Result<Parsed<City>, DecodeError> {
    decode_first_sheet(bytes).map(cities_from_rows)
}

pub fn parse_salaries(bytes: &[u8]) -> Result<Parsed<Salary>, DecodeError> {
    decode_first_sheet(bytes).map(salaries_from_rows)
}

pub fn cities_from_rows(rows: Vec<SheetRow>) -> Parsed<City> {
    let mut warnings = Vec::new();

    let records = rows
        .into_iter()
        .map(|row| {
            let mut fields = RowFields::new(normalize_row(row.cells), row.number, &mut warnings);
            let city = City {
                city_name: fields.text("city_name"),
                year: fields.text("year"),
                base_min: fields.number("base_min"),
                base_max: fields.number("base_max"),
                rate: fields.number("rate"),
            };
            if city.base_min > city.base_max {
                fields.warn("base_min", WarningKind::InvertedBand, None);
            }
            city
        })
        .collect();

    Parsed { records, warnings }
}

pub fn salaries_from_rows(rows: Vec<SheetRow>) -> Parsed<Salary> {
    let mut warnings = Vec::new();

    let records = rows
        .into_iter()
        .map(|row| {
            let mut fields = RowFields::new(normalize_row(row.cells), row.number, &mut warnings);
            Salary {
                employee_id: fields.text("employee_id"),
                employee_name: fields.text("employee_name"),
                month: fields.text("month"),
                salary_amount: fields.number("salary_amount"),
            }
        })
        .collect();

    Parsed { records, warnings }
}

struct RowFields<'w> {
    row: Row,
    row_no: usize,
    warnings: &'w mut Vec<CellWarning>,
}

impl<'w> RowFields<'w> {
    fn new(row: Row, row_no: usize, warnings: &'w mut Vec<CellWarning>) -> Self {
        Self { row, row_no, warnings }
    }

    fn text(&self, field: &str) -> String {
        self.row.get(field).map(coerce_text).unwrap_or_default()
    }

    fn number(&mut self, field: &str) -> f64 {
        let coerced = self.row.get(field).map(coerce_number);
        match coerced {
            Some(Ok(n)) => n,
            Some(Err(kind)) => {
                let raw = self.row.get(field).map(coerce_text);
                self.warn(field, kind, raw);
                0.0
            }
            None => {
                self.warn(field, WarningKind::Missing, None);
                0.0
            }
        }
    }

    fn warn(&mut self, field: &str, kind: WarningKind, raw: Option<String>) {
        self.warnings.push(CellWarning {
            row: self.row_no,
            field: field.to_string(),
            kind,
            raw,
        });
    }
}

fn coerce_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_i64() {
            Some(i) => i.to_string(),
            None => n.as_f64().map(|f| f.to_string()).unwrap_or_default(),
        },
        other => other.to_string(),
    }
}

fn coerce_number(value: &Value) -> Result<f64, WarningKind> {
    match value {
        Value::Number(n) => n.as_f64().ok_or(WarningKind::NotNumeric),
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return Err(WarningKind::Missing);
            }
            s.parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .ok_or(WarningKind::NotNumeric)
        }
        Value::Null => Err(WarningKind::Missing),
        _ => Err(WarningKind::NotNumeric),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    /// Data rows numbered from sheet row 2, under a header on row 1.
    fn rows(value: Value) -> Vec<SheetRow> {
        value
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|v| v.as_object().cloned())
            .enumerate()
            .map(|(i, cells)| SheetRow { number: i + 2, cells })
            .collect()
    }

    #[test]
    fn parses_city_rows_with_messy_headers() {
        let parsed = cities_from_rows(rows(json!([
            { " City_Namte ": "佛山", "YEAR": 2024, "base_min": 3500, "Base_Max ": "30000", "rate": 0.16 }
        ])));

        assert_eq!(
            parsed.records,
            vec![City {
                city_name: "佛山".into(),
                year: "2024".into(),
                base_min: 3500.0,
                base_max: 30000.0,
                rate: 0.16,
            }]
        );
        assert!(parsed.warnings.is_empty());
    }

    #[test]
    fn missing_and_bad_numbers_default_to_zero() {
        let parsed = salaries_from_rows(rows(json!([
            { "employee_name": "张三", "salary_amount": "n/a" },
            { "employee_name": "李四" }
        ])));

        assert_eq!(parsed.records.len(), 2);
        assert_eq!(parsed.records[0].salary_amount, 0.0);
        assert_eq!(parsed.records[0].employee_id, "");
        assert_eq!(parsed.records[1].salary_amount, 0.0);

        assert_eq!(
            parsed.warnings,
            vec![
                CellWarning {
                    row: 2,
                    field: "salary_amount".into(),
                    kind: WarningKind::NotNumeric,
                    raw: Some("n/a".into()),
                },
                CellWarning {
                    row: 3,
                    field: "salary_amount".into(),
                    kind: WarningKind::Missing,
                    raw: None,
                },
            ]
        );
    }

    #[test]
    fn numeric_text_is_trimmed() {
        assert_eq!(coerce_number(&json!(" 4200.5 ")), Ok(4200.5));
        assert_eq!(coerce_number(&json!("")), Err(WarningKind::Missing));
        assert_eq!(coerce_number(&json!("NaN")), Err(WarningKind::NotNumeric));
        assert_eq!(coerce_number(&json!(true)), Ok(1.0));
    }

    #[test]
    fn numbers_render_as_text_without_trailing_zero() {
        assert_eq!(coerce_text(&json!(202401)), "202401");
        assert_eq!(coerce_text(&json!(3.5)), "3.5");
        assert_eq!(coerce_text(&json!(null)), "");
    }

    #[test]
    fn flags_inverted_band() {
        let parsed = cities_from_rows(rows(json!([
            { "city_name": "x", "year": "2024", "base_min": 5000, "base_max": 2000, "rate": 0.1 }
        ])));

        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.warnings.len(), 1);
        assert_eq!(parsed.warnings[0].kind, WarningKind::InvertedBand);
    }

    #[test]
    fn no_rows_is_not_an_error() {
        let parsed = salaries_from_rows(Vec::new());
        assert!(parsed.records.is_empty());
        assert!(parsed.warnings.is_empty());
    }
}
