use serde::{Deserialize, Serialize};
use tracing::warn;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::parser::CellWarning;
use crate::store::Table;

/// Spreadsheet upload body: the raw file bytes as a JSON number array.
#[derive(Deserialize, ToSchema)]
pub struct UploadRequest {
    #[schema(example = json!([80, 75, 3, 4]))]
    pub data: Option<Vec<u8>>,

    #[schema(example = "cities.xlsx")]
    pub filename: Option<String>,
}

impl UploadRequest {
    pub fn bytes(&self) -> Result<&[u8], AppError> {
        self.data
            .as_deref()
            .ok_or_else(|| AppError::InvalidPayload("invalid data format".to_string()))
    }
}

#[derive(Serialize, ToSchema)]
pub struct UploadResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = 12)]
    pub count: usize,
    /// Cells that were stored with a default value.
    pub warnings: Vec<CellWarning>,
}

#[derive(Serialize, ToSchema)]
pub struct CountResponse {
    #[schema(example = true)]
    pub success: bool,
    #[schema(example = 2)]
    pub count: usize,
}

#[derive(Serialize, ToSchema)]
pub struct ErrorResponse {
    #[schema(example = false)]
    pub success: bool,
    #[schema(example = "city not found: 佛山")]
    pub error: String,
}

pub fn log_parse_warnings(table: Table, filename: Option<&str>, warnings: &[CellWarning]) {
    if warnings.is_empty() {
        return;
    }
    warn!(
        table = %table,
        filename = filename.unwrap_or("-"),
        count = warnings.len(),
        "Spreadsheet cells replaced with defaults"
    );
}
