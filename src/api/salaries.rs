use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use super::common::{UploadRequest, UploadResponse, log_parse_warnings};
use crate::error::AppError;
use crate::model::Salary;
use crate::parser::parse_salaries;
use crate::store::{Store, Table};

#[derive(Serialize, ToSchema)]
pub struct SalaryListResponse {
    #[schema(example = true)]
    pub success: bool,
    pub data: Vec<Salary>,
}

#[utoipa::path(
    post,
    path = "/api/salaries",
    request_body = UploadRequest,
    responses(
        (status = 200, description = "Salaries stored", body = UploadResponse),
        (status = 400, description = "Missing data or unreadable spreadsheet", body = crate::api::common::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::api::common::ErrorResponse)
    ),
    tag = "Salaries"
)]
pub async fn upload_salaries(
    store: web::Data<dyn Store>,
    payload: web::Json<UploadRequest>,
) -> Result<HttpResponse, AppError> {
    let parsed = parse_salaries(payload.bytes()?)?;
    log_parse_warnings(Table::Salaries, payload.filename.as_deref(), &parsed.warnings);

    store.replace_salaries(&parsed.records).await?;
    info!(count = parsed.records.len(), "Salaries uploaded");

    Ok(HttpResponse::Ok().json(UploadResponse {
        success: true,
        count: parsed.records.len(),
        warnings: parsed.warnings,
    }))
}

#[utoipa::path(
    get,
    path = "/api/salaries",
    responses(
        (status = 200, body = SalaryListResponse),
        (status = 500, body = crate::api::common::ErrorResponse)
    ),
    tag = "Salaries"
)]
pub async fn list_salaries(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let data = store.list_salaries().await?;

    Ok(HttpResponse::Ok().json(SalaryListResponse {
        success: true,
        data,
    }))
}
