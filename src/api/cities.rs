use actix_web::{HttpResponse, web};
use serde::Serialize;
use tracing::info;
use utoipa::ToSchema;

use super::common::{UploadRequest, UploadResponse, log_parse_warnings};
use crate::error::AppError;
use crate::model::City;
use crate::parser::parse_cities;
use crate::store::{Store, Table};

#[derive(Serialize, ToSchema)]
pub struct CityListResponse {
    #[schema(example = true)]
    pub success: bool,
    pub data: Vec<City>,
}

/// Replace the stored city standards with the uploaded sheet
#[utoipa::path(
    post,
    path = "/api/cities",
    request_body = UploadRequest,
    responses(
        (status = 200, description = "Cities stored", body = UploadResponse),
        (status = 400, description = "Missing data or unreadable spreadsheet", body = crate::api::common::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::api::common::ErrorResponse)
    ),
    tag = "Cities"
)]
pub async fn upload_cities(
    store: web::Data<dyn Store>,
    payload: web::Json<UploadRequest>,
) -> Result<HttpResponse, AppError> {
    let parsed = parse_cities(payload.bytes()?)?;
    log_parse_warnings(Table::Cities, payload.filename.as_deref(), &parsed.warnings);

    store.replace_cities(&parsed.records).await?;
    info!(count = parsed.records.len(), "City standards uploaded");

    Ok(HttpResponse::Ok().json(UploadResponse {
        success: true,
        count: parsed.records.len(),
        warnings: parsed.warnings,
    }))
}

/// List all stored city standards
#[utoipa::path(
    get,
    path = "/api/cities",
    responses(
        (status = 200, body = CityListResponse),
        (status = 500, body = crate::api::common::ErrorResponse)
    ),
    tag = "Cities"
)]
pub async fn list_cities(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let data = store.list_cities().await?;

    Ok(HttpResponse::Ok().json(CityListResponse {
        success: true,
        data,
    }))
}
