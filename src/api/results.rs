use actix_web::{HttpResponse, web};
use serde::Serialize;
use utoipa::ToSchema;

use crate::error::AppError;
use crate::model::ContributionResult;
use crate::store::Store;

#[derive(Serialize, ToSchema)]
pub struct ResultListResponse {
    #[schema(example = true)]
    pub success: bool,
    pub data: Vec<ContributionResult>,
}

/// Latest calculation results, ordered by employee name
#[utoipa::path(
    get,
    path = "/api/results",
    responses(
        (status = 200, body = ResultListResponse),
        (status = 500, body = crate::api::common::ErrorResponse)
    ),
    tag = "Calculation"
)]
pub async fn list_results(store: web::Data<dyn Store>) -> Result<HttpResponse, AppError> {
    let data = store.list_results().await?;

    Ok(HttpResponse::Ok().json(ResultListResponse {
        success: true,
        data,
    }))
}
