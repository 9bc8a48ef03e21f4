use actix_web::{HttpResponse, web};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use super::common::CountResponse;
use crate::calculator::calculate;
use crate::error::AppError;
use crate::store::Store;
use crate::utils::city_lock::CityLocks;

#[derive(Deserialize, ToSchema)]
pub struct CalculateRequest {
    #[serde(rename = "cityName")]
    #[schema(example = "佛山")]
    pub city_name: Option<String>,
}

/// Compute results for `city_name` against every stored salary and replace the
/// result table. Returns the number of results written.
pub async fn run_calculation(
    store: &dyn Store,
    locks: &CityLocks,
    city_name: &str,
) -> Result<usize, AppError> {
    let lock = locks.lock_for(city_name).await;
    let _running = lock.lock().await;

    let city = store
        .find_city(city_name)
        .await?
        .ok_or_else(|| AppError::CityNotFound(city_name.to_string()))?;

    let salaries = store.list_salaries().await?;
    if salaries.is_empty() {
        return Err(AppError::NoSalaryData);
    }

    let results = calculate(&city, &salaries);
    store.replace_results(&results).await?;

    info!(
        city_name,
        salaries = salaries.len(),
        results = results.len(),
        "Contribution results calculated"
    );
    Ok(results.len())
}

#[utoipa::path(
    post,
    path = "/api/calculate",
    request_body = CalculateRequest,
    responses(
        (status = 200, description = "Results replaced", body = CountResponse),
        (status = 400, description = "Missing city name, unknown city or no salary data", body = crate::api::common::ErrorResponse),
        (status = 500, description = "Store failure", body = crate::api::common::ErrorResponse)
    ),
    tag = "Calculation"
)]
pub async fn calculate_results(
    store: web::Data<dyn Store>,
    locks: web::Data<CityLocks>,
    payload: web::Json<CalculateRequest>,
) -> Result<HttpResponse, AppError> {
    let city_name = payload
        .city_name
        .as_deref()
        .filter(|name| !name.is_empty())
        .ok_or(AppError::MissingCityName)?;

    let count = run_calculation(store.get_ref(), locks.get_ref(), city_name).await?;

    Ok(HttpResponse::Ok().json(CountResponse {
        success: true,
        count,
    }))
}
