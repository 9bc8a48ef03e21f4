use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One employee's contribution figures for a calculation run.
///
/// Amounts keep full floating precision; rounding to two decimals is left to
/// whoever renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "employee_name": "张三",
        "city_name": "佛山",
        "avg_salary": 3100.0,
        "contribution_base": 3500.0,
        "company_fee": 560.0
    })
)]
pub struct ContributionResult {
    pub employee_name: String,
    pub city_name: String,
    pub avg_salary: f64,
    pub contribution_base: f64,
    pub company_fee: f64,
}
