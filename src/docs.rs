use crate::api::calculate::CalculateRequest;
use crate::api::cities::CityListResponse;
use crate::api::common::{CountResponse, ErrorResponse, UploadRequest, UploadResponse};
use crate::api::results::ResultListResponse;
use crate::api::salaries::SalaryListResponse;
use crate::model::{City, ContributionResult, Salary};
use crate::parser::{CellWarning, WarningKind};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Social Insurance Contribution Calculator API",
        version = "0.1.0",
        description = r#"
## Social Insurance Contribution Calculator

Computes each employee's contribution base and employer fee from two uploaded
spreadsheets.

### 🔹 Workflow
- **Upload city standards** (`city_name, year, base_min, base_max, rate`)
- **Upload monthly salaries** (`employee_id, employee_name, month, salary_amount`)
- **Calculate** for one city: salaries are averaged per employee name, the
  average is clamped into the city's band and multiplied by its rate
- **Read results**, ordered by employee name

Headers are matched case-insensitively after trimming. Cells that are not
numbers are stored as 0 and reported back as warnings.

### 📦 Response Format
- `{ "success": true, ... }` on success
- `{ "success": false, "error": "..." }` on failure (400 for bad input, 500 for storage errors)

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::cities::upload_cities,
        crate::api::cities::list_cities,

        crate::api::salaries::upload_salaries,
        crate::api::salaries::list_salaries,

        crate::api::calculate::calculate_results,
        crate::api::results::list_results
    ),
    components(
        schemas(
            City,
            Salary,
            ContributionResult,
            UploadRequest,
            UploadResponse,
            CellWarning,
            WarningKind,
            CalculateRequest,
            CountResponse,
            ErrorResponse,
            CityListResponse,
            SalaryListResponse,
            ResultListResponse
        )
    ),
    tags(
        (name = "Cities", description = "City contribution standards"),
        (name = "Salaries", description = "Monthly employee salaries"),
        (name = "Calculation", description = "Contribution calculation and results"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_bodies_point_at_the_shared_schema() {
        let doc = ApiDoc::openapi().to_json().unwrap();

        assert!(doc.contains("#/components/schemas/ErrorResponse"));
        assert!(doc.contains("\"/api/calculate\""));
    }
}
