use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Salary {
    #[schema(example = "1001")]
    pub employee_id: String,

    /// Grouping key for calculations; `employee_id` is not used for that.
    #[schema(example = "张三")]
    pub employee_name: String,

    #[schema(example = "202401")]
    pub month: String,

    #[schema(example = 3200.0)]
    pub salary_amount: f64,
}
