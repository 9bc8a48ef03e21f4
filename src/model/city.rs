use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Contribution standard of one city for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "city_name": "佛山",
        "year": "2024",
        "base_min": 3500.0,
        "base_max": 30000.0,
        "rate": 0.16
    })
)]
pub struct City {
    #[schema(example = "佛山")]
    pub city_name: String,

    #[schema(example = "2024")]
    pub year: String,

    #[schema(example = 3500.0)]
    pub base_min: f64,

    #[schema(example = 30000.0)]
    pub base_max: f64,

    /// Employer contribution rate, usually within [0, 1].
    #[schema(example = 0.16)]
    pub rate: f64,
}
