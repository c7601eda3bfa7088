use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Contribution policy of one city for one year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "city_name": "Beijing",
        "year": "2024",
        "base_min": 5360.0,
        "base_max": 33891.0,
        "rate": 0.15
    })
)]
pub struct PolicyRecord {
    #[schema(example = "Beijing")]
    pub city_name: String,

    #[schema(example = "2024")]
    pub year: String,

    /// Lower bound of the contribution base
    #[schema(example = 5360.0)]
    pub base_min: f64,

    /// Upper bound of the contribution base
    #[schema(example = 33891.0)]
    pub base_max: f64,

    /// Employer rate, in (0, 1]
    #[schema(example = 0.15)]
    pub rate: f64,
}

impl PolicyRecord {
    pub fn matches(&self, city_name: &str, year: &str) -> bool {
        self.city_name == city_name && self.year == year
    }

    /// Clamps an average salary into `[base_min, base_max]`.
    pub fn clamp_base(&self, avg_salary: f64) -> f64 {
        if avg_salary < self.base_min {
            self.base_min
        } else if avg_salary > self.base_max {
            self.base_max
        } else {
            avg_salary
        }
    }
}

/// Selectable (city, year) pair for the calculation form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct CityYear {
    #[schema(example = "Beijing")]
    pub city_name: String,
    #[schema(example = "2024")]
    pub year: String,
}
