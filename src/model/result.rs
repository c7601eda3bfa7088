use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Employer contribution of one employee for one city/year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "employee_name": "Zhang",
        "city_name": "Beijing",
        "year": "2024",
        "avg_salary": 4000.0,
        "contribution_base": 5360.0,
        "company_fee": 804.0
    })
)]
pub struct ContributionResult {
    pub employee_name: String,
    pub city_name: String,
    pub year: String,
    pub avg_salary: f64,
    pub contribution_base: f64,
    pub company_fee: f64,
}

/// A row of the `results` table.
#[derive(Debug, Clone, PartialEq, Serialize, sqlx::FromRow, ToSchema)]
pub struct StoredResult {
    #[schema(example = 1)]
    pub id: u64,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub result: ContributionResult,

    #[schema(example = "2024-06-01T08:00:00Z", format = "date-time", value_type = String)]
    pub created_at: DateTime<Utc>,
}

impl AsRef<ContributionResult> for ContributionResult {
    fn as_ref(&self) -> &ContributionResult {
        self
    }
}

impl AsRef<ContributionResult> for StoredResult {
    fn as_ref(&self) -> &ContributionResult {
        &self.result
    }
}

/// Filter over stored results. Absent or empty fields do not constrain.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct ResultFilter {
    /// Exact city name
    #[schema(example = "Beijing")]
    pub city: Option<String>,
    /// Exact year
    #[schema(example = "2024")]
    pub year: Option<String>,
    /// Case-insensitive substring of the employee name
    #[schema(example = "zh")]
    pub employee_name: Option<String>,
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}

impl ResultFilter {
    pub fn city(&self) -> Option<&str> {
        non_empty(&self.city)
    }

    pub fn year(&self) -> Option<&str> {
        non_empty(&self.year)
    }

    pub fn employee_name(&self) -> Option<&str> {
        non_empty(&self.employee_name)
    }

    pub fn matches(&self, result: &ContributionResult) -> bool {
        if self.city().is_some_and(|city| result.city_name != city) {
            return false;
        }
        if self.year().is_some_and(|year| result.year != year) {
            return false;
        }
        match self.employee_name() {
            Some(needle) => result
                .employee_name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            None => true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, ToSchema)]
#[schema(
    example = json!({
        "distinct_employee_count": 3,
        "total_fee": 7387.65,
        "avg_fee_per_row": 2462.55
    })
)]
pub struct ResultSummary {
    pub distinct_employee_count: usize,
    pub total_fee: f64,
    pub avg_fee_per_row: f64,
}
