use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
#[schema(
    example = json!({
        "employee_id": "E001",
        "employee_name": "Zhang",
        "month": "202401",
        "salary_amount": 4000.0
    })
)]
pub struct SalaryRecord {
    #[schema(example = "E001")]
    pub employee_id: String,

    #[schema(example = "Zhang")]
    pub employee_name: String,

    /// YYYYMM
    #[schema(example = "202401")]
    pub month: String,

    #[schema(example = 4000.0)]
    pub salary_amount: f64,
}

impl SalaryRecord {
    /// First four characters of `month`. Not re-validated here.
    pub fn year(&self) -> &str {
        match self.month.char_indices().nth(4) {
            Some((idx, _)) => &self.month[..idx],
            None => &self.month,
        }
    }
}

/// Monthly average salary of one employee over one year.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct YearlyAverage {
    pub employee_name: String,
    pub year: String,
    pub avg_salary: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn salary(month: &str) -> SalaryRecord {
        SalaryRecord {
            employee_id: "E001".into(),
            employee_name: "Zhang".into(),
            month: month.into(),
            salary_amount: 1.0,
        }
    }

    #[test]
    fn year_is_month_prefix() {
        assert_eq!(salary("202403").year(), "2024");
    }

    #[test]
    fn short_month_yields_whole_value() {
        assert_eq!(salary("202").year(), "202");
        assert_eq!(salary("").year(), "");
    }
}
