use crate::api::calculation::{CalculateRequest, CalculateResponse};
use crate::api::upload::UploadRejected;
use crate::model::{
    CityYear, ContributionResult, PolicyRecord, ResultFilter, ResultSummary, SalaryRecord,
    StoredResult,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Social Insurance Contribution API",
        version = "0.1.0",
        description = r#"
## Social insurance & housing fund calculator

Computes the employer's yearly contribution per employee from uploaded
city policy and salary spreadsheets.

### 🔹 Workflow
1. **Upload policies**: `city_name, year, base_min, base_max, rate`
2. **Upload salaries**: `employee_id, employee_name, month (YYYYMM), salary_amount`
3. **Calculate** for one city and year; results are appended to the results table
4. **Query** results by city, year and employee name, with summary totals

### 📐 Rule
The monthly average salary of the year is clamped into `[base_min, base_max]`
and multiplied by `rate`; amounts are rounded to 2 decimals.

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::upload::upload_cities,
        crate::api::upload::upload_salaries,

        crate::api::cities::list_cities,
        crate::api::cities::city_options,
        crate::api::cities::list_salaries,

        crate::api::calculation::calculate,

        crate::api::results::list_results,
        crate::api::results::results_summary,
        crate::api::results::clear_results,
        crate::api::results::clear_all
    ),
    components(
        schemas(
            PolicyRecord,
            CityYear,
            SalaryRecord,
            ContributionResult,
            StoredResult,
            ResultFilter,
            ResultSummary,
            CalculateRequest,
            CalculateResponse,
            UploadRejected
        )
    ),
    tags(
        (name = "Upload", description = "Spreadsheet import"),
        (name = "Policy", description = "City contribution policies"),
        (name = "Salary", description = "Imported salary records"),
        (name = "Calculation", description = "Contribution calculation"),
        (name = "Results", description = "Stored results and reporting"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_every_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        for expected in [
            "/api/upload/cities",
            "/api/upload/salaries",
            "/api/cities",
            "/api/cities/options",
            "/api/salaries",
            "/api/calculate",
            "/api/results",
            "/api/results/summary",
            "/api/data",
        ] {
            assert!(paths.iter().any(|p| p.as_str() == expected), "missing {expected}");
        }
    }
}
