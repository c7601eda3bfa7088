use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::info;
use utoipa::ToSchema;

use crate::calc;
use crate::error::AppError;
use crate::model::ContributionResult;
use crate::store::Store;

#[derive(Deserialize, ToSchema)]
pub struct CalculateRequest {
    #[schema(example = "Beijing")]
    pub city_name: String,
    #[schema(example = "2024")]
    pub year: String,
}

#[derive(Serialize, ToSchema)]
pub struct CalculateResponse {
    #[schema(example = "Calculated contributions for 3 employee(s)")]
    pub message: String,
    #[schema(example = "Beijing")]
    pub city_name: String,
    #[schema(example = "2024")]
    pub year: String,
    #[schema(example = "2024-06-01T08:00:00Z", format = "date-time", value_type = String)]
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub data: Vec<ContributionResult>,
}

/// Run a contribution calculation
///
/// Reads every stored salary and policy, computes the contributions for the
/// selected city/year and appends them to the results table.
#[utoipa::path(
    post,
    path = "/api/calculate",
    request_body = CalculateRequest,
    responses(
        (status = 201, description = "Results calculated and stored", body = CalculateResponse),
        (status = 404, description = "No policy for the city/year", body = Object, example = json!({
            "message": "no contribution policy found for Shenzhen 2024"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Calculation"
)]
pub async fn calculate(
    store: web::Data<Store>,
    payload: web::Json<CalculateRequest>,
) -> Result<HttpResponse, AppError> {
    let salaries = store.list_salaries().await?;
    let policies = store.list_policies().await?;

    let results = calc::calculate(&salaries, &policies, &payload.city_name, &payload.year)?;
    let created_at = store.insert_results(&results).await?;

    info!(
        city = %payload.city_name,
        year = %payload.year,
        employees = results.len(),
        "Contribution calculation stored"
    );

    let CalculateRequest { city_name, year } = payload.into_inner();
    Ok(HttpResponse::Created().json(CalculateResponse {
        message: format!("Calculated contributions for {} employee(s)", results.len()),
        city_name,
        year,
        created_at,
        data: results,
    }))
}
