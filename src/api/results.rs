use actix_web::{HttpResponse, web};
use serde_json::json;
use tracing::info;

use crate::calc;
use crate::error::AppError;
use crate::model::{ResultFilter, ResultSummary, StoredResult};
use crate::store::{Store, Table};

/// List calculation results
#[utoipa::path(
    get,
    path = "/api/results",
    params(ResultFilter),
    responses(
        (status = 200, description = "Matching results, newest first", body = [StoredResult]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Results"
)]
pub async fn list_results(
    store: web::Data<Store>,
    query: web::Query<ResultFilter>,
) -> Result<HttpResponse, AppError> {
    let rows = store.list_results(&query).await?;
    Ok(HttpResponse::Ok().json(rows))
}

/// Summarize calculation results
#[utoipa::path(
    get,
    path = "/api/results/summary",
    params(ResultFilter),
    responses(
        (status = 200, description = "Summary of matching results", body = ResultSummary),
        (status = 500, description = "Internal server error")
    ),
    tag = "Results"
)]
pub async fn results_summary(
    store: web::Data<Store>,
    query: web::Query<ResultFilter>,
) -> Result<HttpResponse, AppError> {
    let rows = store.list_results(&query).await?;
    Ok(HttpResponse::Ok().json(calc::summarize(&rows)))
}

/// Delete all calculation results
#[utoipa::path(
    delete,
    path = "/api/results",
    responses(
        (status = 200, description = "Results cleared", body = Object, example = json!({
            "message": "Results cleared",
            "deleted": 12
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Results"
)]
pub async fn clear_results(store: web::Data<Store>) -> Result<HttpResponse, AppError> {
    let deleted = store.clear_table(Table::Results).await?;
    Ok(HttpResponse::Ok().json(json!({
        "message": "Results cleared",
        "deleted": deleted
    })))
}

/// Delete all results, salaries and policies
#[utoipa::path(
    delete,
    path = "/api/data",
    responses(
        (status = 200, description = "All tables cleared", body = Object, example = json!({
            "message": "All data cleared"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Results"
)]
pub async fn clear_all(store: web::Data<Store>) -> Result<HttpResponse, AppError> {
    store.clear_all().await?;
    info!("All data cleared");
    Ok(HttpResponse::Ok().json(json!({
        "message": "All data cleared"
    })))
}
