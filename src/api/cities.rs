use actix_web::{HttpResponse, web};

use crate::calc;
use crate::error::AppError;
use crate::model::{CityYear, PolicyRecord, SalaryRecord};
use crate::store::Store;

/// List stored city policies
#[utoipa::path(
    get,
    path = "/api/cities",
    responses(
        (status = 200, description = "Policies, newest year first", body = [PolicyRecord]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Policy"
)]
pub async fn list_cities(store: web::Data<Store>) -> Result<HttpResponse, AppError> {
    let policies = store.list_policies().await?;
    Ok(HttpResponse::Ok().json(policies))
}

/// Selectable (city, year) pairs
#[utoipa::path(
    get,
    path = "/api/cities/options",
    responses(
        (status = 200, description = "Distinct pairs, newest year first", body = [CityYear]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Policy"
)]
pub async fn city_options(store: web::Data<Store>) -> Result<HttpResponse, AppError> {
    let policies = store.list_policies().await?;
    Ok(HttpResponse::Ok().json(calc::list_distinct_city_years(&policies)))
}

/// List stored salaries
#[utoipa::path(
    get,
    path = "/api/salaries",
    responses(
        (status = 200, description = "Salaries, oldest month first", body = [SalaryRecord]),
        (status = 500, description = "Internal server error")
    ),
    tag = "Salary"
)]
pub async fn list_salaries(store: web::Data<Store>) -> Result<HttpResponse, AppError> {
    let salaries = store.list_salaries().await?;
    Ok(HttpResponse::Ok().json(salaries))
}
