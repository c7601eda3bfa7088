use actix_web::{HttpResponse, web};
use serde::Serialize;
use serde_json::json;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::error::AppError;
use crate::ingest::{self, ParseOutcome};
use crate::store::Store;

#[derive(Serialize, ToSchema)]
pub struct UploadRejected {
    #[schema(example = "upload rejected: 1 invalid row(s)")]
    pub message: String,
    #[schema(example = json!(["row 3: base_min cannot exceed base_max"]))]
    pub errors: Vec<String>,
}

/// Any rejected row aborts the whole upload; so does a file without data rows.
fn accept<T>(kind: &str, outcome: ParseOutcome<T>) -> Result<Vec<T>, AppError> {
    let records = outcome.into_result().map_err(|rejection| {
        warn!(kind, ?rejection, "Upload rejected");
        AppError::from(rejection)
    })?;

    if records.is_empty() {
        warn!(kind, "Upload contained no data rows");
        return Err(AppError::InvalidUpload(vec![
            "file contains no data rows".to_string(),
        ]));
    }
    Ok(records)
}

/// Upload city policy spreadsheet
#[utoipa::path(
    post,
    path = "/api/upload/cities",
    request_body(
        content = String,
        description = "Spreadsheet (xlsx/xls/ods) with columns city_name, year, base_min, base_max, rate",
        content_type = "application/octet-stream"
    ),
    responses(
        (status = 200, description = "Policy table replaced", body = Object, example = json!({
            "message": "Policy data imported",
            "inserted": 3
        })),
        (status = 400, description = "Invalid rows or unreadable file", body = UploadRejected),
        (status = 500, description = "Internal server error")
    ),
    tag = "Upload"
)]
pub async fn upload_cities(
    store: web::Data<Store>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let policies = accept("cities", ingest::parse_policies(&body))?;
    let inserted = store.replace_policies(&policies).await?;

    info!(inserted, "Policy upload imported");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Policy data imported",
        "inserted": inserted
    })))
}

/// Upload salary spreadsheet
#[utoipa::path(
    post,
    path = "/api/upload/salaries",
    request_body(
        content = String,
        description = "Spreadsheet (xlsx/xls/ods) with columns employee_id, employee_name, month, salary_amount",
        content_type = "application/octet-stream"
    ),
    responses(
        (status = 200, description = "Salary table replaced", body = Object, example = json!({
            "message": "Salary data imported",
            "inserted": 36
        })),
        (status = 400, description = "Invalid rows or unreadable file", body = UploadRejected),
        (status = 500, description = "Internal server error")
    ),
    tag = "Upload"
)]
pub async fn upload_salaries(
    store: web::Data<Store>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let salaries = accept("salaries", ingest::parse_salaries(&body))?;
    let inserted = store.replace_salaries(&salaries).await?;

    info!(inserted, "Salary upload imported");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Salary data imported",
        "inserted": inserted
    })))
}
