use actix_web::{post, web, HttpResponse};

use crate::dto::GenerateSqlResponse;
use crate::error::AppError;
use crate::server::AppState;
use crate::services::sql_generation_service;

/// The body is taken as raw bytes so that "not JSON", "missing key" and
/// "bad embedded JSON" stay distinct 400 responses.
#[post("/generate-sql")]
pub async fn generate_sql(
    app_state: web::Data<AppState>,
    body: web::Bytes,
) -> Result<HttpResponse, AppError> {
    let input = sql_generation_service::normalize_input(&body)?;
    let output =
        sql_generation_service::generate_sql(app_state.llm_provider.as_ref(), &input).await?;

    Ok(HttpResponse::Ok().json(GenerateSqlResponse { output }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(generate_sql);
}
