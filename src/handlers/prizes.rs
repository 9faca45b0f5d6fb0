use crate::models::*;
use crate::services::PrizeService;
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/prizes",
    tag = "event",
    responses(
        (status = 200, description = "추첨 가능한 경품 목록", body = [PrizeSummary])
    )
)]
pub async fn list_prizes(service: web::Data<PrizeService>) -> Result<HttpResponse> {
    match service.list_drawable().await {
        Ok(prizes) => Ok(HttpResponse::Ok().json(json!({ "success": true, "prizes": prizes }))),
        Err(e) => Ok(e.error_response()),
    }
}
