use crate::error::AppError;
use crate::models::*;
use crate::services::ClaimService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/claim",
    tag = "event",
    request_body = ClaimRequest,
    responses(
        (status = 200, description = "경품 발송 완료", body = ClaimResponse),
        (status = 400, description = "입력 오류 / 이미 수령함", body = ApiError),
        (status = 404, description = "당첨 기록 없음", body = ApiError),
        (status = 500, description = "발송 실패 (재시도 가능)", body = ApiError)
    )
)]
/// 당첨자 휴대폰으로 기프티콘을 발송한다. 당첨 기록당 최대 한 번.
pub async fn claim(
    service: web::Data<ClaimService>,
    request: web::Json<ClaimRequest>,
) -> Result<HttpResponse> {
    match service
        .claim(&request.winner_id, &request.phone_number)
        .await
    {
        Ok(receipt) => Ok(HttpResponse::Ok().json(ClaimResponse::from(receipt))),
        Err(e) => Ok(AppError::from(e).error_response()),
    }
}
