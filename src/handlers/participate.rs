use crate::error::AppError;
use crate::models::*;
use crate::services::DrawService;
use actix_web::{HttpResponse, ResponseError, Result, web};

#[utoipa::path(
    post,
    path = "/participate",
    tag = "event",
    request_body = ParticipateRequest,
    responses(
        (status = 200, description = "추첨 성공", body = ParticipateResponse),
        (status = 400, description = "코드 없음 / 이미 사용됨 / 경품 소진", body = ApiError),
        (status = 500, description = "서버 오류", body = ApiError)
    )
)]
/// 참여 코드를 사용해 경품을 추첨한다.
///
/// 코드 사용 처리, 재고 차감, 당첨 기록 생성이 한 번에 커밋되며
/// 같은 코드로 동시에 요청해도 당첨은 한 번뿐이다.
pub async fn participate(
    service: web::Data<DrawService>,
    request: web::Json<ParticipateRequest>,
) -> Result<HttpResponse> {
    match service.participate(&request.code).await {
        Ok(outcome) => Ok(HttpResponse::Ok().json(ParticipateResponse::from(outcome))),
        Err(e) => Ok(AppError::from(e).error_response()),
    }
}
