use crate::config::BannerConfig;
use crate::models::*;
use actix_web::{HttpResponse, Result, web};

#[utoipa::path(
    get,
    path = "/banner",
    tag = "event",
    responses(
        (status = 200, description = "메인 배너", body = BannerResponse)
    )
)]
pub async fn get_banner(banner: web::Data<BannerConfig>) -> Result<HttpResponse> {
    Ok(HttpResponse::Ok().json(BannerResponse {
        success: true,
        data: BannerData::from(banner.get_ref()),
    }))
}
