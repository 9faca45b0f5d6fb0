pub mod admin;
pub mod banner;
pub mod claim;
pub mod participate;
pub mod prizes;

pub use admin::admin_config;

use crate::error::AppError;
use actix_web::web;

/// Public event routes plus the admin scope, mounted under `/api`
pub fn api_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .app_data(web::JsonConfig::default().error_handler(|err, _req| {
                AppError::ValidationError(format!("잘못된 요청 형식입니다: {err}")).into()
            }))
            .route("/participate", web::post().to(participate::participate))
            .route("/claim", web::post().to(claim::claim))
            .route("/prizes", web::get().to(prizes::list_prizes))
            .route("/banner", web::get().to(banner::get_banner))
            .configure(admin_config),
    );
}
