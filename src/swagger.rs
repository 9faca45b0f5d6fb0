use actix_web::web;
use utoipa::OpenApi;
use utoipa::{
    Modify,
    openapi::security::{Http, HttpAuthScheme, SecurityScheme},
};
use utoipa_swagger_ui::SwaggerUi;

use crate::entities::ClaimStatus;
use crate::external::GoodsItem;
use crate::handlers;
use crate::models::*;
use crate::utils::PaginationInfo;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            )
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        handlers::participate::participate,
        handlers::claim::claim,
        handlers::prizes::list_prizes,
        handlers::banner::get_banner,
        handlers::admin::list_codes,
        handlers::admin::issue_codes,
        handlers::admin::bulk_import_codes,
        handlers::admin::list_prizes,
        handlers::admin::update_prize,
        handlers::admin::list_winners,
        handlers::admin::list_giftshow_goods,
        handlers::admin::get_giftshow_goods,
        handlers::admin::get_giftshow_balance,
    ),
    components(
        schemas(
            ApiError,
            ParticipateRequest,
            ParticipateResponse,
            PrizeSummary,
            ClaimRequest,
            ClaimResponse,
            ParticipationCodeResponse,
            CodeUsageStats,
            CodeListResponse,
            IssueCodesRequest,
            IssueCodesResponse,
            BulkImportRequest,
            BulkImportResponse,
            PrizeAdminResponse,
            UpdatePrizeRequest,
            WinnerResponse,
            WinnerListResponse,
            ClaimStatus,
            PaginationInfo,
            BannerData,
            BannerResponse,
            GoodsItem,
            GiftShowGoodsListResponse,
            GiftShowGoodsResponse,
            GiftShowBalanceResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "event", description = "Participation and prize claim API"),
        (name = "admin", description = "Code issuance, catalog and winner audit API"),
    ),
    info(
        title = "Random Box Event API",
        version = "1.0.0",
        description = "Random box promotion REST API documentation"
    ),
    servers(
        (url = "/api", description = "Local server")
    )
)]
pub struct ApiDoc;

pub fn swagger_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
    )
    .route(
        "/swagger-ui",
        web::get().to(|| async {
            actix_web::HttpResponse::Found()
                .append_header(("Location", "/swagger-ui/"))
                .finish()
        }),
    );
}
