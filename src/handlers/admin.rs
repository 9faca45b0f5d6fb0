use crate::error::AppError;
use crate::external::GiftShowClient;
use crate::models::*;
use crate::services::{CodeService, PrizeService, WinnerService};
use actix_web::{HttpResponse, ResponseError, Result, web};
use serde_json::json;

#[utoipa::path(
    get,
    path = "/admin/codes",
    tag = "admin",
    params(
        ("page" = Option<u32>, Query, description = "페이지 (기본 1)"),
        ("per_page" = Option<u32>, Query, description = "페이지당 개수 (기본 20, 최대 1000)"),
        ("status" = Option<String>, Query, description = "used / unused")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "참여 코드 목록", body = CodeListResponse),
        (status = 401, description = "인증 실패", body = ApiError)
    )
)]
pub async fn list_codes(
    service: web::Data<CodeService>,
    query: web::Query<CodeListQuery>,
) -> Result<HttpResponse> {
    match service.list_codes(&query.into_inner()).await {
        Ok(list) => Ok(HttpResponse::Ok().json(list)),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/codes",
    tag = "admin",
    request_body = IssueCodesRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "코드 발급 완료", body = IssueCodesResponse),
        (status = 400, description = "개수 범위 오류 / 생성 실패", body = ApiError),
        (status = 401, description = "인증 실패", body = ApiError)
    )
)]
/// 무작위 참여 코드 발급 (1~100개)
pub async fn issue_codes(
    service: web::Data<CodeService>,
    request: web::Json<IssueCodesRequest>,
) -> Result<HttpResponse> {
    let count = request.count.unwrap_or(1);
    match service.issue_codes(count).await {
        Ok(codes) => {
            let message = format!("{}개의 코드가 생성되었습니다.", codes.len());
            Ok(HttpResponse::Ok().json(IssueCodesResponse {
                success: true,
                codes: codes.into_iter().map(Into::into).collect(),
                message,
            }))
        }
        Err(e) => Ok(AppError::from(e).error_response()),
    }
}

#[utoipa::path(
    post,
    path = "/admin/codes/bulk",
    tag = "admin",
    request_body = BulkImportRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "업로드 결과 (생성 / 중복 / 실패)", body = BulkImportResponse),
        (status = 400, description = "빈 목록 / 개수 초과", body = ApiError),
        (status = 401, description = "인증 실패", body = ApiError)
    )
)]
/// 외부 코드 일괄 등록 (최대 1000개)
pub async fn bulk_import_codes(
    service: web::Data<CodeService>,
    request: web::Json<BulkImportRequest>,
) -> Result<HttpResponse> {
    match service.bulk_import_codes(&request.codes).await {
        Ok(outcome) => Ok(HttpResponse::Ok().json(BulkImportResponse::from(outcome))),
        Err(e) => Ok(AppError::from(e).error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/prizes",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "전체 경품 (재고 / 가중치 포함)", body = [PrizeAdminResponse]),
        (status = 401, description = "인증 실패", body = ApiError)
    )
)]
pub async fn list_prizes(service: web::Data<PrizeService>) -> Result<HttpResponse> {
    match service.list_all().await {
        Ok(prizes) => Ok(HttpResponse::Ok().json(json!({ "success": true, "prizes": prizes }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    patch,
    path = "/admin/prizes/{id}",
    tag = "admin",
    params(("id" = i64, Path, description = "경품 ID")),
    request_body = UpdatePrizeRequest,
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "수정된 경품", body = PrizeAdminResponse),
        (status = 400, description = "음수 재고 / 가중치", body = ApiError),
        (status = 404, description = "경품 없음", body = ApiError)
    )
)]
pub async fn update_prize(
    service: web::Data<PrizeService>,
    path: web::Path<i64>,
    request: web::Json<UpdatePrizeRequest>,
) -> Result<HttpResponse> {
    match service
        .update(path.into_inner(), request.into_inner())
        .await
    {
        Ok(prize) => Ok(HttpResponse::Ok().json(json!({ "success": true, "prize": prize }))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/winners",
    tag = "admin",
    params(
        ("page" = Option<u32>, Query, description = "페이지 (기본 1)"),
        ("per_page" = Option<u32>, Query, description = "페이지당 개수 (기본 20)")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "당첨 기록 (최신순, 전화번호 마스킹)", body = WinnerListResponse),
        (status = 401, description = "인증 실패", body = ApiError)
    )
)]
pub async fn list_winners(
    service: web::Data<WinnerService>,
    query: web::Query<WinnerListQuery>,
) -> Result<HttpResponse> {
    match service.list_winners(&query.into_inner()).await {
        Ok(page) => Ok(HttpResponse::Ok().json(WinnerListResponse::from(page))),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/giftshow/goods",
    tag = "admin",
    params(
        ("start" = Option<u32>, Query, description = "페이지 (기본 1)"),
        ("size" = Option<u32>, Query, description = "페이지당 개수 (기본 100, 최대 500)"),
        ("keyword" = Option<String>, Query, description = "상품명 / 브랜드명 포함 검색")
    ),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "기프트쇼 상품 목록", body = GiftShowGoodsListResponse),
        (status = 401, description = "인증 실패", body = ApiError),
        (status = 502, description = "기프트쇼 오류", body = ApiError)
    )
)]
/// 경품 상품코드 설정용 기프트쇼 상품 검색
pub async fn list_giftshow_goods(
    client: web::Data<GiftShowClient>,
    query: web::Query<GoodsQuery>,
) -> Result<HttpResponse> {
    match client.list_goods(query.start(), query.size()).await {
        Ok(page) => {
            let goods: Vec<_> = match query.keyword() {
                Some(keyword) => page.goods.into_iter().filter(|g| g.matches(keyword)).collect(),
                None => page.goods,
            };
            Ok(HttpResponse::Ok().json(GiftShowGoodsListResponse {
                success: true,
                total: page.total,
                goods,
            }))
        }
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/giftshow/goods/{code}",
    tag = "admin",
    params(("code" = String, Path, description = "기프트쇼 상품코드")),
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "상품 상세", body = GiftShowGoodsResponse),
        (status = 400, description = "상품코드 형식 오류", body = ApiError),
        (status = 404, description = "상품 없음", body = ApiError),
        (status = 502, description = "기프트쇼 오류", body = ApiError)
    )
)]
pub async fn get_giftshow_goods(
    client: web::Data<GiftShowClient>,
    path: web::Path<String>,
) -> Result<HttpResponse> {
    match client.goods_detail(&path.into_inner()).await {
        Ok(goods) => Ok(HttpResponse::Ok().json(GiftShowGoodsResponse {
            success: true,
            goods,
        })),
        Err(e) => Ok(e.error_response()),
    }
}

#[utoipa::path(
    get,
    path = "/admin/giftshow/balance",
    tag = "admin",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "비즈머니 잔액", body = GiftShowBalanceResponse),
        (status = 401, description = "인증 실패", body = ApiError),
        (status = 502, description = "기프트쇼 오류", body = ApiError)
    )
)]
pub async fn get_giftshow_balance(client: web::Data<GiftShowClient>) -> Result<HttpResponse> {
    match client.balance().await {
        Ok(balance) => Ok(HttpResponse::Ok().json(GiftShowBalanceResponse {
            success: true,
            balance,
        })),
        Err(e) => Ok(e.error_response()),
    }
}

pub fn admin_config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .route("/codes", web::get().to(list_codes))
            .route("/codes", web::post().to(issue_codes))
            .route("/codes/bulk", web::post().to(bulk_import_codes))
            .route("/prizes", web::get().to(list_prizes))
            .route("/prizes/{id}", web::patch().to(update_prize))
            .route("/winners", web::get().to(list_winners))
            .route("/giftshow/goods", web::get().to(list_giftshow_goods))
            .route("/giftshow/goods/{code}", web::get().to(get_giftshow_goods))
            .route("/giftshow/balance", web::get().to(get_giftshow_balance)),
    );
}
