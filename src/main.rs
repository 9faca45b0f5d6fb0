use actix_web::{App, HttpServer, middleware::Logger, web};
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use chrono::Local;  // timestamp in log lines
use std::sync::Arc;
use std::time::Duration;

use randombox_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    external::{FulfillmentProvider, GiftShowClient, MockFulfillmentProvider},
    handlers,
    middlewares::{AdminAuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 설정 로드
    let config = Config::from_toml().expect("Failed to load configuration file");

    // DB 연결 및 마이그레이션 (경품 시드 포함)
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // 기프트쇼 클라이언트 (상품 조회 / 잔액은 mock 여부와 무관)
    let giftshow = GiftShowClient::new(config.giftshow.clone())
        .expect("Failed to build GiftShow client");

    // 발송 제공자
    let provider: Arc<dyn FulfillmentProvider> = if config.giftshow.use_mock {
        log::warn!("GIFTSHOW_USE_MOCK_API is set; prizes will not actually be sent");
        Arc::new(MockFulfillmentProvider)
    } else {
        Arc::new(giftshow.clone())
    };
    // Outer bound on the whole provider call, a little above the HTTP client timeout
    let fulfillment_timeout = Duration::from_secs(config.giftshow.timeout_secs + 5);

    let draw_service = DrawService::new(pool.clone());
    let claim_service = ClaimService::new(pool.clone(), provider, fulfillment_timeout);
    let code_service = CodeService::new(pool.clone(), &config.event);
    let prize_service = PrizeService::new(pool.clone());
    let winner_service = WinnerService::new(pool.clone());

    let admin_secret = config.admin.secret_key.clone();
    let banner = config.banner.clone();

    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(AdminAuthMiddleware::new(&admin_secret))
            .wrap(create_cors())
            .wrap(Logger::default())
            .app_data(web::Data::new(draw_service.clone()))
            .app_data(web::Data::new(claim_service.clone()))
            .app_data(web::Data::new(code_service.clone()))
            .app_data(web::Data::new(prize_service.clone()))
            .app_data(web::Data::new(winner_service.clone()))
            .app_data(web::Data::new(giftshow.clone()))
            .app_data(web::Data::new(banner.clone()))
            .configure(swagger_config)
            .configure(handlers::api_config)
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
