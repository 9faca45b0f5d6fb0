use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub admin: AdminConfig,
    #[serde(default)]
    pub event: EventConfig,
    #[serde(default)]
    pub banner: BannerConfig,
    pub giftshow: GiftShowConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Bearer credential for /api/admin/*; empty rejects every admin request
    pub secret_key: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventConfig {
    #[serde(default = "default_code_prefix")]
    pub code_prefix: String,
    #[serde(default = "default_max_issue_count")]
    pub max_issue_count: usize,
    #[serde(default = "default_max_import_count")]
    pub max_import_count: usize,
}

impl Default for EventConfig {
    fn default() -> Self {
        Self {
            code_prefix: default_code_prefix(),
            max_issue_count: default_max_issue_count(),
            max_import_count: default_max_import_count(),
        }
    }
}

fn default_code_prefix() -> String {
    "EVENT-".to_string()
}

fn default_max_issue_count() -> usize {
    100
}

fn default_max_import_count() -> usize {
    1000
}

/// 메인 배너 (GET /api/banner)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BannerConfig {
    #[serde(default = "default_banner_title")]
    pub title: String,
    #[serde(default = "default_banner_description")]
    pub description: String,
    #[serde(default = "default_banner_image_url")]
    pub image_url: String,
    #[serde(default = "default_banner_active")]
    pub active: bool,
}

impl Default for BannerConfig {
    fn default() -> Self {
        Self {
            title: default_banner_title(),
            description: default_banner_description(),
            image_url: default_banner_image_url(),
            active: default_banner_active(),
        }
    }
}

fn default_banner_title() -> String {
    "Interactive Randombox Event".to_string()
}

fn default_banner_description() -> String {
    "참여하고 상품을 받아보세요!".to_string()
}

fn default_banner_image_url() -> String {
    "/images/banner.jpg".to_string()
}

fn default_banner_active() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GiftShowConfig {
    pub base_url: String,
    pub auth_key: String,
    pub auth_token: String,
    /// 기프트쇼 비즈 회원 ID
    pub user_id: String,
    /// 발신번호
    pub callback_no: String,
    #[serde(default = "default_mms_title")]
    pub mms_title: String,
    #[serde(default = "default_mms_message")]
    pub mms_message: String,
    #[serde(default)]
    pub dev_mode: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default)]
    pub use_mock: bool,
}

fn default_mms_title() -> String {
    "경품 발송".to_string()
}

fn default_mms_message() -> String {
    "랜덤박스 이벤트 경품이 발송되었습니다.".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Config {
    /// Parses a config file body; `path` only labels the error
    pub fn parse(raw: &str, path: &str) -> AppResult<Self> {
        toml::from_str(raw)
            .map_err(|e| AppError::ConfigError(format!("failed to parse {path}: {e}")))
    }

    pub fn from_toml() -> AppResult<Self> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            // File first, then environment overrides below
            Ok(config_str) => Self::parse(&config_str, &config_path)?,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                let database_url = get_env("DATABASE_URL").ok_or_else(|| {
                    AppError::ConfigError(
                        "DATABASE_URL is not set and no config.toml was found".to_string(),
                    )
                })?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    admin: AdminConfig {
                        secret_key: get_env("ADMIN_SECRET_KEY").unwrap_or_default(),
                    },
                    event: EventConfig {
                        code_prefix: get_env("EVENT_CODE_PREFIX")
                            .unwrap_or_else(default_code_prefix),
                        max_issue_count: get_env_parse(
                            "EVENT_MAX_ISSUE_COUNT",
                            default_max_issue_count(),
                        ),
                        max_import_count: get_env_parse(
                            "EVENT_MAX_IMPORT_COUNT",
                            default_max_import_count(),
                        ),
                    },
                    banner: BannerConfig::default(),
                    giftshow: GiftShowConfig {
                        base_url: get_env("GIFTSHOW_BASE_URL")
                            .unwrap_or_else(|| "https://bizapi.giftishow.com/bizApi".to_string()),
                        auth_key: get_env("GIFTSHOW_AUTH_KEY").unwrap_or_default(),
                        auth_token: get_env("GIFTSHOW_AUTH_TOKEN").unwrap_or_default(),
                        user_id: get_env("GIFTSHOW_USER_ID").unwrap_or_default(),
                        callback_no: get_env("GIFTSHOW_CALLBACK_NO").unwrap_or_default(),
                        mms_title: get_env("GIFTSHOW_MMS_TITLE")
                            .unwrap_or_else(default_mms_title),
                        mms_message: get_env("GIFTSHOW_MMS_MESSAGE")
                            .unwrap_or_else(default_mms_message),
                        dev_mode: get_env_parse("GIFTSHOW_DEV_MODE", false),
                        timeout_secs: get_env_parse("GIFTSHOW_TIMEOUT_SECS", default_timeout_secs()),
                        use_mock: get_env_parse("GIFTSHOW_USE_MOCK_API", false),
                    },
                }
            }
            Err(e) => {
                return Err(AppError::ConfigError(format!(
                    "failed to read config file {config_path}: {e}"
                )));
            }
        };

        // Environment variables win even when the file exists
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("ADMIN_SECRET_KEY") {
            config.admin.secret_key = v;
        }
        if let Ok(v) = env::var("EVENT_CODE_PREFIX") {
            config.event.code_prefix = v;
        }
        if let Ok(v) = env::var("EVENT_MAX_ISSUE_COUNT")
            && let Ok(n) = v.parse()
        {
            config.event.max_issue_count = n;
        }
        if let Ok(v) = env::var("EVENT_MAX_IMPORT_COUNT")
            && let Ok(n) = v.parse()
        {
            config.event.max_import_count = n;
        }
        if let Ok(v) = env::var("BANNER_TITLE") {
            config.banner.title = v;
        }
        if let Ok(v) = env::var("BANNER_DESCRIPTION") {
            config.banner.description = v;
        }
        if let Ok(v) = env::var("BANNER_IMAGE_URL") {
            config.banner.image_url = v;
        }
        if let Ok(v) = env::var("BANNER_ACTIVE")
            && let Ok(b) = v.parse()
        {
            config.banner.active = b;
        }
        if let Ok(v) = env::var("GIFTSHOW_BASE_URL") {
            config.giftshow.base_url = v;
        }
        if let Ok(v) = env::var("GIFTSHOW_AUTH_KEY") {
            config.giftshow.auth_key = v;
        }
        if let Ok(v) = env::var("GIFTSHOW_AUTH_TOKEN") {
            config.giftshow.auth_token = v;
        }
        if let Ok(v) = env::var("GIFTSHOW_USER_ID") {
            config.giftshow.user_id = v;
        }
        if let Ok(v) = env::var("GIFTSHOW_CALLBACK_NO") {
            config.giftshow.callback_no = v;
        }
        if let Ok(v) = env::var("GIFTSHOW_MMS_TITLE") {
            config.giftshow.mms_title = v;
        }
        if let Ok(v) = env::var("GIFTSHOW_MMS_MESSAGE") {
            config.giftshow.mms_message = v;
        }
        if let Ok(v) = env::var("GIFTSHOW_DEV_MODE")
            && let Ok(b) = v.parse()
        {
            config.giftshow.dev_mode = b;
        }
        if let Ok(v) = env::var("GIFTSHOW_TIMEOUT_SECS")
            && let Ok(n) = v.parse()
        {
            config.giftshow.timeout_secs = n;
        }
        if let Ok(v) = env::var("GIFTSHOW_USE_MOCK_API")
            && let Ok(b) = v.parse()
        {
            config.giftshow.use_mock = b;
        }

        if config.admin.secret_key.is_empty() {
            log::warn!("ADMIN_SECRET_KEY is empty; admin endpoints will reject every request");
        }

        Ok(config)
    }
}
