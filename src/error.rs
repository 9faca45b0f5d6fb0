use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::DbErr;
use crate::models::ApiError;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

const INTERNAL_MESSAGE: &str = "서버 오류가 발생했습니다.";

/// Draw engine failures, in validation order
#[derive(Error, Debug)]
pub enum DrawError {
    #[error("참여 코드가 필요합니다.")]
    InvalidInput,

    #[error("유효하지 않은 참여 코드입니다.")]
    CodeNotFound,

    #[error("이미 사용된 참여 코드입니다.")]
    CodeAlreadyUsed,

    #[error("모든 경품이 소진되었습니다.")]
    PrizesExhausted,

    #[error("Store unavailable: {0}")]
    Store(#[from] DbErr),
}

impl DrawError {
    pub fn code(&self) -> &'static str {
        match self {
            DrawError::InvalidInput => "INVALID_INPUT",
            DrawError::CodeNotFound => "CODE_NOT_FOUND",
            DrawError::CodeAlreadyUsed => "CODE_ALREADY_USED",
            DrawError::PrizesExhausted => "PRIZES_EXHAUSTED",
            DrawError::Store(_) => "STORE_UNAVAILABLE",
        }
    }
}

#[derive(Error, Debug)]
pub enum ClaimError {
    #[error("당첨자 ID와 휴대폰 번호가 필요합니다.")]
    InvalidInput,

    #[error("유효하지 않은 당첨자 정보입니다.")]
    WinnerNotFound,

    #[error("올바른 휴대폰 번호를 입력해주세요.")]
    InvalidPhoneNumber,

    #[error("이미 상품을 수령했습니다.")]
    AlreadyClaimed,

    /// Detail is provider-specific and only ever logged
    #[error("상품 발송 중 오류가 발생했습니다.")]
    FulfillmentFailed(String),

    #[error("Store unavailable: {0}")]
    Store(#[from] DbErr),
}

impl ClaimError {
    pub fn code(&self) -> &'static str {
        match self {
            ClaimError::InvalidInput => "INVALID_INPUT",
            ClaimError::WinnerNotFound => "WINNER_NOT_FOUND",
            ClaimError::InvalidPhoneNumber => "INVALID_PHONE_NUMBER",
            ClaimError::AlreadyClaimed => "ALREADY_CLAIMED",
            ClaimError::FulfillmentFailed(_) => "FULFILLMENT_FAILED",
            ClaimError::Store(_) => "STORE_UNAVAILABLE",
        }
    }
}

#[derive(Error, Debug)]
pub enum IssueError {
    #[error("생성할 코드 수는 1개에서 {max}개 사이여야 합니다.")]
    InvalidCount { max: usize },

    #[error("고유한 코드 생성에 실패했습니다.")]
    GenerationFailed,

    #[error("Store unavailable: {0}")]
    Store(#[from] DbErr),
}

impl IssueError {
    pub fn code(&self) -> &'static str {
        match self {
            IssueError::InvalidCount { .. } => "INVALID_COUNT",
            IssueError::GenerationFailed => "GENERATION_FAILED",
            IssueError::Store(_) => "STORE_UNAVAILABLE",
        }
    }
}

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("업로드할 코드가 없습니다.")]
    Empty,

    #[error("한 번에 최대 {max}개까지만 업로드 가능합니다.")]
    TooMany { max: usize },

    #[error("Store unavailable: {0}")]
    Store(#[from] DbErr),
}

impl ImportError {
    pub fn code(&self) -> &'static str {
        match self {
            ImportError::Empty => "EMPTY",
            ImportError::TooMany { .. } => "TOO_MANY",
            ImportError::Store(_) => "STORE_UNAVAILABLE",
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error(transparent)]
    Draw(#[from] DrawError),

    #[error(transparent)]
    Claim(#[from] ClaimError),

    #[error(transparent)]
    Issue(#[from] IssueError),

    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("External API error: {0}")]
    ExternalApiError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("HTTP request error: {0}")]
    ReqwestError(#[from] reqwest::Error),
}

fn failure(status: StatusCode, code: &str, message: &str) -> HttpResponse {
    HttpResponse::build(status).json(ApiError {
        success: false,
        error: message.to_string(),
        code: code.to_string(),
    })
}

fn internal(code: &str) -> HttpResponse {
    failure(StatusCode::INTERNAL_SERVER_ERROR, code, INTERNAL_MESSAGE)
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Draw(DrawError::Store(_))
            | AppError::Claim(ClaimError::Store(_))
            | AppError::Claim(ClaimError::FulfillmentFailed(_))
            | AppError::Issue(IssueError::Store(_))
            | AppError::Import(ImportError::Store(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Draw(_) | AppError::Issue(_) | AppError::Import(_) => StatusCode::BAD_REQUEST,
            AppError::Claim(ClaimError::WinnerNotFound) => StatusCode::NOT_FOUND,
            AppError::Claim(_) => StatusCode::BAD_REQUEST,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::AuthError(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ExternalApiError(_) => StatusCode::BAD_GATEWAY,
            AppError::DatabaseError(_) | AppError::ConfigError(_) | AppError::ReqwestError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        match self {
            AppError::Draw(DrawError::Store(err)) => {
                log::error!("Draw failed on store: {err}");
                internal("STORE_UNAVAILABLE")
            }
            AppError::Draw(e) => {
                log::info!("Participation rejected: {}", e.code());
                failure(status, e.code(), &e.to_string())
            }
            AppError::Claim(ClaimError::Store(err)) => {
                log::error!("Claim failed on store: {err}");
                internal("STORE_UNAVAILABLE")
            }
            AppError::Claim(e @ ClaimError::FulfillmentFailed(detail)) => {
                log::error!("Fulfillment failed: {detail}");
                failure(status, e.code(), &e.to_string())
            }
            AppError::Claim(e) => {
                log::info!("Claim rejected: {}", e.code());
                failure(status, e.code(), &e.to_string())
            }
            AppError::Issue(IssueError::Store(err)) => {
                log::error!("Code issue failed on store: {err}");
                internal("STORE_UNAVAILABLE")
            }
            AppError::Issue(e) => {
                log::warn!("Code issue rejected: {e}");
                failure(status, e.code(), &e.to_string())
            }
            AppError::Import(ImportError::Store(err)) => {
                log::error!("Code import failed on store: {err}");
                internal("STORE_UNAVAILABLE")
            }
            AppError::Import(e) => {
                log::warn!("Code import rejected: {e}");
                failure(status, e.code(), &e.to_string())
            }
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                failure(status, "VALIDATION_ERROR", msg)
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                failure(status, "AUTH_ERROR", "로그인이 필요합니다.")
            }
            AppError::NotFound(msg) => failure(status, "NOT_FOUND", msg),
            AppError::ExternalApiError(msg) => {
                log::error!("External API error: {msg}");
                failure(status, "EXTERNAL_API_ERROR", INTERNAL_MESSAGE)
            }
            AppError::DatabaseError(err) => {
                log::error!("Database error: {err}");
                internal("DATABASE_ERROR")
            }
            AppError::ConfigError(_) | AppError::ReqwestError(_) => {
                log::error!("Internal error: {self}");
                internal("INTERNAL_ERROR")
            }
        }
    }
}
