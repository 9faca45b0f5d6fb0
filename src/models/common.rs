use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Body of every non-2xx response
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    pub success: bool,
    /// 사용자에게 보여줄 메시지
    pub error: String,
    /// INVALID_INPUT, CODE_NOT_FOUND, ...
    pub code: String,
}
