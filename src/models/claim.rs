use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRequest {
    #[serde(default)]
    pub winner_id: String,
    /// 하이픈 등 숫자 외 문자는 제거 후 검증
    #[serde(default)]
    pub phone_number: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimReceipt {
    pub transaction_id: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClaimResponse {
    pub success: bool,
    pub transaction_id: String,
    pub message: String,
}

impl From<ClaimReceipt> for ClaimResponse {
    fn from(r: ClaimReceipt) -> Self {
        ClaimResponse {
            success: true,
            transaction_id: r.transaction_id,
            message: "상품이 성공적으로 발송되었습니다.".to_string(),
        }
    }
}
