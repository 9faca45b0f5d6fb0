use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::{ClaimStatus, prize_entity, winner_entity};
use crate::utils::{PaginatedResponse, PaginationInfo, mask_phone};

#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct WinnerListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

/// 당첨 기록 (관리자 감사용, 전화번호 마스킹)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WinnerResponse {
    pub id: String,
    pub participation_code_id: i64,
    pub prize_id: i64,
    pub prize_name: Option<String>,
    pub phone_number: Option<String>,
    pub claim_status: ClaimStatus,
    pub transaction_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub sent_at: Option<DateTime<Utc>>,
}

impl From<(winner_entity::Model, Option<prize_entity::Model>)> for WinnerResponse {
    fn from((w, prize): (winner_entity::Model, Option<prize_entity::Model>)) -> Self {
        WinnerResponse {
            claim_status: w.claim_status(),
            transaction_id: w.transaction_id().map(str::to_string),
            phone_number: (!w.user_phone_number.is_empty())
                .then(|| mask_phone(&w.user_phone_number)),
            prize_name: prize.map(|p| p.name),
            id: w.id,
            participation_code_id: w.participation_code_id,
            prize_id: w.prize_id,
            created_at: w.created_at,
            sent_at: w.sent_at,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WinnerListResponse {
    pub success: bool,
    pub winners: Vec<WinnerResponse>,
    pub pagination: PaginationInfo,
}

impl From<PaginatedResponse<WinnerResponse>> for WinnerListResponse {
    fn from(page: PaginatedResponse<WinnerResponse>) -> Self {
        WinnerListResponse {
            success: true,
            winners: page.items,
            pagination: page.pagination,
        }
    }
}
