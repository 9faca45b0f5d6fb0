use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::prize_entity;

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ParticipateRequest {
    /// 참여 코드 (예: EVENT-AB12CD34)
    #[serde(default)]
    pub code: String,
}

/// 화면에 보여줄 경품 정보
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrizeSummary {
    pub id: i64,
    pub name: String,
    pub image_url: String,
}

impl From<prize_entity::Model> for PrizeSummary {
    fn from(m: prize_entity::Model) -> Self {
        PrizeSummary {
            id: m.id,
            name: m.name,
            image_url: m.image_url,
        }
    }
}

/// Result of a successful draw
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DrawOutcome {
    pub winner_id: String,
    pub prize: PrizeSummary,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipateResponse {
    pub success: bool,
    pub winner_id: String,
    pub prize: PrizeSummary,
}

impl From<DrawOutcome> for ParticipateResponse {
    fn from(o: DrawOutcome) -> Self {
        ParticipateResponse {
            success: true,
            winner_id: o.winner_id,
            prize: o.prize,
        }
    }
}
