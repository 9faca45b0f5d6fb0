use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::prize_entity;

/// 관리자용 경품 정보 (재고, 가중치, 상품코드 포함)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PrizeAdminResponse {
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub stock: i64,
    pub weight: i32,
    pub fulfillment_goods_code: String,
    pub updated_at: DateTime<Utc>,
}

impl From<prize_entity::Model> for PrizeAdminResponse {
    fn from(m: prize_entity::Model) -> Self {
        PrizeAdminResponse {
            id: m.id,
            name: m.name,
            image_url: m.image_url,
            stock: m.stock,
            weight: m.weight,
            fulfillment_goods_code: m.fulfillment_goods_code,
            updated_at: m.updated_at,
        }
    }
}

/// PATCH /admin/prizes/{id}; absent fields stay unchanged
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePrizeRequest {
    pub stock: Option<i64>,
    pub weight: Option<i32>,
    pub fulfillment_goods_code: Option<String>,
    pub image_url: Option<String>,
}
