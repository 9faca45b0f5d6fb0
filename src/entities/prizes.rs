use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 경품
/// - weight: 상대 가중치, 합이 100일 필요 없음 (추첨 시 stock > 0 인 경품끼리 정규화)
/// - stock: 남은 수량, 추첨 1회당 정확히 1 감소, 0 미만 불가
/// - fulfillment_goods_code: 기프트쇼 상품코드 (발송 시 그대로 전달)
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "prizes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub name: String,
    pub image_url: String,
    pub stock: i64,
    pub weight: i32,
    pub fulfillment_goods_code: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Model {
    /// 추첨 대상 여부: 재고가 있고 가중치가 양수
    pub fn is_drawable(&self) -> bool {
        self.stock > 0 && self.weight > 0
    }

    pub fn is_consistent(&self) -> bool {
        self.stock >= 0 && self.weight >= 0
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::winners::Entity")]
    Winners,
}

impl Related<super::winners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Winners.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
