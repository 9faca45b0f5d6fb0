use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 일회용 참여 코드
/// - is_used 는 false -> true 로 한 번만 전환되며, used_at 과 같은 UPDATE 에서 설정된다
/// - code 는 생성 후 변경되지 않는다
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "participation_codes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique)]
    pub code: String,
    pub is_used: bool,
    pub created_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
}

impl Model {
    /// is_used == true  <=>  used_at != NULL
    pub fn is_consistent(&self) -> bool {
        self.is_used == self.used_at.is_some()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::winners::Entity")]
    Winner,
}

impl Related<super::winners::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Winner.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
