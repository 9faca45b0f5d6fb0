use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Prefix written into `fulfillment_transaction_id` while a provider call is in flight.
pub const CLAIM_PENDING_PREFIX: &str = "PENDING:";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ClaimStatus {
    Unclaimed,
    Pending,
    Sent,
}

/// 당첨 기록
/// - participation_code_id 와 1:1
/// - fulfillment_transaction_id: '' (미수령) -> 'PENDING:<tr_id>' (발송 중) -> 기프트쇼 주문번호
///   발송 완료 후에는 다시 바뀌지 않는다
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "winners")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(unique)]
    pub participation_code_id: i64,
    pub prize_id: i64,
    pub user_phone_number: String,
    pub fulfillment_transaction_id: String,
    pub sent_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Model {
    pub fn claim_status(&self) -> ClaimStatus {
        if self.fulfillment_transaction_id.is_empty() {
            ClaimStatus::Unclaimed
        } else if self.fulfillment_transaction_id.starts_with(CLAIM_PENDING_PREFIX) {
            ClaimStatus::Pending
        } else {
            ClaimStatus::Sent
        }
    }

    /// `sent_at` is set exactly when the claim is sent; a reserved or sent
    /// claim always carries a phone number.
    pub fn is_consistent(&self) -> bool {
        match self.claim_status() {
            ClaimStatus::Unclaimed => self.sent_at.is_none(),
            ClaimStatus::Pending => self.sent_at.is_none() && !self.user_phone_number.is_empty(),
            ClaimStatus::Sent => self.sent_at.is_some() && !self.user_phone_number.is_empty(),
        }
    }

    /// The persisted provider transaction id, if fulfillment completed
    pub fn transaction_id(&self) -> Option<&str> {
        match self.claim_status() {
            ClaimStatus::Sent => Some(self.fulfillment_transaction_id.as_str()),
            _ => None,
        }
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::participation_codes::Entity",
        from = "Column::ParticipationCodeId",
        to = "super::participation_codes::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    ParticipationCode,
    #[sea_orm(
        belongs_to = "super::prizes::Entity",
        from = "Column::PrizeId",
        to = "super::prizes::Column::Id",
        on_update = "NoAction",
        on_delete = "NoAction"
    )]
    Prize,
}

impl Related<super::participation_codes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ParticipationCode.def()
    }
}

impl Related<super::prizes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Prize.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
