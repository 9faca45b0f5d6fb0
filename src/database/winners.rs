use crate::entities::{CLAIM_PENDING_PREFIX, prize_entity as prizes, winner_entity as winners};
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use uuid::Uuid;

pub fn pending_marker(tr_id: &str) -> String {
    format!("{CLAIM_PENDING_PREFIX}{tr_id}")
}

fn checked(model: winners::Model) -> Result<winners::Model, DbErr> {
    if model.is_consistent() {
        Ok(model)
    } else {
        Err(DbErr::Custom(format!(
            "malformed winner row {}: fulfillment_transaction_id={:?} sent_at={:?}",
            model.id, model.fulfillment_transaction_id, model.sent_at
        )))
    }
}

pub async fn insert<C: ConnectionTrait>(
    db: &C,
    participation_code_id: i64,
    prize_id: i64,
) -> Result<winners::Model, DbErr> {
    let now = Utc::now();
    winners::ActiveModel {
        id: Set(Uuid::new_v4().to_string()),
        participation_code_id: Set(participation_code_id),
        prize_id: Set(prize_id),
        user_phone_number: Set(String::new()),
        fulfillment_transaction_id: Set(String::new()),
        sent_at: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(db)
    .await
}

pub async fn find<C: ConnectionTrait>(db: &C, id: &str) -> Result<Option<winners::Model>, DbErr> {
    winners::Entity::find_by_id(id.to_string())
        .one(db)
        .await?
        .map(checked)
        .transpose()
}

/// Reserve the winner for one in-flight provider call.
///
/// `UPDATE winners SET fulfillment_transaction_id = 'PENDING:<tr_id>', user_phone_number = ?
///  WHERE id = ? AND fulfillment_transaction_id = ''`
pub async fn reserve_claim<C: ConnectionTrait>(
    db: &C,
    id: &str,
    phone_number: &str,
    tr_id: &str,
) -> Result<bool, DbErr> {
    let result = winners::Entity::update_many()
        .col_expr(
            winners::Column::FulfillmentTransactionId,
            Expr::value(pending_marker(tr_id)),
        )
        .col_expr(winners::Column::UserPhoneNumber, Expr::value(phone_number))
        .col_expr(winners::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(winners::Column::Id.eq(id))
        .filter(winners::Column::FulfillmentTransactionId.eq(""))
        .exec(db)
        .await?;
    Ok(result.rows_affected == 1)
}

/// Swap our reservation for the provider transaction id.
pub async fn finalize_claim<C: ConnectionTrait>(
    db: &C,
    id: &str,
    tr_id: &str,
    transaction_id: &str,
    sent_at: DateTime<Utc>,
) -> Result<bool, DbErr> {
    let result = winners::Entity::update_many()
        .col_expr(
            winners::Column::FulfillmentTransactionId,
            Expr::value(transaction_id),
        )
        .col_expr(winners::Column::SentAt, Expr::value(sent_at))
        .col_expr(winners::Column::UpdatedAt, Expr::value(sent_at))
        .filter(winners::Column::Id.eq(id))
        .filter(winners::Column::FulfillmentTransactionId.eq(pending_marker(tr_id)))
        .exec(db)
        .await?;
    Ok(result.rows_affected == 1)
}

/// Drop our reservation so the winner can retry.
pub async fn release_claim<C: ConnectionTrait>(db: &C, id: &str, tr_id: &str) -> Result<bool, DbErr> {
    let result = winners::Entity::update_many()
        .col_expr(winners::Column::FulfillmentTransactionId, Expr::value(""))
        .col_expr(winners::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(winners::Column::Id.eq(id))
        .filter(winners::Column::FulfillmentTransactionId.eq(pending_marker(tr_id)))
        .exec(db)
        .await?;
    Ok(result.rows_affected == 1)
}

/// Newest first, joined with the prize row
pub async fn page<C: ConnectionTrait>(
    db: &C,
    offset: u64,
    limit: u64,
) -> Result<(Vec<(winners::Model, Option<prizes::Model>)>, u64), DbErr> {
    let total = winners::Entity::find().count(db).await?;
    let rows = winners::Entity::find()
        .find_also_related(prizes::Entity)
        .order_by_desc(winners::Column::CreatedAt)
        .limit(limit)
        .offset(offset)
        .all(db)
        .await?;
    let rows = rows
        .into_iter()
        .map(|(winner, prize)| Ok((checked(winner)?, prize)))
        .collect::<Result<Vec<_>, DbErr>>()?;
    Ok((rows, total))
}

pub async fn count<C: ConnectionTrait>(db: &C) -> Result<u64, DbErr> {
    winners::Entity::find().count(db).await
}
