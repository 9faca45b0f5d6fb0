use crate::entities::prize_entity as prizes;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

/// Prizes eligible for a draw, in catalog insertion order.
///
/// Rows violating the catalog invariants are logged and left out of the draw.
pub async fn drawable<C: ConnectionTrait>(db: &C) -> Result<Vec<prizes::Model>, DbErr> {
    let rows = prizes::Entity::find()
        .filter(prizes::Column::Stock.gt(0))
        .filter(prizes::Column::Weight.gt(0))
        .order_by_asc(prizes::Column::Id)
        .all(db)
        .await?;

    Ok(rows
        .into_iter()
        .filter(|p| {
            if !p.is_consistent() {
                log::error!("Rejecting malformed prize row {}: stock={} weight={}", p.id, p.stock, p.weight);
                return false;
            }
            p.is_drawable()
        })
        .collect())
}

/// `UPDATE prizes SET stock = stock - 1 WHERE id = ? AND stock > 0`
///
/// Returns false when the prize ran out between selection and decrement.
pub async fn decrement_stock<C: ConnectionTrait>(db: &C, id: i64) -> Result<bool, DbErr> {
    let result = prizes::Entity::update_many()
        .col_expr(prizes::Column::Stock, Expr::col(prizes::Column::Stock).sub(1))
        .col_expr(prizes::Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(prizes::Column::Id.eq(id))
        .filter(prizes::Column::Stock.gt(0))
        .exec(db)
        .await?;
    Ok(result.rows_affected == 1)
}

pub async fn find<C: ConnectionTrait>(db: &C, id: i64) -> Result<Option<prizes::Model>, DbErr> {
    prizes::Entity::find_by_id(id).one(db).await
}

pub async fn all<C: ConnectionTrait>(db: &C) -> Result<Vec<prizes::Model>, DbErr> {
    prizes::Entity::find()
        .order_by_asc(prizes::Column::Id)
        .all(db)
        .await
}
