use crate::entities::participation_code_entity as codes;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};
use std::collections::HashSet;

/// Bound-parameter chunk size for `code IN (...)` lookups
const LOOKUP_CHUNK: usize = 500;

fn checked(model: codes::Model) -> Result<codes::Model, DbErr> {
    if model.is_consistent() {
        Ok(model)
    } else {
        Err(DbErr::Custom(format!(
            "malformed participation code row {}: is_used={} used_at={:?}",
            model.id, model.is_used, model.used_at
        )))
    }
}

pub async fn find_by_code<C: ConnectionTrait>(
    db: &C,
    code: &str,
) -> Result<Option<codes::Model>, DbErr> {
    codes::Entity::find()
        .filter(codes::Column::Code.eq(code))
        .one(db)
        .await?
        .map(checked)
        .transpose()
}

pub async fn exists<C: ConnectionTrait>(db: &C, code: &str) -> Result<bool, DbErr> {
    let count = codes::Entity::find()
        .filter(codes::Column::Code.eq(code))
        .count(db)
        .await?;
    Ok(count > 0)
}

pub async fn insert<C: ConnectionTrait>(db: &C, code: &str) -> Result<codes::Model, DbErr> {
    codes::ActiveModel {
        code: Set(code.to_string()),
        is_used: Set(false),
        created_at: Set(Utc::now()),
        used_at: Set(None),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// `UPDATE ... SET is_used = true, used_at = now WHERE id = ? AND is_used = false`
///
/// Returns false when another request consumed the code first.
pub async fn mark_used<C: ConnectionTrait>(
    db: &C,
    id: i64,
    now: DateTime<Utc>,
) -> Result<bool, DbErr> {
    let result = codes::Entity::update_many()
        .col_expr(codes::Column::IsUsed, Expr::value(true))
        .col_expr(codes::Column::UsedAt, Expr::value(now))
        .filter(codes::Column::Id.eq(id))
        .filter(codes::Column::IsUsed.eq(false))
        .exec(db)
        .await?;
    Ok(result.rows_affected == 1)
}

/// Subset of `candidates` already present in the store
pub async fn find_existing<C: ConnectionTrait>(
    db: &C,
    candidates: &[String],
) -> Result<HashSet<String>, DbErr> {
    let mut existing = HashSet::new();
    for chunk in candidates.chunks(LOOKUP_CHUNK) {
        let rows: Vec<String> = codes::Entity::find()
            .select_only()
            .column(codes::Column::Code)
            .filter(codes::Column::Code.is_in(chunk.iter().cloned()))
            .into_tuple()
            .all(db)
            .await?;
        existing.extend(rows);
    }
    Ok(existing)
}

/// Newest first; `used` filters on usage state when given
pub async fn page<C: ConnectionTrait>(
    db: &C,
    used: Option<bool>,
    offset: u64,
    limit: u64,
) -> Result<(Vec<codes::Model>, u64), DbErr> {
    let mut query = codes::Entity::find();
    if let Some(used) = used {
        query = query.filter(codes::Column::IsUsed.eq(used));
    }

    let total = query.clone().count(db).await?;
    let rows = query
        .order_by_desc(codes::Column::CreatedAt)
        .order_by_desc(codes::Column::Id)
        .limit(limit)
        .offset(offset)
        .all(db)
        .await?;

    let rows = rows.into_iter().map(checked).collect::<Result<Vec<_>, _>>()?;
    Ok((rows, total))
}

/// (total, used)
pub async fn usage_counts<C: ConnectionTrait>(db: &C) -> Result<(u64, u64), DbErr> {
    let total = codes::Entity::find().count(db).await?;
    let used = codes::Entity::find()
        .filter(codes::Column::IsUsed.eq(true))
        .count(db)
        .await?;
    Ok((total, used))
}
