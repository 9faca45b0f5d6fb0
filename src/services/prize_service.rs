use crate::database::prizes;
use crate::entities::prize_entity;
use crate::error::{AppError, AppResult};
use crate::models::*;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, IntoActiveModel, Set};

#[derive(Clone)]
pub struct PrizeService {
    pool: DatabaseConnection,
}

impl PrizeService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 참여 화면용: 현재 추첨 가능한 경품만
    pub async fn list_drawable(&self) -> AppResult<Vec<PrizeSummary>> {
        let rows = prizes::drawable(&self.pool).await?;
        Ok(rows.into_iter().map(PrizeSummary::from).collect())
    }

    pub async fn list_all(&self) -> AppResult<Vec<PrizeAdminResponse>> {
        let rows = prizes::all(&self.pool).await?;
        Ok(rows.into_iter().map(PrizeAdminResponse::from).collect())
    }

    /// 재고/가중치/상품코드 수정
    pub async fn update(
        &self,
        prize_id: i64,
        request: UpdatePrizeRequest,
    ) -> AppResult<PrizeAdminResponse> {
        if let Some(stock) = request.stock
            && stock < 0
        {
            return Err(AppError::ValidationError(
                "재고는 0 이상이어야 합니다.".to_string(),
            ));
        }
        if let Some(weight) = request.weight
            && weight < 0
        {
            return Err(AppError::ValidationError(
                "가중치는 0 이상이어야 합니다.".to_string(),
            ));
        }

        let prize: prize_entity::Model = prizes::find(&self.pool, prize_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("경품을 찾을 수 없습니다: {prize_id}")))?;

        let mut active = prize.into_active_model();
        if let Some(stock) = request.stock {
            active.stock = Set(stock);
        }
        if let Some(weight) = request.weight {
            active.weight = Set(weight);
        }
        if let Some(goods_code) = request.fulfillment_goods_code {
            active.fulfillment_goods_code = Set(goods_code.trim().to_string());
        }
        if let Some(image_url) = request.image_url {
            active.image_url = Set(image_url);
        }
        active.updated_at = Set(Utc::now());

        let updated = active.update(&self.pool).await?;
        log::info!(
            "Prize {} updated: stock={}, weight={}, goods_code={}",
            updated.id,
            updated.stock,
            updated.weight,
            updated.fulfillment_goods_code
        );
        Ok(updated.into())
    }
}
