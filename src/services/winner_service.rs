use crate::database::winners;
use crate::error::AppResult;
use crate::models::*;
use crate::utils::{PaginatedResponse, PaginationParams};
use sea_orm::DatabaseConnection;

#[derive(Clone)]
pub struct WinnerService {
    pool: DatabaseConnection,
}

impl WinnerService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn list_winners(
        &self,
        query: &WinnerListQuery,
    ) -> AppResult<PaginatedResponse<WinnerResponse>> {
        let params = PaginationParams::new(query.page, query.per_page);
        let (rows, total) =
            winners::page(&self.pool, params.get_offset(), params.get_limit()).await?;
        let items = rows.into_iter().map(WinnerResponse::from).collect();
        Ok(PaginatedResponse::new(items, &params, total))
    }
}
