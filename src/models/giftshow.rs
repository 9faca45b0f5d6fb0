use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::external::GoodsItem;

const DEFAULT_GOODS_PAGE_SIZE: u32 = 100;
const MAX_GOODS_PAGE_SIZE: u32 = 500;

/// GET /admin/giftshow/goods
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GoodsQuery {
    /// 1부터 시작
    pub start: Option<u32>,
    pub size: Option<u32>,
    /// 상품명 / 브랜드명 필터 (현재 페이지 안에서만 적용)
    pub keyword: Option<String>,
}

impl GoodsQuery {
    pub fn start(&self) -> u32 {
        self.start.unwrap_or(1).max(1)
    }

    pub fn size(&self) -> u32 {
        self.size
            .unwrap_or(DEFAULT_GOODS_PAGE_SIZE)
            .clamp(1, MAX_GOODS_PAGE_SIZE)
    }

    pub fn keyword(&self) -> Option<&str> {
        self.keyword.as_deref().map(str::trim).filter(|k| !k.is_empty())
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GiftShowGoodsListResponse {
    pub success: bool,
    pub total: i64,
    pub goods: Vec<GoodsItem>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GiftShowGoodsResponse {
    pub success: bool,
    pub goods: GoodsItem,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct GiftShowBalanceResponse {
    pub success: bool,
    /// 비즈머니 잔액 (원)
    pub balance: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goods_query_bounds() {
        let query = GoodsQuery {
            start: Some(0),
            size: Some(10_000),
            keyword: Some("  ".into()),
        };
        assert_eq!(query.start(), 1);
        assert_eq!(query.size(), 500);
        assert_eq!(query.keyword(), None);
        assert_eq!(GoodsQuery::default().size(), 100);
    }
}
