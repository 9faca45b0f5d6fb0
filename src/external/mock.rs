use super::fulfillment::{FulfillmentProvider, FulfillmentReceipt, FulfillmentRequest};
use crate::error::AppResult;
use crate::utils::mask_phone;
use async_trait::async_trait;
use chrono::Utc;

/// Local development stand-in for the vendor (GIFTSHOW_USE_MOCK_API=true).
#[derive(Clone, Default)]
pub struct MockFulfillmentProvider;

#[async_trait]
impl FulfillmentProvider for MockFulfillmentProvider {
    async fn send(&self, request: &FulfillmentRequest) -> AppResult<FulfillmentReceipt> {
        log::warn!(
            "Mock fulfillment: phone={}, goods_code={}, tr_id={} (nothing is delivered)",
            mask_phone(&request.phone_number),
            request.goods_code,
            request.tr_id
        );
        Ok(FulfillmentReceipt {
            transaction_id: format!("MOCK_{}", Utc::now().timestamp_millis()),
        })
    }

    fn provider_name(&self) -> &'static str {
        "mock"
    }
}
