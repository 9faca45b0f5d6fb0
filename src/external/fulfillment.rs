use crate::error::AppResult;
use async_trait::async_trait;

/// One send request to the gift-card vendor
#[derive(Debug, Clone)]
pub struct FulfillmentRequest {
    /// Digits only, already validated
    pub phone_number: String,
    pub goods_code: String,
    /// Unique per call, at most 20 characters
    pub tr_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FulfillmentReceipt {
    pub transaction_id: String,
}

/// The external vendor that actually delivers a prize.
///
/// Implementations must treat every error (non-success body code, HTTP
/// failure, timeout) as "not delivered"; the claim engine releases the winner
/// for a retry in that case.
#[async_trait]
pub trait FulfillmentProvider: Send + Sync {
    async fn send(&self, request: &FulfillmentRequest) -> AppResult<FulfillmentReceipt>;

    fn provider_name(&self) -> &'static str;
}
