use crate::database::{prizes, winners};
use crate::entities::ClaimStatus;
use crate::error::ClaimError;
use crate::external::{FulfillmentProvider, FulfillmentRequest};
use crate::models::ClaimReceipt;
use crate::utils::{generate_tr_id, mask_phone, normalize_kr_mobile};
use chrono::Utc;
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::Arc;
use std::time::Duration;

/// 경품 수령 처리
///
/// A winner moves through three states stored in one column:
/// unclaimed (`''`), pending (`PENDING:<tr_id>`) and sent (provider id).
/// Only the request that wins the unclaimed -> pending update calls the
/// provider, so a prize is delivered at most once even under concurrent claims.
#[derive(Clone)]
pub struct ClaimService {
    pool: DatabaseConnection,
    provider: Arc<dyn FulfillmentProvider>,
    timeout: Duration,
}

impl ClaimService {
    pub fn new(
        pool: DatabaseConnection,
        provider: Arc<dyn FulfillmentProvider>,
        timeout: Duration,
    ) -> Self {
        Self {
            pool,
            provider,
            timeout,
        }
    }

    pub async fn claim(
        &self,
        winner_id: &str,
        phone_number: &str,
    ) -> Result<ClaimReceipt, ClaimError> {
        let winner_id = winner_id.trim();
        if winner_id.is_empty() || phone_number.trim().is_empty() {
            return Err(ClaimError::InvalidInput);
        }

        let winner = winners::find(&self.pool, winner_id)
            .await?
            .ok_or(ClaimError::WinnerNotFound)?;

        let phone = normalize_kr_mobile(phone_number).ok_or(ClaimError::InvalidPhoneNumber)?;

        if winner.claim_status() != ClaimStatus::Unclaimed {
            return Err(ClaimError::AlreadyClaimed);
        }

        let prize = prizes::find(&self.pool, winner.prize_id)
            .await?
            .ok_or_else(|| {
                ClaimError::Store(DbErr::RecordNotFound(format!(
                    "prize {} referenced by winner {}",
                    winner.prize_id, winner.id
                )))
            })?;

        if prize.fulfillment_goods_code.is_empty() {
            return Err(ClaimError::FulfillmentFailed(format!(
                "prize {} has no fulfillment goods code",
                prize.id
            )));
        }

        let tr_id = generate_tr_id();
        if !winners::reserve_claim(&self.pool, &winner.id, &phone, &tr_id).await? {
            return Err(ClaimError::AlreadyClaimed);
        }

        log::info!(
            "Sending prize {} to {} via {} (winner={}, tr_id={})",
            prize.id,
            mask_phone(&phone),
            self.provider.provider_name(),
            winner.id,
            tr_id
        );

        let request = FulfillmentRequest {
            phone_number: phone,
            goods_code: prize.fulfillment_goods_code,
            tr_id: tr_id.clone(),
        };

        let receipt = match tokio::time::timeout(self.timeout, self.provider.send(&request)).await
        {
            Ok(Ok(receipt)) => receipt,
            Ok(Err(e)) => {
                self.release(&winner.id, &tr_id).await;
                return Err(ClaimError::FulfillmentFailed(e.to_string()));
            }
            Err(_) => {
                self.release(&winner.id, &tr_id).await;
                return Err(ClaimError::FulfillmentFailed(format!(
                    "provider timed out after {}s",
                    self.timeout.as_secs()
                )));
            }
        };

        let finalized = winners::finalize_claim(
            &self.pool,
            &winner.id,
            &tr_id,
            &receipt.transaction_id,
            Utc::now(),
        )
        .await
        .inspect_err(|e| {
            log::error!(
                "Prize delivered but not recorded: winner={}, tr_id={}, transaction_id={}: {e}",
                winner.id,
                tr_id,
                receipt.transaction_id
            )
        })?;

        if !finalized {
            log::error!(
                "Claim reservation lost after delivery: winner={}, tr_id={}, transaction_id={}",
                winner.id,
                tr_id,
                receipt.transaction_id
            );
            return Err(ClaimError::Store(DbErr::Custom(format!(
                "claim reservation for winner {} disappeared",
                winner.id
            ))));
        }

        log::info!(
            "Prize sent: winner={}, transaction_id={}",
            winner.id,
            receipt.transaction_id
        );

        Ok(ClaimReceipt {
            transaction_id: receipt.transaction_id,
        })
    }

    /// Failure here leaves the winner pending; it is logged for manual recovery.
    async fn release(&self, winner_id: &str, tr_id: &str) {
        match winners::release_claim(&self.pool, winner_id, tr_id).await {
            Ok(true) => log::warn!("Released claim for winner {winner_id} (tr_id={tr_id})"),
            Ok(false) => {
                log::error!("Claim for winner {winner_id} was not pending under tr_id={tr_id}")
            }
            Err(e) => log::error!("Failed to release claim for winner {winner_id}: {e}"),
        }
    }
}
