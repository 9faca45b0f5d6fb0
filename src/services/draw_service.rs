use crate::database::{codes, prizes, winners};
use crate::entities::prize_entity;
use crate::error::DrawError;
use crate::models::DrawOutcome;
use chrono::Utc;
use rand::Rng;
use sea_orm::{DatabaseConnection, DatabaseTransaction, DbErr, TransactionTrait};

#[derive(Clone)]
pub struct DrawService {
    pool: DatabaseConnection,
}

impl DrawService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 참여 코드로 경품 추첨
    ///
    /// 검증 순서: 빈 코드 -> 존재 여부 -> 사용 여부 -> 추첨 가능한 경품 존재 여부.
    /// 코드 사용 처리, 재고 차감, 당첨 기록 생성은 하나의 트랜잭션에서 커밋되며
    /// 어느 단계든 실패하면 트랜잭션이 drop 되면서 전부 롤백된다.
    pub async fn participate(&self, code: &str) -> Result<DrawOutcome, DrawError> {
        let code = code.trim();
        if code.is_empty() {
            return Err(DrawError::InvalidInput);
        }

        let txn = self.pool.begin().await?;

        let participation = codes::find_by_code(&txn, code)
            .await?
            .ok_or(DrawError::CodeNotFound)?;
        if participation.is_used {
            return Err(DrawError::CodeAlreadyUsed);
        }

        let candidates = prizes::drawable(&txn).await?;
        if candidates.is_empty() {
            return Err(DrawError::PrizesExhausted);
        }

        // Conditional update: a concurrent redemption of the same code loses here
        if !codes::mark_used(&txn, participation.id, Utc::now()).await? {
            return Err(DrawError::CodeAlreadyUsed);
        }

        let prize = select_and_secure_prize(&txn, candidates)
            .await?
            .ok_or(DrawError::PrizesExhausted)?;

        let winner = winners::insert(&txn, participation.id, prize.id).await?;

        txn.commit().await?;

        log::info!(
            "Draw committed: code_id={}, prize_id={}, winner_id={}",
            participation.id,
            prize.id,
            winner.id
        );

        Ok(DrawOutcome {
            winner_id: winner.id,
            prize: prize.into(),
        })
    }
}

/// Pick from `candidates` and decrement the chosen prize's stock.
///
/// A prize that hits zero between selection and decrement is dropped and the
/// draw repeats against the remaining candidates. `None` means nothing is left.
async fn select_and_secure_prize(
    txn: &DatabaseTransaction,
    mut candidates: Vec<prize_entity::Model>,
) -> Result<Option<prize_entity::Model>, DbErr> {
    while !candidates.is_empty() {
        let weights: Vec<i32> = candidates.iter().map(|p| p.weight).collect();
        let picked = {
            let mut rng = rand::thread_rng();
            pick_weighted(&weights, &mut rng)
        };
        let Some(index) = picked else {
            return Ok(None);
        };

        let chosen = candidates.remove(index);
        if prizes::decrement_stock(txn, chosen.id).await? {
            return Ok(Some(chosen));
        }
        log::warn!("Prize {} ran out during draw, reselecting", chosen.id);
    }
    Ok(None)
}

/// Single categorical draw over relative weights.
///
/// Draws `r` uniformly from `[0, total)` and returns the first index whose
/// cumulative weight exceeds `r`. Non-positive weights are never selected.
/// Returns `None` only when no weight is positive.
pub fn pick_weighted<R: Rng + ?Sized>(weights: &[i32], rng: &mut R) -> Option<usize> {
    let total: i64 = weights.iter().map(|&w| i64::from(w.max(0))).sum();
    if total <= 0 {
        return None;
    }

    let r = rng.gen_range(0..total);
    let mut cumulative = 0i64;
    for (index, &weight) in weights.iter().enumerate() {
        cumulative += i64::from(weight.max(0));
        if r < cumulative {
            return Some(index);
        }
    }

    // unreachable with integer weights; keep the last positive weight as fallback
    weights.iter().rposition(|&w| w > 0)
}
