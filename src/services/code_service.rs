use crate::config::EventConfig;
use crate::database::codes;
use crate::entities::participation_code_entity;
use crate::error::{AppError, AppResult, ImportError, IssueError};
use crate::models::*;
use crate::utils::{Attempt, PaginationInfo, PaginationParams, RetryPolicy, generate_event_code};
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, SqlErr};
use std::collections::HashSet;
use std::sync::Arc;

/// Candidate attempts per issued code before giving up
const ISSUE_ATTEMPTS: u32 = 10;

/// Width of the `participation_codes.code` column
const MAX_CODE_LEN: usize = 64;

/// Hard per-request ceilings; configuration may lower them, never raise them
pub const MAX_ISSUE_COUNT: usize = 100;
pub const MAX_IMPORT_COUNT: usize = 1000;

fn clamp_limit(name: &str, configured: usize, ceiling: usize) -> usize {
    let limit = configured.clamp(1, ceiling);
    if limit != configured {
        log::warn!("event.{name} = {configured} is outside 1..={ceiling}, using {limit}");
    }
    limit
}

pub type CodeGenerator = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// 관리자용 참여 코드 발급/업로드/조회
#[derive(Clone)]
pub struct CodeService {
    pool: DatabaseConnection,
    prefix: String,
    max_issue_count: usize,
    max_import_count: usize,
    generator: CodeGenerator,
    retry: RetryPolicy,
}

impl CodeService {
    pub fn new(pool: DatabaseConnection, event: &EventConfig) -> Self {
        Self {
            pool,
            prefix: event.code_prefix.clone(),
            max_issue_count: clamp_limit("max_issue_count", event.max_issue_count, MAX_ISSUE_COUNT),
            max_import_count: clamp_limit(
                "max_import_count",
                event.max_import_count,
                MAX_IMPORT_COUNT,
            ),
            generator: Arc::new(generate_event_code),
            retry: RetryPolicy::new(ISSUE_ATTEMPTS),
        }
    }

    /// Swap the candidate source; tests use this to force collisions.
    pub fn with_generator(mut self, generator: CodeGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// 새 참여 코드 `count`개 발급
    ///
    /// Each code gets up to ten candidates; a candidate that already exists
    /// (or loses a concurrent insert) is discarded. Codes issued before a
    /// `GenerationFailed` stay in the store.
    pub async fn issue_codes(
        &self,
        count: i64,
    ) -> Result<Vec<participation_code_entity::Model>, IssueError> {
        let max = self.max_issue_count;
        if count < 1 || count as u64 > max as u64 {
            return Err(IssueError::InvalidCount { max });
        }

        let pool = &self.pool;
        let prefix = self.prefix.as_str();
        let generator = self.generator.as_ref();

        let mut issued = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let code = self
                .retry
                .run(|_| try_insert_candidate(pool, generator(prefix)))
                .await?;
            match code {
                Some(code) => issued.push(code),
                None => {
                    log::error!(
                        "Gave up issuing a code after {} collisions ({} issued so far)",
                        self.retry.max_attempts,
                        issued.len()
                    );
                    return Err(IssueError::GenerationFailed);
                }
            }
        }

        log::info!("Issued {} participation codes", issued.len());
        Ok(issued)
    }

    /// 외부에서 받은 코드 목록 일괄 등록
    pub async fn bulk_import_codes(&self, raw: &[String]) -> Result<BulkImportOutcome, ImportError> {
        if raw.is_empty() {
            return Err(ImportError::Empty);
        }
        if raw.len() > self.max_import_count {
            return Err(ImportError::TooMany {
                max: self.max_import_count,
            });
        }

        let candidates = normalize_codes(raw);
        if candidates.is_empty() {
            return Err(ImportError::Empty);
        }

        let existing = codes::find_existing(&self.pool, &candidates).await?;

        let mut outcome = BulkImportOutcome::default();
        for code in candidates {
            if existing.contains(&code) {
                outcome.duplicates.push(code);
                continue;
            }
            if code.chars().count() > MAX_CODE_LEN {
                log::warn!("Skipping code longer than {MAX_CODE_LEN} characters: {code}");
                outcome.failed.push(code);
                continue;
            }

            match codes::insert(&self.pool, &code).await {
                Ok(model) => outcome.created.push(model),
                Err(e) if is_unique_violation(&e) => {
                    log::warn!("Code {code} was inserted concurrently, counting as duplicate");
                    outcome.duplicates.push(code);
                }
                Err(e) => {
                    log::error!("Failed to import code {code}: {e}");
                    outcome.failed.push(code);
                }
            }
        }

        log::info!(
            "Bulk import: {} created, {} duplicates, {} failed",
            outcome.created.len(),
            outcome.duplicates.len(),
            outcome.failed.len()
        );
        Ok(outcome)
    }

    pub async fn list_codes(&self, query: &CodeListQuery) -> AppResult<CodeListResponse> {
        let used = match query.status.as_deref() {
            None | Some("") | Some("all") => None,
            Some("used") => Some(true),
            Some("unused") => Some(false),
            Some(other) => {
                return Err(AppError::ValidationError(format!(
                    "status 는 used 또는 unused 여야 합니다: {other}"
                )));
            }
        };

        let params = PaginationParams::new(query.page, query.per_page);
        let (rows, total) =
            codes::page(&self.pool, used, params.get_offset(), params.get_limit()).await?;
        let (all, used_count) = codes::usage_counts(&self.pool).await?;

        Ok(CodeListResponse {
            success: true,
            codes: rows.into_iter().map(Into::into).collect(),
            pagination: PaginationInfo::new(params.get_page(), params.get_per_page(), total),
            stats: CodeUsageStats {
                total: all,
                used: used_count,
                unused: all.saturating_sub(used_count),
            },
        })
    }
}

async fn try_insert_candidate<C: ConnectionTrait>(
    db: &C,
    candidate: String,
) -> Result<Attempt<participation_code_entity::Model>, DbErr> {
    if codes::exists(db, &candidate).await? {
        log::debug!("Candidate {candidate} already exists");
        return Ok(Attempt::Retry);
    }
    match codes::insert(db, &candidate).await {
        Ok(model) => Ok(Attempt::Done(model)),
        Err(e) if is_unique_violation(&e) => {
            log::debug!("Candidate {candidate} lost a concurrent insert");
            Ok(Attempt::Retry)
        }
        Err(e) => Err(e),
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// Trim, drop blanks and keep the first occurrence of each code.
pub fn normalize_codes(raw: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    raw.iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .filter(|c| seen.insert(c.to_string()))
        .map(str::to_string)
        .collect()
}
