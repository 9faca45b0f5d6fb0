use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entities::participation_code_entity;
use crate::utils::PaginationInfo;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ParticipationCodeResponse {
    pub id: i64,
    pub code: String,
    pub is_used: bool,
    pub created_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
}

impl From<participation_code_entity::Model> for ParticipationCodeResponse {
    fn from(m: participation_code_entity::Model) -> Self {
        ParticipationCodeResponse {
            id: m.id,
            code: m.code,
            is_used: m.is_used,
            created_at: m.created_at,
            used_at: m.used_at,
        }
    }
}

/// GET /admin/codes 쿼리
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct CodeListQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    /// used / unused
    pub status: Option<String>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CodeUsageStats {
    pub total: u64,
    pub used: u64,
    pub unused: u64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CodeListResponse {
    pub success: bool,
    pub codes: Vec<ParticipationCodeResponse>,
    pub pagination: PaginationInfo,
    pub stats: CodeUsageStats,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct IssueCodesRequest {
    /// 1..=100, 기본 1
    pub count: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IssueCodesResponse {
    pub success: bool,
    pub codes: Vec<ParticipationCodeResponse>,
    pub message: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct BulkImportRequest {
    #[serde(default)]
    pub codes: Vec<String>,
}

/// Outcome of a bulk import, for reconciling a source file against the store
#[derive(Debug, Clone, Default)]
pub struct BulkImportOutcome {
    pub created: Vec<participation_code_entity::Model>,
    /// Already present before or during the import
    pub duplicates: Vec<String>,
    /// Insert failed for another reason; see server log
    pub failed: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkImportResponse {
    pub success: bool,
    pub codes: Vec<ParticipationCodeResponse>,
    pub created: usize,
    pub duplicates: Vec<String>,
    pub failed: Vec<String>,
    pub message: String,
}

impl From<BulkImportOutcome> for BulkImportResponse {
    fn from(o: BulkImportOutcome) -> Self {
        let created = o.created.len();
        let mut message = format!("{created}개의 코드가 성공적으로 업로드되었습니다.");
        if !o.duplicates.is_empty() {
            message.push_str(&format!(" ({}개 중복 코드 제외)", o.duplicates.len()));
        }
        if !o.failed.is_empty() {
            message.push_str(&format!(" ({}개 저장 실패)", o.failed.len()));
        }
        BulkImportResponse {
            success: true,
            codes: o.created.into_iter().map(Into::into).collect(),
            created,
            duplicates: o.duplicates,
            failed: o.failed,
            message,
        }
    }
}
