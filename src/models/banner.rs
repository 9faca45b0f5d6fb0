use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::config::BannerConfig;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BannerData {
    pub title: String,
    pub description: String,
    pub image_url: String,
    pub active: bool,
}

impl From<&BannerConfig> for BannerData {
    fn from(c: &BannerConfig) -> Self {
        BannerData {
            title: c.title.clone(),
            description: c.description.clone(),
            image_url: c.image_url.clone(),
            active: c.active,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct BannerResponse {
    pub success: bool,
    pub data: BannerData,
}
