pub mod health;
pub mod items;

use folio_common::SiteConfig;
use folio_core::Outcome;
use serde::Serialize;

/// Body of every `/api/*Item` reply
#[derive(Debug, Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config: Option<SiteConfig>,
}

impl ApiResponse {
    pub fn failure(message: String) -> Self {
        Self {
            success: false,
            message,
            config: None,
        }
    }
}

impl From<Outcome> for ApiResponse {
    fn from(outcome: Outcome) -> Self {
        Self {
            success: true,
            message: outcome.message,
            config: Some(outcome.config),
        }
    }
}
