use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::models::TokenAnalysis;

/// Latest analysis for a contract, as held by the store.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredAnalysis {
    pub id: String,
    #[serde(flatten)]
    pub analysis: TokenAnalysis,
    pub analyzed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHistoryEntry {
    pub id: String,
    pub contract_address: String,
    pub user_fid: u64,
    pub searched_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularToken {
    pub contract_address: String,
    pub search_count: u64,
}
