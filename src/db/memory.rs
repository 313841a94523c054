use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::db::models::{PopularToken, SearchHistoryEntry, StoredAnalysis};
use crate::types::models::TokenAnalysis;

pub const DEFAULT_LIST_LIMIT: usize = 10;

pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

struct AnalysisEntry {
    seq: u64,
    record: StoredAnalysis,
}

#[derive(Default)]
struct StoreState {
    analyses: HashMap<String, AnalysisEntry>,
    history: Vec<SearchHistoryEntry>,
}

/// In-process store for the latest analysis per contract and the search log.
///
/// Lookups are exact-match on the key the caller saved under; nothing here
/// normalizes addresses. Contents are lost when the process exits.
pub struct AnalysisStore {
    state: RwLock<StoreState>,
    next_id: AtomicU64,
    clock: Clock,
}

impl Default for AnalysisStore {
    fn default() -> Self {
        Self::new()
    }
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(Utc::now))
    }

    pub fn with_clock(clock: Clock) -> Self {
        Self {
            state: RwLock::new(StoreState::default()),
            next_id: AtomicU64::new(0),
            clock,
        }
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }

    fn next_seq(&self) -> u64 {
        self.next_id.fetch_add(1, Ordering::Relaxed) + 1
    }

    /// Stores `analysis` under its contract address, replacing any previous one.
    pub async fn save(&self, analysis: TokenAnalysis) -> StoredAnalysis {
        let seq = self.next_seq();
        let record = StoredAnalysis {
            id: format!("analysis_{}", seq),
            analysis,
            analyzed_at: self.now(),
        };

        let mut state = self.state.write().await;
        state.analyses.insert(
            record.analysis.contract_address.clone(),
            AnalysisEntry {
                seq,
                record: record.clone(),
            },
        );
        tracing::debug!("Saved analysis {} for {}", record.id, record.analysis.contract_address);
        record
    }

    pub async fn get(&self, contract_address: &str) -> Option<StoredAnalysis> {
        let state = self.state.read().await;
        state
            .analyses
            .get(contract_address)
            .map(|entry| entry.record.clone())
    }

    /// Newest analyses first. Saves within the same instant keep save order.
    pub async fn list_recent(&self, limit: usize) -> Vec<StoredAnalysis> {
        let state = self.state.read().await;
        let mut entries: Vec<&AnalysisEntry> = state.analyses.values().collect();
        entries.sort_by(|a, b| {
            b.record
                .analyzed_at
                .cmp(&a.record.analyzed_at)
                .then(b.seq.cmp(&a.seq))
        });
        entries
            .into_iter()
            .take(limit)
            .map(|entry| entry.record.clone())
            .collect()
    }

    pub async fn append_history(&self, contract_address: &str, user_fid: u64) -> SearchHistoryEntry {
        let entry = SearchHistoryEntry {
            id: format!("search_{}", self.next_seq()),
            contract_address: contract_address.to_string(),
            user_fid,
            searched_at: self.now(),
        };
        self.state.write().await.history.push(entry.clone());
        entry
    }

    pub async fn list_user_history(&self, user_fid: u64, limit: usize) -> Vec<SearchHistoryEntry> {
        let state = self.state.read().await;
        // Walk newest-appended first so the stable sort keeps that order on ties.
        let mut entries: Vec<&SearchHistoryEntry> = state
            .history
            .iter()
            .rev()
            .filter(|entry| entry.user_fid == user_fid)
            .collect();
        entries.sort_by(|a, b| b.searched_at.cmp(&a.searched_at));
        entries.into_iter().take(limit).cloned().collect()
    }

    /// Most searched addresses. Equal counts keep first-seen order from the log.
    pub async fn list_popular(&self, limit: usize) -> Vec<PopularToken> {
        let state = self.state.read().await;
        let mut positions: HashMap<&str, usize> = HashMap::new();
        let mut counts: Vec<PopularToken> = Vec::new();

        for entry in &state.history {
            match positions.get(entry.contract_address.as_str()) {
                Some(&idx) => counts[idx].search_count += 1,
                None => {
                    positions.insert(entry.contract_address.as_str(), counts.len());
                    counts.push(PopularToken {
                        contract_address: entry.contract_address.clone(),
                        search_count: 1,
                    });
                }
            }
        }

        counts.sort_by(|a, b| b.search_count.cmp(&a.search_count));
        counts.truncate(limit);
        counts
    }
}
