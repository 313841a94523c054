use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future::{BoxFuture, FutureExt, Shared};
use thiserror::Error;

use crate::db::memory::AnalysisStore;
use crate::db::models::{PopularToken, SearchHistoryEntry, StoredAnalysis};
use crate::services::token::TokenAggregator;

pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

#[derive(Error, Debug, Clone)]
pub enum AnalysisError {
    #[error("analysis task for {0} did not complete: {1}")]
    TaskFailed(String, String),
}

type PendingAnalysis = Shared<BoxFuture<'static, Result<StoredAnalysis, AnalysisError>>>;
type InFlight = Arc<Mutex<HashMap<String, PendingAnalysis>>>;

/// True while a record analyzed at `analyzed_at` is still inside the window.
/// A timestamp from the future counts as fresh.
pub fn is_fresh(analyzed_at: DateTime<Utc>, now: DateTime<Utc>, ttl: Duration) -> bool {
    match (now - analyzed_at).to_std() {
        Ok(age) => age < ttl,
        Err(_) => true,
    }
}

/// Cache-then-compute front for the aggregator.
///
/// Addresses are lowercased before they reach the store. Concurrent requests
/// for the same address share a single aggregation; once started, it runs to
/// completion and is saved even if every caller goes away.
pub struct AnalysisService {
    store: Arc<AnalysisStore>,
    aggregator: TokenAggregator,
    cache_ttl: Duration,
    in_flight: InFlight,
}

impl AnalysisService {
    pub fn new(store: Arc<AnalysisStore>, aggregator: TokenAggregator, cache_ttl: Duration) -> Self {
        Self {
            store,
            aggregator,
            cache_ttl,
            in_flight: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub async fn analyze(
        &self,
        contract_address: &str,
        chain_id: u64,
        user_fid: Option<u64>,
    ) -> Result<StoredAnalysis, AnalysisError> {
        let address = contract_address.to_lowercase();

        if let Some(existing) = self.store.get(&address).await {
            if is_fresh(existing.analyzed_at, self.store.now(), self.cache_ttl) {
                tracing::debug!("Serving cached analysis {} for {}", existing.id, address);
                return Ok(existing);
            }
        }

        let stored = self.pending_analysis(&address, chain_id).await?;

        // FID 0 is not a real user.
        if let Some(fid) = user_fid.filter(|&fid| fid != 0) {
            self.store.append_history(&address, fid).await;
        }

        Ok(stored)
    }

    fn pending_analysis(&self, address: &str, chain_id: u64) -> PendingAnalysis {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(pending) = in_flight.get(address) {
            tracing::debug!("Joining in-flight analysis for {}", address);
            return pending.clone();
        }

        let key = address.to_string();
        let store = self.store.clone();
        let aggregator = self.aggregator.clone();
        let registry = self.in_flight.clone();
        // The registry lock is held until the entry is inserted below, so this
        // removal cannot run ahead of it.
        let handle = tokio::spawn(async move {
            let analysis = aggregator.analyze(&key, chain_id).await;
            let stored = store.save(analysis).await;
            registry.lock().unwrap_or_else(PoisonError::into_inner).remove(&key);
            stored
        });

        let key = address.to_string();
        let registry = self.in_flight.clone();
        let pending = async move {
            handle.await.map_err(|e| {
                tracing::error!("Analysis task for {} failed: {}", key, e);
                registry.lock().unwrap_or_else(PoisonError::into_inner).remove(&key);
                AnalysisError::TaskFailed(key.clone(), e.to_string())
            })
        }
        .boxed()
        .shared();

        in_flight.insert(address.to_string(), pending.clone());
        pending
    }

    pub async fn get(&self, contract_address: &str) -> Option<StoredAnalysis> {
        self.store.get(&contract_address.to_lowercase()).await
    }

    pub async fn recent(&self, limit: usize) -> Vec<StoredAnalysis> {
        self.store.list_recent(limit).await
    }

    pub async fn popular(&self, limit: usize) -> Vec<PopularToken> {
        self.store.list_popular(limit).await
    }

    pub async fn user_history(&self, user_fid: u64, limit: usize) -> Vec<SearchHistoryEntry> {
        self.store.list_user_history(user_fid, limit).await
    }
}
