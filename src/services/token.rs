use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use crate::services::sources::{PriceSource, SecuritySource, SocialSource, TokenInfoSource};
use crate::types::models::{SecurityData, TokenAnalysis};

pub const MAX_SECURITY_SCORE: u8 = 100;

/// Fixed-weight heuristic over the security signals, capped at 100.
pub fn calculate_security_score(security: &SecurityData) -> u8 {
    let mut score: u32 = 0;

    if security.has_valid_contract {
        score += 25;
    }
    if security.is_ownership_renounced {
        score += 25;
    }
    if security.is_open_trading {
        score += 20;
    }
    if security.has_liquidity {
        score += 15;
    }
    if security.holder_count > 100 {
        score += 10;
    }
    if security.liquidity_usd > 10_000.0 {
        score += 5;
    }

    score.min(MAX_SECURITY_SCORE as u32) as u8
}

/// Runs one sub-fetch on its own task. Errors, panics and timeouts all
/// degrade to `T::default()`.
async fn guarded_fetch<T, F>(kind: &'static str, contract_address: &str, limit: Duration, fetch: F) -> T
where
    T: Default + Send + 'static,
    F: Future<Output = anyhow::Result<T>> + Send + 'static,
{
    let handle = tokio::spawn(fetch);
    let abort = handle.abort_handle();

    match tokio::time::timeout(limit, handle).await {
        Ok(Ok(Ok(value))) => value,
        Ok(Ok(Err(e))) => {
            tracing::warn!("{} fetch failed for {}: {:#}", kind, contract_address, e);
            T::default()
        }
        Ok(Err(e)) => {
            tracing::error!("{} fetch task for {} did not complete: {}", kind, contract_address, e);
            T::default()
        }
        Err(_) => {
            abort.abort();
            tracing::warn!("{} fetch for {} timed out after {:?}", kind, contract_address, limit);
            T::default()
        }
    }
}

/// Fans out to the four data sources and folds the results into one analysis.
#[derive(Clone)]
pub struct TokenAggregator {
    price: Arc<dyn PriceSource>,
    security: Arc<dyn SecuritySource>,
    social: Arc<dyn SocialSource>,
    token_info: Arc<dyn TokenInfoSource>,
    fetch_timeout: Duration,
}

impl TokenAggregator {
    pub fn new(
        price: Arc<dyn PriceSource>,
        security: Arc<dyn SecuritySource>,
        social: Arc<dyn SocialSource>,
        token_info: Arc<dyn TokenInfoSource>,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            price,
            security,
            social,
            token_info,
            fetch_timeout,
        }
    }

    pub async fn analyze(&self, contract_address: &str, chain_id: u64) -> TokenAnalysis {
        let operation_start = std::time::Instant::now();
        let address = contract_address.to_string();

        let price = {
            let source = self.price.clone();
            let address = address.clone();
            guarded_fetch("price", contract_address, self.fetch_timeout, async move {
                source.fetch_price(&address, chain_id).await
            })
        };
        let security = {
            let source = self.security.clone();
            let address = address.clone();
            guarded_fetch("security", contract_address, self.fetch_timeout, async move {
                source.fetch_security(&address, chain_id).await
            })
        };
        let social = {
            let source = self.social.clone();
            let address = address.clone();
            guarded_fetch("social", contract_address, self.fetch_timeout, async move {
                source.fetch_social(&address).await
            })
        };
        let token_info = {
            let source = self.token_info.clone();
            let address = address.clone();
            guarded_fetch("token info", contract_address, self.fetch_timeout, async move {
                source.fetch_token_info(&address, chain_id).await
            })
        };

        let (price, security, social, token_info) = tokio::join!(price, security, social, token_info);

        let security_score = calculate_security_score(&security);
        tracing::info!(
            "Analyzed {} on chain {} in {:?} (score {})",
            contract_address,
            chain_id,
            operation_start.elapsed(),
            security_score
        );

        TokenAnalysis::assemble(
            contract_address,
            chain_id,
            price,
            security,
            social,
            token_info,
            security_score,
        )
    }
}
