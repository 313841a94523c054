use anyhow::Result;
use async_trait::async_trait;
use rand::Rng;

use crate::types::models::{PriceData, SecurityData, SocialData, TokenInfo};

#[async_trait]
pub trait PriceSource: Send + Sync {
    async fn fetch_price(&self, contract_address: &str, chain_id: u64) -> Result<PriceData>;
}

#[async_trait]
pub trait SecuritySource: Send + Sync {
    async fn fetch_security(&self, contract_address: &str, chain_id: u64) -> Result<SecurityData>;
}

#[async_trait]
pub trait SocialSource: Send + Sync {
    async fn fetch_social(&self, contract_address: &str) -> Result<SocialData>;
}

#[async_trait]
pub trait TokenInfoSource: Send + Sync {
    async fn fetch_token_info(&self, contract_address: &str, chain_id: u64) -> Result<TokenInfo>;
}

/// Placeholder security signals. No contract verification or holder
/// indexing happens here; values are drawn at random.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedSecurity;

#[async_trait]
impl SecuritySource for SimulatedSecurity {
    async fn fetch_security(&self, contract_address: &str, chain_id: u64) -> Result<SecurityData> {
        let mut rng = rand::thread_rng();
        let data = SecurityData {
            is_ownership_renounced: rng.gen_bool(0.5),
            is_open_trading: true,
            has_valid_contract: true,
            has_liquidity: true,
            liquidity_usd: rng.gen_range(0..1_000_000) as f64,
            holder_count: rng.gen_range(100..10_100),
        };
        tracing::debug!(
            "Simulated security data for {} on chain {}: {:?}",
            contract_address,
            chain_id,
            data
        );
        Ok(data)
    }
}

/// Placeholder social metrics drawn at random.
#[derive(Debug, Default, Clone, Copy)]
pub struct SimulatedSocial;

#[async_trait]
impl SocialSource for SimulatedSocial {
    async fn fetch_social(&self, _contract_address: &str) -> Result<SocialData> {
        let mut rng = rand::thread_rng();
        Ok(SocialData {
            farcaster_mentions: rng.gen_range(0..100),
            social_graph_holders: rng.gen_range(0..1_000),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn simulated_security_stays_in_range() {
        for _ in 0..50 {
            let data = SimulatedSecurity.fetch_security("0x1", 1).await.unwrap();
            assert!(data.has_valid_contract && data.is_open_trading && data.has_liquidity);
            assert!((100..10_100).contains(&data.holder_count));
            assert!((0.0..1_000_000.0).contains(&data.liquidity_usd));
        }
    }

    #[tokio::test]
    async fn simulated_social_stays_in_range() {
        for _ in 0..50 {
            let data = SimulatedSocial.fetch_social("0x1").await.unwrap();
            assert!(data.farcaster_mentions < 100);
            assert!(data.social_graph_holders < 1_000);
        }
    }
}
