use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use reqwest::Client;
use serde::Deserialize;

use crate::services::sources::{PriceSource, TokenInfoSource};
use crate::types::models::{PriceData, TokenInfo, UNKNOWN_TOKEN_NAME, UNKNOWN_TOKEN_SYMBOL};

pub const DEFAULT_API_URL: &str = "https://api.coingecko.com/api/v3";

type Limiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Maps an EVM chain id to the CoinGecko asset platform slug.
/// Unknown chains fall back to Ethereum mainnet.
pub fn asset_platform(chain_id: u64) -> &'static str {
    match chain_id {
        10 => "optimistic-ethereum",
        56 => "binance-smart-chain",
        137 => "polygon-pos",
        8453 => "base",
        42161 => "arbitrum-one",
        _ => "ethereum",
    }
}

#[derive(Debug, Deserialize)]
struct SimpleTokenPrice {
    usd: Option<f64>,
    usd_market_cap: Option<f64>,
    usd_24h_vol: Option<f64>,
    usd_24h_change: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CoinContract {
    name: Option<String>,
    symbol: Option<String>,
}

/// Pulls the entry for `contract_address` out of a `simple/token_price` body.
/// CoinGecko keys the map by lowercase address; a missing entry means no
/// market data and yields zeros.
fn parse_price(body: HashMap<String, SimpleTokenPrice>, contract_address: &str) -> PriceData {
    match body.get(&contract_address.to_lowercase()) {
        Some(entry) => PriceData {
            price: entry.usd.unwrap_or(0.0),
            price_change_24h: entry.usd_24h_change.unwrap_or(0.0),
            market_cap: entry.usd_market_cap.unwrap_or(0.0),
            volume_24h: entry.usd_24h_vol.unwrap_or(0.0),
        },
        None => PriceData::default(),
    }
}

fn parse_token_info(body: CoinContract) -> TokenInfo {
    let non_empty = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
    TokenInfo {
        name: non_empty(body.name).unwrap_or_else(|| UNKNOWN_TOKEN_NAME.to_string()),
        symbol: non_empty(body.symbol).unwrap_or_else(|| UNKNOWN_TOKEN_SYMBOL.to_string()),
    }
}

/// Market data and token metadata from the public CoinGecko API.
pub struct CoinGeckoClient {
    http: Client,
    base_url: String,
    api_key: Option<String>,
    rate_limiter: Arc<Limiter>,
}

impl CoinGeckoClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        requests_per_second: NonZeroU32,
        timeout: Duration,
    ) -> Result<Self> {
        let http = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            rate_limiter: Arc::new(RateLimiter::direct(Quota::per_second(requests_per_second))),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        self.rate_limiter.until_ready().await;

        let mut request = self.http.get(url);
        if let Some(key) = &self.api_key {
            request = request.header("x-cg-demo-api-key", key);
        }
        let response = request.send().await?.error_for_status()?;
        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PriceSource for CoinGeckoClient {
    async fn fetch_price(&self, contract_address: &str, chain_id: u64) -> Result<PriceData> {
        let url = format!(
            "{}/simple/token_price/{}?contract_addresses={}&vs_currencies=usd&include_market_cap=true&include_24hr_vol=true&include_24hr_change=true",
            self.base_url,
            asset_platform(chain_id),
            contract_address
        );
        let body: HashMap<String, SimpleTokenPrice> = self.get_json(&url).await?;
        let price = parse_price(body, contract_address);
        tracing::debug!("CoinGecko price for {}: {:?}", contract_address, price);
        Ok(price)
    }
}

#[async_trait]
impl TokenInfoSource for CoinGeckoClient {
    async fn fetch_token_info(&self, contract_address: &str, chain_id: u64) -> Result<TokenInfo> {
        let url = format!(
            "{}/coins/{}/contract/{}",
            self.base_url,
            asset_platform(chain_id),
            contract_address
        );
        let body: CoinContract = self.get_json(&url).await?;
        Ok(parse_token_info(body))
    }
}
