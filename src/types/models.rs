use serde::{Deserialize, Serialize};

pub const UNKNOWN_TOKEN_NAME: &str = "Unknown Token";
pub const UNKNOWN_TOKEN_SYMBOL: &str = "UNKNOWN";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceData {
    pub price: f64,
    pub price_change_24h: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityData {
    pub is_ownership_renounced: bool,
    pub is_open_trading: bool,
    pub has_valid_contract: bool,
    pub has_liquidity: bool,
    pub liquidity_usd: f64,
    pub holder_count: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialData {
    pub farcaster_mentions: u64,
    pub social_graph_holders: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenInfo {
    pub name: String,
    pub symbol: String,
}

impl Default for TokenInfo {
    fn default() -> Self {
        Self {
            name: UNKNOWN_TOKEN_NAME.to_string(),
            symbol: UNKNOWN_TOKEN_SYMBOL.to_string(),
        }
    }
}

/// Everything the aggregator learned about one contract, before it is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenAnalysis {
    pub contract_address: String,
    pub chain_id: u64,
    pub token_name: String,
    pub token_symbol: String,
    pub price_usd: f64,
    pub price_change_24h: f64,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub liquidity_usd: f64,
    pub holder_count: u64,
    pub security_score: u8,
    pub is_ownership_renounced: bool,
    pub is_open_trading: bool,
    pub has_valid_contract: bool,
    pub has_liquidity: bool,
    pub farcaster_mentions: u64,
    pub social_graph_holders: u64,
}

impl TokenAnalysis {
    pub fn assemble(
        contract_address: &str,
        chain_id: u64,
        price: PriceData,
        security: SecurityData,
        social: SocialData,
        info: TokenInfo,
        security_score: u8,
    ) -> Self {
        Self {
            contract_address: contract_address.to_string(),
            chain_id,
            token_name: info.name,
            token_symbol: info.symbol,
            price_usd: price.price,
            price_change_24h: price.price_change_24h,
            market_cap: price.market_cap,
            volume_24h: price.volume_24h,
            liquidity_usd: security.liquidity_usd,
            holder_count: security.holder_count,
            security_score,
            is_ownership_renounced: security.is_ownership_renounced,
            is_open_trading: security.is_open_trading,
            has_valid_contract: security.has_valid_contract,
            has_liquidity: security.has_liquidity,
            farcaster_mentions: social.farcaster_mentions,
            social_graph_holders: social.social_graph_holders,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    pub contract_address: String,
    #[serde(default = "default_chain_id")]
    pub chain_id: u64,
    pub user_fid: Option<u64>,
}

fn default_chain_id() -> u64 {
    1
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LimitParams {
    pub limit: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShareCast {
    pub text: String,
    pub compose_url: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MiniAppManifest {
    pub version: &'static str,
    pub name: &'static str,
    pub icon_url: String,
    pub home_url: String,
    pub image_url: String,
    pub button_title: &'static str,
    pub splash_image_url: String,
    pub splash_background_color: &'static str,
}
