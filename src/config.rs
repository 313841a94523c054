use std::env;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};
use nonzero_ext::nonzero;

use crate::services::analysis::DEFAULT_CACHE_TTL;
use crate::services::coingecko::DEFAULT_API_URL;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub coingecko_api_url: String,
    pub coingecko_api_key: Option<String>,
    pub coingecko_requests_per_second: NonZeroU32,
    pub fetch_timeout: Duration,
    pub cache_ttl: Duration,
    pub public_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 3000,
            coingecko_api_url: DEFAULT_API_URL.to_string(),
            coingecko_api_key: None,
            coingecko_requests_per_second: nonzero!(5u32),
            fetch_timeout: Duration::from_secs(10),
            cache_ttl: DEFAULT_CACHE_TTL,
            public_url: None,
        }
    }
}

fn parse_var<T>(name: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .with_context(|| format!("{} has an invalid value: {:?}", name, raw)),
        _ => Ok(None),
    }
}

fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        Ok(Self {
            port: parse_var("PORT")?.unwrap_or(defaults.port),
            coingecko_api_url: optional_var("COINGECKO_API_URL").unwrap_or(defaults.coingecko_api_url),
            coingecko_api_key: optional_var("COINGECKO_API_KEY"),
            coingecko_requests_per_second: parse_var("COINGECKO_REQUESTS_PER_SECOND")?
                .unwrap_or(defaults.coingecko_requests_per_second),
            fetch_timeout: parse_var("FETCH_TIMEOUT_MS")?
                .map(Duration::from_millis)
                .unwrap_or(defaults.fetch_timeout),
            cache_ttl: parse_var("CACHE_TTL_SECS")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_ttl),
            public_url: optional_var("PUBLIC_URL").map(|url| url.trim_end_matches('/').to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = Config::default();
        assert_eq!(config.port, 3000);
        assert_eq!(config.cache_ttl, Duration::from_secs(300));
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
        assert_eq!(config.coingecko_api_url, "https://api.coingecko.com/api/v3");
        assert!(config.public_url.is_none());
    }

    #[test]
    fn parse_var_reports_bad_values() {
        env::set_var("FC_LENS_TEST_BAD_PORT", "not-a-port");
        let err = parse_var::<u16>("FC_LENS_TEST_BAD_PORT").unwrap_err();
        assert!(err.to_string().contains("FC_LENS_TEST_BAD_PORT"));

        env::set_var("FC_LENS_TEST_GOOD_PORT", " 8080 ");
        assert_eq!(parse_var::<u16>("FC_LENS_TEST_GOOD_PORT").unwrap(), Some(8080));

        assert_eq!(parse_var::<u16>("FC_LENS_TEST_UNSET").unwrap(), None);
    }
}
