use url::Url;

use crate::db::models::StoredAnalysis;
use crate::types::models::ShareCast;

const COMPOSE_URL: &str = "https://warpcast.com/~/compose";

fn format_usd(value: f64) -> String {
    if value >= 1e9 {
        format!("${:.2}B", value / 1e9)
    } else if value >= 1e6 {
        format!("${:.2}M", value / 1e6)
    } else if value >= 1e3 {
        format!("${:.2}K", value / 1e3)
    } else {
        format!("${:.2}", value)
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn score_marker(score: u8) -> &'static str {
    match score {
        0 => "⚠️",
        80..=u8::MAX => "🟢",
        60..=79 => "🟡",
        40..=59 => "🟠",
        _ => "🔴",
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

/// Renders the shareable summary card for a stored analysis.
pub fn cast_text(record: &StoredAnalysis) -> String {
    let a = &record.analysis;
    let score = match a.security_score {
        0 => "N/A".to_string(),
        score => score.to_string(),
    };
    let change = if a.price_change_24h == 0.0 {
        "N/A".to_string()
    } else {
        format!("{:.2}%", a.price_change_24h)
    };

    format!(
        "🔍 Token Analysis: {name} ({symbol})\n\
         \n\
         💰 Price: {price}\n\
         📈 24h Change: {change}\n\
         🏪 Market Cap: {market_cap}\n\
         👥 Holders: {holders}\n\
         \n\
         {marker} Security Score: {score}/100\n\
         \n\
         ✅ Contract Valid: {valid}\n\
         ✅ Ownership Renounced: {renounced}\n\
         ✅ Open Trading: {trading}\n\
         ✅ Sufficient Liquidity: {liquidity}\n\
         \n\
         📊 FC Mentions: {mentions}\n\
         🤝 Social Graph Holders: {graph}\n\
         \n\
         Analyzed with FC Lens 🔍",
        name = a.token_name,
        symbol = a.token_symbol,
        price = format_usd(a.price_usd),
        change = change,
        market_cap = format_usd(a.market_cap),
        holders = group_thousands(a.holder_count),
        marker = score_marker(a.security_score),
        score = score,
        valid = yes_no(a.has_valid_contract),
        renounced = yes_no(a.is_ownership_renounced),
        trading = yes_no(a.is_open_trading),
        liquidity = yes_no(a.has_liquidity),
        mentions = a.farcaster_mentions,
        graph = a.social_graph_holders,
    )
}

pub fn share_cast(record: &StoredAnalysis) -> Result<ShareCast, url::ParseError> {
    let text = cast_text(record);
    let compose_url = Url::parse_with_params(COMPOSE_URL, &[("text", text.as_str())])?;
    Ok(ShareCast {
        text,
        compose_url: compose_url.into(),
    })
}
