use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;

use super::handlers::{
    analyze_token, farcaster_manifest, get_popular, get_recent, get_share_cast, get_token_analysis,
    get_user_history, health,
};
use super::state::AppState;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/analyze", post(analyze_token))
        .route("/api/token/:contract_address", get(get_token_analysis))
        .route("/api/token/:contract_address/cast", get(get_share_cast))
        .route("/api/recent", get(get_recent))
        .route("/api/popular", get(get_popular))
        .route("/api/history/:user_fid", get(get_user_history))
        .route("/api/health", get(health))
        .route("/.well-known/farcaster.json", get(farcaster_manifest))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::memory::AnalysisStore;
    use crate::services::analysis::{AnalysisService, DEFAULT_CACHE_TTL};
    use crate::services::token::tests::{aggregator_with_price, FixedPrice};
    use crate::types::models::PriceData;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    const DAI: &str = "0x6B175474E89094C44Da98b954EedeAC495271d0F";
    const USDC: &str = "0xA0b86991c6218b36c1d19D4a2e9Eb0cE3606eB48";

    fn app(public_url: Option<&str>) -> Router {
        let aggregator = aggregator_with_price(Arc::new(FixedPrice(PriceData {
            price: 1.0,
            price_change_24h: 0.02,
            market_cap: 5.3e9,
            volume_24h: 2.1e8,
        })));
        let service = AnalysisService::new(Arc::new(AnalysisStore::new()), aggregator, DEFAULT_CACHE_TTL);
        create_router(AppState::new(Arc::new(service), public_url.map(str::to_string)))
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn analyze_returns_stored_record_and_caches_it() {
        let app = app(None);

        let (status, first) = send(&app, post_json("/api/analyze", json!({ "contractAddress": DAI }))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(first["contractAddress"], DAI.to_lowercase());
        assert_eq!(first["chainId"], 1);
        assert_eq!(first["tokenName"], "Dai");
        assert_eq!(first["priceUsd"], 1.0);
        assert_eq!(first["securityScore"], 100);
        assert!(first["id"].is_string());
        assert!(first["analyzedAt"].is_string());

        let (_, second) = send(&app, post_json("/api/analyze", json!({ "contractAddress": DAI }))).await;
        assert_eq!(first["id"], second["id"]);
        assert_eq!(first["analyzedAt"], second["analyzedAt"]);
    }

    #[tokio::test]
    async fn analyze_rejects_invalid_address() {
        let app = app(None);

        let (status, body) = send(&app, post_json("/api/analyze", json!({ "contractAddress": "0x123" }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid contract address");
        assert_eq!(body["code"], 400);
    }

    #[tokio::test]
    async fn analyze_rejects_malformed_body() {
        let app = app(None);

        let (status, body) = send(&app, post_json("/api/analyze", json!({ "chainId": 1 }))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].as_str().unwrap().starts_with("Invalid request"));
    }

    #[tokio::test]
    async fn unknown_token_is_not_found() {
        let app = app(None);

        let (status, body) = send(&app, get(&format!("/api/token/{}", DAI))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Token analysis not found");

        let (status, _) = send(&app, get(&format!("/api/token/{}/cast", DAI))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn analyzed_token_can_be_fetched_and_shared() {
        let app = app(None);
        send(&app, post_json("/api/analyze", json!({ "contractAddress": DAI }))).await;

        let (status, body) = send(&app, get(&format!("/api/token/{}", DAI))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["tokenSymbol"], "DAI");

        let (status, cast) = send(&app, get(&format!("/api/token/{}/cast", DAI.to_lowercase()))).await;
        assert_eq!(status, StatusCode::OK);
        assert!(cast["text"].as_str().unwrap().contains("Dai (DAI)"));
        assert!(cast["composeUrl"]
            .as_str()
            .unwrap()
            .starts_with("https://warpcast.com/~/compose?text="));
    }

    #[tokio::test]
    async fn recent_popular_and_history_reflect_searches() {
        let app = app(None);
        send(&app, post_json("/api/analyze", json!({ "contractAddress": DAI, "userFid": 7 }))).await;
        send(&app, post_json("/api/analyze", json!({ "contractAddress": USDC, "userFid": 7, "chainId": 1 }))).await;

        let (status, recent) = send(&app, get("/api/recent?limit=1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(recent.as_array().unwrap().len(), 1);
        assert_eq!(recent[0]["contractAddress"], USDC.to_lowercase());

        let (_, recent) = send(&app, get("/api/recent?limit=zero")).await;
        assert_eq!(recent.as_array().unwrap().len(), 2);

        let (_, popular) = send(&app, get("/api/popular")).await;
        assert_eq!(popular.as_array().unwrap().len(), 2);
        assert_eq!(popular[0]["searchCount"], 1);

        let (status, history) = send(&app, get("/api/history/7?limit=5")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(history.as_array().unwrap().len(), 2);
        assert_eq!(history[0]["userFid"], 7);

        let (_, history) = send(&app, get("/api/history/8")).await;
        assert!(history.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn history_rejects_non_numeric_fid() {
        let app = app(None);
        let (status, _) = send(&app, get("/api/history/alice")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = app(None);
        let (status, body) = send(&app, get("/api/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert!(body["timestamp"].is_string());
    }

    #[tokio::test]
    async fn manifest_uses_host_header() {
        let app = app(None);
        let request = Request::builder()
            .uri("/.well-known/farcaster.json")
            .header(header::HOST, "lens.example")
            .body(Body::empty())
            .unwrap();

        let (status, body) = send(&app, request).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["version"], "1");
        assert_eq!(body["name"], "FC Lens");
        assert_eq!(body["iconUrl"], "http://lens.example/icon.png");
        assert_eq!(body["homeUrl"], "http://lens.example/");
        assert_eq!(body["buttonTitle"], "Analyze Token");
        assert_eq!(body["splashBackgroundColor"], "#1a1a1a");
    }

    #[tokio::test]
    async fn manifest_prefers_public_url() {
        let app = app(Some("https://fclens.xyz"));
        let (_, body) = send(&app, get("/.well-known/farcaster.json")).await;
        assert_eq!(body["splashImageUrl"], "https://fclens.xyz/splash.png");
        assert_eq!(body["imageUrl"], "https://fclens.xyz/preview.png");
    }
}
