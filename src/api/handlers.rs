use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::{header, HeaderMap},
    Json,
};

use super::error::ApiError;
use super::state::AppState;
use crate::db::memory::DEFAULT_LIST_LIMIT;
use crate::db::models::{PopularToken, SearchHistoryEntry, StoredAnalysis};
use crate::services::cast::share_cast;
use crate::types::models::{AnalyzeRequest, HealthStatus, LimitParams, MiniAppManifest, ShareCast};
use crate::utils::{is_valid_eth_address, parse_limit};

pub async fn analyze_token(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<StoredAnalysis>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    if !is_valid_eth_address(&request.contract_address) {
        tracing::warn!("Rejected analysis for invalid address {:?}", request.contract_address);
        return Err(ApiError::InvalidAddress);
    }

    let analysis = state
        .analysis
        .analyze(&request.contract_address, request.chain_id, request.user_fid)
        .await?;

    Ok(Json(analysis))
}

pub async fn get_token_analysis(
    State(state): State<AppState>,
    Path(contract_address): Path<String>,
) -> Result<Json<StoredAnalysis>, ApiError> {
    state
        .analysis
        .get(&contract_address)
        .await
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn get_share_cast(
    State(state): State<AppState>,
    Path(contract_address): Path<String>,
) -> Result<Json<ShareCast>, ApiError> {
    let analysis = state
        .analysis
        .get(&contract_address)
        .await
        .ok_or(ApiError::NotFound)?;

    share_cast(&analysis)
        .map(Json)
        .map_err(|e| ApiError::Internal(format!("compose url: {}", e)))
}

pub async fn get_recent(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Json<Vec<StoredAnalysis>> {
    let limit = parse_limit(params.limit.as_deref(), DEFAULT_LIST_LIMIT);
    Json(state.analysis.recent(limit).await)
}

pub async fn get_popular(
    State(state): State<AppState>,
    Query(params): Query<LimitParams>,
) -> Json<Vec<PopularToken>> {
    let limit = parse_limit(params.limit.as_deref(), DEFAULT_LIST_LIMIT);
    Json(state.analysis.popular(limit).await)
}

pub async fn get_user_history(
    State(state): State<AppState>,
    Path(user_fid): Path<String>,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<SearchHistoryEntry>>, ApiError> {
    let user_fid: u64 = user_fid
        .parse()
        .map_err(|_| ApiError::BadRequest(format!("invalid user fid {:?}", user_fid)))?;
    let limit = parse_limit(params.limit.as_deref(), DEFAULT_LIST_LIMIT);

    Ok(Json(state.analysis.user_history(user_fid, limit).await))
}

pub async fn health() -> Json<HealthStatus> {
    Json(HealthStatus {
        status: "ok",
        timestamp: chrono::Utc::now(),
    })
}

pub async fn farcaster_manifest(State(state): State<AppState>, headers: HeaderMap) -> Json<MiniAppManifest> {
    let base = state.public_url.clone().unwrap_or_else(|| {
        let host = headers
            .get(header::HOST)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("localhost");
        format!("http://{}", host)
    });

    Json(MiniAppManifest {
        version: "1",
        name: "FC Lens",
        icon_url: format!("{}/icon.png", base),
        home_url: format!("{}/", base),
        image_url: format!("{}/preview.png", base),
        button_title: "Analyze Token",
        splash_image_url: format!("{}/splash.png", base),
        splash_background_color: "#1a1a1a",
    })
}
