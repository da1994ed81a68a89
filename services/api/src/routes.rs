use crate::infra::{deserialize_optional_timestamp, AppState};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Extension;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;
use scholarsync::catalog::ScholarshipCatalog;
use scholarsync::error::AppError;
use scholarsync::matching::{filter_eligible, rank_scholarships, Profile};
use scholarsync::recommendations::{
    match_router, MatchScoreStore, MatchService, MatchView, ProfileRepository,
    ScholarshipRepository,
};
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub(crate) struct MatchPreviewRequest {
    pub(crate) profile: Profile,
    /// Seed-format records, normalised the same way as a catalog file.
    pub(crate) scholarships: Vec<serde_json::Value>,
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    #[serde(default = "include_partial_by_default")]
    pub(crate) include_partial: bool,
    #[serde(default, deserialize_with = "deserialize_optional_timestamp")]
    pub(crate) now: Option<DateTime<Utc>>,
}

fn include_partial_by_default() -> bool {
    true
}

#[derive(Debug, Serialize)]
pub(crate) struct MatchPreviewResponse {
    pub(crate) evaluated_at: DateTime<Utc>,
    pub(crate) evaluated: usize,
    pub(crate) matches: Vec<MatchView>,
}

#[derive(Debug, Serialize)]
pub(crate) struct TagsResponse {
    pub(crate) tags: Vec<String>,
}

pub(crate) fn with_match_routes<P, S, M>(service: Arc<MatchService<P, S, M>>) -> axum::Router
where
    P: ProfileRepository + 'static,
    S: ScholarshipRepository + 'static,
    M: MatchScoreStore + 'static,
{
    match_router(service)
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
        .route(
            "/api/v1/scholarships/tags",
            axum::routing::get(tags_endpoint),
        )
        .route(
            "/api/v1/matches/preview",
            axum::routing::post(match_preview_endpoint),
        )
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready", "scholarships": state.catalog.len() })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

pub(crate) async fn tags_endpoint(Extension(state): Extension<AppState>) -> Json<TagsResponse> {
    Json(TagsResponse {
        tags: state.catalog.tags(),
    })
}

/// Stateless ranking of caller-supplied data; nothing is persisted.
pub(crate) async fn match_preview_endpoint(
    Json(payload): Json<MatchPreviewRequest>,
) -> Result<Json<MatchPreviewResponse>, AppError> {
    let MatchPreviewRequest {
        profile,
        scholarships,
        limit,
        include_partial,
        now,
    } = payload;

    if limit == Some(0) {
        return Err(AppError::Input("limit must be at least 1".to_string()));
    }

    let now = now.unwrap_or_else(Utc::now);
    let catalog = ScholarshipCatalog::from_json_values(scholarships)?;
    let ranked = rank_scholarships(&profile, catalog.all(), now);
    let mut matches = filter_eligible(ranked, include_partial);
    if let Some(limit) = limit {
        matches.truncate(limit);
    }

    Ok(Json(MatchPreviewResponse {
        evaluated_at: now,
        evaluated: catalog.len(),
        matches: matches.into_iter().map(MatchView::from).collect(),
    }))
}
