use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use serde_json::json;

use super::repository::{MatchScoreStore, ProfileRepository, ScholarshipRepository};
use super::service::{MatchQuery, MatchService, MatchServiceError};
use super::views::MatchView;
use crate::matching::{ScholarshipId, UserId};

/// Router exposing per-user match listings and single-scholarship scores.
pub fn match_router<P, S, M>(service: Arc<MatchService<P, S, M>>) -> Router
where
    P: ProfileRepository + 'static,
    S: ScholarshipRepository + 'static,
    M: MatchScoreStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/users/:user_id/matches",
            get(matches_handler::<P, S, M>),
        )
        .route(
            "/api/v1/users/:user_id/matches/:scholarship_id",
            get(scholarship_match_handler::<P, S, M>),
        )
        .with_state(service)
}

pub(crate) async fn matches_handler<P, S, M>(
    State(service): State<Arc<MatchService<P, S, M>>>,
    Path(user_id): Path<String>,
    Query(query): Query<MatchQuery>,
) -> Response
where
    P: ProfileRepository + 'static,
    S: ScholarshipRepository + 'static,
    M: MatchScoreStore + 'static,
{
    match service.matched_scholarships(&UserId(user_id), query) {
        Ok(matches) => {
            let views: Vec<MatchView> = matches.into_iter().map(MatchView::from).collect();
            (StatusCode::OK, axum::Json(views)).into_response()
        }
        Err(error) => error_response(error),
    }
}

pub(crate) async fn scholarship_match_handler<P, S, M>(
    State(service): State<Arc<MatchService<P, S, M>>>,
    Path((user_id, scholarship_id)): Path<(String, String)>,
) -> Response
where
    P: ProfileRepository + 'static,
    S: ScholarshipRepository + 'static,
    M: MatchScoreStore + 'static,
{
    match service.scholarship_match(&UserId(user_id), &ScholarshipId(scholarship_id)) {
        Ok(result) => (StatusCode::OK, axum::Json(MatchView::from(result))).into_response(),
        Err(error) => error_response(error),
    }
}

fn error_response(error: MatchServiceError) -> Response {
    let status = match error {
        MatchServiceError::ProfileNotFound(_) | MatchServiceError::ScholarshipNotFound(_) => {
            StatusCode::NOT_FOUND
        }
        MatchServiceError::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    let payload = json!({
        "error": error.to_string(),
    });
    (status, axum::Json(payload)).into_response()
}
