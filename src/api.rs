//! HTTP API handlers for Rivalry.
//!
//! - **GET /**: the popup page, prefilled with the remembered identifiers.
//! - **POST /compare**: remembers the identifiers and renders the comparison.
//! - **GET /api/compare**: the same comparison as JSON.
//! - **GET /settings**: the remembered identifiers as JSON.
//! - **GET /health**: liveness.
//!
//! A failed comparison is logged once with the full error and shown to the
//! user as a single message.

use axum::{
    Form, Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use serde_json::json;
use tower_http::trace::TraceLayer;
use tracing::{info, instrument, warn};

use crate::comparison::Rivalry;
use crate::error::CompareError;
use crate::model::{CompareForm, CompareQuery, ComparisonReport, SavedProfiles};
use crate::render::{error_page, form_page, report_page};
use crate::storage::Storage;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub storage: Storage,
    pub rivalry: Rivalry,
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(get_page))
        .route("/compare", post(post_compare))
        .route("/api/compare", get(get_compare_json))
        .route("/settings", get(get_settings))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET / - The popup page.
#[instrument(skip(state))]
pub async fn get_page(State(state): State<AppState>) -> Response {
    let saved = match state.storage.load_profiles().await {
        Ok(saved) => saved,
        Err(e) => {
            warn!(error = %e, "Failed to load saved profiles");
            SavedProfiles::default()
        }
    };

    form_page(&saved).into_response()
}

/// POST /compare - Remember both identifiers and render the comparison.
///
/// # Form Fields
///
/// - `my_profile`: the user's own profile identifier
/// - `competitor_profile`: the competitor's profile identifier
#[instrument(skip(state, form))]
pub async fn post_compare(
    State(state): State<AppState>,
    Form(form): Form<CompareForm>,
) -> Response {
    let saved = SavedProfiles {
        my_profile: Some(form.my_profile.clone()),
        competitor_profile: Some(form.competitor_profile.clone()),
    };

    let outcome = match state
        .storage
        .save_profiles(&form.my_profile, &form.competitor_profile)
        .await
    {
        Ok(()) => run_comparison(&state, &form.my_profile, &form.competitor_profile).await,
        Err(e) => Err(CompareError::from(e)),
    };

    match outcome {
        Ok(report) => report_page(&saved, &report).into_response(),
        Err(e) => (e.status_code(), error_page(&saved, &e.to_string())).into_response(),
    }
}

/// GET /api/compare - The comparison as JSON.
///
/// # Query Parameters
///
/// - `mine` (required): the user's own profile identifier
/// - `competitor` (required): the competitor's profile identifier
///
/// Errors come back as `{"error": "..."}` with a matching status code.
#[instrument(skip(state))]
pub async fn get_compare_json(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<Json<ComparisonReport>, (StatusCode, Json<serde_json::Value>)> {
    run_comparison(&state, &query.mine, &query.competitor)
        .await
        .map(Json)
        .map_err(|e| (e.status_code(), Json(json!({ "error": e.to_string() }))))
}

/// GET /settings - The remembered identifiers.
#[instrument(skip(state))]
pub async fn get_settings(
    State(state): State<AppState>,
) -> Result<Json<SavedProfiles>, StatusCode> {
    match state.storage.load_profiles().await {
        Ok(saved) => Ok(Json(saved)),
        Err(e) => {
            warn!(error = %e, "Failed to load saved profiles");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

/// GET /health - Simple health check endpoint.
pub async fn health_check() -> impl IntoResponse {
    StatusCode::OK
}

async fn run_comparison(
    state: &AppState,
    mine: &str,
    competitor: &str,
) -> Result<ComparisonReport, CompareError> {
    match state
        .rivalry
        .compare_profiles(mine, competitor, Utc::now())
        .await
    {
        Ok(report) => {
            info!(
                mine = %report.mine_identifier,
                competitor = %report.competitor_identifier,
                "Comparison served"
            );
            Ok(report)
        }
        Err(e) => {
            warn!(mine, competitor, error = ?e, "Comparison failed");
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    use crate::data_sources::{ContestClient, ProfileClient};

    async fn test_router() -> Router {
        let storage = Storage::new("sqlite::memory:").await.unwrap();
        storage.save_profiles("alice", "bob").await.unwrap();

        router(AppState {
            storage,
            rivalry: Rivalry::new(
                ProfileClient::with_base_url("http://127.0.0.1:9"),
                ContestClient::with_base_url("http://127.0.0.1:9"),
            ),
        })
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_router()
            .await
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_missing_query_parameter_is_rejected() {
        let response = test_router()
            .await
            .oneshot(
                Request::get("/api/compare?mine=alice")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_page_is_html() {
        let response = test_router()
            .await
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response.headers()["content-type"].to_str().unwrap();
        assert!(content_type.starts_with("text/html"));
    }
}
