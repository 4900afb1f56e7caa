//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use tracing::{info, warn};

use crate::directory::DirectoryError;
use crate::planner::{RouteError, RouteQuery};

use super::dto::*;
use super::state::AppState;

/// Create the router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/stations/search", get(search_stations))
        .route("/api/route", get(plan_route))
        .route("/api/cache/invalidate", post(invalidate_cache))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Search stations by name for autocomplete.
async fn search_stations(
    State(state): State<AppState>,
    Query(req): Query<StationSearchRequest>,
) -> Result<Json<StationSearchResponse>, AppError> {
    let limit = req
        .limit
        .unwrap_or(state.search_limit)
        .min(state.search_limit);
    let matches = state.planner.directory().search(&req.q, limit).await?;

    Ok(Json(StationSearchResponse {
        stations: CandidateResult::from_candidates(&matches),
    }))
}

/// Plan a route between two station names.
async fn plan_route(
    State(state): State<AppState>,
    Query(req): Query<RouteRequest>,
) -> Result<Json<RouteResponse>, AppError> {
    let query = RouteQuery {
        origin: req.from,
        destination: req.to,
        origin_choice: req.from_choice,
        destination_choice: req.to_choice,
    };

    let outcome = state
        .planner
        .plan(&query, &state.request_token())
        .await?;

    Ok(Json(RouteResponse::from(&outcome)))
}

/// Drop the cached graph so the next query reloads the data store.
async fn invalidate_cache(State(state): State<AppState>) -> StatusCode {
    match state.planner.cache() {
        Some(cache) => {
            cache.invalidate_all();
            info!("Graph cache invalidated");
            StatusCode::NO_CONTENT
        }
        None => StatusCode::NOT_FOUND,
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Unavailable { message: String },
    Internal { message: String },
}

impl From<RouteError> for AppError {
    fn from(e: RouteError) -> Self {
        let message = e.to_string();
        match e {
            RouteError::EmptyQuery | RouteError::InvalidSelection { .. } => {
                AppError::BadRequest { message }
            }
            RouteError::StationNotFound { .. } | RouteError::PathNotFound { .. } => {
                AppError::NotFound { message }
            }
            RouteError::DataStoreUnavailable(_) | RouteError::Cancelled => {
                AppError::Unavailable { message }
            }
            RouteError::UnknownStationInPath(_) => AppError::Internal { message },
        }
    }
}

impl From<DirectoryError> for AppError {
    fn from(e: DirectoryError) -> Self {
        AppError::from(RouteError::from(e))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Unavailable { message } => (StatusCode::SERVICE_UNAVAILABLE, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        warn!(status = status.as_u16(), error = %message, "Request failed");

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::cache::{GraphCache, GraphCacheConfig};
    use crate::domain::{ConnectionRecord, StationRecord};
    use crate::planner::RoutePlanner;
    use crate::store::{FileStore, MemoryStore, StoreBackend};

    fn memory_store() -> StoreBackend {
        MemoryStore::new(
            vec![
                StationRecord::new("A", "Paris", Some("48.8566,2.3522")),
                StationRecord::new("B", "Lyon", Some("45.7640,4.8357")),
                StationRecord::new("C", "Marseille", Some("43.2965,5.3698")),
                StationRecord::new("P1", "Paris Gare de Lyon", Some("48.8443,2.3743")),
                StationRecord::new("I", "Ajaccio", Some("41.9192,8.7386")),
            ],
            vec![
                ConnectionRecord::new("A", "B"),
                ConnectionRecord::new("B", "C"),
                ConnectionRecord::new("P1", "B"),
            ],
        )
        .into()
    }

    fn app(store: StoreBackend) -> Router {
        let planner = RoutePlanner::new(Arc::new(store));
        create_router(AppState::new(planner, 10))
    }

    async fn call(router: Router, method: &str, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn health_is_ok() {
        let request = Request::builder()
            .uri("/health")
            .body(Body::empty())
            .unwrap();
        let response = app(memory_store()).oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn search_lists_numbered_candidates() {
        let (status, json) = call(app(memory_store()), "GET", "/api/stations/search?q=paris").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["stations"][0]["name"], "Paris");
        assert_eq!(json["stations"][1]["name"], "Paris Gare de Lyon");
        assert_eq!(json["stations"][1]["choice"], 2);
    }

    #[tokio::test]
    async fn search_respects_limit() {
        let (_, json) = call(app(memory_store()), "GET", "/api/stations/search?q=a&limit=2").await;
        assert_eq!(json["stations"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn search_with_blank_query_is_bad_request() {
        let (status, json) = call(app(memory_store()), "GET", "/api/stations/search?q=%20").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "station name query is empty");
    }

    #[tokio::test]
    async fn route_found() {
        let (status, json) = call(
            app(memory_store()),
            "GET",
            "/api/route?from=Paris&to=Marseille&from_choice=1",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "found");
        let names: Vec<&str> = json["stations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, vec!["Paris", "Lyon", "Marseille"]);
        let km = json["distance_km"].as_f64().unwrap();
        assert!((km - 670.0).abs() < 10.0);
    }

    #[tokio::test]
    async fn route_ambiguous() {
        let (status, json) = call(app(memory_store()), "GET", "/api/route?from=Paris&to=Marseille").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["status"], "ambiguous");
        assert_eq!(json["origin"].as_array().unwrap().len(), 2);
        assert!(json.get("destination").is_none());
    }

    #[tokio::test]
    async fn route_error_statuses() {
        let (status, _) = call(app(memory_store()), "GET", "/api/route?from=Atlantis&to=Lyon").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(app(memory_store()), "GET", "/api/route?from=Marseille&to=Ajaccio").await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = call(
            app(memory_store()),
            "GET",
            "/api/route?from=Paris&to=Marseille&from_choice=9",
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn missing_data_store_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::new(dir.path().join("missing")).into();

        let (status, json) = call(app(store), "GET", "/api/route?from=Paris&to=Lyon").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert!(json["error"].as_str().unwrap().starts_with("data store unavailable"));
    }

    #[tokio::test]
    async fn invalidate_without_cache_is_not_found() {
        let (status, _) = call(app(memory_store()), "POST", "/api/cache/invalidate").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn invalidate_with_cache() {
        let cache = GraphCache::new(&GraphCacheConfig::new(Duration::from_secs(60)));
        let planner = RoutePlanner::new(Arc::new(memory_store())).with_cache(cache);
        let router = create_router(AppState::new(planner, 10));

        let (status, _) = call(router, "POST", "/api/cache/invalidate").await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    #[test]
    fn route_errors_map_to_app_errors() {
        assert!(matches!(
            AppError::from(RouteError::EmptyQuery),
            AppError::BadRequest { .. }
        ));
        assert!(matches!(
            AppError::from(RouteError::Cancelled),
            AppError::Unavailable { .. }
        ));
        assert!(matches!(
            AppError::from(RouteError::UnknownStationInPath("Z".into())),
            AppError::Internal { .. }
        ));
    }
}
