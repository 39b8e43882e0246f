use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Map, Value};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::attributes::project_attributes;
use crate::core::histogram::fare_histogram;
use crate::domain::model::{ErrorResponse, FareHistogram, Passenger};
use crate::domain::ports::PassengerRepository;
use crate::utils::error::TitanicError;

pub type SharedRepository = Arc<dyn PassengerRepository>;

pub fn create_router(repo: SharedRepository) -> Router {
    let api = Router::new()
        .route("/passengers", get(list_passengers))
        .route("/passengers/{id}", get(get_passenger))
        .route("/passengers/{id}/attributes", get(get_passenger_attributes))
        .route("/stats/fare_histogram", get(get_fare_histogram));

    Router::new()
        .nest("/api/v1", api)
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::new().allow_origin(Any))
        .with_state(repo)
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl From<TitanicError> for ApiError {
    fn from(e: TitanicError) -> Self {
        if e.is_not_found() {
            return Self {
                status: StatusCode::NOT_FOUND,
                message: e.user_friendly_message(),
            };
        }
        tracing::error!("Request failed: {}", e);
        Self::internal(e.user_friendly_message())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorResponse { message: self.message })).into_response()
    }
}

/// Runs a repository call on the blocking pool; repository I/O is synchronous.
async fn with_repo<T, F>(repo: SharedRepository, call: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&dyn PassengerRepository) -> crate::Result<T> + Send + 'static,
{
    tokio::task::spawn_blocking(move || call(repo.as_ref()))
        .await
        .map_err(|e| {
            tracing::error!("Repository task failed: {}", e);
            ApiError::internal("Internal server error")
        })?
        .map_err(ApiError::from)
}

fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::bad_request("Invalid passenger ID format"))
}

async fn list_passengers(State(repo): State<SharedRepository>) -> Result<Json<Vec<Passenger>>, ApiError> {
    let passengers = with_repo(repo, |r| r.list_all()).await?;
    Ok(Json(passengers))
}

async fn get_passenger(
    State(repo): State<SharedRepository>,
    Path(id): Path<String>,
) -> Result<Json<Passenger>, ApiError> {
    let id = parse_id(&id)?;
    let passenger = with_repo(repo, move |r| r.get_by_id(id)).await?;
    Ok(Json(passenger))
}

/// `?attributes=Name&attributes=Sex`, or comma-separated within one parameter.
async fn get_passenger_attributes(
    State(repo): State<SharedRepository>,
    Path(id): Path<String>,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Json<Map<String, Value>>, ApiError> {
    let id = parse_id(&id)?;
    let attributes: Vec<String> = params
        .into_iter()
        .filter(|(key, _)| key == "attributes")
        .flat_map(|(_, value)| {
            value
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        })
        .collect();
    if attributes.is_empty() {
        return Err(ApiError::bad_request(
            "You must provide at least one attribute.",
        ));
    }

    let passenger = with_repo(repo, move |r| r.get_by_id(id)).await?;
    let projected = project_attributes(&passenger, &attributes)?;
    Ok(Json(projected))
}

async fn get_fare_histogram(State(repo): State<SharedRepository>) -> Result<Json<FareHistogram>, ApiError> {
    let fares = with_repo(repo, |r| r.list_fare_values()).await?;
    Ok(Json(fare_histogram(fares)))
}

async fn health() -> &'static str {
    "OK"
}
