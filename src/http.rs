use crate::backend::BookingBackend;
use crate::configuration::Configuration;
use crate::error::StoreError;
use crate::types::{Actor, Appointment, AppointmentStatus, SlotView};
use crate::AppState;
use axum::extract::{Request, State};
use axum::http::HeaderMap;
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookRequest {
    time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AppointmentIdRequest {
    id: Uuid,
}

pub fn create_app<T: BookingBackend, C: Configuration>(backend: T, configuration: C) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/slots", get(get_slots::<T>))
        .route("/book", post(book_slot::<T>))
        .route("/appointments/mine", get(my_appointments::<T>))
        .route("/cancel", post(cancel_appointment::<T>));

    let provider_key = configuration.provider_key();
    let provider = Router::new()
        .route("/appointments", get(provider_queue::<T>))
        .route("/accept", post(accept_appointment::<T>))
        .route("/complete", post(complete_appointment::<T>))
        .route("/cleanup", post(cleanup_appointment::<T>))
        .route_layer(middleware::from_fn(move |request: Request, next: Next| {
            let provider_key = provider_key.clone();
            async move { provider_auth(provider_key, request, next).await }
        }));

    Router::new()
        .merge(public)
        .merge(provider)
        .with_state(AppState { backend })
        .layer(cors)
}

/// Gate on the provider routes. No configured key means the degraded open
/// mode of the original widget, where anyone may act as the provider.
async fn provider_auth(
    provider_key: Option<String>,
    request: Request,
    next: Next,
) -> Result<Response, StoreError> {
    let Some(expected) = provider_key else {
        return Ok(next.run(request).await);
    };
    match request.headers().get("x-provider-key") {
        Some(value) if value.to_str().unwrap_or("") == expected => Ok(next.run(request).await),
        _ => Err(StoreError::Unauthorized),
    }
}

/// The session layer in front of this service authenticates clients and
/// forwards their identity in headers; the body is never trusted for it.
fn client_actor(headers: &HeaderMap) -> Result<Actor, StoreError> {
    let id = headers
        .get("x-client-id")
        .and_then(|value| value.to_str().ok())
        .filter(|id| !id.is_empty())
        .ok_or(StoreError::Unauthorized)?;
    let name = headers
        .get("x-client-name")
        .and_then(|value| value.to_str().ok())
        .filter(|name| !name.is_empty())
        .unwrap_or(id);
    Ok(Actor::client(id, name))
}

async fn get_slots<T: BookingBackend>(
    State(state): State<AppState<T>>,
) -> Result<Json<Vec<SlotView>>, StoreError> {
    Ok(Json(state.backend.slot_views()?))
}

async fn book_slot<T: BookingBackend>(
    State(state): State<AppState<T>>,
    headers: HeaderMap,
    Json(request): Json<BookRequest>,
) -> Result<Json<Appointment>, StoreError> {
    let actor = client_actor(&headers)?;
    Ok(Json(state.backend.create(&request.time, &actor)?))
}

async fn my_appointments<T: BookingBackend>(
    State(state): State<AppState<T>>,
    headers: HeaderMap,
) -> Result<Json<Vec<Appointment>>, StoreError> {
    let actor = client_actor(&headers)?;
    Ok(Json(state.backend.list_for(&actor)?))
}

async fn cancel_appointment<T: BookingBackend>(
    State(state): State<AppState<T>>,
    headers: HeaderMap,
    Json(request): Json<AppointmentIdRequest>,
) -> Result<Json<Appointment>, StoreError> {
    let actor = client_actor(&headers)?;
    Ok(Json(state.backend.set_status(
        request.id,
        AppointmentStatus::Cancelled,
        &actor,
    )?))
}

async fn provider_queue<T: BookingBackend>(
    State(state): State<AppState<T>>,
) -> Result<Json<Vec<Appointment>>, StoreError> {
    Ok(Json(state.backend.list()?))
}

async fn accept_appointment<T: BookingBackend>(
    State(state): State<AppState<T>>,
    Json(request): Json<AppointmentIdRequest>,
) -> Result<Json<Appointment>, StoreError> {
    Ok(Json(state.backend.set_status(
        request.id,
        AppointmentStatus::Accepted,
        &Actor::provider(),
    )?))
}

async fn complete_appointment<T: BookingBackend>(
    State(state): State<AppState<T>>,
    Json(request): Json<AppointmentIdRequest>,
) -> Result<Json<&'static str>, StoreError> {
    state.backend.remove(request.id, &Actor::provider())?;
    Ok(Json("appointment completed"))
}

async fn cleanup_appointment<T: BookingBackend>(
    State(state): State<AppState<T>>,
    Json(request): Json<AppointmentIdRequest>,
) -> Result<Json<&'static str>, StoreError> {
    state.backend.remove(request.id, &Actor::provider())?;
    Ok(Json("appointment cleaned up"))
}
