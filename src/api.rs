// HTTP layer: axum router and handlers over the store, registry and engine.
//
// Every mutating handler follows the same shape: take the write guard, load
// the full state, run the in-memory transition, save the full state, respond.
// The guard serializes the load-mutate-save critical sections so two mutating
// requests cannot overwrite each other's changes.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Instant;

use axum::extract::{Path, Query, Request, State};
use axum::http::StatusCode;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use futures::FutureExt;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;

use crate::engine::{self, BookOutcome};
use crate::error::ApiError;
use crate::registry::{self, NewRoom};
use crate::store::Store;

/// Shared handler context: the store plus the write guard serializing
/// mutating requests.
#[derive(Clone)]
pub struct AppContext {
    store: Arc<Store>,
    write_guard: Arc<Mutex<()>>,
}

impl AppContext {
    pub fn new(store: Store) -> Self {
        Self {
            store: Arc::new(store),
            write_guard: Arc::new(Mutex::new(())),
        }
    }
}

pub fn router(ctx: AppContext) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/rooms", get(list_rooms))
        .route("/rooms/sorted", get(sorted_rooms))
        .route("/rooms/filter", get(filter_rooms))
        .route("/bookings", get(list_bookings))
        .route("/history", get(booking_history))
        .route("/waiting-queue", get(waiting_queue))
        .route("/add-room", post(add_room))
        .route("/book/:id", post(book_room))
        .route("/cancel/:booking_id", delete(cancel_booking))
        .route("/rooms/:id", delete(remove_room))
        .fallback(endpoint_not_found)
        // The browser client is served from another origin.
        .layer(CorsLayer::permissive())
        .layer(axum::middleware::from_fn(catch_panic))
        .layer(axum::middleware::from_fn(log_request))
        .with_state(ctx)
}

/// Logs one line per request with method, path, status and duration.
async fn log_request(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();
    let response = next.run(req).await;
    tracing::info!(
        %method,
        %uri,
        status = response.status().as_u16(),
        elapsed_ms = start.elapsed().as_millis() as u64,
        "request"
    );
    response
}

/// Converts a handler panic into the JSON 500 envelope instead of tearing
/// down the connection.
async fn catch_panic(req: Request, next: Next) -> Response {
    match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(response) => response,
        Err(_) => {
            tracing::error!("handler panicked");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Internal server error" })),
            )
                .into_response()
        }
    }
}

async fn endpoint_not_found() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Endpoint not found" })),
    )
        .into_response()
}

async fn index() -> Response {
    Json(json!({
        "message": "Hostel Booking API",
        "endpoints": [
            "GET  /rooms",
            "GET  /rooms/sorted",
            "GET  /rooms/filter?hostelType=&hostelNumber=&seater=",
            "GET  /bookings",
            "GET  /history",
            "GET  /waiting-queue",
            "POST /add-room",
            "POST /book/:id",
            "DELETE /cancel/:bookingId",
            "DELETE /rooms/:id"
        ]
    }))
    .into_response()
}

async fn list_rooms(State(ctx): State<AppContext>) -> Response {
    Json(ctx.store.load().await.rooms).into_response()
}

async fn sorted_rooms(State(ctx): State<AppContext>) -> Response {
    let state = ctx.store.load().await;
    Json(registry::sort_by_price_ascending(&state.rooms)).into_response()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FilterParams {
    hostel_type: Option<String>,
    hostel_number: Option<String>,
    seater: Option<String>,
}

async fn filter_rooms(
    State(ctx): State<AppContext>,
    Query(params): Query<FilterParams>,
) -> Result<Response, ApiError> {
    let missing = || {
        ApiError::Validation("Query params required: hostelType, hostelNumber, seater".to_string())
    };
    let hostel_type = params
        .hostel_type
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(missing)?;
    let hostel_number: u32 = params
        .hostel_number
        .as_deref()
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
        .ok_or_else(missing)?;
    let seater: u32 = params
        .seater
        .as_deref()
        .filter(|s| !s.is_empty())
        .and_then(|s| s.parse().ok())
        .ok_or_else(missing)?;

    let state = ctx.store.load().await;
    let filtered = registry::filter_by_criteria(&state.rooms, &hostel_type, hostel_number, seater);
    Ok(Json(filtered).into_response())
}

async fn list_bookings(State(ctx): State<AppContext>) -> Response {
    Json(ctx.store.load().await.bookings).into_response()
}

/// History is stored oldest-first and served newest-first.
async fn booking_history(State(ctx): State<AppContext>) -> Response {
    let mut history = ctx.store.load().await.booking_history;
    history.reverse();
    Json(history).into_response()
}

async fn waiting_queue(State(ctx): State<AppContext>) -> Response {
    Json(ctx.store.load().await.waiting_queue).into_response()
}

/// Pulls the add-room fields out of a free-form JSON body so a missing or
/// mistyped field produces the documented 400 envelope rather than a
/// framework rejection.
fn parse_new_room(body: &Value) -> Result<NewRoom, ApiError> {
    let required = || {
        ApiError::Validation(
            "hostelType, hostelNumber, seater, roomNumber and price are required".to_string(),
        )
    };
    let hostel_type = body
        .get("hostelType")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(required)?;
    let hostel_number = body
        .get("hostelNumber")
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(required)?;
    let seater = body
        .get("seater")
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(required)?;
    let room_number = body
        .get("roomNumber")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(required)?;
    let price = body.get("price").and_then(Value::as_f64).ok_or_else(required)?;

    Ok(NewRoom {
        hostel_type: hostel_type.to_string(),
        hostel_number,
        seater,
        room_number: room_number.to_string(),
        price,
    })
}

async fn add_room(
    State(ctx): State<AppContext>,
    body: Option<Json<Value>>,
) -> Result<Response, ApiError> {
    let body = body.map(|Json(v)| v).unwrap_or(Value::Null);
    let fields = parse_new_room(&body)?;

    let _guard = ctx.write_guard.lock().await;
    let mut state = ctx.store.load().await;
    let room = registry::create(&mut state.rooms, fields)?;
    ctx.store
        .save(&state)
        .await
        .map_err(|_| ApiError::Storage("Failed to save room".to_string()))?;
    Ok((StatusCode::CREATED, Json(room)).into_response())
}

async fn book_room(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
    body: Option<Json<Value>>,
) -> Result<Response, ApiError> {
    let room_id: u32 = id
        .parse()
        .map_err(|_| ApiError::Validation("Invalid room ID".to_string()))?;
    let user_name = body
        .as_ref()
        .and_then(|Json(v)| v.get("userName"))
        .and_then(Value::as_str)
        .unwrap_or("");

    let _guard = ctx.write_guard.lock().await;
    let mut state = ctx.store.load().await;
    let outcome = engine::book(&mut state, room_id, user_name)?;
    ctx.store
        .save(&state)
        .await
        .map_err(|_| ApiError::Storage("Failed to save booking".to_string()))?;

    Ok(match outcome {
        BookOutcome::Booked(booking) => (
            StatusCode::CREATED,
            Json(json!({ "message": "Room booked successfully", "booking": booking })),
        )
            .into_response(),
        BookOutcome::Queued { position } => (
            StatusCode::OK,
            Json(json!({
                "message": "Room is not available. You have been added to the waiting queue.",
                "queuePosition": position
            })),
        )
            .into_response(),
    })
}

async fn cancel_booking(
    State(ctx): State<AppContext>,
    Path(booking_id): Path<String>,
) -> Result<Response, ApiError> {
    let booking_id: i64 = booking_id
        .parse()
        .map_err(|_| ApiError::Validation("Invalid booking ID".to_string()))?;

    let _guard = ctx.write_guard.lock().await;
    let mut state = ctx.store.load().await;
    let result = engine::cancel(&mut state, booking_id)?;
    ctx.store
        .save(&state)
        .await
        .map_err(|_| ApiError::Storage("Failed to update data".to_string()))?;

    Ok(Json(json!({
        "message": "Booking cancelled",
        "cancelled": result.cancelled,
        "assignedFromQueue": result.assigned
    }))
    .into_response())
}

async fn remove_room(
    State(ctx): State<AppContext>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    let room_id: u32 = id
        .parse()
        .map_err(|_| ApiError::Validation("Invalid room ID".to_string()))?;

    let _guard = ctx.write_guard.lock().await;
    let mut state = ctx.store.load().await;
    let room = engine::remove_room(&mut state, room_id)?;
    ctx.store
        .save(&state)
        .await
        .map_err(|_| ApiError::Storage("Failed to update data".to_string()))?;

    Ok(Json(json!({ "message": "Room removed", "room": room })).into_response())
}
