use super::*;

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde_json::json;
use shared::domain::{BookingId, RoomId};
use tokio::{net::TcpListener, sync::Mutex};

use crate::error::ErrorKind;

const UNKNOWN_ROOM: i64 = 99;
const BROKEN_ROOM: i64 = 500;

#[derive(Clone, Default)]
struct ServerState {
    received: Arc<Mutex<Vec<BookingDraft>>>,
}

async fn handle_booking(
    State(state): State<ServerState>,
    Json(draft): Json<BookingDraft>,
) -> Response {
    state.received.lock().await.push(draft.clone());

    match draft.room_id.0 {
        UNKNOWN_ROOM => (
            StatusCode::NOT_FOUND,
            Json(json!({ "error": "Room not found" })),
        )
            .into_response(),
        BROKEN_ROOM => (StatusCode::INTERNAL_SERVER_ERROR, "<html>boom</html>").into_response(),
        _ if draft.preview => Json(json!({
            "base_price": 100.0,
            "surcharge": 15.5,
            "total_price": 115.5,
            "weather_temp": 26.0,
        }))
        .into_response(),
        _ => (
            StatusCode::CREATED,
            Json(json!({ "booking_id": 42, "total_price": 115.5 })),
        )
            .into_response(),
    }
}

async fn handle_user_bookings(Path(user_id): Path<String>) -> Response {
    if user_id != "7" {
        return Json(json!([])).into_response();
    }
    Json(json!([
        {
            "id": 3,
            "room_name": "Harbour Room",
            "date": "Tue, 03 Nov 2026 00:00:00 GMT",
            "total_price": 120.0,
            "created_at": "2026-10-19 09:00:00"
        }
    ]))
    .into_response()
}

async fn handle_health() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy", "service": "Booking Service" }))
}

async fn spawn_booking_server() -> anyhow::Result<(String, ServerState)> {
    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let state = ServerState::default();
    let app = Router::new()
        .route("/bookings", post(handle_booking))
        .route("/bookings/user/:user_id", get(handle_user_bookings))
        .route("/health", get(handle_health))
        .with_state(state.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    Ok((format!("http://{addr}"), state))
}

fn draft(room_id: i64) -> BookingDraft {
    BookingDraft::preview(
        UserId::new("7"),
        RoomId(room_id),
        "Harbour Room",
        NaiveDate::from_ymd_opt(2026, 11, 3).expect("date"),
    )
}

#[tokio::test]
async fn preview_posts_draft_and_decodes_quote() {
    let (api_url, state) = spawn_booking_server().await.expect("spawn server");
    let service = HttpPricingService::new(&api_url).expect("service");

    let quote = service.preview(&draft(1)).await.expect("preview");

    assert_eq!(quote.total_price, Decimal::new(1155, 1));
    assert_eq!(quote.weather_temp, Some(Decimal::from(26)));
    assert_eq!(state.received.lock().await.as_slice(), &[draft(1)]);
}

#[tokio::test]
async fn commit_accepts_created_status() {
    let (api_url, state) = spawn_booking_server().await.expect("spawn server");
    let service = HttpPricingService::new(&format!("{api_url}/")).expect("service");

    let confirmation = service
        .commit(&draft(1).to_commit())
        .await
        .expect("commit");

    assert_eq!(confirmation.id, BookingId(42));
    let received = state.received.lock().await;
    assert_eq!(received.len(), 1);
    assert!(!received[0].preview);
}

#[tokio::test]
async fn backend_error_message_is_surfaced_verbatim() {
    let (api_url, _state) = spawn_booking_server().await.expect("spawn server");
    let service = HttpPricingService::new(&api_url).expect("service");

    let err = service.preview(&draft(UNKNOWN_ROOM)).await.expect_err("must fail");

    assert_eq!(err.kind(), ErrorKind::Application);
    assert_eq!(err.to_string(), "Room not found");
}

#[tokio::test]
async fn error_status_without_error_body_uses_fallback() {
    let (api_url, _state) = spawn_booking_server().await.expect("spawn server");
    let service = HttpPricingService::new(&api_url).expect("service");

    let err = service.commit(&draft(BROKEN_ROOM)).await.expect_err("must fail");

    match err {
        BookingError::Application { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "booking service returned status 500");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    std::env::set_var("NO_PROXY", "127.0.0.1,localhost");
    let service = HttpPricingService::new(&format!("http://{addr}")).expect("service");
    let err = service.preview(&draft(1)).await.expect_err("must fail");

    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[tokio::test]
async fn user_bookings_and_health_are_decoded() {
    let (api_url, _state) = spawn_booking_server().await.expect("spawn server");
    let service = HttpPricingService::new(&api_url).expect("service");

    let bookings = service
        .user_bookings(&UserId::new("7"))
        .await
        .expect("bookings");
    assert_eq!(bookings.len(), 1);
    assert_eq!(bookings[0].id, BookingId(3));
    assert_eq!(bookings[0].room_name, "Harbour Room");

    let health = service.health().await.expect("health");
    assert_eq!(health.status, "healthy");
}

#[test]
fn rejects_non_http_base_url() {
    assert!(HttpPricingService::new("file:///tmp/bookings").is_err());
}
