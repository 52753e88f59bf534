use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::{BookingId, RoomId, UserId};

/// Body of `POST /bookings`. The same shape is sent for the pricing-only
/// preview and for the committing request; only `preview` differs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingDraft {
    pub user_id: UserId,
    pub room_id: RoomId,
    pub room_name: String,
    pub date: NaiveDate,
    pub preview: bool,
}

impl BookingDraft {
    pub fn preview(
        user_id: UserId,
        room_id: RoomId,
        room_name: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            user_id,
            room_id,
            room_name: room_name.into(),
            date,
            preview: true,
        }
    }

    /// Copy of this draft that persists the booking when sent.
    pub fn to_commit(&self) -> Self {
        Self {
            preview: false,
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceQuote {
    #[serde(with = "rust_decimal::serde::float")]
    pub base_price: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub surcharge: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    #[serde(
        default,
        with = "rust_decimal::serde::float_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub weather_temp: Option<Decimal>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfirmation {
    #[serde(alias = "booking_id")]
    pub id: BookingId,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
}

/// One row of `GET /bookings/user/{user_id}`.
///
/// `date` stays a string: the backend renders it with its own date formatter
/// and the client only displays it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingRecord {
    pub id: BookingId,
    pub room_name: String,
    pub date: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_price: Decimal,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub service: Option<String>,
}
