// Data model shared by the store, registry, engine and HTTP layer.
//
// Wire names are camelCase to match the persisted data.json layout and the
// JSON API responses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single hostel room. Identified by a monotonically assigned numeric id;
/// no two rooms may share the same (hostelType, hostelNumber, roomNumber).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: u32,
    pub hostel_type: String,
    pub hostel_number: u32,
    pub seater: u32,
    pub room_number: String,
    pub price: f64,
    pub is_available: bool,
}

/// An active booking. The same shape is reused for history entries: history
/// keeps a permanent copy of every booking ever made, cancelled or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub booking_id: i64,
    pub room_id: u32,
    pub room_number: String,
    pub hostel_type: String,
    pub hostel_number: u32,
    pub price: f64,
    pub user_name: String,
    pub booked_at: DateTime<Utc>,
}

/// One user waiting for a specific unavailable room. The queue is FIFO per
/// room: promotion always takes the earliest-inserted entry for a room.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WaitingEntry {
    pub room_id: u32,
    pub user_name: String,
    pub requested_at: DateTime<Utc>,
}

/// The whole application state, persisted as one JSON blob and rewritten in
/// full on every mutating operation. Collections default to empty so a blob
/// missing a key still loads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    #[serde(default)]
    pub rooms: Vec<Room>,
    #[serde(default)]
    pub bookings: Vec<Booking>,
    #[serde(default)]
    pub waiting_queue: Vec<WaitingEntry>,
    #[serde(default)]
    pub booking_history: Vec<Booking>,
}
