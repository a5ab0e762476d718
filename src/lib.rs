// Hostel room-booking service.
//
// A small HTTP JSON API over a single persisted state blob: rooms, active
// bookings, a per-room FIFO waiting queue and an append-only booking history.

pub mod api;
pub mod config;
pub mod engine;
pub mod error;
pub mod registry;
pub mod store;
pub mod types;

// Re-export the pieces a caller needs to assemble the service.
pub use api::{router, AppContext};
pub use config::AppConfig;
pub use engine::{BookOutcome, Cancellation};
pub use error::{ApiError, StorageError};
pub use store::Store;
pub use types::{AppState, Booking, Room, WaitingEntry};
