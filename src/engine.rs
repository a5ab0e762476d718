// Booking Engine: the room state machine.
//
// A room goes Available -> Booked on a successful booking and back to
// Available on cancellation, unless a queued entrant exists for it, in which
// case it flips straight back to Booked under the new occupant. All
// transitions here mutate an in-memory AppState only; the HTTP layer persists
// the whole state once per operation.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

use crate::error::ApiError;
use crate::registry;
use crate::types::{AppState, Booking, Room, WaitingEntry};

/// Outcome of a booking attempt against an existing room.
#[derive(Debug, Clone, PartialEq)]
pub enum BookOutcome {
    /// The room was available and is now booked.
    Booked(Booking),
    /// The room was taken; the caller was queued at this 1-based position
    /// among the waiters for that room.
    Queued { position: usize },
}

/// Result of a cancellation: the removed booking, plus the replacement
/// booking if a queued entrant was promoted into the freed room.
#[derive(Debug, Clone, PartialEq)]
pub struct Cancellation {
    pub cancelled: Booking,
    pub assigned: Option<Booking>,
}

static LAST_BOOKING_ID: AtomicI64 = AtomicI64::new(0);

/// Time-derived unique booking id: milliseconds since the epoch times 1000,
/// bumped past the previously issued id when several bookings land within the
/// same millisecond. Strictly increasing for the lifetime of the process and
/// far below the 2^53 safe-integer ceiling of JSON consumers.
fn generate_booking_id() -> i64 {
    let candidate = Utc::now().timestamp_millis() * 1000;
    let mut prev = LAST_BOOKING_ID.load(Ordering::Relaxed);
    loop {
        let next = candidate.max(prev + 1);
        let exchanged =
            LAST_BOOKING_ID.compare_exchange_weak(prev, next, Ordering::Relaxed, Ordering::Relaxed);
        match exchanged {
            Ok(_) => return next,
            Err(actual) => prev = actual,
        }
    }
}

fn new_booking(room: &Room, user_name: &str) -> Booking {
    Booking {
        booking_id: generate_booking_id(),
        room_id: room.id,
        room_number: room.room_number.clone(),
        hostel_type: room.hostel_type.clone(),
        hostel_number: room.hostel_number,
        price: room.price,
        user_name: user_name.to_string(),
        booked_at: Utc::now(),
    }
}

fn normalize_user_name(user_name: &str) -> &str {
    let trimmed = user_name.trim();
    if trimmed.is_empty() {
        "Guest"
    } else {
        trimmed
    }
}

/// Books the room if it is free, otherwise queues the caller for it.
pub fn book(state: &mut AppState, room_id: u32, user_name: &str) -> Result<BookOutcome, ApiError> {
    let idx = registry::index_of(&state.rooms, room_id)
        .ok_or_else(|| ApiError::NotFound("Room not found".to_string()))?;
    let name = normalize_user_name(user_name);

    if state.rooms[idx].is_available {
        state.rooms[idx].is_available = false;
        let booking = new_booking(&state.rooms[idx], name);
        state.bookings.push(booking.clone());
        state.booking_history.push(booking.clone());
        tracing::info!(room_id, booking_id = booking.booking_id, user = name, "room booked");
        return Ok(BookOutcome::Booked(booking));
    }

    state.waiting_queue.push(WaitingEntry {
        room_id,
        user_name: name.to_string(),
        requested_at: Utc::now(),
    });
    let position = state
        .waiting_queue
        .iter()
        .filter(|e| e.room_id == room_id)
        .count();
    tracing::info!(room_id, user = name, position, "room taken, caller queued");
    Ok(BookOutcome::Queued { position })
}

/// Cancels an active booking by id, frees its room and promotes the earliest
/// queued waiter for that room, if any.
pub fn cancel(state: &mut AppState, booking_id: i64) -> Result<Cancellation, ApiError> {
    let idx = state
        .bookings
        .iter()
        .position(|b| b.booking_id == booking_id)
        .ok_or_else(|| ApiError::NotFound("Booking not found".to_string()))?;
    let cancelled = state.bookings.remove(idx);

    let mut assigned = None;
    if let Some(room_idx) = registry::index_of(&state.rooms, cancelled.room_id) {
        state.rooms[room_idx].is_available = true;

        // FIFO promotion: first queue entry for this specific room wins.
        if let Some(queue_idx) = state
            .waiting_queue
            .iter()
            .position(|e| e.room_id == cancelled.room_id)
        {
            let next = state.waiting_queue.remove(queue_idx);
            state.rooms[room_idx].is_available = false;
            let booking = new_booking(&state.rooms[room_idx], &next.user_name);
            state.bookings.push(booking.clone());
            state.booking_history.push(booking.clone());
            tracing::info!(
                room_id = cancelled.room_id,
                booking_id = booking.booking_id,
                user = %next.user_name,
                "queued entrant promoted into freed room"
            );
            assigned = Some(booking);
        }
    }

    tracing::info!(booking_id, room_id = cancelled.room_id, "booking cancelled");
    Ok(Cancellation { cancelled, assigned })
}

/// Removes a room from inventory. Refused while the room is booked; any
/// waiting-queue entries for the room are purged since they can no longer be
/// fulfilled.
pub fn remove_room(state: &mut AppState, room_id: u32) -> Result<Room, ApiError> {
    let idx = registry::index_of(&state.rooms, room_id)
        .ok_or_else(|| ApiError::NotFound("Room not found".to_string()))?;
    if !state.rooms[idx].is_available {
        return Err(ApiError::Conflict(
            "Cannot delete a room that is currently booked. Cancel the booking first.".to_string(),
        ));
    }

    state.waiting_queue.retain(|e| e.room_id != room_id);
    let removed = state.rooms.remove(idx);
    tracing::info!(room_id, "room removed from inventory");
    Ok(removed)
}
