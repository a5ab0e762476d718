// Room Registry: creation, duplicate detection, lookup, filtering, sorting.
//
// Everything here is a pure function over the rooms collection; persistence
// is the caller's concern. Lookups are linear scans, which is plenty for the
// inventory sizes this service handles.

use crate::error::ApiError;
use crate::types::Room;

/// Validated input for room creation. Field presence is checked by the HTTP
/// layer; value ranges and uniqueness are checked here.
#[derive(Debug, Clone)]
pub struct NewRoom {
    pub hostel_type: String,
    pub hostel_number: u32,
    pub seater: u32,
    pub room_number: String,
    pub price: f64,
}

pub fn find_by_id(rooms: &[Room], id: u32) -> Option<&Room> {
    rooms.iter().find(|r| r.id == id)
}

pub fn index_of(rooms: &[Room], id: u32) -> Option<usize> {
    rooms.iter().position(|r| r.id == id)
}

/// True iff a room with the same (hostelType, hostelNumber, roomNumber)
/// already exists. Price and seater play no part in identity.
pub fn is_duplicate(
    rooms: &[Room],
    hostel_type: &str,
    hostel_number: u32,
    room_number: &str,
) -> bool {
    rooms.iter().any(|r| {
        r.hostel_type == hostel_type
            && r.hostel_number == hostel_number
            && r.room_number == room_number
    })
}

/// Exact-match filter on all three criteria; no partial or fuzzy matching.
pub fn filter_by_criteria(
    rooms: &[Room],
    hostel_type: &str,
    hostel_number: u32,
    seater: u32,
) -> Vec<Room> {
    let wanted = hostel_type.trim();
    rooms
        .iter()
        .filter(|r| {
            r.hostel_type == wanted && r.hostel_number == hostel_number && r.seater == seater
        })
        .cloned()
        .collect()
}

/// Stable ascending sort by price; the input collection is left untouched.
pub fn sort_by_price_ascending(rooms: &[Room]) -> Vec<Room> {
    let mut sorted = rooms.to_vec();
    sorted.sort_by(|a, b| a.price.total_cmp(&b.price));
    sorted
}

/// Validates and appends a new room. Ids are assigned as 1 + the highest
/// existing id, so deletions never cause id reuse of the current maximum.
pub fn create(rooms: &mut Vec<Room>, fields: NewRoom) -> Result<Room, ApiError> {
    if !fields.price.is_finite() || fields.price < 0.0 {
        return Err(ApiError::Validation(
            "Price must be a non-negative number".to_string(),
        ));
    }
    if fields.seater < 1 {
        return Err(ApiError::Validation(
            "Seater must be at least 1".to_string(),
        ));
    }

    let hostel_type = fields.hostel_type.trim().to_string();
    let room_number = fields.room_number.trim().to_string();
    if is_duplicate(rooms, &hostel_type, fields.hostel_number, &room_number) {
        return Err(ApiError::Conflict(
            "A room with the same hostelType, hostelNumber, and roomNumber already exists"
                .to_string(),
        ));
    }

    let max_id = rooms.iter().map(|r| r.id).max().unwrap_or(0);
    let room = Room {
        id: max_id + 1,
        hostel_type,
        hostel_number: fields.hostel_number,
        seater: fields.seater,
        room_number,
        price: fields.price,
        is_available: true,
    };
    rooms.push(room.clone());
    Ok(room)
}
