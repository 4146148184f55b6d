//! Room-count lists are persisted as JSON array text (`"[2,3]"`).

/// Encode a room list for storage. `None` stays `None`.
pub fn encode_rooms(rooms: Option<&[i32]>) -> Option<String> {
    rooms.map(|r| serde_json::to_string(r).unwrap_or_else(|_| "[]".to_string()))
}

/// Decode stored room text. Empty or unparsable text reads as no room filter.
pub fn decode_rooms(raw: Option<&str>) -> Option<Vec<i32>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }

    match serde_json::from_str::<Vec<i32>>(raw) {
        Ok(rooms) => Some(rooms),
        Err(e) => {
            tracing::warn!("Ignoring unreadable room list {:?}: {}", raw, e);
            None
        }
    }
}
