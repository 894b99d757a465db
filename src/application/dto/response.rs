//! Response DTOs
//!
//! Data structures for JSON API response bodies.

use serde::Serialize;

use crate::domain::Room;

/// Room as serialized by the read-only API: the row's own fields plus
/// the related identifiers.
#[derive(Debug, Serialize)]
pub struct RoomResponse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub host_id: Option<i64>,
    pub topic_id: Option<i64>,
    pub updated: String,
    pub created: String,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id,
            name: room.name,
            description: room.description,
            host_id: room.host_id,
            topic_id: room.topic_id,
            updated: room.updated_at.to_rfc3339(),
            created: room.created_at.to_rfc3339(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_room_response_projection() {
        let now = Utc::now();
        let room = Room {
            id: 9,
            host_id: Some(1),
            topic_id: None,
            name: "Django Basics".into(),
            description: Some("intro".into()),
            updated_at: now,
            created_at: now,
        };

        let response = RoomResponse::from(room);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["id"], 9);
        assert_eq!(json["name"], "Django Basics");
        assert_eq!(json["host_id"], 1);
        assert_eq!(json["topic_id"], serde_json::Value::Null);
        assert_eq!(json["created"], now.to_rfc3339());
    }
}
