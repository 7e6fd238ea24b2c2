//! Room metadata supplied alongside the mesh.

use serde::{Deserialize, Serialize};

/// One extracted space in the building.
///
/// The anchor position is the room's minimum corner; `width`/`depth` span
/// the horizontal footprint and `height` extends upward (+Z). Load figures
/// are in watts and may be absent until the calculation service has run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    pub id: String,
    pub name: String,
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub width: f32,
    pub depth: f32,
    pub height: f32,
    #[serde(default)]
    pub cooling_load: Option<f32>,
    #[serde(default)]
    pub heating_load: Option<f32>,
}

/// Per-room load figures from the calculation service, matched into the
/// room list by id or display name.
#[derive(Debug, Clone, Deserialize)]
pub struct LoadFigures {
    /// Room id or display name.
    pub room: String,
    #[serde(default)]
    pub cooling_load: Option<f32>,
    #[serde(default)]
    pub heating_load: Option<f32>,
}

/// Room-list errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum RoomError {
    #[error("Parse error: {0}")]
    Parse(String),
}

/// Parse a JSON room list.
pub fn parse_rooms(json: &str) -> Result<Vec<Room>, RoomError> {
    serde_json::from_str(json).map_err(|e| RoomError::Parse(e.to_string()))
}

/// Parse a JSON list of calculated load figures.
pub fn parse_load_figures(json: &str) -> Result<Vec<LoadFigures>, RoomError> {
    serde_json::from_str(json).map_err(|e| RoomError::Parse(e.to_string()))
}

/// Merge calculated load figures into the room list.
///
/// Figures are matched by room id first, then by display name. Figures for
/// unknown rooms are skipped; absent fields leave the room untouched.
pub fn merge_loads(rooms: &mut [Room], figures: &[LoadFigures]) {
    for figure in figures {
        let Some(room) = rooms
            .iter_mut()
            .find(|r| r.id == figure.room || r.name == figure.room)
        else {
            continue;
        };

        if figure.cooling_load.is_some() {
            room.cooling_load = figure.cooling_load;
        }
        if figure.heating_load.is_some() {
            room.heating_load = figure.heating_load;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn office() -> Room {
        Room {
            id: "r1".into(),
            name: "Office".into(),
            x: 0.0,
            y: 0.0,
            z: 0.0,
            width: 4.0,
            depth: 4.0,
            height: 3.0,
            cooling_load: None,
            heating_load: None,
        }
    }

    #[test]
    fn test_parse_rooms_with_optional_loads() {
        let json = r#"[
            {"id": "r1", "name": "Office", "x": 0, "y": 0, "z": 0,
             "width": 4, "depth": 4, "height": 3},
            {"id": "r2", "name": "Lobby", "x": 4, "y": 0, "z": 0,
             "width": 6, "depth": 8, "height": 3,
             "cooling_load": 12000, "heating_load": 8500}
        ]"#;
        let rooms = parse_rooms(json).unwrap();
        assert_eq!(rooms.len(), 2);
        assert!(rooms[0].cooling_load.is_none());
        assert_eq!(rooms[1].cooling_load, Some(12000.0));
        assert_eq!(rooms[1].heating_load, Some(8500.0));
    }

    #[test]
    fn test_parse_rooms_rejects_garbage() {
        assert!(parse_rooms("not json").is_err());
    }

    #[test]
    fn test_merge_loads_by_id_and_name() {
        let mut rooms = vec![office()];
        let figures = vec![
            LoadFigures {
                room: "r1".into(),
                cooling_load: Some(9000.0),
                heating_load: None,
            },
            LoadFigures {
                room: "Office".into(),
                cooling_load: None,
                heating_load: Some(4000.0),
            },
            LoadFigures {
                room: "missing".into(),
                cooling_load: Some(1.0),
                heating_load: Some(1.0),
            },
        ];

        merge_loads(&mut rooms, &figures);
        assert_eq!(rooms[0].cooling_load, Some(9000.0));
        assert_eq!(rooms[0].heating_load, Some(4000.0));
    }
}
