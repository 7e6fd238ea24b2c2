//! Room label placement
//!
//! Labels are recomputed from room metadata whenever a scene is built;
//! placement is pure arithmetic on the room's own fields and never touches
//! mesh topology. The frontend projects the anchor through the camera and
//! paints the panel in screen space, which makes every label camera-facing
//! and immune to depth occlusion.

use glam::Vec3;

use spaceview_core::Room;

use crate::constants::label as constants;

/// A billboard label synthesized for one room.
#[derive(Debug, Clone, PartialEq)]
pub struct RoomLabel {
    /// World anchor point the billboard is centered on.
    pub anchor: Vec3,
    /// Backing panel width in world units.
    pub panel_width: f32,
    /// Backing panel height in world units.
    pub panel_height: f32,
    /// Text lines, room name first.
    pub lines: Vec<String>,
}

impl RoomLabel {
    /// Build the label for a room.
    ///
    /// The anchor floats over the footprint center, 20% of the room height
    /// above its top surface. Panel size follows the smaller footprint
    /// dimension so small rooms get small labels; the panel grows taller
    /// when load lines are shown. Rooms without load figures render a
    /// name-only label even when the overlay is enabled.
    pub fn for_room(room: &Room, show_loads: bool) -> Self {
        let anchor = Vec3::new(
            room.x + room.width * 0.5,
            room.y + room.depth * 0.5,
            room.z + room.height * (1.0 + constants::RAISE_FACTOR),
        );

        let mut lines = vec![room.name.clone()];
        if show_loads {
            if let Some(cooling) = room.cooling_load {
                lines.push(format!("Cooling {}", format_kilowatts(cooling)));
            }
            if let Some(heating) = room.heating_load {
                lines.push(format!("Heating {}", format_kilowatts(heating)));
            }
        }

        let panel_width = room.width.min(room.depth) * constants::WIDTH_FACTOR;
        let aspect = if lines.len() > 1 {
            constants::LOADS_ASPECT
        } else {
            constants::NAME_ASPECT
        };

        Self {
            anchor,
            panel_width,
            panel_height: panel_width * aspect,
            lines,
        }
    }
}

/// Build labels for every room.
pub fn build_labels(rooms: &[Room], show_loads: bool) -> Vec<RoomLabel> {
    rooms
        .iter()
        .map(|room| RoomLabel::for_room(room, show_loads))
        .collect()
}

/// Convert a load in watts to a kilowatt string with one decimal place.
fn format_kilowatts(watts: f32) -> String {
    format!("{:.1} kW", watts / 1000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn office(cooling: Option<f32>, heating: Option<f32>) -> Room {
        Room {
            id: "r1".into(),
            name: "Office".into(),
            x: 0.0,
            y: 0.0,
            z: 0.0,
            width: 4.0,
            depth: 4.0,
            height: 3.0,
            cooling_load: cooling,
            heating_load: heating,
        }
    }

    #[test]
    fn test_label_floats_over_footprint_center() {
        let label = RoomLabel::for_room(&office(None, None), false);
        assert_eq!(label.anchor.x, 2.0);
        assert_eq!(label.anchor.y, 2.0);
        assert!((label.anchor.z - 3.6).abs() < 1e-6);
        assert_eq!(label.lines, vec!["Office".to_string()]);
    }

    #[test]
    fn test_label_with_loads_renders_three_lines() {
        let label = RoomLabel::for_room(&office(Some(12000.0), Some(8500.0)), true);
        assert_eq!(label.lines.len(), 3);
        assert_eq!(label.lines[0], "Office");
        assert_eq!(label.lines[1], "Cooling 12.0 kW");
        assert_eq!(label.lines[2], "Heating 8.5 kW");
    }

    #[test]
    fn test_overlay_without_figures_stays_name_only() {
        let label = RoomLabel::for_room(&office(None, None), true);
        assert_eq!(label.lines, vec!["Office".to_string()]);
        // Name-only labels keep the flatter panel.
        assert!(label.panel_height < label.panel_width * 0.5);
    }

    #[test]
    fn test_partial_figures_produce_no_blank_lines() {
        let label = RoomLabel::for_room(&office(Some(6050.0), None), true);
        assert_eq!(label.lines.len(), 2);
        assert_eq!(label.lines[1], "Cooling 6.1 kW");
    }

    #[test]
    fn test_overlay_disabled_hides_figures() {
        let label = RoomLabel::for_room(&office(Some(12000.0), Some(8500.0)), false);
        assert_eq!(label.lines, vec!["Office".to_string()]);
    }

    #[test]
    fn test_panel_scales_with_smaller_footprint_side() {
        let mut narrow = office(None, None);
        narrow.depth = 1.0;
        let small = RoomLabel::for_room(&narrow, false);
        let large = RoomLabel::for_room(&office(None, None), false);
        assert!(small.panel_width < large.panel_width);
        assert!((small.panel_width - 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_loads_panel_is_taller() {
        let name_only = RoomLabel::for_room(&office(None, None), false);
        let with_loads = RoomLabel::for_room(&office(Some(1000.0), Some(1000.0)), true);
        assert_eq!(name_only.panel_width, with_loads.panel_width);
        assert!(with_loads.panel_height > name_only.panel_height);
    }

    #[test]
    fn test_build_labels_covers_every_room() {
        let rooms = vec![office(None, None), office(Some(2000.0), None)];
        let labels = build_labels(&rooms, true);
        assert_eq!(labels.len(), 2);
        assert_eq!(labels[1].lines.len(), 2);
    }
}
