//! Default attribute presets for panel previews and dropped shapes.

use super::{ShapeAttributes, ShapeKind, ShapeStyle, new_shape_id};
use kurbo::Point;

/// Side of the square footprint a dropped shape occupies.
pub const DROP_SIZE: f64 = 100.0;

/// Side of the fixed preview box in the panel.
pub const PANEL_BOX_SIZE: f64 = 100.0;

/// Preset used for a kind's preview in the shapes panel.
pub fn panel_preset(kind: ShapeKind) -> ShapeAttributes {
    let half = PANEL_BOX_SIZE / 2.0;
    match kind {
        ShapeKind::Rectangle => ShapeAttributes {
            id: "rectangle-panel".to_string(),
            width: PANEL_BOX_SIZE,
            height: PANEL_BOX_SIZE,
            style: ShapeStyle {
                fill: "blue".to_string(),
                stroke: "black".to_string(),
                stroke_width: 2.0,
            },
            ..ShapeAttributes::default()
        },
        ShapeKind::Circle => ShapeAttributes {
            id: "circle-panel".to_string(),
            width: PANEL_BOX_SIZE,
            height: PANEL_BOX_SIZE,
            cx: half,
            cy: half,
            r: half,
            style: ShapeStyle {
                fill: "red".to_string(),
                stroke: "black".to_string(),
                stroke_width: 2.0,
            },
            ..ShapeAttributes::default()
        },
    }
}

/// Preset for a shape dropped on the canvas, centered on `center`.
///
/// Carries both rectangle and circle geometry so the kind can be decided
/// from the payload afterwards.
pub fn drop_preset(center: Point) -> ShapeAttributes {
    let half = DROP_SIZE / 2.0;
    ShapeAttributes {
        id: new_shape_id(),
        x: center.x - half,
        y: center.y - half,
        width: DROP_SIZE,
        height: DROP_SIZE,
        cx: center.x,
        cy: center.y,
        r: half,
        path_length: None,
        style: ShapeStyle::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_preset_centers_footprint() {
        let attrs = drop_preset(Point::new(130.0, 80.0));
        assert!((attrs.x - 80.0).abs() < f64::EPSILON);
        assert!((attrs.y - 30.0).abs() < f64::EPSILON);
        assert!((attrs.cx - 130.0).abs() < f64::EPSILON);
        assert!((attrs.cy - 80.0).abs() < f64::EPSILON);
        assert!((attrs.r - 50.0).abs() < f64::EPSILON);
        assert_eq!(attrs.style.fill, "transparent");
        assert!(attrs.id.starts_with("shape-"));
    }

    #[test]
    fn test_drop_ids_are_unique() {
        let a = drop_preset(Point::ZERO);
        let b = drop_preset(Point::ZERO);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_panel_presets() {
        let rect = panel_preset(ShapeKind::Rectangle);
        assert_eq!(rect.id, "rectangle-panel");
        assert_eq!(rect.style.fill, "blue");

        let circle = panel_preset(ShapeKind::Circle);
        assert_eq!(circle.id, "circle-panel");
        assert_eq!(circle.style.fill, "red");
        assert!((circle.r - 50.0).abs() < f64::EPSILON);
    }
}
