//! Rectangle shape.

use super::{ShapeAttributes, ShapeId, ShapeKind, ShapePatch, ShapeStyle, ShapeTrait};
use crate::node::Attributes;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rectangle {
    pub(crate) id: ShapeId,
    /// Top-left corner position.
    pub position: Point,
    /// Width of the rectangle.
    pub width: f64,
    /// Height of the rectangle.
    pub height: f64,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Rectangle {
    /// Create a new rectangle.
    pub fn new(id: impl Into<ShapeId>, position: Point, width: f64, height: f64) -> Self {
        Self {
            id: id.into(),
            position,
            width,
            height,
            style: ShapeStyle::default(),
        }
    }

    pub(crate) fn from_attributes(attrs: &ShapeAttributes) -> Self {
        Self {
            id: attrs.id.clone(),
            position: Point::new(attrs.x, attrs.y),
            width: attrs.width,
            height: attrs.height,
            style: attrs.style.clone(),
        }
    }
}

impl ShapeTrait for Rectangle {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Rectangle
    }

    fn anchor(&self) -> Point {
        self.position
    }

    fn set_anchor(&mut self, anchor: Point) {
        self.position = anchor;
    }

    fn anchor_attributes(&self) -> Attributes {
        Attributes::new()
            .with("x", self.position.x)
            .with("y", self.position.y)
    }

    fn geometry_attributes(&self) -> Attributes {
        self.anchor_attributes()
            .with("width", self.width)
            .with("height", self.height)
    }

    fn apply_geometry(&mut self, patch: &ShapePatch, writes: &mut Attributes) {
        if let Some(x) = patch.x {
            self.position.x = x;
            writes.insert("x", x);
        }
        if let Some(y) = patch.y {
            self.position.y = y;
            writes.insert("y", y);
        }
        if let Some(width) = patch.width {
            self.width = width;
            writes.insert("width", width);
        }
        if let Some(height) = patch.height {
            self.height = height;
            writes.insert("height", height);
        }
        if patch.cx.is_some() || patch.cy.is_some() || patch.r.is_some() || patch.path_length.is_some() {
            log::debug!("Ignoring circle geometry in patch for rectangle {}", self.id);
        }
    }

    fn style(&self) -> &ShapeStyle {
        &self.style
    }

    fn style_mut(&mut self) -> &mut ShapeStyle {
        &mut self.style
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_creation() {
        let rect = Rectangle::new("r", Point::new(10.0, 20.0), 100.0, 50.0);
        assert!((rect.position.x - 10.0).abs() < f64::EPSILON);
        assert!((rect.position.y - 20.0).abs() < f64::EPSILON);
        assert!((rect.width - 100.0).abs() < f64::EPSILON);
        assert!((rect.height - 50.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_anchor_is_top_left() {
        let mut rect = Rectangle::new("r", Point::new(10.0, 20.0), 100.0, 50.0);
        assert_eq!(rect.anchor(), Point::new(10.0, 20.0));

        rect.set_anchor(Point::new(0.0, 5.0));
        let attrs = rect.anchor_attributes();
        assert_eq!(attrs.get("x"), Some("0"));
        assert_eq!(attrs.get("y"), Some("5"));
        assert!((rect.width - 100.0).abs() < f64::EPSILON);
    }
}
