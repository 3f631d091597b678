//! Circle shape.

use super::{ShapeAttributes, ShapeId, ShapeKind, ShapePatch, ShapeStyle, ShapeTrait};
use crate::node::Attributes;
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// A circle anchored at its center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Circle {
    pub(crate) id: ShapeId,
    /// Center point.
    pub center: Point,
    /// Radius.
    pub radius: f64,
    /// Path length hint. Cosmetic only.
    #[serde(default)]
    pub path_length: Option<f64>,
    /// Style properties.
    pub style: ShapeStyle,
}

impl Circle {
    /// Create a new circle.
    pub fn new(id: impl Into<ShapeId>, center: Point, radius: f64) -> Self {
        Self {
            id: id.into(),
            center,
            radius,
            path_length: None,
            style: ShapeStyle::default(),
        }
    }

    pub(crate) fn from_attributes(attrs: &ShapeAttributes) -> Self {
        Self {
            id: attrs.id.clone(),
            center: Point::new(attrs.cx, attrs.cy),
            radius: attrs.r,
            path_length: attrs.path_length,
            style: attrs.style.clone(),
        }
    }
}

impl ShapeTrait for Circle {
    fn id(&self) -> &str {
        &self.id
    }

    fn kind(&self) -> ShapeKind {
        ShapeKind::Circle
    }

    fn anchor(&self) -> Point {
        self.center
    }

    fn set_anchor(&mut self, anchor: Point) {
        self.center = anchor;
    }

    fn anchor_attributes(&self) -> Attributes {
        Attributes::new()
            .with("cx", self.center.x)
            .with("cy", self.center.y)
    }

    fn geometry_attributes(&self) -> Attributes {
        let attrs = self.anchor_attributes().with("r", self.radius);
        match self.path_length {
            Some(length) => attrs.with("pathLength", length),
            None => attrs,
        }
    }

    fn apply_geometry(&mut self, patch: &ShapePatch, writes: &mut Attributes) {
        if let Some(cx) = patch.cx {
            self.center.x = cx;
            writes.insert("cx", cx);
        }
        if let Some(cy) = patch.cy {
            self.center.y = cy;
            writes.insert("cy", cy);
        }
        if let Some(r) = patch.r {
            self.radius = r;
            writes.insert("r", r);
        }
        if let Some(length) = patch.path_length {
            self.path_length = Some(length);
            writes.insert("pathLength", length);
        }
        if patch.x.is_some() || patch.y.is_some() || patch.width.is_some() || patch.height.is_some() {
            log::debug!("Ignoring rectangle geometry in patch for circle {}", self.id);
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
    fn test_circle_creation() {
        let circle = Circle::new("c", Point::new(50.0, 50.0), 30.0);
        assert!((circle.center.x - 50.0).abs() < f64::EPSILON);
        assert!((circle.radius - 30.0).abs() < f64::EPSILON);
        assert!(circle.path_length.is_none());
    }

    #[test]
    fn test_anchor_is_center() {
        let mut circle = Circle::new("c", Point::new(50.0, 50.0), 30.0);
        circle.set_anchor(Point::new(130.0, 80.0));
        let attrs = circle.anchor_attributes();
        assert_eq!(attrs.get("cx"), Some("130"));
        assert_eq!(attrs.get("cy"), Some("80"));
        assert!((circle.radius - 30.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_path_length_only_written_when_set() {
        let mut circle = Circle::new("c", Point::ZERO, 10.0);
        assert_eq!(circle.geometry_attributes().get("pathLength"), None);

        circle.path_length = Some(4.0);
        assert_eq!(circle.geometry_attributes().get("pathLength"), Some("4"));
    }
}
