//! Shape definitions for the editor.

mod circle;
mod element;
mod presets;
mod rectangle;

pub use circle::Circle;
pub use element::ShapeElement;
pub use presets::{DROP_SIZE, PANEL_BOX_SIZE, drop_preset, panel_preset};
pub use rectangle::Rectangle;

use crate::host::{Host, HostResult, Namespace};
use crate::node::{self, Attributes};
use kurbo::Point;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Class carried by every shape node, distinguishing it from container nodes.
pub const SHAPE_CLASS: &str = "shape";

/// Attribute holding the shape kind on shape nodes and panel boxes.
pub const KIND_ATTRIBUTE: &str = "data-type";

/// Unique identifier for shapes.
pub type ShapeId = String;

/// Generate an identifier for a new shape.
pub fn new_shape_id() -> ShapeId {
    format!("shape-{}", Uuid::new_v4())
}

/// Shape errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShapeError {
    #[error("Unknown shape kind: {0:?}")]
    UnknownKind(String),
}

/// Supported shape kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    Rectangle,
    Circle,
}

impl ShapeKind {
    /// Every supported kind, in palette order.
    pub const ALL: [ShapeKind; 2] = [ShapeKind::Circle, ShapeKind::Rectangle];

    /// Canonical kind string, used for `data-type` and drag payloads.
    pub fn as_str(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
        }
    }

    /// SVG element name for this kind.
    pub fn svg_tag(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "rect",
            ShapeKind::Circle => "circle",
        }
    }
}

impl fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShapeKind {
    type Err = ShapeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "rectangle" | "rect" => Ok(ShapeKind::Rectangle),
            "circle" => Ok(ShapeKind::Circle),
            other => Err(ShapeError::UnknownKind(other.to_string())),
        }
    }
}

/// Style properties shared by all shapes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeStyle {
    /// Fill color (any SVG paint value).
    pub fill: String,
    /// Stroke color.
    pub stroke: String,
    /// Stroke width.
    pub stroke_width: f64,
}

impl Default for ShapeStyle {
    fn default() -> Self {
        Self {
            fill: "transparent".to_string(),
            stroke: "black".to_string(),
            stroke_width: 1.0,
        }
    }
}

impl ShapeStyle {
    fn attributes(&self) -> Attributes {
        Attributes::new()
            .with("fill", &self.fill)
            .with("stroke", &self.stroke)
            .with("stroke-width", self.stroke_width)
    }
}

/// Partial style update. `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StylePatch {
    pub fill: Option<String>,
    pub stroke: Option<String>,
    pub stroke_width: Option<f64>,
}

impl StylePatch {
    /// Patch that only changes the fill.
    pub fn fill(fill: impl Into<String>) -> Self {
        Self {
            fill: Some(fill.into()),
            ..Self::default()
        }
    }

    fn apply(&self, style: &mut ShapeStyle, writes: &mut Attributes) {
        if let Some(fill) = &self.fill {
            style.fill = fill.clone();
            writes.insert("fill", fill);
        }
        if let Some(stroke) = &self.stroke {
            style.stroke = stroke.clone();
            writes.insert("stroke", stroke);
        }
        if let Some(width) = self.stroke_width {
            style.stroke_width = width;
            writes.insert("stroke-width", width);
        }
    }
}

/// Loose attribute bag a shape is built from.
///
/// Holds the fields of every kind; each kind reads only its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapeAttributes {
    pub id: ShapeId,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub cx: f64,
    pub cy: f64,
    pub r: f64,
    pub path_length: Option<f64>,
    #[serde(flatten)]
    pub style: ShapeStyle,
}

impl Default for ShapeAttributes {
    fn default() -> Self {
        Self {
            id: new_shape_id(),
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            cx: 0.0,
            cy: 0.0,
            r: 0.0,
            path_length: None,
            style: ShapeStyle::default(),
        }
    }
}

/// Partial shape update.
///
/// Geometry fields that do not belong to the shape's kind are ignored. `css`
/// holds inline style properties, applied one at a time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShapePatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub cx: Option<f64>,
    pub cy: Option<f64>,
    pub r: Option<f64>,
    pub path_length: Option<f64>,
    pub style: StylePatch,
    pub css: BTreeMap<String, String>,
}

impl ShapePatch {
    /// Patch that only touches style.
    pub fn style(style: StylePatch) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }
}

/// Common trait for all shapes.
pub trait ShapeTrait {
    /// Get the unique identifier.
    fn id(&self) -> &str;

    /// Get the kind.
    fn kind(&self) -> ShapeKind;

    /// Point used for move math (top-left or center, depending on kind).
    fn anchor(&self) -> Point;

    /// Move the anchor, keeping size.
    fn set_anchor(&mut self, anchor: Point);

    /// Attribute writes that place the node at the current anchor.
    fn anchor_attributes(&self) -> Attributes;

    /// Kind-specific geometry attributes.
    fn geometry_attributes(&self) -> Attributes;

    /// Apply the kind-appropriate geometry fields of a patch, recording the
    /// resulting attribute writes.
    fn apply_geometry(&mut self, patch: &ShapePatch, writes: &mut Attributes);

    /// Get the style.
    fn style(&self) -> &ShapeStyle;

    /// Get mutable style.
    fn style_mut(&mut self) -> &mut ShapeStyle;
}

/// Enum wrapper for all shape types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shape {
    Rectangle(Rectangle),
    Circle(Circle),
}

/// Build a shape from a kind string, or `None` if the kind is not supported.
pub fn create_shape(kind: &str, attrs: &ShapeAttributes) -> Option<Shape> {
    match kind.parse::<ShapeKind>() {
        Ok(kind) => Some(Shape::from_attributes(kind, attrs)),
        Err(err) => {
            log::debug!("create_shape: {}", err);
            None
        }
    }
}

impl Shape {
    /// Build a shape of a known kind.
    pub fn from_attributes(kind: ShapeKind, attrs: &ShapeAttributes) -> Self {
        match kind {
            ShapeKind::Rectangle => Shape::Rectangle(Rectangle::from_attributes(attrs)),
            ShapeKind::Circle => Shape::Circle(Circle::from_attributes(attrs)),
        }
    }

    fn as_trait(&self) -> &dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Circle(s) => s,
        }
    }

    fn as_trait_mut(&mut self) -> &mut dyn ShapeTrait {
        match self {
            Shape::Rectangle(s) => s,
            Shape::Circle(s) => s,
        }
    }

    pub fn id(&self) -> &str {
        self.as_trait().id()
    }

    pub fn kind(&self) -> ShapeKind {
        self.as_trait().kind()
    }

    pub fn anchor(&self) -> Point {
        self.as_trait().anchor()
    }

    pub fn set_anchor(&mut self, anchor: Point) {
        self.as_trait_mut().set_anchor(anchor);
    }

    pub fn anchor_attributes(&self) -> Attributes {
        self.as_trait().anchor_attributes()
    }

    pub fn style(&self) -> &ShapeStyle {
        self.as_trait().style()
    }

    pub fn style_mut(&mut self) -> &mut ShapeStyle {
        self.as_trait_mut().style_mut()
    }

    /// Full attribute set of the node this shape renders to.
    pub fn node_attributes(&self) -> Attributes {
        let mut attrs = Attributes::new()
            .with("id", self.id())
            .with("class", SHAPE_CLASS);
        for (name, value) in self.as_trait().geometry_attributes().iter() {
            attrs.insert(name, value);
        }
        for (name, value) in self.style().attributes().iter() {
            attrs.insert(name, value);
        }
        attrs.insert(KIND_ATTRIBUTE, self.kind());
        attrs
    }

    /// Build a node from the current attributes.
    pub fn create<H: Host>(&self, host: &mut H) -> HostResult<H::Node> {
        node::create_element(
            host,
            Namespace::Svg,
            self.kind().svg_tag(),
            &self.node_attributes(),
        )
    }

    /// Apply a patch to the model and return the attribute writes it implies.
    pub fn apply_patch(&mut self, patch: &ShapePatch) -> Attributes {
        let mut writes = Attributes::new();
        self.as_trait_mut().apply_geometry(patch, &mut writes);
        patch.style.apply(self.style_mut(), &mut writes);
        for (property, value) in &patch.css {
            writes.insert_style(property, value);
        }
        writes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::MemoryHost;

    fn attrs() -> ShapeAttributes {
        ShapeAttributes {
            id: "s1".to_string(),
            x: 10.0,
            y: 20.0,
            width: 30.0,
            height: 40.0,
            cx: 5.0,
            cy: 6.0,
            r: 7.0,
            path_length: None,
            style: ShapeStyle {
                fill: "blue".to_string(),
                stroke: "black".to_string(),
                stroke_width: 2.0,
            },
        }
    }

    #[test]
    fn test_kind_parse() {
        assert_eq!("rectangle".parse::<ShapeKind>(), Ok(ShapeKind::Rectangle));
        assert_eq!("rect".parse::<ShapeKind>(), Ok(ShapeKind::Rectangle));
        assert_eq!(" circle ".parse::<ShapeKind>(), Ok(ShapeKind::Circle));
        assert_eq!(
            "triangle".parse::<ShapeKind>(),
            Err(ShapeError::UnknownKind("triangle".to_string()))
        );
        assert!("".parse::<ShapeKind>().is_err());
    }

    #[test]
    fn test_create_shape_unknown_kind() {
        assert!(create_shape("triangle", &attrs()).is_none());
        assert!(create_shape("Circle", &attrs()).is_none());
    }

    #[test]
    fn test_rectangle_node_carries_attributes() {
        let mut host = MemoryHost::new();
        let shape = create_shape("rectangle", &attrs()).unwrap();
        let node = shape.create(&mut host).unwrap();

        assert_eq!(host.tag(node), Some("rect"));
        assert_eq!(host.attribute(node, "id"), Some("s1"));
        assert!(host.has_class(node, SHAPE_CLASS));
        assert_eq!(host.attribute(node, KIND_ATTRIBUTE), Some("rectangle"));
        assert_eq!(host.attribute_f64(node, "x"), Some(10.0));
        assert_eq!(host.attribute_f64(node, "y"), Some(20.0));
        assert_eq!(host.attribute_f64(node, "width"), Some(30.0));
        assert_eq!(host.attribute_f64(node, "height"), Some(40.0));
        assert_eq!(host.attribute(node, "fill"), Some("blue"));
        assert_eq!(host.attribute(node, "stroke"), Some("black"));
        assert_eq!(host.attribute_f64(node, "stroke-width"), Some(2.0));
        assert_eq!(host.attribute(node, "cx"), None);
        assert_eq!(host.attribute(node, "r"), None);
    }

    #[test]
    fn test_circle_node_carries_attributes() {
        let mut host = MemoryHost::new();
        let shape = create_shape("circle", &attrs()).unwrap();
        let node = shape.create(&mut host).unwrap();

        assert_eq!(host.tag(node), Some("circle"));
        assert_eq!(host.attribute(node, KIND_ATTRIBUTE), Some("circle"));
        assert_eq!(host.attribute_f64(node, "cx"), Some(5.0));
        assert_eq!(host.attribute_f64(node, "cy"), Some(6.0));
        assert_eq!(host.attribute_f64(node, "r"), Some(7.0));
        assert_eq!(host.attribute(node, "width"), None);
        assert_eq!(host.attribute(node, "x"), None);
        assert_eq!(host.attribute(node, "pathLength"), None);
    }

    #[test]
    fn test_create_is_pure() {
        let mut host = MemoryHost::new();
        let shape = create_shape("circle", &attrs()).unwrap();
        let a = shape.create(&mut host).unwrap();
        let b = shape.create(&mut host).unwrap();
        assert_ne!(a, b);
        assert_eq!(host.to_markup(a), host.to_markup(b));
    }

    #[test]
    fn test_patch_ignores_foreign_geometry() {
        let mut shape = create_shape("rectangle", &attrs()).unwrap();
        let patch = ShapePatch {
            x: Some(1.0),
            r: Some(99.0),
            ..ShapePatch::default()
        };
        let writes = shape.apply_patch(&patch);
        assert_eq!(writes.get("x"), Some("1"));
        assert_eq!(writes.get("r"), None);
        assert!((shape.anchor().x - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_style_patch_from_json() {
        let patch: ShapePatch = serde_json::from_str(r#"{"style": {"fill": "green"}}"#).unwrap();
        assert_eq!(patch, ShapePatch::style(StylePatch::fill("green")));
    }
}
