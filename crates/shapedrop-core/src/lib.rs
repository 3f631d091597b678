//! ShapeDrop Core Library
//!
//! Platform-agnostic shape model, palette and pointer interaction state
//! machine for the ShapeDrop editor. Everything platform-specific sits behind
//! the [`Host`] trait.

pub mod canvas;
pub mod config;
pub mod host;
pub mod input;
pub mod node;
pub mod panel;
pub mod shapes;
pub mod transform;

pub use canvas::{Canvas, CanvasError, CanvasResult, InteractionState, MoveSession};
pub use config::{CanvasConfig, ConfigError};
pub use host::{Host, HostError, HostResult, ListenerSet, MemoryHost, Namespace, SVG_NS};
pub use input::{CanvasEvent, DragPayload, EventResponse, Tracking, DRAG_PAYLOAD_MIME};
pub use node::Attributes;
pub use panel::{PanelEntry, ShapesPanel};
pub use shapes::{Shape, ShapeElement, ShapeError, ShapeId, ShapeKind, ShapePatch, ShapeStyle, StylePatch};
pub use transform::ScreenTransform;
