//! Pointer and drag events fed to the canvas state machine.

use crate::shapes::{ShapeError, ShapeId, ShapeKind};
use kurbo::Point;
use serde::{Deserialize, Serialize};

/// MIME type of the drag payload carrying a shape kind.
pub const DRAG_PAYLOAD_MIME: &str = "text/plain";

/// Data carried from a panel entry to the canvas during a drag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragPayload {
    /// MIME type the data is stored under.
    pub mime: String,
    /// Shape kind string.
    pub data: String,
}

impl DragPayload {
    /// Payload for a shape kind.
    pub fn for_kind(kind: ShapeKind) -> Self {
        Self {
            mime: DRAG_PAYLOAD_MIME.to_string(),
            data: kind.as_str().to_string(),
        }
    }

    /// Parse the carried kind.
    pub fn kind(&self) -> Result<ShapeKind, ShapeError> {
        self.data.parse()
    }
}

/// Events delivered by the host, positions in screen coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent<N> {
    /// A drag entered the surface.
    DragEnter { position: Point },
    /// A drag moved over the surface.
    DragOver { position: Point },
    /// A drag left a node of the surface. `related` is the node the pointer
    /// entered; leaves into the surface's own subtree are ignored.
    DragLeave { related: Option<N> },
    /// A drag was released over the surface. `position` is `None` when the
    /// host could not report one; the last drag-over position is used instead.
    Drop {
        position: Option<Point>,
        payload: Option<String>,
    },
    /// Pointer pressed on the surface; `target` is the node under the pointer.
    PointerDown { position: Point, target: Option<N> },
    /// Pointer moved (document-wide while a move session is tracked).
    PointerMove { position: Point },
    /// Pointer released anywhere in the document.
    PointerUp { position: Point },
}

/// Document-level tracking request emitted with an event response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tracking {
    /// Start listening for move/up on the whole document.
    Begin,
    /// Stop listening for move/up on the whole document.
    End,
}

/// What the host should do after the canvas handled an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventResponse {
    /// Suppress the platform default (drag rejection, native node drag).
    pub prevent_default: bool,
    /// Change in document-level tracking.
    pub tracking: Option<Tracking>,
    /// Shape created by this event, if any.
    pub created: Option<ShapeId>,
}

impl EventResponse {
    /// Response that only suppresses the default behavior.
    pub fn prevent_default() -> Self {
        Self {
            prevent_default: true,
            ..Self::default()
        }
    }

    /// Response that changes document tracking.
    pub fn tracking(tracking: Tracking, prevent_default: bool) -> Self {
        Self {
            prevent_default,
            tracking: Some(tracking),
            created: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_for_kind() {
        let payload = DragPayload::for_kind(ShapeKind::Circle);
        assert_eq!(payload.mime, "text/plain");
        assert_eq!(payload.data, "circle");
        assert_eq!(payload.kind(), Ok(ShapeKind::Circle));
    }

    #[test]
    fn test_payload_unknown_kind() {
        let payload = DragPayload {
            mime: DRAG_PAYLOAD_MIME.to_string(),
            data: "triangle".to_string(),
        };
        assert!(payload.kind().is_err());
    }
}
