//! Screen ↔ local coordinate conversion for the drawing surface.

use kurbo::{Affine, Point};

/// Determinants below this are treated as non-invertible.
const SINGULAR_EPSILON: f64 = 1e-12;

/// Snapshot of a surface's local-to-screen transform.
///
/// Read fresh from the host for every event; scrolling or resizing can change
/// it between two events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenTransform {
    affine: Affine,
}

impl ScreenTransform {
    /// Wrap a local-to-screen affine.
    pub fn new(affine: Affine) -> Self {
        Self { affine }
    }

    /// Local-to-screen affine.
    pub fn affine(&self) -> Affine {
        self.affine
    }

    /// Check whether the transform can be inverted.
    pub fn is_invertible(&self) -> bool {
        let det = self.affine.determinant();
        det.is_finite() && det.abs() > SINGULAR_EPSILON
    }

    /// Convert a screen point to local coordinates.
    ///
    /// Returns `None` if the transform is not invertible.
    pub fn screen_to_local(&self, screen: Point) -> Option<Point> {
        if !self.is_invertible() {
            return None;
        }
        Some(self.affine.inverse() * screen)
    }
}
