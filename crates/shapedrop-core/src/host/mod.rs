//! Host capability abstraction.
//!
//! The core never talks to a concrete rendering API. Node creation, attribute
//! writes, listener binding and the screen transform of a node all go through
//! the [`Host`] trait, which the embedding platform implements (the browser DOM
//! in `shapedrop-web`, [`MemoryHost`] for headless use and tests).

mod listeners;
mod memory;

pub use listeners::ListenerSet;
pub use memory::{HandlerId, MemoryHost, NodeId};

use kurbo::Affine;
use std::fmt;
use thiserror::Error;

/// SVG namespace URI.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Namespace a node is created in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    /// Plain HTML element (boxes, containers).
    Html,
    /// SVG element (drawing root and shapes).
    Svg,
}

impl Namespace {
    /// Namespace URI, `None` for HTML.
    pub fn uri(self) -> Option<&'static str> {
        match self {
            Namespace::Html => None,
            Namespace::Svg => Some(SVG_NS),
        }
    }
}

/// Host errors.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("Node creation failed: {0}")]
    CreateFailed(String),
    #[error("Unknown node: {0}")]
    UnknownNode(String),
    #[error("Attribute write failed: {0}")]
    Attribute(String),
    #[error("Tree operation failed: {0}")]
    Tree(String),
    #[error("Listener operation failed: {0}")]
    Listener(String),
    #[error("Screen transform unavailable")]
    TransformUnavailable,
}

/// Result type for host operations.
pub type HostResult<T> = Result<T, HostError>;

/// Capabilities the core consumes from the embedding platform.
pub trait Host {
    /// Handle to a node in the host tree.
    type Node: Clone + PartialEq + fmt::Debug;
    /// Listener reference accepted by bind/unbind.
    type Handler;

    /// Create a detached element.
    fn create_element(&mut self, namespace: Namespace, tag: &str) -> HostResult<Self::Node>;

    /// Set a single attribute.
    fn set_attribute(&mut self, node: &Self::Node, name: &str, value: &str) -> HostResult<()>;

    /// Set a single inline style property, leaving the others alone.
    fn set_style_property(
        &mut self,
        node: &Self::Node,
        property: &str,
        value: &str,
    ) -> HostResult<()>;

    /// Append `child` as the last child of `parent`.
    ///
    /// Fails with [`HostError::Tree`] if `child` is `parent` or one of its
    /// ancestors.
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node) -> HostResult<()>;

    /// Check whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;

    /// Attach a listener for a named event.
    fn add_listener(
        &mut self,
        node: &Self::Node,
        event: &str,
        handler: &Self::Handler,
    ) -> HostResult<()>;

    /// Detach a listener previously attached with the same handler reference.
    fn remove_listener(
        &mut self,
        node: &Self::Node,
        event: &str,
        handler: &Self::Handler,
    ) -> HostResult<()>;

    /// Transform from the node's local coordinate space to screen coordinates.
    ///
    /// Must reflect the current layout; callers do not cache it.
    fn screen_transform(&self, node: &Self::Node) -> HostResult<Affine>;
}
