//! ShapeDrop Web Shell
//!
//! Binds the core editor to the browser DOM and exposes it to JavaScript.

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod editor;

#[cfg(target_arch = "wasm32")]
pub use dom::DomHost;
#[cfg(target_arch = "wasm32")]
pub use editor::{ShapeEditor, start};
