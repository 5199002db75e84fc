//! Canvas drawing model.
//!
//! A [`Canvas`] holds an ordered tree of [`DrawingObject`]s. Nothing is
//! painted when objects are added; the canvas asks its [`NativeCanvas`] to
//! redraw, and the platform replays the tree against a
//! [`CanvasBackend`](arbor_render::CanvasBackend) with [`Canvas::draw`].
//!
//! # Key Types
//!
//! - [`Canvas`] - The root context bound to a native surface
//! - [`Context`] - An ordered, mutable list of drawing objects
//! - [`ContextKind`] - Plain, fill, stroke or closed-path replay behaviour
//! - [`DrawingObject`] / [`Sweep`] - Entries and arc extents

mod context;
mod drawing;
mod native;

pub use context::{Context, ContextKind};
pub use drawing::{DrawingObject, Sweep};
pub use native::{Canvas, NativeCanvas};
