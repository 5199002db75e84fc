//! Drawing primitives for Arbor.
//!
//! This crate provides the value types and the native paint interface the
//! canvas drawing model replays against. It does no rasterization itself:
//! pixels are the platform's job.
//!
//! - Geometry and color: [`Point`], [`Size`], [`Rect`], [`Color`], [`Path`]
//! - Transforms: [`Transform2D`], [`TransformStack`]
//! - Paint state: [`DrawState`], [`FillRule`], [`Baseline`], [`Font`]
//! - The [`CanvasBackend`] trait, plus [`RecordingBackend`] and
//!   [`PathBackend`] implementations that need no platform
//!
//! # Replaying Against a Backend
//!
//! ```
//! use arbor_render::{BackendCall, CanvasBackend, Color, FillRule, RecordingBackend};
//!
//! let mut backend = RecordingBackend::new();
//! backend.push_context();
//! backend.begin_path();
//! backend.move_to(0.0, 0.0);
//! backend.line_to(10.0, 0.0);
//! backend.fill(Color::RED, FillRule::NonZero);
//! backend.pop_context();
//!
//! assert_eq!(
//!     backend.names(),
//!     vec!["push_context", "begin_path", "move_to", "line_to", "fill", "pop_context"],
//! );
//! assert_eq!(
//!     backend.calls()[4],
//!     BackendCall::Fill { color: Color::RED, fill_rule: FillRule::NonZero },
//! );
//! ```

mod backend;
pub mod geometry;
mod paint;
pub mod text;
mod transform;
mod types;

pub use backend::{
    BackendCall, CanvasBackend, PaintedPath, PathBackend, PathPaint, RecordingBackend, TextRun,
};
pub use paint::{Baseline, DEFAULT_LINE_WIDTH, DrawState, FillRule};
pub use text::{Font, FontSize, FontStyle, FontVariant, FontWeight};
pub use transform::{Transform2D, TransformStack};
pub use types::{Color, Path, PathCommand, Point, Rect, Size};
