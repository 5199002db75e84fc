//! The native paint context interface.
//!
//! A [`CanvasBackend`] is what a canvas's drawing objects replay themselves
//! against. Platform integrations implement it over their native 2D API; this
//! crate ships two implementations that need no platform at all:
//!
//! - [`RecordingBackend`] logs every call, for tests and debugging
//! - [`PathBackend`] flattens a replay into device-space [`Path`](crate::Path)s
//!
//! # State Stack
//!
//! `push_context`/`pop_context` bracket every nested drawing context. A
//! backend saves and restores its transform (and any native graphics state)
//! across each pair.

mod path;
mod recording;

pub use path::{PaintedPath, PathBackend, PathPaint, TextRun};
pub use recording::{BackendCall, RecordingBackend};

use crate::paint::{Baseline, DrawState, FillRule};
use crate::text::Font;
use crate::types::Color;

/// A native 2D paint context.
///
/// Coordinates are in canvas units. Angles are in radians, measured
/// clockwise from the positive x axis in the y-down canvas space.
pub trait CanvasBackend {
    // =========================================================================
    // State Management
    // =========================================================================

    /// Save the graphics state.
    fn push_context(&mut self);

    /// Restore the most recently saved graphics state.
    fn pop_context(&mut self);

    // =========================================================================
    // Path Construction
    // =========================================================================

    /// Discard the current path and start a new one.
    fn begin_path(&mut self);

    /// Close the current subpath.
    fn close_path(&mut self);

    fn move_to(&mut self, x: f32, y: f32);

    fn line_to(&mut self, x: f32, y: f32);

    fn bezier_curve_to(&mut self, cp1x: f32, cp1y: f32, cp2x: f32, cp2y: f32, x: f32, y: f32);

    fn quadratic_curve_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32);

    /// Add a circular arc.
    ///
    /// The default forwards to [`ellipse`](Self::ellipse) with equal radii.
    fn arc(
        &mut self,
        x: f32,
        y: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        anticlockwise: bool,
    ) {
        self.ellipse(x, y, radius, radius, 0.0, start_angle, end_angle, anticlockwise);
    }

    /// Add an elliptical arc.
    #[allow(clippy::too_many_arguments)]
    fn ellipse(
        &mut self,
        x: f32,
        y: f32,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        start_angle: f32,
        end_angle: f32,
        anticlockwise: bool,
    );

    /// Add a closed rectangle subpath.
    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    // =========================================================================
    // Painting
    // =========================================================================

    /// Fill the current path.
    fn fill(&mut self, color: Color, fill_rule: FillRule);

    /// Stroke the current path.
    fn stroke(&mut self, color: Color, line_width: f32, line_dash: Option<&[f32]>);

    /// Draw a line of text. `state` carries the paint in effect.
    fn write_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font: &Font,
        baseline: Baseline,
        state: &DrawState,
    );

    // =========================================================================
    // Transform Operations
    // =========================================================================

    fn rotate(&mut self, radians: f32);

    fn scale(&mut self, sx: f32, sy: f32);

    fn translate(&mut self, tx: f32, ty: f32);

    /// Reset the current transform to identity.
    fn reset_transform(&mut self);
}
