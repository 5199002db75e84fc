//! A backend that records every call.

use std::sync::Arc;

use parking_lot::Mutex;

use super::CanvasBackend;
use crate::paint::{Baseline, DrawState, FillRule};
use crate::text::Font;
use crate::types::Color;

/// One recorded [`CanvasBackend`] call.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    PushContext,
    PopContext,
    BeginPath,
    ClosePath,
    MoveTo {
        x: f32,
        y: f32,
    },
    LineTo {
        x: f32,
        y: f32,
    },
    BezierCurveTo {
        cp1x: f32,
        cp1y: f32,
        cp2x: f32,
        cp2y: f32,
        x: f32,
        y: f32,
    },
    QuadraticCurveTo {
        cpx: f32,
        cpy: f32,
        x: f32,
        y: f32,
    },
    Arc {
        x: f32,
        y: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        anticlockwise: bool,
    },
    Ellipse {
        x: f32,
        y: f32,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        start_angle: f32,
        end_angle: f32,
        anticlockwise: bool,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    Fill {
        color: Color,
        fill_rule: FillRule,
    },
    Stroke {
        color: Color,
        line_width: f32,
        line_dash: Option<Vec<f32>>,
    },
    WriteText {
        text: String,
        x: f32,
        y: f32,
        font: Font,
        baseline: Baseline,
        fill_color: Color,
    },
    Rotate {
        radians: f32,
    },
    Scale {
        sx: f32,
        sy: f32,
    },
    Translate {
        tx: f32,
        ty: f32,
    },
    ResetTransform,
}

impl BackendCall {
    /// The backend method name this call came from.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PushContext => "push_context",
            Self::PopContext => "pop_context",
            Self::BeginPath => "begin_path",
            Self::ClosePath => "close_path",
            Self::MoveTo { .. } => "move_to",
            Self::LineTo { .. } => "line_to",
            Self::BezierCurveTo { .. } => "bezier_curve_to",
            Self::QuadraticCurveTo { .. } => "quadratic_curve_to",
            Self::Arc { .. } => "arc",
            Self::Ellipse { .. } => "ellipse",
            Self::Rect { .. } => "rect",
            Self::Fill { .. } => "fill",
            Self::Stroke { .. } => "stroke",
            Self::WriteText { .. } => "write_text",
            Self::Rotate { .. } => "rotate",
            Self::Scale { .. } => "scale",
            Self::Translate { .. } => "translate",
            Self::ResetTransform => "reset_transform",
        }
    }
}

/// A [`CanvasBackend`] that stores each call in a shared log.
///
/// Clones share the same log, so a test can keep one handle while another
/// is lent to a canvas.
///
/// ```
/// use arbor_render::{CanvasBackend, RecordingBackend};
///
/// let mut backend = RecordingBackend::new();
/// let observer = backend.clone();
/// backend.move_to(1.0, 2.0);
/// backend.line_to(3.0, 4.0);
/// assert_eq!(observer.names(), vec!["move_to", "line_to"]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RecordingBackend {
    log: Arc<Mutex<Vec<BackendCall>>>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A copy of every call recorded so far.
    pub fn calls(&self) -> Vec<BackendCall> {
        self.log.lock().clone()
    }

    /// Method names of every call recorded so far.
    pub fn names(&self) -> Vec<&'static str> {
        self.log.lock().iter().map(BackendCall::name).collect()
    }

    /// Remove and return every recorded call.
    pub fn take(&self) -> Vec<BackendCall> {
        std::mem::take(&mut *self.log.lock())
    }

    pub fn len(&self) -> usize {
        self.log.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.lock().is_empty()
    }

    fn record(&self, call: BackendCall) {
        tracing::trace!(target: "arbor_render::backend", call = call.name(), "recorded");
        self.log.lock().push(call);
    }
}

impl CanvasBackend for RecordingBackend {
    fn push_context(&mut self) {
        self.record(BackendCall::PushContext);
    }

    fn pop_context(&mut self) {
        self.record(BackendCall::PopContext);
    }

    fn begin_path(&mut self) {
        self.record(BackendCall::BeginPath);
    }

    fn close_path(&mut self) {
        self.record(BackendCall::ClosePath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.record(BackendCall::MoveTo { x, y });
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.record(BackendCall::LineTo { x, y });
    }

    fn bezier_curve_to(&mut self, cp1x: f32, cp1y: f32, cp2x: f32, cp2y: f32, x: f32, y: f32) {
        self.record(BackendCall::BezierCurveTo {
            cp1x,
            cp1y,
            cp2x,
            cp2y,
            x,
            y,
        });
    }

    fn quadratic_curve_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32) {
        self.record(BackendCall::QuadraticCurveTo { cpx, cpy, x, y });
    }

    fn arc(
        &mut self,
        x: f32,
        y: f32,
        radius: f32,
        start_angle: f32,
        end_angle: f32,
        anticlockwise: bool,
    ) {
        self.record(BackendCall::Arc {
            x,
            y,
            radius,
            start_angle,
            end_angle,
            anticlockwise,
        });
    }

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
    ) {
        self.record(BackendCall::Ellipse {
            x,
            y,
            radius_x,
            radius_y,
            rotation,
            start_angle,
            end_angle,
            anticlockwise,
        });
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.record(BackendCall::Rect {
            x,
            y,
            width,
            height,
        });
    }

    fn fill(&mut self, color: Color, fill_rule: FillRule) {
        self.record(BackendCall::Fill { color, fill_rule });
    }

    fn stroke(&mut self, color: Color, line_width: f32, line_dash: Option<&[f32]>) {
        self.record(BackendCall::Stroke {
            color,
            line_width,
            line_dash: line_dash.map(<[f32]>::to_vec),
        });
    }

    fn write_text(
        &mut self,
        text: &str,
        x: f32,
        y: f32,
        font: &Font,
        baseline: Baseline,
        state: &DrawState,
    ) {
        self.record(BackendCall::WriteText {
            text: text.to_owned(),
            x,
            y,
            font: font.clone(),
            baseline,
            fill_color: state.fill_color,
        });
    }

    fn rotate(&mut self, radians: f32) {
        self.record(BackendCall::Rotate { radians });
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.record(BackendCall::Scale { sx, sy });
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.record(BackendCall::Translate { tx, ty });
    }

    fn reset_transform(&mut self) {
        self.record(BackendCall::ResetTransform);
    }
}

static_assertions::assert_impl_all!(RecordingBackend: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_log() {
        let mut backend = RecordingBackend::new();
        let observer = backend.clone();

        backend.push_context();
        backend.fill(Color::RED, FillRule::EvenOdd);
        backend.pop_context();

        assert_eq!(observer.len(), 3);
        assert_eq!(
            observer.calls()[1],
            BackendCall::Fill {
                color: Color::RED,
                fill_rule: FillRule::EvenOdd
            }
        );
    }

    #[test]
    fn test_take_drains() {
        let mut backend = RecordingBackend::new();
        backend.stroke(Color::BLACK, 2.0, Some(&[4.0, 2.0]));
        let calls = backend.take();
        assert!(backend.is_empty());
        assert_eq!(
            calls,
            vec![BackendCall::Stroke {
                color: Color::BLACK,
                line_width: 2.0,
                line_dash: Some(vec![4.0, 2.0]),
            }]
        );
    }

    #[test]
    fn test_write_text_records_paint() {
        let mut backend = RecordingBackend::new();
        let state = DrawState::default().with_fill(Color::BLUE, FillRule::NonZero);
        backend.write_text("hi", 1.0, 2.0, &Font::default(), Baseline::Top, &state);
        match &backend.calls()[0] {
            BackendCall::WriteText {
                text, fill_color, ..
            } => {
                assert_eq!(text, "hi");
                assert_eq!(*fill_color, Color::BLUE);
            }
            other => panic!("unexpected call {other:?}"),
        }
    }
}
