//! Drawing objects: the immutable entries of a canvas context.

use std::f32::consts::TAU;
use std::fmt;
use std::sync::Arc;

use arbor_render::{Baseline, CanvasBackend, DrawState, Font};

use super::context::Context;

/// The angular extent of an arc or ellipse.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub start_angle: f32,
    pub end_angle: f32,
    pub anticlockwise: bool,
}

impl Sweep {
    /// A full turn, clockwise from angle 0.
    pub const FULL: Self = Self {
        start_angle: 0.0,
        end_angle: TAU,
        anticlockwise: false,
    };

    /// A clockwise sweep between two angles, in radians.
    pub const fn new(start_angle: f32, end_angle: f32) -> Self {
        Self {
            start_angle,
            end_angle,
            anticlockwise: false,
        }
    }

    /// The same angles, swept anticlockwise.
    pub const fn anticlockwise(mut self) -> Self {
        self.anticlockwise = true;
        self
    }
}

impl Default for Sweep {
    fn default() -> Self {
        Self::FULL
    }
}

/// One entry of a [`Context`].
///
/// Every variant replays itself against a [`CanvasBackend`]; a nested
/// `Context` replays its own entries inside a saved graphics state.
#[derive(Debug)]
pub enum DrawingObject {
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
        sweep: Sweep,
    },
    Ellipse {
        x: f32,
        y: f32,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        sweep: Sweep,
    },
    Rect {
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    },
    WriteText {
        text: String,
        x: f32,
        y: f32,
        font: Font,
        baseline: Baseline,
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
    /// A nested context.
    Context(Arc<Context>),
}

impl DrawingObject {
    /// Replay against `backend` with `state` as the paint in effect.
    pub fn draw(&self, backend: &mut dyn CanvasBackend, state: &DrawState) {
        match self {
            Self::BeginPath => backend.begin_path(),
            Self::ClosePath => backend.close_path(),
            Self::MoveTo { x, y } => backend.move_to(*x, *y),
            Self::LineTo { x, y } => backend.line_to(*x, *y),
            Self::BezierCurveTo {
                cp1x,
                cp1y,
                cp2x,
                cp2y,
                x,
                y,
            } => backend.bezier_curve_to(*cp1x, *cp1y, *cp2x, *cp2y, *x, *y),
            Self::QuadraticCurveTo { cpx, cpy, x, y } => {
                backend.quadratic_curve_to(*cpx, *cpy, *x, *y)
            }
            Self::Arc {
                x,
                y,
                radius,
                sweep,
            } => backend.arc(
                *x,
                *y,
                *radius,
                sweep.start_angle,
                sweep.end_angle,
                sweep.anticlockwise,
            ),
            Self::Ellipse {
                x,
                y,
                radius_x,
                radius_y,
                rotation,
                sweep,
            } => backend.ellipse(
                *x,
                *y,
                *radius_x,
                *radius_y,
                *rotation,
                sweep.start_angle,
                sweep.end_angle,
                sweep.anticlockwise,
            ),
            Self::Rect {
                x,
                y,
                width,
                height,
            } => backend.rect(*x, *y, *width, *height),
            Self::WriteText {
                text,
                x,
                y,
                font,
                baseline,
            } => backend.write_text(text, *x, *y, font, *baseline, state),
            Self::Rotate { radians } => backend.rotate(*radians),
            Self::Scale { sx, sy } => backend.scale(*sx, *sy),
            Self::Translate { tx, ty } => backend.translate(*tx, *ty),
            Self::ResetTransform => backend.reset_transform(),
            Self::Context(context) => context.draw(backend, state),
        }
    }

    /// The nested context, if this is one.
    pub fn as_context(&self) -> Option<&Arc<Context>> {
        match self {
            Self::Context(context) => Some(context),
            _ => None,
        }
    }
}

impl fmt::Display for DrawingObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BeginPath => f.write_str("BeginPath()"),
            Self::ClosePath => f.write_str("ClosePath()"),
            Self::MoveTo { x, y } => write!(f, "MoveTo(x={x}, y={y})"),
            Self::LineTo { x, y } => write!(f, "LineTo(x={x}, y={y})"),
            Self::BezierCurveTo {
                cp1x,
                cp1y,
                cp2x,
                cp2y,
                x,
                y,
            } => write!(
                f,
                "BezierCurveTo(cp1x={cp1x}, cp1y={cp1y}, cp2x={cp2x}, cp2y={cp2y}, x={x}, y={y})"
            ),
            Self::QuadraticCurveTo { cpx, cpy, x, y } => {
                write!(f, "QuadraticCurveTo(cpx={cpx}, cpy={cpy}, x={x}, y={y})")
            }
            Self::Arc {
                x,
                y,
                radius,
                sweep,
            } => write!(
                f,
                "Arc(x={x}, y={y}, radius={radius}, startangle={}, endangle={}, anticlockwise={})",
                sweep.start_angle, sweep.end_angle, sweep.anticlockwise
            ),
            Self::Ellipse {
                x,
                y,
                radius_x,
                radius_y,
                rotation,
                sweep,
            } => write!(
                f,
                "Ellipse(x={x}, y={y}, radiusx={radius_x}, radiusy={radius_y}, rotation={rotation}, \
                 startangle={}, endangle={}, anticlockwise={})",
                sweep.start_angle, sweep.end_angle, sweep.anticlockwise
            ),
            Self::Rect {
                x,
                y,
                width,
                height,
            } => write!(f, "Rect(x={x}, y={y}, width={width}, height={height})"),
            Self::WriteText {
                text,
                x,
                y,
                font,
                baseline,
            } => write!(
                f,
                "WriteText(text={text:?}, x={x}, y={y}, font={font}, baseline={baseline:?})"
            ),
            Self::Rotate { radians } => write!(f, "Rotate(radians={radians})"),
            Self::Scale { sx, sy } => write!(f, "Scale(sx={sx}, sy={sy})"),
            Self::Translate { tx, ty } => write!(f, "Translate(tx={tx}, ty={ty})"),
            Self::ResetTransform => f.write_str("ResetTransform()"),
            Self::Context(context) => write!(f, "{}", context.kind()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_render::{BackendCall, RecordingBackend};

    #[test]
    fn test_arc_defaults_to_full_clockwise_turn() {
        let mut backend = RecordingBackend::new();
        let arc = DrawingObject::Arc {
            x: 10.0,
            y: 10.0,
            radius: 5.0,
            sweep: Sweep::default(),
        };
        arc.draw(&mut backend, &DrawState::default());

        assert_eq!(
            backend.calls(),
            vec![BackendCall::Arc {
                x: 10.0,
                y: 10.0,
                radius: 5.0,
                start_angle: 0.0,
                end_angle: TAU,
                anticlockwise: false,
            }]
        );
    }

    #[test]
    fn test_anticlockwise_sweep() {
        let sweep = Sweep::new(1.0, 2.0).anticlockwise();
        assert_eq!(sweep.start_angle, 1.0);
        assert!(sweep.anticlockwise);
        assert!(!Sweep::FULL.anticlockwise);
    }

    #[test]
    fn test_display() {
        assert_eq!(
            DrawingObject::MoveTo { x: 1.0, y: 2.5 }.to_string(),
            "MoveTo(x=1, y=2.5)"
        );
        assert_eq!(
            DrawingObject::Rect {
                x: 0.0,
                y: 0.0,
                width: 3.0,
                height: 4.0
            }
            .to_string(),
            "Rect(x=0, y=0, width=3, height=4)"
        );
    }
}
