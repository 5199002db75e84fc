//! A backend that flattens a replay into device-space paths.

use super::CanvasBackend;
use crate::geometry::ellipse_to_cubics;
use crate::paint::{Baseline, DrawState, FillRule};
use crate::text::Font;
use crate::transform::TransformStack;
use crate::types::{Color, Path, Point, Rect};

/// How a [`PaintedPath`] was painted.
#[derive(Debug, Clone, PartialEq)]
pub enum PathPaint {
    Fill {
        color: Color,
        fill_rule: FillRule,
    },
    Stroke {
        color: Color,
        line_width: f32,
        line_dash: Option<Vec<f32>>,
    },
}

/// A path snapshot taken at a `fill` or `stroke` call.
#[derive(Debug, Clone, PartialEq)]
pub struct PaintedPath {
    /// The path in device coordinates.
    pub path: Path,
    pub paint: PathPaint,
}

/// A line of text positioned in device coordinates.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub origin: Point,
    pub font: Font,
    pub baseline: Baseline,
    pub color: Color,
}

/// A [`CanvasBackend`] that builds transformed [`Path`]s.
///
/// Every point is mapped through the transform current at the time it is
/// added, so later transform changes do not move existing geometry. Arcs and
/// ellipses become cubic Bézier curves.
///
/// ```
/// use arbor_render::{CanvasBackend, Color, FillRule, PathBackend, Rect};
///
/// let mut backend = PathBackend::new();
/// backend.translate(10.0, 10.0);
/// backend.begin_path();
/// backend.rect(0.0, 0.0, 5.0, 5.0);
/// backend.fill(Color::RED, FillRule::NonZero);
///
/// assert_eq!(backend.painted().len(), 1);
/// assert_eq!(backend.bounds(), Some(Rect::new(10.0, 10.0, 5.0, 5.0)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct PathBackend {
    transforms: TransformStack,
    current: Path,
    painted: Vec<PaintedPath>,
    text: Vec<TextRun>,
}

impl PathBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every path painted so far, in paint order.
    pub fn painted(&self) -> &[PaintedPath] {
        &self.painted
    }

    /// Every text run drawn so far.
    pub fn text_runs(&self) -> &[TextRun] {
        &self.text
    }

    /// The path currently under construction.
    pub fn current_path(&self) -> &Path {
        &self.current
    }

    /// Number of unmatched `push_context` calls.
    pub fn depth(&self) -> usize {
        self.transforms.depth()
    }

    /// Union of the control bounds of every painted path.
    pub fn bounds(&self) -> Option<Rect> {
        self.painted
            .iter()
            .filter_map(|painted| painted.path.control_bounds())
            .reduce(|acc, rect| acc.union(&rect))
    }

    fn map(&self, x: f32, y: f32) -> Point {
        self.transforms.transform_point(Point::new(x, y))
    }

    /// Start a subpath at `p` if the path has no current point.
    fn ensure_subpath(&mut self, p: Point) {
        if self.current.current_point().is_none() {
            self.current.move_to(p);
        }
    }
}

impl CanvasBackend for PathBackend {
    fn push_context(&mut self) {
        self.transforms.save();
    }

    fn pop_context(&mut self) {
        if !self.transforms.restore() {
            tracing::warn!(
                target: "arbor_render::backend",
                "pop_context without matching push_context"
            );
        }
    }

    fn begin_path(&mut self) {
        self.current = Path::new();
    }

    fn close_path(&mut self) {
        if self.current.current_point().is_some() {
            self.current.close();
        }
    }

    fn move_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        self.current.move_to(p);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        let p = self.map(x, y);
        if self.current.current_point().is_none() {
            self.current.move_to(p);
        } else {
            self.current.line_to(p);
        }
    }

    fn bezier_curve_to(&mut self, cp1x: f32, cp1y: f32, cp2x: f32, cp2y: f32, x: f32, y: f32) {
        let c1 = self.map(cp1x, cp1y);
        let c2 = self.map(cp2x, cp2y);
        let end = self.map(x, y);
        self.ensure_subpath(c1);
        self.current.cubic_to(c1, c2, end);
    }

    fn quadratic_curve_to(&mut self, cpx: f32, cpy: f32, x: f32, y: f32) {
        let control = self.map(cpx, cpy);
        let end = self.map(x, y);
        self.ensure_subpath(control);
        self.current.quad_to(control, end);
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
        let curves = ellipse_to_cubics(
            Point::new(x, y),
            radius_x,
            radius_y,
            rotation,
            start_angle,
            end_angle,
            anticlockwise,
        );

        let start = self.transforms.transform_point(curves.start);
        if self.current.current_point().is_some() {
            self.current.line_to(start);
        } else {
            self.current.move_to(start);
        }

        for (c1, c2, end) in curves.segments {
            let c1 = self.transforms.transform_point(c1);
            let c2 = self.transforms.transform_point(c2);
            let end = self.transforms.transform_point(end);
            self.current.cubic_to(c1, c2, end);
        }
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        let corners = [
            self.map(x, y),
            self.map(x + width, y),
            self.map(x + width, y + height),
            self.map(x, y + height),
        ];
        self.current.move_to(corners[0]);
        for corner in &corners[1..] {
            self.current.line_to(*corner);
        }
        self.current.close();
    }

    fn fill(&mut self, color: Color, fill_rule: FillRule) {
        self.painted.push(PaintedPath {
            path: self.current.clone(),
            paint: PathPaint::Fill { color, fill_rule },
        });
    }

    fn stroke(&mut self, color: Color, line_width: f32, line_dash: Option<&[f32]>) {
        self.painted.push(PaintedPath {
            path: self.current.clone(),
            paint: PathPaint::Stroke {
                color,
                line_width,
                line_dash: line_dash.map(<[f32]>::to_vec),
            },
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
        let origin = self.map(x, y);
        self.text.push(TextRun {
            text: text.to_owned(),
            origin,
            font: font.clone(),
            baseline,
            color: state.fill_color,
        });
    }

    fn rotate(&mut self, radians: f32) {
        self.transforms.rotate(radians);
    }

    fn scale(&mut self, sx: f32, sy: f32) {
        self.transforms.scale(sx, sy);
    }

    fn translate(&mut self, tx: f32, ty: f32) {
        self.transforms.translate(tx, ty);
    }

    fn reset_transform(&mut self) {
        self.transforms.reset();
    }
}
