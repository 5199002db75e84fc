//! Arc and ellipse geometry.
//!
//! Canvas arcs are specified by a start angle, an end angle and a direction.
//! [`arc_sweep`] resolves those into a signed sweep using the usual 2D canvas
//! rules, and [`ellipse_to_cubics`] approximates the resulting arc with cubic
//! Bézier segments of at most a quarter turn each.

use std::f32::consts::{FRAC_PI_2, TAU};

use crate::types::Point;

/// Resolve start/end angles into a signed sweep, in radians.
///
/// Positive sweeps run clockwise (increasing angle in a y-down space).
/// A span of at least a full turn in the drawing direction yields exactly
/// one full turn; otherwise the end angle is brought to within one turn of
/// the start in the drawing direction.
pub fn arc_sweep(start_angle: f32, end_angle: f32, anticlockwise: bool) -> f32 {
    if !anticlockwise && end_angle - start_angle >= TAU {
        return TAU;
    }
    if anticlockwise && start_angle - end_angle >= TAU {
        return -TAU;
    }

    if anticlockwise {
        let span = (start_angle - end_angle).rem_euclid(TAU);
        -span
    } else {
        (end_angle - start_angle).rem_euclid(TAU)
    }
}

/// An elliptical arc converted to cubic Bézier segments.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcCurves {
    /// First point on the arc.
    pub start: Point,
    /// `(control1, control2, end)` for each segment, in drawing order.
    pub segments: Vec<(Point, Point, Point)>,
}

impl ArcCurves {
    /// Last point on the arc.
    pub fn end(&self) -> Point {
        self.segments.last().map_or(self.start, |seg| seg.2)
    }
}

/// Approximate an elliptical arc with cubic Bézier curves.
///
/// `rotation` rotates the ellipse's x axis, in radians. The sweep is
/// computed with [`arc_sweep`].
pub fn ellipse_to_cubics(
    center: Point,
    radius_x: f32,
    radius_y: f32,
    rotation: f32,
    start_angle: f32,
    end_angle: f32,
    anticlockwise: bool,
) -> ArcCurves {
    let sweep = arc_sweep(start_angle, end_angle, anticlockwise);
    let (rot_sin, rot_cos) = rotation.sin_cos();

    let map = |ux: f32, uy: f32| {
        let x = ux * radius_x;
        let y = uy * radius_y;
        Point::new(
            center.x + x * rot_cos - y * rot_sin,
            center.y + x * rot_sin + y * rot_cos,
        )
    };

    let (s_sin, s_cos) = start_angle.sin_cos();
    let start = map(s_cos, s_sin);

    if sweep == 0.0 {
        return ArcCurves {
            start,
            segments: Vec::new(),
        };
    }

    // Tolerance keeps an exact quarter-turn multiple from gaining a sliver segment.
    let count = (sweep.abs() / FRAC_PI_2 - 1e-4).ceil().max(1.0) as usize;
    let step = sweep / count as f32;
    // Control point distance for a unit-circle arc of `step` radians.
    let k = 4.0 / 3.0 * (step / 4.0).tan();

    let mut segments = Vec::with_capacity(count);
    let mut a = start_angle;
    for _ in 0..count {
        let b = a + step;
        let (a_sin, a_cos) = a.sin_cos();
        let (b_sin, b_cos) = b.sin_cos();
        let c1 = map(a_cos - k * a_sin, a_sin + k * a_cos);
        let c2 = map(b_cos + k * b_sin, b_sin - k * b_cos);
        let end = map(b_cos, b_sin);
        segments.push((c1, c2, end));
        a = b;
    }

    ArcCurves { start, segments }
}
