//! 2D transformations and transform stack.
//!
//! Canvas `translate`/`scale`/`rotate` directives accumulate into a
//! [`Transform2D`]; `push_context`/`pop_context` map onto a
//! [`TransformStack`].

use crate::types::Point;

/// A 2D affine transformation matrix.
///
/// Stored as a 3x2 matrix in column-major order:
/// ```text
/// | m0 m2 m4 |   | scale_x  skew_x   translate_x |
/// | m1 m3 m5 | = | skew_y   scale_y  translate_y |
/// ```
///
/// # Examples
///
/// ```
/// use arbor_render::{Transform2D, Point};
///
/// let translate = Transform2D::translate(100.0, 50.0);
/// assert_eq!(translate.transform_point(Point::ZERO), Point::new(100.0, 50.0));
///
/// // `then` applies the argument first: translate, then scale.
/// let transform = Transform2D::scale_xy(2.0, 2.0)
///     .then(&Transform2D::translate(10.0, 0.0));
/// assert_eq!(transform.transform_point(Point::new(5.0, 0.0)), Point::new(30.0, 0.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform2D {
    m: [f32; 6],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
    };

    /// Create a translation transform.
    #[inline]
    pub const fn translate(tx: f32, ty: f32) -> Self {
        Self {
            m: [1.0, 0.0, 0.0, 1.0, tx, ty],
        }
    }

    /// Create a non-uniform scaling transform.
    #[inline]
    pub const fn scale_xy(sx: f32, sy: f32) -> Self {
        Self {
            m: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Create a rotation transform (angle in radians, clockwise in a y-down
    /// coordinate system).
    #[inline]
    pub fn rotate(angle: f32) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self {
            m: [cos, sin, -sin, cos, 0.0, 0.0],
        }
    }

    /// Concatenate this transform with another (self * other).
    ///
    /// The resulting transform first applies `other`, then `self`.
    #[inline]
    pub fn then(&self, other: &Self) -> Self {
        let a = &self.m;
        let b = &other.m;
        Self {
            m: [
                a[0] * b[0] + a[2] * b[1],
                a[1] * b[0] + a[3] * b[1],
                a[0] * b[2] + a[2] * b[3],
                a[1] * b[2] + a[3] * b[3],
                a[0] * b[4] + a[2] * b[5] + a[4],
                a[1] * b[4] + a[3] * b[5] + a[5],
            ],
        }
    }

    /// Transform a point.
    #[inline]
    pub fn transform_point(&self, p: Point) -> Point {
        Point {
            x: self.m[0] * p.x + self.m[2] * p.y + self.m[4],
            y: self.m[1] * p.x + self.m[3] * p.y + self.m[5],
        }
    }
}

/// A stack of transforms for save/restore functionality.
///
/// New operations are applied in local coordinates, matching canvas
/// semantics: `translate(10, 0)` followed by `scale(2, 2)` scales around the
/// translated origin.
///
/// ```
/// use arbor_render::{TransformStack, Point};
///
/// let mut stack = TransformStack::new();
/// stack.translate(100.0, 50.0);
/// stack.save();
/// stack.scale(2.0, 2.0);
/// assert_eq!(stack.transform_point(Point::new(10.0, 0.0)), Point::new(120.0, 50.0));
///
/// stack.restore();
/// assert_eq!(stack.transform_point(Point::new(10.0, 0.0)), Point::new(110.0, 50.0));
/// assert_eq!(stack.depth(), 0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    stack: Vec<Transform2D>,
    current: Transform2D,
}

impl TransformStack {
    /// Create a new transform stack with the identity transform.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current transform.
    #[inline]
    pub fn current(&self) -> &Transform2D {
        &self.current
    }

    /// Reset the current transform to identity. Saved states are kept.
    #[inline]
    pub fn reset(&mut self) {
        self.current = Transform2D::IDENTITY;
    }

    /// Save the current transform state.
    #[inline]
    pub fn save(&mut self) {
        self.stack.push(self.current);
    }

    /// Restore the previously saved transform state.
    ///
    /// Returns `false` (and leaves the transform untouched) if nothing was
    /// saved.
    #[inline]
    pub fn restore(&mut self) -> bool {
        match self.stack.pop() {
            Some(transform) => {
                self.current = transform;
                true
            }
            None => false,
        }
    }

    /// Number of saved states.
    #[inline]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn translate(&mut self, tx: f32, ty: f32) {
        self.current = self.current.then(&Transform2D::translate(tx, ty));
    }

    pub fn scale(&mut self, sx: f32, sy: f32) {
        self.current = self.current.then(&Transform2D::scale_xy(sx, sy));
    }

    pub fn rotate(&mut self, angle: f32) {
        self.current = self.current.then(&Transform2D::rotate(angle));
    }

    /// Map a point from local to device coordinates.
    #[inline]
    pub fn transform_point(&self, p: Point) -> Point {
        self.current.transform_point(p)
    }
}
