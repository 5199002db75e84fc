//! Drawing contexts: ordered, mutable lists of drawing objects.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use arbor_render::{Baseline, CanvasBackend, Color, DrawState, FillRule, Font, FontSize, text};
use parking_lot::RwLock;

use super::drawing::{DrawingObject, Sweep};
use super::native::CanvasShared;

/// What a context does around its entries when replayed.
#[derive(Debug, Clone, PartialEq)]
pub enum ContextKind {
    /// Saves and restores the graphics state.
    Plain,
    /// Starts a path and fills it after the entries.
    Fill { color: Color, fill_rule: FillRule },
    /// Starts a path and strokes it after the entries.
    Stroke {
        color: Color,
        line_width: f32,
        line_dash: Option<Vec<f32>>,
    },
    /// Moves to `(x, y)` before the entries and closes the path after them.
    ClosedPath { x: f32, y: f32 },
}

impl fmt::Display for ContextKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => f.write_str("Context()"),
            Self::Fill { color, fill_rule } => {
                write!(f, "Fill(color={color}, fill_rule={fill_rule})")
            }
            Self::Stroke {
                color,
                line_width,
                line_dash,
            } => write!(
                f,
                "Stroke(color={color}, line_width={line_width}, line_dash={line_dash:?})"
            ),
            Self::ClosedPath { x, y } => write!(f, "ClosedPath(x={x}, y={y})"),
        }
    }
}

/// An ordered list of [`DrawingObject`]s.
///
/// Each primitive method appends an object and returns a handle that can be
/// passed to [`remove`](Self::remove). When the context is a canvas's root,
/// every change requests a redraw.
///
/// The scoped methods ([`context`](Self::context), [`fill`](Self::fill),
/// [`stroke`](Self::stroke), [`closed_path`](Self::closed_path)) append a
/// nested context, let the closure populate it, and then request a single
/// redraw. Objects added inside the closure never redraw on their own; once
/// the closure returns, changes to the nested context redraw like the root's.
pub struct Context {
    kind: ContextKind,
    objects: RwLock<Vec<Arc<DrawingObject>>>,
    canvas: Option<Arc<CanvasShared>>,
    /// Whether changes request a redraw. Nested contexts stay quiet while
    /// their build closure runs.
    live: AtomicBool,
}

impl Context {
    /// A plain context attached to no canvas.
    pub fn new() -> Self {
        Self::with_kind(ContextKind::Plain)
    }

    /// A context of the given kind attached to no canvas.
    pub fn with_kind(kind: ContextKind) -> Self {
        Self::attached(kind, None, false)
    }

    pub(crate) fn attached(kind: ContextKind, canvas: Option<Arc<CanvasShared>>, live: bool) -> Self {
        Self {
            kind,
            objects: RwLock::new(Vec::new()),
            canvas,
            live: AtomicBool::new(live),
        }
    }

    pub fn kind(&self) -> &ContextKind {
        &self.kind
    }

    pub fn len(&self) -> usize {
        self.objects.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.read().is_empty()
    }

    /// A snapshot of the entries, in replay order.
    pub fn objects(&self) -> Vec<Arc<DrawingObject>> {
        self.objects.read().clone()
    }

    fn redraw(&self) {
        if !self.live.load(Ordering::Acquire) {
            return;
        }
        if let Some(canvas) = &self.canvas {
            canvas.redraw();
        }
    }

    /// Append an object.
    pub fn add(&self, object: DrawingObject) -> Arc<DrawingObject> {
        let handle = Arc::new(object);
        self.objects.write().push(handle.clone());
        self.redraw();
        handle
    }

    /// Insert an object at `index`, clamped to the end.
    pub fn insert(&self, index: usize, object: DrawingObject) -> Arc<DrawingObject> {
        let handle = Arc::new(object);
        {
            let mut objects = self.objects.write();
            let index = index.min(objects.len());
            objects.insert(index, handle.clone());
        }
        self.redraw();
        handle
    }

    /// Remove an object by identity. Returns `false` if it is not here.
    pub fn remove(&self, object: &Arc<DrawingObject>) -> bool {
        let removed = {
            let mut objects = self.objects.write();
            let before = objects.len();
            objects.retain(|candidate| !Arc::ptr_eq(candidate, object));
            objects.len() != before
        };
        if removed {
            self.redraw();
        }
        removed
    }

    /// Remove every object.
    pub fn clear(&self) {
        self.objects.write().clear();
        self.redraw();
    }

    // =========================================================================
    // Primitives
    // =========================================================================

    pub fn begin_path(&self) -> Arc<DrawingObject> {
        self.add(DrawingObject::BeginPath)
    }

    pub fn close_path(&self) -> Arc<DrawingObject> {
        self.add(DrawingObject::ClosePath)
    }

    pub fn move_to(&self, x: f32, y: f32) -> Arc<DrawingObject> {
        self.add(DrawingObject::MoveTo { x, y })
    }

    pub fn line_to(&self, x: f32, y: f32) -> Arc<DrawingObject> {
        self.add(DrawingObject::LineTo { x, y })
    }

    pub fn bezier_curve_to(
        &self,
        cp1x: f32,
        cp1y: f32,
        cp2x: f32,
        cp2y: f32,
        x: f32,
        y: f32,
    ) -> Arc<DrawingObject> {
        self.add(DrawingObject::BezierCurveTo {
            cp1x,
            cp1y,
            cp2x,
            cp2y,
            x,
            y,
        })
    }

    pub fn quadratic_curve_to(&self, cpx: f32, cpy: f32, x: f32, y: f32) -> Arc<DrawingObject> {
        self.add(DrawingObject::QuadraticCurveTo { cpx, cpy, x, y })
    }

    /// A circular arc; pass [`Sweep::FULL`] for a whole circle.
    pub fn arc(&self, x: f32, y: f32, radius: f32, sweep: Sweep) -> Arc<DrawingObject> {
        self.add(DrawingObject::Arc {
            x,
            y,
            radius,
            sweep,
        })
    }

    pub fn ellipse(
        &self,
        x: f32,
        y: f32,
        radius_x: f32,
        radius_y: f32,
        rotation: f32,
        sweep: Sweep,
    ) -> Arc<DrawingObject> {
        self.add(DrawingObject::Ellipse {
            x,
            y,
            radius_x,
            radius_y,
            rotation,
            sweep,
        })
    }

    pub fn rect(&self, x: f32, y: f32, width: f32, height: f32) -> Arc<DrawingObject> {
        self.add(DrawingObject::Rect {
            x,
            y,
            width,
            height,
        })
    }

    /// Write a line of text.
    ///
    /// Without a font, the system family at the canvas's current font size
    /// is used.
    pub fn write_text(
        &self,
        text: impl Into<String>,
        x: f32,
        y: f32,
        font: Option<Font>,
        baseline: Baseline,
    ) -> Arc<DrawingObject> {
        let font = font.unwrap_or_else(|| self.default_font());
        self.add(DrawingObject::WriteText {
            text: text.into(),
            x,
            y,
            font,
            baseline,
        })
    }

    fn default_font(&self) -> Font {
        let size = self
            .canvas
            .as_ref()
            .map_or(FontSize::SystemDefault, |canvas| canvas.font().size);
        Font::new(text::SYSTEM, size)
    }

    pub fn rotate(&self, radians: f32) -> Arc<DrawingObject> {
        self.add(DrawingObject::Rotate { radians })
    }

    pub fn scale(&self, sx: f32, sy: f32) -> Arc<DrawingObject> {
        self.add(DrawingObject::Scale { sx, sy })
    }

    pub fn translate(&self, tx: f32, ty: f32) -> Arc<DrawingObject> {
        self.add(DrawingObject::Translate { tx, ty })
    }

    pub fn reset_transform(&self) -> Arc<DrawingObject> {
        self.add(DrawingObject::ResetTransform)
    }

    // =========================================================================
    // Scoped Contexts
    // =========================================================================

    fn scoped(&self, kind: ContextKind, build: impl FnOnce(&Context)) -> Arc<DrawingObject> {
        let child = Arc::new(Context::attached(kind, self.canvas.clone(), false));
        let handle = Arc::new(DrawingObject::Context(child.clone()));
        self.objects.write().push(handle.clone());

        build(&child);
        child.live.store(true, Ordering::Release);
        self.redraw();
        handle
    }

    /// A nested context that saves and restores the graphics state.
    pub fn context(&self, build: impl FnOnce(&Context)) -> Arc<DrawingObject> {
        self.scoped(ContextKind::Plain, build)
    }

    /// A nested context whose path is filled with `color`.
    ///
    /// ```
    /// use arbor::canvas::Context;
    /// use arbor_render::{Color, FillRule};
    ///
    /// let context = Context::new();
    /// context.fill(Color::RED, FillRule::EvenOdd, |fill| {
    ///     fill.move_to(0.0, 0.0);
    ///     fill.line_to(10.0, 0.0);
    ///     fill.line_to(10.0, 10.0);
    /// });
    /// assert_eq!(context.len(), 1);
    /// ```
    pub fn fill(
        &self,
        color: Color,
        fill_rule: FillRule,
        build: impl FnOnce(&Context),
    ) -> Arc<DrawingObject> {
        self.scoped(ContextKind::Fill { color, fill_rule }, build)
    }

    /// A nested context whose path is stroked.
    pub fn stroke(
        &self,
        color: Color,
        line_width: f32,
        line_dash: Option<Vec<f32>>,
        build: impl FnOnce(&Context),
    ) -> Arc<DrawingObject> {
        self.scoped(
            ContextKind::Stroke {
                color,
                line_width,
                line_dash,
            },
            build,
        )
    }

    /// A nested context that starts at `(x, y)` and closes its path.
    pub fn closed_path(&self, x: f32, y: f32, build: impl FnOnce(&Context)) -> Arc<DrawingObject> {
        self.scoped(ContextKind::ClosedPath { x, y }, build)
    }

    // =========================================================================
    // Replay
    // =========================================================================

    /// Replay every entry against `backend`.
    pub fn draw(&self, backend: &mut dyn CanvasBackend, state: &DrawState) {
        let objects = self.objects();
        backend.push_context();
        match &self.kind {
            ContextKind::Plain => replay(&objects, backend, state),
            ContextKind::Fill { color, fill_rule } => {
                backend.begin_path();
                replay(&objects, backend, &state.with_fill(*color, *fill_rule));
                backend.fill(*color, *fill_rule);
            }
            ContextKind::Stroke {
                color,
                line_width,
                line_dash,
            } => {
                backend.begin_path();
                let inner = state.with_stroke(*color, *line_width, line_dash.clone());
                replay(&objects, backend, &inner);
                backend.stroke(*color, *line_width, line_dash.as_deref());
            }
            ContextKind::ClosedPath { x, y } => {
                backend.move_to(*x, *y);
                replay(&objects, backend, state);
                backend.close_path();
            }
        }
        backend.pop_context();
    }
}

fn replay(objects: &[Arc<DrawingObject>], backend: &mut dyn CanvasBackend, state: &DrawState) {
    for object in objects {
        object.draw(backend, state);
    }
}

impl Default for Context {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("kind", &self.kind)
            .field("objects", &*self.objects.read())
            .field("live", &self.live.load(Ordering::Relaxed))
            .finish()
    }
}

static_assertions::assert_impl_all!(Context: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use arbor_render::{BackendCall, RecordingBackend};

    #[test]
    fn test_remove_by_identity() {
        let context = Context::new();
        let first = context.move_to(0.0, 0.0);
        let second = context.move_to(0.0, 0.0);

        assert!(context.remove(&first));
        assert!(!context.remove(&first));
        assert_eq!(context.len(), 1);
        assert!(Arc::ptr_eq(&context.objects()[0], &second));
    }

    #[test]
    fn test_insert_clamps() {
        let context = Context::new();
        context.line_to(1.0, 1.0);
        context.insert(0, DrawingObject::BeginPath);
        context.insert(99, DrawingObject::ClosePath);
        let names: Vec<_> = context.objects().iter().map(|o| o.to_string()).collect();
        assert_eq!(names, vec!["BeginPath()", "LineTo(x=1, y=1)", "ClosePath()"]);
    }

    #[test]
    fn test_fill_replay() {
        let context = Context::new();
        context.fill(Color::RED, FillRule::EvenOdd, |fill| {
            fill.move_to(1.0, 2.0);
            fill.line_to(3.0, 4.0);
        });

        let mut backend = RecordingBackend::new();
        context.draw(&mut backend, &DrawState::default());
        assert_eq!(
            backend.names(),
            vec![
                "push_context",
                "push_context",
                "begin_path",
                "move_to",
                "line_to",
                "fill",
                "pop_context",
                "pop_context",
            ]
        );
        assert_eq!(
            backend.calls()[5],
            BackendCall::Fill {
                color: Color::RED,
                fill_rule: FillRule::EvenOdd
            }
        );
    }

    #[test]
    fn test_stroke_replay_passes_state_to_text() {
        let context = Context::new();
        context.stroke(Color::BLUE, 3.0, Some(vec![4.0, 2.0]), |stroke| {
            stroke.rect(0.0, 0.0, 5.0, 5.0);
            stroke.write_text("hi", 1.0, 1.0, None, Baseline::Top);
        });

        let mut backend = RecordingBackend::new();
        context.draw(&mut backend, &DrawState::default());
        let calls = backend.calls();
        assert_eq!(
            calls[calls.len() - 3],
            BackendCall::Stroke {
                color: Color::BLUE,
                line_width: 3.0,
                line_dash: Some(vec![4.0, 2.0]),
            }
        );
        assert!(calls.iter().any(|call| matches!(
            call,
            BackendCall::WriteText { font, baseline: Baseline::Top, .. } if font.size == FontSize::SystemDefault
        )));
    }

    #[test]
    fn test_closed_path_replay() {
        let context = Context::new();
        context.closed_path(5.0, 6.0, |path| {
            path.line_to(7.0, 8.0);
        });

        let mut backend = RecordingBackend::new();
        context.draw(&mut backend, &DrawState::default());
        assert_eq!(
            backend.calls()[2..5],
            [
                BackendCall::MoveTo { x: 5.0, y: 6.0 },
                BackendCall::LineTo { x: 7.0, y: 8.0 },
                BackendCall::ClosePath,
            ]
        );
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(
            ContextKind::ClosedPath { x: 1.0, y: 2.0 }.to_string(),
            "ClosedPath(x=1, y=2)"
        );
        assert_eq!(ContextKind::Plain.to_string(), "Context()");
    }
}
