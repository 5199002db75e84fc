//! The canvas: a root drawing context bound to a native surface.

use std::fmt;
use std::ops::Deref;
use std::sync::Arc;

use arbor_core::logging::{span_names, targets};
use arbor_render::{CanvasBackend, DrawState, Font, Size};
use parking_lot::RwLock;

use super::context::{Context, ContextKind};

/// The platform side of a canvas.
pub trait NativeCanvas: Send + Sync {
    /// Schedule a repaint; the platform later replays the canvas with
    /// [`Canvas::draw`].
    fn redraw(&self);

    /// Measure a line of text in `font`.
    fn measure_text(&self, text: &str, font: &Font) -> Size;
}

pub(crate) struct CanvasShared {
    native: Arc<dyn NativeCanvas>,
    font: RwLock<Font>,
}

impl CanvasShared {
    pub(crate) fn redraw(&self) {
        tracing::trace!(target: targets::CANVAS, "canvas redraw requested");
        self.native.redraw();
    }

    pub(crate) fn font(&self) -> Font {
        self.font.read().clone()
    }
}

/// A drawing surface.
///
/// Derefs to its root [`Context`]: every change made directly on the canvas
/// requests a redraw, and every scoped block requests exactly one.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use std::sync::atomic::{AtomicUsize, Ordering};
///
/// use arbor::canvas::{Canvas, NativeCanvas};
/// use arbor_render::{Color, FillRule, Font, Size};
///
/// #[derive(Default)]
/// struct Surface(AtomicUsize);
///
/// impl NativeCanvas for Surface {
///     fn redraw(&self) {
///         self.0.fetch_add(1, Ordering::SeqCst);
///     }
///
///     fn measure_text(&self, text: &str, _font: &Font) -> Size {
///         Size::new(text.len() as f32 * 8.0, 16.0)
///     }
/// }
///
/// let surface = Arc::new(Surface::default());
/// let canvas = Canvas::new(surface.clone());
/// canvas.fill(Color::RED, FillRule::NonZero, |fill| {
///     fill.line_to(1.0, 1.0);
///     fill.line_to(2.0, 1.0);
/// });
/// assert_eq!(surface.0.load(Ordering::SeqCst), 1);
/// ```
pub struct Canvas {
    shared: Arc<CanvasShared>,
    root: Context,
}

impl Canvas {
    pub fn new(native: Arc<dyn NativeCanvas>) -> Self {
        let shared = Arc::new(CanvasShared {
            native,
            font: RwLock::new(Font::default()),
        });
        let root = Context::attached(ContextKind::Plain, Some(shared.clone()), true);
        Self { shared, root }
    }

    /// Use `font` as the canvas font.
    pub fn with_font(self, font: Font) -> Self {
        self.set_font(font);
        self
    }

    /// The font whose size [`Context::write_text`] falls back to.
    pub fn font(&self) -> Font {
        self.shared.font()
    }

    pub fn set_font(&self, font: Font) {
        *self.shared.font.write() = font;
    }

    /// The root context.
    pub fn context_root(&self) -> &Context {
        &self.root
    }

    /// Ask the platform to repaint.
    pub fn redraw(&self) {
        self.shared.redraw();
    }

    /// Measure `text`, in the canvas font unless one is given.
    pub fn measure_text(&self, text: &str, font: Option<&Font>) -> Size {
        match font {
            Some(font) => self.shared.native.measure_text(text, font),
            None => self.shared.native.measure_text(text, &self.font()),
        }
    }

    /// Replay the whole canvas against `backend`.
    pub fn draw(&self, backend: &mut dyn CanvasBackend) {
        let _span = tracing::debug_span!(
            target: targets::CANVAS,
            span_names::CANVAS_DRAW,
            objects = self.root.len()
        )
        .entered();
        self.root.draw(backend, &DrawState::default());
    }
}

impl Deref for Canvas {
    type Target = Context;

    fn deref(&self) -> &Context {
        &self.root
    }
}

impl fmt::Debug for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Canvas")
            .field("font", &*self.shared.font.read())
            .field("root", &self.root)
            .finish()
    }
}

static_assertions::assert_impl_all!(Canvas: Send, Sync);
