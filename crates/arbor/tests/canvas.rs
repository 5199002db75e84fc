//! Integration tests for the canvas drawing model.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use arbor::canvas::{Canvas, ContextKind, DrawingObject, NativeCanvas, Sweep};
use arbor_render::{
    BackendCall, Color, FillRule, Font, FontSize, PathBackend, PathPaint, RecordingBackend, Rect,
    Size,
};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_test_writer()
        .try_init();
}

#[derive(Default)]
struct Surface {
    redraws: AtomicUsize,
}

impl Surface {
    fn redraws(&self) -> usize {
        self.redraws.load(Ordering::SeqCst)
    }
}

impl NativeCanvas for Surface {
    fn redraw(&self) {
        self.redraws.fetch_add(1, Ordering::SeqCst);
    }

    fn measure_text(&self, text: &str, font: &Font) -> Size {
        let size = match font.size {
            FontSize::Points(points) => points,
            FontSize::SystemDefault => 12.0,
        };
        Size::new(text.chars().count() as f32 * size / 2.0, size)
    }
}

fn canvas() -> (Arc<Surface>, Canvas) {
    let surface = Arc::new(Surface::default());
    let canvas = Canvas::new(surface.clone());
    (surface, canvas)
}

#[test]
fn fill_block_redraws_once() {
    init_tracing();
    let (surface, canvas) = canvas();

    canvas.fill(Color::RED, FillRule::NonZero, |fill| {
        fill.move_to(0.0, 0.0);
        fill.line_to(10.0, 0.0);
        fill.line_to(10.0, 10.0);
        fill.line_to(0.0, 10.0);
    });

    assert_eq!(surface.redraws(), 1);
    assert_eq!(canvas.len(), 1);
    let block = canvas.objects()[0].clone();
    let fill = block.as_context().unwrap();
    assert_eq!(fill.len(), 4);
    assert_eq!(
        *fill.kind(),
        ContextKind::Fill {
            color: Color::RED,
            fill_rule: FillRule::NonZero
        }
    );
}

#[test]
fn replay_wraps_fill_in_a_saved_state() {
    let (_surface, canvas) = canvas();
    canvas.fill(Color::BLUE, FillRule::EvenOdd, |fill| {
        fill.move_to(0.0, 0.0);
        fill.line_to(5.0, 5.0);
    });

    let mut backend = RecordingBackend::new();
    canvas.draw(&mut backend);

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
            color: Color::BLUE,
            fill_rule: FillRule::EvenOdd
        }
    );
}

#[test]
fn text_inside_a_fill_uses_the_fill_color() {
    let (_surface, canvas) = canvas();
    canvas.fill(Color::RED, FillRule::NonZero, |fill| {
        fill.write_text("hi", 1.0, 2.0, None, Default::default());
    });

    let mut backend = RecordingBackend::new();
    canvas.draw(&mut backend);

    let text = backend
        .calls()
        .into_iter()
        .find(|call| matches!(call, BackendCall::WriteText { .. }));
    match text {
        Some(BackendCall::WriteText { fill_color, .. }) => assert_eq!(fill_color, Color::RED),
        other => panic!("expected a text call, got {other:?}"),
    }
}

#[test]
fn removing_an_object_removes_it_from_replay() {
    let (surface, canvas) = canvas();
    let rect = canvas.rect(0.0, 0.0, 4.0, 4.0);
    canvas.arc(2.0, 2.0, 1.0, Sweep::FULL);

    assert!(canvas.remove(&rect));
    assert!(!canvas.remove(&rect));
    assert_eq!(surface.redraws(), 3);

    let mut backend = RecordingBackend::new();
    canvas.draw(&mut backend);
    assert_eq!(backend.names(), vec!["push_context", "arc", "pop_context"]);
}

#[test]
fn stroke_geometry_is_transformed() {
    let (_surface, canvas) = canvas();
    canvas.translate(10.0, 20.0);
    canvas.stroke(Color::BLACK, 3.0, Some(vec![2.0, 1.0]), |stroke| {
        stroke.move_to(0.0, 0.0);
        stroke.line_to(30.0, 40.0);
    });

    let mut backend = PathBackend::new();
    canvas.draw(&mut backend);

    assert_eq!(backend.depth(), 0);
    assert_eq!(backend.painted().len(), 1);
    assert_eq!(
        backend.painted()[0].paint,
        PathPaint::Stroke {
            color: Color::BLACK,
            line_width: 3.0,
            line_dash: Some(vec![2.0, 1.0]),
        }
    );
    assert_eq!(backend.bounds(), Some(Rect::new(10.0, 20.0, 30.0, 40.0)));
}

#[test]
fn closed_path_starts_and_closes() {
    let (_surface, canvas) = canvas();
    canvas.closed_path(1.0, 1.0, |path| {
        path.line_to(5.0, 1.0);
        path.line_to(5.0, 5.0);
    });

    let mut backend = RecordingBackend::new();
    canvas.draw(&mut backend);

    assert_eq!(
        backend.names(),
        vec![
            "push_context",
            "push_context",
            "move_to",
            "line_to",
            "line_to",
            "close_path",
            "pop_context",
            "pop_context",
        ]
    );
    assert_eq!(canvas.objects()[0].to_string(), "ClosedPath(x=1, y=1)");
}

#[test]
fn measure_text_defaults_to_canvas_font() {
    let (_surface, canvas) = canvas();
    let canvas = canvas.with_font(Font::new("serif", FontSize::Points(20.0)));

    assert_eq!(canvas.measure_text("abcd", None), Size::new(40.0, 20.0));

    let small = Font::new("serif", FontSize::Points(10.0));
    assert_eq!(canvas.measure_text("abcd", Some(&small)), Size::new(20.0, 10.0));
}

#[test]
fn drawing_objects_describe_themselves() {
    let (_surface, canvas) = canvas();
    let line = canvas.line_to(3.0, 4.5);
    assert_eq!(line.to_string(), "LineTo(x=3, y=4.5)");
    assert!(matches!(*line, DrawingObject::LineTo { .. }));

    canvas.clear();
    assert!(canvas.is_empty());
}

#[test]
fn nested_context_redraws_after_its_block_returns() {
    let (surface, canvas) = canvas();
    let block = canvas.fill(Color::RED, FillRule::NonZero, |fill| {
        fill.move_to(0.0, 0.0);
        fill.line_to(10.0, 0.0);
    });
    assert_eq!(surface.redraws(), 1);

    let fill = block.as_context().unwrap();
    let corner = fill.line_to(10.0, 10.0);
    assert_eq!(surface.redraws(), 2);
    assert!(fill.remove(&corner));
    assert_eq!(surface.redraws(), 3);

    fill.context(|inner| {
        inner.move_to(1.0, 1.0);
        inner.line_to(2.0, 2.0);
    });
    assert_eq!(surface.redraws(), 4);
    assert_eq!(fill.len(), 3);
}
