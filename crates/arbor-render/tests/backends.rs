//! Both shipped backends driven through the trait object.

use std::f32::consts::{FRAC_PI_2, PI};

use arbor_render::{
    BackendCall, CanvasBackend, Color, FillRule, PathBackend, PathCommand, PathPaint, Point,
    RecordingBackend,
};

/// A small scene: a translated, filled half-disc and a dashed outline.
fn draw_scene(backend: &mut dyn CanvasBackend) {
    backend.push_context();
    backend.translate(50.0, 50.0);
    backend.begin_path();
    backend.move_to(-10.0, 0.0);
    backend.arc(0.0, 0.0, 10.0, PI, 0.0, false);
    backend.close_path();
    backend.fill(Color::BLUE, FillRule::EvenOdd);
    backend.pop_context();

    backend.push_context();
    backend.begin_path();
    backend.rect(0.0, 0.0, 100.0, 100.0);
    backend.stroke(Color::BLACK, 1.0, Some(&[3.0, 1.0]));
    backend.pop_context();
}

#[test]
fn recording_backend_sees_calls_in_order() {
    let mut backend = RecordingBackend::new();
    draw_scene(&mut backend);

    assert_eq!(
        backend.names(),
        vec![
            "push_context",
            "translate",
            "begin_path",
            "move_to",
            "arc",
            "close_path",
            "fill",
            "pop_context",
            "push_context",
            "begin_path",
            "rect",
            "stroke",
            "pop_context",
        ]
    );
    assert!(matches!(
        backend.calls()[4],
        BackendCall::Arc {
            anticlockwise: false,
            ..
        }
    ));
}

#[test]
fn path_backend_flattens_scene() {
    let mut backend = PathBackend::new();
    draw_scene(&mut backend);

    let painted = backend.painted();
    assert_eq!(painted.len(), 2);

    let disc = &painted[0];
    assert_eq!(
        disc.paint,
        PathPaint::Fill {
            color: Color::BLUE,
            fill_rule: FillRule::EvenOdd
        }
    );
    assert_eq!(disc.path.commands()[0], PathCommand::MoveTo(Point::new(40.0, 50.0)));
    let curves = disc
        .path
        .commands()
        .iter()
        .filter(|c| matches!(c, PathCommand::CubicTo { .. }))
        .count();
    // Half a turn at no more than a quarter turn per curve.
    assert_eq!(curves, 2);
    assert!(matches!(disc.path.commands().last(), Some(PathCommand::Close)));

    let outline = &painted[1];
    assert!(matches!(
        &outline.paint,
        PathPaint::Stroke { line_dash: Some(dash), .. } if dash == &vec![3.0, 1.0]
    ));
    // The rectangle was drawn after the translate was popped.
    assert_eq!(outline.path.commands()[0], PathCommand::MoveTo(Point::ZERO));
    assert_eq!(backend.depth(), 0);
}

#[test]
fn path_backend_rotation_applies_to_later_points_only() {
    let mut backend = PathBackend::new();
    backend.move_to(10.0, 0.0);
    backend.rotate(FRAC_PI_2);
    backend.line_to(10.0, 0.0);

    let commands = backend.current_path().commands();
    assert_eq!(commands[0], PathCommand::MoveTo(Point::new(10.0, 0.0)));
    match commands[1] {
        PathCommand::LineTo(p) => {
            assert!(p.x.abs() < 1e-4);
            assert!((p.y - 10.0).abs() < 1e-4);
        }
        other => panic!("expected a line, got {other:?}"),
    }
}
