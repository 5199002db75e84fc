//! Declaration parsing and serialisation through the public API.

use arbor_render::{Color, FontSize, FontWeight};
use arbor_style::prelude::*;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_test_writer()
        .try_init();
}

#[test]
fn serialised_style_parses_back() {
    init_tracing();
    let pack = Pack::builder()
        .display(Display::Pack)
        .visibility(Visibility::Hidden)
        .direction(Direction::Column)
        .alignment(Alignment::Right)
        .width(0.0)
        .height(48.0)
        .flex(0.5)
        .padding(&[2.0, 4.0])
        .color(Color::from_rgb8(10, 20, 30))
        .background_color(Color::WHITE.with_alpha(0.25))
        .text_align(TextAlign::Justify)
        .text_direction(TextDirection::Rtl)
        .font_family("DejaVu Sans Mono")
        .font_size(10.5)
        .font_weight(FontWeight::Bold)
        .build()
        .unwrap();

    let css = pack.to_css();
    assert!(css.starts_with("display: pack; visibility: hidden; direction: column"));
    assert!(css.contains("width: 0; height: 48"));
    assert!(css.contains("font-family: 'DejaVu Sans Mono'"));

    assert_eq!(Pack::parse(&css).unwrap(), pack);
}

#[test]
fn explicit_zero_width_is_not_auto() {
    let zero = Pack::parse("width: 0").unwrap();
    let unset = Pack::parse("height: 10").unwrap();
    assert_eq!(zero.width(), Dimension::Px(0.0));
    assert_eq!(unset.width(), Dimension::Auto);
    assert!(zero.is_set(Property::Width));
    assert!(!unset.is_set(Property::Width));
}

#[test]
fn update_is_atomic() {
    init_tracing();
    let mut pack = Pack::parse("flex: 1; padding: 3").unwrap();
    let before = pack.clone();

    let err = pack.update("flex: 2; padding-left: -4").unwrap_err();
    assert_eq!(
        err.to_string(),
        "Invalid value for property 'padding-left': must not be negative, got -4"
    );
    assert_eq!(pack, before);

    pack.update("flex: 2; font-size: 9pt").unwrap();
    assert_eq!(pack.flex(), 2.0);
    assert_eq!(pack.font_size(), FontSize::Points(9.0));
    assert_eq!(pack.padding(), Edges::uniform(3.0));
}

#[test]
fn apply_accepts_underscored_names() {
    let mut pack = Pack::new();
    pack.apply("padding_bottom", "7px").unwrap();
    pack.apply("Background_Color", "#00f").unwrap();
    pack.apply("text_direction", "rtl").unwrap();
    assert_eq!(pack.padding_bottom(), 7.0);
    assert_eq!(pack.background_color(), Some(Color::BLUE));
    assert_eq!(pack.text_direction(), TextDirection::Rtl);

    assert_eq!(
        pack.apply("border", "1"),
        Err(Error::unknown_property("border"))
    );

    pack.apply("color", "none").unwrap();
    assert_eq!(pack.color(), None);
    pack.apply("width", "none").unwrap();
    assert_eq!(pack.width(), Dimension::Auto);
}

#[test]
fn parse_errors_report_position() {
    init_tracing();
    match Pack::parse("flex: 1;\ndirection row") {
        Err(Error::Parse { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected a parse error, got {other:?}"),
    }
}
