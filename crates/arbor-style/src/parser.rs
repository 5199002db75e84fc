//! Declaration parsing using the `cssparser` crate.
//!
//! Pack styles are written as CSS declaration lists without selectors or
//! braces: `direction: row; flex: 1; padding: 4 8`. Values are validated
//! by the [`Pack`] setters as they are parsed, so a failed parse reports
//! the same error a direct setter call would.

use arbor_core::logging::targets;
use arbor_render::{Color, FontSize, FontStyle, FontVariant, FontWeight};
use cssparser::{
    BasicParseErrorKind, Delimiter, ParseError as CssParseError, ParseErrorKind, Parser,
    ParserInput, Token,
};

use crate::error::{Error, Result};
use crate::pack::{Pack, Property};
use crate::types::{Alignment, Dimension, Direction, Display, TextAlign, TextDirection, Visibility};

type ParseResult<'i, T> = std::result::Result<T, CssParseError<'i, Error>>;

/// Points per CSS pixel.
const PT_PER_PX: f32 = 72.0 / 96.0;

/// Parse a declaration list into `pack`.
///
/// Parsing stops at the first bad declaration. Declarations before it have
/// already been applied, so callers that need atomic updates parse into a
/// copy.
pub(crate) fn parse_declarations(css: &str, pack: &mut Pack) -> Result<()> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    parser
        .parse_entirely(|p| parse_declaration_list(p, pack))
        .map_err(|e| report(into_error(e)))
}

/// Parse the value of a single property into `pack`.
pub(crate) fn parse_value(property: Property, value: &str, pack: &mut Pack) -> Result<()> {
    let mut input = ParserInput::new(value);
    let mut parser = Parser::new(&mut input);
    parser
        .parse_entirely(|p| parse_property_value(p, property, pack))
        .map_err(|e| report(into_error(e)))
}

fn report(error: Error) -> Error {
    tracing::warn!(target: targets::STYLE_PARSER, %error, "style declaration rejected");
    error
}

fn into_error(error: CssParseError<'_, Error>) -> Error {
    match error.kind {
        ParseErrorKind::Custom(error) => error,
        ParseErrorKind::Basic(kind) => {
            let message = match kind {
                BasicParseErrorKind::UnexpectedToken(token) => {
                    format!("unexpected token {token:?}")
                }
                BasicParseErrorKind::EndOfInput => "unexpected end of input".to_owned(),
                other => format!("{other:?}"),
            };
            Error::parse(message, error.location.line + 1, error.location.column)
        }
    }
}

fn custom<'i>(parser: &Parser<'i, '_>, error: Error) -> CssParseError<'i, Error> {
    parser.new_custom_error(error)
}

fn invalid<'i>(
    parser: &Parser<'i, '_>,
    property: Property,
    message: impl Into<String>,
) -> CssParseError<'i, Error> {
    custom(parser, Error::invalid_value(property.name(), message))
}

fn parse_declaration_list<'i>(
    parser: &mut Parser<'i, '_>,
    pack: &mut Pack,
) -> ParseResult<'i, ()> {
    loop {
        parser.skip_whitespace();
        if parser.is_exhausted() {
            return Ok(());
        }
        // Empty declarations.
        if parser.try_parse(|p| p.expect_semicolon()).is_ok() {
            continue;
        }

        let name = parser.expect_ident_cloned()?;
        let property = Property::from_name(&name)
            .ok_or_else(|| custom(parser, Error::unknown_property(name.to_string())))?;
        parser.expect_colon()?;
        parser.parse_until_before(Delimiter::Semicolon, |p| {
            parse_property_value(p, property, pack)
        })?;

        if !parser.is_exhausted() {
            parser.expect_semicolon()?;
        }
    }
}

fn parse_property_value<'i>(
    parser: &mut Parser<'i, '_>,
    property: Property,
    pack: &mut Pack,
) -> ParseResult<'i, ()> {
    let applied = match property {
        Property::Display => {
            pack.set_display(keyword(parser, property, Display::from_css)?);
            Ok(())
        }
        Property::Visibility => {
            pack.set_visibility(keyword(parser, property, Visibility::from_css)?);
            Ok(())
        }
        Property::Direction => {
            pack.set_direction(keyword(parser, property, Direction::from_css)?);
            Ok(())
        }
        Property::TextDirection => {
            pack.set_text_direction(keyword(parser, property, TextDirection::from_css)?);
            Ok(())
        }
        Property::Alignment => {
            pack.set_alignment(optional_keyword(parser, property, Alignment::from_css)?);
            Ok(())
        }
        Property::TextAlign => {
            pack.set_text_align(optional_keyword(parser, property, TextAlign::from_css)?);
            Ok(())
        }
        Property::Width => {
            let width = dimension(parser, property)?;
            pack.set_width(width)
        }
        Property::Height => {
            let height = dimension(parser, property)?;
            pack.set_height(height)
        }
        Property::Flex => {
            let flex = number(parser, property)?;
            pack.set_flex(flex)
        }
        Property::PaddingTop => {
            let value = length(parser, property)?;
            pack.set_padding_top(value)
        }
        Property::PaddingRight => {
            let value = length(parser, property)?;
            pack.set_padding_right(value)
        }
        Property::PaddingBottom => {
            let value = length(parser, property)?;
            pack.set_padding_bottom(value)
        }
        Property::PaddingLeft => {
            let value = length(parser, property)?;
            pack.set_padding_left(value)
        }
        Property::Padding => {
            let mut values = vec![length(parser, property)?];
            while !parser.is_exhausted() {
                values.push(length(parser, property)?);
            }
            pack.set_padding(&values)
        }
        Property::Color => {
            pack.set_color(optional_color(parser, property)?);
            Ok(())
        }
        Property::BackgroundColor => {
            pack.set_background_color(optional_color(parser, property)?);
            Ok(())
        }
        Property::FontFamily => {
            let family = font_family(parser, property)?;
            pack.set_font_family(family)
        }
        Property::FontStyle => {
            pack.set_font_style(keyword(parser, property, FontStyle::from_keyword)?);
            Ok(())
        }
        Property::FontVariant => {
            pack.set_font_variant(keyword(parser, property, FontVariant::from_keyword)?);
            Ok(())
        }
        Property::FontWeight => {
            pack.set_font_weight(keyword(parser, property, FontWeight::from_keyword)?);
            Ok(())
        }
        Property::FontSize => {
            let size = font_size(parser, property)?;
            pack.set_font_size(size)
        }
    };
    applied.map_err(|error| custom(parser, error))?;
    parser.expect_exhausted()?;
    Ok(())
}

/// Parse an identifier through `lookup`, which receives it lower-cased.
fn keyword<'i, T>(
    parser: &mut Parser<'i, '_>,
    property: Property,
    lookup: impl Fn(&str) -> Option<T>,
) -> ParseResult<'i, T> {
    let ident = parser.expect_ident_cloned()?;
    lookup(&ident.to_ascii_lowercase())
        .ok_or_else(|| invalid(parser, property, format!("unknown keyword '{ident}'")))
}

/// Like [`keyword`], with `none` meaning unset.
fn optional_keyword<'i, T>(
    parser: &mut Parser<'i, '_>,
    property: Property,
    lookup: impl Fn(&str) -> Option<T>,
) -> ParseResult<'i, Option<T>> {
    if parser
        .try_parse(|p| p.expect_ident_matching("none"))
        .is_ok()
    {
        return Ok(None);
    }
    keyword(parser, property, lookup).map(Some)
}

/// A bare number.
fn number<'i>(parser: &mut Parser<'i, '_>, property: Property) -> ParseResult<'i, f32> {
    let token = parser.next()?.clone();
    match token {
        Token::Number { value, .. } => Ok(value),
        other => Err(invalid(parser, property, format!("expected a number, got {other:?}"))),
    }
}

/// A number, optionally with a `px` unit.
fn length<'i>(parser: &mut Parser<'i, '_>, property: Property) -> ParseResult<'i, f32> {
    let token = parser.next()?.clone();
    match token {
        Token::Number { value, .. } => Ok(value),
        Token::Dimension { value, ref unit, .. } if unit.eq_ignore_ascii_case("px") => Ok(value),
        other => Err(invalid(parser, property, format!("expected a length, got {other:?}"))),
    }
}

fn dimension<'i>(parser: &mut Parser<'i, '_>, property: Property) -> ParseResult<'i, Dimension> {
    let auto = parser
        .try_parse(|p| p.expect_ident_matching("auto"))
        .or_else(|_| parser.try_parse(|p| p.expect_ident_matching("none")));
    if auto.is_ok() {
        return Ok(Dimension::Auto);
    }
    length(parser, property).map(Dimension::Px)
}

fn font_size<'i>(parser: &mut Parser<'i, '_>, property: Property) -> ParseResult<'i, FontSize> {
    if parser
        .try_parse(|p| p.expect_ident_matching("system"))
        .is_ok()
    {
        return Ok(FontSize::SystemDefault);
    }
    let token = parser.next()?.clone();
    match token {
        Token::Number { value, .. } => Ok(FontSize::Points(value)),
        Token::Dimension { value, ref unit, .. } if unit.eq_ignore_ascii_case("pt") => {
            Ok(FontSize::Points(value))
        }
        Token::Dimension { value, ref unit, .. } if unit.eq_ignore_ascii_case("px") => {
            Ok(FontSize::Points(value * PT_PER_PX))
        }
        other => Err(invalid(
            parser,
            property,
            format!("expected a font size, got {other:?}"),
        )),
    }
}

/// The first family of a family list. Unquoted names may span several
/// identifiers (`Times New Roman`).
fn font_family<'i>(parser: &mut Parser<'i, '_>, property: Property) -> ParseResult<'i, String> {
    let mut words: Vec<String> = vec![];
    loop {
        if parser.is_exhausted() {
            break;
        }
        let token = parser.next()?.clone();
        match token {
            Token::QuotedString(name) if words.is_empty() => words.push(name.to_string()),
            Token::Ident(word) => words.push(word.to_string()),
            // Fallback families are accepted but only the first is kept.
            Token::Comma => {
                while !parser.is_exhausted() {
                    parser.next()?;
                }
                break;
            }
            other => {
                return Err(invalid(
                    parser,
                    property,
                    format!("expected a family name, got {other:?}"),
                ));
            }
        }
    }
    if words.is_empty() {
        return Err(invalid(parser, property, "expected a family name"));
    }
    Ok(words.join(" "))
}

fn optional_color<'i>(
    parser: &mut Parser<'i, '_>,
    property: Property,
) -> ParseResult<'i, Option<Color>> {
    if parser
        .try_parse(|p| p.expect_ident_matching("none"))
        .is_ok()
    {
        return Ok(None);
    }
    color(parser, property).map(Some)
}

fn color<'i>(parser: &mut Parser<'i, '_>, property: Property) -> ParseResult<'i, Color> {
    let token = parser.next()?.clone();
    match token {
        Token::Hash(hash) | Token::IDHash(hash) => Color::from_hex(&hash)
            .ok_or_else(|| invalid(parser, property, format!("invalid hex color '#{hash}'"))),
        Token::Ident(name) => named_color(&name)
            .ok_or_else(|| invalid(parser, property, format!("unknown color '{name}'"))),
        Token::Function(name)
            if name.eq_ignore_ascii_case("rgb") || name.eq_ignore_ascii_case("rgba") =>
        {
            parser.parse_nested_block(|p| {
                let r = color_channel(p, property)?;
                p.expect_comma()?;
                let g = color_channel(p, property)?;
                p.expect_comma()?;
                let b = color_channel(p, property)?;
                let a = if p.try_parse(|p| p.expect_comma()).is_ok() {
                    alpha_channel(p, property)?
                } else {
                    1.0
                };
                Ok::<_, CssParseError<'i, Error>>(Color::new(r, g, b, a))
            })
        }
        other => Err(invalid(parser, property, format!("expected a color, got {other:?}"))),
    }
}

fn named_color(name: &str) -> Option<Color> {
    let color = match name.to_ascii_lowercase().as_str() {
        "transparent" => Color::TRANSPARENT,
        "black" => Color::BLACK,
        "white" => Color::WHITE,
        "red" => Color::RED,
        "green" => Color::GREEN,
        "blue" => Color::BLUE,
        "yellow" => Color::YELLOW,
        "cyan" | "aqua" => Color::CYAN,
        "magenta" | "fuchsia" => Color::MAGENTA,
        "gray" | "grey" => Color::GRAY,
        _ => return None,
    };
    Some(color)
}

fn color_channel<'i>(parser: &mut Parser<'i, '_>, property: Property) -> ParseResult<'i, f32> {
    let token = parser.next()?.clone();
    let channel = match token {
        Token::Number { value, .. } => value / 255.0,
        Token::Percentage { unit_value, .. } => unit_value,
        other => {
            return Err(invalid(
                parser,
                property,
                format!("expected a color channel, got {other:?}"),
            ));
        }
    };
    Ok(channel.clamp(0.0, 1.0))
}

fn alpha_channel<'i>(parser: &mut Parser<'i, '_>, property: Property) -> ParseResult<'i, f32> {
    let token = parser.next()?.clone();
    let alpha = match token {
        Token::Number { value, .. } => value,
        Token::Percentage { unit_value, .. } => unit_value,
        other => {
            return Err(invalid(
                parser,
                property,
                format!("expected an alpha value, got {other:?}"),
            ));
        }
    };
    Ok(alpha.clamp(0.0, 1.0))
}
