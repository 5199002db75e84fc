//! The pack style: box layout properties plus the color and font
//! properties native widgets read.

use arbor_render::text::SYSTEM;
use arbor_render::{Color, Font, FontSize, FontStyle, FontVariant, FontWeight};

use crate::builder::PackBuilder;
use crate::error::{Error, Result};
use crate::parser;
use crate::types::{Alignment, Dimension, Direction, Display, Edges, TextAlign, TextDirection, Visibility};

/// A pack style property name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Property {
    Display,
    Visibility,
    Direction,
    Alignment,
    Width,
    Height,
    Flex,
    PaddingTop,
    PaddingRight,
    PaddingBottom,
    PaddingLeft,
    Color,
    BackgroundColor,
    TextAlign,
    TextDirection,
    FontFamily,
    FontStyle,
    FontVariant,
    FontWeight,
    FontSize,
    /// Shorthand for the four padding sides.
    Padding,
}

impl Property {
    /// Every longhand property, in serialisation order.
    pub const LONGHANDS: &'static [Property] = &[
        Self::Display,
        Self::Visibility,
        Self::Direction,
        Self::Alignment,
        Self::Width,
        Self::Height,
        Self::Flex,
        Self::PaddingTop,
        Self::PaddingRight,
        Self::PaddingBottom,
        Self::PaddingLeft,
        Self::Color,
        Self::BackgroundColor,
        Self::TextAlign,
        Self::TextDirection,
        Self::FontFamily,
        Self::FontStyle,
        Self::FontVariant,
        Self::FontWeight,
        Self::FontSize,
    ];

    /// The hyphenated declaration name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Display => "display",
            Self::Visibility => "visibility",
            Self::Direction => "direction",
            Self::Alignment => "alignment",
            Self::Width => "width",
            Self::Height => "height",
            Self::Flex => "flex",
            Self::PaddingTop => "padding-top",
            Self::PaddingRight => "padding-right",
            Self::PaddingBottom => "padding-bottom",
            Self::PaddingLeft => "padding-left",
            Self::Color => "color",
            Self::BackgroundColor => "background-color",
            Self::TextAlign => "text-align",
            Self::TextDirection => "text-direction",
            Self::FontFamily => "font-family",
            Self::FontStyle => "font-style",
            Self::FontVariant => "font-variant",
            Self::FontWeight => "font-weight",
            Self::FontSize => "font-size",
            Self::Padding => "padding",
        }
    }

    /// Look up a property by name. Underscores and hyphens are
    /// interchangeable and case is ignored.
    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().replace('_', "-").to_ascii_lowercase();
        if normalized == "padding" {
            return Some(Self::Padding);
        }
        Self::LONGHANDS
            .iter()
            .copied()
            .find(|property| property.name() == normalized)
    }

    pub fn is_shorthand(&self) -> bool {
        matches!(self, Self::Padding)
    }

    /// Whether a change to this property can move or resize boxes.
    pub fn affects_layout(&self) -> bool {
        matches!(
            self,
            Self::Display
                | Self::Direction
                | Self::Alignment
                | Self::Width
                | Self::Height
                | Self::Flex
                | Self::PaddingTop
                | Self::PaddingRight
                | Self::PaddingBottom
                | Self::PaddingLeft
                | Self::TextDirection
                | Self::Padding
        )
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Style for a node laid out by the pack algorithm.
///
/// Every property is optional: an unset property reads as its default and
/// is left out of [`Pack::to_css`]. Setters validate their input, so a
/// `Pack` never holds a negative size or a non-finite flex.
///
/// ```
/// use arbor_style::{Dimension, Direction, Pack};
///
/// let mut pack = Pack::parse("direction: column; width: 120; padding: 4 8").unwrap();
/// assert_eq!(pack.direction(), Direction::Column);
/// assert_eq!(pack.width(), Dimension::Px(120.0));
/// assert_eq!(pack.padding().left, 8.0);
///
/// pack.apply("flex", "1").unwrap();
/// assert!(pack.apply("flex", "-1").is_err());
/// assert_eq!(pack.flex(), 1.0);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Pack {
    display: Option<Display>,
    visibility: Option<Visibility>,
    direction: Option<Direction>,
    alignment: Option<Alignment>,
    width: Option<Dimension>,
    height: Option<Dimension>,
    flex: Option<f32>,
    padding_top: Option<f32>,
    padding_right: Option<f32>,
    padding_bottom: Option<f32>,
    padding_left: Option<f32>,
    color: Option<Color>,
    background_color: Option<Color>,
    text_align: Option<TextAlign>,
    text_direction: Option<TextDirection>,
    font_family: Option<String>,
    font_style: Option<FontStyle>,
    font_variant: Option<FontVariant>,
    font_weight: Option<FontWeight>,
    font_size: Option<FontSize>,
}

fn check_length(property: Property, value: f32) -> Result<f32> {
    if !value.is_finite() {
        return Err(Error::invalid_value(property.name(), "must be a finite number"));
    }
    if value < 0.0 {
        return Err(Error::invalid_value(
            property.name(),
            format!("must not be negative, got {value}"),
        ));
    }
    Ok(value)
}

fn check_dimension(property: Property, value: Dimension) -> Result<Dimension> {
    match value {
        Dimension::Auto => Ok(value),
        Dimension::Px(px) => check_length(property, px).map(Dimension::Px),
    }
}

impl Pack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fluent builder.
    pub fn builder() -> PackBuilder {
        PackBuilder::new()
    }

    /// Parse a declaration list such as `"direction: row; flex: 1"`.
    pub fn parse(css: &str) -> Result<Self> {
        let mut pack = Self::new();
        parser::parse_declarations(css, &mut pack)?;
        Ok(pack)
    }

    /// Apply a declaration list on top of the current values.
    ///
    /// Either every declaration is applied or, on error, none is.
    pub fn update(&mut self, css: &str) -> Result<()> {
        let mut updated = self.clone();
        parser::parse_declarations(css, &mut updated)?;
        *self = updated;
        Ok(())
    }

    /// Set one property from its textual value.
    pub fn apply(&mut self, name: &str, value: &str) -> Result<()> {
        let property = Property::from_name(name).ok_or_else(|| Error::unknown_property(name))?;
        let mut updated = self.clone();
        parser::parse_value(property, value, &mut updated)?;
        *self = updated;
        Ok(())
    }

    /// Return a property to its unset state.
    pub fn reset(&mut self, name: &str) -> Result<()> {
        let property = Property::from_name(name).ok_or_else(|| Error::unknown_property(name))?;
        self.reset_property(property);
        Ok(())
    }

    pub fn reset_property(&mut self, property: Property) {
        match property {
            Property::Display => self.display = None,
            Property::Visibility => self.visibility = None,
            Property::Direction => self.direction = None,
            Property::Alignment => self.alignment = None,
            Property::Width => self.width = None,
            Property::Height => self.height = None,
            Property::Flex => self.flex = None,
            Property::PaddingTop => self.padding_top = None,
            Property::PaddingRight => self.padding_right = None,
            Property::PaddingBottom => self.padding_bottom = None,
            Property::PaddingLeft => self.padding_left = None,
            Property::Color => self.color = None,
            Property::BackgroundColor => self.background_color = None,
            Property::TextAlign => self.text_align = None,
            Property::TextDirection => self.text_direction = None,
            Property::FontFamily => self.font_family = None,
            Property::FontStyle => self.font_style = None,
            Property::FontVariant => self.font_variant = None,
            Property::FontWeight => self.font_weight = None,
            Property::FontSize => self.font_size = None,
            Property::Padding => {
                self.padding_top = None;
                self.padding_right = None;
                self.padding_bottom = None;
                self.padding_left = None;
            }
        }
    }

    /// Whether a property has been set explicitly. The padding shorthand
    /// counts as set when any side is.
    pub fn is_set(&self, property: Property) -> bool {
        match property {
            Property::Display => self.display.is_some(),
            Property::Visibility => self.visibility.is_some(),
            Property::Direction => self.direction.is_some(),
            Property::Alignment => self.alignment.is_some(),
            Property::Width => self.width.is_some(),
            Property::Height => self.height.is_some(),
            Property::Flex => self.flex.is_some(),
            Property::PaddingTop => self.padding_top.is_some(),
            Property::PaddingRight => self.padding_right.is_some(),
            Property::PaddingBottom => self.padding_bottom.is_some(),
            Property::PaddingLeft => self.padding_left.is_some(),
            Property::Color => self.color.is_some(),
            Property::BackgroundColor => self.background_color.is_some(),
            Property::TextAlign => self.text_align.is_some(),
            Property::TextDirection => self.text_direction.is_some(),
            Property::FontFamily => self.font_family.is_some(),
            Property::FontStyle => self.font_style.is_some(),
            Property::FontVariant => self.font_variant.is_some(),
            Property::FontWeight => self.font_weight.is_some(),
            Property::FontSize => self.font_size.is_some(),
            Property::Padding => [
                Property::PaddingTop,
                Property::PaddingRight,
                Property::PaddingBottom,
                Property::PaddingLeft,
            ]
            .iter()
            .any(|side| self.is_set(*side)),
        }
    }

    /// The textual value of a set longhand property.
    pub fn value_css(&self, property: Property) -> Option<String> {
        let css = match property {
            Property::Display => self.display?.to_string(),
            Property::Visibility => self.visibility?.to_string(),
            Property::Direction => self.direction?.to_string(),
            Property::Alignment => self.alignment?.to_string(),
            Property::Width => self.width?.to_string(),
            Property::Height => self.height?.to_string(),
            Property::Flex => self.flex?.to_string(),
            Property::PaddingTop => self.padding_top?.to_string(),
            Property::PaddingRight => self.padding_right?.to_string(),
            Property::PaddingBottom => self.padding_bottom?.to_string(),
            Property::PaddingLeft => self.padding_left?.to_string(),
            Property::Color => self.color?.to_string(),
            Property::BackgroundColor => self.background_color?.to_string(),
            Property::TextAlign => self.text_align?.to_string(),
            Property::TextDirection => self.text_direction?.to_string(),
            Property::FontFamily => {
                let family = self.font_family.as_deref()?;
                if family.contains(' ') {
                    format!("'{family}'")
                } else {
                    family.to_owned()
                }
            }
            Property::FontStyle => self.font_style?.to_string(),
            Property::FontVariant => self.font_variant?.to_string(),
            Property::FontWeight => self.font_weight?.to_string(),
            Property::FontSize => self.font_size?.to_string(),
            Property::Padding => return None,
        };
        Some(css)
    }

    /// Serialise the explicitly set properties as a declaration list.
    ///
    /// The output parses back to an equal `Pack` as long as colors have
    /// 8-bit channels.
    pub fn to_css(&self) -> String {
        Property::LONGHANDS
            .iter()
            .filter_map(|property| {
                self.value_css(*property)
                    .map(|value| format!("{}: {}", property.name(), value))
            })
            .collect::<Vec<_>>()
            .join("; ")
    }

    // Layout properties.

    pub fn display(&self) -> Display {
        self.display.unwrap_or_default()
    }

    pub fn set_display(&mut self, display: Display) {
        self.display = Some(display);
    }

    pub fn visibility(&self) -> Visibility {
        self.visibility.unwrap_or_default()
    }

    pub fn set_visibility(&mut self, visibility: Visibility) {
        self.visibility = Some(visibility);
    }

    pub fn direction(&self) -> Direction {
        self.direction.unwrap_or_default()
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = Some(direction);
    }

    /// Cross-axis alignment. `None` aligns children to the start.
    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: Option<Alignment>) {
        self.alignment = alignment;
    }

    pub fn width(&self) -> Dimension {
        self.width.unwrap_or_default()
    }

    /// Set an explicit width. Negative or non-finite sizes are rejected.
    pub fn set_width(&mut self, width: impl Into<Dimension>) -> Result<()> {
        self.width = Some(check_dimension(Property::Width, width.into())?);
        Ok(())
    }

    pub fn height(&self) -> Dimension {
        self.height.unwrap_or_default()
    }

    /// Set an explicit height. Negative or non-finite sizes are rejected.
    pub fn set_height(&mut self, height: impl Into<Dimension>) -> Result<()> {
        self.height = Some(check_dimension(Property::Height, height.into())?);
        Ok(())
    }

    /// Flex weight; 0 unless set.
    pub fn flex(&self) -> f32 {
        self.flex.unwrap_or(0.0)
    }

    pub fn set_flex(&mut self, flex: f32) -> Result<()> {
        self.flex = Some(check_length(Property::Flex, flex)?);
        Ok(())
    }

    pub fn padding_top(&self) -> f32 {
        self.padding_top.unwrap_or(0.0)
    }

    pub fn set_padding_top(&mut self, value: f32) -> Result<()> {
        self.padding_top = Some(check_length(Property::PaddingTop, value)?);
        Ok(())
    }

    pub fn padding_right(&self) -> f32 {
        self.padding_right.unwrap_or(0.0)
    }

    pub fn set_padding_right(&mut self, value: f32) -> Result<()> {
        self.padding_right = Some(check_length(Property::PaddingRight, value)?);
        Ok(())
    }

    pub fn padding_bottom(&self) -> f32 {
        self.padding_bottom.unwrap_or(0.0)
    }

    pub fn set_padding_bottom(&mut self, value: f32) -> Result<()> {
        self.padding_bottom = Some(check_length(Property::PaddingBottom, value)?);
        Ok(())
    }

    pub fn padding_left(&self) -> f32 {
        self.padding_left.unwrap_or(0.0)
    }

    pub fn set_padding_left(&mut self, value: f32) -> Result<()> {
        self.padding_left = Some(check_length(Property::PaddingLeft, value)?);
        Ok(())
    }

    /// All four padding sides.
    pub fn padding(&self) -> Edges {
        Edges::new(
            self.padding_top(),
            self.padding_right(),
            self.padding_bottom(),
            self.padding_left(),
        )
    }

    /// Set padding from 1 to 4 values, in top, right, bottom, left order.
    pub fn set_padding(&mut self, values: &[f32]) -> Result<()> {
        let edges = Edges::from_shorthand(values).ok_or_else(|| {
            Error::invalid_value(
                Property::Padding.name(),
                format!("expected 1 to 4 values, got {}", values.len()),
            )
        })?;
        let top = check_length(Property::Padding, edges.top)?;
        let right = check_length(Property::Padding, edges.right)?;
        let bottom = check_length(Property::Padding, edges.bottom)?;
        let left = check_length(Property::Padding, edges.left)?;
        self.padding_top = Some(top);
        self.padding_right = Some(right);
        self.padding_bottom = Some(bottom);
        self.padding_left = Some(left);
        Ok(())
    }

    pub fn text_direction(&self) -> TextDirection {
        self.text_direction.unwrap_or_default()
    }

    pub fn set_text_direction(&mut self, direction: TextDirection) {
        self.text_direction = Some(direction);
    }

    // Presentation properties.

    pub fn color(&self) -> Option<Color> {
        self.color
    }

    pub fn set_color(&mut self, color: Option<Color>) {
        self.color = color;
    }

    pub fn background_color(&self) -> Option<Color> {
        self.background_color
    }

    pub fn set_background_color(&mut self, color: Option<Color>) {
        self.background_color = color;
    }

    pub fn text_align(&self) -> Option<TextAlign> {
        self.text_align
    }

    pub fn set_text_align(&mut self, align: Option<TextAlign>) {
        self.text_align = align;
    }

    pub fn font_family(&self) -> &str {
        self.font_family.as_deref().unwrap_or(SYSTEM)
    }

    pub fn set_font_family(&mut self, family: impl Into<String>) -> Result<()> {
        let family = family.into();
        let trimmed = family.trim();
        if trimmed.is_empty() {
            return Err(Error::invalid_value(
                Property::FontFamily.name(),
                "family name must not be empty",
            ));
        }
        self.font_family = Some(trimmed.to_owned());
        Ok(())
    }

    pub fn font_style(&self) -> FontStyle {
        self.font_style.unwrap_or_default()
    }

    pub fn set_font_style(&mut self, style: FontStyle) {
        self.font_style = Some(style);
    }

    pub fn font_variant(&self) -> FontVariant {
        self.font_variant.unwrap_or_default()
    }

    pub fn set_font_variant(&mut self, variant: FontVariant) {
        self.font_variant = Some(variant);
    }

    pub fn font_weight(&self) -> FontWeight {
        self.font_weight.unwrap_or_default()
    }

    pub fn set_font_weight(&mut self, weight: FontWeight) {
        self.font_weight = Some(weight);
    }

    pub fn font_size(&self) -> FontSize {
        self.font_size.unwrap_or_default()
    }

    pub fn set_font_size(&mut self, size: FontSize) -> Result<()> {
        if let FontSize::Points(points) = size {
            if !(points.is_finite() && points > 0.0) {
                return Err(Error::invalid_value(
                    Property::FontSize.name(),
                    format!("must be a positive point size, got {points}"),
                ));
            }
        }
        self.font_size = Some(size);
        Ok(())
    }

    /// The font described by the `font_*` properties.
    pub fn font(&self) -> Font {
        Font::new(self.font_family(), self.font_size())
            .with_style(self.font_style())
            .with_variant(self.font_variant())
            .with_weight(self.font_weight())
    }
}

static_assertions::assert_impl_all!(Pack: Send, Sync, Clone);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let pack = Pack::new();
        assert_eq!(pack.display(), Display::Pack);
        assert_eq!(pack.visibility(), Visibility::Visible);
        assert_eq!(pack.direction(), Direction::Row);
        assert_eq!(pack.alignment(), None);
        assert_eq!(pack.width(), Dimension::Auto);
        assert_eq!(pack.flex(), 0.0);
        assert_eq!(pack.padding(), Edges::default());
        assert_eq!(pack.text_direction(), TextDirection::Ltr);
        assert_eq!(pack.font(), Font::default());
        assert_eq!(pack.to_css(), "");
    }

    #[test]
    fn test_validated_setters() {
        let mut pack = Pack::new();
        assert!(pack.set_width(-1.0).is_err());
        assert!(pack.set_flex(f32::NAN).is_err());
        assert!(pack.set_padding_left(-0.5).is_err());
        assert!(pack.set_font_size(FontSize::Points(0.0)).is_err());
        assert!(pack.set_font_family("   ").is_err());
        assert_eq!(pack, Pack::new());

        pack.set_width(0.0).unwrap();
        assert_eq!(pack.width(), Dimension::Px(0.0));
        pack.set_width(Dimension::Auto).unwrap();
        assert!(pack.is_set(Property::Width));
        assert_eq!(pack.width(), Dimension::Auto);
    }

    #[test]
    fn test_padding_shorthand_rejects_partial() {
        let mut pack = Pack::new();
        assert_eq!(
            pack.set_padding(&[1.0, -2.0]),
            Err(Error::invalid_value(
                "padding",
                "must not be negative, got -2"
            ))
        );
        assert!(!pack.is_set(Property::Padding));
        assert!(pack.set_padding(&[]).is_err());

        pack.set_padding(&[1.0, 2.0, 3.0]).unwrap();
        assert_eq!(pack.padding(), Edges::new(1.0, 2.0, 3.0, 2.0));
    }

    #[test]
    fn test_property_names() {
        assert_eq!(Property::from_name("padding_top"), Some(Property::PaddingTop));
        assert_eq!(Property::from_name("Background-Color"), Some(Property::BackgroundColor));
        assert_eq!(Property::from_name("padding"), Some(Property::Padding));
        assert_eq!(Property::from_name("margin"), None);
        assert!(Property::Padding.is_shorthand());
        assert!(Property::Flex.affects_layout());
        assert!(!Property::Color.affects_layout());
    }

    #[test]
    fn test_reset() {
        let mut pack = Pack::new();
        pack.set_padding(&[5.0]).unwrap();
        pack.set_flex(2.0).unwrap();
        pack.reset("padding").unwrap();
        pack.reset("flex").unwrap();
        assert_eq!(pack, Pack::new());
        assert_eq!(
            pack.reset("margin"),
            Err(Error::unknown_property("margin"))
        );
    }

    #[test]
    fn test_font() {
        let mut pack = Pack::new();
        pack.set_font_family("Helvetica Neue").unwrap();
        pack.set_font_size(FontSize::Points(14.0)).unwrap();
        pack.set_font_weight(FontWeight::Bold);
        assert_eq!(pack.font().to_string(), "bold 14pt 'Helvetica Neue'");
        assert_eq!(
            pack.value_css(Property::FontFamily).as_deref(),
            Some("'Helvetica Neue'")
        );
    }
}
