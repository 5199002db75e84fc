//! Fluent construction of [`Pack`] styles.

use arbor_render::{Color, FontSize, FontStyle, FontVariant, FontWeight};

use crate::error::{Error, Result};
use crate::pack::Pack;
use crate::types::{Alignment, Dimension, Direction, Display, TextAlign, TextDirection, Visibility};

/// Builder for [`Pack`] with a fluent API.
///
/// Validation happens as each value is set; the first failure is kept and
/// returned from [`build`](Self::build).
///
/// ```
/// use arbor_style::{Direction, Pack};
///
/// let pack = Pack::builder()
///     .direction(Direction::Column)
///     .width(200.0)
///     .flex(1.0)
///     .padding_all(8.0)
///     .build()
///     .unwrap();
/// assert_eq!(pack.padding().top, 8.0);
///
/// assert!(Pack::builder().flex(-1.0).build().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PackBuilder {
    pack: Pack,
    error: Option<Error>,
}

impl PackBuilder {
    /// Create a new builder with every property unset.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finish, returning the first validation error if any.
    pub fn build(self) -> Result<Pack> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.pack),
        }
    }

    fn check(mut self, result: Result<()>) -> Self {
        if let Err(error) = result {
            self.error.get_or_insert(error);
        }
        self
    }

    // === Layout ===

    pub fn display(mut self, display: Display) -> Self {
        self.pack.set_display(display);
        self
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.pack.set_visibility(visibility);
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.pack.set_direction(direction);
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.pack.set_alignment(Some(alignment));
        self
    }

    pub fn width(mut self, width: impl Into<Dimension>) -> Self {
        let result = self.pack.set_width(width);
        self.check(result)
    }

    pub fn height(mut self, height: impl Into<Dimension>) -> Self {
        let result = self.pack.set_height(height);
        self.check(result)
    }

    pub fn flex(mut self, flex: f32) -> Self {
        let result = self.pack.set_flex(flex);
        self.check(result)
    }

    /// Set padding from 1 to 4 values.
    pub fn padding(mut self, values: &[f32]) -> Self {
        let result = self.pack.set_padding(values);
        self.check(result)
    }

    /// Set uniform padding on all sides.
    pub fn padding_all(self, value: f32) -> Self {
        self.padding(&[value])
    }

    pub fn padding_top(mut self, value: f32) -> Self {
        let result = self.pack.set_padding_top(value);
        self.check(result)
    }

    pub fn padding_right(mut self, value: f32) -> Self {
        let result = self.pack.set_padding_right(value);
        self.check(result)
    }

    pub fn padding_bottom(mut self, value: f32) -> Self {
        let result = self.pack.set_padding_bottom(value);
        self.check(result)
    }

    pub fn padding_left(mut self, value: f32) -> Self {
        let result = self.pack.set_padding_left(value);
        self.check(result)
    }

    pub fn text_direction(mut self, direction: TextDirection) -> Self {
        self.pack.set_text_direction(direction);
        self
    }

    // === Presentation ===

    pub fn color(mut self, color: Color) -> Self {
        self.pack.set_color(Some(color));
        self
    }

    pub fn background_color(mut self, color: Color) -> Self {
        self.pack.set_background_color(Some(color));
        self
    }

    pub fn text_align(mut self, align: TextAlign) -> Self {
        self.pack.set_text_align(Some(align));
        self
    }

    pub fn font_family(mut self, family: impl Into<String>) -> Self {
        let result = self.pack.set_font_family(family);
        self.check(result)
    }

    pub fn font_size(mut self, size: f32) -> Self {
        let result = self.pack.set_font_size(FontSize::Points(size));
        self.check(result)
    }

    pub fn font_style(mut self, style: FontStyle) -> Self {
        self.pack.set_font_style(style);
        self
    }

    pub fn font_variant(mut self, variant: FontVariant) -> Self {
        self.pack.set_font_variant(variant);
        self
    }

    pub fn font_weight(mut self, weight: FontWeight) -> Self {
        self.pack.set_font_weight(weight);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_wins() {
        let error = PackBuilder::new()
            .width(-5.0)
            .flex(-1.0)
            .build()
            .unwrap_err();
        assert!(matches!(
            error,
            Error::InvalidValue { ref property, .. } if property == "width"
        ));
    }

    #[test]
    fn test_builder_matches_parse() {
        let built = PackBuilder::new()
            .direction(Direction::Column)
            .alignment(Alignment::Center)
            .height(30.0)
            .padding(&[1.0, 2.0])
            .color(Color::RED)
            .build()
            .unwrap();
        let parsed =
            Pack::parse("direction: column; alignment: center; height: 30; padding: 1 2; color: red")
                .unwrap();
        assert_eq!(built, parsed);
    }
}
