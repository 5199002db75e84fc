//! Font descriptions passed to native text measurement and drawing.

use std::fmt;

/// Generic family resolved by the platform to its UI font.
pub const SYSTEM: &str = "system";
/// Generic family used for dialogs and message text.
pub const MESSAGE: &str = "message";
pub const SERIF: &str = "serif";
pub const SANS_SERIF: &str = "sans-serif";
pub const CURSIVE: &str = "cursive";
pub const FANTASY: &str = "fantasy";
pub const MONOSPACE: &str = "monospace";

/// Every generic family keyword.
pub const GENERIC_FAMILIES: &[&str] = &[
    SYSTEM, MESSAGE, SERIF, SANS_SERIF, CURSIVE, FANTASY, MONOSPACE,
];

/// Font slant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

/// Font variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FontVariant {
    #[default]
    Normal,
    SmallCaps,
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Font size in points.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum FontSize {
    /// Whatever the platform uses by default.
    #[default]
    SystemDefault,
    /// An explicit size in points.
    Points(f32),
}

impl fmt::Display for FontSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SystemDefault => f.write_str("system"),
            Self::Points(pt) => write!(f, "{pt}pt"),
        }
    }
}

macro_rules! keyword_display {
    ($ty:ty { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// The CSS keyword for this value.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            /// Parse a CSS keyword.
            pub fn from_keyword(keyword: &str) -> Option<Self> {
                match keyword {
                    $($text => Some(Self::$variant),)+
                    _ => None,
                }
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_display!(FontStyle { Normal => "normal", Italic => "italic", Oblique => "oblique" });
keyword_display!(FontVariant { Normal => "normal", SmallCaps => "small-caps" });
keyword_display!(FontWeight { Normal => "normal", Bold => "bold" });

/// A complete font description.
///
/// ```
/// use arbor_render::{Font, FontSize, FontWeight};
///
/// let font = Font::new("serif", FontSize::Points(12.0)).with_weight(FontWeight::Bold);
/// assert_eq!(font.to_string(), "bold 12pt serif");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Font {
    pub family: String,
    pub size: FontSize,
    pub style: FontStyle,
    pub variant: FontVariant,
    pub weight: FontWeight,
}

impl Default for Font {
    fn default() -> Self {
        Self::new(SYSTEM, FontSize::SystemDefault)
    }
}

impl Font {
    /// Create a font with normal style, variant and weight.
    pub fn new(family: impl Into<String>, size: FontSize) -> Self {
        Self {
            family: family.into(),
            size,
            style: FontStyle::Normal,
            variant: FontVariant::Normal,
            weight: FontWeight::Normal,
        }
    }

    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_variant(mut self, variant: FontVariant) -> Self {
        self.variant = variant;
        self
    }

    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Whether the family is one of the generic keywords.
    pub fn is_generic(&self) -> bool {
        GENERIC_FAMILIES.contains(&self.family.as_str())
    }
}

/// CSS `font` shorthand order, omitting `normal` components.
impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.style != FontStyle::Normal {
            write!(f, "{} ", self.style)?;
        }
        if self.variant != FontVariant::Normal {
            write!(f, "{} ", self.variant)?;
        }
        if self.weight != FontWeight::Normal {
            write!(f, "{} ", self.weight)?;
        }
        if self.size != FontSize::SystemDefault {
            write!(f, "{} ", self.size)?;
        }
        if self.family.contains(' ') {
            write!(f, "'{}'", self.family)
        } else {
            f.write_str(&self.family)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_font() {
        let font = Font::default();
        assert_eq!(font.family, SYSTEM);
        assert_eq!(font.size, FontSize::SystemDefault);
        assert!(font.is_generic());
        assert_eq!(font.to_string(), "system");
    }

    #[test]
    fn test_display_full() {
        let font = Font::new("Times New Roman", FontSize::Points(9.5))
            .with_style(FontStyle::Italic)
            .with_variant(FontVariant::SmallCaps)
            .with_weight(FontWeight::Bold);
        assert_eq!(font.to_string(), "italic small-caps bold 9.5pt 'Times New Roman'");
        assert!(!font.is_generic());
    }

    #[test]
    fn test_keywords() {
        assert_eq!(FontStyle::from_keyword("oblique"), Some(FontStyle::Oblique));
        assert_eq!(FontVariant::from_keyword("small-caps"), Some(FontVariant::SmallCaps));
        assert_eq!(FontWeight::from_keyword("heavy"), None);
    }
}
