//! Value types for pack style properties.

use std::fmt;

macro_rules! keyword_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($(#[$vmeta:meta])* $variant:ident => $text:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            /// Every value, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// The keyword used in declarations.
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }

            /// Parse a keyword, ignoring ASCII case.
            pub fn from_css(s: &str) -> Option<Self> {
                Self::ALL
                    .iter()
                    .copied()
                    .find(|value| value.as_str().eq_ignore_ascii_case(s))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

keyword_enum! {
    /// Whether a node takes part in layout.
    pub enum Display {
        /// Laid out with the pack algorithm.
        Pack => "pack",
        /// Takes no space; the whole subtree is hidden.
        None => "none",
    }
}

keyword_enum! {
    /// Whether a node is painted. Has no effect on geometry.
    pub enum Visibility {
        Visible => "visible",
        Hidden => "hidden",
        None => "none",
    }
}

keyword_enum! {
    /// The main axis children are packed along.
    pub enum Direction {
        Row => "row",
        Column => "column",
    }
}

keyword_enum! {
    /// Cross-axis placement of children.
    ///
    /// `Top`/`Bottom` apply to rows, `Left`/`Right` to columns; `Center`
    /// applies to both. A value for the other axis behaves as the start.
    pub enum Alignment {
        Left => "left",
        Right => "right",
        Top => "top",
        Bottom => "bottom",
        Center => "center",
    }
}

keyword_enum! {
    /// Horizontal alignment of text within a node.
    pub enum TextAlign {
        Left => "left",
        Right => "right",
        Center => "center",
        Justify => "justify",
    }
}

keyword_enum! {
    /// Reading direction; right-to-left mirrors row packing.
    pub enum TextDirection {
        Ltr => "ltr",
        Rtl => "rtl",
    }
}

impl Default for Display {
    fn default() -> Self {
        Self::Pack
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::Visible
    }
}

impl Default for Direction {
    fn default() -> Self {
        Self::Row
    }
}

impl Default for TextDirection {
    fn default() -> Self {
        Self::Ltr
    }
}

/// An explicit size on one axis.
///
/// `Auto` lets the layout engine size the node; `Px(0.0)` is an explicit
/// zero size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Dimension {
    #[default]
    Auto,
    Px(f32),
}

impl Dimension {
    /// The explicit size, if any.
    #[inline]
    pub fn px(&self) -> Option<f32> {
        match self {
            Self::Auto => None,
            Self::Px(value) => Some(*value),
        }
    }

    #[inline]
    pub fn is_auto(&self) -> bool {
        matches!(self, Self::Auto)
    }
}

impl From<f32> for Dimension {
    fn from(value: f32) -> Self {
        Self::Px(value)
    }
}

impl From<Option<f32>> for Dimension {
    fn from(value: Option<f32>) -> Self {
        value.map_or(Self::Auto, Self::Px)
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => f.write_str("auto"),
            Self::Px(value) => write!(f, "{value}"),
        }
    }
}

/// Values for the four sides of a box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Edges {
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
    pub left: f32,
}

impl Edges {
    pub const fn new(top: f32, right: f32, bottom: f32, left: f32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Expand 1 to 4 values using the CSS shorthand rules.
    pub fn from_shorthand(values: &[f32]) -> Option<Self> {
        match *values {
            [all] => Some(Self::uniform(all)),
            [vertical, horizontal] => Some(Self::new(vertical, horizontal, vertical, horizontal)),
            [top, horizontal, bottom] => Some(Self::new(top, horizontal, bottom, horizontal)),
            [top, right, bottom, left] => Some(Self::new(top, right, bottom, left)),
            _ => None,
        }
    }

    /// Left plus right.
    #[inline]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// Top plus bottom.
    #[inline]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Every side multiplied by `factor`.
    pub fn scaled(&self, factor: f32) -> Self {
        Self::new(
            self.top * factor,
            self.right * factor,
            self.bottom * factor,
            self.left * factor,
        )
    }
}
