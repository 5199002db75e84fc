//! Paint state for canvas replay.

use std::fmt;
use std::str::FromStr;

use crate::types::Color;

/// Default stroke width, in canvas units.
pub const DEFAULT_LINE_WIDTH: f32 = 2.0;

/// Fill rule for determining the inside of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FillRule {
    /// Non-zero winding rule.
    #[default]
    NonZero,
    /// Even-odd rule.
    EvenOdd,
}

impl FillRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NonZero => "nonzero",
            Self::EvenOdd => "evenodd",
        }
    }
}

impl fmt::Display for FillRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FillRule {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "nonzero" => Ok(Self::NonZero),
            "evenodd" => Ok(Self::EvenOdd),
            _ => Err(()),
        }
    }
}

/// Vertical anchor of a line of text relative to its `y` coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum Baseline {
    /// `y` is the alphabetic baseline.
    #[default]
    Alphabetic,
    /// `y` is the top of the em box.
    Top,
    /// `y` is the middle of the em box.
    Middle,
    /// `y` is the bottom of the em box.
    Bottom,
}

/// The paint attributes in effect while replaying drawing objects.
///
/// Fill and stroke contexts override their half of the state for the
/// objects nested inside them.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawState {
    pub fill_color: Color,
    pub fill_rule: FillRule,
    pub stroke_color: Color,
    pub line_width: f32,
    /// Alternating dash and gap lengths; `None` draws a solid line.
    pub line_dash: Option<Vec<f32>>,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            fill_color: Color::BLACK,
            fill_rule: FillRule::NonZero,
            stroke_color: Color::BLACK,
            line_width: DEFAULT_LINE_WIDTH,
            line_dash: None,
        }
    }
}

impl DrawState {
    /// The state with fill attributes replaced.
    pub fn with_fill(&self, color: Color, fill_rule: FillRule) -> Self {
        Self {
            fill_color: color,
            fill_rule,
            ..self.clone()
        }
    }

    /// The state with stroke attributes replaced.
    pub fn with_stroke(&self, color: Color, line_width: f32, line_dash: Option<Vec<f32>>) -> Self {
        Self {
            stroke_color: color,
            line_width,
            line_dash,
            ..self.clone()
        }
    }
}
