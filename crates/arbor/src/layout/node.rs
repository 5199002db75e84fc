//! Layout inputs and outputs: intrinsic hints, computed boxes and the
//! viewport.

use std::fmt::Debug;

use arbor_render::{Point, Rect, Size};
use arbor_style::{Edges, Pack};

/// DPI at which style lengths are used unscaled.
pub const BASELINE_DPI: f32 = 96.0;

/// A node's natural extent along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Intrinsic {
    /// No hint; the node takes whatever the layout gives it.
    #[default]
    Unset,
    /// Exactly this size, regardless of flex.
    Fixed(f32),
    /// At least this size; with a non-zero flex the node may grow.
    AtLeast(f32),
}

impl Intrinsic {
    /// The hinted value, if any.
    #[inline]
    pub fn value(&self) -> Option<f32> {
        match self {
            Self::Unset => None,
            Self::Fixed(value) | Self::AtLeast(value) => Some(*value),
        }
    }

    /// Whether the hint allows the node to grow.
    #[inline]
    pub fn is_flexible(&self) -> bool {
        matches!(self, Self::AtLeast(_))
    }
}

/// Intrinsic hints for both axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct IntrinsicSize {
    pub width: Intrinsic,
    pub height: Intrinsic,
}

impl IntrinsicSize {
    pub const fn new(width: Intrinsic, height: Intrinsic) -> Self {
        Self { width, height }
    }

    /// Fixed on both axes.
    pub const fn fixed(width: f32, height: f32) -> Self {
        Self::new(Intrinsic::Fixed(width), Intrinsic::Fixed(height))
    }
}

/// The computed geometry of one node.
///
/// `content_left`/`content_top` are relative to the parent's content box;
/// the absolute fields are relative to the root's padding box origin.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LayoutBox {
    pub content_left: f32,
    pub content_top: f32,
    pub content_width: f32,
    pub content_height: f32,
    pub absolute_content_left: f32,
    pub absolute_content_top: f32,
    /// Padding around the content, at device scale.
    pub padding: Edges,
}

impl LayoutBox {
    /// Far horizontal edge of the content box.
    #[inline]
    pub fn content_right(&self) -> f32 {
        self.content_left + self.content_width
    }

    /// Far vertical edge of the content box.
    #[inline]
    pub fn content_bottom(&self) -> f32 {
        self.content_top + self.content_height
    }

    #[inline]
    pub fn origin(&self) -> Point {
        Point::new(self.content_left, self.content_top)
    }

    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.content_width, self.content_height)
    }

    /// The content box grown by the padding, in parent coordinates.
    pub fn padding_box(&self) -> Rect {
        Rect::new(
            self.content_left - self.padding.left,
            self.content_top - self.padding.top,
            self.content_width + self.padding.horizontal(),
            self.content_height + self.padding.vertical(),
        )
    }

    /// The content box in root coordinates.
    pub fn absolute_rect(&self) -> Rect {
        Rect::new(
            self.absolute_content_left,
            self.absolute_content_top,
            self.content_width,
            self.content_height,
        )
    }
}

/// The space the root node is laid out into.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub dpi: f32,
}

impl Viewport {
    /// A viewport at the baseline DPI.
    pub const fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            dpi: BASELINE_DPI,
        }
    }

    pub const fn with_dpi(mut self, dpi: f32) -> Self {
        self.dpi = dpi;
        self
    }

    /// Factor applied to style lengths.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.dpi / BASELINE_DPI
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(640.0, 480.0)
    }
}

/// Storage the layout engine reads styles from and writes boxes into.
///
/// Implemented by [`LayoutTree`](super::LayoutTree); a widget tree can
/// implement it directly instead.
pub trait LayoutAccess {
    type NodeId: Copy + Debug;

    fn style(&self, id: Self::NodeId) -> Option<&Pack>;

    fn intrinsic(&self, id: Self::NodeId) -> IntrinsicSize;

    /// Children in layout order.
    fn children(&self, id: Self::NodeId) -> Vec<Self::NodeId>;

    fn layout(&self, id: Self::NodeId) -> Option<&LayoutBox>;

    fn layout_mut(&mut self, id: Self::NodeId) -> Option<&mut LayoutBox>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_box_helpers() {
        let layout = LayoutBox {
            content_left: 10.0,
            content_top: 5.0,
            content_width: 30.0,
            content_height: 20.0,
            padding: Edges::new(5.0, 2.0, 5.0, 10.0),
            ..Default::default()
        };
        assert_eq!(layout.content_right(), 40.0);
        assert_eq!(layout.content_bottom(), 25.0);
        assert_eq!(layout.padding_box(), Rect::new(0.0, 0.0, 42.0, 30.0));
    }

    #[test]
    fn test_viewport_scale() {
        assert_eq!(Viewport::default().scale(), 1.0);
        assert_eq!(Viewport::new(100.0, 100.0).with_dpi(192.0).scale(), 2.0);
    }

    #[test]
    fn test_intrinsic() {
        assert_eq!(Intrinsic::Unset.value(), None);
        assert_eq!(Intrinsic::AtLeast(4.0).value(), Some(4.0));
        assert!(Intrinsic::AtLeast(4.0).is_flexible());
        assert!(!Intrinsic::Fixed(4.0).is_flexible());
    }
}
