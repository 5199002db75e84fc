//! The pack layout algorithm.
//!
//! Each container distributes its main axis (`direction`) in two passes:
//!
//! 1. Children with an explicit size, a fixed intrinsic size, or no flex are
//!    laid out at their own size and their footprint (size plus padding) is
//!    taken from the available space.
//! 2. What remains is split between the other children in proportion to
//!    their `flex`. A flexible intrinsic size acts as a minimum, and a
//!    container sized this way fills its share even when its own children
//!    need less.
//!
//! Children are then positioned along the main axis in order (mirrored for
//! right-to-left rows) and aligned on the cross axis per `alignment`.

use arbor_core::PerfSpan;
use arbor_core::logging::{span_names, targets};
use arbor_render::Size;
use arbor_style::{Alignment, Dimension, Direction, Display, Edges, TextDirection};

use super::node::{Intrinsic, IntrinsicSize, LayoutAccess, LayoutBox, Viewport};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    fn main(direction: Direction) -> Self {
        match direction {
            Direction::Row => Self::Horizontal,
            Direction::Column => Self::Vertical,
        }
    }

    fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }

    fn of(self, size: Size) -> f32 {
        match self {
            Self::Horizontal => size.width,
            Self::Vertical => size.height,
        }
    }

    fn explicit(self, metrics: &Metrics) -> Option<f32> {
        match self {
            Self::Horizontal => metrics.width,
            Self::Vertical => metrics.height,
        }
    }

    fn intrinsic(self, intrinsic: IntrinsicSize) -> Intrinsic {
        match self {
            Self::Horizontal => intrinsic.width,
            Self::Vertical => intrinsic.height,
        }
    }

    /// Padding before and after along this axis.
    fn padding(self, padding: &Edges) -> (f32, f32) {
        match self {
            Self::Horizontal => (padding.left, padding.right),
            Self::Vertical => (padding.top, padding.bottom),
        }
    }

    /// Build a size from main and cross extents.
    fn compose(self, main: f32, cross: f32) -> Size {
        match self {
            Self::Horizontal => Size::new(main, cross),
            Self::Vertical => Size::new(cross, main),
        }
    }
}

/// Axes along which a container takes its whole allocation instead of
/// shrinking to its children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Fill {
    horizontal: bool,
    vertical: bool,
}

impl Fill {
    /// The root fills the viewport.
    const BOTH: Self = Self {
        horizontal: true,
        vertical: true,
    };

    /// A child sized by flex fills its share of the parent's main axis.
    fn along(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self {
                horizontal: true,
                vertical: false,
            },
            Axis::Vertical => Self {
                horizontal: false,
                vertical: true,
            },
        }
    }

    fn of(self, axis: Axis) -> bool {
        match axis {
            Axis::Horizontal => self.horizontal,
            Axis::Vertical => self.vertical,
        }
    }
}

/// The layout-relevant style of one node, at device scale.
#[derive(Debug, Clone, Copy)]
struct Metrics {
    display: Display,
    direction: Direction,
    alignment: Option<Alignment>,
    text_direction: TextDirection,
    width: Option<f32>,
    height: Option<f32>,
    flex: f32,
    padding: Edges,
}

impl Metrics {
    fn read<T: LayoutAccess>(tree: &T, id: T::NodeId, scale: f32) -> Self {
        let scaled = |dimension: Dimension| dimension.px().map(|value| value * scale);
        match tree.style(id) {
            Some(style) => Self {
                display: style.display(),
                direction: style.direction(),
                alignment: style.alignment(),
                text_direction: style.text_direction(),
                width: scaled(style.width()),
                height: scaled(style.height()),
                flex: style.flex(),
                padding: style.padding().scaled(scale),
            },
            None => Self {
                display: Display::default(),
                direction: Direction::default(),
                alignment: None,
                text_direction: TextDirection::default(),
                width: None,
                height: None,
                flex: 0.0,
                padding: Edges::default(),
            },
        }
    }

    fn footprint(&self, axis: Axis, size: Size) -> f32 {
        let (before, after) = axis.padding(&self.padding);
        before + axis.of(size) + after
    }
}

/// Lay out the tree under `root` into `viewport`.
///
/// Every reachable node's [`LayoutBox`] is rewritten. Style lengths are
/// scaled by [`Viewport::scale`]; intrinsic hints are taken as device pixels.
pub fn layout<T: LayoutAccess>(tree: &mut T, root: T::NodeId, viewport: &Viewport) {
    let _perf = PerfSpan::new(span_names::LAYOUT);
    let scale = viewport.scale();
    let metrics = Metrics::read(tree, root, scale);

    if metrics.display == Display::None {
        collapse(tree, root);
        return;
    }

    let engine = Engine { scale };
    let size = engine.layout_node(tree, root, Size::new(viewport.width, viewport.height), Fill::BOTH, 0);

    if let Some(layout) = tree.layout_mut(root) {
        layout.content_left = metrics.padding.left;
        layout.content_top = metrics.padding.top;
    }
    place_absolute(tree, root, 0.0, 0.0);

    tracing::debug!(
        target: targets::LAYOUT,
        width = size.width,
        height = size.height,
        dpi = viewport.dpi,
        "layout complete"
    );
}

struct Engine {
    scale: f32,
}

impl Engine {
    /// Size `id` within `alloc` (its padding box) and lay out its subtree.
    ///
    /// Returns the content size. The caller positions the node.
    fn layout_node<T: LayoutAccess>(
        &self,
        tree: &mut T,
        id: T::NodeId,
        alloc: Size,
        fill: Fill,
        depth: usize,
    ) -> Size {
        let _span = tracing::trace_span!(
            target: targets::LAYOUT,
            span_names::LAYOUT_NODE,
            depth,
            node = ?id
        )
        .entered();

        let metrics = Metrics::read(tree, id, self.scale);
        let intrinsic = tree.intrinsic(id);
        let available = Size::new(
            available_extent(
                metrics.width,
                intrinsic.width,
                alloc.width,
                metrics.padding.horizontal(),
            ),
            available_extent(
                metrics.height,
                intrinsic.height,
                alloc.height,
                metrics.padding.vertical(),
            ),
        );

        let children = tree.children(id);
        let content = if children.is_empty() {
            available
        } else {
            self.layout_children(tree, &metrics, intrinsic, &children, available, fill, depth)
        };

        if let Some(layout) = tree.layout_mut(id) {
            layout.content_width = content.width;
            layout.content_height = content.height;
            layout.padding = metrics.padding;
        }
        tracing::trace!(
            target: targets::LAYOUT,
            width = content.width,
            height = content.height,
            "node sized"
        );
        content
    }

    #[allow(clippy::too_many_arguments)]
    fn layout_children<T: LayoutAccess>(
        &self,
        tree: &mut T,
        metrics: &Metrics,
        intrinsic: IntrinsicSize,
        children: &[T::NodeId],
        available: Size,
        fill: Fill,
        depth: usize,
    ) -> Size {
        let main = Axis::main(metrics.direction);
        let cross = main.cross();
        let available_main = main.of(available);
        let available_cross = cross.of(available);

        let mut visible = Vec::with_capacity(children.len());
        for &child in children {
            let child_metrics = Metrics::read(tree, child, self.scale);
            if child_metrics.display == Display::None {
                collapse(tree, child);
            } else {
                visible.push((child, child_metrics));
            }
        }

        // Pass 1: children that do not flex.
        let mut sizes: Vec<Option<Size>> = vec![None; visible.len()];
        let mut used = 0.0;
        let mut flex_total = 0.0;
        for (slot, (child, child_metrics)) in sizes.iter_mut().zip(&visible) {
            let (before, after) = main.padding(&child_metrics.padding);
            let hint = main.intrinsic(tree.intrinsic(*child));
            let fixed = main.explicit(child_metrics).is_some()
                || matches!(hint, Intrinsic::Fixed(_))
                || child_metrics.flex <= 0.0;

            if fixed {
                let size = self.layout_node(
                    tree,
                    *child,
                    main.compose(0.0, available_cross),
                    Fill::default(),
                    depth + 1,
                );
                used += before + main.of(size) + after;
                *slot = Some(size);
            } else {
                used += before + after;
                flex_total += child_metrics.flex;
            }
        }

        let remaining = (available_main - used).max(0.0);
        let quantum = if flex_total > 0.0 {
            remaining / flex_total
        } else {
            0.0
        };
        tracing::trace!(target: targets::LAYOUT, remaining, flex_total, quantum, "flex quantum");

        // Pass 2: share what is left by flex.
        for (slot, (child, child_metrics)) in sizes.iter_mut().zip(&visible) {
            if slot.is_some() {
                continue;
            }
            let (before, after) = main.padding(&child_metrics.padding);
            let alloc_main = before + quantum * child_metrics.flex + after;
            *slot = Some(self.layout_node(
                tree,
                *child,
                main.compose(alloc_main, available_cross),
                Fill::along(main),
                depth + 1,
            ));
        }

        let sizes: Vec<Size> = sizes.into_iter().map(Option::unwrap_or_default).collect();
        let total_main: f32 = visible
            .iter()
            .zip(&sizes)
            .map(|((_, child_metrics), size)| child_metrics.footprint(main, *size))
            .sum();
        let largest_cross = visible
            .iter()
            .zip(&sizes)
            .map(|((_, child_metrics), size)| child_metrics.footprint(cross, *size))
            .fold(0.0_f32, f32::max);

        let main_size = container_extent(
            main.explicit(metrics),
            main.intrinsic(intrinsic),
            total_main,
            available_main,
            fill.of(main),
        );
        let cross_size = container_extent(
            cross.explicit(metrics),
            cross.intrinsic(intrinsic),
            largest_cross,
            available_cross,
            fill.of(cross),
        );

        // Positioning.
        let mirrored = main == Axis::Horizontal && metrics.text_direction == TextDirection::Rtl;
        let mut offset = 0.0;
        for ((child, child_metrics), size) in visible.iter().zip(&sizes) {
            let (before, after) = main.padding(&child_metrics.padding);
            let extent = main.of(*size);
            let main_position = if mirrored {
                offset += after;
                let position = main_size - offset - extent;
                offset += extent + before;
                position
            } else {
                offset += before;
                let position = offset;
                offset += extent + after;
                position
            };

            let (cross_before, _) = cross.padding(&child_metrics.padding);
            let extra = cross_size - child_metrics.footprint(cross, *size);
            let cross_position = cross_before + alignment_shift(main, metrics.alignment, extra);

            if let Some(layout) = tree.layout_mut(*child) {
                let position = main.compose(main_position, cross_position);
                layout.content_left = position.width;
                layout.content_top = position.height;
            }
        }

        main.compose(main_size, cross_size)
    }
}

/// Content extent a node may use along one axis.
fn available_extent(explicit: Option<f32>, hint: Intrinsic, alloc: f32, padding: f32) -> f32 {
    let from_parent = (alloc - padding).max(0.0);
    match (explicit, hint) {
        (Some(value), _) => value,
        (None, Intrinsic::Fixed(value)) => value,
        (None, Intrinsic::AtLeast(min)) => from_parent.max(min),
        (None, Intrinsic::Unset) => from_parent,
    }
}

/// Final extent of a container along one axis, given what its children use.
///
/// With `fill` set the container never ends up smaller than `available`.
fn container_extent(
    explicit: Option<f32>,
    hint: Intrinsic,
    children: f32,
    available: f32,
    fill: bool,
) -> f32 {
    let shrunk = match (explicit, hint) {
        (Some(value), _) => return value,
        (None, Intrinsic::Fixed(value)) => return value,
        (None, Intrinsic::AtLeast(min)) => children.max(min),
        (None, Intrinsic::Unset) => children,
    };
    if fill { shrunk.max(available) } else { shrunk }
}

/// Cross-axis offset of a child for `extra` leftover space.
fn alignment_shift(main: Axis, alignment: Option<Alignment>, extra: f32) -> f32 {
    match (main, alignment) {
        (_, Some(Alignment::Center)) => extra / 2.0,
        (Axis::Horizontal, Some(Alignment::Bottom)) => extra,
        (Axis::Vertical, Some(Alignment::Right)) => extra,
        _ => 0.0,
    }
}

/// Zero the boxes of a hidden subtree.
fn collapse<T: LayoutAccess>(tree: &mut T, id: T::NodeId) {
    let mut pending = vec![id];
    while let Some(current) = pending.pop() {
        if let Some(layout) = tree.layout_mut(current) {
            *layout = LayoutBox::default();
        }
        pending.extend(tree.children(current));
    }
}

/// Derive absolute positions from the relative ones, top-down.
fn place_absolute<T: LayoutAccess>(tree: &mut T, id: T::NodeId, parent_left: f32, parent_top: f32) {
    let Some((left, top)) = tree.layout_mut(id).map(|layout| {
        layout.absolute_content_left = parent_left + layout.content_left;
        layout.absolute_content_top = parent_top + layout.content_top;
        (layout.absolute_content_left, layout.absolute_content_top)
    }) else {
        return;
    };

    for child in tree.children(id) {
        let hidden = tree
            .style(child)
            .is_some_and(|style| style.display() == Display::None);
        if !hidden {
            place_absolute(tree, child, left, top);
        }
    }
}
