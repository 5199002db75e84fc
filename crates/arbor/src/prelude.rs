//! Prelude module for Arbor.
//!
//! ```
//! use arbor::prelude::*;
//! ```
//!
//! This provides access to:
//! - Layout (`LayoutTree`, `layout`, `Viewport`, `LayoutBox`)
//! - Styling (`Pack`, `Direction`, `Alignment`, `Dimension`)
//! - Data sources (`ListSource`, `TreeSource`, `ValueSource`, `Row`, `Node`)
//! - Canvas (`Canvas`, `Context`, `Sweep`, `Color`, `Font`)

// ============================================================================
// Layout
// ============================================================================

pub use crate::layout::{
    Intrinsic, IntrinsicSize, LayoutAccess, LayoutBox, LayoutTree, NodeId, Viewport,
    format_layout_tree, layout,
};

// ============================================================================
// Styling
// ============================================================================

pub use arbor_style::{
    Alignment, Dimension, Direction, Display, Edges, Pack, PackBuilder, TextDirection, Visibility,
};

// ============================================================================
// Data Sources
// ============================================================================

pub use arbor_core::{Listener, ListenerId};
pub use crate::sources::{
    AccessorSpec, ListSource, Node, NodeData, Row, RowData, SourceError, TreeData, TreeSource,
    Value, ValueSource,
};

// ============================================================================
// Canvas
// ============================================================================

pub use crate::canvas::{Canvas, Context, ContextKind, DrawingObject, NativeCanvas, Sweep};
pub use arbor_render::{Baseline, CanvasBackend, Color, FillRule, Font, FontSize, Point, Rect, Size};
