//! Pack layout.
//!
//! Computes the geometry of a tree of styled boxes:
//!
//! - [`layout`]: The two-pass pack algorithm
//! - [`LayoutAccess`]: Where the engine reads styles and writes boxes
//! - [`LayoutTree`]: A ready-made arena implementing [`LayoutAccess`]
//! - [`LayoutBox`] / [`IntrinsicSize`] / [`Viewport`]: Inputs and outputs
//!
//! # Sizing Rules
//!
//! Along each axis, a node's size comes from exactly one place: its explicit
//! `width`/`height`, its intrinsic hint, or its share of the parent's
//! remaining space by `flex`. A `display: none` node takes no space and its
//! subtree is zeroed.

mod engine;
mod node;
mod tree;

pub use engine::layout;
pub use node::{BASELINE_DPI, Intrinsic, IntrinsicSize, LayoutAccess, LayoutBox, Viewport};
pub use tree::{LayoutTree, NodeId, format_layout_tree};
