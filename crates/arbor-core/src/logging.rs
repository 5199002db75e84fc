//! Logging and debugging facilities for Arbor.
//!
//! This module provides:
//! - Target and span names for filtering `tracing` output per subsystem
//! - A text dump for any tree of laid out nodes ([`TreeDebug`])
//! - A scoped span guard for timing operations ([`PerfSpan`])
//!
//! # Tracing Integration
//!
//! Arbor never installs a subscriber. To see its logs, install one in your
//! application:
//!
//! ```ignore
//! tracing_subscriber::fmt()
//!     .with_env_filter("arbor::layout=trace,arbor_core::source=debug")
//!     .init();
//! ```
//!
//! # Debug Visualization
//!
//! Anything that can name its nodes and list their children can be dumped by
//! implementing [`DebugTree`]:
//!
//! ```
//! use arbor_core::logging::{DebugTree, TreeDebug, TreeFormatOptions, TreeStyle};
//!
//! struct Fixed;
//!
//! impl DebugTree for Fixed {
//!     type Node = u32;
//!
//!     fn label(&self, node: u32) -> String {
//!         format!("node{node}")
//!     }
//!
//!     fn children(&self, node: u32) -> Vec<u32> {
//!         if node == 0 { vec![1, 2] } else { Vec::new() }
//!     }
//! }
//!
//! let debug = TreeDebug::with_options(TreeFormatOptions {
//!     style: TreeStyle::Ascii,
//!     ..Default::default()
//! });
//! let dump = debug.format_tree(&Fixed, 0);
//! assert_eq!(dump, "node0\n+-- node1\n`-- node2\n");
//! ```

use std::fmt::Write as FmtWrite;

/// Span names used throughout Arbor for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// One node of a layout pass.
    pub const LAYOUT_NODE: &str = "layout_node";
    /// A complete layout pass from a root.
    pub const LAYOUT: &str = "layout";
    /// Listener notification.
    pub const NOTIFY: &str = "notify";
    /// Canvas replay against a backend.
    pub const CANVAS_DRAW: &str = "canvas_draw";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core framework target.
    pub const CORE: &str = "arbor_core";
    /// Listener registry and notifications.
    pub const SOURCE: &str = "arbor_core::source";
    /// Layout engine.
    pub const LAYOUT: &str = "arbor::layout";
    /// Canvas drawing model.
    pub const CANVAS: &str = "arbor::canvas";
    /// Data sources (rows, nodes, values).
    pub const SOURCES: &str = "arbor::sources";
    /// Style declaration parser.
    pub const STYLE_PARSER: &str = "arbor_style::parser";
    /// Timing spans.
    pub const PERF: &str = "arbor::perf";
}

/// Style options for tree visualization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TreeStyle {
    /// ASCII characters for tree branches.
    Ascii,
    /// Unicode box-drawing characters.
    #[default]
    Unicode,
    /// Plain indentation with a leading dash.
    Compact,
}

/// Configuration for tree debug output.
#[derive(Debug, Clone, Default)]
pub struct TreeFormatOptions {
    /// The style of tree visualization.
    pub style: TreeStyle,
    /// Maximum depth to traverse (None for unlimited).
    pub max_depth: Option<usize>,
}

/// A tree that [`TreeDebug`] knows how to walk.
pub trait DebugTree {
    /// Handle to one node of the tree.
    type Node: Copy;

    /// Single-line description of a node.
    fn label(&self, node: Self::Node) -> String;

    /// Ordered children of a node.
    fn children(&self, node: Self::Node) -> Vec<Self::Node>;
}

/// Debug utility for visualizing trees.
#[derive(Debug, Clone, Default)]
pub struct TreeDebug {
    options: TreeFormatOptions,
}

impl TreeDebug {
    /// Create a visualizer with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a visualizer with custom options.
    pub fn with_options(options: TreeFormatOptions) -> Self {
        Self { options }
    }

    /// Format the subtree rooted at `root`, one node per line.
    pub fn format_tree<T: DebugTree>(&self, tree: &T, root: T::Node) -> String {
        let mut output = String::new();
        output.push_str(&tree.label(root));
        output.push('\n');
        self.format_children(tree, root, 1, "", &mut output);
        output
    }

    fn format_children<T: DebugTree>(
        &self,
        tree: &T,
        node: T::Node,
        depth: usize,
        indent: &str,
        output: &mut String,
    ) {
        if self.options.max_depth.is_some_and(|max| depth > max) {
            return;
        }

        let (tee, corner, pipe, blank) = match self.options.style {
            TreeStyle::Ascii => ("+-- ", "`-- ", "|   ", "    "),
            TreeStyle::Unicode => (
                "\u{251c}\u{2500}\u{2500} ",
                "\u{2514}\u{2500}\u{2500} ",
                "\u{2502}   ",
                "    ",
            ),
            TreeStyle::Compact => ("- ", "- ", "  ", "  "),
        };

        let children = tree.children(node);
        let count = children.len();
        for (i, child) in children.into_iter().enumerate() {
            let is_last = i + 1 == count;
            let connector = if is_last { corner } else { tee };
            // Writing to a String cannot fail.
            let _ = writeln!(output, "{indent}{connector}{}", tree.label(child));

            let next_indent = format!("{indent}{}", if is_last { blank } else { pipe });
            self.format_children(tree, child, depth + 1, &next_indent, output);
        }
    }
}

/// A guard that keeps a tracing span entered until dropped.
///
/// Useful for measuring the duration of an operation with a timing-aware
/// subscriber.
#[derive(Debug)]
pub struct PerfSpan {
    _span: tracing::span::EnteredSpan,
}

impl PerfSpan {
    /// Enter a new timing span for `operation`.
    pub fn new(operation: &'static str) -> Self {
        let span = tracing::debug_span!(target: "arbor::perf", "perf", operation);
        Self {
            _span: span.entered(),
        }
    }
}
