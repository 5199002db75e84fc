//! Observable data sources.
//!
//! Sources map application data onto named fields and tell registered
//! listeners about every change, synchronously and in registration order.
//!
//! # Key Types
//!
//! - [`ListSource`] - A flat list of [`Row`]s
//! - [`TreeSource`] - A forest of [`Node`]s
//! - [`ValueSource`] - A single observable [`Value`]
//! - [`RowData`] / [`NodeData`] / [`TreeData`] - Literal shapes rows and
//!   nodes are built from
//!
//! Listeners implement [`Listener`](arbor_core::Listener) for the item type of
//! the source they observe and are held weakly; dropping the last strong
//! handle unregisters them.

mod accessors;
mod error;
mod list;
mod node;
mod row;
mod tree;
mod value;
mod value_source;

pub use accessors::{AccessorSpec, build_accessors, to_accessor};
pub use error::{Result, SourceError};
pub use list::ListSource;
pub use node::{Node, NodeData, TreeData};
pub use row::Row;
pub use tree::TreeSource;
pub use value::{RowData, Value};
pub use value_source::{DEFAULT_ACCESSOR, ValueSource};

/// Resolve an insertion index against a sequence of `len` items.
///
/// Negative indices count back from the end and stop at 0; positive indices
/// stop at `len`.
pub(crate) fn normalize_index(index: isize, len: usize) -> usize {
    if index < 0 {
        len.saturating_sub(index.unsigned_abs())
    } else {
        (index as usize).min(len)
    }
}
