//! Core systems for Arbor.
//!
//! This crate provides the foundational pieces shared by the rest of the
//! Arbor toolkit:
//!
//! - **Source**: An ordered registry of weakly-held listeners with
//!   synchronous change/insert/remove/clear notification
//! - **Logging**: Tracing targets, span names and tree debug dumps
//!
//! # Listener Example
//!
//! ```
//! use std::sync::Arc;
//! use arbor_core::{Listener, Notification, Source};
//! use parking_lot::Mutex;
//!
//! #[derive(Default)]
//! struct Inserts(Mutex<Vec<usize>>);
//!
//! impl Listener<&'static str> for Inserts {
//!     fn insert(&self, _parent: Option<&&'static str>, index: usize, _item: &&'static str) {
//!         self.0.lock().push(index);
//!     }
//! }
//!
//! let source = Source::new();
//! let inserts = Arc::new(Inserts::default());
//! source.add_listener(&inserts);
//!
//! source.notify(Notification::Insert { parent: None, index: 2, item: &"row" });
//! source.notify(Notification::Clear);
//! assert_eq!(*inserts.0.lock(), vec![2]);
//! ```

pub mod logging;
mod source;

pub use logging::{DebugTree, PerfSpan, TreeDebug, TreeFormatOptions, TreeStyle};
pub use source::{Listener, ListenerId, Notification, Source};
