//! Arbor - the platform-independent core of a declarative widget toolkit.
//!
//! This is the umbrella crate. It provides the parts of a widget toolkit
//! that do not touch a native window system:
//!
//! - [`layout`]: The pack layout engine
//! - [`sources`]: Observable list, tree and value data sources
//! - [`canvas`]: A retained canvas drawing model
//!
//! The listener registry is re-exported at the crate root; the drawing
//! primitive and styling crates are available as [`render`] and [`style`].
//!
//! # Example
//!
//! ```
//! use arbor::prelude::*;
//!
//! let mut tree = LayoutTree::new();
//! let root = tree.insert(Pack::parse("direction: column; padding: 10").unwrap());
//! let header = tree.insert(Pack::parse("height: 30").unwrap());
//! let body = tree.insert(Pack::parse("flex: 1").unwrap());
//! tree.append_child(root, header);
//! tree.append_child(root, body);
//!
//! layout(&mut tree, root, &Viewport::new(200.0, 120.0));
//! let body_box = tree.layout_box(body).unwrap();
//! assert_eq!(body_box.absolute_content_top, 40.0);
//! assert_eq!(body_box.content_height, 70.0);
//!
//! let people = ListSource::from_data(["name", "age"], vec![("Ada", 36), ("Alan", 41)]).unwrap();
//! assert_eq!(people.get(1).unwrap().get("name"), Some(Value::from("Alan")));
//! ```

pub mod canvas;
pub mod layout;
pub mod prelude;
pub mod sources;

pub use arbor_core::{Listener, ListenerId, Notification, Source, logging};

/// Drawing primitives and the canvas backend interface.
pub mod render {
    pub use arbor_render::*;
}

/// Pack styling.
pub mod style {
    pub use arbor_style::*;
}

pub use canvas::{Canvas, Context, NativeCanvas};
pub use layout::{LayoutTree, Viewport, layout};
pub use sources::{ListSource, SourceError, TreeSource, ValueSource};
