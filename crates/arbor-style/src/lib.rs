//! Pack styling for Arbor.
//!
//! This crate provides the style a node carries into the pack layout
//! engine:
//!
//! - **Pack**: validated layout properties (`direction`, `alignment`,
//!   `width`/`height`, `flex`, padding) plus color and font properties
//! - **Declarations**: parse and serialise CSS-like declaration lists
//! - **Type-safe DSL**: build styles programmatically with [`PackBuilder`]
//!
//! # Example
//!
//! ```
//! use arbor_style::prelude::*;
//!
//! let mut pack = Pack::parse("direction: row; padding: 5 10").unwrap();
//! pack.apply("flex", "1").unwrap();
//! assert_eq!(pack.direction(), Direction::Row);
//! assert_eq!(
//!     pack.to_css(),
//!     "direction: row; flex: 1; padding-top: 5; padding-right: 10; padding-bottom: 5; padding-left: 10",
//! );
//!
//! let err = pack.apply("width", "-3").unwrap_err();
//! assert!(matches!(err, Error::InvalidValue { .. }));
//! ```

mod builder;
mod error;
mod pack;
mod parser;
pub mod types;

pub use builder::PackBuilder;
pub use error::{Error, Result};
pub use pack::{Pack, Property};
pub use types::{Alignment, Dimension, Direction, Display, Edges, TextAlign, TextDirection, Visibility};

/// Prelude module with commonly used types.
pub mod prelude {
    pub use crate::builder::PackBuilder;
    pub use crate::error::{Error, Result};
    pub use crate::pack::{Pack, Property};
    pub use crate::types::{
        Alignment, Dimension, Direction, Display, Edges, TextAlign, TextDirection, Visibility,
    };
}
