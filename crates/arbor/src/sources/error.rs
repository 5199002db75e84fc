//! Error types for data sources.

/// Result type alias for data source operations.
pub type Result<T> = std::result::Result<T, SourceError>;

/// Errors raised by data source construction, lookup and mutation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    /// An accessor name is not usable as a field name.
    #[error("Invalid accessor '{accessor}': {reason}")]
    InvalidAccessors { accessor: String, reason: String },

    /// No accessors were given.
    #[error("A data source must be provided a list of accessors")]
    EmptyAccessors,

    /// The same accessor appears twice.
    #[error("Data accessors are not unique: '{accessor}' appears more than once")]
    DuplicateAccessor { accessor: String },

    /// A heading could not be turned into an accessor.
    #[error("Unable to convert heading '{heading}' to an accessor")]
    InvalidHeading { heading: String },

    /// Explicit accessors do not line up with the headings.
    #[error("Number of accessors ({found}) must match number of headings ({expected})")]
    AccessorCountMismatch { expected: usize, found: usize },

    /// Identity lookup miss.
    #[error("{item} not found in data source")]
    NotFound { item: String },

    /// Value lookup miss.
    #[error("No item matching {data} in data source")]
    NoMatch { data: String },

    /// The item belongs to another source, or to none.
    #[error("{item} is not managed by this data source")]
    NotManaged { item: String },

    /// Child access on a node that cannot have children.
    #[error("{node} is a leaf node")]
    LeafNode { node: String },

    /// The node was removed from its source.
    #[error("{node} is not attached to a data source")]
    Detached { node: String },

    /// Positional access past the end.
    #[error("Index {index} out of range for length {len}")]
    IndexOutOfRange { index: usize, len: usize },
}

impl SourceError {
    pub(crate) fn not_found(item: &impl std::fmt::Debug) -> Self {
        Self::NotFound {
            item: format!("{item:?}"),
        }
    }

    pub(crate) fn no_match(data: &impl std::fmt::Debug) -> Self {
        Self::NoMatch {
            data: format!("{data:?}"),
        }
    }

    pub(crate) fn not_managed(item: &impl std::fmt::Debug) -> Self {
        Self::NotManaged {
            item: format!("{item:?}"),
        }
    }

    pub(crate) fn leaf(node: &impl std::fmt::Debug) -> Self {
        Self::LeafNode {
            node: format!("{node:?}"),
        }
    }

    pub(crate) fn detached(node: &impl std::fmt::Debug) -> Self {
        Self::Detached {
            node: format!("{node:?}"),
        }
    }

    pub(crate) fn out_of_range(index: usize, len: usize) -> Self {
        Self::IndexOutOfRange { index, len }
    }
}
