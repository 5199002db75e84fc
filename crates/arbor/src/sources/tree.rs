//! Hierarchical observable data source.

use std::fmt;
use std::sync::{Arc, Weak};

use arbor_core::logging::targets;
use arbor_core::{Listener, ListenerId, Notification, Source};
use parking_lot::RwLock;

use super::accessors::{owned, validate_accessors};
use super::error::{Result, SourceError};
use super::node::{Node, NodeData, TreeData, find_in};
use super::normalize_index;
use super::value::RowData;

pub(crate) struct TreeShared {
    pub(crate) accessors: Vec<String>,
    roots: RwLock<Vec<Arc<Node>>>,
    pub(crate) listeners: Source<Arc<Node>>,
}

/// An observable forest of [`Node`]s.
///
/// Root-level operations live here; child-level operations live on
/// [`Node`]. Both notify the same listeners, with `parent` set to the node
/// whose children changed (or `None` for roots).
///
/// # Example
///
/// ```
/// use arbor::sources::{NodeData, TreeSource, Value};
///
/// let source = TreeSource::from_data(
///     ["name"],
///     vec![NodeData::branch("fruit", vec![NodeData::leaf("apple"), NodeData::leaf("pear")])],
/// )
/// .unwrap();
///
/// let fruit = source.get(0).unwrap();
/// assert_eq!(fruit.len(), 2);
/// assert_eq!(fruit.child(1).unwrap().get("name"), Some(Value::from("pear")));
/// ```
pub struct TreeSource {
    shared: Arc<TreeShared>,
}

impl TreeSource {
    /// Create an empty source.
    pub fn new<S: AsRef<str>>(accessors: impl IntoIterator<Item = S>) -> Result<Self> {
        let accessors = owned(accessors);
        validate_accessors(&accessors)?;
        Ok(Self {
            shared: Arc::new(TreeShared {
                accessors,
                roots: RwLock::new(Vec::new()),
                listeners: Source::new(),
            }),
        })
    }

    /// Create a source populated from `data`, without notifying.
    pub fn from_data<S: AsRef<str>>(
        accessors: impl IntoIterator<Item = S>,
        data: impl Into<TreeData>,
    ) -> Result<Self> {
        let source = Self::new(accessors)?;
        let data: TreeData = data.into();
        let roots: Vec<_> = data
            .0
            .iter()
            .map(|node| source.create_node(node))
            .collect();
        *source.shared.roots.write() = roots;
        Ok(source)
    }

    fn create_node(&self, data: &NodeData) -> Arc<Node> {
        Node::build(
            &self.shared.accessors,
            data,
            Weak::new(),
            Arc::downgrade(&self.shared),
        )
    }

    pub fn accessors(&self) -> &[String] {
        &self.shared.accessors
    }

    /// Number of root nodes.
    pub fn len(&self) -> usize {
        self.shared.roots.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.roots.read().is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Arc<Node>> {
        self.shared.roots.read().get(index).cloned()
    }

    pub fn roots(&self) -> Vec<Arc<Node>> {
        self.shared.roots.read().clone()
    }

    pub fn iter(&self) -> std::vec::IntoIter<Arc<Node>> {
        self.roots().into_iter()
    }

    /// Insert a root node at `index`.
    ///
    /// Negative indices count from the end; out-of-range indices clamp.
    pub fn insert(
        &self,
        index: isize,
        data: impl Into<RowData>,
        children: Option<TreeData>,
    ) -> Arc<Node> {
        let node = self.create_node(&NodeData::new(data, children));
        let index = {
            let mut roots = self.shared.roots.write();
            let index = normalize_index(index, roots.len());
            roots.insert(index, node.clone());
            index
        };

        tracing::trace!(target: targets::SOURCES, index, "root inserted");
        self.shared.listeners.notify(Notification::Insert {
            parent: None,
            index,
            item: &node,
        });
        node
    }

    /// Append a root node.
    pub fn append(&self, data: impl Into<RowData>, children: Option<TreeData>) -> Arc<Node> {
        self.insert(isize::MAX, data, children)
    }

    /// Replace the root at `index` with a leaf built from `data`.
    pub fn set(&self, index: usize, data: impl Into<RowData>) -> Result<Arc<Node>> {
        let node = self.create_node(&NodeData::leaf(data));
        let old = {
            let mut roots = self.shared.roots.write();
            let len = roots.len();
            let slot = roots
                .get_mut(index)
                .ok_or(SourceError::out_of_range(index, len))?;
            std::mem::replace(slot, node.clone())
        };
        old.detach();

        self.shared
            .listeners
            .notify(Notification::Change { item: &node });
        Ok(node)
    }

    /// Remove the root at `index`.
    pub fn remove_at(&self, index: usize) -> Result<Arc<Node>> {
        let node = {
            let mut roots = self.shared.roots.write();
            if index >= roots.len() {
                return Err(SourceError::out_of_range(index, roots.len()));
            }
            roots.remove(index)
        };
        node.detach();

        tracing::trace!(target: targets::SOURCES, index, "root removed");
        self.shared.listeners.notify(Notification::Remove {
            parent: None,
            index,
            item: &node,
        });
        Ok(node)
    }

    /// Remove `node` from wherever it sits in this tree.
    pub fn remove(&self, node: &Arc<Node>) -> Result<Arc<Node>> {
        if !node.belongs_to(&self.shared) {
            return Err(SourceError::not_managed(node));
        }
        match node.parent() {
            Some(parent) => parent.remove(node),
            None => self.remove_at(self.index(node)?),
        }
    }

    /// Position of a root node, compared by identity.
    pub fn index(&self, node: &Arc<Node>) -> Result<usize> {
        self.shared
            .roots
            .read()
            .iter()
            .position(|candidate| Arc::ptr_eq(candidate, node))
            .ok_or_else(|| SourceError::not_found(node))
    }

    /// First root after `start` whose fields match every value in `data`.
    pub fn find(&self, data: impl Into<RowData>, start: Option<&Arc<Node>>) -> Result<Arc<Node>> {
        find_in(&self.roots(), &self.shared.accessors, data.into(), start)
    }

    /// Remove every root.
    pub fn clear(&self) {
        let roots = std::mem::take(&mut *self.shared.roots.write());
        for root in &roots {
            root.detach();
        }

        tracing::trace!(target: targets::SOURCES, removed = roots.len(), "tree cleared");
        self.shared.listeners.notify(Notification::Clear);
    }

    /// Whether `node` currently belongs to this source.
    pub fn contains(&self, node: &Arc<Node>) -> bool {
        node.belongs_to(&self.shared)
    }

    pub fn add_listener<L>(&self, listener: &Arc<L>) -> ListenerId
    where
        L: Listener<Arc<Node>> + 'static,
    {
        self.shared.listeners.add_listener(listener)
    }

    pub fn remove_listener<L>(&self, listener: &Arc<L>) -> bool
    where
        L: Listener<Arc<Node>> + 'static,
    {
        self.shared.listeners.remove_listener(listener)
    }

    pub fn listener_count(&self) -> usize {
        self.shared.listeners.listener_count()
    }
}

impl<'a> IntoIterator for &'a TreeSource {
    type Item = Arc<Node>;
    type IntoIter = std::vec::IntoIter<Arc<Node>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Debug for TreeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TreeSource")
            .field("accessors", &self.shared.accessors)
            .field("roots", &self.len())
            .field("listeners", &self.shared.listeners)
            .finish()
    }
}

static_assertions::assert_impl_all!(TreeSource: Send, Sync);
