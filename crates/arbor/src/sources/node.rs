//! Tree nodes and the literal shapes trees are built from.

use std::fmt;
use std::sync::{Arc, Weak};

use arbor_core::Notification;
use arbor_core::logging::targets;
use parking_lot::RwLock;

use super::error::{Result, SourceError};
use super::normalize_index;
use super::row::Fields;
use super::tree::TreeShared;
use super::value::{RowData, Value};

/// One node literal: its own data plus optional children.
///
/// `children: None` builds a leaf. `Some` builds a node that can have
/// children, even when the list is empty.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeData {
    pub data: RowData,
    pub children: Option<TreeData>,
}

impl NodeData {
    pub fn new(data: impl Into<RowData>, children: Option<TreeData>) -> Self {
        Self {
            data: data.into(),
            children,
        }
    }

    /// A node that can never have children.
    pub fn leaf(data: impl Into<RowData>) -> Self {
        Self::new(data, None)
    }

    /// A node that can have children.
    pub fn branch(data: impl Into<RowData>, children: impl Into<TreeData>) -> Self {
        Self::new(data, Some(children.into()))
    }
}

/// An ordered forest of node literals.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TreeData(pub Vec<NodeData>);

impl TreeData {
    /// A forest with no nodes.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A forest of leaves, one per item.
    pub fn leaves<D: Into<RowData>>(items: impl IntoIterator<Item = D>) -> Self {
        Self(items.into_iter().map(NodeData::leaf).collect())
    }
}

impl From<Vec<NodeData>> for TreeData {
    fn from(nodes: Vec<NodeData>) -> Self {
        Self(nodes)
    }
}

impl From<NodeData> for TreeData {
    fn from(node: NodeData) -> Self {
        Self(vec![node])
    }
}

impl From<RowData> for TreeData {
    fn from(data: RowData) -> Self {
        Self(vec![NodeData::leaf(data)])
    }
}

macro_rules! scalar_tree_data {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl From<$ty> for TreeData {
                fn from(value: $ty) -> Self {
                    Self(vec![NodeData::leaf(value)])
                }
            }
        )+
    };
}

scalar_tree_data!(Value, String, &str, i64, i32, usize, f64, f32, bool);

/// An entry of a [`TreeSource`](super::TreeSource).
///
/// A node is a leaf when it was built without children. Inserting a child
/// into a leaf turns it into a node that can have children.
pub struct Node {
    me: Weak<Node>,
    fields: Fields,
    children: RwLock<Option<Vec<Arc<Node>>>>,
    parent: RwLock<Weak<Node>>,
    source: RwLock<Weak<TreeShared>>,
}

impl Node {
    pub(crate) fn build(
        accessors: &[String],
        data: &NodeData,
        parent: Weak<Node>,
        source: Weak<TreeShared>,
    ) -> Arc<Self> {
        Arc::new_cyclic(|me: &Weak<Node>| {
            let children = data.children.as_ref().map(|tree| {
                tree.0
                    .iter()
                    .map(|child| Node::build(accessors, child, me.clone(), source.clone()))
                    .collect::<Vec<_>>()
            });
            Self {
                me: me.clone(),
                fields: Fields::new(accessors, &data.data),
                children: RwLock::new(children),
                parent: RwLock::new(parent),
                source: RwLock::new(source),
            }
        })
    }

    fn shared(&self) -> Result<Arc<TreeShared>> {
        self.source
            .read()
            .upgrade()
            .ok_or_else(|| SourceError::detached(&self))
    }

    fn handle(&self) -> Result<Arc<Node>> {
        self.me.upgrade().ok_or_else(|| SourceError::detached(&self))
    }

    pub fn get(&self, name: &str) -> Option<Value> {
        self.fields.get(name)
    }

    /// Set a field and notify the owning source.
    pub fn set(&self, name: &str, value: impl Into<Value>) {
        self.fields.set(name, value.into());

        let source = self.source.read().upgrade();
        if let (Some(source), Some(me)) = (source, self.me.upgrade()) {
            source.listeners.notify(Notification::Change { item: &me });
        }
    }

    pub fn fields(&self) -> Vec<(String, Value)> {
        self.fields.snapshot()
    }

    /// Whether this node may hold children, regardless of how many it has now.
    pub fn can_have_children(&self) -> bool {
        self.children.read().is_some()
    }

    /// Number of children; always 0 for a leaf.
    pub fn len(&self) -> usize {
        self.children.read().as_ref().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// A snapshot of the children; empty for a leaf.
    pub fn children(&self) -> Vec<Arc<Node>> {
        self.children.read().clone().unwrap_or_default()
    }

    /// The child at `index`.
    pub fn child(&self, index: usize) -> Result<Arc<Node>> {
        let children = self.children.read();
        let children = children.as_ref().ok_or_else(|| SourceError::leaf(&self))?;
        children
            .get(index)
            .cloned()
            .ok_or(SourceError::out_of_range(index, children.len()))
    }

    pub fn parent(&self) -> Option<Arc<Node>> {
        self.parent.read().upgrade()
    }

    /// Whether the node still belongs to a source.
    pub fn is_attached(&self) -> bool {
        self.source.read().strong_count() > 0
    }

    /// Insert a child built from `data` at `index`.
    ///
    /// A leaf is promoted to a node that can have children first; the
    /// promotion itself is not notified.
    pub fn insert(
        &self,
        index: isize,
        data: impl Into<RowData>,
        children: Option<TreeData>,
    ) -> Result<Arc<Node>> {
        let shared = self.shared()?;
        let me = self.handle()?;
        let node = Node::build(
            &shared.accessors,
            &NodeData::new(data, children),
            Arc::downgrade(&me),
            Arc::downgrade(&shared),
        );

        let index = {
            let mut children = self.children.write();
            let children = children.get_or_insert_with(Vec::new);
            let index = normalize_index(index, children.len());
            children.insert(index, node.clone());
            index
        };

        tracing::trace!(target: targets::SOURCES, index, "node inserted");
        shared.listeners.notify(Notification::Insert {
            parent: Some(&me),
            index,
            item: &node,
        });
        Ok(node)
    }

    /// Append a child built from `data`.
    pub fn append(&self, data: impl Into<RowData>, children: Option<TreeData>) -> Result<Arc<Node>> {
        self.insert(isize::MAX, data, children)
    }

    /// Replace the child at `index` with a leaf built from `data`.
    pub fn set_child(&self, index: usize, data: impl Into<RowData>) -> Result<Arc<Node>> {
        let shared = self.shared()?;
        let me = self.handle()?;
        let node = Node::build(
            &shared.accessors,
            &NodeData::leaf(data),
            Arc::downgrade(&me),
            Arc::downgrade(&shared),
        );

        let old = {
            let mut children = self.children.write();
            let children = children.as_mut().ok_or_else(|| SourceError::leaf(&self))?;
            let len = children.len();
            let slot = children
                .get_mut(index)
                .ok_or(SourceError::out_of_range(index, len))?;
            std::mem::replace(slot, node.clone())
        };
        old.detach();

        shared.listeners.notify(Notification::Change { item: &node });
        Ok(node)
    }

    /// Remove `child`, located by identity.
    pub fn remove(&self, child: &Arc<Node>) -> Result<Arc<Node>> {
        let index = self.index(child)?;
        self.remove_at(index)
    }

    /// Remove the child at `index`.
    pub fn remove_at(&self, index: usize) -> Result<Arc<Node>> {
        let child = {
            let mut children = self.children.write();
            let children = children.as_mut().ok_or_else(|| SourceError::leaf(&self))?;
            if index >= children.len() {
                return Err(SourceError::out_of_range(index, children.len()));
            }
            children.remove(index)
        };
        let shared = self.source.read().upgrade();
        child.detach();

        tracing::trace!(target: targets::SOURCES, index, "node removed");
        if let (Some(shared), Some(me)) = (shared, self.me.upgrade()) {
            shared.listeners.notify(Notification::Remove {
                parent: Some(&me),
                index,
                item: &child,
            });
        }
        Ok(child)
    }

    /// Position of `child` among this node's children, compared by identity.
    pub fn index(&self, child: &Arc<Node>) -> Result<usize> {
        let children = self.children.read();
        let children = children.as_ref().ok_or_else(|| SourceError::leaf(&self))?;
        children
            .iter()
            .position(|candidate| Arc::ptr_eq(candidate, child))
            .ok_or_else(|| SourceError::not_found(child))
    }

    /// First child after `start` whose fields match every value in `data`.
    pub fn find(&self, data: impl Into<RowData>, start: Option<&Arc<Node>>) -> Result<Arc<Node>> {
        if !self.can_have_children() {
            return Err(SourceError::leaf(&self));
        }
        let accessors = self.shared()?.accessors.clone();
        find_in(&self.children(), &accessors, data.into(), start)
    }

    pub(crate) fn matches(&self, pairs: &[(String, Value)]) -> bool {
        self.fields.matches(pairs)
    }

    pub(crate) fn belongs_to(&self, shared: &Arc<TreeShared>) -> bool {
        std::ptr::eq(self.source.read().as_ptr(), Arc::as_ptr(shared))
    }

    /// Clear the parent link and the source link of the whole subtree.
    pub(crate) fn detach(&self) {
        *self.parent.write() = Weak::new();
        self.detach_source();
    }

    fn detach_source(&self) {
        *self.source.write() = Weak::new();
        for child in self.children() {
            child.detach_source();
        }
    }
}

/// Value search shared by the source and its nodes.
pub(crate) fn find_in(
    candidates: &[Arc<Node>],
    accessors: &[String],
    data: RowData,
    start: Option<&Arc<Node>>,
) -> Result<Arc<Node>> {
    let from = match start {
        Some(start) => {
            candidates
                .iter()
                .position(|candidate| Arc::ptr_eq(candidate, start))
                .ok_or_else(|| SourceError::not_found(start))?
                + 1
        }
        None => 0,
    };

    let pairs = data.fields(accessors);
    candidates
        .iter()
        .skip(from)
        .find(|node| node.matches(&pairs))
        .cloned()
        .ok_or_else(|| SourceError::no_match(&data))
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fields.describe(f, "Node", self as *const Self as *const ())
    }
}

static_assertions::assert_impl_all!(Node: Send, Sync);
