//! Arena-backed tree of styled layout nodes.

use arbor_core::logging::{DebugTree, TreeDebug};
use arbor_style::Pack;
use slotmap::SlotMap;

use super::node::{IntrinsicSize, LayoutAccess, LayoutBox};

slotmap::new_key_type! {
    /// Identifier of a node in a [`LayoutTree`].
    pub struct NodeId;
}

struct LayoutNode {
    style: Pack,
    intrinsic: IntrinsicSize,
    children: Vec<NodeId>,
    parent: Option<NodeId>,
    layout: LayoutBox,
    label: Option<String>,
}

/// An owning tree of styled nodes.
///
/// Parents own their children: removing a node removes its subtree.
///
/// # Example
///
/// ```
/// use arbor::layout::{LayoutTree, Viewport, layout};
/// use arbor_style::Pack;
///
/// let mut tree = LayoutTree::new();
/// let root = tree.insert(Pack::parse("direction: row").unwrap());
/// let fixed = tree.insert(Pack::parse("width: 40").unwrap());
/// let grow = tree.insert(Pack::parse("flex: 1").unwrap());
/// tree.append_child(root, fixed);
/// tree.append_child(root, grow);
///
/// layout(&mut tree, root, &Viewport::new(100.0, 50.0));
/// assert_eq!(tree.layout_box(grow).unwrap().content_width, 60.0);
/// assert_eq!(tree.layout_box(grow).unwrap().content_left, 40.0);
/// ```
#[derive(Default)]
pub struct LayoutTree {
    nodes: SlotMap<NodeId, LayoutNode>,
}

impl LayoutTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a detached node.
    pub fn insert(&mut self, style: Pack) -> NodeId {
        self.nodes.insert(LayoutNode {
            style,
            intrinsic: IntrinsicSize::default(),
            children: Vec::new(),
            parent: None,
            layout: LayoutBox::default(),
            label: None,
        })
    }

    /// Add a detached node with intrinsic hints.
    pub fn insert_with_intrinsic(&mut self, style: Pack, intrinsic: IntrinsicSize) -> NodeId {
        let id = self.insert(style);
        self.set_intrinsic(id, intrinsic);
        id
    }

    pub fn set_intrinsic(&mut self, id: NodeId, intrinsic: IntrinsicSize) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.intrinsic = intrinsic;
        }
    }

    /// Name shown for the node in [`format_layout_tree`].
    pub fn set_label(&mut self, id: NodeId, label: impl Into<String>) {
        if let Some(node) = self.nodes.get_mut(id) {
            node.label = Some(label.into());
        }
    }

    /// Move `child` to the end of `parent`'s children.
    ///
    /// Returns `false` if either node is missing or `child` is `parent` or one
    /// of its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if !self.nodes.contains_key(parent) || !self.nodes.contains_key(child) {
            return false;
        }
        if self.ancestors(parent).any(|ancestor| ancestor == child) || parent == child {
            return false;
        }

        self.detach(child);
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        true
    }

    fn detach(&mut self, id: NodeId) {
        let parent = self.nodes.get_mut(id).and_then(|node| node.parent.take());
        if let Some(node) = parent.and_then(|parent| self.nodes.get_mut(parent)) {
            node.children.retain(|other| *other != id);
        }
    }

    fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |current| self.parent(*current))
    }

    /// Remove a node and its whole subtree.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if !self.nodes.contains_key(id) {
            return false;
        }
        self.detach(id);

        let mut pending = vec![id];
        while let Some(current) = pending.pop() {
            if let Some(node) = self.nodes.remove(current) {
                pending.extend(node.children);
            }
        }
        true
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    pub fn child_ids(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id)
            .map(|node| node.children.as_slice())
            .unwrap_or_default()
    }

    pub fn style_of(&self, id: NodeId) -> Option<&Pack> {
        self.nodes.get(id).map(|node| &node.style)
    }

    /// Mutable style; changes take effect at the next layout.
    pub fn style_mut(&mut self, id: NodeId) -> Option<&mut Pack> {
        self.nodes.get_mut(id).map(|node| &mut node.style)
    }

    /// The box computed by the last layout.
    pub fn layout_box(&self, id: NodeId) -> Option<&LayoutBox> {
        self.nodes.get(id).map(|node| &node.layout)
    }
}

impl LayoutAccess for LayoutTree {
    type NodeId = NodeId;

    fn style(&self, id: NodeId) -> Option<&Pack> {
        self.style_of(id)
    }

    fn intrinsic(&self, id: NodeId) -> IntrinsicSize {
        self.nodes
            .get(id)
            .map(|node| node.intrinsic)
            .unwrap_or_default()
    }

    fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.child_ids(id).to_vec()
    }

    fn layout(&self, id: NodeId) -> Option<&LayoutBox> {
        self.layout_box(id)
    }

    fn layout_mut(&mut self, id: NodeId) -> Option<&mut LayoutBox> {
        self.nodes.get_mut(id).map(|node| &mut node.layout)
    }
}

impl DebugTree for LayoutTree {
    type Node = NodeId;

    fn label(&self, id: NodeId) -> String {
        let Some(node) = self.nodes.get(id) else {
            return format!("{id:?} (removed)");
        };
        let name = node.label.clone().unwrap_or_else(|| format!("{id:?}"));
        let layout = &node.layout;
        format!(
            "{name} [{}x{} @ ({}, {})] {}",
            layout.content_width,
            layout.content_height,
            layout.absolute_content_left,
            layout.absolute_content_top,
            node.style.to_css(),
        )
    }

    fn children(&self, id: NodeId) -> Vec<NodeId> {
        self.child_ids(id).to_vec()
    }
}

/// Render the subtree under `root` with each node's computed box and style.
pub fn format_layout_tree(tree: &LayoutTree, root: NodeId) -> String {
    TreeDebug::new().format_tree(tree, root)
}

static_assertions::assert_impl_all!(LayoutTree: Send, Sync);
static_assertions::assert_impl_all!(NodeId: Send, Sync, Copy);
