//! Arena record of every fragment a fragmentation produced.
//!
//! Nodes are created and retired quickly while cutting, so they live in a
//! flat `Vec` addressed by [`FragmentId`] rather than behind owning pointers.
//! Only the bookkeeping lives here; meshes are owned by the fragments.

use crate::fragment::FragmentId;

/// What happened to a node once the recursion reached it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeFate {
    /// Not subdivided further; part of the final fragment set.
    Live,
    /// Replaced by its children.
    Split,
    /// Its cut produced no usable children, so nothing replaced it.
    Dropped,
    /// Every cut attempt failed; kept as a leaf at its current generation.
    Unresolved,
}

impl NodeFate {
    /// `true` when the node survives into the fragment set.
    pub const fn is_leaf(self) -> bool {
        matches!(self, NodeFate::Live | NodeFate::Unresolved)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutNode {
    pub id: FragmentId,
    pub parent: Option<FragmentId>,
    pub generation: u32,
    pub children: Vec<FragmentId>,
    pub fate: NodeFate,
    /// Cut attempts spent on this node (0 for nodes never cut).
    pub attempts: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CutTree {
    nodes: Vec<CutNode>,
}

impl CutTree {
    pub const fn new() -> Self {
        CutTree { nodes: Vec::new() }
    }

    /// Register the source fragment. Must be the first node.
    pub(crate) fn push_root(&mut self) -> FragmentId {
        debug_assert!(self.nodes.is_empty(), "root registered twice");
        self.push(None, 0)
    }

    /// Register a child of `parent` one generation deeper.
    pub(crate) fn push_child(&mut self, parent: FragmentId) -> FragmentId {
        let generation = self.nodes[parent.index()].generation + 1;
        let id = self.push(Some(parent), generation);
        self.nodes[parent.index()].children.push(id);
        id
    }

    fn push(&mut self, parent: Option<FragmentId>, generation: u32) -> FragmentId {
        let id = FragmentId(self.nodes.len() as u32);
        self.nodes.push(CutNode {
            id,
            parent,
            generation,
            children: Vec::new(),
            fate: NodeFate::Live,
            attempts: 0,
        });
        id
    }

    pub(crate) fn set_fate(&mut self, id: FragmentId, fate: NodeFate) {
        self.nodes[id.index()].fate = fate;
    }

    pub(crate) fn record_attempt(&mut self, id: FragmentId) {
        self.nodes[id.index()].attempts += 1;
    }

    pub fn node(&self, id: FragmentId) -> Option<&CutNode> {
        self.nodes.get(id.index())
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CutNode> {
        self.nodes.iter()
    }

    pub fn children(&self, id: FragmentId) -> &[FragmentId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Ids of every node that survived into the fragment set, ascending.
    pub fn leaves(&self) -> Vec<FragmentId> {
        self.nodes
            .iter()
            .filter(|n| n.fate.is_leaf())
            .map(|n| n.id)
            .collect()
    }

    /// Deepest generation reached by any leaf.
    pub fn max_depth(&self) -> u32 {
        self.nodes
            .iter()
            .filter(|n| n.fate.is_leaf())
            .map(|n| n.generation)
            .max()
            .unwrap_or(0)
    }

    /// Ancestors of `id` from its parent up to the root.
    pub fn path_to_root(&self, id: FragmentId) -> Vec<FragmentId> {
        let mut path = Vec::new();
        let mut cursor = self.node(id).and_then(|n| n.parent);
        while let Some(parent) = cursor {
            path.push(parent);
            cursor = self.node(parent).and_then(|n| n.parent);
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn children_track_generation_and_parent() {
        let mut tree = CutTree::new();
        let root = tree.push_root();
        let a = tree.push_child(root);
        let b = tree.push_child(root);
        let aa = tree.push_child(a);
        tree.set_fate(root, NodeFate::Split);
        tree.set_fate(a, NodeFate::Split);

        assert_eq!(tree.children(root), &[a, b]);
        assert_eq!(tree.node(aa).map(|n| n.generation), Some(2));
        assert_eq!(tree.path_to_root(aa), vec![a, root]);
        assert_eq!(tree.leaves(), vec![b, aa]);
        assert_eq!(tree.max_depth(), 2);
    }

    #[test]
    fn dropped_nodes_are_not_leaves() {
        let mut tree = CutTree::new();
        let root = tree.push_root();
        let a = tree.push_child(root);
        tree.set_fate(root, NodeFate::Split);
        tree.set_fate(a, NodeFate::Dropped);
        assert!(tree.leaves().is_empty());
        assert_eq!(tree.max_depth(), 0);
    }
}
