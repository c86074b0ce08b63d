//! Node types for the [`Trie`]'s internal graph.
//!
//! The graph is a plain prefix tree. Edges between nodes are defined by characters, and every
//! inserted key spells out a path from the root. A node at which a key ends carries a
//! [`Terminal`] holding the full key and its metadata.
//!
//! Nodes are stored in an index arena, the [`Graph`]. Each node owns its children through the
//! `children` map and refers back to its parent by [`NodeId`], which allows walking upwards during
//! removal without any shared ownership.
//!
//! [`Trie`]: crate::Trie

use crate::letters::Letters;
use hashbrown::HashMap;
use std::{mem, ops};

/// Index of a [`Node`] within a [`Graph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// The root node always lives in the first slot.
pub(crate) const ROOT: NodeId = NodeId(0);

/// Information stored on a node at which an inserted key ends.
#[derive(Debug)]
pub(crate) struct Terminal<M> {
    /// The complete key ending here.
    pub(crate) key: String,
    pub(crate) metadata: M,
}

/// A single vertex of the graph.
#[derive(Debug)]
pub(crate) struct Node<M> {
    /// The character on the edge leading to this node. `None` only for the root.
    pub(crate) value: Option<char>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: HashMap<char, NodeId>,
    /// Present if and only if some inserted key ends exactly at this node.
    pub(crate) terminal: Option<Terminal<M>>,
    /// Distance from the root.
    pub(crate) depth: usize,
    /// Every letter found on this node or any node beneath it.
    ///
    /// This is maintained as `own letter | union of the children's masks`, both on insertion and
    /// on removal.
    pub(crate) mask: Letters,
    /// Number of stored keys whose path passes through this node.
    pub(crate) word_count: usize,
}

impl<M> Node<M> {
    fn new(value: Option<char>, parent: Option<NodeId>, depth: usize) -> Self {
        Self {
            value,
            parent,
            children: HashMap::new(),
            terminal: None,
            depth,
            mask: Letters::empty(),
            word_count: 0,
        }
    }

    /// The single-letter contribution of this node to its own mask.
    #[inline]
    fn own_letter(&self) -> Letters {
        self.value
            .and_then(Letters::of)
            .unwrap_or_else(Letters::empty)
    }
}

/// Index arena owning every [`Node`] of a trie, along with the count of stored keys.
///
/// Slots of removed nodes are recycled by later insertions.
#[derive(Debug)]
pub(crate) struct Graph<M> {
    slots: Vec<Option<Node<M>>>,
    free: Vec<NodeId>,
    size: usize,
}

impl<M> Graph<M> {
    pub(crate) fn new() -> Self {
        Self {
            slots: vec![Some(Node::new(None, None, 0))],
            free: Vec::new(),
            size: 0,
        }
    }

    /// Number of keys currently stored.
    #[inline]
    pub(crate) fn size(&self) -> usize {
        self.size
    }

    fn alloc(&mut self, node: Node<M>) -> NodeId {
        match self.free.pop() {
            Some(id) => {
                self.slots[id.0] = Some(node);
                id
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        }
    }

    /// Releases `id` and every node beneath it.
    fn free_subtree(&mut self, id: NodeId) {
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            if let Some(node) = self.slots[id.0].take() {
                stack.extend(node.children.values().copied());
                self.free.push(id);
            }
        }
    }

    /// Returns the node spelled out by `key`, starting from the root.
    pub(crate) fn find(&self, key: &str) -> Option<NodeId> {
        key.chars()
            .try_fold(ROOT, |id, c| self[id].children.get(&c).copied())
    }

    /// Stores `key` with `metadata`, creating any missing nodes along its path.
    ///
    /// If `key` is already stored, its metadata is replaced and the previous metadata is
    /// returned; nothing else changes. The caller is responsible for validating `key`.
    pub(crate) fn insert(&mut self, key: &str, metadata: M) -> Option<M> {
        if let Some(id) = self.find(key) {
            if let Some(terminal) = &mut self[id].terminal {
                return Some(mem::replace(&mut terminal.metadata, metadata));
            }
        }

        let chars = key.chars().collect::<Vec<_>>();
        // suffixes[i] holds the letters of chars[i..].
        let mut suffixes = vec![Letters::empty(); chars.len() + 1];
        for (i, c) in chars.iter().enumerate().rev() {
            suffixes[i] = suffixes[i + 1] | Letters::of(*c).unwrap_or_else(Letters::empty);
        }

        let mut id = ROOT;
        self[id].mask |= suffixes[0];
        self[id].word_count += 1;
        for (i, c) in chars.iter().enumerate() {
            id = match self[id].children.get(c) {
                Some(&child) => child,
                None => {
                    let depth = self[id].depth + 1;
                    let child = self.alloc(Node::new(Some(*c), Some(id), depth));
                    self[id].children.insert(*c, child);
                    child
                }
            };
            let node = &mut self[id];
            node.mask |= suffixes[i];
            node.word_count += 1;
        }
        self[id].terminal = Some(Terminal {
            key: key.to_owned(),
            metadata,
        });
        self.size += 1;

        None
    }

    /// Removes `key`, returning its metadata, or `None` if `key` was not stored.
    ///
    /// If the key's node still has children only its terminal is cleared. Otherwise the
    /// non-branching chain ending at the key is detached from the nearest ancestor that has
    /// another child, ends another key, or is the root. Masks are then recomputed upwards from
    /// that ancestor.
    pub(crate) fn remove(&mut self, key: &str) -> Option<M> {
        let id = self.find(key)?;
        let terminal = self[id].terminal.take()?;
        self.size -= 1;

        let mut ancestor = Some(id);
        while let Some(current) = ancestor {
            let node = &mut self[current];
            node.word_count = node.word_count.saturating_sub(1);
            ancestor = node.parent;
        }

        if !self[id].children.is_empty() {
            return Some(terminal.metadata);
        }

        let mut top = id;
        let parent = loop {
            // Only the root has no parent, and the root never holds a terminal.
            let parent = match self[top].parent {
                Some(parent) => parent,
                None => unreachable!("terminal found on the root node"),
            };
            let node = &self[parent];
            if parent == ROOT || node.children.len() > 1 || node.terminal.is_some() {
                break parent;
            }
            top = parent;
        };
        if let Some(value) = self[top].value {
            self[parent].children.remove(&value);
        }
        self.free_subtree(top);

        let mut ancestor = Some(parent);
        while let Some(current) = ancestor {
            self.recompute_mask(current);
            ancestor = self[current].parent;
        }

        Some(terminal.metadata)
    }

    /// Resets the mask of `id` to its own letter combined with its children's masks.
    fn recompute_mask(&mut self, id: NodeId) {
        let node = &self[id];
        let mask = node
            .children
            .values()
            .fold(node.own_letter(), |mask, child| mask | self[*child].mask);
        self[id].mask = mask;
    }

    /// Collects the keys of every terminal at or beneath `id`, in traversal order.
    pub(crate) fn collect(&self, id: NodeId) -> Vec<String> {
        let mut keys = Vec::new();
        let mut stack = vec![id];
        while let Some(id) = stack.pop() {
            let node = &self[id];
            stack.extend(node.children.values().copied());
            if let Some(terminal) = &node.terminal {
                keys.push(terminal.key.clone());
            }
        }
        keys
    }
}

impl<M> ops::Index<NodeId> for Graph<M> {
    type Output = Node<M>;

    #[inline]
    fn index(&self, id: NodeId) -> &Node<M> {
        match &self.slots[id.0] {
            Some(node) => node,
            None => unreachable!("access to freed node {:?}", id),
        }
    }
}

impl<M> ops::IndexMut<NodeId> for Graph<M> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut Node<M> {
        match &mut self.slots[id.0] {
            Some(node) => node,
            None => unreachable!("access to freed node {:?}", id),
        }
    }
}

/// A borrowed handle to a single node of a [`Trie`].
///
/// Obtained through a [`Reader`], which keeps the trie locked for reading while any `NodeRef` is
/// alive.
///
/// [`Trie`]: crate::Trie
/// [`Reader`]: crate::Reader
pub struct NodeRef<'a, M> {
    graph: &'a Graph<M>,
    id: NodeId,
}

impl<'a, M> NodeRef<'a, M> {
    #[inline]
    pub(crate) fn new(graph: &'a Graph<M>, id: NodeId) -> Self {
        Self { graph, id }
    }

    #[inline]
    fn node(&self) -> &'a Node<M> {
        &self.graph[self.id]
    }

    /// The character on the edge leading to this node, or `None` for the root.
    pub fn value(&self) -> Option<char> {
        self.node().value
    }

    /// The parent node, or `None` for the root.
    pub fn parent(&self) -> Option<NodeRef<'a, M>> {
        self.node().parent.map(|id| NodeRef::new(self.graph, id))
    }

    /// The child reached through the edge `c`, if any.
    pub fn child(&self, c: char) -> Option<NodeRef<'a, M>> {
        self.node()
            .children
            .get(&c)
            .map(|id| NodeRef::new(self.graph, *id))
    }

    /// All children, in arbitrary order.
    pub fn children(&self) -> impl Iterator<Item = NodeRef<'a, M>> + 'a {
        let graph = self.graph;
        self.node()
            .children
            .values()
            .map(move |id| NodeRef::new(graph, *id))
    }

    /// Whether an inserted key ends exactly at this node.
    pub fn is_terminal(&self) -> bool {
        self.node().terminal.is_some()
    }

    pub fn depth(&self) -> usize {
        self.node().depth
    }

    /// The letters found on this node and everywhere beneath it.
    pub fn mask(&self) -> Letters {
        self.node().mask
    }

    /// The number of stored keys passing through this node.
    pub fn word_count(&self) -> usize {
        self.node().word_count
    }

    /// The full key ending at this node, if it is terminal.
    pub fn key(&self) -> Option<&'a str> {
        self.node().terminal.as_ref().map(|t| t.key.as_str())
    }

    /// The metadata stored with the key ending at this node, if it is terminal.
    pub fn metadata(&self) -> Option<&'a M> {
        self.node().terminal.as_ref().map(|t| &t.metadata)
    }

    /// The keys of every terminal at or beneath this node, in arbitrary order.
    pub fn keys(&self) -> Vec<String> {
        self.graph.collect(self.id)
    }
}

impl<M> Clone for NodeRef<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M> Copy for NodeRef<'_, M> {}

#[cfg(test)]
mod tests {
    use crate::{
        letters::Letters,
        node::{Graph, ROOT},
    };

    fn sorted(mut keys: Vec<String>) -> Vec<String> {
        keys.sort();
        keys
    }

    #[test]
    fn insert() {
        let mut graph = Graph::new();
        assert_eq!(graph.insert("foo", 1), None);

        let id = graph.find("foo").unwrap();
        let terminal = graph[id].terminal.as_ref().unwrap();
        assert_eq!(terminal.key, "foo");
        assert_eq!(terminal.metadata, 1);
        assert_eq!(graph[id].depth, 3);
        assert_eq!(graph.size(), 1);
    }

    #[test]
    fn insert_existing_replaces_metadata() {
        let mut graph = Graph::new();
        graph.insert("foo", 1);

        assert_eq!(graph.insert("foo", 2), Some(1));
        assert_eq!(graph.size(), 1);
        assert_eq!(graph[ROOT].word_count, 1);
        let id = graph.find("foo").unwrap();
        assert_eq!(graph[id].terminal.as_ref().unwrap().metadata, 2);
    }

    #[test]
    fn insert_masks_hold_suffix_letters() {
        let mut graph = Graph::new();
        graph.insert("cat", ());
        graph.insert("cow", ());

        assert_eq!(
            graph[ROOT].mask,
            Letters::A | Letters::C | Letters::O | Letters::T | Letters::W
        );
        assert_eq!(
            graph[graph.find("c").unwrap()].mask,
            Letters::A | Letters::C | Letters::O | Letters::T | Letters::W
        );
        assert_eq!(graph[graph.find("ca").unwrap()].mask, Letters::A | Letters::T);
        assert_eq!(graph[graph.find("co").unwrap()].mask, Letters::O | Letters::W);
        assert_eq!(graph[graph.find("cow").unwrap()].mask, Letters::W);
    }

    #[test]
    fn word_counts() {
        let mut graph = Graph::new();
        graph.insert("car", ());
        graph.insert("cat", ());
        graph.insert("ca", ());

        assert_eq!(graph[ROOT].word_count, 3);
        assert_eq!(graph[graph.find("ca").unwrap()].word_count, 3);
        assert_eq!(graph[graph.find("cat").unwrap()].word_count, 1);

        graph.remove("cat");
        assert_eq!(graph[ROOT].word_count, 2);
        assert_eq!(graph[graph.find("ca").unwrap()].word_count, 2);
    }

    #[test]
    fn remove_detaches_chain() {
        let mut graph = Graph::new();
        graph.insert("cat", 1);
        graph.insert("car", 2);

        assert_eq!(graph.remove("cat"), Some(1));
        assert!(graph.find("cat").is_none());
        assert!(graph.find("ca").is_some());
        assert!(graph.find("car").is_some());
        assert_eq!(graph.size(), 1);
    }

    #[test]
    fn remove_whole_branch_from_root() {
        let mut graph = Graph::new();
        graph.insert("foo", ());

        assert_eq!(graph.remove("foo"), Some(()));
        assert!(graph[ROOT].children.is_empty());
        assert_eq!(graph[ROOT].mask, Letters::empty());
        assert_eq!(graph.size(), 0);
    }

    #[test]
    fn remove_stops_at_terminal_ancestor() {
        let mut graph = Graph::new();
        graph.insert("ca", 1);
        graph.insert("cat", 2);

        assert_eq!(graph.remove("cat"), Some(2));
        let id = graph.find("ca").unwrap();
        assert_eq!(graph[id].terminal.as_ref().unwrap().metadata, 1);
        assert!(graph[id].children.is_empty());
        assert_eq!(graph[id].mask, Letters::A);
    }

    #[test]
    fn remove_prefix_key_keeps_children() {
        let mut graph = Graph::new();
        graph.insert("ca", 1);
        graph.insert("cat", 2);

        assert_eq!(graph.remove("ca"), Some(1));
        assert!(graph[graph.find("ca").unwrap()].terminal.is_none());
        assert!(graph[graph.find("cat").unwrap()].terminal.is_some());
        assert_eq!(graph.size(), 1);
    }

    #[test]
    fn remove_missing() {
        let mut graph = Graph::new();
        graph.insert("cat", ());

        assert_eq!(graph.remove("dog"), None);
        assert_eq!(graph.remove("ca"), None);
        assert_eq!(graph.remove(""), None);
        assert_eq!(graph.size(), 1);
    }

    #[test]
    fn remove_recomputes_masks() {
        let mut graph = Graph::new();
        graph.insert("cat", ());
        graph.insert("cow", ());

        graph.remove("cow");
        assert_eq!(graph[ROOT].mask, Letters::A | Letters::C | Letters::T);
        assert_eq!(
            graph[graph.find("c").unwrap()].mask,
            Letters::A | Letters::C | Letters::T
        );
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut graph = Graph::new();
        graph.insert("abc", ());
        graph.remove("abc");
        graph.insert("xyz", ());

        assert_eq!(graph.slots.len(), 4);
        assert!(graph.free.is_empty());
    }

    #[test]
    fn collect() {
        let mut graph = Graph::new();
        graph.insert("car", ());
        graph.insert("cat", ());
        graph.insert("dog", ());

        assert_eq!(sorted(graph.collect(ROOT)), vec!["car", "cat", "dog"]);
        assert_eq!(
            sorted(graph.collect(graph.find("ca").unwrap())),
            vec!["car", "cat"]
        );
    }
}
