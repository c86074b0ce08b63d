//! Ordered-subsequence ("fuzzy") search over the trie's graph.
//!
//! A key matches a pattern if the pattern's characters appear along the key, in order, but not
//! necessarily next to each other. The search walks the graph with a worklist of
//! `(node, pattern index)` pairs, skipping any subtree whose [`Letters`] mask is missing one of
//! the letters the rest of the pattern still needs.

use crate::{
    letters::Letters,
    node::{Graph, NodeId, ROOT},
};
use tracing::{debug_span, trace};

/// Returns every stored key containing `pattern` as an ordered subsequence, sorted by length.
///
/// An empty pattern matches every key. A pattern with characters outside the alphabet cannot
/// match any stored key.
pub(crate) fn search<M>(graph: &Graph<M>, pattern: &str) -> Vec<String> {
    let _span = debug_span!("fuzzy_search", pattern).entered();

    let pattern = pattern.chars().collect::<Vec<_>>();
    // required[i] holds the letters of pattern[i..].
    let mut required = vec![Letters::empty(); pattern.len() + 1];
    for (i, c) in pattern.iter().enumerate().rev() {
        match Letters::of(*c) {
            Some(letter) => required[i] = required[i + 1] | letter,
            None => return Vec::new(),
        }
    }

    let mut keys = if pattern.is_empty() {
        graph.collect(ROOT)
    } else {
        collect_matches(graph, &pattern, &required)
    };
    keys.sort_by_key(|key| key.chars().count());
    keys
}

fn collect_matches<M>(graph: &Graph<M>, pattern: &[char], required: &[Letters]) -> Vec<String> {
    let mut keys = Vec::new();
    let mut worklist: Vec<(NodeId, usize)> = vec![(ROOT, 0)];
    while let Some((id, mut index)) = worklist.pop() {
        let node = &graph[id];
        if !node.mask.contains(required[index]) {
            trace!(depth = node.depth, index, "pruned");
            continue;
        }

        if node.value == Some(pattern[index]) {
            index += 1;
            if index == pattern.len() {
                keys.extend(graph.collect(id));
                continue;
            }
        }

        worklist.extend(node.children.values().map(|child| (*child, index)));
    }
    keys
}
