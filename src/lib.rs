//! A prefix tree for lexicon lookup, fuzzy searching, and text censoring.
//!
//! A [`Trie`] stores a lexicon of lower-case keys, each with caller-defined metadata. Besides
//! exact and prefix lookups, it supports ordered-subsequence ("fuzzy") searching pruned by
//! per-node letter masks, and single-pass filtering of arbitrary text, replacing every recognized
//! run of lexicon words.
//!
//! # Example
//! ```
//! use lexicon_trie::Trie;
//!
//! let trie = Trie::new();
//! trie.insert("bad", "mild").unwrap();
//! trie.insert("worse", "strong").unwrap();
//!
//! assert_eq!(trie.find("bad").unwrap().metadata, "mild");
//! assert_eq!(trie.fuzzy_search("wrs"), vec!["worse"]);
//! assert_eq!(trie.filter("this is bad", "*"), ("this is ***".to_owned(), true));
//! ```
//!
//! # Alphabet
//! Keys may only contain the characters `a` through `z`; anything else is rejected with an
//! [`Error`]. Text passed to [`Trie::filter`] may contain anything, since characters outside of
//! the alphabet simply never match.
//!
//! # Concurrency
//! A `Trie` is shared by reference across threads. Mutations take a write lock for their whole
//! duration and every lookup takes a read lock, so readers never observe a partially applied
//! mutation.

pub mod censor;

mod builder;
mod error;
mod fuzzy;
mod letters;
mod node;
mod walker;

pub use builder::TrieBuilder;
pub use error::{Error, Result};
pub use letters::Letters;
pub use node::NodeRef;

use node::{Graph, ROOT};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, debug_span};
use walker::Walker;

/// A stored key along with its metadata, as returned by [`Trie::find`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry<M> {
    pub key: String,
    pub metadata: M,
    /// Length of the key in characters, which is the depth of its node.
    pub depth: usize,
    /// Letters found on the key's node and beneath it.
    pub mask: Letters,
    /// Number of stored keys having this key as a prefix, including itself.
    pub word_count: usize,
}

/// A read lock on a [`Trie`], giving direct access to its nodes.
///
/// Mutations of the trie block until the `Reader` is dropped.
///
/// # Example
/// ```
/// use lexicon_trie::Trie;
///
/// let trie = Trie::new();
/// trie.insert("foo", 1).unwrap();
///
/// let reader = trie.read();
/// let node = reader.node("fo").unwrap();
/// assert_eq!(node.value(), Some('o'));
/// assert_eq!(node.depth(), 2);
/// assert_eq!(node.child('o').unwrap().metadata(), Some(&1));
/// ```
pub struct Reader<'a, M> {
    graph: RwLockReadGuard<'a, Graph<M>>,
}

impl<M> Reader<'_, M> {
    /// The root node, which has no value and depth `0`.
    pub fn root(&self) -> NodeRef<'_, M> {
        NodeRef::new(&self.graph, ROOT)
    }

    /// The node at the end of the path spelled by `key`, whether or not `key` itself is stored.
    pub fn node(&self, key: &str) -> Option<NodeRef<'_, M>> {
        self.graph.find(key).map(|id| NodeRef::new(&self.graph, id))
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.graph.size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A prefix tree mapping lower-case keys to metadata of type `M`.
#[derive(Debug)]
pub struct Trie<M> {
    graph: RwLock<Graph<M>>,
}

impl<M> Trie<M> {
    /// Creates an empty `Trie`.
    pub fn new() -> Self {
        Self {
            graph: RwLock::new(Graph::new()),
        }
    }

    // A panic can only poison the lock between complete operations, so the graph is still
    // consistent and the poison is ignored.
    fn read_graph(&self) -> RwLockReadGuard<'_, Graph<M>> {
        self.graph.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_graph(&self) -> RwLockWriteGuard<'_, Graph<M>> {
        self.graph.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stores `key` with `metadata`.
    ///
    /// If `key` was already stored, its metadata is replaced and the previous metadata is
    /// returned.
    ///
    /// # Errors
    /// Returns an error, without modifying the trie, if `key` is empty or contains a character
    /// outside of `a..=z`.
    pub fn insert(&self, key: &str, metadata: M) -> Result<Option<M>> {
        let _span = debug_span!("insert", key).entered();

        if let Err(error) = Error::validate(key) {
            debug!(%error, "rejected key");
            return Err(error);
        }
        let previous = self.write_graph().insert(key, metadata);
        debug!(replaced = previous.is_some());
        Ok(previous)
    }

    /// Removes `key`, returning its metadata.
    ///
    /// Removing a key that is not stored does nothing and returns `None`.
    pub fn remove(&self, key: &str) -> Option<M> {
        let _span = debug_span!("remove", key).entered();

        let removed = self.write_graph().remove(key);
        debug!(removed = removed.is_some());
        removed
    }

    /// Returns whether `key` is stored.
    pub fn contains(&self, key: &str) -> bool {
        let graph = self.read_graph();
        graph
            .find(key)
            .map_or(false, |id| graph[id].terminal.is_some())
    }

    /// Returns whether any stored key starts with `prefix`.
    ///
    /// Every string is a prefix of itself, and the empty string is a prefix of everything,
    /// including an empty trie.
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.read_graph().find(prefix).is_some()
    }

    /// Returns every stored key starting with `prefix`, in arbitrary order.
    ///
    /// Returns `None` if no stored key starts with `prefix`. The empty prefix on an empty trie
    /// gives `Some` empty list.
    pub fn prefix_search(&self, prefix: &str) -> Option<Vec<String>> {
        let graph = self.read_graph();
        graph.find(prefix).map(|id| graph.collect(id))
    }

    /// Returns every stored key, in arbitrary order.
    pub fn keys(&self) -> Vec<String> {
        self.read_graph().collect(ROOT)
    }

    /// Returns every stored key containing the characters of `pattern` in order, though not
    /// necessarily next to each other.
    ///
    /// The result is sorted by key length, shortest first. The order of keys of equal length is
    /// unspecified.
    ///
    /// # Example
    /// ```
    /// use lexicon_trie::Trie;
    ///
    /// let trie = Trie::new();
    /// trie.insert("fobar", ()).unwrap();
    /// trie.insert("bar", ()).unwrap();
    /// trie.insert("baz", ()).unwrap();
    ///
    /// assert_eq!(trie.fuzzy_search("br"), vec!["bar", "fobar"]);
    /// ```
    pub fn fuzzy_search(&self, pattern: &str) -> Vec<String> {
        fuzzy::search(&self.read_graph(), pattern)
    }

    /// Replaces every character of every recognized run of stored keys in `text` with
    /// `replacement`.
    ///
    /// Returns the filtered text and whether any stored key was recognized.
    ///
    /// Matching is literal and restarts from the beginning of the lexicon on a mismatch, without
    /// backtracking. Keys following each other directly are replaced as one run, and a run extends
    /// up to the point where the lexicon stops matching, even past the end of the last complete
    /// key.
    ///
    /// # Example
    /// ```
    /// use lexicon_trie::Trie;
    ///
    /// let trie = Trie::new();
    /// trie.insert("ab", ()).unwrap();
    /// trie.insert("cd", ()).unwrap();
    ///
    /// assert_eq!(trie.filter("xabcdy", "*"), ("x****y".to_owned(), true));
    /// assert_eq!(trie.filter("clean", "*"), ("clean".to_owned(), false));
    /// ```
    pub fn filter(&self, text: &str, replacement: &str) -> (String, bool) {
        self.filter_with(text, censor::replace_chars_with(replacement))
    }

    /// Filters `text` the same way as [`filter()`], writing `censor(span)` in place of every
    /// recognized run.
    ///
    /// See the [`censor`] module for common censors.
    ///
    /// [`filter()`]: Trie::filter
    pub fn filter_with<F>(&self, text: &str, censor: F) -> (String, bool)
    where
        F: Fn(&str) -> String,
    {
        Walker::new(&self.read_graph(), text, censor).run()
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.read_graph().size()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Locks the trie for reading, giving access to its nodes.
    pub fn read(&self) -> Reader<'_, M> {
        Reader {
            graph: self.read_graph(),
        }
    }
}

impl<M> Trie<M>
where
    M: Clone,
{
    /// Looks up `key`, returning a copy of its [`Entry`] if it is stored.
    pub fn find(&self, key: &str) -> Option<Entry<M>> {
        let graph = self.read_graph();
        let node = &graph[graph.find(key)?];
        node.terminal.as_ref().map(|terminal| Entry {
            key: terminal.key.clone(),
            metadata: terminal.metadata.clone(),
            depth: node.depth,
            mask: node.mask,
            word_count: node.word_count,
        })
    }
}

impl<M> Default for Trie<M> {
    fn default() -> Self {
        Self::new()
    }
}
