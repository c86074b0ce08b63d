use crate::{error::Result, node::Graph, Trie};
use std::sync::RwLock;
use tracing::debug;

/// A builder for a [`Trie`] populated with a lexicon.
///
/// Keys are collected without validation and checked all at once by [`build()`]. If any key is
/// rejected, no trie is produced.
///
/// # Example
/// ```
/// use lexicon_trie::TrieBuilder;
///
/// let trie = TrieBuilder::new()
///     .word("foo", 1)
///     .words(vec![("bar", 2), ("baz", 3)])
///     .build()
///     .unwrap();
///
/// assert_eq!(trie.len(), 3);
/// ```
///
/// [`build()`]: TrieBuilder::build
#[derive(Clone, Debug)]
pub struct TrieBuilder<M> {
    words: Vec<(String, M)>,
}

impl<M> TrieBuilder<M> {
    /// Creates an empty builder.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Adds a single key and its metadata.
    #[inline]
    pub fn word<S>(mut self, key: S, metadata: M) -> Self
    where
        S: Into<String>,
    {
        self.words.push((key.into(), metadata));
        self
    }

    /// Adds every `(key, metadata)` pair from `words`.
    pub fn words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = (S, M)>,
        S: Into<String>,
    {
        self.words
            .extend(words.into_iter().map(|(key, metadata)| (key.into(), metadata)));
        self
    }

    /// Validates every key and inserts them, in order, into a new [`Trie`].
    ///
    /// A key added more than once keeps the metadata it was added with last.
    ///
    /// # Errors
    /// Returns the error for the first key that cannot be stored.
    pub fn build(self) -> Result<Trie<M>> {
        for (key, _) in &self.words {
            crate::Error::validate(key)?;
        }

        let mut graph = Graph::new();
        for (key, metadata) in self.words {
            graph.insert(&key, metadata);
        }
        debug!(size = graph.size(), "built trie");
        Ok(Trie {
            graph: RwLock::new(graph),
        })
    }
}

impl<M> Default for TrieBuilder<M> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}
