//! Walker for the [`Trie`]'s text filtering.
//!
//! [`Walker`] scans an input string once from left to right, following the trie's edges one
//! character at a time. Every stretch of input recognized as a run of stored keys is handed to a
//! censor, while all other text is copied through unchanged.
//!
//! Matching is literal and restarts from the root on a mismatch. No failure links are computed,
//! so a match that begins inside an abandoned partial match is not found.
//!
//! [`Trie`]: crate::Trie

use crate::node::{Graph, NodeId, ROOT};
use tracing::{debug_span, trace};

/// A single filtering pass over one input string.
///
/// Positions (`start`, and the arguments to the flushing methods) are character indices into
/// `chars`, not byte offsets.
pub(crate) struct Walker<'a, M, F> {
    graph: &'a Graph<M>,
    text: &'a str,
    chars: Vec<(usize, char)>,
    censor: F,

    /// Current position in the graph. `ROOT` means no partial match is in progress.
    node: NodeId,
    /// First character not yet written to `output`.
    start: usize,
    output: String,
    /// Whether any stored key was recognized during the pass.
    matched: bool,
}

impl<'a, M, F> Walker<'a, M, F>
where
    F: Fn(&str) -> String,
{
    pub(crate) fn new(graph: &'a Graph<M>, text: &'a str, censor: F) -> Self {
        Self {
            graph,
            text,
            chars: text.char_indices().collect(),
            censor,

            node: ROOT,
            start: 0,
            output: String::with_capacity(text.len()),
            matched: false,
        }
    }

    /// Byte offset of the character at index `i`, or the end of the text.
    #[inline]
    fn offset(&self, i: usize) -> usize {
        self.chars
            .get(i)
            .map_or(self.text.len(), |(offset, _)| *offset)
    }

    /// Copies the text from `start` up to `end` unchanged.
    fn pass_through(&mut self, end: usize) {
        let span = &self.text[self.offset(self.start)..self.offset(end)];
        self.output.push_str(span);
        self.start = end;
    }

    /// Writes the censored text from `start` up to `end`.
    fn censor_span(&mut self, end: usize) {
        let span = &self.text[self.offset(self.start)..self.offset(end)];
        trace!(start = self.start, end, "censoring span");
        self.output.push_str(&(self.censor)(span));
        self.start = end;
    }

    /// Runs the pass to completion, returning the filtered text and whether anything matched.
    pub(crate) fn run(mut self) -> (String, bool) {
        let _span = debug_span!("filter", len = self.chars.len()).entered();

        let graph = self.graph;
        let len = self.chars.len();
        let mut k = 0;
        while k < len {
            // Whether a stored key ended somewhere during this attempt.
            let mut matched_end = false;
            let mut next = k + 1;
            let mut j = k;
            while j < len {
                let c = self.chars[j].1;
                match graph[self.node].children.get(&c) {
                    None => {
                        self.node = ROOT;
                        if matched_end {
                            self.censor_span(j);
                            // Resume scanning at the mismatched character.
                            next = j;
                        } else {
                            self.pass_through(k + 1);
                        }
                        break;
                    }
                    Some(&child) => {
                        self.node = child;
                        if graph[child].terminal.is_some() {
                            matched_end = true;
                            self.matched = true;
                            if j == len - 1 {
                                self.censor_span(len);
                                next = len;
                            }
                        }
                    }
                }
                j += 1;
            }
            k = next;
        }

        if self.start < len {
            self.pass_through(len);
        }

        (self.output, self.matched)
    }
}
