//! Censors used by [`Trie::filter_with`].
//!
//! A censor is any `Fn(&str) -> String`. It receives each span of the input that the filter
//! decided to censor and returns the text written in its place. The functions here build the
//! common ones.
//!
//! # Examples
//! Filtering with a custom censor is done as follows:
//!
//! ```
//! use lexicon_trie::{censor, Trie};
//!
//! let trie = Trie::new();
//! trie.insert("foo", ()).unwrap();
//!
//! assert_eq!(
//!     trie.filter_with("a foo", censor::replace_chars_with("#")),
//!     ("a ###".to_owned(), true)
//! );
//! ```
//!
//! Any closure can be provided instead. The following has the same effect as the one above:
//!
//! ```
//! use lexicon_trie::Trie;
//!
//! let trie = Trie::new();
//! trie.insert("foo", ()).unwrap();
//!
//! let (output, _) = trie.filter_with("a foo", |span| "#".repeat(span.chars().count()));
//! assert_eq!(output, "a ###");
//! ```
//!
//! [`Trie::filter_with`]: crate::Trie::filter_with

#[cfg(feature = "unicode-segmentation")]
use unicode_segmentation::UnicodeSegmentation;

/// Creates a censor writing `replacement` once for every character of the span.
///
/// This is the censor used by [`Trie::filter`].
///
/// # Example
/// ```
/// use lexicon_trie::censor;
///
/// assert_eq!(censor::replace_chars_with("#")("foo"), "###");
/// ```
///
/// [`Trie::filter`]: crate::Trie::filter
pub fn replace_chars_with(replacement: &str) -> impl Fn(&str) -> String + '_ {
    move |span| {
        span.chars()
            .fold(String::with_capacity(span.len()), |mut accumulator, _char| {
                accumulator.push_str(replacement);
                accumulator
            })
    }
}

/// Creates a censor writing `replacement` once for every grapheme of the span.
///
/// # Example
/// ```
/// use lexicon_trie::censor;
///
/// assert_eq!(censor::replace_graphemes_with("#")("bãr"), "###");
/// ```
#[cfg(feature = "unicode-segmentation")]
pub fn replace_graphemes_with(replacement: &str) -> impl Fn(&str) -> String + '_ {
    move |span| {
        span.graphemes(true)
            .fold(String::with_capacity(span.len()), |mut accumulator, _cluster| {
                accumulator.push_str(replacement);
                accumulator
            })
    }
}

/// Creates a censor replacing the whole span with `replacement`.
///
/// Adjacent matches are flushed as a single span, so they are replaced only once.
///
/// # Example
/// ```
/// use lexicon_trie::{censor, Trie};
///
/// let trie = Trie::new();
/// trie.insert("foo", ()).unwrap();
///
/// let (output, _) = trie.filter_with("censor foo.", censor::replace_words_with("<censored>"));
/// assert_eq!(output, "censor <censored>.");
/// ```
pub fn replace_words_with(replacement: &str) -> impl Fn(&str) -> String + '_ {
    move |_span| replacement.to_owned()
}
