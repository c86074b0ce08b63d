/// Errors returned when building or mutating a [`Trie`].
///
/// Missing keys are never errors; lookups report absence through `Option` and `bool` results.
///
/// [`Trie`]: crate::Trie
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("empty keys cannot be inserted")]
    EmptyKey,

    #[error("key {key:?} contains {character:?} at index {index}, outside of the alphabet a-z")]
    InvalidCharacter {
        key: String,
        character: char,
        /// Character (not byte) index of the offending character.
        index: usize,
    },
}

pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    /// Checks that `key` can be stored in a trie.
    pub(crate) fn validate(key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(Error::EmptyKey);
        }
        match crate::letters::Letters::first_invalid(key) {
            Some((index, character)) => Err(Error::InvalidCharacter {
                key: key.to_owned(),
                character,
                index,
            }),
            None => Ok(()),
        }
    }
}
