//! Alphabet bit-set used to prune subtrees during fuzzy searching.
//!
//! Every node in the [`Trie`] carries a [`Letters`] mask summarizing the letters found on any path
//! beneath it. The mask is only meaningful over a fixed, small alphabet; here that is the 26 ASCII
//! lower-case letters, mapped to bits `0..26` by [`Letters::of`]. Characters outside of the
//! alphabet have no bit, and keys containing them are rejected at insertion.
//!
//! [`Trie`]: crate::Trie

use bitflags::bitflags;

bitflags! {
    /// A set of letters from the alphabet `a..=z`.
    ///
    /// Bit `n` corresponds to the letter `'a' + n`.
    pub struct Letters: u32 {
        const A = 1 << 0;
        const B = 1 << 1;
        const C = 1 << 2;
        const D = 1 << 3;
        const E = 1 << 4;
        const F = 1 << 5;
        const G = 1 << 6;
        const H = 1 << 7;
        const I = 1 << 8;
        const J = 1 << 9;
        const K = 1 << 10;
        const L = 1 << 11;
        const M = 1 << 12;
        const N = 1 << 13;
        const O = 1 << 14;
        const P = 1 << 15;
        const Q = 1 << 16;
        const R = 1 << 17;
        const S = 1 << 18;
        const T = 1 << 19;
        const U = 1 << 20;
        const V = 1 << 21;
        const W = 1 << 22;
        const X = 1 << 23;
        const Y = 1 << 24;
        const Z = 1 << 25;
    }
}

impl Letters {
    /// Returns the bit index of `c` within the alphabet, if it belongs to it.
    #[inline]
    fn index(c: char) -> Option<u32> {
        if c.is_ascii_lowercase() {
            Some(c as u32 - 'a' as u32)
        } else {
            None
        }
    }

    /// Returns the single-letter set for `c`, or `None` if `c` is outside the alphabet.
    #[inline]
    pub fn of(c: char) -> Option<Self> {
        Self::index(c).map(|index| Self::from_bits_truncate(1 << index))
    }

    /// Returns the position and value of the first character in `s` outside the alphabet.
    pub(crate) fn first_invalid(s: &str) -> Option<(usize, char)> {
        s.chars().enumerate().find(|(_, c)| Self::of(*c).is_none())
    }
}

#[cfg(test)]
mod tests {
    use super::Letters;

    #[test]
    fn of() {
        assert_eq!(Letters::of('a'), Some(Letters::A));
        assert_eq!(Letters::of('z'), Some(Letters::Z));
    }

    #[test]
    fn of_outside_alphabet() {
        assert_eq!(Letters::of('A'), None);
        assert_eq!(Letters::of('`'), None);
        assert_eq!(Letters::of('{'), None);
        assert_eq!(Letters::of('ã'), None);
        assert_eq!(Letters::of('\0'), None);
    }

    #[test]
    fn first_invalid() {
        assert_eq!(Letters::first_invalid("foo"), None);
        assert_eq!(Letters::first_invalid("foO"), Some((2, 'O')));
        assert_eq!(Letters::first_invalid("bãr"), Some((1, 'ã')));
    }
}
