//! Whitespace tokenization and word validation.
//!
//! Splitting is on the space character only: a token containing a tab or
//! newline stays one token and is rejected by [`is_valid_word`], so malformed
//! input fails loudly instead of being silently re-segmented.

/// Split `text` into non-empty space-delimited slices. Lazy and restartable;
/// runs of spaces collapse into single separators.
pub fn split_into_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(' ').filter(|word| !word.is_empty())
}

/// A valid word contains no control characters (code points below 0x20).
pub fn is_valid_word(word: &str) -> bool {
    !word.chars().any(|c| (c as u32) < 0x20)
}
