//! Case folding and word-boundary detection
//!
//! Folding maps every `char` to exactly one `char` so that offsets into the
//! folded haystack are offsets into the original one. Characters whose
//! lowercase form expands to several scalars keep only the first (`İ` → `i`).

#[inline]
pub(crate) fn fold_char(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_lowercase();
    }
    c.to_lowercase().next().unwrap_or(c)
}

/// Fold `input` into `out`, replacing its previous contents.
pub(crate) fn fold_into(input: &str, out: &mut Vec<char>) {
    out.clear();
    out.extend(input.chars().map(fold_char));
}

/// Position 0, or any position immediately after whitespace
#[inline]
pub(crate) fn is_word_boundary(chars: &[char], pos: usize) -> bool {
    pos == 0 || chars.get(pos - 1).is_some_and(|c| c.is_whitespace())
}

/// Precompute the boundary flag of every position of `chars`.
pub(crate) fn fill_boundaries(chars: &[char], out: &mut Vec<bool>) {
    out.clear();
    out.extend((0..chars.len()).map(|pos| is_word_boundary(chars, pos)));
}
