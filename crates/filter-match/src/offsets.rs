//! Range conversion for hosts that index strings differently
//!
//! [`MatchRange`] offsets count Unicode scalar values. UI hosts backed by
//! UTF-16 strings need code-unit offsets (astral-plane characters such as
//! emoji take two units), and Rust callers slicing the haystack need bytes.

use std::ops::Range;

use crate::matcher::{Match, MatchRange};

/// `table[i]` is the offset of char `i` in the target unit; the last entry is the total length.
fn offset_table(haystack: &str, unit_len: impl Fn(char) -> usize) -> Vec<usize> {
    let mut table = Vec::with_capacity(haystack.len() + 1);
    let mut offset = 0;
    for c in haystack.chars() {
        table.push(offset);
        offset += unit_len(c);
    }
    table.push(offset);
    table
}

/// Offsets past the end of the haystack clamp to its length.
fn remap<'a>(
    ranges: &'a [MatchRange],
    table: &'a [usize],
) -> impl Iterator<Item = (usize, usize)> + 'a {
    let last = table.last().copied().unwrap_or(0);
    let lookup = move |i: usize| table.get(i).copied().unwrap_or(last);
    ranges.iter().map(move |r| (lookup(r.start), lookup(r.end)))
}

impl Match {
    /// Ranges in UTF-16 code units of `haystack`.
    ///
    /// `haystack` must be the string this match was computed for.
    ///
    /// ```rust
    /// use filter_match::{fuzzy_find, MatchRange};
    ///
    /// let m = fuzzy_find("pa", "🎉 party");
    /// assert_eq!(m.ranges, vec![MatchRange::new(2, 4)]);
    /// assert_eq!(m.utf16_ranges("🎉 party"), vec![MatchRange::new(3, 5)]);
    /// ```
    pub fn utf16_ranges(&self, haystack: &str) -> Vec<MatchRange> {
        let table = offset_table(haystack, char::len_utf16);
        remap(&self.ranges, &table)
            .map(|(start, end)| MatchRange::new(start, end))
            .collect()
    }

    /// Ranges as byte offsets, suitable for slicing `haystack`.
    pub fn byte_ranges(&self, haystack: &str) -> Vec<Range<usize>> {
        let table = offset_table(haystack, char::len_utf8);
        remap(&self.ranges, &table).map(|(start, end)| start..end).collect()
    }
}

#[cfg(test)]
mod tests {
    use crate::fuzzy_find;
    use crate::matcher::{Match, MatchRange, Strategy};

    #[test]
    fn test_ascii_offsets_unchanged() {
        let m = fuzzy_find("fb", "foo bar");
        let ranges: Vec<MatchRange> = m.ranges.clone();
        assert_eq!(m.utf16_ranges("foo bar"), ranges);
        assert_eq!(m.byte_ranges("foo bar"), vec![0..1, 4..5]);
    }

    #[test]
    fn test_multibyte_offsets() {
        let haystack = "Tür öffnen";
        let m = fuzzy_find("ür", haystack);
        assert_eq!(m.ranges, vec![MatchRange::new(1, 3)]);
        assert_eq!(m.utf16_ranges(haystack), vec![MatchRange::new(1, 3)]);

        let bytes = m.byte_ranges(haystack);
        assert_eq!(bytes, vec![1..4]);
        assert_eq!(&haystack[bytes[0].clone()], "ür");
    }

    #[test]
    fn test_surrogate_pairs() {
        let haystack = "😀😀 smile";
        let m = fuzzy_find("sm", haystack);
        assert_eq!(m.ranges, vec![MatchRange::new(3, 5)]);
        assert_eq!(m.utf16_ranges(haystack), vec![MatchRange::new(5, 7)]);
        assert_eq!(&haystack[m.byte_ranges(haystack)[0].clone()], "sm");
    }

    #[test]
    fn test_out_of_bounds_clamps() {
        let m = Match {
            score: 0.5,
            ranges: vec![MatchRange::new(2, 40)],
            strategy: Strategy::Alignment,
        };
        assert_eq!(m.byte_ranges("abc"), vec![2..3]);
    }
}
