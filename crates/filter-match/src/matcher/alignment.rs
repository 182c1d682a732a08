//! Dynamic-programming alignment matrix
//!
//! Finds the best-scoring subsequence alignment of the needle in the haystack
//! and recovers the matched offsets by backtracking. Only used when both
//! strings fit the configured size limits, since the cost is
//! O(needle × haystack).
//!
//! Two flattened `needle_len × haystack_len` matrices are kept:
//! - `score[i][j]`: best cumulative score aligning `needle[..=i]` with
//!   `needle[i]` matched at or before `haystack[j]`
//! - `consecutive[i][j]`: length of the matched run ending at this cell,
//!   0 when the cell was reached through a gap
//!
//! The buffers are reused across calls and never cleared. Every cell read
//! during a call is written earlier in the same call; cells left of the
//! diagonal (`j < i`) are never read.

use super::fold::fill_boundaries;
use super::MatchRange;

pub(crate) const MATCH_SCORE: i32 = 16;
pub(crate) const BOUNDARY_BONUS: i32 = 8;
pub(crate) const CONSECUTIVE_BONUS: i32 = 4;
/// Boundary bonus for the first needle character
pub(crate) const INITIAL_BONUS: i32 = 16;
pub(crate) const GAP_START_PENALTY: i32 = 3;
pub(crate) const GAP_EXTENSION_PENALTY: i32 = 1;

/// Floor of the rescaled score, so reached alignments are never near zero
pub(crate) const SCORE_BIAS: f64 = 0.25;

// Largest f64 below 1.0
const MAX_UNIT: f64 = 1.0 - f64::EPSILON / 2.0;

// Cell with no valid alignment of the needle prefix
const UNREACHABLE: i32 = -1;

/// Scratch state for the alignment matrix
#[derive(Debug, Clone, Default)]
pub(crate) struct Alignment {
    score: Vec<i32>,
    consecutive: Vec<i32>,
    boundaries: Vec<bool>,
    offsets: Vec<usize>,
}

impl Alignment {
    /// Pre-size the buffers for `needle_len` against haystacks up to `haystack_cap`.
    pub(crate) fn with_capacity(needle_len: usize, haystack_cap: usize) -> Self {
        let cells = needle_len.saturating_mul(haystack_cap);
        Self {
            score: Vec::with_capacity(cells),
            consecutive: Vec::with_capacity(cells),
            boundaries: Vec::with_capacity(haystack_cap),
            offsets: Vec::with_capacity(needle_len),
        }
    }

    fn reserve(&mut self, cells: usize) {
        if self.score.len() >= cells {
            return;
        }
        if cells > self.score.capacity() {
            debug!(
                "Growing alignment scratch from {} to {} cells",
                self.score.capacity(),
                cells
            );
        }
        self.score.resize(cells, 0);
        self.consecutive.resize(cells, 0);
    }

    /// Align `needle` against `haystack`, writing coalesced ranges into `ranges`.
    ///
    /// Returns a score in `[SCORE_BIAS, 1) × very_high_score`, or 0 with no
    /// ranges if the needle is not a subsequence.
    pub(crate) fn align(
        &mut self,
        needle: &[char],
        haystack: &[char],
        very_high_score: f64,
        ranges: &mut Vec<MatchRange>,
    ) -> f64 {
        ranges.clear();

        let n = needle.len();
        let m = haystack.len();
        if n == 0 || n > m {
            return 0.0;
        }

        self.reserve(n * m);
        fill_boundaries(haystack, &mut self.boundaries);

        let score = &mut self.score;
        let consecutive = &mut self.consecutive;
        let boundaries = &self.boundaries;

        // Row 0
        let first = needle[0];
        for j in 0..m {
            let carried = if j == 0 {
                UNREACHABLE
            } else {
                decay(score[j - 1], consecutive[j - 1])
            };

            if haystack[j] == first {
                let fresh = MATCH_SCORE + if boundaries[j] { INITIAL_BONUS } else { 0 };
                if fresh >= carried {
                    score[j] = fresh;
                    consecutive[j] = 1;
                    continue;
                }
            }
            score[j] = carried;
            consecutive[j] = 0;
        }

        // Rows 1..n
        for (i, &c) in needle.iter().enumerate().skip(1) {
            let row = i * m;
            let prev_row = (i - 1) * m;

            for j in i..m {
                let gap = if j > i {
                    decay(score[row + j - 1], consecutive[row + j - 1])
                } else {
                    UNREACHABLE
                };

                let upper_left = score[prev_row + j - 1];
                let diagonal = if haystack[j] == c && upper_left != UNREACHABLE {
                    let run = consecutive[prev_row + j - 1];
                    let bonus = if boundaries[j] {
                        BOUNDARY_BONUS
                    } else if run > 0 {
                        CONSECUTIVE_BONUS
                    } else {
                        0
                    };
                    upper_left + MATCH_SCORE + bonus
                } else {
                    UNREACHABLE
                };

                if diagonal != UNREACHABLE && diagonal >= gap {
                    score[row + j] = diagonal;
                    consecutive[row + j] = consecutive[prev_row + j - 1] + 1;
                } else {
                    score[row + j] = gap;
                    consecutive[row + j] = 0;
                }
            }
        }

        // Best cell of the last row
        let last_row = (n - 1) * m;
        let mut best = UNREACHABLE;
        let mut best_col = n - 1;
        for j in (n - 1)..m {
            if score[last_row + j] > best {
                best = score[last_row + j];
                best_col = j;
            }
        }
        if best == UNREACHABLE {
            return 0.0;
        }

        // Backtrack: walk left over gap cells, then step diagonally
        self.offsets.clear();
        let mut j = best_col;
        for i in (0..n).rev() {
            let row = i * m;
            while j > i && consecutive[row + j] == 0 {
                j -= 1;
            }
            debug_assert!(
                consecutive[row + j] > 0,
                "backtrack reached a gap cell at row {i}, column {j}"
            );
            self.offsets.push(j);
            if i > 0 {
                j -= 1;
            }
        }
        self.offsets.reverse();
        coalesce(&self.offsets, ranges);

        normalize(best, n, very_high_score)
    }
}

#[inline]
fn decay(previous: i32, previous_run: i32) -> i32 {
    if previous == UNREACHABLE {
        return UNREACHABLE;
    }
    let penalty = if previous_run > 0 {
        GAP_START_PENALTY
    } else {
        GAP_EXTENSION_PENALTY
    };
    (previous - penalty).max(0)
}

/// Score of a gapless alignment with every character at a word boundary
pub(crate) fn max_possible_score(needle_len: usize) -> f64 {
    let rest = needle_len.saturating_sub(1) as f64;
    f64::from(INITIAL_BONUS + MATCH_SCORE) + f64::from(BOUNDARY_BONUS + MATCH_SCORE) * rest
}

fn normalize(raw: i32, needle_len: usize, very_high_score: f64) -> f64 {
    let normalized = (f64::from(raw) / max_possible_score(needle_len)).clamp(0.0, 1.0);
    let unit = (SCORE_BIAS + (1.0 - SCORE_BIAS) * normalized).min(MAX_UNIT);
    unit * very_high_score
}

fn coalesce(offsets: &[usize], ranges: &mut Vec<MatchRange>) {
    for &offset in offsets {
        match ranges.last_mut() {
            Some(last) if last.end == offset => last.end += 1,
            _ => ranges.push(MatchRange::new(offset, offset + 1)),
        }
    }
}
