//! FuzzyMatcher - needle-bound matcher with tiered strategies
//!
//! Strategies are tried cheapest first; the first applicable one wins:
//!
//! 1. Needle longer than haystack (score: 0)
//! 2. Equal length: exact match (score: 1.0) or nothing
//! 3. Prefix match (score: 0.99)
//! 4. Single-character needle: word boundary (0.95) or internal (<= 0.01)
//! 5. Gap-penalized greedy scan (score: < 0.99), for inputs over the size limits
//! 6. Alignment matrix (score: 0.2375-0.95), for everything else
//!
//! Offsets in [`MatchRange`] count Unicode scalar values (`char`s) of the
//! haystack. See [`Match::utf16_ranges`] and [`Match::byte_ranges`] for other units.
//!
//! # Example
//!
//! ```rust
//! use filter_match::{FuzzyMatcher, MatchRange};
//!
//! let mut matcher = FuzzyMatcher::new("tuot");
//! let m = matcher.find("Tlön, Uqbar, Orbis Tertius");
//! assert!(m.score > 0.0);
//! assert_eq!(
//!     m.ranges,
//!     vec![
//!         MatchRange::new(0, 1),
//!         MatchRange::new(6, 7),
//!         MatchRange::new(13, 14),
//!         MatchRange::new(19, 20),
//!     ]
//! );
//! ```

mod alignment;
mod fold;
mod gap_scan;

use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, ScoreConfig, MAX_HAYSTACK_CHARS, MAX_NEEDLE_CHARS};
use alignment::Alignment;
use gap_scan::MatchRecord;

/// Ceiling for a single character found mid-word
const INTERNAL_SCORE_CEILING: f64 = 0.01;

/// Half-open `[start, end)` interval of matched chars in the haystack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MatchRange {
    pub start: usize,
    pub end: usize,
}

impl MatchRange {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Which strategy produced a [`Match`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    None,
    Exact,
    Prefix,
    WordBoundary,
    Internal,
    GapScan,
    Alignment,
}

impl Strategy {
    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::None => "none",
            Strategy::Exact => "exact",
            Strategy::Prefix => "prefix",
            Strategy::WordBoundary => "word_boundary",
            Strategy::Internal => "internal",
            Strategy::GapScan => "gap_scan",
            Strategy::Alignment => "alignment",
        }
    }
}

/// Result of matching a needle against one haystack.
///
/// `score == 0` exactly when `ranges` is empty. An empty needle is a prefix
/// of every haystack and yields the single zero-length range `0..0`, so
/// highlighters should skip empty ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Match {
    pub score: f64,
    pub ranges: Vec<MatchRange>,
    pub strategy: Strategy,
}

impl Match {
    /// The non-match result
    pub fn none() -> Self {
        Self {
            score: 0.0,
            ranges: Vec::new(),
            strategy: Strategy::None,
        }
    }

    fn single(score: f64, start: usize, end: usize, strategy: Strategy) -> Self {
        Self {
            score,
            ranges: vec![MatchRange::new(start, end)],
            strategy,
        }
    }

    pub fn is_match(&self) -> bool {
        self.score > 0.0
    }

    /// Total number of highlighted chars
    pub fn matched_len(&self) -> usize {
        self.ranges.iter().map(MatchRange::len).sum()
    }
}

impl Default for Match {
    fn default() -> Self {
        Self::none()
    }
}

/// Where a single needle character occurs in the haystack
enum CharHit {
    Start,
    Boundary(usize),
    Internal(usize),
    Missing,
}

/// Needle-bound fuzzy matcher.
///
/// Construct once per query and call [`find`](Self::find) for every candidate.
/// The matcher owns scratch buffers that are reused between calls, so `find`
/// takes `&mut self`: an instance is not reentrant. Share one across threads
/// through [`SharedMatcher`](crate::SharedMatcher), or build one per thread.
#[derive(Debug, Clone)]
pub struct FuzzyMatcher {
    needle: String,
    needle_chars: Vec<char>,
    config: ScoreConfig,

    // Per-call scratch
    haystack: Vec<char>,
    runs: Vec<MatchRecord>,
    alignment: Alignment,
}

impl FuzzyMatcher {
    /// Create a matcher for `needle` with the default score tiers
    pub fn new(needle: &str) -> Self {
        Self::with_config(needle, ScoreConfig::default())
    }

    /// Create a matcher with custom score tiers.
    ///
    /// The config is expected to be valid; use [`try_with_config`](Self::try_with_config)
    /// for configuration that comes from outside the program.
    pub fn with_config(needle: &str, config: ScoreConfig) -> Self {
        debug_assert!(config.validate().is_ok(), "invalid score config: {config:?}");

        let mut needle_chars = Vec::with_capacity(needle.len());
        fold::fold_into(needle, &mut needle_chars);
        let needle: String = needle_chars.iter().collect();

        // Larger configured limits grow the scratch on demand
        let haystack_cap = config.max_haystack_chars.min(MAX_HAYSTACK_CHARS);
        let (haystack, alignment) = if needle_chars.len() <= config.max_needle_chars {
            (
                Vec::with_capacity(haystack_cap),
                Alignment::with_capacity(needle_chars.len().min(MAX_NEEDLE_CHARS), haystack_cap),
            )
        } else {
            (Vec::new(), Alignment::default())
        };

        Self {
            needle,
            needle_chars,
            config,
            haystack,
            runs: Vec::new(),
            alignment,
        }
    }

    /// Create a matcher after validating `config`
    pub fn try_with_config(needle: &str, config: ScoreConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::with_config(needle, config))
    }

    /// The case-folded needle
    pub fn needle(&self) -> &str {
        &self.needle
    }

    pub fn config(&self) -> &ScoreConfig {
        &self.config
    }

    /// Score `haystack` against the needle.
    ///
    /// Never panics. Returns [`Match::none`] when the needle's characters do
    /// not all appear, in order, in the haystack.
    pub fn find(&mut self, haystack: &str) -> Match {
        // chars <= bytes, so this rejects without folding
        if self.needle_chars.len() > haystack.len() {
            return Match::none();
        }

        fold::fold_into(haystack, &mut self.haystack);
        let result = self.dispatch(haystack);

        trace!(
            "needle={:?} haystack={:?} strategy={} score={:.4}",
            self.needle,
            haystack,
            result.strategy.as_str(),
            result.score
        );
        debug_assert_eq!(result.score == 0.0, result.ranges.is_empty());
        result
    }

    fn dispatch(&mut self, raw: &str) -> Match {
        let n = self.needle_chars.len();
        let m = self.haystack.len();

        // 1. A longer needle can never be consumed
        if n > m {
            return Match::none();
        }

        // 2. Equal length: all or nothing
        if n == m {
            if self.needle_chars == self.haystack {
                return Match::single(self.config.max_score, 0, m, Strategy::Exact);
            }
            return Match::none();
        }

        // 3. Prefix
        if self.haystack.starts_with(&self.needle_chars) {
            return Match::single(self.config.prefix_score, 0, n, Strategy::Prefix);
        }

        // 4. Single character
        if n == 1 {
            return self.find_char(raw);
        }

        // 5. Greedy scan: pre-filter, and the answer for oversized inputs
        if !gap_scan::scan(&self.needle_chars, &self.haystack, &mut self.runs) {
            return Match::none();
        }
        if !self.config.fits_alignment(n, m) {
            let score = gap_scan::score_runs(&self.runs, n, m, self.config.prefix_score);
            return Match {
                score,
                ranges: gap_scan::runs_to_ranges(&self.runs),
                strategy: Strategy::GapScan,
            };
        }

        // 6. Alignment matrix
        let mut ranges = Vec::with_capacity(n);
        let score = self.alignment.align(
            &self.needle_chars,
            &self.haystack,
            self.config.very_high_score,
            &mut ranges,
        );
        if ranges.is_empty() {
            // the greedy scan found a subsequence, so this is unreachable
            debug_assert!(false, "alignment failed after gap scan succeeded");
            return Match::none();
        }
        Match {
            score,
            ranges,
            strategy: Strategy::Alignment,
        }
    }

    fn find_char(&self, raw: &str) -> Match {
        let m = self.haystack.len();
        match self.locate_char(raw) {
            CharHit::Start => Match::single(self.config.prefix_score, 0, 1, Strategy::Prefix),
            CharHit::Boundary(pos) => Match::single(
                self.config.very_high_score,
                pos,
                pos + 1,
                Strategy::WordBoundary,
            ),
            CharHit::Internal(pos) => {
                let score = (1.0 - pos as f64 / m as f64).min(INTERNAL_SCORE_CEILING);
                Match::single(score, pos, pos + 1, Strategy::Internal)
            }
            CharHit::Missing => Match::none(),
        }
    }

    fn locate_char(&self, raw: &str) -> CharHit {
        let target = self.needle_chars[0];

        #[cfg(all(not(target_arch = "wasm32"), feature = "simd"))]
        {
            // ASCII haystacks: byte offsets are char offsets
            if target.is_ascii() && raw.is_ascii() {
                let lower = target as u8;
                let upper = lower.to_ascii_uppercase();
                let positions = memchr::memchr2_iter(lower, upper, raw.as_bytes());
                return classify_hits(positions, &self.haystack);
            }
        }
        #[cfg(any(target_arch = "wasm32", not(feature = "simd")))]
        let _ = raw;

        let positions = self
            .haystack
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c == target)
            .map(|(pos, _)| pos);
        classify_hits(positions, &self.haystack)
    }
}

/// First start/boundary occurrence wins; otherwise the first internal one
fn classify_hits(positions: impl Iterator<Item = usize>, haystack: &[char]) -> CharHit {
    let mut first_internal = None;
    for pos in positions {
        if pos == 0 {
            return CharHit::Start;
        }
        if fold::is_word_boundary(haystack, pos) {
            return CharHit::Boundary(pos);
        }
        first_internal.get_or_insert(pos);
    }
    first_internal.map_or(CharHit::Missing, CharHit::Internal)
}

/// Match a single needle/haystack pair.
///
/// Builds a throwaway matcher; prefer [`FuzzyMatcher`] when scoring many haystacks.
pub fn fuzzy_find(needle: &str, haystack: &str) -> Match {
    FuzzyMatcher::new(needle).find(haystack)
}
