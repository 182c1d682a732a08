//! Candidate ranking
//!
//! Applies one needle to a list of candidates (tabs, bookmarks, history
//! entries, commands) and returns the hits ordered best first. Large lists are
//! scored in parallel on native builds, with one matcher per worker.

use std::time::Instant;

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::config::{ConfigError, ScoreConfig};
use crate::matcher::{FuzzyMatcher, MatchRange, Strategy};

#[cfg(all(not(target_arch = "wasm32"), feature = "parallel"))]
use rayon::prelude::*;

/// A candidate that matched, with its position in the input list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedMatch {
    pub index: usize,
    pub value: String,
    pub score: f64,
    pub ranges: Vec<MatchRange>,
    pub strategy: Strategy,
}

/// Filtering and ordering options
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RankOptions {
    /// Minimum score threshold; non-matches (score 0) are always dropped
    pub min_score: f64,
    /// Maximum results to return
    pub limit: Option<usize>,
    /// Score only the first occurrence of identical candidates
    pub dedup: bool,
    /// Lists at least this long are scored in parallel
    pub parallel_threshold: usize,
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            min_score: 0.0,
            limit: None,
            dedup: false,
            parallel_threshold: 1000,
        }
    }
}

/// Ranks candidate lists with a fixed score configuration
#[derive(Debug, Clone, Default)]
pub struct Ranker {
    config: ScoreConfig,
    options: RankOptions,
}

impl Ranker {
    pub fn new(options: RankOptions) -> Self {
        Self {
            config: ScoreConfig::default(),
            options,
        }
    }

    /// Create a ranker with custom score tiers
    pub fn try_new(config: ScoreConfig, options: RankOptions) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config, options })
    }

    pub fn options(&self) -> &RankOptions {
        &self.options
    }

    /// Score every candidate against `needle`.
    ///
    /// Results are sorted by score descending, ties keep input order. An empty
    /// or whitespace-only needle yields no results.
    pub fn rank<S>(&self, needle: &str, candidates: &[S]) -> Vec<RankedMatch>
    where
        S: AsRef<str> + Sync,
    {
        let start = Instant::now();

        if needle.trim().is_empty() {
            return Vec::new();
        }

        let selected = self.select(candidates);
        let mut matches = self.score_candidates(needle, candidates, &selected);

        matches.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.index.cmp(&b.index))
        });

        if let Some(limit) = self.options.limit {
            matches.truncate(limit);
        }

        debug!(
            "Ranked {} of {} candidates for {:?}: {} hits in {}us",
            selected.len(),
            candidates.len(),
            needle,
            matches.len(),
            start.elapsed().as_micros()
        );
        matches
    }

    /// Indices of the candidates to score
    fn select<S: AsRef<str>>(&self, candidates: &[S]) -> Vec<usize> {
        if !self.options.dedup {
            return (0..candidates.len()).collect();
        }

        let mut seen = AHashSet::with_capacity(candidates.len());
        candidates
            .iter()
            .enumerate()
            .filter(|&(_, c)| seen.insert(c.as_ref()))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Score selected candidates - parallel on native, sequential otherwise
    #[cfg(all(not(target_arch = "wasm32"), feature = "parallel"))]
    fn score_candidates<S>(
        &self,
        needle: &str,
        candidates: &[S],
        selected: &[usize],
    ) -> Vec<RankedMatch>
    where
        S: AsRef<str> + Sync,
    {
        if selected.len() < self.options.parallel_threshold {
            return self.score_sequential(needle, candidates, selected);
        }

        selected
            .par_iter()
            .map_init(
                || FuzzyMatcher::with_config(needle, self.config),
                |matcher, &idx| self.score_one(matcher, idx, candidates[idx].as_ref()),
            )
            .filter_map(|m| m)
            .collect()
    }

    #[cfg(any(target_arch = "wasm32", not(feature = "parallel")))]
    fn score_candidates<S>(
        &self,
        needle: &str,
        candidates: &[S],
        selected: &[usize],
    ) -> Vec<RankedMatch>
    where
        S: AsRef<str> + Sync,
    {
        self.score_sequential(needle, candidates, selected)
    }

    fn score_sequential<S: AsRef<str>>(
        &self,
        needle: &str,
        candidates: &[S],
        selected: &[usize],
    ) -> Vec<RankedMatch> {
        let mut matcher = FuzzyMatcher::with_config(needle, self.config);
        selected
            .iter()
            .filter_map(|&idx| self.score_one(&mut matcher, idx, candidates[idx].as_ref()))
            .collect()
    }

    fn score_one(&self, matcher: &mut FuzzyMatcher, index: usize, value: &str) -> Option<RankedMatch> {
        let m = matcher.find(value);
        if !m.is_match() || m.score < self.options.min_score {
            return None;
        }
        Some(RankedMatch {
            index,
            value: value.to_string(),
            score: m.score,
            ranges: m.ranges,
            strategy: m.strategy,
        })
    }
}

/// Rank `candidates` against `needle` with the default score tiers.
///
/// ```rust
/// use filter_match::{rank, RankOptions};
///
/// let tabs = ["GitHub", "Inbox", "my github notes"];
/// let hits = rank("git", &tabs, &RankOptions::default());
/// assert_eq!(hits.len(), 2);
/// assert_eq!(hits[0].value, "GitHub");
/// ```
pub fn rank<S>(needle: &str, candidates: &[S], options: &RankOptions) -> Vec<RankedMatch>
where
    S: AsRef<str> + Sync,
{
    Ranker::new(options.clone()).rank(needle, candidates)
}
