//! Gap-penalized greedy scan
//!
//! Linear-time subsequence matcher. Walks needle and haystack with two cursors,
//! groups matched characters into runs, and scores the runs: runs that begin at
//! a word boundary are rewarded, mid-word runs are penalized by the size of the
//! gap before them relative to the haystack length.

use super::fold::is_word_boundary;
use super::MatchRange;

/// One contiguous run of matched characters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MatchRecord {
    pub start: usize,
    pub end: usize,
    pub len: usize,
    pub at_boundary: bool,
    pub gap_before: usize,
}

impl MatchRecord {
    fn new(haystack: &[char], start: usize, end: usize, gap_before: usize) -> Self {
        Self {
            start,
            end,
            len: end - start,
            at_boundary: is_word_boundary(haystack, start),
            gap_before,
        }
    }
}

/// Greedily consume `needle` from `haystack`, recording runs into `runs`.
///
/// Returns false (and leaves `runs` empty) when the needle is not an in-order
/// subsequence of the haystack.
pub(crate) fn scan(needle: &[char], haystack: &[char], runs: &mut Vec<MatchRecord>) -> bool {
    runs.clear();

    let mut ni = 0;
    let mut hi = 0;
    let mut run_start: Option<usize> = None;
    let mut gap = 0;

    while hi < haystack.len() && ni < needle.len() {
        if haystack[hi] == needle[ni] {
            if run_start.is_none() {
                run_start = Some(hi);
            }
            ni += 1;
        } else {
            if let Some(start) = run_start.take() {
                runs.push(MatchRecord::new(haystack, start, hi, gap));
                gap = 0;
            }
            gap += 1;
        }
        hi += 1;
    }

    if let Some(start) = run_start {
        runs.push(MatchRecord::new(haystack, start, hi, gap));
    }

    if ni < needle.len() {
        runs.clear();
        return false;
    }

    debug_assert_eq!(runs.iter().map(|r| r.len).sum::<usize>(), needle.len());
    true
}

/// Aggregate score of the runs, capped below `prefix_score`.
pub(crate) fn score_runs(
    runs: &[MatchRecord],
    needle_len: usize,
    haystack_len: usize,
    prefix_score: f64,
) -> f64 {
    if runs.is_empty() || needle_len == 0 || haystack_len == 0 {
        return 0.0;
    }

    let base = 1.0 / needle_len as f64;
    let gap_penalty = 1.0 / haystack_len as f64;

    let mut total = 0.0;
    for (i, run) in runs.iter().enumerate() {
        total += if run.at_boundary && i == 0 {
            base
        } else if run.at_boundary {
            base * 0.8
        } else {
            let remaining = 1.0 - gap_penalty * run.gap_before as f64;
            debug_assert!(remaining >= 0.0, "gap {} exceeds haystack", run.gap_before);
            base * 0.5 * remaining.max(0.0)
        };
        // continuing a run is worth half of starting one
        total += run.len.saturating_sub(1) as f64 * base * 0.5;
    }

    total * prefix_score
}

pub(crate) fn runs_to_ranges(runs: &[MatchRecord]) -> Vec<MatchRange> {
    runs.iter()
        .map(|r| MatchRange::new(r.start, r.end))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_scan_single_run() {
        let mut runs = Vec::new();
        assert!(scan(&chars("bar"), &chars("foo bar"), &mut runs));
        assert_eq!(
            runs,
            vec![MatchRecord {
                start: 4,
                end: 7,
                len: 3,
                at_boundary: true,
                gap_before: 4,
            }]
        );
    }

    #[test]
    fn test_scan_split_runs() {
        let mut runs = Vec::new();
        assert!(scan(&chars("fbr"), &chars("foobar"), &mut runs));
        let spans: Vec<(usize, usize, usize)> =
            runs.iter().map(|r| (r.start, r.end, r.gap_before)).collect();
        assert_eq!(spans, vec![(0, 1, 0), (3, 4, 2), (5, 6, 1)]);
        assert!(runs[0].at_boundary);
        assert!(!runs[1].at_boundary);
    }

    #[test]
    fn test_scan_fails_when_needle_not_consumed() {
        let mut runs = Vec::new();
        assert!(!scan(&chars("orange"), &chars("orangutan"), &mut runs));
        assert!(runs.is_empty());
    }

    #[test]
    fn test_score_boundary_run_outranks_mid_word() {
        let mut runs = Vec::new();
        scan(&chars("bar"), &chars("foo bar"), &mut runs);
        let boundary = score_runs(&runs, 3, 7, 0.99);

        scan(&chars("bar"), &chars("foobar"), &mut runs);
        let mid_word = score_runs(&runs, 3, 6, 0.99);

        assert!(boundary > mid_word);
        assert!(boundary < 0.99);
    }

    #[test]
    fn test_score_never_negative() {
        let runs = [MatchRecord {
            start: 9,
            end: 10,
            len: 1,
            at_boundary: false,
            gap_before: 9,
        }];
        let score = score_runs(&runs, 1, 10, 0.99);
        assert!(score > 0.0);
    }

    #[test]
    fn test_score_full_boundary_run() {
        let mut runs = Vec::new();
        scan(&chars("ab"), &chars("x ab"), &mut runs);
        // 1/2 for the boundary start + 1/2 * 0.5 for the continuation
        let expected = (0.5 + 0.25) * 0.99;
        assert!((score_runs(&runs, 2, 4, 0.99) - expected).abs() < 1e-12);
    }
}
