//! Fuzzy Matching for Filter Menus
//!
//! Scores candidate entries (tabs, bookmarks, history, commands) against the
//! query a user types and reports the matched character ranges for
//! highlighting. Matching is case-insensitive and tiered so that an exact
//! match always outranks a prefix match, which outranks a word-boundary hit,
//! which outranks any other in-order subsequence match.
//!
//! # Features
//!
//! - `native` - Enable all native optimizations (default)
//! - `simd` - SIMD-accelerated single-character search via memchr
//! - `parallel` - Parallel ranking of large candidate lists via rayon
//!
//! # Example
//!
//! ```rust
//! use filter_match::{FuzzyMatcher, MatchRange, RankOptions, Ranker};
//!
//! // One matcher per query, reused for every candidate
//! let mut matcher = FuzzyMatcher::new("orange");
//! let m = matcher.find("Orange");
//! assert_eq!(m.score, 1.0);
//! assert_eq!(m.ranges, vec![MatchRange::new(0, 6)]);
//! assert_eq!(matcher.find("orangutan").score, 0.0);
//!
//! // Filter and order a candidate list
//! let ranker = Ranker::new(RankOptions { limit: Some(10), ..Default::default() });
//! let hits = ranker.rank("set", &["Settings", "Reset zoom", "History"]);
//! assert_eq!(hits[0].value, "Settings");
//! ```

// Import logging macros
#[macro_use]
extern crate log;

pub mod config;
pub mod matcher;
mod offsets;
pub mod rank;
mod shared;

/// Initialize the logger for the matching library.
/// This should be called once at startup by the host binary.
///
/// The log level can be controlled via the RUST_LOG environment variable:
/// - RUST_LOG=filter_match=debug
/// - RUST_LOG=filter_match=trace (logs the strategy chosen for every haystack)
pub fn init_logger() {
    use std::sync::Once;
    static INIT: Once = Once::new();

    INIT.call_once(|| {
        // A host may already have installed a logger
        if env_logger::try_init().is_ok() {
            info!("filter-match library initialized");
        }
    });
}

// Re-export main types
pub use config::{
    ConfigError, ScoreConfig, MAX_HAYSTACK_CHARS, MAX_NEEDLE_CHARS, MAX_SCORE, PREFIX_SCORE,
    VERY_HIGH_SCORE,
};
pub use matcher::{fuzzy_find, FuzzyMatcher, Match, MatchRange, Strategy};
pub use rank::{rank, RankOptions, RankedMatch, Ranker};
pub use shared::SharedMatcher;
