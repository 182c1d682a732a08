//! Thread-safe wrapper around FuzzyMatcher
//!
//! `FuzzyMatcher::find` reuses scratch buffers and needs `&mut self`. This
//! wrapper serializes callers behind a mutex so one needle-bound matcher can
//! be shared, e.g. between a UI thread and a background filter task.

use parking_lot::Mutex;

use crate::config::{ConfigError, ScoreConfig};
use crate::matcher::{FuzzyMatcher, Match};

/// A [`FuzzyMatcher`] that can be shared across threads
#[derive(Debug)]
pub struct SharedMatcher {
    inner: Mutex<FuzzyMatcher>,
}

impl SharedMatcher {
    pub fn new(needle: &str) -> Self {
        Self::from_matcher(FuzzyMatcher::new(needle))
    }

    pub fn try_with_config(needle: &str, config: ScoreConfig) -> Result<Self, ConfigError> {
        FuzzyMatcher::try_with_config(needle, config).map(Self::from_matcher)
    }

    pub fn from_matcher(matcher: FuzzyMatcher) -> Self {
        Self {
            inner: Mutex::new(matcher),
        }
    }

    /// Score `haystack`; blocks while another thread is matching
    pub fn find(&self, haystack: &str) -> Match {
        self.inner.lock().find(haystack)
    }

    /// The case-folded needle
    pub fn needle(&self) -> String {
        self.inner.lock().needle().to_string()
    }

    pub fn into_inner(self) -> FuzzyMatcher {
        self.inner.into_inner()
    }
}
