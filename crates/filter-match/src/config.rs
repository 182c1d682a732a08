//! Score tiers and size limits
//!
//! The tier values define the relative ranking of the matcher's strategies:
//! exact > prefix > word boundary > everything else. They are exposed as named
//! constants and as an overridable [`ScoreConfig`], never inlined.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Score of an exact (case-folded) match
pub const MAX_SCORE: f64 = 1.0;
/// Score of a prefix match; also the ceiling applied to gap-scan results
pub const PREFIX_SCORE: f64 = 0.99;
/// Score of a single-character word-boundary match; ceiling for alignment results
pub const VERY_HIGH_SCORE: f64 = 0.95;
/// Longest haystack (in chars) scored with the alignment matrix
pub const MAX_HAYSTACK_CHARS: usize = 1024;
/// Longest needle (in chars) scored with the alignment matrix
pub const MAX_NEEDLE_CHARS: usize = 16;

/// Errors raised when validating a [`ScoreConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Tier scores must be strictly ordered
    #[error("score tiers out of order: need 0 < very_high ({very_high}) < prefix ({prefix}) < max ({max}) <= 1")]
    TierOrder { max: f64, prefix: f64, very_high: f64 },

    /// A tier score is NaN or infinite
    #[error("score tier `{0}` is not a finite number")]
    NonFinite(&'static str),

    /// A size limit of zero would disable every strategy that depends on it
    #[error("size limit `{0}` must be greater than zero")]
    ZeroLimit(&'static str),

    /// Configuration JSON could not be parsed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for configuration operations
pub type Result<T> = std::result::Result<T, ConfigError>;

/// Tier scores and alignment size limits
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreConfig {
    pub max_score: f64,
    pub prefix_score: f64,
    pub very_high_score: f64,
    /// Haystacks longer than this fall back to the gap scan
    pub max_haystack_chars: usize,
    /// Needles longer than this fall back to the gap scan
    pub max_needle_chars: usize,
}

impl Default for ScoreConfig {
    fn default() -> Self {
        Self {
            max_score: MAX_SCORE,
            prefix_score: PREFIX_SCORE,
            very_high_score: VERY_HIGH_SCORE,
            max_haystack_chars: MAX_HAYSTACK_CHARS,
            max_needle_chars: MAX_NEEDLE_CHARS,
        }
    }
}

impl ScoreConfig {
    /// Parse a (possibly partial) JSON object; missing fields keep their defaults.
    ///
    /// ```rust
    /// use filter_match::ScoreConfig;
    ///
    /// let config = ScoreConfig::from_json(r#"{ "max_haystack_chars": 256 }"#).unwrap();
    /// assert_eq!(config.max_haystack_chars, 256);
    /// assert_eq!(config.max_needle_chars, 16);
    /// ```
    pub fn from_json(json: &str) -> Result<Self> {
        let config: ScoreConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the tiers are finite and ordered and the limits are non-zero.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("max_score", self.max_score),
            ("prefix_score", self.prefix_score),
            ("very_high_score", self.very_high_score),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite(name));
            }
        }

        let ordered = 0.0 < self.very_high_score
            && self.very_high_score < self.prefix_score
            && self.prefix_score < self.max_score
            && self.max_score <= 1.0;
        if !ordered {
            return Err(ConfigError::TierOrder {
                max: self.max_score,
                prefix: self.prefix_score,
                very_high: self.very_high_score,
            });
        }

        if self.max_haystack_chars == 0 {
            return Err(ConfigError::ZeroLimit("max_haystack_chars"));
        }
        if self.max_needle_chars == 0 {
            return Err(ConfigError::ZeroLimit("max_needle_chars"));
        }

        Ok(())
    }

    /// Whether a needle/haystack pair is small enough for the alignment matrix
    #[inline]
    pub fn fits_alignment(&self, needle_chars: usize, haystack_chars: usize) -> bool {
        needle_chars <= self.max_needle_chars && haystack_chars <= self.max_haystack_chars
    }
}
