//! Configuration Module - GC Tuning Parameters
//!
//! Manages all configuration parameters for the collector. Most callers
//! only need [`GcConfig::default`]; the resize thresholds and the field
//! count extractor are the two knobs every embedder ends up touching.

use crate::error::{ConfigError, Result};
use crate::object;

/// Extracts the number of pointer-sized fields from a managed object's
/// header word. Supplied by the embedding runtime; the collector treats
/// it as opaque.
pub type FieldCountFn = fn(u64) -> usize;

/// Default field-count extractor: the low 32 bits of the header word are
/// the field count. Reasonable for tests and for embedders that haven't
/// supplied their own layout yet.
pub fn default_field_count_fn(header_word: u64) -> usize {
    (header_word & 0xFFFF_FFFF) as usize
}

/// Configuration for the collector.
///
/// # Examples
///
/// ```rust
/// use chasegc::config::GcConfig;
///
/// let config = GcConfig::default();
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct GcConfig {
    /// Size in bytes of the initial from-space heap.
    ///
    /// Default: 1 MiB.
    pub initial_heap_bytes: usize,

    /// Maximum depth of the root stack.
    ///
    /// Default: 2048.
    pub max_roots: usize,

    /// Occupancy above which the next sweep grows the heap.
    ///
    /// Default: 0.7.
    pub grow_threshold: f64,

    /// Occupancy below which the next sweep shrinks the heap.
    ///
    /// Default: 0.2.
    pub shrink_threshold: f64,

    /// Multiplier applied to heap size when growing.
    ///
    /// Default: 2.0.
    pub grow_factor: f64,

    /// Multiplier applied to heap size when shrinking.
    ///
    /// Default: 0.5.
    pub shrink_factor: f64,

    /// Extra bytes of slack reserved on top of the live set when a
    /// `MAKE_SMALLER` shrink is clamped (see Open Question #3).
    ///
    /// Default: 256.
    pub shrink_slack_bytes: usize,

    /// Function used to recover a managed object's field count from its
    /// header word.
    ///
    /// Default: [`default_field_count_fn`].
    pub field_count_fn: FieldCountFn,

    /// Raise the default log level from `Warn` to `Debug`. The Rust
    /// analogue of the original implementation's `DEBUG_TRACE` switch.
    ///
    /// Default: false.
    pub verbose: bool,
}

impl Default for GcConfig {
    fn default() -> Self {
        GcConfig {
            initial_heap_bytes: 1024 * 1024,
            max_roots: 2048,
            grow_threshold: 0.7,
            shrink_threshold: 0.2,
            grow_factor: 2.0,
            shrink_factor: 0.5,
            shrink_slack_bytes: 256,
            field_count_fn: default_field_count_fn,
            verbose: false,
        }
    }
}

impl GcConfig {
    /// Validate the configuration, rejecting degenerate values before a
    /// collector is constructed.
    pub fn validate(&self) -> Result<()> {
        if self.initial_heap_bytes == 0 {
            return Err(ConfigError::ZeroHeap);
        }

        if self.max_roots == 0 {
            return Err(ConfigError::ZeroMaxRoots);
        }

        if self.grow_threshold <= 0.0 || self.grow_threshold > 1.0 {
            return Err(ConfigError::InvalidGrowThreshold(self.grow_threshold));
        }

        if self.shrink_threshold < 0.0 || self.shrink_threshold >= 1.0 {
            return Err(ConfigError::InvalidShrinkThreshold(self.shrink_threshold));
        }

        if self.shrink_threshold >= self.grow_threshold {
            return Err(ConfigError::ThresholdsOverlap {
                shrink: self.shrink_threshold,
                grow: self.grow_threshold,
            });
        }

        if self.grow_factor <= 1.0 {
            return Err(ConfigError::InvalidGrowFactor(self.grow_factor));
        }

        if self.shrink_factor <= 0.0 || self.shrink_factor >= 1.0 {
            return Err(ConfigError::InvalidShrinkFactor(self.shrink_factor));
        }

        // `Heap::next_size`'s MAKE_SMALLER clamp (Open Question #3) floors
        // the next to-space at `live_bytes + shrink_slack_bytes`; if the
        // slack itself is smaller than a single minimal allocation, a
        // shrink performed while the heap is nearly empty can still leave
        // no room for the very next `alloc`, starving the mutator into an
        // immediate full collection on every allocation.
        let minimum_allocation = object::record_size(0);
        if self.shrink_slack_bytes < minimum_allocation {
            return Err(ConfigError::ShrinkSlackTooSmall {
                slack: self.shrink_slack_bytes,
                minimum: minimum_allocation,
            });
        }

        Ok(())
    }

    /// Build configuration from environment variables, overlaying
    /// [`GcConfig::default`]:
    ///
    /// - `CHASEGC_INITIAL_HEAP_BYTES`
    /// - `CHASEGC_MAX_ROOTS`
    /// - `CHASEGC_GROW_THRESHOLD`
    /// - `CHASEGC_SHRINK_THRESHOLD`
    /// - `CHASEGC_VERBOSE`
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("CHASEGC_INITIAL_HEAP_BYTES") {
            if let Ok(bytes) = val.parse::<usize>() {
                config.initial_heap_bytes = bytes;
            }
        }

        if let Ok(val) = std::env::var("CHASEGC_MAX_ROOTS") {
            if let Ok(n) = val.parse::<usize>() {
                config.max_roots = n;
            }
        }

        if let Ok(val) = std::env::var("CHASEGC_GROW_THRESHOLD") {
            if let Ok(f) = val.parse::<f64>() {
                config.grow_threshold = f;
            }
        }

        if let Ok(val) = std::env::var("CHASEGC_SHRINK_THRESHOLD") {
            if let Ok(f) = val.parse::<f64>() {
                config.shrink_threshold = f;
            }
        }

        if let Ok(val) = std::env::var("CHASEGC_VERBOSE") {
            config.verbose = val == "1" || val.eq_ignore_ascii_case("true");
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_validates() {
        let config = GcConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_heap_is_invalid() {
        let config = GcConfig {
            initial_heap_bytes: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroHeap));
    }

    #[test]
    fn zero_max_roots_is_invalid() {
        let config = GcConfig {
            max_roots: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroMaxRoots));
    }

    #[test]
    fn overlapping_thresholds_are_invalid() {
        let config = GcConfig {
            grow_threshold: 0.3,
            shrink_threshold: 0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn shrink_slack_smaller_than_one_allocation_is_invalid() {
        let config = GcConfig {
            shrink_slack_bytes: 1,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ShrinkSlackTooSmall {
                slack: 1,
                minimum: object::record_size(0),
            })
        );
    }

    #[test]
    fn from_env_leaves_defaults_when_unset() {
        // Safety net: these vars are not expected to be set by the test harness.
        let default = GcConfig::default();
        let from_env = GcConfig::from_env();
        assert_eq!(from_env.initial_heap_bytes, default.initial_heap_bytes);
        assert_eq!(from_env.max_roots, default.max_roots);
        assert_eq!(from_env.verbose, default.verbose);
    }
}
