//! Error Module - Configuration-Time Error Types
//!
//! Only configuration validation is recoverable. Once a collector is
//! running, the failure modes documented in `gc` (heap exhaustion after a
//! full collection, to-space overflow during chase, root stack overflow)
//! are programmer-error / resource-exhaustion conditions and are raised
//! as panics with a diagnostic message rather than threaded through
//! `Result` — there is no meaningful recovery once reclamation itself
//! has failed.

use thiserror::Error;

/// Errors produced while validating a [`crate::config::GcConfig`].
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("initial_heap_bytes must be > 0")]
    ZeroHeap,

    #[error("max_roots must be > 0")]
    ZeroMaxRoots,

    #[error("grow_threshold must be in (0.0, 1.0], got {0}")]
    InvalidGrowThreshold(f64),

    #[error("shrink_threshold must be in [0.0, 1.0), got {0}")]
    InvalidShrinkThreshold(f64),

    #[error("shrink_threshold ({shrink}) must be < grow_threshold ({grow})")]
    ThresholdsOverlap { shrink: f64, grow: f64 },

    #[error("grow_factor must be > 1.0, got {0}")]
    InvalidGrowFactor(f64),

    #[error("shrink_factor must be in (0.0, 1.0), got {0}")]
    InvalidShrinkFactor(f64),

    #[error(
        "shrink_slack_bytes ({slack}) must be >= the size of one minimal allocation \
         ({minimum}), or a MAKE_SMALLER shrink could starve the heap before the next alloc"
    )]
    ShrinkSlackTooSmall { slack: usize, minimum: usize },
}

/// Result alias for configuration validation.
pub type Result<T> = std::result::Result<T, ConfigError>;
