//! Util Module - Shared Utilities
//!
//! Small helpers used throughout the collector.

pub mod alignment;

pub use alignment::Alignment;

/// Constants used across the collector.
pub mod constants {
    /// 1 Kilobyte
    pub const KB: usize = 1024;
    /// 1 Megabyte
    pub const MB: usize = 1024 * 1024;

    /// Default pointer/object alignment: 8 bytes
    pub const DEFAULT_ALIGNMENT: usize = 8;
}
