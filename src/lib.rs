//! # chasegc - Incremental, Relocating Mark-Compact Garbage Collector
//!
//! `chasegc` is a single-threaded, mutator-cooperative tracing collector
//! for a managed runtime whose values are heap-allocated records with a
//! header word and a fixed number of pointer-sized fields. It implements:
//!
//! - **Tri-color marking** with an insertion write barrier, so collection
//!   can interleave with allocation one step at a time instead of running
//!   as a single stop-the-world pause.
//! - **Two-space relocating compaction** (Cheney-style semispaces) using
//!   forwarding pointers, with the "chase" optimization that continues a
//!   copy into one unforwarded child instead of recursing.
//! - **Occupancy-driven heap resizing**, growing or shrinking the next
//!   to-space based on how full from-space was at the start of a sweep.
//!
//! It does not implement concurrent collection, generational collection,
//! finalizers/weak references, interior pointers, pointer tagging, or
//! conservative stack scanning - the managed object layout and root
//! registration are the mutator's responsibility, not the collector's.
//!
//! ## Quick Start
//!
//! ```rust
//! use chasegc::{GarbageCollector, GcConfig};
//!
//! let mut gc = GarbageCollector::new(GcConfig::default());
//!
//! let mut root: *mut u8 = std::ptr::null_mut();
//! gc.push_root(&mut root as *mut _);
//!
//! // Allocate a single-field object and install it as the root.
//! let obj = gc.alloc(16);
//! unsafe {
//!     chasegc::object::set_header_word(obj, 1);
//!     chasegc::object::set_field(obj, 0, std::ptr::null_mut());
//! }
//! root = obj;
//!
//! gc.gc_full();
//! gc.pop_root(&mut root as *mut _);
//! ```
//!
//! ## Modules
//!
//! - [`gc`]: the driver - phase state machine, allocation, barriers, roots,
//!   and the mark engine.
//! - [`relocate`]: the sweep engine (forwarding, chase, field fixup).
//! - [`object`]: managed object / record layout and accessors.
//! - [`heap`]: semispace regions and the resize policy.
//! - [`marker`]: mark/sweep work queues and the root stack.
//! - [`barrier`]: the insertion write barrier's tinting logic.
//! - [`allocator`]: the bump-allocation primitive.
//! - [`config`]: validated tunables and an environment overlay.
//! - [`error`]: configuration-time error types.
//! - [`logging`]: structured, leveled event logging.
//! - [`stats`]: allocation, barrier, and phase counters.
//! - [`runtime`]: the process-wide collector singleton.
//! - [`util`]: alignment helpers and size constants.

pub mod allocator;
pub mod barrier;
pub mod config;
pub mod error;
pub mod gc;
pub mod heap;
pub mod logging;
pub mod marker;
pub mod object;
pub mod relocate;
pub mod runtime;
pub mod stats;
pub mod util;

pub use config::GcConfig;
pub use error::{ConfigError, Result};
pub use gc::{GarbageCollector, Phase};

/// `chasegc` version string, from `Cargo.toml`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_builds_a_collector() {
        let gc = GarbageCollector::new(GcConfig::default());
        assert_eq!(gc.phase(), Phase::Mark);
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!VERSION.is_empty());
    }
}
