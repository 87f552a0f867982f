//! Marker Module - Tri-Color Mark State
//!
//! Houses the mark engine's supporting data structures: the grey/black
//! [`WorkQueue`]s and the mutator's [`RootStack`]. The mark engine itself -
//! `mark_step` and its seed rule - is implemented directly on
//! [`crate::gc::GarbageCollector`], since it shares the collector's heap,
//! queues, and stats rather than owning a separate struct.

pub mod mark_queue;
pub mod roots;

pub use mark_queue::{WorkQueue, WorkQueueStats};
pub use roots::{RootGuard, RootSlot, RootStack};
