//! Runtime Module - Process-Wide Collector Singleton
//!
//! Exposes the single, process-wide [`GarbageCollector`] instance most
//! embedders use, lazily initialized on first access - mirroring the
//! teacher crate's own `lazy_static!`-based singletons (its global
//! logger). Embedders who want an explicit handle instead of hidden
//! global state can construct a [`GarbageCollector`] directly via
//! [`GarbageCollector::new`] and skip this module entirely.

use crate::config::GcConfig;
use crate::gc::GarbageCollector;
use lazy_static::lazy_static;
use std::sync::{Mutex, MutexGuard};

lazy_static! {
    static ref GLOBAL_GC: Mutex<GarbageCollector> =
        Mutex::new(GarbageCollector::new(GcConfig::from_env()));
}

/// Access the process-wide collector.
///
/// # Panics
/// Panics if the global mutex is poisoned - a prior panic inside a held
/// lock most likely left the heap mid-mutation, so there is no safe way
/// to keep using it.
pub fn global() -> MutexGuard<'static, GarbageCollector> {
    GLOBAL_GC
        .lock()
        .unwrap_or_else(|_| panic!("chasegc: global collector mutex poisoned"))
}
