//! Shared Test Helpers - Object Graph Construction
//!
//! Builds managed objects through the public `chasegc` API (`alloc` +
//! `object::set_header_word`/`set_field`) so tests exercise the same path a
//! real mutator would, rather than poking record internals directly. Field
//! count is stored verbatim in the low bits of the header word, matching
//! [`chasegc::config::default_field_count_fn`].

use chasegc::gc::GarbageCollector;
use chasegc::object;
use chasegc::GcConfig;
use std::sync::Once;

static LOGGING: Once = Once::new();

/// Initialize `env_logger` once per test binary, so `RUST_LOG=debug cargo
/// test -- --nocapture` surfaces the collector's structured event log.
pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

/// Heap comfortably small enough that a handful of allocations pushes
/// occupancy across the default 0.7 grow threshold, without being so small
/// that a single object overflows it.
pub const SMALL_HEAP_BYTES: usize = 4096;

pub fn small_heap_gc() -> GarbageCollector {
    GarbageCollector::new(GcConfig {
        initial_heap_bytes: SMALL_HEAP_BYTES,
        ..Default::default()
    })
}

pub fn gc_with_heap(initial_heap_bytes: usize) -> GarbageCollector {
    GarbageCollector::new(GcConfig {
        initial_heap_bytes,
        ..Default::default()
    })
}

/// Allocate an object with `field_count` null-initialized fields.
pub fn alloc_object(gc: &mut GarbageCollector, field_count: usize) -> *mut u8 {
    let payload_bytes = 8 + field_count * 8;
    let obj = gc.alloc(payload_bytes);
    unsafe {
        object::set_header_word(obj, field_count as u64);
        for i in 0..field_count {
            object::set_field(obj, i, std::ptr::null_mut());
        }
    }
    obj
}

/// Number of fields a previously-allocated object carries, per its header.
pub fn field_count_of(obj: *mut u8) -> usize {
    unsafe { object::header_word(obj) as usize }
}

/// Build a linear chain `o0 -> o1 -> ... -> o[len-1] -> null`, each object
/// having exactly one field. Returns the head.
pub fn build_chain(gc: &mut GarbageCollector, len: usize) -> *mut u8 {
    let mut objs = Vec::with_capacity(len);
    for _ in 0..len {
        objs.push(alloc_object(gc, 1));
    }
    for i in 0..len {
        if i + 1 < len {
            let next = objs[i + 1];
            unsafe {
                gc.write(objs[i], 0, next);
            }
        }
    }
    objs[0]
}

/// Walk a chain built by [`build_chain`], returning the objects visited in
/// order (stops at the first null field).
pub fn walk_chain(head: *mut u8) -> Vec<*mut u8> {
    let mut visited = Vec::new();
    let mut cur = head;
    loop {
        visited.push(cur);
        let next = unsafe { object::get_field(cur, 0) };
        if next.is_null() {
            break;
        }
        cur = next;
    }
    visited
}

/// Build a two-node cycle `a -> b -> a` and return `(a, b)`.
pub fn build_cycle(gc: &mut GarbageCollector) -> (*mut u8, *mut u8) {
    let a = alloc_object(gc, 1);
    let b = alloc_object(gc, 1);
    unsafe {
        gc.write(a, 0, b);
        gc.write(b, 0, a);
    }
    (a, b)
}
