//! GC stress tests - high load and long-running scenarios.
//!
//! These are marked `#[ignore]` by default; run them explicitly with
//! `cargo test --test gc_stress -- --ignored`.

mod common;

use chasegc::object;
use common::{alloc_object, build_chain, walk_chain};

#[test]
#[ignore]
fn stress_many_small_objects_across_several_collections() {
    let mut gc = common::gc_with_heap(64 * 1024);
    let mut root: *mut u8 = std::ptr::null_mut();
    gc.push_root(&mut root as *mut _);
    root = alloc_object(&mut gc, 0);

    for i in 0..200_000 {
        let obj = alloc_object(&mut gc, 0);
        if i % 5000 == 0 {
            gc.gc_full();
        }
        let _ = obj; // unrooted; should be reclaimed on the next sweep
    }

    gc.gc_full();
    assert_eq!(gc.stats().current_allocated_objects, 1);
    assert!(!root.is_null());
    gc.pop_root(&mut root as *mut _);
}

#[test]
#[ignore]
fn stress_long_linear_chain_survives_repeated_full_collections() {
    let mut gc = common::gc_with_heap(256 * 1024);
    let mut root: *mut u8 = std::ptr::null_mut();
    gc.push_root(&mut root as *mut _);
    root = build_chain(&mut gc, 50_000);

    for _ in 0..5 {
        gc.gc_full();
    }

    assert_eq!(walk_chain(root).len(), 50_000);
    gc.pop_root(&mut root as *mut _);
}

#[test]
#[ignore]
fn stress_deep_fan_out_tree_preserves_shape() {
    // Binary tree, depth 14 => ~16383 nodes, each with two fields.
    let mut gc = common::gc_with_heap(512 * 1024);
    let mut root: *mut u8 = std::ptr::null_mut();
    gc.push_root(&mut root as *mut _);

    fn build(gc: &mut chasegc::gc::GarbageCollector, depth: usize) -> *mut u8 {
        let node = alloc_object(gc, 2);
        if depth > 0 {
            let left = build(gc, depth - 1);
            let right = build(gc, depth - 1);
            unsafe {
                gc.write(node, 0, left);
                gc.write(node, 1, right);
            }
        }
        node
    }

    root = build(&mut gc, 14);
    gc.gc_full();

    fn count(root: *mut u8) -> usize {
        unsafe {
            let left = object::get_field(root, 0);
            let right = object::get_field(root, 1);
            let mut total = 1;
            if !left.is_null() {
                total += count(left);
            }
            if !right.is_null() {
                total += count(right);
            }
            total
        }
    }

    assert_eq!(count(root), (1 << 15) - 1);
    gc.pop_root(&mut root as *mut _);
}

#[test]
#[ignore]
fn stress_repeated_resize_up_and_down() {
    // Alternate between a heap full of live objects (drives MAKE_BIGGER)
    // and almost nothing live (drives MAKE_SMALLER), many times over.
    let mut gc = common::gc_with_heap(8 * 1024);
    let mut root: *mut u8 = std::ptr::null_mut();
    gc.push_root(&mut root as *mut _);
    root = alloc_object(&mut gc, 0);

    for round in 0..40 {
        if round % 2 == 0 {
            for _ in 0..500 {
                alloc_object(&mut gc, 4);
            }
        }
        gc.gc_full();
        assert!(!root.is_null());
    }
    gc.pop_root(&mut root as *mut _);
}

#[test]
#[ignore]
fn stress_interleaved_alloc_and_incremental_steps_never_corrupts_the_chain() {
    let mut gc = common::gc_with_heap(32 * 1024);
    let mut root: *mut u8 = std::ptr::null_mut();
    gc.push_root(&mut root as *mut _);
    root = build_chain(&mut gc, 2_000);

    for i in 0..100_000 {
        gc.gc_step();
        if i % 7 == 0 {
            alloc_object(&mut gc, 1); // unrooted churn
        }
    }

    assert_eq!(walk_chain(root).len(), 2_000);
    gc.pop_root(&mut root as *mut _);
}
