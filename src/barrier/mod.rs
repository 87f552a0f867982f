//! Barrier Module - Insertion Write Barrier
//!
//! The collector maintains the tri-color invariant (no BLACK object points
//! at a WHITE one) with a single *insertion* barrier: whenever the mutator
//! is about to install a pointer into a field, the referent is tinted GREY
//! if it is currently WHITE and lives in from-space. This is the only
//! barrier style this crate implements - there is no deletion/snapshot
//! variant (see `GcEvent`'s counterpart in `logging` and Open Question #4
//! in the design notes).

use crate::heap::Heap;
use crate::marker::WorkQueue;
use crate::object::{self, Color};

/// Tint `target` GREY and enqueue it if it is WHITE and resides in the
/// heap's from-space; otherwise a no-op.
///
/// Used both by the write barrier proper (on a mutator store) and by the
/// allocator (to seed a freshly allocated object into the current mark
/// pass before any root references it).
///
/// # Safety
/// `target`, if non-null, must point at a valid managed payload whose
/// preceding [`crate::object::RecordHeader`] is initialized.
pub unsafe fn maybe_grey(heap: &Heap, grey: &mut WorkQueue, target: *mut u8) {
    if target.is_null() {
        return;
    }
    if !heap.from_space().contains(target as usize) {
        return;
    }
    let record = object::record_of(target);
    if (*record).color == Color::White {
        (*record).color = Color::Grey;
        grey.push(target);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::allocator;
    use crate::heap::Heap;

    fn heap(initial: usize) -> Heap {
        Heap::new(initial, 0.7, 0.2, 2.0, 0.5, 16)
    }

    #[test]
    fn greys_white_in_heap_target() {
        let mut heap = heap(256);
        let mut grey = WorkQueue::new();
        let payload = allocator::allocate_record(heap.from_space_mut(), 8).unwrap();

        unsafe {
            maybe_grey(&heap, &mut grey, payload);
            let record = object::record_of(payload);
            assert_eq!((*record).color, Color::Grey);
        }
        assert_eq!(grey.len(), 1);
    }

    #[test]
    fn skips_null_and_external() {
        let heap = heap(256);
        let mut grey = WorkQueue::new();

        unsafe {
            maybe_grey(&heap, &mut grey, std::ptr::null_mut());
        }
        assert!(grey.is_empty());

        let external = 0xDEAD_0000usize as *mut u8;
        unsafe {
            maybe_grey(&heap, &mut grey, external);
        }
        assert!(grey.is_empty());
    }

    #[test]
    fn already_grey_or_black_is_left_alone() {
        let mut heap = heap(256);
        let mut grey = WorkQueue::new();
        let payload = allocator::allocate_record(heap.from_space_mut(), 8).unwrap();

        unsafe {
            let record = object::record_of(payload);
            (*record).color = Color::Black;
            maybe_grey(&heap, &mut grey, payload);
            assert_eq!((*record).color, Color::Black);
        }
        assert!(grey.is_empty());
    }
}
