//! Relocate Module - Sweep Engine (Cheney-with-Chase Relocating Compaction)
//!
//! Implements the collector's sweep half as a second `impl GarbageCollector`
//! block, sibling to the mark engine in [`crate::gc`]. Every BLACK object
//! is copied from from-space into to-space using forwarding pointers, with
//! the "chase" optimization: after copying an object, the loop continues
//! with one of its own unforwarded children rather than recursing, which
//! bounds native stack depth regardless of object-graph depth.

use crate::gc::{GarbageCollector, StepResult};
use crate::object::{self, Color};

impl GarbageCollector {
    /// Return the to-space copy of `p`, relocating it (and as many of its
    /// unforwarded descendants as the chase loop reaches) if it hasn't
    /// been copied yet.
    ///
    /// If `p` does not lie in from-space - an external pointer, or a
    /// pointer already in to-space - it is returned unchanged.
    ///
    /// # Safety
    /// `p`, if it lies in from-space, must point at a valid managed
    /// payload.
    pub(crate) unsafe fn sweep_forward(&mut self, p: *mut u8) -> *mut u8 {
        if p.is_null() || !self.heap.from_space().contains(p as usize) {
            return p;
        }

        let record = object::record_of(p);
        let forward = (*record).forward;
        if !forward.is_null() {
            if let Some(to_space) = self.heap.to_space() {
                if to_space.contains(forward as usize) {
                    return object::payload_of(forward as *mut object::RecordHeader);
                }
            }
        }

        self.sweep_chase(record);
        object::payload_of((*record).forward as *mut object::RecordHeader)
    }

    /// Iterative chase: copies `r0` into to-space, then greedily continues
    /// with one unforwarded child per iteration, following the
    /// field-by-field copy-and-detect loop (not a raw `memcpy`, since the
    /// next chase target must be identified while copying). Remaining
    /// children become entry points for later `sweep_forward` calls made
    /// during the field-fixup pass.
    ///
    /// # Safety
    /// `r0` must be a valid from-space record not yet forwarded.
    pub(crate) unsafe fn sweep_chase(&mut self, r0: *mut object::RecordHeader) {
        let mut r = r0;
        loop {
            let payload = object::payload_of(r);
            let header = object::header_word(payload);
            let field_count = (self.config.field_count_fn)(header);
            let total = object::RECORD_PREFIX
                + object::HEADER_WORD_SIZE
                + field_count * object::FIELD_SIZE;

            let to_space = self
                .heap
                .to_space_mut()
                .expect("sweep_chase called without a prepared to-space");
            let q_record = to_space.bump_alloc(total).unwrap_or_else(|| {
                panic!(
                    "chasegc: to-space overflow relocating a {total}-byte record - resize strategy under-sized the heap"
                )
            }) as *mut object::RecordHeader;

            std::ptr::write(
                q_record,
                object::RecordHeader {
                    color: Color::White,
                    forward: std::ptr::null_mut(),
                },
            );
            let q_payload = object::payload_of(q_record);
            object::set_header_word(q_payload, header);

            let mut next: *mut object::RecordHeader = std::ptr::null_mut();
            for i in 0..field_count {
                let f = object::get_field(payload, i);
                object::set_field(q_payload, i, f);
                if !f.is_null() && self.heap.from_space().contains(f as usize) {
                    let child = object::record_of(f);
                    if (*child).forward.is_null() {
                        next = child;
                    }
                }
            }

            (*r).forward = q_record as *mut u8;
            self.black.push(q_payload);

            if next.is_null() {
                break;
            }
            r = next;
        }
    }

    /// One unit of sweep work. Returns `Done` once the black queue is
    /// empty.
    ///
    /// Entries on the black queue are either not-yet-relocated from-space
    /// records (forwarded here via `sweep_forward`) or freshly relocated
    /// to-space records, whose fields are walked and rewritten from
    /// from-space pointers to their forwarded to-space equivalents.
    pub(crate) fn sweep_step(&mut self) -> StepResult {
        let Some(entry) = self.black.pop() else {
            return StepResult::Done;
        };

        unsafe {
            if self.heap.from_space().contains(entry as usize) {
                self.sweep_forward(entry);
            } else {
                let header = object::header_word(entry);
                let field_count = (self.config.field_count_fn)(header);
                for i in 0..field_count {
                    let f = object::get_field(entry, i);
                    if !f.is_null() && self.heap.from_space().contains(f as usize) {
                        let resolved = self.sweep_forward(f);
                        object::set_field(entry, i, resolved);
                    }
                }
            }
        }
        StepResult::NotDone
    }

    /// Finish a sweep: rewrite every root still pointing at from-space to
    /// its forwarded to-space address, swap to-space in as the new
    /// from-space, reset the current-allocation counters, and return to
    /// `Phase::Mark`.
    pub(crate) fn sweep_cleanup(&mut self) {
        unsafe {
            for &slot in self.roots.iter() {
                let target = *slot;
                if !target.is_null() && self.heap.from_space().contains(target as usize) {
                    let record = object::record_of(target);
                    let forward = (*record).forward;
                    if !forward.is_null() {
                        *slot = object::payload_of(forward as *mut object::RecordHeader);
                    }
                }
            }
        }

        self.heap.swap_spaces();
        self.stats.reset_current();
        self.stats.record_sweep_cycle();
        self.phase = crate::gc::Phase::Mark;
    }
}
