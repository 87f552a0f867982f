//! GC Module - Driver: Phase State Machine, Allocation, Barriers, Roots
//!
//! `GarbageCollector` owns every piece of collector state - the heap, the
//! grey/black work queues, the root stack, stats, and config - and exposes
//! the mutator-facing API (`alloc`, `read`, `write`, `push_root`/`pop_root`/
//! `root_scope`) plus the incremental driver (`gc_step`) and the
//! drain-to-completion fallback (`gc_full`). The mark engine's `mark_step`
//! lives here too, per the design's choice to implement engines as
//! `impl GarbageCollector` blocks rather than separate orchestrator structs;
//! the sweep engine's counterpart methods (`sweep_forward`, `sweep_chase`,
//! `sweep_step`, `sweep_cleanup`) are implemented in a second `impl` block
//! over in [`crate::relocate`].

use crate::allocator;
use crate::barrier;
use crate::config::GcConfig;
use crate::heap::{Heap, ResizeStrategy};
use crate::logging::{self, GcEvent};
use crate::marker::{RootGuard, RootSlot, RootStack, WorkQueue};
use crate::object::{self, Color};
use crate::stats::{GcStats, GcSummary, GcTimer};

/// Which half of the mark-then-compact cycle the collector is in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Mark,
    Sweep,
}

/// Outcome of a single incremental step of either engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum StepResult {
    Done,
    NotDone,
}

/// The collector: heap, tri-color queues, roots, stats, config, and phase.
///
/// Fields are `pub(crate)` rather than private because the sweep engine is
/// implemented as a sibling `impl` block in [`crate::relocate`], which
/// needs direct access to the same state the mark engine and driver use
/// here.
pub struct GarbageCollector {
    pub(crate) heap: Heap,
    pub(crate) grey: WorkQueue,
    pub(crate) black: WorkQueue,
    pub(crate) roots: RootStack,
    pub(crate) stats: GcStats,
    pub(crate) config: GcConfig,
    pub(crate) phase: Phase,
    pub(crate) cycle: u64,
}

impl GarbageCollector {
    /// Build a collector from a validated configuration.
    ///
    /// # Panics
    /// Panics if `config` fails [`GcConfig::validate`] - a malformed
    /// configuration is a construction-time programmer error.
    pub fn new(config: GcConfig) -> Self {
        config
            .validate()
            .unwrap_or_else(|e| panic!("chasegc: invalid configuration: {e}"));
        let heap = Heap::new(
            config.initial_heap_bytes,
            config.grow_threshold,
            config.shrink_threshold,
            config.grow_factor,
            config.shrink_factor,
            config.shrink_slack_bytes,
        );
        let roots = RootStack::new(config.max_roots);
        logging::set_global_level(logging::level_for_verbose(config.verbose));
        GarbageCollector {
            heap,
            grey: WorkQueue::new(),
            black: WorkQueue::new(),
            roots,
            stats: GcStats::new(),
            config,
            phase: Phase::Mark,
            cycle: 0,
        }
    }

    pub fn config(&self) -> &GcConfig {
        &self.config
    }

    pub fn stats(&self) -> GcSummary {
        self.stats.summary()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn heap(&self) -> &Heap {
        &self.heap
    }

    // --- Allocation ------------------------------------------------------

    /// Allocate a record with `payload_bytes` of payload, retrying through
    /// a full collection on the first failure.
    ///
    /// Returns an uninitialized-payload pointer (color `WHITE` already
    /// promoted to `GREY`, header word and fields not yet written); the
    /// caller populates header and fields before publishing the object to
    /// any root or field.
    ///
    /// # Panics
    /// Panics if the heap is still exhausted after a full collection -
    /// an out-of-memory condition with no recoverable continuation.
    pub fn alloc(&mut self, payload_bytes: usize) -> *mut u8 {
        let payload = match allocator::allocate_record(self.heap.from_space_mut(), payload_bytes) {
            Some(p) => p,
            None => {
                logging::log_event(GcEvent::AllocationFailure {
                    requested_bytes: payload_bytes,
                });
                self.gc_full();
                allocator::allocate_record(self.heap.from_space_mut(), payload_bytes)
                    .unwrap_or_else(|| {
                        panic!(
                            "chasegc: out of memory allocating {payload_bytes} bytes after a full collection"
                        )
                    })
            }
        };

        unsafe {
            barrier::maybe_grey(&self.heap, &mut self.grey, payload);
        }
        self.stats
            .record_alloc(object::RECORD_PREFIX + payload_bytes);
        self.gc_step();
        payload
    }

    // --- Barriers ----------------------------------------------------------

    /// Instrumentation-only read barrier: counts the read, no semantic
    /// effect on color state.
    pub fn read(&mut self, _obj: *mut u8, _field_index: usize) {
        self.stats.record_read();
    }

    /// Insertion write barrier.
    ///
    /// Performs the field store itself - this implementation applies the
    /// barrier post-store (§5) - then tints `new_val` grey if it is white
    /// and resides in from-space.
    ///
    /// # Safety
    /// `obj` must be a live managed payload and `field_index` within its
    /// field count.
    pub unsafe fn write(&mut self, obj: *mut u8, field_index: usize, new_val: *mut u8) {
        object::set_field(obj, field_index, new_val);
        barrier::maybe_grey(&self.heap, &mut self.grey, new_val);
        self.stats.record_write();
    }

    // --- Roots -----------------------------------------------------------

    /// Push a root slot. Panics (via [`RootStack::push`]) past `max_roots`.
    pub fn push_root(&mut self, slot: RootSlot) {
        self.roots.push(slot);
        self.stats.record_root_depth(self.roots.len());
    }

    /// Pop the most recently pushed root slot. `slot` is advisory.
    pub fn pop_root(&mut self, slot: RootSlot) {
        self.roots.pop(slot);
    }

    /// Push `slot` and return a guard that pops it automatically on
    /// `Drop` - additive sugar over `push_root`/`pop_root`.
    pub fn root_scope(&mut self, slot: RootSlot) -> RootGuard<'_> {
        let depth_after_push = self.roots.len() + 1;
        self.stats.record_root_depth(depth_after_push);
        RootGuard::new(&mut self.roots, slot)
    }

    // --- Mark engine -------------------------------------------------------

    /// Re-seed the grey queue from the root stack, greying every root that
    /// points into from-space and is still white.
    fn seed_from_roots(&mut self) {
        for &slot in self.roots.iter() {
            unsafe {
                let target = *slot;
                barrier::maybe_grey(&self.heap, &mut self.grey, target);
            }
        }
    }

    /// One unit of mark work: seed from roots if the grey queue is empty,
    /// then pop one grey record, scan its fields, and promote it to
    /// black. Returns `Done` once there is nothing left to mark.
    fn mark_step(&mut self) -> StepResult {
        if self.grey.is_empty() {
            self.seed_from_roots();
        }
        let Some(payload) = self.grey.pop() else {
            return StepResult::Done;
        };

        unsafe {
            let header = object::header_word(payload);
            let field_count = (self.config.field_count_fn)(header);
            for i in 0..field_count {
                let field = object::get_field(payload, i);
                barrier::maybe_grey(&self.heap, &mut self.grey, field);
            }
            let record = object::record_of(payload);
            (*record).color = Color::Black;
        }
        self.black.push(payload);
        StepResult::NotDone
    }

    /// Reset every record marked during a just-completed mark phase back
    /// to white (Open Question #2, decision a): when the resize heuristic
    /// decides not to sweep, leaving those objects BLACK would make the
    /// next mark pass's seed rule - which only greys WHITE objects - skip
    /// them forever. The black queue already holds exactly the set that
    /// needs resetting, so this drains it.
    fn reset_black_to_white(&mut self) {
        while let Some(payload) = self.black.pop() {
            unsafe {
                let record = object::record_of(payload);
                (*record).color = Color::White;
            }
        }
    }

    // --- Driver ------------------------------------------------------------

    /// Run one incremental unit of collection work: one `mark_step` in
    /// `Phase::Mark`, one `sweep_step` in `Phase::Sweep`. Called once per
    /// `alloc`, per the spec's cooperative-incrementality model.
    pub fn gc_step(&mut self) {
        match self.phase {
            Phase::Mark => {
                if self.mark_step() == StepResult::NotDone {
                    return;
                }
                self.stats.record_mark_cycle();
                logging::log_event(GcEvent::PhaseEnd {
                    phase: "mark".into(),
                    cycle: self.cycle,
                });
                let strategy = self.heap.prepare_to_space(false);
                if strategy == ResizeStrategy::DoNothing {
                    self.reset_black_to_white();
                } else {
                    self.phase = Phase::Sweep;
                    logging::log_event(GcEvent::PhaseStart {
                        phase: "sweep".into(),
                        cycle: self.cycle,
                    });
                }
            }
            Phase::Sweep => {
                if self.sweep_step() == StepResult::NotDone {
                    return;
                }
                self.sweep_cleanup();
            }
        }
    }

    /// Drain marking and sweeping to completion, forcing a `MakeBigger`
    /// to-space regardless of occupancy - used on allocation failure,
    /// where demand rather than occupancy drove the decision to collect.
    ///
    /// If called while a sweep is already in progress, that sweep is
    /// drained and cleaned up first; the documented pseudocode assumes
    /// `gc_full` always starts from `Phase::Mark`, and this is the
    /// explicit decision for the case it doesn't.
    pub fn gc_full(&mut self) {
        let timer = GcTimer::new();

        if self.phase == Phase::Sweep {
            while self.sweep_step() == StepResult::NotDone {}
            self.sweep_cleanup();
        }

        self.cycle += 1;
        logging::log_event(GcEvent::CycleStart { cycle: self.cycle });

        while self.mark_step() == StepResult::NotDone {}
        self.stats.record_mark_cycle();
        let before = self.stats.summary().current_allocated_bytes;

        self.heap.prepare_to_space(true);
        self.phase = Phase::Sweep;

        while self.sweep_step() == StepResult::NotDone {}
        self.sweep_cleanup();

        self.stats.record_cycle_time(&timer);
        logging::log_event(GcEvent::CycleEnd {
            cycle: self.cycle,
            reclaimed_bytes: before as usize,
        });
    }

    // --- Diagnostics ---------------------------------------------------

    pub fn print_stats(&self) {
        println!("{}", self.stats.summary());
    }

    pub fn print_state(&self) {
        println!(
            "chasegc: phase={:?} cycle={} grey={} black={} occupancy={:.3}",
            self.phase,
            self.cycle,
            self.grey.len(),
            self.black.len(),
            self.heap.occupancy(),
        );
    }

    pub fn print_roots(&self) {
        println!(
            "chasegc: {} roots (high water {})",
            self.roots.len(),
            self.roots.high_water(),
        );
    }
}
