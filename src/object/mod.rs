//! Object Module - Managed Object Layout & Accessors
//!
//! A managed object as the mutator sees it (the "payload") is opaque to
//! the collector: a header word followed by a run of pointer-sized field
//! slots, the count of which is recovered from the header by a
//! runtime-supplied [`crate::config::FieldCountFn`].
//!
//! The collector prepends a small [`RecordHeader`] to every payload it
//! allocates. `record_of`/`payload_of` convert between the two views by
//! constant-offset pointer arithmetic - the offset is `size_of::<RecordHeader>()`,
//! computed by the compiler rather than hand-counted.

use std::mem::size_of;

/// Tri-color mark state of a managed object.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    White,
    Grey,
    Black,
}

/// Metadata the collector keeps alongside every managed payload.
///
/// Laid out immediately before the payload it describes:
/// `[RecordHeader][header_word: u64][field_0]...[field_{n-1}]`.
#[repr(C)]
pub struct RecordHeader {
    pub color: Color,
    /// Address of this record's to-space copy; null outside a sweep.
    pub forward: *mut u8,
}

impl RecordHeader {
    pub fn new() -> Self {
        RecordHeader {
            color: Color::White,
            forward: std::ptr::null_mut(),
        }
    }
}

impl Default for RecordHeader {
    fn default() -> Self {
        Self::new()
    }
}

/// Size, in bytes, of the fixed record prefix.
pub const RECORD_PREFIX: usize = size_of::<RecordHeader>();

/// Size, in bytes, of a pointer-sized field slot.
pub const FIELD_SIZE: usize = size_of::<*mut u8>();

/// Size, in bytes, of the payload's own header word.
pub const HEADER_WORD_SIZE: usize = size_of::<u64>();

/// Total size in bytes of a record (prefix + header word + fields) for
/// an object whose header word decodes to `field_count` fields.
pub fn record_size(field_count: usize) -> usize {
    RECORD_PREFIX + HEADER_WORD_SIZE + field_count * FIELD_SIZE
}

/// Recover the record prefix from a payload pointer.
///
/// # Safety
/// `payload` must point at a payload previously returned by the
/// allocator (i.e. must be preceded in memory by a valid `RecordHeader`).
pub unsafe fn record_of(payload: *mut u8) -> *mut RecordHeader {
    payload.sub(RECORD_PREFIX) as *mut RecordHeader
}

/// Recover the payload pointer from a record prefix pointer.
///
/// # Safety
/// `record` must point at a valid `RecordHeader` immediately followed by
/// its payload.
pub unsafe fn payload_of(record: *mut RecordHeader) -> *mut u8 {
    (record as *mut u8).add(RECORD_PREFIX)
}

/// Read the header word (first 8 bytes) of a payload.
///
/// # Safety
/// `payload` must point at a valid, fully-initialized payload.
pub unsafe fn header_word(payload: *mut u8) -> u64 {
    std::ptr::read_unaligned(payload as *const u64)
}

/// Write the header word of a payload.
///
/// # Safety
/// `payload` must point at writable memory at least 8 bytes long.
pub unsafe fn set_header_word(payload: *mut u8, value: u64) {
    std::ptr::write_unaligned(payload as *mut u64, value);
}

/// Address of field slot `index` within a payload.
///
/// # Safety
/// `payload` must be valid and `index` must be within the object's field
/// count.
pub unsafe fn field_ptr(payload: *mut u8, index: usize) -> *mut *mut u8 {
    payload.add(HEADER_WORD_SIZE + index * FIELD_SIZE) as *mut *mut u8
}

/// Read field slot `index`.
///
/// # Safety
/// Same requirements as [`field_ptr`].
pub unsafe fn get_field(payload: *mut u8, index: usize) -> *mut u8 {
    std::ptr::read_unaligned(field_ptr(payload, index))
}

/// Write field slot `index`.
///
/// # Safety
/// Same requirements as [`field_ptr`].
pub unsafe fn set_field(payload: *mut u8, index: usize, value: *mut u8) {
    std::ptr::write_unaligned(field_ptr(payload, index), value);
}
