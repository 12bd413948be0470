//! Byte-level primitives for unmanaged values, i.e. trivially-copyable types with a fixed
//! layout and no indirection.
//!
//! This crate is meant to be used from other unsafe code (serializers, marshallers, arena
//! allocators, etc.) which needs raw control over layout, and provides:
//!
//! * Address arithmetic: byte and element offsets between two locations, shifting a location
//! by some number of elements, and ordering of addresses
//! * Alignment checks: a cheap, debug-only heuristic for catching grossly misaligned accesses
//! * Overlap detection: whether two memory regions overlap, and where
//! * Block transfers: copies with `memmove` semantics, for aligned and unaligned addresses
//! * Raw references: typed, nullable locations which can be read, written and reinterpreted
//! * Field offsets: the byte offset of a member within its enclosing aggregate
//!
//! Every operation is stateless, so nothing here needs synchronization. With the exception of
//! [`offset_of`], which validates its inputs and returns [`OutOfRange`] on failure, all
//! operations are either pure arithmetic (which wraps rather than failing), or have documented
//! preconditions which are not checked.
//!
//! The width of the arithmetic is always the native address width of the host, selected at
//! compile time, see [`unmanaged_system::arch`].
#[macro_use]
extern crate static_assertions;

mod align;
mod block;
mod error;
mod field;
mod location;
mod offset;
mod overlap;
mod raw_ref;
mod unmanaged;

pub use self::align::{
    check_aligned, effective_alignment, is_aligned_at, is_maybe_aligned, round_down_to_alignment,
    ALIGNMENT_CHECKS,
};
pub use self::block::{move_block, move_block_unaligned, move_elements};
pub use self::error::{Misaligned, OutOfRange};
pub use self::field::offset_of;
pub use self::location::{Address, Location, Shift};
pub use self::offset::{
    add, add_bytes, are_same, byte_offset, byte_offset_in, element_offset, element_offset_in,
    is_address_geq, is_address_greater_than, is_address_leq, is_address_less_than, subtract,
    subtract_bytes,
};
pub use self::overlap::{
    contains, overlap_offset, overlap_offset_in, overlaps, overlaps_bytes, overlaps_in, Region,
};
pub use self::raw_ref::{
    as_byte_ref, as_pointer, copy, is_null_ref, is_null_ref_read_only, null_ref,
    null_ref_read_only, read, read_unaligned, reinterpret, reinterpret_read_only, write,
    write_unaligned, RawRef, RawRefReadOnly,
};
pub use self::unmanaged::{align_of, size_of, Unmanaged};

pub use unmanaged_system::arch::{AddressWidth, NativeWidth, PointerWidth, Width32, Width64};
pub use unmanaged_system::MIN_ALIGN;
