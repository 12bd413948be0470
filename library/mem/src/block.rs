//! Block transfers with `memmove` semantics.
//!
//! Every transfer behaves as if the source bytes were first copied into an intermediate
//! buffer, and then copied to the destination, so overlapping source and destination
//! ranges are always handled correctly.
use core::mem;
use core::ptr;

use log::trace;

use crate::align::{check_aligned, round_down_to_alignment};
use crate::offset::{are_same, byte_offset};
use crate::unmanaged::{self, Unmanaged};

/// The granularity of aligned block transfers
const WORD: usize = mem::size_of::<usize>();

/// Moves `byte_count` bytes from `src` to `dest`, a machine word at a time.
///
/// The ranges may overlap.
///
/// # Safety
///
/// * `src` must be valid for reads of `byte_count` bytes
/// * `dest` must be valid for writes of `byte_count` bytes
/// * Both `src` and `dest` must be aligned to `usize`; this is checked when alignment checks
/// are enabled, and is otherwise undefined behavior. Use [`move_block_unaligned`] when this
/// cannot be guaranteed.
pub unsafe fn move_block(dest: *mut u8, src: *const u8, byte_count: usize) {
    check_aligned::<usize>(dest);
    check_aligned::<usize>(src);

    if byte_count == 0 || are_same(dest, src) {
        return;
    }

    // Both pointers are word-aligned, so the transfer splits into a word-sized bulk
    // followed by fewer than `WORD` trailing bytes
    let bulk = round_down_to_alignment(byte_count, WORD);
    let tail = byte_count - bulk;
    let words = bulk / WORD;

    // When `dest` starts inside the source range, copying front-to-back would
    // overwrite source bytes before they are read, so the tail must go first
    let backward = (byte_offset(src, dest) as usize) < byte_count;
    if backward {
        trace!(target: "unmanaged::block", "moving {} bytes backward from {:p} to {:p}", byte_count, src, dest);
        ptr::copy(src.add(bulk), dest.add(bulk), tail);
        ptr::copy(src.cast::<usize>(), dest.cast::<usize>(), words);
    } else {
        ptr::copy(src.cast::<usize>(), dest.cast::<usize>(), words);
        ptr::copy(src.add(bulk), dest.add(bulk), tail);
    }
}

/// Moves `byte_count` bytes from `src` to `dest`, a byte at a time.
///
/// The ranges may overlap, and neither pointer has any alignment requirement.
///
/// # Safety
///
/// * `src` must be valid for reads of `byte_count` bytes
/// * `dest` must be valid for writes of `byte_count` bytes
#[inline]
pub unsafe fn move_block_unaligned(dest: *mut u8, src: *const u8, byte_count: usize) {
    ptr::copy(src, dest, byte_count);
}

/// Moves `count` values of `T` from `src` to `dest`.
///
/// The ranges may overlap.
///
/// # Safety
///
/// * `src` must be valid for reads of `count` values of `T`
/// * `dest` must be valid for writes of `count` values of `T`
/// * Both pointers must be aligned for `T`; this is checked when alignment checks are
/// enabled
#[inline]
pub unsafe fn move_elements<T: Unmanaged>(dest: *mut T, src: *const T, count: usize) {
    check_aligned::<T>(dest);
    check_aligned::<T>(src);

    move_block_unaligned(
        dest.cast(),
        src.cast(),
        count.wrapping_mul(unmanaged::size_of::<T>()),
    );
}
