//! Overlap detection between memory regions.
//!
//! Two non-empty regions `[origin, origin + origin_len)` and `[target, target + target_len)`
//! are disjoint iff the target lies entirely after the origin, or entirely before it. Rather
//! than computing either end address (which may overflow), the test is phrased in terms of
//! `d = target - origin` in unsigned, wrapping arithmetic:
//!
//! * the target starts inside the origin iff `d < origin_len`
//! * the origin starts inside the target iff `-d < target_len`
//!
//! Two regions overlap iff one of them starts inside the other. Arithmetic is modulo the
//! address width, so a region which wraps past the top of the address space is treated as
//! continuing at zero.
use core::fmt;

use num_traits::{WrappingNeg, WrappingSub, Zero};

use unmanaged_system::arch::{AddressWidth, NativeWidth};

use crate::location::{Address, Location};
use crate::offset::byte_offset_in;
use crate::unmanaged::{self, Unmanaged};

/// Returns the byte offset from `origin` to `target` if the two regions overlap, in the
/// signed word type of `W`
#[inline]
pub fn overlap_offset_in<W: AddressWidth>(
    origin: W::Word,
    origin_len: W::Word,
    target: W::Word,
    target_len: W::Word,
) -> Option<W::Signed> {
    if origin_len.is_zero() || target_len.is_zero() {
        return None;
    }

    let distance = WrappingSub::wrapping_sub(&target, &origin);
    let target_starts_in_origin = distance < origin_len;
    let origin_starts_in_target = WrappingNeg::wrapping_neg(&distance) < target_len;
    if target_starts_in_origin || origin_starts_in_target {
        Some(byte_offset_in::<W>(origin, target))
    } else {
        None
    }
}

/// Returns true if the two regions overlap, using the word types of `W`
#[inline]
pub fn overlaps_in<W: AddressWidth>(
    origin: W::Word,
    origin_len: W::Word,
    target: W::Word,
    target_len: W::Word,
) -> bool {
    overlap_offset_in::<W>(origin, origin_len, target, target_len).is_some()
}

#[inline(always)]
fn native_overlap_offset(
    origin: Address,
    origin_len: usize,
    target: Address,
    target_len: usize,
) -> Option<isize> {
    overlap_offset_in::<NativeWidth>(
        NativeWidth::word(origin.get()),
        NativeWidth::word(origin_len),
        NativeWidth::word(target.get()),
        NativeWidth::word(target_len),
    )
    .map(NativeWidth::to_isize)
}

/// Returns true if the `origin_len` bytes at `origin` overlap the `target_len` bytes at
/// `target`.
///
/// An empty region never overlaps anything.
#[inline]
pub fn overlaps_bytes(
    origin: impl Location,
    origin_len: usize,
    target: impl Location,
    target_len: usize,
) -> bool {
    native_overlap_offset(origin.address(), origin_len, target.address(), target_len).is_some()
}

/// Returns true if the `count` elements at `source` overlap the `other_count` elements
/// at `other`
#[inline]
pub fn overlaps<T: Unmanaged>(
    source: impl Location<Target = T>,
    count: usize,
    other: impl Location<Target = T>,
    other_count: usize,
) -> bool {
    overlap_offset(source, count, other, other_count).is_some()
}

/// Like [`overlaps`], but returns the signed element offset from `source` to `other` when
/// the two sequences overlap, and `None` when they do not.
#[inline]
pub fn overlap_offset<T: Unmanaged>(
    source: impl Location<Target = T>,
    count: usize,
    other: impl Location<Target = T>,
    other_count: usize,
) -> Option<isize> {
    let size = unmanaged::size_of::<T>();
    native_overlap_offset(
        source.address(),
        count.wrapping_mul(size),
        other.address(),
        other_count.wrapping_mul(size),
    )
    .map(|bytes| bytes / size as isize)
}

/// Returns true if `other` is one of the `count` elements starting at `source`
#[inline]
pub fn contains<T: Unmanaged>(
    source: impl Location<Target = T>,
    count: usize,
    other: impl Location<Target = T>,
) -> bool {
    overlaps(source, count, other, 1)
}

/// This struct represents a contiguous range of bytes, and is used
/// to reason about overlap and membership of addresses in that range.
///
/// A region is just a pair of numbers, it is never dereferenced and
/// may be empty.
#[derive(Copy, Clone, PartialEq, Eq, Hash)]
pub struct Region {
    start: Address,
    len: usize,
}
impl Region {
    /// Creates a `Region` covering `len` bytes starting at `start`
    #[inline]
    pub fn new(start: impl Location, len: usize) -> Self {
        Self {
            start: start.address(),
            len,
        }
    }

    /// Creates a `Region` covering `count` elements starting at `start`
    #[inline]
    pub fn of<T: Unmanaged>(start: impl Location<Target = T>, count: usize) -> Self {
        Self::new(start, count.wrapping_mul(unmanaged::size_of::<T>()))
    }

    #[inline(always)]
    pub fn start(&self) -> Address {
        self.start
    }

    /// Returns the address one byte past the end of this region, wrapping around the
    /// address space
    #[inline]
    pub fn end(&self) -> Address {
        Address::new(self.start.get().wrapping_add(self.len))
    }

    /// Returns the size of this region in bytes
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns true if this region shares at least one byte with `other`
    #[inline]
    pub fn overlaps(&self, other: &Region) -> bool {
        self.overlap_offset(other).is_some()
    }

    /// Returns the byte offset from the start of this region to the start of `other`,
    /// if the two regions overlap
    #[inline]
    pub fn overlap_offset(&self, other: &Region) -> Option<isize> {
        native_overlap_offset(self.start, self.len, other.start, other.len)
    }

    /// Returns true if the byte at `location` is in this region
    #[inline]
    pub fn contains(&self, location: impl Location) -> bool {
        overlaps_bytes(self.start, self.len, location, 1)
    }
}
impl fmt::Debug for Region {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Region({:#x}..{:#x})", self.start, self.end())
    }
}
