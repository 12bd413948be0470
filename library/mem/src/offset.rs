//! Address arithmetic: offsets between locations, displacing locations, and ordering
//! addresses.
//!
//! The arithmetic core is written once, generically over an [`AddressWidth`], and the
//! location-based functions below instantiate it with the native width of the host. Nothing
//! here can fail: overflow wraps with two's-complement semantics, just as the hardware would.
use num_traits::WrappingSub;

use unmanaged_system::arch::{AddressWidth, NativeWidth};

use crate::align::check_aligned;
use crate::location::{Location, Shift};
use crate::unmanaged::{self, Unmanaged};

/// Computes `target - origin` in the signed word type of `W`
#[inline(always)]
pub fn byte_offset_in<W: AddressWidth>(origin: W::Word, target: W::Word) -> W::Signed {
    W::as_signed(WrappingSub::wrapping_sub(&target, &origin))
}

/// Computes the number of `size`-byte elements between `origin` and `target`, truncated
/// toward zero, in the signed word type of `W`.
///
/// # Panics
///
/// Panics if `size` is zero. In debug builds, also panics if `size` does not fit in the
/// signed word type of `W`.
#[inline(always)]
pub fn element_offset_in<W: AddressWidth>(
    origin: W::Word,
    target: W::Word,
    size: usize,
) -> W::Signed {
    byte_offset_in::<W>(origin, target) / W::signed(size)
}

/// Returns the signed byte offset from `origin` to `target`.
///
/// A positive result means `target` lies after `origin`.
#[inline]
pub fn byte_offset(origin: impl Location, target: impl Location) -> isize {
    let origin = NativeWidth::word(origin.address().get());
    let target = NativeWidth::word(target.address().get());
    NativeWidth::to_isize(byte_offset_in::<NativeWidth>(origin, target))
}

/// Returns the signed number of elements of `T` from `origin` to `target`, truncated toward
/// zero if the two are not a whole number of elements apart.
///
/// Both locations are checked for alignment when alignment checks are enabled.
///
/// # Panics
///
/// Panics if `T` is zero-sized.
#[inline]
pub fn element_offset<T: Unmanaged>(
    origin: impl Location<Target = T>,
    target: impl Location<Target = T>,
) -> isize {
    let origin = origin.address();
    let target = target.address();
    check_aligned::<T>(origin);
    check_aligned::<T>(target);
    NativeWidth::to_isize(element_offset_in::<NativeWidth>(
        NativeWidth::word(origin.get()),
        NativeWidth::word(target.get()),
        unmanaged::size_of::<T>(),
    ))
}

/// Displaces `location` by `count` elements of its target type
#[inline]
pub fn add<L: Shift>(location: L, count: isize) -> L {
    location.shift_bytes(count.wrapping_mul(unmanaged::size_of::<L::Target>() as isize))
}

/// Displaces `location` by `-count` elements of its target type
#[inline]
pub fn subtract<L: Shift>(location: L, count: isize) -> L {
    location.shift_bytes(
        count
            .wrapping_mul(unmanaged::size_of::<L::Target>() as isize)
            .wrapping_neg(),
    )
}

/// Displaces `location` by `bytes` bytes, regardless of its target type
#[inline]
pub fn add_bytes<L: Shift>(location: L, bytes: isize) -> L {
    location.shift_bytes(bytes)
}

/// Displaces `location` by `-bytes` bytes, regardless of its target type
#[inline]
pub fn subtract_bytes<L: Shift>(location: L, bytes: isize) -> L {
    location.shift_bytes(bytes.wrapping_neg())
}

/// Returns true if both locations have the same address
#[inline]
pub fn are_same(left: impl Location, right: impl Location) -> bool {
    left.address() == right.address()
}

/// Returns true if `left` has a higher address than `right`.
///
/// The comparison is only meaningful for two locations within the same allocation.
#[inline]
pub fn is_address_greater_than(left: impl Location, right: impl Location) -> bool {
    left.address() > right.address()
}

/// Returns true if `left` has a lower address than `right`.
///
/// The comparison is only meaningful for two locations within the same allocation.
#[inline]
pub fn is_address_less_than(left: impl Location, right: impl Location) -> bool {
    left.address() < right.address()
}

#[inline]
pub fn is_address_geq(left: impl Location, right: impl Location) -> bool {
    let (left, right) = (left.address(), right.address());
    are_same(left, right) || is_address_greater_than(left, right)
}

#[inline]
pub fn is_address_leq(left: impl Location, right: impl Location) -> bool {
    let (left, right) = (left.address(), right.address());
    are_same(left, right) || is_address_less_than(left, right)
}
