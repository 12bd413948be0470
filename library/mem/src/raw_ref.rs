//! Raw references: typed, nullable, unchecked locations.
//!
//! `RawRef<T>` and `RawRefReadOnly<T>` play the role of a reference to a `T` where a Rust
//! reference cannot be used, e.g. because the location may be null, or may not hold a valid
//! `T` yet. Both are plain pointers underneath; every method is a thin wrapper around the
//! free functions of this crate.
use core::cmp::Ordering;
use core::fmt;
use core::hash::{Hash, Hasher};
use core::ptr;

use crate::align::check_aligned;
use crate::block::move_elements;
use crate::location::{Address, Location, Shift};
use crate::offset;
use crate::unmanaged::Unmanaged;

/// A raw, nullable, mutable location of a `T`
#[repr(transparent)]
pub struct RawRef<T: Unmanaged> {
    ptr: *mut T,
}

/// A raw, nullable, read-only location of a `T`
#[repr(transparent)]
pub struct RawRefReadOnly<T: Unmanaged> {
    ptr: *const T,
}

assert_eq_size!(RawRef<u64>, *mut u64);
assert_eq_size!(RawRefReadOnly<[u8; 3]>, *const [u8; 3]);

macro_rules! impl_raw_ref {
    ($name:ident, $ptr:ty) => {
        impl<T: Unmanaged> $name<T> {
            #[inline(always)]
            pub const fn from_ptr(ptr: $ptr) -> Self {
                Self { ptr }
            }

            #[inline(always)]
            pub const fn as_ptr(self) -> $ptr {
                self.ptr
            }

            #[inline(always)]
            pub fn address(self) -> Address {
                Location::address(&self)
            }

            /// Returns true if this is a null reference
            #[inline(always)]
            pub fn is_null(self) -> bool {
                is_null_ref(self)
            }

            /// Returns a reference to the `count`-th element after this one
            #[inline]
            pub fn add(self, count: isize) -> Self {
                offset::add(self, count)
            }

            /// Returns a reference to the `count`-th element before this one
            #[inline]
            pub fn subtract(self, count: isize) -> Self {
                offset::subtract(self, count)
            }

            /// Reinterprets this as a reference to a `U` at the same address.
            ///
            /// No bytes are moved. Accessing a `U` through the result is only sound if
            /// `U` is no larger than `T`, or the memory past this `T` is known to be live.
            #[inline(always)]
            pub fn reinterpret<U: Unmanaged>(self) -> $name<U> {
                $name { ptr: self.ptr.cast() }
            }

            /// Reinterprets this as a reference to the first byte of the `T`
            #[inline(always)]
            pub fn as_byte_ref(self) -> $name<u8> {
                self.reinterpret()
            }

            /// Reads the `T` at this location.
            ///
            /// # Safety
            ///
            /// The location must be non-null, aligned for `T`, and hold an initialized `T`.
            #[inline]
            pub unsafe fn read(self) -> T {
                read(self.ptr)
            }

            /// Reads the `T` at this location, which may be misaligned.
            ///
            /// # Safety
            ///
            /// The location must be non-null and hold an initialized `T`.
            #[inline]
            pub unsafe fn read_unaligned(self) -> T {
                read_unaligned(self.ptr.cast::<u8>())
            }

            /// Borrows the `T` at this location for an arbitrary lifetime.
            ///
            /// # Safety
            ///
            /// The location must be non-null, aligned and initialized, and must not be
            /// mutated for the duration of `'a`.
            #[inline]
            pub unsafe fn as_ref<'a>(self) -> &'a T {
                &*self.ptr
            }
        }
        impl<T: Unmanaged> Default for $name<T> {
            #[inline(always)]
            fn default() -> Self {
                Self::null()
            }
        }
        impl<T: Unmanaged> Clone for $name<T> {
            #[inline(always)]
            fn clone(&self) -> Self {
                *self
            }
        }
        impl<T: Unmanaged> Copy for $name<T> {}
        impl<T: Unmanaged> PartialEq for $name<T> {
            #[inline]
            fn eq(&self, other: &Self) -> bool {
                offset::are_same(*self, *other)
            }
        }
        impl<T: Unmanaged> Eq for $name<T> {}
        impl<T: Unmanaged> PartialOrd for $name<T> {
            #[inline]
            fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
                Some(self.cmp(other))
            }
        }
        impl<T: Unmanaged> Ord for $name<T> {
            #[inline]
            fn cmp(&self, other: &Self) -> Ordering {
                self.address().cmp(&other.address())
            }
        }
        impl<T: Unmanaged> Hash for $name<T> {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.address().hash(state);
            }
        }
        impl<T: Unmanaged> fmt::Debug for $name<T> {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}<{}>({})", stringify!($name), core::any::type_name::<T>(), self.address())
            }
        }
        impl<T: Unmanaged> Location for $name<T> {
            type Target = T;

            #[inline(always)]
            fn address(&self) -> Address {
                Address::new(self.ptr as usize)
            }
        }
        impl<T: Unmanaged> Shift for $name<T> {
            #[inline(always)]
            fn shift_bytes(self, bytes: isize) -> Self {
                Self::from_ptr(self.ptr.shift_bytes(bytes))
            }
        }
    };
}

impl_raw_ref!(RawRef, *mut T);
impl_raw_ref!(RawRefReadOnly, *const T);

impl<T: Unmanaged> RawRef<T> {
    /// Returns a reference to the null address
    #[inline(always)]
    pub const fn null() -> Self {
        Self {
            ptr: ptr::null_mut(),
        }
    }

    #[inline(always)]
    pub fn from_mut(value: &mut T) -> Self {
        Self { ptr: value }
    }

    /// Writes `value` to this location.
    ///
    /// # Safety
    ///
    /// The location must be non-null, aligned for `T` and valid for writes.
    #[inline]
    pub unsafe fn write(self, value: T) {
        write(self.ptr, value)
    }

    /// Writes `value` to this location, which may be misaligned.
    ///
    /// # Safety
    ///
    /// The location must be non-null and valid for writes.
    #[inline]
    pub unsafe fn write_unaligned(self, value: T) {
        write_unaligned(self.ptr.cast::<u8>(), value)
    }

    /// Copies the `T` at `source` to this location.
    ///
    /// # Safety
    ///
    /// See [`copy`].
    #[inline]
    pub unsafe fn copy_from(self, source: RawRefReadOnly<T>) {
        copy(self.ptr, source.ptr)
    }

    /// Moves `count` values of `T` from `source` to this location; the ranges may overlap.
    ///
    /// # Safety
    ///
    /// See [`move_elements`].
    #[inline]
    pub unsafe fn move_from(self, source: RawRefReadOnly<T>, count: usize) {
        move_elements(self.ptr, source.ptr, count)
    }

    /// Mutably borrows the `T` at this location for an arbitrary lifetime.
    ///
    /// # Safety
    ///
    /// The location must be non-null, aligned and initialized, and must not be
    /// accessed through any other path for the duration of `'a`.
    #[inline]
    pub unsafe fn as_mut<'a>(self) -> &'a mut T {
        &mut *self.ptr
    }

    /// Converts this into a read-only reference to the same location
    #[inline(always)]
    pub const fn read_only(self) -> RawRefReadOnly<T> {
        RawRefReadOnly { ptr: self.ptr }
    }
}
impl<'a, T: Unmanaged> From<&'a mut T> for RawRef<T> {
    #[inline(always)]
    fn from(value: &'a mut T) -> Self {
        Self::from_mut(value)
    }
}

impl<T: Unmanaged> RawRefReadOnly<T> {
    /// Returns a read-only reference to the null address
    #[inline(always)]
    pub const fn null() -> Self {
        Self { ptr: ptr::null() }
    }

    #[inline(always)]
    pub fn from_ref(value: &T) -> Self {
        Self { ptr: value }
    }
}
impl<'a, T: Unmanaged> From<&'a T> for RawRefReadOnly<T> {
    #[inline(always)]
    fn from(value: &'a T) -> Self {
        Self::from_ref(value)
    }
}
impl<T: Unmanaged> From<RawRef<T>> for RawRefReadOnly<T> {
    #[inline(always)]
    fn from(raw: RawRef<T>) -> Self {
        raw.read_only()
    }
}

/// Creates a null reference to a `T`
#[inline(always)]
pub const fn null_ref<T: Unmanaged>() -> RawRef<T> {
    RawRef::null()
}

/// Creates a null read-only reference to a `T`
#[inline(always)]
pub const fn null_ref_read_only<T: Unmanaged>() -> RawRefReadOnly<T> {
    RawRefReadOnly::null()
}

/// Returns true if `location` is the null address
#[inline(always)]
pub fn is_null_ref(location: impl Location) -> bool {
    location.address().is_null()
}

/// Returns true if `raw` is a null read-only reference
#[inline(always)]
pub fn is_null_ref_read_only<T: Unmanaged>(raw: RawRefReadOnly<T>) -> bool {
    is_null_ref(raw)
}

/// Returns a raw pointer to `value`
#[inline(always)]
pub fn as_pointer<T: Unmanaged>(value: &mut T) -> *mut T {
    value
}

/// Reinterprets a reference to a `TFrom` as a reference to a `TTo` at the same address.
///
/// See [`RawRef::reinterpret`].
#[inline(always)]
pub fn reinterpret<TFrom: Unmanaged, TTo: Unmanaged>(raw: RawRef<TFrom>) -> RawRef<TTo> {
    raw.reinterpret()
}

/// Reinterprets a read-only reference to a `TFrom` as one to a `TTo` at the same address.
///
/// See [`RawRef::reinterpret`].
#[inline(always)]
pub fn reinterpret_read_only<TFrom: Unmanaged, TTo: Unmanaged>(
    raw: RawRefReadOnly<TFrom>,
) -> RawRefReadOnly<TTo> {
    raw.reinterpret()
}

/// Returns a reference to the first byte of `value`
#[inline(always)]
pub fn as_byte_ref<T: Unmanaged>(value: &mut T) -> RawRef<u8> {
    RawRef::from_mut(value).as_byte_ref()
}

/// Reads a `T` from `source`.
///
/// # Safety
///
/// `source` must be non-null, aligned for `T` (checked when alignment checks are enabled),
/// and point to an initialized `T`.
#[inline]
pub unsafe fn read<T: Unmanaged>(source: *const T) -> T {
    check_aligned::<T>(source);
    ptr::read(source)
}

/// Reads a `T` from `source`, which need not be aligned.
///
/// # Safety
///
/// `source` must be non-null and valid for reads of `size_of::<T>()` bytes, which must
/// form an initialized `T`.
#[inline]
pub unsafe fn read_unaligned<T: Unmanaged>(source: *const u8) -> T {
    ptr::read_unaligned(source.cast::<T>())
}

/// Writes `value` to `destination`.
///
/// # Safety
///
/// `destination` must be non-null, aligned for `T` (checked when alignment checks are
/// enabled) and valid for writes.
#[inline]
pub unsafe fn write<T: Unmanaged>(destination: *mut T, value: T) {
    check_aligned::<T>(destination);
    ptr::write(destination, value)
}

/// Writes `value` to `destination`, which need not be aligned.
///
/// # Safety
///
/// `destination` must be non-null and valid for writes of `size_of::<T>()` bytes.
#[inline]
pub unsafe fn write_unaligned<T: Unmanaged>(destination: *mut u8, value: T) {
    ptr::write_unaligned(destination.cast::<T>(), value)
}

/// Copies the `T` at `source` to `destination`; the two may overlap.
///
/// # Safety
///
/// See [`move_elements`] with a count of 1.
#[inline]
pub unsafe fn copy<T: Unmanaged>(destination: *mut T, source: *const T) {
    move_elements(destination, source, 1)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn null_refs_are_null() {
        assert!(is_null_ref(null_ref::<i32>()));
        assert!(is_null_ref(null_ref::<f64>()));
        assert!(is_null_ref(null_ref::<[u8; 16]>()));
        assert!(is_null_ref_read_only(null_ref_read_only::<u128>()));
        assert!(null_ref::<char>().is_null());
        assert!(RawRef::<u16>::default().is_null());
        assert_eq!(null_ref::<u8>().address(), Address::NULL);
    }

    #[test]
    fn live_values_are_not_null() {
        let mut n = 0i32;
        assert!(!is_null_ref(&n));
        assert!(!is_null_ref(&mut n));
        assert!(!RawRef::from_mut(&mut n).is_null());

        let d = 0f64;
        assert!(!is_null_ref_read_only(RawRefReadOnly::from_ref(&d)));
    }

    #[test]
    fn read_and_write_through_raw_refs() {
        let mut value = 0x0102_0304u32;
        let raw = RawRef::from_mut(&mut value);
        unsafe {
            assert_eq!(raw.read(), 0x0102_0304);
            raw.write(0xAABB_CCDD);
            assert_eq!(raw.read_only().read(), 0xAABB_CCDD);
        }
        assert_eq!(value, 0xAABB_CCDD);
    }

    #[test]
    fn unaligned_access() {
        let mut bytes = [0u8; 16];
        let base = bytes.as_mut_ptr();
        unsafe {
            write_unaligned(base.add(3), 0x1122_3344_5566_7788u64);
            assert_eq!(read_unaligned::<u64>(base.add(3)), 0x1122_3344_5566_7788);
        }
        assert_eq!(&bytes[3..11], &0x1122_3344_5566_7788u64.to_ne_bytes()[..]);
    }

    #[test]
    fn copy_single_element() {
        let source = 42u64;
        let mut dest = 0u64;
        unsafe {
            copy(&mut dest as *mut u64, &source as *const u64);
        }
        assert_eq!(dest, 42);

        let mut other = 0u64;
        let raw = RawRef::from_mut(&mut other);
        unsafe { raw.copy_from(RawRefReadOnly::from_ref(&source)) };
        assert_eq!(other, 42);
    }

    #[test]
    fn move_from_overlapping() {
        let mut ints = [1u16, 2, 3, 4, 5];
        let raw = RawRef::from_ptr(ints.as_mut_ptr());
        unsafe { raw.add(1).move_from(raw.read_only(), 3) };
        assert_eq!(ints, [1, 1, 2, 3, 5]);
    }

    #[test]
    fn add_and_subtract_move_by_elements() {
        let mut ints = [10u32, 20, 30, 40];
        let first = RawRef::from_ptr(ints.as_mut_ptr());
        let third = first.add(2);
        assert_eq!(unsafe { third.read() }, 30);
        assert_eq!(third.subtract(2), first);
        assert!(third > first);
        assert_eq!(crate::element_offset(first, third), 2);
    }

    #[test]
    fn reinterpret_does_not_move_bytes() {
        let mut value = [0x11u8, 0x22, 0x33, 0x44];
        let raw = RawRef::from_mut(&mut value);
        let word: RawRef<u32> = reinterpret(raw);
        assert_eq!(word.address(), raw.address());
        assert_eq!(
            unsafe { word.read_unaligned() },
            u32::from_ne_bytes([0x11, 0x22, 0x33, 0x44])
        );

        let first = reinterpret_read_only::<[u8; 4], u8>(raw.read_only());
        assert_eq!(unsafe { first.read() }, 0x11);
    }

    #[test]
    fn as_byte_ref_points_at_first_byte() {
        let mut value = 0u64;
        let addr = Address::of(&value);
        let bytes = as_byte_ref(&mut value);
        assert_eq!(bytes.address(), addr);
        unsafe { bytes.add(7).write(0xFF) };
        assert_eq!(value.to_ne_bytes()[7], 0xFF);
    }

    #[test]
    fn as_pointer_matches_address() {
        let mut value = 3i8;
        let addr = Address::of(&value);
        assert_eq!(Address::of(as_pointer(&mut value)), addr);
    }

    #[test]
    fn borrow_through_raw_refs() {
        let mut value = [1u8, 2, 3];
        let raw = RawRef::from(&mut value);
        unsafe {
            raw.as_mut()[1] = 20;
            assert_eq!(raw.as_ref(), &[1u8, 20, 3]);
        }

        let read_only: RawRefReadOnly<[u8; 3]> = raw.into();
        assert_eq!(read_only.address(), raw.address());
        assert_eq!(read_only, raw.read_only());
        assert_eq!(unsafe { read_only.as_ref() }, &[1u8, 20, 3]);
        assert_eq!(value, [1, 20, 3]);
    }

    #[test]
    fn debug_format() {
        let raw = RawRefReadOnly::<u8>::from_ptr(0x1000 as *const u8);
        assert_eq!(format!("{:?}", raw), "RawRefReadOnly<u8>(0x1000)");
    }
}
