use core::mem::{self, MaybeUninit};
use core::num::Wrapping;

/// Marker for types which can be manipulated as plain bytes.
///
/// An unmanaged type has a fixed size and layout, contains no indirection that the
/// program relies on for ownership, and can be duplicated by copying its bytes.
///
/// # Safety
///
/// Implementors must be `#[repr(C)]`, `#[repr(transparent)]` or a primitive, and must not
/// contain references, padding-sensitive invariants, or any other state which would be
/// invalidated by a raw byte copy.
pub unsafe trait Unmanaged: Copy + 'static {}

macro_rules! unmanaged_impls {
    ($($ty:ty),* $(,)?) => {
        $(
            unsafe impl Unmanaged for $ty {}
        )*
    };
}

unmanaged_impls!(
    u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, bool, char,
);

unsafe impl<T: 'static> Unmanaged for *const T {}
unsafe impl<T: 'static> Unmanaged for *mut T {}
unsafe impl<T: Unmanaged, const N: usize> Unmanaged for [T; N] {}
unsafe impl<T: Unmanaged> Unmanaged for MaybeUninit<T> {}
unsafe impl<T: Unmanaged> Unmanaged for Wrapping<T> {}

macro_rules! unmanaged_tuple_impls {
    ($(($($name:ident),+)),* $(,)?) => {
        $(
            unsafe impl<$($name: Unmanaged),+> Unmanaged for ($($name,)+) {}
        )*
    };
}

unmanaged_tuple_impls!((A), (A, B), (A, B, C), (A, B, C, D));

/// Returns the size in bytes of `T`
#[inline(always)]
pub const fn size_of<T: Unmanaged>() -> usize {
    mem::size_of::<T>()
}

/// Returns the required alignment in bytes of `T`
#[inline(always)]
pub const fn align_of<T: Unmanaged>() -> usize {
    mem::align_of::<T>()
}
