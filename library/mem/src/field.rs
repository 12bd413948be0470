use log::debug;

use crate::error::OutOfRange;
use crate::location::Location;
use crate::offset::byte_offset;
use crate::unmanaged::{self, Unmanaged};

/// Returns the byte offset of `member` within `outer`.
///
/// Fails with [`OutOfRange`] if `member` does not start within the `size_of::<O>()` bytes
/// of `outer`, i.e. it is not a member of that particular instance.
pub fn offset_of<O, M>(
    outer: impl Location<Target = O>,
    member: impl Location<Target = M>,
) -> Result<usize, OutOfRange>
where
    O: Unmanaged,
    M: Unmanaged,
{
    let offset = byte_offset(outer, member);
    // Negative offsets wrap to very large unsigned values, so one comparison covers both bounds
    if (offset as usize) < unmanaged::size_of::<O>() {
        Ok(offset as usize)
    } else {
        let err = OutOfRange::new::<O>(offset);
        debug!(target: "unmanaged::field", "rejected member: {}", err);
        Err(err)
    }
}

/// Computes the byte offset of `$field` within `$outer`.
///
/// Unlike [`offset_of`], the offset may equal the size of `$outer`, which is where a
/// zero-sized trailing field lives. Panics if the computed offset is outside of `$outer`.
///
/// # Example
///
/// ```rust
/// use unmanaged_mem::{field_offset, Unmanaged};
///
/// #[repr(C)]
/// #[derive(Copy, Clone)]
/// struct Header {
///     tag: u32,
///     len: u64,
/// }
/// unsafe impl Unmanaged for Header {}
///
/// assert_eq!(field_offset!(Header, tag), 0);
/// assert_eq!(field_offset!(Header, len), 8);
/// ```
#[macro_export]
macro_rules! field_offset {
    ($outer:ty, $field:ident) => {{
        // Using a separate function to minimize unhygienic hazards
        fn offset() -> usize {
            let uninit = ::core::mem::MaybeUninit::<$outer>::uninit();
            let base: *const $outer = uninit.as_ptr();
            // `addr_of!` computes the field address without creating a reference to it,
            // and raw pointers never go through `Deref`
            let field = unsafe { ::core::ptr::addr_of!((*base).$field) };
            let offset = $crate::byte_offset(base, field);
            // A zero-sized trailing field starts one past the end of `$outer`
            assert!(
                offset >= 0 && offset as usize <= $crate::size_of::<$outer>(),
                "field at byte offset {} is outside of {}",
                offset,
                ::core::any::type_name::<$outer>(),
            );
            offset as usize
        }
        offset()
    }};
}
