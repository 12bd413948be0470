use core::any;

use crate::align::effective_alignment;
use crate::location::Address;
use crate::unmanaged::{self, Unmanaged};

/// Returned by [`offset_of`](crate::offset_of) when the given member does not lie within
/// the byte extent of the given aggregate.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("member at byte offset {offset} is not part of {outer}, which is {size} bytes")]
pub struct OutOfRange {
    /// The signed byte offset of the member relative to the start of the aggregate
    pub offset: isize,
    /// The size of the aggregate in bytes
    pub size: usize,
    /// The type name of the aggregate
    pub outer: &'static str,
}
impl OutOfRange {
    pub(crate) fn new<O: Unmanaged>(offset: isize) -> Self {
        Self {
            offset,
            size: unmanaged::size_of::<O>(),
            outer: any::type_name::<O>(),
        }
    }
}

/// The diagnostic raised by [`check_aligned`](crate::check_aligned) in builds with alignment
/// checks enabled.
///
/// This is never returned to callers; misalignment is a bug in the calling code.
#[derive(thiserror::Error, Debug, Copy, Clone, PartialEq, Eq)]
#[error("{address} is misaligned for {ty}: expected alignment of {align}, but effective alignment is {effective}")]
pub struct Misaligned {
    pub address: Address,
    /// The required alignment of `ty`
    pub align: usize,
    /// The largest power of two dividing `address`
    pub effective: usize,
    pub ty: &'static str,
}
impl Misaligned {
    pub fn new<T: Unmanaged>(address: Address) -> Self {
        Self {
            address,
            align: unmanaged::align_of::<T>(),
            effective: effective_alignment(address),
            ty: any::type_name::<T>(),
        }
    }
}
