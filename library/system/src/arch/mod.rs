//! This module describes the address width of the host platform, and provides
//! the `AddressWidth` abstraction used to express address arithmetic once for
//! both 32-bit and 64-bit words.
//!
//! The native width is always selected statically from `target_pointer_width`;
//! it is never a runtime option.
mod arch_32;
mod arch_64;

use core::fmt;

use num_traits::{
    PrimInt, Signed as SignedInt, Unsigned, WrappingAdd, WrappingMul, WrappingNeg, WrappingSub,
};

pub use self::arch_32::Width32;
pub use self::arch_64::Width64;

/// The address widths this library knows how to reason about
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PointerWidth {
    Bits32,
    Bits64,
}
impl PointerWidth {
    /// Returns the number of bits in an address of this width
    #[inline]
    pub const fn bits(self) -> u32 {
        match self {
            Self::Bits32 => 32,
            Self::Bits64 => 64,
        }
    }

    /// Returns the number of bytes in an address of this width
    #[inline]
    pub const fn bytes(self) -> usize {
        (self.bits() / 8) as usize
    }
}
impl fmt::Display for PointerWidth {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-bit", self.bits())
    }
}

/// Describes the integer types used to represent addresses and offsets for a
/// given address width.
///
/// All arithmetic over `Word` and `Signed` is performed in that width, with
/// two's-complement wraparound; values are never promoted to a wider type.
pub trait AddressWidth: Copy + fmt::Debug + 'static {
    /// The width this type describes
    const WIDTH: PointerWidth;
    /// The number of bits in `Word`
    const BITS: u32;

    /// The unsigned integer type of an address of this width
    type Word: PrimInt
        + Unsigned
        + WrappingAdd
        + WrappingSub
        + WrappingMul
        + WrappingNeg
        + fmt::Debug
        + fmt::LowerHex;

    /// The signed integer type of an offset between two addresses of this width
    type Signed: PrimInt + SignedInt + WrappingNeg + fmt::Debug;

    /// Converts a host address to a word of this width.
    ///
    /// When this width is narrower than the host, the high bits are discarded.
    fn word(addr: usize) -> Self::Word;

    /// Converts a word of this width back to a host address.
    ///
    /// When this width is wider than the host, the high bits are discarded.
    fn to_usize(word: Self::Word) -> usize;

    /// Reinterprets the bits of an unsigned word as a signed offset
    fn as_signed(word: Self::Word) -> Self::Signed;

    /// Reinterprets the bits of a signed offset as an unsigned word
    fn as_unsigned(offset: Self::Signed) -> Self::Word;

    /// Converts a host byte count (e.g. a type size) to a signed offset of this width.
    ///
    /// # Panics
    ///
    /// In debug builds, panics if `n` is larger than the maximum of `Signed`; release builds
    /// truncate.
    fn signed(n: usize) -> Self::Signed;

    /// Converts a signed offset of this width to a host offset.
    ///
    /// When this width is wider than the host, the high bits are discarded.
    fn to_isize(offset: Self::Signed) -> isize;
}

cfg_if::cfg_if! {
    if #[cfg(target_pointer_width = "64")] {
        /// The address width of the current host
        pub type NativeWidth = Width64;
    } else if #[cfg(target_pointer_width = "32")] {
        /// The address width of the current host
        pub type NativeWidth = Width32;
    } else {
        compile_error!("unsupported target pointer width");
    }
}

/// The address width of the current host
pub const POINTER_WIDTH: PointerWidth = <NativeWidth as AddressWidth>::WIDTH;

const_assert_eq!(
    <NativeWidth as AddressWidth>::BITS as usize,
    core::mem::size_of::<usize>() * 8
);

/// Returns true if the host uses 64-bit addresses
#[inline(always)]
pub const fn is_64bit() -> bool {
    matches!(POINTER_WIDTH, PointerWidth::Bits64)
}

/// Returns true if the host uses 32-bit addresses
#[inline(always)]
pub const fn is_32bit() -> bool {
    matches!(POINTER_WIDTH, PointerWidth::Bits32)
}
