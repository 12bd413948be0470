//! This module describes 64-bit addresses.
//!
//! It is always compiled, but `to_usize`/`to_isize` are only lossless on
//! 64-bit hosts; see `NativeWidth` for the width of the current host.
use super::{AddressWidth, PointerWidth};

/// Addresses and offsets are 64 bits wide
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Width64;

impl AddressWidth for Width64 {
    const WIDTH: PointerWidth = PointerWidth::Bits64;
    const BITS: u32 = 64;

    type Word = u64;
    type Signed = i64;

    #[inline(always)]
    fn word(addr: usize) -> u64 {
        addr as u64
    }

    #[inline(always)]
    fn to_usize(word: u64) -> usize {
        word as usize
    }

    #[inline(always)]
    fn as_signed(word: u64) -> i64 {
        word as i64
    }

    #[inline(always)]
    fn as_unsigned(offset: i64) -> u64 {
        offset as u64
    }

    #[inline(always)]
    fn signed(n: usize) -> i64 {
        debug_assert!(n as u64 <= i64::MAX as u64, "{} does not fit in a 64-bit offset", n);
        n as i64
    }

    #[inline(always)]
    fn to_isize(offset: i64) -> isize {
        offset as isize
    }
}
