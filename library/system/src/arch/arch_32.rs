//! This module describes 32-bit addresses.
//!
//! It is always compiled, so that 32-bit arithmetic can be exercised on
//! 64-bit hosts; see `NativeWidth` for the width of the current host.
use super::{AddressWidth, PointerWidth};

/// Addresses and offsets are 32 bits wide
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct Width32;

impl AddressWidth for Width32 {
    const WIDTH: PointerWidth = PointerWidth::Bits32;
    const BITS: u32 = 32;

    type Word = u32;
    type Signed = i32;

    #[inline(always)]
    fn word(addr: usize) -> u32 {
        addr as u32
    }

    #[inline(always)]
    fn to_usize(word: u32) -> usize {
        word as usize
    }

    #[inline(always)]
    fn as_signed(word: u32) -> i32 {
        word as i32
    }

    #[inline(always)]
    fn as_unsigned(offset: i32) -> u32 {
        offset as u32
    }

    #[inline(always)]
    fn signed(n: usize) -> i32 {
        debug_assert!(n <= i32::MAX as usize, "{} does not fit in a 32-bit offset", n);
        n as i32
    }

    #[inline(always)]
    fn to_isize(offset: i32) -> isize {
        offset as isize
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn word_truncates_wider_addresses() {
        assert_eq!(Width32::word(0xFFFF_FFFF), u32::MAX);
        #[cfg(target_pointer_width = "64")]
        assert_eq!(Width32::word(0x1_0000_0010), 0x10);
    }

    #[test]
    fn negative_offsets_sign_extend_to_host() {
        assert_eq!(Width32::to_isize(-16), -16);
        assert_eq!(Width32::to_isize(i32::MIN), i32::MIN as isize);
    }

    #[test]
    fn signed_accepts_sizes_up_to_the_word_max() {
        assert_eq!(Width32::signed(8), 8);
        assert_eq!(Width32::signed(i32::MAX as usize), i32::MAX);
    }

    #[cfg(all(debug_assertions, target_pointer_width = "64"))]
    #[test]
    #[should_panic(expected = "does not fit in a 32-bit offset")]
    fn signed_rejects_sizes_wider_than_the_word() {
        Width32::signed(1 << 32);
    }
}
