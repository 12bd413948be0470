//! Alignment utilities.
//!
//! The main entry points are `is_maybe_aligned`, a deliberately cheap heuristic, and
//! `check_aligned`, which asserts that heuristic in builds where alignment checks are
//! enabled and compiles to nothing otherwise.
use unmanaged_system::MIN_ALIGN;

use crate::location::Location;
use crate::unmanaged::{self, Unmanaged};

/// True when `check_aligned` is compiled in, i.e. in debug builds, or when the
/// `alignment-checks` feature is enabled.
pub const ALIGNMENT_CHECKS: bool = cfg!(any(debug_assertions, feature = "alignment-checks"));

/// Returns true if `location` is aligned to `align`
#[inline(always)]
pub fn is_aligned_at(location: impl Location, align: usize) -> bool {
    location.address().get() % align == 0
}

/// Returns true if `location` might be suitably aligned for a `T`.
///
/// This only tests two candidate moduli, `MIN_ALIGN` and the alignment of `T`, so it never
/// rejects a properly aligned location, but it will accept any multiple of `MIN_ALIGN` even
/// for types with a stricter alignment. Do not use it to prove an access is sound.
#[inline(always)]
pub fn is_maybe_aligned<T: Unmanaged>(location: impl Location) -> bool {
    let addr = location.address();
    is_aligned_at(addr, MIN_ALIGN) || is_aligned_at(addr, unmanaged::align_of::<T>())
}

// Returns the effective alignment of `location`, i.e. the largest power
// of two that is a divisor of its address. The null address is treated as
// having the largest representable alignment.
#[inline(always)]
pub fn effective_alignment(location: impl Location) -> usize {
    let addr = location.address().get();
    1usize << addr.trailing_zeros().min(usize::BITS - 1)
}

// Rounds down `size` to a multiple of `align`, which must be a power of two
#[inline(always)]
pub fn round_down_to_alignment(size: usize, align: usize) -> usize {
    assert!(align.is_power_of_two());
    // Masking the low bits of `size` below `align` yields the nearest
    // multiple of `align` which is less than or equal to `size`
    size & !(align - 1)
}

cfg_if::cfg_if! {
    if #[cfg(any(debug_assertions, feature = "alignment-checks"))] {
        use log::error;

        use crate::error::Misaligned;

        /// Panics if `location` is not plausibly aligned for a `T`.
        ///
        /// This check is only compiled into debug builds, or builds with the `alignment-checks`
        /// feature; otherwise it is a no-op.
        #[track_caller]
        #[inline]
        pub fn check_aligned<T: Unmanaged>(location: impl Location) {
            let address = location.address();
            if !is_maybe_aligned::<T>(address) {
                let err = Misaligned::new::<T>(address);
                error!(target: "unmanaged::align", "{}", err);
                panic!("{}", err);
            }
        }
    } else {
        /// Panics if `location` is not plausibly aligned for a `T`.
        ///
        /// This check is only compiled into debug builds, or builds with the `alignment-checks`
        /// feature; otherwise it is a no-op.
        #[inline(always)]
        pub fn check_aligned<T: Unmanaged>(_location: impl Location) {}
    }
}

#[cfg(test)]
mod tests {
    use core::mem;

    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use proptest::test_runner::{Config, TestRunner};

    use super::*;
    use crate::location::Address;

    #[test]
    fn is_aligned_at_test() {
        let x = Address::new(4096);
        assert!(is_aligned_at(x, 8));
        assert!(is_aligned_at(x, 16));
        assert!(is_aligned_at(x, 4096));
        let y = Address::new(4092);
        assert!(is_aligned_at(y, 4));
        assert!(!is_aligned_at(y, 8));
    }

    #[test]
    fn is_maybe_aligned_accepts_multiples_of_min_align() {
        #[repr(C, align(64))]
        #[derive(Copy, Clone)]
        struct Line([u8; 64]);
        unsafe impl Unmanaged for Line {}

        // A false positive: 8 is not a multiple of 64, but is a multiple of MIN_ALIGN
        assert!(is_maybe_aligned::<Line>(Address::new(8)));
        assert!(!is_maybe_aligned::<Line>(Address::new(4)));
        assert!(is_maybe_aligned::<Line>(Address::new(128)));
    }

    #[test]
    fn is_maybe_aligned_follows_type_alignment() {
        assert!(is_maybe_aligned::<u16>(Address::new(0x1002)));
        assert!(!is_maybe_aligned::<u16>(Address::new(0x1003)));
        assert!(is_maybe_aligned::<u8>(Address::new(0x1003)));
        assert!(!is_maybe_aligned::<u32>(Address::new(0x1006)));
    }

    #[test]
    fn is_maybe_aligned_has_no_false_negatives() {
        fn run<T: Unmanaged>() {
            let align = mem::align_of::<T>();
            TestRunner::new(Config::with_source_file(file!()))
                .run(&(0..(usize::MAX / align)), |n| {
                    prop_assert!(is_maybe_aligned::<T>(Address::new(n * align)));
                    Ok(())
                })
                .unwrap();
        }

        run::<u16>();
        run::<u32>();
        run::<f64>();
        run::<u128>();
        run::<[u64; 3]>();
    }

    #[test]
    fn is_maybe_aligned_on_live_values() {
        let value = 0u64;
        let ints = [0u32; 4];
        assert!(is_maybe_aligned::<u64>(&value));
        for int in ints.iter() {
            assert!(is_maybe_aligned::<u32>(int));
        }
    }

    #[test]
    fn effective_alignment_test() {
        // A word-aligned address
        let addr = Address::new(0x7cf815a8);
        let effective = effective_alignment(addr);
        assert!(effective.is_power_of_two());
        assert_eq!(effective, 8);

        let addr = Address::new(0x10040000);
        assert_eq!(effective_alignment(addr), 262144);

        let max = 1usize << (usize::BITS - 1);
        assert_eq!(effective_alignment(Address::new(max)), max);
        assert_eq!(effective_alignment(Address::NULL), max);
    }

    #[test]
    fn round_down_to_alignment_test() {
        assert_eq!(round_down_to_alignment(10, 4), 8);
        assert_eq!(round_down_to_alignment(11, 2), 10);
        assert_eq!(round_down_to_alignment(12, 8), 8);
        assert_eq!(round_down_to_alignment(63, 64), 0);
    }

    #[test]
    #[should_panic]
    fn round_down_to_alignment_rejects_non_power_of_two() {
        round_down_to_alignment(10, 6);
    }

    #[test]
    #[should_panic]
    fn round_down_to_alignment_rejects_zero() {
        round_down_to_alignment(10, 0);
    }

    #[cfg(not(any(debug_assertions, feature = "alignment-checks")))]
    #[test]
    fn check_aligned_is_a_no_op_when_compiled_out() {
        assert!(!ALIGNMENT_CHECKS);
        check_aligned::<u32>(Address::new(0x1002));
        check_aligned::<u64>(Address::new(0x1001));
    }

    #[test]
    fn check_aligned_accepts_aligned_locations() {
        let value = 1.0f64;
        check_aligned::<f64>(&value);
        check_aligned::<u32>(Address::new(0x1004));
    }

    #[cfg(any(debug_assertions, feature = "alignment-checks"))]
    #[test]
    #[should_panic(expected = "is misaligned for u32")]
    fn check_aligned_rejects_misaligned_locations() {
        check_aligned::<u32>(Address::new(0x1002));
    }
}
