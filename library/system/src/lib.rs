#![no_std]

/// When testing, we link against libstd for the test harness
#[cfg(test)]
extern crate std;

#[macro_use]
extern crate static_assertions;

pub mod arch;

pub use self::arch::{AddressWidth, NativeWidth, PointerWidth, Width32, Width64};

/// The minimum alignment we assume any allocator on any supported platform hands out.
///
/// Addresses which are a multiple of this value are treated as plausibly aligned for
/// every unmanaged type, regardless of its actual alignment requirement.
pub const MIN_ALIGN: usize = 8;
const_assert!(MIN_ALIGN.is_power_of_two());
const_assert!(MIN_ALIGN >= core::mem::align_of::<usize>());
