use core::fmt;
use core::ptr::NonNull;

use crate::unmanaged::Unmanaged;

/// A platform-width byte address.
///
/// An `Address` is just a number; it carries no provenance, is never dereferenced by this
/// crate, and says nothing about whether the memory it names is live.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Address(usize);

assert_eq_size!(Address, usize);
assert_eq_align!(Address, usize);

impl Address {
    /// The zero address, used by null references
    pub const NULL: Self = Self(0);

    #[inline(always)]
    pub const fn new(addr: usize) -> Self {
        Self(addr)
    }

    /// Returns the address of the given location
    #[inline(always)]
    pub fn of<L: Location>(location: L) -> Self {
        location.address()
    }

    #[inline(always)]
    pub const fn get(self) -> usize {
        self.0
    }

    #[inline(always)]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }

    /// Returns this address displaced by `bytes`, wrapping around the address space
    #[inline(always)]
    pub const fn wrapping_offset(self, bytes: isize) -> Self {
        Self(self.0.wrapping_add_signed(bytes))
    }

    /// Returns a raw pointer to this address
    #[inline(always)]
    pub fn as_ptr<T>(self) -> *const T {
        self.0 as *const T
    }

    /// Returns a raw mutable pointer to this address
    #[inline(always)]
    pub fn as_mut_ptr<T>(self) -> *mut T {
        self.0 as *mut T
    }
}
impl From<usize> for Address {
    #[inline(always)]
    fn from(addr: usize) -> Self {
        Self(addr)
    }
}
impl From<Address> for usize {
    #[inline(always)]
    fn from(addr: Address) -> Self {
        addr.0
    }
}
impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Address({:#x})", self.0)
    }
}
impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:#x}", self.0)
    }
}
impl fmt::LowerHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}
impl fmt::UpperHex for Address {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::UpperHex::fmt(&self.0, f)
    }
}

/// Anything which names the location of a value of type `Target`.
///
/// References, raw pointers and [`RawRef`](crate::RawRef) are all locations, which lets
/// the arithmetic in this crate be written once and called with whichever form the caller
/// happens to hold. A bare [`Address`] is a location of a byte.
pub trait Location {
    type Target: Unmanaged;

    fn address(&self) -> Address;
}

/// A location which can be displaced without being dereferenced
pub trait Shift: Location + Sized {
    /// Returns this location displaced by `bytes`, wrapping around the address space
    fn shift_bytes(self, bytes: isize) -> Self;
}

impl Location for Address {
    type Target = u8;

    #[inline(always)]
    fn address(&self) -> Address {
        *self
    }
}
impl Shift for Address {
    #[inline(always)]
    fn shift_bytes(self, bytes: isize) -> Self {
        self.wrapping_offset(bytes)
    }
}

impl<T: Unmanaged> Location for &T {
    type Target = T;

    #[inline(always)]
    fn address(&self) -> Address {
        Address(*self as *const T as usize)
    }
}

impl<T: Unmanaged> Location for &mut T {
    type Target = T;

    #[inline(always)]
    fn address(&self) -> Address {
        Address(&**self as *const T as usize)
    }
}

impl<T: Unmanaged> Location for *const T {
    type Target = T;

    #[inline(always)]
    fn address(&self) -> Address {
        Address(*self as usize)
    }
}
impl<T: Unmanaged> Shift for *const T {
    #[inline(always)]
    fn shift_bytes(self, bytes: isize) -> Self {
        self.cast::<u8>().wrapping_offset(bytes).cast()
    }
}

impl<T: Unmanaged> Location for *mut T {
    type Target = T;

    #[inline(always)]
    fn address(&self) -> Address {
        Address(*self as usize)
    }
}
impl<T: Unmanaged> Shift for *mut T {
    #[inline(always)]
    fn shift_bytes(self, bytes: isize) -> Self {
        self.cast::<u8>().wrapping_offset(bytes).cast()
    }
}

impl<T: Unmanaged> Location for NonNull<T> {
    type Target = T;

    #[inline(always)]
    fn address(&self) -> Address {
        Address(self.as_ptr() as usize)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn references_and_pointers_agree() {
        let mut value = 42u64;
        let by_ptr = Address::of(&value as *const u64);
        assert_eq!(Address::of(&value), by_ptr);
        assert_eq!(Address::of(&mut value), by_ptr);
        assert_eq!(Address::of(NonNull::from(&value)), by_ptr);
        assert_eq!(Address::of(by_ptr), by_ptr);
    }

    #[test]
    fn address_formatting() {
        let addr = Address::new(0xdead_beef);
        assert_eq!(format!("{}", addr), "0xdeadbeef");
        assert_eq!(format!("{:?}", addr), "Address(0xdeadbeef)");
        assert_eq!(format!("{:X}", addr), "DEADBEEF");
    }

    #[test]
    fn shifting_wraps_around_the_address_space() {
        assert_eq!(Address::NULL.shift_bytes(-1), Address::new(usize::MAX));
        assert_eq!(Address::new(usize::MAX).shift_bytes(2), Address::new(1));

        let ptr = 0x1000usize as *const u32;
        assert_eq!(ptr.shift_bytes(-4) as usize, 0xffc);
    }
}
