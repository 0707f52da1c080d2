//! EEPROM byte-access abstraction
//!
//! Provides the trait for blocking, byte-granular access to a small
//! non-volatile memory. Implementations wrap the actual device registers
//! for the specific chip.

/// Byte-addressable non-volatile memory
///
/// Every call is one physical device operation: there is no buffering or
/// caching at this layer, and both `read` and `write` block until the
/// device confirms completion (EEPROM parts typically hold a busy flag
/// for milliseconds after a write).
///
/// Addresses run from `0` to `CAPACITY - 1`. Passing an out-of-range
/// address is a caller bug; implementations are free to panic or mask.
pub trait Eeprom {
    /// Total device capacity in bytes
    const CAPACITY: usize;

    /// Read the byte at `address`, waiting for any in-flight write first
    fn read(&mut self, address: usize) -> u8;

    /// Write one byte at `address`, waiting for any in-flight write first
    fn write(&mut self, address: usize, value: u8);

    /// Read a big-endian `u16` stored at `address` and `address + 1`
    fn read_u16(&mut self, address: usize) -> u16 {
        let hi = self.read(address);
        let lo = self.read(address + 1);
        u16::from_be_bytes([hi, lo])
    }

    /// Write `value` as a big-endian pair at `address` and `address + 1`
    fn write_u16(&mut self, address: usize, value: u16) {
        let [hi, lo] = value.to_be_bytes();
        self.write(address, hi);
        self.write(address + 1, lo);
    }
}
