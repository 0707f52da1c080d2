//! Record store read/write operations
//!
//! The public surface of the storage scheme. A [`RecordStore`] owns the
//! device and performs every operation as a fresh scan over the byte
//! space - there is no cached index to go stale, so the device contents
//! are the only state.
//!
//! Writes to an existing record rewrite only the bytes that differ from
//! what is already stored, since EEPROM cells wear out per write cycle.
//! Fresh allocations lay down a 6-byte header followed by the body.

use heapless::Vec;
use tagrom_hal::Eeprom;

use super::header::{Header, FRESH_RECORD_ID, HEADER_LEN};
use super::locator;

/// Errors from store writes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WriteError {
    /// Offset or length fails the static bounds checks
    OutOfRange,
    /// The covering record's declared length cannot hold this much data
    /// at this offset
    InsufficientSpace,
    /// A fresh allocation here would run into the next record
    Collision,
}

/// Errors from store reads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReadError {
    /// Offset or length fails the static bounds checks
    OutOfRange,
    /// No record's body covers the offset
    NotFound,
    /// The covering record holds fewer bytes at this offset than requested
    InsufficientData,
    /// Caller buffer cannot hold the data plus the terminator
    BufferTooSmall,
}

/// Tagged-record store over a byte-addressable device
///
/// Owns the device: exactly one context drives the EEPROM at a time, and
/// a whole `write`/`read` call (scan plus mutation) is its unit of work.
/// There is no partial-completion recovery - a power loss mid-allocation
/// leaves a header whose body was never fully written.
pub struct RecordStore<E: Eeprom> {
    eeprom: E,
}

impl<E: Eeprom> RecordStore<E> {
    /// Take ownership of the device
    pub fn new(eeprom: E) -> Self {
        Self { eeprom }
    }

    /// Raw access to the device, for low-level use
    pub fn eeprom(&mut self) -> &mut E {
        &mut self.eeprom
    }

    /// Hand the device back
    pub fn release(self) -> E {
        self.eeprom
    }

    /// Static bounds checks shared by reads and writes
    ///
    /// `offset` must leave room for a header below it, and header plus
    /// body must fit the device.
    fn in_range(offset: usize, length: usize) -> bool {
        offset >= HEADER_LEN
            && offset <= E::CAPACITY - HEADER_LEN
            && length <= E::CAPACITY - HEADER_LEN
            && offset + length <= E::CAPACITY - 1
    }

    /// Store `data` with its body starting at `offset`
    ///
    /// If an existing record's body covers `offset` and its declared
    /// length can hold `data` from there, the record is updated in place:
    /// only differing bytes are rewritten and the header stays untouched.
    /// Otherwise a fresh record is allocated, with its header at
    /// `offset - HEADER_LEN`, unless that would collide with whatever is
    /// allocated next.
    ///
    /// No byte is written on any error path.
    pub fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), WriteError> {
        let length = data.len();
        if !Self::in_range(offset, length) {
            return Err(WriteError::OutOfRange);
        }

        if let Some(header) = locator::covering(&mut self.eeprom, offset) {
            if length > header.available_from(offset) {
                return Err(WriteError::InsufficientSpace);
            }
            for (i, &byte) in data.iter().enumerate() {
                if self.eeprom.read(offset + i) != byte {
                    self.eeprom.write(offset + i, byte);
                }
            }
            return Ok(());
        }

        let next = locator::next_header(&mut self.eeprom, offset);
        if offset + length >= next {
            return Err(WriteError::Collision);
        }

        let header = Header::encode(length as u16, FRESH_RECORD_ID);
        for (i, &byte) in header.iter().enumerate() {
            self.eeprom.write(offset - HEADER_LEN + i, byte);
        }
        for (i, &byte) in data.iter().enumerate() {
            self.eeprom.write(offset + i, byte);
        }
        Ok(())
    }

    /// Read `length` body bytes starting at `offset` into `buf`
    ///
    /// `buf` must hold at least `length + 1` bytes: a `0x00` terminator
    /// is written after the copied region so firmware callers can treat
    /// the result as a bounded C-style string.
    pub fn read(&mut self, buf: &mut [u8], offset: usize, length: usize) -> Result<(), ReadError> {
        if !Self::in_range(offset, length) {
            return Err(ReadError::OutOfRange);
        }
        if buf.len() < length + 1 {
            return Err(ReadError::BufferTooSmall);
        }

        let header = locator::covering(&mut self.eeprom, offset).ok_or(ReadError::NotFound)?;
        if length > header.available_from(offset) {
            return Err(ReadError::InsufficientData);
        }

        for i in 0..length {
            buf[i] = self.eeprom.read(offset + i);
        }
        buf[length] = 0;
        Ok(())
    }

    /// Read `length` body bytes starting at `offset` into a bounded vec
    ///
    /// Convenience over [`read`](Self::read) that returns exactly
    /// `length` bytes without the terminator. `N` must be at least
    /// `length + 1`.
    pub fn read_vec<const N: usize>(
        &mut self,
        offset: usize,
        length: usize,
    ) -> Result<Vec<u8, N>, ReadError> {
        let mut vec = Vec::new();
        if vec.resize(length + 1, 0).is_err() {
            return Err(ReadError::BufferTooSmall);
        }
        self.read(&mut vec, offset, length)?;
        vec.truncate(length);
        Ok(vec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tagrom_hal::MemEeprom;

    fn fresh_store() -> RecordStore<MemEeprom<1024>> {
        RecordStore::new(MemEeprom::new())
    }

    #[test]
    fn test_fresh_allocation_layout() {
        let mut store = fresh_store();
        store.write(0x06, b"test").unwrap();

        let cells = store.eeprom().cells();
        assert_eq!(&cells[0..6], &[0xE1, 0xE1, 0x00, 0x04, 0x00, 0x01]);
        assert_eq!(&cells[6..10], b"test");
    }

    #[test]
    fn test_write_read_roundtrip() {
        let mut store = fresh_store();
        store.write(0x06, b"test").unwrap();

        let mut buf = [0u8; 5];
        store.read(&mut buf, 0x06, 4).unwrap();
        assert_eq!(&buf, b"test\0");
    }

    #[test]
    fn test_overwrite_inside_body_diffs() {
        let mut store = fresh_store();
        store.write(0x06, b"test").unwrap();
        store.write(0x08, b"aa").unwrap();

        let mut buf = [0u8; 5];
        store.read(&mut buf, 0x06, 4).unwrap();
        assert_eq!(&buf, b"teaa\0");
    }

    #[test]
    fn test_overwrite_past_declared_length_rejected() {
        let mut store = fresh_store();
        store.write(0x06, b"test").unwrap();

        let before = store.eeprom().clone();
        assert_eq!(
            store.write(0x08, b"aabbcc"),
            Err(WriteError::InsufficientSpace)
        );
        assert_eq!(store.eeprom().cells(), before.cells());
    }

    #[test]
    fn test_identical_overwrite_issues_no_physical_writes() {
        let mut store = fresh_store();
        store.write(0x06, b"test").unwrap();
        store.eeprom().reset_counters();

        store.write(0x06, b"test").unwrap();
        assert_eq!(store.eeprom().writes(), 0);
    }

    #[test]
    fn test_smaller_rewrite_leaves_trailing_bytes() {
        let mut store = fresh_store();
        store.write(0x06, b"abcd").unwrap();
        store.write(0x06, b"xy").unwrap();

        // Trailing body cells keep their old contents physically
        assert_eq!(&store.eeprom().cells()[8..10], b"cd");

        // but a read bounded to the smaller length does not expose them
        let mut buf = [0u8; 3];
        store.read(&mut buf, 0x06, 2).unwrap();
        assert_eq!(&buf, b"xy\0");
    }

    #[test]
    fn test_update_leaves_header_untouched() {
        let mut store = fresh_store();
        store.write(0x06, b"abcd").unwrap();
        store.write(0x06, b"xy").unwrap();

        // Length still reads 4; the record keeps its allocated capacity
        assert_eq!(
            &store.eeprom().cells()[0..6],
            &[0xE1, 0xE1, 0x00, 0x04, 0x00, 0x01]
        );
        let mut buf = [0u8; 5];
        store.read(&mut buf, 0x06, 4).unwrap();
        assert_eq!(&buf, b"xycd\0");
    }

    #[test]
    fn test_fresh_write_collides_with_following_record() {
        let mut store = fresh_store();
        store.write(40, b"later").unwrap(); // header at 34

        let before = store.eeprom().clone();
        // 6 + 28 = 34 reaches the next header start
        assert_eq!(store.write(6, &[0xAB; 28]), Err(WriteError::Collision));
        assert_eq!(store.eeprom().cells(), before.cells());

        // One byte shorter fits
        store.write(6, &[0xAB; 27]).unwrap();
    }

    #[test]
    fn test_fresh_write_stops_short_of_scan_end() {
        // With nothing allocated ahead, the forward scan reports its end
        // sentinel and the collision rule keeps allocations short of it.
        let mut store = fresh_store();
        assert_eq!(store.write(1012, b"abcdef"), Err(WriteError::Collision));
        store.write(1011, b"abcdef").unwrap();
    }

    #[test]
    fn test_read_uncovered_offset() {
        let mut store = fresh_store();
        store.write(6, b"test").unwrap();

        let mut buf = [0u8; 5];
        assert_eq!(store.read(&mut buf, 100, 4), Err(ReadError::NotFound));
        // Just past the body end
        assert_eq!(store.read(&mut buf, 10, 4), Err(ReadError::NotFound));
    }

    #[test]
    fn test_read_longer_than_available() {
        let mut store = fresh_store();
        store.write(6, b"test").unwrap();

        let mut buf = [0u8; 7];
        assert_eq!(store.read(&mut buf, 8, 6), Err(ReadError::InsufficientData));

        // The two bytes that are available from offset 8 read fine
        store.read(&mut buf, 8, 2).unwrap();
        assert_eq!(&buf[..3], b"st\0");
    }

    #[test]
    fn test_write_bounds() {
        let mut store = fresh_store();

        assert_eq!(store.write(5, b"x"), Err(WriteError::OutOfRange));
        assert_eq!(store.write(1019, b"x"), Err(WriteError::OutOfRange));
        // Header fits but the body would run past the device
        assert_eq!(store.write(1018, &[0u8; 6]), Err(WriteError::OutOfRange));
        assert_eq!(store.write(6, &[0u8; 1019]), Err(WriteError::OutOfRange));
        assert_eq!(store.eeprom().writes(), 0);
    }

    #[test]
    fn test_read_bounds() {
        let mut store = fresh_store();

        let mut buf = [0u8; 8];
        assert_eq!(store.read(&mut buf, 5, 4), Err(ReadError::OutOfRange));
        assert_eq!(store.read(&mut buf, 1019, 4), Err(ReadError::OutOfRange));
    }

    #[test]
    fn test_read_buffer_must_fit_terminator() {
        let mut store = fresh_store();
        store.write(6, b"test").unwrap();

        let mut buf = [0u8; 4];
        assert_eq!(store.read(&mut buf, 6, 4), Err(ReadError::BufferTooSmall));
    }

    #[test]
    fn test_read_vec() {
        let mut store = fresh_store();
        store.write(6, b"test").unwrap();

        let vec = store.read_vec::<8>(6, 4).unwrap();
        assert_eq!(&vec[..], b"test");

        assert_eq!(store.read_vec::<4>(6, 4), Err(ReadError::BufferTooSmall));
    }

    #[test]
    fn test_zero_length_fresh_write() {
        let mut store = fresh_store();
        store.write(6, b"").unwrap();

        // Bare header, nothing else written
        assert_eq!(
            &store.eeprom().cells()[0..6],
            &[0xE1, 0xE1, 0x00, 0x00, 0x00, 0x01]
        );
        assert_eq!(store.eeprom().writes(), 6);
    }

    #[test]
    fn test_independent_records() {
        let mut store = fresh_store();
        store.write(6, b"one").unwrap();
        store.write(40, b"two").unwrap();

        let mut buf = [0u8; 4];
        store.read(&mut buf, 6, 3).unwrap();
        assert_eq!(&buf, b"one\0");
        store.read(&mut buf, 40, 3).unwrap();
        assert_eq!(&buf, b"two\0");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_roundtrip_fresh_records(
                offset in 6usize..=200,
                data in prop::collection::vec(any::<u8>(), 1..40),
            ) {
                let mut store = fresh_store();
                store.write(offset, &data).unwrap();

                let mut buf = [0u8; 41];
                store
                    .read(&mut buf[..data.len() + 1], offset, data.len())
                    .unwrap();
                prop_assert_eq!(&buf[..data.len()], &data[..]);
                prop_assert_eq!(buf[data.len()], 0);
            }

            #[test]
            fn test_rewriting_same_bytes_costs_no_wear(
                offset in 6usize..=200,
                data in prop::collection::vec(any::<u8>(), 1..40),
            ) {
                let mut store = fresh_store();
                store.write(offset, &data).unwrap();
                store.eeprom().reset_counters();

                store.write(offset, &data).unwrap();
                prop_assert_eq!(store.eeprom().writes(), 0);
            }
        }
    }
}

