//! Header location by magic scan
//!
//! There is no directory: the only way to find a record is to scan the
//! byte space for the magic sentinel. Two scans exist:
//!
//! - [`covering`] walks backward from a queried offset to find the header
//!   of the record whose body contains it.
//! - [`next_header`] walks forward to find where the next allocated
//!   record begins, so a fresh allocation can avoid clobbering it.
//!
//! Both keep a rolling two-byte window so each scan step costs one new
//! device read instead of two - on an EEPROM every read is a physical
//! bus operation.
//!
//! A raw byte scan cannot tell a real header from body bytes that happen
//! to contain the magic pair. [`covering`] narrows the damage by only
//! accepting a candidate whose decoded body interval actually contains
//! the queried offset, but a crafted or unlucky body can still be misread
//! as a header. Known limitation of the in-band format.

use tagrom_hal::Eeprom;

use super::header::{Header, HEADER_LEN, MAGIC};

/// Find the header of the record whose body contains `offset`
///
/// Candidate header starts are tried backward from `offset - HEADER_LEN`
/// down to address 0. A candidate counts only if its magic matches and
/// its decoded body interval contains `offset`; a magic match further
/// back whose body stops short of `offset` is skipped and the scan goes
/// on. Returns `None` when no candidate down to 0 covers the offset.
pub fn covering<E: Eeprom>(eeprom: &mut E, offset: usize) -> Option<Header> {
    if offset < HEADER_LEN || offset > E::CAPACITY - HEADER_LEN {
        return None;
    }

    // Pair at candidate `a` is (read(a), read(a + 1)); stepping down one
    // address reuses the old high byte as the new low byte.
    let mut start = offset - HEADER_LEN;
    let mut lo = eeprom.read(start + 1);
    loop {
        let hi = eeprom.read(start);
        if u16::from_be_bytes([hi, lo]) == MAGIC {
            let header = Header {
                start,
                length: eeprom.read_u16(start + 2),
                id: eeprom.read_u16(start + 4),
            };
            if header.contains(offset) {
                return Some(header);
            }
        }
        if start == 0 {
            return None;
        }
        lo = hi;
        start -= 1;
    }
}

/// Find the start of the next header at or after `after`
///
/// Scans forward to `E::CAPACITY - HEADER_LEN` and returns the first
/// address whose two bytes match the magic, or `E::CAPACITY - HEADER_LEN`
/// itself when the scan reaches the end without a match (the "nothing
/// ahead" sentinel - no real header fits any later).
pub fn next_header<E: Eeprom>(eeprom: &mut E, after: usize) -> usize {
    let end = E::CAPACITY - HEADER_LEN;
    if after >= end {
        return end;
    }

    let mut start = after;
    let mut hi = eeprom.read(start);
    while start < end {
        let lo = eeprom.read(start + 1);
        if u16::from_be_bytes([hi, lo]) == MAGIC {
            return start;
        }
        hi = lo;
        start += 1;
    }
    end
}
