//! Record header framing
//!
//! Header format, lowest address first:
//! - MAGIC (2 bytes): 0xE1E1 sentinel marking a header start
//! - LENGTH (2 bytes): body length in bytes
//! - ID (2 bytes): record identifier (written as 1 on every allocation)
//!
//! All fields are big-endian (high byte at the lower address). The body's
//! LENGTH bytes follow immediately after the header, so a record occupies
//! `HEADER_LEN + LENGTH` contiguous bytes.

/// Sentinel marking a header start
///
/// Distinguishes this store's records from erased cells (0xFF) and
/// arbitrary bytes. There is no escaping scheme: body bytes that happen
/// to contain this pair can be misread as a header by the scan in
/// [`crate::record::locator`].
pub const MAGIC: u16 = 0xE1E1;

/// Header size in bytes (magic + length + id)
pub const HEADER_LEN: usize = 6;

/// ID written on every fresh allocation
///
/// The field is kept for wire-format compatibility; nothing interprets
/// it today.
pub const FRESH_RECORD_ID: u16 = 1;

/// A decoded record header and where it sits on the device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Header {
    /// Device address of the first header byte (the high magic byte)
    pub start: usize,
    /// Body length declared when the record was allocated
    pub length: u16,
    /// Record identifier
    pub id: u16,
}

impl Header {
    /// Address of the first body byte
    pub fn body_start(&self) -> usize {
        self.start + HEADER_LEN
    }

    /// One past the last body byte
    pub fn body_end(&self) -> usize {
        self.body_start() + self.length as usize
    }

    /// Whether `offset` falls inside this record's body
    pub fn contains(&self, offset: usize) -> bool {
        offset >= self.body_start() && offset < self.body_end()
    }

    /// Remaining body capacity from `offset` to the end of the body
    ///
    /// Only meaningful for offsets the body contains.
    pub fn available_from(&self, offset: usize) -> usize {
        debug_assert!(self.contains(offset));
        self.length as usize - (offset - self.body_start())
    }

    /// Encode the on-device header bytes for a fresh allocation
    pub fn encode(length: u16, id: u16) -> [u8; HEADER_LEN] {
        let magic = MAGIC.to_be_bytes();
        let length = length.to_be_bytes();
        let id = id.to_be_bytes();
        [magic[0], magic[1], length[0], length[1], id[0], id[1]]
    }
}
