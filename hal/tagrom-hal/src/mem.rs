//! RAM-backed EEPROM for host tests and simulation
//!
//! Implements the [`Eeprom`] trait over a plain byte array so the record
//! store can be exercised on the host. Physical writes are counted, which
//! lets tests assert that wear-minimizing paths really skip redundant
//! writes.

use crate::eeprom::Eeprom;

/// Byte value of an erased EEPROM cell
pub const ERASED: u8 = 0xFF;

/// In-memory EEPROM of `N` bytes
///
/// Fresh instances read as fully erased (`0xFF` in every cell), matching
/// a factory-new or chip-erased part. Reads are counted as well as
/// writes: on the real part every read is a physical bus operation, so
/// scan costs are worth pinning down in tests.
#[derive(Debug, Clone)]
pub struct MemEeprom<const N: usize = 1024> {
    cells: [u8; N],
    reads: usize,
    writes: usize,
}

impl<const N: usize> MemEeprom<N> {
    /// Create an erased device
    pub fn new() -> Self {
        Self {
            cells: [ERASED; N],
            reads: 0,
            writes: 0,
        }
    }

    /// Create a device pre-loaded with `image` at address 0
    ///
    /// Cells past the image stay erased. Panics if `image` exceeds the
    /// device capacity.
    pub fn with_image(image: &[u8]) -> Self {
        let mut eeprom = Self::new();
        eeprom.cells[..image.len()].copy_from_slice(image);
        eeprom
    }

    /// Number of physical byte reads performed so far
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Number of physical byte writes performed so far
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Reset both access counters without touching the cells
    pub fn reset_counters(&mut self) {
        self.reads = 0;
        self.writes = 0;
    }

    /// Raw view of the cell array, for layout assertions
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }
}

impl<const N: usize> Default for MemEeprom<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Eeprom for MemEeprom<N> {
    const CAPACITY: usize = N;

    fn read(&mut self, address: usize) -> u8 {
        self.reads += 1;
        self.cells[address]
    }

    fn write(&mut self, address: usize, value: u8) {
        self.cells[address] = value;
        self.writes += 1;
    }
}
