//! Board-agnostic tagged-record storage for small EEPROMs
//!
//! Stores variably-sized records in a flat byte-addressable non-volatile
//! memory without a directory or free list: each record is framed in-band
//! by a 6-byte header (magic, length, id) and found again by scanning for
//! the magic marker. The scheme targets wear-sensitive parts - updates
//! rewrite only the bytes that actually changed.
//!
//! This crate contains all logic that does not depend on a specific
//! device; hardware access goes through the `Eeprom` trait from
//! `tagrom-hal`.

#![no_std]
#![deny(unsafe_code)]

pub mod record;

pub use record::{Header, ReadError, RecordStore, WriteError};
