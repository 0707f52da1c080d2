//! Tagrom Hardware Abstraction Layer
//!
//! This crate defines the device abstraction the record store is built on.
//! Chip-specific crates (ATmega328P today, others later) implement the
//! [`Eeprom`] trait; the board-agnostic core in `tagrom-core` only ever
//! talks to that trait.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Record store (tagrom-core)             │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  tagrom-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │ tagrom-hal-   │       │   MemEeprom   │
//! │     avr       │       │ (host tests)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`eeprom::Eeprom`] - Blocking byte-level access to non-volatile memory
//!
//! [`mem::MemEeprom`] is a RAM-backed implementation for host-side tests
//! and simulation.

#![no_std]
#![deny(unsafe_code)]

pub mod eeprom;
pub mod mem;

// Re-export key items at crate root for convenience
pub use eeprom::Eeprom;
pub use mem::MemEeprom;
