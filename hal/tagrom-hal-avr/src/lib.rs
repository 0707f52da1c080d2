//! ATmega328P backend for Tagrom
//!
//! Implements the `Eeprom` trait from `tagrom-hal` over the ATmega328P's
//! 1 KiB on-chip EEPROM using the `avr-device` peripheral access crate.
//!
//! This crate only builds for `avr-*` targets; the workspace excludes it
//! from default members so host `cargo check/test` skips it.

#![no_std]

pub mod eeprom;

pub use eeprom::Atmega328pEeprom;
