//! EEPROM driver for the ATmega328P
//!
//! Wraps the EEAR/EEDR/EECR register interface. Every access first waits
//! for EEPE to clear (a write in progress holds the peripheral busy for
//! ~3.4 ms); reads strobe EERE, writes arm EEMPE and then set EEPE within
//! the four-cycle window the part requires.
//!
//! Implements the `Eeprom` trait from `tagrom-hal`.

use avr_device::atmega328p::EEPROM;
use tagrom_hal::Eeprom;

/// ATmega328P on-chip EEPROM
///
/// Takes ownership of the EEPROM peripheral, so exactly one context can
/// touch the device registers.
pub struct Atmega328pEeprom {
    eeprom: EEPROM,
}

impl Atmega328pEeprom {
    /// Wrap the EEPROM peripheral
    pub fn new(eeprom: EEPROM) -> Self {
        Self { eeprom }
    }

    /// Hand the peripheral back
    pub fn release(self) -> EEPROM {
        self.eeprom
    }

    /// Spin until any in-flight write has completed
    fn wait_idle(&self) {
        while self.eeprom.eecr().read().eepe().bit_is_set() {}
    }
}

impl Eeprom for Atmega328pEeprom {
    const CAPACITY: usize = 1024;

    fn read(&mut self, address: usize) -> u8 {
        self.wait_idle();
        self.eeprom
            .eear()
            .write(|w| unsafe { w.bits(address as u16) });
        self.eeprom.eecr().modify(|_, w| w.eere().set_bit());
        self.eeprom.eedr().read().bits()
    }

    fn write(&mut self, address: usize, value: u8) {
        self.wait_idle();
        self.eeprom
            .eear()
            .write(|w| unsafe { w.bits(address as u16) });
        self.eeprom.eedr().write(|w| unsafe { w.bits(value) });
        // EEPE must be set within four cycles of EEMPE; keep interrupts
        // out of the window.
        avr_device::interrupt::free(|_| {
            self.eeprom.eecr().modify(|_, w| w.eempe().set_bit());
            self.eeprom.eecr().modify(|_, w| w.eepe().set_bit());
        });
    }
}
