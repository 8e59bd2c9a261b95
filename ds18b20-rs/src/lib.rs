#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]
//! # ds18b20
//! Driver for a single DS18B20 temperature sensor on a 1-Wire bus.
//!
//! The device is addressed with Skip ROM, so it must be the only device on the bus.
//! A read cycle starts a 12-bit conversion, blocks for the full conversion time
//! and then reads the temperature register back.
//! The scratchpad CRC is not checked.

use embedded_hal::delay::DelayNs;
use embedded_onewire::OneWire;
use log::{debug, trace};

mod error;
mod temperature;

pub use error::Ds18b20Error;
pub use temperature::{
    OutOfRange, Scratchpad, TEMPERATURE_MAX, TEMPERATURE_MIN, Temperature, decode,
};

const DS18B20_START_CONV: u8 = 0x44;
const DS18B20_READ_SCRATCH: u8 = 0xbe;

/// Worst-case conversion time at 12-bit resolution.
pub const CONVERSION_TIME_MS: u32 = 750;

/// Phase of a read cycle.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum SessionState {
    /// No cycle started yet.
    #[default]
    Idle,
    /// Reset before the conversion command.
    Reset1,
    /// Skip ROM and Convert T sent.
    ConvertCmdSent,
    /// Waiting for the conversion, the bus is quiet.
    ConversionWait,
    /// Reset before the read command.
    Reset2,
    /// Skip ROM and Read Scratchpad sent.
    ReadCmdSent,
    /// Reading the temperature register.
    ReadingBytes,
    /// The last cycle produced a temperature.
    Decoded,
}

/// A DS18B20 alone on a 1-Wire bus.
///
/// Only one cycle can run on a bus at a time: every method borrows the bus mutably
/// for the whole cycle. A failing step leaves [`Ds18b20::state`] at the phase
/// that failed.
#[derive(Debug, Default)]
pub struct Ds18b20 {
    state: SessionState,
}

impl Ds18b20 {
    /// Create a driver for the single device on the bus.
    pub fn new() -> Self {
        Self::default()
    }

    /// The phase the last cycle reached.
    pub fn state(&self) -> SessionState {
        self.state
    }

    fn enter(&mut self, state: SessionState) {
        trace!("DS18B20 {:?} -> {:?}", self.state, state);
        self.state = state;
    }

    /// Start a temperature conversion and block until it is complete.
    ///
    /// # Errors
    /// Fails with [`Ds18b20Error::Bus`] if the reset sees no device or the bus errors.
    /// Nothing is written to the bus after a failed reset.
    pub fn trigger_conversion<O: OneWire, D: DelayNs>(
        &mut self,
        bus: &mut O,
        delay: &mut D,
    ) -> Result<(), Ds18b20Error<O::BusError>> {
        self.enter(SessionState::Reset1);
        bus.address_all()?;
        bus.write_byte(DS18B20_START_CONV)?;
        self.enter(SessionState::ConvertCmdSent);
        self.enter(SessionState::ConversionWait);
        delay.delay_ms(CONVERSION_TIME_MS);
        Ok(())
    }

    /// Read the temperature register of a finished conversion.
    ///
    /// # Errors
    /// Fails with [`Ds18b20Error::Bus`] if the reset sees no device or the bus errors.
    pub fn read_scratchpad<O: OneWire>(
        &mut self,
        bus: &mut O,
    ) -> Result<Scratchpad, Ds18b20Error<O::BusError>> {
        self.enter(SessionState::Reset2);
        bus.address_all()?;
        bus.write_byte(DS18B20_READ_SCRATCH)?;
        self.enter(SessionState::ReadCmdSent);
        self.enter(SessionState::ReadingBytes);
        let low = bus.read_byte()?;
        let high = bus.read_byte()?;
        Ok(Scratchpad { low, high })
    }

    /// Run a full read cycle: convert, wait, read back and decode.
    ///
    /// # Errors
    /// Fails with [`Ds18b20Error::Bus`] on a missing device at either reset, or
    /// [`Ds18b20Error::OutOfRange`] if the register decodes outside -55 °C to 125 °C.
    pub fn read_temperature<O: OneWire, D: DelayNs>(
        &mut self,
        bus: &mut O,
        delay: &mut D,
    ) -> Result<Temperature, Ds18b20Error<O::BusError>> {
        self.trigger_conversion(bus, delay)?;
        let scratchpad = self.read_scratchpad(bus)?;
        let temp = decode(scratchpad)?;
        self.enter(SessionState::Decoded);
        debug!("DS18B20 raw {:#06x}: {} C", scratchpad.raw(), temp);
        Ok(temp)
    }
}
