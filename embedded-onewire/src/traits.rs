use crate::{OneWireResult, consts::ONEWIRE_SKIP_ROM_CMD};

/// Outcome of a reset/presence-detect cycle.
pub trait OneWireStatus {
    /// Whether a device answered the reset with a presence pulse.
    fn presence(&self) -> bool;

    /// Whether the line was found shorted to ground.
    fn shortcircuit(&self) -> bool;

    /// Logic level of the line at the end of the reset cycle, if the master samples it.
    fn logic_level(&self) -> Option<bool> {
        None
    }
}

/// Trait for 1-Wire communication.
/// This trait defines the basic operations required for 1-Wire communication, such as resetting the bus,
/// writing and reading bits. Byte transfers are composed from bit transfers, least-significant bit first.
pub trait OneWire {
    /// The status type returned by the reset operation.
    /// This type must implement the [OneWireStatus] trait.
    type Status: OneWireStatus;
    /// The error type returned by the operations of this trait.
    /// This type is used to indicate errors in the underlying hardware or communication.
    type BusError;

    /// Resets the 1-Wire bus and returns the status of the bus.
    ///
    /// # Errors
    /// Returns [`OneWireError::NoDevicePresent`](crate::OneWireError::NoDevicePresent) if no presence pulse
    /// was seen, or a hardware error if the line could not be driven or sampled.
    fn reset(&mut self) -> OneWireResult<Self::Status, Self::BusError>;

    /// Writes a single bit to the 1-Wire bus.
    ///
    /// # Errors
    /// This method returns an error if the write operation fails.
    fn write_bit(&mut self, bit: bool) -> OneWireResult<(), Self::BusError>;

    /// Reads a single bit from the 1-Wire bus.
    ///
    /// # Errors
    /// This method returns an error if the read operation fails.
    fn read_bit(&mut self) -> OneWireResult<bool, Self::BusError>;

    /// Writes a byte to the 1-Wire bus, least-significant bit first.
    ///
    /// # Errors
    /// This method returns an error if any of the eight bit writes fails.
    fn write_byte(&mut self, byte: u8) -> OneWireResult<(), Self::BusError> {
        for i in 0..8 {
            self.write_bit((byte >> i) & 1 == 1)?;
        }
        Ok(())
    }

    /// Reads a byte from the 1-Wire bus, least-significant bit first.
    ///
    /// # Errors
    /// This method returns an error if any of the eight bit reads fails.
    fn read_byte(&mut self) -> OneWireResult<u8, Self::BusError> {
        let mut byte = 0;
        for i in 0..8 {
            if self.read_bit()? {
                byte |= 1 << i;
            }
        }
        Ok(byte)
    }

    /// Resets the bus and addresses every device on it with the Skip ROM command.
    ///
    /// The next [`OneWire::write_byte`] is taken by the device as a function command.
    /// A read after this call returns garbage on a bus with multiple devices.
    ///
    /// # Errors
    /// Propagates the reset outcome; no command is written if the reset fails.
    fn address_all(&mut self) -> OneWireResult<Self::Status, Self::BusError> {
        let status = self.reset()?;
        self.write_byte(ONEWIRE_SKIP_ROM_CMD)?;
        Ok(status)
    }
}
