use embedded_onewire::OneWireError;

use crate::OutOfRange;

/// Errors of a DS18B20 read cycle.
#[derive(Debug)]
pub enum Ds18b20Error<E> {
    /// The bus failed, including a reset without presence pulse.
    Bus(OneWireError<E>),
    /// The scratchpad decoded to a value outside the rated range.
    OutOfRange(OutOfRange),
}

impl<E> From<OneWireError<E>> for Ds18b20Error<E> {
    fn from(value: OneWireError<E>) -> Self {
        Self::Bus(value)
    }
}

impl<E> From<OutOfRange> for Ds18b20Error<E> {
    fn from(value: OutOfRange) -> Self {
        Self::OutOfRange(value)
    }
}

impl<E> Ds18b20Error<E> {
    /// Whether the cycle failed because no device answered a reset.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Bus(e) if e.is_absent())
    }
}
