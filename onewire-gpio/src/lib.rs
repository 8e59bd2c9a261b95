#![cfg_attr(not(test), no_std)]
#![deny(missing_docs)]

/*! # onewire-gpio
 *
 * A bit-banged 1-Wire bus master driving a single half-duplex data pin.
 *
 * The pin is switched between a driven-low output and a pulled-up input
 * through the [`BusPin`] trait; [`OpenDrainPin`] adapts any open-drain
 * [`embedded_hal`] pin. All protocol timing comes from [`TimeSlot`] and is
 * produced with busy waits on a [`DelayNs`](embedded_hal::delay::DelayNs)
 * provider. Every time slot runs inside a critical section.
 */

pub use embedded_onewire::{OneWire, OneWireError, OneWireResult, OneWireStatus};
mod error;
mod onewire;
mod pin;
mod status;
mod timing;

#[cfg(test)]
mod sim;

pub use error::GpioError;
pub use pin::{BusPin, Direction, OpenDrainPin};
pub use status::PresenceStatus;
pub use timing::TimeSlot;

/// A bit-banged 1-Wire bus on one GPIO pin.
///
/// Takes ownership of a pin implementing [`BusPin`] and a timer object
/// implementing the [`DelayNs`](embedded_hal::delay::DelayNs) trait.
/// The bus is borrowed mutably by every operation, so at most one
/// transaction can be in flight.
pub struct GpioOneWire<P, D> {
    pub(crate) pin: P,
    pub(crate) delay: D,
    pub(crate) direction: Direction,
}

impl<P, D> GpioOneWire<P, D> {
    /// Creates a new bus on the given pin. The pin is not touched until
    /// [`GpioOneWire::init`] or the first bus operation.
    pub fn new(pin: P, delay: D) -> Self {
        GpioOneWire {
            pin,
            delay,
            direction: Direction::Unconfigured,
        }
    }

    /// Current direction of the data pin.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Gives back the pin and the delay provider.
    pub fn release(self) -> (P, D) {
        (self.pin, self.delay)
    }
}
