use crate::{
    BusPin, Direction, GpioError, GpioOneWire, PresenceStatus, TimeSlot, timing::SETTLE_MS,
};
use embedded_hal::{delay::DelayNs, digital::PinState};
use embedded_onewire::{OneWire, OneWireError, OneWireResult};
use log::trace;

impl<P: BusPin, D: DelayNs> GpioOneWire<P, D> {
    /// Bring up the bus and confirm that a device is attached.
    ///
    /// Drives the line high, lets it settle for 100 ms and performs one reset.
    ///
    /// # Errors
    /// Returns [`OneWireError::NoDevicePresent`] if the reset sees no presence pulse,
    /// or [`GpioError::Configure`] if the pin cannot be set up.
    pub fn init(&mut self) -> OneWireResult<PresenceStatus, GpioError<P::Error>> {
        self.output()?;
        self.drive(PinState::High)?;
        self.delay.delay_ms(SETTLE_MS);
        self.reset()
    }

    pub(crate) fn output(&mut self) -> Result<(), GpioError<P::Error>> {
        self.pin.set_output().map_err(GpioError::Configure)?;
        self.direction = Direction::Output;
        Ok(())
    }

    pub(crate) fn input(&mut self) -> Result<(), GpioError<P::Error>> {
        self.pin.set_input_pullup().map_err(GpioError::Configure)?;
        self.direction = Direction::InputPullUp;
        Ok(())
    }

    pub(crate) fn drive(&mut self, level: PinState) -> Result<(), GpioError<P::Error>> {
        if self.direction != Direction::Output {
            return Err(GpioError::Direction);
        }
        self.pin.drive(level).map_err(GpioError::Pin)
    }

    /// Returns `true` when the line is high.
    pub(crate) fn sample(&mut self) -> Result<bool, GpioError<P::Error>> {
        if self.direction != Direction::InputPullUp {
            return Err(GpioError::Direction);
        }
        let level = self.pin.sample().map_err(GpioError::Pin)?;
        Ok(level == PinState::High)
    }
}

impl<P: BusPin, D: DelayNs> OneWire for GpioOneWire<P, D> {
    type Status = PresenceStatus;

    type BusError = GpioError<P::Error>;

    fn reset(&mut self) -> OneWireResult<Self::Status, Self::BusError> {
        self.output()?;
        self.drive(PinState::Low)?;
        self.delay.delay_us(TimeSlot::ResetLow.micros());
        let present = critical_section::with(|_| -> Result<bool, Self::BusError> {
            self.input()?;
            self.delay.delay_us(TimeSlot::PresenceSample.micros());
            // the device answers by holding the line low
            self.sample().map(|high| !high)
        })?;
        self.delay.delay_us(TimeSlot::ResetRecovery.micros());
        let idle = self.sample()?;
        let status = PresenceStatus::new()
            .with_present_pulse_detect(present)
            .with_short_detect(!idle)
            .with_logic_level(idle);
        trace!("1-Wire reset: present={present} idle_high={idle}");
        if status.short_detect() {
            Err(OneWireError::ShortCircuit)
        } else if !status.present_pulse_detect() {
            Err(OneWireError::NoDevicePresent)
        } else {
            Ok(status)
        }
    }

    fn write_bit(&mut self, bit: bool) -> OneWireResult<(), Self::BusError> {
        let (low, release) = if bit {
            (TimeSlot::Write1Low, TimeSlot::Write1Release)
        } else {
            (TimeSlot::Write0Low, TimeSlot::Write0Release)
        };
        critical_section::with(|_| {
            self.output()?;
            self.drive(PinState::Low)?;
            self.delay.delay_us(low.micros());
            self.drive(PinState::High)?;
            self.delay.delay_us(release.micros());
            Ok::<_, Self::BusError>(())
        })?;
        Ok(())
    }

    fn read_bit(&mut self) -> OneWireResult<bool, Self::BusError> {
        let bit = critical_section::with(|_| -> Result<bool, Self::BusError> {
            self.output()?;
            self.drive(PinState::Low)?;
            self.delay.delay_us(TimeSlot::ReadInitLow.micros());
            self.input()?;
            self.delay.delay_us(TimeSlot::ReadSample.micros());
            self.sample()
        })?;
        self.delay.delay_us(TimeSlot::ReadRecovery.micros());
        Ok(bit)
    }
}
