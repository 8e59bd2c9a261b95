use embedded_hal::digital::{ErrorType, InputPin, OutputPin, PinState};

/// Role of the half-duplex data pin.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Direction {
    /// Not configured since the bus was created.
    Unconfigured,
    /// Driven digital output.
    Output,
    /// Input with pull-up, line idles high when released.
    InputPullUp,
}

/// Pin direction controller for a single-wire data line.
///
/// This is the only way the line changes role: a bus master calls
/// [`BusPin::set_output`] before every [`BusPin::drive`] and
/// [`BusPin::set_input_pullup`] before every [`BusPin::sample`].
pub trait BusPin: ErrorType {
    /// Configure the pin as a driven digital output.
    fn set_output(&mut self) -> Result<(), Self::Error>;

    /// Configure the pin as an input with pull-up, releasing the line.
    fn set_input_pullup(&mut self) -> Result<(), Self::Error>;

    /// Set the level of an output-configured pin.
    fn drive(&mut self, level: PinState) -> Result<(), Self::Error>;

    /// Instantaneous level of an input-configured pin.
    fn sample(&mut self) -> Result<PinState, Self::Error>;
}

/// [`BusPin`] over an open-drain pin with an external pull-up.
///
/// An open-drain output never drives the line high, so "input with pull-up"
/// is the output set high and sampling reads the pad back.
pub struct OpenDrainPin<P>(P);

impl<P> OpenDrainPin<P> {
    /// Wrap an open-drain pin.
    pub fn new(pin: P) -> Self {
        Self(pin)
    }

    /// Unwrap the underlying pin.
    pub fn into_inner(self) -> P {
        self.0
    }
}

impl<P: ErrorType> ErrorType for OpenDrainPin<P> {
    type Error = P::Error;
}

impl<P: InputPin + OutputPin> BusPin for OpenDrainPin<P> {
    fn set_output(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn set_input_pullup(&mut self) -> Result<(), Self::Error> {
        self.0.set_high()
    }

    fn drive(&mut self, level: PinState) -> Result<(), Self::Error> {
        self.0.set_state(level)
    }

    fn sample(&mut self) -> Result<PinState, Self::Error> {
        Ok(PinState::from(self.0.is_high()?))
    }
}
