#[derive(Debug, PartialEq, Eq)]
/// Errors raised by the GPIO bus master.
pub enum GpioError<E> {
    /// The pin could not be switched between output and input.
    Configure(E),
    /// The pin could not be driven or sampled.
    Pin(E),
    /// A drive was attempted while the pin was an input, or a sample
    /// while it was an output.
    Direction,
}
