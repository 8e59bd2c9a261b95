/// One wire communication error type.
#[derive(Debug, PartialEq, Eq)]
pub enum OneWireError<E> {
    /// Encapsulates the error type from the underlying hardware.
    Other(E),
    /// Indicates that no device answered the reset with a presence pulse.
    NoDevicePresent,
    /// Indicates that the line stayed low after the reset recovery time.
    ShortCircuit,
}

impl<E> From<E> for OneWireError<E> {
    fn from(other: E) -> Self {
        Self::Other(other)
    }
}

impl<E> OneWireError<E> {
    /// Whether the error is a missing presence pulse.
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::NoDevicePresent)
    }
}
