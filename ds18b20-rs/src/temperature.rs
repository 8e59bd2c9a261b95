use core::fmt;
use fixed::types::I12F4;

/// Lowest temperature the sensor is rated for, -55 °C.
pub const TEMPERATURE_MIN: Temperature = Temperature(I12F4::from_bits(-55 * 16));
/// Highest temperature the sensor is rated for, 125 °C.
pub const TEMPERATURE_MAX: Temperature = Temperature(I12F4::from_bits(125 * 16));

/// The first two bytes of the scratchpad, the temperature register.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Scratchpad {
    /// Least significant byte, read first.
    pub low: u8,
    /// Most significant byte, read second.
    pub high: u8,
}

impl Scratchpad {
    /// Split a raw register code into its bus bytes.
    pub const fn from_raw(raw: i16) -> Self {
        let [low, high] = raw.to_le_bytes();
        Self { low, high }
    }

    /// The signed register code, `(high << 8) | low`.
    pub const fn raw(&self) -> i16 {
        i16::from_le_bytes([self.low, self.high])
    }
}

/// A temperature in 1/16 °C steps.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Temperature(I12F4);

impl Temperature {
    /// Temperature from a register code.
    pub const fn from_raw(raw: i16) -> Self {
        Self(I12F4::from_bits(raw))
    }

    /// The register code.
    pub const fn raw(&self) -> i16 {
        self.0.to_bits()
    }

    /// The temperature in degrees Celsius.
    pub fn celsius(&self) -> f32 {
        self.0.to_num()
    }
}

/// Whole degrees and two truncated decimals, e.g. `25.06` or `-0.50`.
impl fmt::Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // division truncates toward zero
        let centi = i32::from(self.raw()) * 100 / 16;
        let sign = if centi < 0 { "-" } else { "" };
        let centi = centi.unsigned_abs();
        write!(f, "{sign}{}.{:02}", centi / 100, centi % 100)
    }
}

/// A scratchpad that decodes outside [`TEMPERATURE_MIN`]..=[`TEMPERATURE_MAX`].
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct OutOfRange {
    /// The offending register code.
    pub raw: i16,
}

/// Decode the temperature register.
///
/// # Errors
/// Returns [`OutOfRange`] if the value lies outside the rated -55 °C to 125 °C,
/// which usually means a wiring fault rather than a real reading.
pub fn decode(scratchpad: Scratchpad) -> Result<Temperature, OutOfRange> {
    let temp = Temperature::from_raw(scratchpad.raw());
    if temp < TEMPERATURE_MIN || temp > TEMPERATURE_MAX {
        return Err(OutOfRange {
            raw: scratchpad.raw(),
        });
    }
    Ok(temp)
}
