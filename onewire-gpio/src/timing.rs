/// Standard-speed 1-Wire time slot phases, in microseconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TimeSlot {
    /// Reset pulse, line held low.
    ResetLow,
    /// From release of the reset pulse to the presence sample.
    PresenceSample,
    /// From the presence sample to the end of the reset slot.
    ResetRecovery,
    /// Low phase of a write-1 slot.
    Write1Low,
    /// Released phase of a write-1 slot.
    Write1Release,
    /// Low phase of a write-0 slot.
    Write0Low,
    /// Released phase of a write-0 slot.
    Write0Release,
    /// Initiation pulse of a read slot.
    ReadInitLow,
    /// From release of the initiation pulse to the sample.
    ReadSample,
    /// From the sample to the end of the read slot.
    ReadRecovery,
}

impl TimeSlot {
    /// Duration of the phase in microseconds.
    pub const fn micros(self) -> u32 {
        use TimeSlot::*;
        match self {
            ResetLow => 480,
            PresenceSample => 70,
            ResetRecovery => 410,
            Write1Low => 5,
            Write1Release => 55,
            Write0Low => 60,
            Write0Release => 5,
            ReadInitLow => 5,
            ReadSample => 5,
            ReadRecovery => 50,
        }
    }
}

/// Time the line is held high after power-up before the first reset, in milliseconds.
pub(crate) const SETTLE_MS: u32 = 100;
