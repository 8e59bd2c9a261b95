use bitfield_struct::bitfield;
use embedded_onewire::OneWireStatus;

/// Result of a reset/presence-detect cycle on the GPIO bus.
#[bitfield(u8)]
#[derive(PartialEq, Eq)]
pub struct PresenceStatus {
    /// Set if the line was low at the presence sample point.
    pub(crate) present_pulse_detect: bool,
    /// Set if the line was still low at the end of the reset recovery time.
    pub(crate) short_detect: bool,
    /// Level of the released line at the end of the reset slot.
    pub logic_level: bool,
    #[bits(5)]
    __: u8,
}

impl OneWireStatus for PresenceStatus {
    fn presence(&self) -> bool {
        self.present_pulse_detect()
    }

    fn shortcircuit(&self) -> bool {
        self.short_detect()
    }

    fn logic_level(&self) -> Option<bool> {
        Some(self.logic_level())
    }
}
