//! Command constants for 1-Wire communication.

/// Command to skip ROM addressing and address every device on the bus.
///
/// Only meaningful on a single-drop bus: with more than one device
/// present, any subsequent read returns the wired-AND of all responses.
pub const ONEWIRE_SKIP_ROM_CMD: u8 = 0xcc;
