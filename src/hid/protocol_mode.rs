//! HID Protocol Mode characteristic handling.
//!
//! The host selects Boot or Report protocol by writing one of two defined
//! bytes; every other value is ignored.  Boot mode routes pointer reports
//! through the 3-byte boot channel instead of the report-ID channel - the
//! two are mutually exclusive outputs for the same logical mouse state.

use crate::transport::ChannelId;

/// Protocol Mode characteristic value for Boot protocol.
pub const PROTOCOL_MODE_BOOT: u8 = 0x00;
/// Protocol Mode characteristic value for Report protocol.
pub const PROTOCOL_MODE_REPORT: u8 = 0x01;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ProtocolMode {
    Boot,
    Report,
}

/// Tracks the active protocol mode.  Mutated only by a valid host write.
pub struct ModeController {
    mode: ProtocolMode,
}

impl Default for ModeController {
    fn default() -> Self {
        Self::new()
    }
}

impl ModeController {
    /// HID devices start in Report protocol.
    pub const fn new() -> Self {
        Self {
            mode: ProtocolMode::Report,
        }
    }

    pub fn mode(&self) -> ProtocolMode {
        self.mode
    }

    /// Apply a host write of the Protocol Mode characteristic.
    ///
    /// Returns the new mode only when the write actually transitioned it,
    /// so the caller knows to invalidate primed pointer channels.  Unknown
    /// values and same-mode writes return `None`.
    pub fn handle_write(&mut self, value: u8) -> Option<ProtocolMode> {
        let requested = match value {
            PROTOCOL_MODE_BOOT => ProtocolMode::Boot,
            PROTOCOL_MODE_REPORT => ProtocolMode::Report,
            other => {
                warn!("ignoring invalid protocol mode write: {}", other);
                return None;
            }
        };

        if requested == self.mode {
            return None;
        }

        info!(
            "protocol mode switch: boot={}",
            matches!(requested, ProtocolMode::Boot)
        );
        self.mode = requested;
        Some(requested)
    }

    /// Channels whose priming state a mode transition invalidates.
    pub const fn affected_channels() -> [ChannelId; 3] {
        [
            ChannelId::MouseInput,
            ChannelId::BootMouseInput,
            ChannelId::CombinedInput,
        ]
    }
}
