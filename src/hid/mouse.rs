//! BLE HID mouse report.
//!
//! Report-protocol layout (5 bytes):
//! ```text
//! Byte 0: Report ID (0x02)
//! Byte 1: Button bitfield
//!         Bit 0 = Left, Bit 1 = Right, Bit 2 = Middle (upper 5 reserved)
//! Byte 2: X displacement (signed, -127..127)
//! Byte 3: Y displacement (signed, -127..127)
//! Byte 4: Scroll wheel  (signed, -127..127)
//! ```
//!
//! Boot-protocol layout (3 bytes, no report ID):
//! ```text
//! Byte 0: Button bitfield
//! Byte 1: X displacement
//! Byte 2: Y displacement
//! ```

use crate::hid::REPORT_ID_MOUSE;

/// Report-protocol mouse report size in bytes (with leading report ID).
pub const MOUSE_REPORT_SIZE: usize = 5;

/// Boot-protocol mouse report size in bytes.
pub const BOOT_MOUSE_REPORT_SIZE: usize = 3;

/// Left button bit.
pub const BUTTON_LEFT: u8 = 0x01;
/// Right button bit.
pub const BUTTON_RIGHT: u8 = 0x02;
/// Middle button bit.
pub const BUTTON_MIDDLE: u8 = 0x04;

/// Bits a mouse report may carry; the upper five are reserved.
pub const BUTTON_MASK: u8 = BUTTON_LEFT | BUTTON_RIGHT | BUTTON_MIDDLE;

/// Clamp a displacement into the descriptor's logical range.
///
/// The published descriptor declares -127..127, so -128 is excluded even
/// though it fits an `i8`.  Out-of-range input is never an error.
pub(crate) fn clamp_axis(v: i16) -> i8 {
    v.clamp(-127, 127) as i8
}

/// Relative mouse report.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseReport {
    /// Button bitfield (bit 0 = left, bit 1 = right, bit 2 = middle).
    pub buttons: u8,
    /// Relative X movement (signed).
    pub x: i8,
    /// Relative Y movement (signed).
    pub y: i8,
    /// Scroll wheel delta (signed).
    pub wheel: i8,
}

impl MouseReport {
    /// Create an idle (no movement, no buttons) report.
    pub const fn empty() -> Self {
        Self {
            buttons: 0,
            x: 0,
            y: 0,
            wheel: 0,
        }
    }

    /// Build a report, masking reserved button bits and clamping each axis
    /// into [-127, 127].
    pub fn new(buttons: u8, x: i16, y: i16, wheel: i16) -> Self {
        Self {
            buttons: buttons & BUTTON_MASK,
            x: clamp_axis(x),
            y: clamp_axis(y),
            wheel: clamp_axis(wheel),
        }
    }

    /// Serialise the report-protocol form (report ID + 4 payload bytes).
    /// Returns the number of bytes written (always 5).
    pub fn serialize_report(&self, buf: &mut [u8]) -> usize {
        if buf.len() < MOUSE_REPORT_SIZE {
            return 0;
        }
        buf[0] = REPORT_ID_MOUSE;
        buf[1] = self.buttons;
        buf[2] = self.x as u8;
        buf[3] = self.y as u8;
        buf[4] = self.wheel as u8;
        MOUSE_REPORT_SIZE
    }

    /// Serialise the boot-protocol form (3 bytes, wheel dropped).
    /// Returns the number of bytes written (always 3).
    pub fn serialize_boot(&self, buf: &mut [u8]) -> usize {
        if buf.len() < BOOT_MOUSE_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.buttons;
        buf[1] = self.x as u8;
        buf[2] = self.y as u8;
        BOOT_MOUSE_REPORT_SIZE
    }

    /// Returns `true` when no buttons are pressed and there is no movement.
    pub fn is_idle(&self) -> bool {
        self.buttons == 0 && self.x == 0 && self.y == 0 && self.wheel == 0
    }
}
