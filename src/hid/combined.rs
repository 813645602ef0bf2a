//! Combined 12-byte report for hosts limited to a single input
//! characteristic.
//!
//! Layout (12 bytes, no report ID):
//! ```text
//! Byte 0:  Media control bitmask (see `hid::consumer::MEDIA_*`)
//! Byte 1:  Mouse button bitfield
//! Byte 2:  X displacement (signed)
//! Byte 3:  Y displacement (signed)
//! Byte 4:  Keyboard modifier bitfield
//! Byte 5:  Reserved (0x00)
//! Byte 6-11: Up to 6 key codes, zero-padded
//! ```
//!
//! There is no wheel field; scroll events are inexpressible in this layout.

use crate::hid::keyboard::KeyboardReport;
use crate::hid::mouse::MouseReport;
use crate::hid::HidReport;

/// Combined report size in bytes.
pub const COMBINED_REPORT_SIZE: usize = 12;

/// Media + pointer + keyboard state in one buffer.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CombinedReport {
    pub media: u8,
    pub buttons: u8,
    pub x: i8,
    pub y: i8,
    pub modifier: u8,
    pub keycodes: [u8; 6],
}

impl CombinedReport {
    /// Create an idle report (everything released, no movement).
    pub const fn empty() -> Self {
        Self {
            media: 0,
            buttons: 0,
            x: 0,
            y: 0,
            modifier: 0,
            keycodes: [0; 6],
        }
    }

    /// Express a single tagged report in the combined buffer; the fields
    /// of the other two devices stay idle.
    pub fn from_report(report: &HidReport) -> Self {
        let mut out = Self::empty();
        match report {
            HidReport::Mouse(MouseReport { buttons, x, y, .. }) => {
                out.buttons = *buttons;
                out.x = *x;
                out.y = *y;
            }
            HidReport::Keyboard(KeyboardReport {
                modifier, keycodes, ..
            }) => {
                out.modifier = *modifier;
                out.keycodes = *keycodes;
            }
            HidReport::Consumer(c) => {
                out.media = c.media_mask();
            }
        }
        out
    }

    /// Serialise into a byte slice for notification.
    /// Returns the number of bytes written (always 12).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < COMBINED_REPORT_SIZE {
            return 0;
        }
        buf[0] = self.media;
        buf[1] = self.buttons;
        buf[2] = self.x as u8;
        buf[3] = self.y as u8;
        buf[4] = self.modifier;
        buf[5] = 0;
        buf[6..12].copy_from_slice(&self.keycodes);
        COMBINED_REPORT_SIZE
    }
}
