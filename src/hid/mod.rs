//! HID report types and the event→bytes codec.
//!
//! Everything here is pure: semantic input events go in, wire-exact bytes
//! matching the published report map come out.  No I/O, no clocks.

pub mod combined;
pub mod consumer;
pub mod descriptor;
pub mod keyboard;
pub mod mouse;
pub mod protocol_mode;


use heapless::Vec;

use crate::transport::ChannelId;
use combined::CombinedReport;
use consumer::ConsumerReport;
use keyboard::KeyboardReport;
use mouse::MouseReport;
use protocol_mode::ProtocolMode;

/// Report ID multiplexing tags (must match the published report map).
pub const REPORT_ID_KEYBOARD: u8 = 1;
pub const REPORT_ID_MOUSE: u8 = 2;
pub const REPORT_ID_CONSUMER: u8 = 3;

/// Largest wire form of any report (the combined buffer).
pub const MAX_REPORT_LEN: usize = combined::COMBINED_REPORT_SIZE;

/// Wire buffer for one encoded report.
pub type ReportBytes = Vec<u8, MAX_REPORT_LEN>;

/// Which set of input characteristics a deployment publishes.
///
/// Decided once when the engine is built; the report map and the encoding
/// must agree, so there is no runtime branch that mixes the two.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReportLayout {
    /// Separate characteristics per HID usage (keyboard/mouse/consumer).
    PerDevice,
    /// One 12-byte combined characteristic for single-channel hosts.
    Combined,
}

/// Tagged HID report, constructed per send and discarded after encoding.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidReport {
    Mouse(MouseReport),
    Keyboard(KeyboardReport),
    Consumer(ConsumerReport),
}

impl HidReport {
    /// The idle report of the same kind.  Pairing every press with this
    /// keeps the invariant that no control is ever left stuck pressed.
    pub const fn released(&self) -> HidReport {
        match self {
            HidReport::Mouse(_) => HidReport::Mouse(MouseReport::empty()),
            HidReport::Keyboard(_) => HidReport::Keyboard(KeyboardReport::empty()),
            HidReport::Consumer(_) => HidReport::Consumer(ConsumerReport::empty()),
        }
    }

    pub fn is_mouse(&self) -> bool {
        matches!(self, HidReport::Mouse(_))
    }

    pub fn is_keyboard(&self) -> bool {
        matches!(self, HidReport::Keyboard(_))
    }

    pub fn is_consumer(&self) -> bool {
        matches!(self, HidReport::Consumer(_))
    }
}

/// Route a report to its channel and encode it, honouring the deployment
/// layout and the current protocol mode.
///
/// Boot mode only redirects pointer reports; keyboard and consumer traffic
/// is unaffected by it.  Identical input always yields identical bytes.
pub fn encode(report: &HidReport, layout: ReportLayout, mode: ProtocolMode) -> (ChannelId, ReportBytes) {
    let mut buf = [0u8; MAX_REPORT_LEN];

    let (channel, len) = match (report, layout, mode) {
        (HidReport::Mouse(m), _, ProtocolMode::Boot) => {
            (ChannelId::BootMouseInput, m.serialize_boot(&mut buf))
        }
        (_, ReportLayout::Combined, _) => (
            ChannelId::CombinedInput,
            CombinedReport::from_report(report).serialize(&mut buf),
        ),
        (HidReport::Mouse(m), ReportLayout::PerDevice, ProtocolMode::Report) => {
            (ChannelId::MouseInput, m.serialize_report(&mut buf))
        }
        (HidReport::Keyboard(k), ReportLayout::PerDevice, _) => {
            (ChannelId::KeyboardInput, k.serialize(&mut buf))
        }
        (HidReport::Consumer(c), ReportLayout::PerDevice, _) => {
            (ChannelId::ConsumerInput, c.serialize(&mut buf))
        }
    };

    let mut bytes = ReportBytes::new();
    // len <= MAX_REPORT_LEN, push cannot fail
    let _ = bytes.extend_from_slice(&buf[..len]);
    (channel, bytes)
}

/// The idle (all-released) wire form for a channel, used for priming.
pub fn idle_payload(channel: ChannelId) -> ReportBytes {
    let mut bytes = ReportBytes::new();
    for _ in 0..channel.report_len() {
        let _ = bytes.push(0);
    }
    if channel == ChannelId::MouseInput {
        bytes[0] = REPORT_ID_MOUSE;
    }
    bytes
}
