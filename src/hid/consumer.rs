//! BLE HID consumer-control (media remote) report.
//!
//! Per-device layout (2 bytes): one 16-bit little-endian usage code from
//! the Consumer page.  The combined layout instead carries a 1-byte media
//! bitmask; [`ConsumerUsage::media_bit`] maps the seven discrete media
//! controls onto it.  A deployment publishes exactly one of the two
//! encodings (it must match the report map), never both.

/// Consumer report size in bytes (usage-code encoding).
pub const CONSUMER_REPORT_SIZE: usize = 2;

/// Media bitmask bits used by the combined report layout.
pub const MEDIA_PLAY_PAUSE: u8 = 0x01;
pub const MEDIA_NEXT_TRACK: u8 = 0x02;
pub const MEDIA_PREV_TRACK: u8 = 0x04;
pub const MEDIA_STOP: u8 = 0x08;
pub const MEDIA_MUTE: u8 = 0x10;
pub const MEDIA_VOLUME_UP: u8 = 0x20;
pub const MEDIA_VOLUME_DOWN: u8 = 0x40;

/// Consumer page usage codes we emit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConsumerUsage {
    None,
    PlayPause,
    NextTrack,
    PrevTrack,
    Stop,
    Mute,
    VolumeUp,
    VolumeDown,
    BrowserHome,
    BrowserBack,
    BrowserForward,
    BrowserRefresh,
    LaunchEmail,
    LaunchCalculator,
    LaunchFileBrowser,
}

impl ConsumerUsage {
    /// 16-bit usage code on the Consumer page.
    pub const fn code(self) -> u16 {
        match self {
            ConsumerUsage::None => 0x0000,
            ConsumerUsage::PlayPause => 0x00CD,
            ConsumerUsage::NextTrack => 0x00B5,
            ConsumerUsage::PrevTrack => 0x00B6,
            ConsumerUsage::Stop => 0x00B7,
            ConsumerUsage::Mute => 0x00E2,
            ConsumerUsage::VolumeUp => 0x00E9,
            ConsumerUsage::VolumeDown => 0x00EA,
            ConsumerUsage::BrowserHome => 0x0223,
            ConsumerUsage::BrowserBack => 0x0224,
            ConsumerUsage::BrowserForward => 0x0225,
            ConsumerUsage::BrowserRefresh => 0x0227,
            ConsumerUsage::LaunchEmail => 0x018A,
            ConsumerUsage::LaunchCalculator => 0x0192,
            ConsumerUsage::LaunchFileBrowser => 0x0194,
        }
    }

    /// Bit in the combined report's media byte, when this control has one.
    ///
    /// Usages outside the seven discrete media controls cannot be expressed
    /// in combined mode; callers encode those as no-ops.
    pub const fn media_bit(self) -> Option<u8> {
        match self {
            ConsumerUsage::PlayPause => Some(MEDIA_PLAY_PAUSE),
            ConsumerUsage::NextTrack => Some(MEDIA_NEXT_TRACK),
            ConsumerUsage::PrevTrack => Some(MEDIA_PREV_TRACK),
            ConsumerUsage::Stop => Some(MEDIA_STOP),
            ConsumerUsage::Mute => Some(MEDIA_MUTE),
            ConsumerUsage::VolumeUp => Some(MEDIA_VOLUME_UP),
            ConsumerUsage::VolumeDown => Some(MEDIA_VOLUME_DOWN),
            _ => None,
        }
    }
}

/// Consumer-control report carrying a single usage code.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ConsumerReport {
    /// Active usage code, 0 = released.
    pub usage: u16,
}

impl ConsumerReport {
    /// Create a released (no control active) report.
    pub const fn empty() -> Self {
        Self { usage: 0 }
    }

    pub const fn new(usage: ConsumerUsage) -> Self {
        Self {
            usage: usage.code(),
        }
    }

    /// Serialise as a 16-bit little-endian usage code.
    /// Returns the number of bytes written (always 2).
    pub fn serialize(&self, buf: &mut [u8]) -> usize {
        if buf.len() < CONSUMER_REPORT_SIZE {
            return 0;
        }
        buf[..2].copy_from_slice(&self.usage.to_le_bytes());
        CONSUMER_REPORT_SIZE
    }

    pub fn is_empty(&self) -> bool {
        self.usage == 0
    }

    /// Media bitmask form for the combined layout (0 when inexpressible).
    pub fn media_mask(&self) -> u8 {
        match self.usage {
            0x00CD => MEDIA_PLAY_PAUSE,
            0x00B5 => MEDIA_NEXT_TRACK,
            0x00B6 => MEDIA_PREV_TRACK,
            0x00B7 => MEDIA_STOP,
            0x00E2 => MEDIA_MUTE,
            0x00E9 => MEDIA_VOLUME_UP,
            0x00EA => MEDIA_VOLUME_DOWN,
            _ => 0,
        }
    }
}
