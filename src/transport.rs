//! Transport boundary: the traits the embedding radio stack implements and
//! the async events it feeds back into the engine.
//!
//! The GATT server itself (advertising packets, characteristic tables,
//! CCCD bookkeeping) lives outside this crate.  The engine only needs the
//! one-shot push primitives, the bonding verbs and a stream of connection
//! and security events delivered on a single logical context.

use crate::error::Error;

/// 48-bit BLE device address of the connected or pairing peer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PeerAddress(pub [u8; 6]);

/// One GATT input characteristic the engine can push reports through.
///
/// The set is fixed at service-start time; a deployment publishes either
/// the per-device channels or the combined channel, never both.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelId {
    /// 8-byte keyboard input report.
    KeyboardInput,
    /// 5-byte mouse input report (leading report ID).
    MouseInput,
    /// 3-byte boot-protocol mouse report (no report ID).
    BootMouseInput,
    /// 2-byte consumer-control usage report.
    ConsumerInput,
    /// 12-byte combined media+pointer+keyboard report.
    CombinedInput,
}

impl ChannelId {
    pub const COUNT: usize = 5;

    pub const fn index(self) -> usize {
        match self {
            ChannelId::KeyboardInput => 0,
            ChannelId::MouseInput => 1,
            ChannelId::BootMouseInput => 2,
            ChannelId::ConsumerInput => 3,
            ChannelId::CombinedInput => 4,
        }
    }

    /// Wire length of one report on this channel.
    pub const fn report_len(self) -> usize {
        match self {
            ChannelId::KeyboardInput => 8,
            ChannelId::MouseInput => 5,
            ChannelId::BootMouseInput => 3,
            ChannelId::ConsumerInput => 2,
            ChannelId::CombinedInput => 12,
        }
    }
}

/// Peer bond state as reported by the radio stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BondState {
    None,
    Bonding,
    Bonded,
}

/// Pairing request flavour delivered by the radio stack.
///
/// Consent-class requests are auto-accepted by the engine; the others are
/// surfaced through [`crate::pairing::PairingEvents::on_pairing_request`]
/// and wait for an external decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PairingVariant {
    /// Just-works consent, no user input required.
    Consent,
    /// Show this passkey; the host types it.  No local decision needed.
    PasskeyDisplay(u32),
    /// The user must type the host's passkey.
    PasskeyEntry,
    /// Both sides display a number; the user confirms they match.
    NumericComparison(u32),
}

impl PairingVariant {
    /// Variants the engine accepts without asking anyone.
    pub const fn is_consent_class(self) -> bool {
        matches!(
            self,
            PairingVariant::Consent | PairingVariant::PasskeyDisplay(_)
        )
    }
}

/// Async events from the transport, delivered on one logical context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TransportEvent {
    /// GAP connection established.
    Connected(PeerAddress),
    /// GAP connection dropped.
    Disconnected,
    /// Peer bond state moved.
    BondStateChanged(PeerAddress, BondState),
    /// Peer started a pairing exchange.
    PairingRequest(PeerAddress, PairingVariant),
    /// Host wrote the Protocol Mode characteristic.
    ProtocolModeWrite(u8),
    /// Host wrote a CCCD, enabling or disabling notifications.
    CccdWrite(ChannelId, bool),
}

/// Push primitives and service lifecycle of the external GATT server.
#[allow(async_fn_in_trait)]
pub trait HidTransport {
    /// Open the GATT server.  Called once from `start()`.
    async fn open_server(&mut self) -> Result<(), Error>;

    /// Publish the HID service with the given (fixed) report map.
    async fn add_service(&mut self, report_map: &'static [u8]) -> Result<(), Error>;

    /// (Re)start advertising so a host can discover the peripheral.
    fn start_advertising(&mut self);

    /// Unacknowledged notification push.  `false` means this shot failed.
    async fn notify(&mut self, peer: PeerAddress, channel: ChannelId, payload: &[u8]) -> bool;

    /// Acknowledged indication push, used once as a delivery fallback.
    async fn indicate(&mut self, peer: PeerAddress, channel: ChannelId, payload: &[u8]) -> bool;
}

/// Bonding verbs of the external security manager.
#[allow(async_fn_in_trait)]
pub trait BondControl {
    /// Is a long-term key already stored for this peer?
    fn is_bonded(&self, peer: PeerAddress) -> bool;

    /// Start a bond attempt.  `false` means the request was rejected
    /// outright (the engine treats that as one failed attempt).
    async fn create_bond(&mut self, peer: PeerAddress) -> bool;

    /// Best-effort abort of an in-flight bond attempt.
    async fn abort_bond(&mut self, peer: PeerAddress);

    /// Drop the stored bond.  Completion arrives as a BondState::None event.
    async fn remove_bond(&mut self, peer: PeerAddress) -> bool;

    /// Answer an outstanding pairing request.
    async fn confirm_pairing(&mut self, peer: PeerAddress, accept: bool);
}
