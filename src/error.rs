//! Unified error type for hidlink.
//!
//! We avoid `alloc` - all variants carry only fixed-size data.  Transport
//! boundary failures never escalate past this enum: delivery exhaustion is
//! reported as a plain `false` and pairing failure through its completion
//! callback, so nothing here represents a fatal fault.

/// Top-level error type used across the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// The underlying radio stack is missing or failed to open.
    TransportUnavailable,

    /// The controller cannot act as a BLE peripheral.
    PeripheralModeUnsupported,

    /// `start()` has not been called (no service published yet).
    NotInitialized,

    /// No host is connected; the send was not attempted.
    NotConnected,

    /// The link is up but the expected bond/encryption is missing.
    BondVerificationFailed,

    /// Pairing reached its terminal failure state.
    PairingFailed,
}
