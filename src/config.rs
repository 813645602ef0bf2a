//! Protocol timing parameters and compile-time defaults.
//!
//! All retry counts, pacing delays and pairing timeouts live here so they
//! can be tuned in one place.  Deployments that need different values build
//! an [`EngineConfig`] instead of patching constants.

use embassy_time::Duration;

// Notification delivery

/// Notify attempts per report before falling back to indicate.
pub const NOTIFY_ATTEMPTS: u8 = 2;

/// Delay between notify attempts (ms).
pub const NOTIFY_RETRY_DELAY_MS: u64 = 10;

/// Idle reports pushed on first use of a freshly enabled channel.
/// Some hosts silently drop the first live report after subscribing.
pub const PRIME_REPORT_COUNT: u8 = 2;

// Input pacing

/// Delay between the press and release halves of a click/keystroke (ms).
pub const PRESS_RELEASE_DELAY_MS: u64 = 30;

// Pairing

/// Timeout for the request/started phase of pairing (seconds).
pub const PAIRING_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Longer timeout armed once the peer reports BONDING (seconds).
pub const BOND_TIMEOUT_SECS: u64 = 60;

/// Fixed backoff before a bond attempt is re-issued (ms).
pub const PAIRING_RETRY_BACKOFF_MS: u64 = 1500;

/// Maximum bond attempts per session before PAIRING_FAILED.
pub const MAX_BOND_ATTEMPTS: u8 = 3;

/// Pairing state machine timing policy.
#[derive(Clone, Copy, Debug)]
pub struct PairingTiming {
    /// Deadline armed when a bond is requested or a pairing request arrives.
    pub request_timeout: Duration,
    /// Fresh, longer deadline armed when the peer enters BONDING.
    pub bond_timeout: Duration,
    /// Fixed delay before an automatic bond retry.
    pub retry_backoff: Duration,
    /// Bond attempts per session, including the first.
    pub max_attempts: u8,
}

impl Default for PairingTiming {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(PAIRING_REQUEST_TIMEOUT_SECS),
            bond_timeout: Duration::from_secs(BOND_TIMEOUT_SECS),
            retry_backoff: Duration::from_millis(PAIRING_RETRY_BACKOFF_MS),
            max_attempts: MAX_BOND_ATTEMPTS,
        }
    }
}

/// Tunable timing for the whole engine.
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
    /// Notify attempts per report (indicate fallback comes after).
    pub notify_attempts: u8,
    /// Delay between notify attempts.
    pub notify_retry_delay: Duration,
    /// Idle reports sent to prime a channel.
    pub prime_reports: u8,
    /// Press-to-release pacing for click/keystroke style operations.
    pub press_release_delay: Duration,
    /// Pairing timeouts and retry policy.
    pub pairing: PairingTiming,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            notify_attempts: NOTIFY_ATTEMPTS,
            notify_retry_delay: Duration::from_millis(NOTIFY_RETRY_DELAY_MS),
            prime_reports: PRIME_REPORT_COUNT,
            press_release_delay: Duration::from_millis(PRESS_RELEASE_DELAY_MS),
            pairing: PairingTiming::default(),
        }
    }
}
