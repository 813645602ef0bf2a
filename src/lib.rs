//! BLE HID peripheral protocol engine.
//!
//! Lets a device without native input hardware impersonate a Bluetooth Low
//! Energy mouse, keyboard and media remote.  The crate owns the protocol
//! core only:
//!
//! - the fixed-width report codec ([`hid`]),
//! - boot/report protocol mode tracking ([`hid::protocol_mode`]),
//! - best-effort notification delivery with retry, indicate fallback and
//!   channel priming ([`delivery`]),
//! - the bonding state machine ([`pairing`]),
//! - the single connected-peer slot and event glue ([`connection`],
//!   [`server`]).
//!
//! The radio/GATT stack itself is an external collaborator: the embedding
//! firmware implements [`transport::HidTransport`] and
//! [`transport::BondControl`] and feeds [`transport::TransportEvent`]s into
//! [`server::HidPeripheral::run`].
//!
//! The crate is `no_std` (host tests run with `std`) and contains no
//! blocking sleeps: all pacing and retry delays are embassy-time suspension
//! points on the calling task.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod connection;
pub mod delivery;
pub mod error;
pub mod hid;
pub mod pairing;
pub mod server;
pub mod transport;

pub use config::EngineConfig;
pub use error::Error;
pub use hid::{HidReport, ReportLayout};
pub use server::HidPeripheral;
pub use transport::{BondControl, HidTransport, PeerAddress, TransportEvent};
