//! Single connected-peer slot.
//!
//! The peripheral role supports exactly one link at a time.  The slot is
//! owned by the server glue and read by the send path; it is never a
//! static, so tests can build as many engines as they like.

use crate::transport::PeerAddress;

/// Nullable reference to "the" connected peer.
#[derive(Default)]
pub struct ConnectionState {
    peer: Option<PeerAddress>,
}

impl ConnectionState {
    pub const fn new() -> Self {
        Self { peer: None }
    }

    /// Record a new connection, replacing any stale previous peer.
    pub fn set(&mut self, peer: PeerAddress) {
        self.peer = Some(peer);
    }

    /// Clear the slot on disconnect, returning who was connected.
    pub fn take(&mut self) -> Option<PeerAddress> {
        self.peer.take()
    }

    pub fn peer(&self) -> Option<PeerAddress> {
        self.peer
    }

    pub fn is_connected(&self) -> bool {
        self.peer.is_some()
    }
}
