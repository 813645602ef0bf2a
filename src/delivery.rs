//! Best-effort notification delivery.
//!
//! BLE notifications are one-shot and unacknowledged: a congested host or
//! a just-enabled CCCD can eat a report without a trace.  The engine
//! compensates with a small fixed retry budget, a single acknowledged
//! indicate fallback, and one-time channel priming - and still promises
//! nothing more than a `bool`.  Callers never see an error from here and
//! nothing is re-queued.
//!
//! Holding `&mut self` across the awaits serialises a report's retries
//! ahead of any later report on the same channel; no ordering is promised
//! across a disconnect/reconnect boundary.

use embassy_time::{Duration, Timer};

use crate::config::EngineConfig;
use crate::hid::idle_payload;
use crate::transport::{ChannelId, HidTransport, PeerAddress};

/// Retry/fallback/priming state for every channel.
pub struct DeliveryEngine {
    primed: [bool; ChannelId::COUNT],
    notify_attempts: u8,
    retry_delay: Duration,
    prime_reports: u8,
}

impl DeliveryEngine {
    pub fn new(cfg: &EngineConfig) -> Self {
        Self {
            primed: [false; ChannelId::COUNT],
            notify_attempts: cfg.notify_attempts,
            retry_delay: cfg.notify_retry_delay,
            prime_reports: cfg.prime_reports,
        }
    }

    /// Forget priming state for every channel (reconnection).
    pub fn reset_all(&mut self) {
        self.primed = [false; ChannelId::COUNT];
    }

    /// Forget priming state for the given channels (protocol mode switch).
    pub fn reset_channels(&mut self, channels: &[ChannelId]) {
        for ch in channels {
            self.primed[ch.index()] = false;
        }
    }

    pub fn is_primed(&self, channel: ChannelId) -> bool {
        self.primed[channel.index()]
    }

    /// Push one encoded report through a channel.
    ///
    /// On the first send since the channel's priming state was reset, a
    /// couple of idle reports go out ahead of the live bytes; some hosts
    /// drop the first live report on a freshly enabled channel.  Returns
    /// whether the live report was delivered (as far as we can tell).
    pub async fn send<T: HidTransport>(
        &mut self,
        transport: &mut T,
        peer: PeerAddress,
        channel: ChannelId,
        payload: &[u8],
    ) -> bool {
        if !self.primed[channel.index()] {
            // One-time per (channel, connection-or-mode epoch), even if the
            // idle sends themselves fail.
            self.primed[channel.index()] = true;
            let idle = idle_payload(channel);
            for _ in 0..self.prime_reports {
                if !self.deliver(transport, peer, channel, &idle).await {
                    warn!("channel priming send failed");
                    break;
                }
            }
        }

        self.deliver(transport, peer, channel, payload).await
    }

    /// Notify with retry, then one indicate fallback.
    async fn deliver<T: HidTransport>(
        &mut self,
        transport: &mut T,
        peer: PeerAddress,
        channel: ChannelId,
        payload: &[u8],
    ) -> bool {
        for attempt in 0..self.notify_attempts {
            if transport.notify(peer, channel, payload).await {
                return true;
            }
            if attempt + 1 < self.notify_attempts {
                Timer::after(self.retry_delay).await;
            }
        }

        debug!("notify exhausted, falling back to indicate");
        transport.indicate(peer, channel, payload).await
    }
}
