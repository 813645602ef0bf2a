//! Engine glue: owns the transport, the connected-peer slot, the mode
//! controller, the delivery engine and the pairing machine, and exposes
//! the input surface callers use.
//!
//! All transport events arrive on one logical context; handlers never
//! block it beyond the short pacing/priming suspensions.  The pairing
//! machine's deadlines are multiplexed onto the same loop with a select,
//! so cancelling a timer is just not re-arming it.

use embassy_futures::select::{select, Either};
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::channel::Receiver;
use embassy_time::{Instant, Timer};

use crate::config::EngineConfig;
use crate::connection::ConnectionState;
use crate::delivery::DeliveryEngine;
use crate::error::Error;
use crate::hid::consumer::{ConsumerReport, ConsumerUsage};
use crate::hid::descriptor;
use crate::hid::keyboard::{ascii_to_report, KeyboardReport};
use crate::hid::mouse::MouseReport;
use crate::hid::protocol_mode::{ModeController, ProtocolMode};
use crate::hid::{self, HidReport, ReportLayout};
use crate::pairing::{PairingEngine, PairingEvents};
use crate::transport::{BondControl, ChannelId, HidTransport, PeerAddress, TransportEvent};

/// A BLE HID peripheral: mouse, keyboard and media remote behind one
/// transport.
pub struct HidPeripheral<T, E: PairingEvents> {
    transport: T,
    connection: ConnectionState,
    mode: ModeController,
    delivery: DeliveryEngine,
    pairing: PairingEngine<E>,
    layout: ReportLayout,
    cfg: EngineConfig,
    subscribed: [bool; ChannelId::COUNT],
    started: bool,
}

impl<T, E> HidPeripheral<T, E>
where
    T: HidTransport + BondControl,
    E: PairingEvents,
{
    /// Build an engine for one deployment layout.  The layout and the
    /// published report map are fixed here and never change afterwards.
    pub fn new(transport: T, layout: ReportLayout, cfg: EngineConfig, events: E) -> Self {
        Self {
            transport,
            connection: ConnectionState::new(),
            mode: ModeController::new(),
            delivery: DeliveryEngine::new(&cfg),
            pairing: PairingEngine::new(cfg.pairing, events),
            layout,
            cfg,
            subscribed: [false; ChannelId::COUNT],
            started: false,
        }
    }

    /// Open the GATT server, publish the HID service and start
    /// advertising.  Must succeed before any send is attempted.
    pub async fn start(&mut self) -> Result<(), Error> {
        self.transport.open_server().await?;
        self.transport
            .add_service(descriptor::report_map(self.layout))
            .await?;
        self.transport.start_advertising();
        self.started = true;
        info!("HID peripheral started");
        Ok(())
    }

    /// Dispatch one transport event.
    pub async fn handle_event(&mut self, event: TransportEvent) {
        match event {
            TransportEvent::Connected(peer) => {
                info!("host connected");
                self.connection.set(peer);
                // New connection epoch: every channel must re-prime.
                self.delivery.reset_all();
                self.subscribed = [false; ChannelId::COUNT];
            }
            TransportEvent::Disconnected => {
                info!("host disconnected, resuming advertising");
                if let Some(peer) = self.connection.take() {
                    self.pairing.handle_disconnect(peer, Instant::now());
                }
                self.subscribed = [false; ChannelId::COUNT];
                // Primed flags are left alone; the next Connected resets them.
                self.transport.start_advertising();
            }
            TransportEvent::BondStateChanged(peer, bond) => {
                self.pairing.handle_bond_state(peer, bond, Instant::now());
            }
            TransportEvent::PairingRequest(peer, variant) => {
                self.pairing
                    .handle_pairing_request(&mut self.transport, peer, variant, Instant::now())
                    .await;
            }
            TransportEvent::ProtocolModeWrite(value) => {
                if self.mode.handle_write(value).is_some() {
                    self.delivery
                        .reset_channels(&ModeController::affected_channels());
                }
            }
            TransportEvent::CccdWrite(channel, enabled) => {
                debug!("CCCD write: enabled={}", enabled);
                self.subscribed[channel.index()] = enabled;
            }
        }
    }

    /// Event loop: transport events multiplexed with pairing deadlines.
    pub async fn run<M: RawMutex, const N: usize>(
        &mut self,
        events: Receiver<'_, M, TransportEvent, N>,
    ) -> ! {
        loop {
            match self.pairing.next_deadline() {
                Some(at) => match select(events.receive(), Timer::at(at)).await {
                    Either::First(event) => self.handle_event(event).await,
                    Either::Second(()) => {
                        self.pairing.tick(&mut self.transport, Instant::now()).await;
                    }
                },
                None => {
                    let event = events.receive().await;
                    self.handle_event(event).await;
                }
            }
        }
    }

    // - Input surface ------------------------------------------

    /// Encode and push one report through its channel.
    ///
    /// `Ok(false)` means the best-effort channel gave up (or the host has
    /// not subscribed); it is never escalated further.
    pub async fn send_report(&mut self, report: HidReport) -> Result<bool, Error> {
        if !self.started {
            return Err(Error::NotInitialized);
        }
        let peer = self.connection.peer().ok_or(Error::NotConnected)?;

        let (channel, bytes) = hid::encode(&report, self.layout, self.mode.mode());
        if !self.subscribed[channel.index()] {
            debug!("channel not subscribed, dropping report");
            return Ok(false);
        }

        Ok(self
            .delivery
            .send(&mut self.transport, peer, channel, &bytes)
            .await)
    }

    /// Press, pace, release.  The release always goes out, so no control
    /// is left stuck pressed.
    pub async fn tap(&mut self, report: HidReport) -> Result<bool, Error> {
        let pressed = self.send_report(report).await?;
        Timer::after(self.cfg.press_release_delay).await;
        let released = self.send_report(report.released()).await?;
        Ok(pressed && released)
    }

    /// Click one or more mouse buttons.
    pub async fn click(&mut self, buttons: u8) -> Result<bool, Error> {
        self.tap(HidReport::Mouse(MouseReport::new(buttons, 0, 0, 0)))
            .await
    }

    /// Relative pointer movement; out-of-range deltas clamp silently.
    pub async fn move_mouse(&mut self, dx: i16, dy: i16) -> Result<bool, Error> {
        self.send_report(HidReport::Mouse(MouseReport::new(0, dx, dy, 0)))
            .await
    }

    /// Scroll wheel movement.
    pub async fn scroll(&mut self, delta: i16) -> Result<bool, Error> {
        self.send_report(HidReport::Mouse(MouseReport::new(0, 0, 0, delta)))
            .await
    }

    /// Hold down a chord of keys.  Pair with [`Self::release_keys`].
    pub async fn press_keys(&mut self, modifier: u8, keys: &[u8]) -> Result<bool, Error> {
        self.send_report(HidReport::Keyboard(KeyboardReport::new(modifier, keys)))
            .await
    }

    /// Release every key.
    pub async fn release_keys(&mut self) -> Result<bool, Error> {
        self.send_report(HidReport::Keyboard(KeyboardReport::empty()))
            .await
    }

    /// Type one key with a modifier mask (press + release).
    pub async fn tap_key(&mut self, modifier: u8, keycode: u8) -> Result<bool, Error> {
        self.tap(HidReport::Keyboard(KeyboardReport::new(
            modifier,
            &[keycode],
        )))
        .await
    }

    /// Type a string of mappable ASCII characters; unmappable ones are
    /// skipped.  Returns whether every emitted report was delivered.
    pub async fn type_str(&mut self, text: &str) -> Result<bool, Error> {
        let mut all_ok = true;
        for c in text.chars() {
            if let Some((modifier, keycode)) = ascii_to_report(c) {
                all_ok &= self.tap_key(modifier, keycode).await?;
            }
        }
        Ok(all_ok)
    }

    /// Tap a media control (press + release).
    pub async fn tap_media(&mut self, usage: ConsumerUsage) -> Result<bool, Error> {
        self.tap(HidReport::Consumer(ConsumerReport::new(usage)))
            .await
    }

    // - Pairing surface ----------------------------------------

    /// Start bonding with a host.
    pub async fn start_pairing(&mut self, peer: PeerAddress) {
        self.pairing
            .create_bond(&mut self.transport, peer, Instant::now())
            .await;
    }

    /// Cancel any pending pairing session.
    pub async fn cancel_pairing(&mut self) {
        self.pairing.cancel(&mut self.transport).await;
    }

    /// Answer an outstanding non-consent pairing request.
    pub async fn resolve_pairing(&mut self, accept: bool) {
        self.pairing
            .resolve_pairing(&mut self.transport, accept)
            .await;
    }

    /// Remove a stored bond.
    pub async fn unpair(&mut self, peer: PeerAddress) {
        self.pairing.remove_bond(&mut self.transport, peer).await;
    }

    // - Introspection ------------------------------------------

    pub fn connected_peer(&self) -> Option<PeerAddress> {
        self.connection.peer()
    }

    pub fn protocol_mode(&self) -> ProtocolMode {
        self.mode.mode()
    }

    pub fn layout(&self) -> ReportLayout {
        self.layout
    }

    pub fn pairing(&self) -> &PairingEngine<E> {
        &self.pairing
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }
}
