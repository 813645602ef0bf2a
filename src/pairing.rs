//! Bonding/pairing state machine.
//!
//! Drives a bond attempt to a terminal BONDED or PAIRING_FAILED despite
//! host disconnects, rejected requests and timeouts, with bounded
//! automatic retry.  At most one session is pending system-wide; starting
//! pairing with a second device cancels the first.
//!
//! Timers are plain armed deadlines: arming a new one replaces the old, so
//! a stale timeout can never fire after a state-advancing event.  The
//! owner (`server::HidPeripheral::run`) selects [`PairingEngine::next_deadline`]
//! against its event stream and calls [`PairingEngine::tick`] when it
//! expires; cancellation is simple removal, no locking involved.

use embassy_time::Instant;

use crate::config::PairingTiming;
use crate::transport::{BondControl, BondState, PairingVariant, PeerAddress};

/// Pairing session lifecycle states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PairingState {
    Idle,
    /// `create_bond` issued, waiting for the peer to react.
    Requested,
    /// Pairing request received from the peer.
    Started,
    /// Peer reported BONDING; the longer bond timeout is armed.
    WaitingForBond,
    /// Terminal success.
    Bonded,
    /// Terminal failure.
    Failed,
    /// Bond removal in flight.
    Unpairing,
}

impl PairingState {
    /// States where a bond attempt is live and events/timeouts apply.
    pub const fn is_in_progress(self) -> bool {
        matches!(
            self,
            PairingState::Requested | PairingState::Started | PairingState::WaitingForBond
        )
    }
}

/// Observer for pairing progress and completion.
///
/// `on_progress` fires on every transition; `on_complete` exactly once per
/// session, with `success = true` only from the BONDED terminal state.
/// Non-consent pairing requests surface through `on_pairing_request` and
/// wait for [`PairingEngine::resolve_pairing`].
pub trait PairingEvents {
    fn on_progress(&mut self, peer: PeerAddress, state: PairingState, message: &'static str);
    fn on_complete(&mut self, peer: PeerAddress, success: bool, message: &'static str);
    fn on_pairing_request(&mut self, peer: PeerAddress, variant: PairingVariant);
}

/// The single pending pairing session.
pub struct PairingSession {
    pub peer: PeerAddress,
    pub state: PairingState,
    /// Bond attempts so far, including the first.  Never exceeds
    /// `PairingTiming::max_attempts`.
    pub attempts: u8,
    deadline: Option<Instant>,
    retry_at: Option<Instant>,
    pending_request: Option<PairingVariant>,
}

impl PairingSession {
    fn new(peer: PeerAddress) -> Self {
        Self {
            peer,
            state: PairingState::Idle,
            attempts: 0,
            deadline: None,
            retry_at: None,
            pending_request: None,
        }
    }
}

/// The pairing state machine.  Owns retry and timeout policy; the
/// transport's bonding verbs are passed in per call so the server can keep
/// a single transport object.
pub struct PairingEngine<E: PairingEvents> {
    timing: PairingTiming,
    events: E,
    session: Option<PairingSession>,
}

impl<E: PairingEvents> PairingEngine<E> {
    pub fn new(timing: PairingTiming, events: E) -> Self {
        Self {
            timing,
            events,
            session: None,
        }
    }

    /// Current state for a device (`Idle` when it has no session).
    pub fn state_of(&self, peer: PeerAddress) -> PairingState {
        match &self.session {
            Some(s) if s.peer == peer => s.state,
            _ => PairingState::Idle,
        }
    }

    pub fn session(&self) -> Option<&PairingSession> {
        self.session.as_ref()
    }

    /// Earliest armed deadline (timeout or retry), for the owner's select.
    pub fn next_deadline(&self) -> Option<Instant> {
        let s = self.session.as_ref()?;
        match (s.deadline, s.retry_at) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    pub fn events(&self) -> &E {
        &self.events
    }

    /// Start bonding with a device.
    ///
    /// Already-bonded peers complete immediately with "already bonded" and
    /// arm nothing.  Any other device's in-progress session is cancelled
    /// first; a duplicate request for the same device is a no-op.
    pub async fn create_bond<B: BondControl>(
        &mut self,
        bonder: &mut B,
        peer: PeerAddress,
        now: Instant,
    ) {
        if bonder.is_bonded(peer) {
            info!("create_bond: peer already bonded");
            self.events
                .on_progress(peer, PairingState::Bonded, "already bonded");
            self.events.on_complete(peer, true, "already bonded");
            return;
        }

        if let Some(s) = &self.session {
            if s.state.is_in_progress() {
                if s.peer == peer {
                    debug!("create_bond: pairing already pending for this peer");
                    return;
                }
                self.cancel_session(bonder, "cancelled").await;
            }
        }

        let mut session = PairingSession::new(peer);
        session.state = PairingState::Requested;
        session.attempts = 1;
        session.deadline = Some(now + self.timing.request_timeout);
        self.session = Some(session);
        self.events
            .on_progress(peer, PairingState::Requested, "pairing requested");

        if !bonder.create_bond(peer).await {
            self.fail_attempt(now, "bond request rejected");
        }
    }

    /// Peer started a pairing exchange.  Consent-class variants are
    /// accepted on the spot; the rest wait for `resolve_pairing`.
    pub async fn handle_pairing_request<B: BondControl>(
        &mut self,
        bonder: &mut B,
        peer: PeerAddress,
        variant: PairingVariant,
        now: Instant,
    ) {
        let auto_accept = {
            let Some(s) = self.session.as_mut() else {
                warn!("pairing request with no pending session, ignoring");
                return;
            };
            if s.peer != peer || !s.state.is_in_progress() {
                warn!("pairing request from unexpected peer, ignoring");
                return;
            }
            s.state = PairingState::Started;
            s.deadline = Some(now + self.timing.request_timeout);
            if !variant.is_consent_class() {
                s.pending_request = Some(variant);
            }
            variant.is_consent_class()
        };

        self.events
            .on_progress(peer, PairingState::Started, "pairing started");
        if auto_accept {
            bonder.confirm_pairing(peer, true).await;
        } else {
            self.events.on_pairing_request(peer, variant);
        }
    }

    /// Deliver the external decision for a non-consent pairing request.
    /// Rejection is deliberate, so it fails the session without retry.
    pub async fn resolve_pairing<B: BondControl>(&mut self, bonder: &mut B, accept: bool) {
        let peer = {
            let Some(s) = self.session.as_mut() else { return };
            if s.pending_request.take().is_none() {
                return;
            }
            s.peer
        };

        bonder.confirm_pairing(peer, accept).await;
        if !accept {
            self.fail_terminal("pairing rejected");
        }
    }

    /// Apply a bond state change reported by the transport.
    pub fn handle_bond_state(&mut self, peer: PeerAddress, bond: BondState, now: Instant) {
        enum Outcome {
            None,
            Waiting,
            Success,
            Lost,
            Unpaired,
        }

        let outcome = {
            let Some(s) = self.session.as_mut() else { return };
            if s.peer != peer {
                return;
            }
            match bond {
                BondState::Bonding if s.state.is_in_progress() => {
                    s.state = PairingState::WaitingForBond;
                    s.retry_at = None;
                    // Fresh, longer deadline for the key exchange.
                    s.deadline = Some(now + self.timing.bond_timeout);
                    Outcome::Waiting
                }
                BondState::Bonded if s.state.is_in_progress() => {
                    s.state = PairingState::Bonded;
                    s.deadline = None;
                    s.retry_at = None;
                    s.attempts = 0;
                    Outcome::Success
                }
                BondState::None if s.state == PairingState::Unpairing => Outcome::Unpaired,
                BondState::None if s.state.is_in_progress() => Outcome::Lost,
                _ => Outcome::None,
            }
        };

        match outcome {
            Outcome::Waiting => {
                self.events
                    .on_progress(peer, PairingState::WaitingForBond, "bonding");
            }
            Outcome::Success => {
                info!("bonded");
                self.events.on_progress(peer, PairingState::Bonded, "bonded");
                self.events.on_complete(peer, true, "bonded");
            }
            Outcome::Lost => self.fail_attempt(now, "bond lost"),
            Outcome::Unpaired => {
                self.events
                    .on_progress(peer, PairingState::Idle, "bond removed");
                self.session = None;
            }
            Outcome::None => {}
        }
    }

    /// Peer disconnected.  Only a session pairing with that peer cares;
    /// its timers are dropped and the attempt is retried or failed.
    pub fn handle_disconnect(&mut self, peer: PeerAddress, now: Instant) {
        let relevant = matches!(
            &self.session,
            Some(s) if s.peer == peer && s.state.is_in_progress()
        );
        if relevant {
            self.fail_attempt(now, "disconnected while pairing");
        }
    }

    /// Process due timers.  Call when `next_deadline()` expires.
    pub async fn tick<B: BondControl>(&mut self, bonder: &mut B, now: Instant) {
        let (peer, retry_due, timeout_due) = {
            let Some(s) = self.session.as_ref() else { return };
            (
                s.peer,
                s.retry_at.is_some_and(|at| now >= at),
                s.deadline.is_some_and(|at| now >= at),
            )
        };

        if retry_due {
            if let Some(s) = self.session.as_mut() {
                s.retry_at = None;
                s.attempts += 1;
                s.state = PairingState::Requested;
                s.deadline = Some(now + self.timing.request_timeout);
            }
            self.events
                .on_progress(peer, PairingState::Requested, "retrying bond");
            if !bonder.create_bond(peer).await {
                self.fail_attempt(now, "bond request rejected");
            }
            return;
        }

        if timeout_due {
            if let Some(s) = self.session.as_mut() {
                s.deadline = None;
            }
            bonder.abort_bond(peer).await;
            self.fail_attempt(now, "pairing timed out");
        }
    }

    /// Cancel the pending session: best-effort abort, terminal failure,
    /// completion with "cancelled".
    pub async fn cancel<B: BondControl>(&mut self, bonder: &mut B) {
        self.cancel_session(bonder, "cancelled").await;
    }

    /// Remove a stored bond.  Completes back to Idle when the transport
    /// reports BondState::None.
    pub async fn remove_bond<B: BondControl>(&mut self, bonder: &mut B, peer: PeerAddress) {
        if matches!(&self.session, Some(s) if s.state.is_in_progress()) {
            self.cancel_session(bonder, "cancelled").await;
        }

        let mut session = PairingSession::new(peer);
        session.state = PairingState::Unpairing;
        self.session = Some(session);
        self.events
            .on_progress(peer, PairingState::Unpairing, "unpairing");

        if !bonder.remove_bond(peer).await {
            warn!("remove_bond rejected by transport");
            self.events
                .on_progress(peer, PairingState::Idle, "remove bond failed");
            self.session = None;
        }
    }

    async fn cancel_session<B: BondControl>(&mut self, bonder: &mut B, reason: &'static str) {
        let Some(s) = self.session.take() else { return };
        if s.state.is_in_progress() {
            bonder.abort_bond(s.peer).await;
        }
        self.events.on_progress(s.peer, PairingState::Failed, reason);
        self.events.on_complete(s.peer, false, reason);
    }

    /// One bond attempt failed: retry after a fixed backoff while the
    /// attempt budget lasts, otherwise terminal failure.
    fn fail_attempt(&mut self, now: Instant, reason: &'static str) {
        let retry = {
            let Some(s) = self.session.as_mut() else { return };
            let peer = s.peer;
            if s.attempts < self.timing.max_attempts {
                s.state = PairingState::Requested;
                s.deadline = None;
                s.retry_at = Some(now + self.timing.retry_backoff);
                s.pending_request = None;
                Some(peer)
            } else {
                None
            }
        };

        match retry {
            Some(peer) => {
                warn!("bond attempt failed, retry scheduled");
                self.events
                    .on_progress(peer, PairingState::Requested, reason);
            }
            None => self.fail_terminal(reason),
        }
    }

    fn fail_terminal(&mut self, reason: &'static str) {
        let Some(s) = self.session.as_mut() else { return };
        let peer = s.peer;
        s.state = PairingState::Failed;
        s.deadline = None;
        s.retry_at = None;
        s.pending_request = None;
        warn!("pairing failed");
        self.events.on_progress(peer, PairingState::Failed, reason);
        self.events.on_complete(peer, false, reason);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embassy_futures::block_on;
    use embassy_time::Duration;

    const PEER_A: PeerAddress = PeerAddress([1, 2, 3, 4, 5, 6]);
    const PEER_B: PeerAddress = PeerAddress([9, 9, 9, 9, 9, 9]);

    fn timing() -> PairingTiming {
        PairingTiming {
            request_timeout: Duration::from_ticks(1_000),
            bond_timeout: Duration::from_ticks(5_000),
            retry_backoff: Duration::from_ticks(100),
            max_attempts: 3,
        }
    }

    fn t0() -> Instant {
        Instant::from_ticks(0)
    }

    #[derive(Default)]
    struct Recorder {
        progress: Vec<(PeerAddress, PairingState, &'static str)>,
        completions: Vec<(PeerAddress, bool, &'static str)>,
        requests: Vec<(PeerAddress, PairingVariant)>,
    }

    impl PairingEvents for Recorder {
        fn on_progress(&mut self, peer: PeerAddress, state: PairingState, message: &'static str) {
            self.progress.push((peer, state, message));
        }
        fn on_complete(&mut self, peer: PeerAddress, success: bool, message: &'static str) {
            self.completions.push((peer, success, message));
        }
        fn on_pairing_request(&mut self, peer: PeerAddress, variant: PairingVariant) {
            self.requests.push((peer, variant));
        }
    }

    #[derive(Default)]
    struct MockBonder {
        bonded: Vec<PeerAddress>,
        reject_create: bool,
        create_calls: Vec<PeerAddress>,
        abort_calls: Vec<PeerAddress>,
        remove_calls: Vec<PeerAddress>,
        confirmations: Vec<(PeerAddress, bool)>,
    }

    impl BondControl for MockBonder {
        fn is_bonded(&self, peer: PeerAddress) -> bool {
            self.bonded.contains(&peer)
        }
        async fn create_bond(&mut self, peer: PeerAddress) -> bool {
            self.create_calls.push(peer);
            !self.reject_create
        }
        async fn abort_bond(&mut self, peer: PeerAddress) {
            self.abort_calls.push(peer);
        }
        async fn remove_bond(&mut self, peer: PeerAddress) -> bool {
            self.remove_calls.push(peer);
            true
        }
        async fn confirm_pairing(&mut self, peer: PeerAddress, accept: bool) {
            self.confirmations.push((peer, accept));
        }
    }

    fn engine() -> PairingEngine<Recorder> {
        PairingEngine::new(timing(), Recorder::default())
    }

    #[test]
    fn happy_path_reaches_bonded() {
        let mut bonder = MockBonder::default();
        let mut e = engine();

        block_on(e.create_bond(&mut bonder, PEER_A, t0()));
        assert_eq!(e.state_of(PEER_A), PairingState::Requested);
        assert_eq!(bonder.create_calls, vec![PEER_A]);

        block_on(e.handle_pairing_request(&mut bonder, PEER_A, PairingVariant::Consent, t0()));
        assert_eq!(e.state_of(PEER_A), PairingState::Started);
        assert_eq!(bonder.confirmations, vec![(PEER_A, true)]);

        e.handle_bond_state(PEER_A, BondState::Bonding, t0());
        assert_eq!(e.state_of(PEER_A), PairingState::WaitingForBond);

        e.handle_bond_state(PEER_A, BondState::Bonded, t0());
        assert_eq!(e.state_of(PEER_A), PairingState::Bonded);
        assert_eq!(e.events().completions, vec![(PEER_A, true, "bonded")]);
        assert_eq!(e.next_deadline(), None);
        assert_eq!(e.session().unwrap().attempts, 0);
    }

    #[test]
    fn already_bonded_completes_immediately() {
        let mut bonder = MockBonder {
            bonded: vec![PEER_A],
            ..Default::default()
        };
        let mut e = engine();

        block_on(e.create_bond(&mut bonder, PEER_A, t0()));

        assert!(bonder.create_calls.is_empty());
        assert_eq!(e.next_deadline(), None);
        assert_eq!(e.events().completions, vec![(PEER_A, true, "already bonded")]);
        assert_eq!(e.state_of(PEER_A), PairingState::Idle);
    }

    #[test]
    fn bonding_arms_longer_timeout() {
        let mut bonder = MockBonder::default();
        let mut e = engine();

        block_on(e.create_bond(&mut bonder, PEER_A, t0()));
        let request_deadline = e.next_deadline().unwrap();

        e.handle_bond_state(PEER_A, BondState::Bonding, t0());
        let bond_deadline = e.next_deadline().unwrap();
        assert!(bond_deadline > request_deadline);
    }

    #[test]
    fn bond_lost_retries_with_backoff_then_fails() {
        let mut bonder = MockBonder::default();
        let mut e = engine();

        block_on(e.create_bond(&mut bonder, PEER_A, t0()));

        // Attempts 1 and 2 fail; each schedules a backoff retry.
        for attempt in 1..3u8 {
            e.handle_bond_state(PEER_A, BondState::None, t0());
            assert_eq!(e.state_of(PEER_A), PairingState::Requested);
            let retry_at = e.next_deadline().unwrap();
            block_on(e.tick(&mut bonder, retry_at));
            assert_eq!(e.session().unwrap().attempts, attempt + 1);
        }
        assert_eq!(bonder.create_calls.len(), 3);

        // Third consecutive failure exhausts the budget.
        e.handle_bond_state(PEER_A, BondState::None, t0());
        assert_eq!(e.state_of(PEER_A), PairingState::Failed);
        assert_eq!(e.events().completions, vec![(PEER_A, false, "bond lost")]);
        assert_eq!(e.next_deadline(), None);

        // No further automatic create_bond.
        block_on(e.tick(&mut bonder, Instant::from_ticks(1_000_000)));
        assert_eq!(bonder.create_calls.len(), 3);
        assert_eq!(e.events().completions.len(), 1);
    }

    #[test]
    fn timeout_aborts_and_retries() {
        let mut bonder = MockBonder::default();
        let mut e = engine();

        block_on(e.create_bond(&mut bonder, PEER_A, t0()));
        let deadline = e.next_deadline().unwrap();

        block_on(e.tick(&mut bonder, deadline));
        assert_eq!(bonder.abort_calls, vec![PEER_A]);
        assert_eq!(e.state_of(PEER_A), PairingState::Requested);
        assert!(e.next_deadline().is_some());
    }

    #[test]
    fn tick_before_deadline_is_a_no_op() {
        let mut bonder = MockBonder::default();
        let mut e = engine();

        block_on(e.create_bond(&mut bonder, PEER_A, t0()));
        block_on(e.tick(&mut bonder, Instant::from_ticks(1)));

        assert_eq!(e.state_of(PEER_A), PairingState::Requested);
        assert!(bonder.abort_calls.is_empty());
        assert_eq!(bonder.create_calls.len(), 1);
    }

    #[test]
    fn second_device_preempts_first() {
        let mut bonder = MockBonder::default();
        let mut e = engine();

        block_on(e.create_bond(&mut bonder, PEER_A, t0()));
        e.handle_bond_state(PEER_A, BondState::Bonding, t0());
        assert_eq!(e.state_of(PEER_A), PairingState::WaitingForBond);

        block_on(e.create_bond(&mut bonder, PEER_B, t0()));

        // A was cancelled before B proceeded.
        assert_eq!(e.events().completions, vec![(PEER_A, false, "cancelled")]);
        assert_eq!(bonder.abort_calls, vec![PEER_A]);
        assert_eq!(e.state_of(PEER_A), PairingState::Idle);
        assert_eq!(e.state_of(PEER_B), PairingState::Requested);
    }

    #[test]
    fn duplicate_create_bond_is_a_no_op() {
        let mut bonder = MockBonder::default();
        let mut e = engine();

        block_on(e.create_bond(&mut bonder, PEER_A, t0()));
        block_on(e.create_bond(&mut bonder, PEER_A, t0()));

        assert_eq!(bonder.create_calls.len(), 1);
        assert!(e.events().completions.is_empty());
    }

    #[test]
    fn rejected_create_consumes_one_attempt() {
        let mut bonder = MockBonder {
            reject_create: true,
            ..Default::default()
        };
        let mut e = engine();

        block_on(e.create_bond(&mut bonder, PEER_A, t0()));
        assert_eq!(e.state_of(PEER_A), PairingState::Requested);
        assert!(e.next_deadline().is_some());

        // Retries also get rejected until the budget runs out.
        for _ in 0..2 {
            let at = e.next_deadline().unwrap();
            block_on(e.tick(&mut bonder, at));
        }
        assert_eq!(bonder.create_calls.len(), 3);
        assert_eq!(e.state_of(PEER_A), PairingState::Failed);
        assert_eq!(
            e.events().completions,
            vec![(PEER_A, false, "bond request rejected")]
        );
    }

    #[test]
    fn non_consent_request_waits_for_decision() {
        let mut bonder = MockBonder::default();
        let mut e = engine();

        block_on(e.create_bond(&mut bonder, PEER_A, t0()));
        block_on(e.handle_pairing_request(
            &mut bonder,
            PEER_A,
            PairingVariant::NumericComparison(123456),
            t0(),
        ));

        assert!(bonder.confirmations.is_empty());
        assert_eq!(
            e.events().requests,
            vec![(PEER_A, PairingVariant::NumericComparison(123456))]
        );

        block_on(e.resolve_pairing(&mut bonder, true));
        assert_eq!(bonder.confirmations, vec![(PEER_A, true)]);
        assert_eq!(e.state_of(PEER_A), PairingState::Started);
    }

    #[test]
    fn rejected_decision_fails_without_retry() {
        let mut bonder = MockBonder::default();
        let mut e = engine();

        block_on(e.create_bond(&mut bonder, PEER_A, t0()));
        block_on(e.handle_pairing_request(
            &mut bonder,
            PEER_A,
            PairingVariant::PasskeyEntry,
            t0(),
        ));
        block_on(e.resolve_pairing(&mut bonder, false));

        assert_eq!(bonder.confirmations, vec![(PEER_A, false)]);
        assert_eq!(e.state_of(PEER_A), PairingState::Failed);
        assert_eq!(
            e.events().completions,
            vec![(PEER_A, false, "pairing rejected")]
        );
        assert_eq!(e.next_deadline(), None);
    }

    #[test]
    fn disconnect_during_pairing_retries() {
        let mut bonder = MockBonder::default();
        let mut e = engine();

        block_on(e.create_bond(&mut bonder, PEER_A, t0()));
        e.handle_bond_state(PEER_A, BondState::Bonding, t0());
        e.handle_disconnect(PEER_A, t0());

        assert_eq!(e.state_of(PEER_A), PairingState::Requested);
        assert!(e.next_deadline().is_some());
    }

    #[test]
    fn disconnect_of_unrelated_peer_is_ignored() {
        let mut bonder = MockBonder::default();
        let mut e = engine();

        block_on(e.create_bond(&mut bonder, PEER_A, t0()));
        e.handle_disconnect(PEER_B, t0());

        assert_eq!(e.state_of(PEER_A), PairingState::Requested);
    }

    #[test]
    fn cancel_fires_cancelled_completion() {
        let mut bonder = MockBonder::default();
        let mut e = engine();

        block_on(e.create_bond(&mut bonder, PEER_A, t0()));
        block_on(e.cancel(&mut bonder));

        assert_eq!(e.events().completions, vec![(PEER_A, false, "cancelled")]);
        assert_eq!(bonder.abort_calls, vec![PEER_A]);
        assert_eq!(e.next_deadline(), None);
    }

    #[test]
    fn cancel_without_session_is_a_no_op() {
        let mut bonder = MockBonder::default();
        let mut e = engine();

        block_on(e.cancel(&mut bonder));
        assert!(e.events().completions.is_empty());
    }

    #[test]
    fn unpair_returns_to_idle_on_bond_none() {
        let mut bonder = MockBonder::default();
        let mut e = engine();

        block_on(e.remove_bond(&mut bonder, PEER_A));
        assert_eq!(e.state_of(PEER_A), PairingState::Unpairing);
        assert_eq!(bonder.remove_calls, vec![PEER_A]);

        e.handle_bond_state(PEER_A, BondState::None, t0());
        assert_eq!(e.state_of(PEER_A), PairingState::Idle);
        assert!(e.session().is_none());
    }

    #[test]
    fn stale_bond_events_after_terminal_state_are_ignored() {
        let mut bonder = MockBonder::default();
        let mut e = engine();

        block_on(e.create_bond(&mut bonder, PEER_A, t0()));
        e.handle_bond_state(PEER_A, BondState::Bonded, t0());
        assert_eq!(e.events().completions.len(), 1);

        // Late BONDING/BONDED events must not re-fire completion.
        e.handle_bond_state(PEER_A, BondState::Bonding, t0());
        e.handle_bond_state(PEER_A, BondState::Bonded, t0());
        assert_eq!(e.state_of(PEER_A), PairingState::Bonded);
        assert_eq!(e.events().completions.len(), 1);
    }
}
