//! Interior tour state machine.
//!
//! The controller owns the zone registry of the building being toured and drives
//! the renderer through it. It is single-threaded and never blocks: camera moves
//! are requested and their outcome is reported back later, timers live on the
//! simulation timebase and only fire when the owner calls [`TourController::tick`].
//!
//! Every session gets a fresh [`Generation`] and every camera move a fresh
//! [`Sequence`]. Timers and completions stamped with anything but the latest
//! values are dropped, which is what keeps a leaked timer or a superseded camera
//! move from touching a newer session.

use std::fmt;

use foundation::ids::{Generation, Sequence};
use foundation::math::geodetic_distance;
use foundation::time::{Time, TimeSpan};
use runtime::event_bus::{EventBus, Stamped};
use runtime::timer_queue::{TimerId, TimerQueue};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::backend::BackendApi;
use crate::command::TourCommand;
use crate::config::TourConfig;
use crate::error::{TourError, TransitionFailure};
use crate::events::{TourEndReason, TourEvent};
use crate::registry::ZoneRegistry;
use crate::renderer::{Flight, FlightTicket, Renderer};
use crate::zone::{BuildingId, Zone, ZoneId};


/// Auto-play mode of an active session.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Playback {
    /// Zones change only on user commands.
    #[default]
    Manual,
    /// Zones advance when their dwell window elapses.
    Running,
    /// Auto-play suspended; `resume` restarts the dwell window.
    Paused,
    /// Auto-play advanced past the last zone.
    Completed,
}

impl Playback {
    pub fn is_autoplay(self) -> bool {
        matches!(self, Playback::Running | Playback::Paused)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Playback::Manual => "manual",
            Playback::Running => "running",
            Playback::Paused => "paused",
            Playback::Completed => "completed",
        }
    }
}

impl fmt::Display for Playback {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum TimerKind {
    Dwell,
    TransitionDeadline(Sequence),
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct TimerPayload {
    generation: Generation,
    kind: TimerKind,
}

#[derive(Debug, Copy, Clone)]
struct PendingFlight {
    ticket: FlightTicket,
    target: usize,
    deadline: TimerId,
}

#[derive(Debug, Copy, Clone)]
struct DwellWindow {
    timer: TimerId,
    span: TimeSpan,
}

#[derive(Debug)]
struct Session {
    building: BuildingId,
    current: usize,
    pending: Option<PendingFlight>,
    dwell: Option<DwellWindow>,
    /// Interior model asset the renderer accepted for this session.
    interior_model: Option<u64>,
}

pub struct TourController<R, B> {
    config: TourConfig,
    renderer: R,
    backend: B,
    fallback_zones: Vec<Zone>,
    registry: ZoneRegistry,
    session: Option<Session>,
    playback: Playback,
    generation: Generation,
    seq: Sequence,
    timers: TimerQueue<TimerPayload>,
    events: EventBus<TourEvent>,
    now: Time,
}

impl<R: Renderer, B: BackendApi> TourController<R, B> {
    /// `fallback_zones` are used whenever the backend cannot provide a valid list.
    pub fn new(config: TourConfig, renderer: R, backend: B, fallback_zones: Vec<Zone>) -> Self {
        Self {
            config,
            renderer,
            backend,
            fallback_zones,
            registry: ZoneRegistry::new(),
            session: None,
            playback: Playback::Manual,
            generation: Generation::default(),
            seq: Sequence::default(),
            timers: TimerQueue::new(),
            events: EventBus::new(),
            now: Time::ZERO,
        }
    }

    // ---- commands ----------------------------------------------------------

    /// Starts an interior session: loads the zones, switches the viewer to the
    /// interior preset and moves to the entrance.
    ///
    /// An active session is closed once the new zone list is known to be usable.
    /// Backend failures are recovered with the fallback zones; only an unusable
    /// fallback list is an error, and it leaves the current session running.
    pub async fn enter(&mut self, building: BuildingId) -> Result<(), TourError> {
        self.enter_with_model(building, None).await
    }

    /// [`enter`](Self::enter), also asking the renderer for the building's
    /// interior model. A model that fails to load is logged and skipped.
    pub async fn enter_with_model(
        &mut self,
        building: BuildingId,
        model: Option<u64>,
    ) -> Result<(), TourError> {
        let (registry, used_fallback) = self.fetch_registry(building).await?;
        let entrance = registry.entrance_position()?;

        if self.session.is_some() {
            let previous = self.teardown();
            self.emit(TourEvent::SessionExited { building: previous });
        }
        self.registry = registry;

        self.generation = self.generation.next();
        self.playback = Playback::Manual;
        self.renderer.apply_preset(&self.config.interior_preset);
        let interior_model = model.and_then(|asset_id| {
            match self.renderer.load_interior_model(asset_id) {
                Ok(()) => {
                    info!(%building, asset_id, "interior model loaded");
                    Some(asset_id)
                }
                Err(reason) => {
                    warn!(%building, asset_id, %reason, "interior model unavailable");
                    None
                }
            }
        });
        self.session = Some(Session {
            building,
            current: entrance,
            pending: None,
            dwell: None,
            interior_model,
        });

        let zone_count = self.registry.len();
        info!(%building, zone_count, used_fallback, "entered interior");
        self.emit(TourEvent::SessionEntered {
            building,
            zone_count,
            used_fallback,
        });
        self.fly_to_position(entrance)
    }

    /// Ends the session and returns the viewer to the outdoor home view.
    /// Safe to call without a session.
    pub fn exit(&mut self) {
        let building = self.teardown();
        match building {
            Some(b) => info!(building = %b, "exited interior"),
            None => debug!("exit without an active session"),
        }
        self.renderer.apply_preset(&self.config.outdoor_preset);
        self.renderer
            .fly_home(&self.config.home_pose, self.config.home_flight_seconds);
        self.emit(TourEvent::SessionExited { building });
    }

    pub fn go_to_entrance(&mut self) -> Result<(), TourError> {
        self.require_session()?;
        let pos = self.registry.entrance_position()?;
        self.manual_step(pos)
    }

    /// Moves to the zone with `id`. An unknown id leaves everything untouched.
    pub fn go_to_zone(&mut self, id: &ZoneId) -> Result<(), TourError> {
        self.require_session()?;
        let pos = self.registry.position_of(id)?;
        self.manual_step(pos)
    }

    pub fn next(&mut self) -> Result<(), TourError> {
        self.step_by(1)
    }

    pub fn previous(&mut self) -> Result<(), TourError> {
        self.step_by(-1)
    }

    /// Adds a zone to the running session and returns its position.
    ///
    /// The current zone and the target of a move in flight keep their identity;
    /// their positions shift when the new zone sorts ahead of them.
    pub fn add_zone(&mut self, zone: Zone) -> Result<usize, TourError> {
        let session = self.require_session()?;
        let current_id = self.registry.at(session.current).map(|z| z.id.clone());
        let target_id = session
            .pending
            .and_then(|p| self.registry.at(p.target))
            .map(|z| z.id.clone());

        let pos = self.registry.insert(zone)?;
        let registry = &self.registry;
        if let Some(session) = self.session.as_mut() {
            if let Some(p) = current_id.and_then(|id| registry.position_of(&id).ok()) {
                session.current = p;
            }
            if let (Some(pending), Some(p)) = (
                session.pending.as_mut(),
                target_id.and_then(|id| registry.position_of(&id).ok()),
            ) {
                pending.target = p;
            }
        }

        let total = self.registry.len();
        if let Some(zone) = self.registry.at(pos).cloned() {
            info!(zone = %zone.id, index = pos, total, "zone added");
            self.emit(TourEvent::ZoneAdded {
                zone,
                index: pos,
                total,
            });
        }
        Ok(pos)
    }

    /// Turns on auto-play.
    ///
    /// Running is left alone, Paused resumes, and a completed tour rewinds to
    /// the first zone.
    pub fn start_auto_tour(&mut self) -> Result<(), TourError> {
        self.require_session()?;
        match self.playback {
            Playback::Running => Ok(()),
            Playback::Paused => self.resume(),
            Playback::Completed => {
                info!("restarting tour from the first zone");
                self.set_playback(Playback::Running);
                self.fly_to_position(0)
            }
            Playback::Manual => {
                info!("tour started");
                self.set_playback(Playback::Running);
                if !self.in_flight() {
                    self.arm_dwell();
                }
                Ok(())
            }
        }
    }

    /// Leaves auto-play and keeps the current zone.
    pub fn stop_tour(&mut self) -> Result<(), TourError> {
        self.require_session()?;
        self.cancel_dwell();
        let was = self.playback;
        self.set_playback(Playback::Manual);
        if was.is_autoplay() {
            info!("tour stopped");
            self.emit(TourEvent::TourEnded {
                reason: TourEndReason::Stopped,
            });
        }
        Ok(())
    }

    /// Stops auto-play and hands the camera to the user within the configured zoom range.
    pub fn free_roam(&mut self) -> Result<(), TourError> {
        self.stop_tour()?;
        let min_zoom_m = self.config.free_roam_min_zoom_m;
        let max_zoom_m = self.config.free_roam_max_zoom_m;
        info!(min_zoom_m, max_zoom_m, "free roam");
        self.renderer.enable_free_roam(min_zoom_m, max_zoom_m);
        self.emit(TourEvent::FreeRoamEnabled {
            min_zoom_m,
            max_zoom_m,
        });
        Ok(())
    }

    pub fn pause(&mut self) -> Result<(), TourError> {
        self.require_session()?;
        if self.playback != Playback::Running {
            return Err(TourError::InvalidState {
                command: "pause",
                playback: self.playback,
            });
        }
        self.cancel_dwell();
        self.set_playback(Playback::Paused);
        Ok(())
    }

    /// Continues a paused tour with a fresh dwell window for the current zone.
    pub fn resume(&mut self) -> Result<(), TourError> {
        self.require_session()?;
        if self.playback != Playback::Paused {
            return Err(TourError::InvalidState {
                command: "resume",
                playback: self.playback,
            });
        }
        self.set_playback(Playback::Running);
        if !self.in_flight() {
            self.arm_dwell();
        }
        Ok(())
    }

    pub fn pause_resume(&mut self) -> Result<(), TourError> {
        match self.playback {
            Playback::Paused => self.resume(),
            _ => self.pause(),
        }
    }

    pub async fn dispatch(&mut self, command: TourCommand) -> Result<(), TourError> {
        debug!(%command, "dispatch");
        match command {
            TourCommand::Enter(building, model) => self.enter_with_model(building, model).await,
            TourCommand::Exit => {
                self.exit();
                Ok(())
            }
            TourCommand::Entrance => self.go_to_entrance(),
            TourCommand::GoTo(id) => self.go_to_zone(&id),
            TourCommand::Start => self.start_auto_tour(),
            TourCommand::Stop => self.stop_tour(),
            TourCommand::PauseResume => self.pause_resume(),
            TourCommand::Pause => self.pause(),
            TourCommand::Resume => self.resume(),
            TourCommand::Next => self.next(),
            TourCommand::Previous => self.previous(),
            TourCommand::FreeRoam => self.free_roam(),
        }
    }

    // ---- signals -----------------------------------------------------------

    /// Advances the clock towards `now`, firing timers at their own due time.
    ///
    /// A timer that starts a camera move ends the tick at its due time: the
    /// move's outcome has to be delivered before anything later, its deadline
    /// included, may fire. The next tick picks up from there. Going backwards
    /// is ignored.
    pub fn tick(&mut self, now: Time) {
        let target = self.now.max(now);
        while let Some((_, due, payload)) = self.timers.pop_due(target) {
            self.now = self.now.max(due);
            let seq = self.seq;
            self.on_timer(payload);
            if self.seq != seq {
                debug!(
                    t = self.now.seconds(),
                    behind_s = target.since(self.now),
                    "tick held for camera move"
                );
                return;
            }
        }
        self.now = target;
    }

    /// Outcome of a camera move previously handed to the renderer.
    pub fn transition_finished(
        &mut self,
        ticket: FlightTicket,
        outcome: Result<(), TransitionFailure>,
    ) {
        if ticket.generation != self.generation {
            debug!(seq = ticket.seq.get(), "ignoring completion from an earlier session");
            return;
        }
        let Some(session) = self.session.as_mut() else {
            debug!(seq = ticket.seq.get(), "ignoring completion without a session");
            return;
        };
        let pending = match session.pending {
            Some(p) if p.ticket == ticket => p,
            _ => {
                debug!(seq = ticket.seq.get(), "ignoring superseded completion");
                return;
            }
        };
        session.pending = None;
        self.timers.cancel(pending.deadline);

        match outcome {
            Ok(()) => self.arrive(pending.target),
            Err(failure) => self.fail_transition(failure),
        }
    }

    // ---- queries -----------------------------------------------------------

    pub fn now(&self) -> Time {
        self.now
    }

    pub fn config(&self) -> &TourConfig {
        &self.config
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    pub fn is_autoplay(&self) -> bool {
        self.playback.is_autoplay()
    }

    pub fn building(&self) -> Option<BuildingId> {
        self.session.as_ref().map(|s| s.building)
    }

    pub fn registry(&self) -> &ZoneRegistry {
        &self.registry
    }

    pub fn current_index(&self) -> Option<usize> {
        self.session.as_ref().map(|s| s.current)
    }

    pub fn current_zone(&self) -> Option<&Zone> {
        self.current_index().and_then(|pos| self.registry.at(pos))
    }

    /// Interior model loaded for the active session.
    pub fn interior_model(&self) -> Option<u64> {
        self.session.as_ref().and_then(|s| s.interior_model)
    }

    /// Ticket of the camera move still awaiting its outcome.
    pub fn pending_flight(&self) -> Option<FlightTicket> {
        self.session
            .as_ref()
            .and_then(|s| s.pending)
            .map(|p| p.ticket)
    }

    /// Seconds left before auto-play leaves the current zone.
    pub fn dwell_remaining(&self) -> Option<f64> {
        let dwell = self.session.as_ref()?.dwell?;
        Some(dwell.span.end.since(self.now))
    }

    /// Due time of the next timer, if any.
    pub fn next_deadline(&self) -> Option<Time> {
        self.timers.next_due()
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    pub fn events(&self) -> &[Stamped<TourEvent>] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<Stamped<TourEvent>> {
        self.events.drain()
    }

    // ---- internals ---------------------------------------------------------

    fn require_session(&self) -> Result<&Session, TourError> {
        self.session.as_ref().ok_or(TourError::NoSession)
    }

    fn in_flight(&self) -> bool {
        self.session.as_ref().is_some_and(|s| s.pending.is_some())
    }

    fn emit(&mut self, event: TourEvent) {
        debug!(event = event.name(), t = self.now.seconds(), "emit");
        self.events.emit(self.now, event);
    }

    fn set_playback(&mut self, playback: Playback) {
        if self.playback != playback {
            self.playback = playback;
            self.emit(TourEvent::PlaybackChanged { playback });
        }
    }

    fn step_by(&mut self, delta: isize) -> Result<(), TourError> {
        let session = self.require_session()?;
        // Quick repeated steps count from the move already requested.
        let base = session.pending.map_or(session.current, |p| p.target);
        let last = self.registry.len().checked_sub(1).ok_or(TourError::EmptyRegistry)?;
        let target = base.saturating_add_signed(delta).min(last);
        self.manual_step(target)
    }

    fn manual_step(&mut self, target: usize) -> Result<(), TourError> {
        if self.playback == Playback::Completed {
            self.set_playback(Playback::Manual);
        }
        self.fly_to_position(target)
    }

    /// Requests a camera move to the zone at `target`, superseding any move in flight.
    fn fly_to_position(&mut self, target: usize) -> Result<(), TourError> {
        self.require_session()?;
        let zone = self.registry.at(target).ok_or(TourError::EmptyRegistry)?;
        let look_at = if self.renderer.supports_look_at() {
            zone.target_pose
        } else {
            None
        };
        let pose = match &look_at {
            Some(t) => zone.camera_pose.aimed_at(t),
            None => zone.camera_pose,
        };
        let zone_id = zone.id.clone();
        let distance_m = self
            .current_zone()
            .map_or(0.0, |from| geodetic_distance(from.camera_pose.position(), pose.position()));

        self.cancel_dwell();
        self.cancel_deadline();

        self.seq = self.seq.next();
        let ticket = FlightTicket {
            generation: self.generation,
            seq: self.seq,
        };
        let deadline = self.timers.schedule(
            self.now.after(self.config.transition_deadline_seconds()),
            TimerPayload {
                generation: self.generation,
                kind: TimerKind::TransitionDeadline(self.seq),
            },
        );
        if let Some(session) = self.session.as_mut() {
            session.pending = Some(PendingFlight {
                ticket,
                target,
                deadline,
            });
        }

        debug!(zone = %zone_id, seq = self.seq.get(), distance_m, "flying to zone");
        self.renderer.fly_to(Flight {
            ticket,
            zone_id,
            pose,
            look_at,
            duration_s: self.config.transition_seconds,
            requested_at: self.now,
        });
        Ok(())
    }

    fn arrive(&mut self, pos: usize) {
        let Some(zone) = self.registry.at(pos).cloned() else {
            return;
        };
        if let Some(session) = self.session.as_mut() {
            session.current = pos;
        }
        let total = self.registry.len();
        info!(zone = %zone.id, name = zone.display_name(), index = pos, total, "arrived at zone");
        self.emit(TourEvent::ZoneChanged {
            zone,
            index: pos,
            total,
        });
        if self.playback.is_autoplay() {
            self.emit(TourEvent::progress(pos, total));
        }
        if self.playback == Playback::Running {
            self.arm_dwell();
        }
    }

    fn fail_transition(&mut self, failure: TransitionFailure) {
        warn!(error = %failure, "camera transition failed");
        self.emit(TourEvent::Error {
            kind: (&failure).into(),
            message: failure.to_string(),
        });
        if self.playback == Playback::Running {
            self.cancel_dwell();
            self.set_playback(Playback::Paused);
        }
    }

    fn on_timer(&mut self, payload: TimerPayload) {
        if payload.generation != self.generation {
            debug!("ignoring timer from an earlier session");
            return;
        }
        match payload.kind {
            TimerKind::Dwell => self.on_dwell_elapsed(),
            TimerKind::TransitionDeadline(seq) => self.on_transition_deadline(seq),
        }
    }

    fn on_dwell_elapsed(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        session.dwell = None;
        if self.playback != Playback::Running {
            debug!(playback = %self.playback, "dwell elapsed outside auto-play");
            return;
        }

        let next = session.current + 1;
        if next < self.registry.len() {
            if let Err(err) = self.fly_to_position(next) {
                warn!(error = %err, "auto-advance failed");
            }
        } else {
            info!("tour complete");
            self.set_playback(Playback::Completed);
            self.emit(TourEvent::TourEnded {
                reason: TourEndReason::Completed,
            });
        }
    }

    fn on_transition_deadline(&mut self, seq: Sequence) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if !matches!(session.pending, Some(p) if p.ticket.seq == seq) {
            return;
        }
        session.pending = None;
        let waited_s = self.config.transition_deadline_seconds();
        self.fail_transition(TransitionFailure::TimedOut { waited_s });
    }

    fn arm_dwell(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        let Some(zone) = self.registry.at(session.current) else {
            return;
        };
        if let Some(old) = session.dwell.take() {
            self.timers.cancel(old.timer);
        }
        let span = TimeSpan::new(self.now, zone.dwell_seconds);
        let timer = self.timers.schedule(
            span.end,
            TimerPayload {
                generation: self.generation,
                kind: TimerKind::Dwell,
            },
        );
        debug!(zone = %zone.id, dwell_s = span.duration(), due = span.end.seconds(), "dwell armed");
        session.dwell = Some(DwellWindow { timer, span });
    }

    fn cancel_dwell(&mut self) {
        if let Some(dwell) = self.session.as_mut().and_then(|s| s.dwell.take()) {
            self.timers.cancel(dwell.timer);
        }
    }

    fn cancel_deadline(&mut self) {
        if let Some(pending) = self.session.as_mut().and_then(|s| s.pending.take()) {
            self.timers.cancel(pending.deadline);
        }
    }

    /// Zone list for `building`, falling back to the built-in zones when the
    /// backend has nothing usable. The second value reports the fallback.
    async fn fetch_registry(
        &self,
        building: BuildingId,
    ) -> Result<(ZoneRegistry, bool), TourError> {
        let mut registry = ZoneRegistry::new();
        let used_fallback = match self.backend.list_zones(building).await {
            Ok(zones) => match registry.load(zones) {
                Ok(()) if !registry.is_empty() => false,
                Ok(()) => {
                    warn!(%building, "backend returned no zones, using defaults");
                    true
                }
                Err(err) => {
                    warn!(%building, error = %err, "backend zones rejected, using defaults");
                    true
                }
            },
            Err(err) => {
                warn!(%building, error = %err, "zone list unavailable, using defaults");
                true
            }
        };
        if used_fallback {
            registry.load(self.fallback_zones.clone())?;
        }
        Ok((registry, used_fallback))
    }

    /// Drops the session and everything scheduled for it.
    fn teardown(&mut self) -> Option<BuildingId> {
        let canceled = self.timers.cancel_all();
        if canceled > 0 {
            debug!(canceled, "canceled pending timers");
        }
        self.generation = self.generation.next();
        self.registry.clear();
        self.playback = Playback::Manual;
        let session = self.session.take()?;
        if session.interior_model.is_some() {
            self.renderer.unload_interior_model();
        }
        Some(session.building)
    }
}
