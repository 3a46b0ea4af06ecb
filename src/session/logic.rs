//! Game lifecycle: menu, playing, paused and game over.
//!
//! [`GameSession`] owns the tick schedule and one [`SimulationEngine`] per run.
//! Every call takes the current time in milliseconds and returns the side
//! effects it produced, so the whole lifecycle runs headless under a virtual
//! clock. Calls that do not apply to the current phase are silent no-ops.

use super::types::{Phase, RunSummary, SessionEvent, SoundCue};
use crate::leaderboard::{Leaderboard, LeaderboardEntry};
use crate::settings::Settings;
use crate::simulation::{BoardSnapshot, Collision, Difficulty, Direction, FoodCategory, SimulationEngine};
use crate::timing::{TickScheduler, TICK_BACKLOG_LIMIT_MS};
use crate::utils::persistence::{load_settings_or_default, Store};
use chrono::Local;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub struct GameSession<S: Store> {
    phase: Phase,
    settings: Settings,
    engine: Option<SimulationEngine>,
    scheduler: TickScheduler,
    leaderboard: Leaderboard,
    last_run: Option<RunSummary>,
    store: S,
    rng: StdRng,
}

impl<S: Store> GameSession<S> {
    /// Load settings and leaderboard from `store` and open on the menu.
    pub fn new(store: S) -> Self {
        Self::with_rng(store, StdRng::from_entropy())
    }

    /// Like [`GameSession::new`], with reproducible food and obstacle layouts.
    pub fn with_seed(store: S, seed: u64) -> Self {
        Self::with_rng(store, StdRng::seed_from_u64(seed))
    }

    fn with_rng(store: S, rng: StdRng) -> Self {
        let settings = load_settings_or_default(&store);
        let leaderboard = Leaderboard::load(&store);
        Self {
            phase: Phase::Menu,
            settings,
            engine: None,
            scheduler: TickScheduler::new(),
            leaderboard,
            last_run: None,
            store,
            rng,
        }
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn engine(&self) -> Option<&SimulationEngine> {
        self.engine.as_ref()
    }

    pub fn engine_mut(&mut self) -> Option<&mut SimulationEngine> {
        self.engine.as_mut()
    }

    pub fn board(&self) -> Option<BoardSnapshot> {
        self.engine.as_ref().map(SimulationEngine::snapshot)
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn last_run(&self) -> Option<RunSummary> {
        self.last_run
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Interval of the running tick schedule. `None` unless playing.
    pub fn tick_interval_ms(&self) -> Option<u64> {
        self.scheduler.interval_ms()
    }

    /// Earliest time `advance` has work to do: the next tick or effect expiry.
    pub fn next_wakeup_ms(&self) -> Option<u64> {
        let tick = self.scheduler.next_fire_ms();
        let expiry = self
            .engine
            .as_ref()
            .and_then(SimulationEngine::effect_deadline_ms);
        match (tick, expiry) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    // ── Settings ────────────────────────────────────────────────────

    /// Change difficulty. Only allowed on the menu.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> bool {
        if self.phase != Phase::Menu {
            return false;
        }
        self.settings.difficulty = difficulty;
        true
    }

    /// Toggle obstacle mode. Only allowed on the menu.
    pub fn set_obstacle_mode(&mut self, enabled: bool) -> bool {
        if self.phase != Phase::Menu {
            return false;
        }
        self.settings.obstacle_mode = enabled;
        true
    }

    /// Turn sound on or off at any time. Background audio follows the switch
    /// while a run is playing.
    pub fn set_sound_enabled(&mut self, enabled: bool) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.settings.sound_enabled == enabled {
            return events;
        }
        if self.phase == Phase::Playing {
            // Emit while sound is still on so the stop cue is not filtered
            if enabled {
                self.settings.sound_enabled = true;
                self.sound(SoundCue::BackgroundStart, &mut events);
            } else {
                self.sound(SoundCue::BackgroundStop, &mut events);
            }
        }
        self.settings.sound_enabled = enabled;
        events
    }

    // ── Transitions ─────────────────────────────────────────────────

    /// MENU -> PLAYING.
    pub fn start(&mut self, now_ms: u64) -> Vec<SessionEvent> {
        if self.phase != Phase::Menu {
            return Vec::new();
        }
        self.begin_run(now_ms)
    }

    /// PLAYING | PAUSED -> PLAYING with a fresh board.
    pub fn restart(&mut self, now_ms: u64) -> Vec<SessionEvent> {
        if !matches!(self.phase, Phase::Playing | Phase::Paused) {
            return Vec::new();
        }
        self.begin_run(now_ms)
    }

    /// GAME_OVER -> PLAYING with a fresh board.
    pub fn play_again(&mut self, now_ms: u64) -> Vec<SessionEvent> {
        if self.phase != Phase::GameOver {
            return Vec::new();
        }
        self.begin_run(now_ms)
    }

    /// PLAYING -> PAUSED.
    pub fn pause(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Playing {
            return events;
        }
        self.scheduler.stop();
        self.phase = Phase::Paused;
        self.sound(SoundCue::BackgroundStop, &mut events);
        debug!("paused");
        events
    }

    /// PAUSED -> PLAYING at the current effective interval.
    pub fn resume(&mut self, now_ms: u64) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.phase != Phase::Paused {
            return events;
        }
        let Some(interval_ms) = self.engine.as_ref().map(SimulationEngine::effective_interval_ms)
        else {
            return events;
        };
        self.scheduler.start(interval_ms, now_ms);
        self.phase = Phase::Playing;
        self.sound(SoundCue::BackgroundStart, &mut events);
        debug!("resumed at {interval_ms}ms");
        events
    }

    /// PLAYING | PAUSED | GAME_OVER -> MENU. Discards the run.
    pub fn return_to_menu(&mut self) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        if self.phase == Phase::Menu {
            return events;
        }
        self.stop_ticks(&mut events);
        self.engine = None;
        self.phase = Phase::Menu;
        info!("returned to menu");
        events
    }

    /// Buffer a direction change. Ignored unless playing.
    pub fn request_direction(&mut self, direction: Direction) -> bool {
        if self.phase != Phase::Playing {
            return false;
        }
        self.engine
            .as_mut()
            .is_some_and(|engine| engine.request_direction(direction))
    }

    /// Run every tick and effect expiry due at or before `now_ms`, in time
    /// order.
    pub fn advance(&mut self, now_ms: u64) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        loop {
            // Same clamp the scheduler applies, so expiries order correctly
            // against a catch-up tick
            let tick_due = match self.phase {
                Phase::Playing => self
                    .scheduler
                    .next_fire_ms()
                    .filter(|&t| t <= now_ms)
                    .map(|t| t.max(now_ms.saturating_sub(TICK_BACKLOG_LIMIT_MS))),
                _ => None,
            };
            let expiry_due = self
                .engine
                .as_ref()
                .and_then(SimulationEngine::effect_deadline_ms)
                .filter(|&t| t <= now_ms);

            match (tick_due, expiry_due) {
                (tick, Some(expiry)) if tick.map_or(true, |t| expiry <= t) => {
                    self.expire_effect(expiry, &mut events);
                }
                (Some(_), _) => match self.scheduler.poll(now_ms) {
                    Some(fired_at) => self.tick(fired_at, &mut events),
                    None => break,
                },
                _ => break,
            }
        }
        events
    }

    // ── Internals ───────────────────────────────────────────────────

    fn begin_run(&mut self, now_ms: u64) -> Vec<SessionEvent> {
        let mut events = Vec::new();
        self.stop_ticks(&mut events);

        if let Err(err) = self.store.save_settings(&self.settings) {
            warn!("settings not saved: {err}");
        }

        let engine_rng = StdRng::seed_from_u64(self.rng.gen());
        let engine = SimulationEngine::new(
            self.settings.difficulty,
            self.settings.obstacle_mode,
            engine_rng,
        );
        self.scheduler.start(engine.base_interval_ms(), now_ms);
        info!(
            "run started: difficulty={} obstacles={} ({} placed)",
            self.settings.difficulty.name(),
            self.settings.obstacle_mode,
            engine.obstacles.len()
        );

        self.engine = Some(engine);
        self.last_run = None;
        self.phase = Phase::Playing;
        self.sound(SoundCue::BackgroundStart, &mut events);
        events.push(SessionEvent::BoardChanged);
        events
    }

    fn tick(&mut self, at_ms: u64, events: &mut Vec<SessionEvent>) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let result = engine.step(at_ms);
        let interval_ms = engine.effective_interval_ms();

        if let Some(collision) = result.collision {
            self.finish_run(collision, events);
            return;
        }

        if let Some(category) = result.ate {
            let cue = match category {
                FoodCategory::Normal => SoundCue::Eat,
                _ => SoundCue::SpecialEat,
            };
            self.sound(cue, events);
            if category != FoodCategory::Normal {
                events.push(SessionEvent::EffectStarted(category));
            }
        }
        if result.restart_ticks {
            self.scheduler.start(interval_ms, at_ms);
            debug!("tick interval now {interval_ms}ms");
        }
        events.push(SessionEvent::BoardChanged);
    }

    fn expire_effect(&mut self, at_ms: u64, events: &mut Vec<SessionEvent>) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };
        let Some(ended) = engine.poll_effect_expiry(at_ms) else {
            return;
        };
        // The schedule only runs while playing; a paused or finished run just
        // drops the effect.
        if self.phase == Phase::Playing {
            self.scheduler.start(engine.effective_interval_ms(), at_ms);
        }
        events.push(SessionEvent::EffectEnded(ended.category));
        events.push(SessionEvent::BoardChanged);
    }

    fn finish_run(&mut self, collision: Collision, events: &mut Vec<SessionEvent>) {
        self.stop_ticks(events);
        self.phase = Phase::GameOver;
        self.sound(SoundCue::GameOver, events);

        let score = self.engine.as_ref().map_or(0, |engine| engine.score);
        let entry = LeaderboardEntry::new(
            score,
            self.settings.difficulty,
            self.settings.obstacle_mode,
            Local::now(),
        );
        let new_record = self.leaderboard.record(entry, &mut self.store);

        let summary = RunSummary {
            score,
            collision,
            new_record,
        };
        info!(
            "game over: score={} ({}) new_record={}",
            score,
            collision.describe(),
            new_record
        );
        self.last_run = Some(summary);
        events.push(SessionEvent::GameOver(summary));
    }

    /// Stop the tick schedule, and background audio with it.
    fn stop_ticks(&mut self, events: &mut Vec<SessionEvent>) {
        if self.scheduler.stop().is_some() {
            self.sound(SoundCue::BackgroundStop, events);
        }
    }

    fn sound(&self, cue: SoundCue, events: &mut Vec<SessionEvent>) {
        if self.settings.sound_enabled {
            events.push(SessionEvent::Sound(cue));
        }
    }
}
