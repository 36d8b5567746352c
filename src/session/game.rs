//! The session aggregate: owns every entity, the RNG and the leaderboard,
//! and routes inputs to whichever state is active.

use super::death::{DeathCause, DeathSequence};
use super::types::*;
use crate::core::constants::*;
use crate::core::GameConfig;
use crate::encounter::{BossVariant, Encounter};
use crate::entities::{Bird, Enemy, Fireball, Pipe, PowerUp};
use crate::leaderboard::{
    validate_name, BeatLeaderTracker, Leaderboard, LeaderboardEntry, LeaderboardStore,
};
use crate::scoring::{self, Slowdown};
use crate::spawner::{EntityIds, SpawnTimer};
use chrono::Utc;
use rand::rngs::StdRng;
use rand::SeedableRng;

pub struct GameSession {
    pub config: GameConfig,
    pub state: GameState,

    pub bird: Bird,
    pub pipes: Vec<Pipe>,
    pub power_ups: Vec<PowerUp>,
    pub enemies: Vec<Enemy>,
    pub fireballs: Vec<Fireball>,

    pub score: u32,
    /// Best score this session has seen, seeded from the board's top score.
    pub high_score: u32,
    pub slowdown: Slowdown,
    pub spawn_timer: SpawnTimer,
    pub ids: EntityIds,

    /// Bosses already fought this run.
    pub bosses_triggered: Vec<BossVariant>,
    pub encounter: Option<Encounter>,
    pub death: Option<DeathSequence>,
    pub countdown_remaining: u32,
    pub name_buffer: String,

    pub leaderboard: Leaderboard,
    pub beat_leader: BeatLeaderTracker,
    /// Ticks processed since the session was created.
    pub ticks: u64,

    pub(super) rng: StdRng,
    pub(super) store: Box<dyn LeaderboardStore>,
    pub(super) pending: TickEvents,
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("score", &self.score)
            .field("ticks", &self.ticks)
            .finish_non_exhaustive()
    }
}

impl GameSession {
    /// New session in the Start state. The board is loaded from `store`
    /// now and reloaded at each run start and game over; the seed makes
    /// every random roll reproducible.
    pub fn new(config: GameConfig, store: impl LeaderboardStore + 'static, seed: u64) -> Self {
        let config = config.sanitized();
        let leaderboard = Leaderboard::from_entries(store.load(), config.max_leaderboard_entries);
        let high_score = leaderboard.top_score();
        tracing::debug!(
            "Session created (seed {}, {} leaderboard entries)",
            seed,
            leaderboard.len()
        );
        Self {
            config,
            state: GameState::Start,
            bird: Bird::new(),
            pipes: Vec::new(),
            power_ups: Vec::new(),
            enemies: Vec::new(),
            fireballs: Vec::new(),
            score: 0,
            high_score,
            slowdown: Slowdown::default(),
            spawn_timer: SpawnTimer::default(),
            ids: EntityIds::default(),
            bosses_triggered: Vec::new(),
            encounter: None,
            death: None,
            countdown_remaining: 0,
            name_buffer: String::new(),
            leaderboard,
            beat_leader: BeatLeaderTracker::default(),
            ticks: 0,
            rng: StdRng::seed_from_u64(seed),
            store: Box::new(store),
            pending: TickEvents::default(),
        }
    }

    /// Current obstacle speed, including any active slowdown.
    pub fn current_speed(&self) -> f64 {
        scoring::current_speed(self.score, &self.slowdown, &self.config)
    }

    pub fn speed_level(&self) -> f64 {
        scoring::speed_level(self.score, &self.config)
    }

    /// Whole seconds left on the countdown, rounded up.
    pub fn countdown_seconds(&self) -> u32 {
        self.countdown_remaining.div_ceil(TICKS_PER_SECOND)
    }

    /// Apply one input. Inputs that mean nothing in the current state are
    /// ignored. Resulting events are returned by the next [`tick`].
    ///
    /// [`tick`]: GameSession::tick
    pub fn handle_input(&mut self, input: InputKind) {
        match (self.state, input) {
            (GameState::Start, InputKind::Jump | InputKind::StartOrConfirm) => self.start_run(),
            (GameState::Playing, InputKind::Jump) => {
                self.bird.jump();
                self.pending.push(TickEvent::Jumped);
            }
            (GameState::Playing, InputKind::Fire) => {
                let fireball = Fireball::from_bird(self.ids.next_id(), &self.bird);
                self.fireballs.push(fireball);
                self.pending.push(TickEvent::FireballLaunched);
            }
            (GameState::Over, InputKind::Jump | InputKind::StartOrConfirm) => self.resolve_over(),
            (GameState::NameEntry, InputKind::TextChar(c)) => {
                if c.is_ascii_alphanumeric() && self.name_buffer.chars().count() < MAX_NAME_LEN {
                    self.name_buffer.push(c);
                }
            }
            (GameState::NameEntry, InputKind::Backspace) => {
                self.name_buffer.pop();
            }
            (GameState::NameEntry, InputKind::StartOrConfirm) => self.submit_name(),
            (GameState::Leaderboard, InputKind::Jump | InputKind::StartOrConfirm) => {
                self.set_state(GameState::Start);
            }
            _ => {}
        }
    }

    pub(super) fn set_state(&mut self, next: GameState) {
        if self.state != next {
            tracing::info!("{:?} -> {:?} (score {})", self.state, next, self.score);
            self.state = next;
        }
    }

    /// Clear the playfield for a fresh (or resumed) stretch of play.
    fn reset_field(&mut self) {
        self.bird = Bird::new();
        self.pipes.clear();
        self.power_ups.clear();
        self.enemies.clear();
        self.fireballs.clear();
        self.slowdown = Slowdown::default();
        self.spawn_timer.reset();
    }

    fn start_run(&mut self) {
        self.reset_field();
        self.score = 0;
        self.bosses_triggered.clear();
        self.encounter = None;
        self.death = None;
        self.countdown_remaining = 0;
        self.name_buffer.clear();
        self.reload_leaderboard();
        self.beat_leader.begin_run(self.leaderboard.top_score());
        self.pending.push(TickEvent::RunStarted);
        self.set_state(GameState::Playing);
    }

    pub(super) fn start_encounter(&mut self, variant: BossVariant) {
        self.bosses_triggered.push(variant);
        self.encounter = Some(Encounter::new(variant));
        self.pending.push(TickEvent::BossStarted(variant));
        self.set_state(GameState::for_boss(variant));
    }

    /// Enter the post-boss countdown. The field is cleared now; the score
    /// carries over and speeds follow from it when play resumes.
    pub(super) fn start_countdown(&mut self) {
        self.reset_field();
        self.countdown_remaining = self.config.countdown_ticks;
        self.set_state(GameState::Countdown);
    }

    pub(super) fn die(&mut self, cause: DeathCause, pipe: Option<u32>) {
        for p in &mut self.pipes {
            p.is_moving = false;
        }
        self.bird.target_pipe = pipe;
        self.bird.shield_active = false;
        self.death = Some(DeathSequence::new(cause));
        self.high_score = self.high_score.max(self.score);
        self.pending.push(TickEvent::Died(cause));
        self.set_state(GameState::DeathSequence);
    }

    /// Pick up entries other sessions sharing the store have written.
    fn reload_leaderboard(&mut self) {
        self.leaderboard =
            Leaderboard::from_entries(self.store.load(), self.config.max_leaderboard_entries);
        self.high_score = self.high_score.max(self.leaderboard.top_score());
    }

    fn resolve_over(&mut self) {
        self.reload_leaderboard();
        if self.score > 0 && self.leaderboard.is_high_score(self.score) {
            self.name_buffer.clear();
            self.set_state(GameState::NameEntry);
        } else {
            self.set_state(GameState::Leaderboard);
        }
    }

    fn submit_name(&mut self) {
        let name = match validate_name(&self.name_buffer) {
            Ok(name) => name,
            Err(e) => {
                tracing::debug!("Name rejected: {}", e);
                return;
            }
        };
        let entry = LeaderboardEntry {
            name: name.clone(),
            score: self.score,
            date: Utc::now(),
        };
        let rank = match self.store.record(entry, self.config.max_leaderboard_entries) {
            Ok((board, rank)) => {
                self.leaderboard = board;
                rank
            }
            Err(e) => {
                tracing::warn!("Failed to save leaderboard: {}", e);
                self.leaderboard.add(&name, self.score, Utc::now())
            }
        };
        self.pending.push(TickEvent::NameSubmitted { name, rank });
        self.name_buffer.clear();
        self.set_state(GameState::Leaderboard);
    }
}
