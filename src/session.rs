//! Session: one game state driven by host commands and display frames
//!
//! The host calls [`Session::step`] once per rendered frame and reads a
//! [`Snapshot`] afterwards. Jump commands land in a single-slot buffer that the
//! next step consumes before doing anything else, so a step is never
//! interleaved with input. Start and return-to-menu only apply while no run is
//! active, so they take effect immediately.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use crate::error::GameError;
use crate::persistence::BestScoreStore;
use crate::settings::{Character, Settings};
use crate::sim::{
    DifficultyProfile, GameEvent, GameState, RunState, TickInput, WorldBounds, return_to_menu,
    start_run, tick,
};

/// Commands the input layer can issue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Jump,
    ReturnToMenu,
}

/// Fire-and-forget subscriber to simulation events (audio, HUD effects)
pub trait EventListener {
    fn on_event(&mut self, event: &GameEvent);
}

impl<F: FnMut(&GameEvent)> EventListener for F {
    fn on_event(&mut self, event: &GameEvent) {
        self(event)
    }
}

/// Actor as seen by a renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActorView {
    pub x: f32,
    pub y: f32,
    pub vel: f32,
    pub half_width: f32,
    pub half_height: f32,
}

/// Obstacle as seen by a renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ObstacleView {
    pub id: u32,
    pub x: f32,
    pub width: f32,
    pub gap_top: f32,
    pub gap_bottom: f32,
    pub passed: bool,
}

/// Read-only view of everything a renderer or HUD needs after a step
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub phase: RunState,
    pub world: WorldBounds,
    pub difficulty: DifficultyProfile,
    pub character: Character,
    pub actor: ActorView,
    pub obstacles: Vec<ObstacleView>,
    pub score: u32,
    pub best: u32,
    /// Live obstacle speed
    pub speed: f32,
    pub grace_frames: u32,
    pub frame: u64,
    pub run_frames: u64,
}

/// Owns the game state, RNG, pending input and outside collaborators
pub struct Session<R: Rng = Pcg32> {
    state: GameState,
    rng: R,
    pending_jump: bool,
    autopilot: bool,
    difficulty: DifficultyProfile,
    character: Character,
    /// Bounds for the next run (the current run keeps its own copy)
    world: WorldBounds,
    store: Box<dyn BestScoreStore>,
    listeners: Vec<Box<dyn EventListener>>,
}

impl Session<Pcg32> {
    /// New session with a seeded PCG generator
    pub fn new(seed: u64, store: Box<dyn BestScoreStore>) -> Self {
        Self::with_rng(Pcg32::seed_from_u64(seed), store)
    }
}

impl<R: Rng> Session<R> {
    /// New session with a caller-supplied generator. Loads the best score once.
    pub fn with_rng(rng: R, mut store: Box<dyn BestScoreStore>) -> Self {
        let best = store.load().unwrap_or_else(|e| {
            log::warn!("Failed to load best score, starting from 0: {e}");
            0
        });
        Self {
            state: GameState::new(best),
            rng,
            pending_jump: false,
            autopilot: false,
            difficulty: DifficultyProfile::default(),
            character: Character::default(),
            world: WorldBounds::default(),
            store,
            listeners: Vec::new(),
        }
    }

    pub fn run_state(&self) -> RunState {
        self.state.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn best_score(&self) -> u32 {
        self.state.score.best
    }

    pub fn difficulty(&self) -> DifficultyProfile {
        self.difficulty
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn add_listener(&mut self, listener: Box<dyn EventListener>) {
        self.listeners.push(listener);
    }

    /// Dispatch a command from the input layer
    pub fn command(&mut self, command: Command) -> Result<(), GameError> {
        match command {
            Command::Start => self.start(),
            Command::Jump => {
                self.jump();
                Ok(())
            }
            Command::ReturnToMenu => {
                self.return_to_menu();
                Ok(())
            }
        }
    }

    /// Start (or restart) a run with the selected difficulty and latest bounds
    ///
    /// Invalid bounds or a gap that cannot fit leave the session unchanged.
    pub fn start(&mut self) -> Result<(), GameError> {
        if start_run(&mut self.state, self.world, self.difficulty)? {
            self.pending_jump = false;
            self.flush_events();
        } else {
            log::debug!("Start ignored: run already active");
        }
        Ok(())
    }

    /// Queue a jump for the next step (running only)
    pub fn jump(&mut self) {
        if self.state.phase == RunState::Running {
            self.pending_jump = true;
        } else {
            log::debug!("Jump ignored in {:?}", self.state.phase);
        }
    }

    /// ENDED -> IDLE
    pub fn return_to_menu(&mut self) {
        if !return_to_menu(&mut self.state) {
            log::debug!("Return to menu ignored in {:?}", self.state.phase);
        }
    }

    /// Record new world bounds; they apply from the next start
    pub fn resize(&mut self, world: WorldBounds) {
        if self.state.phase == RunState::Running {
            log::debug!("Resize to {}x{} deferred until next run", world.width, world.height);
        }
        self.world = world;
    }

    /// Pick a difficulty tier (idle only). Returns whether it was applied.
    pub fn select_difficulty(&mut self, id: u8) -> bool {
        if self.state.phase != RunState::Idle {
            return false;
        }
        match DifficultyProfile::by_id(id) {
            Some(profile) => {
                self.difficulty = profile;
                true
            }
            None => {
                log::debug!("Unknown difficulty {id}");
                false
            }
        }
    }

    /// Pick a character (idle only). Returns whether it was applied.
    pub fn select_character(&mut self, character: Character) -> bool {
        if self.state.phase != RunState::Idle {
            return false;
        }
        self.character = character;
        true
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.autopilot = enabled;
    }

    /// Apply stored preferences (idle only). Returns whether they were applied.
    pub fn apply_settings(&mut self, settings: &Settings) -> bool {
        if self.state.phase != RunState::Idle {
            return false;
        }
        self.difficulty = settings.difficulty_profile();
        self.character = settings.character.clone();
        self.autopilot = settings.autopilot;
        true
    }

    /// Advance one display frame. Does nothing unless a run is active.
    pub fn step(&mut self) -> Vec<GameEvent> {
        if self.state.phase != RunState::Running {
            return Vec::new();
        }
        let input = TickInput {
            jump: std::mem::take(&mut self.pending_jump),
            autopilot: self.autopilot,
        };
        tick(&mut self.state, &input, &mut self.rng);
        self.flush_events()
    }

    /// Drain events, persist a new best, notify listeners
    fn flush_events(&mut self) -> Vec<GameEvent> {
        let events = self.state.drain_events();
        for event in &events {
            if let GameEvent::RunEnded {
                best,
                new_best: true,
                ..
            } = *event
            {
                if let Err(e) = self.store.save(best) {
                    log::warn!("Failed to save best score {best}: {e}");
                }
            }
            for listener in &mut self.listeners {
                listener.on_event(event);
            }
        }
        events
    }

    /// Immutable view for rendering
    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        let idle = state.phase == RunState::Idle;
        let gap_height = state.field.gap_height();
        Snapshot {
            phase: state.phase,
            world: if idle { self.world } else { state.world },
            difficulty: if idle { self.difficulty } else { state.profile },
            character: self.character.clone(),
            actor: ActorView {
                x: state.actor.x,
                y: state.actor.y,
                vel: state.actor.vel,
                half_width: state.actor.half_extent.x,
                half_height: state.actor.half_extent.y,
            },
            obstacles: state
                .field
                .obstacles()
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    x: o.x,
                    width: crate::consts::OBSTACLE_WIDTH,
                    gap_top: o.gap_top,
                    gap_bottom: o.gap_top + gap_height,
                    passed: o.passed,
                })
                .collect(),
            score: state.score.current,
            best: state.score.best,
            speed: state.current_speed(),
            grace_frames: state.grace_frames,
            frame: state.frame,
            run_frames: state.run_frames,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::consts::GRACE_FRAMES;
    use crate::error::StoreError;
    use crate::persistence::MemoryStore;

    /// Store the test can inspect after handing it to the session
    #[derive(Clone, Default)]
    struct SharedStore(Rc<RefCell<MemoryStore>>);

    impl BestScoreStore for SharedStore {
        fn load(&mut self) -> Result<u32, StoreError> {
            self.0.borrow_mut().load()
        }
        fn save(&mut self, best: u32) -> Result<(), StoreError> {
            self.0.borrow_mut().save(best)
        }
    }

    struct FailingStore;

    impl BestScoreStore for FailingStore {
        fn load(&mut self) -> Result<u32, StoreError> {
            Err(StoreError::Unavailable("test".to_string()))
        }
        fn save(&mut self, _best: u32) -> Result<(), StoreError> {
            Err(StoreError::Unavailable("test".to_string()))
        }
    }

    fn session_with(best: u32) -> (Session, SharedStore) {
        let store = SharedStore(Rc::new(RefCell::new(MemoryStore::new(best))));
        (Session::new(7, Box::new(store.clone())), store)
    }

    fn crash(session: &mut Session) {
        session.state.grace_frames = 0;
        session.state.actor.y = 575.0;
        session.step();
        assert_eq!(session.run_state(), RunState::Ended);
    }

    #[test]
    fn test_loads_best_on_creation() {
        let (session, _) = session_with(11);
        assert_eq!(session.best_score(), 11);
        assert_eq!(session.run_state(), RunState::Idle);
    }

    #[test]
    fn test_load_failure_starts_from_zero() {
        let mut session = Session::new(1, Box::new(FailingStore));
        assert_eq!(session.best_score(), 0);

        // Save failures never disturb the run
        session.start().unwrap();
        session.state.score.current = 2;
        crash(&mut session);
        assert_eq!(session.best_score(), 2);
    }

    #[test]
    fn test_commands_ignored_in_wrong_state() {
        let (mut session, _) = session_with(0);
        session.command(Command::Jump).unwrap();
        session.command(Command::ReturnToMenu).unwrap();
        assert_eq!(session.run_state(), RunState::Idle);
        assert!(session.step().is_empty());
        assert_eq!(session.state().frame, 0);
    }

    #[test]
    fn test_jump_is_buffered_until_next_step() {
        let (mut session, _) = session_with(0);
        session.start().unwrap();
        for _ in 0..GRACE_FRAMES {
            session.step();
        }
        session.jump();
        assert_eq!(session.state().actor.vel, 0.0);
        let events = session.step();
        assert_eq!(events, vec![GameEvent::Jump]);
        assert!(session.state().actor.vel < 0.0);

        // Slot was consumed
        assert!(!session.step().contains(&GameEvent::Jump));
    }

    #[test]
    fn test_restart_from_ended_persists_best() {
        let (mut session, store) = session_with(5);
        session.start().unwrap();
        session.state.score.current = 7;
        crash(&mut session);
        assert_eq!(store.0.borrow().best(), 7);
        assert_eq!(store.0.borrow().saves, 1);

        session.command(Command::Start).unwrap();
        assert_eq!(session.run_state(), RunState::Running);
        assert_eq!(session.snapshot().score, 0);
        assert_eq!(session.best_score(), 7);
    }

    #[test]
    fn test_no_save_without_new_best() {
        let (mut session, store) = session_with(5);
        session.start().unwrap();
        session.state.score.current = 5;
        crash(&mut session);
        assert_eq!(store.0.borrow().saves, 0);
    }

    #[test]
    fn test_start_rejects_bad_config() {
        let (mut session, _) = session_with(0);
        session.resize(WorldBounds::new(800.0, 100.0));
        assert!(matches!(session.start(), Err(GameError::GapDoesNotFit { .. })));
        assert_eq!(session.run_state(), RunState::Idle);

        session.resize(WorldBounds::new(-5.0, 600.0));
        assert!(matches!(session.start(), Err(GameError::InvalidWorld { .. })));

        session.resize(WorldBounds::new(800.0, 600.0));
        assert!(session.start().is_ok());
        assert_eq!(session.run_state(), RunState::Running);
    }

    #[test]
    fn test_resize_mid_run_waits_for_next_start() {
        let (mut session, _) = session_with(0);
        session.start().unwrap();
        session.resize(WorldBounds::new(1200.0, 900.0));
        assert_eq!(session.snapshot().world.width, 800.0);

        crash(&mut session);
        session.start().unwrap();
        assert_eq!(session.snapshot().world.width, 1200.0);
        assert_eq!(session.state().actor.y, 450.0);
    }

    #[test]
    fn test_selection_only_while_idle() {
        let (mut session, _) = session_with(0);
        assert!(session.select_difficulty(6));
        assert!(!session.select_difficulty(99));
        assert!(session.select_character(Character::from_roster(3).unwrap()));

        session.start().unwrap();
        assert_eq!(session.snapshot().difficulty.name, "MAX");
        assert!(!session.select_difficulty(1));
        assert!(!session.select_character(Character::default()));

        crash(&mut session);
        assert!(!session.select_difficulty(1));
        session.return_to_menu();
        assert!(session.select_difficulty(1));
        assert_eq!(session.difficulty().id, 1);
    }

    #[test]
    fn test_apply_settings() {
        let (mut session, _) = session_with(0);
        let settings = Settings {
            difficulty: 5,
            autopilot: true,
            ..Default::default()
        };
        assert!(session.apply_settings(&settings));
        assert_eq!(session.difficulty().id, 5);
        assert!(session.autopilot);
    }

    #[test]
    fn test_listeners_receive_events() {
        let (mut session, _) = session_with(0);
        let seen: Rc<RefCell<Vec<GameEvent>>> = Rc::default();
        let sink = Rc::clone(&seen);
        session.add_listener(Box::new(move |event: &GameEvent| sink.borrow_mut().push(*event)));

        session.start().unwrap();
        crash(&mut session);

        let seen = seen.borrow();
        assert_eq!(seen[0], GameEvent::RunStarted { difficulty: 1 });
        assert!(seen.iter().any(|e| matches!(e, GameEvent::Collision { .. })));
        assert!(matches!(seen.last(), Some(GameEvent::RunEnded { .. })));
    }

    #[test]
    fn test_snapshot_reports_grace_and_obstacles() {
        let (mut session, _) = session_with(0);
        session.start().unwrap();
        let snap = session.snapshot();
        assert_eq!(snap.grace_frames, GRACE_FRAMES);
        assert_eq!(snap.actor.y, 300.0);
        assert!(snap.obstacles.is_empty());

        for _ in 0..=GRACE_FRAMES {
            session.step();
        }
        let snap = session.snapshot();
        assert_eq!(snap.grace_frames, 0);
        assert_eq!(snap.obstacles.len(), 1);
        let o = &snap.obstacles[0];
        assert_eq!(o.gap_bottom - o.gap_top, 250.0);
        assert_eq!(snap.speed, 3.0);
        assert!(serde_json::to_string(&snap).is_ok());
    }
}
