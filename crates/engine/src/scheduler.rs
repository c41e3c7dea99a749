//! Frame driver
//!
//! [`GameDriver`] sits between a display-refresh callback and the game. Each
//! [`GameDriver::frame`] call measures the time since the previous frame and
//! feeds it to [`GameState::tick`]. Player commands go through
//! [`GameDriver::apply`] so that queued events reach the sink in order.
//!
//! The schedule exists only while a game is running or paused. Reset and game
//! over cancel it; the next start re-arms it from the current clock reading.

use crate::clock::Clock;
use crate::core::{GameSnapshot, GameState};
use crate::events::EventSink;
use crate::highscore::{HighScoreStore, MemoryHighScoreStore};
use crate::types::{GameAction, GameEvent, GamePhase};

pub struct GameDriver<C, S> {
    game: GameState,
    clock: C,
    sink: S,
    store: Box<dyn HighScoreStore>,
    /// Timestamp of the previous frame; `None` while no game is scheduled
    last_frame_ms: Option<u64>,
    saved_high_score: u32,
}

impl<C: Clock, S: EventSink> GameDriver<C, S> {
    /// Driver with an in-memory high score
    pub fn new(game: GameState, clock: C, sink: S) -> Self {
        Self::with_store(game, clock, sink, Box::new(MemoryHighScoreStore::default()))
    }

    /// Driver that seeds and persists the best score through `store`.
    ///
    /// A store that fails to load is logged and treated as empty.
    pub fn with_store(
        mut game: GameState,
        clock: C,
        sink: S,
        mut store: Box<dyn HighScoreStore>,
    ) -> Self {
        let saved_high_score = match store.load() {
            Ok(score) => score,
            Err(err) => {
                log::warn!("could not load high score: {err:#}");
                0
            }
        };
        game.set_high_score(saved_high_score);

        let mut driver = Self {
            game,
            clock,
            sink,
            store,
            last_frame_ms: None,
            saved_high_score,
        };
        driver.sync_schedule();
        driver
    }

    pub fn game(&self) -> &GameState {
        &self.game
    }

    pub fn snapshot(&self) -> GameSnapshot {
        self.game.snapshot()
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    /// Whether frames currently reach the game
    pub fn scheduled(&self) -> bool {
        self.last_frame_ms.is_some()
    }

    pub fn start(&mut self) -> bool {
        self.apply(GameAction::Start)
    }

    /// Apply a player command and forward the resulting events
    pub fn apply(&mut self, action: GameAction) -> bool {
        let changed = self.game.apply_action(action);
        log::trace!("{} -> {changed}", action.as_str());
        self.sync_schedule();
        self.flush_events();
        changed
    }

    /// Display-refresh callback.
    ///
    /// Returns true if gravity moved or froze the piece. At most one drop
    /// happens per frame. Paused frames only advance the timestamp.
    pub fn frame(&mut self) -> bool {
        let Some(last) = self.last_frame_ms else {
            return false;
        };
        let now = self.clock.now_ms();
        self.last_frame_ms = Some(now);
        if !self.game.running() {
            return false;
        }

        let elapsed = u32::try_from(now.saturating_sub(last)).unwrap_or(u32::MAX);
        log::trace!("frame +{elapsed}ms");
        let dropped = self.game.tick(elapsed);
        self.sync_schedule();
        self.flush_events();
        dropped
    }

    fn sync_schedule(&mut self) {
        match self.game.phase() {
            GamePhase::Running | GamePhase::Paused => {
                if self.last_frame_ms.is_none() {
                    self.last_frame_ms = Some(self.clock.now_ms());
                }
            }
            GamePhase::NotStarted | GamePhase::GameOver => {
                if self.last_frame_ms.take().is_some() {
                    log::debug!("frame schedule cancelled");
                }
            }
        }
    }

    fn flush_events(&mut self) {
        for event in self.game.take_events() {
            if let GameEvent::HighScore { score } = event {
                self.persist_high_score(score);
            }
            self.sink.on_event(&event);
        }
    }

    fn persist_high_score(&mut self, score: u32) {
        if score <= self.saved_high_score {
            return;
        }
        match self.store.save(score) {
            Ok(()) => self.saved_high_score = score,
            Err(err) => log::warn!("could not save high score {score}: {err:#}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::core::Board;
    use crate::types::PieceKind;
    use anyhow::{anyhow, Result};

    type TestDriver = GameDriver<ManualClock, Vec<GameEvent>>;

    fn driver(seed: u64) -> (TestDriver, ManualClock) {
        let clock = ManualClock::new();
        let driver = GameDriver::new(
            GameState::new(seed),
            clock.clone(),
            Vec::<GameEvent>::new(),
        );
        (driver, clock)
    }

    fn active_y(driver: &TestDriver) -> i8 {
        driver.game().active().map(|p| p.y).unwrap_or(i8::MIN)
    }

    struct BrokenStore;

    impl HighScoreStore for BrokenStore {
        fn load(&mut self) -> Result<u32> {
            Err(anyhow!("disk on fire"))
        }

        fn save(&mut self, _score: u32) -> Result<()> {
            Err(anyhow!("disk on fire"))
        }
    }

    #[test]
    fn test_frames_ignored_before_start() {
        let (mut driver, clock) = driver(1);
        assert!(!driver.scheduled());
        clock.advance(5000);
        assert!(!driver.frame());
        assert!(driver.sink().is_empty());
    }

    #[test]
    fn test_frame_drops_once_past_interval() {
        let (mut driver, clock) = driver(1);
        assert!(driver.start());
        assert!(driver.scheduled());
        let y = active_y(&driver);

        clock.advance(1000);
        assert!(!driver.frame());
        clock.advance(16);
        assert!(driver.frame());
        assert_eq!(active_y(&driver), y + 1);

        clock.advance(60_000);
        assert!(driver.frame());
        assert_eq!(active_y(&driver), y + 2);
    }

    #[test]
    fn test_paused_time_is_not_delivered() {
        let (mut driver, clock) = driver(1);
        driver.start();
        let y = active_y(&driver);

        clock.advance(900);
        driver.frame();
        assert!(driver.apply(GameAction::Pause));
        clock.advance(10_000);
        assert!(!driver.frame());
        assert!(driver.apply(GameAction::Resume));

        clock.advance(16);
        assert!(!driver.frame());
        assert_eq!(active_y(&driver), y);
        assert_eq!(driver.game().drop_counter_ms(), 916);
    }

    #[test]
    fn test_reset_cancels_schedule() {
        let (mut driver, clock) = driver(1);
        driver.start();
        driver.apply(GameAction::Reset);
        assert!(!driver.scheduled());
        clock.advance(5000);
        assert!(!driver.frame());

        // Starting again re-arms from the current time
        driver.start();
        clock.advance(16);
        assert!(!driver.frame());
        assert_eq!(driver.game().drop_counter_ms(), 16);
    }

    #[test]
    fn test_game_over_cancels_schedule() {
        let mut board = Board::new();
        for x in 0..10 {
            board.set(x, 1, Some(PieceKind::S));
        }
        let clock = ManualClock::new();
        let mut driver = GameDriver::new(
            GameState::with_board(1, board),
            clock,
            Vec::<GameEvent>::new(),
        );

        assert!(driver.start());
        assert!(driver.game().game_over());
        assert!(!driver.scheduled());
        assert_eq!(
            driver.sink().as_slice(),
            &[GameEvent::GameStarted, GameEvent::GameOver { score: 0 }]
        );
    }

    #[test]
    fn test_events_reach_sink_in_order() {
        let (mut driver, _clock) = driver(1);
        driver.start();
        driver.apply(GameAction::Pause);
        driver.apply(GameAction::Pause);
        driver.apply(GameAction::TogglePause);
        assert_eq!(
            driver.sink().as_slice(),
            &[
                GameEvent::GameStarted,
                GameEvent::GamePaused,
                GameEvent::GameResumed
            ]
        );
    }

    #[test]
    fn test_high_score_loaded_and_saved() {
        let store = MemoryHighScoreStore::new(1);
        let mut driver = GameDriver::with_store(
            GameState::new(1),
            ManualClock::new(),
            Vec::<GameEvent>::new(),
            Box::new(store.clone()),
        );
        assert_eq!(driver.game().high_score(), 1);

        driver.start();
        driver.apply(GameAction::SoftDrop);
        assert_eq!(store.get(), 1);
        driver.apply(GameAction::SoftDrop);
        assert_eq!(store.get(), 2);
        assert!(driver.sink().contains(&GameEvent::HighScore { score: 2 }));
    }

    #[test]
    fn test_broken_store_does_not_stop_play() {
        let mut driver = GameDriver::with_store(
            GameState::new(1),
            ManualClock::new(),
            Vec::<GameEvent>::new(),
            Box::new(BrokenStore),
        );
        assert_eq!(driver.game().high_score(), 0);
        assert!(driver.start());
        assert!(driver.apply(GameAction::SoftDrop));
        assert_eq!(driver.game().high_score(), 1);
    }
}
