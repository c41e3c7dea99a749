//! Game state module - manages the complete game state
//!
//! Ties together the board, pieces, collision rules, the 7-bag queue and
//! scoring. Every player command and every gravity step goes through here;
//! the phase machine is:
//!
//! ```text
//! NotStarted --start--> Running <--pause/resume--> Paused
//!                          |
//!                   spawn/freeze fails
//!                          v
//!                       GameOver --start--> (reset) Running
//! ```
//!
//! Commands that change state queue [`GameEvent`]s; callers drain them with
//! [`GameState::take_events`] after each step.

use crate::board::Board;
use crate::collision::{attempt_wall_kick, collides, landing_row};
use crate::pieces::Tetromino;
use crate::rng::PieceQueue;
use crate::scoring::{
    calculate_drop_score, calculate_level, calculate_score, get_drop_interval_ms,
};
use crate::snapshot::{GameSnapshot, HoldSnapshot, PieceSnapshot};
use crate::types::{GameAction, GameEvent, GamePhase, PieceKind, BASE_DROP_MS, PREVIEW_LEN};

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    board: Board,
    active: Option<Tetromino>,
    /// Projection of `active` straight down; present exactly when `active` is `Some`
    ghost: Option<Tetromino>,
    hold: Option<PieceKind>,
    hold_used: bool,
    piece_queue: PieceQueue,
    phase: GamePhase,
    score: u32,
    level: u32,
    lines: u32,
    combo: u32,
    high_score: u32,
    drop_interval_ms: u32,
    /// Time accumulated toward the next gravity step
    drop_counter_ms: u32,
    events: Vec<GameEvent>,
}

impl GameState {
    /// Create a new game with the given RNG seed
    pub fn new(seed: u64) -> Self {
        Self::with_queue(Board::new(), PieceQueue::new(seed))
    }

    /// Create a game over a pre-filled board
    pub fn with_board(seed: u64, board: Board) -> Self {
        Self::with_queue(board, PieceQueue::new(seed))
    }

    /// Create a game from an explicit board and piece queue
    pub fn with_queue(board: Board, piece_queue: PieceQueue) -> Self {
        Self {
            board,
            active: None,
            ghost: None,
            hold: None,
            hold_used: false,
            piece_queue,
            phase: GamePhase::NotStarted,
            score: 0,
            level: 1,
            lines: 0,
            combo: 0,
            high_score: 0,
            drop_interval_ms: BASE_DROP_MS,
            drop_counter_ms: 0,
            events: Vec::new(),
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn started(&self) -> bool {
        self.phase != GamePhase::NotStarted
    }

    pub fn running(&self) -> bool {
        self.phase == GamePhase::Running
    }

    pub fn paused(&self) -> bool {
        self.phase == GamePhase::Paused
    }

    pub fn game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    pub fn can_hold(&self) -> bool {
        self.running() && !self.hold_used && self.active.is_some()
    }

    pub fn hold_used(&self) -> bool {
        self.hold_used
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn combo(&self) -> u32 {
        self.combo
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    /// Seed the best score, typically from a persisted value at startup.
    ///
    /// Never lowers the current value and does not emit an event.
    pub fn set_high_score(&mut self, value: u32) {
        self.high_score = self.high_score.max(value);
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.drop_interval_ms
    }

    pub fn drop_counter_ms(&self) -> u32 {
        self.drop_counter_ms
    }

    pub fn hold_piece(&self) -> Option<PieceKind> {
        self.hold
    }

    pub fn next_queue(&self) -> [PieceKind; PREVIEW_LEN] {
        self.piece_queue.preview::<PREVIEW_LEN>()
    }

    pub fn active(&self) -> Option<Tetromino> {
        self.active
    }

    pub fn ghost(&self) -> Option<Tetromino> {
        self.ghost
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn seed(&self) -> u64 {
        self.piece_queue.seed()
    }

    #[cfg(test)]
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Events queued since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take and clear the queued events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.board.write_u8_grid(&mut out.board);

        out.active = self.active.map(PieceSnapshot::from);
        out.ghost = self.ghost.map(PieceSnapshot::from);
        out.hold = self.hold.map(HoldSnapshot::from);
        out.next_queue = self.next_queue();
        out.hold_used = self.hold_used;
        out.phase = self.phase;
        out.running = self.running();
        out.paused = self.paused();
        out.game_over = self.game_over();
        out.seed = self.piece_queue.seed();
        out.score = self.score;
        out.level = self.level;
        out.lines = self.lines;
        out.combo = self.combo;
        out.high_score = self.high_score;
        out.drop_interval_ms = self.drop_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Start a game.
    ///
    /// From `NotStarted` this spawns the first piece, from `GameOver` it
    /// resets first, and from `Paused` it resumes. Returns false while running.
    pub fn start(&mut self) -> bool {
        match self.phase {
            GamePhase::Running => false,
            GamePhase::Paused => self.resume(),
            GamePhase::GameOver => {
                self.reset();
                self.begin()
            }
            GamePhase::NotStarted => self.begin(),
        }
    }

    fn begin(&mut self) -> bool {
        log::info!("game started (seed {})", self.piece_queue.seed());
        self.emit(GameEvent::GameStarted);
        self.spawn_piece();
        true
    }

    /// Return to a fresh `NotStarted` game, keeping the best score
    pub fn reset(&mut self) {
        self.board.clear();
        self.piece_queue.clear();
        self.active = None;
        self.ghost = None;
        self.hold = None;
        self.hold_used = false;
        self.phase = GamePhase::NotStarted;
        self.score = 0;
        self.level = 1;
        self.lines = 0;
        self.combo = 0;
        self.drop_interval_ms = BASE_DROP_MS;
        self.drop_counter_ms = 0;
        log::debug!("game reset");
    }

    /// Spawn the next piece from the queue.
    ///
    /// Only fills an empty slot; returns false while a piece is in play.
    /// Ends the game if the spawn position is already blocked.
    pub fn spawn_piece(&mut self) -> bool {
        if self.game_over() || self.active.is_some() {
            return false;
        }

        let kind = self.piece_queue.draw();
        self.hold_used = false;
        if !self.enter_play(Tetromino::spawn(kind)) {
            return false;
        }

        if self.phase == GamePhase::NotStarted {
            self.phase = GamePhase::Running;
        }
        log::debug!("spawned {kind:?}");
        true
    }

    /// Place a freshly spawned piece, or end the game if it does not fit
    fn enter_play(&mut self, piece: Tetromino) -> bool {
        if collides(&piece, &self.board) {
            log::info!("{:?} blocked at spawn", piece.kind);
            self.end_game();
            return false;
        }
        self.set_active(piece);
        true
    }

    fn set_active(&mut self, piece: Tetromino) {
        self.ghost = Some(Tetromino {
            y: landing_row(&piece, &self.board),
            ..piece
        });
        self.active = Some(piece);
    }

    fn end_game(&mut self) {
        self.phase = GamePhase::GameOver;
        self.active = None;
        self.ghost = None;
        self.drop_counter_ms = 0;
        log::info!(
            "game over: score {} level {} lines {}",
            self.score,
            self.level,
            self.lines
        );
        self.emit(GameEvent::GameOver { score: self.score });
    }

    fn add_score(&mut self, points: u32) {
        if points == 0 {
            return;
        }
        self.score = self.score.saturating_add(points);
        if self.score > self.high_score {
            self.high_score = self.score;
            // One queued event per drain, carrying the latest best
            let best = self.high_score;
            let queued = self.events.iter_mut().find_map(|event| match event {
                GameEvent::HighScore { score } => Some(score),
                _ => None,
            });
            match queued {
                Some(score) => *score = best,
                None => self.emit(GameEvent::HighScore { score: best }),
            }
        }
    }

    /// Try to move the active piece
    pub(crate) fn try_move(&mut self, dx: i8, dy: i8) -> bool {
        if !self.running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let moved = active.shifted(dx, dy);
        if collides(&moved, &self.board) {
            return false;
        }
        self.set_active(moved);
        true
    }

    pub fn move_left(&mut self) -> bool {
        self.shift_horizontal(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.shift_horizontal(1)
    }

    fn shift_horizontal(&mut self, dx: i8) -> bool {
        let moved = self.try_move(dx, 0);
        if moved {
            self.emit(GameEvent::PieceMoved);
        }
        moved
    }

    /// Move down one row for a point, or freeze the piece where it is.
    ///
    /// Also used for gravity. Restarts the drop counter either way.
    pub fn soft_drop(&mut self) -> bool {
        if !self.running() || self.active.is_none() {
            return false;
        }

        self.drop_counter_ms = 0;
        if self.try_move(0, 1) {
            self.add_score(calculate_drop_score(1, false));
        } else {
            self.freeze();
        }
        true
    }

    /// Drop straight to the landing row and freeze immediately
    pub fn hard_drop(&mut self) -> bool {
        if !self.running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let target = landing_row(&active, &self.board);
        let rows = (target - active.y).max(0) as u32;
        self.active = Some(Tetromino { y: target, ..active });

        self.emit(GameEvent::HardDropped { rows });
        self.add_score(calculate_drop_score(rows, true));
        self.drop_counter_ms = 0;
        self.freeze();
        true
    }

    /// Rotate clockwise, trying the kick offsets in order
    pub fn rotate(&mut self) -> bool {
        if !self.running() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        match attempt_wall_kick(&active.rotated_cw(), &self.board) {
            Some(kicked) => {
                self.set_active(kicked);
                self.emit(GameEvent::PieceRotated);
                true
            }
            None => false,
        }
    }

    /// Swap the active piece into the hold slot, once per spawned piece.
    ///
    /// With an empty slot the next queued piece takes over; otherwise the held
    /// kind re-enters at its spawn position and rotation.
    pub fn hold(&mut self) -> bool {
        if !self.can_hold() {
            return false;
        }
        let Some(active) = self.active else {
            return false;
        };

        let incoming = match self.hold.replace(active.kind) {
            Some(held) => held,
            None => self.piece_queue.draw(),
        };
        self.active = None;
        self.ghost = None;
        self.hold_used = true;
        self.emit(GameEvent::HoldUsed);
        log::debug!("held {:?}, {incoming:?} enters", active.kind);

        self.enter_play(Tetromino::spawn(incoming));
        true
    }

    pub fn pause(&mut self) -> bool {
        if !self.running() {
            return false;
        }
        self.phase = GamePhase::Paused;
        self.emit(GameEvent::GamePaused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if !self.paused() {
            return false;
        }
        self.phase = GamePhase::Running;
        self.emit(GameEvent::GameResumed);
        true
    }

    pub fn toggle_pause(&mut self) -> bool {
        match self.phase {
            GamePhase::Running => self.pause(),
            GamePhase::Paused => self.resume(),
            _ => false,
        }
    }

    /// Write the active piece into the board, clear rows, score and spawn.
    ///
    /// A piece with any cell above the top edge ends the game without
    /// touching the board.
    pub fn freeze(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        self.ghost = None;

        let blocks = active.blocks();
        if blocks.iter().any(|&(_, y)| y < 0) {
            log::info!("{:?} locked above the board", active.kind);
            self.end_game();
            return;
        }

        for &(x, y) in &blocks {
            self.board.set(x, y, Some(active.kind));
        }
        self.emit(GameEvent::PieceLocked);

        let cleared = self.board.clear_full_rows();
        self.apply_line_clear(cleared);
        self.spawn_piece();
    }

    fn apply_line_clear(&mut self, cleared: usize) {
        // Scored at the level in effect before these rows count
        let result = calculate_score(cleared, self.level, self.combo);
        self.combo = result.combo;
        if cleared == 0 {
            return;
        }

        self.lines += cleared as u32;
        self.emit(GameEvent::LinesCleared {
            count: cleared as u32,
        });
        log::debug!(
            "cleared {cleared} rows: {} + combo {} ({})",
            result.line_clear_score,
            result.combo_bonus,
            self.combo
        );
        self.add_score(result.total);

        let level = calculate_level(self.lines);
        if level > self.level {
            self.level = level;
            self.drop_interval_ms = get_drop_interval_ms(level);
            log::info!("level {level}, drop interval {}ms", self.drop_interval_ms);
            self.emit(GameEvent::LevelUp { level });
        }
    }

    /// Advance gravity by `elapsed_ms`.
    ///
    /// Performs at most one soft-drop step, once the accumulated time strictly
    /// exceeds the drop interval. Returns true if a step ran.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if !self.running() || self.active.is_none() {
            return false;
        }

        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms > self.drop_interval_ms {
            return self.soft_drop();
        }
        false
    }

    /// Apply a game action
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop(),
            GameAction::Rotate => self.rotate(),
            GameAction::Hold => self.hold(),
            GameAction::Pause => self.pause(),
            GameAction::Resume => self.resume(),
            GameAction::TogglePause => self.toggle_pause(),
            GameAction::Start => self.start(),
            GameAction::Reset => {
                self.reset();
                true
            }
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
