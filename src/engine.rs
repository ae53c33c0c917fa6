//! Grid state and the fixed-step update that drives it.
//!
//! The engine never touches the terminal. The shell feeds it ticks and
//! input, then draws whatever [`GameEngine::snapshot`] returns.

use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::{debug, info, trace};

use crate::config::GameConfig;
use crate::snake::{Cell, Direction, GridInt, Snake};

pub const FOOD_SCORE: u32 = 10;
pub const INITIAL_DIRECTION: Direction = Direction::Up;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Phase {
    Ready,
    Running,
    GameOver,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EndReason {
    Wall,
    SelfHit,
    /// The snake covers every cell, so there is nowhere left for food.
    BoardFull,
}

impl EndReason {
    pub fn message(self) -> &'static str {
        match self {
            EndReason::Wall => "Game Over! You hit the wall.",
            EndReason::SelfHit => "Game Over! You hit yourself.",
            EndReason::BoardFull => "You filled the board!",
        }
    }
}

/// Transient message for the player, emitted by a tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Notice {
    FoodEaten,
    GameOver(EndReason),
}

impl Notice {
    pub fn message(self) -> &'static str {
        match self {
            Notice::FoodEaten => "Yum!",
            Notice::GameOver(reason) => reason.message(),
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not running, nothing happened
    Idle,
    Moved,
    Ate,
    Ended(EndReason),
}

impl TickOutcome {
    pub fn notice(self) -> Option<Notice> {
        match self {
            TickOutcome::Idle | TickOutcome::Moved => None,
            TickOutcome::Ate => Some(Notice::FoodEaten),
            TickOutcome::Ended(reason) => Some(Notice::GameOver(reason)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub snake: Snake,
    pub food: Cell,
    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub is_game_over: bool,
    pub is_paused: bool,
    pub end_reason: Option<EndReason>,
}

impl GameState {
    fn initial(grid_size: GridInt, high_score: u32) -> Self {
        GameState {
            snake: initial_snake(grid_size),
            food: Cell::new(grid_size / 4, grid_size / 4),
            direction: INITIAL_DIRECTION,
            score: 0,
            high_score,
            is_game_over: false,
            is_paused: true,
            end_reason: None,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.is_game_over {
            Phase::GameOver
        } else if self.is_paused {
            Phase::Ready
        } else {
            Phase::Running
        }
    }
}

fn initial_snake(grid_size: GridInt) -> Snake {
    let mid = grid_size / 2;
    Snake::from_cells((0..3).map(|i| Cell::new(mid, mid + i)))
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CellKind {
    Empty,
    Head,
    Body,
    Food,
}

/// Everything a renderer needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub grid_size: GridInt,
    pub snake: Vec<Cell>,
    pub food: Cell,
    pub direction: Direction,
    pub score: u32,
    pub high_score: u32,
    pub phase: Phase,
    pub end_reason: Option<EndReason>,
}

impl Snapshot {
    pub fn cell_kind(&self, cell: Cell) -> CellKind {
        match self.snake.iter().position(|c| *c == cell) {
            Some(0) => CellKind::Head,
            Some(_) => CellKind::Body,
            None if cell == self.food => CellKind::Food,
            None => CellKind::Empty,
        }
    }
}

pub struct GameEngine<R = StdRng> {
    grid_size: GridInt,
    state: GameState,
    rng: R,
}

impl GameEngine<StdRng> {
    pub fn new(config: &GameConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        GameEngine::with_rng(config.grid_size, rng)
    }
}

impl<R: Rng> GameEngine<R> {
    pub fn with_rng(grid_size: GridInt, rng: R) -> Self {
        GameEngine { grid_size, state: GameState::initial(grid_size, 0), rng }
    }

    pub fn phase(&self) -> Phase {
        self.state.phase()
    }

    pub fn is_running(&self) -> bool {
        self.phase() == Phase::Running
    }

    /// Ready -> Running. Returns whether the phase changed.
    pub fn start(&mut self) -> bool {
        if self.phase() != Phase::Ready {
            return false;
        }

        self.state.is_paused = false;
        info!(score = self.state.score, "game running");
        true
    }

    /// Running <-> Ready. No effect once the game is over.
    pub fn toggle_pause(&mut self) -> bool {
        match self.phase() {
            Phase::Running => {
                self.state.is_paused = true;
                info!("game paused");
                true
            }
            Phase::Ready => self.start(),
            Phase::GameOver => false,
        }
    }

    /// Fresh snake, direction, food and score, straight into Running.
    /// The high score survives.
    pub fn reset(&mut self) {
        let mut state = GameState::initial(self.grid_size, self.state.high_score);
        state.is_paused = false;
        self.state = state;

        if let Some(food) = self.spawn_food() {
            self.state.food = food;
        }

        info!(high_score = self.state.high_score, "game reset");
    }

    /// Applies immediately; the next tick moves that way. Reversals are
    /// refused.
    pub fn change_direction(&mut self, direction: Direction) -> bool {
        if direction == self.state.direction.opposite() {
            trace!(?direction, current = ?self.state.direction, "reversal ignored");
            return false;
        }

        self.state.direction = direction;
        true
    }

    pub fn tick(&mut self) -> TickOutcome {
        if !self.is_running() {
            return TickOutcome::Idle;
        }

        let new_head = self.state.snake.head().step(self.state.direction);

        if !new_head.in_bounds(self.grid_size) {
            return self.end(EndReason::Wall);
        }

        if self.state.snake.occupies(new_head) {
            return self.end(EndReason::SelfHit);
        }

        self.state.snake.push_head(new_head);

        if new_head != self.state.food {
            self.state.snake.pop_tail();
            return TickOutcome::Moved;
        }

        self.state.score += FOOD_SCORE;
        if self.state.score > self.state.high_score {
            self.state.high_score = self.state.score;
        }
        debug!(score = self.state.score, len = self.state.snake.len(), "food eaten");

        match self.spawn_food() {
            Some(food) => {
                self.state.food = food;
                TickOutcome::Ate
            }
            None => self.end(EndReason::BoardFull),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            grid_size: self.grid_size,
            snake: self.state.snake.cells().collect(),
            food: self.state.food,
            direction: self.state.direction,
            score: self.state.score,
            high_score: self.state.high_score,
            phase: self.phase(),
            end_reason: self.state.end_reason,
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn end(&mut self, reason: EndReason) -> TickOutcome {
        self.state.is_game_over = true;
        self.state.end_reason = Some(reason);
        info!(?reason, score = self.state.score, high_score = self.state.high_score, "game over");
        TickOutcome::Ended(reason)
    }

    // Rejection sampling: draw uniformly until the cell is free.
    // None when the snake already covers the whole board.
    fn spawn_food(&mut self) -> Option<Cell> {
        let cells = (self.grid_size * self.grid_size) as usize;
        if self.state.snake.len() >= cells {
            return None;
        }

        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let candidate = Cell::new(
                self.rng.gen_range(0..self.grid_size),
                self.rng.gen_range(0..self.grid_size),
            );

            if !self.state.snake.occupies(candidate) {
                trace!(attempts, "food placement sampled");
                debug!(x = candidate.x, y = candidate.y, "new food");
                return Some(candidate);
            }
        }
    }
}
