use std::time::{Duration, Instant};

use crate::config::GameConfig;
use crate::engine::{GameEngine, Notice, Phase, Snapshot};
use crate::input::KeyAction;
use crate::ticker::Ticker;

pub const NOTICE_TTL: Duration = Duration::from_millis(1500);

/// Box drawn over the board when the game isn't running.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Overlay {
    /// Before the first start
    Ready,
    Paused,
    GameOver,
}

/// One play session: the engine plus its timer and the latest notice.
/// Knows nothing about the terminal.
pub struct Session {
    engine: GameEngine,
    ticker: Ticker,
    notice: Option<(Notice, Instant)>,
    has_started: bool,
    dirty: bool,
}

impl Session {
    pub fn new(config: &GameConfig) -> Self {
        Session {
            engine: GameEngine::new(config),
            ticker: Ticker::new(config.tick_interval),
            notice: None,
            has_started: false,
            dirty: true,
        }
    }

    pub fn apply(&mut self, action: KeyAction) {
        let changed = match action {
            KeyAction::Turn(dir) => self.engine.change_direction(dir),
            KeyAction::Primary => match self.engine.phase() {
                Phase::Ready => self.engine.start(),
                Phase::GameOver => self.restart(),
                Phase::Running => false,
            },
            KeyAction::Pause => self.engine.toggle_pause(),
            KeyAction::Reset if self.engine.phase() == Phase::GameOver => self.restart(),
            KeyAction::Reset | KeyAction::Quit | KeyAction::None => false,
        };

        if changed {
            self.has_started |= self.engine.is_running();
            self.dirty = true;
        }
    }

    /// Fires a due tick and expires a stale notice.
    pub fn advance(&mut self, now: Instant) {
        self.ticker.sync(self.engine.is_running(), now);

        if self.ticker.fire(now) {
            let outcome = self.engine.tick();
            if let Some(notice) = outcome.notice() {
                self.notice = Some((notice, now));
            }
            // Game over clears the timer before the next poll
            self.ticker.sync(self.engine.is_running(), now);
            self.dirty = true;
        }

        if matches!(self.notice, Some((_, at)) if now.duration_since(at) >= NOTICE_TTL) {
            self.notice = None;
            self.dirty = true;
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice.map(|(notice, _)| notice)
    }

    pub fn overlay(&self) -> Option<Overlay> {
        match self.engine.phase() {
            Phase::Running => None,
            Phase::Ready if !self.has_started => Some(Overlay::Ready),
            Phase::Ready => Some(Overlay::Paused),
            Phase::GameOver => Some(Overlay::GameOver),
        }
    }

    /// True once after anything visible changed.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn restart(&mut self) -> bool {
        self.engine.reset();
        self.notice = None;
        true
    }
}
