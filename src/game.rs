use std::{thread::sleep, time::{Duration, Instant}};

use crate::{Coords, TermInt};
use crate::config::GameConfig;
use crate::engine::{CellKind, Notice, Phase, Snapshot};
use crate::input::{self, KeyAction};
use crate::session::{Overlay, Session};
use crate::snake::Cell;
use crate::term::TermManager;

use anyhow::{bail, Result};
use tracing::{info, trace};

const POLL_INTERVAL_MS: u64 = 5;

const SNAKE_BODY_CHAR: char = '█';
const FOOD_CHAR: char = 'O';
const DEAD_SNAKE_CHAR: char = 'X';
const EMPTY_CHAR: char = '.';

/// Where the board sits on screen. Each cell is two columns wide to make
/// up for terminal characters being taller than they are wide.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct Layout {
    grid_size: TermInt,
    top_left: Coords,
}

impl Layout {
    // border + status line above + notice and help lines below
    fn required_size(grid_size: TermInt) -> Coords {
        (grid_size * 2 + 2, grid_size + 5)
    }

    fn centered(grid_size: TermInt, term_size: Coords) -> Option<Self> {
        let (need_w, need_h) = Layout::required_size(grid_size);
        if term_size.0 < need_w || term_size.1 < need_h {
            return None;
        }

        let top_left = ((term_size.0 - need_w) / 2, (term_size.1 - need_h) / 2);
        Some(Layout { grid_size, top_left })
    }

    fn status_row(&self) -> Coords {
        self.top_left
    }

    fn border_top_left(&self) -> Coords {
        (self.top_left.0, self.top_left.1 + 1)
    }

    fn border_size(&self) -> Coords {
        (self.grid_size * 2 + 2, self.grid_size + 2)
    }

    fn cell_pos(&self, cell: Cell) -> Coords {
        let (x0, y0) = self.border_top_left();
        (x0 + 1 + cell.x as TermInt * 2, y0 + 1 + cell.y as TermInt)
    }

    fn notice_row(&self) -> Coords {
        (self.top_left.0, self.top_left.1 + self.grid_size + 3)
    }

    fn help_row(&self) -> Coords {
        (self.top_left.0, self.top_left.1 + self.grid_size + 4)
    }

    fn width(&self) -> TermInt {
        self.border_size().0
    }
}

pub struct SnakeGame {
    session: Session,
    term: TermManager,
    layout: Layout,
}

impl SnakeGame {
    pub fn new(config: &GameConfig) -> Result<Self> {
        let term = TermManager::new()?;
        let term_size = term.get_terminal_size();
        let grid_size = config.grid_size as TermInt;

        let Some(layout) = Layout::centered(grid_size, term_size) else {
            let (w, h) = Layout::required_size(grid_size);
            bail!(
                "terminal is {}x{}, a {}-cell board needs at least {}x{}",
                term_size.0, term_size.1, grid_size, w, h
            );
        };

        Ok(SnakeGame { session: Session::new(config), term, layout })
    }

    /// Plays until the player quits. The terminal is restored even when the
    /// loop fails.
    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let res = self.play();
        let restored = self.term.restore();
        res.and(restored)
    }

    ///////////////////////////////////////////////////////////////////////////

    fn play(&mut self) -> Result<()> {
        self.term.clear()?;
        self.term.draw_borders(self.layout.border_top_left(), self.layout.border_size())?;

        loop {
            sleep(Duration::from_millis(POLL_INTERVAL_MS));

            for key_ev in self.term.read_key_events_queue()? {
                match input::map_key(&key_ev) {
                    KeyAction::Quit => {
                        info!("quit requested");
                        return Ok(());
                    }
                    action => self.session.apply(action),
                }
            }

            self.session.advance(Instant::now());

            if self.session.take_dirty() {
                self.render()?;
            }
        }
    }

    fn render(&mut self) -> Result<()> {
        let snap = self.session.snapshot();
        self.term.hide_message()?;

        self.draw_board(&snap)?;

        let width = self.layout.width();
        let status = format!("Score: {}   Best: {}", snap.score, snap.high_score);
        self.term.print_line(self.layout.status_row(), &status, width)?;

        let notice = self.session.notice().map(Notice::message).unwrap_or("");
        self.term.print_line(self.layout.notice_row(), notice, width)?;
        self.term.print_line(self.layout.help_row(), "Arrows/WASD move, Esc pause, q quit", width)?;

        match self.session.overlay() {
            None => {}
            Some(Overlay::Ready) => self.term.show_message(&[
                "READY?",
                "",
                "Enter or Space to start",
            ])?,
            Some(Overlay::Paused) => self.term.show_message(&[
                "Paused",
                "",
                "Esc or Enter to resume",
            ])?,
            Some(Overlay::GameOver) => {
                let reason = snap.end_reason.map(|r| r.message()).unwrap_or("");
                let score_line = format!("Final Score: {}", snap.score);
                self.term.show_message(&[
                    "GAME OVER",
                    reason,
                    &score_line,
                    "",
                    "Enter or r to try again",
                ])?
            }
        }

        self.term.flush()
    }

    fn draw_board(&mut self, snap: &Snapshot) -> Result<()> {
        let dead = snap.phase == Phase::GameOver;

        for y in 0..snap.grid_size {
            for x in 0..snap.grid_size {
                let cell = Cell::new(x, y);
                let glyph = cell_glyph(snap, cell, dead);
                let (col, row) = self.layout.cell_pos(cell);
                self.term.print_at((col, row), glyph[0])?;
                self.term.print_at((col + 1, row), glyph[1])?;
            }
        }

        trace!(len = snap.snake.len(), phase = ?snap.phase, "frame drawn");
        Ok(())
    }
}

fn cell_glyph(snap: &Snapshot, cell: Cell, dead: bool) -> [char; 2] {
    match snap.cell_kind(cell) {
        CellKind::Head | CellKind::Body if dead => [DEAD_SNAKE_CHAR, DEAD_SNAKE_CHAR],
        CellKind::Head => [snap.direction.head_char(), ' '],
        CellKind::Body => [SNAKE_BODY_CHAR, SNAKE_BODY_CHAR],
        CellKind::Food => [FOOD_CHAR, ' '],
        CellKind::Empty => [EMPTY_CHAR, ' '],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::EndReason;
    use crate::snake::Direction;

    fn snapshot(phase: Phase) -> Snapshot {
        Snapshot {
            grid_size: 20,
            snake: vec![Cell::new(10, 10), Cell::new(10, 11)],
            food: Cell::new(5, 5),
            direction: Direction::Left,
            score: 0,
            high_score: 0,
            phase,
            end_reason: (phase == Phase::GameOver).then_some(EndReason::Wall),
        }
    }

    #[test]
    fn layout_centers_the_board() {
        let layout = Layout::centered(20, (80, 30)).unwrap();
        assert_eq!(Layout::required_size(20), (42, 25));
        assert_eq!(layout.top_left, (19, 2));
        assert_eq!(layout.border_top_left(), (19, 3));
        assert_eq!(layout.cell_pos(Cell::new(0, 0)), (20, 4));
        assert_eq!(layout.cell_pos(Cell::new(19, 19)), (58, 23));
        assert_eq!(layout.help_row(), (19, 26));
    }

    #[test]
    fn small_terminals_are_refused() {
        assert!(Layout::centered(20, (41, 30)).is_none());
        assert!(Layout::centered(20, (80, 24)).is_none());
        assert!(Layout::centered(20, (42, 25)).is_some());
    }

    #[test]
    fn glyphs_show_head_body_and_food() {
        let snap = snapshot(Phase::Running);
        assert_eq!(cell_glyph(&snap, Cell::new(10, 10), false), ['<', ' ']);
        assert_eq!(cell_glyph(&snap, Cell::new(10, 11), false), ['█', '█']);
        assert_eq!(cell_glyph(&snap, Cell::new(5, 5), false), ['O', ' ']);
        assert_eq!(cell_glyph(&snap, Cell::new(0, 0), false), ['.', ' ']);
    }

    #[test]
    fn dead_snake_is_crossed_out() {
        let snap = snapshot(Phase::GameOver);
        assert_eq!(cell_glyph(&snap, Cell::new(10, 10), true), ['X', 'X']);
        assert_eq!(cell_glyph(&snap, Cell::new(10, 11), true), ['X', 'X']);
        assert_eq!(cell_glyph(&snap, Cell::new(5, 5), true), ['O', ' ']);
    }
}
