//! crossterm frontend
//!
//! One value serves as both the input source and the draw sink. The field is
//! scaled onto the character grid; the top row is the HUD.

use std::io::{self, Stdout, Write};
use std::time::Duration;

use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseButton, MouseEventKind,
    },
    execute, queue,
    style::Print,
    terminal::{self, ClearType},
};

use crate::draw::{DrawSink, Frame};
use crate::input::{InputEvent, InputSource};
use crate::sim::{GamePhase, Rect};
use crate::tuning::Tuning;

const PLAYER_CELL: char = '@';
const OBSTACLE_CELL: char = '#';
const GROUND_CELL: char = '=';

/// Field geometry the renderer maps onto the grid
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub field_width: f32,
    pub field_height: f32,
    pub ground_line: f32,
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(tuning: &Tuning, cols: u16, rows: u16) -> Self {
        Self {
            field_width: tuning.field_width,
            field_height: tuning.field_height,
            ground_line: tuning.ground_line,
            cols,
            rows,
        }
    }

    /// Rows available for the field (HUD on top, ground below)
    fn field_rows(&self) -> usize {
        self.rows.saturating_sub(2) as usize
    }

    fn col_scale(&self) -> f32 {
        self.cols as f32 / self.field_width
    }

    fn row_scale(&self) -> f32 {
        self.field_rows() as f32 / self.field_height
    }

    /// Cell column containing `x`
    fn col(&self, x: f32) -> isize {
        (x * self.col_scale()).floor() as isize
    }

    /// Last cell column reached by a span ending at `x`
    fn col_end(&self, x: f32) -> isize {
        (x * self.col_scale()).ceil() as isize - 1
    }

    /// Grid row containing `y` (row 0 is the HUD)
    fn row(&self, y: f32) -> isize {
        1 + (y * self.row_scale()).floor() as isize
    }

    fn row_end(&self, y: f32) -> isize {
        (y * self.row_scale()).ceil() as isize
    }

    fn ground_row(&self) -> usize {
        (self.row(self.ground_line).max(1) as usize).min(self.rows as usize - 1)
    }

    /// Rasterize a frame into one string per terminal row
    pub fn render(&self, frame: &Frame) -> Vec<String> {
        let cols = self.cols as usize;
        let rows = self.rows as usize;
        if cols < 20 || rows < 5 {
            return vec!["terminal too small".to_string()];
        }

        let mut grid = vec![vec![' '; cols]; rows];
        for cell in grid[self.ground_row()].iter_mut() {
            *cell = GROUND_CELL;
        }
        for rect in &frame.obstacles {
            self.fill(&mut grid, rect, OBSTACLE_CELL);
        }
        self.fill(&mut grid, &frame.player, PLAYER_CELL);

        put_text(&mut grid[0], cols.saturating_sub(16), &format!("SCORE: {}", frame.score));
        put_text(&mut grid[0], 1, &format!("RUN {}", frame.session));

        if frame.phase == GamePhase::GameOver {
            let mid = rows / 2;
            put_centered(&mut grid[mid.saturating_sub(1)], "GAME OVER");
            put_centered(&mut grid[mid + 1], "Press SPACE or click to restart");
        }

        grid.into_iter().map(|row| row.into_iter().collect()).collect()
    }

    /// Fill cells covered by a rectangle, clipped to the field rows.
    /// Anything at least partly on screen occupies at least one cell.
    fn fill(&self, grid: &mut [Vec<char>], rect: &Rect, cell: char) {
        let last_col = self.cols as isize - 1;
        let last_row = self.ground_row() as isize - 1;

        let left = self.col(rect.left());
        let right = self.col_end(rect.right()).max(left);
        let top = self.row(rect.top());
        let bottom = self.row_end(rect.bottom()).max(top).min(last_row);

        for r in top.max(1)..=bottom {
            for c in left.max(0)..=right.min(last_col) {
                grid[r as usize][c as usize] = cell;
            }
        }
    }
}

fn put_text(row: &mut [char], start: usize, text: &str) {
    for (cell, ch) in row.iter_mut().skip(start).zip(text.chars()) {
        *cell = ch;
    }
}

fn put_centered(row: &mut [char], text: &str) {
    let start = row.len().saturating_sub(text.chars().count()) / 2;
    put_text(row, start, text);
}

fn map_key(key: KeyEvent) -> InputEvent {
    match key.code {
        KeyCode::Char(' ') | KeyCode::Up | KeyCode::Enter => InputEvent::PrimaryAction,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => InputEvent::Quit,
        KeyCode::Char('q') | KeyCode::Esc => InputEvent::Quit,
        other => InputEvent::Unrecognized(format!("key {:?}", other)),
    }
}

fn map_event(event: Event) -> Option<InputEvent> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => Some(map_key(key)),
        // Repeats and releases
        Event::Key(_) => None,
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            Some(InputEvent::PrimaryAction)
        }
        Event::Mouse(_) => None,
        // The screen picks up new dimensions when it draws
        Event::Resize(..) => None,
        other => Some(InputEvent::Unrecognized(format!("{:?}", other))),
    }
}

/// Raw-mode terminal session. Restores the terminal on drop.
///
/// Input and screen are separate fields so a loop can borrow both at once.
pub struct Terminal {
    pub input: TerminalInput,
    pub screen: TerminalScreen,
}

impl Terminal {
    pub fn enter(tuning: &Tuning) -> io::Result<Self> {
        let (cols, rows) = terminal::size()?;
        let mut out = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            out,
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            terminal::Clear(ClearType::All),
            cursor::Hide
        )?;
        log::info!("Terminal frontend started ({}x{})", cols, rows);

        Ok(Self {
            input: TerminalInput,
            screen: TerminalScreen {
                out,
                viewport: Viewport::new(tuning, cols, rows),
            },
        })
    }
}

impl Drop for Terminal {
    fn drop(&mut self) {
        let _ = execute!(
            self.screen.out,
            cursor::Show,
            DisableMouseCapture,
            terminal::LeaveAlternateScreen
        );
        let _ = terminal::disable_raw_mode();
    }
}

/// Keyboard and mouse events from the terminal
#[derive(Debug)]
pub struct TerminalInput;

impl InputSource for TerminalInput {
    fn drain(&mut self, events: &mut Vec<InputEvent>) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Some(event) = map_event(event::read()?) {
                events.push(event);
            }
        }
        Ok(())
    }
}

/// Character-grid renderer
pub struct TerminalScreen {
    out: Stdout,
    viewport: Viewport,
}

impl DrawSink for TerminalScreen {
    fn draw(&mut self, frame: &Frame) -> io::Result<()> {
        let (cols, rows) = terminal::size()?;
        if (cols, rows) != (self.viewport.cols, self.viewport.rows) {
            self.viewport.cols = cols;
            self.viewport.rows = rows;
            queue!(self.out, terminal::Clear(ClearType::All))?;
        }

        for (y, line) in self.viewport.render(frame).iter().enumerate() {
            queue!(self.out, cursor::MoveTo(0, y as u16), Print(line))?;
        }
        self.out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameState, Obstacle};
    use crossterm::event::{KeyEventState, MouseEvent};

    fn viewport() -> Viewport {
        // 80 cols -> 10 px per col; 22 rows -> 20 field rows of 20 px
        Viewport::new(&Tuning::default(), 80, 22)
    }

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent {
            code,
            modifiers,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    #[test]
    fn test_render_layout() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, tuning.clone());
        state.score = 420;
        let mut obstacle = Obstacle::with_size(1, 7.0, 20, 80, &tuning);
        obstacle.pos.x = 400.0;
        state.obstacles.push(obstacle);

        let lines = viewport().render(&Frame::capture(&state, 1));
        assert_eq!(lines.len(), 22);
        assert!(lines[0].contains("SCORE: 42"));
        assert!(lines[21].chars().all(|c| c == GROUND_CELL));

        // Player spans cols 5..=9 and rows 18..=20 (y 350..400)
        let row = |r: usize| lines[r].chars().collect::<Vec<_>>();
        assert_eq!(row(20)[5], PLAYER_CELL);
        assert_eq!(row(18)[9], PLAYER_CELL);
        assert_eq!(row(17)[5], ' ');
        // Obstacle spans cols 40..=41 and rows 17..=20 (y 320..400)
        assert_eq!(row(17)[40], OBSTACLE_CELL);
        assert_eq!(row(20)[41], OBSTACLE_CELL);
        assert_eq!(row(16)[40], ' ');
        assert!(!lines.iter().any(|l| l.contains("GAME OVER")));
    }

    #[test]
    fn test_render_game_over_banner() {
        let mut state = GameState::new(1, Tuning::default());
        state.phase = GamePhase::GameOver;
        let lines = viewport().render(&Frame::capture(&state, 2));
        assert!(lines.iter().any(|l| l.contains("GAME OVER")));
        assert!(lines.iter().any(|l| l.contains("restart")));
        assert!(lines[0].contains("RUN 2"));
    }

    #[test]
    fn test_offscreen_parts_are_clipped() {
        let tuning = Tuning::default();
        let mut state = GameState::new(1, tuning.clone());
        let mut obstacle = Obstacle::with_size(1, 7.0, 50, 40, &tuning);
        obstacle.pos.x = -30.0;
        state.obstacles.push(obstacle);
        let mut entering = Obstacle::with_size(2, 7.0, 50, 40, &tuning);
        entering.pos.x = 790.0;
        state.obstacles.push(entering);

        let lines = viewport().render(&Frame::capture(&state, 1));
        let bottom: Vec<char> = lines[20].chars().collect();
        assert_eq!(bottom.len(), 80);
        assert_eq!(bottom[0], OBSTACLE_CELL);
        assert_eq!(bottom[1], OBSTACLE_CELL);
        assert_eq!(bottom[79], OBSTACLE_CELL);
    }

    #[test]
    fn test_tiny_terminal() {
        let state = GameState::new(1, Tuning::default());
        let lines = Viewport::new(&Tuning::default(), 10, 3).render(&Frame::capture(&state, 1));
        assert_eq!(lines, vec!["terminal too small".to_string()]);
    }

    #[test]
    fn test_key_mapping() {
        assert_eq!(
            map_key(key(KeyCode::Char(' '), KeyModifiers::NONE)),
            InputEvent::PrimaryAction
        );
        assert_eq!(map_key(key(KeyCode::Up, KeyModifiers::NONE)), InputEvent::PrimaryAction);
        assert_eq!(map_key(key(KeyCode::Esc, KeyModifiers::NONE)), InputEvent::Quit);
        assert_eq!(
            map_key(key(KeyCode::Char('c'), KeyModifiers::CONTROL)),
            InputEvent::Quit
        );
        assert!(matches!(
            map_key(key(KeyCode::Char('c'), KeyModifiers::NONE)),
            InputEvent::Unrecognized(_)
        ));
    }

    #[test]
    fn test_event_mapping() {
        let click = Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 3,
            row: 4,
            modifiers: KeyModifiers::NONE,
        });
        assert_eq!(map_event(click), Some(InputEvent::PrimaryAction));

        let release = Event::Key(KeyEvent {
            kind: KeyEventKind::Release,
            ..key(KeyCode::Char(' '), KeyModifiers::NONE)
        });
        assert_eq!(map_event(release), None);

        assert_eq!(map_event(Event::Resize(120, 40)), None);
        assert!(matches!(
            map_event(Event::FocusLost),
            Some(InputEvent::Unrecognized(_))
        ));
    }
}
