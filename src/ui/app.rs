//! Main TUI application state and logic

use crate::interpreter::engine::Interpreter;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    Frame, Terminal,
    backend::Backend,
    layout::{Constraint, Direction, Layout},
};
use std::io;
use std::time::{Duration, Instant};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Script,
    Output,
    Variables,
    Memory,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Script => FocusedPane::Variables,
            FocusedPane::Variables => FocusedPane::Memory,
            FocusedPane::Memory => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Script,
        }
    }
}

/// The main application state
pub struct App {
    /// The interpreter whose history is being replayed
    pub interpreter: Interpreter,

    /// The script text being replayed
    pub script: String,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub script_scroll: usize,
    pub variables_scroll: usize,
    pub memory_scroll: usize,
    pub output_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Whether auto-play mode is active
    pub is_playing: bool,

    /// Last time a step was taken in play mode
    pub last_play_time: Instant,

    /// Last time space was pressed (for debouncing)
    pub last_space_press: Instant,
}

impl App {
    /// Create a new app over an interpreter that has already run.
    pub fn new(mut interpreter: Interpreter, script: String) -> Self {
        interpreter.rewind_to_start();
        App {
            interpreter,
            script,
            focused_pane: FocusedPane::Script,
            script_scroll: 0,
            variables_scroll: 0,
            memory_scroll: 0,
            output_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            is_playing: false,
            last_play_time: Instant::now(),
            last_space_press: Instant::now()
                .checked_sub(Duration::from_secs(1))
                .unwrap_or(Instant::now()),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            // Handle auto-play mode
            if self.is_playing {
                if self.last_play_time.elapsed() >= Duration::from_secs(1) {
                    if self.interpreter.step_forward() {
                        self.status_message = "Playing...".to_string();
                        self.output_scroll = usize::MAX;
                    } else {
                        self.is_playing = false;
                        self.status_message = "Playback complete".to_string();
                    }
                    self.last_play_time = Instant::now();
                }
            }

            // Use poll with timeout to allow auto-play to work
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes above, one-line status bar below
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let pane_area = main_chunks[0];
        let status_area = main_chunks[1];

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
            .split(pane_area);

        // Left column: Script (top) | Output (bottom)
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(columns[0]);

        // Right column: Variables (top) | Memory (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
            .split(columns[1]);

        let snapshot = self.interpreter.current_snapshot();

        super::panes::render_script_pane(
            frame,
            left_rows[0],
            &self.script,
            snapshot.location.line,
            self.focused_pane == FocusedPane::Script,
            &mut self.script_scroll,
        );

        super::panes::render_output_pane(
            frame,
            left_rows[1],
            &self.interpreter.visible_output(),
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        super::panes::render_variables_pane(
            frame,
            right_rows[0],
            &snapshot.heap,
            self.focused_pane == FocusedPane::Variables,
            &mut self.variables_scroll,
        );

        super::panes::render_memory_pane(
            frame,
            right_rows[1],
            &snapshot.heap,
            self.focused_pane == FocusedPane::Memory,
            &mut self.memory_scroll,
        );

        super::panes::render_status_bar(
            frame,
            status_area,
            &self.status_message,
            self.interpreter.history_position(),
            self.interpreter.total_snapshots(),
            self.is_playing,
        );
    }

    /// Handle keyboard events
    fn handle_key_event(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            // Number keys step forward N times directly
            KeyCode::Char(c @ '1'..='9') => {
                self.is_playing = false;
                let n = c.to_digit(10).unwrap_or(1) as usize;
                let mut stepped = 0;
                for _ in 0..n {
                    if self.interpreter.step_forward() {
                        stepped += 1;
                    } else {
                        break;
                    }
                }
                self.status_message = format!("Stepped forward {} step(s)", stepped);
                self.output_scroll = usize::MAX;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Left => {
                self.is_playing = false;
                self.step_backward();
            }
            KeyCode::Right => {
                self.is_playing = false;
                self.step_forward();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            KeyCode::Char(' ') => {
                // Toggle auto-play (200ms debounce against key repeat)
                if self.last_space_press.elapsed() >= Duration::from_millis(200) {
                    self.last_space_press = Instant::now();
                    self.is_playing = !self.is_playing;
                    if self.is_playing {
                        self.last_play_time = Instant::now()
                            .checked_sub(Duration::from_secs(1))
                            .unwrap_or(Instant::now());
                        self.status_message = "Playing...".to_string();
                    } else {
                        self.status_message = "Paused".to_string();
                    }
                }
            }
            KeyCode::Enter => {
                self.is_playing = false;
                self.interpreter.jump_to_end();
                self.status_message = "Jumped to end".to_string();
                self.output_scroll = usize::MAX;
            }
            KeyCode::Backspace => {
                self.is_playing = false;
                self.interpreter.rewind_to_start();
                self.status_message = "Jumped to start".to_string();
                self.output_scroll = 0;
            }
            _ => {}
        }
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Script => &mut self.script_scroll,
            FocusedPane::Output => &mut self.output_scroll,
            FocusedPane::Variables => &mut self.variables_scroll,
            FocusedPane::Memory => &mut self.memory_scroll,
        }
    }

    /// Step forward in the replay
    fn step_forward(&mut self) {
        if self.interpreter.step_forward() {
            self.status_message = self.interpreter.current_snapshot().summary.clone();
            self.output_scroll = usize::MAX;
        } else {
            self.status_message = "Already at end of run".to_string();
        }
    }

    /// Step backward in the replay
    fn step_backward(&mut self) {
        if self.interpreter.step_backward() {
            self.status_message = self.interpreter.current_snapshot().summary.clone();
            self.output_scroll = usize::MAX;
        } else {
            self.status_message = "Already at start of run".to_string();
        }
    }
}
