//! Main TUI application state and logic

use crate::session::{Command, Session, Step};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;
use tracing::debug;

use super::panes::{
    render_heap_pane, render_menu_pane, render_status_bar, render_terminal_pane, HeapRenderData,
    HeapScrollState, MenuRenderData, StatusRenderData,
};

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Heap,
    Terminal,
}

impl FocusedPane {
    /// Move focus to the other scrollable pane
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Heap => FocusedPane::Terminal,
            FocusedPane::Terminal => FocusedPane::Heap,
        }
    }
}

/// Whether keys drive the menu or edit the value being typed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Menu,
    Value(String),
}

/// The main application state
pub struct App {
    /// The exercise being driven
    pub session: Session,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub heap_scroll: HeapScrollState,
    pub terminal_scroll: usize,

    pub input_mode: InputMode,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    pub fn new(session: Session) -> Self {
        App {
            session,
            focused_pane: FocusedPane::Heap,
            heap_scroll: HeapScrollState::default(),
            terminal_scroll: usize::MAX,
            input_mode: InputMode::Menu,
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

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

        // Panes on top, status bar at bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        // Right column: Menu (top) | Terminal (bottom)
        let right_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(6), Constraint::Min(0)])
            .split(columns[1]);

        render_heap_pane(
            frame,
            columns[0],
            HeapRenderData {
                heap: self.session.heap(),
                last_write: self.session.last_write(),
            },
            self.focused_pane == FocusedPane::Heap,
            &mut self.heap_scroll,
        );

        let input = match &self.input_mode {
            InputMode::Value(buffer) => Some(buffer.as_str()),
            InputMode::Menu => None,
        };

        render_menu_pane(
            frame,
            right_rows[0],
            MenuRenderData {
                phase: self.session.phase(),
                input,
            },
        );

        render_terminal_pane(
            frame,
            right_rows[1],
            self.session.transcript(),
            self.focused_pane == FocusedPane::Terminal,
            &mut self.terminal_scroll,
        );

        render_status_bar(
            frame,
            main_chunks[1],
            StatusRenderData {
                message: &self.status_message,
                phase: self.session.phase(),
                writes: self.session.write_count(),
                is_input: input.is_some(),
            },
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if let InputMode::Value(buffer) = &mut self.input_mode {
            match key.code {
                KeyCode::Char(c) => buffer.push(c),
                KeyCode::Backspace => {
                    buffer.pop();
                }
                KeyCode::Esc => {
                    self.input_mode = InputMode::Menu;
                    self.status_message = "Update cancelled".to_string();
                }
                KeyCode::Enter => {
                    let buffer = buffer.clone();
                    self.submit_value(&buffer);
                }
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Char(c @ '1'..='4') => {
                self.run_command(Command::parse(&c.to_string()));
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => match self.focused_pane {
                FocusedPane::Heap => {
                    self.heap_scroll.offset = self.heap_scroll.offset.saturating_sub(1);
                }
                FocusedPane::Terminal => {
                    self.terminal_scroll = self.terminal_scroll.saturating_sub(1);
                }
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Heap => {
                    self.heap_scroll.offset = self.heap_scroll.offset.saturating_add(1);
                }
                FocusedPane::Terminal => {
                    self.terminal_scroll = self.terminal_scroll.saturating_add(1);
                }
            },
            _ => {}
        }
    }

    fn run_command(&mut self, command: Command) {
        if self.session.is_finished() {
            self.status_message = "Exercise finished, press q to quit".to_string();
            return;
        }

        debug!(?command, "menu command");
        let is_exit = command == Command::Exit;
        match self.session.dispatch(command) {
            Step::NeedsValue => {
                self.input_mode = InputMode::Value(String::new());
                self.status_message = "Type a value for Buffer1".to_string();
            }
            Step::Finished if is_exit => {
                self.should_quit = true;
            }
            Step::Finished => {
                self.status_message = "Guard corrupted, you win!".to_string();
            }
            Step::Continue => {
                self.status_message = "Ready!".to_string();
            }
        }
        // Auto-scroll terminal to bottom
        self.terminal_scroll = usize::MAX;
    }

    fn submit_value(&mut self, line: &str) {
        match self.session.submit_value(line) {
            Some(report) => {
                self.input_mode = InputMode::Menu;
                self.status_message = if report.overflowed() {
                    format!(
                        "Wrote {} bytes, {} past Buffer1",
                        report.written, report.spilled
                    )
                } else {
                    format!("Wrote {} bytes", report.written)
                };
                self.terminal_scroll = usize::MAX;
            }
            None => {
                self.status_message = "Enter at least one non-space character".to_string();
            }
        }
    }
}
