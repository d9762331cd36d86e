//! The exercise driver
//!
//! A [`Session`] owns the [`HeapModel`] and turns menu choices into calls on
//! it, recording everything it prints in a [`Transcript`]. The session also
//! tracks the exercise [`Phase`]:
//!
//! ```text
//! Intact ──overflowing write──▶ Corrupted ──check fails──▶ Exploited (terminal)
//!   ▲                              │
//!   └──write restoring sentinel────┘
//! ```
//!
//! Both front-ends (console menu and TUI) drive the same session, so the
//! flow is identical regardless of how it is displayed.

pub mod table;
pub mod transcript;

pub use table::render_heap_table;
pub use transcript::{LineKind, Transcript, TranscriptLine};

use crate::memory::{HeapModel, WriteReport};
use serde::Serialize;
use tracing::info;

/// Menu shown after every command
pub const MENU: &str =
    "What do you want to do?\n1. Update Buffer1\n2. Print Buffers\n3. Check everything is okay\n4. Exit";

/// Prompt printed before reading the new primary value
pub const PROMPT: &str = "Enter the new value for Buffer1: ";

/// A parsed menu choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    UpdatePrimary,
    PrintBuffers,
    CheckIntegrity,
    Exit,
    Invalid(String),
}

impl Command {
    /// Parse the first whitespace-delimited token of a menu line
    pub fn parse(input: &str) -> Self {
        match input.split_whitespace().next().unwrap_or("") {
            "1" => Command::UpdatePrimary,
            "2" => Command::PrintBuffers,
            "3" => Command::CheckIntegrity,
            "4" => Command::Exit,
            other => Command::Invalid(other.to_string()),
        }
    }
}

/// Where the exercise stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Guard bytes equal the sentinel
    Intact,
    /// A write altered the guard; an integrity check would fail
    Corrupted,
    /// An integrity check failed. Terminal.
    Exploited,
}

/// What the front-end should do after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Show the menu again
    Continue,
    /// Read a value and pass it to [`Session::submit_value`]
    NeedsValue,
    /// The session is over
    Finished,
}

/// One run of the exercise
#[derive(Debug)]
pub struct Session {
    heap: HeapModel,
    transcript: Transcript,
    phase: Phase,
    last_write: Option<WriteReport>,
    write_count: usize,
    exited: bool,
}

impl Session {
    /// Start a session and print the initial heap table
    pub fn new(heap: HeapModel) -> Self {
        let mut session = Session {
            heap,
            transcript: Transcript::new(),
            phase: Phase::Intact,
            last_write: None,
            write_count: 0,
            exited: false,
        };
        session.print_buffers();
        session
    }

    pub fn heap(&self) -> &HeapModel {
        &self.heap
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn transcript_mut(&mut self) -> &mut Transcript {
        &mut self.transcript
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Report of the most recent write
    pub fn last_write(&self) -> Option<&WriteReport> {
        self.last_write.as_ref()
    }

    /// Number of writes so far
    pub fn write_count(&self) -> usize {
        self.write_count
    }

    pub fn is_finished(&self) -> bool {
        self.exited || self.phase == Phase::Exploited
    }

    /// Run one menu command
    pub fn dispatch(&mut self, command: Command) -> Step {
        if self.is_finished() {
            return Step::Finished;
        }

        match command {
            Command::UpdatePrimary => {
                self.transcript.output(PROMPT);
                return Step::NeedsValue;
            }
            Command::PrintBuffers => self.print_buffers(),
            Command::CheckIntegrity => {
                self.check();
            }
            Command::Exit => {
                info!("session exited by user");
                self.exited = true;
            }
            Command::Invalid(input) => {
                self.transcript.echo(input);
                self.transcript.output("Invalid input");
            }
        }

        if self.is_finished() {
            Step::Finished
        } else {
            Step::Continue
        }
    }

    /// Feed the line typed after [`PROMPT`]. Only the first
    /// whitespace-delimited token is written. Returns `None` when the line
    /// holds no token, in which case the caller should prompt again.
    pub fn submit_value(&mut self, line: &str) -> Option<WriteReport> {
        let token = line.split_whitespace().next()?;
        self.transcript.echo(token);
        Some(self.write(token.as_bytes()))
    }

    /// Write raw bytes into the primary region through the unchecked path
    pub fn write(&mut self, value: &[u8]) -> WriteReport {
        let report = self.heap.write_primary_unchecked(value);
        self.last_write = Some(report);
        self.write_count += 1;

        if self.phase != Phase::Exploited {
            let next = if self.heap.guard().matches_sentinel() {
                Phase::Intact
            } else {
                Phase::Corrupted
            };
            self.set_phase(next);
        }

        report
    }

    /// Check the guard region, printing the same messages as the menu does.
    /// A failed check ends the session.
    pub fn check(&mut self) -> bool {
        if self.heap.verify_guard_integrity() {
            self.transcript.output("Buffer 2 Cannot be Broken!");
            self.transcript.output("Everything is okay!");
            true
        } else {
            self.transcript.alert("Buffer2 has been tampered with!");
            self.transcript.alert("You Win!");
            self.set_phase(Phase::Exploited);
            false
        }
    }

    /// Append the heap table to the transcript
    pub fn print_buffers(&mut self) {
        let table = render_heap_table(&self.heap.describe_state());
        self.transcript.output(table);
    }

    fn set_phase(&mut self, next: Phase) {
        if next != self.phase {
            info!(from = ?self.phase, to = ?next, "phase changed");
            self.phase = next;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(HeapModel::reference().unwrap())
    }

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse("1"), Command::UpdatePrimary);
        assert_eq!(Command::parse(" 2 \n"), Command::PrintBuffers);
        assert_eq!(Command::parse("3"), Command::CheckIntegrity);
        assert_eq!(Command::parse("4"), Command::Exit);
        assert_eq!(Command::parse("5"), Command::Invalid("5".to_string()));
        assert_eq!(Command::parse(""), Command::Invalid(String::new()));
    }

    #[test]
    fn test_new_session_prints_table() {
        let s = session();
        let out = s.transcript().get_output();
        assert_eq!(out[0], "Heap State:");
        assert!(out.iter().any(|l| l.contains("Unbreakable!")));
        assert_eq!(s.phase(), Phase::Intact);
    }

    #[test]
    fn test_update_needs_value() {
        let mut s = session();
        assert_eq!(s.dispatch(Command::UpdatePrimary), Step::NeedsValue);
        assert_eq!(s.submit_value("   "), None);
        let report = s.submit_value("hello world").unwrap();
        assert_eq!(report.requested, 6);
        assert_eq!(s.heap().primary().read(), "hello");
    }

    #[test]
    fn test_overflow_then_check_wins() {
        let mut s = session();
        s.write(b"AAAAAAAAAAAAAAAAAAAA");
        assert_eq!(s.phase(), Phase::Corrupted);
        assert_eq!(s.dispatch(Command::CheckIntegrity), Step::Finished);
        assert_eq!(s.phase(), Phase::Exploited);
        assert!(s.is_finished());
        let out = s.transcript().get_output();
        assert!(out.contains(&"Buffer2 has been tampered with!".to_string()));
        assert!(out.contains(&"You Win!".to_string()));
    }

    #[test]
    fn test_check_when_intact_continues() {
        let mut s = session();
        assert_eq!(s.dispatch(Command::CheckIntegrity), Step::Continue);
        assert_eq!(s.phase(), Phase::Intact);
        assert!(s
            .transcript()
            .get_output()
            .contains(&"Everything is okay!".to_string()));
    }

    #[test]
    fn test_restoring_write_returns_to_intact() {
        let mut s = session();
        s.write(b"123456789");
        assert_eq!(s.phase(), Phase::Corrupted);
        s.write(b"12345678Unbreakable!");
        assert_eq!(s.phase(), Phase::Intact);
    }

    #[test]
    fn test_exploited_is_terminal() {
        let mut s = session();
        s.write(b"123456789");
        s.check();
        s.write(b"12345678Unbreakable!");
        assert_eq!(s.phase(), Phase::Exploited);
        assert_eq!(s.dispatch(Command::PrintBuffers), Step::Finished);
    }

    #[test]
    fn test_only_last_write_is_kept() {
        let mut s = session();
        assert_eq!(s.last_write(), None);
        for _ in 0..100 {
            s.write(b"ok");
        }
        let last = s.write(b"123456789");
        assert_eq!(s.write_count(), 101);
        assert_eq!(s.last_write(), Some(&last));
        assert_eq!(last.spilled, 2);
    }

    #[test]
    fn test_exit_finishes() {
        let mut s = session();
        assert_eq!(s.dispatch(Command::Exit), Step::Finished);
        assert_eq!(s.phase(), Phase::Intact);
    }

    #[test]
    fn test_invalid_input_message() {
        let mut s = session();
        assert_eq!(s.dispatch(Command::parse("x")), Step::Continue);
        assert_eq!(
            s.transcript().get_output().last().map(String::as_str),
            Some("Invalid input")
        );
    }
}
