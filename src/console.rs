//! Line-oriented menu loop
//!
//! Reads menu choices and values from any [`BufRead`] and writes the session
//! transcript to any [`Write`], so the loop runs the same against a real
//! terminal or an in-memory buffer.

use crate::error::AppError;
use crate::session::{Command, LineKind, Session, Step, MENU};
use std::io::{BufRead, Write};
use tracing::debug;

/// Drive `session` until the user exits, wins, or input ends
pub fn run_console<R: BufRead, W: Write>(
    session: &mut Session,
    mut input: R,
    output: &mut W,
) -> Result<(), AppError> {
    let mut line = String::new();

    while !session.is_finished() {
        session.transcript_mut().output(MENU);
        flush(session, output)?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            debug!("input closed at menu");
            break;
        }
        writeln!(output)?;

        let step = session.dispatch(Command::parse(&line));
        if step == Step::NeedsValue {
            flush(session, output)?;
            loop {
                line.clear();
                if input.read_line(&mut line)? == 0 {
                    debug!("input closed at value prompt");
                    flush(session, output)?;
                    return Ok(());
                }
                if session.submit_value(&line).is_some() {
                    break;
                }
            }
        }

        flush(session, output)?;
        writeln!(output)?;
    }

    flush(session, output)?;
    Ok(())
}

/// Write pending transcript lines. Input echoes are skipped since the
/// terminal already shows what was typed.
fn flush<W: Write>(session: &mut Session, output: &mut W) -> Result<(), AppError> {
    for line in session.transcript_mut().take_pending() {
        if line.kind != LineKind::Input {
            writeln!(output, "{}", line.text)?;
        }
    }
    output.flush()?;
    Ok(())
}
