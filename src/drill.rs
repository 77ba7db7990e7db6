//! Console drill: walk the curriculum one exercise at a time, with the
//! metronome following each exercise's tempo. Typing anything before Enter
//! marks the exercise as tricky; the tricky list is printed at the end.

use crate::Result;
use crate::session::{Session, UserCommand};
use crossterm::event::{self, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal;
use std::io::{self, Write};
use std::time::Duration;
use tracing::debug;

const POLL_TIMEOUT: Duration = Duration::from_millis(50);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrillStep {
    Continue,
    /// The line was submitted; `tricky` is set when it was non-empty.
    Submitted { tricky: bool },
    Quit,
}

/// Line being typed plus the exercises flagged so far.
#[derive(Debug, Default)]
pub struct Drill {
    line: String,
    tricky: Vec<String>,
}

impl Drill {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn line(&self) -> &str {
        &self.line
    }

    pub fn on_key(&mut self, key: KeyEvent, session: &mut Session) -> DrillStep {
        if key.kind != KeyEventKind::Press {
            return DrillStep::Continue;
        }

        match key.code {
            KeyCode::Esc => DrillStep::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                DrillStep::Quit
            }
            KeyCode::Enter => {
                let tricky = !self.line.is_empty();
                if tricky {
                    self.tricky.push(session.current().to_string());
                }
                self.line.clear();
                DrillStep::Submitted { tricky }
            }
            KeyCode::Backspace => {
                self.line.pop();
                DrillStep::Continue
            }
            KeyCode::Up => {
                session.apply(UserCommand::IncrementTempo);
                DrillStep::Continue
            }
            KeyCode::Down => {
                session.apply(UserCommand::DecrementTempo);
                DrillStep::Continue
            }
            KeyCode::Char('m') if self.line.is_empty() => {
                session.apply(UserCommand::ToggleMute);
                DrillStep::Continue
            }
            KeyCode::Char(c) => {
                self.line.push(c);
                DrillStep::Continue
            }
            other => {
                debug!(?other, "unbound key");
                DrillStep::Continue
            }
        }
    }

    /// Flagged exercises, sorted by name.
    pub fn into_tricky(self) -> Vec<String> {
        let mut tricky = self.tricky;
        tricky.sort();
        tricky
    }
}

/// Runs the drill on the terminal until the curriculum is done or the user
/// quits. Returns the tricky exercises.
pub fn run(session: &mut Session) -> Result<Vec<String>> {
    terminal::enable_raw_mode()?;
    let result = drill_loop(session);
    terminal::disable_raw_mode()?;

    let tricky = result?;
    println!("{:?}", tricky);
    Ok(tricky)
}

fn drill_loop(session: &mut Session) -> Result<Vec<String>> {
    let mut stdout = io::stdout();
    let mut drill = Drill::new();
    let total = session.curriculum().len();
    let mut done = 0;

    write!(stdout, "\r\n\r\n")?;
    prompt(&mut stdout, session)?;

    while done < total {
        if !event::poll(POLL_TIMEOUT)? {
            continue;
        }
        let event::Event::Key(key) = event::read()? else {
            continue;
        };

        match drill.on_key(key, session) {
            DrillStep::Quit => break,
            DrillStep::Submitted { .. } => {
                write!(stdout, "\r\n")?;
                done += 1;
                if done < total {
                    session.advance();
                    prompt(&mut stdout, session)?;
                }
            }
            DrillStep::Continue => {
                write!(stdout, "\r\x1b[2K")?;
                write_prompt_text(&mut stdout, session)?;
                write!(stdout, "{}", drill.line())?;
                stdout.flush()?;
            }
        }
    }

    Ok(drill.into_tricky())
}

fn prompt(out: &mut impl Write, session: &Session) -> io::Result<()> {
    write_prompt_text(out, session)?;
    out.flush()
}

fn write_prompt_text(out: &mut impl Write, session: &Session) -> io::Result<()> {
    write!(
        out,
        "[{}/{}]  {}  ({} bpm) ",
        session.index() + 1,
        session.curriculum().len(),
        session.current(),
        session.controls().tempo()
    )
}
