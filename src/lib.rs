//! Scale and arpeggio practice: a shuffled curriculum, a free-running
//! metronome at each exercise's tempo, and a live timeline of what was
//! played on a MIDI keyboard.

pub mod audio;
pub mod config;
pub mod curriculum;
pub mod drill;
pub mod events;
pub mod midi;
pub mod session;
pub mod timing;
pub mod tracker;
pub mod ui;

mod error;

pub use config::SessionConfig;
pub use curriculum::{Curriculum, Exercise, Form, FormGroup, Key};
pub use error::{Error, Result};
pub use events::InputEvent;
pub use session::{RenderFrame, Session, UserCommand};
pub use timing::{Metronome, SessionClock, SessionControls, TickSink};
pub use tracker::{NoteInterval, NoteTracker, PlayingState, SharedTracker};
pub use ui::EtudeApp;

/// Installs the fmt subscriber. `RUST_LOG` overrides the default filter.
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("etude=info"));
    // stderr keeps the console drill's raw-mode output clean
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
