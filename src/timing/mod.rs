mod clock;
mod controls;
mod metronome;

pub use clock::{Clock, SessionClock};
pub use controls::{ControlValues, MIN_BPM, SessionControls, beat_period};
pub use metronome::{BeatNotifier, Metronome, Tick, TickSink};
