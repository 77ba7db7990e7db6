use crate::events::InputEvent;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_GRACE_PERIOD: Duration = Duration::from_secs(2);

/// One pitch held continuously from `start` to `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteInterval {
    pub pitch: u8,
    pub start: Duration,
    pub end: Duration,
    pub velocity: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeldNote {
    start: Duration,
    velocity: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlayingState {
    pub is_active: bool,
    pub time_started: Duration,
    pub time_last_active: Duration,
}

/// Turns note-on/note-off pairs into a timeline and tracks whether the
/// performer is playing, with a grace period before going idle.
#[derive(Debug, Clone)]
pub struct NoteTracker {
    pressed: HashMap<u8, HeldNote>,
    timeline: Vec<NoteInterval>,
    state: PlayingState,
    grace_period: Duration,
}

pub type SharedTracker = Arc<Mutex<NoteTracker>>;

impl NoteTracker {
    pub fn new(grace_period: Duration) -> Self {
        Self {
            pressed: HashMap::new(),
            timeline: Vec::new(),
            state: PlayingState::default(),
            grace_period,
        }
    }

    pub fn shared(grace_period: Duration) -> SharedTracker {
        Arc::new(Mutex::new(Self::new(grace_period)))
    }

    pub fn handle(&mut self, event: InputEvent, now: Duration) {
        match event {
            InputEvent::NoteOn { pitch, velocity } => self.on_note_on(pitch, now, velocity),
            InputEvent::NoteOff { pitch } => self.on_note_off(pitch, now),
            InputEvent::ControlChange { .. } => {}
            InputEvent::Other => {}
        }
    }

    pub fn on_note_on(&mut self, pitch: u8, timestamp: Duration, velocity: u8) {
        if !self.state.is_active {
            self.state.time_started = timestamp;
        }
        self.pressed.insert(
            pitch,
            HeldNote {
                start: timestamp,
                velocity,
            },
        );
        self.state.is_active = true;
        self.state.time_last_active = timestamp;
    }

    pub fn on_note_off(&mut self, pitch: u8, timestamp: Duration) {
        let Some(held) = self.pressed.remove(&pitch) else {
            return;
        };

        self.timeline.push(NoteInterval {
            pitch,
            start: held.start,
            end: timestamp,
            velocity: held.velocity,
        });

        if self.pressed.is_empty() {
            self.state.time_last_active = timestamp;
        }
    }

    /// Polled idle check; idleness depends on elapsed time, not on events.
    pub fn tick(&mut self, now: Duration) {
        if self.state.is_active
            && self.pressed.is_empty()
            && now.saturating_sub(self.state.time_last_active) >= self.grace_period
        {
            self.state.is_active = false;
            self.state.time_last_active = now;
        }
    }

    /// Clean slate for a new exercise.
    pub fn reset(&mut self) {
        self.pressed.clear();
        self.timeline.clear();
        self.state = PlayingState::default();
    }

    pub fn timeline(&self) -> &[NoteInterval] {
        &self.timeline
    }

    pub fn state(&self) -> PlayingState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state.is_active
    }

    pub fn held_pitches(&self) -> impl Iterator<Item = u8> + '_ {
        self.pressed.keys().copied()
    }
}

impl Default for NoteTracker {
    fn default() -> Self {
        Self::new(DEFAULT_GRACE_PERIOD)
    }
}
