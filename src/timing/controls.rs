use parking_lot::Mutex;
use std::time::Duration;

/// Lowest tempo a session can reach. Non-positive tempos have no period.
pub const MIN_BPM: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ControlValues {
    pub tempo: u32,
    pub muted: bool,
}

/// Tempo and mute flag, written by user commands and read by the metronome
/// thread.
#[derive(Debug)]
pub struct SessionControls {
    values: Mutex<ControlValues>,
}

impl SessionControls {
    pub fn new(tempo: u32, muted: bool) -> Self {
        Self {
            values: Mutex::new(ControlValues {
                tempo: tempo.max(MIN_BPM),
                muted,
            }),
        }
    }

    pub fn snapshot(&self) -> ControlValues {
        *self.values.lock()
    }

    pub fn tempo(&self) -> u32 {
        self.values.lock().tempo
    }

    /// Returns the tempo actually stored.
    pub fn set_tempo(&self, bpm: u32) -> u32 {
        let bpm = bpm.max(MIN_BPM);
        self.values.lock().tempo = bpm;
        bpm
    }

    pub fn adjust_tempo(&self, delta: i32) -> u32 {
        let mut values = self.values.lock();
        let adjusted = (i64::from(values.tempo) + i64::from(delta))
            .clamp(i64::from(MIN_BPM), i64::from(u32::MAX));
        values.tempo = adjusted as u32;
        values.tempo
    }

    pub fn is_muted(&self) -> bool {
        self.values.lock().muted
    }

    /// Returns the new mute state.
    pub fn toggle_mute(&self) -> bool {
        let mut values = self.values.lock();
        values.muted = !values.muted;
        values.muted
    }
}

/// Time between two ticks at `bpm`.
pub fn beat_period(bpm: u32) -> Duration {
    Duration::from_secs_f64(60.0 / f64::from(bpm.max(MIN_BPM)))
}
