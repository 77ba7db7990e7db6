use crate::curriculum::Exercise;
use crate::tracker::NoteInterval;
use std::time::Duration;

/// A note placed in the render window. Horizontal positions are fractions of
/// the window, vertical ones fractions of the MIDI range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NoteBar {
    pub pitch: u8,
    pub velocity: u8,
    pub x_start: f32,
    pub x_end: f32,
    pub y: f32,
    pub velocity_level: f32,
}

/// Everything the renderer needs for one refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderFrame {
    pub tempo: u32,
    pub muted: bool,
    pub exercise: Exercise,
    /// 1-based.
    pub position: usize,
    pub total: usize,
    pub is_active: bool,
    pub window_start: Duration,
    pub window_end: Duration,
    pub notes: Vec<NoteBar>,
}

impl RenderFrame {
    pub fn progress(&self) -> String {
        format!("[{}/{}]", self.position, self.total)
    }

    pub fn label(&self) -> String {
        format!("{} {}", self.progress(), self.exercise)
    }
}

/// Places intervals inside `[start, end]`. Intervals that ended before the
/// window are dropped, the rest are clipped to it.
pub fn place_notes(timeline: &[NoteInterval], start: Duration, end: Duration) -> Vec<NoteBar> {
    let span = end.saturating_sub(start).as_secs_f64();
    if span <= 0.0 {
        return Vec::new();
    }

    let to_x = |t: Duration| {
        let offset = t.as_secs_f64() - start.as_secs_f64();
        (offset / span).clamp(0.0, 1.0) as f32
    };

    timeline
        .iter()
        .filter(|note| note.end >= start && note.start <= end)
        .map(|note| NoteBar {
            pitch: note.pitch,
            velocity: note.velocity,
            x_start: to_x(note.start),
            x_end: to_x(note.end),
            y: f32::from(note.pitch) / 128.0,
            velocity_level: f32::from(note.velocity) / 128.0,
        })
        .collect()
}
