mod command;
mod frame;

pub use command::{TEMPO_STEP, UserCommand};
pub use frame::{NoteBar, RenderFrame, place_notes};

use crate::curriculum::{Curriculum, Exercise};
use crate::timing::SessionControls;
use crate::tracker::{NoteTracker, SharedTracker};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Curriculum cursor plus the controls and timeline tied to the current
/// exercise.
pub struct Session {
    curriculum: Curriculum,
    index: usize,
    controls: Arc<SessionControls>,
    tracker: SharedTracker,
}

impl Session {
    /// Starts at the first exercise and sets its tempo.
    pub fn new(
        curriculum: Curriculum,
        controls: Arc<SessionControls>,
        tracker: SharedTracker,
    ) -> Self {
        let mut session = Self {
            curriculum,
            index: 0,
            controls,
            tracker,
        };
        session.enter_exercise();
        session
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Exercise {
        self.curriculum.get(self.index)
    }

    pub fn curriculum(&self) -> &Curriculum {
        &self.curriculum
    }

    pub fn controls(&self) -> &Arc<SessionControls> {
        &self.controls
    }

    pub fn tracker(&self) -> &SharedTracker {
        &self.tracker
    }

    pub fn advance(&mut self) {
        self.index = self.curriculum.next_index(self.index);
        self.enter_exercise();
    }

    pub fn retreat(&mut self) {
        self.index = self.curriculum.prev_index(self.index);
        self.enter_exercise();
    }

    fn enter_exercise(&mut self) {
        let exercise = self.current();
        let bpm = self.controls.set_tempo(exercise.target_tempo());
        self.tracker.lock().reset();
        info!(
            index = self.index + 1,
            total = self.curriculum.len(),
            bpm,
            "exercise: {}",
            exercise
        );
    }

    pub fn adjust_tempo(&self, delta: i32) -> u32 {
        let bpm = self.controls.adjust_tempo(delta);
        info!(bpm, "tempo adjusted");
        bpm
    }

    pub fn toggle_mute(&self) -> bool {
        let muted = self.controls.toggle_mute();
        info!(muted, "metronome mute toggled");
        muted
    }

    /// Runs the idle check and returns where the render window ends: `now`
    /// while playing, the moment playing stopped otherwise.
    pub fn poll(&self, now: Duration) -> Duration {
        window_end(&mut self.tracker.lock(), now)
    }

    pub fn frame(&self, now: Duration) -> RenderFrame {
        let (is_active, window_start, window_end, notes) = {
            let mut tracker = self.tracker.lock();
            let end = window_end(&mut tracker, now);
            let state = tracker.state();
            let notes = place_notes(tracker.timeline(), state.time_started, end);
            (state.is_active, state.time_started, end, notes)
        };

        let controls = self.controls.snapshot();
        RenderFrame {
            tempo: controls.tempo,
            muted: controls.muted,
            exercise: self.current(),
            position: self.index + 1,
            total: self.curriculum.len(),
            is_active,
            window_start,
            window_end,
            notes,
        }
    }

    /// Returns false once the user asked to quit.
    pub fn apply(&mut self, command: UserCommand) -> bool {
        match command {
            UserCommand::Quit => return false,
            UserCommand::ToggleMute => {
                self.toggle_mute();
            }
            UserCommand::Advance => self.advance(),
            UserCommand::Retreat => self.retreat(),
            UserCommand::IncrementTempo => {
                self.adjust_tempo(TEMPO_STEP);
            }
            UserCommand::DecrementTempo => {
                self.adjust_tempo(-TEMPO_STEP);
            }
        }
        true
    }
}

fn window_end(tracker: &mut NoteTracker, now: Duration) -> Duration {
    tracker.tick(now);
    let state = tracker.state();
    if state.is_active {
        now
    } else {
        state.time_last_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curriculum::{Form, Key, generate};

    fn secs(s: f64) -> Duration {
        Duration::from_secs_f64(s)
    }

    fn session_of(exercises: Vec<Exercise>) -> Session {
        let curriculum = Curriculum::new(exercises).expect("non-empty");
        Session::new(
            curriculum,
            Arc::new(SessionControls::new(60, false)),
            NoteTracker::shared(Duration::from_secs(2)),
        )
    }

    #[test]
    fn starts_at_first_exercise_with_its_tempo() {
        let session = session_of(vec![Exercise::new(Key::C, Form::Chromatic)]);
        assert_eq!(session.index(), 0);
        assert_eq!(session.controls().tempo(), 100);
    }

    #[test]
    fn first_exercise_tempo_replaces_the_starting_tempo() {
        let controls = Arc::new(SessionControls::new(150, false));
        let curriculum =
            Curriculum::new(vec![Exercise::new(Key::E, Form::Dominant7Solid)]).expect("non-empty");
        let session = Session::new(
            curriculum,
            controls.clone(),
            NoteTracker::shared(Duration::from_secs(2)),
        );
        assert_eq!(controls.tempo(), session.current().target_tempo());
    }

    #[test]
    fn frame_and_poll_agree_on_the_window() {
        let session = session_of(vec![Exercise::new(Key::C, Form::Major)]);
        {
            let mut tracker = session.tracker().lock();
            tracker.on_note_on(60, secs(0.0), 90);
            tracker.on_note_off(60, secs(0.5));
        }
        for at in [1.0, 2.49, 2.5, 4.0] {
            assert_eq!(session.frame(secs(at)).window_end, session.poll(secs(at)));
        }
        assert_eq!(session.frame(secs(4.0)).window_end, secs(2.5));
    }

    #[test]
    fn advance_then_retreat_round_trips() {
        let mut session = session_of(generate(&Key::ALL, &[Form::Major, Form::MajorArpeggio]));
        for start in 0..session.curriculum().len() {
            while session.index() != start {
                session.advance();
            }
            session.advance();
            session.retreat();
            assert_eq!(session.index(), start);
        }
    }

    #[test]
    fn navigation_clears_the_timeline() {
        let mut session = session_of(generate(&[Key::C, Key::D], &[Form::Major]));
        {
            let mut tracker = session.tracker().lock();
            tracker.on_note_on(60, secs(0.0), 100);
            tracker.on_note_off(60, secs(0.2));
            tracker.on_note_on(62, secs(0.3), 100);
        }

        session.advance();
        {
            let tracker = session.tracker().lock();
            assert!(tracker.timeline().is_empty());
            assert!(!tracker.is_active());
        }

        session.tracker().lock().on_note_on(64, secs(1.0), 100);
        session.retreat();
        let tracker = session.tracker().lock();
        assert!(tracker.timeline().is_empty());
        assert!(!tracker.is_active());
        assert_eq!(tracker.held_pitches().count(), 0);
    }

    #[test]
    fn navigation_wraps() {
        let mut session = session_of(generate(&[Key::C, Key::D, Key::E], &[Form::Major]));
        session.retreat();
        assert_eq!(session.index(), 2);
        session.advance();
        assert_eq!(session.index(), 0);
    }

    #[test]
    fn two_exercise_walkthrough() {
        let mut session = session_of(vec![
            Exercise::new(Key::C, Form::Major),
            Exercise::new(Key::D, Form::MinorHarmonic),
        ]);
        session.advance();
        assert_eq!(session.index(), 1);
        assert_eq!(session.controls().tempo(), 88);

        {
            let mut tracker = session.tracker().lock();
            tracker.on_note_on(60, secs(0.0), 90);
            tracker.on_note_off(60, secs(0.5));
            assert_eq!(tracker.timeline().len(), 1);
            assert_eq!(tracker.timeline()[0].pitch, 60);
            assert_eq!(tracker.timeline()[0].start, secs(0.0));
            assert_eq!(tracker.timeline()[0].end, secs(0.5));
            assert_eq!(tracker.timeline()[0].velocity, 90);
        }

        assert_eq!(session.poll(secs(1.0)), secs(1.0));
        assert!(session.tracker().lock().is_active());
        assert_eq!(session.poll(secs(2.49)), secs(2.49));
        assert!(session.tracker().lock().is_active());

        assert_eq!(session.poll(secs(2.5)), secs(2.5));
        assert!(!session.tracker().lock().is_active());
        // window stays frozen once idle
        assert_eq!(session.poll(secs(4.0)), secs(2.5));
    }

    #[test]
    fn frame_describes_the_current_state() {
        let mut session = session_of(vec![
            Exercise::new(Key::C, Form::Major),
            Exercise::new(Key::EFlat, Form::MinorArpeggio),
        ]);
        session.advance();
        {
            let mut tracker = session.tracker().lock();
            tracker.on_note_on(64, secs(1.0), 64);
            tracker.on_note_off(64, secs(2.0));
        }

        let frame = session.frame(secs(3.0));
        assert_eq!(frame.label(), "[2/2] Eb Minor Arpeggio");
        assert_eq!(frame.tempo, 60);
        assert!(frame.is_active);
        assert_eq!(frame.window_start, secs(1.0));
        assert_eq!(frame.window_end, secs(3.0));
        assert_eq!(frame.notes.len(), 1);
        assert_eq!(frame.notes[0].x_end, 0.5);
    }

    #[test]
    fn commands_drive_controls_and_navigation() {
        let mut session = session_of(generate(&[Key::C, Key::D], &[Form::Major]));
        assert!(session.apply(UserCommand::IncrementTempo));
        assert_eq!(session.controls().tempo(), 89);
        assert!(session.apply(UserCommand::DecrementTempo));
        assert!(session.apply(UserCommand::DecrementTempo));
        assert_eq!(session.controls().tempo(), 87);

        assert!(session.apply(UserCommand::ToggleMute));
        assert!(session.controls().is_muted());

        assert!(session.apply(UserCommand::Advance));
        assert_eq!(session.index(), 1);
        assert_eq!(session.controls().tempo(), 88);
        assert!(session.controls().is_muted());

        assert!(session.apply(UserCommand::Retreat));
        assert_eq!(session.index(), 0);
        assert!(!session.apply(UserCommand::Quit));
    }

    #[test]
    fn tempo_bump_from_88_reaches_93() {
        let session = session_of(vec![Exercise::new(Key::C, Form::Major)]);
        assert_eq!(session.adjust_tempo(5), 93);
        assert_eq!(session.controls().tempo(), 93);
    }
}
