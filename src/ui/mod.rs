mod timeline_view;

use crate::audio::ClickOutput;
use crate::midi::MidiListener;
use crate::session::{Session, UserCommand};
use crate::timing::{Clock, SessionClock};
use crossbeam::channel::Receiver;
use eframe::egui;
use std::time::Duration;
use timeline_view::TimelineView;
use tracing::debug;

const BEAT_FLASH: Duration = Duration::from_millis(100);

/// Keyboard binding for the practice window.
pub fn command_for_key(key: egui::Key) -> Option<UserCommand> {
    match key {
        egui::Key::Q => Some(UserCommand::Quit),
        egui::Key::M => Some(UserCommand::ToggleMute),
        egui::Key::Enter => Some(UserCommand::Advance),
        egui::Key::Backspace => Some(UserCommand::Retreat),
        egui::Key::ArrowUp => Some(UserCommand::IncrementTempo),
        egui::Key::ArrowDown => Some(UserCommand::DecrementTempo),
        _ => None,
    }
}

pub struct EtudeApp {
    session: Session,
    clock: SessionClock,
    beats: Option<Receiver<u64>>,
    last_beat: Option<Duration>,
    _midi: Option<MidiListener>,
    _click: Option<ClickOutput>,
}

impl EtudeApp {
    pub fn new(
        session: Session,
        clock: SessionClock,
        beats: Option<Receiver<u64>>,
        midi: Option<MidiListener>,
        click: Option<ClickOutput>,
    ) -> Self {
        Self {
            session,
            clock,
            beats,
            last_beat: None,
            _midi: midi,
            _click: click,
        }
    }

    fn handle_keys(&mut self, ctx: &egui::Context) {
        let pressed: Vec<egui::Key> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    egui::Event::Key {
                        key, pressed: true, ..
                    } => Some(*key),
                    _ => None,
                })
                .collect()
        });

        for key in pressed {
            match command_for_key(key) {
                Some(command) => {
                    if !self.session.apply(command) {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                }
                None => debug!(?key, "unbound key"),
            }
        }
    }

    fn poll_beats(&mut self, now: Duration) {
        if let Some(beats) = &self.beats {
            if beats.try_iter().count() > 0 {
                self.last_beat = Some(now);
            }
        }
    }
}

impl eframe::App for EtudeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_keys(ctx);

        let now = self.clock.now();
        self.poll_beats(now);
        let beat_flash = self
            .last_beat
            .is_some_and(|beat| now.saturating_sub(beat) < BEAT_FLASH);

        let frame = self.session.frame(now);

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| {
                TimelineView::new(&frame, beat_flash).show(ui);
            });

        ctx.request_repaint();
    }
}
