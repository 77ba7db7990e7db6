use crate::session::RenderFrame;
use eframe::egui;

const NOTE_HEIGHT: f32 = 0.0075;
// Pitches fill the upper three quarters, velocity markers the bottom.
const PITCH_SCALE: f32 = 0.75;
const PITCH_OFFSET: f32 = 0.25;
const VELOCITY_BAND: f32 = 0.4;

/// Paints one `RenderFrame`: state background, note bars and velocity
/// markers, and the tempo/exercise labels.
pub struct TimelineView<'a> {
    frame: &'a RenderFrame,
    beat_flash: bool,
}

impl<'a> TimelineView<'a> {
    pub fn new(frame: &'a RenderFrame, beat_flash: bool) -> Self {
        Self { frame, beat_flash }
    }

    pub fn show(self, ui: &mut egui::Ui) {
        let (response, painter) =
            ui.allocate_painter(ui.available_size(), egui::Sense::hover());
        let rect = response.rect;

        let background = if self.frame.is_active {
            egui::Color32::from_rgba_unmultiplied(0, 255, 0, 140)
        } else {
            egui::Color32::from_rgba_unmultiplied(255, 0, 0, 140)
        };
        painter.rect_filled(rect, 0.0, egui::Color32::BLACK);
        painter.rect_filled(rect, 0.0, background);

        self.draw_notes(&painter, rect);
        self.draw_labels(&painter, rect);

        if self.beat_flash {
            painter.circle_filled(
                egui::Pos2::new(rect.right() - 20.0, rect.top() + 20.0),
                8.0,
                egui::Color32::WHITE,
            );
        }
    }

    fn draw_notes(&self, painter: &egui::Painter, rect: egui::Rect) {
        let bar_color = egui::Color32::from_rgba_unmultiplied(255, 255, 255, 128);

        for note in &self.frame.notes {
            let y = pitch_to_screen_y(note.y, rect);
            let x1 = rect.left() + note.x_start * rect.width();
            let x2 = rect.left() + note.x_end * rect.width();
            let bar = egui::Rect::from_min_max(
                egui::Pos2::new(x1, y - NOTE_HEIGHT * rect.height()),
                egui::Pos2::new(x2.max(x1 + 1.0), y),
            );
            painter.rect_filled(bar, 0.0, bar_color);

            let marker = egui::Pos2::new(
                x1,
                rect.bottom() - note.velocity_level * VELOCITY_BAND * rect.height(),
            );
            painter.circle_filled(marker, 2.5, egui::Color32::WHITE);
        }
    }

    fn draw_labels(&self, painter: &egui::Painter, rect: egui::Rect) {
        let font = egui::FontId::monospace(15.0);
        let left = rect.left() + 12.0;

        let tempo = if self.frame.muted {
            format!("BPM: {} (muted)", self.frame.tempo)
        } else {
            format!("BPM: {}", self.frame.tempo)
        };
        painter.text(
            egui::Pos2::new(left, rect.bottom() - 12.0),
            egui::Align2::LEFT_BOTTOM,
            tempo,
            font.clone(),
            egui::Color32::WHITE,
        );
        painter.text(
            egui::Pos2::new(left, rect.bottom() - 32.0),
            egui::Align2::LEFT_BOTTOM,
            format!("Scale: {}", self.frame.label()),
            font,
            egui::Color32::WHITE,
        );
    }
}

fn pitch_to_screen_y(y: f32, rect: egui::Rect) -> f32 {
    let from_bottom = y * PITCH_SCALE + PITCH_OFFSET;
    rect.bottom() - from_bottom * rect.height()
}
