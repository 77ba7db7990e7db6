use std::f32::consts::TAU;

const CLICK_DURATION_MS: f32 = 20.0;
const CLICK_FREQ: f32 = 1000.0;

/// A short decaying sine burst, pre-rendered at the output sample rate.
#[derive(Debug, Clone)]
pub struct ClickSound {
    samples: Vec<f32>,
}

impl ClickSound {
    pub fn new(sample_rate: u32, volume: f32) -> Self {
        let sample_rate = sample_rate as f32;
        let len = ((CLICK_DURATION_MS / 1000.0) * sample_rate) as usize;
        let samples = (0..len)
            .map(|i| {
                let t = i as f32 / len as f32;
                let envelope = (-t * 8.0).exp();
                let phase = i as f32 * CLICK_FREQ / sample_rate;
                (phase * TAU).sin() * envelope * volume
            })
            .collect();
        Self { samples }
    }

    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Playback position inside the click; a new trigger restarts it.
#[derive(Debug, Clone)]
pub struct ClickVoice {
    sound: ClickSound,
    position: Option<usize>,
}

impl ClickVoice {
    pub fn new(sound: ClickSound) -> Self {
        Self {
            sound,
            position: None,
        }
    }

    pub fn trigger(&mut self) {
        self.position = Some(0);
    }

    pub fn next_sample(&mut self) -> f32 {
        let Some(pos) = self.position else {
            return 0.0;
        };
        match self.sound.samples().get(pos) {
            Some(&sample) => {
                self.position = Some(pos + 1);
                sample
            }
            None => {
                self.position = None;
                0.0
            }
        }
    }

    /// Fills interleaved frames, same sample on every channel.
    pub fn render(&mut self, data: &mut [f32], channels: usize) {
        for frame in data.chunks_mut(channels.max(1)) {
            let sample = self.next_sample();
            frame.fill(sample);
        }
    }
}
