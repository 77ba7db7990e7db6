mod click;

pub use click::{ClickSound, ClickVoice};

use crate::timing::TickSink;
use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use ringbuf::{
    HeapCons, HeapProd, HeapRb,
    traits::{Consumer, Producer, Split},
};
use tracing::{info, warn};

const CLICK_QUEUE: usize = 64;

/// Keeps the output stream alive. Dropping it silences the clicks.
pub struct ClickOutput {
    _stream: cpal::Stream,
}

/// Metronome side of the click queue. Never blocks.
pub struct ClickTrigger {
    producer: HeapProd<u64>,
}

impl TickSink for ClickTrigger {
    fn tick(&mut self, index: u64) {
        if self.producer.try_push(index).is_err() {
            warn!(tick = index, "click queue full, dropping click");
        }
    }
}

struct AudioState {
    voice: ClickVoice,
    consumer: HeapCons<u64>,
    num_channels: usize,
}

/// Opens the default output device and returns the stream handle together
/// with the trigger the metronome pushes into.
pub fn start_click_output(volume: f32) -> Result<(ClickOutput, ClickTrigger)> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| Error::Audio("no output device".into()))?;
    let config: cpal::StreamConfig = device
        .default_output_config()
        .map_err(|e| Error::Audio(e.to_string()))?
        .into();

    let sample_rate = config.sample_rate;
    let num_channels = config.channels as usize;
    info!(sample_rate, num_channels, "click output ready");

    let ring_buffer = HeapRb::<u64>::new(CLICK_QUEUE);
    let (producer, consumer) = ring_buffer.split();

    let mut state = AudioState {
        voice: ClickVoice::new(ClickSound::new(sample_rate, volume)),
        consumer,
        num_channels,
    };

    let stream = device
        .build_output_stream(
            &config,
            move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                audio_callback(data, &mut state);
            },
            |err| warn!("audio stream error: {}", err),
            None,
        )
        .map_err(|e| Error::Audio(e.to_string()))?;

    stream.play().map_err(|e| Error::Audio(e.to_string()))?;

    Ok((ClickOutput { _stream: stream }, ClickTrigger { producer }))
}

fn audio_callback(data: &mut [f32], state: &mut AudioState) {
    // Only the latest pending click matters.
    if state.consumer.try_pop().is_some() {
        while state.consumer.try_pop().is_some() {}
        state.voice.trigger();
    }
    state.voice.render(data, state.num_channels);
}
