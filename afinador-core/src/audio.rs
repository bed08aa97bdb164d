//! # Audio Capture Module
//!
//! Microphone capture boundary built on CPAL. The core performs no
//! resampling and trusts the rate the device reports; this module's only
//! job is to hand fixed-size sample frames to the pipeline.
//!
//! ## Features
//! - Default-device selection with mono f32 format matching
//! - Fixed-size frame chunking from the stream callback
//! - Backpressure-free delivery: stale frames are dropped, not queued

use anyhow::{Result, anyhow};
use cpal::SupportedStreamConfigRange;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use crossbeam_channel::Sender;
use tracing::{info, warn};

/// Samples per analysis frame.
///
/// ~46 ms at 44.1 kHz, enough periods of the lowest guitar string for the
/// correlation peak to lock on.
pub const BUFFER_SIZE: usize = 2048;

/// Capture rate the stream is negotiated toward, in Hz.
pub const TARGET_SAMPLE_RATE: u32 = 44_100;

/// Starts audio capture from the default input device.
///
/// Selects a mono f32 input configuration near the target rate, then
/// streams fixed-size frames into `sender`. Frames the consumer has not
/// drained in time are dropped; the tick loop only ever wants the
/// freshest audio.
///
/// # Returns
/// * `Ok((stream, sample_rate))` - Live stream handle (capture stops when
///   it drops) and the negotiated rate
/// * `Err(e)` - No usable input device or stream setup failure
pub fn start_audio_capture(sender: Sender<Vec<f32>>) -> Result<(cpal::Stream, u32)> {
    let host = cpal::default_host();
    let device = host
        .default_input_device()
        .ok_or_else(|| anyhow!("no input device available"))?;
    info!(device = %device.name()?, "using audio input device");

    let configs = device.supported_input_configs()?.collect::<Vec<_>>();
    let supported_config = find_supported_config(configs, TARGET_SAMPLE_RATE)
        .ok_or_else(|| anyhow!("no suitable mono f32 input format found"))?;

    let config = supported_config.with_sample_rate(cpal::SampleRate(TARGET_SAMPLE_RATE));
    let sample_rate = config.sample_rate().0;
    let config: cpal::StreamConfig = config.into();
    info!(sample_rate, "selected sample rate");

    let err_fn = |err| warn!(%err, "audio stream error");

    // Accumulates callback data until a full frame is available.
    let mut audio_buffer = Vec::with_capacity(BUFFER_SIZE * 2);

    let stream = device.build_input_stream(
        &config,
        move |data: &[f32], _: &cpal::InputCallbackInfo| {
            audio_buffer.extend_from_slice(data);

            while audio_buffer.len() >= BUFFER_SIZE {
                let frame = audio_buffer[..BUFFER_SIZE].to_vec();
                let _ = sender.try_send(frame);
                audio_buffer.drain(..BUFFER_SIZE);
            }
        },
        err_fn,
        None,
    )?;

    stream.play()?;

    Ok((stream, sample_rate))
}

/// Picks the supported input configuration closest to the target rate,
/// restricted to mono f32.
fn find_supported_config(
    configs: Vec<SupportedStreamConfigRange>,
    target_rate: u32,
) -> Option<SupportedStreamConfigRange> {
    configs
        .into_iter()
        .filter(|c| c.channels() == 1 && c.sample_format() == cpal::SampleFormat::F32)
        .min_by_key(|c| {
            let min_diff = (c.min_sample_rate().0 as i32 - target_rate as i32).abs();
            let max_diff = (c.max_sample_rate().0 as i32 - target_rate as i32).abs();
            min_diff.min(max_diff)
        })
}
