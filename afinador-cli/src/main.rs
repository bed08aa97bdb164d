//! # Afinador - terminal instrument tuner
//!
//! Thin driver around `afinador-core`: starts microphone capture, pulls
//! frames at display-refresh cadence, runs each through the detection
//! pipeline, and renders the result as a status line (or JSON).
//!
//! ## Architecture
//! - **Capture**: CPAL stream callback chunking frames into a bounded
//!   crossbeam channel
//! - **Tick loop**: ~60 Hz, feeds only the freshest frame to the session
//! - **Presentation**: read-only consumer of `DisplayState`

mod render;

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossbeam_channel::Receiver;
use tracing_subscriber::EnvFilter;

use afinador_core::audio;
use afinador_core::config::TunerConfig;
use afinador_core::scale::Instrument;
use afinador_core::session::{ResolveMode, TunerSession};

/// Display refresh cadence. Best effort: a late tick just runs the next
/// one sooner.
const TICK_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal instrument tuner", long_about = None)]
struct Cli {
    /// Instrument whose open strings to tune toward.
    #[arg(short, long, default_value = "guitar")]
    instrument: String,

    /// Match detections against the instrument's open strings only,
    /// instead of the full chromatic scale.
    #[arg(long)]
    open_strings: bool,

    /// RMS silence threshold (0.01 is sensitive, 0.03 suits noisy rooms).
    #[arg(long)]
    threshold: Option<f32>,

    /// Hold window for dropped detections, in milliseconds.
    #[arg(long)]
    hold_ms: Option<u64>,

    /// Emit one JSON object per tick instead of the status line.
    #[arg(long)]
    json: bool,

    /// List the supported instruments and exit.
    #[arg(long)]
    list_instruments: bool,
}

fn main() -> Result<()> {
    init_tracing();

    let cli = Cli::parse();

    if cli.list_instruments {
        for instrument in Instrument::ALL {
            println!("{:8} {}", instrument.name(), instrument.string_summary());
        }
        return Ok(());
    }

    let instrument = Instrument::from_name(&cli.instrument)
        .ok_or_else(|| anyhow::anyhow!("unknown instrument: {}", cli.instrument))?;

    let mut config = TunerConfig::default();
    if let Some(threshold) = cli.threshold {
        config.silence_threshold = threshold;
    }
    if let Some(hold_ms) = cli.hold_ms {
        config.hold_window_ms = hold_ms;
    }

    let mode = if cli.open_strings {
        ResolveMode::OpenStrings
    } else {
        ResolveMode::Chromatic
    };
    let mut session = TunerSession::new(config, instrument, mode);

    tracing::info!(instrument = instrument.name(), ?mode, "starting tuner");
    println!(
        "Tuning {} ({}) - press Ctrl-C to quit",
        instrument.name(),
        instrument.string_summary()
    );

    // The stream must stay alive for capture to continue; the loop below
    // runs until the process is interrupted.
    let (frame_tx, frame_rx) = crossbeam_channel::bounded::<Vec<f32>>(8);
    let (_stream, sample_rate) = audio::start_audio_capture(frame_tx)?;

    run_loop(&mut session, &frame_rx, sample_rate, cli.json)
}

/// The tuner loop: one estimation-resolution-tracking pass per tick.
fn run_loop(
    session: &mut TunerSession,
    frames: &Receiver<Vec<f32>>,
    sample_rate: u32,
    json: bool,
) -> Result<()> {
    let mut stdout = io::stdout();

    loop {
        let tick_started = Instant::now();

        // Drain the channel and keep only the freshest frame; stale audio
        // is worthless for a live readout.
        let mut latest = None;
        while let Ok(frame) = frames.try_recv() {
            latest = Some(frame);
        }

        if let Some(frame) = latest {
            let state = session.process_frame(&frame, sample_rate, tick_started);
            if json {
                writeln!(stdout, "{}", serde_json::to_string(&state)?)?;
            } else {
                write!(stdout, "\r\x1b[K{}", render::format_state(&state))?;
                stdout.flush()?;
            }
        }

        let elapsed = tick_started.elapsed();
        if elapsed < TICK_INTERVAL {
            thread::sleep(TICK_INTERVAL - elapsed);
        }
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .try_init();
}
