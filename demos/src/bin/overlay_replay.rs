//! # Overlay Replay
//!
//! Runs the overlay demo headless for a fixed number of frames, driven by
//! a controller recording, and logs what each frame drew.
//!
//! ```bash
//! overlay_replay --config demos/assets/overlay.toml --recording cont.m64 --frames 600
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use pinewood_demos::{DemoConfig, OverlayDemo};
use pinewood_input::{ControllerRegistry, InputRecorder};

/// Replay controller input through the debug overlay.
#[derive(Parser, Debug)]
#[command(name = "overlay_replay", version)]
struct Args {
    /// TOML config file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Recording to play back, overriding the config.
    #[arg(long)]
    recording: Option<PathBuf>,

    /// Number of frames to run.
    #[arg(long, default_value = "300")]
    frames: u64,

    /// Graphics pool size in bytes, overriding the config.
    #[arg(long)]
    pool_bytes: Option<usize>,

    /// Write the polled pads to a new recording.
    #[arg(long)]
    record: Option<PathBuf>,

    /// Log a summary every N frames.
    #[arg(long, default_value = "60")]
    report_every: u64,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    pinewood_core::init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => DemoConfig::load(path)?,
        None => DemoConfig::default(),
    };
    if let Some(path) = args.recording {
        config.input.recording.path = path;
    }
    if let Some(bytes) = args.pool_bytes {
        config.pool_bytes = bytes;
    }

    let (registry, _handles) = ControllerRegistry::with_builtin_backends(&config.input);
    let mut demo = OverlayDemo::new(&config, registry);
    let mut recorder = args.record.as_deref().map(InputRecorder::create).transpose()?;

    let mut triangles = 0;
    let mut skipped = 0;
    let mut dropped = 0;
    for _ in 0..args.frames {
        let report = demo.step()?;
        if let Some(recorder) = recorder.as_mut() {
            recorder.record(&report.pad)?;
        }

        triangles += report.triangles;
        skipped += report.render.shapes_skipped;
        dropped += report.dropped;
        if args.report_every > 0 && report.frame % args.report_every == 0 {
            log::info!(
                "frame {}: buttons {:#06x}, stick ({}, {}), player ({:.0}, {:.0}) yaw {:#06x}, {} shapes, {} triangles, {} pool bytes",
                report.frame,
                report.pad.button.bits(),
                report.pad.stick_x,
                report.pad.stick_y,
                report.player.position.x,
                report.player.position.z,
                report.player.yaw,
                report.shapes,
                report.triangles,
                report.render.bytes_used
            );
        }
    }

    if let Some(recorder) = recorder {
        let frames = recorder.frames();
        recorder.finish()?;
        log::info!("Recorded {frames} frames");
    }
    log::info!(
        "Ran {} frames: {triangles} triangles, {skipped} shapes skipped for pool space, {dropped} dropped for capacity",
        args.frames
    );
    demo.registry_mut().shutdown();
    Ok(())
}
