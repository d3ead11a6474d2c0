//! Particle Box entry point
//!
//! Headless driver: there is no window here, so the frame loop runs a short
//! scripted session and logs the overlay text a presentation layer would draw.
//!
//! Usage: `particle-box [settings.json | flat | shaded | mosaic] [frames]`

use std::time::Instant;

use anyhow::{Context, Result};

use particle_box::{
    CameraCommand, Command, Engine, FrameInput, OverlaySummary, RenderPreset, Settings,
};

const DEFAULT_FRAMES: u64 = 600;

/// Rolling FPS over the last 60 frame timestamps
struct FpsCounter {
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
}

impl FpsCounter {
    fn new() -> Self {
        Self {
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
        }
    }

    fn record(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % 60;

        // Oldest sample sits at the next write slot
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = (59.0 / elapsed).round() as u32;
            }
        }
    }
}

/// Overlay lines, formatted the way the HUD shows them
fn overlay_lines(fps: u32, summary: &OverlaySummary) -> Vec<String> {
    let mut lines = vec![
        format!("FPS: {fps}"),
        format!("Particles: {}", summary.particle_count),
    ];
    if summary.paused {
        lines.push("PAUSED".to_string());
    }
    if summary.gravity {
        lines.push("Gravity: on".to_string());
    }
    if let Some(sel) = summary.selected {
        lines.push(format!(
            "Selected #{}: pos ({:.3}, {:.3}, {:.3})",
            sel.id.index(),
            sel.position.x,
            sel.position.y,
            sel.position.z
        ));
        lines.push(format!(
            "  vel ({:.3}, {:.3}, {:.3}) |v| {:.4} r {:.3}",
            sel.velocity.x, sel.velocity.y, sel.velocity.z, sel.speed, sel.radius
        ));
    }
    lines
}

/// Scripted input standing in for keyboard and mouse
fn scripted_input(frame: u64) -> FrameInput {
    let mut commands = Vec::new();
    if frame % 30 == 0 {
        commands.push(Command::Spawn);
    }
    if frame % 4 == 0 {
        commands.push(Command::Camera(CameraCommand::YawLeft));
    }
    match frame {
        120 => commands.push(Command::ToggleGravity),
        200 | 260 => commands.push(Command::SelectNext),
        300 | 360 => commands.push(Command::TogglePause),
        420 => commands.push(Command::SelectAt { x: 320, y: 240 }),
        _ => {}
    }
    FrameInput { commands }
}

fn run() -> Result<()> {
    let mut args = std::env::args().skip(1);

    let settings = match args.next() {
        Some(arg) => match RenderPreset::from_str(&arg) {
            Some(preset) => {
                log::info!("Using {} preset", preset.as_str());
                Settings::from_preset(preset)
            }
            None => Settings::load(&arg)
                .with_context(|| format!("loading settings from {arg}"))?,
        },
        None => {
            log::info!("Using default settings");
            Settings::default()
        }
    };
    let frames = match args.next() {
        Some(n) => n.parse::<u64>().with_context(|| format!("invalid frame count '{n}'"))?,
        None => DEFAULT_FRAMES,
    };

    let mut engine = Engine::new(settings).context("building engine")?;
    log::info!("Seed: {}", engine.sim().seed());
    let mut fps = FpsCounter::new();
    let start = Instant::now();

    for n in 0..frames {
        let input = scripted_input(n);
        let frame = engine.frame(&input).context("particle store allocation failed")?;

        fps.record(start.elapsed().as_secs_f64());
        if n % 60 == 0 {
            let lit = frame.buffer.count_not(0);
            log::info!("frame {n}: {lit} pixels drawn");
            for line in overlay_lines(fps.fps, &frame.summary) {
                log::info!("  {line}");
            }
        }
    }

    log::info!(
        "Done: {} frames in {:.2}s, {} particles",
        engine.frame_count(),
        start.elapsed().as_secs_f64(),
        engine.sim().len()
    );
    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Particle Box (headless) starting...");

    if let Err(e) = run() {
        log::error!("{e:#}");
        std::process::exit(1);
    }
}
