//! Per-frame orchestration
//!
//! One call to [`Engine::frame`] runs a whole tick in a fixed order:
//! 1. apply input commands
//! 2. step the physics once (unless paused)
//! 3. clear the framebuffer
//! 4. draw the wireframe cube
//! 5. draw particles in index order (plus the optional mosaic pass)
//! 6. hand back the buffer and overlay values

use std::fmt;

use glam::Vec3;

use crate::camera::{Camera, Viewport};
use crate::consts::CLEAR_COLOR;
use crate::renderer::{
    CUBE_EDGES, CUBE_VERTICES, Lighting, PixelBuffer, draw_particles, draw_wireframe_cube, pick,
};
use crate::settings::{Settings, SettingsError};
use crate::sim::{ParticleId, PhysicsConfig, SimState, SpawnError, random_color};

/// Discrete camera controls, each one fixed step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CameraCommand {
    YawLeft,
    YawRight,
    PitchUp,
    PitchDown,
    Forward,
    Backward,
    StrafeLeft,
    StrafeRight,
    /// Toward -y (up on screen)
    Up,
    Down,
}

/// Input for the core, already mapped from raw events by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Camera(CameraCommand),
    Spawn,
    TogglePause,
    ToggleGravity,
    /// Select whatever particle is under this pixel (or clear the selection)
    SelectAt { x: i32, y: i32 },
    SelectNext,
    ClearSelection,
}

/// Commands for a single frame, applied in order
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub commands: Vec<Command>,
}

impl FrameInput {
    pub fn new(commands: impl IntoIterator<Item = Command>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
        }
    }
}

/// Plain values describing the selected particle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParticleSnapshot {
    pub id: ParticleId,
    pub position: Vec3,
    pub velocity: Vec3,
    pub speed: f32,
    pub radius: f32,
}

/// Values the presentation layer turns into overlay text
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlaySummary {
    pub particle_count: usize,
    pub paused: bool,
    pub gravity: bool,
    pub selected: Option<ParticleSnapshot>,
}

/// A finished frame
#[derive(Debug)]
pub struct Frame<'a> {
    pub buffer: &'a PixelBuffer,
    pub summary: OverlaySummary,
}

/// Why an engine could not be built
#[derive(Debug)]
pub enum EngineError {
    /// Settings failed validation
    Settings(SettingsError),
    /// The initial particles could not be spawned
    Spawn(SpawnError),
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EngineError::Settings(e) => write!(f, "{e}"),
            EngineError::Spawn(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for EngineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EngineError::Settings(e) => Some(e),
            EngineError::Spawn(e) => Some(e),
        }
    }
}

impl From<SettingsError> for EngineError {
    fn from(e: SettingsError) -> Self {
        EngineError::Settings(e)
    }
}

impl From<SpawnError> for EngineError {
    fn from(e: SpawnError) -> Self {
        EngineError::Spawn(e)
    }
}

/// Owns the simulation, camera and framebuffer for the frame loop
#[derive(Debug, Clone)]
pub struct Engine {
    settings: Settings,
    sim: SimState,
    camera: Camera,
    physics: PhysicsConfig,
    lighting: Option<Lighting>,
    paused: bool,
    buffer: PixelBuffer,
    frame_count: u64,
}

impl Engine {
    /// Validate the settings, build an engine and spawn the initial particles
    pub fn new(settings: Settings) -> Result<Self, EngineError> {
        settings.validate()?;
        let sim = SimState::new(settings.seed, settings.radius, settings.max_particles);
        let buffer = PixelBuffer::new(settings.viewport.width, settings.viewport.height);

        let mut engine = Self {
            camera: settings.camera(),
            physics: settings.physics(),
            lighting: settings.lighting(),
            paused: false,
            frame_count: 0,
            sim,
            buffer,
            settings,
        };

        for _ in 0..engine.settings.initial_particles {
            engine.spawn()?;
        }
        log::info!(
            "Engine ready: {} particles, {}x{}, preset {}",
            engine.sim.len(),
            engine.settings.viewport.width,
            engine.settings.viewport.height,
            engine.settings.preset.as_str()
        );

        Ok(engine)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn sim(&self) -> &SimState {
        &self.sim
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn viewport(&self) -> &Viewport {
        &self.settings.viewport
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn gravity_enabled(&self) -> bool {
        self.physics.gravity_enabled
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Spawn one particle using the configured velocity scale and color source
    pub fn spawn(&mut self) -> Result<ParticleId, SpawnError> {
        let color = if self.settings.random_colors {
            random_color(self.sim.rng_mut())
        } else {
            self.settings.particle_color
        };
        let id = self.sim.spawn(self.settings.velocity_scale, color)?;
        log::debug!("Spawned particle {} (color {:#010x})", id.index(), color);
        Ok(id)
    }

    /// First particle whose on-screen disc covers `(x, y)`
    pub fn pick(&self, x: i32, y: i32) -> Option<ParticleId> {
        pick(&self.camera, &self.settings.viewport, self.sim.particles(), x, y)
    }

    /// Apply one command
    ///
    /// Only a failed allocation is returned as an error; a full fixed-size
    /// store just refuses the spawn.
    pub fn apply(&mut self, command: Command) -> Result<(), SpawnError> {
        match command {
            Command::Camera(cmd) => self.apply_camera(cmd),
            Command::Spawn => match self.spawn() {
                Ok(_) => {}
                Err(SpawnError::CapacityReached { capacity }) => {
                    log::warn!("Spawn ignored: store full at {capacity} particles");
                }
                Err(e) => return Err(e),
            },
            Command::TogglePause => {
                self.paused = !self.paused;
                log::info!("Simulation {}", if self.paused { "paused" } else { "resumed" });
            }
            Command::ToggleGravity => {
                self.physics.gravity_enabled = !self.physics.gravity_enabled;
                log::info!("Gravity {}", if self.physics.gravity_enabled { "on" } else { "off" });
            }
            Command::SelectAt { x, y } => {
                let hit = self.pick(x, y);
                self.sim.select(hit);
                log::debug!("Select at ({x}, {y}) -> {hit:?}");
            }
            Command::SelectNext => {
                let next = self.sim.select_next();
                log::debug!("Select next -> {next:?}");
            }
            Command::ClearSelection => self.sim.select(None),
        }
        Ok(())
    }

    fn apply_camera(&mut self, cmd: CameraCommand) {
        let turn = self.settings.rotate_step;
        let step = self.settings.move_step;
        match cmd {
            CameraCommand::YawLeft => self.camera.rotate_by(0.0, turn),
            CameraCommand::YawRight => self.camera.rotate_by(0.0, -turn),
            CameraCommand::PitchUp => self.camera.rotate_by(turn, 0.0),
            CameraCommand::PitchDown => self.camera.rotate_by(-turn, 0.0),
            CameraCommand::Forward => self.camera.move_by(step, 0.0, 0.0),
            CameraCommand::Backward => self.camera.move_by(-step, 0.0, 0.0),
            CameraCommand::StrafeLeft => self.camera.move_by(0.0, -step, 0.0),
            CameraCommand::StrafeRight => self.camera.move_by(0.0, step, 0.0),
            CameraCommand::Up => self.camera.move_by(0.0, 0.0, -step),
            CameraCommand::Down => self.camera.move_by(0.0, 0.0, step),
        }
    }

    /// Snapshot of overlay values for the current state
    pub fn summary(&self) -> OverlaySummary {
        let selected = self.sim.selected().and_then(|id| {
            self.sim.get(id).map(|p| ParticleSnapshot {
                id,
                position: p.position,
                velocity: p.velocity,
                speed: p.speed(),
                radius: p.radius,
            })
        });
        OverlaySummary {
            particle_count: self.sim.len(),
            paused: self.paused,
            gravity: self.physics.gravity_enabled,
            selected,
        }
    }

    /// Run one full tick and return the finished frame
    pub fn frame(&mut self, input: &FrameInput) -> Result<Frame<'_>, SpawnError> {
        for &command in &input.commands {
            self.apply(command)?;
        }

        if !self.paused {
            let stats = self.sim.step(&self.physics, self.settings.dt);
            log::trace!(
                "tick {}: {} contacts, {} wall hits",
                self.sim.time_ticks,
                stats.pair_contacts,
                stats.wall_hits
            );
        }

        self.render();
        self.frame_count += 1;

        Ok(Frame {
            buffer: &self.buffer,
            summary: self.summary(),
        })
    }

    /// Redraw the framebuffer from the current state without stepping
    pub fn render(&mut self) {
        let viewport = self.settings.viewport;
        self.buffer.clear(CLEAR_COLOR);
        draw_wireframe_cube(
            &mut self.buffer,
            &self.camera,
            &viewport,
            &CUBE_VERTICES,
            &CUBE_EDGES,
            self.settings.cube_color,
        );
        draw_particles(
            &mut self.buffer,
            &self.camera,
            &viewport,
            self.sim.particles(),
            self.lighting.as_ref(),
        );

        let cell = self.settings.preset.pixelate_cell();
        if cell > 1 {
            self.buffer.pixelate(cell);
        }
    }
}
