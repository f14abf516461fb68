//! A headless scene that steers a box with controller input and draws it
//! through the debug overlay every frame.

use std::fmt;

use pinewood_core::color::PackedColor;
use pinewood_core::math::{binary_angle_to_radians, translation, Vec3};
use pinewood_debug_drawer::{DebugDrawRenderer, DebugDrawer, DebugDrawerContext, RenderStats};
use pinewood_graphics::{DisplayListInterpreter, GfxPool, GraphicsError};
use pinewood_input::{
    Buttons, ControllerRegistry, ControllerState, ControllerStatus, InputError, Pad, MAX_PORTS,
};

use crate::config::DemoConfig;

/// World units moved per frame at full stick deflection.
const MOVE_SPEED: f32 = 0.5;
/// Yaw change per frame while a C button is held.
const TURN_SPEED: i16 = 0x400;
const PLAYER_BOUNDS: [f32; 3] = [40.0, 80.0, 40.0];
/// The arena spans `-ARENA_EXTENT..=ARENA_EXTENT` on X and Z.
const ARENA_EXTENT: f32 = 1000.0;
const GRID_STEP: f32 = 250.0;
const GRID_WIDTH: u32 = 2;
const HEADING_LENGTH: f32 = 300.0;
const CAMERA_OFFSET: [f32; 3] = [0.0, 400.0, 1200.0];

const GRID_COLOR: PackedColor = PackedColor(0xFF40_4040);
const HEADING_COLOR: PackedColor = PackedColor::GREEN;
const PLAYER_COLOR: PackedColor = PackedColor(0x7F00_80FF);
const BUMP_COLOR: PackedColor = PackedColor(0x7FFF_FF00);

/// Errors that stop the demo loop.
#[derive(Debug)]
pub enum DemoError {
    Input(InputError),
    Graphics(GraphicsError),
}

impl fmt::Display for DemoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DemoError::Input(err) => write!(f, "input: {err}"),
            DemoError::Graphics(err) => write!(f, "graphics: {err}"),
        }
    }
}

impl std::error::Error for DemoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DemoError::Input(err) => Some(err),
            DemoError::Graphics(err) => Some(err),
        }
    }
}

impl From<InputError> for DemoError {
    fn from(err: InputError) -> Self {
        DemoError::Input(err)
    }
}

impl From<GraphicsError> for DemoError {
    fn from(err: GraphicsError) -> Self {
        DemoError::Graphics(err)
    }
}

/// The steered box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    pub position: Vec3,
    /// Binary angle, `0x10000` per turn.
    pub yaw: i16,
}

impl Default for Player {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            yaw: 0,
        }
    }
}

/// What one [`OverlayDemo::step`] produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameReport {
    pub frame: u64,
    pub pad: Pad,
    pub player: Player,
    pub overlay_visible: bool,
    /// Shapes queued this frame, after capacity truncation.
    pub shapes: usize,
    /// Shapes dropped for capacity.
    pub dropped: usize,
    pub render: RenderStats,
    /// Triangles the frame's display list resolves to.
    pub triangles: usize,
}

pub struct OverlayDemo {
    registry: ControllerRegistry,
    controller: ControllerState,
    drawer: DebugDrawer,
    renderer: DebugDrawRenderer,
    pool: GfxPool,
    player: Player,
    overlay_visible: bool,
    bumped: bool,
    frame: u64,
}

impl OverlayDemo {
    /// Build the demo around `registry` and initialize its controllers.
    pub fn new(config: &DemoConfig, mut registry: ControllerRegistry) -> Self {
        let mut status = [ControllerStatus::default(); MAX_PORTS];
        let connected = registry.init(&mut status);
        log::info!(
            "Overlay demo: controllers {connected:#06b}, pool {} bytes",
            config.pool_bytes
        );

        Self {
            registry,
            controller: ControllerState::default(),
            drawer: DebugDrawer::with_config(config.debug_draw.clone()),
            renderer: DebugDrawRenderer::new(),
            pool: GfxPool::new(config.pool_bytes),
            player: Player::default(),
            overlay_visible: true,
            bumped: false,
            frame: 0,
        }
    }

    pub fn player(&self) -> Player {
        self.player
    }

    pub fn pool(&self) -> &GfxPool {
        &self.pool
    }

    pub fn registry_mut(&mut self) -> &mut ControllerRegistry {
        &mut self.registry
    }

    /// Poll input, move the player, draw and flush one frame.
    pub fn step(&mut self) -> Result<FrameReport, DemoError> {
        let pad = self.poll()?;
        self.update_player();

        self.pool.reset();
        self.drawer.begin_frame();
        if self.overlay_visible {
            let mut ctx = self.drawer.context();
            self.draw_scene(&mut ctx);
        }

        let camera = self.player.position + Vec3::from(CAMERA_OFFSET);
        self.renderer.update_view(translation(&-camera));
        let shapes = self.drawer.end_frame();
        let render = self.renderer.render(&shapes, &mut self.pool);
        let triangles = DisplayListInterpreter::new(&self.pool).run()?.len();

        let report = FrameReport {
            frame: self.frame,
            pad,
            player: self.player,
            overlay_visible: self.overlay_visible,
            shapes: shapes.len(),
            dropped: shapes.dropped_boxes + shapes.dropped_rects,
            render,
            triangles,
        };
        self.frame += 1;
        Ok(report)
    }

    fn poll(&mut self) -> Result<Pad, InputError> {
        let mut pads = [Pad::default(); MAX_PORTS];
        self.registry.start_read()?;
        self.registry.fetch_pads(&mut pads);
        self.controller.update(&pads[0]);

        if let Some(key) = self.registry.raw_key() {
            log::debug!("Key pressed: {key}");
        }
        Ok(pads[0])
    }

    fn update_player(&mut self) {
        if self.controller.was_pressed(Buttons::START) {
            self.overlay_visible = !self.overlay_visible;
            log::info!(
                "Debug overlay {}",
                if self.overlay_visible { "shown" } else { "hidden" }
            );
        }
        if self.controller.is_down(Buttons::L_CBUTTONS) {
            self.player.yaw = self.player.yaw.wrapping_add(TURN_SPEED);
        }
        if self.controller.is_down(Buttons::R_CBUTTONS) {
            self.player.yaw = self.player.yaw.wrapping_sub(TURN_SPEED);
        }

        let position = &mut self.player.position;
        position.x += self.controller.stick_x * MOVE_SPEED;
        position.z -= self.controller.stick_y * MOVE_SPEED;

        let limit = ARENA_EXTENT - PLAYER_BOUNDS[0];
        let clamped = Vec3::new(
            position.x.clamp(-limit, limit),
            position.y,
            position.z.clamp(-limit, limit),
        );
        let bumped = clamped != *position;
        *position = clamped;

        if bumped && !self.bumped {
            self.registry.rumble_play(0.5, 200);
        } else if !bumped && self.bumped {
            self.registry.rumble_stop();
        }
        self.bumped = bumped;
    }

    fn draw_scene(&self, ctx: &mut DebugDrawerContext<'_>) {
        let steps = (2.0 * ARENA_EXTENT / GRID_STEP) as usize;
        for i in 0..=steps {
            let offset = -ARENA_EXTENT + i as f32 * GRID_STEP;
            ctx.debug_rect(
                [offset, 0.0, -ARENA_EXTENT],
                [offset, 0.0, ARENA_EXTENT],
                GRID_WIDTH,
                GRID_COLOR,
            );
            ctx.debug_rect(
                [-ARENA_EXTENT, 0.0, offset],
                [ARENA_EXTENT, 0.0, offset],
                GRID_WIDTH,
                GRID_COLOR,
            );
        }

        let p = self.player.position;
        let center = [p.x, p.y + PLAYER_BOUNDS[1], p.z];
        ctx.set_box_color(if self.bumped { BUMP_COLOR } else { PLAYER_COLOR });
        ctx.debug_box_rot(center, PLAYER_BOUNDS, self.player.yaw);
        ctx.debug_rect_heading(
            center,
            0.0,
            binary_angle_to_radians(self.player.yaw),
            HEADING_LENGTH,
            GRID_WIDTH * 2,
            HEADING_COLOR,
        );
    }
}
