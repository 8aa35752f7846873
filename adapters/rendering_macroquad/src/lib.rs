#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Lane Defence.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature. Consumers that need sound playback can opt back
//! in by enabling `macroquad/audio` in their own `Cargo.toml` dependency
//! specification.

use std::time::{Duration, Instant};

use anyhow::Result;
use glam::Vec2;
use lane_defence_core::Tool;
use lane_defence_rendering::{
    Color, DragGhost, FrameInput, GridPresentation, Overlay, PointerInput, Presentation,
    RenderingBackend, Scene, SceneProjectile, SceneUnit, StatusReadout, SupplySlotPresentation,
};
use macroquad::{
    input::{
        is_key_pressed, is_mouse_button_pressed, is_mouse_button_released, mouse_position,
        KeyCode, MouseButton,
    },
    shapes::{draw_circle, draw_line, draw_rectangle, draw_rectangle_lines},
    text::{draw_text, measure_text},
};

const HP_BAR_HEIGHT: f32 = 6.0;
const HP_BAR_INSET: f32 = 4.0;
const STATUS_FONT_SIZE: f32 = 28.0;
const OVERLAY_FONT_SIZE: f32 = 48.0;
const OVERLAY_HINT_FONT_SIZE: f32 = 24.0;

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the frame loop.
    quit_requested: bool,
    /// `Enter` or `Space` confirms the title screen.
    confirm: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        Self {
            quit_requested: is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q),
            confirm: is_key_pressed(KeyCode::Enter) || is_key_pressed(KeyCode::Space),
        }
    }
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the average once a second elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<f32> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = if seconds <= f32::EPSILON {
            0.0
        } else {
            self.frames as f32 / seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(per_second)
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the
    /// display refresh rate or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            terminal_hold,
            scene,
        } = presentation;

        let grid = scene.grid.grid;
        let mut config = macroquad::window::Conf {
            window_title,
            window_width: grid.viewport_width() as i32,
            window_height: grid.viewport_height() as i32,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();
            let mut terminal_since: Option<Instant> = None;

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let frame_input = gather_frame_input(keyboard);

                update_scene(frame_dt, frame_input, &mut scene);

                macroquad::window::clear_background(background);
                draw_strips(&scene.grid);
                draw_supply_slots(&scene.supply_slots);
                draw_grid_lines(&scene.grid);
                draw_units(&scene.defenders);
                draw_units(&scene.hostiles);
                draw_projectiles(&scene.projectiles);
                draw_status(&scene.grid, scene.status);
                if let Some(ghost) = scene.ghost {
                    draw_ghost(&ghost);
                }

                match scene.overlay {
                    Some(overlay) => {
                        draw_overlay(overlay, &scene.grid);
                        if overlay.is_terminal() {
                            let since = terminal_since.get_or_insert_with(Instant::now);
                            if since.elapsed() >= terminal_hold {
                                break;
                            }
                        } else {
                            terminal_since = None;
                        }
                    }
                    None => terminal_since = None,
                }

                if show_fps {
                    if let Some(per_second) = fps_counter.record_frame(frame_dt) {
                        println!("FPS: {per_second:.2}");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

fn gather_frame_input(keyboard: KeyboardShortcuts) -> FrameInput {
    let (mouse_x, mouse_y) = mouse_position();
    FrameInput {
        confirm_pressed: keyboard.confirm,
        pointer: PointerInput {
            position: Vec2::new(mouse_x, mouse_y),
            pressed: is_mouse_button_pressed(MouseButton::Left),
            released: is_mouse_button_released(MouseButton::Left),
        },
    }
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}

fn draw_strips(grid: &GridPresentation) {
    let geometry = grid.grid;
    let strip = to_macroquad_color(grid.strip_color);

    draw_rectangle(
        0.0,
        0.0,
        geometry.viewport_width(),
        geometry.status_strip_height(),
        strip,
    );
    draw_rectangle(
        0.0,
        geometry.top(),
        geometry.supply_strip_width(),
        geometry.height(),
        strip,
    );
    draw_rectangle(
        geometry.left(),
        geometry.top(),
        geometry.width(),
        geometry.height(),
        to_macroquad_color(grid.field_color),
    );
}

fn draw_grid_lines(grid: &GridPresentation) {
    let geometry = grid.grid;
    let color = to_macroquad_color(grid.line_color);
    let cell = geometry.cell_size();

    for column in 0..=geometry.columns() {
        let x = geometry.left() + column as f32 * cell;
        draw_line(x, geometry.top(), x, geometry.bottom(), 1.0, color);
    }
    for row in 0..=geometry.rows() {
        let y = geometry.top() + row as f32 * cell;
        draw_line(geometry.left(), y, geometry.right(), y, 1.0, color);
    }
}

fn draw_supply_slots(slots: &[SupplySlotPresentation]) {
    for slot in slots {
        let color = if slot.affordable {
            slot.color
        } else {
            slot.color.with_alpha(0.35)
        };
        draw_rectangle(
            slot.rect.x(),
            slot.rect.y(),
            slot.rect.width(),
            slot.rect.height(),
            to_macroquad_color(color),
        );
        draw_rectangle_lines(
            slot.rect.x(),
            slot.rect.y(),
            slot.rect.width(),
            slot.rect.height(),
            2.0,
            to_macroquad_color(color.lighten(0.4)),
        );
        if slot.tool == Tool::Remove {
            draw_tool_cross(
                slot.rect.x(),
                slot.rect.y(),
                slot.rect.width(),
                slot.rect.height(),
                to_macroquad_color(color.lighten(0.6)),
            );
        }
    }
}

fn draw_tool_cross(x: f32, y: f32, width: f32, height: f32, color: macroquad::color::Color) {
    let inset_x = width * 0.2;
    let inset_y = height * 0.2;
    draw_line(
        x + inset_x,
        y + inset_y,
        x + width - inset_x,
        y + height - inset_y,
        3.0,
        color,
    );
    draw_line(
        x + width - inset_x,
        y + inset_y,
        x + inset_x,
        y + height - inset_y,
        3.0,
        color,
    );
}

fn draw_units(units: &[SceneUnit]) {
    for unit in units {
        draw_rectangle(
            unit.rect.x(),
            unit.rect.y(),
            unit.rect.width(),
            unit.rect.height(),
            to_macroquad_color(unit.color),
        );
        draw_hp_bar(unit);
    }
}

fn draw_hp_bar(unit: &SceneUnit) {
    let bar_x = unit.rect.x() + HP_BAR_INSET;
    let bar_y = unit.rect.y() + HP_BAR_INSET;
    let bar_width = unit.rect.width() - 2.0 * HP_BAR_INSET;

    draw_rectangle(
        bar_x,
        bar_y,
        bar_width,
        HP_BAR_HEIGHT,
        to_macroquad_color(Color::new(0.15, 0.15, 0.15, 0.9)),
    );
    draw_rectangle(
        bar_x,
        bar_y,
        bar_width * unit.hp_fraction(),
        HP_BAR_HEIGHT,
        to_macroquad_color(Color::new(0.2, 0.85, 0.3, 1.0)),
    );
}

fn draw_projectiles(projectiles: &[SceneProjectile]) {
    for projectile in projectiles {
        draw_circle(
            projectile.center.x,
            projectile.center.y,
            projectile.radius,
            to_macroquad_color(projectile.color),
        );
    }
}

fn draw_status(grid: &GridPresentation, status: StatusReadout) {
    let baseline = grid.grid.status_strip_height() * 0.625;
    let text_color = to_macroquad_color(Color::from_rgb_u8(0x10, 0x10, 0x10));
    draw_text(
        &format!("score: {}", status.score),
        20.0,
        baseline,
        STATUS_FONT_SIZE,
        text_color,
    );
    draw_text(
        &format!("funds: {}", status.balance),
        220.0,
        baseline,
        STATUS_FONT_SIZE,
        text_color,
    );
}

fn draw_ghost(ghost: &DragGhost) {
    let half = ghost.footprint / 2.0;
    let x = ghost.position.x - half;
    let y = ghost.position.y - half;
    draw_rectangle(
        x,
        y,
        ghost.footprint,
        ghost.footprint,
        to_macroquad_color(ghost.color),
    );
    if ghost.tool == Tool::Remove {
        draw_tool_cross(
            x,
            y,
            ghost.footprint,
            ghost.footprint,
            to_macroquad_color(ghost.color.lighten(0.5)),
        );
    }
}

fn draw_overlay(overlay: Overlay, grid: &GridPresentation) {
    let geometry = grid.grid;
    draw_rectangle(
        0.0,
        0.0,
        geometry.viewport_width(),
        geometry.viewport_height(),
        to_macroquad_color(Color::new(0.0, 0.0, 0.0, 0.6)),
    );

    let (headline, hint) = match overlay {
        Overlay::Title => ("Lane Defence", "press Enter to start"),
        Overlay::Victory => ("Victory!", "the field is clear"),
        Overlay::Defeat => ("Defeat...", "the line was breached"),
    };
    let headline_color = to_macroquad_color(Color::from_rgb_u8(0xf5, 0xf5, 0xf5));

    draw_centered_text(
        headline,
        geometry.viewport_width(),
        geometry.viewport_height() * 0.45,
        OVERLAY_FONT_SIZE,
        headline_color,
    );
    draw_centered_text(
        hint,
        geometry.viewport_width(),
        geometry.viewport_height() * 0.55,
        OVERLAY_HINT_FONT_SIZE,
        headline_color,
    );
}

fn draw_centered_text(
    text: &str,
    viewport_width: f32,
    baseline: f32,
    font_size: f32,
    color: macroquad::color::Color,
) {
    let dimensions = measure_text(text, None, font_size as u16, 1.0);
    draw_text(
        text,
        (viewport_width - dimensions.width) / 2.0,
        baseline,
        font_size,
        color,
    );
}
