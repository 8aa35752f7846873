#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Lane Defence adapters.
//!
//! The simulation populates a [`Scene`] once per frame; rendering backends
//! consume it without knowing anything about the world or the systems that
//! produced it. Input flows the opposite way through [`FrameInput`].

use std::time::Duration;

use anyhow::Result as AnyResult;
use glam::Vec2;
use lane_defence_core::{BattlefieldGrid, Rect, Tool};

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Returns the same color with the provided alpha channel.
    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// Returns a new color lightened towards white by the provided amount.
    #[must_use]
    pub fn lighten(self, amount: f32) -> Self {
        let amount = amount.clamp(0.0, 1.0);

        Self {
            red: lighten_channel(self.red, amount),
            green: lighten_channel(self.green, amount),
            blue: lighten_channel(self.blue, amount),
            alpha: self.alpha,
        }
    }
}

fn lighten_channel(channel: f32, amount: f32) -> f32 {
    channel + (1.0 - channel) * amount
}

/// Pointer state captured by an adapter during a single frame.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct PointerInput {
    /// Pointer position expressed in world units.
    pub position: Vec2,
    /// Whether the primary button was pressed down on this frame.
    pub pressed: bool,
    /// Whether the primary button was released on this frame.
    pub released: bool,
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct FrameInput {
    /// Whether the adapter detected the confirm key on this frame.
    pub confirm_pressed: bool,
    /// Pointer state for drag-driven placement.
    pub pointer: PointerInput,
}

/// Battlefield grid enriched with the colors used to draw it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    /// Logical grid geometry shared with the simulation.
    pub grid: BattlefieldGrid,
    /// Color of the grid lines.
    pub line_color: Color,
    /// Fill color of the playable field behind the grid lines.
    pub field_color: Color,
    /// Fill color of the reserved status and supply strips.
    pub strip_color: Color,
}

impl GridPresentation {
    /// Creates a new grid presentation descriptor.
    #[must_use]
    pub const fn new(
        grid: BattlefieldGrid,
        line_color: Color,
        field_color: Color,
        strip_color: Color,
    ) -> Self {
        Self {
            grid,
            line_color,
            field_color,
            strip_color,
        }
    }
}

/// Currency and score figures shown in the status strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct StatusReadout {
    /// Current economy ledger balance.
    pub balance: u32,
    /// Current score counter.
    pub score: u32,
}

/// One supply-strip slot with its presentation state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SupplySlotPresentation {
    /// Tool granted by dragging from this slot.
    pub tool: Tool,
    /// World-space rectangle covered by the slot.
    pub rect: Rect,
    /// Fill color of the slot icon.
    pub color: Color,
    /// Whether the ledger currently covers the slot's cost. Unaffordable
    /// slots draw dimmed.
    pub affordable: bool,
}

/// Health-bearing entity drawn as a filled rectangle with an HP bar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneUnit {
    /// World-space rectangle covered by the unit.
    pub rect: Rect,
    /// Fill color of the unit body.
    pub color: Color,
    /// Remaining hit points. May be negative for one tick; the display
    /// clamps at zero.
    pub hp: i32,
    /// Hit points the unit started with.
    pub max_hp: i32,
}

impl SceneUnit {
    /// Creates a new unit descriptor.
    #[must_use]
    pub const fn new(rect: Rect, color: Color, hp: i32, max_hp: i32) -> Self {
        Self {
            rect,
            color,
            hp,
            max_hp,
        }
    }

    /// Filled fraction of the HP bar, clamped to the displayable range.
    #[must_use]
    pub fn hp_fraction(&self) -> f32 {
        if self.max_hp <= 0 {
            return 0.0;
        }
        (self.hp.max(0) as f32 / self.max_hp as f32).clamp(0.0, 1.0)
    }
}

/// Projectile drawn as a small filled circle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SceneProjectile {
    /// Center of the projectile in world units.
    pub center: Vec2,
    /// Display radius in world units.
    pub radius: f32,
    /// Fill color of the projectile.
    pub color: Color,
}

/// Ghost entity following the pointer during an active drag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragGhost {
    /// Tool carried by the drag.
    pub tool: Tool,
    /// Pointer position the ghost is centered on, in world units.
    pub position: Vec2,
    /// Side length of the ghost square in world units.
    pub footprint: f32,
    /// Fill color of the ghost, typically translucent.
    pub color: Color,
}

/// Full-screen overlay drawn above the battlefield.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlay {
    /// Opening screen awaiting the confirm input.
    Title,
    /// Battle won; the process exits after the terminal hold.
    Victory,
    /// Battle lost; the process exits after the terminal hold.
    Defeat,
}

impl Overlay {
    /// Reports whether the overlay marks a terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

/// Scene description combining the battlefield and every visible entity.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Battlefield grid and strip geometry.
    pub grid: GridPresentation,
    /// Currency and score shown in the status strip.
    pub status: StatusReadout,
    /// Supply-strip slots available for dragging.
    pub supply_slots: Vec<SupplySlotPresentation>,
    /// Defenders currently placed on the field.
    pub defenders: Vec<SceneUnit>,
    /// Hostiles currently advancing across the field.
    pub hostiles: Vec<SceneUnit>,
    /// Projectiles currently in flight.
    pub projectiles: Vec<SceneProjectile>,
    /// Ghost following the pointer while a drag is active.
    pub ghost: Option<DragGhost>,
    /// Overlay drawn above the battlefield, if any.
    pub overlay: Option<Overlay>,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    #[allow(clippy::too_many_arguments)] // Scene construction intentionally enumerates every channel explicitly.
    pub fn new(
        grid: GridPresentation,
        status: StatusReadout,
        supply_slots: Vec<SupplySlotPresentation>,
        defenders: Vec<SceneUnit>,
        hostiles: Vec<SceneUnit>,
        projectiles: Vec<SceneProjectile>,
        ghost: Option<DragGhost>,
        overlay: Option<Overlay>,
    ) -> Self {
        Self {
            grid,
            status,
            supply_slots,
            defenders,
            hostiles,
            projectiles,
            ghost,
            overlay,
        }
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Duration a terminal overlay is held before the backend exits.
    pub terminal_hold: Duration,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(window_title: T, clear_color: Color, terminal_hold: Duration, scene: Scene) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            terminal_hold,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Lane Defence scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the simulated frame
    /// delta and the per-frame input captured by the adapter, and mutates
    /// the scene before it is rendered. The backend exits on the quit input
    /// or once a terminal overlay has been held for the configured duration.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}
