#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Lane Defence experience.
//!
//! The frame order is fixed: pointer input feeds the placement system, the
//! confirm key feeds the state machine, the world ticks, and the spawner
//! reacts to the tick's events. Input handling always precedes the tick and
//! never interleaves with it.

mod tuning;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use glam::Vec2;
use lane_defence_core::{supply_slots, Command, DefenderKind, GamePhase, HostileTier, Tool};
use lane_defence_rendering::{
    Color, DragGhost, GridPresentation, Overlay, Presentation, RenderingBackend, Scene,
    SceneProjectile, SceneUnit, StatusReadout, SupplySlotPresentation,
};
use lane_defence_rendering_macroquad::MacroquadBackend;
use lane_defence_system_bootstrap::Bootstrap;
use lane_defence_system_placement::{Placement, PointerFrame};
use lane_defence_system_spawning::{Config as SpawnConfig, Spawning};
use lane_defence_world::{self as world, query, World};

const WINDOW_TITLE: &str = "Lane Defence";

const CLEAR_COLOR: Color = Color::from_rgb_u8(0x00, 0x80, 0x00);
const FIELD_COLOR: Color = Color::from_rgb_u8(0x1e, 0x8c, 0x1e);
const GRID_LINE_COLOR: Color = Color::from_rgb_u8(0xff, 0xff, 0xff);
const STRIP_COLOR: Color = Color::from_rgb_u8(0xc8, 0xc8, 0xc8);
const ATTACKER_COLOR: Color = Color::from_rgb_u8(0x00, 0x00, 0xff);
const WALL_COLOR: Color = Color::from_rgb_u8(0x46, 0x5a, 0x96);
const REMOVE_TOOL_COLOR: Color = Color::from_rgb_u8(0xb4, 0x3c, 0x3c);
const WALKER_COLOR: Color = Color::from_rgb_u8(0xff, 0x00, 0x00);
const SPRINTER_COLOR: Color = Color::from_rgb_u8(0xff, 0x78, 0x1e);
const JUGGERNAUT_COLOR: Color = Color::from_rgb_u8(0x8c, 0x14, 0x14);
const PROJECTILE_COLOR: Color = Color::from_rgb_u8(0xff, 0xe1, 0x3c);

/// Command-line arguments accepted by the Lane Defence binary.
#[derive(Debug, Parser)]
#[command(name = "lane-defence", about = "A lane-defence battle simulation")]
struct Args {
    /// Seed for the spawn generator; drawn from entropy when omitted.
    #[arg(long)]
    seed: Option<u64>,
    /// Path to a TOML tuning file overriding the default battle configuration.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Render as fast as possible instead of synchronising with the display.
    #[arg(long)]
    no_vsync: bool,
    /// Print frame timing metrics once per second.
    #[arg(long)]
    show_fps: bool,
}

/// Entry point for the Lane Defence command-line interface.
fn main() -> Result<()> {
    let args = Args::parse();
    let config = tuning::load(args.config.as_deref())?;
    let seed = args.seed.unwrap_or_else(rand::random);

    let mut world = World::new();
    let mut events = Vec::new();
    world::apply(
        &mut world,
        Command::ConfigureBattle {
            config: config.clone(),
        },
        &mut events,
    );

    let bootstrap = Bootstrap::default();
    println!("{}", bootstrap.welcome_banner(&world));
    println!("spawn seed: {seed}");

    let mut spawning = Spawning::new(SpawnConfig::new(config.spawn_interval(), seed));
    let mut placement = Placement::new();

    let scene = populate_scene(&world, &placement, Vec2::ZERO);
    let presentation = Presentation::new(WINDOW_TITLE, CLEAR_COLOR, config.terminal_hold(), scene);

    let backend = MacroquadBackend::new()
        .with_vsync(!args.no_vsync)
        .with_show_fps(args.show_fps);

    backend.run(presentation, move |dt, input, scene| {
        let mut commands = Vec::new();

        let pointer = PointerFrame::new(
            input.pointer.position.x,
            input.pointer.position.y,
            input.pointer.pressed,
            input.pointer.released,
        );
        placement.handle(
            query::phase(&world),
            pointer,
            query::grid(&world),
            |cell| query::defender_at(&world, cell),
            &mut commands,
        );

        if input.confirm_pressed && query::phase(&world) == GamePhase::Title {
            commands.push(Command::StartBattle);
        }
        commands.push(Command::Tick { dt });

        let mut events = Vec::new();
        for command in commands.drain(..) {
            world::apply(&mut world, command, &mut events);
        }

        spawning.handle(
            &events,
            query::phase(&world),
            query::config(&world),
            &mut commands,
        );
        for command in commands.drain(..) {
            world::apply(&mut world, command, &mut events);
        }

        *scene = populate_scene(&world, &placement, input.pointer.position);
    })
}

fn populate_scene(world: &World, placement: &Placement, pointer: Vec2) -> Scene {
    let grid = *query::grid(world);
    let config = query::config(world);
    let balance = query::balance(world);

    let supply = supply_slots(&grid)
        .iter()
        .map(|slot| SupplySlotPresentation {
            tool: slot.tool,
            rect: slot.rect,
            color: tool_color(slot.tool),
            affordable: match slot.tool {
                Tool::Place(kind) => balance >= config.defender(kind).cost,
                Tool::Remove => true,
            },
        })
        .collect();

    let defenders = query::defender_view(world)
        .iter()
        .map(|defender| {
            SceneUnit::new(
                defender.rect,
                defender_color(defender.kind),
                defender.hp,
                defender.max_hp,
            )
        })
        .collect();

    let hostiles = query::hostile_view(world)
        .iter()
        .map(|hostile| {
            SceneUnit::new(
                hostile.rect,
                tier_color(hostile.tier),
                hostile.hp,
                hostile.max_hp,
            )
        })
        .collect();

    let projectiles = query::projectile_view(world)
        .iter()
        .map(|projectile| SceneProjectile {
            center: Vec2::new(projectile.x, projectile.y),
            radius: config.projectile_radius,
            color: PROJECTILE_COLOR,
        })
        .collect();

    let ghost = placement.active_tool().map(|tool| DragGhost {
        tool,
        position: pointer,
        footprint: grid.cell_size(),
        color: tool_color(tool).with_alpha(0.5),
    });

    let overlay = match query::phase(world) {
        GamePhase::Title => Some(Overlay::Title),
        GamePhase::Playing => None,
        GamePhase::Victory => Some(Overlay::Victory),
        GamePhase::Defeat => Some(Overlay::Defeat),
    };

    Scene::new(
        GridPresentation::new(grid, GRID_LINE_COLOR, FIELD_COLOR, STRIP_COLOR),
        StatusReadout {
            balance,
            score: query::score(world),
        },
        supply,
        defenders,
        hostiles,
        projectiles,
        ghost,
        overlay,
    )
}

fn tool_color(tool: Tool) -> Color {
    match tool {
        Tool::Place(kind) => defender_color(kind),
        Tool::Remove => REMOVE_TOOL_COLOR,
    }
}

fn defender_color(kind: DefenderKind) -> Color {
    match kind {
        DefenderKind::Attacker => ATTACKER_COLOR,
        DefenderKind::Wall => WALL_COLOR,
    }
}

fn tier_color(tier: HostileTier) -> Color {
    match tier {
        HostileTier::Walker => WALKER_COLOR,
        HostileTier::Sprinter => SPRINTER_COLOR,
        HostileTier::Juggernaut => JUGGERNAUT_COLOR,
    }
}
