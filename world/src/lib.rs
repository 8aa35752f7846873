#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Lane Defence.
//!
//! The world exclusively owns every defender, hostile, and projectile. All
//! mutation flows through [`apply`]; adapters and systems observe the world
//! through the read-only [`query`] functions. No entity holds a reference to
//! another: relationships such as "hostile engaged by defender" are derived
//! each tick by spatial query inside the combat resolver.

mod combat;
pub mod economy;

use std::time::Duration;

use lane_defence_core::{
    BattleConfig, BattlefieldGrid, CellCoord, Command, DefenderId, DefenderKind, Event, GamePhase,
    HostileId, HostileTier, PlacementError, ProjectileId, Rect, RemovalError, WELCOME_BANNER,
};

use self::economy::Ledger;

/// Represents the authoritative Lane Defence world state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    config: BattleConfig,
    grid: BattlefieldGrid,
    phase: GamePhase,
    clock: Duration,
    ledger: Ledger,
    score: u32,
    defenders: Vec<Defender>,
    hostiles: Vec<Hostile>,
    projectiles: Vec<Projectile>,
    next_defender_id: u32,
    next_hostile_id: u32,
    next_projectile_id: u32,
}

impl World {
    /// Creates a new Lane Defence world on the title screen with default
    /// configuration.
    #[must_use]
    pub fn new() -> Self {
        let config = BattleConfig::default();
        let grid = config.grid();
        let ledger = Ledger::new(
            config.starting_balance,
            config.accrual_amount,
            config.accrual_interval(),
        );
        Self {
            banner: WELCOME_BANNER,
            grid,
            phase: GamePhase::Title,
            clock: Duration::ZERO,
            ledger,
            score: 0,
            defenders: Vec::new(),
            hostiles: Vec::new(),
            projectiles: Vec::new(),
            next_defender_id: 0,
            next_hostile_id: 0,
            next_projectile_id: 0,
            config,
        }
    }

    fn reset(&mut self, config: BattleConfig) {
        self.grid = config.grid();
        self.ledger = Ledger::new(
            config.starting_balance,
            config.accrual_amount,
            config.accrual_interval(),
        );
        self.config = config;
        self.phase = GamePhase::Title;
        self.clock = Duration::ZERO;
        self.score = 0;
        self.defenders.clear();
        self.hostiles.clear();
        self.projectiles.clear();
        self.next_defender_id = 0;
        self.next_hostile_id = 0;
        self.next_projectile_id = 0;
    }

    fn allocate_defender_id(&mut self) -> DefenderId {
        let id = DefenderId::new(self.next_defender_id);
        self.next_defender_id = self.next_defender_id.wrapping_add(1);
        id
    }

    fn allocate_hostile_id(&mut self) -> HostileId {
        let id = HostileId::new(self.next_hostile_id);
        self.next_hostile_id = self.next_hostile_id.wrapping_add(1);
        id
    }

    pub(crate) fn allocate_projectile_id(&mut self) -> ProjectileId {
        let id = ProjectileId::new(self.next_projectile_id);
        self.next_projectile_id = self.next_projectile_id.wrapping_add(1);
        id
    }

    fn defender_index_at(&self, cell: CellCoord) -> Option<usize> {
        self.defenders.iter().position(|defender| defender.cell == cell)
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Clone, Debug)]
pub(crate) struct Defender {
    pub(crate) id: DefenderId,
    pub(crate) kind: DefenderKind,
    pub(crate) cell: CellCoord,
    pub(crate) rect: Rect,
    pub(crate) hp: i32,
    pub(crate) max_hp: i32,
    pub(crate) alive: bool,
    pub(crate) last_fired: Duration,
}

#[derive(Clone, Debug)]
pub(crate) struct Hostile {
    pub(crate) id: HostileId,
    pub(crate) tier: HostileTier,
    pub(crate) row: u32,
    pub(crate) rect: Rect,
    pub(crate) speed: f32,
    pub(crate) initial_speed: f32,
    pub(crate) hp: i32,
    pub(crate) max_hp: i32,
    pub(crate) alive: bool,
    pub(crate) engaged: bool,
}

#[derive(Clone, Debug)]
pub(crate) struct Projectile {
    pub(crate) id: ProjectileId,
    pub(crate) x: f32,
    pub(crate) y: f32,
    pub(crate) alive: bool,
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::ConfigureBattle { config } => {
            world.reset(config);
            out_events.push(Event::PhaseChanged {
                phase: GamePhase::Title,
            });
        }
        Command::StartBattle => {
            if world.phase == GamePhase::Title {
                world.phase = GamePhase::Playing;
                world.ledger.anchor(world.clock);
                out_events.push(Event::PhaseChanged {
                    phase: GamePhase::Playing,
                });
            }
        }
        Command::Tick { dt } => {
            world.clock = world.clock.saturating_add(dt);
            out_events.push(Event::TimeAdvanced {
                now: world.clock,
                dt,
            });

            if world.phase == GamePhase::Playing {
                if let Some(amount) = world.ledger.accrue(world.clock) {
                    out_events.push(Event::CurrencyAccrued {
                        amount,
                        balance: world.ledger.balance(),
                    });
                }
                combat::resolve(world, out_events);
            }
        }
        Command::SpawnHostile { row, tier } => {
            if world.phase != GamePhase::Playing || row >= world.grid.rows() {
                return;
            }

            let spec = *world.config.hostile(tier);
            let id = world.allocate_hostile_id();
            let cell_size = world.grid.cell_size();
            world.hostiles.push(Hostile {
                id,
                tier,
                row,
                rect: Rect::new(
                    world.grid.right(),
                    world.grid.row_top(row),
                    cell_size,
                    cell_size,
                ),
                speed: spec.speed,
                initial_speed: spec.speed,
                hp: spec.hp,
                max_hp: spec.hp,
                alive: true,
                engaged: false,
            });
            out_events.push(Event::HostileSpawned { hostile: id, row, tier });
        }
        Command::PlaceDefender { kind, cell } => {
            let rejection = if world.phase != GamePhase::Playing {
                Some(PlacementError::InvalidPhase)
            } else if cell.column() >= world.grid.columns() || cell.row() >= world.grid.rows() {
                Some(PlacementError::OutOfBounds)
            } else if world.defender_index_at(cell).is_some() {
                Some(PlacementError::Occupied)
            } else if !world.ledger.try_spend(world.config.defender(kind).cost) {
                Some(PlacementError::InsufficientFunds)
            } else {
                None
            };

            if let Some(reason) = rejection {
                out_events.push(Event::PlacementRejected { kind, cell, reason });
                return;
            }

            let spec = *world.config.defender(kind);
            let id = world.allocate_defender_id();
            world.defenders.push(Defender {
                id,
                kind,
                cell,
                rect: world.grid.cell_rect(cell),
                hp: spec.hp,
                max_hp: spec.hp,
                alive: true,
                last_fired: world.clock,
            });
            out_events.push(Event::DefenderPlaced {
                defender: id,
                kind,
                cell,
            });
        }
        Command::RemoveDefender { defender } => {
            if world.phase != GamePhase::Playing {
                out_events.push(Event::RemovalRejected {
                    defender,
                    reason: RemovalError::InvalidPhase,
                });
                return;
            }

            match world.defenders.iter().position(|entry| entry.id == defender) {
                Some(index) => {
                    let _ = world.defenders.remove(index);
                    out_events.push(Event::DefenderRemoved { defender });
                }
                None => out_events.push(Event::RemovalRejected {
                    defender,
                    reason: RemovalError::MissingDefender,
                }),
            }
        }
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use std::time::Duration;

    use super::World;
    use lane_defence_core::{
        BattleConfig, BattlefieldGrid, CellCoord, DefenderId, DefenderKind, GamePhase, HostileId,
        HostileTier, ProjectileId, Rect,
    };

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the active battle configuration.
    #[must_use]
    pub fn config(world: &World) -> &BattleConfig {
        &world.config
    }

    /// Provides read-only access to the battlefield grid definition.
    #[must_use]
    pub fn grid(world: &World) -> &BattlefieldGrid {
        &world.grid
    }

    /// Current phase of the game state machine.
    #[must_use]
    pub fn phase(world: &World) -> GamePhase {
        world.phase
    }

    /// Total simulated time elapsed since the battle was configured.
    #[must_use]
    pub fn elapsed(world: &World) -> Duration {
        world.clock
    }

    /// Current balance held by the economy ledger.
    #[must_use]
    pub fn balance(world: &World) -> u32 {
        world.ledger.balance()
    }

    /// Current score counter.
    #[must_use]
    pub fn score(world: &World) -> u32 {
        world.score
    }

    /// Returns the identifier of the defender occupying the provided cell.
    #[must_use]
    pub fn defender_at(world: &World, cell: CellCoord) -> Option<DefenderId> {
        world
            .defenders
            .iter()
            .find(|defender| defender.cell == cell)
            .map(|defender| defender.id)
    }

    /// Captures a read-only view of the defenders on the field.
    #[must_use]
    pub fn defender_view(world: &World) -> DefenderView {
        let mut snapshots: Vec<DefenderSnapshot> = world
            .defenders
            .iter()
            .map(|defender| DefenderSnapshot {
                id: defender.id,
                kind: defender.kind,
                cell: defender.cell,
                rect: defender.rect,
                hp: defender.hp,
                max_hp: defender.max_hp,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        DefenderView { snapshots }
    }

    /// Captures a read-only view of the hostiles on the field.
    #[must_use]
    pub fn hostile_view(world: &World) -> HostileView {
        let mut snapshots: Vec<HostileSnapshot> = world
            .hostiles
            .iter()
            .map(|hostile| HostileSnapshot {
                id: hostile.id,
                tier: hostile.tier,
                row: hostile.row,
                rect: hostile.rect,
                speed: hostile.speed,
                hp: hostile.hp,
                max_hp: hostile.max_hp,
                engaged: hostile.engaged,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        HostileView { snapshots }
    }

    /// Captures a read-only view of the projectiles in flight.
    #[must_use]
    pub fn projectile_view(world: &World) -> ProjectileView {
        let mut snapshots: Vec<ProjectileSnapshot> = world
            .projectiles
            .iter()
            .map(|projectile| ProjectileSnapshot {
                id: projectile.id,
                x: projectile.x,
                y: projectile.y,
            })
            .collect();
        snapshots.sort_by_key(|snapshot| snapshot.id);
        ProjectileView { snapshots }
    }

    /// Read-only snapshot describing all defenders on the field.
    #[derive(Clone, Debug, Default)]
    pub struct DefenderView {
        snapshots: Vec<DefenderSnapshot>,
    }

    impl DefenderView {
        /// Iterator over the captured snapshots in deterministic order.
        pub fn iter(&self) -> impl Iterator<Item = &DefenderSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<DefenderSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single defender's state.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct DefenderSnapshot {
        /// Identifier allocated to the defender by the world.
        pub id: DefenderId,
        /// Kind of defender that was placed.
        pub kind: DefenderKind,
        /// Cell occupied by the defender.
        pub cell: CellCoord,
        /// World-space rectangle covered by the defender.
        pub rect: Rect,
        /// Remaining hit points. May be negative for one tick before removal.
        pub hp: i32,
        /// Hit points the defender was placed with.
        pub max_hp: i32,
    }

    /// Read-only snapshot describing all hostiles on the field.
    #[derive(Clone, Debug, Default)]
    pub struct HostileView {
        snapshots: Vec<HostileSnapshot>,
    }

    impl HostileView {
        /// Iterator over the captured snapshots in deterministic order.
        pub fn iter(&self) -> impl Iterator<Item = &HostileSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<HostileSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single hostile's state.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct HostileSnapshot {
        /// Identifier allocated to the hostile by the world.
        pub id: HostileId,
        /// Tier preset applied at spawn.
        pub tier: HostileTier,
        /// Row the hostile advances along.
        pub row: u32,
        /// World-space rectangle covered by the hostile.
        pub rect: Rect,
        /// Stored advance speed. Effective speed is zero while engaged.
        pub speed: f32,
        /// Remaining hit points. May be negative for one tick before removal.
        pub hp: i32,
        /// Hit points the hostile spawned with.
        pub max_hp: i32,
        /// Indicates whether the hostile currently overlaps a live defender.
        pub engaged: bool,
    }

    /// Read-only snapshot describing all projectiles in flight.
    #[derive(Clone, Debug, Default)]
    pub struct ProjectileView {
        snapshots: Vec<ProjectileSnapshot>,
    }

    impl ProjectileView {
        /// Iterator over the captured snapshots in deterministic order.
        pub fn iter(&self) -> impl Iterator<Item = &ProjectileSnapshot> {
            self.snapshots.iter()
        }

        /// Consumes the view, yielding the underlying snapshots.
        #[must_use]
        pub fn into_vec(self) -> Vec<ProjectileSnapshot> {
            self.snapshots
        }
    }

    /// Immutable representation of a single projectile's state.
    #[derive(Clone, Copy, Debug, PartialEq)]
    pub struct ProjectileSnapshot {
        /// Identifier allocated to the projectile by the world.
        pub id: ProjectileId,
        /// Horizontal position of the projectile point.
        pub x: f32,
        /// Vertical position of the projectile point.
        pub y: f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn playing_world(config: BattleConfig) -> (World, Vec<Event>) {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::ConfigureBattle { config }, &mut events);
        apply(&mut world, Command::StartBattle, &mut events);
        events.clear();
        (world, events)
    }

    #[test]
    fn configure_resets_to_the_title_phase() {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::StartBattle, &mut events);
        assert_eq!(query::phase(&world), GamePhase::Playing);

        apply(
            &mut world,
            Command::ConfigureBattle {
                config: BattleConfig::default(),
            },
            &mut events,
        );
        assert_eq!(query::phase(&world), GamePhase::Title);
        assert_eq!(query::score(&world), 0);
        assert_eq!(query::elapsed(&world), Duration::ZERO);
    }

    #[test]
    fn start_battle_only_fires_from_the_title_phase() {
        let (mut world, mut events) = playing_world(BattleConfig::default());
        apply(&mut world, Command::StartBattle, &mut events);
        assert!(events.is_empty(), "repeated start must be ignored");
    }

    #[test]
    fn placement_deducts_the_kind_cost() {
        let (mut world, mut events) = playing_world(BattleConfig::default());
        let balance_before = query::balance(&world);
        let cost = query::config(&world).attacker.cost;

        apply(
            &mut world,
            Command::PlaceDefender {
                kind: DefenderKind::Attacker,
                cell: CellCoord::new(2, 3),
            },
            &mut events,
        );

        assert_eq!(query::balance(&world), balance_before - cost);
        assert!(matches!(
            events.as_slice(),
            [Event::DefenderPlaced {
                kind: DefenderKind::Attacker,
                ..
            }]
        ));
    }

    #[test]
    fn placement_is_rejected_when_funds_are_insufficient() {
        let mut config = BattleConfig::default();
        config.starting_balance = 10;
        let (mut world, mut events) = playing_world(config);

        apply(
            &mut world,
            Command::PlaceDefender {
                kind: DefenderKind::Attacker,
                cell: CellCoord::new(0, 0),
            },
            &mut events,
        );

        assert_eq!(query::balance(&world), 10, "rejected spend leaves balance");
        assert!(matches!(
            events.as_slice(),
            [Event::PlacementRejected {
                reason: PlacementError::InsufficientFunds,
                ..
            }]
        ));
        assert_eq!(query::defender_view(&world).into_vec().len(), 0);
    }

    #[test]
    fn placement_is_rejected_outside_the_grid() {
        let (mut world, mut events) = playing_world(BattleConfig::default());

        apply(
            &mut world,
            Command::PlaceDefender {
                kind: DefenderKind::Wall,
                cell: CellCoord::new(9, 0),
            },
            &mut events,
        );

        assert!(matches!(
            events.as_slice(),
            [Event::PlacementRejected {
                reason: PlacementError::OutOfBounds,
                ..
            }]
        ));
    }

    #[test]
    fn placement_is_rejected_on_an_occupied_cell() {
        let (mut world, mut events) = playing_world(BattleConfig::default());
        let cell = CellCoord::new(1, 1);

        apply(
            &mut world,
            Command::PlaceDefender {
                kind: DefenderKind::Wall,
                cell,
            },
            &mut events,
        );
        events.clear();
        apply(
            &mut world,
            Command::PlaceDefender {
                kind: DefenderKind::Attacker,
                cell,
            },
            &mut events,
        );

        assert!(matches!(
            events.as_slice(),
            [Event::PlacementRejected {
                reason: PlacementError::Occupied,
                ..
            }]
        ));
    }

    #[test]
    fn placement_is_rejected_outside_the_playing_phase() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::PlaceDefender {
                kind: DefenderKind::Wall,
                cell: CellCoord::new(0, 0),
            },
            &mut events,
        );

        assert!(matches!(
            events.as_slice(),
            [Event::PlacementRejected {
                reason: PlacementError::InvalidPhase,
                ..
            }]
        ));
    }

    #[test]
    fn removal_refunds_nothing() {
        let (mut world, mut events) = playing_world(BattleConfig::default());
        let balance_before = query::balance(&world);
        let cost = query::config(&world).wall.cost;
        let cell = CellCoord::new(4, 2);

        apply(
            &mut world,
            Command::PlaceDefender {
                kind: DefenderKind::Wall,
                cell,
            },
            &mut events,
        );
        let defender = query::defender_at(&world, cell).expect("defender placed");
        apply(&mut world, Command::RemoveDefender { defender }, &mut events);

        assert_eq!(query::defender_at(&world, cell), None);
        assert_eq!(
            query::balance(&world),
            balance_before - cost,
            "removal must not restore the spent cost"
        );
    }

    #[test]
    fn removing_an_unknown_defender_is_rejected() {
        let (mut world, mut events) = playing_world(BattleConfig::default());

        apply(
            &mut world,
            Command::RemoveDefender {
                defender: DefenderId::new(99),
            },
            &mut events,
        );

        assert!(matches!(
            events.as_slice(),
            [Event::RemovalRejected {
                reason: RemovalError::MissingDefender,
                ..
            }]
        ));
    }

    #[test]
    fn spawned_hostiles_enter_at_the_right_edge() {
        let (mut world, mut events) = playing_world(BattleConfig::default());

        apply(
            &mut world,
            Command::SpawnHostile {
                row: 2,
                tier: HostileTier::Walker,
            },
            &mut events,
        );

        let hostiles = query::hostile_view(&world).into_vec();
        assert_eq!(hostiles.len(), 1);
        let hostile = &hostiles[0];
        assert_eq!(hostile.rect.x(), query::grid(&world).right());
        assert_eq!(hostile.row, 2);
        assert_eq!(hostile.hp, query::config(&world).walker.hp);
    }

    #[test]
    fn spawns_are_ignored_outside_the_playing_phase() {
        let mut world = World::new();
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::SpawnHostile {
                row: 0,
                tier: HostileTier::Walker,
            },
            &mut events,
        );

        assert!(events.is_empty());
        assert!(query::hostile_view(&world).into_vec().is_empty());
    }

    #[test]
    fn accrual_credits_the_configured_amount() {
        let (mut world, mut events) = playing_world(BattleConfig::default());
        let balance_before = query::balance(&world);
        let amount = query::config(&world).accrual_amount;

        apply(
            &mut world,
            Command::Tick {
                dt: Duration::from_millis(5_000),
            },
            &mut events,
        );

        assert_eq!(query::balance(&world), balance_before + amount);
        assert!(events
            .iter()
            .any(|event| matches!(event, Event::CurrencyAccrued { .. })));
    }
}
