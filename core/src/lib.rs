#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lane Defence engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Welcome to Lane Defence.";

/// Phase of the battle sequenced by the game state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GamePhase {
    /// Opening screen awaiting the confirm input.
    Title,
    /// Active battle where the full tick pipeline runs.
    Playing,
    /// Terminal screen after the score reached the victory threshold.
    Victory,
    /// Terminal screen after a hostile breached the left boundary.
    Defeat,
}

impl GamePhase {
    /// Reports whether the phase is terminal and only awaits process exit.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Victory | Self::Defeat)
    }
}

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Installs a battle configuration and resets the world to the title phase.
    ConfigureBattle {
        /// Configuration constants applied for the rest of the session.
        config: BattleConfig,
    },
    /// Requests the transition from the title screen into an active battle.
    StartBattle,
    /// Advances the simulation clock by the provided delta time.
    Tick {
        /// Duration of simulated time that elapsed since the previous tick.
        dt: Duration,
    },
    /// Requests that a hostile enter the field at the right edge of a row.
    SpawnHostile {
        /// Zero-based row the hostile should advance along.
        row: u32,
        /// Tier preset selecting the hostile's speed and hit points.
        tier: HostileTier,
    },
    /// Requests placement of a defender snapped to the provided cell.
    PlaceDefender {
        /// Kind of defender to construct.
        kind: DefenderKind,
        /// Cell the defender should occupy.
        cell: CellCoord,
    },
    /// Requests removal of an existing defender. No currency is refunded.
    RemoveDefender {
        /// Identifier of the defender targeted for removal.
        defender: DefenderId,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Indicates that the simulation clock advanced.
    TimeAdvanced {
        /// Total simulated time elapsed since the battle was configured.
        now: Duration,
        /// Duration of simulated time that elapsed in the tick.
        dt: Duration,
    },
    /// Announces that the game state machine entered a new phase.
    PhaseChanged {
        /// Phase that became active after processing commands.
        phase: GamePhase,
    },
    /// Confirms that a hostile entered the field.
    HostileSpawned {
        /// Identifier assigned to the hostile by the world.
        hostile: HostileId,
        /// Row the hostile advances along.
        row: u32,
        /// Tier preset applied to the hostile.
        tier: HostileTier,
    },
    /// Reports that a projectile struck a hostile.
    HostileStruck {
        /// Identifier of the struck hostile.
        hostile: HostileId,
        /// Hit points remaining after the damage was applied. May be negative.
        remaining_hp: i32,
    },
    /// Reports that a projectile hit reduced a hostile to zero hit points.
    HostileSlain {
        /// Identifier of the slain hostile.
        hostile: HostileId,
    },
    /// Reports that a hostile crossed the left boundary, losing the battle.
    HostileBreached {
        /// Identifier of the breaching hostile.
        hostile: HostileId,
    },
    /// Confirms that a defender was placed into the world.
    DefenderPlaced {
        /// Identifier assigned to the defender by the world.
        defender: DefenderId,
        /// Kind of defender that was placed.
        kind: DefenderKind,
        /// Cell occupied by the defender.
        cell: CellCoord,
    },
    /// Reports that a defender placement request was rejected.
    PlacementRejected {
        /// Kind of defender requested for placement.
        kind: DefenderKind,
        /// Cell provided in the placement request.
        cell: CellCoord,
        /// Specific reason the placement failed.
        reason: PlacementError,
    },
    /// Confirms that a defender was removed by the removal tool.
    DefenderRemoved {
        /// Identifier of the defender that was removed.
        defender: DefenderId,
    },
    /// Reports that a defender removal request was rejected.
    RemovalRejected {
        /// Identifier of the defender targeted for removal.
        defender: DefenderId,
        /// Specific reason the removal failed.
        reason: RemovalError,
    },
    /// Reports that melee damage reduced a defender to zero hit points.
    DefenderDestroyed {
        /// Identifier of the destroyed defender.
        defender: DefenderId,
    },
    /// Confirms that an attacker emitted a projectile.
    ProjectileFired {
        /// Identifier of the firing defender.
        defender: DefenderId,
        /// Identifier assigned to the projectile by the world.
        projectile: ProjectileId,
    },
    /// Reports that passive accrual credited the economy ledger.
    CurrencyAccrued {
        /// Amount credited by this accrual.
        amount: u32,
        /// Balance after the credit was applied.
        balance: u32,
    },
    /// Reports that the score counter changed.
    ScoreChanged {
        /// Score after the change was applied.
        score: u32,
    },
}

/// Unique identifier assigned to a defender.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DefenderId(u32);

impl DefenderId {
    /// Creates a new defender identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a hostile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HostileId(u32);

impl HostileId {
    /// Creates a new hostile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Unique identifier assigned to a projectile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProjectileId(u32);

impl ProjectileId {
    /// Creates a new projectile identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

/// Axis-aligned bounding box shared by every entity pair in the simulation.
///
/// Overlap uses half-open interval semantics: two rectangles that merely
/// share an edge do not overlap.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    /// Creates a new rectangle from its top-left corner and dimensions.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge of the rectangle.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Top edge of the rectangle.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Width of the rectangle.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Height of the rectangle.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Right edge of the rectangle.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge of the rectangle.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns a copy of the rectangle shifted by the provided offsets.
    #[must_use]
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            width: self.width,
            height: self.height,
        }
    }

    /// Reports whether the two rectangles overlap under half-open semantics.
    #[must_use]
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Reports whether the point lies inside the rectangle.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }
}

/// Kinds of defenders that can be purchased from the supply strip.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DefenderKind {
    /// Fires projectiles at hostiles sharing its row on a fixed cooldown.
    Attacker,
    /// Never fires; absorbs melee damage to stall the advance.
    Wall,
}

impl DefenderKind {
    /// Enumerates every purchasable defender kind in supply-strip order.
    pub const ALL: [DefenderKind; 2] = [DefenderKind::Attacker, DefenderKind::Wall];
}

/// Tier presets assigned to hostiles at spawn by weighted random choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HostileTier {
    /// Baseline hostile with average speed and hit points.
    Walker,
    /// Fast hostile with reduced hit points.
    Sprinter,
    /// Slow hostile with heavy hit points.
    Juggernaut,
}

/// Tools the player can drag from the supply strip onto the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Tool {
    /// Places a defender of the carried kind on release.
    Place(DefenderKind),
    /// Deletes the defender occupying the release cell, without refund.
    Remove,
}

/// Per-kind defender tuning applied at placement time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefenderSpec {
    /// Currency cost deducted through the economy ledger on placement.
    pub cost: u32,
    /// Hit points granted to a freshly placed defender.
    pub hp: i32,
    /// Cooldown between shots in milliseconds. `None` marks a kind that
    /// never fires.
    pub fire_interval_ms: Option<u64>,
}

impl DefenderSpec {
    /// Cooldown between shots, when the kind is able to fire.
    #[must_use]
    pub fn fire_interval(&self) -> Option<Duration> {
        self.fire_interval_ms.map(Duration::from_millis)
    }
}

/// Per-tier hostile tuning applied at spawn time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HostileSpec {
    /// Distance advanced per tick while disengaged, in world units.
    pub speed: f32,
    /// Hit points granted to a freshly spawned hostile.
    pub hp: i32,
}

/// Reasons a defender placement request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PlacementError {
    /// The battle is not in the playing phase, so placement is disabled.
    InvalidPhase,
    /// The requested cell lies outside the playable grid.
    OutOfBounds,
    /// The requested cell already holds a defender.
    Occupied,
    /// The ledger balance does not cover the kind's cost.
    InsufficientFunds,
}

/// Reasons a defender removal request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RemovalError {
    /// The battle is not in the playing phase, so removal is disabled.
    InvalidPhase,
    /// No defender with the provided identifier exists.
    MissingDefender,
}

/// Describes the playable grid and the reserved strips surrounding it.
///
/// The grid is offset from the viewport origin by the supply strip on the
/// left and the status strip on the top. Every placeable coordinate maps to
/// exactly one cell by integer division; coordinates inside a reserved strip
/// map to no cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BattlefieldGrid {
    columns: u32,
    rows: u32,
    cell_size: f32,
    supply_strip_width: f32,
    status_strip_height: f32,
}

impl BattlefieldGrid {
    /// Creates a new grid description.
    #[must_use]
    pub const fn new(
        columns: u32,
        rows: u32,
        cell_size: f32,
        supply_strip_width: f32,
        status_strip_height: f32,
    ) -> Self {
        Self {
            columns,
            rows,
            cell_size,
            supply_strip_width,
            status_strip_height,
        }
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Side length of a single square cell expressed in world units.
    #[must_use]
    pub const fn cell_size(&self) -> f32 {
        self.cell_size
    }

    /// Width of the supply strip reserved along the left viewport edge.
    #[must_use]
    pub const fn supply_strip_width(&self) -> f32 {
        self.supply_strip_width
    }

    /// Height of the status strip reserved along the top viewport edge.
    #[must_use]
    pub const fn status_strip_height(&self) -> f32 {
        self.status_strip_height
    }

    /// Left boundary of the playable area in world units.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.supply_strip_width
    }

    /// Top boundary of the playable area in world units.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.status_strip_height
    }

    /// Right boundary of the playable area in world units.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.left() + self.width()
    }

    /// Bottom boundary of the playable area in world units.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.top() + self.height()
    }

    /// Total width of the playable area measured in world units.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.cell_size
    }

    /// Total height of the playable area measured in world units.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.cell_size
    }

    /// Total viewport width including the supply strip.
    #[must_use]
    pub fn viewport_width(&self) -> f32 {
        self.right()
    }

    /// Total viewport height including the status strip.
    #[must_use]
    pub fn viewport_height(&self) -> f32 {
        self.bottom()
    }

    /// Maps a world-space coordinate to the playable cell containing it.
    ///
    /// Coordinates inside the reserved strips or beyond the grid bounds map
    /// to `None`.
    #[must_use]
    pub fn cell_at(&self, x: f32, y: f32) -> Option<CellCoord> {
        if self.columns == 0 || self.rows == 0 || self.cell_size <= 0.0 {
            return None;
        }
        if x < self.left() || y < self.top() || x >= self.right() || y >= self.bottom() {
            return None;
        }

        let column = ((x - self.left()) / self.cell_size) as u32;
        let row = ((y - self.top()) / self.cell_size) as u32;
        if column < self.columns && row < self.rows {
            Some(CellCoord::new(column, row))
        } else {
            None
        }
    }

    /// Returns the world-space rectangle covered by the provided cell.
    #[must_use]
    pub fn cell_rect(&self, cell: CellCoord) -> Rect {
        Rect::new(
            self.left() + cell.column() as f32 * self.cell_size,
            self.top() + cell.row() as f32 * self.cell_size,
            self.cell_size,
            self.cell_size,
        )
    }

    /// Top edge of the provided row in world units.
    #[must_use]
    pub fn row_top(&self, row: u32) -> f32 {
        self.top() + row as f32 * self.cell_size
    }
}

/// One draggable slot rendered inside the supply strip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SupplySlot {
    /// Tool granted to a drag starting on this slot.
    pub tool: Tool,
    /// World-space rectangle the slot occupies for hit testing and drawing.
    pub rect: Rect,
}

const SUPPLY_SLOT_PADDING: f32 = 8.0;

/// Computes the supply-strip slot layout for the provided grid.
///
/// Slots are stacked from the top of the playable area downward: one per
/// purchasable defender kind followed by the removal tool.
#[must_use]
pub fn supply_slots(grid: &BattlefieldGrid) -> Vec<SupplySlot> {
    let side = (grid.supply_strip_width() - 2.0 * SUPPLY_SLOT_PADDING).max(0.0);
    let tools = DefenderKind::ALL
        .iter()
        .copied()
        .map(Tool::Place)
        .chain(std::iter::once(Tool::Remove));

    tools
        .enumerate()
        .map(|(index, tool)| SupplySlot {
            tool,
            rect: Rect::new(
                SUPPLY_SLOT_PADDING,
                grid.top() + SUPPLY_SLOT_PADDING + index as f32 * (side + SUPPLY_SLOT_PADDING),
                side,
                side,
            ),
        })
        .collect()
}

/// Configuration constants fixed at startup. No runtime reconfiguration.
///
/// The defaults describe an 800x600 viewport carved into 80-unit cells with
/// 80-unit reserved strips. Absent fields in a deserialized tuning file fall
/// back to these values.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Number of playable columns.
    pub columns: u32,
    /// Number of playable rows.
    pub rows: u32,
    /// Side length of a square cell in world units.
    pub cell_size: f32,
    /// Height of the reserved status strip along the top edge.
    pub status_strip_height: f32,
    /// Width of the reserved supply strip along the left edge.
    pub supply_strip_width: f32,
    /// Ledger balance granted when the battle starts.
    pub starting_balance: u32,
    /// Currency credited by each passive accrual.
    pub accrual_amount: u32,
    /// Interval between passive accruals in milliseconds.
    pub accrual_interval_ms: u64,
    /// Tuning for the attacker defender kind.
    pub attacker: DefenderSpec,
    /// Tuning for the wall defender kind.
    pub wall: DefenderSpec,
    /// Damage applied by a projectile on impact.
    pub projectile_damage: i32,
    /// Distance a projectile advances per tick, in world units.
    pub projectile_speed: f32,
    /// Display radius of a projectile in world units.
    pub projectile_radius: f32,
    /// Damage applied per tick by each engaged hostile to its defender.
    pub melee_damage: i32,
    /// Interval between hostile spawns in milliseconds.
    pub spawn_interval_ms: u64,
    /// Tuning for the walker tier.
    pub walker: HostileSpec,
    /// Tuning for the sprinter tier.
    pub sprinter: HostileSpec,
    /// Tuning for the juggernaut tier.
    pub juggernaut: HostileSpec,
    /// Inclusive upper roll bounds mapping a `[0, 100]` roll to the walker
    /// and sprinter tiers; rolls above both select the juggernaut.
    pub tier_thresholds: [u32; 2],
    /// Score at which the battle is won.
    pub victory_threshold: u32,
    /// Duration the terminal overlay is held before the process exits, in
    /// milliseconds.
    pub terminal_hold_ms: u64,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            columns: 9,
            rows: 6,
            cell_size: 80.0,
            status_strip_height: 80.0,
            supply_strip_width: 80.0,
            starting_balance: 100,
            accrual_amount: 25,
            accrual_interval_ms: 5_000,
            attacker: DefenderSpec {
                cost: 50,
                hp: 300,
                fire_interval_ms: Some(1_500),
            },
            wall: DefenderSpec {
                cost: 25,
                hp: 800,
                fire_interval_ms: None,
            },
            projectile_damage: 25,
            projectile_speed: 8.0,
            projectile_radius: 6.0,
            melee_damage: 2,
            spawn_interval_ms: 5_000,
            walker: HostileSpec {
                speed: 1.0,
                hp: 100,
            },
            sprinter: HostileSpec {
                speed: 2.5,
                hp: 60,
            },
            juggernaut: HostileSpec {
                speed: 0.5,
                hp: 260,
            },
            tier_thresholds: [50, 75],
            victory_threshold: 1_000,
            terminal_hold_ms: 4_000,
        }
    }
}

impl BattleConfig {
    /// Derives the battlefield grid described by the configuration.
    #[must_use]
    pub const fn grid(&self) -> BattlefieldGrid {
        BattlefieldGrid::new(
            self.columns,
            self.rows,
            self.cell_size,
            self.supply_strip_width,
            self.status_strip_height,
        )
    }

    /// Tuning applied to the provided defender kind.
    #[must_use]
    pub const fn defender(&self, kind: DefenderKind) -> &DefenderSpec {
        match kind {
            DefenderKind::Attacker => &self.attacker,
            DefenderKind::Wall => &self.wall,
        }
    }

    /// Tuning applied to the provided hostile tier.
    #[must_use]
    pub const fn hostile(&self, tier: HostileTier) -> &HostileSpec {
        match tier {
            HostileTier::Walker => &self.walker,
            HostileTier::Sprinter => &self.sprinter,
            HostileTier::Juggernaut => &self.juggernaut,
        }
    }

    /// Maps a uniform roll in `[0, 100]` to a hostile tier.
    #[must_use]
    pub fn tier_for_roll(&self, roll: u32) -> HostileTier {
        if roll <= self.tier_thresholds[0] {
            HostileTier::Walker
        } else if roll <= self.tier_thresholds[1] {
            HostileTier::Sprinter
        } else {
            HostileTier::Juggernaut
        }
    }

    /// Interval between passive accruals.
    #[must_use]
    pub const fn accrual_interval(&self) -> Duration {
        Duration::from_millis(self.accrual_interval_ms)
    }

    /// Interval between hostile spawns.
    #[must_use]
    pub const fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms)
    }

    /// Duration the terminal overlay is held before exit.
    #[must_use]
    pub const fn terminal_hold(&self) -> Duration {
        Duration::from_millis(self.terminal_hold_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> BattlefieldGrid {
        BattleConfig::default().grid()
    }

    #[test]
    fn cell_lookup_rejects_reserved_strips() {
        let grid = grid();
        assert_eq!(grid.cell_at(40.0, 300.0), None, "supply strip");
        assert_eq!(grid.cell_at(300.0, 40.0), None, "status strip");
        assert_eq!(grid.cell_at(grid.right(), 300.0), None, "past right edge");
    }

    #[test]
    fn cell_lookup_maps_each_coordinate_to_one_cell() {
        let grid = grid();
        assert_eq!(grid.cell_at(80.0, 80.0), Some(CellCoord::new(0, 0)));
        assert_eq!(grid.cell_at(159.9, 159.9), Some(CellCoord::new(0, 0)));
        assert_eq!(grid.cell_at(160.0, 160.0), Some(CellCoord::new(1, 1)));
    }

    #[test]
    fn cell_rect_round_trips_through_lookup() {
        let grid = grid();
        let cell = CellCoord::new(3, 2);
        let rect = grid.cell_rect(cell);
        assert_eq!(grid.cell_at(rect.x(), rect.y()), Some(cell));
    }

    #[test]
    fn rect_overlap_uses_half_open_intervals() {
        let left = Rect::new(0.0, 0.0, 80.0, 80.0);
        let adjacent = Rect::new(80.0, 0.0, 80.0, 80.0);
        let overlapping = Rect::new(79.0, 0.0, 80.0, 80.0);

        assert!(!left.overlaps(&adjacent), "shared edges do not overlap");
        assert!(left.overlaps(&overlapping));
        assert!(overlapping.overlaps(&left), "overlap is symmetric");
    }

    #[test]
    fn tier_mapping_honours_threshold_bounds() {
        let config = BattleConfig::default();
        assert_eq!(config.tier_for_roll(0), HostileTier::Walker);
        assert_eq!(config.tier_for_roll(50), HostileTier::Walker);
        assert_eq!(config.tier_for_roll(51), HostileTier::Sprinter);
        assert_eq!(config.tier_for_roll(75), HostileTier::Sprinter);
        assert_eq!(config.tier_for_roll(76), HostileTier::Juggernaut);
        assert_eq!(config.tier_for_roll(100), HostileTier::Juggernaut);
    }

    #[test]
    fn supply_slots_stay_inside_the_strip() {
        let grid = grid();
        let slots = supply_slots(&grid);
        assert_eq!(slots.len(), DefenderKind::ALL.len() + 1);
        for slot in &slots {
            assert!(slot.rect.right() <= grid.left());
            assert!(slot.rect.y() >= grid.top());
        }
        assert_eq!(slots[0].tool, Tool::Place(DefenderKind::Attacker));
        assert_eq!(slots.last().map(|slot| slot.tool), Some(Tool::Remove));
    }
}
