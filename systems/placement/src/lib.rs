#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure placement system that translates pointer drags from the supply strip
//! into defender placement and removal commands.

use lane_defence_core::{
    supply_slots, BattlefieldGrid, CellCoord, Command, DefenderId, GamePhase, Tool,
};

/// Pointer state distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerFrame {
    /// Horizontal pointer position in world units.
    pub x: f32,
    /// Vertical pointer position in world units.
    pub y: f32,
    /// Indicates whether the pointer was pressed down on this frame.
    pub pressed: bool,
    /// Indicates whether the pointer was released on this frame.
    pub released: bool,
}

impl PointerFrame {
    /// Creates a new pointer descriptor with explicit field values.
    #[must_use]
    pub const fn new(x: f32, y: f32, pressed: bool, released: bool) -> Self {
        Self {
            x,
            y,
            pressed,
            released,
        }
    }
}

impl Default for PointerFrame {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            pressed: false,
            released: false,
        }
    }
}

/// Placement system driving the Idle -> Dragging -> (Placed | Cancelled)
/// pointer state machine.
///
/// Only one drag may be active at a time; a second pointer-down while
/// dragging is ignored. The world stays authoritative over affordability
/// and cell validity, so a release merely emits the matching command.
#[derive(Debug, Default)]
pub struct Placement {
    drag: Option<Tool>,
}

impl Placement {
    /// Creates a new placement system in the idle state.
    #[must_use]
    pub const fn new() -> Self {
        Self { drag: None }
    }

    /// Tool carried by the active drag, if any. Adapters use this to draw
    /// the drag ghost under the pointer.
    #[must_use]
    pub const fn active_tool(&self) -> Option<Tool> {
        self.drag
    }

    /// Consumes pointer input to emit placement and removal commands.
    ///
    /// The `defender_at` closure should mirror the semantics of the world's
    /// `query::defender_at` helper so the removal tool can identify the
    /// defender under the release cell.
    pub fn handle<F>(
        &mut self,
        phase: GamePhase,
        input: PointerFrame,
        grid: &BattlefieldGrid,
        mut defender_at: F,
        out: &mut Vec<Command>,
    ) where
        F: FnMut(CellCoord) -> Option<DefenderId>,
    {
        if phase != GamePhase::Playing {
            self.drag = None;
            return;
        }

        if input.pressed && self.drag.is_none() {
            self.drag = supply_slots(grid)
                .iter()
                .find(|slot| slot.rect.contains(input.x, input.y))
                .map(|slot| slot.tool);
        }

        if !input.released {
            return;
        }
        let Some(tool) = self.drag.take() else {
            return;
        };
        let Some(cell) = grid.cell_at(input.x, input.y) else {
            return;
        };

        match tool {
            Tool::Place(kind) => out.push(Command::PlaceDefender { kind, cell }),
            Tool::Remove => {
                if let Some(defender) = defender_at(cell) {
                    out.push(Command::RemoveDefender { defender });
                }
            }
        }
    }
}
