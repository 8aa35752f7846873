#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure bootstrap system that prepares the Lane Defence experience.

use lane_defence_core::BattlefieldGrid;
use lane_defence_world::{query, World};

/// Produces data required to greet the player before the first frame.
#[derive(Debug, Default)]
pub struct Bootstrap;

impl Bootstrap {
    /// Derives the banner that should be shown when the experience starts.
    #[must_use]
    pub fn welcome_banner<'world>(&self, world: &'world World) -> &'world str {
        query::welcome_banner(world)
    }

    /// Exposes the battlefield grid configuration required for rendering.
    #[must_use]
    pub fn grid<'world>(&self, world: &'world World) -> &'world BattlefieldGrid {
        query::grid(world)
    }
}
