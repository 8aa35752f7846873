//! Per-tick combat resolution pipeline.
//!
//! The resolver advances the battle in a fixed order: defender firing,
//! projectile flight and collision, engagement recompute with melee damage,
//! hostile movement, deferred compaction of dead entities, then the loss and
//! win checks. Steps 1 through 4 only mark state; removal happens in the
//! compaction pass so no scan ever observes a shrinking registry.

use lane_defence_core::{Event, GamePhase};

use crate::{Projectile, World};

pub(crate) fn resolve(world: &mut World, out_events: &mut Vec<Event>) {
    fire_defenders(world, out_events);
    advance_projectiles(world, out_events);
    recompute_engagement(world, out_events);
    advance_hostiles(world);
    compact(world);
    if resolve_breach(world, out_events) {
        return;
    }
    resolve_victory(world, out_events);
}

/// Step 1: every live attacker whose cooldown elapsed and that shares a row
/// with a live hostile emits exactly one projectile at its trailing edge.
fn fire_defenders(world: &mut World, out_events: &mut Vec<Event>) {
    let now = world.clock;

    for index in 0..world.defenders.len() {
        let defender = &world.defenders[index];
        if !defender.alive {
            continue;
        }
        let Some(interval) = world.config.defender(defender.kind).fire_interval() else {
            continue;
        };
        if now.saturating_sub(defender.last_fired) < interval {
            continue;
        }
        let row = defender.cell.row();
        if !world
            .hostiles
            .iter()
            .any(|hostile| hostile.alive && hostile.row == row)
        {
            continue;
        }

        let projectile = world.allocate_projectile_id();
        let origin = world.defenders[index].rect;
        world.projectiles.push(Projectile {
            id: projectile,
            x: origin.right(),
            y: origin.y() + origin.height() / 2.0,
            alive: true,
        });
        world.defenders[index].last_fired = now;
        out_events.push(Event::ProjectileFired {
            defender: world.defenders[index].id,
            projectile,
        });
    }
}

/// Step 2: projectiles advance by the fixed step and strike the first
/// hostile containing them, in registry order.
///
/// A hostile already at or below zero hit points still blocks projectiles
/// until the compaction pass runs, so same-tick overkill is possible. Each
/// strike scores one point; a strike that crosses the hostile's hit points
/// from positive to zero or below doubles the score.
fn advance_projectiles(world: &mut World, out_events: &mut Vec<Event>) {
    let step = world.config.projectile_speed;
    let damage = world.config.projectile_damage;
    let right_bound = world.grid.right();

    for index in 0..world.projectiles.len() {
        world.projectiles[index].x += step;
        let x = world.projectiles[index].x;
        let y = world.projectiles[index].y;
        if x > right_bound {
            world.projectiles[index].alive = false;
            continue;
        }

        let Some(hostile) = world
            .hostiles
            .iter_mut()
            .find(|hostile| hostile.alive && hostile.rect.contains(x, y))
        else {
            continue;
        };

        let was_living = hostile.hp > 0;
        hostile.hp -= damage;
        let struck = hostile.id;
        let remaining_hp = hostile.hp;
        let slain = was_living && remaining_hp <= 0;

        out_events.push(Event::HostileStruck {
            hostile: struck,
            remaining_hp,
        });
        world.score = world.score.saturating_add(1);
        if slain {
            out_events.push(Event::HostileSlain { hostile: struck });
            world.score = world.score.saturating_mul(2);
        }
        out_events.push(Event::ScoreChanged { score: world.score });
        world.projectiles[index].alive = false;
    }
}

/// Step 3: engagement is recomputed from scratch for every pair of living
/// entities with overlapping rectangles.
///
/// A defender that falls to zero hit points is marked dead immediately and
/// the hostile is released so it resumes moving this same tick at its
/// restored initial speed.
fn recompute_engagement(world: &mut World, out_events: &mut Vec<Event>) {
    let melee = world.config.melee_damage;

    for hostile in world.hostiles.iter_mut() {
        hostile.engaged = false;
    }

    for hostile in world.hostiles.iter_mut() {
        if hostile.hp <= 0 {
            continue;
        }
        for defender in world.defenders.iter_mut() {
            if !defender.alive {
                continue;
            }
            if !hostile.rect.overlaps(&defender.rect) {
                continue;
            }

            hostile.engaged = true;
            defender.hp -= melee;
            if defender.hp <= 0 {
                defender.alive = false;
                hostile.engaged = false;
                hostile.speed = hostile.initial_speed;
                out_events.push(Event::DefenderDestroyed {
                    defender: defender.id,
                });
            }
        }
    }
}

/// Step 4: every living, non-engaged hostile advances leftward.
fn advance_hostiles(world: &mut World) {
    for hostile in world.hostiles.iter_mut() {
        if hostile.hp <= 0 || hostile.engaged {
            continue;
        }
        hostile.rect = hostile.rect.translated(-hostile.speed, 0.0);
    }
}

/// Step 5: deferred removal of dead entities and spent projectiles.
fn compact(world: &mut World) {
    world
        .defenders
        .retain(|defender| defender.alive && defender.hp > 0);
    world.hostiles.retain(|hostile| hostile.hp > 0);
    world.projectiles.retain(|projectile| projectile.alive);
}

/// Step 6: a hostile whose leading edge crossed the left boundary loses the
/// battle and freezes the simulation.
fn resolve_breach(world: &mut World, out_events: &mut Vec<Event>) -> bool {
    let left_bound = world.grid.left();
    let Some(breacher) = world
        .hostiles
        .iter()
        .find(|hostile| hostile.rect.x() < left_bound)
    else {
        return false;
    };

    out_events.push(Event::HostileBreached {
        hostile: breacher.id,
    });
    world.phase = GamePhase::Defeat;
    out_events.push(Event::PhaseChanged {
        phase: GamePhase::Defeat,
    });
    true
}

/// Step 7: reaching the victory threshold wins the battle.
fn resolve_victory(world: &mut World, out_events: &mut Vec<Event>) {
    if world.score >= world.config.victory_threshold {
        world.phase = GamePhase::Victory;
        out_events.push(Event::PhaseChanged {
            phase: GamePhase::Victory,
        });
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{apply, query, Hostile, World};
    use lane_defence_core::{
        BattleConfig, CellCoord, Command, DefenderKind, HostileId, HostileTier, ProjectileId, Rect,
    };

    fn battle(config: BattleConfig) -> World {
        let mut world = World::new();
        let mut events = Vec::new();
        apply(&mut world, Command::ConfigureBattle { config }, &mut events);
        apply(&mut world, Command::StartBattle, &mut events);
        world
    }

    fn tick(world: &mut World, ms: u64) -> Vec<Event> {
        let mut events = Vec::new();
        apply(
            world,
            Command::Tick {
                dt: Duration::from_millis(ms),
            },
            &mut events,
        );
        events
    }

    fn place(world: &mut World, kind: DefenderKind, column: u32, row: u32) {
        let mut events = Vec::new();
        apply(
            world,
            Command::PlaceDefender {
                kind,
                cell: CellCoord::new(column, row),
            },
            &mut events,
        );
        assert!(
            matches!(events.as_slice(), [Event::DefenderPlaced { .. }]),
            "test setup expected a successful placement, got {events:?}"
        );
    }

    fn put_hostile(world: &mut World, row: u32, x: f32, hp: i32, speed: f32) -> HostileId {
        let id = world.allocate_hostile_id();
        let cell_size = world.grid.cell_size();
        world.hostiles.push(Hostile {
            id,
            tier: HostileTier::Walker,
            row,
            rect: Rect::new(x, world.grid.row_top(row), cell_size, cell_size),
            speed,
            initial_speed: speed,
            hp,
            max_hp: hp,
            alive: true,
            engaged: false,
        });
        id
    }

    fn put_projectile(world: &mut World, x: f32, y: f32) -> ProjectileId {
        let id = world.allocate_projectile_id();
        world.projectiles.push(crate::Projectile {
            id,
            x,
            y,
            alive: true,
        });
        id
    }

    fn rapid_fire_config() -> BattleConfig {
        let mut config = BattleConfig::default();
        config.attacker.fire_interval_ms = Some(0);
        config
    }

    #[test]
    fn attacker_fires_at_most_once_per_tick_in_a_crowded_row() {
        let mut world = battle(rapid_fire_config());
        place(&mut world, DefenderKind::Attacker, 0, 0);
        let _ = put_hostile(&mut world, 0, 400.0, 100, 0.0);
        let _ = put_hostile(&mut world, 0, 500.0, 100, 0.0);

        let events = tick(&mut world, 16);

        let fired = events
            .iter()
            .filter(|event| matches!(event, Event::ProjectileFired { .. }))
            .count();
        assert_eq!(fired, 1, "one projectile regardless of row crowding");
    }

    #[test]
    fn walls_never_fire() {
        let mut world = battle(BattleConfig::default());
        place(&mut world, DefenderKind::Wall, 0, 0);
        let _ = put_hostile(&mut world, 0, 400.0, 100, 0.0);

        let events = tick(&mut world, 16);

        assert!(!events
            .iter()
            .any(|event| matches!(event, Event::ProjectileFired { .. })));
    }

    #[test]
    fn attacker_holds_fire_with_an_empty_row() {
        let mut world = battle(rapid_fire_config());
        place(&mut world, DefenderKind::Attacker, 0, 0);
        let _ = put_hostile(&mut world, 1, 400.0, 100, 0.0);

        let events = tick(&mut world, 16);

        assert!(
            !events
                .iter()
                .any(|event| matches!(event, Event::ProjectileFired { .. })),
            "row equality gates firing, not mere presence of hostiles"
        );
    }

    #[test]
    fn fire_cooldown_gates_successive_shots() {
        let mut config = BattleConfig::default();
        config.attacker.fire_interval_ms = Some(1_000);
        let mut world = battle(config);
        place(&mut world, DefenderKind::Attacker, 0, 0);
        let _ = put_hostile(&mut world, 0, 400.0, 100, 0.0);

        let first = tick(&mut world, 500);
        assert!(!first
            .iter()
            .any(|event| matches!(event, Event::ProjectileFired { .. })));

        let second = tick(&mut world, 500);
        assert!(second
            .iter()
            .any(|event| matches!(event, Event::ProjectileFired { .. })));

        let third = tick(&mut world, 16);
        assert!(
            !third
                .iter()
                .any(|event| matches!(event, Event::ProjectileFired { .. })),
            "cooldown resets when a shot is emitted"
        );
    }

    #[test]
    fn projectile_strikes_the_first_hostile_in_registry_order() {
        let mut world = battle(BattleConfig::default());
        let first = put_hostile(&mut world, 0, 250.0, 100, 0.0);
        let second = put_hostile(&mut world, 0, 250.0, 100, 0.0);
        let _ = put_projectile(&mut world, 300.0, 120.0);

        let _ = tick(&mut world, 16);

        let hostiles = query::hostile_view(&world).into_vec();
        let damage = query::config(&world).projectile_damage;
        assert_eq!(
            hostiles.iter().find(|h| h.id == first).map(|h| h.hp),
            Some(100 - damage)
        );
        assert_eq!(
            hostiles.iter().find(|h| h.id == second).map(|h| h.hp),
            Some(100),
            "only the first overlapping hostile absorbs the strike"
        );
        assert_eq!(query::score(&world), 1);
    }

    #[test]
    fn killing_strike_doubles_the_incremented_score() {
        let mut world = battle(BattleConfig::default());
        let hostile = put_hostile(&mut world, 0, 250.0, 25, 0.0);
        let _ = put_projectile(&mut world, 300.0, 120.0);

        let events = tick(&mut world, 16);

        assert!(events
            .iter()
            .any(|event| matches!(event, Event::HostileSlain { hostile: slain } if *slain == hostile)));
        assert_eq!(query::score(&world), 2, "(0 + 1) * 2");
        assert!(query::hostile_view(&world).into_vec().is_empty());
    }

    #[test]
    fn hostiles_can_be_overkilled_within_a_tick() {
        let mut world = battle(BattleConfig::default());
        let _ = put_hostile(&mut world, 0, 250.0, 25, 0.0);
        let _ = put_projectile(&mut world, 300.0, 120.0);
        let _ = put_projectile(&mut world, 292.0, 120.0);

        let events = tick(&mut world, 16);

        let strikes = events
            .iter()
            .filter(|event| matches!(event, Event::HostileStruck { .. }))
            .count();
        assert_eq!(strikes, 2, "a dead hostile blocks shots until compaction");
        assert_eq!(query::score(&world), 3, "kill doubling, then one more hit");
        assert!(query::hostile_view(&world).into_vec().is_empty());
        assert!(query::projectile_view(&world).into_vec().is_empty());
    }

    #[test]
    fn projectile_exits_the_right_edge_without_scoring() {
        let mut world = battle(BattleConfig::default());
        let _ = put_hostile(&mut world, 0, 400.0, 100, 0.0);
        let _ = put_projectile(&mut world, 799.0, 120.0);

        let _ = tick(&mut world, 16);

        assert!(query::projectile_view(&world).into_vec().is_empty());
        assert_eq!(query::score(&world), 0);
    }

    #[test]
    fn engaged_hostile_holds_while_a_clear_hostile_advances() {
        let mut world = battle(BattleConfig::default());
        place(&mut world, DefenderKind::Wall, 4, 2);
        let engaged = put_hostile(&mut world, 2, 420.0, 100, 2.0);
        let clear = put_hostile(&mut world, 0, 600.0, 100, 2.0);

        let _ = tick(&mut world, 16);

        let hostiles = query::hostile_view(&world).into_vec();
        let engaged_snapshot = hostiles.iter().find(|h| h.id == engaged).expect("engaged");
        let clear_snapshot = hostiles.iter().find(|h| h.id == clear).expect("clear");
        assert_eq!(engaged_snapshot.rect.x(), 420.0, "engaged hostiles hold");
        assert!(engaged_snapshot.engaged);
        assert_eq!(clear_snapshot.rect.x(), 598.0, "clear hostiles advance");
        assert!(!clear_snapshot.engaged);

        let wall = query::defender_view(&world).into_vec();
        let melee = query::config(&world).melee_damage;
        assert_eq!(wall[0].hp, wall[0].max_hp - melee);
    }

    #[test]
    fn engagement_does_not_persist_after_the_defender_is_removed() {
        let mut world = battle(BattleConfig::default());
        place(&mut world, DefenderKind::Wall, 4, 2);
        let hostile = put_hostile(&mut world, 2, 420.0, 100, 2.0);
        let _ = tick(&mut world, 16);

        let defender = query::defender_at(&world, CellCoord::new(4, 2)).expect("wall");
        let mut events = Vec::new();
        apply(&mut world, Command::RemoveDefender { defender }, &mut events);
        let _ = tick(&mut world, 16);

        let snapshot = query::hostile_view(&world)
            .into_vec()
            .into_iter()
            .find(|h| h.id == hostile)
            .expect("hostile");
        assert!(!snapshot.engaged, "engagement is recomputed, never stored");
        assert_eq!(snapshot.rect.x(), 418.0);
    }

    #[test]
    fn destroyed_defender_releases_its_hostile_the_same_tick() {
        let mut config = BattleConfig::default();
        config.wall.hp = 4;
        config.melee_damage = 10;
        let mut world = battle(config);
        place(&mut world, DefenderKind::Wall, 4, 2);
        let hostile = put_hostile(&mut world, 2, 420.0, 100, 2.0);

        let events = tick(&mut world, 16);

        assert!(events
            .iter()
            .any(|event| matches!(event, Event::DefenderDestroyed { .. })));
        assert!(query::defender_view(&world).into_vec().is_empty());
        let snapshot = query::hostile_view(&world)
            .into_vec()
            .into_iter()
            .find(|h| h.id == hostile)
            .expect("hostile");
        assert!(!snapshot.engaged);
        assert_eq!(
            snapshot.rect.x(),
            418.0,
            "released hostiles resume moving in the killing tick"
        );
    }

    #[test]
    fn breach_transitions_to_defeat_and_freezes_the_simulation() {
        let mut world = battle(BattleConfig::default());
        let hostile = put_hostile(&mut world, 0, 81.0, 100, 2.0);

        let events = tick(&mut world, 16);

        assert!(events
            .iter()
            .any(|event| matches!(event, Event::HostileBreached { hostile: breacher } if *breacher == hostile)));
        assert_eq!(query::phase(&world), lane_defence_core::GamePhase::Defeat);

        let frozen_x = query::hostile_view(&world).into_vec()[0].rect.x();
        let _ = tick(&mut world, 16);
        assert_eq!(
            query::hostile_view(&world).into_vec()[0].rect.x(),
            frozen_x,
            "no further combat ticks after defeat"
        );
    }

    #[test]
    fn reaching_the_victory_threshold_wins_the_battle() {
        let mut config = BattleConfig::default();
        config.victory_threshold = 1;
        let mut world = battle(config);
        let _ = put_hostile(&mut world, 0, 250.0, 100, 0.0);
        let _ = put_projectile(&mut world, 300.0, 120.0);

        let events = tick(&mut world, 16);

        assert_eq!(query::phase(&world), lane_defence_core::GamePhase::Victory);
        assert!(events.iter().any(|event| matches!(
            event,
            Event::PhaseChanged {
                phase: lane_defence_core::GamePhase::Victory
            }
        )));
    }
}
