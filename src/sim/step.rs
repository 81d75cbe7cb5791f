/// The step function: advances a Playing session by one tick.
///
/// Processing order:
///   1. Flood timer (reaching zero ends the session, nothing else runs)
///   2. Keeper motion
///   3. Particle integration
///   4. Bridge auto-construction
///   5. Win check
///
/// `dt` must already be clamped (see `world::clamp_dt`).

use tracing::info;

use crate::domain::entity::{Character, HeldDirections};
use crate::domain::motion;
use crate::domain::particles::ParticleSystem;
use super::construction;
use super::event::GameEvent;
use super::world::{Phase, WorldState, WORLD_BOUNDS};

/// Everything a tick mutates, borrowed from the session.
pub struct TickContext<'a> {
    pub world: &'a mut WorldState,
    pub character: &'a mut Character,
    pub particles: &'a mut ParticleSystem,
    pub held: HeldDirections,
}

pub fn step(ctx: TickContext<'_>, dt: f32) -> Vec<GameEvent> {
    let TickContext { world, character, particles, held } = ctx;
    if world.phase != Phase::Playing { return vec![]; }

    let mut events = Vec::new();
    world.elapsed += f64::from(dt);

    if resolve_flood(world, dt, &mut events) { return events; }
    motion::step_character(character, held, WORLD_BOUNDS, dt);
    particles.step(dt);
    construction::auto_build(world, &mut events);
    resolve_win(world, &mut events);

    events
}

/// Count the flood down. Returns true if it arrived this tick.
fn resolve_flood(world: &mut WorldState, dt: f32, events: &mut Vec<GameEvent>) -> bool {
    world.flood_timer -= dt;
    if world.flood_timer > 0.0 { return false; }

    world.phase = Phase::GameOver;
    info!(
        segments = world.built_segments(),
        villagers_alive = world.villagers_alive,
        "flood reached the village"
    );
    events.push(GameEvent::FloodReached);
    true
}

fn resolve_win(world: &mut WorldState, events: &mut Vec<GameEvent>) {
    if !world.bridge_complete() { return; }

    world.villagers_saved = Some(world.villagers_alive);
    world.phase = Phase::GameOver;
    info!(
        saved = world.villagers_alive,
        of = world.initial_villagers,
        time_left = world.flood_timer,
        "bridge completed"
    );
    events.push(GameEvent::BridgeCompleted);
}
