/// Read-only views for the presentation layer.
///
///   - `Snapshot`: everything a renderer draws, borrowed from the session.
///   - `HudStats`: the live numbers shown in the status bar.
///   - `SessionSummary`: the end-of-session report.

use crate::domain::entity::{Character, GroundPickup, VillageElement};
use crate::domain::particles::Particle;
use crate::domain::resource::Resources;
use crate::domain::rules::{EndingCategory, MoralTier};
use super::construction;
use super::world::{Phase, WorldState};

/// One frame's worth of state. Take it after the tick, before the next input.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub phase: Phase,
    pub elements: &'a [VillageElement],
    pub pickups: &'a [GroundPickup],
    pub particles: &'a [Particle],
    pub character: &'a Character,
    pub world: &'a WorldState,
    pub hovered: Option<usize>,
    pub pending_confirmation: Option<usize>,
    /// Simulated seconds, for animation phases (water, twinkle).
    pub elapsed: f64,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HudStats {
    pub resources: Resources,
    pub villagers_alive: u32,
    /// Whole seconds left, rounded up.
    pub time_left: u32,
    /// Bridge progress, rounded to the nearest percent.
    pub bridge_percent: u32,
    pub moral: i32,
    pub moral_tier: MoralTier,
    pub built_segments: u32,
    pub materials_total: Resources,
    pub materials_remaining: Resources,
}

impl HudStats {
    pub fn from_world(world: &WorldState) -> Self {
        HudStats {
            resources: world.resources,
            villagers_alive: world.villagers_alive,
            time_left: ceil_seconds(world.flood_timer),
            bridge_percent: world.bridge_progress.round() as u32,
            moral: world.moral,
            moral_tier: MoralTier::from_moral(world.moral),
            built_segments: world.built_segments(),
            materials_total: construction::total_materials(),
            materials_remaining: construction::remaining_materials(world),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Outcome {
    Victory,
    Defeat,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SessionSummary {
    pub outcome: Outcome,
    /// `None` when the flood won.
    pub villagers_saved: Option<u32>,
    pub initial_villagers: u32,
    pub bridge_percent: u32,
    pub moral: i32,
    pub moral_tier: MoralTier,
    pub ending: EndingCategory,
    pub time_remaining: u32,
    pub villagers_displaced: u32,
}

impl SessionSummary {
    pub fn from_world(world: &WorldState) -> Self {
        SessionSummary {
            outcome: if world.bridge_complete() { Outcome::Victory } else { Outcome::Defeat },
            villagers_saved: world.villagers_saved,
            initial_villagers: world.initial_villagers,
            bridge_percent: world.bridge_progress.round() as u32,
            moral: world.moral,
            moral_tier: MoralTier::from_moral(world.moral),
            ending: EndingCategory::from_moral(world.moral),
            time_remaining: ceil_seconds(world.flood_timer),
            villagers_displaced: world.villagers_displaced,
        }
    }
}

/// `ceil(max(0, t))` as whole seconds.
fn ceil_seconds(t: f32) -> u32 {
    t.max(0.0).ceil() as u32
}
