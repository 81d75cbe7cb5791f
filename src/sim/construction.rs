/// Bridge auto-construction: turn stockpiled materials into segments.
///
/// Greedy and repeated: as long as the stockpile covers a full segment and
/// the bridge is unfinished, another segment is built in the same tick.

use tracing::debug;

use crate::domain::entity::BridgeSegment;
use crate::domain::resource::Resources;
use super::event::GameEvent;
use super::world::{WorldState, BRIDGE_REQUIRED, MAX_SEGMENTS, SCREEN_HEIGHT};

pub const SEGMENT_COST: Resources = Resources::new(5, 2, 0);

/// Materials for a whole bridge.
pub fn total_materials() -> Resources {
    SEGMENT_COST.scaled(MAX_SEGMENTS)
}

/// Materials still needed for the segments not yet built.
pub fn remaining_materials(world: &WorldState) -> Resources {
    SEGMENT_COST.scaled(MAX_SEGMENTS.saturating_sub(world.built_segments()))
}

/// Build as many segments as the stockpile allows. Returns how many.
pub fn auto_build(world: &mut WorldState, events: &mut Vec<GameEvent>) -> u32 {
    let mut built = 0;
    while world.built_segments() < MAX_SEGMENTS && world.resources.try_spend(&SEGMENT_COST) {
        let index = world.built_segments();
        world.segments.push(BridgeSegment {
            index,
            y: SCREEN_HEIGHT - (index + 1) as f32 * (SCREEN_HEIGHT / MAX_SEGMENTS as f32),
        });
        world.bridge_progress = progress_for(world.built_segments());
        built += 1;
        debug!(segment = index + 1, progress = world.bridge_progress, "bridge segment built");
        events.push(GameEvent::SegmentBuilt { segment: index + 1 });
    }
    built
}

pub fn progress_for(segments: u32) -> f32 {
    segments as f32 / MAX_SEGMENTS as f32 * BRIDGE_REQUIRED
}
