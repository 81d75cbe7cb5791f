/// Interaction resolution: hit-test a player action, then dismantle,
/// collect, ask for confirmation, or (for a pointer action on bare ground)
/// order the keeper to walk there.
///
/// Processing order for one action:
///   1. Pick a target (elements first, then pickups; see `rules`)
///   2. Element needing confirmation → park it as the pending request
///   3. Other element → dismantle now
///   4. Pickup → collect now
///   5. Nothing hit (pointer only) → seek order
///
/// Only one request can be pending. A second one is dropped and reported
/// with `ConfirmationBlocked`; the first stays pending until `confirm`.
///
/// Callers only invoke this while the session is Playing.

use tracing::debug;

use crate::domain::entity::Character;
use crate::domain::rules::{self, Target};
use super::event::GameEvent;
use super::registry::EntityRegistry;
use super::world::{WorldState, WORLD_BOUNDS};

#[derive(Clone, Debug, Default)]
pub struct InteractionResolver {
    pending: Option<usize>,
}

impl InteractionResolver {
    pub fn new() -> Self {
        InteractionResolver { pending: None }
    }

    /// Element index awaiting a yes/no, if any.
    pub fn pending(&self) -> Option<usize> {
        self.pending
    }

    pub fn clear(&mut self) {
        self.pending = None;
    }

    /// Pointer action at `(x, y)`.
    pub fn act_at_point(
        &mut self,
        world: &mut WorldState,
        reg: &mut EntityRegistry,
        ch: &mut Character,
        x: f32,
        y: f32,
        events: &mut Vec<GameEvent>,
    ) {
        match rules::target_at_point(reg.all_elements(), reg.all_pickups(), x, y) {
            Some(target) => self.apply(target, world, reg, events),
            None => {
                let (tx, ty) = WORLD_BOUNDS.clamp(x, y);
                ch.seek(tx, ty);
                events.push(GameEvent::MoveOrdered { x: tx, y: ty });
            }
        }
    }

    /// "Interact" key: whatever is within reach of the keeper.
    pub fn act_near_character(
        &mut self,
        world: &mut WorldState,
        reg: &mut EntityRegistry,
        ch: &Character,
        events: &mut Vec<GameEvent>,
    ) {
        if let Some(target) = rules::target_near(reg.all_elements(), reg.all_pickups(), ch.x, ch.y) {
            self.apply(target, world, reg, events);
        }
    }

    /// Element under the pointer, for highlighting. Never mutates.
    pub fn hover(reg: &EntityRegistry, x: f32, y: f32) -> Option<usize> {
        rules::element_at(reg.all_elements(), x, y)
    }

    /// Answer the pending request. No-op when nothing is pending.
    pub fn confirm(
        &mut self,
        accepted: bool,
        world: &mut WorldState,
        reg: &mut EntityRegistry,
        events: &mut Vec<GameEvent>,
    ) {
        let Some(index) = self.pending.take() else { return };
        events.push(GameEvent::ConfirmationResolved { index, accepted });
        if accepted {
            dismantle(world, reg, index, events);
        } else {
            debug!(index, "dismantle request declined");
        }
    }

    fn apply(
        &mut self,
        target: Target,
        world: &mut WorldState,
        reg: &mut EntityRegistry,
        events: &mut Vec<GameEvent>,
    ) {
        match target {
            Target::Element(index) => {
                let Some(el) = reg.element(index) else { return };
                if el.needs_confirmation() {
                    self.request(index, el.villagers, events);
                } else {
                    dismantle(world, reg, index, events);
                }
            }
            Target::Pickup(index) => collect(world, reg, index, events),
        }
    }

    fn request(&mut self, index: usize, villagers: u32, events: &mut Vec<GameEvent>) {
        if self.pending.is_some() {
            debug!(index, "confirmation already pending; request dropped");
            events.push(GameEvent::ConfirmationBlocked { index });
            return;
        }
        self.pending = Some(index);
        events.push(GameEvent::ConfirmationRequested { index, villagers });
    }
}

/// Tear down element `index`: credit its yield, charge the moral penalty,
/// displace its villagers and flag it. Already-dismantled elements are
/// left alone.
pub fn dismantle(
    world: &mut WorldState,
    reg: &mut EntityRegistry,
    index: usize,
    events: &mut Vec<GameEvent>,
) {
    let Some(el) = reg.element_mut(index) else { return };
    if el.dismantled {
        return;
    }
    el.dismantled = true;

    world.resources.add_all(&el.yields);
    world.moral = rules::adjust_moral(world.moral, -el.kind.moral_penalty());
    world.displace(el.villagers);

    let (x, y) = el.center();
    debug!(
        index, kind = ?el.kind, displaced = el.villagers, moral = world.moral,
        "element dismantled"
    );
    events.push(GameEvent::ElementDismantled {
        index,
        kind: el.kind,
        x,
        y,
        displaced: el.villagers,
    });
}

/// Pick up ground material `index`: +1 of its resource, pickup removed.
pub fn collect(
    world: &mut WorldState,
    reg: &mut EntityRegistry,
    index: usize,
    events: &mut Vec<GameEvent>,
) {
    let Some(p) = reg.remove_pickup(index) else { return };
    world.resources.add(p.kind.resource(), 1);
    debug!(kind = ?p.kind, "pickup collected");
    events.push(GameEvent::PickupCollected { kind: p.kind, x: p.x, y: p.y });
}
