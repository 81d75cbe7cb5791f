/// Events emitted by interactions and the tick.
/// The front end drains these for feedback; particle bursts are spawned
/// from them by the session.

use crate::domain::entity::{ElementKind, PickupKind};
use crate::domain::particles::Emission;

#[derive(Clone, Debug, PartialEq)]
pub enum GameEvent {
    ElementDismantled { index: usize, kind: ElementKind, x: f32, y: f32, displaced: u32 },
    PickupCollected { kind: PickupKind, x: f32, y: f32 },
    ConfirmationRequested { index: usize, villagers: u32 },
    /// A second request arrived while one was already pending; it was dropped.
    ConfirmationBlocked { index: usize },
    ConfirmationResolved { index: usize, accepted: bool },
    MoveOrdered { x: f32, y: f32 },
    SegmentBuilt { segment: u32 },
    BridgeCompleted,
    FloodReached,
}

impl GameEvent {
    /// Particle burst this event should produce, with its origin.
    pub fn emission(&self) -> Option<(Emission, f32, f32)> {
        match *self {
            GameEvent::ElementDismantled { x, y, .. } => Some((Emission::Destruction, x, y)),
            GameEvent::PickupCollected { x, y, .. } => Some((Emission::Collection, x, y)),
            _ => None,
        }
    }
}
