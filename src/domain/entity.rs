/// Entities: village elements, ground pickups, the keeper character and
/// bridge segments. Kind-level properties (sizes, yields, moral cost) are
/// queried via methods so their semantics live in one place.

use super::resource::{ResourceKind, Resources};

/// Structure types that make up the village.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ElementKind {
    House,
    Tree,
    Well,
    Fence,
    Shed,
    Statue,
}

impl ElementKind {
    /// Infrastructure types rolled uniformly during generation.
    pub const INFRASTRUCTURE: [ElementKind; 4] =
        [ElementKind::Well, ElementKind::Fence, ElementKind::Shed, ElementKind::Statue];

    /// Footprint `(w, h)` in world units.
    pub fn size(self) -> (f32, f32) {
        match self {
            ElementKind::House => (40.0, 40.0),
            ElementKind::Tree => (24.0, 32.0),
            ElementKind::Well => (28.0, 28.0),
            ElementKind::Fence => (40.0, 16.0),
            ElementKind::Shed => (32.0, 24.0),
            ElementKind::Statue => (24.0, 32.0),
        }
    }

    /// Moral standing lost when an element of this kind is torn down.
    pub fn moral_penalty(self) -> i32 {
        match self {
            ElementKind::House => 25,
            ElementKind::Well => 15,
            ElementKind::Statue => 8,
            ElementKind::Shed => 5,
            ElementKind::Tree => 2,
            ElementKind::Fence => 1,
        }
    }

    /// Fixed yields for infrastructure. Houses and trees roll theirs.
    pub fn fixed_yield(self) -> Option<Resources> {
        match self {
            ElementKind::Well => Some(Resources::new(0, 2, 1)),
            ElementKind::Fence => Some(Resources::new(1, 0, 0)),
            ElementKind::Shed => Some(Resources::new(2, 0, 1)),
            ElementKind::Statue => Some(Resources::new(0, 1, 1)),
            ElementKind::House | ElementKind::Tree => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ElementKind::House => "Family house",
            ElementKind::Tree => "Tree",
            ElementKind::Well => "Well",
            ElementKind::Fence => "Fence",
            ElementKind::Shed => "Shed",
            ElementKind::Statue => "Statue",
        }
    }
}

/// A structure in the village. `(x, y)` is the top-left corner of its box.
///
/// Everything except `dismantled` is fixed at generation time, and
/// `dismantled` only ever goes false → true.
#[derive(Clone, Debug)]
pub struct VillageElement {
    pub kind: ElementKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub villagers: u32,
    pub yields: Resources,
    pub dismantled: bool,
}

impl VillageElement {
    pub fn new(kind: ElementKind, x: f32, y: f32, villagers: u32, yields: Resources) -> Self {
        let (width, height) = kind.size();
        VillageElement { kind, x, y, width, height, villagers, yields, dismantled: false }
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Inclusive box test.
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    /// Tearing this down needs an explicit yes from the player.
    pub fn needs_confirmation(&self) -> bool {
        self.kind == ElementKind::House && self.villagers > 0
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum PickupKind {
    Log,
    Stone,
}

impl PickupKind {
    pub fn resource(self) -> ResourceKind {
        match self {
            PickupKind::Log => ResourceKind::Wood,
            PickupKind::Stone => ResourceKind::Stone,
        }
    }
}

/// Loose material lying on the ground. Removed outright when collected.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GroundPickup {
    pub x: f32,
    pub y: f32,
    pub kind: PickupKind,
}

/// Keeper motion state. Keyboard always preempts a seek.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MotionState {
    Idle,
    KeyboardMoving,
    Seeking,
}

/// Held keyboard directions, sampled every tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct HeldDirections {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

impl HeldDirections {
    pub fn any(&self) -> bool {
        self.up || self.down || self.left || self.right
    }

    /// Per-axis unit step. Down/right win over up/left when both are held,
    /// matching the order keys are read in.
    pub fn axes(&self) -> (f32, f32) {
        let mut dx = 0.0;
        let mut dy = 0.0;
        if self.up { dy = -1.0; }
        if self.down { dy = 1.0; }
        if self.left { dx = -1.0; }
        if self.right { dx = 1.0; }
        (dx, dy)
    }
}

/// The player-controlled keeper.
#[derive(Clone, Debug)]
pub struct Character {
    pub x: f32,
    pub y: f32,
    pub target_x: f32,
    pub target_y: f32,
    /// World units per second.
    pub speed: f32,
    pub motion: MotionState,
    /// Walk cycle frame, 0..=3.
    pub anim_frame: u8,
    pub anim_timer: f32,
}

impl Character {
    pub const START: (f32, f32) = (300.0, 300.0);

    pub fn new(x: f32, y: f32, speed: f32) -> Self {
        Character {
            x, y,
            target_x: x,
            target_y: y,
            speed,
            motion: MotionState::Idle,
            anim_frame: 0,
            anim_timer: 0.0,
        }
    }

    pub fn is_moving(&self) -> bool {
        self.motion != MotionState::Idle
    }

    /// Start walking toward `(x, y)`. The caller clamps the target.
    pub fn seek(&mut self, x: f32, y: f32) {
        self.target_x = x;
        self.target_y = y;
        self.motion = MotionState::Seeking;
    }
}

/// A completed bridge span. `y` is its top edge on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BridgeSegment {
    pub index: u32,
    pub y: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_test_is_inclusive_on_edges() {
        let e = VillageElement::new(ElementKind::Fence, 10.0, 20.0, 0, Resources::new(1, 0, 0));
        assert!(e.contains(10.0, 20.0));
        assert!(e.contains(50.0, 36.0));
        assert!(!e.contains(50.1, 30.0));
        assert!(!e.contains(9.9, 30.0));
    }

    #[test]
    fn only_occupied_houses_need_confirmation() {
        let occupied = VillageElement::new(ElementKind::House, 0.0, 0.0, 3, Resources::new(2, 1, 0));
        let empty = VillageElement::new(ElementKind::House, 0.0, 0.0, 0, Resources::new(2, 1, 0));
        let well = VillageElement::new(ElementKind::Well, 0.0, 0.0, 2, Resources::new(0, 2, 1));
        assert!(occupied.needs_confirmation());
        assert!(!empty.needs_confirmation());
        assert!(!well.needs_confirmation());
    }

    #[test]
    fn center_is_box_midpoint() {
        let e = VillageElement::new(ElementKind::Shed, 100.0, 50.0, 0, Resources::new(2, 0, 1));
        assert_eq!(e.center(), (116.0, 62.0));
    }

    #[test]
    fn opposite_keys_resolve_to_later_read() {
        let held = HeldDirections { up: true, down: true, left: true, right: false };
        assert_eq!(held.axes(), (-1.0, 1.0));
    }
}
