/// Hit-testing and placement rules.
///
/// Pure functions over element/pickup slices, no side effects. They decide
/// *what* an action would touch; applying the effect is the sim layer's job.
///
/// ## Target Selection Table
///
/// ┌──────────────────┬─────────────────────────────┬──────────────────────┐
/// │ Query             │ Elements                    │ Pickups              │
/// ├──────────────────┼─────────────────────────────┼──────────────────────┤
/// │ at point          │ first (registration order)  │ last → first,        │
/// │                   │ whose box contains point    │ dist < 15            │
/// │ near character    │ first whose box CENTER is   │ last → first,        │
/// │                   │ within dist < 40            │ dist < 40            │
/// │ hover             │ same as "at point"          │ not considered       │
/// └──────────────────┴─────────────────────────────┴──────────────────────┘
///
/// Elements always win over pickups. Dismantled elements never match.

use super::entity::{GroundPickup, VillageElement};

pub const PICKUP_RADIUS: f32 = 15.0;
pub const INTERACTION_RANGE: f32 = 40.0;

/// What an action landed on. Indices are registry positions.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Target {
    Element(usize),
    Pickup(usize),
}

#[inline]
pub fn distance(ax: f32, ay: f32, bx: f32, by: f32) -> f32 {
    ((ax - bx).powi(2) + (ay - by).powi(2)).sqrt()
}

/// First standing element whose box contains the point.
pub fn element_at(elements: &[VillageElement], x: f32, y: f32) -> Option<usize> {
    elements
        .iter()
        .position(|e| !e.dismantled && e.contains(x, y))
}

/// Most recently registered pickup strictly within `radius` of the point.
pub fn pickup_within(pickups: &[GroundPickup], x: f32, y: f32, radius: f32) -> Option<usize> {
    pickups
        .iter()
        .rposition(|p| distance(x, y, p.x, p.y) < radius)
}

/// Target for a pointer action at `(x, y)`.
pub fn target_at_point(
    elements: &[VillageElement],
    pickups: &[GroundPickup],
    x: f32,
    y: f32,
) -> Option<Target> {
    if let Some(i) = element_at(elements, x, y) {
        return Some(Target::Element(i));
    }
    pickup_within(pickups, x, y, PICKUP_RADIUS).map(Target::Pickup)
}

/// Target for an "interact" key press with the keeper standing at `(cx, cy)`.
pub fn target_near(
    elements: &[VillageElement],
    pickups: &[GroundPickup],
    cx: f32,
    cy: f32,
) -> Option<Target> {
    let element = elements.iter().position(|e| {
        if e.dismantled { return false; }
        let (ex, ey) = e.center();
        distance(cx, cy, ex, ey) < INTERACTION_RANGE
    });
    if let Some(i) = element {
        return Some(Target::Element(i));
    }
    pickup_within(pickups, cx, cy, INTERACTION_RANGE).map(Target::Pickup)
}

// ── Placement ──

/// Is `(x, y)` closer than `min_sep` to the anchor of any placed element?
/// Anchors are the top-left corners, as generation places them.
pub fn is_occupied(elements: &[VillageElement], x: f32, y: f32, min_sep: f32) -> bool {
    elements.iter().any(|e| distance(x, y, e.x, e.y) < min_sep)
}

// ── Moral standing ──

pub const MORAL_MIN: i32 = 0;
pub const MORAL_MAX: i32 = 200;

/// Apply a signed moral change and clamp into range.
pub fn adjust_moral(current: i32, delta: i32) -> i32 {
    current.saturating_add(delta).clamp(MORAL_MIN, MORAL_MAX)
}

/// Reputation label for a moral standing, as shown to the player.
///
/// ┌────────────┬──────────────┐
/// │ Standing    │ Tier         │
/// ├────────────┼──────────────┤
/// │ >= 150      │ Saint        │
/// │ >= 120      │ Virtuous     │
/// │ >= 80       │ Balanced     │
/// │ >= 50       │ Pragmatic    │
/// │ >= 20       │ Ruthless     │
/// │ below       │ Destroyer    │
/// └────────────┴──────────────┘
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoralTier {
    Saint,
    Virtuous,
    Balanced,
    Pragmatic,
    Ruthless,
    Destroyer,
}

impl MoralTier {
    pub fn from_moral(moral: i32) -> Self {
        match moral {
            150.. => MoralTier::Saint,
            120..=149 => MoralTier::Virtuous,
            80..=119 => MoralTier::Balanced,
            50..=79 => MoralTier::Pragmatic,
            20..=49 => MoralTier::Ruthless,
            _ => MoralTier::Destroyer,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MoralTier::Saint => "Saint",
            MoralTier::Virtuous => "Virtuous",
            MoralTier::Balanced => "Balanced",
            MoralTier::Pragmatic => "Pragmatic",
            MoralTier::Ruthless => "Ruthless",
            MoralTier::Destroyer => "Destroyer",
        }
    }
}

/// Coarser moral verdict for the end-of-session report.
/// Report only: it never changes how many villagers were saved.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EndingCategory {
    Virtuous,
    Balanced,
    Pragmatic,
    Ruthless,
}

impl EndingCategory {
    pub fn from_moral(moral: i32) -> Self {
        match moral {
            120.. => EndingCategory::Virtuous,
            80..=119 => EndingCategory::Balanced,
            50..=79 => EndingCategory::Pragmatic,
            _ => EndingCategory::Ruthless,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EndingCategory::Virtuous => "virtuous",
            EndingCategory::Balanced => "balanced",
            EndingCategory::Pragmatic => "pragmatic",
            EndingCategory::Ruthless => "ruthless",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{ElementKind, PickupKind};
    use crate::domain::resource::Resources;

    fn house(x: f32, y: f32) -> VillageElement {
        VillageElement::new(ElementKind::House, x, y, 3, Resources::new(2, 1, 0))
    }

    fn log(x: f32, y: f32) -> GroundPickup {
        GroundPickup { x, y, kind: PickupKind::Log }
    }

    // ── Point targeting ──

    #[test]
    fn element_beats_pickup_under_same_point() {
        let els = vec![house(0.0, 0.0)];
        let picks = vec![log(20.0, 20.0)];
        assert_eq!(target_at_point(&els, &picks, 20.0, 20.0), Some(Target::Element(0)));
    }

    #[test]
    fn first_registered_element_wins_overlap() {
        let els = vec![house(0.0, 0.0), house(10.0, 10.0)];
        assert_eq!(element_at(&els, 20.0, 20.0), Some(0));
    }

    #[test]
    fn dismantled_elements_are_transparent() {
        let mut els = vec![house(0.0, 0.0), house(10.0, 10.0)];
        els[0].dismantled = true;
        assert_eq!(element_at(&els, 20.0, 20.0), Some(1));
        els[1].dismantled = true;
        assert_eq!(element_at(&els, 20.0, 20.0), None);
    }

    #[test]
    fn last_registered_pickup_wins() {
        let picks = vec![log(100.0, 100.0), log(105.0, 100.0)];
        assert_eq!(pickup_within(&picks, 102.0, 100.0, PICKUP_RADIUS), Some(1));
    }

    #[test]
    fn pickup_radius_is_strict() {
        let picks = vec![log(100.0, 100.0)];
        assert_eq!(pickup_within(&picks, 115.0, 100.0, PICKUP_RADIUS), None);
        assert_eq!(pickup_within(&picks, 114.9, 100.0, PICKUP_RADIUS), Some(0));
    }

    #[test]
    fn empty_ground_has_no_target() {
        let els = vec![house(0.0, 0.0)];
        let picks = vec![log(300.0, 300.0)];
        assert_eq!(target_at_point(&els, &picks, 200.0, 200.0), None);
    }

    // ── Proximity targeting ──

    #[test]
    fn near_uses_box_center() {
        // center (20, 20); keeper 39 units right of it
        let els = vec![house(0.0, 0.0)];
        assert_eq!(target_near(&els, &[], 59.0, 20.0), Some(Target::Element(0)));
        assert_eq!(target_near(&els, &[], 60.0, 20.0), None);
    }

    #[test]
    fn near_prefers_elements_over_closer_pickups() {
        let els = vec![house(0.0, 0.0)];
        let picks = vec![log(50.0, 20.0)];
        assert_eq!(target_near(&els, &picks, 50.0, 20.0), Some(Target::Element(0)));
    }

    #[test]
    fn near_falls_back_to_pickups() {
        let picks = vec![log(50.0, 20.0)];
        assert_eq!(target_near(&[], &picks, 80.0, 20.0), Some(Target::Pickup(0)));
    }

    // ── Placement / moral ──

    #[test]
    fn occupancy_measures_from_anchor() {
        let els = vec![house(100.0, 100.0)];
        assert!(is_occupied(&els, 130.0, 100.0, 50.0));
        assert!(!is_occupied(&els, 150.0, 100.0, 50.0));
    }

    #[test]
    fn moral_is_clamped_both_ways() {
        assert_eq!(adjust_moral(10, -25), 0);
        assert_eq!(adjust_moral(195, 10), 200);
        assert_eq!(adjust_moral(100, -25), 75);
    }

    #[test]
    fn tiers_follow_thresholds() {
        let cases = [
            (200, MoralTier::Saint),
            (150, MoralTier::Saint),
            (149, MoralTier::Virtuous),
            (120, MoralTier::Virtuous),
            (100, MoralTier::Balanced),
            (80, MoralTier::Balanced),
            (79, MoralTier::Pragmatic),
            (50, MoralTier::Pragmatic),
            (49, MoralTier::Ruthless),
            (20, MoralTier::Ruthless),
            (19, MoralTier::Destroyer),
            (0, MoralTier::Destroyer),
        ];
        for (moral, tier) in cases {
            assert_eq!(MoralTier::from_moral(moral), tier, "moral {moral}");
        }
    }

    #[test]
    fn ending_category_has_no_destroyer_band() {
        assert_eq!(EndingCategory::from_moral(160), EndingCategory::Virtuous);
        assert_eq!(EndingCategory::from_moral(119), EndingCategory::Balanced);
        assert_eq!(EndingCategory::from_moral(50), EndingCategory::Pragmatic);
        assert_eq!(EndingCategory::from_moral(0), EndingCategory::Ruthless);
    }
}
