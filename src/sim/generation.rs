/// Procedural village generation.
///
/// ## Layout (all coordinates are top-left anchors in world units)
///
///   - Houses:  3 rows × 5 columns, cell origin (60 + col·90, 120 + row·120),
///              jittered ±15 on each axis.
///   - Trees:   25, rejection-sampled in [40, 560) × [300, 700),
///              min separation 50 from every element placed so far.
///   - Infra:   10, rejection-sampled in [80, 550) × [200, 700),
///              min separation 45, kind uniform over well/fence/shed/statue.
///   - Pickups: 10 logs then 5 stones, uniform in [50, 550) × [50, 650).
///
/// Rejection sampling gives up after `MAX_ATTEMPTS` candidates and keeps
/// the last one even if it crowds a neighbour.

use rand::Rng;

use crate::domain::entity::{ElementKind, GroundPickup, PickupKind, VillageElement};
use crate::domain::resource::Resources;
use crate::domain::rules;
use super::registry::EntityRegistry;

pub const HOUSE_ROWS: usize = 3;
pub const HOUSE_COLS: usize = 5;
pub const HOUSE_JITTER: f32 = 15.0;
pub const TREE_COUNT: usize = 25;
pub const INFRA_COUNT: usize = 10;
pub const LOG_COUNT: usize = 10;
pub const STONE_COUNT: usize = 5;

pub const TREE_SEPARATION: f32 = 50.0;
pub const INFRA_SEPARATION: f32 = 45.0;
pub const MAX_ATTEMPTS: u32 = 50;

/// Axis-aligned sampling region `[x, x + w) × [y, y + h)`.
#[derive(Clone, Copy, Debug)]
pub struct Region {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Region {
    fn sample<R: Rng>(&self, rng: &mut R) -> (f32, f32) {
        (self.x + rng.gen::<f32>() * self.w, self.y + rng.gen::<f32>() * self.h)
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.w && y >= self.y && y < self.y + self.h
    }
}

pub const TREE_REGION: Region = Region { x: 40.0, y: 300.0, w: 520.0, h: 400.0 };
pub const INFRA_REGION: Region = Region { x: 80.0, y: 200.0, w: 470.0, h: 500.0 };
pub const PICKUP_REGION: Region = Region { x: 50.0, y: 50.0, w: 500.0, h: 600.0 };

/// Build a fresh village. Villager totals are read back from the registry.
pub fn generate_village<R: Rng>(rng: &mut R) -> EntityRegistry {
    let mut reg = EntityRegistry::new();
    place_houses(&mut reg, rng);
    place_trees(&mut reg, rng);
    place_infrastructure(&mut reg, rng);
    scatter_pickups(&mut reg, rng);
    reg
}

fn place_houses<R: Rng>(reg: &mut EntityRegistry, rng: &mut R) {
    for row in 0..HOUSE_ROWS {
        for col in 0..HOUSE_COLS {
            let x = 60.0 + col as f32 * 90.0 + (rng.gen::<f32>() - 0.5) * 2.0 * HOUSE_JITTER;
            let y = 120.0 + row as f32 * 120.0 + (rng.gen::<f32>() - 0.5) * 2.0 * HOUSE_JITTER;
            let villagers = rng.gen_range(2..=6);
            let yields = Resources::new(rng.gen_range(2..=4), rng.gen_range(1..=2), 0);
            reg.push_element(VillageElement::new(ElementKind::House, x, y, villagers, yields));
        }
    }
}

fn place_trees<R: Rng>(reg: &mut EntityRegistry, rng: &mut R) {
    for _ in 0..TREE_COUNT {
        let (x, y) = free_spot(reg, TREE_REGION, TREE_SEPARATION, rng);
        let yields = Resources::new(rng.gen_range(1..=3), 0, 0);
        reg.push_element(VillageElement::new(ElementKind::Tree, x, y, 0, yields));
    }
}

fn place_infrastructure<R: Rng>(reg: &mut EntityRegistry, rng: &mut R) {
    for _ in 0..INFRA_COUNT {
        let (x, y) = free_spot(reg, INFRA_REGION, INFRA_SEPARATION, rng);
        let kind = ElementKind::INFRASTRUCTURE[rng.gen_range(0..ElementKind::INFRASTRUCTURE.len())];
        let villagers = match kind {
            ElementKind::Well => rng.gen_range(1..=3),
            ElementKind::Shed => u32::from(rng.gen_bool(0.5)),
            _ => 0,
        };
        let yields = kind.fixed_yield().unwrap_or_default();
        reg.push_element(VillageElement::new(kind, x, y, villagers, yields));
    }
}

fn scatter_pickups<R: Rng>(reg: &mut EntityRegistry, rng: &mut R) {
    let kinds = std::iter::repeat(PickupKind::Log)
        .take(LOG_COUNT)
        .chain(std::iter::repeat(PickupKind::Stone).take(STONE_COUNT));
    for kind in kinds {
        let (x, y) = PICKUP_REGION.sample(rng);
        reg.push_pickup(GroundPickup { x, y, kind });
    }
}

/// Rejection-sample a spot at least `min_sep` from every placed element.
fn free_spot<R: Rng>(reg: &EntityRegistry, region: Region, min_sep: f32, rng: &mut R) -> (f32, f32) {
    let mut attempts = 0;
    loop {
        let (x, y) = region.sample(rng);
        attempts += 1;
        if !rules::is_occupied(reg.all_elements(), x, y, min_sep) || attempts >= MAX_ATTEMPTS {
            return (x, y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn village(seed: u64) -> EntityRegistry {
        generate_village(&mut ChaCha8Rng::seed_from_u64(seed))
    }

    fn of_kind(reg: &EntityRegistry, kind: ElementKind) -> Vec<&VillageElement> {
        reg.all_elements().iter().filter(|e| e.kind == kind).collect()
    }

    #[test]
    fn element_counts() {
        let reg = village(1);
        assert_eq!(reg.all_elements().len(), 15 + 25 + 10);
        assert_eq!(of_kind(&reg, ElementKind::House).len(), 15);
        assert_eq!(of_kind(&reg, ElementKind::Tree).len(), 25);
        assert!(reg.all_elements().iter().all(|e| !e.dismantled));
    }

    #[test]
    fn registration_order_is_houses_trees_infra() {
        let reg = village(2);
        let els = reg.all_elements();
        assert!(els[..15].iter().all(|e| e.kind == ElementKind::House));
        assert!(els[15..40].iter().all(|e| e.kind == ElementKind::Tree));
        assert!(els[40..].iter().all(|e| ElementKind::INFRASTRUCTURE.contains(&e.kind)));
    }

    #[test]
    fn houses_sit_on_jittered_grid() {
        let reg = village(3);
        for (i, h) in of_kind(&reg, ElementKind::House).iter().enumerate() {
            let (row, col) = (i / HOUSE_COLS, i % HOUSE_COLS);
            let cx = 60.0 + col as f32 * 90.0;
            let cy = 120.0 + row as f32 * 120.0;
            assert!((h.x - cx).abs() <= HOUSE_JITTER);
            assert!((h.y - cy).abs() <= HOUSE_JITTER);
            assert!((2..=6).contains(&h.villagers));
            assert!((2..=4).contains(&h.yields.wood));
            assert!((1..=2).contains(&h.yields.stone));
            assert_eq!(h.yields.metal, 0);
            assert_eq!((h.width, h.height), (40.0, 40.0));
        }
    }

    #[test]
    fn trees_have_no_villagers_and_stay_in_region() {
        let reg = village(4);
        for t in of_kind(&reg, ElementKind::Tree) {
            assert_eq!(t.villagers, 0);
            assert!((1..=3).contains(&t.yields.wood));
            assert!(TREE_REGION.contains(t.x, t.y));
        }
    }

    #[test]
    fn infrastructure_follows_kind_table() {
        for seed in 0..20 {
            let reg = village(seed);
            for e in &reg.all_elements()[40..] {
                assert!(INFRA_REGION.contains(e.x, e.y));
                assert_eq!((e.width, e.height), e.kind.size());
                match e.kind {
                    ElementKind::Well => {
                        assert!((1..=3).contains(&e.villagers));
                        assert_eq!(e.yields, Resources::new(0, 2, 1));
                    }
                    ElementKind::Fence => {
                        assert_eq!(e.villagers, 0);
                        assert_eq!(e.yields, Resources::new(1, 0, 0));
                    }
                    ElementKind::Shed => {
                        assert!(e.villagers <= 1);
                        assert_eq!(e.yields, Resources::new(2, 0, 1));
                    }
                    ElementKind::Statue => {
                        assert_eq!(e.villagers, 0);
                        assert_eq!(e.yields, Resources::new(0, 1, 1));
                    }
                    other => panic!("{other:?} in infrastructure block"),
                }
            }
        }
    }

    #[test]
    fn pickups_are_logs_then_stones() {
        let reg = village(5);
        let picks = reg.all_pickups();
        assert_eq!(picks.len(), 15);
        assert!(picks[..10].iter().all(|p| p.kind == PickupKind::Log));
        assert!(picks[10..].iter().all(|p| p.kind == PickupKind::Stone));
        assert!(picks.iter().all(|p| PICKUP_REGION.contains(p.x, p.y)));
    }

    #[test]
    fn same_seed_same_village() {
        let a = village(99);
        let b = village(99);
        let pa: Vec<_> = a.all_elements().iter().map(|e| (e.kind, e.x, e.y, e.villagers)).collect();
        let pb: Vec<_> = b.all_elements().iter().map(|e| (e.kind, e.x, e.y, e.villagers)).collect();
        assert_eq!(pa, pb);
        assert_eq!(a.all_pickups(), b.all_pickups());
    }

    #[test]
    fn free_spot_prefers_separated_candidates() {
        // One blocker in a large region: there is always room.
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut reg = EntityRegistry::new();
        reg.push_element(VillageElement::new(ElementKind::Tree, 300.0, 500.0, 0, Resources::new(1, 0, 0)));
        let (x, y) = free_spot(&reg, TREE_REGION, TREE_SEPARATION, &mut rng);
        assert!(!rules::is_occupied(reg.all_elements(), x, y, TREE_SEPARATION));
    }

    #[test]
    fn free_spot_gives_up_after_cap() {
        // Region fully inside a blocker's separation radius.
        let mut rng = ChaCha8Rng::seed_from_u64(12);
        let mut reg = EntityRegistry::new();
        reg.push_element(VillageElement::new(ElementKind::Tree, 0.0, 0.0, 0, Resources::new(1, 0, 0)));
        let tiny = Region { x: 0.0, y: 0.0, w: 10.0, h: 10.0 };
        let (x, y) = free_spot(&reg, tiny, TREE_SEPARATION, &mut rng);
        assert!(tiny.contains(x, y));
    }
}
