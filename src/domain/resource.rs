/// Building materials and the bundle type used for stockpiles, yields and costs.
///
/// Quantities are unsigned: a stockpile can never go negative, and the only
/// way to take from one is `try_spend`, which refuses partial payment.

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ResourceKind {
    Wood,
    Stone,
    Metal,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 3] = [ResourceKind::Wood, ResourceKind::Stone, ResourceKind::Metal];

    pub fn label(self) -> &'static str {
        match self {
            ResourceKind::Wood => "wood",
            ResourceKind::Stone => "stone",
            ResourceKind::Metal => "metal",
        }
    }
}

/// A wood/stone/metal triple. Used for the session stockpile, element
/// yields and the bridge segment cost alike.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct Resources {
    pub wood: u32,
    pub stone: u32,
    pub metal: u32,
}

impl Resources {
    pub const fn new(wood: u32, stone: u32, metal: u32) -> Self {
        Resources { wood, stone, metal }
    }

    pub fn get(&self, kind: ResourceKind) -> u32 {
        match kind {
            ResourceKind::Wood => self.wood,
            ResourceKind::Stone => self.stone,
            ResourceKind::Metal => self.metal,
        }
    }

    pub fn add(&mut self, kind: ResourceKind, amount: u32) {
        match kind {
            ResourceKind::Wood => self.wood += amount,
            ResourceKind::Stone => self.stone += amount,
            ResourceKind::Metal => self.metal += amount,
        }
    }

    pub fn add_all(&mut self, other: &Resources) {
        for kind in ResourceKind::ALL {
            self.add(kind, other.get(kind));
        }
    }

    /// Component-wise `self >= cost`.
    pub fn covers(&self, cost: &Resources) -> bool {
        ResourceKind::ALL.iter().all(|&k| self.get(k) >= cost.get(k))
    }

    /// Subtract `cost` if every component is available. Returns false and
    /// leaves the stockpile untouched otherwise.
    pub fn try_spend(&mut self, cost: &Resources) -> bool {
        if !self.covers(cost) {
            return false;
        }
        self.wood -= cost.wood;
        self.stone -= cost.stone;
        self.metal -= cost.metal;
        true
    }

    pub fn scaled(&self, factor: u32) -> Resources {
        Resources {
            wood: self.wood * factor,
            stone: self.stone * factor,
            metal: self.metal * factor,
        }
    }

    /// Non-zero entries in fixed wood → stone → metal order.
    pub fn entries(&self) -> impl Iterator<Item = (ResourceKind, u32)> + '_ {
        ResourceKind::ALL
            .into_iter()
            .map(|k| (k, self.get(k)))
            .filter(|&(_, n)| n > 0)
    }

    pub fn is_empty(&self) -> bool {
        self.wood == 0 && self.stone == 0 && self.metal == 0
    }
}
