/// WorldState: the session aggregate the UI reads every frame.
///
/// ## Invariants
///
///   - `villagers_alive + villagers_displaced == initial_villagers`
///   - `MORAL_MIN <= moral <= MORAL_MAX`
///   - `bridge_progress == segments.len() / MAX_SEGMENTS * BRIDGE_REQUIRED`
///
/// Fields only change while `phase == Playing`, apart from the one
/// terminal write of `villagers_saved` when the bridge completes.

use crate::domain::entity::BridgeSegment;
use crate::domain::motion::Bounds;
use crate::domain::resource::Resources;

pub const SCREEN_WIDTH: f32 = 1024.0;
pub const SCREEN_HEIGHT: f32 = 768.0;
pub const WORLD_BOUNDS: Bounds = Bounds { width: SCREEN_WIDTH, height: SCREEN_HEIGHT };

pub const BRIDGE_REQUIRED: f32 = 100.0;
pub const MAX_SEGMENTS: u32 = 5;
pub const START_MORAL: i32 = 100;
pub const DEFAULT_FLOOD_SECONDS: f32 = 300.0;

/// Largest step the simulation will take in one tick.
pub const MAX_DT: f32 = 1.0 / 30.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Menu,
    Playing,
    Paused,
    GameOver,
}

#[derive(Clone, Debug)]
pub struct WorldState {
    pub resources: Resources,

    // ── Villagers ──
    pub villagers_alive: u32,
    pub initial_villagers: u32,
    pub villagers_displaced: u32,
    /// Set only when the bridge is finished in time.
    pub villagers_saved: Option<u32>,

    // ── Bridge ──
    pub segments: Vec<BridgeSegment>,
    pub bridge_progress: f32,

    // ── Clock ──
    /// Seconds until the flood arrives.
    pub flood_timer: f32,
    /// Simulated seconds since the session started.
    pub elapsed: f64,

    pub moral: i32,
    pub phase: Phase,
}

impl WorldState {
    pub fn new(flood_seconds: f32) -> Self {
        WorldState {
            resources: Resources::default(),
            villagers_alive: 0,
            initial_villagers: 0,
            villagers_displaced: 0,
            villagers_saved: None,
            segments: Vec::new(),
            bridge_progress: 0.0,
            flood_timer: flood_seconds,
            elapsed: 0.0,
            moral: START_MORAL,
            phase: Phase::Menu,
        }
    }

    pub fn built_segments(&self) -> u32 {
        self.segments.len() as u32
    }

    pub fn bridge_complete(&self) -> bool {
        self.bridge_progress >= BRIDGE_REQUIRED
    }

    /// Fresh session state around a newly generated village.
    pub fn reset(&mut self, flood_seconds: f32, villagers: u32) {
        *self = WorldState::new(flood_seconds);
        self.initial_villagers = villagers;
        self.villagers_alive = villagers;
    }

    /// Move `n` villagers from alive to displaced.
    pub fn displace(&mut self, n: u32) {
        let n = n.min(self.villagers_alive);
        self.villagers_alive -= n;
        self.villagers_displaced += n;
    }
}

/// Clamp a frame delta from the scheduler into `[0, MAX_DT]`.
/// Negative or NaN input becomes 0.
pub fn clamp_dt(dt: f32) -> f32 {
    if dt.is_nan() || dt <= 0.0 {
        0.0
    } else {
        dt.min(MAX_DT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_seeds_villager_ledger() {
        let mut w = WorldState::new(300.0);
        w.reset(120.0, 42);
        assert_eq!(w.initial_villagers, 42);
        assert_eq!(w.villagers_alive, 42);
        assert_eq!(w.villagers_displaced, 0);
        assert_eq!(w.flood_timer, 120.0);
        assert_eq!(w.moral, START_MORAL);
        assert_eq!(w.villagers_saved, None);
    }

    #[test]
    fn displace_keeps_ledger_balanced() {
        let mut w = WorldState::new(300.0);
        w.reset(300.0, 5);
        w.displace(3);
        w.displace(9);
        assert_eq!(w.villagers_alive, 0);
        assert_eq!(w.villagers_displaced, 5);
    }

    #[test]
    fn dt_is_clamped() {
        assert_eq!(clamp_dt(-1.0), 0.0);
        assert_eq!(clamp_dt(f32::NAN), 0.0);
        assert_eq!(clamp_dt(0.5), MAX_DT);
        assert_eq!(clamp_dt(0.01), 0.01);
    }
}
