/// Simulation: owns one game session and drives its phase machine.
///
/// ## Phase transitions
///
///   Menu ──start──▶ Playing ◀──resume── Paused
///                    │  ──pause──▶
///                    └──flood / bridge──▶ GameOver
///   Menu | Paused | GameOver ──start / restart──▶ Playing (full reset)
///   Paused | GameOver ──main menu──▶ Menu
///
/// Input arrives as `InputEvent`s already in world coordinates. Pointer
/// and action input is ignored outside Playing; held keys are tracked in
/// every phase so a key held across a pause still counts on resume.

use std::collections::HashSet;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::domain::entity::{Character, HeldDirections};
use crate::domain::particles::ParticleSystem;
use super::event::GameEvent;
use super::generation;
use super::interact::InteractionResolver;
use super::registry::EntityRegistry;
use super::snapshot::{HudStats, SessionSummary, Snapshot};
use super::step::{self, TickContext};
use super::world::{clamp_dt, Phase, WorldState, DEFAULT_FLOOD_SECONDS};

/// Key codes the session understands, by their DOM-style names.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Key {
    KeyW,
    KeyA,
    KeyS,
    KeyD,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    KeyE,
    Space,
    Escape,
}

impl Key {
    /// Parse a key code name. Unknown codes yield `None` and are ignored.
    pub fn from_code(code: &str) -> Option<Key> {
        Some(match code {
            "KeyW" => Key::KeyW,
            "KeyA" => Key::KeyA,
            "KeyS" => Key::KeyS,
            "KeyD" => Key::KeyD,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "KeyE" => Key::KeyE,
            "Space" => Key::Space,
            "Escape" => Key::Escape,
            _ => return None,
        })
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MenuAction {
    Start,
    Resume,
    Pause,
    MainMenu,
    Restart,
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputEvent {
    PointerMove { x: f32, y: f32 },
    Click { x: f32, y: f32 },
    KeyDown(Key),
    KeyUp(Key),
    Menu(MenuAction),
    Confirm(bool),
}

/// Session parameters resolved from configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimSettings {
    pub seed: u64,
    pub flood_seconds: f32,
    pub character_speed: f32,
}

impl Default for SimSettings {
    fn default() -> Self {
        SimSettings {
            seed: 0,
            flood_seconds: DEFAULT_FLOOD_SECONDS,
            character_speed: 150.0,
        }
    }
}

pub struct Simulation {
    settings: SimSettings,
    rng: ChaCha8Rng,
    world: WorldState,
    registry: EntityRegistry,
    character: Character,
    particles: ParticleSystem,
    resolver: InteractionResolver,
    held: HashSet<Key>,
    hovered: Option<usize>,
    /// Last pointer position seen while Playing.
    pointer: Option<(f32, f32)>,
    events: Vec<GameEvent>,
}

impl Simulation {
    pub fn new(settings: SimSettings) -> Self {
        let (sx, sy) = Character::START;
        Simulation {
            settings,
            rng: ChaCha8Rng::seed_from_u64(settings.seed),
            world: WorldState::new(settings.flood_seconds),
            registry: EntityRegistry::new(),
            character: Character::new(sx, sy, settings.character_speed),
            particles: ParticleSystem::new(),
            resolver: InteractionResolver::new(),
            held: HashSet::new(),
            hovered: None,
            pointer: None,
            events: Vec::new(),
        }
    }

    // ── Queries ──

    pub fn phase(&self) -> Phase {
        self.world.phase
    }

    pub fn world(&self) -> &WorldState {
        &self.world
    }

    pub fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub fn character(&self) -> &Character {
        &self.character
    }

    pub fn particles(&self) -> &ParticleSystem {
        &self.particles
    }

    pub fn pending_confirmation(&self) -> Option<usize> {
        self.resolver.pending()
    }

    pub fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    pub fn hud(&self) -> HudStats {
        HudStats::from_world(&self.world)
    }

    /// End-of-session report, once the session is over.
    pub fn summary(&self) -> Option<SessionSummary> {
        (self.world.phase == Phase::GameOver).then(|| SessionSummary::from_world(&self.world))
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.world.phase,
            elements: self.registry.all_elements(),
            pickups: self.registry.all_pickups(),
            particles: &self.particles.particles,
            character: &self.character,
            world: &self.world,
            hovered: self.hovered,
            pending_confirmation: self.resolver.pending(),
            elapsed: self.world.elapsed,
        }
    }

    /// Events since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // ── Input ──

    pub fn handle(&mut self, input: InputEvent) {
        match input {
            InputEvent::PointerMove { x, y } => self.pointer_move(x, y),
            InputEvent::Click { x, y } => self.click(x, y),
            InputEvent::KeyDown(key) => self.key_down(key),
            InputEvent::KeyUp(key) => {
                self.held.remove(&key);
            }
            InputEvent::Menu(action) => self.menu(action),
            InputEvent::Confirm(accepted) => self.confirm(accepted),
        }
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if self.world.phase != Phase::Playing { return; }
        self.pointer = Some((x, y));
        self.refresh_hover();
    }

    pub fn click(&mut self, x: f32, y: f32) {
        if self.world.phase != Phase::Playing { return; }
        let mut events = Vec::new();
        self.resolver.act_at_point(
            &mut self.world, &mut self.registry, &mut self.character, x, y, &mut events,
        );
        self.absorb(events);
    }

    pub fn interact_nearby(&mut self) {
        if self.world.phase != Phase::Playing { return; }
        let mut events = Vec::new();
        self.resolver.act_near_character(
            &mut self.world, &mut self.registry, &self.character, &mut events,
        );
        self.absorb(events);
    }

    /// Answer the pending dismantle request. Ignored outside Playing; the
    /// request then stays pending.
    pub fn confirm(&mut self, accepted: bool) {
        if self.world.phase != Phase::Playing { return; }
        let mut events = Vec::new();
        self.resolver.confirm(accepted, &mut self.world, &mut self.registry, &mut events);
        self.absorb(events);
    }

    pub fn key_down(&mut self, key: Key) {
        self.held.insert(key);
        match (self.world.phase, key) {
            (Phase::Playing, Key::Escape) => self.menu(MenuAction::Pause),
            (Phase::Playing, Key::KeyE | Key::Space) => self.interact_nearby(),
            (Phase::Paused, Key::Escape) => self.menu(MenuAction::Resume),
            (Phase::Menu, Key::Space) => self.menu(MenuAction::Start),
            _ => {}
        }
    }

    /// Convenience for string key codes; unknown codes are ignored.
    pub fn key_down_code(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.key_down(key);
        }
    }

    pub fn key_up_code(&mut self, code: &str) {
        if let Some(key) = Key::from_code(code) {
            self.held.remove(&key);
        }
    }

    pub fn menu(&mut self, action: MenuAction) {
        let phase = self.world.phase;
        match action {
            MenuAction::Start | MenuAction::Restart => {
                if phase != Phase::Playing {
                    self.start_session();
                }
            }
            MenuAction::Pause if phase == Phase::Playing => {
                self.world.phase = Phase::Paused;
                info!("session paused");
            }
            MenuAction::Resume if phase == Phase::Paused => {
                self.world.phase = Phase::Playing;
                info!("session resumed");
            }
            MenuAction::MainMenu if matches!(phase, Phase::Paused | Phase::GameOver) => {
                self.world.phase = Phase::Menu;
                info!("back to main menu");
            }
            _ => debug!(?action, ?phase, "menu action ignored"),
        }
    }

    // ── Tick ──

    /// Advance by one scheduler frame. `dt` is clamped to `[0, 1/30]`.
    pub fn tick(&mut self, dt: f32) {
        let dt = clamp_dt(dt);
        let held = self.held_directions();
        let events = step::step(
            TickContext {
                world: &mut self.world,
                character: &mut self.character,
                particles: &mut self.particles,
                held,
            },
            dt,
        );
        let ended = events
            .iter()
            .any(|e| matches!(e, GameEvent::FloodReached | GameEvent::BridgeCompleted));
        if let (true, Some(summary)) = (ended, self.summary()) {
            info!(?summary, standing = self.registry.standing_count(), "session over");
        }
        self.absorb(events);
    }

    // ── Internal ──

    fn held_directions(&self) -> HeldDirections {
        let any = |keys: [Key; 2]| keys.iter().any(|k| self.held.contains(k));
        HeldDirections {
            up: any([Key::KeyW, Key::ArrowUp]),
            down: any([Key::KeyS, Key::ArrowDown]),
            left: any([Key::KeyA, Key::ArrowLeft]),
            right: any([Key::KeyD, Key::ArrowRight]),
        }
    }

    /// Recompute the hovered element from the last pointer position.
    fn refresh_hover(&mut self) {
        self.hovered = self
            .pointer
            .and_then(|(x, y)| InteractionResolver::hover(&self.registry, x, y));
    }

    /// Spawn particle bursts for new events and queue them for the front end.
    /// A dismantle can remove the hovered element, so hover is refreshed too.
    fn absorb(&mut self, events: Vec<GameEvent>) {
        let mut dismantled = false;
        for ev in &events {
            if let Some((emission, x, y)) = ev.emission() {
                self.particles.emit(emission, x, y, &mut self.rng);
            }
            dismantled |= matches!(ev, GameEvent::ElementDismantled { .. });
        }
        if dismantled {
            self.refresh_hover();
        }
        self.events.extend(events);
    }

    /// Regenerate the village and reset every session field together.
    fn start_session(&mut self) {
        self.registry = generation::generate_village(&mut self.rng);
        self.world.reset(self.settings.flood_seconds, self.registry.total_villagers());
        self.world.phase = Phase::Playing;

        let (sx, sy) = Character::START;
        self.character = Character::new(sx, sy, self.settings.character_speed);
        self.particles.clear();
        self.resolver.clear();
        self.hovered = None;
        self.pointer = None;
        self.events.clear();

        info!(
            seed = self.settings.seed,
            elements = self.registry.all_elements().len(),
            pickups = self.registry.all_pickups().len(),
            villagers = self.world.initial_villagers,
            "session started"
        );
    }
}
