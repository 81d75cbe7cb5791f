/// Entry point and game loop.

mod ui;

use std::fs::File;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use bridge_keeper::config::{GameConfig, LogConfig};
use bridge_keeper::sim::event::GameEvent;
use bridge_keeper::sim::session::Simulation;
use ui::input::{Command, InputState};
use ui::renderer::Renderer;

const FRAME_SLEEP: Duration = Duration::from_millis(5);
const MESSAGE_TIME: Duration = Duration::from_millis(2500);

fn main() {
    let (config, config_error) = GameConfig::load();
    init_tracing(&config.log);
    if let Some(e) = config_error {
        warn!(error = %e, "config.toml ignored; using default settings");
    }

    let settings = config.sim_settings();
    info!(seed = settings.seed, flood_seconds = settings.flood_seconds, "Bridge Keeper starting");
    let mut sim = Simulation::new(settings);

    let mut renderer = Renderer::new();
    let mut input = InputState::new();
    match renderer.init() {
        Ok(releases) => input.honor_release = releases,
        Err(e) => {
            eprintln!("Terminal init failed: {e}");
            return;
        }
    }

    let result = game_loop(&mut sim, &mut renderer, &mut input, &config);

    if let Err(e) = renderer.cleanup() {
        eprintln!("Terminal cleanup failed: {e}");
    }
    if let Err(e) = result {
        eprintln!("Game error: {e}");
    }

    println!();
    println!("Thanks for playing Bridge Keeper!");
    println!("Seed: {}  (set [session] seed in config.toml to replay this village)", settings.seed);
}

/// Log to a file; the terminal belongs to the renderer. `RUST_LOG` wins
/// over the configured filter.
fn init_tracing(log: &LogConfig) {
    let Ok(file) = File::create(&log.file) else { return };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&log.filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .init();
}

/// Short-lived status line shown under the map.
struct Banner {
    text: String,
    until: Instant,
}

fn game_loop(
    sim: &mut Simulation,
    renderer: &mut Renderer,
    input: &mut InputState,
    config: &GameConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let tick_rate = Duration::from_millis(config.frame.tick_rate_ms);
    let mut last_tick = Instant::now();
    let mut banner: Option<Banner> = None;

    loop {
        for cmd in input.drain_events(&renderer.viewport()) {
            match cmd {
                Command::Quit => return Ok(()),
                Command::Sim(ev) => sim.handle(ev),
            }
        }

        let elapsed = last_tick.elapsed();
        if elapsed >= tick_rate {
            last_tick = Instant::now();
            // Clamped inside the session.
            sim.tick(elapsed.as_secs_f32());
        }

        for ev in sim.drain_events() {
            if let Some(text) = describe(&ev) {
                banner = Some(Banner { text, until: Instant::now() + MESSAGE_TIME });
            }
        }
        if banner.as_ref().is_some_and(|b| Instant::now() >= b.until) {
            banner = None;
        }

        renderer.render(&sim.snapshot(), banner.as_ref().map(|b| b.text.as_str()))?;
        std::thread::sleep(FRAME_SLEEP);
    }
}

/// Status-line text for events worth telling the player about.
fn describe(ev: &GameEvent) -> Option<String> {
    match ev {
        GameEvent::ElementDismantled { kind, displaced, .. } if *displaced > 0 => Some(format!(
            "{} dismantled. {} villager(s) displaced.",
            kind.label(), displaced,
        )),
        GameEvent::ConfirmationBlocked { .. } => {
            Some("Answer the open dismantle request first [Y/N].".into())
        }
        GameEvent::SegmentBuilt { segment } => Some(format!("Bridge segment {segment} built!")),
        GameEvent::BridgeCompleted => Some("The bridge is finished!".into()),
        GameEvent::FloodReached => Some("The flood has arrived.".into()),
        _ => None,
    }
}
