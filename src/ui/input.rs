/// Input state tracker: turns terminal events into session input.
///
/// Tracks which keys are currently held down, enabling:
///   - Continuous walking while a direction key is held
///   - Edge-triggered actions (interact, pause, confirm) on every press,
///     never held, so quick double presses both land
///   - Pointer moves and clicks mapped from cells to world coordinates
///
/// Uses crossterm's keyboard enhancement for Release events when available.
/// Falls back to timeout-based release detection on terminals that don't support it.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use bridge_keeper::sim::session::{InputEvent, Key, MenuAction};

use super::renderer::Viewport;

/// After this duration without a Press/Repeat event, consider the key released.
/// Only used when the terminal doesn't report Release events.
const HOLD_TIMEOUT: Duration = Duration::from_millis(160);

/// What the game loop should do with one decoded terminal event.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Command {
    Sim(InputEvent),
    Quit,
}

pub struct InputState {
    /// Timestamp of last Press/Repeat event for each held session key.
    last_active: HashMap<Key, Instant>,

    /// Commands decoded during the most recent `drain_events()`, oldest first.
    commands: Vec<Command>,

    /// Whether to honor Release events. Only true when keyboard
    /// enhancement is confirmed working.
    pub honor_release: bool,
}

impl InputState {
    pub fn new() -> Self {
        InputState {
            last_active: HashMap::with_capacity(16),
            commands: Vec::with_capacity(8),
            honor_release: false,
        }
    }

    /// Drain all pending terminal events into commands.
    /// Call this once per frame, before the simulation tick.
    pub fn drain_events(&mut self, view: &Viewport) -> Vec<Command> {
        self.commands.clear();

        while poll(Duration::ZERO).unwrap_or(false) {
            match event::read() {
                Ok(Event::Key(key)) => self.on_key(key),
                Ok(Event::Mouse(mouse)) => self.on_mouse(mouse, view),
                _ => {}
            }
        }

        // Expire keys that have timed out (fallback for terminals without Release)
        let now = Instant::now();
        let commands = &mut self.commands;
        self.last_active.retain(|key, t| {
            let held = now.duration_since(*t) < HOLD_TIMEOUT;
            if !held {
                commands.push(Command::Sim(InputEvent::KeyUp(*key)));
            }
            held
        });

        std::mem::take(&mut self.commands)
    }

    // ── Internal ──

    fn on_key(&mut self, key: KeyEvent) {
        if is_ctrl_c(&key) {
            self.commands.push(Command::Quit);
            return;
        }

        match key.kind {
            KeyEventKind::Release if self.honor_release => {
                if let Some(k) = session_key(key.code) {
                    if self.last_active.remove(&k).is_some() {
                        self.commands.push(Command::Sim(InputEvent::KeyUp(k)));
                    }
                }
            }
            KeyEventKind::Release => {
                // Ignore release when enhancement not confirmed;
                // rely on timeout-based expiry instead
            }
            _ => {
                if let Some(k) = session_key(key.code).filter(|k| is_one_shot(*k)) {
                    if key.kind == KeyEventKind::Press {
                        self.commands.push(Command::Sim(InputEvent::KeyDown(k)));
                        self.commands.push(Command::Sim(InputEvent::KeyUp(k)));
                    }
                } else if let Some(k) = session_key(key.code) {
                    let was_held = self.is_held(k);
                    self.last_active.insert(k, Instant::now());
                    if !was_held {
                        self.commands.push(Command::Sim(InputEvent::KeyDown(k)));
                    }
                } else if key.kind == KeyEventKind::Press {
                    if let Some(cmd) = meta_command(key.code) {
                        self.commands.push(cmd);
                    }
                }
            }
        }
    }

    fn on_mouse(&mut self, mouse: MouseEvent, view: &Viewport) {
        let Some((x, y)) = view.to_world(mouse.column, mouse.row) else { return };
        let ev = match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => InputEvent::Click { x, y },
            MouseEventKind::Moved | MouseEventKind::Drag(_) => InputEvent::PointerMove { x, y },
            _ => return,
        };
        self.commands.push(Command::Sim(ev));
    }

    fn is_held(&self, key: Key) -> bool {
        self.last_active.get(&key)
            .map(|t| t.elapsed() < HOLD_TIMEOUT)
            .unwrap_or(false)
    }
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('C'))
}

/// Terminal key to the session's key codes. Movement keys are tracked as
/// held; the rest are one-shot.
fn session_key(code: KeyCode) -> Option<Key> {
    Some(match code {
        KeyCode::Char('w' | 'W') => Key::KeyW,
        KeyCode::Char('a' | 'A') => Key::KeyA,
        KeyCode::Char('s' | 'S') => Key::KeyS,
        KeyCode::Char('d' | 'D') => Key::KeyD,
        KeyCode::Up => Key::ArrowUp,
        KeyCode::Down => Key::ArrowDown,
        KeyCode::Left => Key::ArrowLeft,
        KeyCode::Right => Key::ArrowRight,
        KeyCode::Char('e' | 'E') => Key::KeyE,
        KeyCode::Char(' ') => Key::Space,
        KeyCode::Esc => Key::Escape,
        _ => return None,
    })
}

/// Action keys: each press is a full down/up pair.
fn is_one_shot(key: Key) -> bool {
    matches!(key, Key::KeyE | Key::Space | Key::Escape)
}

/// One-shot keys for the confirm prompt and the menus.
fn meta_command(code: KeyCode) -> Option<Command> {
    let ev = match code {
        KeyCode::Char('y' | 'Y') => InputEvent::Confirm(true),
        KeyCode::Char('n' | 'N') => InputEvent::Confirm(false),
        KeyCode::Enter => InputEvent::Menu(MenuAction::Start),
        KeyCode::Char('r' | 'R') => InputEvent::Menu(MenuAction::Restart),
        KeyCode::Char('m' | 'M') => InputEvent::Menu(MenuAction::MainMenu),
        KeyCode::Char('q' | 'Q') => return Some(Command::Quit),
        _ => return None,
    };
    Some(Command::Sim(ev))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn first_press_is_key_down_repeats_are_not() {
        let mut input = InputState::new();
        input.on_key(press(KeyCode::Char('d')));
        input.on_key(press(KeyCode::Char('d')));
        assert_eq!(input.commands, vec![Command::Sim(InputEvent::KeyDown(Key::KeyD))]);
    }

    #[test]
    fn action_keys_fire_on_every_press() {
        let mut input = InputState::new();
        input.on_key(press(KeyCode::Char('e')));
        input.on_key(press(KeyCode::Char('e')));
        let down = Command::Sim(InputEvent::KeyDown(Key::KeyE));
        let up = Command::Sim(InputEvent::KeyUp(Key::KeyE));
        assert_eq!(input.commands, vec![down, up, down, up]);
        assert!(input.last_active.is_empty());

        input.commands.clear();
        let mut repeat = press(KeyCode::Esc);
        repeat.kind = KeyEventKind::Repeat;
        input.on_key(repeat);
        assert!(input.commands.is_empty());
    }

    #[test]
    fn release_only_counts_when_enhancement_is_on() {
        let mut input = InputState::new();
        let mut up = press(KeyCode::Left);
        up.kind = KeyEventKind::Release;

        input.on_key(press(KeyCode::Left));
        input.on_key(up);
        assert_eq!(input.commands.len(), 1);

        input.honor_release = true;
        input.on_key(up);
        assert_eq!(input.commands.last(), Some(&Command::Sim(InputEvent::KeyUp(Key::ArrowLeft))));
    }

    #[test]
    fn prompt_and_menu_keys() {
        assert_eq!(meta_command(KeyCode::Char('Y')), Some(Command::Sim(InputEvent::Confirm(true))));
        assert_eq!(meta_command(KeyCode::Char('n')), Some(Command::Sim(InputEvent::Confirm(false))));
        assert_eq!(meta_command(KeyCode::Char('q')), Some(Command::Quit));
        assert_eq!(meta_command(KeyCode::Tab), None);
    }

    #[test]
    fn ctrl_c_quits() {
        let mut input = InputState::new();
        input.on_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert_eq!(input.commands, vec![Command::Quit]);
    }

    #[test]
    fn clicks_inside_the_map_become_world_clicks() {
        let view = Viewport { col: 0, row: 2, cols: 128, rows: 48 };
        let mut input = InputState::new();
        let click = MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column: 64,
            row: 26,
            modifiers: KeyModifiers::NONE,
        };
        input.on_mouse(click, &view);
        assert_eq!(input.commands, vec![Command::Sim(InputEvent::Click { x: 516.0, y: 392.0 })]);

        input.commands.clear();
        input.on_mouse(MouseEvent { row: 0, ..click }, &view);
        assert!(input.commands.is_empty());
    }
}
