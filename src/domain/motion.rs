/// Keeper motion: reconciles held keys and pointer seeks.
///
/// ## Transition Table
///
/// ┌───────────────────────────────┬──────────────────┬──────────────────────┐
/// │ Condition (priority order)     │ New state        │ Effect               │
/// ├───────────────────────────────┼──────────────────┼──────────────────────┤
/// │ any direction held             │ KeyboardMoving   │ step, clamp, target  │
/// │                                │                  │ snaps to position    │
/// │ moving && dist(target) > 3     │ unchanged        │ step toward target   │
/// │ otherwise                      │ Idle             │                      │
/// └───────────────────────────────┴──────────────────┴──────────────────────┘
///
/// Keyboard axes are NOT normalized together: holding two directions moves
/// at `speed` on each axis, so diagonals cover ~1.41× the ground.

use super::entity::{Character, HeldDirections, MotionState};

/// Seek stops once the keeper is this close to the target.
pub const ARRIVE_DISTANCE: f32 = 3.0;
/// Seconds per walk-cycle frame.
pub const FRAME_TIME: f32 = 0.15;
pub const WALK_FRAMES: u8 = 4;

/// World rectangle the keeper is confined to: `[0, w] × [0, h]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn clamp(&self, x: f32, y: f32) -> (f32, f32) {
        (x.clamp(0.0, self.width), y.clamp(0.0, self.height))
    }
}

/// Advance the keeper by `dt` seconds.
pub fn step_character(ch: &mut Character, held: HeldDirections, bounds: Bounds, dt: f32) {
    if held.any() {
        let (ax, ay) = held.axes();
        let step = ch.speed * dt;
        let (x, y) = bounds.clamp(ch.x + ax * step, ch.y + ay * step);
        ch.x = x;
        ch.y = y;
        ch.target_x = x;
        ch.target_y = y;
        ch.motion = MotionState::KeyboardMoving;
    } else if ch.is_moving() && remaining(ch) > ARRIVE_DISTANCE {
        let dist = remaining(ch);
        // Zero-length direction has nothing to normalize.
        if dist > 0.0 {
            let step = ch.speed * dt;
            let nx = ch.x + (ch.target_x - ch.x) / dist * step;
            let ny = ch.y + (ch.target_y - ch.y) / dist * step;
            let (x, y) = bounds.clamp(nx, ny);
            ch.x = x;
            ch.y = y;
        }
    } else {
        ch.motion = MotionState::Idle;
    }

    animate(ch, dt);
}

fn remaining(ch: &Character) -> f32 {
    super::rules::distance(ch.x, ch.y, ch.target_x, ch.target_y)
}

fn animate(ch: &mut Character, dt: f32) {
    if ch.is_moving() {
        ch.anim_timer += dt;
        if ch.anim_timer >= FRAME_TIME {
            ch.anim_frame = (ch.anim_frame + 1) % WALK_FRAMES;
            ch.anim_timer = 0.0;
        }
    } else {
        ch.anim_frame = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOUNDS: Bounds = Bounds { width: 1024.0, height: 768.0 };
    const DT: f32 = 0.1;

    fn keeper() -> Character {
        Character::new(300.0, 300.0, 150.0)
    }

    fn right() -> HeldDirections {
        HeldDirections { right: true, ..Default::default() }
    }

    #[test]
    fn keyboard_moves_and_snaps_target() {
        let mut ch = keeper();
        step_character(&mut ch, right(), BOUNDS, DT);
        assert!((ch.x - 315.0).abs() < 1e-4);
        assert_eq!(ch.y, 300.0);
        assert_eq!((ch.target_x, ch.target_y), (ch.x, ch.y));
        assert_eq!(ch.motion, MotionState::KeyboardMoving);
    }

    #[test]
    fn diagonal_is_not_normalized() {
        let mut ch = keeper();
        let held = HeldDirections { down: true, right: true, ..Default::default() };
        step_character(&mut ch, held, BOUNDS, DT);
        assert!((ch.x - 315.0).abs() < 1e-4);
        assert!((ch.y - 315.0).abs() < 1e-4);
    }

    #[test]
    fn keyboard_cancels_seek() {
        let mut ch = keeper();
        ch.seek(900.0, 300.0);
        step_character(&mut ch, HeldDirections { up: true, ..Default::default() }, BOUNDS, DT);
        assert_eq!(ch.motion, MotionState::KeyboardMoving);
        assert_eq!((ch.target_x, ch.target_y), (ch.x, ch.y));
        // Released: nothing left to seek.
        step_character(&mut ch, HeldDirections::default(), BOUNDS, DT);
        assert_eq!(ch.motion, MotionState::Idle);
    }

    #[test]
    fn keyboard_clamps_to_bounds() {
        let mut ch = Character::new(1020.0, 2.0, 150.0);
        let held = HeldDirections { up: true, right: true, ..Default::default() };
        step_character(&mut ch, held, BOUNDS, DT);
        assert_eq!((ch.x, ch.y), (1024.0, 0.0));
    }

    #[test]
    fn seek_moves_along_normalized_direction() {
        let mut ch = keeper();
        ch.seek(300.0 + 30.0, 300.0 + 40.0);
        step_character(&mut ch, HeldDirections::default(), BOUNDS, DT);
        // 15 units along (0.6, 0.8)
        assert!((ch.x - 309.0).abs() < 1e-3);
        assert!((ch.y - 312.0).abs() < 1e-3);
        assert_eq!(ch.motion, MotionState::Seeking);
    }

    #[test]
    fn seek_stops_within_arrive_distance() {
        let mut ch = keeper();
        ch.seek(302.0, 301.0);
        step_character(&mut ch, HeldDirections::default(), BOUNDS, DT);
        assert_eq!(ch.motion, MotionState::Idle);
        assert_eq!((ch.x, ch.y), (300.0, 300.0));
    }

    #[test]
    fn seek_onto_own_position_is_safe() {
        let mut ch = keeper();
        ch.seek(300.0, 300.0);
        step_character(&mut ch, HeldDirections::default(), BOUNDS, DT);
        assert!(ch.x.is_finite() && ch.y.is_finite());
        assert_eq!(ch.motion, MotionState::Idle);
    }

    #[test]
    fn seek_eventually_arrives() {
        let mut ch = keeper();
        ch.seek(600.0, 500.0);
        for _ in 0..200 {
            step_character(&mut ch, HeldDirections::default(), BOUNDS, 1.0 / 60.0);
        }
        assert_eq!(ch.motion, MotionState::Idle);
        assert!(super::super::rules::distance(ch.x, ch.y, 600.0, 500.0) <= ARRIVE_DISTANCE);
    }

    #[test]
    fn walk_cycle_advances_every_frame_time() {
        let mut ch = keeper();
        step_character(&mut ch, right(), BOUNDS, 0.1);
        assert_eq!(ch.anim_frame, 0);
        step_character(&mut ch, right(), BOUNDS, 0.1);
        assert_eq!(ch.anim_frame, 1);
        assert_eq!(ch.anim_timer, 0.0);
    }

    #[test]
    fn walk_cycle_wraps_after_four_frames() {
        let mut ch = keeper();
        for _ in 0..4 {
            step_character(&mut ch, right(), BOUNDS, FRAME_TIME);
        }
        assert_eq!(ch.anim_frame, 0);
    }

    #[test]
    fn idle_resets_frame_but_not_timer() {
        let mut ch = keeper();
        ch.anim_frame = 2;
        ch.anim_timer = 0.07;
        step_character(&mut ch, HeldDirections::default(), BOUNDS, DT);
        assert_eq!(ch.anim_frame, 0);
        assert_eq!(ch.anim_timer, 0.07);
    }
}
