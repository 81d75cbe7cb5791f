/// Short-lived visual feedback: debris, dust, sparkles and floating labels.
///
/// Velocities are in world units per *reference 60 fps frame*, not per
/// second. Integration multiplies by `dt * 60`, so the effect plays at the
/// same speed regardless of the real frame rate.

use std::f32::consts::TAU;

use rand::Rng;

pub const FRAME_SCALE: f32 = 60.0;

pub const DEBRIS_COUNT: usize = 12;
pub const DUST_COUNT: usize = 8;
pub const SPARKLE_COUNT: usize = 8;

pub const DEBRIS_LIFE: f32 = 1.5;
pub const DUST_LIFE: f32 = 2.0;
pub const SPARKLE_LIFE: f32 = 1.2;
pub const TEXT_LIFE: f32 = 2.0;

pub const COLLECT_LABEL: &str = "+1";

const DEBRIS_SHADES: [Rgb; 3] = [Rgb(139, 69, 19), Rgb(160, 82, 45), Rgb(101, 67, 33)];
const DUST_TINT: Rgb = Rgb(139, 115, 85);
const SPARKLE_SHADES: [Rgb; 2] = [Rgb(255, 215, 0), Rgb(255, 165, 0)];
const TEXT_TINT: Rgb = Rgb(0, 255, 0);

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Kind plus the per-kind visual state the renderer needs.
#[derive(Clone, Debug, PartialEq)]
pub enum ParticleKind {
    Debris { rotation: f32, rotation_speed: f32 },
    Dust { alpha: f32 },
    Sparkle { twinkle: f32 },
    Text { label: &'static str },
}

impl ParticleKind {
    /// Downward acceleration per reference frame.
    fn gravity(&self) -> f32 {
        match self {
            ParticleKind::Dust { .. } => 0.05,
            ParticleKind::Text { .. } => 0.0,
            ParticleKind::Debris { .. } | ParticleKind::Sparkle { .. } => 0.15,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub x: f32,
    pub y: f32,
    pub vx: f32,
    pub vy: f32,
    /// Seconds left. The particle is gone once this reaches zero.
    pub life: f32,
    /// Life at spawn, for fade-out ratios.
    pub max_life: f32,
    pub size: f32,
    pub color: Rgb,
    pub kind: ParticleKind,
}

impl Particle {
    /// Remaining life as a 0..=1 fraction.
    pub fn fade(&self) -> f32 {
        if self.max_life <= 0.0 { return 0.0; }
        (self.life / self.max_life).clamp(0.0, 1.0)
    }
}

/// Which feedback burst to spawn.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Emission {
    Destruction,
    Collection,
}

/// All live particles.
#[derive(Clone, Debug, Default)]
pub struct ParticleSystem {
    pub particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        ParticleSystem { particles: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn emit<R: Rng>(&mut self, emission: Emission, x: f32, y: f32, rng: &mut R) {
        match emission {
            Emission::Destruction => self.emit_destruction(x, y, rng),
            Emission::Collection => self.emit_collection(x, y, rng),
        }
    }

    fn emit_destruction<R: Rng>(&mut self, x: f32, y: f32, rng: &mut R) {
        for i in 0..DEBRIS_COUNT {
            self.particles.push(Particle {
                x,
                y,
                vx: (rng.gen::<f32>() - 0.5) * 6.0,
                vy: (rng.gen::<f32>() - 0.5) * 6.0 - 2.0,
                life: DEBRIS_LIFE,
                max_life: DEBRIS_LIFE,
                size: rng.gen_range(2.0..6.0),
                color: DEBRIS_SHADES[i % DEBRIS_SHADES.len()],
                kind: ParticleKind::Debris {
                    rotation: rng.gen_range(0.0..TAU),
                    rotation_speed: (rng.gen::<f32>() - 0.5) * 0.2,
                },
            });
        }

        for _ in 0..DUST_COUNT {
            self.particles.push(Particle {
                x: x + (rng.gen::<f32>() - 0.5) * 20.0,
                y: y + (rng.gen::<f32>() - 0.5) * 20.0,
                vx: (rng.gen::<f32>() - 0.5) * 2.0,
                vy: -rng.gen::<f32>() * 2.0,
                life: DUST_LIFE,
                max_life: DUST_LIFE,
                size: rng.gen_range(4.0..12.0),
                color: DUST_TINT,
                kind: ParticleKind::Dust { alpha: rng.gen_range(0.2..0.8) },
            });
        }
    }

    fn emit_collection<R: Rng>(&mut self, x: f32, y: f32, rng: &mut R) {
        for i in 0..SPARKLE_COUNT {
            self.particles.push(Particle {
                x,
                y,
                vx: (rng.gen::<f32>() - 0.5) * 3.0,
                vy: -rng.gen::<f32>() * 4.0 - 1.0,
                life: SPARKLE_LIFE,
                max_life: SPARKLE_LIFE,
                size: rng.gen_range(1.0..4.0),
                color: SPARKLE_SHADES[i % SPARKLE_SHADES.len()],
                kind: ParticleKind::Sparkle { twinkle: rng.gen_range(0.0..TAU) },
            });
        }

        self.particles.push(Particle {
            x,
            y: y - 10.0,
            vx: 0.0,
            vy: -2.0,
            life: TEXT_LIFE,
            max_life: TEXT_LIFE,
            size: 16.0,
            color: TEXT_TINT,
            kind: ParticleKind::Text { label: COLLECT_LABEL },
        });
    }

    /// Integrate every particle by `dt` seconds and drop the expired ones.
    pub fn step(&mut self, dt: f32) {
        let frames = dt * FRAME_SCALE;
        for i in (0..self.particles.len()).rev() {
            let p = &mut self.particles[i];
            p.x += p.vx * frames;
            p.y += p.vy * frames;
            p.vy += p.kind.gravity() * frames;

            match &mut p.kind {
                ParticleKind::Debris { rotation, rotation_speed } => {
                    *rotation += *rotation_speed * frames;
                }
                ParticleKind::Sparkle { twinkle } => {
                    *twinkle += dt * 4.0;
                }
                ParticleKind::Dust { .. } | ParticleKind::Text { .. } => {}
            }

            p.life -= dt;
            if p.life <= 0.0 {
                self.particles.swap_remove(i);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    fn lone(kind: ParticleKind, vx: f32, vy: f32, life: f32) -> ParticleSystem {
        ParticleSystem {
            particles: vec![Particle {
                x: 0.0, y: 0.0, vx, vy,
                life, max_life: life,
                size: 1.0,
                color: Rgb(0, 0, 0),
                kind,
            }],
        }
    }

    #[test]
    fn destruction_burst_is_debris_then_dust() {
        let mut ps = ParticleSystem::new();
        ps.emit(Emission::Destruction, 50.0, 60.0, &mut rng());
        assert_eq!(ps.len(), DEBRIS_COUNT + DUST_COUNT);
        let debris = ps.particles.iter().filter(|p| matches!(p.kind, ParticleKind::Debris { .. })).count();
        let dust = ps.particles.iter().filter(|p| matches!(p.kind, ParticleKind::Dust { .. })).count();
        assert_eq!((debris, dust), (12, 8));
        for p in &ps.particles {
            match p.kind {
                ParticleKind::Debris { .. } => {
                    assert_eq!(p.life, DEBRIS_LIFE);
                    assert!((2.0..6.0).contains(&p.size));
                    assert!(p.vy <= 1.0 && p.vy >= -5.0);
                }
                ParticleKind::Dust { alpha } => {
                    assert_eq!(p.life, DUST_LIFE);
                    assert!((4.0..12.0).contains(&p.size));
                    assert!((0.2..0.8).contains(&alpha));
                    assert!(p.vy <= 0.0);
                    assert!((p.x - 50.0).abs() <= 10.0);
                }
                _ => panic!("unexpected kind in destruction burst"),
            }
        }
    }

    #[test]
    fn collection_burst_has_one_label() {
        let mut ps = ParticleSystem::new();
        ps.emit(Emission::Collection, 10.0, 20.0, &mut rng());
        assert_eq!(ps.len(), SPARKLE_COUNT + 1);
        let labels: Vec<_> = ps.particles.iter()
            .filter_map(|p| match p.kind { ParticleKind::Text { label } => Some((label, p)), _ => None })
            .collect();
        assert_eq!(labels.len(), 1);
        let (label, p) = labels[0];
        assert_eq!(label, "+1");
        assert_eq!((p.x, p.y, p.vx, p.vy), (10.0, 10.0, 0.0, -2.0));
        assert!(ps.particles.iter()
            .filter(|p| matches!(p.kind, ParticleKind::Sparkle { .. }))
            .all(|p| p.vy < 0.0 && p.life == SPARKLE_LIFE));
    }

    #[test]
    fn sparkle_colors_alternate() {
        let mut ps = ParticleSystem::new();
        ps.emit(Emission::Collection, 0.0, 0.0, &mut rng());
        assert_eq!(ps.particles[0].color, SPARKLE_SHADES[0]);
        assert_eq!(ps.particles[1].color, SPARKLE_SHADES[1]);
        assert_eq!(ps.particles[2].color, SPARKLE_SHADES[0]);
    }

    #[test]
    fn velocity_is_per_reference_frame() {
        let mut ps = lone(ParticleKind::Text { label: "+1" }, 1.0, -2.0, 2.0);
        ps.step(0.5);
        let p = &ps.particles[0];
        assert!((p.x - 30.0).abs() < 1e-4);
        assert!((p.y + 60.0).abs() < 1e-4);
        assert_eq!(p.vy, -2.0);
    }

    #[test]
    fn gravity_depends_on_kind() {
        let dt = 1.0 / 60.0;
        let mut dust = lone(ParticleKind::Dust { alpha: 0.5 }, 0.0, 0.0, 2.0);
        dust.step(dt);
        assert!((dust.particles[0].vy - 0.05).abs() < 1e-5);

        let mut debris = lone(ParticleKind::Debris { rotation: 0.0, rotation_speed: 0.1 }, 0.0, 0.0, 1.5);
        debris.step(dt);
        assert!((debris.particles[0].vy - 0.15).abs() < 1e-5);

        let mut sparkle = lone(ParticleKind::Sparkle { twinkle: 0.0 }, 0.0, 0.0, 1.2);
        sparkle.step(dt);
        assert!((sparkle.particles[0].vy - 0.15).abs() < 1e-5);
    }

    #[test]
    fn debris_spins_and_sparkles_twinkle() {
        let mut ps = lone(ParticleKind::Debris { rotation: 1.0, rotation_speed: 0.1 }, 0.0, 0.0, 1.5);
        ps.step(0.5);
        match ps.particles[0].kind {
            ParticleKind::Debris { rotation, .. } => assert!((rotation - 4.0).abs() < 1e-4),
            _ => unreachable!(),
        }

        let mut ps = lone(ParticleKind::Sparkle { twinkle: 0.0 }, 0.0, 0.0, 1.2);
        ps.step(0.25);
        match ps.particles[0].kind {
            ParticleKind::Sparkle { twinkle } => assert!((twinkle - 1.0).abs() < 1e-5),
            _ => unreachable!(),
        }
    }

    #[test]
    fn expired_particles_are_removed() {
        let mut ps = lone(ParticleKind::Dust { alpha: 0.5 }, 0.0, 0.0, 0.1);
        ps.step(0.05);
        assert_eq!(ps.len(), 1);
        ps.step(0.05);
        assert!(ps.is_empty());
    }

    #[test]
    fn bursts_drain_completely() {
        let mut ps = ParticleSystem::new();
        let mut r = rng();
        ps.emit(Emission::Destruction, 0.0, 0.0, &mut r);
        ps.emit(Emission::Collection, 0.0, 0.0, &mut r);
        for _ in 0..70 {
            ps.step(1.0 / 30.0);
        }
        assert!(ps.is_empty());
    }
}
