//! Ephemeral particle pools
//!
//! Pools are pure producers/consumers: scene handlers push particles, the
//! orchestrator ages every pool once per tick, and the renderer reads them.
//! Nothing in gameplay ever looks at a particle.

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

/// RGBA in 0..1
pub type Color = [f32; 4];

pub const BEAM_BLUE: Color = [120.0 / 255.0, 200.0 / 255.0, 1.0, 0.8];
pub const FLAME_BLUE: Color = [0.35, 0.65, 1.0, 0.9];
pub const THRUSTER_ORANGE: Color = [1.0, 0.6, 0.15, 0.9];
pub const FIRE_RED: Color = [1.0, 0.3, 0.05, 0.9];

/// Life lost per tick
pub const LIFE_STEP: f32 = 1.0;

/// A single particle
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub life: f32,
    pub max_life: f32,
    pub color: Color,
}

impl Particle {
    /// Remaining life as 0..1, used for fading
    pub fn life_fraction(&self) -> f32 {
        if self.max_life <= 0.0 {
            0.0
        } else {
            (self.life / self.max_life).clamp(0.0, 1.0)
        }
    }
}

/// A capped pool of particles sharing the same physics
#[derive(Debug, Clone)]
pub struct ParticlePool {
    particles: Vec<Particle>,
    cap: usize,
    /// Added to vertical velocity each tick
    gravity: f32,
}

impl ParticlePool {
    pub fn new(cap: usize) -> Self {
        Self {
            particles: Vec::with_capacity(cap.min(256)),
            cap,
            gravity: 0.0,
        }
    }

    pub fn with_gravity(cap: usize, gravity: f32) -> Self {
        Self {
            gravity,
            ..Self::new(cap)
        }
    }

    /// Add a particle unless the pool is full
    pub fn spawn(&mut self, particle: Particle) -> bool {
        if self.particles.len() >= self.cap {
            return false;
        }
        self.particles.push(particle);
        true
    }

    /// Age, move and cull every particle
    pub fn tick(&mut self) {
        let gravity = self.gravity;
        for p in &mut self.particles {
            p.vel.y += gravity;
            p.pos += p.vel;
            p.life -= LIFE_STEP;
        }
        self.particles.retain(|p| p.life > 0.0);
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn is_full(&self) -> bool {
        self.particles.len() >= self.cap
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }
}

/// The ambient pools the scenes emit into
#[derive(Debug, Clone)]
pub struct Pools {
    /// Ship engines and beam-capture trails
    pub thrusters: ParticlePool,
    /// Player jetpack flames
    pub flames: ParticlePool,
    /// Burning hull of the arrival ship
    pub fire: ParticlePool,
}

impl Pools {
    pub fn new(max_particles: usize, max_fire: usize) -> Self {
        Self {
            thrusters: ParticlePool::new(max_particles),
            flames: ParticlePool::new(max_particles),
            fire: ParticlePool::with_gravity(max_fire, 0.1),
        }
    }

    pub fn tick(&mut self) {
        self.thrusters.tick();
        self.flames.tick();
        self.fire.tick();
    }

    pub fn clear(&mut self) {
        self.thrusters.clear();
        self.flames.clear();
        self.fire.clear();
    }
}

fn life(rng: &mut Pcg32, min: f32, max: f32) -> f32 {
    rng.random_range(min..max)
}

/// Exhaust puffs trailing behind a ship moving in `heading`
pub fn emit_thrust(pool: &mut ParticlePool, rng: &mut Pcg32, nozzle: Vec2, heading: f32, count: usize) {
    for _ in 0..count {
        let l = life(rng, 20.0, 40.0);
        let spread = rng.random_range(-0.6..0.6);
        pool.spawn(Particle {
            pos: nozzle + Vec2::new(0.0, rng.random_range(-6.0..6.0)),
            vel: Vec2::new(-heading * rng.random_range(1.0..3.0), spread),
            size: rng.random_range(2.0..5.0),
            life: l,
            max_life: l,
            color: THRUSTER_ORANGE,
        });
    }
}

/// Jetpack flames under the player's feet
pub fn emit_flames(pool: &mut ParticlePool, rng: &mut Pcg32, feet: Vec2, count: usize) {
    for _ in 0..count {
        let l = life(rng, 20.0, 40.0);
        pool.spawn(Particle {
            pos: feet + Vec2::new(rng.random_range(-8.0..8.0), 0.0),
            vel: Vec2::new(rng.random_range(-0.4..0.4), rng.random_range(1.0..2.5)),
            size: rng.random_range(2.0..4.5),
            life: l,
            max_life: l,
            color: FLAME_BLUE,
        });
    }
}

/// Single sparkle left behind by a player being pulled into a beam
pub fn emit_beam_trail(pool: &mut ParticlePool, rng: &mut Pcg32, at: Vec2) {
    let l = life(rng, 20.0, 40.0);
    pool.spawn(Particle {
        pos: at,
        vel: Vec2::new(rng.random_range(-0.5..0.5), rng.random_range(-0.5..0.5)),
        size: rng.random_range(2.0..4.0),
        life: l,
        max_life: l,
        color: BEAM_BLUE,
    });
}

/// A rising ember from the burning hull region `origin..origin + span`
pub fn emit_fire(pool: &mut ParticlePool, rng: &mut Pcg32, origin: Vec2, span: f32, low_power: bool) {
    let (size, l) = if low_power {
        (rng.random_range(2.0..4.0), life(rng, 15.0, 35.0))
    } else {
        (rng.random_range(3.0..7.0), life(rng, 20.0, 50.0))
    };
    pool.spawn(Particle {
        pos: origin + Vec2::new(rng.random_range(0.0..span), 0.0),
        vel: Vec2::new(rng.random_range(-0.5..0.5), -rng.random_range(2.0..5.0)),
        size,
        life: l,
        max_life: l,
        color: FIRE_RED,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;

    fn particle(life: f32) -> Particle {
        Particle {
            pos: Vec2::ZERO,
            vel: Vec2::new(1.0, 0.0),
            size: 2.0,
            life,
            max_life: life,
            color: BEAM_BLUE,
        }
    }

    #[test]
    fn test_pool_respects_cap() {
        let mut pool = ParticlePool::new(3);
        for _ in 0..5 {
            pool.spawn(particle(10.0));
        }
        assert_eq!(pool.len(), 3);
        assert!(pool.is_full());
    }

    #[test]
    fn test_gravity_pulls_down() {
        let mut pool = ParticlePool::with_gravity(4, 0.1);
        pool.spawn(Particle {
            vel: Vec2::new(0.0, -2.0),
            ..particle(10.0)
        });
        pool.tick();
        let p = pool.iter().next().expect("particle alive");
        assert!((p.vel.y + 1.9).abs() < 1e-6);
    }

    #[test]
    fn test_emitters_fill_pools() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut pools = Pools::new(64, 30);
        emit_thrust(&mut pools.thrusters, &mut rng, Vec2::new(10.0, 10.0), 1.0, 6);
        emit_flames(&mut pools.flames, &mut rng, Vec2::new(40.0, 72.0), 4);
        emit_fire(&mut pools.fire, &mut rng, Vec2::new(60.0, 96.0), 80.0, false);
        assert_eq!(pools.thrusters.len(), 6);
        assert_eq!(pools.flames.len(), 4);
        assert_eq!(pools.fire.len(), 1);
        pools.clear();
        assert!(pools.thrusters.is_empty() && pools.fire.is_empty());
    }

    proptest! {
        #[test]
        fn prop_life_decays_by_fixed_step(start in 1.0f32..60.0) {
            let mut pool = ParticlePool::new(1);
            pool.spawn(particle(start));
            let mut expected = start;
            let mut ticks = 0;
            while !pool.is_empty() {
                pool.tick();
                expected -= LIFE_STEP;
                ticks += 1;
                if let Some(p) = pool.iter().next() {
                    prop_assert!(p.life > 0.0);
                    prop_assert!((p.life - expected).abs() < 1e-3);
                } else {
                    prop_assert!(expected <= 1e-3);
                }
            }
            prop_assert_eq!(ticks, start.ceil() as i32);
        }
    }
}
