//! Discrete particles for the field and rising effects.
//!
//! All randomness is drawn when a particle is created or recycled; `advance`
//! itself is deterministic given the pointer.

use crate::constants::*;
use glam::Vec2;
use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Boundary {
    /// Bounce off the edges (ambient field).
    Reflect,
    /// Leave through the top, re-enter below the bottom at a new x (rising).
    Wrap,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: f32,
    pub color: &'static str,
    pub alpha: f32,
    pub base_alpha: f32,
}

impl Particle {
    pub fn spawn<R: Rng>(
        boundary: Boundary,
        bounds: Vec2,
        colors: &[&'static str],
        rng: &mut R,
    ) -> Self {
        let pos = Vec2::new(rng.gen::<f32>() * bounds.x, rng.gen::<f32>() * bounds.y);
        let size = rng.gen::<f32>() * PARTICLE_SIZE_SPAN + PARTICLE_SIZE_MIN;
        let color = pick(colors, rng);
        match boundary {
            Boundary::Reflect => {
                let vel = Vec2::new(
                    (rng.gen::<f32>() - 0.5) * FIELD_SPEED_SPAN,
                    (rng.gen::<f32>() - 0.5) * FIELD_SPEED_SPAN,
                );
                Self {
                    pos,
                    vel,
                    size,
                    color,
                    alpha: 1.0,
                    base_alpha: 1.0,
                }
            }
            Boundary::Wrap => {
                let speed = rng.gen::<f32>() * RISING_SPEED_SPAN + RISING_SPEED_MIN;
                let base_alpha = rng.gen::<f32>() * RISING_ALPHA_SPAN + RISING_ALPHA_MIN;
                Self {
                    pos,
                    vel: Vec2::new(0.0, -speed),
                    size,
                    color,
                    alpha: base_alpha,
                    base_alpha,
                }
            }
        }
    }

    /// Push away from the pointer when within the interaction radius and
    /// raise alpha while there. Returns whether the particle was in range.
    ///
    /// Box rejection first, then squared distance; the square root is only
    /// taken for particles that survive both.
    pub fn repel(&mut self, pointer: Vec2) -> bool {
        let d = self.pos - pointer;
        if d.x.abs() >= INTERACTION_RADIUS || d.y.abs() >= INTERACTION_RADIUS {
            self.alpha = self.base_alpha;
            return false;
        }
        let dist_sq = d.length_squared();
        if dist_sq >= INTERACTION_RADIUS * INTERACTION_RADIUS {
            self.alpha = self.base_alpha;
            return false;
        }
        let dist = dist_sq.sqrt();
        if dist > 0.0 {
            let force = (INTERACTION_RADIUS - dist) / INTERACTION_RADIUS;
            self.pos += d / dist * force * RISING_REPEL_STRENGTH;
        }
        self.alpha = (self.base_alpha + RISING_ALPHA_BOOST).min(1.0);
        true
    }
}

impl Boundary {
    pub fn apply<R: Rng>(self, p: &mut Particle, bounds: Vec2, rng: &mut R) {
        match self {
            Boundary::Reflect => {
                reflect_axis(&mut p.pos.x, &mut p.vel.x, bounds.x);
                reflect_axis(&mut p.pos.y, &mut p.vel.y, bounds.y);
            }
            Boundary::Wrap => {
                if p.pos.y < -RISING_RECYCLE_MARGIN {
                    p.pos.y = bounds.y + RISING_RECYCLE_MARGIN;
                    p.pos.x = rng.gen::<f32>() * bounds.x;
                }
                if p.pos.x > bounds.x {
                    p.pos.x = 0.0;
                }
                if p.pos.x < 0.0 {
                    p.pos.x = bounds.x;
                }
            }
        }
    }
}

// Mirror back inside and point the velocity inward.
fn reflect_axis(pos: &mut f32, vel: &mut f32, max: f32) {
    let max = max.max(0.0);
    if *pos < 0.0 {
        *pos = -*pos;
        *vel = vel.abs();
    } else if *pos > max {
        *pos = 2.0 * max - *pos;
        *vel = -vel.abs();
    }
    *pos = pos.clamp(0.0, max);
}

fn pick<R: Rng>(colors: &[&'static str], rng: &mut R) -> &'static str {
    if colors.is_empty() {
        return "#ffffff";
    }
    colors[rng.gen_range(0..colors.len())]
}

/// The particle set of one effect instance.
#[derive(Clone, Debug)]
pub struct ParticleStore {
    pub boundary: Boundary,
    pub particles: Vec<Particle>,
    colors: &'static [&'static str],
}

impl ParticleStore {
    pub fn new(boundary: Boundary, colors: &'static [&'static str]) -> Self {
        Self {
            boundary,
            particles: Vec::new(),
            colors,
        }
    }

    /// Replace the whole set; never resized incrementally.
    pub fn populate<R: Rng>(&mut self, count: usize, bounds: Vec2, rng: &mut R) {
        self.particles.clear();
        self.particles.reserve(count);
        for _ in 0..count {
            self.particles
                .push(Particle::spawn(self.boundary, bounds, self.colors, rng));
        }
    }

    /// One simulation step for every particle. `pointer` is only consulted
    /// by the rising (wrap) particles.
    pub fn advance<R: Rng>(&mut self, bounds: Vec2, pointer: Option<Vec2>, rng: &mut R) {
        for p in &mut self.particles {
            p.pos += p.vel;
            if self.boundary == Boundary::Wrap {
                match pointer {
                    Some(ptr) => {
                        p.repel(ptr);
                    }
                    None => p.alpha = p.base_alpha,
                }
            }
            self.boundary.apply(p, bounds, rng);
        }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn spark(pos: Vec2, base_alpha: f32) -> Particle {
        Particle {
            pos,
            vel: Vec2::new(0.0, -0.3),
            size: 1.0,
            color: "#FFD700",
            alpha: base_alpha,
            base_alpha,
        }
    }

    #[test]
    fn field_spawn_respects_ranges() {
        let mut rng = StdRng::seed_from_u64(1);
        let bounds = Vec2::new(800.0, 600.0);
        for _ in 0..200 {
            let p = Particle::spawn(Boundary::Reflect, bounds, &["#a", "#b"], &mut rng);
            assert!(p.pos.x >= 0.0 && p.pos.x < 800.0);
            assert!(p.pos.y >= 0.0 && p.pos.y < 600.0);
            assert!(p.vel.x.abs() <= 0.15 && p.vel.y.abs() <= 0.15);
            assert!(p.size >= 0.5 && p.size < 2.5);
            assert!(p.color == "#a" || p.color == "#b");
        }
    }

    #[test]
    fn rising_spawn_moves_upward() {
        let mut rng = StdRng::seed_from_u64(2);
        for _ in 0..200 {
            let p = Particle::spawn(Boundary::Wrap, Vec2::new(100.0, 100.0), &["#x"], &mut rng);
            assert!(p.vel.y <= -0.1 && p.vel.y > -0.6);
            assert_eq!(p.vel.x, 0.0);
            assert!(p.base_alpha >= 0.1 && p.base_alpha < 0.6);
            assert_eq!(p.alpha, p.base_alpha);
        }
    }

    #[test]
    fn reflect_turns_velocity_inward() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut p = Particle::spawn(Boundary::Reflect, Vec2::new(10.0, 10.0), &["#a"], &mut rng);
        p.pos = Vec2::new(-0.1, 10.2);
        p.vel = Vec2::new(-0.1, 0.1);
        Boundary::Reflect.apply(&mut p, Vec2::new(10.0, 10.0), &mut rng);
        assert!((p.pos.x - 0.1).abs() < 1e-6);
        assert!((p.pos.y - 9.8).abs() < 1e-5);
        assert!(p.vel.x > 0.0);
        assert!(p.vel.y < 0.0);
    }

    #[test]
    fn wrap_moves_horizontal_overflow_to_opposite_edge() {
        let mut rng = StdRng::seed_from_u64(4);
        let bounds = Vec2::new(50.0, 50.0);
        let mut p = spark(Vec2::new(50.5, 20.0), 0.3);
        Boundary::Wrap.apply(&mut p, bounds, &mut rng);
        assert_eq!(p.pos.x, 0.0);
        p.pos.x = -0.5;
        Boundary::Wrap.apply(&mut p, bounds, &mut rng);
        assert_eq!(p.pos.x, 50.0);
    }

    #[test]
    fn repel_pushes_away_from_pointer() {
        let mut p = spark(Vec2::new(110.0, 100.0), 0.2);
        assert!(p.repel(Vec2::new(100.0, 100.0)));
        assert!(p.pos.x > 110.0);
        assert_eq!(p.pos.y, 100.0);
        assert!((p.alpha - 0.6).abs() < 1e-6);
    }

    #[test]
    fn repel_on_top_of_pointer_only_brightens() {
        let mut p = spark(Vec2::new(5.0, 5.0), 0.7);
        assert!(p.repel(Vec2::new(5.0, 5.0)));
        assert_eq!(p.pos, Vec2::new(5.0, 5.0));
        assert_eq!(p.alpha, 1.0);
    }

    #[test]
    fn repel_corner_of_box_is_outside_circle() {
        // inside the bounding box but outside the radius
        let mut p = spark(Vec2::new(120.0, 120.0), 0.25);
        p.alpha = 0.9;
        assert!(!p.repel(Vec2::ZERO));
        assert_eq!(p.pos, Vec2::new(120.0, 120.0));
        assert_eq!(p.alpha, 0.25);
    }

    #[test]
    fn populate_replaces_previous_set() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut store = ParticleStore::new(Boundary::Reflect, &["#a"]);
        store.populate(40, Vec2::new(1024.0, 768.0), &mut rng);
        assert_eq!(store.len(), 40);
        store.populate(15, Vec2::new(400.0, 700.0), &mut rng);
        assert_eq!(store.len(), 15);
        assert!(store.particles.iter().all(|p| p.pos.x < 400.0));
    }
}
