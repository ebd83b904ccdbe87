// The live particle population and its per-frame update rule

use crate::config::FieldConfig;
use crate::host::Pointer;
use crate::particle::Particle;
use rand::Rng;
use vecmath::Vector2;

#[derive(Clone, Debug, PartialEq)]
pub struct Field {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
}

// A pair of particles close enough to be joined by a line
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Connection {
    pub from: Vector2<f64>,
    pub to: Vector2<f64>,
    pub opacity: f64,
}

impl Field {
    // min(max_particles, floor(area / area_per_particle)), empty for degenerate surfaces
    pub fn particle_count(width: f64, height: f64, config: &FieldConfig) -> usize {
        if !(width > 0.0 && height > 0.0) {
            return 0;
        }
        let count = (width * height / config.area_per_particle).floor() as usize;
        count.min(config.max_particles)
    }

    pub fn initialize<R: Rng + ?Sized>(
        width: f64,
        height: f64,
        config: &FieldConfig,
        rng: &mut R,
    ) -> Field {
        let num_particles = Field::particle_count(width, height, config);
        let mut particles = Vec::with_capacity(num_particles);
        for _ in 0..num_particles {
            particles.push(Particle::random(rng, width, height, config));
        }
        Field {
            width,
            height,
            particles,
        }
    }

    pub fn from_particles(width: f64, height: f64, particles: Vec<Particle>) -> Field {
        Field {
            width,
            height,
            particles,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn advance(&mut self, pointer: Pointer, config: &FieldConfig) {
        let pointer_pos = pointer.as_vector();
        for particle in &mut self.particles {
            particle.pos = vecmath::vec2_add(particle.pos, particle.vel);

            // Pointer repulsion nudges position only, stored velocity is untouched
            let away = vecmath::vec2_sub(particle.pos, pointer_pos);
            let distance = vecmath::vec2_len(away);
            if distance > 0.0 && distance < config.repulsion_radius {
                let force = (config.repulsion_radius - distance) / config.repulsion_radius;
                let nudge = vecmath::vec2_scale(
                    vecmath::vec2_normalized(away),
                    force * config.repulsion_strength,
                );
                particle.pos = vecmath::vec2_add(particle.pos, nudge);
            }

            if particle.pos[0] < 0.0 || particle.pos[0] > self.width {
                particle.vel[0] *= -1.0;
            }
            if particle.pos[1] < 0.0 || particle.pos[1] > self.height {
                particle.vel[1] *= -1.0;
            }

            particle.pos[0] = particle.pos[0].max(0.0).min(self.width);
            particle.pos[1] = particle.pos[1].max(0.0).min(self.height);
        }
    }

    // Exhaustive pairwise scan, fine for the population sizes we allow
    pub fn connections<'a>(
        &'a self,
        config: &'a FieldConfig,
    ) -> impl Iterator<Item = Connection> + 'a {
        let max_distance = config.connection_distance;
        let max_opacity = config.connection_opacity;
        self.particles.iter().enumerate().flat_map(move |(i, a)| {
            self.particles[i + 1..].iter().filter_map(move |b| {
                let distance = vecmath::vec2_len(vecmath::vec2_sub(a.pos, b.pos));
                if distance < max_distance {
                    Some(Connection {
                        from: a.pos,
                        to: b.pos,
                        opacity: (1.0 - distance / max_distance) * max_opacity,
                    })
                } else {
                    None
                }
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const EPS: f64 = 1e-9;

    fn still(x: f64, y: f64) -> Particle {
        Particle::new([x, y], [0.0, 0.0], 2.0, 0.5, Color::VIOLET)
    }

    fn moving(pos: Vector2<f64>, vel: Vector2<f64>) -> Particle {
        Particle::new(pos, vel, 2.0, 0.5, Color::BLUE)
    }

    fn far_pointer() -> Pointer {
        Pointer::new(-10_000.0, -10_000.0)
    }

    fn seeded(width: f64, height: f64) -> Field {
        let mut rng = StdRng::seed_from_u64(1);
        Field::initialize(width, height, &FieldConfig::default(), &mut rng)
    }

    // Large enough that the walls stay out of the way
    fn open_field(particles: Vec<Particle>) -> Field {
        Field::from_particles(500.0, 500.0, particles)
    }

    #[test]
    fn count_scales_with_area() {
        assert_eq!(seeded(300.0, 300.0).len(), 6);
        assert_eq!(seeded(1920.0, 1080.0).len(), 100);
        assert_eq!(seeded(800.0, 600.0).len(), 32);
    }

    #[test]
    fn count_is_capped() {
        assert_eq!(seeded(2000.0, 2000.0).len(), 100);
    }

    #[test]
    fn degenerate_surfaces_are_empty() {
        let config = FieldConfig::default();
        assert!(seeded(0.0, 1080.0).is_empty());
        assert!(seeded(1920.0, 0.0).is_empty());
        assert!(seeded(100.0, 100.0).is_empty());
        assert_eq!(Field::particle_count(-5.0, 100.0, &config), 0);
    }

    #[test]
    fn seeding_is_deterministic_for_a_seed() {
        let config = FieldConfig::default();
        let a = Field::initialize(800.0, 600.0, &config, &mut StdRng::seed_from_u64(9));
        let b = Field::initialize(800.0, 600.0, &config, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }

    #[test]
    fn euler_step_moves_by_velocity() {
        let config = FieldConfig::default();
        let p = moving([10.0, 20.0], [0.2, -0.1]);
        let mut field = Field::from_particles(100.0, 100.0, vec![p]);
        field.advance(far_pointer(), &config);
        let moved = field.particles()[0];
        assert!((moved.pos[0] - 10.2).abs() < EPS);
        assert!((moved.pos[1] - 19.9).abs() < EPS);
        assert_eq!(moved.vel, [0.2, -0.1]);
    }

    #[test]
    fn crossing_right_edge_flips_stored_velocity() {
        let config = FieldConfig::default();
        let p = moving([99.9, 50.0], [0.25, 0.0]);
        let mut field = Field::from_particles(100.0, 100.0, vec![p]);
        field.advance(far_pointer(), &config);
        let moved = field.particles()[0];
        assert_eq!(moved.vel[0], -0.25);
        assert_eq!(moved.pos[0], 100.0);
    }

    #[test]
    fn crossing_top_edge_flips_only_vertical_velocity() {
        let config = FieldConfig::default();
        let p = moving([50.0, 0.1], [0.1, -0.25]);
        let mut field = Field::from_particles(100.0, 100.0, vec![p]);
        field.advance(far_pointer(), &config);
        let moved = field.particles()[0];
        assert_eq!(moved.vel, [0.1, 0.25]);
        assert_eq!(moved.pos[1], 0.0);
    }

    #[test]
    fn repulsion_at_half_radius_pushes_a_quarter_unit() {
        let config = FieldConfig::default();
        let mut field = open_field(vec![still(250.0, 250.0), still(200.0, 290.0)]);
        field.advance(Pointer::new(200.0, 250.0), &config);

        // directly to the right of the pointer
        let right = field.particles()[0];
        assert!((right.pos[0] - 250.25).abs() < EPS);
        assert!((right.pos[1] - 250.0).abs() < EPS);

        // 40 units below: force 0.6, nudge 0.3 straight down
        let below = field.particles()[1];
        assert!((below.pos[0] - 200.0).abs() < EPS);
        assert!((below.pos[1] - 290.3).abs() < EPS);
    }

    #[test]
    fn repulsion_follows_the_diagonal() {
        let config = FieldConfig::default();
        // 30-40-50 triangle from the pointer
        let mut field = open_field(vec![still(130.0, 140.0)]);
        field.advance(Pointer::new(100.0, 100.0), &config);
        let p = field.particles()[0];
        assert!((p.pos[0] - (130.0 + 0.25 * 0.6)).abs() < EPS);
        assert!((p.pos[1] - (140.0 + 0.25 * 0.8)).abs() < EPS);
        assert_eq!(p.vel, [0.0, 0.0]);
    }

    #[test]
    fn no_repulsion_at_or_beyond_radius() {
        let config = FieldConfig::default();
        let mut field = open_field(vec![still(300.0, 200.0), still(200.0, 350.0)]);
        field.advance(Pointer::new(200.0, 200.0), &config);
        assert_eq!(field.particles()[0].pos, [300.0, 200.0]);
        assert_eq!(field.particles()[1].pos, [200.0, 350.0]);
    }

    #[test]
    fn particle_on_the_pointer_is_left_alone() {
        let config = FieldConfig::default();
        let mut field = open_field(vec![still(42.0, 24.0)]);
        field.advance(Pointer::new(42.0, 24.0), &config);
        let p = field.particles()[0];
        assert!(!p.pos[0].is_nan() && !p.pos[1].is_nan());
        assert_eq!(p.pos, [42.0, 24.0]);
    }

    #[test]
    fn repulsion_push_over_an_edge_triggers_reflection() {
        let config = FieldConfig::default();
        // The Euler step alone lands at x = 0.2, inside the field. The
        // pointer 10 units to the right pushes it 0.45 further left.
        let p = moving([0.1, 50.0], [0.1, 0.0]);
        let mut field = Field::from_particles(100.0, 100.0, vec![p]);
        field.advance(Pointer::new(10.2, 50.0), &config);
        let moved = field.particles()[0];
        assert_eq!(moved.vel[0], -0.1);
        assert_eq!(moved.pos[0], 0.0);
        assert_eq!(moved.vel[1], 0.0);
    }

    #[test]
    fn positions_stay_in_bounds_over_many_frames() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(77);
        let mut field = Field::initialize(400.0, 300.0, &config, &mut rng);
        let pointers = [
            Pointer::new(0.0, 0.0),
            Pointer::new(200.0, 150.0),
            Pointer::new(399.0, 1.0),
            Pointer::new(-50.0, 500.0),
        ];
        for frame in 0..5_000 {
            field.advance(pointers[frame % pointers.len()], &config);
            for p in field.particles() {
                assert!((0.0..=400.0).contains(&p.pos[0]), "{:?}", p);
                assert!((0.0..=300.0).contains(&p.pos[1]), "{:?}", p);
            }
        }
    }

    #[test]
    fn edge_opacity_fades_with_distance() {
        let config = FieldConfig::default();
        let field = open_field(vec![still(100.0, 100.0), still(150.0, 100.0)]);
        let edges: Vec<Connection> = field.connections(&config).collect();
        assert_eq!(edges.len(), 1);
        assert!((edges[0].opacity - 0.1).abs() < EPS);
        assert_eq!(edges[0].from, [100.0, 100.0]);
        assert_eq!(edges[0].to, [150.0, 100.0]);
    }

    #[test]
    fn no_edge_at_or_beyond_threshold() {
        let config = FieldConfig::default();
        let field = open_field(vec![still(0.0, 0.0), still(100.0, 0.0), still(0.0, 300.0)]);
        assert_eq!(field.connections(&config).count(), 0);
    }

    #[test]
    fn every_close_pair_is_connected_once() {
        let config = FieldConfig::default();
        let field = open_field(vec![
            still(10.0, 10.0),
            still(20.0, 10.0),
            still(10.0, 20.0),
            still(400.0, 400.0),
        ]);
        assert_eq!(field.connections(&config).count(), 3);
    }
}
