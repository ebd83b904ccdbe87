// Simple particle struct to keep track of individual position, velocity, size, opacity and color

use crate::color::Color;
use crate::config::FieldConfig;
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub radius: f64,
    pub opacity: f64,
    pub color: Color,
}

impl Particle {
    pub fn new(
        pos: Vector2<f64>,
        vel: Vector2<f64>,
        radius: f64,
        opacity: f64,
        color: Color,
    ) -> Particle {
        Particle {
            pos,
            vel,
            radius,
            opacity,
            color,
        }
    }

    // Uniformly placed inside a width x height surface, with the remaining
    // attributes drawn from the ranges in `config`
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        width: f64,
        height: f64,
        config: &FieldConfig,
    ) -> Particle {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed;
        let vel_y = (rng.gen::<f64>() - 0.5) * 2.0 * config.max_speed;
        let radius = in_range(rng, config.min_radius, config.max_radius);
        let opacity = in_range(rng, config.min_opacity, config.max_opacity);
        let color = if rng.gen::<f64>() > 0.5 {
            config.palette[0]
        } else {
            config.palette[1]
        };
        Particle::new([pos_x, pos_y], [vel_x, vel_y], radius, opacity, color)
    }
}

fn in_range<R: Rng + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    rng.gen::<f64>() * (max - min) + min
}
