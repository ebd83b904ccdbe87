// Tunables for seeding, motion and drawing of the particle field

use crate::color::Color;

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    pub max_particles: usize,
    // square pixels per particle
    pub area_per_particle: f64,
    pub max_speed: f64,
    pub min_radius: f64,
    pub max_radius: f64,
    pub min_opacity: f64,
    pub max_opacity: f64,
    // palette[0] doubles as the edge color
    pub palette: [Color; 2],
    pub connection_distance: f64,
    pub connection_opacity: f64,
    pub line_width: f64,
    pub repulsion_radius: f64,
    pub repulsion_strength: f64,
    pub glow_blur: f64,
}

impl FieldConfig {
    pub fn edge_color(&self) -> Color {
        self.palette[0]
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            max_particles: 100,
            area_per_particle: 15_000.0,
            max_speed: 0.25,
            min_radius: 1.0,
            max_radius: 4.0,
            min_opacity: 0.2,
            max_opacity: 0.7,
            palette: [Color::VIOLET, Color::BLUE],
            connection_distance: 100.0,
            connection_opacity: 0.2,
            line_width: 1.0,
            repulsion_radius: 100.0,
            repulsion_strength: 0.5,
            glow_blur: 10.0,
        }
    }
}
