// Owned simulation state for one mounted background: the field, the last
// pointer position and the random source used for reseeding.

use crate::config::FieldConfig;
use crate::error::Error;
use crate::field::Field;
use crate::host::{Pointer, Viewport};
use crate::renderer::{self, Surface};
use rand::RngCore;

pub struct SimulationContext {
    config: FieldConfig,
    rng: Box<dyn RngCore>,
    field: Field,
    pointer: Pointer,
}

impl SimulationContext {
    pub fn new(config: FieldConfig, mut rng: Box<dyn RngCore>, viewport: Viewport) -> Self {
        let field = seed(&config, rng.as_mut(), viewport);
        SimulationContext {
            config,
            rng,
            field,
            pointer: Pointer::default(),
        }
    }

    // Throws away the old population and draws a fresh one
    pub fn resize(&mut self, viewport: Viewport) {
        self.field = seed(&self.config, self.rng.as_mut(), viewport);
    }

    pub fn set_pointer(&mut self, pointer: Pointer) {
        self.pointer = pointer;
    }

    pub fn pointer(&self) -> Pointer {
        self.pointer
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    // One frame: advance every particle, then redraw the surface
    pub fn step<S: Surface + ?Sized>(&mut self, surface: &mut S) -> Result<(), Error> {
        self.field.advance(self.pointer, &self.config);
        renderer::draw(surface, &self.field, &self.config)
    }
}

fn seed(config: &FieldConfig, rng: &mut dyn RngCore, viewport: Viewport) -> Field {
    Field::initialize(viewport.width as f64, viewport.height as f64, config, rng)
}
