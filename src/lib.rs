#[macro_use]
pub mod utils;

pub mod background;
pub mod browser;
pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod field;
pub mod host;
pub mod particle;
pub mod renderer;
pub mod simulation;

use wasm_bindgen::prelude::*;

pub use background::{Background, CancellationToken};
pub use browser::{BrowserHost, ParticleBackground};
pub use canvas::CanvasSurface;
pub use color::Color;
pub use config::FieldConfig;
pub use error::Error;
pub use field::{Connection, Field};
pub use host::{Host, Pointer, Viewport};
pub use particle::Particle;
pub use renderer::Surface;
pub use simulation::SimulationContext;

// When the `wee_alloc` feature is enabled, use `wee_alloc` as the global
// allocator.
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen]
pub fn initialize() {
    utils::set_panic_hook();
}
