// Drawing of a field onto any 2d surface. The browser uses a canvas backed
// surface, tests record the calls.

use crate::color::Color;
use crate::config::FieldConfig;
use crate::error::Error;
use crate::field::Field;
use crate::host::Viewport;
use vecmath::Vector2;

pub trait Surface {
    fn resize(&mut self, viewport: Viewport);

    // Nothing from the previous frame survives
    fn clear(&mut self) -> Result<(), Error>;

    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        color: Color,
        opacity: f64,
        width: f64,
    ) -> Result<(), Error>;

    // Filled disc with a blurred halo of the same color
    fn fill_disc(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        color: Color,
        opacity: f64,
        glow_blur: f64,
    ) -> Result<(), Error>;
}

// Edges first so particles are drawn on top of them
pub fn draw<S: Surface + ?Sized>(
    surface: &mut S,
    field: &Field,
    config: &FieldConfig,
) -> Result<(), Error> {
    surface.clear()?;
    let edge_color = config.edge_color();
    for connection in field.connections(config) {
        surface.stroke_line(
            connection.from,
            connection.to,
            edge_color,
            connection.opacity,
            config.line_width,
        )?;
    }
    for p in field.particles() {
        surface.fill_disc(p.pos, p.radius, p.color, p.opacity, config.glow_blur)?;
    }
    Ok(())
}
