// Surface implementation over a 2d canvas context

use crate::color::Color;
use crate::error::Error;
use crate::host::Viewport;
use crate::renderer::Surface;
use std::f64::consts::PI;
use vecmath::Vector2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

// Full viewport, behind the page content, never intercepts clicks
const FULLSCREEN_STYLE: &str =
    "position: fixed; inset: 0; pointer-events: none; z-index: 0; background: transparent;";

pub struct CanvasSurface {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, Error> {
        let context = canvas
            .get_context("2d")?
            .ok_or(Error::ContextUnavailable)?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| Error::ContextUnavailable)?;
        Ok(CanvasSurface { canvas, context })
    }

    // Creates the background canvas and puts it first in <body> so that
    // everything else stacks above it
    pub fn create_fullscreen(document: &Document) -> Result<Self, Error> {
        let body = document.body().ok_or(Error::NoDocument)?;
        let canvas = document
            .create_element("canvas")?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| Error::ContextUnavailable)?;
        canvas.set_attribute("style", FULLSCREEN_STYLE)?;
        canvas.set_attribute("aria-hidden", "true")?;
        body.prepend_with_node_1(&canvas)?;
        CanvasSurface::new(canvas)
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, viewport: Viewport) {
        self.canvas.set_width(viewport.width);
        self.canvas.set_height(viewport.height);
    }

    fn clear(&mut self) -> Result<(), Error> {
        self.context.clear_rect(
            0.0,
            0.0,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
        );
        Ok(())
    }

    fn stroke_line(
        &mut self,
        from: Vector2<f64>,
        to: Vector2<f64>,
        color: Color,
        opacity: f64,
        width: f64,
    ) -> Result<(), Error> {
        let ctx = &self.context;
        ctx.save();
        ctx.set_global_alpha(opacity);
        ctx.set_stroke_style_str(&color.to_css_hex());
        ctx.set_line_width(width);
        ctx.begin_path();
        ctx.move_to(from[0], from[1]);
        ctx.line_to(to[0], to[1]);
        ctx.stroke();
        ctx.restore();
        Ok(())
    }

    fn fill_disc(
        &mut self,
        center: Vector2<f64>,
        radius: f64,
        color: Color,
        opacity: f64,
        glow_blur: f64,
    ) -> Result<(), Error> {
        let ctx = &self.context;
        let css = color.to_css_hex();
        ctx.save();
        ctx.set_global_alpha(opacity);
        ctx.set_fill_style_str(&css);
        ctx.begin_path();
        let arc = ctx.arc(center[0], center[1], radius, 0.0, 2.0 * PI);
        if arc.is_ok() {
            ctx.fill();
            // Second pass with a shadow gives the glow
            ctx.set_shadow_color(&css);
            ctx.set_shadow_blur(glow_blur);
            ctx.fill();
        }
        // restore even when arc threw, otherwise alpha leaks into the next draw
        ctx.restore();
        arc.map_err(Error::from)
    }
}
