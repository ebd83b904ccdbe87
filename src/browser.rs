// Host implementation over the browser window, and the JavaScript facing
// handle that mounts the background

use crate::background::Background;
use crate::canvas::CanvasSurface;
use crate::config::FieldConfig;
use crate::error::Error;
use crate::host::{Host, Pointer, Viewport};
use crate::utils;
use js_sys::Function;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, Event, HtmlCanvasElement, MouseEvent, Window};

pub struct BrowserHost {
    window: Window,
    // Pointer positions are reported relative to this element's top-left
    origin: Option<Element>,
}

// A requestAnimationFrame registration, the closure must outlive the request
pub struct AnimationFrame {
    id: i32,
    _closure: Closure<dyn FnMut()>,
}

pub struct Listener {
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl BrowserHost {
    pub fn new() -> Result<Self, Error> {
        let window = web_sys::window().ok_or(Error::NoWindow)?;
        Ok(BrowserHost {
            window,
            origin: None,
        })
    }

    pub fn for_canvas(canvas: &HtmlCanvasElement) -> Result<Self, Error> {
        let mut host = BrowserHost::new()?;
        host.origin = Some(Element::from(canvas.clone()));
        Ok(host)
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    pub fn pointer_from(&self, event: &MouseEvent) -> Pointer {
        local_pointer(event, self.origin.as_ref())
    }

    fn listen(
        &self,
        event: &'static str,
        closure: Closure<dyn FnMut(Event)>,
    ) -> Result<Listener, Error> {
        let callback = closure.as_ref().unchecked_ref::<Function>();
        self.window
            .add_event_listener_with_callback(event, callback)?;
        Ok(Listener { event, closure })
    }
}

fn dimension(value: Result<JsValue, JsValue>) -> u32 {
    value.ok().and_then(|v| v.as_f64()).unwrap_or(0.0).max(0.0) as u32
}

fn viewport_of(window: &Window) -> Viewport {
    Viewport::new(
        dimension(window.inner_width()),
        dimension(window.inner_height()),
    )
}

fn local_pointer(event: &MouseEvent, origin: Option<&Element>) -> Pointer {
    let client = Pointer::new(event.client_x() as f64, event.client_y() as f64);
    match origin {
        Some(element) => {
            let rect = element.get_bounding_client_rect();
            client.relative_to(rect.left(), rect.top())
        }
        None => client,
    }
}

impl Host for BrowserHost {
    type FrameHandle = AnimationFrame;
    type Subscription = Listener;

    fn viewport(&self) -> Viewport {
        viewport_of(&self.window)
    }

    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Result<AnimationFrame, Error> {
        let closure = Closure::once(move || {
            #[cfg(feature = "timing")]
            let _timer = utils::Timer::new("ParticleBackground::frame");
            callback();
        });
        let id = self
            .window
            .request_animation_frame(closure.as_ref().unchecked_ref::<Function>())?;
        Ok(AnimationFrame {
            id,
            _closure: closure,
        })
    }

    fn cancel_frame(&self, handle: AnimationFrame) {
        if let Err(e) = self.window.cancel_animation_frame(handle.id) {
            self.report(&Error::from(e));
        }
    }

    fn subscribe_resize(&self, mut handler: Box<dyn FnMut(Viewport)>) -> Result<Listener, Error> {
        let window = self.window.clone();
        let closure = Closure::wrap(Box::new(move |_event: Event| {
            let Viewport { width, height } = viewport_of(&window);
            log!("particle background resized to {}x{}", width, height);
            handler(Viewport::new(width, height));
        }) as Box<dyn FnMut(Event)>);
        self.listen("resize", closure)
    }

    fn subscribe_pointer(&self, mut handler: Box<dyn FnMut(Pointer)>) -> Result<Listener, Error> {
        let origin = self.origin.clone();
        let closure = Closure::wrap(Box::new(move |event: Event| {
            // pointermove delivers a PointerEvent, which extends MouseEvent
            let event: MouseEvent = event.unchecked_into();
            handler(local_pointer(&event, origin.as_ref()));
        }) as Box<dyn FnMut(Event)>);
        self.listen("pointermove", closure)
    }

    fn unsubscribe(&self, listener: Listener) {
        let callback = listener.closure.as_ref().unchecked_ref::<Function>();
        let removed = self
            .window
            .remove_event_listener_with_callback(listener.event, callback);
        if let Err(e) = removed {
            self.report(&Error::from(e));
        }
    }

    fn report(&self, error: &Error) {
        utils::log_error(&format!("particle background: {}", error));
    }
}

fn rng_for(seed: Option<u32>) -> Box<dyn RngCore> {
    match seed {
        Some(seed) => Box::new(StdRng::seed_from_u64(seed as u64)),
        None => Box::new(StdRng::from_entropy()),
    }
}

#[wasm_bindgen]
pub struct ParticleBackground {
    background: Option<Background<BrowserHost, CanvasSurface>>,
    // Set when we created the canvas ourselves and must take it out again
    owned_canvas: Option<HtmlCanvasElement>,
}

#[wasm_bindgen]
impl ParticleBackground {
    /// Mounts on an existing canvas, sized to the viewport. Pointer positions
    /// are taken relative to the canvas's top-left corner.
    pub fn mount(
        canvas: HtmlCanvasElement,
        seed: Option<u32>,
    ) -> Result<ParticleBackground, JsValue> {
        utils::set_panic_hook();
        let host = BrowserHost::for_canvas(&canvas)?;
        let surface = CanvasSurface::new(canvas)?;
        let config = FieldConfig::default();
        let background = Background::mount(host, surface, config, rng_for(seed))?;
        let count = background.particle_count();
        log!("particle background mounted with {} particles", count);
        Ok(ParticleBackground {
            background: Some(background),
            owned_canvas: None,
        })
    }

    /// Creates a fixed, input-transparent canvas behind the page content and mounts on it.
    #[wasm_bindgen(js_name = mountFullscreen)]
    pub fn mount_fullscreen(seed: Option<u32>) -> Result<ParticleBackground, JsValue> {
        utils::set_panic_hook();
        let host = BrowserHost::new()?;
        let document = host.window().document().ok_or(Error::NoDocument)?;
        let surface = CanvasSurface::create_fullscreen(&document)?;
        let canvas = surface.canvas().clone();
        let config = FieldConfig::default();
        let background = match Background::mount(host, surface, config, rng_for(seed)) {
            Ok(background) => background,
            Err(e) => {
                canvas.remove();
                return Err(e.into());
            }
        };
        let count = background.particle_count();
        log!("particle background mounted with {} particles", count);
        Ok(ParticleBackground {
            background: Some(background),
            owned_canvas: Some(canvas),
        })
    }

    pub fn unmount(&mut self) {
        if let Some(mut background) = self.background.take() {
            background.unmount();
        }
        if let Some(canvas) = self.owned_canvas.take() {
            canvas.remove();
        }
    }

    #[wasm_bindgen(js_name = isMounted)]
    pub fn is_mounted(&self) -> bool {
        self.background.as_ref().map_or(false, |b| b.is_mounted())
    }

    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.background.as_ref().map_or(0, |b| b.particle_count())
    }
}

impl Drop for ParticleBackground {
    fn drop(&mut self) {
        self.unmount();
    }
}
