// Mount/unmount lifecycle and the frame loop. Callbacks handed to the host
// hold only a Weak and check the cancellation token before touching state.

use crate::config::FieldConfig;
use crate::error::Error;
use crate::host::{Host, Pointer, Viewport};
use crate::renderer::Surface;
use crate::simulation::SimulationContext;
use rand::RngCore;
use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

#[derive(Clone, Debug, Default)]
pub struct CancellationToken(Rc<Cell<bool>>);

impl CancellationToken {
    pub fn new() -> Self {
        CancellationToken::default()
    }

    pub fn cancel(&self) {
        self.0.set(true);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.get()
    }
}

struct Scene<S> {
    context: SimulationContext,
    surface: S,
    viewport: Viewport,
}

struct Shared<H: Host, S> {
    host: H,
    token: CancellationToken,
    scene: RefCell<Scene<S>>,
    pending: RefCell<Option<H::FrameHandle>>,
}

pub struct Background<H: Host + 'static, S: Surface + 'static> {
    shared: Rc<Shared<H, S>>,
    subscriptions: Vec<H::Subscription>,
}

impl<H: Host + 'static, S: Surface + 'static> Background<H, S> {
    pub fn mount(
        host: H,
        mut surface: S,
        config: FieldConfig,
        rng: Box<dyn RngCore>,
    ) -> Result<Self, Error> {
        let viewport = host.viewport();
        surface.resize(viewport);
        let context = SimulationContext::new(config, rng, viewport);

        let shared = Rc::new(Shared {
            host,
            token: CancellationToken::new(),
            scene: RefCell::new(Scene {
                context,
                surface,
                viewport,
            }),
            pending: RefCell::new(None),
        });

        // Built before subscribing so a failed registration below still
        // unwinds the earlier ones through Drop
        let mut background = Background {
            shared,
            subscriptions: Vec::with_capacity(2),
        };

        let weak = Rc::downgrade(&background.shared);
        let on_resize = Box::new(move |viewport: Viewport| {
            if let Some(shared) = live(&weak) {
                let mut scene = shared.scene.borrow_mut();
                scene.surface.resize(viewport);
                scene.context.resize(viewport);
                scene.viewport = viewport;
            }
        });
        let subscription = background.shared.host.subscribe_resize(on_resize)?;
        background.subscriptions.push(subscription);

        let weak = Rc::downgrade(&background.shared);
        let on_pointer = Box::new(move |pointer: Pointer| {
            if let Some(shared) = live(&weak) {
                shared.scene.borrow_mut().context.set_pointer(pointer);
            }
        });
        let subscription = background.shared.host.subscribe_pointer(on_pointer)?;
        background.subscriptions.push(subscription);

        schedule(&background.shared)?;
        Ok(background)
    }

    // Cancels the pending frame and removes both listeners, safe to call twice
    pub fn unmount(&mut self) {
        self.shared.token.cancel();
        let pending = self.shared.pending.borrow_mut().take();
        if let Some(handle) = pending {
            self.shared.host.cancel_frame(handle);
        }
        for subscription in self.subscriptions.drain(..) {
            self.shared.host.unsubscribe(subscription);
        }
    }

    pub fn is_mounted(&self) -> bool {
        !self.shared.token.is_cancelled()
    }

    pub fn token(&self) -> CancellationToken {
        self.shared.token.clone()
    }

    pub fn particle_count(&self) -> usize {
        self.shared.scene.borrow().context.field().len()
    }

    pub fn pointer(&self) -> Pointer {
        self.shared.scene.borrow().context.pointer()
    }

    pub fn viewport(&self) -> Viewport {
        self.shared.scene.borrow().viewport
    }
}

impl<H: Host + 'static, S: Surface + 'static> Drop for Background<H, S> {
    fn drop(&mut self) {
        self.unmount();
    }
}

fn live<H: Host, S>(weak: &Weak<Shared<H, S>>) -> Option<Rc<Shared<H, S>>> {
    weak.upgrade().filter(|s| !s.token.is_cancelled())
}

fn schedule<H: Host + 'static, S: Surface + 'static>(
    shared: &Rc<Shared<H, S>>,
) -> Result<(), Error> {
    if shared.token.is_cancelled() {
        return Ok(());
    }
    let weak = Rc::downgrade(shared);
    let tick = Box::new(move || {
        if let Some(shared) = live(&weak) {
            run_frame(&shared);
        }
    });
    let handle = shared.host.request_frame(tick)?;
    *shared.pending.borrow_mut() = Some(handle);
    Ok(())
}

fn run_frame<H: Host + 'static, S: Surface + 'static>(shared: &Rc<Shared<H, S>>) {
    {
        let mut scene = shared.scene.borrow_mut();
        let Scene {
            context, surface, ..
        } = &mut *scene;
        if let Err(e) = context.step(surface) {
            shared.host.report(&e);
        }
    }
    // The token is checked again inside schedule in case the frame
    // itself led to an unmount
    if let Err(e) = schedule(shared) {
        shared.host.report(&e);
    }
}
