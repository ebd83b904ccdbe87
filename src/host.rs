// What the simulation needs from the page hosting it: viewport geometry,
// pointer coordinates, resize notifications and a per-frame scheduling
// primitive that can be cancelled.

use crate::error::Error;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(width: u32, height: u32) -> Self {
        Viewport { width, height }
    }
}

// Last known pointer location in surface coordinates
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

impl Pointer {
    pub fn new(x: f64, y: f64) -> Self {
        Pointer { x, y }
    }

    // Shifts client coordinates so (left, top) becomes the origin
    pub fn relative_to(&self, left: f64, top: f64) -> Self {
        Pointer::new(self.x - left, self.y - top)
    }

    pub fn as_vector(&self) -> Vector2<f64> {
        [self.x, self.y]
    }
}

pub trait Host {
    // Both handles keep their callback alive until cancelled or unsubscribed
    type FrameHandle;
    type Subscription;

    fn viewport(&self) -> Viewport;

    // Fires once, on the next display refresh
    fn request_frame(&self, callback: Box<dyn FnOnce()>) -> Result<Self::FrameHandle, Error>;

    fn cancel_frame(&self, handle: Self::FrameHandle);

    fn subscribe_resize(
        &self,
        handler: Box<dyn FnMut(Viewport)>,
    ) -> Result<Self::Subscription, Error>;

    fn subscribe_pointer(
        &self,
        handler: Box<dyn FnMut(Pointer)>,
    ) -> Result<Self::Subscription, Error>;

    fn unsubscribe(&self, subscription: Self::Subscription);

    // Errors raised inside a frame have no caller to return to
    fn report(&self, error: &Error);
}
