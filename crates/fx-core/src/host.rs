//! The platform side of an effect: frames, timers, event subscriptions and
//! measurement. The web crate implements this over the DOM; tests use a
//! manual implementation.

use glam::Vec2;
use std::time::Duration;

/// External lifecycle signals an effect can subscribe to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Signal {
    Resize,
    PointerMove,
    PageVisibility,
    Intersection,
}

/// Logical size of the surface's box plus the device pixel ratio.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
    pub device_pixel_ratio: f64,
}

impl Viewport {
    pub fn new(width: f32, height: f32, device_pixel_ratio: f64) -> Self {
        Self {
            width,
            height,
            device_pixel_ratio,
        }
    }
}

pub trait Host {
    type Frame: Copy + Eq + std::fmt::Debug;
    type Timer: Copy + Eq + std::fmt::Debug;

    fn request_frame(&mut self) -> Self::Frame;
    fn cancel_frame(&mut self, frame: Self::Frame);

    fn set_timeout(&mut self, delay: Duration) -> Self::Timer;
    fn clear_timeout(&mut self, timer: Self::Timer);

    fn subscribe(&mut self, signal: Signal);
    fn unsubscribe(&mut self, signal: Signal);

    /// Current size of the box the effect covers.
    fn measure(&self) -> Viewport;

    /// Whether the page is showing right now; read once at mount, later
    /// changes arrive as `PageVisibility` signals.
    fn page_visible(&self) -> bool;

    /// Top-left of the surface in the coordinate space pointer positions are
    /// reported in. Read every frame, so scrolling under a still pointer is
    /// picked up.
    fn surface_origin(&self) -> Vec2;
}
