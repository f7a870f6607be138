// Test doubles shared by the integration tests: a surface that records every
// call and a host whose frames and timers only fire when a test says so.
#![allow(dead_code)]

use fx_core::{Composite, Effect, FrameOutcome, Host, LineCap, Signal, Surface, SurfaceState, Viewport};
use glam::Vec2;
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub enum Op {
    Resize(u32, u32),
    Scale(f64),
    Clear(f64, f64),
    FillStyle(String),
    StrokeStyle(String),
    LineWidth(f64),
    LineCap(LineCap),
    GlobalAlpha(f64),
    Composite(Composite),
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    Arc(f64, f64, f64),
    Stroke,
    Fill,
    FillRect(f64, f64, f64, f64),
}

#[derive(Default, Debug)]
pub struct RecordingSurface {
    pub ops: Vec<Op>,
}

impl RecordingSurface {
    pub fn count(&self, pred: impl Fn(&Op) -> bool) -> usize {
        self.ops.iter().filter(|op| pred(op)).count()
    }

    pub fn clears(&self) -> usize {
        self.count(|op| matches!(op, Op::Clear(..)))
    }

    /// Calls that put pixels on the surface.
    pub fn paints(&self) -> usize {
        self.count(|op| matches!(op, Op::Stroke | Op::Fill | Op::FillRect(..)))
    }

    pub fn scales(&self) -> Vec<f64> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                Op::Scale(s) => Some(*s),
                _ => None,
            })
            .collect()
    }
}

impl Surface for RecordingSurface {
    fn resize(&mut self, state: &SurfaceState) {
        self.ops.push(Op::Resize(state.backing_width, state.backing_height));
    }
    fn set_scale(&mut self, ratio: f64) {
        self.ops.push(Op::Scale(ratio));
    }
    fn clear(&mut self, width: f64, height: f64) {
        self.ops.push(Op::Clear(width, height));
    }
    fn set_fill_style(&mut self, style: &str) {
        self.ops.push(Op::FillStyle(style.to_string()));
    }
    fn set_stroke_style(&mut self, style: &str) {
        self.ops.push(Op::StrokeStyle(style.to_string()));
    }
    fn set_line_width(&mut self, width: f64) {
        self.ops.push(Op::LineWidth(width));
    }
    fn set_line_cap(&mut self, cap: LineCap) {
        self.ops.push(Op::LineCap(cap));
    }
    fn set_global_alpha(&mut self, alpha: f64) {
        self.ops.push(Op::GlobalAlpha(alpha));
    }
    fn set_composite(&mut self, op: Composite) {
        self.ops.push(Op::Composite(op));
    }
    fn begin_path(&mut self) {
        self.ops.push(Op::BeginPath);
    }
    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::MoveTo(x, y));
    }
    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(Op::LineTo(x, y));
    }
    fn arc(&mut self, x: f64, y: f64, radius: f64) {
        self.ops.push(Op::Arc(x, y, radius));
    }
    fn stroke(&mut self) {
        self.ops.push(Op::Stroke);
    }
    fn fill(&mut self) {
        self.ops.push(Op::Fill);
    }
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ops.push(Op::FillRect(x, y, width, height));
    }
}

pub struct ManualHost {
    next_id: u32,
    pub frames: Vec<u32>,
    pub timers: Vec<(u32, Duration)>,
    pub subscribed: Vec<Signal>,
    pub viewport: Viewport,
    pub cancelled_frames: usize,
    pub cleared_timers: usize,
    pub page_visible: bool,
    pub origin: Vec2,
}

impl ManualHost {
    pub fn new(width: f32, height: f32, dpr: f64) -> Self {
        Self {
            next_id: 1,
            frames: Vec::new(),
            timers: Vec::new(),
            subscribed: Vec::new(),
            viewport: Viewport::new(width, height, dpr),
            cancelled_frames: 0,
            cleared_timers: 0,
            page_visible: true,
            origin: Vec2::ZERO,
        }
    }

    fn id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    /// Run the oldest pending frame callback, if any.
    pub fn fire_frame<S: Surface, R: rand::Rng>(
        &mut self,
        effect: &mut Effect<S, R, ManualHost>,
    ) -> Option<FrameOutcome> {
        if self.frames.is_empty() {
            return None;
        }
        self.frames.remove(0);
        Some(effect.on_frame(self))
    }

    /// Run the oldest pending timer (always the resize settle timer).
    pub fn fire_timer<S: Surface, R: rand::Rng>(&mut self, effect: &mut Effect<S, R, ManualHost>) -> bool {
        if self.timers.is_empty() {
            return false;
        }
        self.timers.remove(0);
        effect.on_resize_settled(self);
        true
    }
}

impl Host for ManualHost {
    type Frame = u32;
    type Timer = u32;

    fn request_frame(&mut self) -> u32 {
        let id = self.id();
        self.frames.push(id);
        id
    }

    fn cancel_frame(&mut self, frame: u32) {
        self.frames.retain(|f| *f != frame);
        self.cancelled_frames += 1;
    }

    fn set_timeout(&mut self, delay: Duration) -> u32 {
        let id = self.id();
        self.timers.push((id, delay));
        id
    }

    fn clear_timeout(&mut self, timer: u32) {
        self.timers.retain(|(t, _)| *t != timer);
        self.cleared_timers += 1;
    }

    fn subscribe(&mut self, signal: Signal) {
        self.subscribed.push(signal);
    }

    fn unsubscribe(&mut self, signal: Signal) {
        self.subscribed.retain(|s| *s != signal);
    }

    fn measure(&self) -> Viewport {
        self.viewport
    }

    fn page_visible(&self) -> bool {
        self.page_visible
    }

    fn surface_origin(&self) -> Vec2 {
        self.origin
    }
}
