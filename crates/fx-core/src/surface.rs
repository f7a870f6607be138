//! Drawing surface boundary and logical/backing size bookkeeping.

use crate::host::Viewport;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineCap {
    Butt,
    Round,
}

impl LineCap {
    pub fn as_str(self) -> &'static str {
        match self {
            LineCap::Butt => "butt",
            LineCap::Round => "round",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Composite {
    SourceOver,
    Lighter,
}

impl Composite {
    pub fn as_str(self) -> &'static str {
        match self {
            Composite::SourceOver => "source-over",
            Composite::Lighter => "lighter",
        }
    }
}

/// The subset of a 2D context the effects draw with. Coordinates are logical
/// pixels once `set_scale` has been applied.
pub trait Surface {
    /// Resize the backing store; also the place to size the element's box.
    fn resize(&mut self, state: &SurfaceState);
    /// Replace the current transform with a uniform scale.
    fn set_scale(&mut self, ratio: f64);

    fn clear(&mut self, width: f64, height: f64);
    fn set_fill_style(&mut self, style: &str);
    fn set_stroke_style(&mut self, style: &str);
    fn set_line_width(&mut self, width: f64);
    fn set_line_cap(&mut self, cap: LineCap);
    fn set_global_alpha(&mut self, alpha: f64);
    fn set_composite(&mut self, op: Composite);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64);
    fn stroke(&mut self);
    fn fill(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64);
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurfaceState {
    pub width: f32,
    pub height: f32,
    pub ratio: f64,
    pub backing_width: u32,
    pub backing_height: u32,
}

impl SurfaceState {
    /// Ratio is the device ratio clamped to `ratio_cap`; a non-positive or
    /// non-finite device ratio counts as 1.
    pub fn compute(viewport: Viewport, ratio_cap: f64) -> Self {
        let width = viewport.width.max(0.0);
        let height = viewport.height.max(0.0);
        let device = if viewport.device_pixel_ratio.is_finite() && viewport.device_pixel_ratio > 0.0 {
            viewport.device_pixel_ratio
        } else {
            1.0
        };
        let ratio = device.min(ratio_cap);
        Self {
            width,
            height,
            ratio,
            backing_width: (width as f64 * ratio).floor() as u32,
            backing_height: (height as f64 * ratio).floor() as u32,
        }
    }
}

/// Size the backing store and establish the logical-pixel transform.
///
/// The transform is set fresh each call, so repeated configures never stack.
pub fn configure<S: Surface>(surface: &mut S, viewport: Viewport, ratio_cap: f64) -> SurfaceState {
    let state = SurfaceState::compute(viewport, ratio_cap);
    surface.resize(&state);
    surface.set_scale(state.ratio);
    log::debug!(
        "[surface] {}x{} css -> {}x{} px (ratio {:.2})",
        state.width,
        state.height,
        state.backing_width,
        state.backing_height,
        state.ratio
    );
    state
}
