//! `Surface` over a `CanvasRenderingContext2d`.

use crate::dom;
use fx_core::{Composite, FxError, FxResult, LineCap, Surface, SurfaceState};
use std::f64::consts::TAU;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

pub struct CanvasSurface {
    canvas: web::HtmlCanvasElement,
    ctx: web::CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Grab the 2D context. Opaque effects ask for `alpha: false`.
    pub fn acquire(canvas: &web::HtmlCanvasElement, opaque: bool) -> FxResult<Self> {
        let options = js_sys::Object::new();
        let _ = js_sys::Reflect::set(&options, &JsValue::from_str("alpha"), &JsValue::from_bool(!opaque));
        let ctx = canvas
            .get_context_with_context_options("2d", &options)
            .map_err(|e| FxError::SurfaceUnavailable(format!("{:?}", e)))?
            .ok_or_else(|| FxError::SurfaceUnavailable("no 2d context".into()))?
            .dyn_into::<web::CanvasRenderingContext2d>()
            .map_err(|_| FxError::SurfaceUnavailable("not a 2d context".into()))?;
        Ok(Self {
            canvas: canvas.clone(),
            ctx,
        })
    }
}

impl Surface for CanvasSurface {
    fn resize(&mut self, state: &SurfaceState) {
        self.canvas.set_width(state.backing_width);
        self.canvas.set_height(state.backing_height);
        dom::set_css_size(&self.canvas, state.width, state.height);
    }

    fn set_scale(&mut self, ratio: f64) {
        let _ = self.ctx.set_transform(ratio, 0.0, 0.0, ratio, 0.0, 0.0);
    }

    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn set_fill_style(&mut self, style: &str) {
        self.ctx.set_fill_style_str(style);
    }

    fn set_stroke_style(&mut self, style: &str) {
        self.ctx.set_stroke_style_str(style);
    }

    fn set_line_width(&mut self, width: f64) {
        self.ctx.set_line_width(width);
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.ctx.set_line_cap(cap.as_str());
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.ctx.set_global_alpha(alpha);
    }

    fn set_composite(&mut self, op: Composite) {
        let _ = self.ctx.set_global_composite_operation(op.as_str());
    }

    fn begin_path(&mut self) {
        self.ctx.begin_path();
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ctx.move_to(x, y);
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ctx.line_to(x, y);
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64) {
        let _ = self.ctx.arc(x, y, radius, 0.0, TAU);
    }

    fn stroke(&mut self) {
        self.ctx.stroke();
    }

    fn fill(&mut self) {
        self.ctx.fill();
    }

    fn fill_rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.ctx.fill_rect(x, y, width, height);
    }
}
