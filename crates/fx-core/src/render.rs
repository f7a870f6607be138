//! Paint policies. Each painted frame is a full clear followed by a fixed
//! order: background (opaque modes), entities, then connections or marks.

use crate::config::Palette;
use crate::constants::*;
use crate::particles::Particle;
use crate::proximity::{GridMark, Link};
use crate::surface::{Composite, LineCap, Surface, SurfaceState};
use crate::waves::WaveField;
use std::fmt::Write;

pub struct Renderer {
    palette: Palette,
    // reused for every `rgba(..., alpha)` so the paint loop does not allocate
    style: String,
}

impl Renderer {
    pub fn new(palette: Palette) -> Self {
        Self {
            palette,
            style: String::with_capacity(32),
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    fn rgba(&mut self, prefix: &str, alpha: f32) -> &str {
        self.style.clear();
        let _ = write!(self.style, "{}{:.4})", prefix, alpha);
        &self.style
    }

    pub fn clear<S: Surface>(&mut self, surface: &mut S, state: &SurfaceState) {
        surface.clear(state.width as f64, state.height as f64);
    }

    pub fn paint_field<S: Surface>(&mut self, surface: &mut S, particles: &[Particle], links: &[Link]) {
        for p in particles {
            surface.set_fill_style(p.color);
            let s = p.size as f64;
            surface.fill_rect(p.pos.x as f64, p.pos.y as f64, s, s);
        }
        surface.set_line_width(FIELD_LINK_WIDTH);
        let prefix = self.palette.stroke_prefix;
        let scale = self.palette.stroke_alpha_scale;
        for link in links {
            let (a, b) = (&particles[link.a], &particles[link.b]);
            surface.set_stroke_style(self.rgba(prefix, link.opacity * scale));
            surface.begin_path();
            surface.move_to(a.pos.x as f64, a.pos.y as f64);
            surface.line_to(b.pos.x as f64, b.pos.y as f64);
            surface.stroke();
        }
    }

    pub fn paint_rising<S: Surface>(&mut self, surface: &mut S, particles: &[Particle]) {
        for p in particles {
            surface.set_global_alpha(p.alpha as f64);
            surface.set_fill_style(p.color);
            surface.begin_path();
            surface.arc(p.pos.x as f64, p.pos.y as f64, p.size as f64);
            surface.fill();
        }
        surface.set_global_alpha(1.0);
    }

    pub fn paint_grid<S: Surface>(&mut self, surface: &mut S, marks: &[GridMark]) {
        if marks.is_empty() {
            return;
        }
        surface.set_line_width(1.0);
        let stroke_prefix = self.palette.stroke_prefix;
        let fill_prefix = self.palette.fill_prefix;
        let scale = self.palette.stroke_alpha_scale;
        for m in marks {
            let (x, y) = (m.x as f64, m.y as f64);
            surface.set_stroke_style(self.rgba(stroke_prefix, m.alpha * scale));
            surface.begin_path();
            surface.move_to(x - GRID_ARM, y);
            surface.line_to(x + GRID_ARM, y);
            surface.stroke();
            surface.begin_path();
            surface.move_to(x, y - GRID_ARM);
            surface.line_to(x, y + GRID_ARM);
            surface.stroke();
            if m.intense {
                surface.set_fill_style(self.rgba(fill_prefix, m.alpha * 2.0));
                let half = GRID_DOT / 2.0;
                surface.fill_rect(x - half, y - half, GRID_DOT, GRID_DOT);
            }
        }
    }

    /// Opaque background, then additive wave bands. Composition is put back
    /// to `source-over` before returning; the next frame's background fill
    /// depends on it.
    pub fn paint_nebula<S: Surface>(&mut self, surface: &mut S, waves: &WaveField, state: &SurfaceState) {
        surface.set_fill_style(NEBULA_BACKGROUND);
        surface.fill_rect(0.0, 0.0, state.width as f64, state.height as f64);

        surface.set_composite(Composite::Lighter);
        for layer in &waves.layers {
            surface.begin_path();
            for (k, (x, y)) in waves.samples(layer, state.width, state.height).enumerate() {
                if k == 0 {
                    surface.move_to(x as f64, y as f64);
                } else {
                    surface.line_to(x as f64, y as f64);
                }
            }
            surface.set_stroke_style(layer.style);
            surface.set_line_width(NEBULA_STROKE_WIDTH);
            surface.set_line_cap(LineCap::Round);
            surface.stroke();
        }
        surface.set_composite(Composite::SourceOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Mode, Theme};

    #[test]
    fn rgba_reuses_prefix() {
        let mut r = Renderer::new(Palette::resolve(Mode::Field, Theme::Dark));
        assert_eq!(r.rgba("rgba(1, 2, 3, ", 0.5), "rgba(1, 2, 3, 0.5000)");
        assert_eq!(r.rgba("rgba(1, 2, 3, ", 0.125), "rgba(1, 2, 3, 0.1250)");
    }
}
