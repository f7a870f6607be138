//! Proximity queries: pairwise links for the ambient field and the windowed
//! grid query around the pointer.
//!
//! Both reject on a per-axis comparison before squaring anything.

use crate::constants::*;
use crate::particles::Particle;
use glam::Vec2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Link {
    pub a: usize,
    pub b: usize,
    pub opacity: f32,
}

/// Opacity of the link between two points `d` apart, or `None` if no link
/// should be drawn. Never takes a square root.
#[inline]
pub fn link_opacity(d: Vec2, threshold: f32) -> Option<f32> {
    if d.x > threshold || d.x < -threshold {
        return None;
    }
    if d.y > threshold || d.y < -threshold {
        return None;
    }
    let dist_sq = d.x * d.x + d.y * d.y;
    let threshold_sq = threshold * threshold;
    if dist_sq >= threshold_sq {
        return None;
    }
    let opacity = 1.0 - dist_sq / threshold_sq;
    (opacity > LINK_MIN_OPACITY).then_some(opacity)
}

/// Every unordered pair closer than `threshold`. Quadratic, which is fine
/// for the few dozen particles the field carries.
pub fn pairwise_links(particles: &[Particle], threshold: f32, out: &mut Vec<Link>) {
    out.clear();
    for (i, a) in particles.iter().enumerate() {
        for (j, b) in particles.iter().enumerate().skip(i + 1) {
            if let Some(opacity) = link_opacity(a.pos - b.pos, threshold) {
                out.push(Link { a: i, b: j, opacity });
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridMark {
    pub x: f32,
    pub y: f32,
    pub alpha: f32,
    pub intense: bool,
}

/// Grid-aligned rectangle around the pointer, clipped to the surface.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridWindow {
    pub x0: f32,
    pub x1: f32,
    pub y0: f32,
    pub y1: f32,
}

impl GridWindow {
    pub fn around(pointer: Vec2, bounds: Vec2) -> Self {
        let snap_down = |v: f32| ((v - GRID_WINDOW_RANGE) / GRID_CELL).floor() * GRID_CELL;
        let snap_up = |v: f32| ((v + GRID_WINDOW_RANGE) / GRID_CELL).ceil() * GRID_CELL;
        Self {
            x0: snap_down(pointer.x).max(0.0),
            x1: snap_up(pointer.x).min(bounds.x),
            y0: snap_down(pointer.y).max(0.0),
            y1: snap_up(pointer.y).min(bounds.y),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.x0 > self.x1 || self.y0 > self.y1
    }

    /// Grid intersections inside the window, column by column.
    pub fn points(self) -> impl Iterator<Item = Vec2> {
        let cols = axis_steps(self.x0, self.x1);
        let rows = axis_steps(self.y0, self.y1);
        (0..cols).flat_map(move |i| {
            let x = self.x0 + i as f32 * GRID_CELL;
            (0..rows).map(move |j| Vec2::new(x, self.y0 + j as f32 * GRID_CELL))
        })
    }
}

fn axis_steps(start: f32, end: f32) -> usize {
    if end < start {
        0
    } else {
        ((end - start) / GRID_CELL).floor() as usize + 1
    }
}

/// Mark for a single grid point, or `None` outside the interaction radius.
#[inline]
pub fn grid_mark(point: Vec2, pointer: Vec2) -> Option<GridMark> {
    let d = point - pointer;
    if d.x.abs() > INTERACTION_RADIUS || d.y.abs() > INTERACTION_RADIUS {
        return None;
    }
    let dist_sq = d.length_squared();
    if dist_sq > INTERACTION_RADIUS * INTERACTION_RADIUS {
        return None;
    }
    let dist = dist_sq.sqrt();
    let alpha = GRID_MAX_ALPHA * (1.0 - dist / INTERACTION_RADIUS);
    if alpha <= GRID_MIN_ALPHA {
        return None;
    }
    Some(GridMark {
        x: point.x,
        y: point.y,
        alpha,
        intense: dist < INTERACTION_RADIUS * GRID_INTENSE_FRACTION,
    })
}

/// Evaluate only the window around the pointer. Returns how many grid
/// points were visited.
pub fn grid_marks(pointer: Vec2, bounds: Vec2, out: &mut Vec<GridMark>) -> usize {
    out.clear();
    let window = GridWindow::around(pointer, bounds);
    if window.is_empty() {
        return 0;
    }
    let mut visited = 0;
    for point in window.points() {
        visited += 1;
        if let Some(mark) = grid_mark(point, pointer) {
            out.push(mark);
        }
    }
    visited
}
