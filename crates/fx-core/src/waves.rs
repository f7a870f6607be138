//! Continuous sine layers for the nebula backdrop.

use crate::constants::*;
use std::f64::consts::TAU;

#[derive(Clone, Debug, PartialEq)]
pub struct WaveLayer {
    pub amplitude: f32,
    pub frequency: f32,
    pub speed: f32,
    pub style: &'static str,
}

impl WaveLayer {
    #[inline]
    pub fn y_at(&self, x: f32, time: f32, center: f32) -> f32 {
        center + (x * self.frequency + time * self.speed).sin() * self.amplitude
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct WaveField {
    /// Shared phase clock, kept in `[0, TAU)`. Layer speeds are whole
    /// numbers, so wrapping never shifts any layer's phase.
    pub time: f64,
    pub layers: Vec<WaveLayer>,
}

impl WaveField {
    /// Layer `i` (1-based) gets amplitude and phase speed proportional to `i`.
    pub fn new(styles: &'static [&'static str]) -> Self {
        let layers = (1..=NEBULA_LAYERS)
            .map(|i| WaveLayer {
                amplitude: NEBULA_AMPLITUDE * i as f32,
                frequency: 1.0 / NEBULA_WAVELENGTH,
                speed: i as f32,
                style: styles.get(i - 1).copied().unwrap_or("rgba(212, 175, 55, 0.05)"),
            })
            .collect();
        Self { time: 0.0, layers }
    }

    #[inline]
    pub fn advance(&mut self) {
        self.time = (self.time + NEBULA_TIME_STEP) % TAU;
    }

    /// Polyline vertices for one layer, sampled every `NEBULA_SAMPLE_STEP`
    /// from 0 up to one step past the right edge.
    pub fn samples<'a>(
        &'a self,
        layer: &'a WaveLayer,
        width: f32,
        height: f32,
    ) -> impl Iterator<Item = (f32, f32)> + 'a {
        let center = height / 2.0;
        let count = ((width + NEBULA_SAMPLE_STEP) / NEBULA_SAMPLE_STEP).floor().max(0.0) as usize + 1;
        let time = self.time as f32;
        (0..count).map(move |k| {
            let x = k as f32 * NEBULA_SAMPLE_STEP;
            (x, layer.y_at(x, time, center))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layers_scale_with_index() {
        let f = WaveField::new(&["a", "b"]);
        assert_eq!(f.layers.len(), 2);
        assert_eq!(f.layers[0].amplitude, 60.0);
        assert_eq!(f.layers[1].amplitude, 120.0);
        assert_eq!(f.layers[1].speed, 2.0);
        assert_eq!(f.layers[1].style, "b");
    }

    #[test]
    fn time_advances_once_per_step() {
        let mut f = WaveField::new(&["a", "b"]);
        for _ in 0..10 {
            f.advance();
        }
        assert!((f.time - 0.01).abs() < 1e-9);
    }

    #[test]
    fn clock_wraps_at_full_turn() {
        let mut f = WaveField::new(&["a", "b"]);
        f.time = TAU - 0.0004;
        f.advance();
        assert!((f.time - 0.0006).abs() < 1e-9, "time={}", f.time);
    }

    #[test]
    fn step_holds_after_hours_of_frames() {
        let mut f = WaveField::new(&["a", "b"]);
        // ~16.7 h at 60 fps
        let frames = 3_600_000u64;
        for _ in 0..frames {
            f.advance();
        }
        let expected = (frames as f64 * NEBULA_TIME_STEP) % TAU;
        assert!((f.time - expected).abs() < 1e-6, "time={} expected={}", f.time, expected);

        let before = f.time;
        f.advance();
        let step = (f.time - before).rem_euclid(TAU);
        assert!((step - NEBULA_TIME_STEP).abs() < 1e-9, "step={}", step);
    }

    #[test]
    fn large_start_settles_into_exact_steps() {
        let mut f = WaveField::new(&["a", "b"]);
        f.time = 40_000.0;
        f.advance();
        assert!(f.time < TAU);
        for _ in 0..1000 {
            let before = f.time;
            f.advance();
            let step = (f.time - before).rem_euclid(TAU);
            assert!((step - NEBULA_TIME_STEP).abs() < 1e-9, "step={}", step);
        }
    }

    #[test]
    fn wrapped_clock_draws_the_same_wave() {
        let f = WaveField::new(&["a", "b"]);
        for layer in &f.layers {
            let a = layer.y_at(150.0, 0.25, 100.0);
            let b = layer.y_at(150.0, 0.25 + std::f32::consts::TAU, 100.0);
            assert!((a - b).abs() < 1e-2, "a={} b={}", a, b);
        }
    }

    #[test]
    fn samples_cover_one_step_past_width() {
        let f = WaveField::new(&["a", "b"]);
        let pts: Vec<_> = f.samples(&f.layers[0], 250.0, 100.0).collect();
        let xs: Vec<f32> = pts.iter().map(|p| p.0).collect();
        assert_eq!(xs, vec![0.0, 100.0, 200.0, 300.0]);
        // sin(0) at the origin sits on the center line
        assert_eq!(pts[0].1, 50.0);
        for (_, y) in pts {
            assert!((y - 50.0).abs() <= 60.0 + 1e-4);
        }
    }
}
