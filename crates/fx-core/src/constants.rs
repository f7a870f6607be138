//! Tuning constants for the four background effects.
//!
//! Values are in logical (CSS) pixels per frame unless noted otherwise.

// Viewport classes
pub const MOBILE_MAX_WIDTH: f32 = 768.0; // widths below this are "mobile"

// Pointer sentinel: far outside any surface so nothing reacts before the first move
pub const POINTER_SENTINEL: f32 = -1000.0;

// ---------------- Ambient field ----------------
pub const FIELD_COUNT_MOBILE: usize = 15;
pub const FIELD_COUNT_DESKTOP: usize = 40;
pub const FIELD_LINK_DIST_MOBILE: f32 = 60.0;
pub const FIELD_LINK_DIST_DESKTOP: f32 = 110.0;
pub const FIELD_RATIO_CAP_MOBILE: f64 = 1.0;
pub const FIELD_RATIO_CAP_DESKTOP: f64 = 1.5;
pub const FIELD_RESIZE_QUIET_MS: u64 = 200;
pub const FIELD_SPEED_SPAN: f32 = 0.3; // velocity component in (-0.15, 0.15)
pub const FIELD_LINK_WIDTH: f64 = 0.5;
pub const FIELD_LINK_ALPHA_SCALE: f32 = 0.2;

// Connections at or below this opacity are imperceptible and skipped
pub const LINK_MIN_OPACITY: f32 = 0.1;

// ---------------- Rising sparks ----------------
pub const RISING_COUNT_MOBILE: usize = 20;
pub const RISING_COUNT_DESKTOP: usize = 50;
pub const RISING_RATIO_CAP: f64 = 1.2;
pub const RISING_RESIZE_QUIET_MS: u64 = 200;
pub const RISING_SPEED_MIN: f32 = 0.1;
pub const RISING_SPEED_SPAN: f32 = 0.5;
pub const RISING_ALPHA_MIN: f32 = 0.1;
pub const RISING_ALPHA_SPAN: f32 = 0.5;
pub const RISING_ALPHA_BOOST: f32 = 0.4;
pub const RISING_RECYCLE_MARGIN: f32 = 10.0; // off-screen distance before/after recycle
pub const RISING_REPEL_STRENGTH: f32 = 2.0;

// Pointer interaction radius shared by the rising and grid effects
pub const INTERACTION_RADIUS: f32 = 150.0;

// Particle size range shared by field and rising effects
pub const PARTICLE_SIZE_MIN: f32 = 0.5;
pub const PARTICLE_SIZE_SPAN: f32 = 2.0;

// ---------------- Reactive grid ----------------
pub const GRID_CELL: f32 = 40.0;
pub const GRID_WINDOW_RANGE: f32 = 160.0; // slightly larger than the interaction radius
pub const GRID_RATIO_CAP: f64 = 1.0;
pub const GRID_RESIZE_QUIET_MS: u64 = 200;
pub const GRID_MAX_ALPHA: f32 = 0.5;
pub const GRID_MIN_ALPHA: f32 = 0.01;
pub const GRID_INTENSE_FRACTION: f32 = 2.0 / 3.0; // of the interaction radius
pub const GRID_ARM: f64 = 10.0; // half-length of each cross stroke
pub const GRID_DOT: f64 = 2.0;

// ---------------- Nebula ----------------
pub const NEBULA_LAYERS: usize = 2;
pub const NEBULA_RATIO_CAP: f64 = 1.0;
pub const NEBULA_RESIZE_QUIET_MS: u64 = 500;
pub const NEBULA_TIME_STEP: f64 = 0.001; // per frame
pub const NEBULA_AMPLITUDE: f32 = 60.0; // multiplied by the 1-based layer index
pub const NEBULA_WAVELENGTH: f32 = 400.0;
pub const NEBULA_SAMPLE_STEP: f32 = 100.0;
pub const NEBULA_STROKE_WIDTH: f64 = 80.0;
pub const NEBULA_BACKGROUND: &str = "#050200";

// ---------------- Notifications / countdown ----------------
pub const TOAST_LIFETIME_MS: u64 = 5000;
pub const TOAST_EXIT_START_MS: u64 = 4600;
pub const TOAST_EXIT_MS: u64 = 400;
pub const TOAST_ID_LEN: usize = 9;
pub const COUNTDOWN_TICK_MS: u64 = 1000;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[allow(clippy::assertions_on_constants)]
    fn counts_shrink_on_mobile() {
        assert!(FIELD_COUNT_MOBILE < FIELD_COUNT_DESKTOP);
        assert!(RISING_COUNT_MOBILE < RISING_COUNT_DESKTOP);
        assert!(FIELD_LINK_DIST_MOBILE < FIELD_LINK_DIST_DESKTOP);
    }

    #[test]
    #[allow(clippy::assertions_on_constants)]
    fn grid_window_covers_interaction_radius() {
        assert!(GRID_WINDOW_RANGE >= INTERACTION_RADIUS);
        assert!(GRID_INTENSE_FRACTION > 0.0 && GRID_INTENSE_FRACTION < 1.0);
    }

    #[test]
    #[allow(clippy::assertions_on_constants)]
    fn toast_exit_finishes_at_lifetime() {
        assert_eq!(TOAST_EXIT_START_MS + TOAST_EXIT_MS, TOAST_LIFETIME_MS);
    }
}
