//! Per-mode configuration: one engine, four parameter sets.
//!
//! Everything here is resolved once at mount. The theme in particular is not
//! re-read mid-session; a theme change means a remount.

use crate::constants::*;
use crate::error::FxError;
use crate::host::Signal;
use crate::particles::Boundary;
use smallvec::{smallvec, SmallVec};
use std::str::FromStr;
use std::time::Duration;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Full-window drifting points joined by proximity links.
    Field,
    /// Sparks rising through a section, repelled by the pointer.
    Rising,
    /// Grid crosses lit up around the pointer.
    Grid,
    /// Opaque backdrop of additive sine bands.
    Nebula,
}

impl Mode {
    pub const ALL: [Mode; 4] = [Mode::Field, Mode::Rising, Mode::Grid, Mode::Nebula];

    pub fn name(self) -> &'static str {
        match self {
            Mode::Field => "field",
            Mode::Rising => "rising",
            Mode::Grid => "grid",
            Mode::Nebula => "nebula",
        }
    }
}

impl FromStr for Mode {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "field" | "ambient" => Ok(Mode::Field),
            "rising" | "gold" | "sparks" => Ok(Mode::Rising),
            "grid" => Ok(Mode::Grid),
            "nebula" => Ok(Mode::Nebula),
            other => Err(FxError::UnknownMode(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl FromStr for Theme {
    type Err = FxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" | "" => Ok(Theme::Dark),
            other => Err(FxError::UnknownTheme(other.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SizeClass {
    Mobile,
    Desktop,
}

impl SizeClass {
    pub fn of(logical_width: f32) -> Self {
        if logical_width < MOBILE_MAX_WIDTH {
            SizeClass::Mobile
        } else {
            SizeClass::Desktop
        }
    }
}

/// What the loop does when the visibility gate is closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuspendPolicy {
    /// Keep requesting frames but do no work in them.
    SkipFrame,
    /// Cancel the pending request; start a fresh loop when the gate reopens.
    CancelLoop,
}

/// When the particle set is rebuilt after a settled resize.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repopulate {
    EveryResize,
    OnClassChange,
}

/// Which box the host measures for the logical surface size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MeasureTarget {
    Window,
    Container,
}

#[derive(Clone, Debug, PartialEq)]
pub struct EffectConfig {
    pub mode: Mode,
    pub suspend: SuspendPolicy,
    pub observes_intersection: bool,
    pub tracks_pointer: bool,
    pub resize_quiet: Duration,
    pub repopulate: Repopulate,
    pub measure: MeasureTarget,
    pub opaque: bool,
}

impl EffectConfig {
    pub fn for_mode(mode: Mode) -> Self {
        match mode {
            Mode::Field => Self {
                mode,
                suspend: SuspendPolicy::SkipFrame,
                observes_intersection: false,
                tracks_pointer: false,
                resize_quiet: Duration::from_millis(FIELD_RESIZE_QUIET_MS),
                repopulate: Repopulate::EveryResize,
                measure: MeasureTarget::Window,
                opaque: false,
            },
            Mode::Rising => Self {
                mode,
                suspend: SuspendPolicy::CancelLoop,
                observes_intersection: true,
                tracks_pointer: true,
                resize_quiet: Duration::from_millis(RISING_RESIZE_QUIET_MS),
                repopulate: Repopulate::OnClassChange,
                measure: MeasureTarget::Container,
                opaque: false,
            },
            Mode::Grid => Self {
                mode,
                suspend: SuspendPolicy::CancelLoop,
                observes_intersection: true,
                tracks_pointer: true,
                resize_quiet: Duration::from_millis(GRID_RESIZE_QUIET_MS),
                repopulate: Repopulate::OnClassChange,
                measure: MeasureTarget::Container,
                opaque: false,
            },
            Mode::Nebula => Self {
                mode,
                suspend: SuspendPolicy::CancelLoop,
                observes_intersection: true,
                tracks_pointer: false,
                resize_quiet: Duration::from_millis(NEBULA_RESIZE_QUIET_MS),
                repopulate: Repopulate::OnClassChange,
                measure: MeasureTarget::Container,
                opaque: true,
            },
        }
    }

    /// Upper bound applied to the device pixel ratio.
    pub fn ratio_cap(&self, class: SizeClass) -> f64 {
        match (self.mode, class) {
            (Mode::Field, SizeClass::Mobile) => FIELD_RATIO_CAP_MOBILE,
            (Mode::Field, SizeClass::Desktop) => FIELD_RATIO_CAP_DESKTOP,
            (Mode::Rising, _) => RISING_RATIO_CAP,
            (Mode::Grid, _) => GRID_RATIO_CAP,
            (Mode::Nebula, _) => NEBULA_RATIO_CAP,
        }
    }

    /// Number of discrete particles; zero for the grid and nebula modes.
    pub fn particle_count(&self, class: SizeClass) -> usize {
        match (self.mode, class) {
            (Mode::Field, SizeClass::Mobile) => FIELD_COUNT_MOBILE,
            (Mode::Field, SizeClass::Desktop) => FIELD_COUNT_DESKTOP,
            (Mode::Rising, SizeClass::Mobile) => RISING_COUNT_MOBILE,
            (Mode::Rising, SizeClass::Desktop) => RISING_COUNT_DESKTOP,
            (Mode::Grid, _) | (Mode::Nebula, _) => 0,
        }
    }

    pub fn link_distance(&self, class: SizeClass) -> f32 {
        match class {
            SizeClass::Mobile => FIELD_LINK_DIST_MOBILE,
            SizeClass::Desktop => FIELD_LINK_DIST_DESKTOP,
        }
    }

    pub fn boundary(&self) -> Option<Boundary> {
        match self.mode {
            Mode::Field => Some(Boundary::Reflect),
            Mode::Rising => Some(Boundary::Wrap),
            Mode::Grid | Mode::Nebula => None,
        }
    }

    /// Lifecycle signals the instance subscribes to at mount.
    pub fn signals(&self) -> SmallVec<[Signal; 4]> {
        let mut out: SmallVec<[Signal; 4]> = smallvec![Signal::Resize, Signal::PageVisibility];
        if self.tracks_pointer {
            out.push(Signal::PointerMove);
        }
        if self.observes_intersection {
            out.push(Signal::Intersection);
        }
        out
    }
}

/// Colors resolved from mode and theme at mount.
///
/// Prefixes are `rgba(r, g, b, ` strings completed with a per-item alpha,
/// so the paint loop never rebuilds the color part.
#[derive(Clone, Debug, PartialEq)]
pub struct Palette {
    pub particles: &'static [&'static str],
    pub stroke_prefix: &'static str,
    pub stroke_alpha_scale: f32,
    pub fill_prefix: &'static str,
    pub waves: &'static [&'static str],
}

const GOLD_FIELD: &[&str] = &["#FFD700", "#D4AF37", "#B8860B"];
const SLATE_FIELD: &[&str] = &["#94a3b8", "#64748b"];
const GOLD_SPARKS: &[&str] = &["#FFD700", "#DAA520", "#FFFACD", "#FCE6C9"];
const NEBULA_BANDS: &[&str] = &["rgba(212, 175, 55, 0.08)", "rgba(184, 134, 11, 0.05)"];

const GOLD_PREFIX: &str = "rgba(212, 175, 55, ";
const SLATE_PREFIX: &str = "rgba(148, 163, 184, ";
const CHARCOAL_PREFIX: &str = "rgba(50, 50, 50, ";
const WHITE_PREFIX: &str = "rgba(255, 255, 255, ";

impl Palette {
    pub fn resolve(mode: Mode, theme: Theme) -> Self {
        let dark = theme == Theme::Dark;
        match mode {
            Mode::Field => Self {
                particles: if dark { GOLD_FIELD } else { SLATE_FIELD },
                stroke_prefix: if dark { GOLD_PREFIX } else { SLATE_PREFIX },
                stroke_alpha_scale: FIELD_LINK_ALPHA_SCALE,
                fill_prefix: GOLD_PREFIX,
                waves: &[],
            },
            Mode::Rising => Self {
                particles: GOLD_SPARKS,
                stroke_prefix: GOLD_PREFIX,
                stroke_alpha_scale: 1.0,
                fill_prefix: GOLD_PREFIX,
                waves: &[],
            },
            Mode::Grid => Self {
                particles: &[],
                stroke_prefix: if dark { GOLD_PREFIX } else { CHARCOAL_PREFIX },
                stroke_alpha_scale: if dark { 1.0 } else { 1.5 },
                fill_prefix: if dark { WHITE_PREFIX } else { GOLD_PREFIX },
                waves: &[],
            },
            Mode::Nebula => Self {
                particles: &[],
                stroke_prefix: GOLD_PREFIX,
                stroke_alpha_scale: 1.0,
                fill_prefix: GOLD_PREFIX,
                waves: NEBULA_BANDS,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modes_parse_with_aliases() {
        assert_eq!("field".parse::<Mode>(), Ok(Mode::Field));
        assert_eq!(" Gold ".parse::<Mode>(), Ok(Mode::Rising));
        assert_eq!("NEBULA".parse::<Mode>(), Ok(Mode::Nebula));
        assert!(matches!("confetti".parse::<Mode>(), Err(FxError::UnknownMode(_))));
        for m in Mode::ALL {
            assert_eq!(m.name().parse::<Mode>(), Ok(m));
        }
    }

    #[test]
    fn theme_defaults_to_dark() {
        assert_eq!("".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert_eq!(Theme::default(), Theme::Dark);
    }

    #[test]
    fn size_class_boundary_is_exclusive() {
        assert_eq!(SizeClass::of(767.9), SizeClass::Mobile);
        assert_eq!(SizeClass::of(768.0), SizeClass::Desktop);
    }

    #[test]
    fn ratio_caps_per_mode() {
        let field = EffectConfig::for_mode(Mode::Field);
        assert_eq!(field.ratio_cap(SizeClass::Mobile), 1.0);
        assert_eq!(field.ratio_cap(SizeClass::Desktop), 1.5);
        let rising = EffectConfig::for_mode(Mode::Rising);
        assert_eq!(rising.ratio_cap(SizeClass::Desktop), 1.2);
        assert_eq!(EffectConfig::for_mode(Mode::Grid).ratio_cap(SizeClass::Desktop), 1.0);
        assert_eq!(EffectConfig::for_mode(Mode::Nebula).ratio_cap(SizeClass::Desktop), 1.0);
    }

    #[test]
    fn suspend_policy_differs_between_field_and_the_rest() {
        assert_eq!(EffectConfig::for_mode(Mode::Field).suspend, SuspendPolicy::SkipFrame);
        for m in [Mode::Rising, Mode::Grid, Mode::Nebula] {
            assert_eq!(EffectConfig::for_mode(m).suspend, SuspendPolicy::CancelLoop);
        }
    }

    #[test]
    fn signals_follow_mode_needs() {
        let field = EffectConfig::for_mode(Mode::Field).signals();
        assert!(!field.contains(&Signal::PointerMove));
        assert!(!field.contains(&Signal::Intersection));
        let grid = EffectConfig::for_mode(Mode::Grid).signals();
        assert!(grid.contains(&Signal::PointerMove));
        assert!(grid.contains(&Signal::Intersection));
        assert!(grid.contains(&Signal::Resize));
    }

    #[test]
    fn light_grid_scales_stroke_alpha() {
        let p = Palette::resolve(Mode::Grid, Theme::Light);
        assert_eq!(p.stroke_prefix, "rgba(50, 50, 50, ");
        assert_eq!(p.stroke_alpha_scale, 1.5);
        let d = Palette::resolve(Mode::Grid, Theme::Dark);
        assert_eq!(d.fill_prefix, "rgba(255, 255, 255, ");
    }
}
