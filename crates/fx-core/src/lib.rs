//! Platform-free core of the canvas background effects.
//!
//! An [`Effect`] owns one drawing [`Surface`] and is driven by a [`Host`]
//! (frames, timers, lifecycle signals). The countdown and notification
//! queues are small state machines the web front-end renders as widgets.

pub mod config;
pub mod constants;
pub mod countdown;
pub mod effect;
pub mod error;
pub mod gate;
pub mod host;
pub mod notify;
pub mod particles;
pub mod proximity;
pub mod render;
pub mod scheduler;
pub mod surface;
pub mod waves;

pub use config::{EffectConfig, Mode, Palette, SizeClass, SuspendPolicy, Theme};
pub use countdown::{Breakdown, Countdown, CountdownState};
pub use effect::{Effect, FrameOutcome, Scene};
pub use error::{FxError, FxResult};
pub use host::{Host, Signal, Viewport};
pub use notify::{Kind, Notification, NotificationQueue, Sweep};
pub use surface::{Composite, LineCap, Surface, SurfaceState};
