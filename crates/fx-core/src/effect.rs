//! One mounted effect instance: surface bookkeeping, scene state, gate and
//! scheduler, driven entirely by calls from a [`Host`].
//!
//! Teardown consumes the instance, so nothing can reach it afterwards.

use crate::config::{EffectConfig, Mode, Palette, Repopulate, SizeClass, SuspendPolicy, Theme};
use crate::constants::POINTER_SENTINEL;
use crate::gate::VisibilityGate;
use crate::host::Host;
use crate::particles::{Particle, ParticleStore};
use crate::proximity::{grid_marks, pairwise_links, GridMark, Link};
use crate::render::Renderer;
use crate::scheduler::{FrameAction, FrameScheduler};
use crate::surface::{configure, Surface, SurfaceState};
use crate::waves::WaveField;
use glam::Vec2;
use rand::Rng;

/// Mode-specific simulation state.
pub enum Scene {
    Field {
        store: ParticleStore,
        links: Vec<Link>,
        link_distance: f32,
    },
    Rising {
        store: ParticleStore,
    },
    Grid {
        marks: Vec<GridMark>,
    },
    Nebula {
        waves: WaveField,
    },
}

impl Scene {
    fn new(config: &EffectConfig, palette: &Palette) -> Self {
        match (config.mode, config.boundary()) {
            (Mode::Field, Some(boundary)) => Scene::Field {
                store: ParticleStore::new(boundary, palette.particles),
                links: Vec::new(),
                link_distance: config.link_distance(SizeClass::Desktop),
            },
            (Mode::Rising, Some(boundary)) => Scene::Rising {
                store: ParticleStore::new(boundary, palette.particles),
            },
            (Mode::Nebula, _) => Scene::Nebula {
                waves: WaveField::new(palette.waves),
            },
            _ => Scene::Grid { marks: Vec::new() },
        }
    }

    fn store_mut(&mut self) -> Option<&mut ParticleStore> {
        match self {
            Scene::Field { store, .. } | Scene::Rising { store } => Some(store),
            Scene::Grid { .. } | Scene::Nebula { .. } => None,
        }
    }

    pub fn particles(&self) -> &[Particle] {
        match self {
            Scene::Field { store, .. } | Scene::Rising { store } => &store.particles,
            Scene::Grid { .. } | Scene::Nebula { .. } => &[],
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameOutcome {
    /// One advance + proximity + paint step ran.
    Painted,
    /// Gate closed under skip-frame scheduling; next frame requested.
    Skipped,
    /// Gate closed under cancel-loop scheduling; the loop ended.
    Stopped,
    /// Nothing was waiting on this frame.
    Stale,
}

pub struct Effect<S: Surface, R: Rng, H: Host> {
    config: EffectConfig,
    surface: S,
    state: SurfaceState,
    class: SizeClass,
    scene: Scene,
    renderer: Renderer,
    pointer: Vec2,
    gate: VisibilityGate,
    scheduler: FrameScheduler<H::Frame>,
    resize_timer: Option<H::Timer>,
    rng: R,
}

impl<S: Surface, R: Rng, H: Host> Effect<S, R, H> {
    /// Size the surface, populate the scene, subscribe to the mode's signals
    /// and start the loop if the gate allows it.
    pub fn mount(config: EffectConfig, theme: Theme, mut surface: S, mut rng: R, host: &mut H) -> Self {
        let palette = Palette::resolve(config.mode, theme);
        let viewport = host.measure();
        let class = SizeClass::of(viewport.width);
        let state = configure(&mut surface, viewport, config.ratio_cap(class));

        let mut scene = Scene::new(&config, &palette);
        populate(&mut scene, &config, class, &state, &mut rng);

        for signal in config.signals() {
            host.subscribe(signal);
        }

        let mut effect = Self {
            gate: VisibilityGate::new(config.observes_intersection),
            scheduler: FrameScheduler::new(config.suspend),
            config,
            surface,
            state,
            class,
            scene,
            renderer: Renderer::new(palette),
            pointer: Vec2::splat(POINTER_SENTINEL),
            resize_timer: None,
            rng,
        };
        effect.gate.set_page_visible(host.page_visible());
        // skip-frame loops idle through hidden periods, so they start anyway
        if effect.gate.is_open() || effect.config.suspend == SuspendPolicy::SkipFrame {
            effect.scheduler.request(host);
        }
        log::info!(
            "[fx] mounted {} ({:?}, {} particles, {}x{} @{:.2})",
            effect.config.mode.name(),
            class,
            effect.scene.particles().len(),
            effect.state.width,
            effect.state.height,
            effect.state.ratio
        );
        effect
    }

    /// Frame callback. Consumes the outstanding request and does whatever the
    /// gate and suspend policy allow.
    pub fn on_frame(&mut self, host: &mut H) -> FrameOutcome {
        if !self.scheduler.fired() {
            return FrameOutcome::Stale;
        }
        match self.scheduler.decide(self.gate.is_open()) {
            FrameAction::Step => {
                let origin = if self.config.tracks_pointer {
                    host.surface_origin()
                } else {
                    Vec2::ZERO
                };
                self.step(origin);
                self.scheduler.request(host);
                FrameOutcome::Painted
            }
            FrameAction::Skip => {
                self.scheduler.request(host);
                FrameOutcome::Skipped
            }
            FrameAction::Stop => FrameOutcome::Stopped,
        }
    }

    // advance -> proximity -> paint, always in that order
    fn step(&mut self, origin: Vec2) {
        let Self {
            surface,
            state,
            scene,
            renderer,
            pointer,
            rng,
            ..
        } = self;
        let bounds = Vec2::new(state.width, state.height);
        let pointer = if *pointer == Vec2::splat(POINTER_SENTINEL) {
            *pointer
        } else {
            *pointer - origin
        };
        match scene {
            Scene::Field {
                store,
                links,
                link_distance,
            } => {
                store.advance(bounds, None, rng);
                pairwise_links(&store.particles, *link_distance, links);
                renderer.clear(surface, state);
                renderer.paint_field(surface, &store.particles, links);
            }
            Scene::Rising { store } => {
                store.advance(bounds, Some(pointer), rng);
                renderer.clear(surface, state);
                renderer.paint_rising(surface, &store.particles);
            }
            Scene::Grid { marks } => {
                grid_marks(pointer, bounds, marks);
                renderer.clear(surface, state);
                renderer.paint_grid(surface, marks);
            }
            Scene::Nebula { waves } => {
                waves.advance();
                renderer.clear(surface, state);
                renderer.paint_nebula(surface, waves, state);
            }
        }
    }

    /// Raw resize event: restart the quiet period.
    pub fn on_resize(&mut self, host: &mut H) {
        if let Some(timer) = self.resize_timer.take() {
            host.clear_timeout(timer);
        }
        self.resize_timer = Some(host.set_timeout(self.config.resize_quiet));
    }

    /// The quiet period elapsed: re-measure and reconfigure.
    pub fn on_resize_settled(&mut self, host: &mut H) {
        self.resize_timer = None;
        let viewport = host.measure();
        let class = SizeClass::of(viewport.width);
        self.state = configure(&mut self.surface, viewport, self.config.ratio_cap(class));
        let rebuild = match self.config.repopulate {
            Repopulate::EveryResize => true,
            Repopulate::OnClassChange => class != self.class,
        };
        self.class = class;
        if rebuild {
            populate(&mut self.scene, &self.config, class, &self.state, &mut self.rng);
        }
        log::info!(
            "[fx] {} resized to {}x{} ({:?}, rebuilt={})",
            self.config.mode.name(),
            self.state.width,
            self.state.height,
            class,
            rebuild
        );
    }

    /// Pointer position in the host's pointer space (client coordinates on
    /// the web). Made surface-relative at paint time. Dropped while hidden.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        if !self.config.tracks_pointer || !self.gate.is_open() {
            return;
        }
        self.pointer = Vec2::new(x, y);
    }

    pub fn on_page_visibility(&mut self, visible: bool, host: &mut H) {
        if self.gate.set_page_visible(visible) {
            log::debug!("[fx] {} page visible={}", self.config.mode.name(), visible);
            self.scheduler.sync(self.gate.is_open(), host);
        }
    }

    pub fn on_intersection(&mut self, intersecting: bool, host: &mut H) {
        if self.gate.set_intersecting(intersecting) {
            log::debug!("[fx] {} in view={}", self.config.mode.name(), intersecting);
            self.scheduler.sync(self.gate.is_open(), host);
        }
    }

    /// Cancel the frame request, clear the resize timer and drop every
    /// subscription. Returns the surface.
    pub fn teardown(mut self, host: &mut H) -> S {
        self.scheduler.cancel(host);
        if let Some(timer) = self.resize_timer.take() {
            host.clear_timeout(timer);
        }
        for signal in self.config.signals() {
            host.unsubscribe(signal);
        }
        log::info!("[fx] {} torn down", self.config.mode.name());
        self.surface
    }

    pub fn config(&self) -> &EffectConfig {
        &self.config
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn surface_state(&self) -> &SurfaceState {
        &self.state
    }

    pub fn size_class(&self) -> SizeClass {
        self.class
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn particles(&self) -> &[Particle] {
        self.scene.particles()
    }

    pub fn pointer(&self) -> Vec2 {
        self.pointer
    }

    pub fn is_running(&self) -> bool {
        self.scheduler.is_running()
    }

    pub fn gate_open(&self) -> bool {
        self.gate.is_open()
    }

    pub fn resize_pending(&self) -> bool {
        self.resize_timer.is_some()
    }
}

fn populate<R: Rng>(scene: &mut Scene, config: &EffectConfig, class: SizeClass, state: &SurfaceState, rng: &mut R) {
    if let Scene::Field { link_distance, .. } = scene {
        *link_distance = config.link_distance(class);
    }
    let bounds = Vec2::new(state.width, state.height);
    if let Some(store) = scene.store_mut() {
        store.populate(config.particle_count(class), bounds, rng);
    }
}
