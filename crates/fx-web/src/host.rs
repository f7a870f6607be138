//! `Host` over the browser: requestAnimationFrame, setTimeout, DOM listeners
//! and an IntersectionObserver. Every callback holds a `Weak` to the runtime,
//! so once the handle drops the runtime nothing keeps it computing.

use crate::canvas::CanvasSurface;
use crate::dom;
use fnv::FnvHashMap;
use fx_core::config::MeasureTarget;
use fx_core::{Effect, Host, Signal, Viewport};
use glam::Vec2;
use rand::rngs::StdRng;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub type WebEffect = Effect<CanvasSurface, StdRng, WebHost>;

pub struct Runtime {
    pub effect: Option<WebEffect>,
    pub host: WebHost,
}

pub type SharedRuntime = Rc<RefCell<Runtime>>;

enum Listener {
    Event {
        target: web::EventTarget,
        name: &'static str,
        closure: Closure<dyn FnMut(web::Event)>,
    },
    Observer {
        observer: web::IntersectionObserver,
        _closure: Closure<dyn FnMut(js_sys::Array)>,
    },
}

impl Listener {
    fn detach(self) {
        match self {
            Listener::Event {
                target,
                name,
                closure,
            } => {
                let _ = target.remove_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            }
            Listener::Observer { observer, .. } => observer.disconnect(),
        }
    }
}

pub struct WebHost {
    window: web::Window,
    document: web::Document,
    canvas: web::HtmlCanvasElement,
    measure: MeasureTarget,
    runtime: Weak<RefCell<Runtime>>,
    frame_cb: Option<Closure<dyn FnMut()>>,
    settle_cb: Option<Closure<dyn FnMut()>>,
    listeners: FnvHashMap<Signal, Listener>,
}

impl WebHost {
    pub fn new(
        window: web::Window,
        document: web::Document,
        canvas: web::HtmlCanvasElement,
        measure: MeasureTarget,
    ) -> Self {
        Self {
            window,
            document,
            canvas,
            measure,
            runtime: Weak::new(),
            frame_cb: None,
            settle_cb: None,
            listeners: FnvHashMap::default(),
        }
    }

    /// Bind the host to its runtime and build the frame and settle callbacks.
    pub fn attach(&mut self, runtime: &SharedRuntime) {
        self.runtime = Rc::downgrade(runtime);
        self.frame_cb = Some(dispatch0(&self.runtime, |fx, host| {
            fx.on_frame(host);
        }));
        self.settle_cb = Some(dispatch0(&self.runtime, |fx, host| fx.on_resize_settled(host)));
    }

    /// Drop the callbacks; any listener still registered is detached too.
    pub fn release(&mut self) {
        for (_, listener) in self.listeners.drain() {
            listener.detach();
        }
        self.frame_cb = None;
        self.settle_cb = None;
    }

    fn add_event(&mut self, signal: Signal, target: web::EventTarget, name: &'static str) {
        let runtime = self.runtime.clone();
        let document = self.document.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::Event| {
            with_runtime(&runtime, |fx, host| match signal {
                Signal::Resize => fx.on_resize(host),
                Signal::PageVisibility => fx.on_page_visibility(!document.hidden(), host),
                Signal::PointerMove => {
                    if let Some(mouse) = ev.dyn_ref::<web::MouseEvent>() {
                        fx.on_pointer_move(mouse.client_x() as f32, mouse.client_y() as f32);
                    }
                }
                Signal::Intersection => {}
            });
        }) as Box<dyn FnMut(web::Event)>);
        if let Err(e) = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref()) {
            log::warn!("[host] could not listen for {}: {:?}", name, e);
            return;
        }
        self.listeners.insert(
            signal,
            Listener::Event {
                target,
                name,
                closure,
            },
        );
    }

    fn add_observer(&mut self) {
        let runtime = self.runtime.clone();
        let closure = Closure::wrap(Box::new(move |entries: js_sys::Array| {
            let Some(entry) = entries
                .iter()
                .last()
                .and_then(|e| e.dyn_into::<web::IntersectionObserverEntry>().ok())
            else {
                return;
            };
            let visible = entry.is_intersecting();
            with_runtime(&runtime, |fx, host| fx.on_intersection(visible, host));
        }) as Box<dyn FnMut(js_sys::Array)>);
        let observer = match web::IntersectionObserver::new(closure.as_ref().unchecked_ref()) {
            Ok(o) => o,
            Err(e) => {
                log::warn!("[host] IntersectionObserver unavailable: {:?}", e);
                return;
            }
        };
        let target: web::Element = match self.canvas.parent_element() {
            Some(parent) => parent,
            None => self.canvas.clone().into(),
        };
        observer.observe(&target);
        self.listeners.insert(
            Signal::Intersection,
            Listener::Observer {
                observer,
                _closure: closure,
            },
        );
    }
}

impl Host for WebHost {
    type Frame = i32;
    type Timer = i32;

    fn request_frame(&mut self) -> i32 {
        let Some(cb) = self.frame_cb.as_ref() else {
            return 0;
        };
        self.window
            .request_animation_frame(cb.as_ref().unchecked_ref())
            .unwrap_or(0)
    }

    fn cancel_frame(&mut self, frame: i32) {
        let _ = self.window.cancel_animation_frame(frame);
    }

    fn set_timeout(&mut self, delay: Duration) -> i32 {
        let Some(cb) = self.settle_cb.as_ref() else {
            return 0;
        };
        self.window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                delay.as_millis() as i32,
            )
            .unwrap_or(0)
    }

    fn clear_timeout(&mut self, timer: i32) {
        self.window.clear_timeout_with_handle(timer);
    }

    fn subscribe(&mut self, signal: Signal) {
        if self.listeners.contains_key(&signal) {
            return;
        }
        match signal {
            Signal::Resize => self.add_event(signal, self.window.clone().into(), "resize"),
            Signal::PointerMove => self.add_event(signal, self.window.clone().into(), "mousemove"),
            Signal::PageVisibility => {
                self.add_event(signal, self.document.clone().into(), "visibilitychange")
            }
            Signal::Intersection => self.add_observer(),
        }
    }

    fn unsubscribe(&mut self, signal: Signal) {
        if let Some(listener) = self.listeners.remove(&signal) {
            listener.detach();
        }
    }

    fn measure(&self) -> Viewport {
        let (width, height) = match self.measure {
            MeasureTarget::Window => dom::window_size(&self.window),
            MeasureTarget::Container => dom::container_size(&self.canvas),
        };
        Viewport::new(width, height, self.window.device_pixel_ratio())
    }

    fn page_visible(&self) -> bool {
        !self.document.hidden()
    }

    // pointer events report client coordinates
    fn surface_origin(&self) -> Vec2 {
        let rect = self.canvas.get_bounding_client_rect();
        Vec2::new(rect.left() as f32, rect.top() as f32)
    }
}

fn with_runtime(runtime: &Weak<RefCell<Runtime>>, f: impl FnOnce(&mut WebEffect, &mut WebHost)) {
    let Some(rt) = runtime.upgrade() else {
        return;
    };
    let Ok(mut rt) = rt.try_borrow_mut() else {
        log::debug!("[host] runtime busy; dropping callback");
        return;
    };
    let Runtime { effect, host } = &mut *rt;
    if let Some(fx) = effect.as_mut() {
        f(fx, host);
    }
}

fn dispatch0(
    runtime: &Weak<RefCell<Runtime>>,
    f: impl Fn(&mut WebEffect, &mut WebHost) + 'static,
) -> Closure<dyn FnMut()> {
    let runtime = runtime.clone();
    Closure::wrap(Box::new(move || with_runtime(&runtime, &f)) as Box<dyn FnMut()>)
}
