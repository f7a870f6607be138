#![cfg(target_arch = "wasm32")]
use fx_core::{EffectConfig, Mode, Theme};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use web_sys as web;

mod canvas;
mod countdown;
mod dom;
mod host;
mod toast;

pub use countdown::{mount_countdown, CountdownHandle};
pub use toast::ToastCenter;

use canvas::CanvasSurface;
use host::{Runtime, SharedRuntime, WebHost};

thread_local! {
    // effects mounted from `data-fx` markup live as long as the page
    static AUTO_MOUNTED: RefCell<Vec<EffectHandle>> = const { RefCell::new(Vec::new()) };
}

/// A mounted effect. Inert when the canvas had no usable 2D context.
#[wasm_bindgen]
pub struct EffectHandle {
    runtime: Option<SharedRuntime>,
}

#[wasm_bindgen]
impl EffectHandle {
    /// False when mounting degraded to rendering nothing.
    #[wasm_bindgen(getter)]
    pub fn active(&self) -> bool {
        self.runtime.is_some()
    }

    /// Cancel the frame loop, clear timers and detach every listener.
    pub fn destroy(&mut self) {
        let Some(runtime) = self.runtime.take() else {
            return;
        };
        let mut rt = runtime.borrow_mut();
        let Runtime { effect, host } = &mut *rt;
        if let Some(fx) = effect.take() {
            let _ = fx.teardown(host);
        }
        host.release();
    }
}

impl Drop for EffectHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("fx-web starting");

    if let Err(e) = auto_mount() {
        log::error!("auto-mount error: {:?}", e);
    }
    Ok(())
}

fn auto_mount() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    for canvas in dom::effect_canvases(&document) {
        let mode = canvas.get_attribute("data-fx").unwrap_or_default();
        let theme = canvas.get_attribute("data-theme").unwrap_or_default();
        match mount(&canvas, &mode, &theme) {
            Ok(handle) => AUTO_MOUNTED.with(|m| m.borrow_mut().push(handle)),
            Err(e) => log::warn!("[fx] skipping canvas data-fx={:?}: {}", mode, e),
        }
    }
    Ok(())
}

/// Mount an effect (`field`, `rising`, `grid` or `nebula`) on a canvas.
#[wasm_bindgen]
pub fn mount_effect(
    canvas: web::HtmlCanvasElement,
    mode: &str,
    theme: &str,
) -> Result<EffectHandle, JsValue> {
    mount(&canvas, mode, theme).map_err(|e| JsValue::from_str(&e.to_string()))
}

fn mount(canvas: &web::HtmlCanvasElement, mode: &str, theme: &str) -> anyhow::Result<EffectHandle> {
    let mode: Mode = mode.parse()?;
    let theme: Theme = theme.parse()?;
    let config = EffectConfig::for_mode(mode);

    let surface = match CanvasSurface::acquire(canvas, config.opaque) {
        Ok(s) => s,
        Err(e) => {
            log::warn!("[fx] {} renders nothing: {}", mode.name(), e);
            return Ok(EffectHandle { runtime: None });
        }
    };

    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;
    let host = WebHost::new(window, document, canvas.clone(), config.measure);
    let runtime: SharedRuntime = Rc::new(RefCell::new(Runtime { effect: None, host }));
    {
        let mut rt = runtime.borrow_mut();
        let Runtime { effect, host } = &mut *rt;
        host.attach(&runtime);
        *effect = Some(fx_core::Effect::mount(
            config,
            theme,
            surface,
            StdRng::from_entropy(),
            host,
        ));
    }
    Ok(EffectHandle {
        runtime: Some(runtime),
    })
}
