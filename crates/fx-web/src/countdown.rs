use fx_core::constants::COUNTDOWN_TICK_MS;
use fx_core::{Breakdown, Countdown, CountdownState};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

struct Ticker {
    element: web::Element,
    countdown: RefCell<Countdown>,
    interval: Cell<Option<i32>>,
}

impl Ticker {
    fn tick(&self, window: &web::Window) {
        let state = self.countdown.borrow_mut().tick(js_sys::Date::now() as i64);
        match state {
            CountdownState::Remaining(b) => render(&self.element, &b),
            CountdownState::Reached => {
                render(&self.element, &Breakdown::default());
                let _ = self.element.set_attribute("data-state", "reached");
                self.stop(window);
            }
        }
    }

    fn stop(&self, window: &web::Window) {
        if let Some(id) = self.interval.take() {
            window.clear_interval_with_handle(id);
        }
    }
}

/// Writes each unit into its `[data-unit="days|hours|minutes|seconds"]`
/// child, or the whole breakdown as text when there are none.
fn render(element: &web::Element, b: &Breakdown) {
    let units = [
        ("days", b.days),
        ("hours", b.hours),
        ("minutes", b.minutes),
        ("seconds", b.seconds),
    ];
    let mut wrote = false;
    for (unit, value) in units {
        let selector = format!("[data-unit=\"{}\"]", unit);
        if let Ok(Some(slot)) = element.query_selector(&selector) {
            slot.set_text_content(Some(&format!("{:02}", value)));
            wrote = true;
        }
    }
    if !wrote {
        element.set_text_content(Some(&format!(
            "{}d {:02}h {:02}m {:02}s",
            b.days, b.hours, b.minutes, b.seconds
        )));
    }
}

#[wasm_bindgen]
pub struct CountdownHandle {
    ticker: Rc<Ticker>,
    _closure: Closure<dyn FnMut()>,
}

#[wasm_bindgen]
impl CountdownHandle {
    #[wasm_bindgen(getter)]
    pub fn reached(&self) -> bool {
        self.ticker.countdown.borrow().is_reached()
    }

    pub fn destroy(&self) {
        if let Some(window) = web::window() {
            self.ticker.stop(&window);
        }
    }
}

impl Drop for CountdownHandle {
    fn drop(&mut self) {
        self.destroy();
    }
}

/// Tick the element with id `element_id` once per second until `target_ms`
/// (milliseconds since the epoch) has passed.
#[wasm_bindgen]
pub fn mount_countdown(element_id: &str, target_ms: f64) -> Result<CountdownHandle, JsValue> {
    let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let element = document
        .get_element_by_id(element_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element #{}", element_id)))?;

    let ticker = Rc::new(Ticker {
        element,
        countdown: RefCell::new(Countdown::new(target_ms as i64)),
        interval: Cell::new(None),
    });

    let closure = {
        let ticker = Rc::downgrade(&ticker);
        Closure::wrap(Box::new(move || {
            if let (Some(ticker), Some(window)) = (ticker.upgrade(), web::window()) {
                ticker.tick(&window);
            }
        }) as Box<dyn FnMut()>)
    };

    ticker.tick(&window);
    if !ticker.countdown.borrow().is_reached() {
        let id = window.set_interval_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            COUNTDOWN_TICK_MS as i32,
        )?;
        ticker.interval.set(Some(id));
    }
    log::info!("[countdown] mounted on #{}", element_id);

    Ok(CountdownHandle {
        ticker,
        _closure: closure,
    })
}
