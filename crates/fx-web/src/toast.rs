use fx_core::{Kind, Notification, NotificationQueue};
use instant::Instant;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

const ID_ATTR: &str = "data-toast-id";
const DISMISS_ATTR: &str = "data-toast-dismiss";

struct Board {
    window: web::Window,
    document: web::Document,
    container: web::Element,
    queue: NotificationQueue<StdRng>,
    timer: Option<i32>,
    sweep_cb: Option<Closure<dyn FnMut()>>,
}

impl Board {
    fn node(&self, id: &str) -> Option<web::Element> {
        self.container
            .query_selector(&format!("[{}=\"{}\"]", ID_ATTR, id))
            .ok()
            .flatten()
    }

    fn build(&self, n: &Notification) -> Result<web::Element, JsValue> {
        let el = self.document.create_element("div")?;
        el.set_class_name(&class_name(n));
        el.set_attribute(ID_ATTR, &n.id)?;
        el.set_attribute("role", "status")?;

        let title = self.document.create_element("div")?;
        title.set_class_name("toast-title");
        title.set_text_content(Some(&n.title));
        el.append_child(&title)?;

        if !n.message.is_empty() {
            let message = self.document.create_element("div")?;
            message.set_class_name("toast-message");
            message.set_text_content(Some(&n.message));
            el.append_child(&message)?;
        }

        let close = self.document.create_element("button")?;
        close.set_class_name("toast-close");
        close.set_attribute(DISMISS_ATTR, "")?;
        close.set_attribute("aria-label", "Dismiss")?;
        close.set_text_content(Some("\u{00d7}"));
        el.append_child(&close)?;
        Ok(el)
    }

    fn mark_exiting(&self, id: &str) {
        if let (Some(el), Some(n)) = (
            self.node(id),
            self.queue.entries().iter().find(|n| n.id == id),
        ) {
            el.set_class_name(&class_name(n));
        }
    }

    fn sweep(&mut self) {
        self.timer = None;
        let changes = self.queue.sweep(Instant::now());
        for id in &changes.exiting {
            self.mark_exiting(id);
        }
        for n in &changes.removed {
            if let Some(el) = self.node(&n.id) {
                el.remove();
            }
        }
        self.reschedule();
    }

    /// Keep exactly one timer armed for the earliest pending deadline.
    fn reschedule(&mut self) {
        if let Some(id) = self.timer.take() {
            self.window.clear_timeout_with_handle(id);
        }
        let Some(wait) = self.queue.next_deadline(Instant::now()) else {
            return;
        };
        let Some(cb) = self.sweep_cb.as_ref() else {
            return;
        };
        match self
            .window
            .set_timeout_with_callback_and_timeout_and_arguments_0(
                cb.as_ref().unchecked_ref(),
                wait.as_millis() as i32,
            ) {
            Ok(id) => self.timer = Some(id),
            Err(e) => log::warn!("[toast] setTimeout failed: {:?}", e),
        }
    }
}

fn class_name(n: &Notification) -> String {
    if n.exiting {
        format!("toast toast-{} exiting", n.kind.as_str())
    } else {
        format!("toast toast-{}", n.kind.as_str())
    }
}

fn with_board(board: &Weak<RefCell<Board>>, f: impl FnOnce(&mut Board)) {
    if let Some(board) = board.upgrade() {
        if let Ok(mut b) = board.try_borrow_mut() {
            f(&mut b);
        }
    }
}

/// Stack of transient notifications rendered into a container element.
#[wasm_bindgen]
pub struct ToastCenter {
    board: Rc<RefCell<Board>>,
    click_cb: Closure<dyn FnMut(web::Event)>,
}

#[wasm_bindgen]
impl ToastCenter {
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str) -> Result<ToastCenter, JsValue> {
        let window = web::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let container = document
            .get_element_by_id(container_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element #{}", container_id)))?;

        let board = Rc::new(RefCell::new(Board {
            window,
            document,
            container: container.clone(),
            queue: NotificationQueue::new(StdRng::from_entropy()),
            timer: None,
            sweep_cb: None,
        }));

        let weak = Rc::downgrade(&board);
        board.borrow_mut().sweep_cb = Some(Closure::wrap(Box::new(move || {
            with_board(&weak, Board::sweep);
        }) as Box<dyn FnMut()>));

        // one listener on the container serves every close button
        let weak = Rc::downgrade(&board);
        let click_cb = Closure::wrap(Box::new(move |ev: web::Event| {
            let Some(target) = ev.target().and_then(|t| t.dyn_into::<web::Element>().ok())
            else {
                return;
            };
            if !matches!(target.closest(&format!("[{}]", DISMISS_ATTR)), Ok(Some(_))) {
                return;
            }
            let id = match target.closest(&format!("[{}]", ID_ATTR)) {
                Ok(Some(toast)) => toast.get_attribute(ID_ATTR),
                _ => None,
            };
            if let Some(id) = id {
                with_board(&weak, |b| {
                    if b.queue.dismiss(&id, Instant::now()) {
                        b.mark_exiting(&id);
                        b.reschedule();
                    }
                });
            }
        }) as Box<dyn FnMut(web::Event)>);
        container.add_event_listener_with_callback("click", click_cb.as_ref().unchecked_ref())?;

        log::info!("[toast] center ready on #{}", container_id);
        Ok(ToastCenter { board, click_cb })
    }

    /// Show a notification (`success`, `error`, `info` or `warning`) and
    /// return its id.
    pub fn add(&self, kind: &str, title: &str, message: &str) -> Result<String, JsValue> {
        let kind: Kind = kind
            .parse()
            .map_err(|e: fx_core::FxError| JsValue::from_str(&e.to_string()))?;
        let mut b = self.board.borrow_mut();
        let id = b.queue.add(kind, title, message, Instant::now());
        let el = match b.queue.entries().last() {
            Some(n) => b.build(n)?,
            None => return Ok(id),
        };
        b.container.append_child(&el)?;
        b.reschedule();
        Ok(id)
    }

    /// Start the exit animation; the toast is removed once it finishes.
    pub fn dismiss(&self, id: &str) -> bool {
        let mut b = self.board.borrow_mut();
        if !b.queue.dismiss(id, Instant::now()) {
            return false;
        }
        b.mark_exiting(id);
        b.reschedule();
        true
    }

    /// Remove a toast immediately, without the exit animation.
    pub fn remove(&self, id: &str) -> bool {
        let mut b = self.board.borrow_mut();
        if b.queue.remove(id).is_none() {
            return false;
        }
        if let Some(el) = b.node(id) {
            el.remove();
        }
        b.reschedule();
        true
    }

    #[wasm_bindgen(getter)]
    pub fn count(&self) -> usize {
        self.board.borrow().queue.len()
    }

    pub fn destroy(&self) {
        let Ok(mut b) = self.board.try_borrow_mut() else {
            return;
        };
        if let Some(id) = b.timer.take() {
            b.window.clear_timeout_with_handle(id);
        }
        let _ = b.container.remove_event_listener_with_callback(
            "click",
            self.click_cb.as_ref().unchecked_ref(),
        );
        b.sweep_cb = None;
    }
}

impl Drop for ToastCenter {
    fn drop(&mut self) {
        self.destroy();
    }
}
