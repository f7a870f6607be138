use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// Every `<canvas data-fx="...">` in the document.
pub fn effect_canvases(document: &web::Document) -> Vec<web::HtmlCanvasElement> {
    let mut out = Vec::new();
    if let Ok(list) = document.query_selector_all("canvas[data-fx]") {
        for i in 0..list.length() {
            if let Some(canvas) = list
                .item(i)
                .and_then(|n| n.dyn_into::<web::HtmlCanvasElement>().ok())
            {
                out.push(canvas);
            }
        }
    }
    out
}

/// Inner size of the window in CSS pixels.
pub fn window_size(window: &web::Window) -> (f32, f32) {
    let read = |v: Result<wasm_bindgen::JsValue, wasm_bindgen::JsValue>| {
        v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
    };
    (read(window.inner_width()), read(window.inner_height()))
}

/// Layout size of the canvas's parent box, falling back to the canvas.
pub fn container_size(canvas: &web::HtmlCanvasElement) -> (f32, f32) {
    match canvas
        .parent_element()
        .and_then(|p| p.dyn_into::<web::HtmlElement>().ok())
    {
        Some(parent) => (parent.offset_width() as f32, parent.offset_height() as f32),
        None => (canvas.offset_width() as f32, canvas.offset_height() as f32),
    }
}

pub fn set_css_size(el: &web::HtmlElement, width: f32, height: f32) {
    let style = el.style();
    let _ = style.set_property("width", &format!("{}px", width));
    let _ = style.set_property("height", &format!("{}px", height));
}
