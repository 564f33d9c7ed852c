use hero_core::Viewport;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn html_by_id(document: &web::Document, id: &str) -> Option<web::HtmlElement> {
    document
        .get_element_by_id(id)
        .and_then(|el| el.dyn_into::<web::HtmlElement>().ok())
}

#[inline]
pub fn html_by_selector(document: &web::Document, selector: &str) -> Option<web::HtmlElement> {
    match document.query_selector(selector) {
        Ok(Some(el)) => el.dyn_into::<web::HtmlElement>().ok(),
        _ => None,
    }
}

/// Best-effort inline style write.
#[inline]
pub fn set_style(el: &web::HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

#[inline]
pub fn clear_style(el: &web::HtmlElement, property: &str) {
    let _ = el.style().remove_property(property);
}

pub fn viewport() -> anyhow::Result<Viewport> {
    let w = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let width = w
        .inner_width()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .as_f64()
        .unwrap_or(0.0);
    let height = w
        .inner_height()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .as_f64()
        .unwrap_or(0.0);
    Ok(Viewport::new(width, height))
}

/// Resolve after `ms` milliseconds via `setTimeout`.
pub async fn sleep_ms(ms: u32) {
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(w) = web::window() {
            let _ = w.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms as i32);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}
