use crate::dom;
use crate::pin::NativePin;
use hero_core::ScrollDriver;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

/// A window listener that can be detached again. Dropping it detaches it.
pub struct WindowListener {
    event: &'static str,
    closure: Option<Closure<dyn FnMut()>>,
}

impl WindowListener {
    pub fn remove(&mut self) {
        let Some(closure) = self.closure.take() else {
            return;
        };
        if let Some(w) = web::window() {
            let _ = w.remove_event_listener_with_callback(
                self.event,
                closure.as_ref().unchecked_ref(),
            );
        }
    }
}

impl Drop for WindowListener {
    fn drop(&mut self) {
        self.remove();
    }
}

/// Forward every native resize to the driver (not debounced).
pub fn wire_resize(
    driver: Rc<RefCell<ScrollDriver<NativePin>>>,
) -> anyhow::Result<WindowListener> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let closure = Closure::wrap(Box::new(move || match dom::viewport() {
        Ok(vp) => driver.borrow_mut().resize(vp),
        Err(e) => log::error!("[events] viewport read failed: {:?}", e),
    }) as Box<dyn FnMut()>);
    window
        .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    Ok(WindowListener {
        event: "resize",
        closure: Some(closure),
    })
}
