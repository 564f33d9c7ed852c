//! Binding to the page's global `Lenis` smooth-scroll constructor.

use crate::constants::{SMOOTH_GLOBAL, SMOOTH_LERP};
use hero_core::{ScrollCallback, SmoothScroll};
use wasm_bindgen::prelude::*;
use web_sys as web;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = Lenis)]
    #[derive(Clone, Debug)]
    type LenisJs;

    #[wasm_bindgen(constructor, js_class = "Lenis", catch)]
    fn new(options: &JsValue) -> Result<LenisJs, JsValue>;

    #[wasm_bindgen(method)]
    fn on(this: &LenisJs, event: &str, callback: &js_sys::Function);

    #[wasm_bindgen(method)]
    fn off(this: &LenisJs, event: &str, callback: &js_sys::Function);

    #[wasm_bindgen(method)]
    fn raf(this: &LenisJs, time_ms: f64);

    #[wasm_bindgen(method)]
    fn destroy(this: &LenisJs);

    #[wasm_bindgen(method, getter)]
    fn scroll(this: &LenisJs) -> f64;
}

pub struct LenisSmooth {
    lenis: LenisJs,
    listener: Option<Closure<dyn FnMut(JsValue)>>,
}

/// Construct the smoothing layer if its script has loaded.
pub fn try_create() -> Option<Box<dyn SmoothScroll>> {
    let window = web::window()?;
    match js_sys::Reflect::has(&window, &JsValue::from_str(SMOOTH_GLOBAL)) {
        Ok(true) => {}
        _ => return None,
    }
    let options = js_sys::Object::new();
    let _ = js_sys::Reflect::set(&options, &"lerp".into(), &SMOOTH_LERP.into());
    let _ = js_sys::Reflect::set(&options, &"smoothWheel".into(), &true.into());
    match LenisJs::new(&options) {
        Ok(lenis) => {
            log::info!("[smooth] {} attached", SMOOTH_GLOBAL);
            Some(Box::new(LenisSmooth {
                lenis,
                listener: None,
            }))
        }
        Err(e) => {
            log::error!("[smooth] {} constructor failed: {:?}", SMOOTH_GLOBAL, e);
            None
        }
    }
}

impl LenisSmooth {
    fn unsubscribe(&mut self) {
        if let Some(cb) = self.listener.take() {
            self.lenis.off("scroll", cb.as_ref().unchecked_ref());
        }
    }
}

impl SmoothScroll for LenisSmooth {
    fn on_scroll(&mut self, mut callback: ScrollCallback) {
        self.unsubscribe();
        let lenis = self.lenis.clone();
        let closure = Closure::wrap(Box::new(move |_instance: JsValue| {
            callback(lenis.scroll());
        }) as Box<dyn FnMut(JsValue)>);
        self.lenis.on("scroll", closure.as_ref().unchecked_ref());
        self.listener = Some(closure);
    }

    fn advance(&mut self, time_ms: f64) {
        self.lenis.raf(time_ms);
    }

    fn dispose(&mut self) {
        self.unsubscribe();
        self.lenis.destroy();
    }
}
