//! Native sticky pin.
//!
//! The trigger element is stretched to `viewport + distance` so its sticky
//! stage child stays fixed while `distance` px of scroll are consumed.
//! Progress is how far the trigger's top has travelled above the viewport.

use crate::constants::{PIN_STAGE_ID, PIN_TRIGGER_ID};
use crate::dom;
use hero_core::{
    offset_for_progress, progress_from_offset, PinController, PinOptions, ProgressCallback,
};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

struct PinShared {
    trigger: web::HtmlElement,
    distance: f64,
    on_progress: Option<ProgressCallback>,
}

impl PinShared {
    fn sample(&mut self) {
        let top = self.trigger.get_bounding_client_rect().top();
        let p = progress_from_offset(-top, self.distance);
        if let Some(cb) = self.on_progress.as_mut() {
            cb(p);
        }
    }

    fn layout(&self, stage: &web::HtmlElement) {
        let track = format!("calc(100vh + {:.0}px)", self.distance);
        dom::set_style(&self.trigger, "position", "relative");
        dom::set_style(&self.trigger, "height", &track);
        dom::set_style(stage, "position", "sticky");
        dom::set_style(stage, "top", "0");
        dom::set_style(stage, "height", "100vh");
    }
}

pub struct NativePin {
    stage: web::HtmlElement,
    shared: Rc<RefCell<PinShared>>,
    scroll_listener: Option<Closure<dyn FnMut()>>,
}

impl NativePin {
    /// `None` until both the track and its stage are attached.
    pub fn query(document: &web::Document) -> Option<Self> {
        let trigger = dom::html_by_id(document, PIN_TRIGGER_ID)?;
        let stage = dom::html_by_id(document, PIN_STAGE_ID)?;
        Some(Self {
            stage,
            shared: Rc::new(RefCell::new(PinShared {
                trigger,
                distance: 0.0,
                on_progress: None,
            })),
            scroll_listener: None,
        })
    }

    fn listen_native(&mut self) {
        let Some(window) = web::window() else { return };
        let shared = self.shared.clone();
        let closure = Closure::wrap(Box::new(move || {
            if let Ok(mut s) = shared.try_borrow_mut() {
                s.sample();
            }
        }) as Box<dyn FnMut()>);
        let opts = web::AddEventListenerOptions::new();
        opts.set_passive(true);
        let _ = window.add_event_listener_with_callback_and_add_event_listener_options(
            "scroll",
            closure.as_ref().unchecked_ref(),
            &opts,
        );
        self.scroll_listener = Some(closure);
    }

    fn unlisten_native(&mut self) {
        if let Some(closure) = self.scroll_listener.take() {
            if let Some(window) = web::window() {
                let _ = window.remove_event_listener_with_callback(
                    "scroll",
                    closure.as_ref().unchecked_ref(),
                );
            }
        }
    }
}

impl PinController for NativePin {
    fn create_pin(&mut self, options: PinOptions, on_progress: ProgressCallback) {
        {
            let mut s = self.shared.borrow_mut();
            s.distance = options.distance_px;
            s.on_progress = Some(on_progress);
            s.layout(&self.stage);
            s.sample();
        }
        if options.native_scroll {
            self.listen_native();
        }
        log::info!(
            "[pin] pinned #{} over {:.0}px native={}",
            PIN_TRIGGER_ID,
            options.distance_px,
            options.native_scroll
        );
    }

    fn update(&mut self) {
        self.shared.borrow_mut().sample();
    }

    fn refresh(&mut self, distance_px: f64, keep_progress: f64) {
        let mut s = self.shared.borrow_mut();
        let Some(window) = web::window() else { return };
        // document offset of the track start, independent of its own height
        let start = window.scroll_y().unwrap_or(0.0) + s.trigger.get_bounding_client_rect().top();
        s.distance = distance_px;
        s.layout(&self.stage);
        window.scroll_to_with_x_and_y(0.0, start + offset_for_progress(keep_progress, distance_px));
        s.sample();
    }

    fn kill_all(&mut self) {
        self.unlisten_native();
        let mut s = self.shared.borrow_mut();
        s.on_progress = None;
        for prop in ["position", "height"] {
            dom::clear_style(&s.trigger, prop);
        }
        for prop in ["position", "top", "height"] {
            dom::clear_style(&self.stage, prop);
        }
    }
}
