use crate::pin::NativePin;
use hero_core::ScrollDriver;
use instant::Instant;
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub driver: Rc<RefCell<ScrollDriver<NativePin>>>,
    pub started: Instant,
}

impl FrameContext {
    pub fn frame(&mut self) {
        let time_ms = self.started.elapsed().as_secs_f64() * 1000.0;
        if let Ok(mut d) = self.driver.try_borrow_mut() {
            d.frame(time_ms);
        }
    }
}

type TickSlot = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle to a running `requestAnimationFrame` loop.
pub struct FrameLoop {
    tick: TickSlot,
    pending: Rc<Cell<Option<i32>>>,
}

impl FrameLoop {
    /// Cancel the queued frame and release the self-referencing closure.
    pub fn stop(&self) {
        if let (Some(id), Some(w)) = (self.pending.take(), web::window()) {
            let _ = w.cancel_animation_frame(id);
        }
        self.tick.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

fn request(tick: &TickSlot, pending: &Cell<Option<i32>>) {
    let Some(w) = web::window() else { return };
    if let Some(cb) = tick.borrow().as_ref() {
        pending.set(w.request_animation_frame(cb.as_ref().unchecked_ref()).ok());
    }
}

pub fn start_loop(frame_ctx: FrameContext) -> FrameLoop {
    let tick: TickSlot = Rc::new(RefCell::new(None));
    let pending = Rc::new(Cell::new(None));
    let tick_clone = tick.clone();
    let pending_clone = pending.clone();
    let mut frame_ctx = frame_ctx;
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_clone.set(None);
        frame_ctx.frame();
        request(&tick_clone, &pending_clone);
    }) as Box<dyn FnMut()>));
    request(&tick, &pending);
    FrameLoop { tick, pending }
}
