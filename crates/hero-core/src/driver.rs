//! Scroll-progress driver.
//!
//! The driver owns the pin controller and (optionally) a smoothing layer and
//! forwards clamped progress into a [`ProgressSink`]. All collaborators are
//! traits so the state machine runs the same on the host and in the browser.
//!
//! Frame order is fixed: advance the smoothing layer, then resample the pin
//! (only if the smoothing layer reported a scroll), then emit progress.

use crate::progress::clamp_progress;
use crate::viewport::{HeroSettings, SizeClass, Viewport};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

pub type ScrollCallback = Box<dyn FnMut(f64)>;
pub type ProgressCallback = Box<dyn FnMut(f64)>;
/// Attempts to construct the smoothing layer; `None` while its script is still loading.
pub type SmoothFactory = Box<dyn FnMut() -> Option<Box<dyn SmoothScroll>>>;

/// Inertial scroll layer sitting between raw input and listeners.
pub trait SmoothScroll {
    /// Register the "scroll changed" notification; the argument is the scroll offset in px.
    fn on_scroll(&mut self, callback: ScrollCallback);
    /// Per-frame pump.
    fn advance(&mut self, time_ms: f64);
    fn dispose(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinOptions {
    pub distance_px: f64,
    /// Listen to native scroll events directly (no smoothing layer present).
    pub native_scroll: bool,
}

/// Pins the trigger region and reports progress through it.
pub trait PinController {
    fn create_pin(&mut self, options: PinOptions, on_progress: ProgressCallback);
    /// Resample the scroll position and report progress.
    fn update(&mut self);
    /// Re-anchor pin geometry for a new distance, keeping `keep_progress` on screen.
    fn refresh(&mut self, distance_px: f64, keep_progress: f64);
    fn kill_all(&mut self);
}

/// Receiver of progress, typically the scene that writes styles.
pub trait ProgressSink {
    fn apply(&mut self, progress: f64);
    fn set_size_class(&mut self, size_class: SizeClass);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    /// Waiting for the single re-check of the smoothing layer.
    Pending,
    Active { smoothed: bool },
    Disposed,
}

pub struct ScrollDriver<P: PinController> {
    pin: P,
    smooth: Option<Box<dyn SmoothScroll>>,
    make_smooth: SmoothFactory,
    sink: Rc<RefCell<dyn ProgressSink>>,
    settings: HeroSettings,
    viewport: Viewport,
    state: DriverState,
    smoothing_retried: bool,
    // Generation flag shared with the callbacks of the current activation.
    live: Rc<Cell<bool>>,
    progress: Rc<Cell<f64>>,
    scrolled: Rc<Cell<bool>>,
}

impl<P: PinController> ScrollDriver<P> {
    pub fn new(
        pin: P,
        make_smooth: SmoothFactory,
        sink: Rc<RefCell<dyn ProgressSink>>,
        settings: HeroSettings,
        viewport: Viewport,
    ) -> Self {
        Self {
            pin,
            smooth: None,
            make_smooth,
            sink,
            settings,
            viewport,
            state: DriverState::Idle,
            smoothing_retried: false,
            live: Rc::new(Cell::new(false)),
            progress: Rc::new(Cell::new(0.0)),
            scrolled: Rc::new(Cell::new(false)),
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn progress(&self) -> f64 {
        self.progress.get()
    }

    pub fn size_class(&self) -> SizeClass {
        self.viewport.size_class(&self.settings)
    }

    pub fn distance(&self) -> f64 {
        self.viewport.pin_distance(&self.settings)
    }

    pub fn pin(&self) -> &P {
        &self.pin
    }

    /// (Re)activate. Any previous pin, listener or smoothing instance is torn
    /// down first. Returns `Pending` when the smoothing layer is not loaded yet
    /// and the caller should schedule [`ScrollDriver::retry_pending`] once.
    pub fn activate(&mut self) -> DriverState {
        if self.state == DriverState::Disposed {
            log::warn!("[driver] activate after dispose ignored");
            return self.state;
        }
        self.teardown();
        match (self.make_smooth)() {
            Some(smooth) => self.start(Some(smooth)),
            None if !self.smoothing_retried => {
                self.smoothing_retried = true;
                self.state = DriverState::Pending;
                log::info!(
                    "[driver] smoothing layer not loaded; re-checking in {}ms",
                    self.settings.smoothing_retry_ms
                );
            }
            None => self.start(None),
        }
        self.state
    }

    /// The single scheduled re-check. Activates with smoothing if it has
    /// loaded by now, otherwise falls back to native scroll.
    pub fn retry_pending(&mut self) -> DriverState {
        if self.state != DriverState::Pending {
            return self.state;
        }
        let smooth = (self.make_smooth)();
        if smooth.is_none() {
            log::warn!("[driver] smoothing layer still missing; using native scroll");
        }
        self.start(smooth);
        self.state
    }

    fn start(&mut self, smooth: Option<Box<dyn SmoothScroll>>) {
        self.live = Rc::new(Cell::new(true));
        self.scrolled.set(false);
        let smoothed = smooth.is_some();

        {
            let mut sink = self.sink.borrow_mut();
            sink.set_size_class(self.size_class());
            sink.apply(self.progress.get());
        }

        let live = self.live.clone();
        let progress = self.progress.clone();
        let sink = self.sink.clone();
        let options = PinOptions {
            distance_px: self.distance(),
            native_scroll: !smoothed,
        };
        self.pin.create_pin(
            options,
            Box::new(move |p| {
                if !live.get() {
                    return;
                }
                let p = clamp_progress(p);
                progress.set(p);
                sink.borrow_mut().apply(p);
            }),
        );

        if let Some(mut s) = smooth {
            let live = self.live.clone();
            let scrolled = self.scrolled.clone();
            s.on_scroll(Box::new(move |_offset| {
                if live.get() {
                    scrolled.set(true);
                }
            }));
            self.smooth = Some(s);
        }
        self.state = DriverState::Active { smoothed };
        log::info!(
            "[driver] active smoothed={} distance={:.0}px class={:?}",
            smoothed,
            options.distance_px,
            self.size_class()
        );
    }

    /// Per-frame tick: pump the smoothing layer, then resample if it scrolled.
    pub fn frame(&mut self, time_ms: f64) {
        if !matches!(self.state, DriverState::Active { .. }) {
            return;
        }
        if let Some(s) = self.smooth.as_mut() {
            s.advance(time_ms);
            if self.scrolled.replace(false) {
                self.pin.update();
            }
        }
    }

    /// Viewport changed. Re-anchors the pin for the new distance and re-applies
    /// the current progress under the (possibly new) size class.
    pub fn resize(&mut self, viewport: Viewport) {
        let old_class = self.size_class();
        let old_distance = self.distance();
        self.viewport = viewport;
        if !matches!(self.state, DriverState::Active { .. }) {
            return;
        }
        let class = self.size_class();
        let distance = self.distance();
        if distance != old_distance {
            self.pin.refresh(distance, self.progress.get());
        }
        // refresh resamples; the pin may have landed short of the requested p
        let p = self.progress.get();
        let mut sink = self.sink.borrow_mut();
        if class != old_class {
            log::info!("[driver] size class {:?} -> {:?}", old_class, class);
            sink.set_size_class(class);
        }
        sink.apply(p);
    }

    /// Release the pin and the smoothing layer. Terminal.
    pub fn dispose(&mut self) {
        self.teardown();
        self.state = DriverState::Disposed;
        log::info!("[driver] disposed");
    }

    fn teardown(&mut self) {
        self.live.set(false);
        if let Some(mut s) = self.smooth.take() {
            s.dispose();
        }
        self.pin.kill_all();
    }
}
