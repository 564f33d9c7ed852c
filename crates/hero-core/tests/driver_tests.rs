// Host-side tests for the scroll driver state machine using recording fakes
// in place of the browser collaborators.

use hero_core::*;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Log = Rc<RefCell<Vec<String>>>;

#[derive(Default)]
struct FakePin {
    log: Log,
    // progress the fake reports on the next update
    offset_progress: Rc<Cell<f64>>,
    callback: Rc<RefCell<Option<ProgressCallback>>>,
    // progress refresh() lands on, e.g. when the restored offset is clamped
    refresh_lands_at: Rc<Cell<Option<f64>>>,
    options: Option<PinOptions>,
    pins_created: usize,
}

impl FakePin {
    fn emit(&mut self, p: f64) {
        if let Some(cb) = self.callback.borrow_mut().as_mut() {
            cb(p);
        }
    }
}

impl PinController for FakePin {
    fn create_pin(&mut self, options: PinOptions, on_progress: ProgressCallback) {
        self.log.borrow_mut().push(format!(
            "pin:create native={} d={}",
            options.native_scroll, options.distance_px
        ));
        self.options = Some(options);
        *self.callback.borrow_mut() = Some(on_progress);
        self.pins_created += 1;
    }

    fn update(&mut self) {
        self.log.borrow_mut().push("pin:update".into());
        let p = self.offset_progress.get();
        self.emit(p);
    }

    fn refresh(&mut self, distance_px: f64, keep_progress: f64) {
        self.log
            .borrow_mut()
            .push(format!("pin:refresh d={} p={}", distance_px, keep_progress));
        if let Some(p) = self.refresh_lands_at.get() {
            self.emit(p);
        }
    }

    fn kill_all(&mut self) {
        self.log.borrow_mut().push("pin:kill".into());
    }
}

struct FakeSmooth {
    log: Log,
    callback: Rc<RefCell<Option<ScrollCallback>>>,
    // scroll each advance() reports, None for a frame with no movement
    next_scroll: Rc<Cell<Option<f64>>>,
}

impl SmoothScroll for FakeSmooth {
    fn on_scroll(&mut self, callback: ScrollCallback) {
        self.log.borrow_mut().push("smooth:subscribe".into());
        *self.callback.borrow_mut() = Some(callback);
    }

    fn advance(&mut self, time_ms: f64) {
        self.log.borrow_mut().push(format!("smooth:advance {}", time_ms));
        if let Some(offset) = self.next_scroll.take() {
            if let Some(cb) = self.callback.borrow_mut().as_mut() {
                cb(offset);
            }
        }
    }

    fn dispose(&mut self) {
        self.log.borrow_mut().push("smooth:dispose".into());
    }
}

#[derive(Default)]
struct RecordingSink {
    applied: Vec<f64>,
    classes: Vec<SizeClass>,
    styles: Vec<StyleSet>,
    table: Option<ConfigTable>,
    class: SizeClass,
}

impl ProgressSink for RecordingSink {
    fn apply(&mut self, progress: f64) {
        self.applied.push(progress);
        if let Some(t) = &self.table {
            self.styles.push(map_state(progress, self.class, t));
        }
    }

    fn set_size_class(&mut self, size_class: SizeClass) {
        self.class = size_class;
        self.classes.push(size_class);
    }
}

struct Harness {
    log: Log,
    sink: Rc<RefCell<RecordingSink>>,
    next_scroll: Rc<Cell<Option<f64>>>,
    smooth_callback: Rc<RefCell<Option<ScrollCallback>>>,
    pin_callback: Rc<RefCell<Option<ProgressCallback>>>,
    pin_progress: Rc<Cell<f64>>,
    refresh_lands_at: Rc<Cell<Option<f64>>>,
    // how many factory calls return None before the layer "loads"
    missing_for: Rc<Cell<usize>>,
    factory_calls: Rc<Cell<usize>>,
}

impl Harness {
    fn new(missing_for: usize) -> Self {
        let sink = RecordingSink {
            table: Some(ConfigTable::reference()),
            ..Default::default()
        };
        Self {
            log: Rc::new(RefCell::new(Vec::new())),
            sink: Rc::new(RefCell::new(sink)),
            next_scroll: Rc::new(Cell::new(None)),
            smooth_callback: Rc::new(RefCell::new(None)),
            pin_callback: Rc::new(RefCell::new(None)),
            pin_progress: Rc::new(Cell::new(0.0)),
            refresh_lands_at: Rc::new(Cell::new(None)),
            missing_for: Rc::new(Cell::new(missing_for)),
            factory_calls: Rc::new(Cell::new(0)),
        }
    }

    fn driver(&self, viewport: Viewport) -> ScrollDriver<FakePin> {
        let pin = FakePin {
            log: self.log.clone(),
            offset_progress: self.pin_progress.clone(),
            callback: self.pin_callback.clone(),
            refresh_lands_at: self.refresh_lands_at.clone(),
            ..Default::default()
        };
        let log = self.log.clone();
        let next_scroll = self.next_scroll.clone();
        let callback = self.smooth_callback.clone();
        let missing_for = self.missing_for.clone();
        let calls = self.factory_calls.clone();
        let factory: SmoothFactory = Box::new(move || {
            calls.set(calls.get() + 1);
            if missing_for.get() > 0 {
                missing_for.set(missing_for.get() - 1);
                return None;
            }
            Some(Box::new(FakeSmooth {
                log: log.clone(),
                callback: callback.clone(),
                next_scroll: next_scroll.clone(),
            }) as Box<dyn SmoothScroll>)
        });
        let sink: Rc<RefCell<dyn ProgressSink>> = self.sink.clone();
        ScrollDriver::new(pin, factory, sink, HeroSettings::default(), viewport)
    }

    fn take_log(&self) -> Vec<String> {
        std::mem::take(&mut *self.log.borrow_mut())
    }
}

fn desktop() -> Viewport {
    Viewport::new(1440.0, 900.0)
}

#[test]
fn activates_with_smoothing_and_pins_four_viewports() {
    let h = Harness::new(0);
    let mut d = h.driver(desktop());
    assert_eq!(d.activate(), DriverState::Active { smoothed: true });
    let log = h.take_log();
    assert!(log.contains(&"pin:create native=false d=3600".to_string()), "{log:?}");
    assert!(log.contains(&"smooth:subscribe".to_string()));
    // initial paint at p = 0 under the desktop class
    assert_eq!(h.sink.borrow().applied, vec![0.0]);
    assert_eq!(h.sink.borrow().classes, vec![SizeClass::Regular]);
}

#[test]
fn frame_pumps_smoothing_before_resampling() {
    let h = Harness::new(0);
    let mut d = h.driver(desktop());
    d.activate();
    h.take_log();

    h.pin_progress.set(0.25);
    h.next_scroll.set(Some(900.0));
    d.frame(16.0);
    assert_eq!(h.take_log(), vec!["smooth:advance 16", "pin:update"]);
    assert_eq!(d.progress(), 0.25);
    assert_eq!(h.sink.borrow().applied.last(), Some(&0.25));
}

#[test]
fn quiet_frames_do_not_resample() {
    let h = Harness::new(0);
    let mut d = h.driver(desktop());
    d.activate();
    h.take_log();
    d.frame(16.0);
    d.frame(32.0);
    assert_eq!(h.take_log(), vec!["smooth:advance 16", "smooth:advance 32"]);
    assert_eq!(h.sink.borrow().applied.len(), 1);
}

#[test]
fn progress_from_pin_is_clamped() {
    let h = Harness::new(0);
    let mut d = h.driver(desktop());
    d.activate();
    h.pin_progress.set(1.07);
    h.next_scroll.set(Some(1.0));
    d.frame(16.0);
    assert_eq!(d.progress(), 1.0);
    h.pin_progress.set(-0.02);
    h.next_scroll.set(Some(1.0));
    d.frame(32.0);
    assert_eq!(d.progress(), 0.0);
}

#[test]
fn missing_smoothing_waits_for_single_retry() {
    let h = Harness::new(1);
    let mut d = h.driver(desktop());
    assert_eq!(d.activate(), DriverState::Pending);
    assert!(h.take_log().iter().all(|l| !l.starts_with("pin:create")));
    assert_eq!(d.retry_pending(), DriverState::Active { smoothed: true });
    assert_eq!(h.factory_calls.get(), 2);
}

#[test]
fn smoothing_still_missing_degrades_to_native_scroll() {
    let h = Harness::new(usize::MAX);
    let mut d = h.driver(desktop());
    assert_eq!(d.activate(), DriverState::Pending);
    assert_eq!(d.retry_pending(), DriverState::Active { smoothed: false });
    assert!(d.pin().options.is_some_and(|o| o.native_scroll));
    // a second retry is a no-op
    assert_eq!(d.retry_pending(), DriverState::Active { smoothed: false });
    assert_eq!(h.factory_calls.get(), 2);
    // native scroll events drive progress through the pin directly
    d.frame(16.0);
    assert!(h.take_log().iter().all(|l| l != "pin:update"));
}

#[test]
fn reactivation_discards_previous_listeners() {
    let h = Harness::new(0);
    let mut d = h.driver(desktop());
    d.activate();
    let stale = h.smooth_callback.borrow_mut().take();
    h.take_log();

    d.activate();
    let log = h.take_log();
    assert_eq!(&log[..2], &["smooth:dispose", "pin:kill"]);
    assert_eq!(log.iter().filter(|l| l.starts_with("pin:create")).count(), 1);
    assert_eq!(d.pin().pins_created, 2);

    // the old subscription must not mark the new activation as scrolled
    if let Some(mut cb) = stale {
        cb(500.0);
    }
    d.frame(16.0);
    assert_eq!(h.take_log(), vec!["smooth:advance 16"]);
}

#[test]
fn resize_to_compact_keeps_progress_and_reanchors() {
    let h = Harness::new(0);
    let mut d = h.driver(desktop());
    d.activate();
    h.pin_progress.set(0.3);
    h.next_scroll.set(Some(1.0));
    d.frame(16.0);
    h.take_log();

    d.resize(Viewport::new(390.0, 844.0));
    assert_eq!(d.size_class(), SizeClass::Compact);
    assert_eq!(d.progress(), 0.3);
    assert_eq!(h.take_log(), vec!["pin:refresh d=3376 p=0.3"]);

    let sink = h.sink.borrow();
    assert_eq!(sink.classes, vec![SizeClass::Regular, SizeClass::Compact]);
    assert_eq!(sink.applied.last(), Some(&0.3));
    let table = ConfigTable::reference();
    assert_eq!(
        sink.styles.last(),
        Some(&map_state(0.3, SizeClass::Compact, &table))
    );
}

#[test]
fn resize_applies_progress_the_refreshed_pin_reports() {
    let h = Harness::new(0);
    let mut d = h.driver(desktop());
    d.activate();
    h.pin_progress.set(0.9);
    h.next_scroll.set(Some(1.0));
    d.frame(16.0);

    h.refresh_lands_at.set(Some(0.85));
    d.resize(Viewport::new(1440.0, 700.0));
    assert_eq!(d.progress(), 0.85);
    let sink = h.sink.borrow();
    assert_eq!(sink.applied.last(), Some(&0.85));
    assert!(!sink.applied.ends_with(&[0.85, 0.9]));
}

#[test]
fn width_only_resize_within_class_does_not_refresh_pin() {
    let h = Harness::new(0);
    let mut d = h.driver(desktop());
    d.activate();
    h.take_log();
    d.resize(Viewport::new(1200.0, 900.0));
    assert!(h.take_log().is_empty());
    assert_eq!(h.sink.borrow().classes.len(), 1);
}

#[test]
fn dispose_tears_everything_down_and_silences_callbacks() {
    let h = Harness::new(0);
    let mut d = h.driver(desktop());
    d.activate();
    h.take_log();
    d.dispose();
    let log = h.take_log();
    assert!(log.contains(&"smooth:dispose".to_string()));
    assert!(log.contains(&"pin:kill".to_string()));
    assert_eq!(d.state(), DriverState::Disposed);

    let applied_before = h.sink.borrow().applied.len();
    // late events from the pin and the smoothing layer
    if let Some(cb) = h.pin_callback.borrow_mut().as_mut() {
        cb(0.9);
    }
    if let Some(cb) = h.smooth_callback.borrow_mut().as_mut() {
        cb(1234.0);
    }
    d.frame(16.0);
    d.resize(Viewport::new(390.0, 844.0));
    assert_eq!(h.sink.borrow().applied.len(), applied_before);
    assert_eq!(d.activate(), DriverState::Disposed);
}

#[test]
fn stale_pin_callback_after_dispose_is_inert() {
    let h = Harness::new(0);
    let mut d = h.driver(desktop());
    d.activate();
    d.dispose();
    let before = h.sink.borrow().applied.len();
    // the fake pin keeps the callback alive after kill_all
    if let Some(cb) = h.pin_callback.borrow_mut().as_mut() {
        cb(0.8);
    }
    assert_eq!(h.sink.borrow().applied.len(), before);
    assert_eq!(d.progress(), 0.0);
}
