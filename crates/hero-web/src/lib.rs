#![cfg(target_arch = "wasm32")]
use hero_core::{
    ConfigTable, DriverState, HeroSettings, MountRegistry, MountTicket, ProgressSink,
    ScrollDriver, SharedMount, LAYOUT_RETRY_DELAY_MS,
};
use instant::Instant;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod constants;
mod cube;
mod dom;
mod events;
mod frame;
mod pin;
mod scene;
mod smooth;

use pin::NativePin;
use scene::HeroScene;

type Driver = Rc<RefCell<ScrollDriver<NativePin>>>;

struct Mounted {
    driver: Driver,
    resize: events::WindowListener,
    frames: frame::FrameLoop,
}

impl Drop for Mounted {
    fn drop(&mut self) {
        self.resize.remove();
        match self.driver.try_borrow_mut() {
            Ok(mut d) => d.dispose(),
            Err(_) => log::error!("[driver] busy during teardown; dispose skipped"),
        }
        self.frames.stop();
    }
}

/// JS-visible handle to a mounted hero. `dispose` (or `free`) detaches every
/// listener.
#[wasm_bindgen]
pub struct HeroHandle {
    mount: SharedMount<Mounted>,
}

#[wasm_bindgen]
impl HeroHandle {
    pub fn dispose(&mut self) {
        let taken = self.mount.borrow_mut().take();
        drop(taken);
    }

    #[wasm_bindgen(getter)]
    pub fn progress(&self) -> f64 {
        self.mount
            .borrow()
            .as_ref()
            .map(|m| m.driver.borrow().progress())
            .unwrap_or(0.0)
    }
}

impl Drop for HeroHandle {
    fn drop(&mut self) {
        self.dispose();
    }
}

thread_local! {
    static MOUNTS: RefCell<MountRegistry<Mounted>> = RefCell::new(MountRegistry::new());
}

fn release_current() {
    let previous = MOUNTS.with(|m| m.borrow_mut().release());
    drop(previous);
}

fn install(ticket: MountTicket, mounted: Mounted) -> Option<SharedMount<Mounted>> {
    match MOUNTS.with(|m| m.borrow_mut().install(ticket, mounted)) {
        Ok(slot) => Some(slot),
        Err(stale) => {
            log::info!("[scene] mount superseded; discarding");
            drop(stale);
            None
        }
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("hero-web starting");

    let ticket = MOUNTS.with(|m| m.borrow().ticket());
    spawn_local(async move {
        if let Err(e) = mount_when_ready(ticket).await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Mount on demand from JS, replacing any hero already mounted. Returns
/// `undefined` when the hero markup is missing.
#[wasm_bindgen]
pub fn mount() -> Option<HeroHandle> {
    release_current();
    let ticket = MOUNTS.with(|m| m.borrow().ticket());
    match try_mount() {
        Ok(Some(mounted)) => install(ticket, mounted).map(|mount| HeroHandle { mount }),
        Ok(None) => None,
        Err(e) => {
            log::error!("mount error: {:?}", e);
            None
        }
    }
}

/// Tear down the current hero and cancel a mount still waiting on its retry.
#[wasm_bindgen]
pub fn unmount() {
    release_current();
}

async fn mount_when_ready(ticket: MountTicket) -> anyhow::Result<()> {
    if let Some(mounted) = try_mount()? {
        install(ticket, mounted);
        return Ok(());
    }
    log::info!(
        "[scene] hero elements not attached yet; retrying in {}ms",
        LAYOUT_RETRY_DELAY_MS
    );
    dom::sleep_ms(LAYOUT_RETRY_DELAY_MS).await;
    if !MOUNTS.with(|m| m.borrow().is_current(ticket)) {
        log::info!("[scene] auto-mount cancelled");
        return Ok(());
    }
    match try_mount()? {
        Some(mounted) => {
            install(ticket, mounted);
        }
        None => log::warn!("[scene] hero elements never attached; animation disabled"),
    }
    Ok(())
}

fn try_mount() -> anyhow::Result<Option<Mounted>> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let (Some(scene), Some(pin)) = (
        HeroScene::query(&document, ConfigTable::reference()),
        NativePin::query(&document),
    ) else {
        return Ok(None);
    };
    scene.attach_faces(&document);

    let settings = HeroSettings::default();
    let viewport = dom::viewport()?;
    let sink: Rc<RefCell<dyn ProgressSink>> = Rc::new(RefCell::new(scene));
    let driver: Driver = Rc::new(RefCell::new(ScrollDriver::new(
        pin,
        Box::new(smooth::try_create),
        sink,
        settings.clone(),
        viewport,
    )));

    activate(&driver, &settings);
    let resize = match events::wire_resize(driver.clone()) {
        Ok(listener) => listener,
        Err(e) => {
            driver.borrow_mut().dispose();
            return Err(e);
        }
    };
    let frames = frame::start_loop(frame::FrameContext {
        driver: driver.clone(),
        started: Instant::now(),
    });

    // Late images and fonts shift layout; re-pin once it has settled.
    let settle = driver.clone();
    let settle_settings = settings.clone();
    spawn_local(async move {
        dom::sleep_ms(LAYOUT_RETRY_DELAY_MS).await;
        if settle.borrow().state() != DriverState::Disposed {
            activate(&settle, &settle_settings);
        }
    });

    Ok(Some(Mounted {
        driver,
        resize,
        frames,
    }))
}

fn activate(driver: &Driver, settings: &HeroSettings) {
    if driver.borrow_mut().activate() != DriverState::Pending {
        return;
    }
    let retry = driver.clone();
    let delay = settings.smoothing_retry_ms;
    spawn_local(async move {
        dom::sleep_ms(delay).await;
        retry.borrow_mut().retry_pending();
    });
}
