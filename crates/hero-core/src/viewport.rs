use crate::constants::{
    COMPACT_BREAKPOINT_PX, CUBE_SIZE_COMPACT_PX, CUBE_SIZE_REGULAR_PX, PIN_DISTANCE_VIEWPORTS,
    SMOOTHING_RETRY_DELAY_MS,
};

/// Binary viewport width class.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SizeClass {
    Compact,
    #[default]
    Regular,
}

impl SizeClass {
    /// Classify a logical viewport width against `breakpoint`.
    #[inline]
    pub fn from_width(width: f64, breakpoint: f64) -> Self {
        if width < breakpoint {
            SizeClass::Compact
        } else {
            SizeClass::Regular
        }
    }

    /// Cube edge length in px.
    #[inline]
    pub fn cube_size(self) -> f32 {
        match self {
            SizeClass::Compact => CUBE_SIZE_COMPACT_PX,
            SizeClass::Regular => CUBE_SIZE_REGULAR_PX,
        }
    }
}

/// Runtime knobs handed to the driver. Defaults come from `constants`.
#[derive(Clone, Debug, PartialEq)]
pub struct HeroSettings {
    pub breakpoint_px: f64,
    pub distance_viewports: f64,
    pub smoothing_retry_ms: u32,
}

impl Default for HeroSettings {
    fn default() -> Self {
        Self {
            breakpoint_px: COMPACT_BREAKPOINT_PX,
            distance_viewports: PIN_DISTANCE_VIEWPORTS,
            smoothing_retry_ms: SMOOTHING_RETRY_DELAY_MS,
        }
    }
}

/// Snapshot of the viewport the driver was last laid out for.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn size_class(&self, settings: &HeroSettings) -> SizeClass {
        SizeClass::from_width(self.width, settings.breakpoint_px)
    }

    /// Virtual scroll distance consumed while pinned.
    pub fn pin_distance(&self, settings: &HeroSettings) -> f64 {
        let d = self.height * settings.distance_viewports;
        if d.is_finite() {
            d.max(0.0)
        } else {
            0.0
        }
    }
}
