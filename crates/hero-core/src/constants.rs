// Shared tuning constants for the hero sequence.
//
// Progress thresholds are fixed tunables; they are not derived from one another.

// Viewport
pub const COMPACT_BREAKPOINT_PX: f64 = 768.0; // widths below this are `Compact`
pub const PIN_DISTANCE_VIEWPORTS: f64 = 4.0; // virtual scroll distance in viewport heights

// Cube edge length per size class (px)
pub const CUBE_SIZE_REGULAR_PX: f32 = 120.0;
pub const CUBE_SIZE_COMPACT_PX: f32 = 80.0;

// Branding / logo
pub const BRANDING_BLUR_RATE: f32 = 20.0; // t1 = min(p * rate, 1)
pub const BRANDING_BLUR_MAX_PX: f32 = 20.0;
pub const BRANDING_FADE_START: f32 = 0.02;
pub const BRANDING_FADE_RATE: f32 = 100.0;

// Cube container
pub const CUBES_REVEAL_START: f32 = 0.01; // strict: container stays hidden at exactly this p
pub const CUBES_REVEAL_RATE: f32 = 100.0;

// Primary heading
pub const PRIMARY_RATE: f32 = 2.5;
pub const PRIMARY_SCALE_FROM: f32 = 1.0;
pub const PRIMARY_SCALE_TO: f32 = 1.5;
pub const PRIMARY_BLUR_MAX_PX: f32 = 20.0;

// Secondary heading + paragraph
pub const SECONDARY_START: f32 = 0.4;
pub const SECONDARY_RATE: f32 = 10.0;
pub const SECONDARY_SCALE_FROM: f32 = 0.75;
pub const SECONDARY_SCALE_TO: f32 = 1.0;
pub const SECONDARY_BLUR_FROM_PX: f32 = 10.0;

// Cube motion
pub const PHASE_ONE_RATE: f32 = 2.0; // t6 = min(p * rate, 1)
pub const PHASE_TWO_START: f32 = 0.5;
pub const PHASE_TWO_RATE: f32 = 2.0;
pub const SPIN_DEGREES: f32 = 180.0;
pub const COMPACT_START_Y_DAMPING: f32 = 0.8; // applied to start.y_pos when an override exists

// Driver
pub const SMOOTHING_RETRY_DELAY_MS: u32 = 100; // single re-check for a late smoothing layer
pub const LAYOUT_RETRY_DELAY_MS: u32 = 200; // one delayed re-init after layout settles
