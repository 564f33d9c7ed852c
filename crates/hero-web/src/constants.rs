// DOM contract and web-only tuning

// Required elements
pub const PIN_TRIGGER_ID: &str = "hero-pin"; // tall scroll track
pub const PIN_STAGE_ID: &str = "hero-stage"; // sticky viewport-sized child of the track
pub const LOGO_ID: &str = "hero-logo";
pub const HEADING_ID: &str = "hero-heading";
pub const SUBHEADING_ID: &str = "hero-subheading";
pub const CUBES_ID: &str = "hero-cubes";

// Cubes are matched to config entries by this attribute
pub const CUBE_ID_ATTR: &str = "data-cube-id";
// Set once faces have been attached
pub const FACES_MARKER_ATTR: &str = "data-faces";
pub const FACE_ATTR: &str = "data-face";

pub const FACE_IMAGES: &[&str] = &[
    "/cube1.png",
    "/cube2.png",
    "/cube3.png",
    "/cube4.png",
    "/cube5.png",
];

// Smoothing layer
pub const SMOOTH_GLOBAL: &str = "Lenis";
pub const SMOOTH_LERP: f64 = 0.1; // per-frame approach factor
