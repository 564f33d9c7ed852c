//! Progress to concrete style values.
//!
//! [`map_state`] is pure: the same `(p, size_class, table)` always yields the
//! same [`StyleSet`]. Every derived phase variable is clamped to [0, 1] on its
//! own so blur and opacity stay monotonic even for jittery input.

use crate::config::{AnimationConfig, ConfigTable, PositionState};
use crate::constants::*;
use crate::progress::clamp_progress;
use crate::viewport::SizeClass;
use smallvec::SmallVec;

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

#[inline]
fn unit(t: f32) -> f32 {
    if t.is_nan() {
        0.0
    } else {
        t.clamp(0.0, 1.0)
    }
}

/// Derived phase variables for one progress value.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Phases {
    pub branding_blur: f32,
    pub branding_fade: f32,
    pub cubes_reveal: f32,
    pub primary: f32,
    pub secondary: f32,
    /// Position and rotation interpolation.
    pub flight: f32,
    /// Extra Y spin after the cubes land.
    pub spin: f32,
}

impl Phases {
    pub fn at(p: f64) -> Self {
        let p = clamp_progress(p) as f32;
        let branding_fade = if p >= BRANDING_FADE_START {
            (p - BRANDING_FADE_START) * BRANDING_FADE_RATE
        } else {
            0.0
        };
        let cubes_reveal = if p > CUBES_REVEAL_START {
            (p - CUBES_REVEAL_START) * CUBES_REVEAL_RATE
        } else {
            0.0
        };
        let spin = if p >= PHASE_TWO_START {
            (p - PHASE_TWO_START) * PHASE_TWO_RATE
        } else {
            0.0
        };
        Self {
            branding_blur: unit(p * BRANDING_BLUR_RATE),
            branding_fade: unit(branding_fade),
            cubes_reveal: unit(cubes_reveal),
            primary: unit(p * PRIMARY_RATE),
            secondary: unit((p - SECONDARY_START) * SECONDARY_RATE),
            flight: unit(p * PHASE_ONE_RATE),
            spin: unit(spin),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FadeStyle {
    pub opacity: f32,
    pub blur_px: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextStyle {
    pub scale: f32,
    pub blur_px: f32,
    pub opacity: f32,
}

/// Placement and 3D orientation of one cube. `index` is the position of its
/// config in the table.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeStyle {
    pub index: usize,
    pub top_pct: f32,
    pub left_pct: f32,
    pub x_angle: f32,
    pub y_angle: f32,
    pub z_angle: f32,
    pub depth: f32,
    pub size_px: f32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct StyleSet {
    pub branding: FadeStyle,
    pub cubes_opacity: f32,
    pub primary: TextStyle,
    pub secondary: TextStyle,
    pub cubes: SmallVec<[CubeStyle; 8]>,
}

pub fn map_state(p: f64, size_class: SizeClass, table: &ConfigTable) -> StyleSet {
    let ph = Phases::at(p);
    let cubes = table
        .iter()
        .enumerate()
        .map(|(index, cfg)| map_cube(index, cfg, &ph, size_class, table))
        .collect();
    StyleSet {
        branding: FadeStyle {
            opacity: 1.0 - ph.branding_fade,
            blur_px: lerp(0.0, BRANDING_BLUR_MAX_PX, ph.branding_blur),
        },
        cubes_opacity: ph.cubes_reveal,
        primary: TextStyle {
            scale: lerp(PRIMARY_SCALE_FROM, PRIMARY_SCALE_TO, ph.primary),
            blur_px: lerp(0.0, PRIMARY_BLUR_MAX_PX, ph.primary),
            opacity: 1.0 - ph.primary,
        },
        secondary: TextStyle {
            scale: lerp(SECONDARY_SCALE_FROM, SECONDARY_SCALE_TO, ph.secondary),
            blur_px: lerp(SECONDARY_BLUR_FROM_PX, 0.0, ph.secondary),
            opacity: ph.secondary,
        },
        cubes,
    }
}

fn map_cube(
    index: usize,
    cfg: &AnimationConfig,
    ph: &Phases,
    size_class: SizeClass,
    table: &ConfigTable,
) -> CubeStyle {
    let (start, end) = match table.override_for(&cfg.id, size_class) {
        Some(dest) => (
            PositionState {
                y_pos: cfg.start.y_pos * COMPACT_START_Y_DAMPING,
                ..cfg.start
            },
            PositionState {
                y_pos: dest.vertical,
                x_pos: dest.horizontal,
                ..cfg.end
            },
        ),
        None => (cfg.start, cfg.end),
    };
    let at = start.lerp(&end, ph.flight);
    let extra_spin = cfg.spin.sign() * lerp(0.0, SPIN_DEGREES, ph.spin);
    CubeStyle {
        index,
        top_pct: at.y_pos,
        left_pct: at.x_pos,
        x_angle: at.x_angle,
        y_angle: at.y_angle + extra_spin,
        z_angle: at.z_angle,
        depth: at.depth,
        size_px: size_class.cube_size(),
    }
}

// ---------------- CSS rendering ----------------

#[inline]
pub fn blur_css(px: f32) -> String {
    format!("blur({:.2}px)", px.max(0.0))
}

impl FadeStyle {
    pub fn filter_css(&self) -> String {
        blur_css(self.blur_px)
    }
}

impl TextStyle {
    pub fn filter_css(&self) -> String {
        blur_css(self.blur_px)
    }

    pub fn transform_css(&self) -> String {
        format!("scale({:.4})", self.scale)
    }
}

impl CubeStyle {
    /// Centre on the anchor, push back by depth, then rotate X, Y, Z in that order.
    pub fn transform_css(&self) -> String {
        format!(
            "translate3d(-50%, -50%, {:.2}px) rotateX({:.3}deg) rotateY({:.3}deg) rotateZ({:.3}deg)",
            self.depth, self.x_angle, self.y_angle, self.z_angle
        )
    }

    pub fn top_css(&self) -> String {
        format!("{:.3}%", self.top_pct)
    }

    pub fn left_css(&self) -> String {
        format!("{:.3}%", self.left_pct)
    }
}
