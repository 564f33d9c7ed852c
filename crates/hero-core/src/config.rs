//! Per-element animation configuration.
//!
//! A [`ConfigTable`] is built once (usually [`ConfigTable::reference`]) and is
//! read-only afterwards. It knows nothing about the DOM; the web front-end
//! matches entries to elements by id.

use crate::viewport::SizeClass;
use fnv::FnvHashMap;
use glam::{Vec2, Vec3};
use thiserror::Error;

/// One end of a cube's flight: placement inside the container plus rotation
/// and depth along the view axis.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PositionState {
    /// Vertical offset, percent of the container height.
    pub y_pos: f32,
    /// Horizontal offset, percent of the container width.
    pub x_pos: f32,
    pub x_angle: f32,
    pub y_angle: f32,
    pub z_angle: f32,
    /// Translation along the view axis in px; negative is away from the camera.
    pub depth: f32,
}

impl PositionState {
    pub const fn new(
        y_pos: f32,
        x_pos: f32,
        x_angle: f32,
        y_angle: f32,
        z_angle: f32,
        depth: f32,
    ) -> Self {
        Self {
            y_pos,
            x_pos,
            x_angle,
            y_angle,
            z_angle,
            depth,
        }
    }

    #[inline]
    fn placement(&self) -> Vec2 {
        Vec2::new(self.y_pos, self.x_pos)
    }

    #[inline]
    fn angles(&self) -> Vec3 {
        Vec3::new(self.x_angle, self.y_angle, self.z_angle)
    }

    /// Field-wise linear interpolation towards `to`.
    pub fn lerp(&self, to: &PositionState, t: f32) -> PositionState {
        let placement = self.placement().lerp(to.placement(), t);
        let angles = self.angles().lerp(to.angles(), t);
        PositionState {
            y_pos: placement.x,
            x_pos: placement.y,
            x_angle: angles.x,
            y_angle: angles.y,
            z_angle: angles.z,
            depth: self.depth + (to.depth - self.depth) * t,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.placement().is_finite() && self.angles().is_finite() && self.depth.is_finite()
    }
}

/// Extra phase-two rotation about the Y axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Spin {
    #[default]
    None,
    Positive,
    Negative,
}

impl Spin {
    /// Sign applied to the spin angle.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Spin::None => 0.0,
            Spin::Positive => 1.0,
            Spin::Negative => -1.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct AnimationConfig {
    pub id: String,
    pub start: PositionState,
    pub end: PositionState,
    pub spin: Spin,
}

impl AnimationConfig {
    pub fn new(id: impl Into<String>, start: PositionState, end: PositionState) -> Self {
        Self {
            id: id.into(),
            start,
            end,
            spin: Spin::None,
        }
    }

    pub fn with_spin(mut self, spin: Spin) -> Self {
        self.spin = spin;
        self
    }
}

/// Replacement end placement for narrow viewports (percent pair).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OverrideDest {
    pub vertical: f32,
    pub horizontal: f32,
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("configuration table has no elements")]
    Empty,
    #[error("duplicate element id `{0}`")]
    DuplicateId(String),
    #[error("element `{0}` has a non-finite position value")]
    NonFinitePosition(String),
    #[error("override for `{0}` has a non-finite value")]
    NonFiniteOverride(String),
    #[error("override names unknown element `{0}`")]
    UnknownOverride(String),
}

/// Ordered element id to [`AnimationConfig`] mapping plus the compact override table.
#[derive(Clone, Debug)]
pub struct ConfigTable {
    entries: Vec<AnimationConfig>,
    compact_overrides: FnvHashMap<String, OverrideDest>,
}

impl ConfigTable {
    pub fn new(
        entries: Vec<AnimationConfig>,
        compact_overrides: impl IntoIterator<Item = (String, OverrideDest)>,
    ) -> Result<Self, ConfigError> {
        if entries.is_empty() {
            return Err(ConfigError::Empty);
        }
        for (i, e) in entries.iter().enumerate() {
            if entries[..i].iter().any(|prev| prev.id == e.id) {
                return Err(ConfigError::DuplicateId(e.id.clone()));
            }
            if !e.start.is_finite() || !e.end.is_finite() {
                return Err(ConfigError::NonFinitePosition(e.id.clone()));
            }
        }
        let mut overrides = FnvHashMap::default();
        for (id, dest) in compact_overrides {
            if !entries.iter().any(|e| e.id == id) {
                return Err(ConfigError::UnknownOverride(id));
            }
            if !dest.vertical.is_finite() || !dest.horizontal.is_finite() {
                return Err(ConfigError::NonFiniteOverride(id));
            }
            overrides.insert(id, dest);
        }
        Ok(Self {
            entries,
            compact_overrides: overrides,
        })
    }

    /// The six-cube layout shipped with the landing page.
    pub fn reference() -> Self {
        const FAR: f32 = -30000.0;
        let entries = vec![
            AnimationConfig::new(
                "box-a",
                PositionState::new(-55.0, 37.5, 360.0, -360.0, -48.0, FAR),
                PositionState::new(50.0, 15.0, 0.0, 3.0, 0.0, 0.0),
            ),
            AnimationConfig::new(
                "box-b",
                PositionState::new(-35.0, 32.5, -360.0, 360.0, 90.0, FAR),
                PositionState::new(75.0, 25.0, 1.0, 2.0, 0.0, 0.0),
            )
            .with_spin(Spin::Positive),
            AnimationConfig::new(
                "box-c",
                PositionState::new(-65.0, 50.0, -360.0, -360.0, -180.0, FAR),
                PositionState::new(25.0, 25.0, -1.0, 2.0, 0.0, 0.0),
            ),
            AnimationConfig::new(
                "box-d",
                PositionState::new(-35.0, 50.0, -360.0, -360.0, -180.0, FAR),
                PositionState::new(75.0, 75.0, 1.0, -2.0, 0.0, 0.0),
            ),
            AnimationConfig::new(
                "box-e",
                PositionState::new(-55.0, 62.5, 360.0, 360.0, -135.0, FAR),
                PositionState::new(25.0, 75.0, -1.0, -2.0, 0.0, 0.0),
            )
            .with_spin(Spin::Negative),
            AnimationConfig::new(
                "box-f",
                PositionState::new(-35.0, 67.5, -180.0, -360.0, -180.0, FAR),
                PositionState::new(50.0, 85.0, 0.0, -3.0, 0.0, 0.0),
            ),
        ];
        // Compact: two columns hugging the edges, clear of the centred copy.
        let overrides = [
            ("box-a", 14.0, 20.0),
            ("box-b", 86.0, 20.0),
            ("box-c", 8.0, 50.0),
            ("box-d", 92.0, 50.0),
            ("box-e", 14.0, 80.0),
            ("box-f", 86.0, 80.0),
        ]
        .into_iter()
        .map(|(id, vertical, horizontal)| {
            (
                id.to_string(),
                OverrideDest {
                    vertical,
                    horizontal,
                },
            )
        });
        match Self::new(entries, overrides) {
            Ok(t) => t,
            Err(e) => unreachable!("reference table is valid: {e}"),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnimationConfig> {
        self.entries.iter()
    }

    pub fn get(&self, id: &str) -> Option<&AnimationConfig> {
        self.entries.iter().find(|e| e.id == id)
    }

    /// Destination override for `id`, if the size class has one.
    pub fn override_for(&self, id: &str, size_class: SizeClass) -> Option<OverrideDest> {
        match size_class {
            SizeClass::Regular => None,
            SizeClass::Compact => self.compact_overrides.get(id).copied(),
        }
    }
}

impl Default for ConfigTable {
    fn default() -> Self {
        Self::reference()
    }
}
