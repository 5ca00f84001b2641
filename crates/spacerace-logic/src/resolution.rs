//! Path resolution, the spline subdivision count ("SEG").
//!
//! More subdivisions per spline window give a smoother trail. The value is
//! always kept inside `MIN_RESOLUTION..=MAX_RESOLUTION`; out-of-range
//! requests are clamped, never reported.

use serde::{Deserialize, Serialize};

use crate::constants::path::{DEFAULT_RESOLUTION, MAX_RESOLUTION, MIN_RESOLUTION};

/// Number of interpolation steps per spline window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "u16", into = "u16")]
pub struct PathResolution(u16);

impl PathResolution {
    pub const MIN: Self = Self(MIN_RESOLUTION);
    pub const MAX: Self = Self(MAX_RESOLUTION);

    /// Clamp `segments` into the legal range.
    pub fn new(segments: u16) -> Self {
        Self(segments.clamp(MIN_RESOLUTION, MAX_RESOLUTION))
    }

    pub fn get(self) -> u16 {
        self.0
    }

    /// One step smoother. Stops at the maximum.
    pub fn increase(&mut self) {
        if self.0 < MAX_RESOLUTION {
            self.0 += 1;
        }
    }

    /// One step coarser. Stops at the minimum.
    pub fn decrease(&mut self) {
        if self.0 > MIN_RESOLUTION {
            self.0 -= 1;
        }
    }
}

impl Default for PathResolution {
    fn default() -> Self {
        Self(DEFAULT_RESOLUTION)
    }
}

impl From<u16> for PathResolution {
    fn from(segments: u16) -> Self {
        Self::new(segments)
    }
}

impl From<PathResolution> for u16 {
    fn from(res: PathResolution) -> Self {
        res.0
    }
}
