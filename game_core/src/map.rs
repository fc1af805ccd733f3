use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::params::Params;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    pub fn from_center_size(center: Vec2, size: Vec2) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Check if the vertical span `[center - half, center + half]` overlaps this box
    pub fn overlaps_span_y(&self, center: f32, half: f32) -> bool {
        center + half >= self.min.y && center - half <= self.max.y
    }
}

/// Playable field. Origin is the top-left corner, Y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub width: f32,
    pub height: f32,
}

impl Default for Field {
    fn default() -> Self {
        Self {
            width: Params::FIELD_WIDTH,
            height: Params::FIELD_HEIGHT,
        }
    }
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Clamp a Y coordinate so an object of the given half extent stays inside
    pub fn clamp_y(&self, y: f32, half_extent: f32) -> f32 {
        let max = (self.height - half_extent).max(half_extent);
        y.clamp(half_extent, max)
    }

    /// Width/height ratios from `self` to `other`
    pub fn scale_to(&self, other: &Field) -> Vec2 {
        Vec2::new(other.width / self.width, other.height / self.height)
    }
}
