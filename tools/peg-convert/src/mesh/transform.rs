//! Geometric normalization applied during conversion
//!
//! Positions are translated so a chosen fraction of the bounding box lands at
//! the origin, scaled uniformly, then rotated clockwise about the Y axis (as
//! seen looking down from above). Normals only receive the rotation.

use glam::Vec3;
use serde::Deserialize;

use super::types::BoundingBox;
use crate::error::ConvertError;

/// Number of components written per UV entry
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum UvDimension {
    #[default]
    Two,
    Three,
}

impl UvDimension {
    pub fn components(self) -> usize {
        match self {
            UvDimension::Two => 2,
            UvDimension::Three => 3,
        }
    }
}

impl TryFrom<u8> for UvDimension {
    type Error = ConvertError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            2 => Ok(UvDimension::Two),
            3 => Ok(UvDimension::Three),
            other => Err(ConvertError::InvalidConfig(format!(
                "uv dimension must be 2 or 3, got {other}"
            ))),
        }
    }
}

/// Origin presets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OriginMode {
    /// Center x and z, bottom of the model at y = 0
    Bottom,
    /// Center all three axes
    Center,
}

impl OriginMode {
    /// Bounding-box fraction moved to the origin, per axis
    pub fn fractions(self) -> [Option<f32>; 3] {
        match self {
            OriginMode::Bottom => [Some(0.5), Some(0.0), Some(0.5)],
            OriginMode::Center => [Some(0.5), Some(0.5), Some(0.5)],
        }
    }
}

/// Transform options for one conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformConfig {
    /// Clockwise rotation about Y, in radians
    pub y_rotation: f32,
    /// Per-axis bounding-box fraction to translate to 0 (`None` = unchanged)
    pub origin: [Option<f32>; 3],
    /// Total output height; `None` keeps the source scale
    pub target_height: Option<f32>,
    pub uv_dimension: UvDimension,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            y_rotation: 0.0,
            origin: [None; 3],
            target_height: None,
            uv_dimension: UvDimension::Two,
        }
    }
}

impl TransformConfig {
    pub fn with_rotation_degrees(mut self, degrees: f32) -> Self {
        self.y_rotation = degrees.to_radians();
        self
    }

    pub fn with_origin(mut self, mode: OriginMode) -> Self {
        self.origin = mode.fractions();
        self
    }

    pub fn with_target_height(mut self, height: f32) -> Self {
        self.target_height = Some(height);
        self
    }

    pub fn with_uv_dimension(mut self, uv_dimension: UvDimension) -> Self {
        self.uv_dimension = uv_dimension;
        self
    }

    pub fn validate(&self) -> Result<(), ConvertError> {
        if !self.y_rotation.is_finite() {
            return Err(ConvertError::InvalidConfig(format!(
                "rotation must be finite, got {}",
                self.y_rotation
            )));
        }
        if let Some(height) = self.target_height {
            if !(height.is_finite() && height > 0.0) {
                return Err(ConvertError::InvalidConfig(format!(
                    "height must be a positive number, got {height}"
                )));
            }
        }
        for fraction in self.origin.iter().flatten() {
            if !(0.0..=1.0).contains(fraction) {
                return Err(ConvertError::InvalidConfig(format!(
                    "origin fraction must be within [0, 1], got {fraction}"
                )));
            }
        }
        Ok(())
    }
}

/// Source-to-output mapping derived from a config and the source bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryTransformer {
    scale: f32,
    delta: Vec3,
    sin: f32,
    cos: f32,
}

impl GeometryTransformer {
    pub fn identity() -> Self {
        Self {
            scale: 1.0,
            delta: Vec3::ZERO,
            sin: 0.0,
            cos: 1.0,
        }
    }

    pub fn derive(config: &TransformConfig, bounds: &BoundingBox) -> Self {
        let min = bounds.min();
        let size = bounds.size();

        let scale = match config.target_height {
            Some(height) if size.y > 0.0 => height / size.y,
            Some(_) => {
                tracing::warn!("Mesh has no vertical extent; height scaling skipped");
                1.0
            }
            None => 1.0,
        };

        let axis_delta = |fraction: Option<f32>, lo: f32, extent: f32| {
            fraction.map_or(0.0, |f| -(f * extent + lo))
        };
        let delta = Vec3::new(
            axis_delta(config.origin[0], min.x, size.x),
            axis_delta(config.origin[1], min.y, size.y),
            axis_delta(config.origin[2], min.z, size.z),
        );

        let (sin, cos) = config.y_rotation.sin_cos();
        tracing::debug!("Transform: scale={}, delta={}", scale, delta);

        Self {
            scale,
            delta,
            sin,
            cos,
        }
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }

    pub fn delta(&self) -> Vec3 {
        self.delta
    }

    /// Translate, scale, then rotate a source position
    pub fn to_output_position(&self, p: Vec3) -> Vec3 {
        self.rotate((p + self.delta) * self.scale)
    }

    /// Rotate a source normal (no translation or scale)
    pub fn to_output_normal(&self, n: Vec3) -> Vec3 {
        self.rotate(n)
    }

    fn rotate(&self, v: Vec3) -> Vec3 {
        Vec3::new(
            v.x * self.cos - v.z * self.sin,
            v.y,
            v.z * self.cos + v.x * self.sin,
        )
    }
}
