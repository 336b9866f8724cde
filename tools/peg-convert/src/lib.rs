//! peg-convert library
//!
//! Converts Wavefront OBJ meshes into Acorn `+Shape` programs for the
//! Pegasus3d engine, optionally recentring, scaling and rotating them.

pub mod error;
pub mod formats;
pub mod manifest;
pub mod mesh;

pub use error::{Attribute, ConvertError};

// Re-export key types for mesh conversion
pub use mesh::{
    convert_obj, convert_obj_source, convert_obj_to_memory, AcornShape, ConversionStats,
    ConvertedShape, OriginMode, TransformConfig, UvDimension,
};
