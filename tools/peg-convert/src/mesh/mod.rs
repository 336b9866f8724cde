//! Mesh converter (OBJ -> .acn)
//!
//! A conversion runs start to finish inside one call: load, count pass, fill
//! pass, transform derivation, triangulation, rendering. Nothing outlives it.

mod dedup;
mod emit;
mod parser;
mod source;
mod transform;
mod types;

use std::path::Path;

use anyhow::{Context, Result};

use crate::error::ConvertError;
use crate::formats::write_acorn_shape;

// Re-export public API
pub use dedup::VertexDeduplicator;
pub use emit::{emit_shape, triangulate};
pub use parser::{parse_obj, MeshParser, ParseMode};
pub use source::SourceBuffer;
pub use transform::{GeometryTransformer, OriginMode, TransformConfig, UvDimension};
pub use types::{
    AcornShape, BoundingBox, ConversionStats, ConvertedShape, Face, FaceVertexRef, ObjCounts,
    ObjMesh,
};

/// Convert OBJ source text to an in-memory Acorn shape
pub fn convert_obj_source(
    src: impl Into<Vec<u8>>,
    config: &TransformConfig,
) -> Result<ConvertedShape, ConvertError> {
    config.validate()?;

    let mut src = SourceBuffer::new(src);
    let mesh = parse_obj(&mut src)?;
    let transform = GeometryTransformer::derive(config, &mesh.bounds);
    let (shape, stats) = emit_shape(&mesh, &transform, config.uv_dimension)?;

    tracing::info!(
        "Number of generated vertices: {} and triangles: {}",
        stats.vertices,
        stats.triangles
    );

    Ok(ConvertedShape { shape, stats })
}

/// Convert an OBJ file to an in-memory Acorn shape
pub fn convert_obj_to_memory(input: &Path, config: &TransformConfig) -> Result<ConvertedShape> {
    config.validate()?;
    let bytes = std::fs::read(input).map_err(|source| ConvertError::SourceUnavailable {
        path: input.to_path_buf(),
        source,
    })?;

    let converted = convert_obj_source(bytes, config)
        .with_context(|| format!("Failed to convert OBJ: {:?}", input))?;
    Ok(converted)
}

/// Convert an OBJ file to an Acorn `.acn` file
///
/// The document is rendered fully before the output is created, so a failed
/// conversion never leaves a partial file behind.
pub fn convert_obj(input: &Path, output: &Path, config: &TransformConfig) -> Result<ConversionStats> {
    let converted = convert_obj_to_memory(input, config)?;

    let mut document = Vec::new();
    write_acorn_shape(&mut document, &converted.shape)?;

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {:?}", parent))?;
    }
    std::fs::write(output, document)
        .with_context(|| format!("Failed to write output: {:?}", output))?;

    tracing::info!(
        "Converted OBJ mesh: {} vertices, {} triangles -> {:?}",
        converted.stats.vertices,
        converted.stats.triangles,
        output
    );

    Ok(converted.stats)
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn test_triangle_end_to_end() {
        let obj = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        let converted = convert_obj_source(obj, &TransformConfig::default()).unwrap();
        let shape = converted.shape;

        assert_eq!(shape.triangles, vec![[0, 1, 2]]);
        assert_eq!(shape.positions, vec![Vec3::ZERO, Vec3::X, Vec3::Y]);
        assert!(shape.normals.is_none());
        assert!(shape.uvs.is_none());
    }

    #[test]
    fn test_quad_with_distinct_attributes() {
        let obj = "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
vn 0 0 1
vn 0 0 1
vn 0 0 1
f 1/1/1 2/2/2 3/3/3 4/4/4
";
        let converted = convert_obj_source(obj, &TransformConfig::default()).unwrap();
        let shape = converted.shape;

        assert_eq!(shape.triangles.len(), 2);
        assert!(shape.triangles.iter().all(|t| t[0] == 0));
        assert_eq!(shape.positions.len(), 4);
        assert_eq!(shape.normals.as_ref().map(Vec::len), Some(4));
        assert_eq!(shape.uvs.as_ref().map(Vec::len), Some(4));
    }

    #[test]
    fn test_boundary_matches_target_height() {
        let obj = "v -1 3 0\nv 1 3 0\nv 0 7 2\nf 1 2 3\n";
        let config = TransformConfig::default()
            .with_origin(OriginMode::Bottom)
            .with_target_height(1.5)
            .with_rotation_degrees(30.0);
        let shape = convert_obj_source(obj, &config).unwrap().shape;

        assert!((shape.bounds_max.y - shape.bounds_min.y - 1.5).abs() < EPSILON);
        assert!(shape.bounds_min.y.abs() < EPSILON);
    }

    #[test]
    fn test_bounds_cover_only_parsed_positions() {
        let obj = "v 0 2 0\nv 1 2 0\nv 0 3 1\nf 1 2 3\n";
        let mut src = SourceBuffer::new(obj);
        let mesh = parse_obj(&mut src).unwrap();
        assert_eq!(mesh.bounds.min(), Vec3::new(0.0, 2.0, 0.0));
        assert_eq!(mesh.bounds.max(), Vec3::new(1.0, 3.0, 1.0));

        // Already one unit tall, so no scaling and no implicit origin in the box
        let config = TransformConfig::default().with_target_height(1.0);
        let transform = GeometryTransformer::derive(&config, &mesh.bounds);
        assert_eq!(transform.scale(), 1.0);

        let shape = convert_obj_source(obj, &config).unwrap().shape;
        assert_eq!(shape.positions[2], Vec3::new(0.0, 3.0, 1.0));
        assert!((shape.bounds_min.y - 2.0).abs() < EPSILON);
        assert!((shape.bounds_max.y - 3.0).abs() < EPSILON);
    }

    #[test]
    fn test_invalid_config_rejected_before_parsing() {
        let config = TransformConfig::default().with_target_height(-2.0);
        let err = convert_obj_source("bogus\n", &config).unwrap_err();
        assert!(matches!(err, ConvertError::InvalidConfig(_)));
    }

    #[test]
    fn test_missing_file_is_source_unavailable() {
        let err = convert_obj_to_memory(
            Path::new("/nonexistent/definitely/missing.obj"),
            &TransformConfig::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConvertError>(),
            Some(ConvertError::SourceUnavailable { .. })
        ));
    }
}
