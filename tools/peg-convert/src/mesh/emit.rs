//! Fan triangulation and vertex emission

use glam::Vec3;

use super::dedup::VertexDeduplicator;
use super::transform::{GeometryTransformer, UvDimension};
use super::types::{AcornShape, ConversionStats, ObjMesh};
use crate::error::{Attribute, ConvertError};

/// Normal written for vertices that reference none
const DEFAULT_NORMAL: Vec3 = Vec3::Y;
/// UV written for vertices that reference none
const DEFAULT_UV: Vec3 = Vec3::ZERO;

/// Fan-triangulate every face, registering each referenced vertex.
///
/// Triangles are `(v0, v_i, v_i+1)` in face order. The first reference of every
/// non-empty face is registered even when the face is too short to yield a
/// triangle, so later faces keep their vertex numbering.
pub fn triangulate(mesh: &ObjMesh, dedup: &mut VertexDeduplicator) -> Vec<[u32; 3]> {
    let triangle_count = mesh.faces.iter().map(|f| f.count.saturating_sub(2)).sum();
    let mut triangles = Vec::with_capacity(triangle_count);

    for face in &mesh.faces {
        let refs = mesh.face_refs(face);
        let Some((&first, rest)) = refs.split_first() else {
            tracing::debug!("Skipping empty face");
            continue;
        };
        if refs.len() < 3 {
            tracing::debug!("Face with {} vertices yields no triangles", refs.len());
        }

        let v0 = dedup.resolve(first);
        for pair in rest.windows(2) {
            let v1 = dedup.resolve(pair[0]);
            let v2 = dedup.resolve(pair[1]);
            triangles.push([v0, v1, v2]);
        }
    }

    triangles
}

/// Build the output shape: triangles, then per-vertex attribute blocks in
/// deduplication order.
pub fn emit_shape(
    mesh: &ObjMesh,
    transform: &GeometryTransformer,
    uv_dimension: UvDimension,
) -> Result<(AcornShape, ConversionStats), ConvertError> {
    let mut dedup = VertexDeduplicator::new();
    let triangles = triangulate(mesh, &mut dedup);
    let vertices = dedup.vertices();

    let mut stats = ConversionStats {
        source: mesh.counts(),
        vertices: vertices.len(),
        triangles: triangles.len(),
        ..Default::default()
    };

    let positions = vertices
        .iter()
        .map(|v| {
            lookup(&mesh.positions, v.position, Attribute::Position)
                .map(|p| transform.to_output_position(p))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let normals = if mesh.normals.is_empty() {
        None
    } else {
        let normals = vertices
            .iter()
            .map(|v| {
                lookup_or_default(
                    &mesh.normals,
                    v.normal,
                    Attribute::Normal,
                    DEFAULT_NORMAL,
                    &mut stats.substituted_normals,
                )
                .map(|n| transform.to_output_normal(n))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Some(normals)
    };

    let uvs = if mesh.tex_coords.is_empty() {
        None
    } else {
        let uvs = vertices
            .iter()
            .map(|v| {
                lookup_or_default(
                    &mesh.tex_coords,
                    v.tex_coord,
                    Attribute::TexCoord,
                    DEFAULT_UV,
                    &mut stats.substituted_uvs,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Some(uvs)
    };

    if stats.substituted_normals > 0 {
        tracing::warn!(
            "{} vertices have no normal; using {}",
            stats.substituted_normals,
            DEFAULT_NORMAL
        );
    }
    if stats.substituted_uvs > 0 {
        tracing::warn!(
            "{} vertices have no texture coordinate; using {}",
            stats.substituted_uvs,
            DEFAULT_UV
        );
    }

    let shape = AcornShape {
        bounds_min: transform.to_output_position(mesh.bounds.min()),
        bounds_max: transform.to_output_position(mesh.bounds.max()),
        triangles,
        positions,
        normals,
        uvs,
        uv_dimension,
    };

    Ok((shape, stats))
}

/// Fetch a 1-based attribute; 0 or past-the-end is an error
fn lookup(values: &[Vec3], index: u32, attribute: Attribute) -> Result<Vec3, ConvertError> {
    index
        .checked_sub(1)
        .and_then(|i| values.get(i as usize))
        .copied()
        .ok_or(ConvertError::IndexOutOfRange {
            attribute,
            index,
            available: values.len(),
        })
}

/// Fetch a 1-based optional attribute, substituting `default` for index 0
fn lookup_or_default(
    values: &[Vec3],
    index: u32,
    attribute: Attribute,
    default: Vec3,
    substituted: &mut usize,
) -> Result<Vec3, ConvertError> {
    if index == 0 {
        *substituted += 1;
        return Ok(default);
    }
    lookup(values, index, attribute)
}
