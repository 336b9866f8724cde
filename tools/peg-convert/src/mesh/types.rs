//! Types shared by the OBJ parser and the Acorn emitter

use glam::Vec3;

use super::transform::UvDimension;

/// One vertex reference inside a face's polygon
///
/// Indices are 1-based as written in the source; 0 marks an absent
/// texture coordinate or normal. All four fields form the vertex identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct FaceVertexRef {
    /// Smoothing group active when the face was read
    pub smoothing_group: u32,
    pub position: u32,
    pub tex_coord: u32,
    pub normal: u32,
}

/// A polygon stored as a run of [`FaceVertexRef`]s in [`ObjMesh::refs`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Face {
    pub start: usize,
    pub count: usize,
}

/// Axis-aligned bounds of all parsed positions
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    min: Vec3,
    max: Vec3,
}

impl BoundingBox {
    pub fn new() -> Self {
        Self {
            min: Vec3::splat(f32::INFINITY),
            max: Vec3::splat(f32::NEG_INFINITY),
        }
    }

    pub fn include(&mut self, p: Vec3) {
        self.min = self.min.min(p);
        self.max = self.max.max(p);
    }

    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x
    }

    /// Minimum corner (origin for an empty box)
    pub fn min(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.min
        }
    }

    /// Maximum corner (origin for an empty box)
    pub fn max(&self) -> Vec3 {
        if self.is_empty() {
            Vec3::ZERO
        } else {
            self.max
        }
    }

    pub fn size(&self) -> Vec3 {
        self.max() - self.min()
    }
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::new()
    }
}

/// Totals gathered by the parser's count pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ObjCounts {
    pub positions: usize,
    pub normals: usize,
    pub tex_coords: usize,
    pub faces: usize,
    pub face_refs: usize,
}

/// Raw geometry extracted from an OBJ source
#[derive(Debug, Default)]
pub struct ObjMesh {
    pub positions: Vec<Vec3>,
    pub normals: Vec<Vec3>,
    /// Always three components; 2-D output drops the third
    pub tex_coords: Vec<Vec3>,
    pub faces: Vec<Face>,
    pub refs: Vec<FaceVertexRef>,
    pub bounds: BoundingBox,
}

impl ObjMesh {
    /// Allocate every array to its counted size
    pub fn with_capacity(counts: &ObjCounts) -> Self {
        Self {
            positions: Vec::with_capacity(counts.positions),
            normals: Vec::with_capacity(counts.normals),
            tex_coords: Vec::with_capacity(counts.tex_coords),
            faces: Vec::with_capacity(counts.faces),
            refs: Vec::with_capacity(counts.face_refs),
            bounds: BoundingBox::new(),
        }
    }

    /// Totals of what was actually filled
    pub fn counts(&self) -> ObjCounts {
        ObjCounts {
            positions: self.positions.len(),
            normals: self.normals.len(),
            tex_coords: self.tex_coords.len(),
            faces: self.faces.len(),
            face_refs: self.refs.len(),
        }
    }

    pub fn face_refs(&self, face: &Face) -> &[FaceVertexRef] {
        &self.refs[face.start..face.start + face.count]
    }
}

/// Triangulated shape ready to be written as an Acorn `+Shape`
#[derive(Debug, Clone, PartialEq)]
pub struct AcornShape {
    /// Source bounding-box corners in output space
    pub bounds_min: Vec3,
    pub bounds_max: Vec3,
    pub triangles: Vec<[u32; 3]>,
    pub positions: Vec<Vec3>,
    /// Present only if the source had normals
    pub normals: Option<Vec<Vec3>>,
    /// Present only if the source had texture coordinates
    pub uvs: Option<Vec<Vec3>>,
    pub uv_dimension: UvDimension,
}

/// Summary of one conversion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConversionStats {
    pub source: ObjCounts,
    /// Canonical vertices generated by deduplication
    pub vertices: usize,
    pub triangles: usize,
    /// Vertices that had no normal while a normal block was emitted
    pub substituted_normals: usize,
    /// Vertices that had no texture coordinate while a UV block was emitted
    pub substituted_uvs: usize,
}

/// Result of in-memory conversion
#[derive(Debug, Clone)]
pub struct ConvertedShape {
    pub shape: AcornShape,
    pub stats: ConversionStats,
}
