//! Face-vertex deduplication
//!
//! Maps each distinct (smoothing group, position, texcoord, normal) tuple to a
//! single output vertex index. Indices are handed out in first-seen order, so
//! the first polygon's first vertex is always output vertex 0.

use hashbrown::HashMap;

use super::types::FaceVertexRef;

/// Insertion-ordered identity map from face-vertex refs to output indices
#[derive(Debug, Default)]
pub struct VertexDeduplicator {
    lookup: HashMap<FaceVertexRef, u32>,
    vertices: Vec<FaceVertexRef>,
}

impl VertexDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the output index for `face_ref`, registering it if unseen
    pub fn resolve(&mut self, face_ref: FaceVertexRef) -> u32 {
        let vertices = &mut self.vertices;
        *self.lookup.entry(face_ref).or_insert_with(|| {
            let index = vertices.len() as u32;
            vertices.push(face_ref);
            index
        })
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Canonical vertices, indexed by output index
    pub fn vertices(&self) -> &[FaceVertexRef] {
        &self.vertices
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vref(group: u32, p: u32, t: u32, n: u32) -> FaceVertexRef {
        FaceVertexRef {
            smoothing_group: group,
            position: p,
            tex_coord: t,
            normal: n,
        }
    }

    #[test]
    fn test_first_seen_order() {
        let mut dedup = VertexDeduplicator::new();
        assert_eq!(dedup.resolve(vref(0, 5, 0, 0)), 0);
        assert_eq!(dedup.resolve(vref(0, 2, 0, 0)), 1);
        assert_eq!(dedup.resolve(vref(0, 9, 0, 0)), 2);
        assert_eq!(dedup.vertices()[1].position, 2);
    }

    #[test]
    fn test_same_tuple_same_index() {
        let mut dedup = VertexDeduplicator::new();
        let a = vref(1, 3, 4, 5);
        let first = dedup.resolve(a);
        dedup.resolve(vref(1, 1, 1, 1));
        assert_eq!(dedup.resolve(a), first);
        assert_eq!(dedup.resolve(a), first);
        assert_eq!(dedup.len(), 2);
    }

    #[test]
    fn test_every_field_is_identity() {
        let mut dedup = VertexDeduplicator::new();
        let base = vref(1, 1, 1, 1);
        let variants = [
            base,
            vref(2, 1, 1, 1),
            vref(1, 2, 1, 1),
            vref(1, 1, 2, 1),
            vref(1, 1, 1, 2),
        ];

        let indices: Vec<u32> = variants.iter().map(|&v| dedup.resolve(v)).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);
        assert_eq!(dedup.vertices(), &variants);
    }

    #[test]
    fn test_empty() {
        let dedup = VertexDeduplicator::new();
        assert!(dedup.is_empty());
        assert!(dedup.vertices().is_empty());
    }
}
