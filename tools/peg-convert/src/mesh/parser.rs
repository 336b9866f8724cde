//! Two-pass OBJ parser
//!
//! The count pass sizes every array, then the fill pass populates them without
//! reallocating. Both passes run over the same [`SourceBuffer`], count first.

use glam::Vec3;

use super::source::SourceBuffer;
use super::types::{Face, FaceVertexRef, ObjCounts, ObjMesh};
use crate::error::ConvertError;

/// Longest command text quoted when reporting an unknown line
const MAX_REPORTED_COMMAND: usize = 20;

/// Which pass the parser is running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    Count,
    Fill,
}

/// Line command, selected by the first token on a line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Position,
    Normal,
    TexCoord,
    ParamVertex,
    Face,
    Smoothing,
    Ignored,
    Blank,
    Unknown,
}

impl Command {
    fn from_keyword(token: &[u8]) -> Self {
        match token {
            b"v" => Command::Position,
            b"vn" => Command::Normal,
            b"vt" => Command::TexCoord,
            b"vp" => Command::ParamVertex,
            b"f" => Command::Face,
            b"s" => Command::Smoothing,
            b"g" | b"mtllib" | b"usemtl" => Command::Ignored,
            b"" => Command::Blank,
            _ => Command::Unknown,
        }
    }
}

/// OBJ parser state for one conversion
pub struct MeshParser {
    counts: ObjCounts,
    mesh: ObjMesh,
    smoothing_group: u32,
}

impl MeshParser {
    pub fn new() -> Self {
        Self {
            counts: ObjCounts::default(),
            mesh: ObjMesh::default(),
            smoothing_group: 0,
        }
    }

    /// Run one pass over `src`. The cursor is reset afterwards, even on failure.
    pub fn parse(&mut self, src: &mut SourceBuffer, mode: ParseMode) -> Result<(), ConvertError> {
        match mode {
            ParseMode::Count => self.counts = ObjCounts::default(),
            ParseMode::Fill => self.mesh = ObjMesh::with_capacity(&self.counts),
        }
        self.smoothing_group = 0;

        let result = self.scan(src, mode);
        src.reset();
        result?;

        match mode {
            ParseMode::Count => {
                let c = &self.counts;
                tracing::info!(
                    "Number of vertex positions: {}, normals: {}, uvs: {}",
                    c.positions,
                    c.normals,
                    c.tex_coords
                );
                tracing::info!("Number of faces: {}, indices: {}", c.faces, c.face_refs);
            }
            ParseMode::Fill => {
                debug_assert_eq!(self.mesh.counts(), self.counts);
                let bounds = &self.mesh.bounds;
                tracing::debug!("Mins {} to Maxs {}", bounds.min(), bounds.max());
            }
        }
        Ok(())
    }

    /// Totals from the most recent count pass
    pub fn counts(&self) -> &ObjCounts {
        &self.counts
    }

    /// Geometry from the most recent fill pass
    pub fn into_mesh(self) -> ObjMesh {
        self.mesh
    }

    fn scan(&mut self, src: &mut SourceBuffer, mode: ParseMode) -> Result<(), ConvertError> {
        while !src.is_at_end() {
            if src.match_literal("#") {
                src.skip_to_next_line();
                continue;
            }

            let line_start = src.position();
            let command = Command::from_keyword(src.read_keyword());
            match command {
                Command::Position => {
                    let p = read_vec3(src);
                    if mode == ParseMode::Count {
                        self.counts.positions += 1;
                    } else {
                        self.mesh.positions.push(p);
                        self.mesh.bounds.include(p);
                    }
                }
                Command::Normal => {
                    let n = read_vec3(src);
                    if mode == ParseMode::Count {
                        self.counts.normals += 1;
                    } else {
                        self.mesh.normals.push(n);
                    }
                }
                Command::TexCoord => {
                    let t = read_vec3(src);
                    if mode == ParseMode::Count {
                        self.counts.tex_coords += 1;
                    } else {
                        self.mesh.tex_coords.push(t);
                    }
                }
                Command::Face => self.read_face(src, mode),
                Command::Smoothing => self.smoothing_group = src.read_int(),
                Command::ParamVertex | Command::Ignored | Command::Blank => {}
                Command::Unknown => {
                    return Err(ConvertError::UnrecognizedLine {
                        line: src.line_number(),
                        text: src.preview(line_start, MAX_REPORTED_COMMAND),
                    });
                }
            }
            src.skip_to_next_line();
        }
        Ok(())
    }

    /// Read the references of an `f` line, leaving the cursor at its end
    fn read_face(&mut self, src: &mut SourceBuffer, mode: ParseMode) {
        let start = self.mesh.refs.len();
        let mut count = 0;

        src.skip_spaces();
        while !src.at_line_end() {
            let before = src.position();
            let face_ref = read_face_ref(src, self.smoothing_group);
            if src.position() == before {
                // Unreadable token (e.g. a negative index); keep it as position 0
                src.skip_token();
            }
            src.skip_spaces();

            count += 1;
            match mode {
                ParseMode::Count => self.counts.face_refs += 1,
                ParseMode::Fill => self.mesh.refs.push(face_ref),
            }
        }

        match mode {
            ParseMode::Count => self.counts.faces += 1,
            ParseMode::Fill => self.mesh.faces.push(Face { start, count }),
        }
    }
}

impl Default for MeshParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the count pass then the fill pass over `src`
pub fn parse_obj(src: &mut SourceBuffer) -> Result<ObjMesh, ConvertError> {
    let mut parser = MeshParser::new();
    parser.parse(src, ParseMode::Count)?;
    parser.parse(src, ParseMode::Fill)?;
    Ok(parser.into_mesh())
}

fn read_vec3(src: &mut SourceBuffer) -> Vec3 {
    let x = src.read_float();
    let y = src.read_float();
    let z = src.read_float();
    Vec3::new(x, y, z)
}

/// Parse one reference: `p`, `p/t`, `p//n` or `p/t/n`
fn read_face_ref(src: &mut SourceBuffer, smoothing_group: u32) -> FaceVertexRef {
    let mut face_ref = FaceVertexRef {
        smoothing_group,
        position: src.read_int(),
        ..Default::default()
    };

    if src.eat(b'/') {
        if src.peek() != Some(b'/') {
            face_ref.tex_coord = src.read_int();
        }
        if src.eat(b'/') {
            face_ref.normal = src.read_int();
        }
    }

    face_ref
}
