//! Acorn text format output
//!
//! An Acorn shape is a `+Shape` program whose blocks are quoted lists:
//! every entry ends with `,` except the last, which closes the quote.

use std::io::{self, Write};

use anyhow::Result;
use glam::Vec3;

use crate::mesh::{AcornShape, UvDimension};

/// File extension for Acorn programs
pub const ACORN_EXT: &str = "acn";

/// Write a complete Acorn `+Shape` document
pub fn write_acorn_shape<W: Write>(w: &mut W, shape: &AcornShape) -> Result<()> {
    writeln!(w, "# pegconvert conversion from .obj to .acn")?;
    writeln!(w, "+Shape")?;
    let (lo, hi) = (shape.bounds_min, shape.bounds_max);
    writeln!(
        w,
        "\t# boundary: +BoundaryBox(+Xyz({:.6}, {:.6}, {:.6}), +Xyz({:.6}, {:.6}, {:.6}))",
        lo.x, lo.y, lo.z, hi.x, hi.y, hi.z
    )?;

    write_block(w, "indices: +Integers", &shape.triangles, |w, t| {
        write!(w, "{},{},{}", t[0], t[1], t[2])
    })?;
    writeln!(
        w,
        "# Number of generated vertices: {} and triangles: {}",
        shape.positions.len(),
        shape.triangles.len()
    )?;

    write_block(w, "positions: +Xyzs", &shape.positions, write_xyz)?;

    if let Some(normals) = &shape.normals {
        write_block(w, "normals: +Xyzs", normals, write_xyz)?;
    }

    if let Some(uvs) = &shape.uvs {
        match shape.uv_dimension {
            UvDimension::Three => write_block(w, "uvs: +Xyzs", uvs, write_xyz)?,
            UvDimension::Two => write_block(w, "uvs: +Uvs", uvs, |w, uv| {
                write!(w, "{:.6},{:.6}", uv.x, uv.y)
            })?,
        }
    }

    Ok(())
}

/// Render a shape to an in-memory document
pub fn render_acorn_shape(shape: &AcornShape) -> Result<String> {
    let mut buf = Vec::new();
    write_acorn_shape(&mut buf, shape)?;
    Ok(String::from_utf8(buf)?)
}

fn write_xyz<W: Write>(w: &mut W, v: &Vec3) -> io::Result<()> {
    write!(w, "{:.6},{:.6},{:.6}", v.x, v.y, v.z)
}

/// Write a quoted block. An empty block is closed on its own line.
fn write_block<W: Write, T>(
    w: &mut W,
    header: &str,
    entries: &[T],
    mut write_entry: impl FnMut(&mut W, &T) -> io::Result<()>,
) -> io::Result<()> {
    writeln!(w, "\t{header}\"")?;
    if entries.is_empty() {
        return writeln!(w, "\t\t\"");
    }

    let last = entries.len() - 1;
    for (i, entry) in entries.iter().enumerate() {
        write!(w, "\t\t")?;
        write_entry(w, entry)?;
        writeln!(w, "{}", if i == last { '"' } else { ',' })?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle() -> AcornShape {
        AcornShape {
            bounds_min: Vec3::ZERO,
            bounds_max: Vec3::new(1.0, 1.0, 0.0),
            triangles: vec![[0, 1, 2]],
            positions: vec![Vec3::ZERO, Vec3::X, Vec3::Y],
            normals: None,
            uvs: None,
            uv_dimension: UvDimension::Two,
        }
    }

    #[test]
    fn test_triangle_document() {
        let text = render_acorn_shape(&triangle()).unwrap();
        let expected = "\
# pegconvert conversion from .obj to .acn
+Shape
\t# boundary: +BoundaryBox(+Xyz(0.000000, 0.000000, 0.000000), +Xyz(1.000000, 1.000000, 0.000000))
\tindices: +Integers\"
\t\t0,1,2\"
# Number of generated vertices: 3 and triangles: 1
\tpositions: +Xyzs\"
\t\t0.000000,0.000000,0.000000,
\t\t1.000000,0.000000,0.000000,
\t\t0.000000,1.000000,0.000000\"
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_uv_dimensions() {
        let mut shape = triangle();
        shape.uvs = Some(vec![Vec3::new(0.25, 0.5, 0.75); 3]);

        let text = render_acorn_shape(&shape).unwrap();
        assert!(text.contains("\tuvs: +Uvs\"\n\t\t0.250000,0.500000,\n"));
        assert!(text.ends_with("\t\t0.250000,0.500000\"\n"));

        shape.uv_dimension = UvDimension::Three;
        let text = render_acorn_shape(&shape).unwrap();
        assert!(text.contains("\tuvs: +Xyzs\"\n\t\t0.250000,0.500000,0.750000,\n"));
    }

    #[test]
    fn test_normals_block_precedes_uvs() {
        let mut shape = triangle();
        shape.normals = Some(vec![Vec3::Z; 3]);
        shape.uvs = Some(vec![Vec3::ZERO; 3]);

        let text = render_acorn_shape(&shape).unwrap();
        let normals = text.find("normals: +Xyzs").unwrap();
        let uvs = text.find("uvs: +Uvs").unwrap();
        assert!(text.find("positions: +Xyzs").unwrap() < normals);
        assert!(normals < uvs);
    }

    #[test]
    fn test_empty_blocks_are_closed() {
        let shape = AcornShape {
            bounds_min: Vec3::ZERO,
            bounds_max: Vec3::ZERO,
            triangles: Vec::new(),
            positions: Vec::new(),
            normals: None,
            uvs: None,
            uv_dimension: UvDimension::Two,
        };
        let text = render_acorn_shape(&shape).unwrap();
        assert!(text.contains("\tindices: +Integers\"\n\t\t\"\n"));
        assert!(text.ends_with("\tpositions: +Xyzs\"\n\t\t\"\n"));
    }
}
