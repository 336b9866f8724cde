//! OBJ fixtures written to disk for integration tests

use std::io::Result;
use std::path::Path;

/// Single triangle, positions only
pub fn generate_triangle_obj(path: &Path) -> Result<()> {
    std::fs::write(
        path,
        "\
# triangle
v 0 0 0
v 1 0 0
v 0 1 0
f 1 2 3
",
    )
}

/// Quad whose four corners have distinct texcoords and normals
pub fn generate_quad_obj(path: &Path) -> Result<()> {
    std::fs::write(
        path,
        "\
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
vt 0 0
vt 1 0
vt 1 1
vt 0 1
vn 0 0 1
vn 0 0.1 1
vn 0.1 0 1
vn 0.1 0.1 1
f 1/1/1 2/2/2 3/3/3 4/4/4
",
    )
}

/// Unit cube standing on y = 2, CRLF line endings, smoothing groups and materials
pub fn generate_cube_obj(path: &Path) -> Result<()> {
    let lines = [
        "mtllib cube.mtl",
        "g Cube",
        "v 0 2 0",
        "v 1 2 0",
        "v 1 3 0",
        "v 0 3 0",
        "v 0 2 1",
        "v 1 2 1",
        "v 1 3 1",
        "v 0 3 1",
        "vt 0 0 0",
        "vt 1 0 0",
        "vt 1 1 0",
        "vt 0 1 0",
        "vn 0 0 -1",
        "vn 0 0 1",
        "vn -1 0 0",
        "vn 1 0 0",
        "vn 0 -1 0",
        "vn 0 1 0",
        "usemtl default",
        "s 1",
        "f 1/1/1 4/4/1 3/3/1 2/2/1",
        "f 5/1/2 6/2/2 7/3/2 8/4/2",
        "f 1/1/3 5/2/3 8/3/3 4/4/3",
        "f 2/1/4 3/4/4 7/3/4 6/2/4",
        "s off",
        "f 1/1/5 2/2/5 6/3/5 5/4/5",
        "f 4/1/6 8/2/6 7/3/6 3/4/6",
        "",
    ];
    std::fs::write(path, lines.join("\r\n"))
}

/// Valid geometry followed by a command the converter does not know
pub fn generate_unknown_command_obj(path: &Path) -> Result<()> {
    std::fs::write(
        path,
        "\
v 0 0 0
v 1 0 0
v 0 1 0
cstype bspline
f 1 2 3
",
    )
}
