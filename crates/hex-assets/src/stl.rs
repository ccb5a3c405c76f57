//! ASCII STL export.
//!
//! Layout per facet:
//!
//! ```text
//!   facet normal nx ny nz
//!     outer loop
//!       vertex x y z
//!       vertex x y z
//!       vertex x y z
//!     endloop
//!   endfacet
//! ```
//!
//! wrapped in `solid <name>` / `endsolid <name>`. Every number is printed
//! with six decimals, so identical meshes always produce identical bytes.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tracing::{debug, instrument};

use crate::errors::StlError;
use crate::geometry::{Mesh, Triangle, Vec3};

/// Face normal written for a facet. See [`crate::geometry::Triangle::normal`].
pub fn facet_normal(tri: &Triangle) -> Vec3 {
    tri.normal()
}

/// Stream an ASCII STL solid named `name` into `w`.
pub fn write_ascii_stl_to<W: Write>(mut w: W, name: &str, mesh: &Mesh) -> io::Result<()> {
    writeln!(w, "solid {}", name)?;

    for tri in mesh {
        let n = facet_normal(tri);
        writeln!(w, "  facet normal {:.6} {:.6} {:.6}", n.x, n.y, n.z)?;
        writeln!(w, "    outer loop")?;
        for v in tri.vertices() {
            writeln!(w, "      vertex {:.6} {:.6} {:.6}", v.x, v.y, v.z)?;
        }
        writeln!(w, "    endloop")?;
        writeln!(w, "  endfacet")?;
    }

    writeln!(w, "endsolid {}", name)?;
    w.flush()
}

/// Render an ASCII STL solid to a string.
pub fn ascii_stl_string(name: &str, mesh: &Mesh) -> String {
    let mut buf = Vec::with_capacity(mesh.len() * 300);
    write_ascii_stl_to(&mut buf, name, mesh).expect("writing to a Vec never fails");
    String::from_utf8(buf).expect("STL output is ASCII")
}

/// Solid name for a target file: its base name, extension included.
pub fn solid_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Write `mesh` to `path` as ASCII STL, overwriting any existing file.
#[instrument(skip(mesh), fields(triangles = mesh.len()))]
pub fn write_ascii_stl(path: &Path, mesh: &Mesh) -> Result<(), StlError> {
    let name = solid_name(path);
    let io_err = |source| StlError::Io {
        path: path.to_path_buf(),
        source,
    };

    let file = File::create(path).map_err(io_err)?;
    write_ascii_stl_to(BufWriter::new(file), &name, mesh).map_err(io_err)?;

    debug!(solid = %name, "wrote ascii stl");
    Ok(())
}
