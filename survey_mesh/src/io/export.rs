//! Writers that hand finished surfaces to external viewers.

use std::fmt::{self, Write as _};
use std::io;

use serde::Serialize;

use crate::geometry::Point3;
use crate::surface::Surface;

use super::write_string;

#[derive(Serialize)]
struct CatalogExport<'a> {
    offset: Option<Point3>,
    surfaces: &'a [Surface],
}

/// Serializes a batch of surfaces and its shared offset to JSON.
pub fn surfaces_to_json(surfaces: &[Surface], offset: Option<Point3>) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&CatalogExport { offset, surfaces })
}

/// Writes a batch of surfaces and its shared offset to a JSON file.
pub fn write_surfaces_json(path: &str, surfaces: &[Surface], offset: Option<Point3>) -> io::Result<()> {
    let json = surfaces_to_json(surfaces, offset).map_err(io::Error::other)?;
    write_string(path, &json)
}

/// Renders a surface as Wavefront OBJ with positions, UVs and faces.
pub fn surface_to_obj(surface: &Surface) -> Result<String, fmt::Error> {
    let mut obj = String::new();
    writeln!(&mut obj, "# {}", surface.name)?;
    if let Some(source) = &surface.metadata.source_name {
        writeln!(&mut obj, "# source {source}")?;
    }
    let o = surface.offset;
    writeln!(&mut obj, "# offset {} {} {}", o.x, o.y, o.z)?;
    writeln!(&mut obj, "o {}", surface.name.replace(char::is_whitespace, "_"))?;
    for p in surface.positions.chunks_exact(3) {
        writeln!(&mut obj, "v {} {} {}", p[0], p[1], p[2])?;
    }
    for uv in surface.uvs.chunks_exact(2) {
        writeln!(&mut obj, "vt {} {}", uv[0], uv[1])?;
    }
    for t in 0..surface.triangle_count() {
        let a = t * 3 + 1;
        writeln!(&mut obj, "f {a}/{a} {}/{} {}/{}", a + 1, a + 1, a + 2, a + 2)?;
    }
    Ok(obj)
}

/// Writes a surface to an OBJ file.
pub fn write_surface_obj(path: &str, surface: &Surface) -> io::Result<()> {
    let obj = surface_to_obj(surface).map_err(io::Error::other)?;
    write_string(path, &obj)
}
