//! Mesh surfaces built from LandXML TIN documents.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::centering::{center_single, CenteringMode};
use crate::error::{SurfaceError, SurfaceResult};
use crate::filter::{filter_faces, FacePolicy, FilterReport};
use crate::geometry::Point3;
use crate::io::landxml::extract;
use crate::transform::AxisTransform;
use crate::uv::{generate_uv_on, DEFAULT_TILING_FACTOR};

/// Name given to surfaces parsed outside of a catalog.
pub const DEFAULT_SURFACE_NAME: &str = "LandXML_Surface";

/// Every knob of the document to mesh pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadPolicy {
    pub faces: FacePolicy,
    pub transform: AxisTransform,
    pub centering: CenteringMode,
    /// Repeat count of the texture across the surface extent.
    pub tiling_factor: f64,
}

impl Default for LoadPolicy {
    fn default() -> Self {
        Self {
            faces: FacePolicy::default(),
            transform: AxisTransform::default(),
            centering: CenteringMode::default(),
            tiling_factor: DEFAULT_TILING_FACTOR,
        }
    }
}

impl LoadPolicy {
    pub fn validate(&self) -> SurfaceResult<()> {
        if !self.tiling_factor.is_finite() || self.tiling_factor <= 0.0 {
            return Err(SurfaceError::Config(format!(
                "tiling factor must be positive, got {}",
                self.tiling_factor
            )));
        }
        Ok(())
    }
}

/// Descriptive data attached to a surface by the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SurfaceMetadata {
    /// File name without its extension.
    pub nickname: Option<String>,
    /// Identifier the document was read from.
    pub source_name: Option<String>,
    /// Number of distinct point ids in the document.
    pub point_count: Option<usize>,
}

/// A texture mapped triangle soup ready for rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub name: String,
    /// Interleaved `x, y, z` positions, three vertices per triangle.
    pub positions: Vec<f64>,
    /// Interleaved `u, v` pairs, one per vertex.
    pub uvs: Vec<f64>,
    pub metadata: SurfaceMetadata,
    /// Translation already subtracted from `positions`.
    pub offset: Point3,
}

impl Surface {
    pub fn vertex_count(&self) -> usize {
        self.positions.len() / 3
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 9
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

/// A document that went through extraction, filtering and the axis
/// transform but is not yet centered or UV mapped.
#[derive(Debug, Clone)]
pub struct PreparedSurface {
    pub positions: Vec<f64>,
    pub point_count: usize,
    /// Filter counters. `triangles` is emptied once flattened into `positions`.
    pub report: FilterReport,
}

impl PreparedSurface {
    /// Runs extraction, filtering and the axis transform over `bytes`.
    pub fn from_bytes(bytes: &[u8], policy: &LoadPolicy) -> SurfaceResult<Self> {
        let doc = extract(bytes)?;
        let mut report = filter_faces(&doc.faces, &doc.points, &policy.faces);
        let triangles = std::mem::take(&mut report.triangles);
        let positions = policy.transform.apply_to_triangles(&triangles);
        log::debug!(
            "kept {} of {} faces ({} missing points)",
            triangles.len(),
            doc.faces.len(),
            report.missing_points.len()
        );
        Ok(Self {
            positions,
            point_count: doc.points.len(),
            report,
        })
    }

    /// Generates UVs for already offset positions and produces the surface.
    pub fn finish(self, name: impl Into<String>, offset: Point3, policy: &LoadPolicy) -> Surface {
        let uvs = generate_uv_on(
            &self.positions,
            policy.tiling_factor,
            policy.transform.horizontal_axes(),
        );
        Surface {
            name: name.into(),
            positions: self.positions,
            uvs,
            metadata: SurfaceMetadata {
                point_count: Some(self.point_count),
                ..SurfaceMetadata::default()
            },
            offset,
        }
    }
}

/// Builds one surface from document bytes.
///
/// A lone surface has no batch to share an offset with, so
/// [`CenteringMode::Shared`] centers it like [`CenteringMode::PerSurface`].
pub fn parse_surface(bytes: &[u8], policy: &LoadPolicy) -> SurfaceResult<Surface> {
    parse_surface_with_report(bytes, policy).map(|(surface, _)| surface)
}

/// Like [`parse_surface`], also returning the face filter counters.
pub fn parse_surface_with_report(
    bytes: &[u8],
    policy: &LoadPolicy,
) -> SurfaceResult<(Surface, FilterReport)> {
    policy.validate()?;
    let mut prepared = PreparedSurface::from_bytes(bytes, policy)?;
    let report = std::mem::take(&mut prepared.report);
    let offset = match policy.centering {
        CenteringMode::Shared | CenteringMode::PerSurface => center_single(&mut prepared.positions),
        CenteringMode::None => Point3::ORIGIN,
    };
    Ok((prepared.finish(DEFAULT_SURFACE_NAME, offset, policy), report))
}

/// File name without its final extension, e.g. `EG_Harvey` for `EG_Harvey.xml`.
pub fn nickname_for(source: &str) -> String {
    let file_name = Path::new(source)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(source);
    match file_name.rfind('.') {
        Some(idx) if idx > 0 => file_name[..idx].to_string(),
        _ => file_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::centering::bounding_center;

    const TIN: &str = r#"<LandXML xmlns="http://www.landxml.org/schema/LandXML-1.2">
      <Surfaces><Surface name="EG"><Definition surfType="TIN">
        <Pnts>
          <P id="1">1000 2000 50</P>
          <P id="2">1010 2000 52</P>
          <P id="3">1010 2010 54</P>
          <P id="4">1000 2010</P>
        </Pnts>
        <Faces>
          <F>1 2 3</F>
          <F n="0 1 0">1 3 4</F>
          <F i="1">4 3 2</F>
          <F>1 2 99</F>
        </Faces>
      </Definition></Surface></Surfaces>
    </LandXML>"#;

    #[test]
    fn parse_surface_defaults() {
        let surface = parse_surface(TIN.as_bytes(), &LoadPolicy::default()).unwrap();
        assert_eq!(surface.name, DEFAULT_SURFACE_NAME);
        assert_eq!(surface.positions.len() % 9, 0);
        assert_eq!(surface.triangle_count(), 2);
        assert_eq!(surface.uvs.len(), surface.vertex_count() * 2);
        assert_eq!(surface.metadata.point_count, Some(4));
        // transformed box: x 1000..1010, y 0..54, z -2010..-2000
        assert_eq!(surface.offset, Point3::new(1005.0, 27.0, -2005.0));
        let center = bounding_center(&surface.positions);
        assert!(center.x.abs() < 1e-9 && center.y.abs() < 1e-9 && center.z.abs() < 1e-9);
        assert!(surface.uvs.iter().all(|v| (0.0..=4.0).contains(v)));
    }

    #[test]
    fn parse_surface_all_policies() {
        let policy = LoadPolicy {
            faces: FacePolicy {
                exclude_invisible: false,
                exclude_boundary: true,
            },
            centering: CenteringMode::None,
            transform: AxisTransform::Identity,
            tiling_factor: 1.0,
        };
        let surface = parse_surface(TIN.as_bytes(), &policy).unwrap();
        assert_eq!(surface.triangle_count(), 2);
        assert_eq!(surface.offset, Point3::ORIGIN);
        assert_eq!(&surface.positions[..3], &[1000.0, 2000.0, 50.0]);
        // third retained face is `4 3 2`, vertex 4 has no elevation
        assert_eq!(&surface.positions[9..12], &[1000.0, 2010.0, 0.0]);
    }

    #[test]
    fn parse_surface_rejects_bad_tiling() {
        let policy = LoadPolicy {
            tiling_factor: 0.0,
            ..LoadPolicy::default()
        };
        assert!(matches!(
            parse_surface(TIN.as_bytes(), &policy),
            Err(SurfaceError::Config(_))
        ));
    }

    #[test]
    fn prepared_surface_reports_drops() {
        let prepared = PreparedSurface::from_bytes(TIN.as_bytes(), &LoadPolicy::default()).unwrap();
        assert_eq!(prepared.report.dropped_invisible, 1);
        assert_eq!(prepared.report.missing_points.len(), 1);
        assert!(prepared.report.triangles.is_empty());
        assert_eq!(prepared.positions.len(), 18);
    }

    #[test]
    fn report_matches_parsed_surface() {
        let policy = LoadPolicy {
            centering: CenteringMode::None,
            ..LoadPolicy::default()
        };
        let (surface, report) = parse_surface_with_report(TIN.as_bytes(), &policy).unwrap();
        assert_eq!(surface.triangle_count(), 2);
        assert!(report.triangles.is_empty());
        assert_eq!(report.dropped_invisible, 1);
        assert_eq!(report.missing_points.len(), 1);
        assert_eq!(report.missing_points[0].point_id, "99");
        assert_eq!(surface.offset, Point3::ORIGIN);
        assert_eq!(surface, parse_surface(TIN.as_bytes(), &policy).unwrap());
    }

    #[test]
    fn nicknames() {
        assert_eq!(nickname_for("EG_Harvey.xml"), "EG_Harvey");
        assert_eq!(nickname_for("geometry/FG.final.xml"), "FG.final");
        assert_eq!(nickname_for("README"), "README");
        assert_eq!(nickname_for(".hidden"), ".hidden");
    }
}
