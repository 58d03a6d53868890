//! Selection of the declared faces that become mesh triangles.

use serde::{Deserialize, Serialize};

use crate::geometry::Point3;
use crate::io::landxml::{Face, PointTable};

/// Which declared faces are dropped before meshing.
///
/// Both rules are independent. The defaults drop hidden faces and keep
/// boundary faces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FacePolicy {
    /// Drop faces flagged invisible (`i="1"`).
    pub exclude_invisible: bool,
    /// Drop faces with a `0` neighbor, i.e. faces on the surface boundary.
    pub exclude_boundary: bool,
}

impl Default for FacePolicy {
    fn default() -> Self {
        Self {
            exclude_invisible: true,
            exclude_boundary: false,
        }
    }
}

/// A face that referenced a point id missing from the point table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPoint {
    /// Position of the face in declaration order.
    pub face_index: usize,
    pub point_id: String,
}

/// Outcome of [`filter_faces`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterReport {
    /// Corner positions of the retained faces, in declaration order.
    pub triangles: Vec<[Point3; 3]>,
    pub dropped_invisible: usize,
    pub dropped_boundary: usize,
    /// Faces not declaring exactly three point ids.
    pub dropped_malformed: usize,
    pub missing_points: Vec<MissingPoint>,
}

impl FilterReport {
    pub fn kept(&self) -> usize {
        self.triangles.len()
    }

    pub fn dropped(&self) -> usize {
        self.dropped_invisible
            + self.dropped_boundary
            + self.dropped_malformed
            + self.missing_points.len()
    }
}

/// Resolves the faces allowed by `policy` into vertex triples.
///
/// Unresolved point ids drop the face and are reported as
/// [`MissingPoint`]s; they never fail the call.
pub fn filter_faces(faces: &[Face], points: &PointTable, policy: &FacePolicy) -> FilterReport {
    let mut report = FilterReport::default();
    for (face_index, face) in faces.iter().enumerate() {
        if policy.exclude_invisible && face.invisible {
            report.dropped_invisible += 1;
            continue;
        }
        if policy.exclude_boundary && face.is_boundary() {
            report.dropped_boundary += 1;
            continue;
        }
        if face.point_ids.len() != 3 {
            log::debug!(
                "face {face_index} declares {} point ids, skipping",
                face.point_ids.len()
            );
            report.dropped_malformed += 1;
            continue;
        }
        match resolve(&face.point_ids, points) {
            Ok(corners) => report.triangles.push(corners),
            Err(point_id) => {
                log::warn!("missing point id {point_id} in face {face_index}, skipping face");
                report.missing_points.push(MissingPoint {
                    face_index,
                    point_id: point_id.to_string(),
                });
            }
        }
    }
    report
}

fn resolve<'a>(ids: &'a [String], points: &PointTable) -> Result<[Point3; 3], &'a str> {
    let mut corners = [Point3::ORIGIN; 3];
    for (corner, id) in corners.iter_mut().zip(ids) {
        *corner = *points.get(id).ok_or(id.as_str())?;
    }
    Ok(corners)
}
