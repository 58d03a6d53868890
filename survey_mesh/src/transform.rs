//! Conversion from survey axis order to viewer axis order.

use serde::{Deserialize, Serialize};

use crate::geometry::{Axis, Point3};

/// Axis convention applied to every vertex after filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisTransform {
    /// Survey `(easting, northing, elevation)` to a y-up frame: `(x, z, -y)`.
    #[default]
    SurveyToYUp,
    /// Keep source coordinates unchanged.
    Identity,
}

impl AxisTransform {
    pub fn apply(self, p: Point3) -> Point3 {
        match self {
            AxisTransform::SurveyToYUp => transform(p.x, p.y, p.z),
            AxisTransform::Identity => p,
        }
    }

    /// The two horizontal axes of the target frame, used for UV projection.
    pub fn horizontal_axes(self) -> (Axis, Axis) {
        match self {
            AxisTransform::SurveyToYUp => (Axis::X, Axis::Z),
            AxisTransform::Identity => (Axis::X, Axis::Y),
        }
    }

    /// Flattens filtered triangles into an interleaved position buffer.
    pub fn apply_to_triangles(self, triangles: &[[Point3; 3]]) -> Vec<f64> {
        let mut positions = Vec::with_capacity(triangles.len() * 9);
        for tri in triangles {
            for &corner in tri {
                positions.extend_from_slice(&self.apply(corner).to_array());
            }
        }
        positions
    }
}

/// Maps a survey coordinate to the y-up target frame.
pub fn transform(x: f64, y: f64, z: f64) -> Point3 {
    Point3::new(x, z, -y)
}
