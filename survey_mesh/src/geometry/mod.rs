//! Basic geometry primitives shared by the mesh pipeline.

mod point3;

pub use point3::Point3;

/// Component axis of a [`Point3`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Offset of this axis inside an interleaved `x, y, z` triple.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Axis aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point3,
    pub max: Point3,
}

impl BoundingBox {
    /// Computes the bounding box of a flat `x, y, z, x, y, z, ...` buffer.
    ///
    /// Returns `None` when the buffer holds no complete position.
    pub fn from_positions(positions: &[f64]) -> Option<Self> {
        let mut iter = positions.chunks_exact(3);
        let first = iter.next()?;
        let mut min = Point3::new(first[0], first[1], first[2]);
        let mut max = min;
        for p in iter {
            min.x = min.x.min(p[0]);
            min.y = min.y.min(p[1]);
            min.z = min.z.min(p[2]);
            max.x = max.x.max(p[0]);
            max.y = max.y.max(p[1]);
            max.z = max.z.max(p[2]);
        }
        Some(Self { min, max })
    }

    /// Returns the center of the box. Halves before adding so boxes near
    /// `f64::MAX` do not overflow.
    pub fn center(&self) -> Point3 {
        Point3::new(
            self.min.x / 2.0 + self.max.x / 2.0,
            self.min.y / 2.0 + self.max.y / 2.0,
            self.min.z / 2.0 + self.max.z / 2.0,
        )
    }

    /// Returns the extent of the box along each axis.
    pub fn size(&self) -> Point3 {
        self.max - self.min
    }

    /// Lower bound along `axis`.
    pub fn min_on(&self, axis: Axis) -> f64 {
        self.min.to_array()[axis.index()]
    }

    /// Extent along `axis`.
    pub fn size_on(&self, axis: Axis) -> f64 {
        self.size().to_array()[axis.index()]
    }
}
