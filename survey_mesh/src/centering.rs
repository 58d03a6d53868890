//! Bounding box centering of position buffers.

use serde::{Deserialize, Serialize};

use crate::geometry::{BoundingBox, Point3};

/// How a load batch is moved toward the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CenteringMode {
    /// One offset, taken from the first surface, applied to the whole batch.
    #[default]
    Shared,
    /// Every surface is centered on its own bounding box.
    PerSurface,
    /// Positions are left where they are.
    None,
}

/// Center of the bounding box of `positions`, or the origin if empty.
pub fn bounding_center(positions: &[f64]) -> Point3 {
    BoundingBox::from_positions(positions)
        .map(|bb| bb.center())
        .unwrap_or(Point3::ORIGIN)
}

/// Subtracts `offset` from every position in place.
pub fn apply_offset(positions: &mut [f64], offset: Point3) {
    for p in positions.chunks_exact_mut(3) {
        p[0] -= offset.x;
        p[1] -= offset.y;
        p[2] -= offset.z;
    }
}

/// Centers a buffer on its own bounding box and returns the offset used.
pub fn center_single(positions: &mut [f64]) -> Point3 {
    let offset = bounding_center(positions);
    apply_offset(positions, offset);
    offset
}

/// Moves every buffer by the bounding box center of the first one.
///
/// The remaining buffers' own centers are never consulted, so the relative
/// placement of the batch is preserved. Returns `None` for an empty batch.
pub fn align_batch<'a, I>(batch: I) -> Option<Point3>
where
    I: IntoIterator<Item = &'a mut Vec<f64>>,
{
    let mut iter = batch.into_iter();
    let first = iter.next()?;
    let offset = center_single(first);
    for positions in iter {
        apply_offset(positions, offset);
    }
    Some(offset)
}
