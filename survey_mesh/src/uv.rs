//! Planar texture coordinates for terrain meshes.

use crate::geometry::{Axis, BoundingBox};

/// Default repeat count of the surface material across the mesh extent.
pub const DEFAULT_TILING_FACTOR: f64 = 4.0;

/// Projects positions onto the `x`/`z` plane of a y-up frame.
pub fn generate_uv(positions: &[f64], tiling_factor: f64) -> Vec<f64> {
    generate_uv_on(positions, tiling_factor, (Axis::X, Axis::Z))
}

/// Projects positions onto the plane spanned by `axes`.
///
/// Each coordinate is normalized by `max(extent, 1)` and scaled by
/// `tiling_factor`, so a flat axis maps to `0` instead of dividing by zero.
/// Extents that overflow `f64` also map to `0` rather than `NaN`.
pub fn generate_uv_on(positions: &[f64], tiling_factor: f64, axes: (Axis, Axis)) -> Vec<f64> {
    let Some(bb) = BoundingBox::from_positions(positions) else {
        return Vec::new();
    };
    let (u_axis, v_axis) = axes;
    let (u_min, v_min) = (bb.min_on(u_axis), bb.min_on(v_axis));
    let u_size = bb.size_on(u_axis).max(1.0);
    let v_size = bb.size_on(v_axis).max(1.0);

    let mut uvs = Vec::with_capacity(positions.len() / 3 * 2);
    for p in positions.chunks_exact(3) {
        uvs.push(normalized(p[u_axis.index()], u_min, u_size) * tiling_factor);
        uvs.push(normalized(p[v_axis.index()], v_min, v_size) * tiling_factor);
    }
    uvs
}

fn normalized(value: f64, min: f64, size: f64) -> f64 {
    let t = (value - min) / size;
    if t.is_finite() {
        t.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uv_spans_tiling_range() {
        let positions = [0.0, 5.0, 0.0, 10.0, 7.0, 20.0, 5.0, 1.0, 10.0];
        let uvs = generate_uv(&positions, 4.0);
        assert_eq!(uvs, vec![0.0, 0.0, 4.0, 4.0, 2.0, 2.0]);
    }

    #[test]
    fn flat_axis_maps_to_zero() {
        let positions = [0.0, 1.0, 3.0, 8.0, 2.0, 3.0, 4.0, 3.0, 3.0];
        let uvs = generate_uv(&positions, 4.0);
        assert!(uvs.iter().all(|v| v.is_finite()));
        for v in uvs.iter().skip(1).step_by(2) {
            assert_eq!(*v, 0.0);
        }
    }

    #[test]
    fn small_extent_stays_below_tiling() {
        let positions = [0.0, 0.0, 0.0, 0.5, 0.0, 0.25, 0.0, 0.0, 0.0];
        let uvs = generate_uv(&positions, 4.0);
        assert_eq!(&uvs[2..4], &[2.0, 1.0]);
    }

    #[test]
    fn identity_frame_projects_on_xy() {
        let positions = [0.0, 0.0, 9.0, 2.0, 4.0, -9.0];
        let uvs = generate_uv_on(&positions, 1.0, (Axis::X, Axis::Y));
        assert_eq!(uvs, vec![0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn overflowing_extent_stays_finite() {
        let positions = [-1.7e308, 0.0, -1.7e308, 1.7e308, 0.0, 1.7e308, 0.0, 0.0, 0.0];
        let uvs = generate_uv(&positions, 4.0);
        assert_eq!(uvs.len(), 6);
        assert!(uvs.iter().all(|v| v.is_finite() && (0.0..=4.0).contains(v)));
    }

    #[test]
    fn empty_buffer_has_no_uvs() {
        assert!(generate_uv(&[], 4.0).is_empty());
    }
}
