//! Beacon placement (spec §4.5 C6): static anchor players tiled across a
//! bounded rectangle, seeding join-time candidate sets for `cross::mod`.

use crate::config::Bounds;

/// World-space centers for a `beacon_x × beacon_z` tiling of `bounds`. Empty
/// if either count is zero (beacons disabled, spec §4.9's `beacons_disabled`).
pub(crate) fn tile_centers(bounds: Bounds, beacon_x: usize, beacon_z: usize) -> Vec<(f32, f32)> {
    if beacon_x == 0 || beacon_z == 0 {
        return Vec::new();
    }

    let cell_w = (bounds.xmax - bounds.xmin) / beacon_x as f32;
    let cell_h = (bounds.zmax - bounds.zmin) / beacon_z as f32;

    let mut centers = Vec::with_capacity(beacon_x * beacon_z);
    for bx in 0..beacon_x {
        for bz in 0..beacon_z {
            let x = bounds.xmin + (bx as f32 + 0.5) * cell_w;
            let z = bounds.zmin + (bz as f32 + 0.5) * cell_h;
            centers.push((x, z));
        }
    }
    centers
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_beacon_centers_bounds() {
        let bounds = Bounds::new(-1000.0, 1000.0, -1000.0, 1000.0);
        let centers = tile_centers(bounds, 1, 1);
        assert_eq!(centers, vec![(0.0, 0.0)]);
    }

    #[test]
    fn disabled_when_either_count_is_zero() {
        let bounds = Bounds::new(-1000.0, 1000.0, -1000.0, 1000.0);
        assert!(tile_centers(bounds, 0, 3).is_empty());
        assert!(tile_centers(bounds, 3, 0).is_empty());
    }

    #[test]
    fn two_by_one_splits_x_axis() {
        let bounds = Bounds::new(0.0, 200.0, 0.0, 100.0);
        let centers = tile_centers(bounds, 2, 1);
        assert_eq!(centers, vec![(50.0, 50.0), (150.0, 50.0)]);
    }
}
