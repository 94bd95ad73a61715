//! Construction-time configuration for both index variants.
//!
//! Shaped like the teacher's `ServerConfig`: plain data structs with a
//! `Default` impl carrying the spec's documented defaults. No
//! environment-variable loading is added here — spec §1 excludes a config
//! *source* (env/file/CLI) as an external collaborator, but the
//! struct-with-defaults shape itself is ambient and kept regardless.

/// Axis-aligned world bounds used to tile beacons across the map (Cross only).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub xmin: f32,
    pub xmax: f32,
    pub zmin: f32,
    pub zmax: f32,
}

impl Bounds {
    pub const fn new(xmin: f32, xmax: f32, zmin: f32, zmax: f32) -> Self {
        Self { xmin, xmax, zmin, zmax }
    }
}

/// Configuration for the uniform-grid index ("Squares").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridConfig {
    /// Side length of each square cell, in world units. Should exceed the
    /// largest expected sensor radius for best locality; correctness does
    /// not depend on it.
    pub cell_size: f32,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self { cell_size: 200.0 }
    }
}

/// Configuration for the sort-and-sweep index ("Cross").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossConfig {
    pub bounds: Bounds,
    /// Number of beacon columns to tile across `bounds`. `0` (with
    /// `beacon_z == 0`) disables beacons entirely.
    pub beacon_x: usize,
    /// Number of beacon rows to tile across `bounds`.
    pub beacon_z: usize,
    /// Sensor radius given to every beacon.
    pub beacon_radius: f32,
}

impl Default for CrossConfig {
    fn default() -> Self {
        Self {
            bounds: Bounds::new(-1000.0, 1000.0, -1000.0, 1000.0),
            beacon_x: 0,
            beacon_z: 0,
            beacon_radius: 1000.0,
        }
    }
}

impl CrossConfig {
    /// `true` when no beacons were requested — `AddPlayer`/`AddSensor`
    /// then skip beacon-seeding entirely (spec §4.5).
    pub fn beacons_disabled(&self) -> bool {
        self.beacon_x == 0 && self.beacon_z == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_default_matches_spec() {
        assert_eq!(GridConfig::default().cell_size, 200.0);
    }

    #[test]
    fn cross_default_has_no_beacons() {
        assert!(CrossConfig::default().beacons_disabled());
    }
}
