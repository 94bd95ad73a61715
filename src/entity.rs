//! Shared entity primitives: positions, IDs, and player status flags.
//!
//! Both index variants (`grid`, `cross`) build their own `Player`/`Sensor`
//! types on top of these — the fields that differ (cell bucketing vs. coord
//! list nodes) live in each variant's module.

use bitflags::bitflags;

/// Opaque 64-bit player identifier, unique across the whole index.
pub type Nuid = u64;

/// Sensor identifier, unique within its owning player (not globally).
pub type SensorId = u64;

/// A point on the horizontal plane. `y` is stored but never influences
/// adjacency — only `x` and `z` are geometrically significant (spec §3).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Position {
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Sentinel used for a player's `last_pos` before its first tick —
    /// far enough from any realistic coordinate that no sensor test can
    /// accidentally consider it co-resident.
    pub const INFINITE: Position = Position::new(f32::MIN, f32::MIN, f32::MIN);

    #[inline]
    pub fn set(&mut self, x: f32, y: f32, z: f32) {
        self.x = x;
        self.y = y;
        self.z = z;
    }

    /// Squared Euclidean distance on the x-z plane.
    #[inline]
    pub fn dist_sq_xz(&self, other: &Position) -> f32 {
        let dx = self.x - other.x;
        let dz = self.z - other.z;
        dx * dx + dz * dz
    }
}

bitflags! {
    /// Independent status bits carried by every player.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct PlayerFlags: u8 {
        /// Marked for removal; evicted at the next `tick()`.
        const REMOVED = 1 << 0;
        /// Set on any position mutation. The engine never reads this bit
        /// itself — it exists for external consumers that want to know
        /// whether a player moved since the last time they checked.
        const DIRTY   = 1 << 1;
        /// Set at creation, cleared at the end of the player's first tick.
        /// Suppresses the "compare against last_pos" enter rule, since a
        /// brand-new player has no meaningful prior position.
        const NEW     = 1 << 2;
        /// A static anchor player (Cross only). Never emitted in deltas,
        /// never itself the subject of an `AoiUpdateInfo`.
        const BEACON  = 1 << 3;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dist_sq_ignores_y() {
        let a = Position::new(0.0, 1000.0, 0.0);
        let b = Position::new(3.0, -500.0, 4.0);
        assert_eq!(a.dist_sq_xz(&b), 25.0);
    }

    #[test]
    fn flags_are_independent_bits() {
        let mut flags = PlayerFlags::empty();
        flags.insert(PlayerFlags::NEW);
        assert!(flags.contains(PlayerFlags::NEW));
        assert!(!flags.contains(PlayerFlags::REMOVED));

        flags.insert(PlayerFlags::REMOVED);
        flags.remove(PlayerFlags::NEW);
        assert!(flags.contains(PlayerFlags::REMOVED));
        assert!(!flags.contains(PlayerFlags::NEW));
    }
}
