//! A common trait over both index variants, used to drive shared property
//! tests (spec §8) against `grid::GridIndex` and `cross::CrossIndex` without
//! duplicating the test bodies. Production callers should prefer the
//! concrete types directly — the trait exists for testing, not dispatch.

use crate::delta::TickUpdates;
use crate::entity::{Nuid, SensorId};

/// The external surface both index strategies expose (spec §6).
pub trait AoiIndex {
    /// Adds a player at `(x, y, z)`, or moves an existing one there and
    /// clears its `Removed` flag if it was pending eviction.
    fn add_player(&mut self, nuid: Nuid, x: f32, y: f32, z: f32);

    /// Marks a player for removal at the next `tick()`. No-op if unknown.
    fn remove_player(&mut self, nuid: Nuid);

    /// Attaches a sensor of the given radius to a player. No-op if the
    /// player is unknown or already has a sensor with this `sensor_id`.
    fn add_sensor(&mut self, nuid: Nuid, sensor_id: SensorId, radius: f32);

    /// Detaches a sensor. No-op if the player or sensor is unknown.
    fn remove_sensor(&mut self, nuid: Nuid, sensor_id: SensorId);

    /// Updates a player's position. No-op if unknown.
    fn update_pos(&mut self, nuid: Nuid, x: f32, y: f32, z: f32);

    /// Recomputes every sensor's AOI set, returns the enter/leave deltas
    /// since the previous `tick()`, and evicts players removed since then.
    fn tick(&mut self) -> TickUpdates;

    /// Number of players currently tracked (including those pending
    /// removal until their next `tick()`).
    fn player_count(&self) -> usize;
}

impl AoiIndex for crate::grid::GridIndex {
    fn add_player(&mut self, nuid: Nuid, x: f32, y: f32, z: f32) {
        crate::grid::GridIndex::add_player(self, nuid, x, y, z)
    }

    fn remove_player(&mut self, nuid: Nuid) {
        crate::grid::GridIndex::remove_player(self, nuid)
    }

    fn add_sensor(&mut self, nuid: Nuid, sensor_id: SensorId, radius: f32) {
        crate::grid::GridIndex::add_sensor(self, nuid, sensor_id, radius)
    }

    fn remove_sensor(&mut self, nuid: Nuid, sensor_id: SensorId) {
        crate::grid::GridIndex::remove_sensor(self, nuid, sensor_id)
    }

    fn update_pos(&mut self, nuid: Nuid, x: f32, y: f32, z: f32) {
        crate::grid::GridIndex::update_pos(self, nuid, x, y, z)
    }

    fn tick(&mut self) -> TickUpdates {
        crate::grid::GridIndex::tick(self)
    }

    fn player_count(&self) -> usize {
        crate::grid::GridIndex::player_count(self)
    }
}

impl AoiIndex for crate::cross::CrossIndex {
    fn add_player(&mut self, nuid: Nuid, x: f32, y: f32, z: f32) {
        crate::cross::CrossIndex::add_player(self, nuid, x, y, z)
    }

    fn remove_player(&mut self, nuid: Nuid) {
        crate::cross::CrossIndex::remove_player(self, nuid)
    }

    fn add_sensor(&mut self, nuid: Nuid, sensor_id: SensorId, radius: f32) {
        crate::cross::CrossIndex::add_sensor(self, nuid, sensor_id, radius)
    }

    fn remove_sensor(&mut self, nuid: Nuid, sensor_id: SensorId) {
        crate::cross::CrossIndex::remove_sensor(self, nuid, sensor_id)
    }

    fn update_pos(&mut self, nuid: Nuid, x: f32, y: f32, z: f32) {
        crate::cross::CrossIndex::update_pos(self, nuid, x, y, z)
    }

    fn tick(&mut self) -> TickUpdates {
        crate::cross::CrossIndex::tick(self)
    }

    fn player_count(&self) -> usize {
        crate::cross::CrossIndex::player_count(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridConfig;
    use crate::cross::CrossIndex;
    use crate::grid::GridIndex;

    fn drive_basic_enter<I: AoiIndex>(idx: &mut I) {
        idx.add_player(1, 0.0, 0.0, 0.0);
        idx.add_sensor(1, 1, 50.0);
        idx.add_player(2, 10.0, 0.0, 10.0);
        let updates = idx.tick();
        assert_eq!(updates[&1].sensor_update_list[0].enters, vec![2]);
    }

    #[test]
    fn grid_and_cross_agree_on_basic_enter() {
        let mut grid = GridIndex::new(GridConfig::default().cell_size);
        drive_basic_enter(&mut grid);

        let mut cross = CrossIndex::new(crate::config::CrossConfig::default());
        drive_basic_enter(&mut cross);
    }
}
