//! Uniform-grid index ("Squares", spec §4.4).
//!
//! Buckets players into fixed-size square cells; answers a sensor's query
//! by scanning every cell its disc's bounding square overlaps. Grounded on
//! `game::spatial::SpatialGrid` (the teacher's collision grid) for the
//! hashbrown-backed cell map and swap-remove eviction, and on
//! `original_source/src/squares/{squares.hpp,squares.cpp}` for the exact
//! cell-packing formula and tick semantics.

use hashbrown::HashMap;
use rustc_hash::FxBuildHasher;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tracing::trace;

use crate::delta::{AoiUpdateInfo, SensorUpdateInfo, TickUpdates};
use crate::diff;
use crate::entity::{Nuid, PlayerFlags, Position, SensorId};

type FxHashMap<K, V> = HashMap<K, V, FxBuildHasher>;

new_key_type! {
    struct PlayerKey;
}

/// A 64-bit cell identifier: `x` cell coordinate in the high 32 bits, `z`
/// cell coordinate in the low 32 bits, both signed and floor-divided.
pub type CellId = u64;

#[inline]
fn coord_to_cell(coord: f32, inv_cell_size: f32) -> i32 {
    (coord * inv_cell_size).floor() as i32
}

#[inline]
fn cell_id(xi: i32, zi: i32) -> CellId {
    ((xi as u32 as u64) << 32) | (zi as u32 as u64)
}

#[inline]
fn pos_to_cell(x: f32, z: f32, inv_cell_size: f32) -> CellId {
    cell_id(
        coord_to_cell(x, inv_cell_size),
        coord_to_cell(z, inv_cell_size),
    )
}

struct Sensor {
    sensor_id: SensorId,
    radius: f32,
    radius_sq: f32,
    /// Double-buffered AOI set: `aoi_players[cur]` is last tick's set,
    /// `aoi_players[1 - cur]` is written by the current tick.
    aoi_players: [Vec<PlayerKey>; 2],
}

impl Sensor {
    fn new(sensor_id: SensorId, radius: f32) -> Self {
        Self {
            sensor_id,
            radius,
            radius_sq: radius * radius,
            aoi_players: [Vec::new(), Vec::new()],
        }
    }
}

struct Player {
    nuid: Nuid,
    pos: Position,
    last_pos: Position,
    flags: PlayerFlags,
    sensors: SmallVec<[Sensor; 2]>,
    /// `None` while unbucketed (only true for a `Removed` player between
    /// `remove_player` and the next `tick()`).
    cell: Option<(CellId, usize)>,
}

/// Uniform-grid AOI index.
pub struct GridIndex {
    cell_size: f32,
    inv_cell_size: f32,
    cur: usize,
    players: SlotMap<PlayerKey, Player>,
    by_nuid: FxHashMap<Nuid, PlayerKey>,
    cells: FxHashMap<CellId, Vec<PlayerKey>>,
}

impl GridIndex {
    /// Constructs a grid index with the given cell size (default 200,
    /// spec §6). `cell_size` is fixed for the life of the index.
    pub fn new(cell_size: f32) -> Self {
        Self {
            cell_size,
            inv_cell_size: 1.0 / cell_size,
            cur: 0,
            players: SlotMap::with_key(),
            by_nuid: FxHashMap::default(),
            cells: FxHashMap::default(),
        }
    }

    fn remove_from_cell(&mut self, key: PlayerKey) {
        let Some((cell, index)) = self.players[key].cell.take() else {
            return;
        };
        if let Some(bucket) = self.cells.get_mut(&cell) {
            let last = bucket.len() - 1;
            bucket.swap_remove(index);
            if index < bucket.len() {
                let moved = bucket[index];
                self.players[moved].cell = Some((cell, index));
            }
            debug_assert!(last == index || index < bucket.len());
        }
    }

    fn add_to_cell(&mut self, key: PlayerKey, x: f32, z: f32) {
        let cell = pos_to_cell(x, z, self.inv_cell_size);
        let bucket = self.cells.entry(cell).or_default();
        let index = bucket.len();
        bucket.push(key);
        self.players[key].cell = Some((cell, index));
    }

    /// Idempotent w.r.t. `nuid`: re-adding an existing, non-removed player
    /// is a no-op on identity but still rebuckets at the supplied
    /// coordinates (see spec §9 open question 1 — the original silently
    /// discarded the new coordinates on this path; this repo does not).
    pub fn add_player(&mut self, nuid: Nuid, x: f32, y: f32, z: f32) {
        if let Some(&key) = self.by_nuid.get(&nuid) {
            self.remove_from_cell(key);
            let player = &mut self.players[key];
            player.flags.remove(PlayerFlags::REMOVED);
            player.pos.set(x, y, z);
            self.add_to_cell(key, x, z);
            return;
        }

        let key = self.players.insert(Player {
            nuid,
            pos: Position::new(x, y, z),
            last_pos: Position::INFINITE,
            flags: PlayerFlags::NEW,
            sensors: SmallVec::new(),
            cell: None,
        });
        self.by_nuid.insert(nuid, key);
        self.add_to_cell(key, x, z);
    }

    /// Unbuckets immediately; full erasure deferred to the next `tick()`.
    pub fn remove_player(&mut self, nuid: Nuid) {
        let Some(&key) = self.by_nuid.get(&nuid) else {
            return;
        };
        self.remove_from_cell(key);
        self.players[key].flags.insert(PlayerFlags::REMOVED);
    }

    /// No-op if the owner is missing or `sensor_id` already exists on it.
    pub fn add_sensor(&mut self, nuid: Nuid, sensor_id: SensorId, radius: f32) {
        let Some(&key) = self.by_nuid.get(&nuid) else {
            return;
        };
        let player = &mut self.players[key];
        if player.sensors.iter().any(|s| s.sensor_id == sensor_id) {
            return;
        }
        player.sensors.push(Sensor::new(sensor_id, radius));
    }

    /// Swap-removes the sensor; no coordinate-list bookkeeping is needed in
    /// this variant. No-op if the owner or sensor is missing. (The original
    /// `squares.cpp` has no `RemoveSensor` at all; this is supplemented per
    /// spec §6's interface table — see `DESIGN.md`.)
    pub fn remove_sensor(&mut self, nuid: Nuid, sensor_id: SensorId) {
        let Some(&key) = self.by_nuid.get(&nuid) else {
            return;
        };
        let sensors = &mut self.players[key].sensors;
        if let Some(idx) = sensors.iter().position(|s| s.sensor_id == sensor_id) {
            sensors.swap_remove(idx);
        }
    }

    /// No-op if `nuid` is unknown.
    pub fn update_pos(&mut self, nuid: Nuid, x: f32, y: f32, z: f32) {
        let Some(&key) = self.by_nuid.get(&nuid) else {
            return;
        };
        let player = &mut self.players[key];
        player.flags.insert(PlayerFlags::DIRTY);

        let new_cell = pos_to_cell(x, z, self.inv_cell_size);
        let old_cell = player.cell.map(|(c, _)| c);
        player.pos.set(x, y, z);

        if old_cell != Some(new_cell) {
            self.remove_from_cell(key);
            self.add_to_cell(key, x, z);
        }
    }

    /// Enumerates the cells overlapping `pos`'s `radius`-square and writes
    /// matching players into `out` (spec §4.4's `_CalcAoiPlayers`).
    fn calc_aoi_players(&self, owner: PlayerKey, pos: Position, radius: f32, out: &mut Vec<PlayerKey>) {
        out.clear();
        let radius_sq = radius * radius;
        let minxi = coord_to_cell(pos.x - radius, self.inv_cell_size);
        let maxxi = coord_to_cell(pos.x + radius, self.inv_cell_size);
        let minzi = coord_to_cell(pos.z - radius, self.inv_cell_size);
        let maxzi = coord_to_cell(pos.z + radius, self.inv_cell_size);

        for xi in minxi..=maxxi {
            for zi in minzi..=maxzi {
                let Some(bucket) = self.cells.get(&cell_id(xi, zi)) else {
                    continue;
                };
                for &other_key in bucket {
                    if other_key == owner {
                        continue;
                    }
                    let other = &self.players[other_key];
                    if other.flags.contains(PlayerFlags::REMOVED) {
                        continue;
                    }
                    let dx = pos.x - other.pos.x;
                    let dz = pos.z - other.pos.z;
                    if dx.abs() > radius || dz.abs() > radius {
                        continue;
                    }
                    if dx * dx + dz * dz < radius_sq {
                        out.push(other_key);
                    }
                }
            }
        }
    }

    /// Walks every live, non-removed player with ≥1 sensor, recomputes AOI
    /// sets, diffs against last tick, and flips the double buffer (spec §4.7).
    pub fn tick(&mut self) -> TickUpdates {
        let mut updates = TickUpdates::default();
        let new_idx = 1 - self.cur;
        let mut remove_list = Vec::new();
        let mut scratch = Vec::new();

        let keys: Vec<PlayerKey> = self.players.keys().collect();
        for key in keys {
            let removed = self.players[key].flags.contains(PlayerFlags::REMOVED);
            if removed {
                remove_list.push(key);
                continue;
            }
            if self.players[key].sensors.is_empty() {
                continue;
            }

            let nuid = self.players[key].nuid;
            let owner_pos = self.players[key].pos;
            let owner_last_pos = self.players[key].last_pos;
            let is_new = self.players[key].flags.contains(PlayerFlags::NEW);

            let mut info = AoiUpdateInfo { nuid, sensor_update_list: Vec::new() };

            for sidx in 0..self.players[key].sensors.len() {
                let (sensor_id, radius, radius_sq) = {
                    let s = &self.players[key].sensors[sidx];
                    (s.sensor_id, s.radius, s.radius_sq)
                };

                self.calc_aoi_players(key, owner_pos, radius, &mut scratch);
                self.players[key].sensors[sidx].aoi_players[new_idx] = std::mem::take(&mut scratch);

                let mut enters = Vec::new();
                let mut leaves = Vec::new();

                let old_iter: Vec<(Nuid, bool, Position)> = self.players[key].sensors[sidx]
                    .aoi_players[self.cur]
                    .iter()
                    .map(|&k| {
                        let p = &self.players[k];
                        (p.nuid, p.flags.contains(PlayerFlags::REMOVED), p.pos)
                    })
                    .collect();
                diff::check_leave(owner_pos, radius_sq, old_iter.into_iter(), &mut leaves);

                let new_iter: Vec<(Nuid, Position)> = self.players[key].sensors[sidx]
                    .aoi_players[new_idx]
                    .iter()
                    .map(|&k| (self.players[k].nuid, self.players[k].last_pos))
                    .collect();
                diff::check_enter(owner_last_pos, radius_sq, is_new, new_iter.into_iter(), &mut enters);

                if enters.is_empty() && leaves.is_empty() {
                    continue;
                }
                info.sensor_update_list.push(SensorUpdateInfo { sensor_id, enters, leaves });
            }

            if !info.sensor_update_list.is_empty() {
                updates.insert(nuid, info);
            }
            self.players[key].flags.remove(PlayerFlags::NEW);
        }

        for key in remove_list {
            let nuid = self.players[key].nuid;
            self.by_nuid.remove(&nuid);
            self.players.remove(key);
        }

        for (_, player) in self.players.iter_mut() {
            player.last_pos = player.pos;
        }

        self.cur = new_idx;
        trace!(players = self.players.len(), updates = updates.len(), "grid tick complete");
        updates
    }

    /// Number of cells currently holding at least one player.
    pub fn non_empty_cell_count(&self) -> usize {
        self.cells.values().filter(|c| !c.is_empty()).count()
    }

    /// Total live (including removed-but-not-yet-evicted) players.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }
}
