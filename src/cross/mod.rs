//! Sort-and-sweep AOI index ("Cross", spec §4.5–§4.7 C5/C6).
//!
//! Two sorted doubly-linked lists (one per axis) of player and sensor-guard
//! endpoints. Position updates re-sort the affected nodes with a local
//! bidirectional bubble; each swap that crosses a player node past a guard
//! node (or vice versa) is a candidate-set event. Grounded on
//! `original_source/src/cross/{cross.hpp,cross.cpp}` for the swap
//! classification table and beacon-seeding mechanics, and on `grid::GridIndex`
//! for the arena/hashbrown idioms applied to the player store.

mod beacon;
mod list;

use hashbrown::HashMap;
use rustc_hash::FxBuildHasher;
use slotmap::{new_key_type, SlotMap};
use smallvec::SmallVec;
use tracing::trace;

use crate::config::{Bounds, CrossConfig};
use crate::delta::{AoiUpdateInfo, SensorUpdateInfo, TickUpdates};
use crate::diff;
use crate::entity::{Nuid, PlayerFlags, Position, SensorId};
use crate::error::ConstraintError;

use list::{CoordNode, NodeKey, NodeKind, NodeList, Nodes};

type FxHashMap<K, V> = HashMap<K, V, FxBuildHasher>;

new_key_type! {
    pub(crate) struct PlayerKey;
}

/// Sensor identifier reserved for every beacon's single sensor. Beacons
/// never expose sensor IDs externally, so collisions with caller-chosen IDs
/// are not observable.
const BEACON_SENSOR_ID: SensorId = 0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    X,
    Z,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Left,
    Right,
}

struct Sensor {
    sensor_id: SensorId,
    radius: f32,
    radius_sq: f32,
    left_x: NodeKey,
    right_x: NodeKey,
    left_z: NodeKey,
    right_z: NodeKey,
    /// Candidate set: AABB superset of the current AOI set (spec glossary).
    candidates: Vec<PlayerKey>,
    aoi_players: [Vec<PlayerKey>; 2],
}

struct Player {
    nuid: Nuid,
    pos: Position,
    last_pos: Position,
    flags: PlayerFlags,
    x_node: NodeKey,
    z_node: NodeKey,
    sensors: SmallVec<[Sensor; 2]>,
    /// Beacon-only: `other_nuid -> sensor_ids (owned by that beacon) that
    /// currently count `other_nuid` as a candidate`. Used to seed newly
    /// joining players (spec §4.5).
    detected_by: FxHashMap<Nuid, SmallVec<[SensorId; 4]>>,
}

/// Sort-and-sweep AOI index.
pub struct CrossIndex {
    bounds: Bounds,
    beacon_radius: f32,
    cur: usize,
    nodes: Nodes,
    list_x: NodeList,
    list_z: NodeList,
    players: SlotMap<PlayerKey, Player>,
    by_nuid: FxHashMap<Nuid, PlayerKey>,
    beacons: Vec<PlayerKey>,
}

impl CrossIndex {
    /// Fallible constructor: validates `config.bounds` when beacons are
    /// requested (spec §6 — panics via `new`, returns here instead).
    pub fn try_new(config: CrossConfig) -> Result<Self, ConstraintError> {
        let b = config.bounds;
        if !config.beacons_disabled() {
            if b.xmax <= b.xmin {
                return Err(ConstraintError::InvalidXBounds { xmin: b.xmin, xmax: b.xmax });
            }
            if b.zmax <= b.zmin {
                return Err(ConstraintError::InvalidZBounds { zmin: b.zmin, zmax: b.zmax });
            }
        }

        let mut index = Self {
            bounds: b,
            beacon_radius: config.beacon_radius,
            cur: 0,
            nodes: Nodes::with_key(),
            list_x: NodeList::default(),
            list_z: NodeList::default(),
            players: SlotMap::with_key(),
            by_nuid: FxHashMap::default(),
            beacons: Vec::new(),
        };

        if !config.beacons_disabled() {
            index.place_beacons(config.beacon_x, config.beacon_z);
        }

        Ok(index)
    }

    /// Panics on invalid bounds (spec §6: "Panics if xmax ≤ xmin or zmax ≤
    /// zmin when beacons are requested").
    pub fn new(config: CrossConfig) -> Self {
        Self::try_new(config).expect("invalid CrossConfig bounds")
    }

    fn place_beacons(&mut self, beacon_x: usize, beacon_z: usize) {
        let centers = beacon::tile_centers(self.bounds, beacon_x, beacon_z);
        let mut nuid = Nuid::MAX;
        for (x, z) in centers {
            let key = self.spawn_player(nuid, x, 0.0, z, true);
            self.by_nuid.insert(nuid, key);
            self.beacons.push(key);
            self.add_sensor(nuid, BEACON_SENSOR_ID, self.beacon_radius);
            nuid -= 1;
        }
    }

    fn nearest_beacon(&self, x: f32, z: f32) -> Option<PlayerKey> {
        let target = Position::new(x, 0.0, z);
        self.beacons
            .iter()
            .copied()
            .min_by(|&a, &b| {
                let da = self.players[a].pos.dist_sq_xz(&target);
                let db = self.players[b].pos.dist_sq_xz(&target);
                da.total_cmp(&db)
            })
    }

    fn sensor_index(&self, owner: PlayerKey, sensor_id: SensorId) -> Option<usize> {
        self.players.get(owner)?.sensors.iter().position(|s| s.sensor_id == sensor_id)
    }

    // ---- candidate-set maintenance -------------------------------------

    /// Inserts `candidate` into `(owner, sensor_id)`'s candidate set if the
    /// AABB test holds and it isn't already present. No-op if `candidate` is
    /// `owner` itself (a player never candidates its own sensor). When
    /// `candidate` is itself a beacon, records `(owner's nuid, sensor_id)` in
    /// the beacon's `detected_by` — the original keys this map by the
    /// *candidate* (a beacon), not the sensor owner, confirmed in
    /// `Sensor::AddCandidate`.
    fn add_candidate(&mut self, owner: PlayerKey, sensor_id: SensorId, candidate: PlayerKey) {
        if owner == candidate {
            return;
        }
        let Some(sidx) = self.sensor_index(owner, sensor_id) else { return };
        let owner_pos = self.players[owner].pos;
        let radius = self.players[owner].sensors[sidx].radius;
        let cand_pos = self.players[candidate].pos;
        let dx = owner_pos.x - cand_pos.x;
        let dz = owner_pos.z - cand_pos.z;
        if dx.abs() >= radius || dz.abs() >= radius {
            return;
        }

        let candidates = &mut self.players[owner].sensors[sidx].candidates;
        if candidates.contains(&candidate) {
            return;
        }
        candidates.push(candidate);

        if self.players[candidate].flags.contains(PlayerFlags::BEACON) {
            let owner_nuid = self.players[owner].nuid;
            self.players[candidate].detected_by.entry(owner_nuid).or_default().push(sensor_id);
        }
    }

    fn remove_candidate(&mut self, owner: PlayerKey, sensor_id: SensorId, candidate: PlayerKey) {
        let Some(sidx) = self.sensor_index(owner, sensor_id) else { return };
        let candidates = &mut self.players[owner].sensors[sidx].candidates;
        let Some(pos) = candidates.iter().position(|&k| k == candidate) else { return };
        candidates.swap_remove(pos);

        if self.players[candidate].flags.contains(PlayerFlags::BEACON) {
            let owner_nuid = self.players[owner].nuid;
            if let Some(ids) = self.players[candidate].detected_by.get_mut(&owner_nuid) {
                if let Some(p) = ids.iter().position(|&s| s == sensor_id) {
                    ids.swap_remove(p);
                }
            }
        }
    }

    fn seed_from_beacon(&mut self, beacon_key: PlayerKey, new_key: PlayerKey) {
        let detected: Vec<(Nuid, SmallVec<[SensorId; 4]>)> = self.players[beacon_key]
            .detected_by
            .iter()
            .map(|(&nuid, ids)| (nuid, ids.clone()))
            .collect();

        for (other_nuid, sensor_ids) in detected {
            let Some(&owner_key) = self.by_nuid.get(&other_nuid) else { continue };
            for sensor_id in sensor_ids {
                self.add_candidate(owner_key, sensor_id, new_key);
            }
        }

        let beacon_sensor_ids: SmallVec<[SensorId; 4]> =
            self.players[beacon_key].sensors.iter().map(|s| s.sensor_id).collect();
        for sensor_id in beacon_sensor_ids {
            self.add_candidate(beacon_key, sensor_id, new_key);
        }
    }

    // ---- list maintenance -----------------------------------------------

    /// Classifies one swap produced by `resort_and_fire` per spec §4.5's
    /// table and fires the matching `add_candidate`/`remove_candidate` call.
    /// No effect when both nodes belong to the same player, or neither node
    /// is a `PlayerNode` (two guards crossing).
    fn handle_cross(&mut self, moving: NodeKey, static_key: NodeKey, direction: Direction) {
        let (m_kind, m_player, m_sensor) = {
            let n = &self.nodes[moving];
            (n.kind, n.player, n.sensor_id)
        };
        let (s_kind, s_player, s_sensor) = {
            let n = &self.nodes[static_key];
            (n.kind, n.player, n.sensor_id)
        };

        if m_player == s_player {
            return;
        }

        use Direction::{Left, Right};
        use NodeKind::{GuardLeft, GuardRight, PlayerNode};

        // (candidate, owner, sensor_id, entering)
        let action = match (m_kind, direction, s_kind) {
            (PlayerNode, Right, GuardLeft) => Some((m_player, s_player, s_sensor, true)),
            (PlayerNode, Left, GuardRight) => Some((m_player, s_player, s_sensor, true)),
            (PlayerNode, Right, GuardRight) => Some((m_player, s_player, s_sensor, false)),
            (PlayerNode, Left, GuardLeft) => Some((m_player, s_player, s_sensor, false)),
            (GuardLeft, Left, PlayerNode) => Some((s_player, m_player, m_sensor, true)),
            (GuardRight, Right, PlayerNode) => Some((s_player, m_player, m_sensor, true)),
            (GuardLeft, Right, PlayerNode) => Some((s_player, m_player, m_sensor, false)),
            (GuardRight, Left, PlayerNode) => Some((s_player, m_player, m_sensor, false)),
            _ => None,
        };

        let Some((candidate, owner, sensor_id, entering)) = action else { return };
        let sensor_id = sensor_id.expect("guard node always carries a sensor_id");
        if entering {
            self.add_candidate(owner, sensor_id, candidate);
        } else {
            self.remove_candidate(owner, sensor_id, candidate);
        }
    }

    /// Bidirectional bubble re-sort: walks `key` toward its correct position
    /// on `axis`, firing `handle_cross` for every swap (spec §4.5).
    fn resort_and_fire(&mut self, axis: Axis, key: NodeKey) {
        loop {
            let Some(next) = self.nodes[key].next else { break };
            if self.nodes[key].value <= self.nodes[next].value {
                break;
            }
            self.handle_cross(key, next, Direction::Right);
            match axis {
                Axis::X => self.list_x.swap_adjacent(&mut self.nodes, key, next),
                Axis::Z => self.list_z.swap_adjacent(&mut self.nodes, key, next),
            }
        }
        loop {
            let Some(prev) = self.nodes[key].prev else { break };
            if self.nodes[key].value >= self.nodes[prev].value {
                break;
            }
            self.handle_cross(key, prev, Direction::Left);
            match axis {
                Axis::X => self.list_x.swap_adjacent(&mut self.nodes, prev, key),
                Axis::Z => self.list_z.swap_adjacent(&mut self.nodes, prev, key),
            }
        }
    }

    fn resort_sensor_guards(&mut self, owner: PlayerKey, sidx: usize) {
        let pos = self.players[owner].pos;
        let (radius, left_x, right_x, left_z, right_z) = {
            let s = &self.players[owner].sensors[sidx];
            (s.radius, s.left_x, s.right_x, s.left_z, s.right_z)
        };
        self.nodes[left_x].value = pos.x - radius;
        self.nodes[right_x].value = pos.x + radius;
        self.nodes[left_z].value = pos.z - radius;
        self.nodes[right_z].value = pos.z + radius;

        self.resort_and_fire(Axis::X, left_x);
        self.resort_and_fire(Axis::X, right_x);
        self.resort_and_fire(Axis::Z, left_z);
        self.resort_and_fire(Axis::Z, right_z);
    }

    fn spawn_player(&mut self, nuid: Nuid, x: f32, y: f32, z: f32, beacon: bool) -> PlayerKey {
        let flags = if beacon { PlayerFlags::BEACON } else { PlayerFlags::NEW };
        let key = self.players.insert(Player {
            nuid,
            pos: Position::new(x, y, z),
            last_pos: Position::INFINITE,
            flags,
            x_node: NodeKey::default(),
            z_node: NodeKey::default(),
            sensors: SmallVec::new(),
            detected_by: FxHashMap::default(),
        });

        let x_node = self.nodes.insert(CoordNode::new(NodeKind::PlayerNode, x, key, None));
        let z_node = self.nodes.insert(CoordNode::new(NodeKind::PlayerNode, z, key, None));
        self.players[key].x_node = x_node;
        self.players[key].z_node = z_node;

        let beacon_anchor = if beacon { None } else { self.nearest_beacon(x, z) };
        match beacon_anchor {
            Some(beacon_key) => {
                let (bx_node, bz_node) = (self.players[beacon_key].x_node, self.players[beacon_key].z_node);
                self.list_x.insert_before(&mut self.nodes, bx_node, x_node);
                self.list_z.insert_before(&mut self.nodes, bz_node, z_node);
                self.seed_from_beacon(beacon_key, key);
            }
            None => {
                self.list_x.push_front(&mut self.nodes, x_node);
                self.list_z.push_front(&mut self.nodes, z_node);
            }
        }

        self.resort_and_fire(Axis::X, x_node);
        self.resort_and_fire(Axis::Z, z_node);
        key
    }

    fn move_player(&mut self, key: PlayerKey, x: f32, y: f32, z: f32) {
        self.players[key].pos.set(x, y, z);
        self.players[key].flags.insert(PlayerFlags::DIRTY);

        let (x_node, z_node) = (self.players[key].x_node, self.players[key].z_node);
        self.nodes[x_node].value = x;
        self.nodes[z_node].value = z;
        self.resort_and_fire(Axis::X, x_node);
        self.resort_and_fire(Axis::Z, z_node);

        for sidx in 0..self.players[key].sensors.len() {
            self.resort_sensor_guards(key, sidx);
        }
    }

    fn purge_candidate_everywhere(&mut self, removed: PlayerKey) {
        let owner_sensor_pairs: Vec<(PlayerKey, usize)> = self
            .players
            .iter()
            .flat_map(|(owner, p)| (0..p.sensors.len()).map(move |i| (owner, i)))
            .collect();

        for (owner, sidx) in owner_sensor_pairs {
            if owner == removed {
                continue;
            }
            let sensor = &mut self.players[owner].sensors[sidx];
            if let Some(pos) = sensor.candidates.iter().position(|&k| k == removed) {
                sensor.candidates.swap_remove(pos);
            }
            for buf in sensor.aoi_players.iter_mut() {
                if let Some(pos) = buf.iter().position(|&k| k == removed) {
                    buf.swap_remove(pos);
                }
            }
        }

        let nuid = self.players[removed].nuid;
        for &beacon_key in &self.beacons {
            self.players[beacon_key].detected_by.remove(&nuid);
        }
    }

    fn erase_player(&mut self, key: PlayerKey) {
        let nuid = self.players[key].nuid;
        let sensor_ids: Vec<SensorId> = self.players[key].sensors.iter().map(|s| s.sensor_id).collect();
        for sensor_id in sensor_ids {
            self.remove_sensor(nuid, sensor_id);
        }

        self.purge_candidate_everywhere(key);

        let (x_node, z_node) = (self.players[key].x_node, self.players[key].z_node);
        self.list_x.unlink(&mut self.nodes, x_node);
        self.list_z.unlink(&mut self.nodes, z_node);
        self.nodes.remove(x_node);
        self.nodes.remove(z_node);

        self.by_nuid.remove(&nuid);
        self.players.remove(key);
    }

    // ---- public API -------------------------------------------------------

    /// Idempotent w.r.t. `nuid`: re-adding an existing player clears
    /// `Removed` and moves it to the supplied coordinates.
    pub fn add_player(&mut self, nuid: Nuid, x: f32, y: f32, z: f32) {
        if let Some(&key) = self.by_nuid.get(&nuid) {
            self.players[key].flags.remove(PlayerFlags::REMOVED);
            self.move_player(key, x, y, z);
            return;
        }

        let key = self.spawn_player(nuid, x, y, z, false);
        self.by_nuid.insert(nuid, key);
    }

    /// Unbuckets nothing immediately (no cells in this variant); erasure —
    /// including list unlinking — is deferred to the next `tick()`.
    pub fn remove_player(&mut self, nuid: Nuid) {
        let Some(&key) = self.by_nuid.get(&nuid) else { return };
        self.players[key].flags.insert(PlayerFlags::REMOVED);
    }

    /// No-op if the owner is missing or `sensor_id` already exists on it.
    pub fn add_sensor(&mut self, nuid: Nuid, sensor_id: SensorId, radius: f32) {
        let Some(&owner) = self.by_nuid.get(&nuid) else { return };
        if self.sensor_index(owner, sensor_id).is_some() {
            return;
        }

        let pos = self.players[owner].pos;
        let is_beacon = self.players[owner].flags.contains(PlayerFlags::BEACON);
        let beacon_seed = if is_beacon {
            None
        } else {
            self.nearest_beacon(pos.x, pos.z).and_then(|beacon_key| {
                let beacon_sensor = self.players[beacon_key].sensors.first()?;
                let beacon_sensor_id = beacon_sensor.sensor_id;
                let beacon_radius = beacon_sensor.radius;
                let dist = pos.dist_sq_xz(&self.players[beacon_key].pos).sqrt();
                // corrected containment predicate — see DESIGN.md open question 2.
                (dist + radius <= beacon_radius).then_some((beacon_key, beacon_sensor_id))
            })
        };

        let left_x = self.nodes.insert(CoordNode::new(NodeKind::GuardLeft, pos.x - radius, owner, Some(sensor_id)));
        let right_x = self.nodes.insert(CoordNode::new(NodeKind::GuardRight, pos.x + radius, owner, Some(sensor_id)));
        let left_z = self.nodes.insert(CoordNode::new(NodeKind::GuardLeft, pos.z - radius, owner, Some(sensor_id)));
        let right_z = self.nodes.insert(CoordNode::new(NodeKind::GuardRight, pos.z + radius, owner, Some(sensor_id)));

        self.players[owner].sensors.push(Sensor {
            sensor_id,
            radius,
            radius_sq: radius * radius,
            left_x,
            right_x,
            left_z,
            right_z,
            candidates: Vec::new(),
            aoi_players: [Vec::new(), Vec::new()],
        });

        match beacon_seed {
            Some((beacon_key, beacon_sensor_id)) => {
                let bs_idx = self
                    .sensor_index(beacon_key, beacon_sensor_id)
                    .expect("beacon sensor looked up above still exists");
                let (b_left_x, b_right_x, b_left_z, b_right_z) = {
                    let bs = &self.players[beacon_key].sensors[bs_idx];
                    (bs.left_x, bs.right_x, bs.left_z, bs.right_z)
                };
                self.list_x.insert_before(&mut self.nodes, b_left_x, left_x);
                self.list_x.insert_after(&mut self.nodes, b_right_x, right_x);
                self.list_z.insert_before(&mut self.nodes, b_left_z, left_z);
                self.list_z.insert_after(&mut self.nodes, b_right_z, right_z);

                let existing: Vec<PlayerKey> =
                    self.players[beacon_key].sensors[bs_idx].candidates.clone();
                for candidate in existing {
                    if candidate != owner {
                        self.add_candidate(owner, sensor_id, candidate);
                    }
                }
                self.add_candidate(owner, sensor_id, beacon_key);
            }
            None => {
                let (x_node, z_node) = (self.players[owner].x_node, self.players[owner].z_node);
                self.list_x.insert_after(&mut self.nodes, x_node, left_x);
                self.list_x.insert_after(&mut self.nodes, x_node, right_x);
                self.list_z.insert_after(&mut self.nodes, z_node, left_z);
                self.list_z.insert_after(&mut self.nodes, z_node, right_z);
            }
        }

        let sidx = self.players[owner].sensors.len() - 1;
        self.resort_sensor_guards(owner, sidx);
    }

    /// No-op if absent. Effective immediately (spec §6) — unlike
    /// `remove_player`, no deferral to the next tick.
    pub fn remove_sensor(&mut self, nuid: Nuid, sensor_id: SensorId) {
        let Some(&owner) = self.by_nuid.get(&nuid) else { return };
        let Some(sidx) = self.sensor_index(owner, sensor_id) else { return };

        let sensor = self.players[owner].sensors.swap_remove(sidx);
        self.list_x.unlink(&mut self.nodes, sensor.left_x);
        self.list_x.unlink(&mut self.nodes, sensor.right_x);
        self.list_z.unlink(&mut self.nodes, sensor.left_z);
        self.list_z.unlink(&mut self.nodes, sensor.right_z);
        self.nodes.remove(sensor.left_x);
        self.nodes.remove(sensor.right_x);
        self.nodes.remove(sensor.left_z);
        self.nodes.remove(sensor.right_z);
    }

    /// No-op if `nuid` is unknown.
    pub fn update_pos(&mut self, nuid: Nuid, x: f32, y: f32, z: f32) {
        let Some(&key) = self.by_nuid.get(&nuid) else { return };
        self.move_player(key, x, y, z);
    }

    /// Walks every live, non-beacon player with ≥1 sensor, recomputes AOI
    /// sets from each sensor's candidate set, diffs against last tick, and
    /// flips the double buffer (spec §4.7).
    pub fn tick(&mut self) -> TickUpdates {
        let mut updates = TickUpdates::default();
        let new_idx = 1 - self.cur;
        let mut remove_list = Vec::new();

        let keys: Vec<PlayerKey> = self.players.keys().collect();
        for key in keys {
            let flags = self.players[key].flags;
            if flags.contains(PlayerFlags::BEACON) {
                continue;
            }
            if flags.contains(PlayerFlags::REMOVED) {
                remove_list.push(key);
                continue;
            }
            if self.players[key].sensors.is_empty() {
                continue;
            }

            let nuid = self.players[key].nuid;
            let owner_pos = self.players[key].pos;
            let owner_last_pos = self.players[key].last_pos;
            let is_new = flags.contains(PlayerFlags::NEW);

            let mut info = AoiUpdateInfo { nuid, sensor_update_list: Vec::new() };
            let sensor_count = self.players[key].sensors.len();

            for sidx in 0..sensor_count {
                let (sensor_id, radius_sq, candidates) = {
                    let s = &self.players[key].sensors[sidx];
                    (s.sensor_id, s.radius_sq, s.candidates.clone())
                };

                // variant-specific `_CalcAoiPlayers`: disc test over the
                // candidate set, skipping beacons and removed players (the
                // original's dead `remove_players` side list is not carried
                // over — see DESIGN.md open question 4).
                let mut current = Vec::with_capacity(candidates.len());
                for cand_key in candidates {
                    let cand = &self.players[cand_key];
                    if cand.flags.intersects(PlayerFlags::REMOVED | PlayerFlags::BEACON) {
                        continue;
                    }
                    // inclusive: original's `IfInXZRadiusSquare` macro (cross.cpp)
                    // uses `<=`, unlike the grid variant's strict `<`.
                    if owner_pos.dist_sq_xz(&cand.pos) <= radius_sq {
                        current.push(cand_key);
                    }
                }
                self.players[key].sensors[sidx].aoi_players[new_idx] = current;

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
            self.erase_player(key);
        }

        for (_, player) in self.players.iter_mut() {
            player.last_pos = player.pos;
        }

        self.cur = new_idx;
        trace!(players = self.players.len(), updates = updates.len(), "cross tick complete");
        updates
    }

    /// Live players, including beacons but excluding those awaiting erasure
    /// past their `Removed` tick.
    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    /// Number of beacon anchors placed at construction.
    pub fn beacon_count(&self) -> usize {
        self.beacons.len()
    }

    /// Sum of every live sensor's candidate-set size — a superset of total
    /// AOI membership, useful for gauging sweep overhead.
    pub fn total_candidates(&self) -> usize {
        self.players.values().flat_map(|p| p.sensors.iter()).map(|s| s.candidates.len()).sum()
    }
}
