//! Per-tick enter/leave delta types (spec §4.3).

use hashbrown::HashMap;

use crate::entity::{Nuid, SensorId};

/// Enter/leave events for a single sensor, collected during one `tick()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SensorUpdateInfo {
    pub sensor_id: SensorId,
    pub enters: Vec<Nuid>,
    pub leaves: Vec<Nuid>,
}

/// All sensor updates for a single player, collected during one `tick()`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AoiUpdateInfo {
    pub nuid: Nuid,
    pub sensor_update_list: Vec<SensorUpdateInfo>,
}

/// The result of one `tick()`: only players with at least one non-empty
/// sensor update are present.
pub type TickUpdates = HashMap<Nuid, AoiUpdateInfo>;
