//! Area-of-interest spatial indexing for real-time multiplayer simulations.
//!
//! Two index strategies share the same external shape (add/remove
//! players and sensors, update positions, `tick()` to get enter/leave
//! deltas):
//!
//! - [`grid`] — a uniform-grid ("Squares") index: cheap, memory-bound by
//!   cell count, recomputes candidates from a 3×3 cell walk every tick.
//! - [`cross`] — a sort-and-sweep ("Cross") index: incrementally
//!   maintained candidate sets via an intrusive doubly-linked coordinate
//!   list, optionally seeded by static "beacon" anchors for fast join.
//!
//! [`index::AoiIndex`] unifies both behind one trait for shared property
//! testing; production callers should reach for [`grid::GridIndex`] or
//! [`cross::CrossIndex`] directly.

pub mod config;
pub mod cross;
pub mod delta;
pub mod diff;
pub mod entity;
pub mod error;
pub mod grid;
pub mod id;
pub mod index;

#[cfg(feature = "metrics")]
pub mod metrics;

pub use config::{Bounds, CrossConfig, GridConfig};
pub use cross::CrossIndex;
pub use delta::{AoiUpdateInfo, SensorUpdateInfo, TickUpdates};
pub use entity::{Nuid, Position, SensorId};
pub use error::ConstraintError;
pub use grid::GridIndex;
pub use id::IdGenerator;
pub use index::AoiIndex;
