//! The enter/leave predicate shared by both index variants (spec §4.7).
//!
//! `squares.cpp`'s `_CheckLeave`/`_CheckEnter` and `cross.cpp`'s functions of
//! the same name are byte-for-byte identical in the original engine — the
//! predicate doesn't care how the candidate set was produced, only about
//! current and previous-tick positions. Both index variants call into this
//! module instead of duplicating the logic.

use crate::entity::{Nuid, Position};

/// A leave is reported whenever the pair is no longer co-resident *now*:
/// either the other player was removed, or its current distance from the
/// owner now exceeds the sensor's radius.
///
/// `old_aoi` iterates the sensor's previous-tick AOI set as
/// `(nuid, removed, current_position)`.
pub fn check_leave(
    owner_pos: Position,
    radius_sq: f32,
    old_aoi: impl Iterator<Item = (Nuid, bool, Position)>,
    leaves: &mut Vec<Nuid>,
) {
    for (nuid, removed, other_pos) in old_aoi {
        if removed {
            leaves.push(nuid);
        } else if owner_pos.dist_sq_xz(&other_pos) > radius_sq {
            leaves.push(nuid);
        }
    }
}

/// An enter is a transition: a pair currently co-resident that was *not*
/// co-resident one tick ago, judged using both players' `last_pos`.
///
/// If `is_new`, the owning player has no meaningful prior position (spec
/// §4.2) and every current member of `new_aoi` is reported as an enter.
///
/// `new_aoi` iterates the sensor's current-tick AOI set as
/// `(nuid, last_position)`.
pub fn check_enter(
    owner_last_pos: Position,
    radius_sq: f32,
    is_new: bool,
    new_aoi: impl Iterator<Item = (Nuid, Position)>,
    enters: &mut Vec<Nuid>,
) {
    if is_new {
        enters.extend(new_aoi.map(|(nuid, _)| nuid));
        return;
    }

    for (nuid, other_last_pos) in new_aoi {
        if owner_last_pos.dist_sq_xz(&other_last_pos) > radius_sq {
            enters.push(nuid);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn leave_on_removal_regardless_of_distance() {
        let owner = Position::new(0.0, 0.0, 0.0);
        let mut leaves = Vec::new();
        check_leave(
            owner,
            100.0,
            std::iter::once((7u64, true, Position::new(0.0, 0.0, 0.0))),
            &mut leaves,
        );
        assert_eq!(leaves, vec![7]);
    }

    #[test]
    fn leave_on_exceeding_radius() {
        let owner = Position::new(0.0, 0.0, 0.0);
        let mut leaves = Vec::new();
        // radius_sq = 100 (radius 10); other now at distance 11 -> leave.
        check_leave(
            owner,
            100.0,
            std::iter::once((1u64, false, Position::new(11.0, 0.0, 0.0))),
            &mut leaves,
        );
        assert_eq!(leaves, vec![1]);
    }

    #[test]
    fn boundary_distance_equal_radius_is_not_a_leave() {
        let owner = Position::new(0.0, 0.0, 0.0);
        let mut leaves = Vec::new();
        // exactly at radius (dist_sq == radius_sq) -> strict '>' means no leave
        check_leave(
            owner,
            100.0,
            std::iter::once((1u64, false, Position::new(10.0, 0.0, 0.0))),
            &mut leaves,
        );
        assert!(leaves.is_empty());
    }

    #[test]
    fn new_player_enters_everything_in_current_set() {
        let owner_last = Position::INFINITE;
        let mut enters = Vec::new();
        check_enter(
            owner_last,
            100.0,
            true,
            vec![(1u64, Position::new(0.0, 0.0, 0.0)), (2u64, Position::new(5.0, 0.0, 0.0))]
                .into_iter(),
            &mut enters,
        );
        assert_eq!(enters, vec![1, 2]);
    }

    #[test]
    fn existing_player_enters_only_if_out_of_range_last_tick() {
        let owner_last = Position::new(0.0, 0.0, 0.0);
        let mut enters = Vec::new();
        check_enter(
            owner_last,
            100.0,
            false,
            vec![
                (1u64, Position::new(11.0, 0.0, 0.0)), // was outside -> enter
                (2u64, Position::new(5.0, 0.0, 0.0)),  // was already inside -> no enter
            ]
            .into_iter(),
            &mut enters,
        );
        assert_eq!(enters, vec![1]);
    }
}
