//! The intrusive doubly-linked list backing one coordinate axis (spec §4.5).
//!
//! Plain link/unlink/swap primitives only — the bubble re-sort and the
//! candidate-set side effects it triggers live in `cross::mod` alongside
//! `Player`/`Sensor`, since they need access to both axis lists at once plus
//! the player arena. Grounded on the same "arena + generational key" idiom
//! used by `grid::GridIndex`, applied here to an ordered list instead of a
//! hash bucket.

use slotmap::{new_key_type, SlotMap};

use crate::entity::SensorId;

use super::PlayerKey;

new_key_type! {
    pub(crate) struct NodeKey;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    PlayerNode,
    GuardLeft,
    GuardRight,
}

pub(crate) struct CoordNode {
    pub kind: NodeKind,
    pub value: f32,
    pub player: PlayerKey,
    /// `None` for `PlayerNode`s; `Some` for guard nodes, naming the sensor
    /// the guard belongs to.
    pub sensor_id: Option<SensorId>,
    pub(crate) prev: Option<NodeKey>,
    pub(crate) next: Option<NodeKey>,
}

impl CoordNode {
    pub(crate) fn new(kind: NodeKind, value: f32, player: PlayerKey, sensor_id: Option<SensorId>) -> Self {
        Self { kind, value, player, sensor_id, prev: None, next: None }
    }
}

pub(crate) type Nodes = SlotMap<NodeKey, CoordNode>;

/// A sorted doubly-linked list over `Nodes`. Sorting is maintained by the
/// caller (via the bubble re-sort in `cross::mod`); this type only knows how
/// to link things together.
#[derive(Default)]
pub(crate) struct NodeList {
    head: Option<NodeKey>,
    tail: Option<NodeKey>,
}

impl NodeList {
    pub fn push_front(&mut self, nodes: &mut Nodes, key: NodeKey) {
        nodes[key].prev = None;
        nodes[key].next = self.head;
        if let Some(head) = self.head {
            nodes[head].prev = Some(key);
        } else {
            self.tail = Some(key);
        }
        self.head = Some(key);
    }

    pub fn insert_before(&mut self, nodes: &mut Nodes, anchor: NodeKey, key: NodeKey) {
        let prev = nodes[anchor].prev;
        nodes[key].prev = prev;
        nodes[key].next = Some(anchor);
        nodes[anchor].prev = Some(key);
        match prev {
            Some(p) => nodes[p].next = Some(key),
            None => self.head = Some(key),
        }
    }

    pub fn insert_after(&mut self, nodes: &mut Nodes, anchor: NodeKey, key: NodeKey) {
        let next = nodes[anchor].next;
        nodes[key].next = next;
        nodes[key].prev = Some(anchor);
        nodes[anchor].next = Some(key);
        match next {
            Some(n) => nodes[n].prev = Some(key),
            None => self.tail = Some(key),
        }
    }

    pub fn unlink(&mut self, nodes: &mut Nodes, key: NodeKey) {
        let prev = nodes[key].prev;
        let next = nodes[key].next;
        match prev {
            Some(p) => nodes[p].next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => nodes[n].prev = prev,
            None => self.tail = prev,
        }
        nodes[key].prev = None;
        nodes[key].next = None;
    }

    /// Swaps two adjacent nodes where `a` is immediately before `b`, so that
    /// afterward `b` is immediately before `a`. Used by the bubble re-sort
    /// to walk a node one step toward its correct position.
    pub fn swap_adjacent(&mut self, nodes: &mut Nodes, a: NodeKey, b: NodeKey) {
        debug_assert_eq!(nodes[a].next, Some(b));
        let a_prev = nodes[a].prev;
        let b_next = nodes[b].next;

        match a_prev {
            Some(p) => nodes[p].next = Some(b),
            None => self.head = Some(b),
        }
        match b_next {
            Some(n) => nodes[n].prev = Some(a),
            None => self.tail = Some(a),
        }

        nodes[b].prev = a_prev;
        nodes[b].next = Some(a);
        nodes[a].prev = Some(b);
        nodes[a].next = b_next;
    }

    #[cfg(test)]
    pub fn iter<'a>(&self, nodes: &'a Nodes) -> impl Iterator<Item = NodeKey> + 'a {
        let mut cur = self.head;
        std::iter::from_fn(move || {
            let key = cur?;
            cur = nodes[key].next;
            Some(key)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(nodes: &mut Nodes, player: PlayerKey, value: f32) -> NodeKey {
        nodes.insert(CoordNode::new(NodeKind::PlayerNode, value, player, None))
    }

    #[test]
    fn push_front_and_iterate() {
        let mut players: SlotMap<PlayerKey, ()> = SlotMap::with_key();
        let p = players.insert(());
        let mut nodes = Nodes::with_key();
        let mut list = NodeList::default();

        let a = key(&mut nodes, p, 1.0);
        let b = key(&mut nodes, p, 2.0);
        list.push_front(&mut nodes, a);
        list.push_front(&mut nodes, b);

        let order: Vec<NodeKey> = list.iter(&nodes).collect();
        assert_eq!(order, vec![b, a]);
    }

    #[test]
    fn swap_adjacent_reverses_order() {
        let mut players: SlotMap<PlayerKey, ()> = SlotMap::with_key();
        let p = players.insert(());
        let mut nodes = Nodes::with_key();
        let mut list = NodeList::default();

        let a = key(&mut nodes, p, 1.0);
        let b = key(&mut nodes, p, 2.0);
        list.push_front(&mut nodes, a);
        list.insert_after(&mut nodes, a, b);
        assert_eq!(list.iter(&nodes).collect::<Vec<_>>(), vec![a, b]);

        list.swap_adjacent(&mut nodes, a, b);
        assert_eq!(list.iter(&nodes).collect::<Vec<_>>(), vec![b, a]);
    }

    #[test]
    fn unlink_removes_middle_node() {
        let mut players: SlotMap<PlayerKey, ()> = SlotMap::with_key();
        let p = players.insert(());
        let mut nodes = Nodes::with_key();
        let mut list = NodeList::default();

        let a = key(&mut nodes, p, 1.0);
        let b = key(&mut nodes, p, 2.0);
        let c = key(&mut nodes, p, 3.0);
        list.push_front(&mut nodes, a);
        list.insert_after(&mut nodes, a, b);
        list.insert_after(&mut nodes, b, c);

        list.unlink(&mut nodes, b);
        assert_eq!(list.iter(&nodes).collect::<Vec<_>>(), vec![a, c]);
    }
}
