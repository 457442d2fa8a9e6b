//! Unit capacity edits on a network that already carries a maximum flow.
//!
//! Both operations repair the flow locally with a few breadth-first searches
//! instead of re-running a full solver.

use crate::algo::edmonds_karp::{augment, find_path, push_along};
use crate::int::Int;
use crate::network::Network;
use crate::node::{NodeId, SlotId};

impl<C: Int> Network<C> {
    /// Raises the capacity of `src -> dst` by one and restores maximality.
    ///
    /// A single augmenting path is searched and augmented by its full
    /// bottleneck.
    ///
    /// Panics if the network is not solved or the edge does not exist.
    pub fn increment_edge(&mut self, src: NodeId, dst: NodeId) {
        let slot = self.incremental_slot(src, dst);
        let capacity = self.slots[slot].capacity.unwrap_or_else(C::zero);
        self.set_capacity(slot, capacity + C::one());

        match find_path(self, self.source(), self.sink()) {
            Some(path) => {
                let df = augment(self, &path);
                log::debug!("increment ({src}, {dst}): augmented by {df}");
            }
            None => log::debug!("increment ({src}, {dst}): flow already maximal"),
        }
    }

    /// Lowers the capacity of `src -> dst` by one and restores maximality.
    ///
    /// If the edge was saturated, one unit is taken off it. The unit is first
    /// re-routed from `src` to `dst` through the residual network; if that is
    /// impossible it is returned to the source and withdrawn from the sink,
    /// and a single augmenting path is tried afterwards.
    ///
    /// Panics if the network is not solved or the edge does not exist. The
    /// capacity must be positive.
    pub fn decrement_edge(&mut self, src: NodeId, dst: NodeId) {
        let slot = self.incremental_slot(src, dst);
        let capacity = self.slots[slot].capacity.unwrap_or_else(C::zero);
        debug_assert!(
            capacity > C::zero(),
            "decrement of zero capacity on edge ({src}, {dst})"
        );

        let capacity = capacity - C::one();
        if self.slots[slot].flow <= capacity {
            self.set_capacity(slot, capacity);
            log::debug!("decrement ({src}, {dst}): flow still fits");
            return;
        }

        self.slots[slot].flow -= C::one();
        self.set_capacity(slot, capacity);

        if let Some(path) = find_path(self, src, dst) {
            push_along(self, &path, C::one());
            log::debug!("decrement ({src}, {dst}): re-routed one unit");
            return;
        }

        let (source, sink) = (self.source(), self.sink());
        if src != source {
            let path = find_path(self, src, source)
                .expect("bug: no residual path back to the source");
            push_along(self, &path, C::one());
        }
        if dst != sink {
            let path = find_path(self, sink, dst)
                .expect("bug: no residual path from the sink");
            push_along(self, &path, C::one());
        }

        match find_path(self, source, sink) {
            Some(path) => {
                let df = augment(self, &path);
                log::debug!("decrement ({src}, {dst}): lost one unit, augmented by {df}");
            }
            None => log::debug!("decrement ({src}, {dst}): flow value dropped by one"),
        }
    }

    fn incremental_slot(&self, src: NodeId, dst: NodeId) -> SlotId {
        assert!(
            self.is_solved(),
            "incremental update on a network without a maximum flow"
        );
        self.edge_slot(src, dst)
            .unwrap_or_else(|| panic!("no edge ({src}, {dst})"))
    }
}
