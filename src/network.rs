use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use serde::Serialize;

use crate::algo::MaxFlow;
use crate::int::Int;
use crate::node::{Node, NodeId, SlotId};

/// One direction of a node pair in the residual network.
///
/// Slots are allocated in pairs: slot `2k` is `u -> v` and slot `2k + 1` is
/// `v -> u`, so the twin of a slot is `id ^ 1`. A slot carries the authored
/// edge of its direction, if any, together with the cached residual capacity
/// `capacity - flow + flow(twin)`.
#[derive(Clone, Debug)]
pub(crate) struct Slot<C> {
    pub(crate) from: NodeId,
    pub(crate) to: NodeId,
    pub(crate) capacity: Option<C>,
    pub(crate) flow: C,
    pub(crate) residual: C,
}

/// A read-only view of an authored edge, also used as the flow output record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Edge<C> {
    pub src: NodeId,
    pub dst: NodeId,
    pub capacity: C,
    pub flow: C,
}

/// A capacitated flow network with a fixed set of nodes.
///
/// The residual capacity of every node pair that carries an authored edge in
/// either direction is cached and kept up to date on every flow change, so the
/// solvers never rescan the edge set.
#[derive(Clone, Debug)]
pub struct Network<C = i64> {
    pub(crate) nodes: Vec<Node<C>>,
    pub(crate) slots: Vec<Slot<C>>,
    free_pairs: Vec<usize>,
    pub(crate) lookup: BTreeMap<(NodeId, NodeId), SlotId>,
    source: NodeId,
    sink: NodeId,
    num_edges: usize,
    pub(crate) solved: bool,
}

impl<C: Int> Network<C> {
    /// Creates a network of `size` nodes with source `0` and sink `size - 1`.
    pub fn new(size: usize) -> Self {
        assert!(size >= 2, "a network needs at least a source and a sink");
        Self::with_terminals(size, 0, size - 1)
    }

    /// Creates a network of `size` nodes with the given terminals.
    ///
    /// Panics if a terminal is out of range or `source == sink`.
    pub fn with_terminals(size: usize, source: NodeId, sink: NodeId) -> Self {
        assert!(source < size, "source {source} out of range ({size} nodes)");
        assert!(sink < size, "sink {sink} out of range ({size} nodes)");
        assert_ne!(source, sink, "source and sink must be distinct");

        Network {
            nodes: (0..size).map(|_| Node::new()).collect(),
            slots: Vec::new(),
            free_pairs: Vec::new(),
            lookup: BTreeMap::new(),
            source,
            sink,
            num_edges: 0,
            solved: false,
        }
    }

    pub fn num_nodes(&self) -> usize {
        self.nodes.len()
    }

    /// Number of authored edges.
    pub fn num_edges(&self) -> usize {
        self.num_edges
    }

    pub fn source(&self) -> NodeId {
        self.source
    }

    pub fn sink(&self) -> NodeId {
        self.sink
    }

    /// Returns `true` if the current flow is a maximum flow computed by a full
    /// solver run (possibly followed by incremental updates).
    pub fn is_solved(&self) -> bool {
        self.solved
    }

    /// Adds the edge `src -> dst`.
    ///
    /// Returns `false` without touching the network if the edge already exists.
    /// The reverse edge `dst -> src` may be authored independently.
    pub fn add_edge(&mut self, src: NodeId, dst: NodeId, capacity: C) -> bool {
        self.assert_pair(src, dst);
        assert!(
            capacity >= C::zero(),
            "negative capacity {capacity} on edge ({src}, {dst})"
        );

        let slot = match self.lookup.get(&(src, dst)) {
            Some(&s) if self.slots[s].capacity.is_some() => return false,
            Some(&s) => s,
            None => self.alloc_pair(src, dst),
        };
        self.slots[slot].capacity = Some(capacity);
        self.slots[slot].flow = C::zero();
        self.refresh(slot);

        self.num_edges += 1;
        self.solved = false;
        true
    }

    /// Removes the edge `src -> dst` together with its residual cache entries.
    ///
    /// Returns the capacity the edge had, or `None` if there was no such edge.
    pub fn remove_edge(&mut self, src: NodeId, dst: NodeId) -> Option<C> {
        self.assert_pair(src, dst);
        let slot = self.edge_slot(src, dst)?;
        let capacity = self.slots[slot].capacity.take();
        self.slots[slot].flow = C::zero();

        if self.slots[slot ^ 1].capacity.is_none() {
            self.free_pair(slot);
        } else {
            self.refresh(slot);
        }

        self.num_edges -= 1;
        self.solved = false;
        capacity
    }

    /// Capacity of `src -> dst`, zero if the edge does not exist.
    pub fn capacity(&self, src: NodeId, dst: NodeId) -> C {
        self.edge_slot(src, dst)
            .and_then(|s| self.slots[s].capacity)
            .unwrap_or_else(C::zero)
    }

    /// Flow on `src -> dst`, zero if the edge does not exist.
    pub fn flow(&self, src: NodeId, dst: NodeId) -> C {
        self.edge_slot(src, dst)
            .map(|s| self.slots[s].flow)
            .unwrap_or_else(C::zero)
    }

    /// Residual capacity of `src -> dst`, zero if neither direction is authored.
    pub fn residual(&self, src: NodeId, dst: NodeId) -> C {
        self.lookup
            .get(&(src, dst))
            .map(|&s| self.slots[s].residual)
            .unwrap_or_else(C::zero)
    }

    /// Overwrites the flow on the authored edge `src -> dst`.
    ///
    /// Only the residual entries of `(src, dst)` and `(dst, src)` are updated.
    /// Since this may break conservation, the network no longer counts as
    /// solved afterwards.
    pub fn set_flow(&mut self, src: NodeId, dst: NodeId, flow: C) {
        let slot = self
            .edge_slot(src, dst)
            .unwrap_or_else(|| panic!("no edge ({src}, {dst})"));
        let capacity = self.slots[slot].capacity.unwrap_or_else(C::zero);
        assert!(
            flow >= C::zero() && flow <= capacity,
            "flow {flow} outside of [0, {capacity}] on edge ({src}, {dst})"
        );
        self.slots[slot].flow = flow;
        self.refresh(slot);
        self.solved = false;
    }

    /// Net flow leaving the source (outgoing minus incoming).
    pub fn max_flow_value(&self) -> C {
        self.net_outflow(self.source)
    }

    /// Height of `u` as left behind by the last push-relabel run.
    pub fn height(&self, u: NodeId) -> usize {
        self.nodes[u].height
    }

    /// Excess of `u`; zero everywhere except during a push-relabel run.
    pub fn excess(&self, u: NodeId) -> C {
        self.nodes[u].excess
    }

    /// Iterates over all authored edges in `(src, dst)` order.
    pub fn edges(&self) -> impl Iterator<Item = Edge<C>> + '_ {
        self.lookup.iter().filter_map(move |(&(src, dst), &s)| {
            self.slots[s].capacity.map(|capacity| Edge {
                src,
                dst,
                capacity,
                flow: self.slots[s].flow,
            })
        })
    }

    /// Iterates over the nodes `v` with a present residual edge `u -> v`.
    pub fn residual_neighbors(&self, u: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes[u]
            .slots
            .iter()
            .map(move |&s| &self.slots[s])
            .filter(|slot| slot.residual > C::zero())
            .map(|slot| slot.to)
    }

    /// Runs `algo` on this network and returns the maximum flow value.
    pub fn solve<A>(&mut self, algo: &mut A) -> Result<C, A::Error>
    where
        A: MaxFlow<Int = C>,
    {
        algo.max_flow(self)
    }

    pub(crate) fn net_outflow(&self, u: NodeId) -> C {
        self.nodes[u]
            .slots
            .iter()
            .map(|&s| self.slots[s].flow - self.slots[s ^ 1].flow)
            .sum()
    }

    pub(crate) fn edge_slot(&self, src: NodeId, dst: NodeId) -> Option<SlotId> {
        self.lookup
            .get(&(src, dst))
            .copied()
            .filter(|&s| self.slots[s].capacity.is_some())
    }

    /// Moves `delta` units along the residual slot, cancelling flow on the
    /// opposite authored edge before adding flow on this one.
    pub(crate) fn push(&mut self, slot: SlotId, delta: C) {
        debug_assert!(delta > C::zero());
        debug_assert!(delta <= self.slots[slot].residual);

        let twin = slot ^ 1;
        let cancel = delta.min(self.slots[twin].flow);
        self.slots[twin].flow -= cancel;
        self.slots[slot].flow += delta - cancel;
        self.refresh(slot);
    }

    pub(crate) fn set_capacity(&mut self, slot: SlotId, capacity: C) {
        debug_assert!(self.slots[slot].capacity.is_some());
        debug_assert!(capacity >= C::zero());
        self.slots[slot].capacity = Some(capacity);
        self.refresh(slot);
    }

    /// Drops all flow and solver state.
    pub(crate) fn reset(&mut self) {
        for slot in &mut self.slots {
            slot.flow = C::zero();
            slot.residual = slot.capacity.unwrap_or_else(C::zero);
        }
        for node in &mut self.nodes {
            node.reset();
        }
        self.solved = false;
    }

    fn refresh(&mut self, slot: SlotId) {
        let twin = slot ^ 1;
        let cap = self.slots[slot].capacity.unwrap_or_else(C::zero);
        let twin_cap = self.slots[twin].capacity.unwrap_or_else(C::zero);
        let (flow, twin_flow) = (self.slots[slot].flow, self.slots[twin].flow);
        self.slots[slot].residual = cap - flow + twin_flow;
        self.slots[twin].residual = twin_cap - twin_flow + flow;
    }

    fn alloc_pair(&mut self, u: NodeId, v: NodeId) -> SlotId {
        let empty = |from, to| Slot {
            from,
            to,
            capacity: None,
            flow: C::zero(),
            residual: C::zero(),
        };
        let slot = match self.free_pairs.pop() {
            Some(k) => {
                self.slots[2 * k] = empty(u, v);
                self.slots[2 * k + 1] = empty(v, u);
                2 * k
            }
            None => {
                self.slots.push(empty(u, v));
                self.slots.push(empty(v, u));
                self.slots.len() - 2
            }
        };
        self.lookup.insert((u, v), slot);
        self.lookup.insert((v, u), slot ^ 1);
        self.nodes[u].slots.push(slot);
        self.nodes[v].slots.push(slot ^ 1);
        slot
    }

    fn free_pair(&mut self, slot: SlotId) {
        let (u, v) = (self.slots[slot].from, self.slots[slot].to);
        self.lookup.remove(&(u, v));
        self.lookup.remove(&(v, u));
        self.nodes[u].slots.retain(|&s| s != slot);
        self.nodes[v].slots.retain(|&s| s != slot ^ 1);
        self.nodes[u].cursor = 0;
        self.nodes[v].cursor = 0;
        self.slots[slot].residual = C::zero();
        self.slots[slot ^ 1].residual = C::zero();
        self.free_pairs.push(slot / 2);
    }

    fn assert_pair(&self, src: NodeId, dst: NodeId) {
        let n = self.nodes.len();
        assert!(src < n, "node {src} out of range ({n} nodes)");
        assert!(dst < n, "node {dst} out of range ({n} nodes)");
        assert_ne!(src, dst, "self-loop on node {src}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_edges_read_as_zero() {
        let net = Network::<i64>::new(3);
        assert_eq!(net.capacity(0, 1), 0);
        assert_eq!(net.flow(0, 1), 0);
        assert_eq!(net.residual(0, 1), 0);
        assert_eq!(net.num_edges(), 0);
    }

    #[test]
    fn add_edge_is_idempotent_per_direction() {
        let mut net = Network::<i64>::new(3);
        assert!(net.add_edge(0, 1, 5));
        assert!(!net.add_edge(0, 1, 7));
        assert_eq!(net.capacity(0, 1), 5);

        // the reverse direction is an independent edge
        assert!(net.add_edge(1, 0, 3));
        assert_eq!(net.capacity(1, 0), 3);
        assert_eq!(net.num_edges(), 2);
        assert_eq!(net.residual(0, 1), 5);
        assert_eq!(net.residual(1, 0), 3);
    }

    #[test]
    fn set_flow_updates_both_residuals() {
        let mut net = Network::<i64>::new(3);
        net.add_edge(0, 1, 5);
        net.add_edge(1, 0, 3);
        net.set_flow(0, 1, 4);
        assert_eq!(net.residual(0, 1), 1);
        assert_eq!(net.residual(1, 0), 7);

        net.set_flow(1, 0, 2);
        assert_eq!(net.residual(0, 1), 3);
        assert_eq!(net.residual(1, 0), 5);
    }

    #[test]
    #[should_panic]
    fn set_flow_above_capacity_panics() {
        let mut net = Network::<i64>::new(2);
        net.add_edge(0, 1, 1);
        net.set_flow(0, 1, 2);
    }

    #[test]
    fn push_cancels_opposite_flow_first() {
        let mut net = Network::<i64>::new(2);
        net.add_edge(0, 1, 5);
        net.add_edge(1, 0, 5);
        net.set_flow(0, 1, 3);

        let slot = net.lookup[&(1, 0)];
        net.push(slot, 4);
        assert_eq!(net.flow(0, 1), 0);
        assert_eq!(net.flow(1, 0), 1);
        assert_eq!(net.residual(1, 0), 4);
        assert_eq!(net.residual(0, 1), 6);
    }

    #[test]
    fn remove_edge_drops_cache_entries() {
        let mut net = Network::<i64>::new(3);
        net.add_edge(0, 1, 5);
        net.add_edge(1, 2, 5);
        assert_eq!(net.remove_edge(0, 1), Some(5));
        assert_eq!(net.remove_edge(0, 1), None);
        assert_eq!(net.residual(0, 1), 0);
        assert_eq!(net.residual(1, 0), 0);
        assert_eq!(net.residual_neighbors(0).count(), 0);

        // the freed pair is reused
        net.add_edge(2, 0, 4);
        assert_eq!(net.slots.len(), 4);
        assert_eq!(net.residual(2, 0), 4);
    }

    #[test]
    fn remove_edge_keeps_reverse_edge() {
        let mut net = Network::<i64>::new(2);
        net.add_edge(0, 1, 5);
        net.add_edge(1, 0, 2);
        net.set_flow(0, 1, 3);
        net.remove_edge(0, 1);
        assert_eq!(net.residual(0, 1), 0);
        assert_eq!(net.residual(1, 0), 2);
        assert_eq!(net.edges().count(), 1);
    }

    #[test]
    #[should_panic]
    fn self_loop_panics() {
        Network::<i64>::new(2).add_edge(1, 1, 1);
    }

    #[test]
    #[should_panic]
    fn equal_terminals_panic() {
        Network::<i64>::with_terminals(3, 1, 1);
    }
}
