use core::cmp::max;

use petgraph::graph::{Graph, IndexType, NodeIndex};
use petgraph::visit::EdgeRef;
use petgraph::EdgeType;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::int::Int;
use crate::network::Network;
use crate::node::NodeId;

/// An edge entry of an edge list.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(
    try_from = "RawEdge<C>",
    bound(deserialize = "C: Int + Deserialize<'de>")
)]
pub struct EdgeRecord<C> {
    src: NodeId,
    dst: NodeId,
    capacity: C,
}

impl<C: Int> EdgeRecord<C> {
    pub fn new(src: NodeId, dst: NodeId, capacity: C) -> Result<Self, Error> {
        if src == dst {
            Err(Error::SelfLoop(src))
        } else if capacity < C::zero() {
            Err(Error::NegativeCapacity(src, dst))
        } else {
            Ok(Self { src, dst, capacity })
        }
    }
}

impl<C: Copy> EdgeRecord<C> {
    pub fn src(&self) -> NodeId {
        self.src
    }

    pub fn dst(&self) -> NodeId {
        self.dst
    }

    pub fn capacity(&self) -> C {
        self.capacity
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
pub struct RawEdge<C> {
    pub src: NodeId,
    pub dst: NodeId,
    pub capacity: C,
}

impl<C: Int> TryFrom<RawEdge<C>> for EdgeRecord<C> {
    type Error = Error;

    fn try_from(e: RawEdge<C>) -> Result<Self, Self::Error> {
        Self::new(e.src, e.dst, e.capacity)
    }
}

impl<C> From<EdgeRecord<C>> for RawEdge<C> {
    fn from(e: EdgeRecord<C>) -> Self {
        Self {
            src: e.src,
            dst: e.dst,
            capacity: e.capacity,
        }
    }
}

impl<C: Int> Network<C> {
    /// Builds a network of `size` nodes from an edge list.
    ///
    /// Repeated `(src, dst)` entries are merged by adding their capacities.
    pub fn from_records<'a, I>(
        size: usize,
        source: NodeId,
        sink: NodeId,
        records: I,
    ) -> Result<Self, Error>
    where
        C: 'a,
        I: IntoIterator<Item = &'a EdgeRecord<C>>,
    {
        for node in [source, sink] {
            if node >= size {
                return Err(Error::NodeOutOfRange(node, size));
            }
        }
        if source == sink {
            return Err(Error::SelfLoop(source));
        }

        let mut network = Network::with_terminals(size, source, sink);
        for e in records {
            for node in [e.src, e.dst] {
                if node >= size {
                    return Err(Error::NodeOutOfRange(node, size));
                }
            }
            network.add_or_merge(e.src, e.dst, e.capacity)?;
        }
        Ok(network)
    }

    /// Builds a network from a petgraph graph whose edge weights are capacities.
    ///
    /// Negative weights are treated the same as zero weights, self-loops are
    /// dropped and parallel edges merged. Undirected edges become a pair of
    /// opposite edges.
    pub fn from_graph<N, Ty, Ix>(
        graph: &Graph<N, C, Ty, Ix>,
        source: NodeIndex<Ix>,
        sink: NodeIndex<Ix>,
    ) -> Result<Self, Error>
    where
        Ty: EdgeType,
        Ix: IndexType,
    {
        let mut network = Network::with_terminals(graph.node_count(), source.index(), sink.index());
        for e in graph.edge_references() {
            let (u, v) = (e.source().index(), e.target().index());
            if u == v {
                continue;
            }
            let capacity = max(*e.weight(), C::zero());
            network.add_or_merge(u, v, capacity)?;
            if !graph.is_directed() {
                network.add_or_merge(v, u, capacity)?;
            }
        }
        Ok(network)
    }

    fn add_or_merge(&mut self, src: NodeId, dst: NodeId, capacity: C) -> Result<(), Error> {
        if !self.add_edge(src, dst, capacity) {
            let merged = self
                .capacity(src, dst)
                .checked_add(&capacity)
                .ok_or(Error::ArithmeticOverflow)?;
            if let Some(slot) = self.edge_slot(src, dst) {
                self.set_capacity(slot, merged);
            }
        }
        Ok(())
    }
}
