//! Generic push-relabel.
//!
//! Active nodes are kept in a FIFO worklist and every step performs exactly
//! one basic operation (a push or a relabel) on the node at its front. The
//! helpers in this module are shared with the relabel-to-front solver.

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::algo::MaxFlow;
use crate::error::Error;
use crate::int::Int;
use crate::network::Network;
use crate::node::{NodeId, SlotId};

#[derive(Clone, Debug)]
pub struct GenericPushRelabel<C> {
    /// The number of push operations performed by the last run.
    pub cnt_push: usize,
    /// The number of relabel operations performed by the last run.
    pub cnt_relabel: usize,
    _phantom: PhantomData<C>,
}

impl<C> Default for GenericPushRelabel<C> {
    fn default() -> Self {
        Self {
            cnt_push: 0,
            cnt_relabel: 0,
            _phantom: PhantomData,
        }
    }
}

impl<C: Int> MaxFlow for GenericPushRelabel<C> {
    type Int = C;
    type Error = Error;

    fn max_flow(&mut self, network: &mut Network<C>) -> Result<C, Error> {
        self.cnt_push = 0;
        self.cnt_relabel = 0;

        let mut active: VecDeque<NodeId> = init_preflow(network)?.into_iter().collect();
        while let Some(u) = active.pop_front() {
            let admissible = network.nodes[u]
                .slots
                .iter()
                .copied()
                .find(|&s| is_admissible(network, s));
            match admissible {
                Some(s) => {
                    if let Some(v) = push(network, s)? {
                        active.push_back(v);
                    }
                    self.cnt_push += 1;
                }
                None => {
                    debug_assert!(is_relabelable(network, u));
                    relabel(network, u);
                    self.cnt_relabel += 1;
                }
            }

            if network.nodes[u].is_active() {
                active.push_back(u);
            }
        }

        let value = finish(network);
        log::debug!(
            "push-relabel: value {value} after {} pushes and {} relabels",
            self.cnt_push,
            self.cnt_relabel
        );
        Ok(value)
    }
}

impl<C: Int> Network<C> {
    /// Computes a maximum flow with [`GenericPushRelabel`] and returns its value.
    pub fn generic_push_relabel(&mut self) -> Result<C, Error> {
        GenericPushRelabel::default().max_flow(self)
    }
}

/// Resets the network and saturates every residual edge leaving the source.
///
/// The source gets height `n`, every other node height `0`. Returns the nodes
/// that became active.
pub(crate) fn init_preflow<C: Int>(network: &mut Network<C>) -> Result<Vec<NodeId>, Error> {
    network.reset();

    let (src, snk) = (network.source(), network.sink());
    network.nodes[src].height = network.num_nodes();

    let mut active = Vec::new();
    for i in 0..network.nodes[src].slots.len() {
        let s = network.nodes[src].slots[i];
        let (v, cap) = (network.slots[s].to, network.slots[s].residual);
        if cap == C::zero() {
            continue;
        }
        network.push(s, cap);
        add_excess(network, src, -cap)?;
        add_excess(network, v, cap)?;
        if v != snk {
            active.push(v);
        }
    }
    Ok(active)
}

/// Returns `true` if `s = (u, v)` has residual capacity and `height[u] = height[v] + 1`.
pub(crate) fn is_admissible<C: Int>(network: &Network<C>, s: SlotId) -> bool {
    let slot = &network.slots[s];
    slot.residual > C::zero()
        && network.nodes[slot.from].height == network.nodes[slot.to].height + 1
}

/// Returns `true` if `u` has excess and no residual edge leads strictly downhill.
pub(crate) fn is_relabelable<C: Int>(network: &Network<C>, u: NodeId) -> bool {
    let h = network.nodes[u].height;
    network.nodes[u].is_active()
        && network
            .residual_neighbors(u)
            .all(|w| h <= network.nodes[w].height)
}

/// Pushes `min(excess[u], residual(u, v))` along `s = (u, v)`.
///
/// Returns `Some(v)` if `v` is a non-terminal node that just became active.
pub(crate) fn push<C: Int>(
    network: &mut Network<C>,
    s: SlotId,
) -> Result<Option<NodeId>, Error> {
    let (u, v) = (network.slots[s].from, network.slots[s].to);
    debug_assert!(network.nodes[u].is_active());
    debug_assert!(is_admissible(network, s));

    let delta = network.nodes[u].excess.min(network.slots[s].residual);
    let was_active = network.nodes[v].is_active();
    network.push(s, delta);
    add_excess(network, u, -delta)?;
    add_excess(network, v, delta)?;
    log::trace!("push {delta} from {u} to {v}");

    let terminal = v == network.source() || v == network.sink();
    Ok((!terminal && !was_active).then_some(v))
}

/// Lifts `u` to one above its lowest residual neighbour.
pub(crate) fn relabel<C: Int>(network: &mut Network<C>, u: NodeId) {
    let min_nbr_height = network
        .residual_neighbors(u)
        .map(|w| network.nodes[w].height)
        .min()
        .expect("bug: tried to relabel a node with no residual edges");
    network.nodes[u].height = min_nbr_height + 1;
    debug_assert!(network.nodes[u].height < 2 * network.num_nodes());
    log::trace!("relabel {u} to {}", min_nbr_height + 1);
}

/// Marks the network solved and clears the terminal excesses, returning the
/// flow value collected at the sink.
pub(crate) fn finish<C: Int>(network: &mut Network<C>) -> C {
    let (src, snk) = (network.source(), network.sink());
    let value = network.nodes[snk].excess;
    debug_assert_eq!(value, -network.nodes[src].excess);
    network.nodes[src].excess = C::zero();
    network.nodes[snk].excess = C::zero();
    network.solved = true;
    value
}

fn add_excess<C: Int>(network: &mut Network<C>, u: NodeId, amount: C) -> Result<(), Error> {
    let node = &mut network.nodes[u];
    node.excess = node
        .excess
        .checked_add(&amount)
        .ok_or(Error::ArithmeticOverflow)?;
    Ok(())
}
