//! Edmonds-Karp: repeated breadth-first augmenting paths.
//!
//! Every augmentation saturates at least one residual edge on a shortest
//! path and shortest path lengths never decrease, giving `O(V E^2)`.

use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;
use core::marker::PhantomData;

use itertools::Itertools;

use crate::algo::MaxFlow;
use crate::error::Error;
use crate::int::Int;
use crate::network::Network;
use crate::node::{NodeId, SlotId};

#[derive(Clone, Debug)]
pub struct EdmondsKarp<C> {
    /// The number of augmentations performed by the last run.
    pub cnt_augment: usize,
    _phantom: PhantomData<C>,
}

impl<C> Default for EdmondsKarp<C> {
    fn default() -> Self {
        Self {
            cnt_augment: 0,
            _phantom: PhantomData,
        }
    }
}

impl<C: Int> MaxFlow for EdmondsKarp<C> {
    type Int = C;
    type Error = Error;

    fn max_flow(&mut self, network: &mut Network<C>) -> Result<C, Error> {
        network.reset();
        self.cnt_augment = 0;

        let (src, snk) = (network.source(), network.sink());
        let mut value = C::zero();
        while let Some(path) = find_path(network, src, snk) {
            let df = augment(network, &path);
            value = value.checked_add(&df).ok_or(Error::ArithmeticOverflow)?;
            self.cnt_augment += 1;
        }

        network.solved = true;
        log::debug!(
            "edmonds-karp: value {value} after {} augmentations",
            self.cnt_augment
        );
        Ok(value)
    }
}

impl<C: Int> Network<C> {
    /// Computes a maximum flow with [`EdmondsKarp`] and returns its value.
    pub fn edmonds_karp(&mut self) -> Result<C, Error> {
        EdmondsKarp::default().max_flow(self)
    }
}

/// Breadth-first search over present residual edges.
///
/// Returns the residual slots of a shortest path from `from` to `to`, or `None`
/// if `to` cannot be reached.
pub(crate) fn find_path<C: Int>(
    network: &Network<C>,
    from: NodeId,
    to: NodeId,
) -> Option<Vec<SlotId>> {
    debug_assert_ne!(from, to);

    let n = network.num_nodes();
    let mut pred: Vec<Option<SlotId>> = vec![None; n];
    let mut seen = vec![false; n];
    let mut queue = VecDeque::with_capacity(n);
    seen[from] = true;
    queue.push_back(from);

    'bfs: while let Some(u) = queue.pop_front() {
        for &s in &network.nodes[u].slots {
            let slot = &network.slots[s];
            if !seen[slot.to] && slot.residual > C::zero() {
                seen[slot.to] = true;
                pred[slot.to] = Some(s);
                if slot.to == to {
                    break 'bfs;
                }
                queue.push_back(slot.to);
            }
        }
    }

    if !seen[to] {
        return None;
    }

    let mut path = Vec::new();
    let mut v = to;
    while let Some(s) = pred[v] {
        path.push(s);
        v = network.slots[s].from;
    }
    path.reverse();
    Some(path)
}

/// Pushes the bottleneck capacity along `path` and returns it.
pub(crate) fn augment<C: Int>(network: &mut Network<C>, path: &[SlotId]) -> C {
    let df = path
        .iter()
        .map(|&s| network.slots[s].residual)
        .min()
        .unwrap_or_else(C::zero);
    push_along(network, path, df);
    df
}

/// Pushes exactly `df` units along `path`.
pub(crate) fn push_along<C: Int>(network: &mut Network<C>, path: &[SlotId], df: C) {
    debug_assert!(df > C::zero());

    if log::log_enabled!(log::Level::Trace) {
        let nodes = path
            .first()
            .map(|&s| network.slots[s].from)
            .into_iter()
            .chain(path.iter().map(|&s| network.slots[s].to))
            .join(" -> ");
        log::trace!("augment {df} along {nodes}");
    }

    for &s in path {
        network.push(s, df);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_edge() {
        let mut net = Network::<i32>::new(2);
        net.add_edge(0, 1, 7);
        assert_eq!(net.edmonds_karp(), Ok(7));
        assert_eq!(net.flow(0, 1), 7);
        assert_eq!(net.residual(0, 1), 0);
        assert_eq!(net.residual(1, 0), 7);
    }

    #[test]
    fn counts_augmentations() {
        // two disjoint paths and a useless cross edge
        let mut net = Network::<i64>::new(4);
        net.add_edge(0, 1, 3);
        net.add_edge(0, 2, 2);
        net.add_edge(1, 3, 2);
        net.add_edge(2, 3, 3);
        net.add_edge(1, 2, 1);

        let mut ek = EdmondsKarp::default();
        assert_eq!(net.solve(&mut ek), Ok(5));
        assert_eq!(ek.cnt_augment, 3);
        assert!(net.is_solved());
    }

    #[test]
    fn find_path_is_shortest() {
        let mut net = Network::<i64>::new(4);
        net.add_edge(0, 1, 1);
        net.add_edge(1, 2, 1);
        net.add_edge(2, 3, 1);
        net.add_edge(0, 3, 1);
        let path = find_path(&net, 0, 3).unwrap();
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn resolving_resets_previous_flow() {
        let mut net = Network::<i64>::new(3);
        net.add_edge(0, 1, 4);
        net.add_edge(1, 2, 3);
        assert_eq!(net.edmonds_karp(), Ok(3));
        assert_eq!(net.edmonds_karp(), Ok(3));
        assert_eq!(net.flow(0, 1), 3);
    }

    #[test]
    fn overflow_is_reported() {
        let mut net = Network::<i32>::new(3);
        net.add_edge(0, 1, i32::MAX);
        net.add_edge(0, 2, i32::MAX);
        net.add_edge(1, 2, i32::MAX);
        assert_eq!(net.edmonds_karp(), Err(Error::ArithmeticOverflow));
    }
}
