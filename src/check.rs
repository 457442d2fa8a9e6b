use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;

use crate::error::Error;
use crate::int::Int;
use crate::network::Network;
use crate::node::NodeId;

impl<C: Int> Network<C> {
    /// Verifies the capacity bound, the residual cache and flow conservation.
    ///
    /// Returns the first violation found.
    pub fn check(&self) -> Result<(), Error> {
        for (&(u, v), &s) in &self.lookup {
            let (slot, twin) = (&self.slots[s], &self.slots[s ^ 1]);
            let capacity = slot.capacity.unwrap_or_else(C::zero);
            if slot.flow < C::zero() || slot.flow > capacity {
                return Err(Error::CapacityViolated(u, v));
            }
            if slot.residual != capacity - slot.flow + twin.flow {
                return Err(Error::ResidualMismatch(u, v));
            }
        }

        (0..self.num_nodes())
            .filter(|&u| u != self.source() && u != self.sink())
            .find(|&u| self.net_outflow(u) != C::zero())
            .map_or(Ok(()), |u| Err(Error::ConservationViolated(u)))
    }

    /// Verifies `height(u) <= height(v) + 1` on every present residual edge.
    pub fn check_heights(&self) -> Result<(), Error> {
        for u in 0..self.num_nodes() {
            if let Some(v) = self
                .residual_neighbors(u)
                .find(|&v| self.nodes[u].height > self.nodes[v].height + 1)
            {
                return Err(Error::HeightViolated(u, v));
            }
        }
        Ok(())
    }

    /// Returns the source side of a minimum cut, i.e. all nodes reachable from
    /// the source in the residual network, in increasing order.
    ///
    /// Only meaningful once the network carries a maximum flow.
    pub fn min_cut(&self) -> Vec<NodeId> {
        let mut seen = vec![false; self.num_nodes()];
        let mut queue = VecDeque::new();
        seen[self.source()] = true;
        queue.push_back(self.source());
        while let Some(u) = queue.pop_front() {
            for v in self.residual_neighbors(u) {
                if !seen[v] {
                    seen[v] = true;
                    queue.push_back(v);
                }
            }
        }
        seen.iter()
            .enumerate()
            .filter_map(|(u, &reached)| reached.then_some(u))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_broken_conservation() {
        let mut net = Network::<i64>::new(3);
        net.add_edge(0, 1, 3);
        net.add_edge(1, 2, 3);
        net.set_flow(0, 1, 2);
        assert_eq!(net.check(), Err(Error::ConservationViolated(1)));
        net.set_flow(1, 2, 2);
        assert_eq!(net.check(), Ok(()));
    }

    #[test]
    fn min_cut_after_solve() {
        let mut net = Network::<i64>::new(4);
        net.add_edge(0, 1, 5);
        net.add_edge(1, 2, 1);
        net.add_edge(2, 3, 5);
        net.edmonds_karp().unwrap();
        assert_eq!(net.min_cut(), [0, 1]);
    }

    #[test]
    fn heights_hold_after_push_relabel() {
        let mut net = Network::<i64>::new(4);
        net.add_edge(0, 1, 5);
        net.add_edge(1, 2, 1);
        net.add_edge(2, 3, 5);
        net.add_edge(0, 2, 2);
        net.generic_push_relabel().unwrap();
        assert_eq!(net.check_heights(), Ok(()));
        assert_eq!(net.check(), Ok(()));
    }
}
