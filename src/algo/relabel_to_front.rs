//! Relabel-to-front push-relabel with the gap heuristic.
//!
//! Non-terminal nodes are kept in a list `L`. The solver walks `L` from the
//! front and discharges every node; a node whose height increased during its
//! discharge is moved to the front of `L`. Each node owns a current-edge
//! cursor into its slot list, which only rewinds on relabel, so a discharge
//! costs `O(degree)` amortized and the whole run `O(V^3)`.
//!
//! Every `gap_interval` discharges the height histogram is scanned for an
//! empty level `k`. Nodes above the gap cannot reach the sink any more and are
//! lifted to `n + 1` in one go.

use alloc::vec;
use alloc::vec::Vec;
use core::marker::PhantomData;

use crate::algo::push_relabel::{
    finish, init_preflow, is_admissible, is_relabelable, push, relabel,
};
use crate::algo::MaxFlow;
use crate::error::Error;
use crate::int::Int;
use crate::network::Network;
use crate::node::NodeId;

const NIL: usize = usize::MAX;

#[derive(Clone, Debug)]
pub struct RelabelToFront<C> {
    /// Whether to use the gap heuristic.
    pub use_gap: bool,
    /// Number of discharges between two gap scans, `n^2` if unset.
    pub gap_interval: Option<usize>,
    /// The number of push operations performed by the last run.
    pub cnt_push: usize,
    /// The number of relabel operations performed by the last run.
    pub cnt_relabel: usize,
    /// The number of discharge calls performed by the last run.
    pub cnt_discharge: usize,
    /// The number of nodes lifted by the gap heuristic in the last run.
    pub cnt_gap_lift: usize,
    _phantom: PhantomData<C>,
}

impl<C> Default for RelabelToFront<C> {
    fn default() -> Self {
        Self {
            use_gap: true,
            gap_interval: None,
            cnt_push: 0,
            cnt_relabel: 0,
            cnt_discharge: 0,
            cnt_gap_lift: 0,
            _phantom: PhantomData,
        }
    }
}

impl<C> RelabelToFront<C> {
    pub fn with_gap_interval(interval: usize) -> Self {
        Self {
            gap_interval: Some(interval.max(1)),
            ..Self::default()
        }
    }

    pub fn without_gap() -> Self {
        Self {
            use_gap: false,
            ..Self::default()
        }
    }
}

/// Doubly linked list over node indices.
struct NodeList {
    head: usize,
    next: Vec<usize>,
    prev: Vec<usize>,
}

impl NodeList {
    fn new(n: usize, nodes: impl IntoIterator<Item = NodeId>) -> Self {
        let mut list = NodeList {
            head: NIL,
            next: vec![NIL; n],
            prev: vec![NIL; n],
        };
        let mut tail = NIL;
        for u in nodes {
            if tail == NIL {
                list.head = u;
            } else {
                list.next[tail] = u;
                list.prev[u] = tail;
            }
            tail = u;
        }
        list
    }

    fn move_to_front(&mut self, u: NodeId) {
        if self.head == u {
            return;
        }
        let (p, n) = (self.prev[u], self.next[u]);
        self.next[p] = n;
        if n != NIL {
            self.prev[n] = p;
        }
        self.prev[u] = NIL;
        self.next[u] = self.head;
        self.prev[self.head] = u;
        self.head = u;
    }

    fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        let mut u = self.head;
        core::iter::from_fn(move || {
            (u != NIL).then(|| {
                let cur = u;
                u = self.next[cur];
                cur
            })
        })
    }
}

impl<C: Int> MaxFlow for RelabelToFront<C> {
    type Int = C;
    type Error = Error;

    fn max_flow(&mut self, network: &mut Network<C>) -> Result<C, Error> {
        self.cnt_push = 0;
        self.cnt_relabel = 0;
        self.cnt_discharge = 0;
        self.cnt_gap_lift = 0;

        init_preflow(network)?;

        let n = network.num_nodes();
        let (src, snk) = (network.source(), network.sink());
        let mut list = NodeList::new(n, (0..n).filter(|&u| u != src && u != snk));
        let interval = self
            .use_gap
            .then(|| self.gap_interval.unwrap_or(n * n).max(1));
        let mut since_gap = 0;

        loop {
            let mut u = list.head;
            while u != NIL {
                let old_height = network.nodes[u].height;
                self.discharge(network, u)?;
                if network.nodes[u].height > old_height {
                    list.move_to_front(u);
                }

                since_gap += 1;
                if interval.map_or(false, |k| since_gap >= k) {
                    since_gap = 0;
                    self.gap(network);
                }

                u = list.next[u];
            }

            // a gap lift may leave excess behind the scan position
            if !list.iter().any(|u| network.nodes[u].is_active()) {
                break;
            }
        }

        let value = finish(network);
        log::debug!(
            "relabel-to-front: value {value} after {} discharges, {} pushes, {} relabels, {} gap lifts",
            self.cnt_discharge,
            self.cnt_push,
            self.cnt_relabel,
            self.cnt_gap_lift
        );
        Ok(value)
    }
}

impl<C: Int> RelabelToFront<C> {
    /// Pushes and relabels `u` until its excess is gone.
    fn discharge(&mut self, network: &mut Network<C>, u: NodeId) -> Result<(), Error> {
        if network.nodes[u].is_active() {
            self.cnt_discharge += 1;
        }
        while network.nodes[u].is_active() {
            let cursor = network.nodes[u].cursor;
            let current = network.nodes[u].slots.get(cursor).copied();
            match current {
                None => {
                    debug_assert!(is_relabelable(network, u));
                    relabel(network, u);
                    network.nodes[u].cursor = 0;
                    self.cnt_relabel += 1;
                }
                Some(s) if is_admissible(network, s) => {
                    push(network, s)?;
                    self.cnt_push += 1;
                }
                Some(_) => network.nodes[u].cursor += 1,
            }
        }
        Ok(())
    }

    /// Lifts every non-terminal node above the lowest empty height level to
    /// `n + 1`.
    fn gap(&mut self, network: &mut Network<C>) {
        let n = network.num_nodes();
        let src = network.source();

        let mut count = vec![0usize; n];
        for (u, node) in network.nodes.iter().enumerate() {
            if u != src && node.height < n {
                count[node.height] += 1;
            }
        }
        let Some(k) = (1..n).find(|&h| count[h] == 0) else {
            return;
        };

        let snk = network.sink();
        let mut lifted = 0;
        for (u, node) in network.nodes.iter_mut().enumerate() {
            if u == src || u == snk {
                continue;
            }
            if node.height > k && node.height <= n {
                node.height = n + 1;
                lifted += 1;
            }
            // lifted neighbours can turn skipped edges admissible again
            node.cursor = 0;
        }

        if lifted > 0 {
            log::trace!("gap at height {k}, lifted {lifted} nodes");
        }
        self.cnt_gap_lift += lifted;
    }
}

impl<C: Int> Network<C> {
    /// Computes a maximum flow with [`RelabelToFront`] and returns its value.
    pub fn relabel_to_front(&mut self) -> Result<C, Error> {
        RelabelToFront::default().max_flow(self)
    }
}
