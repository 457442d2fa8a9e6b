//! A maximum flow engine.
//!
//! A [`Network`] owns a fixed set of nodes and a mutable set of capacitated
//! edges, and caches the residual capacity of every node pair. Three
//! interchangeable solvers compute a maximum flow on it:
//!
//! * [`EdmondsKarp`]: breadth-first augmenting paths,
//! * [`GenericPushRelabel`]: push-relabel with a FIFO worklist,
//! * [`RelabelToFront`]: relabel-to-front discharge with the gap heuristic.
//!
//! Once a network carries a maximum flow, [`Network::increment_edge`] and
//! [`Network::decrement_edge`] change a capacity by one and repair the flow in
//! place.
//!
//! ```
//! use flownet::Network;
//!
//! let mut net = Network::<i64>::new(4);
//! net.add_edge(0, 1, 3);
//! net.add_edge(0, 2, 2);
//! net.add_edge(1, 3, 2);
//! net.add_edge(2, 3, 3);
//! net.add_edge(1, 2, 1);
//!
//! assert_eq!(net.relabel_to_front(), Ok(5));
//! assert_eq!(net.edmonds_karp(), Ok(5));
//!
//! net.increment_edge(1, 3);
//! assert_eq!(net.max_flow_value(), 5);
//! ```
#![no_std]
#![deny(
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod algo;
pub mod error;
pub mod int;
pub mod network;
pub mod node;
pub mod record;

mod check;

pub use crate::algo::{
    Algorithm, EdmondsKarp, GenericPushRelabel, MaxFlow, RelabelToFront,
};
pub use crate::error::Error;
pub use crate::int::Int;
pub use crate::network::{Edge, Network};
pub use crate::node::NodeId;
pub use crate::record::{EdgeRecord, RawEdge};

impl<C: Int> Network<C> {
    /// Computes a maximum flow with the selected built-in solver.
    pub fn run(&mut self, algo: Algorithm) -> Result<C, Error> {
        match algo {
            Algorithm::EdmondsKarp => self.edmonds_karp(),
            Algorithm::PushRelabel => self.generic_push_relabel(),
            Algorithm::RelabelToFront => self.relabel_to_front(),
        }
    }
}
