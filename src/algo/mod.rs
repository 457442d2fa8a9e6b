use core::fmt::Debug;

use crate::network::Network;

pub mod edmonds_karp;
pub mod incremental;
pub mod push_relabel;
pub mod relabel_to_front;

pub use edmonds_karp::EdmondsKarp;
pub use push_relabel::GenericPushRelabel;
pub use relabel_to_front::RelabelToFront;

/// A maximum flow algorithm.
pub trait MaxFlow {
    type Int;
    type Error: Debug;

    /// Reset all flow on `network`, compute a maximum flow from its source to
    /// its sink and return the flow value.
    fn max_flow(&mut self, network: &mut Network<Self::Int>) -> Result<Self::Int, Self::Error>;
}

/// Selects one of the built-in solvers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Algorithm {
    EdmondsKarp,
    PushRelabel,
    RelabelToFront,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::EdmondsKarp,
        Algorithm::PushRelabel,
        Algorithm::RelabelToFront,
    ];
}
