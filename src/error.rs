use displaydoc::Display;

#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum Error {
    /// Node index {0} is out of range for a network of {1} nodes
    NodeOutOfRange(usize, usize),
    /// Invalid edge where source and destination are both node {0}
    SelfLoop(usize),
    /// Invalid capacity on edge ({0}, {1}), expected non-negative value
    NegativeCapacity(usize, usize),
    /// Arithmetic overflow while accumulating flow
    ArithmeticOverflow,
    /// Flow on edge ({0}, {1}) is outside of [0, capacity]
    CapacityViolated(usize, usize),
    /// Flow is not conserved at node {0}
    ConservationViolated(usize),
    /// Cached residual capacity of ({0}, {1}) does not match capacity and flow
    ResidualMismatch(usize, usize),
    /// Height function is invalid on residual edge ({0}, {1})
    HeightViolated(usize, usize),
}

impl core::error::Error for Error {}
