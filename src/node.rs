use alloc::vec::Vec;

use crate::int::Int;

/// Index of a node inside a [`Network`](crate::Network).
pub type NodeId = usize;

/// Index of a residual slot inside a [`Network`](crate::Network).
pub(crate) type SlotId = usize;

/// Per-node state. `height` and `excess` belong to whichever solver is running.
#[derive(Clone, Debug)]
pub(crate) struct Node<C> {
    pub(crate) height: usize,
    pub(crate) excess: C,
    // current-edge cursor into `slots`
    pub(crate) cursor: usize,
    /// Outgoing residual slots of this node.
    pub(crate) slots: Vec<SlotId>,
}

impl<C: Int> Node<C> {
    pub(crate) fn new() -> Self {
        Node {
            height: 0,
            excess: C::zero(),
            cursor: 0,
            slots: Vec::new(),
        }
    }

    pub(crate) fn reset(&mut self) {
        self.height = 0;
        self.excess = C::zero();
        self.cursor = 0;
    }

    pub(crate) fn is_active(&self) -> bool {
        self.excess > C::zero()
    }
}
