use core::fmt::{Debug, Display};
use core::iter::Sum;
use core::ops::{Add, AddAssign, Neg, Sub, SubAssign};

use num_traits::{CheckedAdd, CheckedSub, One, Zero};

/// A trait representing a capacity/flow type which is typically a signed integer.
///
/// Flows are signed so that the source can carry a negative excess during a
/// push-relabel run.
pub trait Int:
    Copy
    + Sum<Self>
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + Ord
    + AddAssign
    + SubAssign
    + CheckedAdd
    + CheckedSub
    + Zero
    + One
    + Debug
    + Display
    + Default
{
}

impl Int for i32 {}

impl Int for i64 {}
