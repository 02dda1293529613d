//! Recalculation counter.
//!
//! The wall-clock period between recalculations lives in
//! [`SimParams::tick_interval`][crate::SimParams::tick_interval]; `Tick`
//! only numbers them.  Tick 1 is the first scheduled recalculation, fired
//! one full interval after the scheduler starts.

use std::fmt;

/// Ordinal of a scheduled (or stepped) recalculation.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// The tick after `self`.
    #[inline]
    pub fn next(self) -> Tick {
        Tick(self.0 + 1)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
