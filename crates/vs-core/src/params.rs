//! Run configuration.
//!
//! `SimParams` is immutable for the lifetime of a run.  Applications build
//! it in code or load it from JSON (with the `serde` feature) and hand it
//! to `vs_sim::SimBuilder`, which calls [`SimParams::validate`] before
//! anything is scheduled.

use std::time::Duration;

use crate::{VsError, VsResult};

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimParams {
    /// Number of members in the population.  Fixed for the run.
    pub group_size: usize,

    /// Members per grid row.  Usually derived from the display width
    /// (see `vs_spread::GridGeometry::columns_for_width`).
    pub elements_in_row: usize,

    /// Upper bound on how many neighbors one infected member can newly
    /// infect per tick.
    pub infection_factor: usize,

    /// Milliseconds between scheduled recalculations.
    pub tick_interval_ms: u64,

    /// Master RNG seed.  The same seed and the same manual contacts
    /// reproduce the same run.
    #[cfg_attr(feature = "serde", serde(default))]
    pub seed: u64,
}

impl SimParams {
    /// Check that every size and period is positive.
    ///
    /// Zero values would make the neighbor and subset math undefined, so they
    /// are rejected up front instead of surfacing mid-run.
    pub fn validate(&self) -> VsResult<()> {
        let checks: [(&str, u64); 4] = [
            ("group_size", self.group_size as u64),
            ("elements_in_row", self.elements_in_row as u64),
            ("infection_factor", self.infection_factor as u64),
            ("tick_interval_ms", self.tick_interval_ms),
        ];
        for (field, value) in checks {
            if value == 0 {
                return Err(VsError::Config(format!("{field} must be positive")));
            }
        }
        if u32::try_from(self.group_size - 1).is_err() {
            return Err(VsError::Config(format!(
                "group_size {} exceeds the addressable member range",
                self.group_size
            )));
        }
        Ok(())
    }

    /// Period between scheduled recalculations.
    #[inline]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Number of grid rows: `ceil(group_size / elements_in_row)`.
    ///
    /// Returns 0 when `elements_in_row` is 0 (an invalid configuration).
    #[inline]
    pub fn rows(&self) -> usize {
        if self.elements_in_row == 0 {
            return 0;
        }
        self.group_size.div_ceil(self.elements_in_row)
    }
}
