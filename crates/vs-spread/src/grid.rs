//! Row-major grid geometry.
//!
//! # Layout
//!
//! Member `i` sits at `row = i / elements_in_row`, `col = i % elements_in_row`.
//! The last row may be partially filled:
//!
//! ```text
//! group_size = 7, elements_in_row = 3
//!
//!   0 1 2
//!   3 4 5
//!   6
//! ```
//!
//! # Last-row invariant
//!
//! `last_row() == ceil(group_size / elements_in_row) - 1`.  Neighbor scans
//! clip rows to `[0, last_row]` and columns to `[0, elements_in_row - 1]`,
//! then drop any index `>= group_size` (the empty cells of a partial last
//! row).  Columns never wrap: the rightmost member of a row is not adjacent
//! to the leftmost member of the next row.

use vs_core::{MemberId, SimParams, VsError, VsResult};

/// Upper bound on the neighbor count of any member (interior of the grid).
pub const MAX_NEIGHBORS: usize = 8;

/// Fixed shape of a population grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridGeometry {
    group_size:      usize,
    elements_in_row: usize,
}

impl GridGeometry {
    /// Build a geometry for `group_size` members laid out `elements_in_row`
    /// per row.  Both must be positive.
    pub fn new(group_size: usize, elements_in_row: usize) -> VsResult<Self> {
        if group_size == 0 {
            return Err(VsError::Config("group_size must be positive".into()));
        }
        if elements_in_row == 0 {
            return Err(VsError::Config("elements_in_row must be positive".into()));
        }
        Ok(Self { group_size, elements_in_row })
    }

    /// Geometry described by a run's parameters.
    pub fn from_params(params: &SimParams) -> VsResult<Self> {
        Self::new(params.group_size, params.elements_in_row)
    }

    /// How many items of `item_width` separated by `spacing` fit across
    /// `available_width`.  Mirrors how a flow layout packs cells; the
    /// result is typically fed into `SimParams::elements_in_row`.
    ///
    /// Returns 0 when nothing fits, which [`SimParams::validate`] rejects.
    pub fn columns_for_width(available_width: f64, item_width: f64, spacing: f64) -> usize {
        let stride = item_width + spacing;
        if stride <= 0.0 || available_width <= 0.0 || !available_width.is_finite() {
            return 0;
        }
        (available_width / stride).floor() as usize
    }

    #[inline]
    pub fn group_size(&self) -> usize {
        self.group_size
    }

    #[inline]
    pub fn elements_in_row(&self) -> usize {
        self.elements_in_row
    }

    /// `ceil(group_size / elements_in_row)`.
    #[inline]
    pub fn rows(&self) -> usize {
        self.group_size.div_ceil(self.elements_in_row)
    }

    /// Index of the last (possibly partial) row.
    #[inline]
    pub fn last_row(&self) -> usize {
        self.rows() - 1
    }

    #[inline]
    pub fn contains(&self, member: MemberId) -> bool {
        member.index() < self.group_size
    }

    /// `(row, col)` of `member`.
    #[inline]
    pub fn position(&self, member: MemberId) -> (usize, usize) {
        let i = member.index();
        (i / self.elements_in_row, i % self.elements_in_row)
    }

    /// The member at `(row, col)`, or `None` past the grid edge or in the
    /// empty tail of a partial last row.
    pub fn member_at(&self, row: usize, col: usize) -> Option<MemberId> {
        if col >= self.elements_in_row {
            return None;
        }
        let index = row.checked_mul(self.elements_in_row)?.checked_add(col)?;
        if index < self.group_size {
            MemberId::try_from(index).ok()
        } else {
            None
        }
    }

    /// Append the members of the 3×3 block around `member` (excluding
    /// `member` itself) to `out`, in row-major order.
    ///
    /// Corners yield 3 neighbors, edges 5, interior cells 8.
    pub fn neighbors_into(&self, member: MemberId, out: &mut Vec<MemberId>) {
        let (row, col) = self.position(member);
        let row_lo = row.saturating_sub(1);
        let row_hi = (row + 1).min(self.last_row());
        let col_lo = col.saturating_sub(1);
        let col_hi = (col + 1).min(self.elements_in_row - 1);

        for r in row_lo..=row_hi {
            for c in col_lo..=col_hi {
                if r == row && c == col {
                    continue;
                }
                if let Some(near) = self.member_at(r, c) {
                    out.push(near);
                }
            }
        }
    }

    /// Allocating convenience wrapper around [`neighbors_into`][Self::neighbors_into].
    pub fn neighbors(&self, member: MemberId) -> Vec<MemberId> {
        let mut out = Vec::with_capacity(MAX_NEIGHBORS);
        self.neighbors_into(member, &mut out);
        out
    }
}
