//! The `OutputWriter` trait implemented by all backend writers.

use crate::{ChangeRow, OutputResult};

/// Trait implemented by output backends.
///
/// All methods are infallible from the observer's perspective; errors are
/// stored internally and retrieved with [`SimOutputObserver::take_error`].
///
/// [`SimOutputObserver::take_error`]: crate::SimOutputObserver::take_error
pub trait OutputWriter: Send + 'static {
    /// Write one committed change.
    fn write_change(&mut self, row: &ChangeRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
