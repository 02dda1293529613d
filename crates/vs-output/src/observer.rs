//! `SimOutputObserver<W>` bridges `SimObserver` to an `OutputWriter`.

use log::warn;
use vs_sim::{SimObserver, StateChange};

use crate::row::ChangeRow;
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes every committed change to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver`
/// methods have no return value.  After the observer is joined, check for
/// errors with [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    rows:       u64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            rows: 0,
            last_error: None,
        }
    }

    /// Take the stored write error (if any).
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Rows successfully written so far.
    pub fn rows_written(&self) -> u64 {
        self.rows
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn record(&mut self, change: &StateChange) {
        let result = self.writer.write_change(&ChangeRow::from(change));
        if result.is_ok() {
            self.rows += 1;
        }
        self.store_err(result);
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!("output write failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_change(&mut self, change: &StateChange) {
        self.record(change);
    }

    fn on_finished(&mut self, change: &StateChange) {
        self.record(change);
        let result = self.writer.finish();
        self.store_err(result);
    }

    fn on_closed(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
