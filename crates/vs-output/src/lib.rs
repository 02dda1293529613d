//! `vs-output`: change-log writers for the virus_sim engine.
//!
//! | Backend | Files created  |
//! |---------|----------------|
//! | CSV     | `changes.csv`  |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SimOutputObserver`], which implements `vs_sim::SimObserver` and so
//! runs on the observer's dispatcher thread, never under the population lock.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vs_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let handle = sim.observe(SimOutputObserver::new(writer))?;
//! sim.start()?;
//! let mut obs = handle.join().expect("observer panicked");
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SimOutputObserver;
pub use row::ChangeRow;
pub use writer::OutputWriter;
