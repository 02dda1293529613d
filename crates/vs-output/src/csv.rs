//! CSV output backend.
//!
//! Creates `changes.csv` in the configured output directory.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{ChangeRow, OutputResult};

/// Column order of `changes.csv`.
pub const CHANGE_HEADERS: [&str; 7] =
    ["seq", "cause", "tick", "member", "newly_infected", "infected", "healthy"];

/// Writes one CSV row per committed change.
pub struct CsvWriter {
    changes:  Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Open (or create) `changes.csv` in `dir` and write the header row.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut changes = Writer::from_path(dir.join("changes.csv"))?;
        changes.write_record(CHANGE_HEADERS)?;
        Ok(Self { changes, finished: false })
    }
}

fn opt(value: Option<impl ToString>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_change(&mut self, row: &ChangeRow) -> OutputResult<()> {
        self.changes.write_record(&[
            row.seq.to_string(),
            row.cause.to_string(),
            opt(row.tick),
            opt(row.member),
            row.newly_infected.to_string(),
            row.infected.to_string(),
            row.healthy.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.changes.flush()?;
        Ok(())
    }
}
