//! Tests for vs-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::{CHANGE_HEADERS, CsvWriter};
    use crate::row::ChangeRow;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn tick_row(seq: u64, tick: u64) -> ChangeRow {
        ChangeRow {
            seq,
            cause:          "tick",
            tick:           Some(tick),
            member:         None,
            newly_infected: 3,
            infected:       4,
            healthy:        5,
        }
    }

    #[test]
    fn csv_file_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("changes.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, CHANGE_HEADERS);
    }

    #[test]
    fn csv_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_change(&tick_row(1, 1)).unwrap();
        w.write_change(&ChangeRow {
            seq:            2,
            cause:          "contact",
            tick:           None,
            member:         Some(7),
            newly_infected: 1,
            infected:       5,
            healthy:        4,
        })
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("changes.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][1], "tick");
        assert_eq!(&rows[0][2], "1");
        assert_eq!(&rows[0][3], "");  // no member for ticks
        assert_eq!(&rows[1][1], "contact");
        assert_eq!(&rows[1][2], "");  // no tick for contacts
        assert_eq!(&rows[1][3], "7");
        assert_eq!(&rows[1][5], "5");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap(); // second call should not panic
    }

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("does-not-exist")).is_err());
    }
}

#[cfg(test)]
mod observer_tests {
    use vs_core::{MemberId, SimParams};
    use vs_sim::SimBuilder;

    use crate::observer::SimOutputObserver;
    use crate::row::ChangeRow;
    use crate::writer::OutputWriter;
    use crate::{CsvWriter, OutputResult};

    /// Keeps rows in memory.
    #[derive(Default)]
    struct MemoryWriter {
        rows:     Vec<ChangeRow>,
        finishes: usize,
    }

    impl OutputWriter for MemoryWriter {
        fn write_change(&mut self, row: &ChangeRow) -> OutputResult<()> {
            self.rows.push(row.clone());
            Ok(())
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.finishes += 1;
            Ok(())
        }
    }

    fn params() -> SimParams {
        SimParams {
            group_size:       16,
            elements_in_row:  4,
            infection_factor: 2,
            tick_interval_ms: 2,
            seed:             1,
        }
    }

    #[test]
    fn records_every_change_of_a_full_run() {
        let sim = SimBuilder::new(params())
            .initially_infected(vec![MemberId(0)])
            .build()
            .unwrap();
        let handle = sim.observe(SimOutputObserver::new(MemoryWriter::default())).unwrap();
        sim.start().unwrap();

        let mut obs = handle.join().unwrap();
        assert!(obs.take_error().is_none());
        let rows_written = obs.rows_written();
        let writer = obs.into_writer();
        assert_eq!(writer.rows.len() as u64, rows_written);
        assert!(writer.finishes >= 1);

        let last = writer.rows.last().unwrap();
        assert_eq!(last.infected, 16);
        assert_eq!(last.healthy, 0);
        for (i, row) in writer.rows.iter().enumerate() {
            assert_eq!(row.seq, i as u64 + 1);
            assert_eq!(row.cause, "tick");
        }
    }

    #[test]
    fn contact_rows_name_the_member() {
        let mut p = params();
        p.tick_interval_ms = 60_000;
        let sim = SimBuilder::new(p).build().unwrap();
        let handle = sim.observe(SimOutputObserver::new(MemoryWriter::default())).unwrap();
        sim.force_infect(MemberId(9)).unwrap();

        let writer = handle.detach().unwrap().into_writer();
        assert_eq!(writer.rows.len(), 1);
        assert_eq!(writer.rows[0].cause, "contact");
        assert_eq!(writer.rows[0].member, Some(9));
        assert_eq!(writer.rows[0].tick, None);
        assert_eq!(writer.rows[0].infected, 1);
        assert_eq!(writer.rows[0].healthy, 15);
    }

    #[test]
    fn unfinished_stepped_run_closes_on_drop() {
        let mut p = params();
        p.tick_interval_ms = 60_000;
        let sim = SimBuilder::new(p)
            .initially_infected(vec![MemberId(0)])
            .build()
            .unwrap();
        let handle = sim.observe(SimOutputObserver::new(MemoryWriter::default())).unwrap();
        let event = sim.step().unwrap();
        assert!(!event.is_finished());

        // Never started, so the run is still idle; dropping it ends the stream.
        drop(sim);
        let mut obs = handle.join().unwrap();
        assert!(obs.take_error().is_none());
        assert_eq!(obs.rows_written(), 1);
        let writer = obs.into_writer();
        assert_eq!(writer.finishes, 1);
        assert_eq!(writer.rows[0].cause, "tick");
        assert_eq!(writer.rows[0].tick, Some(1));
    }

    #[test]
    fn integration_csv() {
        let dir = tempfile::tempdir().unwrap();
        let sim = SimBuilder::new(params())
            .initially_infected(vec![MemberId(5)])
            .build()
            .unwrap();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let handle = sim.observe(SimOutputObserver::new(writer)).unwrap();
        sim.start().unwrap();
        let mut obs = handle.join().unwrap();
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("changes.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len() as u64, obs.rows_written());
        assert_eq!(&rows.last().unwrap()[6], "0"); // nobody healthy at the end
    }
}
