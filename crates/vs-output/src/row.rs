//! Plain data row types written by output backends.

use vs_sim::{ChangeCause, StateChange};

/// One committed change, flattened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeRow {
    pub seq:            u64,
    /// `"tick"` or `"contact"`.
    pub cause:          &'static str,
    /// Tick number for ticks; empty for contacts.
    pub tick:           Option<u64>,
    /// Contacted member for contacts; empty for ticks.
    pub member:         Option<u32>,
    pub newly_infected: u64,
    pub infected:       u64,
    pub healthy:        u64,
}

impl From<&StateChange> for ChangeRow {
    fn from(change: &StateChange) -> Self {
        let (cause, tick, member) = match change.cause {
            ChangeCause::Tick(t) => ("tick", Some(t.0), None),
            ChangeCause::Contact(m) => ("contact", None, Some(m.0)),
        };
        Self {
            seq: change.seq,
            cause,
            tick,
            member,
            newly_infected: change.newly_infected.len() as u64,
            infected:       change.snapshot.infected_count() as u64,
            healthy:        change.snapshot.healthy_count() as u64,
        }
    }
}
