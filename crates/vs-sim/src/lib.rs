//! `vs-sim`: the concurrent simulation core for the virus_sim engine.
//!
//! # Commit path
//!
//! ```text
//! timer thread ──┐
//! step()       ──┼──▶ lock core ─▶ propagate / infect ─▶ apply ─▶ full? ─▶ enqueue event ─▶ unlock
//! force_infect ──┘                                                         │
//!                                                  subscriber channels ◀───┘ (drained off-lock)
//! ```
//!
//! Every read and write of the population, scheduled or manual, runs in
//! one critical section of a single `Mutex`.  Events are stamped with a
//! sequence number and enqueued on unbounded channels inside that section,
//! so every subscriber sees changes in commit order, but consumer code
//! only ever runs on the consumer's own thread.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vs_core::{MemberId, SimParams};
//! use vs_sim::{SimBuilder, SimEvent};
//!
//! let sim = SimBuilder::new(params).build()?;
//! let events = sim.subscribe();
//! sim.start()?;
//! sim.force_infect(MemberId(12))?;
//! for event in events.iter() {
//!     if event.is_finished() { break; }
//! }
//! ```

pub mod builder;
pub mod contact;
pub mod error;
pub mod event;
pub mod observer;
pub mod population;
pub mod scheduler;
pub mod sim;
pub mod subscription;

mod shared;


pub use builder::SimBuilder;
pub use contact::ContactHandle;
pub use error::{SimError, SimResult};
pub use event::{ChangeCause, SimEvent, StateChange};
pub use observer::{NoopObserver, ObserverHandle, SimObserver};
pub use population::{PopulationSnapshot, PopulationState};
pub use scheduler::SchedulerPhase;
pub use shared::SubscriptionId;
pub use sim::Simulation;
pub use subscription::Subscription;
