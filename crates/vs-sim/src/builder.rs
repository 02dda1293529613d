//! Fluent builder for constructing a [`Simulation`].

use vs_core::{MemberId, SimParams, SimRng};
use vs_spread::{GridGeometry, SpreadParams};

use crate::shared::Shared;
use crate::{PopulationState, SimResult, Simulation};

/// Fluent builder for [`Simulation`].
///
/// # Required inputs
///
/// - [`SimParams`]: population size, row width, infection factor,
///   tick interval, seed.
///
/// # Optional inputs (have defaults)
///
/// | Method                     | Default              |
/// |----------------------------|----------------------|
/// | `.initially_infected(v)`   | Everyone healthy     |
///
/// # Example
///
/// ```rust,ignore
/// let sim = SimBuilder::new(params)
///     .initially_infected(vec![MemberId(0)])
///     .build()?;
/// sim.start()?;
/// ```
pub struct SimBuilder {
    params:             SimParams,
    initially_infected: Vec<MemberId>,
}

impl SimBuilder {
    pub fn new(params: SimParams) -> Self {
        Self {
            params,
            initially_infected: Vec::new(),
        }
    }

    /// Members infected before the run starts.  Duplicates are harmless.
    pub fn initially_infected(mut self, members: Vec<MemberId>) -> Self {
        self.initially_infected = members;
        self
    }

    /// Validate the parameters and initial infections and return an `Idle`
    /// [`Simulation`].
    ///
    /// # Errors
    /// - [`SimError::Config`] for any zero size, factor, or interval.
    /// - [`SimError::MemberOutOfRange`] for an initial infection outside the
    ///   population.
    ///
    /// [`SimError::Config`]: crate::SimError::Config
    /// [`SimError::MemberOutOfRange`]: crate::SimError::MemberOutOfRange
    pub fn build(self) -> SimResult<Simulation> {
        self.params.validate()?;
        let geometry = GridGeometry::from_params(&self.params)?;
        let population = PopulationState::with_infected(geometry, &self.initially_infected)?;

        let shared = Shared::new(
            population,
            SimRng::new(self.params.seed),
            SpreadParams::from(&self.params),
        );
        Ok(Simulation::new(self.params, geometry, shared))
    }
}
