use tracing::debug;

use tn::{Topology, Truncation};

use crate::error::{Result, TebdError};
use crate::model::BondModel;
use crate::propagator::{EvolutionKind, GateTable};
use crate::schedule::Schedule;
use crate::state::TwoSiteState;
use crate::sweep::run_sweep;

/// TEBD parameters: step size, Trotter order, real vs. imaginary time, and
/// the per-bond truncation configuration.
#[derive(Clone, Copy, Debug)]
pub struct TebdParams {
    pub dt: f64,
    pub order: usize,
    pub kind: EvolutionKind,
    pub trunc: Truncation,
}

impl TebdParams {
    /// Defaults: second order, real time, unconstrained truncation.
    pub fn new(dt: f64) -> Self {
        Self {
            dt,
            order: 2,
            kind: EvolutionKind::Real,
            trunc: Truncation::default(),
        }
    }
}

/// Drives repeated Trotter steps over a state.
///
/// The driver owns the schedule, the precomputed gate table, the step
/// counter, and the truncation-error accumulators. Termination is the
/// caller's business: for imaginary time, check convergence (e.g. an energy
/// delta) between steps and renormalize the state after each one.
pub struct TebdDriver {
    schedule: Schedule,
    gates: GateTable,
    trunc: Truncation,
    dt: f64,
    steps_done: usize,
    last_step_error: f64,
    total_error: f64,
}

impl TebdDriver {
    /// Build the schedule and precompute the propagator for every scheduled
    /// (time slice, bond) pair. Reads only dimensions from `psi`.
    pub fn new<M, S>(params: &TebdParams, model: &M, psi: &S) -> Result<Self>
    where
        M: BondModel,
        S: TwoSiteState,
    {
        if model.sites() != psi.len() {
            return Err(TebdError::LengthMismatch {
                model_sites: model.sites(),
                state_sites: psi.len(),
            });
        }
        // Same-parity bonds of an odd unit cell overlap on one site, which
        // would break the disjointness the parallel sweep relies on.
        if psi.topology() == Topology::Infinite && psi.len() % 2 == 1 {
            return Err(TebdError::OddUnitCell(psi.len()));
        }
        let schedule = Schedule::build(params.order, params.dt)?;
        let gates = GateTable::build(model, &schedule, params.kind, psi.topology());
        Ok(Self {
            schedule,
            gates,
            trunc: params.trunc,
            dt: params.dt,
            steps_done: 0,
            last_step_error: 0.0,
            total_error: 0.0,
        })
    }

    /// One full Trotter step; returns the step's truncation error.
    ///
    /// A failure from a nested component propagates unchanged and aborts the
    /// step; sweeps already completed within the step are not rolled back.
    /// Callers needing atomicity must snapshot the state beforehand.
    pub fn step<S: TwoSiteState>(&mut self, psi: &mut S) -> Result<f64> {
        let mut step_error = 0.0;
        for instr in self.schedule.entries() {
            step_error += run_sweep(psi, instr, &self.gates, &self.trunc)?;
        }
        self.steps_done += 1;
        self.last_step_error = step_error;
        self.total_error += step_error;
        debug!(
            step = self.steps_done,
            step_error,
            total = self.total_error,
            "TEBD step"
        );
        Ok(step_error)
    }

    /// Run `n` steps; returns the truncation error summed over them.
    pub fn run<S: TwoSiteState>(&mut self, psi: &mut S, n: usize) -> Result<f64> {
        let mut acc = 0.0;
        for _ in 0..n {
            acc += self.step(psi)?;
        }
        Ok(acc)
    }

    pub fn steps_done(&self) -> usize {
        self.steps_done
    }

    /// Evolved time so far: `dt` times completed steps.
    pub fn elapsed_time(&self) -> f64 {
        self.dt * self.steps_done as f64
    }

    pub fn last_step_error(&self) -> f64 {
        self.last_step_error
    }

    /// Cumulative truncation error since the driver was created.
    pub fn truncation_error(&self) -> f64 {
        self.total_error
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }
}
