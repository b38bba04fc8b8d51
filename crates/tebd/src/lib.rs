//! Time-evolving block decimation (TEBD) for nearest-neighbor Hamiltonians.
//!
//! A nearest-neighbor Hamiltonian splits as `H = H_even + H_odd` over the
//! two bond parities. One time step applies a Trotter-Suzuki sequence of
//! two-site propagators, sweeping each parity in turn and truncating every
//! bond after each gate. The per-step sum of discarded weights bounds the
//! truncation error and is reported back to the caller.
//!
//! Real time evolves under `exp(-i*dt*H)`; imaginary time under
//! `exp(-dt*H)`, which projects onto the ground state for long enough
//! evolution (the caller renormalizes between steps).

pub mod driver;
pub mod error;
pub mod gate;
pub mod model;
pub mod propagator;
pub mod schedule;
pub mod state;
pub mod sweep;

pub use driver::{TebdDriver, TebdParams};
pub use error::{Result, TebdError};
pub use gate::apply_bond_gate;
pub use model::BondModel;
pub use propagator::{EvolutionKind, GateTable};
pub use schedule::{Parity, Schedule, SweepInstruction};
pub use state::TwoSiteState;
pub use sweep::{bonds_with_parity, run_sweep};
