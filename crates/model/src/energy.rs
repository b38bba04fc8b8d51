use tebd::BondModel;
use tn::{Topology, MPS};

use crate::observables::expect_bond;

/// <psi|H|psi> / <psi|psi>, summing the model's two-site terms over all
/// bonds of a finite chain.
pub fn energy<M: BondModel>(psi: &MPS, model: &M) -> f64 {
    assert_eq!(
        model.sites(),
        psi.len(),
        "model and state disagree on chain length"
    );
    assert!(
        psi.topology == Topology::Finite,
        "energy supports finite chains only"
    );

    (1..psi.len())
        .map(|bond| expect_bond(psi, bond, &model.bond_term(bond)))
        .sum()
}
