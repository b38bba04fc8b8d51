use rayon::prelude::*;
use tracing::debug;

use tn::{Tensor3, Topology, Truncation};

use crate::error::Result;
use crate::gate::apply_bond_gate;
use crate::propagator::GateTable;
use crate::schedule::{Parity, SweepInstruction};
use crate::state::TwoSiteState;

/// Bonds of one parity in ascending order, honoring the chain topology:
/// finite chains skip the nonexistent edge bonds (valid bonds are
/// `1..len`), infinite unit cells wrap (valid bonds are `0..len`, needing
/// at least two sites).
pub fn bonds_with_parity(len: usize, topology: Topology, parity: Parity) -> Vec<usize> {
    let range = match topology {
        Topology::Finite => 1..len,
        Topology::Infinite => {
            if len < 2 {
                return Vec::new();
            }
            0..len
        }
    };
    range.filter(|&b| parity.matches(b)).collect()
}

/// One half-sweep: apply the scheduled gate to every bond of its parity.
///
/// Gates within one parity act on disjoint site pairs, so they are computed
/// in parallel; the writes happen after all gates of the sweep finished,
/// which is also the barrier the next parity relies on. Disjointness holds
/// for finite chains and even unit cells; the driver rejects odd infinite
/// cells up front. Returns the summed discarded weight of the sweep.
pub fn run_sweep<S: TwoSiteState>(
    psi: &mut S,
    instr: &SweepInstruction,
    gates: &GateTable,
    trunc: &Truncation,
) -> Result<f64> {
    let bonds = bonds_with_parity(psi.len(), psi.topology(), instr.parity);

    let work: Vec<(usize, Tensor3, Tensor3)> = bonds
        .into_iter()
        .map(|bond| {
            let (a, b) = psi.read_pair(bond);
            (bond, a, b)
        })
        .collect();

    let updated = work
        .into_par_iter()
        .map(|(bond, a, b)| {
            apply_bond_gate(bond, &a, &b, gates.gate(instr.slice_id, bond), trunc)
                .map(|(na, nb, w)| (bond, na, nb, w))
        })
        .collect::<Result<Vec<_>>>()?;

    let mut total = 0.0;
    for (bond, a, b, w) in updated {
        psi.put_pair(bond, a, b);
        total += w;
    }
    debug!(
        parity = ?instr.parity,
        slice = instr.slice,
        discarded = total,
        "sweep done"
    );
    Ok(total)
}
