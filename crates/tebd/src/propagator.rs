use std::collections::HashMap;

use faer::Mat;
use tn::{C64, Topology};

use crate::model::BondModel;
use crate::schedule::Schedule;
use crate::sweep::bonds_with_parity;

/// Real vs. imaginary time evolution. Fixes the sign/phase of the
/// propagator exponent once, when the gate table is built, instead of
/// branching on every gate application.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EvolutionKind {
    /// Unitary evolution under `exp(-i*dt*H)`.
    Real,
    /// Ground-state projection under `exp(-dt*H)`.
    Imag,
}

impl EvolutionKind {
    fn exponent(self, slice: f64) -> C64 {
        match self {
            EvolutionKind::Real => C64::new(0.0, -slice),
            EvolutionKind::Imag => C64::new(-slice, 0.0),
        }
    }
}

/// Dense two-site propagators, precomputed once per scheduled
/// (time slice, bond) pair.
pub struct GateTable {
    gates: HashMap<(usize, usize), Mat<C64>>,
}

impl GateTable {
    pub fn build<M: BondModel>(
        model: &M,
        schedule: &Schedule,
        kind: EvolutionKind,
        topology: Topology,
    ) -> Self {
        let mut gates = HashMap::new();
        for instr in schedule.entries() {
            let factor = kind.exponent(instr.slice);
            for bond in bonds_with_parity(model.sites(), topology, instr.parity) {
                gates
                    .entry((instr.slice_id, bond))
                    .or_insert_with(|| expm(&model.bond_term(bond), factor));
            }
        }
        Self { gates }
    }

    /// The propagator for a scheduled (slice, bond) pair. The table is built
    /// from the same schedule that drives the sweeps, so every lookup hits.
    pub fn gate(&self, slice_id: usize, bond: usize) -> &Mat<C64> {
        self.gates
            .get(&(slice_id, bond))
            .expect("gate table covers every scheduled bond")
    }
}

fn identity(n: usize) -> Mat<C64> {
    let mut m = Mat::<C64>::zeros(n, n);
    for i in 0..n {
        m.write(i, i, C64::new(1.0, 0.0));
    }
    m
}

fn matmul(a: &Mat<C64>, b: &Mat<C64>) -> Mat<C64> {
    let (n, k, m) = (a.nrows(), a.ncols(), b.ncols());
    let mut out = Mat::<C64>::zeros(n, m);
    for i in 0..n {
        for l in 0..k {
            let av = a.read(i, l);
            for j in 0..m {
                out.write(i, j, out.read(i, j) + av * b.read(l, j));
            }
        }
    }
    out
}

/// Dense `exp(factor * h)` by scaling and squaring with a Taylor series.
/// The blocks here are tiny (dp^2 square), so this stays cheap.
pub(crate) fn expm(h: &Mat<C64>, factor: C64) -> Mat<C64> {
    let n = h.nrows();
    assert_eq!(h.ncols(), n, "expm needs a square matrix");

    let mut a = Mat::<C64>::zeros(n, n);
    for i in 0..n {
        for j in 0..n {
            a.write(i, j, factor * h.read(i, j));
        }
    }

    // Scale into the comfortably convergent region, square back afterward.
    let mut norm = 0.0f64;
    for i in 0..n {
        let mut row = 0.0;
        for j in 0..n {
            row += a.read(i, j).norm();
        }
        norm = norm.max(row);
    }
    let mut squarings = 0u32;
    while norm > 0.5 {
        norm /= 2.0;
        squarings += 1;
    }
    if squarings > 0 {
        let inv = 1.0 / (2.0f64).powi(squarings as i32);
        for i in 0..n {
            for j in 0..n {
                a.write(i, j, a.read(i, j) * inv);
            }
        }
    }

    let mut result = identity(n);
    let mut term = identity(n);
    for k in 1..=20 {
        term = matmul(&term, &a);
        let inv_k = 1.0 / k as f64;
        for i in 0..n {
            for j in 0..n {
                term.write(i, j, term.read(i, j) * inv_k);
                result.write(i, j, result.read(i, j) + term.read(i, j));
            }
        }
    }

    for _ in 0..squarings {
        result = matmul(&result, &result);
    }
    result
}
