use faer::Mat;
use tebd::BondModel;
use tn::{C64, Topology};

use crate::ops::{add_scaled, identity2, kron2, pauli_x, pauli_y, pauli_z};

/// Spin-1/2 Heisenberg chain in Pauli form:
/// `H = sum over bonds of jx XX + jy YY + jz ZZ`.
///
/// Couplings are per bond: index `b - 1` for finite chains (bonds
/// `1..=n-1`), index `b` for infinite unit cells (bonds `0..n`, bond 0 is
/// the wrap bond).
#[derive(Clone)]
pub struct Heisenberg {
    pub jx: Vec<f64>,
    pub jy: Vec<f64>,
    pub jz: Vec<f64>,
    pub topology: Topology,
}

impl Heisenberg {
    pub fn uniform(n: usize, j: f64) -> Self {
        let bonds = n.saturating_sub(1);
        Self {
            jx: vec![j; bonds],
            jy: vec![j; bonds],
            jz: vec![j; bonds],
            topology: Topology::Finite,
        }
    }

    pub fn uniform_ring(n: usize, j: f64) -> Self {
        Self {
            jx: vec![j; n],
            jy: vec![j; n],
            jz: vec![j; n],
            topology: Topology::Infinite,
        }
    }

    pub fn with_couplings(jx: Vec<f64>, jy: Vec<f64>, jz: Vec<f64>, topology: Topology) -> Self {
        assert_eq!(jx.len(), jy.len());
        assert_eq!(jx.len(), jz.len());
        Self {
            jx,
            jy,
            jz,
            topology,
        }
    }

    fn coupling_index(&self, bond: usize) -> usize {
        match self.topology {
            Topology::Finite => bond - 1,
            Topology::Infinite => bond % self.jx.len(),
        }
    }
}

impl BondModel for Heisenberg {
    fn sites(&self) -> usize {
        match self.topology {
            Topology::Finite => self.jx.len() + 1,
            Topology::Infinite => self.jx.len(),
        }
    }

    fn bond_term(&self, bond: usize) -> Mat<C64> {
        let i = self.coupling_index(bond);
        let mut term = Mat::<C64>::zeros(4, 4);
        add_scaled(&mut term, &kron2(pauli_x(), pauli_x()), self.jx[i]);
        add_scaled(&mut term, &kron2(pauli_y(), pauli_y()), self.jy[i]);
        add_scaled(&mut term, &kron2(pauli_z(), pauli_z()), self.jz[i]);
        term
    }
}

/// Transverse-field Ising chain: `H = sum over bonds of j ZZ + sum over
/// sites of h X`.
///
/// Site fields fold onto the adjacent bond terms so the Hamiltonian is a
/// pure sum of two-site terms: half weight on each side in the bulk, full
/// weight where an open edge leaves a site with a single bond.
#[derive(Clone)]
pub struct TransverseIsing {
    pub j: Vec<f64>,
    pub h: Vec<f64>,
    pub topology: Topology,
}

impl TransverseIsing {
    pub fn uniform(n: usize, j: f64, h: f64) -> Self {
        Self {
            j: vec![j; n.saturating_sub(1)],
            h: vec![h; n],
            topology: Topology::Finite,
        }
    }

    pub fn uniform_ring(n: usize, j: f64, h: f64) -> Self {
        Self {
            j: vec![j; n],
            h: vec![h; n],
            topology: Topology::Infinite,
        }
    }

    /// Field weight a site contributes through one of its bonds.
    fn field_weight(&self, site: usize) -> f64 {
        let n = self.h.len();
        match self.topology {
            Topology::Finite if site == 0 || site == n - 1 => 1.0,
            _ => 0.5,
        }
    }
}

impl BondModel for TransverseIsing {
    fn sites(&self) -> usize {
        self.h.len()
    }

    fn bond_term(&self, bond: usize) -> Mat<C64> {
        let n = self.h.len();
        let (left, right, coupling) = match self.topology {
            Topology::Finite => (bond - 1, bond, self.j[bond - 1]),
            Topology::Infinite => {
                let b = bond % n;
                ((b + n - 1) % n, b, self.j[b])
            }
        };

        let mut term = Mat::<C64>::zeros(4, 4);
        add_scaled(&mut term, &kron2(pauli_z(), pauli_z()), coupling);
        add_scaled(
            &mut term,
            &kron2(pauli_x(), identity2()),
            self.h[left] * self.field_weight(left),
        );
        add_scaled(
            &mut term,
            &kron2(identity2(), pauli_x()),
            self.h[right] * self.field_weight(right),
        );
        term
    }
}
