use tn::{Tensor3, Topology, MPS};

/// Two-site access to a chain state, which is all the engine needs from the
/// MPS container. Bond `i` joins sites `(i - 1, i)`; finite chains expose bonds
/// `1..len`, infinite unit cells expose bonds `0..len` with bond 0 wrapping
/// from the last site to site 0.
pub trait TwoSiteState {
    fn len(&self) -> usize;

    fn topology(&self) -> Topology;

    /// Current dimension of the given bond.
    fn bond_dim(&self, bond: usize) -> usize;

    /// Clone the pair of site tensors joined by `bond`, left site first.
    fn read_pair(&self, bond: usize) -> (Tensor3, Tensor3);

    /// Replace the pair of site tensors joined by `bond`. The caller
    /// guarantees the pair shares a consistent inner bond dimension.
    fn put_pair(&mut self, bond: usize, left: Tensor3, right: Tensor3);
}

impl TwoSiteState for MPS {
    fn len(&self) -> usize {
        self.sites.len()
    }

    fn topology(&self) -> Topology {
        self.topology
    }

    fn bond_dim(&self, bond: usize) -> usize {
        MPS::bond_dim(self, bond)
    }

    fn read_pair(&self, bond: usize) -> (Tensor3, Tensor3) {
        let (i, j) = self.bond_sites(bond);
        (self.sites[i].clone(), self.sites[j].clone())
    }

    fn put_pair(&mut self, bond: usize, left: Tensor3, right: Tensor3) {
        let (i, j) = self.bond_sites(bond);
        self.sites[i] = left;
        self.sites[j] = right;
    }
}
