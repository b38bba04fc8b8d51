use faer::Mat;
use tn::C64;

/// Nearest-neighbor Hamiltonian collaborator.
///
/// For each bond the model supplies the dense local term `h` acting on the
/// two adjacent sites, row-major over the combined physical index
/// `p_left * dp_right + p_right`. The engine exponentiates these terms into
/// propagators; the model never sees the state.
pub trait BondModel {
    fn sites(&self) -> usize;

    /// Dense two-site Hamiltonian term on `bond`.
    fn bond_term(&self, bond: usize) -> Mat<C64>;
}
