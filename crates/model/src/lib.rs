pub mod energy;
mod env;
pub mod hamiltonian;
pub mod observables;
pub mod ops;

pub use energy::energy;
pub use hamiltonian::{Heisenberg, TransverseIsing};
pub use observables::{expect_bond, expect_site, expect_x, expect_xx, expect_yy, expect_z, expect_zz};
