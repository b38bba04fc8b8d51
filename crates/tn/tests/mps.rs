use tn::{C64, MPS, Tensor3, Topology};

fn bell_pair() -> MPS {
    // theta[p, q] = delta_{pq} / sqrt(2): the |00> + |11> state.
    let mut a = Tensor3::zeros(1, 2, 2);
    a.set(0, 0, 0, C64::new(1.0, 0.0));
    a.set(0, 1, 1, C64::new(1.0, 0.0));

    let s = 1.0 / 2.0_f64.sqrt();
    let mut b = Tensor3::zeros(2, 2, 1);
    b.set(0, 0, 0, C64::new(s, 0.0));
    b.set(1, 1, 0, C64::new(s, 0.0));

    MPS {
        sites: vec![a, b],
        topology: Topology::Finite,
    }
}

#[test]
fn product_state_amplitudes() {
    let psi = MPS::product(&[0, 1, 0], 2, Topology::Finite);

    assert!((psi.amplitude(&[0, 1, 0]).re - 1.0).abs() < 1e-15);
    assert!(psi.amplitude(&[0, 0, 0]).norm() < 1e-15);
    assert!(psi.amplitude(&[1, 1, 0]).norm() < 1e-15);
    assert!((psi.norm() - 1.0).abs() < 1e-15);
}

#[test]
fn bell_pair_norm_and_amplitudes() {
    let psi = bell_pair();
    let s = 1.0 / 2.0_f64.sqrt();

    assert!((psi.norm() - 1.0).abs() < 1e-12);
    assert!((psi.amplitude(&[0, 0]).re - s).abs() < 1e-12);
    assert!((psi.amplitude(&[1, 1]).re - s).abs() < 1e-12);
    assert!(psi.amplitude(&[0, 1]).norm() < 1e-12);
}

#[test]
fn normalize_rescales_to_unit_norm() {
    let mut psi = bell_pair();
    psi.sites[0].scale(3.0);

    let old = psi.normalize();
    assert!((old - 3.0).abs() < 1e-12, "old norm = {}", old);
    assert!((psi.norm() - 1.0).abs() < 1e-12);
}

#[test]
fn apply_1q_flips_basis_state() {
    let z = C64::new(0.0, 0.0);
    let o = C64::new(1.0, 0.0);
    let x = [[z, o], [o, z]];

    let mut psi = MPS::new_zero(2);
    psi.apply_1q(1, x);

    assert!((psi.amplitude(&[0, 1]).re - 1.0).abs() < 1e-15);
    assert!(psi.amplitude(&[0, 0]).norm() < 1e-15);
}

#[test]
fn bond_indexing_finite_and_infinite() {
    let finite = MPS::new_zero(4);
    assert_eq!(finite.bond_sites(1), (0, 1));
    assert_eq!(finite.bond_sites(3), (2, 3));
    assert_eq!(finite.bond_dim(2), 1);

    let ring = MPS::product(&[0, 0, 0, 0], 2, Topology::Infinite);
    assert_eq!(ring.bond_sites(0), (3, 0));
    assert_eq!(ring.bond_sites(2), (1, 2));
}
