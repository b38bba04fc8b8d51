use model::{energy, Heisenberg};
use tebd::{EvolutionKind, TebdDriver, TebdParams};
use tn::{Topology, Truncation, MPS};

fn exact_truncation(max_bond: usize) -> Truncation {
    Truncation {
        max_bond,
        weight_tolerance: 0.0,
        sv_cutoff: 0.0,
        strict: false,
    }
}

/// Imaginary-time projection onto two decoupled singlets.
///
/// Heisenberg couplings (1, 0, 1) over the three bonds of a 4-site chain:
/// the ground state is a singlet on (0, 1) times a singlet on (2, 3), with
/// energy -3 per pair in Pauli units.
#[test]
fn imaginary_time_projects_onto_decoupled_singlets() {
    let j = vec![1.0, 0.0, 1.0];
    let model = Heisenberg::with_couplings(j.clone(), j.clone(), j, Topology::Finite);
    let mut psi = MPS::product(&[0, 1, 0, 1], 2, Topology::Finite);

    let params = TebdParams {
        dt: 0.05,
        order: 2,
        kind: EvolutionKind::Imag,
        trunc: exact_truncation(4),
    };
    let mut driver = TebdDriver::new(&params, &model, &psi).unwrap();
    for _ in 0..200 {
        driver.step(&mut psi).unwrap();
        psi.normalize();
    }

    let e = energy(&psi, &model);
    assert!((e + 6.0).abs() < 1e-3, "E = {}", e);

    // Overlap with singlet x singlet, expanded over the four contributing
    // basis states.
    let overlap = 0.5
        * (psi.amplitude(&[0, 1, 0, 1]).re - psi.amplitude(&[0, 1, 1, 0]).re
            - psi.amplitude(&[1, 0, 0, 1]).re
            + psi.amplitude(&[1, 0, 1, 0]).re);
    assert!(overlap.abs() > 0.999, "overlap = {}", overlap);
}

fn evolve_real(order: usize, dt: f64, steps: usize) -> MPS {
    let model = Heisenberg::uniform(3, 1.0);
    let mut psi = MPS::product(&[0, 1, 0], 2, Topology::Finite);

    let params = TebdParams {
        dt,
        order,
        kind: EvolutionKind::Real,
        trunc: exact_truncation(8),
    };
    let mut driver = TebdDriver::new(&params, &model, &psi).unwrap();
    driver.run(&mut psi, steps).unwrap();
    psi
}

fn amplitude_distance(x: &MPS, y: &MPS) -> f64 {
    let n = x.len();
    let mut acc = 0.0;
    for bits in 0..1usize << n {
        let config: Vec<usize> = (0..n).map(|k| (bits >> k) & 1).collect();
        acc += (x.amplitude(&config) - y.amplitude(&config)).norm();
    }
    acc
}

/// Halving dt halves the Trotter error at order 1 and quarters it at
/// order 2, up to higher-order corrections.
#[test]
fn trotter_error_scales_with_the_advertised_order() {
    // Reference: order 4 with a tiny step, error ~ T * dt^4.
    let reference = evolve_real(4, 0.005, 200);

    let e1_coarse = amplitude_distance(&evolve_real(1, 0.05, 20), &reference);
    let e1_fine = amplitude_distance(&evolve_real(1, 0.025, 40), &reference);
    let ratio1 = e1_coarse / e1_fine;
    assert!(
        ratio1 > 1.5 && ratio1 < 2.7,
        "order 1 ratio = {} (coarse {}, fine {})",
        ratio1,
        e1_coarse,
        e1_fine
    );

    let e2_coarse = amplitude_distance(&evolve_real(2, 0.2, 5), &reference);
    let e2_fine = amplitude_distance(&evolve_real(2, 0.1, 10), &reference);
    let ratio2 = e2_coarse / e2_fine;
    assert!(
        ratio2 > 2.9 && ratio2 < 5.6,
        "order 2 ratio = {} (coarse {}, fine {})",
        ratio2,
        e2_coarse,
        e2_fine
    );
}

/// A 3-site chain with exact (untruncated) imaginary TEBD reaches the known
/// ground-state energy of the open Heisenberg chain, E0 = -4 in Pauli units.
#[test]
fn imaginary_time_reaches_three_site_ground_state() {
    let model = Heisenberg::uniform(3, 1.0);
    let mut psi = MPS::product(&[0, 1, 0], 2, Topology::Finite);

    let params = TebdParams {
        dt: 0.02,
        order: 2,
        kind: EvolutionKind::Imag,
        trunc: exact_truncation(8),
    };
    let mut driver = TebdDriver::new(&params, &model, &psi).unwrap();
    for _ in 0..500 {
        driver.step(&mut psi).unwrap();
        psi.normalize();
    }

    let e = energy(&psi, &model);
    assert!((e + 4.0).abs() < 5e-3, "E = {}", e);
}
