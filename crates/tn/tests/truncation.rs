use faer::Mat;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tn::{truncate, Truncation, TruncationError, C64};

fn diag(values: &[f64]) -> Mat<C64> {
    let n = values.len();
    let mut m = Mat::<C64>::zeros(n, n);
    for (i, &v) in values.iter().enumerate() {
        m.write(i, i, C64::new(v, 0.0));
    }
    m
}

const SPECTRUM: [f64; 4] = [1.0, 0.5, 0.25, 0.125];

fn spectrum_total() -> f64 {
    SPECTRUM.iter().map(|x| x * x).sum()
}

#[test]
fn unconstrained_keeps_everything() {
    let theta = diag(&SPECTRUM);
    let block = truncate(&theta, &Truncation::default()).unwrap();

    assert_eq!(block.kept(), 4);
    assert_eq!(block.discarded_weight, 0.0);
    for (got, want) in block.svals.iter().zip(SPECTRUM.iter()) {
        assert!((got - want).abs() < 1e-12, "svals = {:?}", block.svals);
    }
}

#[test]
fn max_bond_caps_rank() {
    let theta = diag(&SPECTRUM);
    let trunc = Truncation {
        max_bond: 2,
        ..Truncation::default()
    };
    let block = truncate(&theta, &trunc).unwrap();

    assert_eq!(block.kept(), 2);
    let expected = (0.25 * 0.25 + 0.125 * 0.125) / spectrum_total();
    assert!(
        (block.discarded_weight - expected).abs() < 1e-12,
        "dw = {}",
        block.discarded_weight
    );
}

#[test]
fn cutoff_always_drops_small_values() {
    let theta = diag(&SPECTRUM);
    let trunc = Truncation {
        sv_cutoff: 0.3,
        ..Truncation::default()
    };
    let block = truncate(&theta, &trunc).unwrap();

    assert_eq!(block.kept(), 2);
    assert!(block.svals.iter().all(|&s| s >= 0.3));
}

#[test]
fn tolerance_budget_drops_tail() {
    let theta = diag(&SPECTRUM);
    let trunc = Truncation {
        weight_tolerance: 0.02,
        ..Truncation::default()
    };
    let block = truncate(&theta, &trunc).unwrap();

    // Dropping 0.125 costs ~0.0118 of the weight; also dropping 0.25 would
    // cost ~0.059 and blow the budget.
    assert_eq!(block.kept(), 3);
    let expected = (0.125 * 0.125) / spectrum_total();
    assert!((block.discarded_weight - expected).abs() < 1e-12);
    assert!(block.discarded_weight <= 0.02);
}

#[test]
fn strict_mode_fails_when_caps_exceed_budget() {
    let theta = diag(&SPECTRUM);
    let trunc = Truncation {
        max_bond: 1,
        weight_tolerance: 0.1,
        sv_cutoff: 0.0,
        strict: true,
    };
    match truncate(&theta, &trunc) {
        Err(TruncationError::Infeasible { achieved, kept, .. }) => {
            assert_eq!(kept, 1);
            assert!(achieved > 0.1, "achieved = {}", achieved);
        }
        Ok(_) => panic!("expected Infeasible"),
    }
}

#[test]
fn non_strict_mode_reports_instead_of_failing() {
    let theta = diag(&SPECTRUM);
    let trunc = Truncation {
        max_bond: 1,
        weight_tolerance: 0.1,
        sv_cutoff: 0.0,
        strict: false,
    };
    let block = truncate(&theta, &trunc).unwrap();

    assert_eq!(block.kept(), 1);
    let expected = 1.0 - 1.0 / spectrum_total();
    assert!((block.discarded_weight - expected).abs() < 1e-12);
}

#[test]
fn random_blocks_respect_cap_and_ordering() {
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..20 {
        let rows = rng.gen_range(2..8);
        let cols = rng.gen_range(2..8);
        let mut theta = Mat::<C64>::zeros(rows, cols);
        for i in 0..rows {
            for j in 0..cols {
                theta.write(i, j, C64::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0)));
            }
        }

        let trunc = Truncation {
            max_bond: 3,
            weight_tolerance: 0.0,
            sv_cutoff: 1e-12,
            strict: false,
        };
        let block = truncate(&theta, &trunc).unwrap();

        assert!(block.kept() <= 3);
        assert!(block.discarded_weight >= 0.0 && block.discarded_weight < 1.0);
        // Rank ordering: kept values are descending, so nothing dropped can
        // exceed anything retained.
        for w in block.svals.windows(2) {
            assert!(w[0] >= w[1], "svals not descending: {:?}", block.svals);
        }
    }
}

#[test]
fn zero_block_keeps_one_column() {
    let theta = Mat::<C64>::zeros(4, 4);
    let block = truncate(&theta, &Truncation::default()).unwrap();

    assert_eq!(block.kept(), 1);
    assert_eq!(block.discarded_weight, 0.0);
}
