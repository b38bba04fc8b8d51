use faer::Mat;
use tn::{C64, Topology, MPS};

use crate::env::{left_env, right_env};
use crate::ops::{kron2, pauli_x, pauli_y, pauli_z};

/// t[p, p'] = <psi| (|p'><p| at site k) |psi>, unnormalized.
fn site_matrix(psi: &MPS, k: usize) -> Mat<C64> {
    let s = &psi.sites[k];
    let left = left_env(&psi.sites, k);
    let right = right_env(&psi.sites, k);

    let mut t = Mat::<C64>::zeros(s.dp, s.dp);
    for l in 0..s.dl {
        for lp in 0..s.dl {
            let lval = left[l * s.dl + lp];
            for p in 0..s.dp {
                for pp in 0..s.dp {
                    let mut acc = C64::new(0.0, 0.0);
                    for r in 0..s.dr {
                        for rp in 0..s.dr {
                            acc += s.get(l, p, r)
                                * s.get(lp, pp, rp).conj()
                                * right[r * s.dr + rp];
                        }
                    }
                    t.write(p, pp, t.read(p, pp) + lval * acc);
                }
            }
        }
    }
    t
}

/// t[(p1 p2), (p1' p2')] for the site pair (i, i+1), unnormalized.
fn pair_matrix(psi: &MPS, i: usize) -> Mat<C64> {
    let a = &psi.sites[i];
    let b = &psi.sites[i + 1];
    let left = left_env(&psi.sites, i);
    let right = right_env(&psi.sites, i + 1);

    let d = a.dp * b.dp;
    let mut t = Mat::<C64>::zeros(d, d);
    for l in 0..a.dl {
        for lp in 0..a.dl {
            let lval = left[l * a.dl + lp];
            for p1 in 0..a.dp {
                for m in 0..a.dr {
                    let av = a.get(l, p1, m);
                    for p1p in 0..a.dp {
                        for mp in 0..a.dr {
                            let avp = lval * av * a.get(lp, p1p, mp).conj();
                            for p2 in 0..b.dp {
                                for r in 0..b.dr {
                                    let bv = avp * b.get(m, p2, r);
                                    for p2p in 0..b.dp {
                                        for rp in 0..b.dr {
                                            let full = bv
                                                * b.get(mp, p2p, rp).conj()
                                                * right[r * b.dr + rp];
                                            let row = p1 * b.dp + p2;
                                            let col = p1p * b.dp + p2p;
                                            t.write(row, col, t.read(row, col) + full);
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
    t
}

fn normalized_trace(t: &Mat<C64>, op: &Mat<C64>) -> f64 {
    let d = t.nrows();
    let mut numer = C64::new(0.0, 0.0);
    let mut denom = 0.0;
    for p in 0..d {
        denom += t.read(p, p).re;
        for pp in 0..d {
            numer += op.read(pp, p) * t.read(p, pp);
        }
    }
    if denom == 0.0 {
        return 0.0;
    }
    numer.re / denom
}

/// <O>/<1> for a dense single-site operator at site `k` of a finite chain.
pub fn expect_site(psi: &MPS, k: usize, op: &Mat<C64>) -> f64 {
    assert!(
        psi.topology == Topology::Finite,
        "expect_site supports finite chains only"
    );
    assert_eq!(op.nrows(), psi.sites[k].dp);
    normalized_trace(&site_matrix(psi, k), op)
}

/// <O>/<1> for a dense two-site operator on `bond` of a finite chain.
pub fn expect_bond(psi: &MPS, bond: usize, op: &Mat<C64>) -> f64 {
    assert!(
        psi.topology == Topology::Finite,
        "expect_bond supports finite chains only"
    );
    let (i, _) = psi.bond_sites(bond);
    normalized_trace(&pair_matrix(psi, i), op)
}

fn mat2(op: [[C64; 2]; 2]) -> Mat<C64> {
    let mut m = Mat::<C64>::zeros(2, 2);
    for i in 0..2 {
        for j in 0..2 {
            m.write(i, j, op[i][j]);
        }
    }
    m
}

/// <Z_k> for a qubit at site k.
pub fn expect_z(psi: &MPS, k: usize) -> f64 {
    expect_site(psi, k, &mat2(pauli_z()))
}

/// <X_k> for a qubit at site k.
pub fn expect_x(psi: &MPS, k: usize) -> f64 {
    expect_site(psi, k, &mat2(pauli_x()))
}

/// <X_i X_{i+1}> on the bond joining sites (i, i+1).
pub fn expect_xx(psi: &MPS, i: usize) -> f64 {
    expect_bond(psi, i + 1, &kron2(pauli_x(), pauli_x()))
}

/// <Y_i Y_{i+1}> on the bond joining sites (i, i+1).
pub fn expect_yy(psi: &MPS, i: usize) -> f64 {
    expect_bond(psi, i + 1, &kron2(pauli_y(), pauli_y()))
}

/// <Z_i Z_{i+1}> on the bond joining sites (i, i+1).
pub fn expect_zz(psi: &MPS, i: usize) -> f64 {
    expect_bond(psi, i + 1, &kron2(pauli_z(), pauli_z()))
}
