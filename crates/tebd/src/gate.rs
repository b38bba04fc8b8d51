use faer::Mat;
use tn::{truncate, C64, Tensor3, Truncation};

use crate::error::{Result, TebdError};

/// Apply a dense two-site gate to the pair of site tensors joined by `bond`.
///
/// The pair is contracted with the gate into a combined block, the block is
/// re-factored by the truncation engine, and the retained singular values
/// are folded into the left tensor. Returns the new pair and the discarded
/// weight of the split; the pair satisfies bond-dimension consistency again
/// on return.
pub fn apply_bond_gate(
    bond: usize,
    a: &Tensor3,
    b: &Tensor3,
    op: &Mat<C64>,
    trunc: &Truncation,
) -> Result<(Tensor3, Tensor3, f64)> {
    assert_eq!(a.dr, b.dl, "bond dimension mismatch at bond {}", bond);

    let pair_dim = a.dp * b.dp;
    if op.nrows() != pair_dim || op.ncols() != pair_dim {
        return Err(TebdError::IncompatiblePhysicalDimension {
            bond,
            op_dim: op.nrows(),
            pair_dim,
        });
    }

    let (dl, chi, dr) = (a.dl, a.dr, b.dr);
    let zero = C64::new(0.0, 0.0);

    // theta[(l, p1), (p2, r)] = sum over q1 q2 m of
    //   op[(p1 p2), (q1 q2)] * a[l, q1, m] * b[m, q2, r]
    let mut theta = Mat::<C64>::zeros(dl * a.dp, b.dp * dr);
    for l in 0..dl {
        for m in 0..chi {
            for r in 0..dr {
                for q1 in 0..a.dp {
                    for q2 in 0..b.dp {
                        let amp = a.get(l, q1, m) * b.get(m, q2, r);
                        if amp == zero {
                            continue;
                        }
                        let col_in = q1 * b.dp + q2;
                        for p1 in 0..a.dp {
                            for p2 in 0..b.dp {
                                let v = op.read(p1 * b.dp + p2, col_in) * amp;
                                let row = l * a.dp + p1;
                                let col = p2 * dr + r;
                                theta.write(row, col, theta.read(row, col) + v);
                            }
                        }
                    }
                }
            }
        }
    }

    let block = truncate(&theta, trunc)?;
    let kept = block.kept();

    let mut new_a = Tensor3::zeros(dl, a.dp, kept);
    for l in 0..dl {
        for p in 0..a.dp {
            for m in 0..kept {
                new_a.set(l, p, m, block.u.read(l * a.dp + p, m) * block.svals[m]);
            }
        }
    }

    let mut new_b = Tensor3::zeros(kept, b.dp, dr);
    for m in 0..kept {
        for p in 0..b.dp {
            for r in 0..dr {
                new_b.set(m, p, r, block.v.read(p * dr + r, m).conj());
            }
        }
    }

    Ok((new_a, new_b, block.discarded_weight))
}
