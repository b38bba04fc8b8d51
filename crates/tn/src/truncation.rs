use faer::Mat;
use thiserror::Error;
use tracing::warn;

use crate::mps::C64;

/// Bond truncation configuration.
///
/// The kept rank is the most restrictive of three constraints: the hard cap
/// `max_bond`, the floor `sv_cutoff` (singular values below it are always
/// dropped), and the budget `weight_tolerance` (the smallest rank whose
/// normalized tail weight still fits the budget). When the caps force a
/// discarded weight above the budget, `strict` decides between failing and
/// reporting.
#[derive(Clone, Copy, Debug)]
pub struct Truncation {
    pub max_bond: usize,
    pub weight_tolerance: f64,
    pub sv_cutoff: f64,
    pub strict: bool,
}

impl Truncation {
    /// Cap the bond dimension only; never fail.
    pub fn with_max_bond(max_bond: usize) -> Self {
        Self {
            max_bond,
            ..Self::default()
        }
    }
}

impl Default for Truncation {
    fn default() -> Self {
        Self {
            max_bond: usize::MAX,
            weight_tolerance: 0.0,
            sv_cutoff: 0.0,
            strict: false,
        }
    }
}

#[derive(Debug, Error)]
pub enum TruncationError {
    #[error(
        "truncation infeasible: discarded weight {achieved:.3e} exceeds tolerance {tolerance:.3e} at rank {kept}"
    )]
    Infeasible {
        achieved: f64,
        tolerance: f64,
        kept: usize,
    },
}

/// A two-site block split as `theta ~ u * diag(svals) * v^dagger`.
///
/// `u` is `rows x kept`, `v` is `cols x kept`, and `discarded_weight` is the
/// sum of squared dropped singular values over the sum of squared all
/// singular values (0 exactly when nothing was dropped).
pub struct TruncatedBlock {
    pub u: Mat<C64>,
    pub svals: Vec<f64>,
    pub v: Mat<C64>,
    pub discarded_weight: f64,
}

impl TruncatedBlock {
    pub fn kept(&self) -> usize {
        self.svals.len()
    }
}

/// Best rank-k split of `theta` under the given truncation constraints.
pub fn truncate(theta: &Mat<C64>, trunc: &Truncation) -> Result<TruncatedBlock, TruncationError> {
    let svd = theta.thin_svd();
    let s = svd.s_diagonal();
    let rank = s.nrows();

    let mut svals = Vec::with_capacity(rank);
    for i in 0..rank {
        svals.push(s.read(i).re);
    }
    let total: f64 = svals.iter().map(|x| x * x).sum();

    let kept = if total == 0.0 {
        1
    } else {
        // Singular values below the cutoff are always dropped. The values
        // arrive sorted in descending order, so a count is a rank.
        let k_cut = svals.iter().filter(|&&x| x >= trunc.sv_cutoff).count();

        // Smallest rank whose tail weight still fits the tolerance budget.
        let budget = trunc.weight_tolerance * total;
        let mut tail = 0.0;
        let mut k_tol = rank;
        for i in (0..rank).rev() {
            let t = tail + svals[i] * svals[i];
            if t > budget {
                break;
            }
            tail = t;
            k_tol = i;
        }

        k_cut.min(k_tol).min(trunc.max_bond).max(1)
    };

    let discarded_weight = if total == 0.0 {
        0.0
    } else {
        svals[kept..].iter().map(|x| x * x).sum::<f64>() / total
    };

    if discarded_weight > trunc.weight_tolerance {
        if trunc.strict {
            return Err(TruncationError::Infeasible {
                achieved: discarded_weight,
                tolerance: trunc.weight_tolerance,
                kept,
            });
        }
        warn!(
            discarded_weight,
            tolerance = trunc.weight_tolerance,
            kept,
            "discarded weight exceeds tolerance"
        );
    }

    let u_full = svd.u();
    let v_full = svd.v();

    let mut u = Mat::<C64>::zeros(u_full.nrows(), kept);
    for i in 0..u_full.nrows() {
        for m in 0..kept {
            u.write(i, m, u_full.read(i, m));
        }
    }
    let mut v = Mat::<C64>::zeros(v_full.nrows(), kept);
    for i in 0..v_full.nrows() {
        for m in 0..kept {
            v.write(i, m, v_full.read(i, m));
        }
    }
    svals.truncate(kept);

    Ok(TruncatedBlock {
        u,
        svals,
        v,
        discarded_weight,
    })
}
