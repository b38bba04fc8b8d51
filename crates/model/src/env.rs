use tn::{C64, Tensor3};

fn identity_env(dim: usize) -> Vec<C64> {
    let mut env = vec![C64::new(0.0, 0.0); dim * dim];
    for l in 0..dim {
        env[l * dim + l] = C64::new(1.0, 0.0);
    }
    env
}

/// env'[r, r'] = sum over l, l', p of env[l, l'] a[l,p,r] conj(a[l',p,r']).
fn absorb_left(env: &[C64], a: &Tensor3) -> Vec<C64> {
    let mut next = vec![C64::new(0.0, 0.0); a.dr * a.dr];
    for l in 0..a.dl {
        for lp in 0..a.dl {
            let lval = env[l * a.dl + lp];
            for p in 0..a.dp {
                for r in 0..a.dr {
                    let av = lval * a.get(l, p, r);
                    for rp in 0..a.dr {
                        next[r * a.dr + rp] += av * a.get(lp, p, rp).conj();
                    }
                }
            }
        }
    }
    next
}

/// env'[l, l'] = sum over r, r', p of a[l,p,r] conj(a[l',p,r']) env[r, r'].
fn absorb_right(env: &[C64], a: &Tensor3) -> Vec<C64> {
    let mut next = vec![C64::new(0.0, 0.0); a.dl * a.dl];
    for r in 0..a.dr {
        for rp in 0..a.dr {
            let rval = env[r * a.dr + rp];
            for p in 0..a.dp {
                for l in 0..a.dl {
                    let av = a.get(l, p, r) * rval;
                    for lp in 0..a.dl {
                        next[l * a.dl + lp] += av * a.get(lp, p, rp).conj();
                    }
                }
            }
        }
    }
    next
}

/// Contraction of everything strictly left of site `k`, as a dl x dl matrix.
pub(crate) fn left_env(sites: &[Tensor3], k: usize) -> Vec<C64> {
    let mut env = identity_env(sites[0].dl);
    for a in &sites[..k] {
        env = absorb_left(&env, a);
    }
    env
}

/// Contraction of everything strictly right of site `k`, as a dr x dr matrix.
pub(crate) fn right_env(sites: &[Tensor3], k: usize) -> Vec<C64> {
    let n = sites.len();
    let mut env = identity_env(sites[n - 1].dr);
    for a in sites[k + 1..].iter().rev() {
        env = absorb_right(&env, a);
    }
    env
}
