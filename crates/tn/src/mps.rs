use num_complex::Complex64;

pub type C64 = Complex64;

/// Rank-3 site tensor, row-major over (left bond, physical, right bond).
#[derive(Clone)]
pub struct Tensor3 {
    pub data: Vec<C64>,
    pub dl: usize,
    pub dp: usize,
    pub dr: usize,
}

impl Tensor3 {
    pub fn zeros(dl: usize, dp: usize, dr: usize) -> Self {
        Self {
            data: vec![C64::new(0.0, 0.0); dl * dp * dr],
            dl,
            dp,
            dr,
        }
    }

    #[inline]
    fn idx(&self, l: usize, p: usize, r: usize) -> usize {
        (l * self.dp + p) * self.dr + r
    }

    pub fn get(&self, l: usize, p: usize, r: usize) -> C64 {
        self.data[self.idx(l, p, r)]
    }

    pub fn set(&mut self, l: usize, p: usize, r: usize, v: C64) {
        let i = self.idx(l, p, r);
        self.data[i] = v;
    }

    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.data {
            *v *= factor;
        }
    }
}

/// Chain topology. A finite chain has open ends; an infinite chain is a
/// periodic unit cell whose last bond wraps around to site 0.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Topology {
    Finite,
    Infinite,
}

/// Matrix product state: one rank-3 tensor per site.
///
/// Bond `i` joins sites `(i - 1, i)`. For `Topology::Finite` the valid bonds
/// are `1..=n-1`; for `Topology::Infinite` they are `0..n` and bond 0 joins
/// site `n - 1` to site 0.
#[derive(Clone)]
pub struct MPS {
    pub sites: Vec<Tensor3>,
    pub topology: Topology,
}

impl MPS {
    /// Finite |00...0> product state of qubits.
    pub fn new_zero(n: usize) -> Self {
        Self::product(&vec![0; n], 2, Topology::Finite)
    }

    /// Product state with the given local basis index on every site.
    pub fn product(states: &[usize], dp: usize, topology: Topology) -> Self {
        let mut sites = Vec::with_capacity(states.len());
        for &p in states {
            let mut t = Tensor3::zeros(1, dp, 1);
            t.set(0, p, 0, C64::new(1.0, 0.0));
            sites.push(t);
        }
        Self { sites, topology }
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    /// The pair of site indices joined by `bond`.
    pub fn bond_sites(&self, bond: usize) -> (usize, usize) {
        let n = self.sites.len();
        match self.topology {
            Topology::Finite => {
                assert!(bond >= 1 && bond < n, "bond {} out of range 1..{}", bond, n);
                (bond - 1, bond)
            }
            Topology::Infinite => {
                let b = bond % n;
                ((b + n - 1) % n, b)
            }
        }
    }

    /// Dimension of the bond joining sites `(bond - 1, bond)`.
    pub fn bond_dim(&self, bond: usize) -> usize {
        let (_, right) = self.bond_sites(bond);
        self.sites[right].dl
    }

    pub fn max_bond_dim(&self) -> usize {
        self.sites.iter().map(|s| s.dl.max(s.dr)).max().unwrap_or(0)
    }

    /// Apply a single-qubit operator to site `k`.
    pub fn apply_1q(&mut self, k: usize, u: [[C64; 2]; 2]) {
        let s = &self.sites[k];
        assert!(s.dp == 2, "apply_1q supports qubits only");
        let mut out = Tensor3::zeros(s.dl, s.dp, s.dr);

        for l in 0..s.dl {
            for r in 0..s.dr {
                for p in 0..2 {
                    let mut acc = C64::new(0.0, 0.0);
                    for pp in 0..2 {
                        acc += u[p][pp] * s.get(l, pp, r);
                    }
                    out.set(l, p, r, acc);
                }
            }
        }
        self.sites[k] = out;
    }

    /// Amplitude <config|psi> of one computational basis state.
    pub fn amplitude(&self, config: &[usize]) -> C64 {
        assert!(
            self.topology == Topology::Finite,
            "amplitude supports finite chains only"
        );
        assert_eq!(config.len(), self.sites.len());

        let mut vec = vec![C64::new(1.0, 0.0)];
        for (k, &p) in config.iter().enumerate() {
            let a = &self.sites[k];
            let mut next = vec![C64::new(0.0, 0.0); a.dr];
            for l in 0..a.dl {
                for r in 0..a.dr {
                    next[r] += vec[l] * a.get(l, p, r);
                }
            }
            vec = next;
        }
        vec[0]
    }

    /// <psi|psi>, contracted as a transfer-matrix product over the chain.
    pub fn norm_sq(&self) -> f64 {
        let n = self.sites.len();
        if n == 0 {
            return 0.0;
        }

        let d0 = self.sites[0].dl;
        let mut env = vec![C64::new(0.0, 0.0); d0 * d0];
        for l in 0..d0 {
            env[l * d0 + l] = C64::new(1.0, 0.0);
        }

        for a in &self.sites {
            let mut next = vec![C64::new(0.0, 0.0); a.dr * a.dr];
            for l in 0..a.dl {
                for lp in 0..a.dl {
                    let lval = env[l * a.dl + lp];
                    for p in 0..a.dp {
                        for r in 0..a.dr {
                            let aval = lval * a.get(l, p, r);
                            for rp in 0..a.dr {
                                next[r * a.dr + rp] += aval * a.get(lp, p, rp).conj();
                            }
                        }
                    }
                }
            }
            env = next;
        }

        let dn = self.sites[n - 1].dr;
        let acc = match self.topology {
            Topology::Finite => env[0],
            Topology::Infinite => {
                let mut tr = C64::new(0.0, 0.0);
                for l in 0..dn {
                    tr += env[l * dn + l];
                }
                tr
            }
        };
        acc.re.max(0.0)
    }

    pub fn norm(&self) -> f64 {
        self.norm_sq().sqrt()
    }

    /// Rescale to unit norm; returns the previous norm. A zero state is left
    /// untouched.
    pub fn normalize(&mut self) -> f64 {
        let n = self.norm();
        if n > 0.0 {
            self.sites[0].scale(1.0 / n);
        }
        n
    }
}
