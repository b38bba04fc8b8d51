use faer::Mat;
use tn::C64;

pub fn identity2() -> [[C64; 2]; 2] {
    let z = C64::new(0.0, 0.0);
    let o = C64::new(1.0, 0.0);
    [[o, z], [z, o]]
}

pub fn pauli_x() -> [[C64; 2]; 2] {
    let z = C64::new(0.0, 0.0);
    let o = C64::new(1.0, 0.0);
    [[z, o], [o, z]]
}

pub fn pauli_y() -> [[C64; 2]; 2] {
    let z = C64::new(0.0, 0.0);
    let i = C64::new(0.0, 1.0);
    let ni = C64::new(0.0, -1.0);
    [[z, ni], [i, z]]
}

pub fn pauli_z() -> [[C64; 2]; 2] {
    let z = C64::new(0.0, 0.0);
    let o = C64::new(1.0, 0.0);
    let m = C64::new(-1.0, 0.0);
    [[o, z], [z, m]]
}

pub fn hadamard() -> [[C64; 2]; 2] {
    let s = 1.0 / 2.0_f64.sqrt();
    [
        [C64::new(s, 0.0), C64::new(s, 0.0)],
        [C64::new(s, 0.0), C64::new(-s, 0.0)],
    ]
}

/// Kronecker product of two single-qubit operators into a dense two-site
/// matrix, row-major over `p_left * 2 + p_right`.
pub fn kron2(a: [[C64; 2]; 2], b: [[C64; 2]; 2]) -> Mat<C64> {
    let mut out = Mat::<C64>::zeros(4, 4);
    for i in 0..2 {
        for j in 0..2 {
            for k in 0..2 {
                for l in 0..2 {
                    out.write(i * 2 + k, j * 2 + l, a[i][j] * b[k][l]);
                }
            }
        }
    }
    out
}

/// acc += f * m, entrywise.
pub(crate) fn add_scaled(acc: &mut Mat<C64>, m: &Mat<C64>, f: f64) {
    for i in 0..m.nrows() {
        for j in 0..m.ncols() {
            acc.write(i, j, acc.read(i, j) + m.read(i, j) * f);
        }
    }
}
