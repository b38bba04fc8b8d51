use crate::error::{Result, TebdError};

/// Bond parity class: bond `i` is even when `i % 2 == 0`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parity {
    Even,
    Odd,
}

impl Parity {
    pub fn matches(self, bond: usize) -> bool {
        match self {
            Parity::Even => bond % 2 == 0,
            Parity::Odd => bond % 2 == 1,
        }
    }
}

/// One scheduled half-sweep: apply every bond of `parity` with time slice
/// `slice`. `slice_id` indexes the schedule's deduplicated slice table.
#[derive(Clone, Copy, Debug)]
pub struct SweepInstruction {
    pub parity: Parity,
    pub slice: f64,
    pub slice_id: usize,
}

/// Ordered Trotter-Suzuki sweep sequence for one full time step of `dt`.
///
/// Composed in order, the sequence approximates `exp(-dt*H)` (or
/// `exp(-i*dt*H)`, depending on the exponent convention applied later) to
/// the requested order. Pure data; building it never touches the state.
#[derive(Clone, Debug)]
pub struct Schedule {
    entries: Vec<SweepInstruction>,
    slices: Vec<f64>,
    order: usize,
    dt: f64,
}

fn strang(out: &mut Vec<(Parity, f64)>, dt: f64) {
    out.push((Parity::Odd, dt / 2.0));
    out.push((Parity::Even, dt));
    out.push((Parity::Odd, dt / 2.0));
}

impl Schedule {
    /// Build the sweep sequence for a supported Trotter order (1, 2 or 4).
    /// `dt = 0` yields an empty, no-op schedule.
    pub fn build(order: usize, dt: f64) -> Result<Self> {
        if !matches!(order, 1 | 2 | 4) {
            return Err(TebdError::UnsupportedOrder(order));
        }

        let mut raw: Vec<(Parity, f64)> = Vec::new();
        if dt != 0.0 {
            match order {
                1 => {
                    raw.push((Parity::Odd, dt));
                    raw.push((Parity::Even, dt));
                }
                2 => strang(&mut raw, dt),
                4 => {
                    // Suzuki's composition of five symmetric blocks with
                    // sub-steps (p, p, q, p, p), q = dt - 4p.
                    let p = dt / (4.0 - 4.0_f64.powf(1.0 / 3.0));
                    let q = dt - 4.0 * p;
                    for step in [p, p, q, p, p] {
                        strang(&mut raw, step);
                    }
                }
                _ => unreachable!(),
            }
        }

        // Adjacent half-sweeps of the same parity commute and merge into one
        // sweep with the summed slice.
        let mut merged: Vec<(Parity, f64)> = Vec::new();
        for (parity, slice) in raw {
            match merged.last_mut() {
                Some(last) if last.0 == parity => last.1 += slice,
                _ => merged.push((parity, slice)),
            }
        }

        let mut slices: Vec<f64> = Vec::new();
        let entries = merged
            .into_iter()
            .map(|(parity, slice)| {
                let slice_id = match slices.iter().position(|&s| s == slice) {
                    Some(id) => id,
                    None => {
                        slices.push(slice);
                        slices.len() - 1
                    }
                };
                SweepInstruction {
                    parity,
                    slice,
                    slice_id,
                }
            })
            .collect();

        Ok(Self {
            entries,
            slices,
            order,
            dt,
        })
    }

    pub fn entries(&self) -> &[SweepInstruction] {
        &self.entries
    }

    /// Distinct time-slice values the schedule uses, so propagators can be
    /// precomputed once per (bond, slice).
    pub fn slices(&self) -> &[f64] {
        &self.slices
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn dt(&self) -> f64 {
        self.dt
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
