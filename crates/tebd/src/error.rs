use thiserror::Error;
use tn::TruncationError;

#[derive(Debug, Error)]
pub enum TebdError {
    /// Invalid configuration; the caller must fix the order before running.
    #[error("unsupported Trotter order {0} (supported: 1, 2, 4)")]
    UnsupportedOrder(usize),

    /// Parity sweeps need disjoint site pairs per sweep; an odd periodic
    /// unit cell makes two same-parity bonds share a site.
    #[error("infinite unit cell has odd length {0}; use an even cell")]
    OddUnitCell(usize),

    #[error("model has {model_sites} sites, state has {state_sites}")]
    LengthMismatch {
        model_sites: usize,
        state_sites: usize,
    },

    /// The model's gate and the state's site pair disagree on dimensions.
    #[error(
        "gate on bond {bond} acts on combined physical dimension {op_dim}, site pair has {pair_dim}"
    )]
    IncompatiblePhysicalDimension {
        bond: usize,
        op_dim: usize,
        pair_dim: usize,
    },

    #[error(transparent)]
    Truncation(#[from] TruncationError),
}

pub type Result<T> = std::result::Result<T, TebdError>;
