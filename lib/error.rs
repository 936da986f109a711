//! Error type shared across the crate.

use thiserror::Error;
use crate::manifold::Manifold;

#[derive(Debug, Error)]
pub enum VacancyError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    #[error("eigendecomposition failed: {0}")]
    EigenDecomposition(#[from] ndarray_linalg::error::LinalgError),

    #[error(
        "near-degenerate eigenvalues in the {manifold} manifold: \
        levels {lower} and {upper} are separated by {gap:.3e}, \
        below tolerance {tol:.3e}"
    )]
    NearDegenerate {
        manifold: Manifold,
        lower: usize,
        upper: usize,
        gap: f64,
        tol: f64,
    },

    #[error("failed to read config file: {0}")]
    ConfigRead(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type VacancyResult<T> = Result<T, VacancyError>;

impl VacancyError {
    pub(crate) fn invalid<S>(msg: S) -> Self
    where S: Into<String>
    {
        Self::InvalidArgument(msg.into())
    }
}
