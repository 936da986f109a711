//! Diagonalization of manifold Hamiltonians with a fixed ordering contract,
//! and detection of near-degenerate eigenvalues.

use itertools::Itertools;
use ndarray::{ self as nd, s };
use ndarray_linalg::{ Eigh, UPLO };
use num_complex::Complex64 as C64;
use serde::{ Deserialize, Serialize };
use crate::{
    error::{ VacancyError, VacancyResult },
    manifold::Manifold,
    nd_utils::{ adjoint, even_elements, max_abs_diff },
};

/// Eigenvalues in ascending order and their eigenvectors, stored as the
/// columns of `vectors`.
#[derive(Clone, Debug, PartialEq)]
pub struct EigenSet {
    pub energies: nd::Array1<f64>,
    pub vectors: nd::Array2<C64>,
}

impl EigenSet {
    /// Number of eigenpairs.
    pub fn len(&self) -> usize { self.energies.len() }

    pub fn is_empty(&self) -> bool { self.energies.is_empty() }

    /// Return the `k`-th eigenpair.
    pub fn pair(&self, k: usize) -> Option<(f64, nd::ArrayView1<C64>)> {
        (k < self.len())
            .then(|| (self.energies[k], self.vectors.slice(s![.., k])))
    }

    /// Keep only the even-indexed (0, 2, ...) eigenpairs.
    pub fn reduced(&self) -> Self {
        let keep: Vec<usize> = (0..self.len()).step_by(2).collect();
        Self {
            energies: even_elements(&self.energies),
            vectors: self.vectors.select(nd::Axis(1), &keep),
        }
    }

    /// Gaps between adjacent eigenvalues.
    pub fn gaps(&self) -> nd::Array1<f64> {
        self.energies.iter().tuple_windows()
            .map(|(lo, hi)| hi - lo)
            .collect()
    }

    /// Smallest gap between adjacent eigenvalues, along with the index of the
    /// lower level.
    pub fn min_gap(&self) -> Option<(usize, f64)> {
        self.gaps().into_iter().enumerate()
            .min_by(|(_, a), (_, b)| a.total_cmp(b))
    }

    /// Indices of the lower level of every adjacent pair separated by no more
    /// than `tol`.
    pub fn near_degenerate(&self, tol: f64) -> Vec<usize> {
        self.gaps().iter().enumerate()
            .filter_map(|(k, gap)| (*gap <= tol).then_some(k))
            .collect()
    }

    /// Return `true` if the eigenvectors form a unitary matrix to within `tol`
    /// in each element.
    pub fn is_unitary(&self, tol: f64) -> bool {
        let n = self.vectors.ncols();
        let VdV = adjoint(&self.vectors).dot(&self.vectors);
        max_abs_diff(&VdV, &nd::Array2::eye(n)) <= tol
    }
}

/// Diagonalize a Hermitian matrix.
///
/// Eigenpairs are ordered by ascending eigenvalue; exactly equal eigenvalues
/// keep the order in which the solver returned them.
pub fn diagonalize(H: &nd::Array2<C64>) -> VacancyResult<EigenSet> {
    let (E, V): (nd::Array1<f64>, nd::Array2<C64>) = H.eigh(UPLO::Lower)?;
    let order: Vec<usize>
        = (0..E.len()).sorted_by(|&a, &b| E[a].total_cmp(&E[b])).collect();
    Ok(EigenSet {
        energies: order.iter().map(|&k| E[k]).collect(),
        vectors: V.select(nd::Axis(1), &order),
    })
}

/// Diagonalize a Hermitian matrix and keep only its even-indexed eigenpairs.
///
/// This is always a projection of [`diagonalize`].
pub fn diagonalize_reduced(H: &nd::Array2<C64>) -> VacancyResult<EigenSet> {
    Ok(diagonalize(H)?.reduced())
}

/// Action to take when two eigenvalues are closer than the tolerance of a
/// [`DegeneracyCheck`].
///
/// Eigenvectors within a degenerate subspace are defined only up to a unitary
/// rotation, so anything computed from them (e.g. transition matrix elements)
/// depends on the solver's arbitrary choice of basis.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DegeneracyPolicy {
    /// Do nothing.
    Ignore,
    /// Emit a warning through [`log`].
    #[default]
    Warn,
    /// Fail with [`VacancyError::NearDegenerate`].
    Error,
}

/// Diagnostic on eigenvalue gaps.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DegeneracyCheck {
    /// Gaps at or below this value (rad THz) are considered degenerate.
    pub tol: f64,
    pub policy: DegeneracyPolicy,
}

impl Default for DegeneracyCheck {
    fn default() -> Self { Self { tol: 1e-9, policy: DegeneracyPolicy::Warn } }
}

impl DegeneracyCheck {
    /// Apply the check to the eigenvalues of a single manifold.
    pub fn check(&self, manifold: Manifold, eigs: &EigenSet)
        -> VacancyResult<()>
    {
        let gaps = eigs.gaps();
        let mut near = eigs.near_degenerate(self.tol).into_iter();
        match self.policy {
            DegeneracyPolicy::Ignore => Ok(()),
            DegeneracyPolicy::Warn => {
                near.for_each(|k| {
                    log::warn!(
                        "{} manifold: levels {} and {} are near-degenerate \
                        (gap {:.3e}); eigenvectors are not unique",
                        manifold, k, k + 1, gaps[k],
                    );
                });
                Ok(())
            },
            DegeneracyPolicy::Error => {
                match near.next() {
                    Some(k) => Err(VacancyError::NearDegenerate {
                        manifold,
                        lower: k,
                        upper: k + 1,
                        gap: gaps[k],
                        tol: self.tol,
                    }),
                    None => Ok(()),
                }
            },
        }
    }
}
