//! Parallel evaluation over independent parameter points.
//!
//! Each point is evaluated on the global `rayon` pool with no shared mutable
//! state; results are returned in input order, and a failure at one point
//! leaves the others unaffected.

use ndarray as nd;
use num_complex::Complex64 as C64;
use rayon::iter::{ IntoParallelIterator, ParallelIterator };
use crate::{
    coords::FieldParams,
    dipole::Polarization,
    error::VacancyResult,
    vacancy::Vacancy,
};

/// Evaluate `f` at every point in parallel.
pub fn sweep<P, T, F>(points: Vec<P>, f: F) -> Vec<VacancyResult<T>>
where
    P: Send,
    T: Send,
    F: Fn(P) -> VacancyResult<T> + Sync + Send,
{
    points.into_par_iter().map(f).collect()
}

/// Eigenenergies (ground manifold first) for each field magnitude, keeping
/// all other conditions as in `base`.
pub fn energies_vs_magnitude(
    vacancy: &Vacancy,
    base: &FieldParams,
    magnitudes: &[f64],
) -> Vec<VacancyResult<Vec<f64>>>
{
    let points: Vec<FieldParams>
        = magnitudes.iter()
        .map(|&magnitude| FieldParams { magnitude, ..*base })
        .collect();
    sweep(points, |field| vacancy.energies(&field))
}

/// Eigenenergies (ground manifold first) for a field of fixed magnitude
/// rotated through each angle in the symmetry *x*–*z* plane.
pub fn energies_vs_angle(vacancy: &Vacancy, magnitude: f64, phis: &[f64])
    -> Vec<VacancyResult<Vec<f64>>>
{
    let points: Vec<FieldParams>
        = phis.iter()
        .map(|&phi| FieldParams::from_angle(phi, magnitude))
        .collect();
    sweep(points, |field| vacancy.energies(&field))
}

/// Enlarged coupling operators for each polarization at fixed field
/// conditions.
pub fn coupling_vs_polarization(
    vacancy: &Vacancy,
    field: &FieldParams,
    pols: &[Polarization],
) -> Vec<VacancyResult<nd::Array2<C64>>>
{
    sweep(pols.to_vec(), |pol| vacancy.enlarged_coupling_operator(&pol, field))
}
