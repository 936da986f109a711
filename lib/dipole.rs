//! Optical dipole operators and their transformation into manifold
//! eigenbases.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    coords::vec3,
    eigen::EigenSet,
    error::VacancyResult,
    nd_utils::{ adjoint, even_submatrix },
};

/// One value for each Cartesian polarization axis.
#[derive(Clone, Debug, PartialEq)]
pub struct Axes<T> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T> Axes<T> {
    /// Iterate over the `x`, `y`, `z` values in order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        [&self.x, &self.y, &self.z].into_iter()
    }

    pub fn map<U, F>(&self, mut f: F) -> Axes<U>
    where F: FnMut(&T) -> U
    {
        Axes { x: f(&self.x), y: f(&self.y), z: f(&self.z) }
    }
}

impl Axes<nd::Array2<C64>> {
    /// Combine per-axis operators with polarization weights as
    /// `w_x D_x + w_y D_y + w_z D_z`.
    pub fn combine(&self, pol: &Polarization) -> nd::Array2<C64> {
        let [wx, wy, wz] = pol.0;
        &self.x * wx + &self.y * wy + &self.z * wz
    }
}

/// Real polarization weights `(w_x, w_y, w_z)` in symmetry-axis coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Polarization(pub [f64; 3]);

impl Polarization {
    pub const X: Self = Self([1.0, 0.0, 0.0]);
    pub const Y: Self = Self([0.0, 1.0, 0.0]);
    pub const Z: Self = Self([0.0, 0.0, 1.0]);

    /// Create a new set of polarization weights, failing if `weights` does not
    /// have exactly three components.
    pub fn new(weights: &[f64]) -> VacancyResult<Self> {
        Ok(Self(vec3(weights)?))
    }

    pub fn weights(&self) -> [f64; 3] { self.0 }
}

impl From<[f64; 3]> for Polarization {
    fn from(weights: [f64; 3]) -> Self { Self(weights) }
}

/// Transform fixed-basis dipole operators into the joint eigenbasis, giving
/// `V_g† D V_e` for each axis.
///
/// Rows of the results index ground eigenstates and columns index excited
/// eigenstates.
pub fn transform_dipole(
    raw: &Axes<nd::Array2<C64>>,
    ground: &EigenSet,
    excited: &EigenSet,
) -> Axes<nd::Array2<C64>>
{
    let Vg_dag = adjoint(&ground.vectors);
    raw.map(|D| Vg_dag.dot(D).dot(&excited.vectors))
}

/// Like [`transform_dipole`], but keep only the even-indexed rows and columns
/// of each result.
///
/// This is always a projection of the full transform.
pub fn transform_dipole_reduced(
    raw: &Axes<nd::Array2<C64>>,
    ground: &EigenSet,
    excited: &EigenSet,
) -> Axes<nd::Array2<C64>>
{
    transform_dipole(raw, ground, excited).map(even_submatrix)
}
