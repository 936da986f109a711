//! Per-manifold Hamiltonians and their block-diagonal composite.

use std::fmt;
use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    config::MaterialParams,
    coords::FieldVector,
    eigen::{ self, EigenSet },
    error::VacancyResult,
    nd_utils::block_diag,
    terms,
};

/// Names one of the two orbital manifolds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Manifold {
    /// Ground E<sub>g</sub> manifold.
    Ground,
    /// Excited E<sub>u</sub> manifold, offset by the zero-phonon line.
    Excited,
}

impl Manifold {
    pub const ALL: [Self; 2] = [Self::Ground, Self::Excited];
}

impl fmt::Display for Manifold {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ground => write!(f, "ground"),
            Self::Excited => write!(f, "excited"),
        }
    }
}

/// A pair of values, one for each manifold.
#[derive(Clone, Debug, PartialEq)]
pub struct PerManifold<T> {
    pub ground: T,
    pub excited: T,
}

impl<T> PerManifold<T> {
    /// Build a pair by evaluating `f` on each manifold, stopping at the first
    /// error.
    pub fn try_from_fn<F, E>(mut f: F) -> Result<Self, E>
    where F: FnMut(Manifold) -> Result<T, E>
    {
        Ok(Self { ground: f(Manifold::Ground)?, excited: f(Manifold::Excited)? })
    }

    pub fn get(&self, manifold: Manifold) -> &T {
        match manifold {
            Manifold::Ground => &self.ground,
            Manifold::Excited => &self.excited,
        }
    }

    pub fn map<U, F>(&self, mut f: F) -> PerManifold<U>
    where F: FnMut(&T) -> U
    {
        PerManifold { ground: f(&self.ground), excited: f(&self.excited) }
    }
}

/// Hamiltonian builder for the ground and excited manifolds under a static
/// magnetic field.
#[derive(Clone, Debug)]
pub struct HBuilder<'a> {
    pub(crate) params: &'a MaterialParams,
    pub field: FieldVector,
    pub strain: bool,
}

impl<'a> HBuilder<'a> {
    /// Create a new `HBuilder`.
    pub fn new(params: &'a MaterialParams, field: FieldVector, strain: bool)
        -> Self
    {
        Self { params, field, strain }
    }

    /// Get a reference to the material parameters.
    pub fn params(&self) -> &MaterialParams { self.params }

    /// Compute the 4×4 Hamiltonian for a single manifold.
    ///
    /// The excited manifold carries the zero-phonon line on its diagonal.
    pub fn gen_manifold(&self, manifold: Manifold) -> nd::Array2<C64> {
        let p = self.params.manifold(manifold);
        let mut H: nd::Array2<C64>
            = terms::spin_orbit(p.spin_orbit)
            + terms::jahn_teller(p.jahn_teller)
            + terms::orbital_zeeman(
                &self.field, self.params.gamma_l, p.orbital_zeeman)
            + terms::spin_zeeman(
                &self.field, self.params.gamma_s * p.spin_zeeman);
        if self.strain {
            H += &terms::strain(&p.strain);
        }
        let offset = self.params.offset(manifold);
        H.diag_mut().iter_mut().for_each(|h| { *h += offset; });
        H
    }

    /// Compute the 8×8 block-diagonal Hamiltonian, with the excited manifold
    /// occupying indices 0..4 and the ground manifold 4..8.
    pub fn gen_composite(&self) -> nd::Array2<C64> {
        block_diag(
            &self.gen_manifold(Manifold::Excited),
            &self.gen_manifold(Manifold::Ground),
        )
    }

    /// Diagonalize a single manifold.
    pub fn diagonalize(&self, manifold: Manifold) -> VacancyResult<EigenSet> {
        eigen::diagonalize(&self.gen_manifold(manifold))
    }
}

/// Compute the Hamiltonian for a single manifold.
pub fn build_manifold(
    params: &MaterialParams,
    manifold: Manifold,
    field: &FieldVector,
    strain: bool,
) -> nd::Array2<C64>
{
    HBuilder::new(params, *field, strain).gen_manifold(manifold)
}

/// Compute the 8×8 block-diagonal Hamiltonian of both manifolds.
pub fn build_composite(
    params: &MaterialParams,
    field: &FieldVector,
    strain: bool,
) -> nd::Array2<C64>
{
    HBuilder::new(params, *field, strain).gen_composite()
}
