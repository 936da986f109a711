//! Assembly of the full eight-level system: eigenenergies and eigenvectors of
//! both manifolds plus Hermitian composite dipole operators.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    config::MaterialParams,
    coords::FieldParams,
    dipole::{ self, Axes, Polarization },
    eigen::{ DegeneracyCheck, EigenSet },
    error::{ VacancyError, VacancyResult },
    manifold::{ HBuilder, Manifold, PerManifold },
    nd_utils::off_diag_hermitian,
    terms,
};

/// Eigenstructure of both manifolds and the dipole operators between them.
///
/// In the composite (`2n × 2n`) operators, indices `0..n` are the ground
/// eigenstates and `n..2n` the excited eigenstates, each in ascending order of
/// energy.
#[derive(Clone, Debug, PartialEq)]
pub struct SystemResult {
    /// Eigenenergies of each manifold, ascending.
    pub energies: PerManifold<nd::Array1<f64>>,
    /// Eigenvectors (as columns) of each manifold in the fixed basis.
    pub eigenvectors: PerManifold<nd::Array2<C64>>,
    /// Ground × excited transition matrix elements for each axis.
    pub transitions: Axes<nd::Array2<C64>>,
    /// Hermitian composite dipole operator for each axis.
    pub dipole: Axes<nd::Array2<C64>>,
    /// Smallest adjacent gap in the full spectrum of each manifold, with the
    /// index of the lower level.
    ///
    /// A gap at or near zero means the corresponding eigenvectors, and hence
    /// the transition elements, depend on the solver's choice of basis.
    pub min_gap: PerManifold<Option<(usize, f64)>>,
}

impl SystemResult {
    fn from_parts(
        eigs: PerManifold<EigenSet>,
        transitions: Axes<nd::Array2<C64>>,
        min_gap: PerManifold<Option<(usize, f64)>>,
    ) -> Self
    {
        let PerManifold { ground, excited } = eigs;
        let dipole = transitions.map(off_diag_hermitian);
        Self {
            energies: PerManifold {
                ground: ground.energies,
                excited: excited.energies,
            },
            eigenvectors: PerManifold {
                ground: ground.vectors,
                excited: excited.vectors,
            },
            transitions,
            dipole,
            min_gap,
        }
    }

    /// Total number of electronic eigenstates across both manifolds.
    pub fn dim(&self) -> usize {
        self.energies.ground.len() + self.energies.excited.len()
    }

    /// All eigenenergies, ground manifold first.
    pub fn energies_concat(&self) -> nd::Array1<f64> {
        self.energies.ground.iter()
            .chain(self.energies.excited.iter())
            .copied()
            .collect()
    }

    /// Diagonal matrix of all eigenenergies, ground manifold first.
    pub fn energy_matrix(&self) -> nd::Array2<f64> {
        nd::Array2::from_diag(&self.energies_concat())
    }

    /// Composite dipole operator for a set of polarization weights.
    pub fn dipole_matrix(&self, pol: &Polarization) -> nd::Array2<C64> {
        self.dipole.combine(pol)
    }
}

fn diagonalize_manifolds(
    params: &MaterialParams,
    check: &DegeneracyCheck,
    field: &FieldParams,
) -> VacancyResult<PerManifold<EigenSet>>
{
    let B = field.field_vector()?;
    log::debug!("diagonalizing manifolds: B = {:?}, strain = {}", B.0, field.strain);
    let builder = HBuilder::new(params, B, field.strain);
    PerManifold::try_from_fn(|manifold| {
        let eigs = builder.diagonalize(manifold)?;
        check.check(manifold, &eigs)?;
        Ok::<_, VacancyError>(eigs)
    })
}

/// Diagonalize both manifolds and transform the dipole operators into the
/// resulting eigenbasis.
///
/// Each manifold's eigenvalues are passed through `check` before the dipole
/// transform.
pub fn assemble(
    params: &MaterialParams,
    check: &DegeneracyCheck,
    field: &FieldParams,
) -> VacancyResult<SystemResult>
{
    let eigs = diagonalize_manifolds(params, check, field)?;
    let transitions
        = dipole::transform_dipole(
            &terms::dipole_raw(),
            eigs.get(Manifold::Ground),
            eigs.get(Manifold::Excited),
        );
    let min_gap = eigs.map(EigenSet::min_gap);
    Ok(SystemResult::from_parts(eigs, transitions, min_gap))
}

/// Assemble the reduced four-level system, keeping only the even-indexed
/// eigenstates of each manifold, for a field along the symmetry *z*-axis.
///
/// Energies, eigenvectors, and transitions are all projections of the full
/// eight-level computation.
pub fn assemble_reduced(
    params: &MaterialParams,
    check: &DegeneracyCheck,
    magnitude: f64,
    strain: bool,
) -> VacancyResult<SystemResult>
{
    let field = FieldParams::along_z(magnitude).with_strain(strain);
    let eigs = diagonalize_manifolds(params, check, &field)?;
    let transitions
        = dipole::transform_dipole_reduced(
            &terms::dipole_raw(),
            eigs.get(Manifold::Ground),
            eigs.get(Manifold::Excited),
        );
    let min_gap = eigs.map(EigenSet::min_gap);
    Ok(SystemResult::from_parts(eigs.map(EigenSet::reduced), transitions, min_gap))
}
