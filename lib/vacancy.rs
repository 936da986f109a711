//! Top-level operations on a configured vacancy center.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    config::{ Config, MaterialParams },
    coords::FieldParams,
    dipole::Polarization,
    eigen::DegeneracyCheck,
    error::VacancyResult,
    hilbert,
    manifold,
    system::{ self, SystemResult },
};

/// A vacancy center with fixed material parameters.
///
/// All methods are pure functions of the configuration and their arguments,
/// so a single `Vacancy` can be shared freely across threads.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Vacancy {
    config: Config,
}

impl From<Config> for Vacancy {
    fn from(config: Config) -> Self { Self { config } }
}

impl From<MaterialParams> for Vacancy {
    fn from(material: MaterialParams) -> Self {
        Self { config: Config { material, ..Config::default() } }
    }
}

impl Vacancy {
    /// Create a new `Vacancy`.
    pub fn new(config: Config) -> Self { Self { config } }

    pub fn config(&self) -> &Config { &self.config }

    pub fn params(&self) -> &MaterialParams { &self.config.material }

    pub fn degeneracy(&self) -> &DegeneracyCheck { &self.config.degeneracy }

    /// 8×8 block-diagonal Hamiltonian with the excited manifold (including the
    /// zero-phonon line) at indices 0..4 and the ground manifold at 4..8.
    pub fn composite_hamiltonian(&self, field: &FieldParams)
        -> VacancyResult<nd::Array2<C64>>
    {
        let B = field.field_vector()?;
        Ok(manifold::build_composite(self.params(), &B, field.strain))
    }

    /// Diagonalize both manifolds and compute composite dipole operators.
    pub fn assemble(&self, field: &FieldParams)
        -> VacancyResult<SystemResult>
    {
        system::assemble(self.params(), self.degeneracy(), field)
    }

    /// Assemble the reduced four-level system for a field of magnitude
    /// `magnitude` along the symmetry *z*-axis.
    pub fn assemble_reduced(&self, magnitude: f64, strain: bool)
        -> VacancyResult<SystemResult>
    {
        system::assemble_reduced(
            self.params(), self.degeneracy(), magnitude, strain)
    }

    /// All eigenenergies, ground manifold first.
    pub fn energies(&self, field: &FieldParams) -> VacancyResult<Vec<f64>> {
        Ok(self.assemble(field)?.energies_concat().to_vec())
    }

    /// Diagonal matrix of all eigenenergies, ground manifold first.
    pub fn energy_matrix(&self, field: &FieldParams)
        -> VacancyResult<nd::Array2<f64>>
    {
        Ok(self.assemble(field)?.energy_matrix())
    }

    /// 8×8 composite dipole operator for polarization weights `pol`.
    pub fn dipole_matrix(&self, pol: &Polarization, field: &FieldParams)
        -> VacancyResult<nd::Array2<C64>>
    {
        Ok(self.assemble(field)?.dipole_matrix(pol))
    }

    /// Like [`Self::dipole_matrix`], for a field of magnitude `magnitude` in
    /// the symmetry *x*–*z* plane at angle `phi` from the *x*-axis.
    pub fn dipole_matrix_by_angle(
        &self,
        pol: &Polarization,
        phi: f64,
        magnitude: f64,
    ) -> VacancyResult<nd::Array2<C64>>
    {
        self.dipole_matrix(pol, &FieldParams::from_angle(phi, magnitude))
    }

    /// Energy operator over the product of the electronic eigenstates with the
    /// auxiliary label.
    ///
    /// If `reduced` is `true`, only the even-indexed eigenstates of each
    /// manifold are kept and the field direction is fixed along the symmetry
    /// *z*-axis.
    pub fn enlarged_energy_operator(&self, field: &FieldParams, reduced: bool)
        -> VacancyResult<nd::Array2<f64>>
    {
        let sys
            = if reduced {
                self.assemble_reduced(field.magnitude, field.strain)?
            } else {
                self.assemble(field)?
            };
        Ok(hilbert::build_energy_operator(&sys.energies_concat()))
    }

    /// Dipole coupling operator over the product of the electronic eigenstates
    /// with the auxiliary label.
    pub fn enlarged_coupling_operator(
        &self,
        pol: &Polarization,
        field: &FieldParams,
    ) -> VacancyResult<nd::Array2<C64>>
    {
        hilbert::build_coupling_operator(&self.dipole_matrix(pol, field)?)
    }

    /// Like [`Self::enlarged_coupling_operator`], for a field of magnitude
    /// `magnitude` in the symmetry *x*–*z* plane at angle `phi` from the
    /// *x*-axis.
    pub fn enlarged_coupling_operator_by_angle(
        &self,
        pol: &Polarization,
        phi: f64,
        magnitude: f64,
    ) -> VacancyResult<nd::Array2<C64>>
    {
        self.enlarged_coupling_operator(
            pol, &FieldParams::from_angle(phi, magnitude))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use ndarray::s;
    use crate::{
        coords::Frame,
        eigen::DegeneracyPolicy,
        error::VacancyError,
        nd_utils::{ is_hermitian, max_abs_diff },
    };

    #[test]
    fn composite_hamiltonian_blocks() {
        let vac = Vacancy::default();
        let field = FieldParams::default();
        let H = vac.composite_hamiltonian(&field).unwrap();
        assert_eq!(H.dim(), (8, 8));
        assert!(is_hermitian(&H, 1e-12));
        let zpl = vac.params().zpl;
        let tr_u: C64 = H.slice(s![..4, ..4]).diag().sum();
        let tr_g: C64 = H.slice(s![4.., 4..]).diag().sum();
        approx::assert_abs_diff_eq!(tr_u.re - tr_g.re, 4.0 * zpl, epsilon = 1e-9);

        let bad = FieldParams { direction: [0.0; 3], ..field };
        assert!(matches!(
            vac.composite_hamiltonian(&bad),
            Err(VacancyError::InvalidArgument(_)),
        ));
    }

    #[test]
    fn energies_ordering() {
        let vac = Vacancy::default();
        let E = vac.energies(&FieldParams::default()).unwrap();
        assert_eq!(E.len(), 8);
        // within each manifold ascending; every excited level above every
        // ground level
        assert!(E[..4].windows(2).all(|w| w[0] <= w[1]));
        assert!(E[4..].windows(2).all(|w| w[0] <= w[1]));
        assert!(E[3] < E[4]);
        let M = vac.energy_matrix(&FieldParams::default()).unwrap();
        assert_eq!(M.diag().to_vec(), E);
    }

    #[test]
    fn angle_matches_direction() {
        let vac = Vacancy::default();
        let by_angle
            = vac.dipole_matrix_by_angle(&Polarization::Z, 0.0, 0.1).unwrap();
        let field
            = FieldParams::along_z(0.1).with_direction(&[1.0, 0.0, 0.0]).unwrap();
        let direct = vac.dipole_matrix(&Polarization::Z, &field).unwrap();
        assert!(max_abs_diff(&by_angle, &direct) < 1e-12);

        let by_angle
            = vac.enlarged_coupling_operator_by_angle(&Polarization::Z, 0.0, 0.1)
            .unwrap();
        let direct
            = vac.enlarged_coupling_operator(&Polarization::Z, &field).unwrap();
        assert!(max_abs_diff(&by_angle, &direct) < 1e-12);
    }

    #[test]
    fn enlarged_energy_sizes() {
        let vac = Vacancy::default();
        let field = FieldParams::default();
        let full = vac.enlarged_energy_operator(&field, false).unwrap();
        let red = vac.enlarged_energy_operator(&field, true).unwrap();
        assert_eq!(full.dim(), (16, 16));
        assert_eq!(red.dim(), (8, 8));

        let E = vac.energies(&field).unwrap();
        for label in 0..2 {
            for (level, e) in E.iter().enumerate() {
                assert_eq!(full[[label * 8 + level, label * 8 + level]], *e);
            }
            for (level, e) in E.iter().step_by(2).enumerate() {
                assert_eq!(red[[label * 4 + level, label * 4 + level]], *e);
            }
        }
    }

    #[test]
    fn reduced_ignores_direction() {
        let vac = Vacancy::default();
        let along_x
            = FieldParams::along_z(0.2).with_direction(&[1.0, 0.0, 0.0]).unwrap();
        let a = vac.enlarged_energy_operator(&along_x, true).unwrap();
        let b = vac.enlarged_energy_operator(&FieldParams::along_z(0.2), true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn x_polarized_coupling() {
        let vac = Vacancy::default();
        for field in [
            FieldParams::default(),
            FieldParams::from_angle(0.7, 0.3).with_strain(true),
            FieldParams::along_z(1.0)
                .with_direction(&[0.2, -0.4, 1.0]).unwrap()
                .with_frame(Frame::Lattice),
        ] {
            let H = vac.enlarged_coupling_operator(&Polarization::X, &field).unwrap();
            let D = vac.dipole_matrix(&Polarization::X, &field).unwrap();
            assert_eq!(H.dim(), (16, 16));
            assert!(is_hermitian(&H, 1e-12));
            for ((r, c), h) in H.indexed_iter() {
                if r / 8 != c / 8 {
                    assert_eq!(*h, C64::from(0.0));
                } else {
                    assert_eq!(*h, D[[r % 8, c % 8]]);
                }
            }
            // the composite dipole has no diagonal, so neither does H
            assert!(H.diag().iter().all(|h| *h == C64::from(0.0)));
        }
    }

    #[test]
    fn strict_degeneracy_at_zero_field() {
        let mut config = Config::default();
        config.degeneracy.policy = DegeneracyPolicy::Error;
        let vac = Vacancy::new(config);
        let zero = FieldParams::along_z(0.0);
        assert!(matches!(
            vac.energies(&zero),
            Err(VacancyError::NearDegenerate { .. }),
        ));
        assert!(vac.energies(&FieldParams::default()).is_ok());
        // building the Hamiltonian alone involves no diagonalization
        assert!(vac.composite_hamiltonian(&zero).is_ok());
    }
}
