//! Conversion between the defect's symmetry-axis frame and the host lattice
//! frame, and construction of magnetic field vectors.

use std::ops::Deref;
use ndarray as nd;
use crate::error::{ VacancyError, VacancyResult };

/// Coordinate frame in which a direction vector is expressed.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Frame {
    /// Symmetry axes of the defect, with *z* along the defect's high-symmetry
    /// axis.
    #[default]
    Symmetry,
    /// Host crystal lattice vectors.
    Lattice,
}

/// Rows are the defect's symmetry axes expressed in lattice coordinates.
fn symmetry_axes() -> nd::Array2<f64> {
    let a = 6.0_f64.sqrt().recip();
    let b = 2.0_f64.sqrt().recip();
    let c = 3.0_f64.sqrt().recip();
    nd::array![
        [      a, -2.0 * a,  a],
        [      b,      0.0, -b],
        [      c,        c,  c],
    ]
}

fn to_array(v: [f64; 3]) -> nd::Array1<f64> { nd::Array1::from_vec(v.to_vec()) }

fn from_array(v: nd::Array1<f64>) -> [f64; 3] { [v[0], v[1], v[2]] }

/// Convert a vector in lattice coordinates to symmetry-axis coordinates.
pub fn lattice_to_symmetry(v: [f64; 3]) -> [f64; 3] {
    from_array(symmetry_axes().dot(&to_array(v)))
}

/// Convert a vector in symmetry-axis coordinates to lattice coordinates.
pub fn symmetry_to_lattice(v: [f64; 3]) -> [f64; 3] {
    from_array(symmetry_axes().t().dot(&to_array(v)))
}

/// Interpret a slice as a 3-vector, failing for any other length.
pub fn vec3(v: &[f64]) -> VacancyResult<[f64; 3]> {
    <[f64; 3]>::try_from(v)
        .map_err(|_| {
            VacancyError::invalid(
                format!("expected a 3-component vector, got {}", v.len()))
        })
}

/// A magnetic field vector in symmetry-axis coordinates, in tesla.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldVector(pub [f64; 3]);

impl Deref for FieldVector {
    type Target = [f64; 3];

    fn deref(&self) -> &Self::Target { &self.0 }
}

impl FieldVector {
    /// The zero field.
    pub fn zero() -> Self { Self([0.0; 3]) }

    pub fn x(&self) -> f64 { self.0[0] }

    pub fn y(&self) -> f64 { self.0[1] }

    pub fn z(&self) -> f64 { self.0[2] }

    /// Euclidean norm.
    pub fn norm(&self) -> f64 {
        self.0.iter().map(|b| b * b).sum::<f64>().sqrt()
    }
}

/// Scale `direction` to a vector of Euclidean norm `magnitude`.
///
/// Fails if `direction` does not have exactly three components or has zero
/// (or non-finite) norm.
pub fn normalize_and_scale(magnitude: f64, direction: &[f64])
    -> VacancyResult<FieldVector>
{
    let dir = vec3(direction)?;
    let norm = dir.iter().map(|d| d * d).sum::<f64>().sqrt();
    if norm == 0.0 || !norm.is_finite() {
        return Err(VacancyError::invalid(
            format!("cannot normalize direction vector {:?}", dir)));
    }
    Ok(FieldVector(dir.map(|d| magnitude * d / norm)))
}

/// External conditions for a single evaluation of the system: the applied
/// magnetic field and whether the static strain response is included.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FieldParams {
    /// Field magnitude in tesla.
    pub magnitude: f64,
    /// Field direction; need not be normalized.
    pub direction: [f64; 3],
    /// Frame in which `direction` is expressed.
    pub frame: Frame,
    /// Include the strain term in both manifolds.
    pub strain: bool,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            magnitude: 1e-6,
            direction: [0.0, 0.0, 1.0],
            frame: Frame::Symmetry,
            strain: false,
        }
    }
}

impl FieldParams {
    /// Field of a given magnitude along the symmetry *z*-axis.
    pub fn along_z(magnitude: f64) -> Self {
        Self { magnitude, ..Self::default() }
    }

    /// Field of a given magnitude in the symmetry *x*–*z* plane, at angle
    /// `phi` (radians) from the *x*-axis.
    ///
    /// The *y*-component is always zero.
    pub fn from_angle(phi: f64, magnitude: f64) -> Self {
        Self {
            magnitude,
            direction: [phi.cos(), 0.0, phi.sin()],
            ..Self::default()
        }
    }

    /// Set the field direction from a slice, failing if it does not have
    /// exactly three components.
    pub fn with_direction(mut self, direction: &[f64]) -> VacancyResult<Self> {
        self.direction = vec3(direction)?;
        Ok(self)
    }

    pub fn with_frame(mut self, frame: Frame) -> Self {
        self.frame = frame;
        self
    }

    pub fn with_strain(mut self, strain: bool) -> Self {
        self.strain = strain;
        self
    }

    /// Compute the field vector in symmetry-axis coordinates.
    pub fn field_vector(&self) -> VacancyResult<FieldVector> {
        let dir
            = match self.frame {
                Frame::Symmetry => self.direction,
                Frame::Lattice => lattice_to_symmetry(self.direction),
            };
        normalize_and_scale(self.magnitude, &dir)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn axes_orthonormal() {
        let M = symmetry_axes();
        let I = M.dot(&M.t());
        for ((i, j), x) in I.indexed_iter() {
            let expected = if i == j { 1.0 } else { 0.0 };
            approx::assert_abs_diff_eq!(*x, expected, epsilon = 1e-14);
        }
    }

    #[test]
    fn symmetry_z_is_111() {
        let l = symmetry_to_lattice([0.0, 0.0, 1.0]);
        let c = 3.0_f64.sqrt().recip();
        for li in l {
            approx::assert_abs_diff_eq!(li, c, epsilon = 1e-15);
        }
    }

    #[test]
    fn bad_directions() {
        assert!(matches!(
            normalize_and_scale(1.0, &[0.0, 0.0, 0.0]),
            Err(VacancyError::InvalidArgument(_)),
        ));
        assert!(matches!(
            normalize_and_scale(1.0, &[1.0, 0.0]),
            Err(VacancyError::InvalidArgument(_)),
        ));
        assert!(matches!(
            normalize_and_scale(1.0, &[1.0, 0.0, 0.0, 0.0]),
            Err(VacancyError::InvalidArgument(_)),
        ));
        assert!(matches!(
            FieldParams::default().with_direction(&[1.0]),
            Err(VacancyError::InvalidArgument(_)),
        ));
    }

    #[test]
    fn lattice_frame_field() {
        let params
            = FieldParams::along_z(0.5)
            .with_direction(&[1.0, 1.0, 1.0]).unwrap()
            .with_frame(Frame::Lattice);
        let B = params.field_vector().unwrap();
        approx::assert_abs_diff_eq!(B.x(), 0.0, epsilon = 1e-15);
        approx::assert_abs_diff_eq!(B.y(), 0.0, epsilon = 1e-15);
        approx::assert_abs_diff_eq!(B.z(), 0.5, epsilon = 1e-15);
    }

    #[test]
    fn angle_field_in_xz_plane() {
        let B = FieldParams::from_angle(0.3, 2.0).field_vector().unwrap();
        assert_eq!(B.y(), 0.0);
        approx::assert_relative_eq!(B.x(), 2.0 * 0.3_f64.cos());
        approx::assert_relative_eq!(B.z(), 2.0 * 0.3_f64.sin());
    }

    proptest! {
        #[test]
        fn round_trip(
            x in -1e3..1e3_f64,
            y in -1e3..1e3_f64,
            z in -1e3..1e3_f64,
        ) {
            let v = [x, y, z];
            let w = symmetry_to_lattice(lattice_to_symmetry(v));
            for (vi, wi) in v.iter().zip(w) {
                prop_assert!((vi - wi).abs() <= 1e-10 * (1.0 + vi.abs()));
            }
        }

        #[test]
        fn scaled_norm(
            m in 0.0..1e2_f64,
            x in -1e2..1e2_f64,
            y in -1e2..1e2_f64,
            z in -1e2..1e2_f64,
        ) {
            prop_assume!(x.abs() + y.abs() + z.abs() > 1e-6);
            let B = normalize_and_scale(m, &[x, y, z]).unwrap();
            prop_assert!((B.norm() - m).abs() <= 1e-12 * (1.0 + m));
        }
    }
}
