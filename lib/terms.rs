//! Builders for the individual perturbation terms of a single orbital
//! manifold.
//!
//! Every term is a 4×4 matrix over the basis
//! ```text
//! |e_x ↑⟩, |e_x ↓⟩, |e_y ↑⟩, |e_y ↓⟩
//! ```
//! i.e. two orbital branches, each with two spin projections.

use ndarray as nd;
use num_complex::Complex64 as C64;
use crate::{
    config::StrainParams,
    coords::FieldVector,
    dipole::Axes,
};

const Z: C64 = C64 { re: 0.0, im: 0.0 };

fn re(x: f64) -> C64 { C64::from(x) }

/// Spin-orbit coupling with coefficient `lambda`.
pub fn spin_orbit(lambda: f64) -> nd::Array2<C64> {
    let a = C64::i() * lambda / 2.0;
    nd::array![
        [ Z,  Z, -a,  Z],
        [ Z,  Z,  Z,  a],
        [ a,  Z,  Z,  Z],
        [ Z, -a,  Z,  Z],
    ]
}

/// Jahn-Teller coupling for the pair `[ξ_x, ξ_y]`.
pub fn jahn_teller(xi: [f64; 2]) -> nd::Array2<C64> {
    let [x, y] = xi.map(re);
    nd::array![
        [ x,  Z,  y,  Z],
        [ Z,  x,  Z,  y],
        [ y,  Z, -x,  Z],
        [ Z,  y,  Z, -x],
    ]
}

/// Orbital Zeeman coupling to field `B` with gyromagnetic ratio `gamma_l` and
/// quenching factor `f`.
///
/// Only the *z*-component of the field contributes.
pub fn orbital_zeeman(B: &FieldVector, gamma_l: f64, f: f64)
    -> nd::Array2<C64>
{
    let iBz = C64::i() * B.z();
    nd::array![
        [   Z,    Z,  iBz,    Z],
        [   Z,    Z,    Z,  iBz],
        [-iBz,    Z,    Z,    Z],
        [   Z, -iBz,    Z,    Z],
    ] * (f * gamma_l)
}

/// Spin Zeeman coupling to field `B` with gyromagnetic ratio `gamma_s`.
pub fn spin_zeeman(B: &FieldVector, gamma_s: f64) -> nd::Array2<C64> {
    let Bp = C64::new(B.x(), B.y());
    let Bm = Bp.conj();
    let Bz = re(B.z());
    nd::array![
        [ Bz,  Bm,   Z,   Z],
        [ Bp, -Bz,   Z,   Z],
        [  Z,   Z,  Bz,  Bm],
        [  Z,   Z,  Bp, -Bz],
    ] * gamma_s
}

/// Linear strain response.
pub fn strain(params: &StrainParams) -> nd::Array2<C64> {
    let StrainParams { alpha, beta, delta } = *params;
    let ad0 = re(alpha - delta);
    let ad1 = re(-alpha - delta);
    let b = re(beta);
    nd::array![
        [ad0,   Z,   b,   Z],
        [  Z, ad0,   Z,   b],
        [  b,   Z, ad1,   Z],
        [  Z,   b,   Z, ad1],
    ]
}

/// Electric dipole operators between the ground and excited manifolds in the
/// fixed (unperturbed) basis.
pub fn dipole_raw() -> Axes<nd::Array2<C64>> {
    let o = re(1.0);
    let x = nd::array![
        [ o,  Z,  Z,  Z],
        [ Z,  o,  Z,  Z],
        [ Z,  Z, -o,  Z],
        [ Z,  Z,  Z, -o],
    ];
    let y = nd::array![
        [ Z,  Z, -o,  Z],
        [ Z,  Z,  Z, -o],
        [-o,  Z,  Z,  Z],
        [ Z, -o,  Z,  Z],
    ];
    let z = nd::Array2::from_diag_elem(4, re(2.0));
    Axes { x, y, z }
}

#[cfg(test)]
mod test {
    use super::*;
    use proptest::prelude::*;
    use crate::nd_utils::is_hermitian;

    const TOL: f64 = 1e-12;

    #[test]
    fn spin_orbit_spectrum() {
        // eigenvalues ±λ/2, each twice
        let H = spin_orbit(2.0);
        assert_eq!(H[[0, 2]], C64::new(0.0, -1.0));
        assert_eq!(H[[2, 0]], C64::new(0.0, 1.0));
        assert_eq!(H[[1, 3]], C64::new(0.0, 1.0));
        assert_eq!(H.dot(&H), nd::Array2::from_diag_elem(4, re(1.0)));
    }

    #[test]
    fn zeeman_traceless() {
        let B = FieldVector([0.3, -1.2, 0.7]);
        let tr_l: C64 = orbital_zeeman(&B, 2.0, 0.5).diag().sum();
        let tr_s: C64 = spin_zeeman(&B, 2.0).diag().sum();
        assert_eq!(tr_l, Z);
        assert_eq!(tr_s, Z);
    }

    #[test]
    fn orbital_zeeman_ignores_transverse() {
        let B = FieldVector([1.0, 1.0, 0.0]);
        assert!(orbital_zeeman(&B, 1.0, 1.0).iter().all(|a| *a == Z));
    }

    #[test]
    fn strain_entries() {
        let H = strain(&StrainParams { alpha: 1.0, beta: 2.0, delta: 0.5 });
        assert_eq!(H[[0, 0]], re(0.5));
        assert_eq!(H[[1, 1]], re(0.5));
        assert_eq!(H[[2, 2]], re(-1.5));
        assert_eq!(H[[3, 3]], re(-1.5));
        assert_eq!(H[[0, 2]], re(2.0));
        assert_eq!(H[[3, 1]], re(2.0));
        assert_eq!(H[[0, 1]], Z);
    }

    #[test]
    fn dipoles_hermitian() {
        let D = dipole_raw();
        for d in D.iter() {
            assert!(is_hermitian(d, 0.0));
        }
        assert_eq!(D.z[[3, 3]], re(2.0));
    }

    proptest! {
        #[test]
        fn terms_hermitian(
            lambda in -1e2..1e2_f64,
            xi_x in -1e2..1e2_f64,
            xi_y in -1e2..1e2_f64,
            bx in -1e2..1e2_f64,
            by in -1e2..1e2_f64,
            bz in -1e2..1e2_f64,
            gamma in -1e2..1e2_f64,
            f in -1e1..1e1_f64,
            alpha in -1e2..1e2_f64,
            beta in -1e2..1e2_f64,
            delta in -1e2..1e2_f64,
        ) {
            let B = FieldVector([bx, by, bz]);
            prop_assert!(is_hermitian(&spin_orbit(lambda), TOL));
            prop_assert!(is_hermitian(&jahn_teller([xi_x, xi_y]), TOL));
            prop_assert!(is_hermitian(&orbital_zeeman(&B, gamma, f), TOL));
            prop_assert!(is_hermitian(&spin_zeeman(&B, gamma), TOL));
            let strain_params = StrainParams { alpha, beta, delta };
            prop_assert!(is_hermitian(&strain(&strain_params), TOL));
        }
    }
}
