#![allow(non_snake_case)]

//! Electronic-structure model of a group-IV vacancy spin center: perturbation
//! Hamiltonians for the ground and excited orbital manifolds, their
//! eigenbases under an applied magnetic field, optical dipole operators in
//! that eigenbasis, and enlarged operators over the product of the electronic
//! eigenstates with an auxiliary two-level label.

pub mod consts;
pub mod error;
pub mod config;
pub mod nd_utils;
pub mod coords;
pub mod terms;
pub mod manifold;
pub mod eigen;
pub mod dipole;
pub mod system;
pub mod hilbert;
pub mod vacancy;
pub mod sweep;

pub use error::{ VacancyError, VacancyResult };
pub use config::{ Config, MaterialParams, ManifoldParams, StrainParams };
pub use coords::{ FieldParams, FieldVector, Frame };
pub use dipole::{ Axes, Polarization };
pub use eigen::{ DegeneracyCheck, DegeneracyPolicy, EigenSet };
pub use manifold::{ Manifold, PerManifold };
pub use system::SystemResult;
pub use hilbert::{ Label, ProdBasis, ProdState };
pub use vacancy::Vacancy;
