//! Material parameters and run configuration.
//!
//! All coupling constants are in units of angular frequency (rad THz) unless
//! noted otherwise. Default values follow the SnV calibration of Trusheim et
//! al., Phys. Rev. Lett. 124, 023602 (2020).

use std::{ f64::consts::TAU, path::Path };
use serde::{ Deserialize, Serialize };
use crate::{
    consts,
    eigen::DegeneracyCheck,
    error::VacancyResult,
    manifold::Manifold,
};

/// Scaling factors for the linear strain response of a single manifold.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StrainParams {
    /// Response to E<sub>gx</sub> strain.
    pub alpha: f64,
    /// Response to E<sub>gy</sub> strain.
    pub beta: f64,
    /// Response to A<sub>1g</sub> strain.
    pub delta: f64,
}

/// Coupling constants for a single orbital manifold.
///
/// A manifold given in a configuration file must name every field.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManifoldParams {
    /// Spin-orbit coefficient λ.
    pub spin_orbit: f64,
    /// Jahn-Teller pair `[ξ_x, ξ_y]`.
    pub jahn_teller: [f64; 2],
    /// Orbital Zeeman quenching factor *f* (dimensionless).
    pub orbital_zeeman: f64,
    /// Multiplier on the spin gyromagnetic ratio (dimensionless).
    pub spin_zeeman: f64,
    /// Strain response coefficients.
    pub strain: StrainParams,
}

impl ManifoldParams {
    /// SnV ground-manifold calibration.
    pub fn snv_ground() -> Self {
        Self {
            spin_orbit: TAU * 0.815,
            jahn_teller: [TAU * 0.065, 0.0],
            orbital_zeeman: 0.15,
            spin_zeeman: 1.0,
            strain: StrainParams {
                alpha: TAU * -0.238,
                beta: TAU * 0.238,
                delta: 0.0,
            },
        }
    }

    /// SnV excited-manifold calibration.
    pub fn snv_excited() -> Self {
        Self {
            spin_orbit: TAU * 2.355,
            jahn_teller: [TAU * 0.855, 0.0],
            orbital_zeeman: 0.15,
            spin_zeeman: 1.0,
            strain: StrainParams {
                alpha: TAU * -0.076,
                beta: TAU * -0.07,
                delta: 0.0,
            },
        }
    }
}

/// Immutable set of material constants shared by all Hamiltonian builders.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MaterialParams {
    /// Ground (E<sub>g</sub>) manifold.
    pub ground: ManifoldParams,
    /// Excited (E<sub>u</sub>) manifold.
    pub excited: ManifoldParams,
    /// Zero-phonon line energy.
    pub zpl: f64,
    /// Orbital gyromagnetic ratio, rad THz / T.
    pub gamma_l: f64,
    /// Spin gyromagnetic ratio, rad THz / T.
    pub gamma_s: f64,
}

impl Default for MaterialParams {
    fn default() -> Self {
        Self {
            ground: ManifoldParams::snv_ground(),
            excited: ManifoldParams::snv_excited(),
            zpl: TAU * 484.32,
            gamma_l: consts::gamma_l(),
            gamma_s: consts::gamma_s(),
        }
    }
}

impl MaterialParams {
    /// Get the coupling constants for a particular manifold.
    pub fn manifold(&self, manifold: Manifold) -> &ManifoldParams {
        match manifold {
            Manifold::Ground => &self.ground,
            Manifold::Excited => &self.excited,
        }
    }

    /// Energy offset applied to every diagonal entry of a manifold block.
    pub fn offset(&self, manifold: Manifold) -> f64 {
        match manifold {
            Manifold::Ground => 0.0,
            Manifold::Excited => self.zpl,
        }
    }
}

/// Top-level configuration: material constants plus eigenvalue diagnostics.
///
/// Every field falls back to its default when omitted from a TOML source, so
/// a file only needs to name what it overrides:
/// ```toml
/// [material]
/// zpl = 3043.0
///
/// [material.ground]
/// spin_orbit = 5.12
/// jahn_teller = [0.41, 0.0]
/// orbital_zeeman = 0.15
/// spin_zeeman = 1.0
/// strain = { alpha = -1.5, beta = 1.5, delta = 0.0 }
///
/// [degeneracy]
/// tol = 1e-8
/// policy = "error"
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub material: MaterialParams,
    pub degeneracy: DegeneracyCheck,
}

impl Config {
    /// Parse a configuration from a TOML string.
    pub fn from_toml_str(src: &str) -> VacancyResult<Self> {
        Ok(toml::from_str(src)?)
    }

    /// Read and parse a TOML configuration file.
    pub fn load<P>(path: P) -> VacancyResult<Self>
    where P: AsRef<Path>
    {
        let path = path.as_ref();
        let src = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&src)?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }
}
