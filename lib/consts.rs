//! Fixed physical constants used to derive the Zeeman coefficients.

// reduced Planck constant [J s]
pub const HBAR: f64 = 1.054571817e-34;

// elementary charge [C]
pub const E_CHARGE: f64 = 1.602176634e-19;

// electron mass [kg]
pub const M_E: f64 = 9.1093837015e-31;

// Bohr magneton [J / T]
pub const MU_B: f64 = 0.5 * E_CHARGE * HBAR / M_E;

// tera
pub const TERA: f64 = 1e12;

/// Orbital gyromagnetic ratio `μ_B / ħ` in units of rad THz / T.
pub fn gamma_l() -> f64 { MU_B / HBAR / TERA }

/// Spin gyromagnetic ratio, `2 γ_L`, in units of rad THz / T.
pub fn gamma_s() -> f64 { 2.0 * gamma_l() }

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn bohr_magneton() {
        approx::assert_relative_eq!(MU_B, 9.2740100783e-24, max_relative = 1e-9);
        // ~28 GHz / T for a free electron spin
        approx::assert_relative_eq!(
            gamma_s() / std::f64::consts::TAU,
            0.028,
            max_relative = 1e-2,
        );
    }
}
