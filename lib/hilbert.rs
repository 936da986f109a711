//! Product basis of electronic eigenstates with an auxiliary two-level label,
//! and operators over that basis.

use itertools::Itertools;
use ndarray as nd;
use num_complex::Complex64 as C64;
use num_traits::{ One, Zero };
use crate::error::{ VacancyError, VacancyResult };

/* States *********************************************************************/

/// Auxiliary binary label attached to every electronic eigenstate.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Label {
    Zero,
    One,
}

impl Label {
    /// Both labels, in enumeration order.
    pub const ALL: [Self; 2] = [Self::Zero, Self::One];

    /// Return the label as `0` or `1`.
    pub fn index(self) -> usize {
        match self {
            Self::Zero => 0,
            Self::One => 1,
        }
    }

    /// Create a label from `0` or `1`.
    pub fn from_index(k: usize) -> Option<Self> {
        match k {
            0 => Some(Self::Zero),
            1 => Some(Self::One),
            _ => None,
        }
    }
}

/// A single product basis state: an electronic eigenstate index together with
/// an auxiliary label.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProdState {
    pub level: usize,
    pub label: Label,
}

impl ProdState {
    pub fn new(level: usize, label: Label) -> Self { Self { level, label } }

    /// Return `true` if two states carry the same auxiliary label.
    pub fn same_label(&self, other: &Self) -> bool { self.label == other.label }
}

impl From<(usize, Label)> for ProdState {
    fn from(nl: (usize, Label)) -> Self {
        let (level, label) = nl;
        Self { level, label }
    }
}

/* Bases **********************************************************************/

/// Product basis over `dim` electronic eigenstates and the auxiliary label.
///
/// States are enumerated with the label as the outer index and the level as
/// the inner index, so that `index(level, label) = label * dim + level`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ProdBasis {
    dim: usize,
}

impl ProdBasis {
    /// Create a new product basis over `dim` electronic eigenstates.
    pub fn new(dim: usize) -> Self { Self { dim } }

    /// Number of electronic eigenstates.
    pub fn dim(&self) -> usize { self.dim }

    /// Total number of product states, `2 * dim`.
    pub fn len(&self) -> usize { 2 * self.dim }

    pub fn is_empty(&self) -> bool { self.dim == 0 }

    /// Get the index of a state in the product basis.
    ///
    /// Returns `None` if `level` is out of range.
    pub fn index(&self, level: usize, label: Label) -> Option<usize> {
        (level < self.dim).then_some(label.index() * self.dim + level)
    }

    /// Get the index of a [`ProdState`].
    pub fn index_of(&self, state: &ProdState) -> Option<usize> {
        self.index(state.level, state.label)
    }

    /// Get the state at a particular index.
    pub fn state(&self, index: usize) -> Option<ProdState> {
        if self.dim == 0 { return None; }
        Label::from_index(index / self.dim)
            .map(|label| ProdState::new(index % self.dim, label))
    }

    /// Iterate over all states in enumeration order.
    pub fn states(&self) -> impl Iterator<Item = ProdState> {
        Label::ALL.into_iter()
            .cartesian_product(0..self.dim)
            .map(|(label, level)| ProdState::new(level, label))
    }

    /// Get an array representation of a particular product state.
    pub fn get_vector(&self, state: &ProdState) -> Option<nd::Array1<C64>> {
        self.index_of(state)
            .map(|k| {
                (0..self.len())
                    .map(|j| if j == k { C64::one() } else { C64::zero() })
                    .collect()
            })
    }

    /// Get an array representation of the density matrix for a particular
    /// product state.
    pub fn get_density(&self, state: &ProdState) -> Option<nd::Array2<C64>> {
        self.get_vector(state)
            .map(|diag| nd::Array2::from_diag(&diag))
    }

    /// Get an array representation of a completely classical mixture (i.e. a
    /// diagonal matrix) of product states with weights determined by a
    /// weighting function.
    ///
    /// The weighting function will be passed each state and its index.
    pub fn get_density_diag<F>(&self, weights: F) -> nd::Array2<f64>
    where F: Fn(&ProdState, usize) -> f64
    {
        let diag: nd::Array1<f64>
            = self.states().enumerate()
            .map(|(index, state)| weights(&state, index))
            .collect();
        nd::Array2::from_diag(&diag)
    }
}

/* Enlarged operators *********************************************************/

/// Build the diagonal energy operator over the product basis.
///
/// Each electronic eigenenergy appears once in each label sector; the label
/// itself carries no energy.
pub fn build_energy_operator(energies: &nd::Array1<f64>) -> nd::Array2<f64> {
    ProdBasis::new(energies.len())
        .get_density_diag(|state, _| energies[state.level])
}

/// Build the coupling operator over the product basis from an electronic
/// operator `D`, acting identically within each label sector.
///
/// The entry at `(index(to, label), index(from, label))` is `D[to, from]`;
/// states with different labels are never coupled. Fails if `D` is not
/// square.
pub fn build_coupling_operator(D: &nd::Array2<C64>)
    -> VacancyResult<nd::Array2<C64>>
{
    if !D.is_square() {
        return Err(VacancyError::invalid(
            format!("coupling operator must be square, got {:?}", D.dim())));
    }
    let basis = ProdBasis::new(D.nrows());
    let n = basis.len();
    let mut H: nd::Array2<C64> = nd::Array2::zeros((n, n));
    let iter
        = Label::ALL.into_iter()
        .cartesian_product((0..basis.dim()).cartesian_product(0..basis.dim()));
    for (label, (to, from)) in iter {
        let i = label.index() * basis.dim() + to;
        let j = label.index() * basis.dim() + from;
        H[[i, j]] += D[[to, from]];
    }
    Ok(H)
}
