//! Small helpers for working with complex `ndarray` matrices.

use ndarray::{ self as nd, s };
use num_complex::Complex64 as C64;

/// Return the conjugate transpose of a matrix.
pub fn adjoint(A: &nd::Array2<C64>) -> nd::Array2<C64> {
    A.t().mapv(|a| a.conj())
}

/// Return the largest element-wise absolute difference between two matrices
/// of equal shape.
pub fn max_abs_diff(A: &nd::Array2<C64>, B: &nd::Array2<C64>) -> f64 {
    A.iter().zip(B)
        .map(|(a, b)| (*a - *b).norm())
        .fold(0.0, f64::max)
}

/// Return `true` if `A` is square and equal to its own conjugate transpose to
/// within `tol` in each element.
pub fn is_hermitian(A: &nd::Array2<C64>, tol: f64) -> bool {
    A.is_square()
        && A.indexed_iter()
        .all(|((i, j), a)| (*a - A[[j, i]].conj()).norm() <= tol)
}

/// Select the even-indexed (0, 2, ...) rows and columns of a matrix.
pub fn even_submatrix(A: &nd::Array2<C64>) -> nd::Array2<C64> {
    A.slice(s![..;2, ..;2]).to_owned()
}

/// Select the even-indexed (0, 2, ...) elements of a vector.
pub fn even_elements(a: &nd::Array1<f64>) -> nd::Array1<f64> {
    a.slice(s![..;2]).to_owned()
}

/// Build a `2n × 2n` Hermitian matrix from an `n × n` block `T` placed in the
/// upper-right quadrant, with its adjoint in the lower-left.
pub fn off_diag_hermitian(T: &nd::Array2<C64>) -> nd::Array2<C64> {
    let (n, m) = T.dim();
    let mut A: nd::Array2<C64> = nd::Array2::zeros((n + m, n + m));
    A.slice_mut(s![..n, n..]).assign(T);
    A.slice_mut(s![n.., ..n]).assign(&adjoint(T));
    A
}

/// Place two square blocks along the diagonal of a larger matrix, `first` at
/// the top left.
pub fn block_diag(first: &nd::Array2<C64>, second: &nd::Array2<C64>)
    -> nd::Array2<C64>
{
    let n = first.nrows();
    let m = second.nrows();
    let mut A: nd::Array2<C64> = nd::Array2::zeros((n + m, n + m));
    A.slice_mut(s![..n, ..n]).assign(first);
    A.slice_mut(s![n.., n..]).assign(second);
    A
}
