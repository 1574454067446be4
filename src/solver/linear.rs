use crate::consts::PIVOT_EPSILON;
use crate::error::{BfResult, BodyForgeError};

/// Solves `matrix * x = rhs` by Gaussian elimination with partial pivoting.
///
/// Works on owned copies; the caller's data is never touched. Each column
/// picks the row with the largest absolute value as pivot and swaps it into
/// place in both the matrix and the right-hand side. A pivot below
/// [`PIVOT_EPSILON`] aborts with [`BodyForgeError::SingularMatrix`].
#[allow(clippy::needless_range_loop)]
pub fn solve(matrix: &[Vec<f64>], rhs: &[f64]) -> BfResult<Vec<f64>> {
    let n = rhs.len();
    if matrix.len() != n || matrix.iter().any(|row| row.len() != n) {
        return Err(BodyForgeError::InvalidDataset(format!(
            "linear system needs a {}x{} matrix",
            n, n
        )));
    }

    let mut m: Vec<Vec<f64>> = matrix.to_vec();
    let mut b: Vec<f64> = rhs.to_vec();

    for k in 0..n {
        let mut pivot_row = k;
        for i in (k + 1)..n {
            if m[i][k].abs() > m[pivot_row][k].abs() {
                pivot_row = i;
            }
        }
        if pivot_row != k {
            m.swap(k, pivot_row);
            b.swap(k, pivot_row);
        }

        let pivot = m[k][k];
        if pivot.abs() < PIVOT_EPSILON {
            return Err(BodyForgeError::SingularMatrix { column: k, pivot });
        }

        for i in (k + 1)..n {
            let factor = m[i][k] / pivot;
            b[i] -= factor * b[k];
            for j in k..n {
                m[i][j] -= factor * m[k][j];
            }
        }
    }

    // Back substitution
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = 0.0;
        for j in (i + 1)..n {
            sum += m[i][j] * x[j];
        }
        x[i] = (b[i] - sum) / m[i][i];
    }

    Ok(x)
}
