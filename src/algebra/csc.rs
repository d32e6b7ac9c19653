#![allow(non_snake_case)]

use crate::algebra::{FloatT, MatrixVectorMultiply, SparseFormatError, VectorMath};
use itertools::Itertools;

#[cfg(feature = "serde")]
use serde::{de::DeserializeOwned, Deserialize, Serialize};

/// Sparse matrix in standard Compressed Sparse Column (CSC) format
///
/// __Example usage__ : To construct the 3 x 3 matrix
/// ```text
/// A = [1.  3.  5.]
///     [2.  0.  6.]
///     [0.  4.  7.]
/// ```
///
/// ```
/// use conicdual::algebra::CscMatrix;
///
/// let A : CscMatrix<f64> = CscMatrix::new(
///    3,                                // m
///    3,                                // n
///    vec![0, 2, 4, 7],                 //colptr
///    vec![0, 1, 0, 2, 0, 1, 2],        //rowval
///    vec![1., 2., 3., 4., 5., 6., 7.], //nzval
///  );
///
/// // optional correctness check
/// assert!(A.check_format().is_ok());
///
/// ```
///

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = "T: Serialize + DeserializeOwned"))]
pub struct CscMatrix<T = f64> {
    /// number of rows
    pub m: usize,
    /// number of columns
    pub n: usize,
    /// CSC format column pointer.
    ///
    /// Ths field should have length `n+1`. The last entry corresponds
    /// to the the number of nonzeros and should agree with the lengths
    /// of the `rowval` and `nzval` fields.
    pub colptr: Vec<usize>,
    /// vector of row indices
    pub rowval: Vec<usize>,
    /// vector of non-zero matrix elements
    pub nzval: Vec<T>,
}

impl<T> CscMatrix<T>
where
    T: FloatT,
{
    /// `CscMatrix` constructor.
    ///
    /// # Panics
    /// Makes rudimentary dimensional compatibility checks and panics on
    /// failure.   This constructor does __not__
    /// ensure that rows indices are all in bounds or that data is arranged
    /// such that entries within each column appear in order of increasing
    /// row index.   Responsibility for ensuring these conditions hold
    /// is left to the caller.
    ///
    pub fn new(m: usize, n: usize, colptr: Vec<usize>, rowval: Vec<usize>, nzval: Vec<T>) -> Self {
        assert_eq!(rowval.len(), nzval.len());
        assert_eq!(colptr.len(), n + 1);
        assert_eq!(colptr[n], rowval.len());
        CscMatrix {
            m,
            n,
            colptr,
            rowval,
            nzval,
        }
    }

    /// Assemble an `m` x `n` matrix from (row, column, value) triplets.
    ///
    /// Triplets may appear in any order.  Entries with repeated (row, column)
    /// pairs are summed.  Explicit zeros are kept so that the sparsity
    /// pattern reflects the structure of the input.
    pub fn new_from_triplets(
        m: usize,
        n: usize,
        triplets: impl IntoIterator<Item = (usize, usize, T)>,
    ) -> Result<Self, SparseFormatError> {
        let mut entries = triplets.into_iter().collect_vec();

        if entries.iter().any(|&(r, c, _)| r >= m || c >= n) {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        entries.sort_by_key(|&(r, c, _)| (c, r));

        let mut colptr = vec![0; n + 1];
        let mut rowval = Vec::with_capacity(entries.len());
        let mut nzval = Vec::with_capacity(entries.len());

        for ((r, c), group) in &entries.into_iter().group_by(|&(r, c, _)| (r, c)) {
            let v = group.fold(T::zero(), |acc, (_, _, v)| acc + v);
            rowval.push(r);
            nzval.push(v);
            colptr[c + 1] += 1;
        }

        // cumulative sum of per-column counts
        for j in 0..n {
            colptr[j + 1] += colptr[j];
        }

        let A = CscMatrix::new(m, n, colptr, rowval, nzval);
        A.check_format()?;
        Ok(A)
    }

    /// number of nonzeros
    pub fn nnz(&self) -> usize {
        self.colptr[self.n]
    }

    /// matrix dimensions as (rows, columns)
    pub fn size(&self) -> (usize, usize) {
        (self.m, self.n)
    }

    /// Returns the value at (`row`, `col`), or zero if the
    /// entry is not in the sparsity pattern.
    pub fn get_entry(&self, (row, col): (usize, usize)) -> Option<T> {
        if row >= self.m || col >= self.n {
            return None;
        }
        let rng = self.colptr[col]..self.colptr[col + 1];
        let value = match self.rowval[rng.clone()].binary_search(&row) {
            Ok(offset) => self.nzval[rng.start + offset],
            Err(_) => T::zero(),
        };
        Some(value)
    }

    /// Check that matrix data is correctly formatted.
    pub fn check_format(&self) -> Result<(), SparseFormatError> {
        if self.rowval.len() != self.nzval.len() {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        if self.colptr.is_empty()
            || (self.colptr.len() - 1) != self.n
            || self.colptr[self.n] != self.rowval.len()
        {
            return Err(SparseFormatError::IncompatibleDimension);
        }

        //check for colptr monotonicity
        if self.colptr.windows(2).any(|c| c[0] > c[1]) {
            return Err(SparseFormatError::BadColptr);
        }

        //check for rowval monotonicity within each column
        for col in 0..self.n {
            let rng = self.colptr[col]..self.colptr[col + 1];
            if self.rowval[rng].windows(2).any(|c| c[0] >= c[1]) {
                return Err(SparseFormatError::BadRowOrdering);
            }
        }
        //check for row values out of bounds
        if !self.rowval.iter().all(|r| r < &self.m) {
            return Err(SparseFormatError::BadRowval);
        }

        Ok(())
    }
}

impl<T: FloatT> MatrixVectorMultiply for CscMatrix<T> {
    type T = T;

    fn gemv(&self, y: &mut [T], x: &[T], a: T, b: T) {
        assert_eq!(x.len(), self.n);
        assert_eq!(y.len(), self.m);

        //first do the b*y part
        if b == T::zero() {
            y.fill(T::zero());
        } else if b != T::one() {
            y.scale(b);
        }

        // if a is zero, we're done
        if a == T::zero() {
            return;
        }

        //y += a*A*x
        for (j, &xj) in x.iter().enumerate() {
            for i in self.colptr[j]..self.colptr[j + 1] {
                y[self.rowval[i]] += a * self.nzval[i] * xj;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_triplets_sums_duplicates() {
        let triplets = vec![(1, 0, 2.0), (0, 0, 1.0), (1, 0, 3.0), (0, 2, -1.0)];
        let A = CscMatrix::<f64>::new_from_triplets(2, 3, triplets).unwrap();

        assert_eq!(A.colptr, vec![0, 2, 2, 3]);
        assert_eq!(A.rowval, vec![0, 1, 0]);
        assert_eq!(A.nzval, vec![1.0, 5.0, -1.0]);
        assert_eq!(A.get_entry((1, 0)), Some(5.0));
        assert_eq!(A.get_entry((1, 1)), Some(0.0));
        assert_eq!(A.get_entry((2, 0)), None);
    }

    #[test]
    fn test_from_triplets_out_of_bounds() {
        let triplets = vec![(2, 0, 1.0)];
        let result = CscMatrix::<f64>::new_from_triplets(2, 2, triplets);
        assert_eq!(result, Err(SparseFormatError::IncompatibleDimension));
    }

    #[test]
    fn test_check_format_bad_ordering() {
        let A = CscMatrix::new(2, 1, vec![0, 2], vec![1, 0], vec![1.0, 2.0]);
        assert_eq!(A.check_format(), Err(SparseFormatError::BadRowOrdering));
    }

    #[test]
    fn test_gemv() {
        let A = CscMatrix::new(
            3,
            3,
            vec![0, 2, 4, 7],
            vec![0, 1, 0, 2, 0, 1, 2],
            vec![1., 2., 3., 4., 5., 6., 7.],
        );
        let x = [1., 1., 1.];
        let mut y = [1., 1., 1.];
        A.gemv(&mut y, &x, 2., -1.);
        assert_eq!(y, [17., 15., 21.]);
    }
}
