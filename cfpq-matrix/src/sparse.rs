//! The sparse boolean matrix type.

use bit_vec::BitVec;

/// A boolean matrix of fixed shape, stored as sorted adjacency lists
/// of column indices, one list per row.
///
/// The layout favors row-wise scans, which is what the BFS engine and
/// the boolean product need. Writes through [`fn set`] keep each row
/// sorted and duplicate-free, so `nnz` is exact at all times.
///
/// [`fn set`]: SparseBitMatrix::set
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SparseBitMatrix {
    nrows: usize,
    ncols: usize,
    rows: Vec<Vec<usize>>,
    nnz: usize,
}

impl SparseBitMatrix {
    /// Creates a zero matrix of the given shape.
    pub fn new(nrows: usize, ncols: usize) -> Self {
        SparseBitMatrix {
            nrows,
            ncols,
            rows: vec![vec![]; nrows],
            nnz: 0,
        }
    }

    /// Returns the shape as a `(rows, columns)` pair.
    pub fn size(&self) -> (usize, usize) {
        (self.nrows, self.ncols)
    }

    /// Returns the number of rows.
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Returns the number of columns.
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Returns the exact number of set bits.
    pub fn nnz(&self) -> usize {
        self.nnz
    }

    /// Checks whether no bit is set.
    pub fn is_zero(&self) -> bool {
        self.nnz == 0
    }

    /// Sets or clears the bit at the given position.
    ///
    /// # Panics
    ///
    /// Panics if the position is out of shape.
    pub fn set(&mut self, row: usize, col: usize, value: bool) {
        assert!(row < self.nrows && col < self.ncols, "position out of shape");
        let row = &mut self.rows[row];
        match row.binary_search(&col) {
            Ok(pos) => {
                if !value {
                    row.remove(pos);
                    self.nnz -= 1;
                }
            }
            Err(pos) => {
                if value {
                    row.insert(pos, col);
                    self.nnz += 1;
                }
            }
        }
    }

    /// Reads the bit at the given position. Out-of-shape positions
    /// read as unset.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.rows
            .get(row)
            .map_or(false, |cols| cols.binary_search(&col).is_ok())
    }

    /// Returns the sorted column indices of one row.
    pub fn row(&self, row: usize) -> &[usize] {
        &self.rows[row]
    }

    /// Iterates over set bits as `(row, column)` pairs, in row-major
    /// order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(i, cols)| cols.iter().map(move |&j| (i, j)))
    }

    /// ORs another matrix of the same shape into this one.
    ///
    /// # Panics
    ///
    /// Panics on a shape mismatch.
    pub fn or_assign(&mut self, other: &Self) {
        assert_eq!(self.size(), other.size(), "shape mismatch");
        for (dst, src) in self.rows.iter_mut().zip(other.rows.iter()) {
            if src.is_empty() {
                continue;
            }
            let merged = merge_sorted(dst, src);
            self.nnz += merged.len() - dst.len();
            *dst = merged;
        }
    }

    /// ORs a sorted list of column indices into one row.
    pub fn or_row(&mut self, row: usize, cols: &[usize]) {
        if cols.is_empty() {
            return;
        }
        debug_assert!(cols.windows(2).all(|w| w[0] < w[1]));
        debug_assert!(*cols.last().unwrap() < self.ncols);
        let dst = &mut self.rows[row];
        let merged = merge_sorted(dst, cols);
        self.nnz += merged.len() - dst.len();
        *dst = merged;
    }

    /// Returns the bits set in `self` but not in `other`. This is the
    /// "new bits" comparison the BFS frontier uses.
    ///
    /// # Panics
    ///
    /// Panics on a shape mismatch.
    pub fn minus(&self, other: &Self) -> Self {
        assert_eq!(self.size(), other.size(), "shape mismatch");
        let mut result = SparseBitMatrix::new(self.nrows, self.ncols);
        for (i, (lhs, rhs)) in self.rows.iter().zip(other.rows.iter()).enumerate() {
            let kept: Vec<usize> = lhs
                .iter()
                .copied()
                .filter(|col| rhs.binary_search(col).is_err())
                .collect();
            result.nnz += kept.len();
            result.rows[i] = kept;
        }
        result
    }

    /// Boolean matrix product: `(r, c) · (c, c') → (r, c')`.
    ///
    /// # Panics
    ///
    /// Panics if the inner dimensions disagree.
    pub fn matmul(&self, rhs: &Self) -> Self {
        assert_eq!(self.ncols, rhs.nrows, "inner dimension mismatch");
        let mut result = SparseBitMatrix::new(self.nrows, rhs.ncols);
        let mut marker = BitVec::from_elem(rhs.ncols, false);
        for (i, cols) in self.rows.iter().enumerate() {
            let mut out = vec![];
            for &j in cols {
                for &k in rhs.row(j) {
                    if !marker[k] {
                        marker.set(k, true);
                        out.push(k);
                    }
                }
            }
            for &k in &out {
                marker.set(k, false);
            }
            out.sort_unstable();
            result.nnz += out.len();
            result.rows[i] = out;
        }
        result
    }

    /// Kronecker product: `(r₁, c₁) ⊗ (r₂, c₂) → (r₁·r₂, c₁·c₂)`.
    ///
    /// Bit `(i, j)` of `self` and bit `(k, l)` of `rhs` produce bit
    /// `(i·r₂ + k, j·c₂ + l)` of the result.
    pub fn kronecker(&self, rhs: &Self) -> Self {
        let mut result = SparseBitMatrix::new(self.nrows * rhs.nrows, self.ncols * rhs.ncols);
        for (i, cols) in self.rows.iter().enumerate() {
            if cols.is_empty() {
                continue;
            }
            for (k, rhs_cols) in rhs.rows.iter().enumerate() {
                if rhs_cols.is_empty() {
                    continue;
                }
                let out = &mut result.rows[i * rhs.nrows + k];
                for &j in cols {
                    out.extend(rhs_cols.iter().map(|&l| j * rhs.ncols + l));
                }
                result.nnz += out.len();
            }
        }
        result
    }
}

fn merge_sorted(lhs: &[usize], rhs: &[usize]) -> Vec<usize> {
    let mut merged = Vec::with_capacity(lhs.len() + rhs.len());
    let (mut i, mut j) = (0, 0);
    while i < lhs.len() && j < rhs.len() {
        match lhs[i].cmp(&rhs[j]) {
            std::cmp::Ordering::Less => {
                merged.push(lhs[i]);
                i += 1;
            }
            std::cmp::Ordering::Greater => {
                merged.push(rhs[j]);
                j += 1;
            }
            std::cmp::Ordering::Equal => {
                merged.push(lhs[i]);
                i += 1;
                j += 1;
            }
        }
    }
    merged.extend_from_slice(&lhs[i..]);
    merged.extend_from_slice(&rhs[j..]);
    merged
}

#[cfg(test)]
mod tests {
    use super::SparseBitMatrix;

    fn from_bits(nrows: usize, ncols: usize, bits: &[(usize, usize)]) -> SparseBitMatrix {
        let mut matrix = SparseBitMatrix::new(nrows, ncols);
        for &(i, j) in bits {
            matrix.set(i, j, true);
        }
        matrix
    }

    #[test]
    fn set_get_nnz() {
        let mut matrix = SparseBitMatrix::new(3, 4);
        assert!(matrix.is_zero());
        matrix.set(0, 3, true);
        matrix.set(2, 1, true);
        matrix.set(0, 3, true);
        assert_eq!(matrix.nnz(), 2);
        assert!(matrix.get(0, 3));
        assert!(!matrix.get(3, 0));
        matrix.set(0, 3, false);
        assert_eq!(matrix.nnz(), 1);
        assert!(!matrix.get(0, 3));
    }

    #[test]
    fn iteration_is_row_major() {
        let matrix = from_bits(3, 3, &[(2, 0), (0, 2), (0, 1)]);
        let bits: Vec<_> = matrix.iter().collect();
        assert_eq!(bits, vec![(0, 1), (0, 2), (2, 0)]);
    }

    #[test]
    fn or_assign_collapses_duplicates() {
        let mut lhs = from_bits(2, 2, &[(0, 0), (1, 1)]);
        let rhs = from_bits(2, 2, &[(0, 0), (0, 1)]);
        lhs.or_assign(&rhs);
        assert_eq!(lhs, from_bits(2, 2, &[(0, 0), (0, 1), (1, 1)]));
    }

    #[test]
    fn minus_keeps_new_bits_only() {
        let lhs = from_bits(2, 2, &[(0, 0), (0, 1), (1, 0)]);
        let rhs = from_bits(2, 2, &[(0, 0), (1, 1)]);
        assert_eq!(lhs.minus(&rhs), from_bits(2, 2, &[(0, 1), (1, 0)]));
    }

    #[test]
    fn matmul_is_boolean() {
        // 0 → 1 → 2 composed with itself reaches 0 → 2.
        let step = from_bits(3, 3, &[(0, 1), (1, 2)]);
        assert_eq!(step.matmul(&step), from_bits(3, 3, &[(0, 2)]));
    }

    #[test]
    fn matmul_rectangular() {
        let front = from_bits(2, 3, &[(0, 0), (1, 2)]);
        let step = from_bits(3, 3, &[(0, 1), (2, 0), (2, 1)]);
        assert_eq!(
            front.matmul(&step),
            from_bits(2, 3, &[(0, 1), (1, 0), (1, 1)])
        );
    }

    #[test]
    fn kronecker_product() {
        let lhs = from_bits(2, 2, &[(0, 1)]);
        let rhs = from_bits(2, 2, &[(1, 0), (1, 1)]);
        let product = lhs.kronecker(&rhs);
        assert_eq!(product.size(), (4, 4));
        assert_eq!(product, from_bits(4, 4, &[(1, 2), (1, 3)]));
    }

    #[test]
    fn kronecker_index_is_bijective() {
        let lhs = from_bits(2, 2, &[(0, 0), (0, 1), (1, 0)]);
        let rhs = from_bits(3, 3, &[(1, 2), (2, 0)]);
        let product = lhs.kronecker(&rhs);
        assert_eq!(product.nnz(), lhs.nnz() * rhs.nnz());
        for (i, j) in lhs.iter() {
            for (k, l) in rhs.iter() {
                assert!(product.get(i * 3 + k, j * 3 + l));
            }
        }
    }
}
