//! Boolean matrices over the (or, and) semiring.
//!
//! Rows are stored as bit sets, so a matrix costs memory proportional to the
//! number of rows plus the highest set column per row. Dimensions are fixed at
//! construction; every binary operation asserts compatible shapes, since a
//! mismatch can only come from a bug in the caller.

use bit_set::BitSet;
use std::fmt;
use std::ops::BitOrAssign;

/// A `rows x cols` boolean matrix.
#[derive(Clone, PartialEq, Eq)]
pub struct BoolMatrix {
    rows: Vec<BitSet>,
    cols: usize,
}

impl BoolMatrix {
    /// Create an all-false matrix.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: (0..rows).map(|_| BitSet::with_capacity(cols)).collect(),
            cols,
        }
    }

    /// Create an all-false `n x n` matrix.
    pub fn square(n: usize) -> Self {
        Self::new(n, n)
    }

    /// Create the `n x n` identity matrix.
    pub fn identity(n: usize) -> Self {
        let mut m = Self::square(n);
        for i in 0..n {
            m.rows[i].insert(i);
        }
        m
    }

    /// Build a matrix from a list of coordinates.
    pub fn from_coords(
        rows: usize,
        cols: usize,
        coords: impl IntoIterator<Item = (usize, usize)>,
    ) -> Self {
        let mut m = Self::new(rows, cols);
        for (i, j) in coords {
            m.set(i, j);
        }
        m
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows.len() == self.cols
    }

    /// Set bit `(row, col)`. Returns true if the bit was previously unset.
    pub fn set(&mut self, row: usize, col: usize) -> bool {
        assert!(
            row < self.rows.len() && col < self.cols,
            "bit ({row}, {col}) out of bounds for {}x{} matrix",
            self.rows.len(),
            self.cols
        );
        self.rows[row].insert(col)
    }

    /// Read bit `(row, col)`. Out-of-range coordinates read as false.
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.rows.get(row).is_some_and(|r| r.contains(col))
    }

    /// The set of columns that are true in `row`.
    pub fn row(&self, row: usize) -> &BitSet {
        &self.rows[row]
    }

    /// Number of true bits.
    pub fn nnz(&self) -> usize {
        self.rows.iter().map(BitSet::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.iter().all(BitSet::is_empty)
    }

    /// Iterate over the coordinates of true bits in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.rows
            .iter()
            .enumerate()
            .flat_map(|(i, row)| row.iter().map(move |j| (i, j)))
    }

    /// Boolean matrix product `self · rhs`.
    pub fn mul(&self, rhs: &BoolMatrix) -> BoolMatrix {
        assert_eq!(
            self.cols,
            rhs.n_rows(),
            "cannot multiply {}x{} by {}x{}",
            self.n_rows(),
            self.cols,
            rhs.n_rows(),
            rhs.cols
        );
        let mut out = BoolMatrix::new(self.n_rows(), rhs.cols);
        for (i, row) in self.rows.iter().enumerate() {
            let target = &mut out.rows[i];
            for k in row.iter() {
                target.union_with(&rhs.rows[k]);
            }
        }
        out
    }

    /// Kronecker product `self ⊗ rhs`.
    ///
    /// Bit `(i1 * rhs.rows + i2, j1 * rhs.cols + j2)` is set iff `self[i1][j1]`
    /// and `rhs[i2][j2]` are both set.
    pub fn kron(&self, rhs: &BoolMatrix) -> BoolMatrix {
        let (rr, rc) = (rhs.n_rows(), rhs.cols);
        let mut out = BoolMatrix::new(self.n_rows() * rr, self.cols * rc);
        for (i1, j1) in self.iter() {
            for (i2, row) in rhs.rows.iter().enumerate() {
                let target = &mut out.rows[i1 * rr + i2];
                for j2 in row.iter() {
                    target.insert(j1 * rc + j2);
                }
            }
        }
        out
    }

    /// Block-diagonal combination `[[a, 0], [0, b]]`.
    pub fn block_diag(a: &BoolMatrix, b: &BoolMatrix) -> BoolMatrix {
        let mut out = BoolMatrix::new(a.n_rows() + b.n_rows(), a.cols + b.cols);
        for (i, j) in a.iter() {
            out.rows[i].insert(j);
        }
        let (row_offset, col_offset) = (a.n_rows(), a.cols);
        for (i, j) in b.iter() {
            out.rows[row_offset + i].insert(col_offset + j);
        }
        out
    }

    /// Close the matrix under composition by iterated squaring:
    /// `C <- C | C·C` until the number of true bits stops changing.
    ///
    /// This is the transitive (not reflexive) closure: a diagonal bit is only
    /// set when a cycle passes through that index. Returns the number of
    /// squarings performed, including the final one that observed no change.
    pub fn transitive_closure(&mut self) -> usize {
        assert!(
            self.is_square(),
            "closure of non-square {}x{} matrix",
            self.n_rows(),
            self.cols
        );
        let mut iterations = 0;
        loop {
            let before = self.nnz();
            let squared = self.mul(self);
            *self |= &squared;
            iterations += 1;
            let after = self.nnz();
            log::trace!("closure iteration {}: {} -> {} nonzero", iterations, before, after);
            if after == before {
                return iterations;
            }
        }
    }
}

impl BitOrAssign<&BoolMatrix> for BoolMatrix {
    fn bitor_assign(&mut self, rhs: &BoolMatrix) {
        assert!(
            self.n_rows() == rhs.n_rows() && self.cols == rhs.cols,
            "cannot OR {}x{} with {}x{}",
            self.n_rows(),
            self.cols,
            rhs.n_rows(),
            rhs.cols
        );
        for (row, other) in self.rows.iter_mut().zip(&rhs.rows) {
            row.union_with(other);
        }
    }
}

impl fmt::Debug for BoolMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoolMatrix")
            .field("shape", &(self.n_rows(), self.cols))
            .field("nonzero", &self.iter().collect::<Vec<_>>())
            .finish()
    }
}
