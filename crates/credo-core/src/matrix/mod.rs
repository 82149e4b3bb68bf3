//! Dense widest-path matrices
//!
//! Weighted credibility statements live in an adjacency matrix where
//! `adjacency[i][j]` is the accumulated support for "`i` is less credible
//! than `j`". The strongest-path matrix holds, for every pair, the best
//! bottleneck over all walks `i → j`: the maximum over walks of the minimum
//! edge weight.
//!
//! # Example
//!
//! ```rust
//! use credo_core::matrix::{closure, Matrix};
//!
//! let adjacency = Matrix::from_rows(vec![
//!     vec![0.0, 2.0, 0.0],
//!     vec![0.0, 0.0, 1.0],
//!     vec![0.0, 0.0, 0.0],
//! ])
//! .unwrap();
//! assert_eq!(closure(&adjacency)[(0, 2)], 1.0);
//! ```

mod engine;

pub use engine::{MatrixConfig, MatrixEngine, Revision, RevisionSummary};

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::error::{Result, RevisionError};

/// Square matrix of `f64`, stored row-major.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Vec<f64>>", into = "Vec<Vec<f64>>")]
pub struct Matrix {
    size: usize,
    cells: Vec<f64>,
}

impl Matrix {
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            cells: vec![0.0; size * size],
        }
    }

    /// Build from rows, all of which must have `rows.len()` columns.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut cells = Vec::with_capacity(size * size);
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != size {
                return Err(RevisionError::NotSquare {
                    row,
                    len: values.len(),
                    expected: size,
                });
            }
            cells.extend(values);
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn get(&self, row: usize, col: usize) -> Result<f64> {
        self.check(row)?;
        self.check(col)?;
        Ok(self[(row, col)])
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) -> Result<()> {
        self.check(row)?;
        self.check(col)?;
        self[(row, col)] = value;
        Ok(())
    }

    pub fn rows(&self) -> impl Iterator<Item = &[f64]> {
        // chunks(0) panics; an empty matrix has no rows anyway
        self.cells.chunks(self.size.max(1))
    }

    /// Grow to `size` rows, keeping existing entries. Never shrinks.
    pub fn grow(&mut self, size: usize) {
        if size <= self.size {
            return;
        }
        let mut cells = vec![0.0; size * size];
        for (row, values) in self.rows().enumerate() {
            cells[row * size..row * size + self.size].copy_from_slice(values);
        }
        self.size = size;
        self.cells = cells;
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.size {
            Ok(())
        } else {
            Err(RevisionError::IndexOutOfRange {
                index,
                size: self.size,
            })
        }
    }
}

impl Index<(usize, usize)> for Matrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &f64 {
        &self.cells[row * self.size + col]
    }
}

impl IndexMut<(usize, usize)> for Matrix {
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f64 {
        &mut self.cells[row * self.size + col]
    }
}

impl TryFrom<Vec<Vec<f64>>> for Matrix {
    type Error = RevisionError;

    fn try_from(rows: Vec<Vec<f64>>) -> Result<Self> {
        Self::from_rows(rows)
    }
}

impl From<Matrix> for Vec<Vec<f64>> {
    fn from(matrix: Matrix) -> Self {
        matrix.rows().map(<[f64]>::to_vec).collect()
    }
}

/// Strongest-path closure of an adjacency matrix (max-min Floyd-Warshall).
pub fn closure(adjacency: &Matrix) -> Matrix {
    let n = adjacency.size();
    let mut widest = adjacency.clone();
    for k in 0..n {
        for i in 0..n {
            let into_k = widest[(i, k)];
            if into_k <= 0.0 {
                continue;
            }
            for j in 0..n {
                let candidate = into_k.min(widest[(k, j)]);
                if candidate > widest[(i, j)] {
                    widest[(i, j)] = candidate;
                }
            }
        }
    }
    widest
}
