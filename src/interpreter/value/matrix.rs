use std::fmt;

use crate::{error::RuntimeError, interpreter::value::core::EvalResult};

/// A dense `rows x columns` matrix of numbers stored row by row.
///
/// Both dimensions are at least 1. A vector is a matrix with one column.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows:    usize,
    columns: usize,
    cells:   Vec<f64>,
}

impl Matrix {
    /// Creates a matrix from `rows * columns` values given row by row.
    ///
    /// # Errors
    /// - `InvalidDimensions` if either dimension is 0 or the cell count does
    ///   not fit in a `usize`.
    /// - `DimensionMismatch` if the number of values does not fill the
    ///   matrix exactly.
    ///
    /// # Example
    /// ```
    /// use minimatica::interpreter::value::matrix::Matrix;
    ///
    /// let m = Matrix::from_row_major(2, 2, vec![1.0, 2.0, 3.0, 4.0], 1).unwrap();
    /// assert_eq!(m.get(1, 0), Some(3.0));
    /// assert!(Matrix::from_row_major(2, 2, vec![1.0], 1).is_err());
    /// assert!(Matrix::from_row_major(usize::MAX, 2, vec![], 1).is_err());
    /// ```
    pub fn from_row_major(rows: usize,
                          columns: usize,
                          cells: Vec<f64>,
                          line: usize)
                          -> EvalResult<Self> {
        if rows == 0 || columns == 0 {
            return Err(RuntimeError::InvalidDimensions { details: format!("a matrix needs at least one row and one column, found {rows}x{columns}"),
                                                         line });
        }
        let Some(size) = rows.checked_mul(columns) else {
            return Err(RuntimeError::InvalidDimensions { details: format!("a {rows}x{columns} matrix is too large"),
                                                         line });
        };
        if cells.len() != size {
            return Err(RuntimeError::DimensionMismatch { details: format!("can not initialize a {rows}x{columns} matrix with {} values",
                                                                          cells.len()),
                                                         line });
        }
        Ok(Self { rows,
                  columns,
                  cells })
    }

    /// Creates the `size x size` identity matrix.
    #[must_use]
    pub fn identity(size: usize) -> Self {
        let cells = (0..size * size).map(|i| if i / size == i % size { 1.0 } else { 0.0 })
                                    .collect();
        Self { rows: size,
               columns: size,
               cells }
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Returns `true` for single-column matrices.
    #[must_use]
    pub const fn is_vector(&self) -> bool {
        self.columns == 1
    }

    /// The cell at `row`, `column` (both 0-based), or `None` outside the
    /// matrix.
    #[must_use]
    pub fn get(&self, row: usize, column: usize) -> Option<f64> {
        if row >= self.rows || column >= self.columns {
            return None;
        }
        Some(self.cell(row, column))
    }

    fn cell(&self, row: usize, column: usize) -> f64 {
        self.cells[row * self.columns + column]
    }

    /// The cells of one row.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        &self.cells[row * self.columns..(row + 1) * self.columns]
    }

    /// Applies `op` to every cell.
    #[must_use]
    pub fn map(&self, op: impl Fn(f64) -> f64) -> Self {
        Self { rows:    self.rows,
               columns: self.columns,
               cells:   self.cells.iter().map(|c| op(*c)).collect(), }
    }

    /// Multiplies every cell by `factor`.
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        self.map(|c| c * factor)
    }

    /// Cell-wise sum of two equally shaped matrices.
    pub fn add(&self, other: &Self, line: usize) -> EvalResult<Self> {
        self.zip_with(other, "add", line, |a, b| a + b)
    }

    /// Cell-wise difference of two equally shaped matrices.
    pub fn subtract(&self, other: &Self, line: usize) -> EvalResult<Self> {
        self.zip_with(other, "subtract", line, |a, b| a - b)
    }

    /// Matrix product.
    ///
    /// Requires `self.columns() == other.rows()`; the result has
    /// `self.rows()` rows and `other.columns()` columns.
    ///
    /// # Example
    /// ```
    /// use minimatica::interpreter::value::matrix::Matrix;
    ///
    /// let a = Matrix::from_row_major(1, 2, vec![1.0, 2.0], 1).unwrap();
    /// let b = Matrix::from_row_major(2, 1, vec![3.0, 4.0], 1).unwrap();
    /// let product = a.multiply(&b, 1).unwrap();
    /// assert_eq!((product.rows(), product.columns()), (1, 1));
    /// assert_eq!(product.get(0, 0), Some(11.0));
    /// ```
    pub fn multiply(&self, other: &Self, line: usize) -> EvalResult<Self> {
        if self.columns != other.rows {
            return Err(RuntimeError::DimensionMismatch { details: format!("you can not multiply a mat<{},{}> with a mat<{},{}>",
                                                                          self.rows,
                                                                          self.columns,
                                                                          other.rows,
                                                                          other.columns),
                                                         line });
        }

        let mut cells = Vec::with_capacity(self.rows * other.columns);
        for row in 0..self.rows {
            for column in 0..other.columns {
                let sum = (0..self.columns).map(|i| self.cell(row, i) * other.cell(i, column))
                                           .sum();
                cells.push(sum);
            }
        }

        Ok(Self { rows: self.rows,
                  columns: other.columns,
                  cells })
    }

    /// Raises a square matrix to a whole power by repeated squaring; the 0th
    /// power is the identity.
    pub fn pow(&self, exponent: usize, line: usize) -> EvalResult<Self> {
        if self.rows != self.columns {
            return Err(RuntimeError::DimensionMismatch { details: format!("only square matrices can be raised to a power, found mat<{},{}>",
                                                                          self.rows, self.columns),
                                                         line });
        }

        let mut result = Self::identity(self.rows);
        let mut base = self.clone();
        let mut remaining = exponent;
        while remaining > 0 {
            if remaining & 1 == 1 {
                result = result.multiply(&base, line)?;
            }
            remaining >>= 1;
            if remaining > 0 {
                base = base.multiply(&base, line)?;
            }
        }
        Ok(result)
    }

    fn zip_with(&self,
                other: &Self,
                operation: &str,
                line: usize,
                op: impl Fn(f64, f64) -> f64)
                -> EvalResult<Self> {
        if self.rows != other.rows || self.columns != other.columns {
            return Err(RuntimeError::DimensionMismatch { details: format!("can not {operation} a mat<{},{}> and a mat<{},{}>",
                                                                          self.rows,
                                                                          self.columns,
                                                                          other.rows,
                                                                          other.columns),
                                                         line });
        }
        Ok(Self { rows:    self.rows,
                  columns: self.columns,
                  cells:   self.cells
                               .iter()
                               .zip(&other.cells)
                               .map(|(a, b)| op(*a, *b))
                               .collect(), })
    }
}

impl fmt::Display for Matrix {
    /// Writes one `|`-bracketed line per row with cells fixed to two
    /// decimals. Non-negative cells get a leading space so signs line up.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows {
            if row > 0 {
                f.write_str("\n")?;
            }
            f.write_str("|")?;
            for (column, value) in self.row(row).iter().enumerate() {
                if column > 0 {
                    f.write_str(", ")?;
                }
                if *value >= 0.0 {
                    f.write_str(" ")?;
                }
                write!(f, "{value:.2}")?;
            }
            f.write_str("|")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mat(rows: usize, columns: usize, cells: &[f64]) -> Matrix {
        Matrix::from_row_major(rows, columns, cells.to_vec(), 1).unwrap()
    }

    #[test]
    fn identity_is_neutral() {
        let m = mat(2, 2, &[3.0, -2.0, 5.0, 1.0]);
        assert_eq!(mat(2, 2, &[1.0, 0.0, 0.0, 1.0]).multiply(&m, 1).unwrap(), m);
        assert_eq!(m.multiply(&Matrix::identity(2), 1).unwrap(), m);
    }

    #[test]
    fn product_of_rectangular_matrices() {
        let a = mat(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let b = mat(3, 2, &[7.0, 8.0, 9.0, 10.0, 11.0, 12.0]);
        assert_eq!(a.multiply(&b, 1).unwrap(), mat(2, 2, &[58.0, 64.0, 139.0, 154.0]));

        let v = mat(3, 1, &[1.0, 0.0, -1.0]);
        let product = a.multiply(&v, 1).unwrap();
        assert!(product.is_vector());
        assert_eq!(product, mat(2, 1, &[-2.0, -2.0]));
    }

    #[test]
    fn incompatible_product_is_a_dimension_mismatch() {
        let a = mat(2, 3, &[0.0; 6]);
        let err = a.multiply(&a, 4).unwrap_err();
        assert!(matches!(err, RuntimeError::DimensionMismatch { line: 4, .. }));
    }

    #[test]
    fn construction_checks_shape() {
        assert!(matches!(Matrix::from_row_major(0, 2, vec![], 1),
                         Err(RuntimeError::InvalidDimensions { .. })));
        assert!(matches!(Matrix::from_row_major(2, 2, vec![1.0; 3], 1),
                         Err(RuntimeError::DimensionMismatch { .. })));
        assert!(matches!(Matrix::from_row_major(1 << 32, 1 << 32, vec![], 1),
                         Err(RuntimeError::InvalidDimensions { .. })));
    }

    #[test]
    fn get_is_bounds_checked() {
        let m = mat(1, 2, &[1.0, 2.0]);
        assert_eq!(m.get(0, 1), Some(2.0));
        assert_eq!(m.get(1, 0), None);
        assert_eq!(m.get(0, 2), None);
    }

    #[test]
    fn powers_of_square_matrices() {
        let m = mat(2, 2, &[1.0, 1.0, 0.0, 1.0]);
        assert_eq!(m.pow(3, 1).unwrap(), mat(2, 2, &[1.0, 3.0, 0.0, 1.0]));
        assert_eq!(m.pow(0, 1).unwrap(), Matrix::identity(2));
        assert!(mat(1, 2, &[1.0, 2.0]).pow(2, 1).is_err());

        let doubling = mat(1, 1, &[2.0]);
        assert_eq!(doubling.pow(10, 1).unwrap(), mat(1, 1, &[1024.0]));
        assert_eq!(doubling.pow(usize::MAX, 1).unwrap(), mat(1, 1, &[f64::INFINITY]));
    }

    #[test]
    fn cellwise_arithmetic() {
        let a = mat(1, 2, &[1.0, 2.0]);
        let b = mat(1, 2, &[0.5, -2.0]);
        assert_eq!(a.add(&b, 1).unwrap(), mat(1, 2, &[1.5, 0.0]));
        assert_eq!(a.subtract(&b, 1).unwrap(), mat(1, 2, &[0.5, 4.0]));
        assert_eq!(a.scale(2.0), mat(1, 2, &[2.0, 4.0]));
        assert!(a.add(&mat(2, 1, &[1.0, 2.0]), 1).is_err());
    }

    #[test]
    fn display_aligns_signs() {
        let m = mat(2, 2, &[1.0, -2.5, 0.0, 10.0]);
        assert_eq!(m.to_string(), "| 1.00, -2.50|\n| 0.00,  10.00|");
    }
}
