use std::fmt;

use crate::{
    error::RuntimeError,
    interpreter::value::core::EvalResult,
    util::num::{MAX_DEGREE, usize_to_f64},
};

/// A polynomial in one variable.
///
/// Coefficient `i` belongs to `x^i`, so `[1, -2, 3]` represents
/// `3x^2 - 2x + 1`. There is always at least one coefficient; trailing zeros
/// are kept as they were built. Operations that grow a polynomial refuse to
/// go past [`MAX_DEGREE`].
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    coefficients: Vec<f64>,
}

impl Function {
    /// Creates a polynomial from coefficients ordered by ascending power.
    ///
    /// An empty sequence becomes the zero polynomial.
    #[must_use]
    pub fn new(coefficients: Vec<f64>) -> Self {
        if coefficients.is_empty() {
            return Self::constant(0.0);
        }
        Self { coefficients }
    }

    /// Creates the polynomial `f(x) = value`.
    #[must_use]
    pub fn constant(value: f64) -> Self {
        Self { coefficients: vec![value] }
    }

    /// The coefficients, indexed by power of `x`.
    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// The highest power with a non-zero coefficient, or 0 for the zero
    /// polynomial.
    #[must_use]
    pub fn degree(&self) -> usize {
        self.coefficients.iter().rposition(|c| *c != 0.0).unwrap_or(0)
    }

    /// Evaluates `sum(c_i * x^i)`.
    ///
    /// # Example
    /// ```
    /// use minimatica::interpreter::value::function::Function;
    ///
    /// let f = Function::new(vec![1.0, -2.0, 3.0]);
    /// assert_eq!(f.apply(2.0), 9.0);
    /// ```
    #[must_use]
    pub fn apply(&self, x: f64) -> f64 {
        self.coefficients.iter().rev().fold(0.0, |acc, c| acc.mul_add(x, *c))
    }

    /// Returns the derivative.
    ///
    /// Every coefficient is multiplied by its power and the constant slot is
    /// dropped. The derivative of a constant is the zero polynomial.
    #[must_use]
    pub fn derive(&self) -> Self {
        let derived = self.coefficients
                          .iter()
                          .enumerate()
                          .skip(1)
                          .map(|(power, c)| c * usize_to_f64(power))
                          .collect();
        Self::new(derived)
    }

    /// Returns the antiderivative whose constant term is 0.
    ///
    /// # Errors
    /// `DegreeLimit` if the result would exceed [`MAX_DEGREE`].
    pub fn integrate(&self, line: usize) -> EvalResult<Self> {
        check_degree(self.coefficients.len(), line)?;
        let integrated = std::iter::once(0.0).chain(self.coefficients
                                                        .iter()
                                                        .enumerate()
                                                        .map(|(power, c)| {
                                                            c / usize_to_f64(power + 1)
                                                        }))
                                             .collect();
        Ok(Self::new(integrated))
    }

    /// Returns `self + other`.
    #[must_use]
    pub fn add(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a + b)
    }

    /// Returns `self - other`.
    #[must_use]
    pub fn subtract(&self, other: &Self) -> Self {
        self.zip_with(other, |a, b| a - b)
    }

    /// Returns `self + value`, changing only the constant term.
    #[must_use]
    pub fn add_constant(&self, value: f64) -> Self {
        let mut coefficients = self.coefficients.clone();
        coefficients[0] += value;
        Self { coefficients }
    }

    /// Multiplies every coefficient by `factor`.
    #[must_use]
    pub fn scale(&self, factor: f64) -> Self {
        Self { coefficients: self.coefficients.iter().map(|c| c * factor).collect() }
    }

    /// Returns the polynomial product `self * other`.
    ///
    /// # Errors
    /// `DegreeLimit` if the product would exceed [`MAX_DEGREE`].
    pub fn multiply(&self, other: &Self, line: usize) -> EvalResult<Self> {
        let len = self.coefficients.len() + other.coefficients.len() - 1;
        check_degree(len - 1, line)?;

        let mut product = vec![0.0; len];
        for (i, a) in self.coefficients.iter().enumerate() {
            for (j, b) in other.coefficients.iter().enumerate() {
                product[i + j] += a * b;
            }
        }
        Ok(Self { coefficients: product })
    }

    /// Raises the polynomial to a whole power by repeated squaring; `f^0` is
    /// `1`.
    ///
    /// # Errors
    /// `DegreeLimit` if the result would exceed [`MAX_DEGREE`].
    ///
    /// # Example
    /// ```
    /// use minimatica::interpreter::value::function::Function;
    ///
    /// let f = Function::new(vec![1.0, 1.0]);
    /// assert_eq!(f.pow(2, 1).unwrap().to_string(), "f(x)=+x^2+2x+1");
    /// assert!(f.pow(1 << 40, 1).is_err());
    /// ```
    pub fn pow(&self, exponent: usize, line: usize) -> EvalResult<Self> {
        let degree = (self.coefficients.len() - 1).checked_mul(exponent).unwrap_or(usize::MAX);
        check_degree(degree, line)?;

        let mut result = Self::constant(1.0);
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

    fn zip_with(&self, other: &Self, op: impl Fn(f64, f64) -> f64) -> Self {
        let len = self.coefficients.len().max(other.coefficients.len());
        let coefficients = (0..len).map(|i| {
                                       op(self.coefficients.get(i).copied().unwrap_or(0.0),
                                          other.coefficients.get(i).copied().unwrap_or(0.0))
                                   })
                                   .collect();
        Self { coefficients }
    }
}

fn check_degree(degree: usize, line: usize) -> EvalResult<()> {
    if degree > MAX_DEGREE {
        return Err(RuntimeError::DegreeLimit { degree, line });
    }
    Ok(())
}

/// Formats a coefficient magnitude: whole numbers as they are, anything else
/// to at most two decimals.
fn format_magnitude(magnitude: f64) -> String {
    if magnitude.trunc() == magnitude {
        return format!("{magnitude}");
    }
    let fixed = format!("{magnitude:.2}");
    fixed.trim_end_matches('0').trim_end_matches('.').to_string()
}

impl fmt::Display for Function {
    /// Writes the canonical form, e.g. `f(x)=+3x^2-2x+1`.
    ///
    /// Terms run from the highest power down; zero terms are left out, every
    /// term carries its sign and a magnitude of 1 is only written for the
    /// constant term.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("f(x)=")?;

        if self.coefficients.iter().all(|c| *c == 0.0) {
            return f.write_str("0");
        }

        for (power, &coefficient) in self.coefficients.iter().enumerate().rev() {
            if coefficient == 0.0 {
                continue;
            }

            f.write_str(if coefficient < 0.0 { "-" } else { "+" })?;

            let magnitude = coefficient.abs();
            if magnitude != 1.0 || power == 0 {
                f.write_str(&format_magnitude(magnitude))?;
            }

            match power {
                0 => {},
                1 => f.write_str("x")?,
                _ => write!(f, "x^{power}")?,
            }
        }

        Ok(())
    }
}
