//! General cubic root finding.
//!
//! Roots are the eigenvalues of the companion matrix, so complex pairs come
//! out alongside real roots the same way a polynomial-roots routine reports
//! them. Real roots are then polished with Newton steps on the input
//! polynomial.

use crate::error::{EosError, EosResult};
use nalgebra::{Complex, Matrix3};

/// Imaginary parts below `IMAG_TOLERANCE * max(1, |re|)` count as real.
pub const IMAG_TOLERANCE: f64 = 1e-9;

const NEWTON_STEPS: usize = 3;

/// All three (possibly complex) roots of `a3·z³ + a2·z² + a1·z + a0 = 0`.
pub fn cubic_roots(a3: f64, a2: f64, a1: f64, a0: f64) -> EosResult<[Complex<f64>; 3]> {
    if [a3, a2, a1, a0].iter().any(|c| !c.is_finite()) {
        return Err(EosError::non_physical("cubic coefficients"));
    }
    if a3 == 0.0 {
        return Err(EosError::invalid("leading cubic coefficient must be non-zero"));
    }

    let (c2, c1, c0) = (a2 / a3, a1 / a3, a0 / a3);
    #[rustfmt::skip]
    let companion = Matrix3::new(
        0.0, 0.0, -c0,
        1.0, 0.0, -c1,
        0.0, 1.0, -c2,
    );
    let eig = companion.complex_eigenvalues();

    let mut roots = [eig[0], eig[1], eig[2]];
    for root in roots.iter_mut() {
        if is_real(root) {
            *root = Complex::new(polish(root.re, c2, c1, c0), 0.0);
        }
    }
    Ok(roots)
}

fn is_real(root: &Complex<f64>) -> bool {
    root.im.abs() <= IMAG_TOLERANCE * root.re.abs().max(1.0)
}

/// Newton refinement on the monic polynomial; keeps the best iterate.
fn polish(mut z: f64, c2: f64, c1: f64, c0: f64) -> f64 {
    let f = |z: f64| ((z + c2) * z + c1) * z + c0;
    let df = |z: f64| (3.0 * z + 2.0 * c2) * z + c1;

    for _ in 0..NEWTON_STEPS {
        let slope = df(z);
        if slope == 0.0 || !slope.is_finite() {
            break;
        }
        let next = z - f(z) / slope;
        if !next.is_finite() || f(next).abs() >= f(z).abs() {
            break;
        }
        z = next;
    }
    z
}

/// Real roots (imaginary part negligible) in ascending order.
pub fn real_roots_sorted(roots: &[Complex<f64>]) -> Vec<f64> {
    let mut real: Vec<f64> = roots.iter().filter(|r| is_real(r)).map(|r| r.re).collect();
    real.sort_by(f64::total_cmp);
    real
}

/// Largest real root, i.e. the vapor-like compressibility branch.
pub fn largest_real_root(roots: &[Complex<f64>]) -> Option<f64> {
    roots
        .iter()
        .filter(|r| is_real(r))
        .map(|r| r.re)
        .max_by(f64::total_cmp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn three_distinct_real_roots() {
        // (z - 1)(z - 2)(z - 3) = z³ - 6z² + 11z - 6
        let roots = cubic_roots(1.0, -6.0, 11.0, -6.0).unwrap();
        let real = real_roots_sorted(&roots);
        assert_eq!(real.len(), 3);
        assert!((real[0] - 1.0).abs() < 1e-12);
        assert!((real[1] - 2.0).abs() < 1e-12);
        assert!((real[2] - 3.0).abs() < 1e-12);
        assert!((largest_real_root(&roots).unwrap() - 3.0).abs() < 1e-12);
    }

    #[test]
    fn one_real_root_and_complex_pair() {
        // (z - 2)(z² + 1) = z³ - 2z² + z - 2
        let roots = cubic_roots(1.0, -2.0, 1.0, -2.0).unwrap();
        let real = real_roots_sorted(&roots);
        assert_eq!(real.len(), 1);
        assert!((real[0] - 2.0).abs() < 1e-12);

        let complex: Vec<_> = roots.iter().filter(|r| r.im.abs() > 0.5).collect();
        assert_eq!(complex.len(), 2);
        assert!(complex.iter().all(|r| (r.im.abs() - 1.0).abs() < 1e-9));
    }

    #[test]
    fn leading_coefficient_is_normalized() {
        // 2(z - 0.5)(z - 1)(z - 4)
        let roots = cubic_roots(2.0, -11.0, 13.0, -4.0).unwrap();
        assert!((largest_real_root(&roots).unwrap() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn no_real_root_selection_on_complex_only_input() {
        let roots = [Complex::new(1.0, 0.3), Complex::new(1.0, -0.3)];
        assert_eq!(largest_real_root(&roots), None);
        assert!(real_roots_sorted(&roots).is_empty());
    }

    #[test]
    fn reject_degenerate_and_non_finite() {
        assert!(matches!(
            cubic_roots(0.0, 1.0, 1.0, 1.0),
            Err(EosError::InvalidArg { .. })
        ));
        assert!(matches!(
            cubic_roots(1.0, f64::NAN, 1.0, 1.0),
            Err(EosError::NonPhysical { .. })
        ));
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let a = cubic_roots(1.0, -0.98, 0.12, -0.004).unwrap();
        let b = cubic_roots(1.0, -0.98, 0.12, -0.004).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.re.to_bits(), y.re.to_bits());
            assert_eq!(x.im.to_bits(), y.im.to_bits());
        }
    }
}
