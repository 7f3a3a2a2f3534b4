//! Dot product reduction kernel.

use crate::element::Element;

/// Returns the sum of `a[i] * b[i]`, accumulated from zero.
#[inline]
pub fn dot_product<T: Element>(a: &[T], b: &[T]) -> T {
    debug_assert_eq!(a.len(), b.len());

    let mut acc = T::zero();
    for (&x, &y) in a.iter().zip(b) {
        acc = acc.add(x.mul(y));
    }
    acc
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_product_basic() {
        let a = [1.0f32, 2.0, 3.0];
        let b = [4.0f32, 5.0, 6.0];
        assert!((dot_product(&a, &b) - 32.0).abs() < 1e-6);
    }

    #[test]
    fn test_dot_product_negative_values() {
        assert_eq!(dot_product(&[-1i32, 2, -3], &[4, -5, 6]), -32);
    }

    #[test]
    fn test_dot_product_empty_is_zero() {
        let empty: [f64; 0] = [];
        assert_eq!(dot_product(&empty, &empty), 0.0);
    }
}
