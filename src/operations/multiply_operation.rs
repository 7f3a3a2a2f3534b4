//! Pairwise multiplication kernel.

use crate::element::Element;

/// Writes `a[i] * b[i]` into `output[i]`.
#[inline]
pub fn multiply<T: Element>(a: &[T], b: &[T], output: &mut [T]) {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), output.len());

    for ((out, &x), &y) in output.iter_mut().zip(a).zip(b) {
        *out = x.mul(y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiply_doubles() {
        let a = [1.5f64, -2.0, 0.0];
        let b = [2.0f64, 3.0, 9.0];
        let mut c = [1.0f64; 3];
        multiply(&a, &b, &mut c);
        assert_eq!(c, [3.0, -6.0, 0.0]);
    }

    #[test]
    fn test_multiply_overwrites_previous_output() {
        let mut c = [7i32, 7];
        multiply(&[2, 3], &[5, 0], &mut c);
        assert_eq!(c, [10, 0]);
    }
}
