//! Pairwise addition kernel.

use crate::element::Element;

/// Writes `a[i] + b[i]` into `output[i]`.
#[inline]
pub fn add<T: Element>(a: &[T], b: &[T], output: &mut [T]) {
    debug_assert_eq!(a.len(), b.len());
    debug_assert_eq!(a.len(), output.len());

    for ((out, &x), &y) in output.iter_mut().zip(a).zip(b) {
        *out = x.add(y);
    }
}
