//! Buffer copy kernel.

use crate::element::Element;

/// Copies `source` into `destination`.
#[inline]
pub fn copy<T: Element>(source: &[T], destination: &mut [T]) {
    destination.copy_from_slice(source);
}

/// Bytes moved by `repetitions` copies of `len` elements of `T`.
pub fn bytes_moved<T: Element>(len: usize, repetitions: u64) -> u64 {
    (T::size() * len) as u64 * repetitions
}
