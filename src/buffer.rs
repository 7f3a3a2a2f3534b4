//! Operand buffers for the benchmark kernels.
//!
//! A [`Workspace`] owns the two input buffers and the output buffer of one
//! benchmark invocation. The backing [`Storage`] is either a runtime-sized
//! `Vec<T>` or a compile-time-sized `[T; N]`; the kernels only ever see slices,
//! so both run through the same executors.

use crate::element::Element;
use std::marker::PhantomData;

/// Contiguous, indexable storage for a buffer of `T`.
pub trait Storage<T: Element>: AsRef<[T]> + AsMut<[T]> {
    /// Allocates zeroed storage holding `len` elements.
    ///
    /// Fixed-size storage ignores `len` and always holds its own length.
    fn zeroed(len: usize) -> Self;
}

impl<T: Element> Storage<T> for Vec<T> {
    fn zeroed(len: usize) -> Self {
        vec![T::zero(); len]
    }
}

impl<T: Element, const N: usize> Storage<T> for [T; N] {
    fn zeroed(len: usize) -> Self {
        debug_assert_eq!(len, N, "fixed-size storage requested with a different length");
        [T::zero(); N]
    }
}

/// How the input buffers are filled before the first repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitPattern {
    /// `a[i] = i`, `b[i] = 2 * i`.
    Index,
    /// `a` counts up from 1, `b` counts up from 2.
    Sequential,
}

impl InitPattern {
    /// Picks the pattern used for `T`: index-based for integers, sequential for floats.
    pub fn for_element<T: Element>() -> Self {
        if T::INTEGRAL {
            InitPattern::Index
        } else {
            InitPattern::Sequential
        }
    }

    pub fn fill<T: Element>(&self, a: &mut [T], b: &mut [T]) {
        match self {
            InitPattern::Index => {
                fill_scaled_index(a, 1);
                fill_scaled_index(b, 2);
            }
            InitPattern::Sequential => {
                fill_sequential(a, 1);
                fill_sequential(b, 2);
            }
        }
    }
}

/// Writes `start, start + 1, start + 2, ...` into `buffer`.
pub fn fill_sequential<T: Element>(buffer: &mut [T], start: usize) {
    for (i, value) in buffer.iter_mut().enumerate() {
        *value = T::from_index(start + i);
    }
}

/// Writes `factor * i` into `buffer[i]`.
pub fn fill_scaled_index<T: Element>(buffer: &mut [T], factor: usize) {
    for (i, value) in buffer.iter_mut().enumerate() {
        *value = T::from_index(factor * i);
    }
}

/// Input and output buffers of one benchmark invocation.
pub struct Workspace<T: Element, S: Storage<T>> {
    a: S,
    b: S,
    out: S,
    _element: PhantomData<T>,
}

/// Runtime-sized workspace.
pub type VecWorkspace<T> = Workspace<T, Vec<T>>;

/// Compile-time-sized workspace.
pub type ArrayWorkspace<T, const N: usize> = Workspace<T, [T; N]>;

impl<T: Element, S: Storage<T>> Workspace<T, S> {
    /// Allocates buffers of `len` elements and fills the inputs with `pattern`.
    pub fn with_pattern(len: usize, pattern: InitPattern) -> Self {
        let mut a = S::zeroed(len);
        let mut b = S::zeroed(len);
        pattern.fill(a.as_mut(), b.as_mut());

        Self {
            a,
            b,
            out: S::zeroed(len),
            _element: PhantomData,
        }
    }

    /// Allocates buffers using the default pattern for `T`.
    pub fn new(len: usize) -> Self {
        Self::with_pattern(len, InitPattern::for_element::<T>())
    }

    pub fn len(&self) -> usize {
        self.a.as_ref().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn a(&self) -> &[T] {
        self.a.as_ref()
    }

    pub fn b(&self) -> &[T] {
        self.b.as_ref()
    }

    pub fn out(&self) -> &[T] {
        self.out.as_ref()
    }

    /// Borrows both inputs and the output at once.
    pub fn operands(&mut self) -> (&[T], &[T], &mut [T]) {
        (self.a.as_ref(), self.b.as_ref(), self.out.as_mut())
    }
}

impl<T: Element, const N: usize> Workspace<T, [T; N]> {
    /// Allocates a compile-time-sized workspace with the default pattern for `T`.
    pub fn fixed() -> Self {
        Self::new(N)
    }
}
