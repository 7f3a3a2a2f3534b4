//! Operation executors for the array benchmarks.
//!
//! Each kernel lives in its own module and works on plain slices, so it runs
//! unchanged over runtime-sized and compile-time-sized buffers.

use crate::buffer::{Storage, Workspace};
use crate::element::Element;
use serde::{Deserialize, Serialize};
use std::fmt;

pub mod add_operation;
pub mod copy_operation;
pub mod dot_product_operation;
pub mod multiply_operation;

pub use add_operation::add;
pub use copy_operation::{bytes_moved, copy};
pub use dot_product_operation::dot_product;
pub use multiply_operation::multiply;

/// The operations a benchmark case can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Add,
    Multiply,
    Copy,
    DotProduct,
}

/// Unit of the size parameter an operation is swept over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeUnit {
    Elements,
    Bytes,
}

impl Operation {
    pub fn name(&self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Multiply => "multiply",
            Operation::Copy => "copy",
            Operation::DotProduct => "dot_product",
        }
    }

    pub fn size_unit(&self) -> SizeUnit {
        match self {
            Operation::Copy => SizeUnit::Bytes,
            _ => SizeUnit::Elements,
        }
    }

    /// Whether runs of this operation report bytes processed.
    pub fn reports_bytes(&self) -> bool {
        matches!(self, Operation::Copy)
    }

    /// Runs the operation once over `workspace`.
    ///
    /// Returns the accumulator for [`Operation::DotProduct`], `None` for the
    /// operations that write into the output buffer.
    #[inline]
    pub fn apply<T: Element, S: Storage<T>>(&self, workspace: &mut Workspace<T, S>) -> Option<T> {
        let (a, b, out) = workspace.operands();
        match self {
            Operation::Add => {
                add(a, b, out);
                None
            }
            Operation::Multiply => {
                multiply(a, b, out);
                None
            }
            Operation::Copy => {
                copy(a, out);
                None
            }
            Operation::DotProduct => Some(dot_product(a, b)),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The value controlling the buffer length of a benchmark case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeParameter {
    Elements(usize),
    Bytes(usize),
}

impl SizeParameter {
    pub fn new(unit: SizeUnit, value: usize) -> Self {
        match unit {
            SizeUnit::Elements => SizeParameter::Elements(value),
            SizeUnit::Bytes => SizeParameter::Bytes(value),
        }
    }

    /// The raw value as it appears in the case name.
    pub fn value(&self) -> usize {
        match self {
            SizeParameter::Elements(n) | SizeParameter::Bytes(n) => *n,
        }
    }

    /// Buffer length in elements of `element_size` bytes.
    ///
    /// Byte sizes are floored to whole elements and never drop below one.
    pub fn element_count(&self, element_size: usize) -> usize {
        match self {
            SizeParameter::Elements(n) => *n,
            SizeParameter::Bytes(bytes) => (bytes / element_size).max(1),
        }
    }
}
