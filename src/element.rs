//! Numeric element types the kernels are instantiated for.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A numeric element stored in a benchmark buffer.
///
/// Integer implementations wrap on overflow; the larger sweeps multiply values
/// well past `i32::MAX`.
pub trait Element: Copy + Default + PartialEq + fmt::Debug + Send + Sync + 'static {
    /// Runtime tag for this type, used when naming cases.
    const TYPE: ElementType;

    /// Whether inputs use the index-based initialization pattern.
    const INTEGRAL: bool;

    fn zero() -> Self;

    /// Converts a buffer index (or small multiple of one) into an element.
    fn from_index(index: usize) -> Self;

    fn add(self, rhs: Self) -> Self;

    fn mul(self, rhs: Self) -> Self;

    /// Size in bytes of one element.
    fn size() -> usize {
        std::mem::size_of::<Self>()
    }
}

impl Element for f32 {
    const TYPE: ElementType = ElementType::F32;
    const INTEGRAL: bool = false;

    fn zero() -> Self {
        0.0
    }

    fn from_index(index: usize) -> Self {
        index as f32
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self * rhs
    }
}

impl Element for f64 {
    const TYPE: ElementType = ElementType::F64;
    const INTEGRAL: bool = false;

    fn zero() -> Self {
        0.0
    }

    fn from_index(index: usize) -> Self {
        index as f64
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self + rhs
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self * rhs
    }
}

impl Element for i32 {
    const TYPE: ElementType = ElementType::I32;
    const INTEGRAL: bool = true;

    fn zero() -> Self {
        0
    }

    fn from_index(index: usize) -> Self {
        index as i32
    }

    #[inline(always)]
    fn add(self, rhs: Self) -> Self {
        self.wrapping_add(rhs)
    }

    #[inline(always)]
    fn mul(self, rhs: Self) -> Self {
        self.wrapping_mul(rhs)
    }
}

/// Runtime tag of the supported element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementType {
    F32,
    F64,
    I32,
}

impl ElementType {
    pub const ALL: [ElementType; 3] = [ElementType::F32, ElementType::F64, ElementType::I32];

    pub fn name(&self) -> &'static str {
        match self {
            ElementType::F32 => "f32",
            ElementType::F64 => "f64",
            ElementType::I32 => "i32",
        }
    }

    pub fn size(&self) -> usize {
        match self {
            ElementType::F32 => f32::size(),
            ElementType::F64 => f64::size(),
            ElementType::I32 => i32::size(),
        }
    }
}

impl fmt::Display for ElementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ElementType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "f32" | "float" => Ok(ElementType::F32),
            "f64" | "double" => Ok(ElementType::F64),
            "i32" | "int" => Ok(ElementType::I32),
            other => Err(format!("unknown element type '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_arithmetic_wraps() {
        assert_eq!(i32::MAX.add(1), i32::MIN);
        assert_eq!(<i32 as Element>::mul(65536, 65536), 0);
    }

    #[test]
    fn test_sizes() {
        assert_eq!(ElementType::F32.size(), 4);
        assert_eq!(ElementType::F64.size(), 8);
        assert_eq!(ElementType::I32.size(), 4);
    }

    #[test]
    fn test_parse_names() {
        assert_eq!("f64".parse::<ElementType>(), Ok(ElementType::F64));
        assert_eq!("int".parse::<ElementType>(), Ok(ElementType::I32));
        assert!("u8".parse::<ElementType>().is_err());
    }
}
