use std::fmt;

use vela_kernels::Scalar;

/// Element types a [`Vector`](crate::Vector) can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    /// 32-bit IEEE 754 single-precision float
    F32,
    /// 64-bit IEEE 754 double-precision float
    F64,
}

impl DType {
    /// Size in bytes of a single element.
    pub fn element_size(&self) -> usize {
        match self {
            DType::F32 => 4,
            DType::F64 => 8,
        }
    }

    /// Number of bytes needed for `n` elements, or `None` on overflow.
    pub fn storage_bytes(&self, n: usize) -> Option<usize> {
        n.checked_mul(self.element_size())
    }

    pub fn name(&self) -> &'static str {
        match self {
            DType::F32 => "f32",
            DType::F64 => "f64",
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A kernel scalar with a runtime type tag.
///
/// `to_f64` is a lossless widening used for diagnostics.
pub trait Element: Scalar {
    const DTYPE: DType;

    fn to_f64(self) -> f64;
}

impl Element for f32 {
    const DTYPE: DType = DType::F32;

    fn to_f64(self) -> f64 {
        self as f64
    }
}

impl Element for f64 {
    const DTYPE: DType = DType::F64;

    fn to_f64(self) -> f64 {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_sizes() {
        assert_eq!(DType::F32.element_size(), std::mem::size_of::<f32>());
        assert_eq!(DType::F64.element_size(), std::mem::size_of::<f64>());
        assert_eq!(<f64 as Element>::DTYPE, DType::F64);
    }

    #[test]
    fn test_storage_bytes_overflow() {
        assert_eq!(DType::F32.storage_bytes(10), Some(40));
        assert_eq!(DType::F64.storage_bytes(usize::MAX), None);
    }

    #[test]
    fn test_display() {
        assert_eq!(DType::F32.to_string(), "f32");
    }
}
