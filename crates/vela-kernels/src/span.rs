//! Strided index spans shared by every backend.

use crate::{KernelError, Result};

/// A `(offset, stride, len)` triple in element units.
///
/// Logical index `i` lives at physical index `offset + i * stride`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub offset: usize,
    pub stride: usize,
    pub len: usize,
}

impl Span {
    /// A dense span starting at element 0.
    pub fn contiguous(len: usize) -> Self {
        Self { offset: 0, stride: 1, len }
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn is_contiguous(&self) -> bool {
        self.stride == 1
    }

    /// One past the last physical index touched, or `offset` when empty.
    pub fn end(&self) -> usize {
        if self.len == 0 {
            self.offset
        } else {
            self.offset + (self.len - 1) * self.stride + 1
        }
    }

    /// Check that every physical index of the span is below `capacity`.
    pub fn check_within(&self, capacity: usize) -> Result<()> {
        if self.stride == 0 {
            return Err(KernelError::ZeroStride);
        }
        if self.len == 0 {
            if self.offset > capacity {
                return Err(KernelError::OutOfBounds { end: self.offset, capacity });
            }
            return Ok(());
        }
        let end = (self.len - 1)
            .checked_mul(self.stride)
            .and_then(|reach| reach.checked_add(self.offset))
            .and_then(|last| last.checked_add(1))
            .ok_or(KernelError::OutOfBounds { end: usize::MAX, capacity })?;
        if end > capacity {
            return Err(KernelError::OutOfBounds { end, capacity });
        }
        Ok(())
    }

    /// The sub-slice of `data` covering this span, after a bounds check.
    pub fn region<'a, T>(&self, data: &'a [T]) -> Result<&'a [T]> {
        self.check_within(data.len())?;
        Ok(&data[self.offset..self.end()])
    }

    pub fn region_mut<'a, T>(&self, data: &'a mut [T]) -> Result<&'a mut [T]> {
        self.check_within(data.len())?;
        let end = self.end();
        Ok(&mut data[self.offset..end])
    }
}
