//! Strided layouts: how logical indices map into a backing buffer.

use vela_kernels::Span;

/// `(offset, stride, len)` over a backing buffer, in element units.
///
/// Freshly allocated vectors are `contiguous`; views are derived with
/// [`subrange`](Self::subrange) and [`step_by`](Self::step_by), which keep
/// every derived span inside the parent's span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StridedLayout {
    span: Span,
}

impl StridedLayout {
    pub fn contiguous(len: usize) -> Self {
        Self {
            span: Span::contiguous(len),
        }
    }

    pub fn offset(&self) -> usize {
        self.span.offset
    }

    pub fn stride(&self) -> usize {
        self.span.stride
    }

    pub fn len(&self) -> usize {
        self.span.len
    }

    pub fn is_empty(&self) -> bool {
        self.span.len == 0
    }

    pub fn is_contiguous(&self) -> bool {
        self.span.is_contiguous()
    }

    /// Physical index of logical element `i`.
    pub fn physical_index(&self, i: usize) -> usize {
        self.span.offset + i * self.span.stride
    }

    /// Elements `start..start + len` of this layout.
    ///
    /// # Panics
    /// If `start + len` exceeds `self.len()`.
    pub fn subrange(&self, start: usize, len: usize) -> Self {
        let end = start.checked_add(len);
        assert!(
            matches!(end, Some(end) if end <= self.span.len),
            "subvector at {} of length {} out of range for length {}",
            start,
            len,
            self.span.len
        );
        let offset = if len == 0 {
            self.span.offset
        } else {
            self.physical_index(start)
        };
        Self {
            span: Span {
                offset,
                stride: self.span.stride,
                len,
            },
        }
    }

    /// Every `step`-th element, starting at element 0.
    ///
    /// # Panics
    /// If `step == 0`.
    pub fn step_by(&self, step: usize) -> Self {
        assert!(step > 0, "step must be at least 1");
        let len = self.span.len.div_ceil(step);
        // With at most one element the stride is never dereferenced.
        let stride = if len <= 1 {
            self.span.stride
        } else {
            self.span
                .stride
                .checked_mul(step)
                .expect("stride * step overflows usize with more than one element")
        };
        Self {
            span: Span {
                offset: self.span.offset,
                stride,
                len,
            },
        }
    }

    /// The kernel-level span.
    pub fn span(&self) -> Span {
        self.span
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contiguous() {
        let l = StridedLayout::contiguous(5);
        assert_eq!((l.offset(), l.stride(), l.len()), (0, 1, 5));
        assert!(l.is_contiguous());
    }

    #[test]
    fn test_subrange_keeps_stride() {
        let l = StridedLayout::contiguous(10).step_by(2);
        assert_eq!(l.len(), 5);
        let sub = l.subrange(1, 3);
        assert_eq!((sub.offset(), sub.stride(), sub.len()), (2, 2, 3));
        assert_eq!(sub.physical_index(2), 6);
    }

    #[test]
    fn test_nested_subrange() {
        let l = StridedLayout::contiguous(10).subrange(2, 6).subrange(1, 2);
        assert_eq!((l.offset(), l.len()), (3, 2));
    }

    #[test]
    fn test_empty_subrange_at_end() {
        let l = StridedLayout::contiguous(4).subrange(4, 0);
        assert!(l.is_empty());
        assert_eq!(l.span().end(), 0);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_subrange_out_of_range() {
        StridedLayout::contiguous(5).subrange(3, 3);
    }

    #[test]
    fn test_step_by_rounds_up() {
        let l = StridedLayout::contiguous(7).step_by(3);
        assert_eq!((l.stride(), l.len()), (3, 3));
        assert_eq!(l.span().end(), 7);
    }

    #[test]
    fn test_step_by_huge_step_keeps_first_element() {
        let l = StridedLayout::contiguous(3).step_by(usize::MAX);
        assert_eq!((l.offset(), l.len()), (0, 1));
        assert_eq!(l.span().end(), 1);
        assert!(StridedLayout::contiguous(0).step_by(usize::MAX).is_empty());
    }

    #[test]
    #[should_panic(expected = "step must be at least 1")]
    fn test_step_by_zero() {
        StridedLayout::contiguous(3).step_by(0);
    }
}
