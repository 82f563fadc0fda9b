//! Rayon-parallel strided kernels for the CPU device.
//!
//! A span's region `data[offset..end]` is split with `par_chunks(stride)`:
//! chunk `i` starts at logical element `i`, so the parallel map touches
//! exactly the span's elements and nothing in between. Rayon's work stealing
//! plays the role of the grid-stride loop: any number of worker threads
//! covers any number of elements.

use rayon::prelude::*;

use crate::{KernelError, LaunchSettings, Result, Scalar, Span};

/// Apply `op` to every element of `span` in place.
pub fn map_inplace<T, F>(data: &mut [T], span: Span, settings: &LaunchSettings, op: F) -> Result<()>
where
    T: Send,
    F: Fn(&mut T) + Send + Sync,
{
    if span.is_empty() {
        return span.check_within(data.len());
    }
    let region = span.region_mut(data)?;
    region
        .par_chunks_mut(span.stride)
        .with_min_len(settings.cpu_min_chunk.max(1))
        .for_each(|chunk| op(&mut chunk[0]));
    Ok(())
}

/// Apply `op(a[i], b[i])` for every logical index, writing into `a`.
pub fn zip_inplace<T, F>(
    a: &mut [T],
    a_span: Span,
    b: &[T],
    b_span: Span,
    settings: &LaunchSettings,
    op: F,
) -> Result<()>
where
    T: Send + Sync,
    F: Fn(&mut T, &T) + Send + Sync,
{
    if a_span.len != b_span.len {
        return Err(KernelError::LengthMismatch {
            left: a_span.len,
            right: b_span.len,
        });
    }
    if a_span.is_empty() {
        a_span.check_within(a.len())?;
        return b_span.check_within(b.len());
    }
    let b_region = b_span.region(b)?;
    let a_region = a_span.region_mut(a)?;
    a_region
        .par_chunks_mut(a_span.stride)
        .zip(b_region.par_chunks(b_span.stride))
        .with_min_len(settings.cpu_min_chunk.max(1))
        .for_each(|(x, y)| op(&mut x[0], &y[0]));
    Ok(())
}

/// `x[i] = value`
pub fn fill<T: Scalar>(data: &mut [T], span: Span, value: T, settings: &LaunchSettings) -> Result<()> {
    map_inplace(data, span, settings, |x| *x = value)
}

/// `x[i] *= factor`
pub fn scale<T: Scalar>(data: &mut [T], span: Span, factor: T, settings: &LaunchSettings) -> Result<()> {
    map_inplace(data, span, settings, |x| *x = *x * factor)
}

/// `x[i] += constant`
pub fn add_scalar<T: Scalar>(
    data: &mut [T],
    span: Span,
    constant: T,
    settings: &LaunchSettings,
) -> Result<()> {
    map_inplace(data, span, settings, |x| *x = *x + constant)
}

/// `a[i] *= b[i]`
pub fn mul<T: Scalar>(
    a: &mut [T],
    a_span: Span,
    b: &[T],
    b_span: Span,
    settings: &LaunchSettings,
) -> Result<()> {
    zip_inplace(a, a_span, b, b_span, settings, |x, y| *x = *x * *y)
}

/// `a[i] /= b[i]`, IEEE semantics for zero divisors.
pub fn div<T: Scalar>(
    a: &mut [T],
    a_span: Span,
    b: &[T],
    b_span: Span,
    settings: &LaunchSettings,
) -> Result<()> {
    zip_inplace(a, a_span, b, b_span, settings, |x, y| *x = *x / *y)
}

/// Collect the span's elements, in logical order, into a dense vector.
pub fn gather<T: Scalar>(data: &[T], span: Span) -> Result<Vec<T>> {
    if span.is_empty() {
        span.check_within(data.len())?;
        return Ok(Vec::new());
    }
    let region = span.region(data)?;
    Ok(region.par_chunks(span.stride).map(|chunk| chunk[0]).collect())
}
