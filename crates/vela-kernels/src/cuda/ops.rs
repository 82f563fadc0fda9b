//! CUDA dispatch for strided elementwise kernels.
//!
//! Each function bounds-checks the span, sizes a grid-stride launch, and
//! enqueues the kernel on the device's default stream. Launches are
//! asynchronous; the next host read-back synchronizes.

use cudarc::driver::LaunchAsync;

use super::context::CudaError;
use super::launch::{launch_config, strided_func};
use super::memory::CudaBuffer;
use crate::{grid_stride_1d, KernelError, LaunchSettings, Result, Scalar, Span};

fn scalar_op<T: Scalar>(
    buf: &mut CudaBuffer<T>,
    span: Span,
    op: &str,
    arg: T,
    settings: &LaunchSettings,
) -> Result<()> {
    span.check_within(buf.len())?;
    let Some(dims) = grid_stride_1d(span.len, settings) else {
        return Ok(());
    };
    let name = format!("{}_{}", op, T::KERNEL_SUFFIX);
    let f = strided_func(&buf.device, buf.device_idx, &name)?;
    let mut view = buf.slice.slice_mut(span.offset..span.end());
    tracing::trace!(kernel = %name, len = span.len, stride = span.stride, ?dims, "launch");
    unsafe {
        f.launch(
            launch_config(dims),
            (&mut view, span.stride as u64, span.len as u64, arg),
        )
        .map_err(|e| CudaError::Launch { kernel: name, msg: e.to_string() })?;
    }
    Ok(())
}

fn binary_op<T: Scalar>(
    a: &mut CudaBuffer<T>,
    a_span: Span,
    b: &CudaBuffer<T>,
    b_span: Span,
    op: &str,
    settings: &LaunchSettings,
) -> Result<()> {
    if a.device_idx != b.device_idx {
        return Err(CudaError::CrossDevice {
            left: a.device_idx,
            right: b.device_idx,
        }
        .into());
    }
    if a_span.len != b_span.len {
        return Err(KernelError::LengthMismatch {
            left: a_span.len,
            right: b_span.len,
        });
    }
    a_span.check_within(a.len())?;
    b_span.check_within(b.len())?;
    let Some(dims) = grid_stride_1d(a_span.len, settings) else {
        return Ok(());
    };
    let name = format!("{}_{}", op, T::KERNEL_SUFFIX);
    let f = strided_func(&a.device, a.device_idx, &name)?;
    let b_view = b.slice.slice(b_span.offset..b_span.end());
    let mut a_view = a.slice.slice_mut(a_span.offset..a_span.end());
    tracing::trace!(kernel = %name, len = a_span.len, ?dims, "launch");
    unsafe {
        f.launch(
            launch_config(dims),
            (
                &mut a_view,
                a_span.stride as u64,
                &b_view,
                b_span.stride as u64,
                a_span.len as u64,
            ),
        )
        .map_err(|e| CudaError::Launch { kernel: name, msg: e.to_string() })?;
    }
    Ok(())
}

/// `x[i] = value`
pub fn fill<T: Scalar>(buf: &mut CudaBuffer<T>, span: Span, value: T, settings: &LaunchSettings) -> Result<()> {
    scalar_op(buf, span, "fill", value, settings)
}

/// `x[i] *= factor`
pub fn scale<T: Scalar>(buf: &mut CudaBuffer<T>, span: Span, factor: T, settings: &LaunchSettings) -> Result<()> {
    scalar_op(buf, span, "scale", factor, settings)
}

/// `x[i] += constant`
pub fn add_scalar<T: Scalar>(
    buf: &mut CudaBuffer<T>,
    span: Span,
    constant: T,
    settings: &LaunchSettings,
) -> Result<()> {
    scalar_op(buf, span, "add_scalar", constant, settings)
}

/// `a[i] *= b[i]`
pub fn mul<T: Scalar>(
    a: &mut CudaBuffer<T>,
    a_span: Span,
    b: &CudaBuffer<T>,
    b_span: Span,
    settings: &LaunchSettings,
) -> Result<()> {
    binary_op(a, a_span, b, b_span, "mul", settings)
}

/// `a[i] /= b[i]`
pub fn div<T: Scalar>(
    a: &mut CudaBuffer<T>,
    a_span: Span,
    b: &CudaBuffer<T>,
    b_span: Span,
    settings: &LaunchSettings,
) -> Result<()> {
    binary_op(a, a_span, b, b_span, "div", settings)
}
