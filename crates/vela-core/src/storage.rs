//! Device memory backing a vector, and backend dispatch.
//!
//! `Storage` is the only place that knows which backend a buffer lives on.
//! Everything above it talks in [`StridedLayout`]s.

use vela_kernels::{cpu_strided, LaunchSettings};

#[cfg(feature = "cuda")]
use vela_kernels::cuda::{self, CudaBuffer, CudaError};

use crate::{Device, Element, Result, StridedLayout, VelaError};

/// A single device allocation of `T`.
#[derive(Debug)]
pub enum Storage<T: Element> {
    /// Host heap allocation; kernels run on rayon.
    Cpu(Vec<T>),
    /// CUDA device allocation.
    #[cfg(feature = "cuda")]
    Cuda(CudaBuffer<T>),
}

/// Elementwise operations with a scalar operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ScalarOp {
    Fill,
    Scale,
    AddConstant,
}

/// Elementwise operations with a vector operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum BinaryOp {
    Multiply,
    Divide,
}

fn allocation_error<T: Element>(requested: usize, reason: impl Into<String>) -> VelaError {
    VelaError::Allocation {
        requested,
        dtype: T::DTYPE,
        reason: reason.into(),
    }
}

fn require_contiguous(what: &str, layout: StridedLayout) -> Result<()> {
    if !layout.is_contiguous() {
        return Err(VelaError::Transfer(format!(
            "{what} has stride {}; raw copies require stride 1",
            layout.stride()
        )));
    }
    Ok(())
}

fn require_capacity(what: &str, available: usize, needed: usize) -> Result<()> {
    if available < needed {
        return Err(VelaError::Transfer(format!(
            "{what} holds {available} elements, {needed} required"
        )));
    }
    Ok(())
}

impl<T: Element> Storage<T> {
    /// Reserve `len` elements on `device`. Contents are unspecified.
    pub fn allocate(device: Device, len: usize) -> Result<Self> {
        match T::DTYPE.storage_bytes(len) {
            Some(bytes) if bytes <= isize::MAX as usize => {}
            _ => return Err(allocation_error::<T>(len, "size exceeds the address space")),
        }
        match device {
            Device::Cpu => {
                let mut data = Vec::new();
                data.try_reserve_exact(len)
                    .map_err(|e| allocation_error::<T>(len, e.to_string()))?;
                data.resize(len, T::ZERO);
                Ok(Storage::Cpu(data))
            }
            #[cfg(feature = "cuda")]
            Device::Cuda(idx) => {
                let buf = CudaBuffer::alloc(idx, len).map_err(|e| match e {
                    e @ CudaError::Unavailable { .. } => VelaError::DeviceUnavailable(e.to_string()),
                    other => allocation_error::<T>(len, other.to_string()),
                })?;
                Ok(Storage::Cuda(buf))
            }
            #[cfg(not(feature = "cuda"))]
            Device::Cuda(idx) => Err(VelaError::DeviceUnavailable(format!(
                "cuda:{idx} requested but vela-core was built without the `cuda` feature"
            ))),
        }
    }

    /// Allocate on `device` and upload `data`.
    pub fn from_host(device: Device, data: &[T]) -> Result<Self> {
        match device {
            Device::Cpu => {
                let mut buf = Vec::new();
                buf.try_reserve_exact(data.len())
                    .map_err(|e| allocation_error::<T>(data.len(), e.to_string()))?;
                buf.extend_from_slice(data);
                Ok(Storage::Cpu(buf))
            }
            #[cfg(feature = "cuda")]
            Device::Cuda(idx) => Ok(Storage::Cuda(CudaBuffer::from_host(idx, data)?)),
            #[cfg(not(feature = "cuda"))]
            Device::Cuda(_) => Self::allocate(device, data.len()),
        }
    }

    /// Number of elements in the allocation.
    pub fn len(&self) -> usize {
        match self {
            Storage::Cpu(data) => data.len(),
            #[cfg(feature = "cuda")]
            Storage::Cuda(buf) => buf.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn device(&self) -> Device {
        match self {
            Storage::Cpu(_) => Device::Cpu,
            #[cfg(feature = "cuda")]
            Storage::Cuda(buf) => Device::Cuda(buf.device_idx()),
        }
    }

    /// Wait until queued kernels on this storage's device have finished.
    pub fn synchronize(&self) -> Result<()> {
        match self {
            Storage::Cpu(_) => Ok(()),
            #[cfg(feature = "cuda")]
            Storage::Cuda(buf) => Ok(buf.synchronize()?),
        }
    }

    /// Copy `layout.len()` elements from the front of `src` into `layout`.
    pub(crate) fn write_host(&mut self, layout: StridedLayout, src: &[T]) -> Result<()> {
        require_contiguous("destination vector", layout)?;
        require_capacity("host source", src.len(), layout.len())?;
        layout.span().check_within(self.len())?;
        let (offset, n) = (layout.offset(), layout.len());
        match self {
            Storage::Cpu(data) => data[offset..offset + n].copy_from_slice(&src[..n]),
            #[cfg(feature = "cuda")]
            Storage::Cuda(buf) => buf.copy_from_host(offset, &src[..n])?,
        }
        Ok(())
    }

    /// Copy `layout.len()` elements of `layout` into the front of `dst`.
    pub(crate) fn read_host(&self, layout: StridedLayout, dst: &mut [T]) -> Result<()> {
        require_contiguous("source vector", layout)?;
        require_capacity("host destination", dst.len(), layout.len())?;
        layout.span().check_within(self.len())?;
        let (offset, n) = (layout.offset(), layout.len());
        match self {
            Storage::Cpu(data) => dst[..n].copy_from_slice(&data[offset..offset + n]),
            #[cfg(feature = "cuda")]
            Storage::Cuda(buf) => buf.copy_to_host(offset, &mut dst[..n])?,
        }
        Ok(())
    }

    /// Copy `layout.len()` elements from `src` into `layout`.
    ///
    /// Crosses devices when needed: CPU<->CUDA copies go straight through
    /// the host side of the pair.
    pub(crate) fn copy_from(
        &mut self,
        layout: StridedLayout,
        src: &Storage<T>,
        src_layout: StridedLayout,
    ) -> Result<()> {
        require_contiguous("destination vector", layout)?;
        require_contiguous("source vector", src_layout)?;
        require_capacity("source vector", src_layout.len(), layout.len())?;
        layout.span().check_within(self.len())?;
        src_layout.span().check_within(src.len())?;
        let n = layout.len();
        let (dst_off, src_off) = (layout.offset(), src_layout.offset());
        match (self, src) {
            (Storage::Cpu(dst), Storage::Cpu(src)) => {
                dst[dst_off..dst_off + n].copy_from_slice(&src[src_off..src_off + n]);
            }
            #[cfg(feature = "cuda")]
            (Storage::Cuda(dst), Storage::Cuda(src)) => {
                dst.copy_from_buffer(dst_off, src, src_off, n)?;
            }
            #[cfg(feature = "cuda")]
            (Storage::Cuda(dst), Storage::Cpu(src)) => {
                dst.copy_from_host(dst_off, &src[src_off..src_off + n])?;
            }
            #[cfg(feature = "cuda")]
            (Storage::Cpu(dst), Storage::Cuda(src)) => {
                src.copy_to_host(src_off, &mut dst[dst_off..dst_off + n])?;
            }
        }
        Ok(())
    }

    /// Read the elements of `layout`, in logical order, into a dense host vector.
    pub(crate) fn gather(&self, layout: StridedLayout) -> Result<Vec<T>> {
        let span = layout.span();
        match self {
            Storage::Cpu(data) => Ok(cpu_strided::gather(data, span)?),
            #[cfg(feature = "cuda")]
            Storage::Cuda(buf) => {
                span.check_within(buf.len())?;
                if span.is_empty() {
                    return Ok(Vec::new());
                }
                let mut staging = vec![T::ZERO; span.end() - span.offset];
                buf.copy_to_host(span.offset, &mut staging)?;
                let local = vela_kernels::Span { offset: 0, ..span };
                Ok(cpu_strided::gather(&staging, local)?)
            }
        }
    }

    pub(crate) fn apply_scalar(&mut self, layout: StridedLayout, op: ScalarOp, value: T) -> Result<()> {
        let settings = LaunchSettings::current();
        let span = layout.span();
        match self {
            Storage::Cpu(data) => match op {
                ScalarOp::Fill => cpu_strided::fill(data, span, value, &settings)?,
                ScalarOp::Scale => cpu_strided::scale(data, span, value, &settings)?,
                ScalarOp::AddConstant => cpu_strided::add_scalar(data, span, value, &settings)?,
            },
            #[cfg(feature = "cuda")]
            Storage::Cuda(buf) => match op {
                ScalarOp::Fill => cuda::ops::fill(buf, span, value, &settings)?,
                ScalarOp::Scale => cuda::ops::scale(buf, span, value, &settings)?,
                ScalarOp::AddConstant => cuda::ops::add_scalar(buf, span, value, &settings)?,
            },
        }
        Ok(())
    }

    pub(crate) fn apply_binary(
        &mut self,
        layout: StridedLayout,
        other: &Storage<T>,
        other_layout: StridedLayout,
        op: BinaryOp,
    ) -> Result<()> {
        if layout.len() != other_layout.len() {
            return Err(VelaError::SizeMismatch {
                expected: layout.len(),
                got: other_layout.len(),
            });
        }
        let settings = LaunchSettings::current();
        let (a_span, b_span) = (layout.span(), other_layout.span());
        match (self, other) {
            (Storage::Cpu(a), Storage::Cpu(b)) => match op {
                BinaryOp::Multiply => cpu_strided::mul(a, a_span, b, b_span, &settings)?,
                BinaryOp::Divide => cpu_strided::div(a, a_span, b, b_span, &settings)?,
            },
            #[cfg(feature = "cuda")]
            (Storage::Cuda(a), Storage::Cuda(b)) => match op {
                BinaryOp::Multiply => cuda::ops::mul(a, a_span, b, b_span, &settings)?,
                BinaryOp::Divide => cuda::ops::div(a, a_span, b, b_span, &settings)?,
            },
            #[cfg(feature = "cuda")]
            (a, b) => {
                return Err(VelaError::DeviceMismatch {
                    left: a.device(),
                    right: b.device(),
                })
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_cpu() {
        let s = Storage::<f32>::allocate(Device::Cpu, 10).unwrap();
        assert_eq!(s.len(), 10);
        assert_eq!(s.device(), Device::Cpu);
    }

    #[test]
    fn test_allocate_overflow() {
        let err = Storage::<f64>::allocate(Device::Cpu, usize::MAX / 4).unwrap_err();
        assert!(matches!(err, VelaError::Allocation { dtype: crate::DType::F64, .. }));
    }

    #[cfg(not(feature = "cuda"))]
    #[test]
    fn test_cuda_unavailable_without_feature() {
        let err = Storage::<f32>::allocate(Device::Cuda(0), 4).unwrap_err();
        assert!(matches!(err, VelaError::DeviceUnavailable(_)));
    }

    #[test]
    fn test_write_host_short_source() {
        let mut s = Storage::<f32>::allocate(Device::Cpu, 4).unwrap();
        let err = s
            .write_host(StridedLayout::contiguous(4), &[1.0, 2.0])
            .unwrap_err();
        assert!(matches!(err, VelaError::Transfer(_)));
        assert_eq!(s.gather(StridedLayout::contiguous(4)).unwrap(), vec![0.0; 4]);
    }

    #[test]
    fn test_strided_copy_rejected() {
        let mut s = Storage::<f32>::allocate(Device::Cpu, 6).unwrap();
        let strided = StridedLayout::contiguous(6).step_by(2);
        let err = s.write_host(strided, &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(err.to_string().contains("stride 2"));
    }

    #[test]
    fn test_binary_size_mismatch() {
        let mut a = Storage::<f64>::from_host(Device::Cpu, &[1.0, 2.0, 3.0]).unwrap();
        let b = Storage::<f64>::from_host(Device::Cpu, &[1.0, 2.0]).unwrap();
        let err = a
            .apply_binary(
                StridedLayout::contiguous(3),
                &b,
                StridedLayout::contiguous(2),
                BinaryOp::Multiply,
            )
            .unwrap_err();
        assert!(matches!(err, VelaError::SizeMismatch { expected: 3, got: 2 }));
    }
}
