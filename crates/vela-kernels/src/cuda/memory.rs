//! Typed GPU memory buffers and host<->device transfers.
//!
//! Wraps a `cudarc` allocation together with the device it lives on.

use std::sync::Arc;

use cudarc::driver::{CudaDevice, CudaSlice};

use super::context::{get_device, CudaError};
use crate::Scalar;

/// A GPU allocation of `len` elements of `T` on one CUDA device.
///
/// Freed when dropped. Not `Clone`: exactly one owner releases the memory.
/// Zero-length buffers still hold a one-element allocation so the driver
/// never sees a zero-byte request; `len` is the logical length.
#[derive(Debug)]
pub struct CudaBuffer<T: Scalar> {
    pub(crate) device: Arc<CudaDevice>,
    pub(crate) slice: CudaSlice<T>,
    pub(crate) device_idx: usize,
    len: usize,
}

fn check_range(what: &str, offset: usize, count: usize, capacity: usize) -> Result<(), CudaError> {
    match offset.checked_add(count) {
        Some(end) if end <= capacity => Ok(()),
        _ => Err(CudaError::Copy(format!(
            "{what}: range {offset}+{count} exceeds buffer of {capacity} elements"
        ))),
    }
}

impl<T: Scalar> CudaBuffer<T> {
    /// Allocate `len` uninitialized elements.
    pub fn alloc(device_idx: usize, len: usize) -> Result<Self, CudaError> {
        let device = get_device(device_idx)?;
        // Safety: contents are never read before a write in Vela's API except
        // through explicit copies, which are plain bit copies of `T`.
        let slice = unsafe { device.alloc::<T>(len.max(1)) }.map_err(|e| CudaError::Alloc {
            elements: len,
            msg: e.to_string(),
        })?;
        tracing::debug!(device_idx, len, "cuda alloc");
        Ok(Self { device, slice, device_idx, len })
    }

    /// Copy host data into a new buffer (H2D).
    pub fn from_host(device_idx: usize, data: &[T]) -> Result<Self, CudaError> {
        if data.is_empty() {
            return Self::alloc(device_idx, 0);
        }
        let device = get_device(device_idx)?;
        let slice = device
            .htod_sync_copy(data)
            .map_err(|e| CudaError::Copy(format!("htod_sync_copy({} elements): {}", data.len(), e)))?;
        Ok(Self { device, slice, device_idx, len: data.len() })
    }

    /// Number of elements in the allocation.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Device index.
    pub fn device_idx(&self) -> usize {
        self.device_idx
    }

    /// Overwrite `src.len()` elements starting at `offset` (H2D).
    pub fn copy_from_host(&mut self, offset: usize, src: &[T]) -> Result<(), CudaError> {
        check_range("htod", offset, src.len(), self.len())?;
        if src.is_empty() {
            return Ok(());
        }
        let mut dst = self.slice.slice_mut(offset..offset + src.len());
        self.device
            .htod_sync_copy_into(src, &mut dst)
            .map_err(|e| CudaError::Copy(format!("htod_sync_copy_into: {}", e)))
    }

    /// Read `dst.len()` elements starting at `offset` (D2H). Synchronizes.
    pub fn copy_to_host(&self, offset: usize, dst: &mut [T]) -> Result<(), CudaError> {
        check_range("dtoh", offset, dst.len(), self.len())?;
        if dst.is_empty() {
            return Ok(());
        }
        let src = self.slice.slice(offset..offset + dst.len());
        self.device
            .dtoh_sync_copy_into(&src, dst)
            .map_err(|e| CudaError::Copy(format!("dtoh_sync_copy_into: {}", e)))
    }

    /// Copy `count` elements from `src[src_offset..]` into `self[dst_offset..]`.
    ///
    /// Same device: D2D memcpy. Different devices: staged through the host.
    pub fn copy_from_buffer(
        &mut self,
        dst_offset: usize,
        src: &CudaBuffer<T>,
        src_offset: usize,
        count: usize,
    ) -> Result<(), CudaError> {
        check_range("dtod destination", dst_offset, count, self.len())?;
        check_range("dtod source", src_offset, count, src.len())?;
        if count == 0 {
            return Ok(());
        }
        if src.device_idx != self.device_idx {
            let mut staging = vec![T::ZERO; count];
            src.copy_to_host(src_offset, &mut staging)?;
            return self.copy_from_host(dst_offset, &staging);
        }
        let src_view = src.slice.slice(src_offset..src_offset + count);
        let mut dst_view = self.slice.slice_mut(dst_offset..dst_offset + count);
        self.device
            .dtod_copy(&src_view, &mut dst_view)
            .map_err(|e| CudaError::Copy(format!("dtod_copy: {}", e)))
    }

    /// Wait for queued work on this buffer's device.
    pub fn synchronize(&self) -> Result<(), CudaError> {
        self.device
            .synchronize()
            .map_err(|e| CudaError::Sync {
                device: self.device_idx,
                msg: e.to_string(),
            })
    }
}
