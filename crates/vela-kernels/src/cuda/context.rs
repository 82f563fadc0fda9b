//! Opened CUDA devices and backend errors.
//!
//! Each GPU ordinal is opened once, on first use, and the handle is shared by
//! every buffer allocated on it.

use std::sync::Arc;

use cudarc::driver::CudaDevice;
use parking_lot::Mutex;

/// Handles indexed by ordinal; `None` until the device is first requested.
static OPENED: Mutex<Vec<Option<Arc<CudaDevice>>>> = parking_lot::const_mutex(Vec::new());

/// Handle for GPU `device_idx`, opening it (and its primary context) if needed.
pub fn get_device(device_idx: usize) -> Result<Arc<CudaDevice>, CudaError> {
    let mut opened = OPENED.lock();
    if let Some(Some(dev)) = opened.get(device_idx) {
        return Ok(Arc::clone(dev));
    }
    let dev = CudaDevice::new(device_idx).map_err(|e| CudaError::Unavailable {
        device: device_idx,
        reason: e.to_string(),
    })?;
    if opened.len() <= device_idx {
        opened.resize(device_idx + 1, None);
    }
    opened[device_idx] = Some(Arc::clone(&dev));
    tracing::debug!(device_idx, "opened CUDA device");
    Ok(dev)
}

pub fn is_cuda_available() -> bool {
    device_count() > 0
}

/// Number of GPUs the driver reports; 0 when the driver cannot be loaded.
pub fn device_count() -> usize {
    match CudaDevice::count() {
        Ok(n) => usize::try_from(n).unwrap_or(0),
        Err(e) => {
            tracing::debug!(error = %e, "CUDA driver unavailable");
            0
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CudaError {
    #[error("cuda:{device} unavailable: {reason}")]
    Unavailable { device: usize, reason: String },

    #[error("NVRTC failed to compile '{module}': {msg}")]
    Compile { module: String, msg: String },

    #[error("loading module '{module}' failed: {msg}")]
    Load { module: String, msg: String },

    #[error("kernel '{func}' missing from module '{module}'")]
    MissingKernel { module: String, func: String },

    #[error("launching '{kernel}' failed: {msg}")]
    Launch { kernel: String, msg: String },

    #[error("allocating {elements} elements failed: {msg}")]
    Alloc { elements: usize, msg: String },

    #[error("device copy failed: {0}")]
    Copy(String),

    #[error("synchronizing cuda:{device} failed: {msg}")]
    Sync { device: usize, msg: String },

    #[error("operands live on cuda:{left} and cuda:{right}")]
    CrossDevice { left: usize, right: usize },
}
