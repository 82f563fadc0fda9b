use vela_kernels::KernelError;

use crate::{DType, Device};

/// Errors surfaced by vector allocation, transfer and kernel dispatch.
#[derive(Debug, thiserror::Error)]
pub enum VelaError {
    #[error("Failed to allocate {requested} {dtype} elements: {reason}")]
    Allocation {
        requested: usize,
        dtype: DType,
        reason: String,
    },

    #[error("Transfer failed: {0}")]
    Transfer(String),

    #[error("Size mismatch: expected {expected} elements, got {got}")]
    SizeMismatch { expected: usize, got: usize },

    #[error("Device mismatch: {left} vs {right}")]
    DeviceMismatch { left: Device, right: Device },

    #[error("Device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Kernel error: {0}")]
    Kernel(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<KernelError> for VelaError {
    fn from(err: KernelError) -> Self {
        match err {
            KernelError::LengthMismatch { left, right } => VelaError::SizeMismatch {
                expected: left,
                got: right,
            },
            KernelError::OutOfBounds { .. } | KernelError::ZeroStride => {
                VelaError::Kernel(err.to_string())
            }
            #[cfg(feature = "cuda")]
            KernelError::Cuda(e) => e.into(),
        }
    }
}

#[cfg(feature = "cuda")]
impl From<vela_kernels::cuda::CudaError> for VelaError {
    fn from(err: vela_kernels::cuda::CudaError) -> Self {
        use vela_kernels::cuda::CudaError;
        match err {
            e @ CudaError::Unavailable { .. } => VelaError::DeviceUnavailable(e.to_string()),
            CudaError::Copy(msg) => VelaError::Transfer(msg),
            CudaError::CrossDevice { left, right } => VelaError::DeviceMismatch {
                left: Device::Cuda(left),
                right: Device::Cuda(right),
            },
            other => VelaError::Kernel(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_mismatch_maps_to_size_mismatch() {
        let err: VelaError = KernelError::LengthMismatch { left: 4, right: 3 }.into();
        assert!(matches!(err, VelaError::SizeMismatch { expected: 4, got: 3 }));
    }

    #[test]
    fn test_messages() {
        let err = VelaError::DeviceMismatch {
            left: Device::Cpu,
            right: Device::Cuda(1),
        };
        assert_eq!(err.to_string(), "Device mismatch: cpu vs cuda:1");
        let err = VelaError::Allocation {
            requested: 8,
            dtype: DType::F32,
            reason: "out of memory".into(),
        };
        assert_eq!(err.to_string(), "Failed to allocate 8 f32 elements: out of memory");
    }
}
