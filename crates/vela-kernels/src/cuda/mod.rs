//! CUDA GPU backend for Vela.
//!
//! Provides:
//! - Device context management (lazy singleton per GPU)
//! - Typed device buffers with host<->device and device<->device copies
//! - Kernel loader with NVRTC compilation and per-device caching
//! - Grid-stride strided kernels (fill, scale, add, mul, div)

pub mod context;
pub mod launch;
pub mod memory;
pub mod ops;

pub use context::{device_count, get_device, is_cuda_available, CudaError};
pub use memory::CudaBuffer;
