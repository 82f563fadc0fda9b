//! # vela-kernels
//!
//! Strided elementwise kernels backing Vela device vectors.
//!
//! Provides:
//! - Launch settings and the grid-stride sizing policy
//! - Rayon-parallel strided kernels for the CPU device
//! - CUDA dispatch (behind `cuda` feature flag)

pub mod cpu_strided;
pub mod error;
pub mod launch;
pub mod scalar;
pub mod span;

#[cfg(feature = "cuda")]
pub mod cuda;

pub use error::KernelError;
pub use launch::{grid_stride_1d, GridDims, LaunchSettings};
pub use scalar::Scalar;
pub use span::Span;

pub type Result<T> = std::result::Result<T, KernelError>;
