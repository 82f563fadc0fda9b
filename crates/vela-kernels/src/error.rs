/// Errors raised by kernel dispatch, independent of the vector layer.
#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    #[error("strided span ends at {end} but the buffer holds {capacity} elements")]
    OutOfBounds { end: usize, capacity: usize },

    #[error("operand lengths differ: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("stride must be at least 1")]
    ZeroStride,

    #[cfg(feature = "cuda")]
    #[error(transparent)]
    Cuda(#[from] crate::cuda::CudaError),
}
