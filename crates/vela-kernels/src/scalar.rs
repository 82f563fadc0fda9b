//! Element types the kernels can operate on.

use std::fmt::Debug;
use std::ops::{Add, Div, Mul};

/// Extra bounds the CUDA backend needs to move a type across the driver API.
#[cfg(feature = "cuda")]
pub trait DeviceScalar:
    cudarc::driver::DeviceRepr + cudarc::driver::ValidAsZeroBits + Unpin
{
}

#[cfg(feature = "cuda")]
impl<T> DeviceScalar for T where
    T: cudarc::driver::DeviceRepr + cudarc::driver::ValidAsZeroBits + Unpin
{
}

#[cfg(not(feature = "cuda"))]
pub trait DeviceScalar {}

#[cfg(not(feature = "cuda"))]
impl<T> DeviceScalar for T {}

/// A numeric element the strided kernels understand.
///
/// `KERNEL_SUFFIX` selects the CUDA entry point (`fill_f32`, `scale_f64`, ...).
pub trait Scalar:
    DeviceScalar
    + Copy
    + Send
    + Sync
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + 'static
{
    const ZERO: Self;
    const KERNEL_SUFFIX: &'static str;
}

impl Scalar for f32 {
    const ZERO: Self = 0.0;
    const KERNEL_SUFFIX: &'static str = "f32";
}

impl Scalar for f64 {
    const ZERO: Self = 0.0;
    const KERNEL_SUFFIX: &'static str = "f64";
}
