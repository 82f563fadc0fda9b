//! # vela-core
//!
//! Strided device vectors: the base numeric container for Vela's linear
//! algebra.
//!
//! Provides:
//! - [`Vector`], an owning allocation on a [`Device`] with stride 1
//! - [`VectorView`] / [`VectorViewMut`], non-owning strided windows into a vector
//! - Host<->device and device<->device transfers
//! - Parallel elementwise kernels (fill, scale, add, multiply, divide)
//! - A diagnostic printer
//!
//! ```
//! use vela_core::{Device, Vector};
//!
//! let mut v = Vector::<f64>::allocate(Device::Cpu, 5).unwrap();
//! v.fill(2.0).unwrap();
//! v.scale(3.0).unwrap();
//! assert_eq!(v.to_host_vec().unwrap(), vec![6.0; 5]);
//!
//! let w = Vector::from_host(Device::Cpu, &[10.0f32, 20.0, 30.0, 40.0, 50.0]).unwrap();
//! assert_eq!(w.subvector(1, 3).to_host_vec().unwrap(), vec![20.0, 30.0, 40.0]);
//! ```

pub mod device;
pub mod element;
pub mod error;
pub mod layout;
pub mod ops;
pub mod prelude;
pub mod storage;
pub mod vector;

pub use device::Device;
pub use element::{DType, Element};
pub use error::VelaError;
pub use layout::StridedLayout;
pub use vector::{AsView, Vector, VectorView, VectorViewMut};

pub use vela_kernels::LaunchSettings;

pub type Result<T> = std::result::Result<T, VelaError>;
