//! Glob-import for code that works with vectors and views.
//!
//! ```rust
//! use vela_core::prelude::*;
//!
//! let v = Vector::<f32>::allocate_zeroed(Device::Cpu, 3)?;
//! assert_eq!(v.as_view().len(), 3);
//! # Ok::<(), VelaError>(())
//! ```

pub use crate::{AsView, Device, Element, Result, StridedLayout, VelaError};
pub use crate::{Vector, VectorView, VectorViewMut};
