//! Vector operations.
//!
//! All operations write in place through the vector's layout; nothing here
//! reallocates. Mutating operations live on [`VectorViewMut`](crate::VectorViewMut)
//! and are mirrored on [`Vector`](crate::Vector).

pub mod elementwise;
pub mod print;
pub mod transfer;

pub use print::format_scientific;
