//! Host<->device and device<->device copies.
//!
//! Raw copies (`copy_from_host`, `copy_to_host`, `copy_from`) move
//! `len` consecutive elements and therefore require stride 1 on every
//! vector operand; a strided operand is rejected with
//! [`VelaError::Transfer`](crate::VelaError::Transfer) before any memory
//! is touched. [`to_host_vec`](crate::VectorView::to_host_vec) is the one
//! read-back that follows the stride.

use crate::{AsView, Element, Result, Vector, VectorView, VectorViewMut};

impl<T: Element> VectorViewMut<'_, T> {
    /// Upload the first `self.len()` elements of `src`.
    pub fn copy_from_host(&mut self, src: &[T]) -> Result<()> {
        tracing::debug!(device = %self.device(), len = self.len(), "copy host -> device");
        let (storage, layout) = self.parts_mut();
        storage.write_host(layout, src)
    }

    /// Copy the first `self.len()` elements of `src` into this view.
    ///
    /// `src` may live on another device.
    pub fn copy_from<V: AsView<T> + ?Sized>(&mut self, src: &V) -> Result<()> {
        let src = src.as_view();
        tracing::debug!(
            from = %src.device(),
            to = %self.device(),
            len = self.len(),
            "copy device -> device"
        );
        let (storage, layout) = self.parts_mut();
        storage.copy_from(layout, src.storage(), src.layout())
    }

    /// Download all elements into the front of `dst`.
    pub fn copy_to_host(&self, dst: &mut [T]) -> Result<()> {
        self.as_view().copy_to_host(dst)
    }

    /// Gather all elements, following the stride, into a new host vector.
    pub fn to_host_vec(&self) -> Result<Vec<T>> {
        self.as_view().to_host_vec()
    }
}

impl<T: Element> VectorView<'_, T> {
    /// Download all elements into the front of `dst`.
    pub fn copy_to_host(&self, dst: &mut [T]) -> Result<()> {
        tracing::debug!(device = %self.device(), len = self.len(), "copy device -> host");
        self.storage().read_host(self.layout(), dst)
    }

    /// Gather all elements, following the stride, into a new host vector.
    pub fn to_host_vec(&self) -> Result<Vec<T>> {
        self.storage().gather(self.layout())
    }
}

impl<T: Element> Vector<T> {
    /// Upload the first `self.len()` elements of `src`.
    pub fn copy_from_host(&mut self, src: &[T]) -> Result<()> {
        self.view_mut().copy_from_host(src)
    }

    /// Copy the first `self.len()` elements of `src` into this vector.
    pub fn copy_from<V: AsView<T> + ?Sized>(&mut self, src: &V) -> Result<()> {
        self.view_mut().copy_from(src)
    }

    /// Download all elements into the front of `dst`.
    pub fn copy_to_host(&self, dst: &mut [T]) -> Result<()> {
        self.as_view().copy_to_host(dst)
    }

    /// Download all elements into a new host vector.
    pub fn to_host_vec(&self) -> Result<Vec<T>> {
        self.as_view().to_host_vec()
    }
}
