//! Owning vectors and non-owning strided views.
//!
//! A [`Vector`] owns one device allocation and always has stride 1. Views
//! borrow a vector (or another view) and describe a strided window into it:
//! [`VectorView`] is `Copy` and read-only, [`VectorViewMut`] is unique and
//! writable. The borrow checker keeps every view inside its parent's
//! lifetime, and only `Vector` has a [`release`](Vector::release) method.

use std::fmt;

use crate::storage::Storage;
use crate::{Device, Element, Result, StridedLayout};

/// An owning, densely packed vector of `T` on a device.
pub struct Vector<T: Element> {
    storage: Storage<T>,
}

/// A read-only strided window into a vector.
pub struct VectorView<'a, T: Element> {
    storage: &'a Storage<T>,
    layout: StridedLayout,
}

/// A writable strided window into a vector.
pub struct VectorViewMut<'a, T: Element> {
    storage: &'a mut Storage<T>,
    layout: StridedLayout,
}

/// Anything that can be read as a strided view.
pub trait AsView<T: Element> {
    fn as_view(&self) -> VectorView<'_, T>;
}

impl<T: Element> Vector<T> {
    /// Reserve `len` elements on `device`. Contents are unspecified.
    pub fn allocate(device: Device, len: usize) -> Result<Self> {
        let storage = Storage::allocate(device, len)?;
        tracing::debug!(%device, len, dtype = %T::DTYPE, "allocate");
        Ok(Self { storage })
    }

    /// Reserve `len` elements on `device` and set them all to zero.
    pub fn allocate_zeroed(device: Device, len: usize) -> Result<Self> {
        let mut v = Self::allocate(device, len)?;
        v.fill(T::ZERO)?;
        Ok(v)
    }

    /// Allocate on `device` and upload `data`.
    pub fn from_host(device: Device, data: &[T]) -> Result<Self> {
        let storage = Storage::from_host(device, data)?;
        tracing::debug!(%device, len = data.len(), dtype = %T::DTYPE, "allocate from host");
        Ok(Self { storage })
    }

    /// Free the backing memory.
    ///
    /// Waits for outstanding device work first and reports any asynchronous
    /// kernel failure. Dropping a vector frees it without that check.
    pub fn release(self) -> Result<()> {
        self.storage.synchronize()?;
        tracing::debug!(device = %self.device(), len = self.len(), "release");
        drop(self);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.storage.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Always 1 for an owning vector.
    pub fn stride(&self) -> usize {
        1
    }

    pub fn device(&self) -> Device {
        self.storage.device()
    }

    pub fn layout(&self) -> StridedLayout {
        StridedLayout::contiguous(self.len())
    }

    /// The backing storage, for backend-specific integrations.
    pub fn storage(&self) -> &Storage<T> {
        &self.storage
    }

    /// Block until queued work on this vector's device has finished.
    pub fn synchronize(&self) -> Result<()> {
        self.storage.synchronize()
    }

    /// A writable view of the whole vector.
    pub fn view_mut(&mut self) -> VectorViewMut<'_, T> {
        let layout = self.layout();
        VectorViewMut {
            storage: &mut self.storage,
            layout,
        }
    }

    /// Elements `offset..offset + len` as a read-only view.
    ///
    /// # Panics
    /// If `offset + len > self.len()`.
    pub fn subvector(&self, offset: usize, len: usize) -> VectorView<'_, T> {
        self.as_view().subvector(offset, len)
    }

    /// Elements `offset..offset + len` as a writable view.
    ///
    /// # Panics
    /// If `offset + len > self.len()`.
    pub fn subvector_mut(&mut self, offset: usize, len: usize) -> VectorViewMut<'_, T> {
        self.view_mut().into_subvector(offset, len)
    }

    /// Every `step`-th element as a read-only view.
    pub fn strided(&self, step: usize) -> VectorView<'_, T> {
        self.as_view().strided(step)
    }

    /// Every `step`-th element as a writable view.
    pub fn strided_mut(&mut self, step: usize) -> VectorViewMut<'_, T> {
        self.view_mut().into_strided(step)
    }
}

impl<T: Element> AsView<T> for Vector<T> {
    fn as_view(&self) -> VectorView<'_, T> {
        VectorView {
            storage: &self.storage,
            layout: self.layout(),
        }
    }
}

impl<'a, T: Element> VectorView<'a, T> {
    pub fn len(&self) -> usize {
        self.layout.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    pub fn stride(&self) -> usize {
        self.layout.stride()
    }

    /// Index of logical element 0 inside the parent allocation.
    pub fn offset(&self) -> usize {
        self.layout.offset()
    }

    pub fn device(&self) -> Device {
        self.storage.device()
    }

    pub fn layout(&self) -> StridedLayout {
        self.layout
    }

    pub(crate) fn storage(&self) -> &'a Storage<T> {
        self.storage
    }

    /// A narrower view sharing this view's stride.
    ///
    /// # Panics
    /// If `offset + len > self.len()`.
    pub fn subvector(&self, offset: usize, len: usize) -> VectorView<'a, T> {
        VectorView {
            storage: self.storage,
            layout: self.layout.subrange(offset, len),
        }
    }

    /// Every `step`-th element of this view.
    ///
    /// # Panics
    /// If `step == 0`.
    pub fn strided(&self, step: usize) -> VectorView<'a, T> {
        VectorView {
            storage: self.storage,
            layout: self.layout.step_by(step),
        }
    }
}

impl<T: Element> Clone for VectorView<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: Element> Copy for VectorView<'_, T> {}

impl<T: Element> AsView<T> for VectorView<'_, T> {
    fn as_view(&self) -> VectorView<'_, T> {
        *self
    }
}

impl<'a, T: Element> VectorViewMut<'a, T> {
    pub fn len(&self) -> usize {
        self.layout.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layout.is_empty()
    }

    pub fn stride(&self) -> usize {
        self.layout.stride()
    }

    pub fn offset(&self) -> usize {
        self.layout.offset()
    }

    pub fn device(&self) -> Device {
        self.storage.device()
    }

    pub fn layout(&self) -> StridedLayout {
        self.layout
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut Storage<T>, StridedLayout) {
        (&mut *self.storage, self.layout)
    }

    /// Reborrow as a shorter-lived writable view.
    pub fn reborrow(&mut self) -> VectorViewMut<'_, T> {
        VectorViewMut {
            storage: &mut *self.storage,
            layout: self.layout,
        }
    }

    /// A narrower writable view borrowing this one.
    ///
    /// # Panics
    /// If `offset + len > self.len()`.
    pub fn subvector_mut(&mut self, offset: usize, len: usize) -> VectorViewMut<'_, T> {
        self.reborrow().into_subvector(offset, len)
    }

    /// Consume this view, narrowing it to `offset..offset + len`.
    pub fn into_subvector(self, offset: usize, len: usize) -> VectorViewMut<'a, T> {
        VectorViewMut {
            layout: self.layout.subrange(offset, len),
            storage: self.storage,
        }
    }

    /// Consume this view, keeping every `step`-th element.
    pub fn into_strided(self, step: usize) -> VectorViewMut<'a, T> {
        VectorViewMut {
            layout: self.layout.step_by(step),
            storage: self.storage,
        }
    }

    /// Elements `offset..offset + len` of this view, read-only.
    ///
    /// # Panics
    /// If `offset + len > self.len()`.
    pub fn subvector(&self, offset: usize, len: usize) -> VectorView<'_, T> {
        self.as_view().subvector(offset, len)
    }
}

impl<T: Element> AsView<T> for VectorViewMut<'_, T> {
    fn as_view(&self) -> VectorView<'_, T> {
        VectorView {
            storage: &*self.storage,
            layout: self.layout,
        }
    }
}

impl<T: Element> fmt::Debug for Vector<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("device", &self.device())
            .field("dtype", &T::DTYPE)
            .field("len", &self.len())
            .finish()
    }
}

impl<T: Element> fmt::Debug for VectorView<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorView")
            .field("device", &self.device())
            .field("dtype", &T::DTYPE)
            .field("layout", &self.layout)
            .finish()
    }
}

impl<T: Element> fmt::Debug for VectorViewMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VectorViewMut")
            .field("device", &self.device())
            .field("dtype", &T::DTYPE)
            .field("layout", &self.layout)
            .finish()
    }
}
