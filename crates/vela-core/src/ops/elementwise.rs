//! In-place elementwise kernels: fill, scale, add-constant, multiply, divide.

use crate::storage::{BinaryOp, ScalarOp};
use crate::{AsView, Element, Result, Vector, VectorViewMut};

impl<T: Element> VectorViewMut<'_, T> {
    fn scalar_op(&mut self, op: ScalarOp, value: T) -> Result<()> {
        let (storage, layout) = self.parts_mut();
        storage.apply_scalar(layout, op, value)
    }

    fn binary_op<V: AsView<T> + ?Sized>(&mut self, other: &V, op: BinaryOp) -> Result<()> {
        let other = other.as_view();
        let (storage, layout) = self.parts_mut();
        storage.apply_binary(layout, other.storage(), other.layout(), op)
    }

    /// Set every element to `value`.
    pub fn fill(&mut self, value: T) -> Result<()> {
        self.scalar_op(ScalarOp::Fill, value)
    }

    /// `self[i] *= factor`
    pub fn scale(&mut self, factor: T) -> Result<()> {
        self.scalar_op(ScalarOp::Scale, factor)
    }

    /// `self[i] += constant`
    pub fn add_constant(&mut self, constant: T) -> Result<()> {
        self.scalar_op(ScalarOp::AddConstant, constant)
    }

    /// `self[i] *= other[i]`. Lengths must match; strides may differ.
    pub fn multiply<V: AsView<T> + ?Sized>(&mut self, other: &V) -> Result<()> {
        self.binary_op(other, BinaryOp::Multiply)
    }

    /// `self[i] /= other[i]`. Zero divisors give IEEE infinities/NaN.
    pub fn divide<V: AsView<T> + ?Sized>(&mut self, other: &V) -> Result<()> {
        self.binary_op(other, BinaryOp::Divide)
    }
}

impl<T: Element> Vector<T> {
    /// Set every element to `value`.
    pub fn fill(&mut self, value: T) -> Result<()> {
        self.view_mut().fill(value)
    }

    /// `self[i] *= factor`
    pub fn scale(&mut self, factor: T) -> Result<()> {
        self.view_mut().scale(factor)
    }

    /// `self[i] += constant`
    pub fn add_constant(&mut self, constant: T) -> Result<()> {
        self.view_mut().add_constant(constant)
    }

    /// `self[i] *= other[i]`. Lengths must match.
    pub fn multiply<V: AsView<T> + ?Sized>(&mut self, other: &V) -> Result<()> {
        self.view_mut().multiply(other)
    }

    /// `self[i] /= other[i]`. Lengths must match.
    pub fn divide<V: AsView<T> + ?Sized>(&mut self, other: &V) -> Result<()> {
        self.view_mut().divide(other)
    }
}

#[cfg(test)]
mod tests {
    use crate::{Device, Vector, VelaError};

    fn cpu(data: &[f64]) -> Vector<f64> {
        Vector::from_host(Device::Cpu, data).unwrap()
    }

    #[test]
    fn test_fill_then_scale() {
        let mut v = Vector::<f64>::allocate(Device::Cpu, 5).unwrap();
        v.fill(2.0).unwrap();
        v.scale(3.0).unwrap();
        assert_eq!(v.to_host_vec().unwrap(), vec![6.0; 5]);
    }

    #[test]
    fn test_multiply() {
        let mut a = cpu(&[1.0, 2.0, 3.0, 4.0]);
        let b = cpu(&[1.0, 2.0, 3.0, 4.0]);
        a.multiply(&b).unwrap();
        assert_eq!(a.to_host_vec().unwrap(), vec![1.0, 4.0, 9.0, 16.0]);
    }

    #[test]
    fn test_divide() {
        let mut a = cpu(&[10.0, 20.0, 30.0, 40.0]);
        let b = cpu(&[2.0, 4.0, 5.0, 8.0]);
        a.divide(&b).unwrap();
        assert_eq!(a.to_host_vec().unwrap(), vec![5.0, 5.0, 6.0, 5.0]);
    }

    #[test]
    fn test_add_constant() {
        let mut a = cpu(&[1.0, -1.0]);
        a.add_constant(0.5).unwrap();
        assert_eq!(a.to_host_vec().unwrap(), vec![1.5, -0.5]);
    }

    #[test]
    fn test_size_mismatch_leaves_target_untouched() {
        let mut a = cpu(&[1.0, 2.0, 3.0]);
        let b = cpu(&[1.0, 2.0]);
        let err = a.multiply(&b).unwrap_err();
        assert!(matches!(err, VelaError::SizeMismatch { expected: 3, got: 2 }));
        assert_eq!(a.to_host_vec().unwrap(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_strided_view_ops_touch_only_view() {
        let mut v = cpu(&[1.0, 1.0, 1.0, 1.0, 1.0, 1.0]);
        v.strided_mut(2).scale(5.0).unwrap();
        assert_eq!(v.to_host_vec().unwrap(), vec![5.0, 1.0, 5.0, 1.0, 5.0, 1.0]);
    }

    #[test]
    fn test_multiply_by_view_with_other_stride() {
        let mut a = cpu(&[1.0, 2.0, 3.0]);
        let b = cpu(&[10.0, 0.0, 20.0, 0.0, 30.0]);
        a.multiply(&b.strided(2)).unwrap();
        assert_eq!(a.to_host_vec().unwrap(), vec![10.0, 40.0, 90.0]);
    }

    #[test]
    fn test_subvector_fill() {
        let mut v = Vector::<f32>::allocate_zeroed(Device::Cpu, 5).unwrap();
        v.subvector_mut(1, 3).fill(7.0).unwrap();
        assert_eq!(v.to_host_vec().unwrap(), vec![0.0, 7.0, 7.0, 7.0, 0.0]);
    }

    #[test]
    fn test_empty_vector_ops() {
        let mut v = Vector::<f32>::allocate(Device::Cpu, 0).unwrap();
        v.fill(1.0).unwrap();
        v.scale(2.0).unwrap();
        let w = Vector::<f32>::allocate(Device::Cpu, 0).unwrap();
        v.multiply(&w).unwrap();
        assert!(v.to_host_vec().unwrap().is_empty());
    }
}
