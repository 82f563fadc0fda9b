//! GPU integration tests for the CUDA device.
//! Run with: cargo test -p vela-core --features cuda -- --nocapture

#![cfg(feature = "cuda")]

use vela_core::{Device, Vector, VelaError};

const GPU: Device = Device::Cuda(0);

// ============================================================================
// Lifecycle and transfers
// ============================================================================

#[test]
fn test_cuda_host_roundtrip() {
    let data = vec![1.0f32, 2.0, 3.0, 4.0, 5.0, 6.0];
    let v = Vector::from_host(GPU, &data).expect("Failed to upload");
    assert_eq!(v.device(), GPU);
    let mut back = vec![0.0f32; 6];
    v.copy_to_host(&mut back).unwrap();
    assert_eq!(back, data);
    v.release().unwrap();
}

#[test]
fn test_cuda_allocate_zeroed() {
    let v = Vector::<f64>::allocate_zeroed(GPU, 10_000).unwrap();
    assert!(v.to_host_vec().unwrap().iter().all(|&x| x == 0.0));
}

#[test]
fn test_cuda_empty_vector() {
    let mut v = Vector::<f32>::allocate(GPU, 0).unwrap();
    v.fill(1.0).unwrap();
    assert!(v.to_host_vec().unwrap().is_empty());
}

#[test]
fn test_cuda_cross_device_copies() {
    let cpu = Vector::from_host(Device::Cpu, &[1.0f32, 2.0, 3.0]).unwrap();
    let mut gpu = Vector::<f32>::allocate(GPU, 3).unwrap();
    gpu.copy_from(&cpu).unwrap();
    let mut back = Vector::<f32>::allocate(Device::Cpu, 3).unwrap();
    back.copy_from(&gpu).unwrap();
    assert_eq!(back.to_host_vec().unwrap(), vec![1.0, 2.0, 3.0]);
}

// ============================================================================
// Kernels
// ============================================================================

#[test]
fn test_cuda_fill_scale() {
    let mut v = Vector::<f64>::allocate(GPU, 5).unwrap();
    v.fill(2.0).unwrap();
    v.scale(3.0).unwrap();
    assert_eq!(v.to_host_vec().unwrap(), vec![6.0; 5]);
}

#[test]
fn test_cuda_fill_exceeds_grid() {
    // More elements than max_grid_blocks * block_size threads.
    let n = 1024 * 256 * 3 + 17;
    let mut v = Vector::<f32>::allocate(GPU, n).unwrap();
    v.fill(4.0).unwrap();
    assert!(v.to_host_vec().unwrap().iter().all(|&x| x == 4.0));
}

#[test]
fn test_cuda_multiply_divide() {
    let mut a = Vector::from_host(GPU, &[1.0f32, 2.0, 3.0, 4.0]).unwrap();
    let b = Vector::from_host(GPU, &[1.0f32, 2.0, 3.0, 4.0]).unwrap();
    a.multiply(&b).unwrap();
    assert_eq!(a.to_host_vec().unwrap(), vec![1.0, 4.0, 9.0, 16.0]);
    a.divide(&b).unwrap();
    assert_eq!(a.to_host_vec().unwrap(), vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_cuda_strided_views() {
    let mut v = Vector::from_host(GPU, &[1.0f64, 1.0, 1.0, 1.0, 1.0, 1.0]).unwrap();
    v.strided_mut(2).add_constant(4.0).unwrap();
    assert_eq!(v.to_host_vec().unwrap(), vec![5.0, 1.0, 5.0, 1.0, 5.0, 1.0]);
    assert_eq!(v.strided(2).subvector(1, 2).to_host_vec().unwrap(), vec![5.0, 5.0]);
}

#[test]
fn test_cuda_subvector() {
    let v = Vector::from_host(GPU, &[10.0f64, 20.0, 30.0, 40.0, 50.0]).unwrap();
    assert_eq!(v.subvector(1, 3).to_host_vec().unwrap(), vec![20.0, 30.0, 40.0]);
}

#[test]
fn test_cuda_device_mismatch() {
    let mut a = Vector::from_host(GPU, &[1.0f32, 2.0]).unwrap();
    let b = Vector::from_host(Device::Cpu, &[1.0f32, 2.0]).unwrap();
    assert!(matches!(a.multiply(&b), Err(VelaError::DeviceMismatch { .. })));
}
