//! Benchmark: strided elementwise kernels on the CPU device, dense vs. strided.

use std::time::Instant;

use vela_core::{Device, Vector};

fn bench<F: FnMut()>(iters: usize, mut f: F) -> f64 {
    f();
    let start = Instant::now();
    for _ in 0..iters {
        f();
    }
    start.elapsed().as_secs_f64() / iters as f64
}

fn gbps(bytes: usize, secs: f64) -> f64 {
    bytes as f64 / secs / 1e9
}

fn main() {
    println!("=== Vela Strided Kernel Benchmark ===");
    println!("threads: {}\n", available_threads());

    println!("{:<12} {:>8} {:>12} {:>12} {:>12}",
        "Len", "Stride", "fill (ms)", "scale (ms)", "mul GB/s");
    println!("{}", "-".repeat(60));

    for &len in &[1 << 12, 1 << 16, 1 << 20, 1 << 24] {
        for &step in &[1usize, 4] {
            let mut a = Vector::<f32>::allocate_zeroed(Device::Cpu, len * step).unwrap();
            let b = Vector::<f32>::from_host(Device::Cpu, &vec![1.0001f32; len]).unwrap();
            let iters = (1 << 26) / len.max(1);
            let iters = iters.clamp(3, 200);

            let fill = bench(iters, || a.strided_mut(step).fill(1.0).unwrap());
            let scale = bench(iters, || a.strided_mut(step).scale(0.999).unwrap());
            let mul = bench(iters, || a.strided_mut(step).multiply(&b).unwrap());

            println!("{:<12} {:>8} {:>12.3} {:>12.3} {:>12.2}",
                len, step, fill * 1e3, scale * 1e3,
                gbps(3 * len * std::mem::size_of::<f32>(), mul));
        }
    }
}

fn available_threads() -> usize {
    std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
}
