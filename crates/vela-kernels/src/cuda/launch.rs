//! Runtime compilation of the strided kernels.
//!
//! `strided.cu` is compiled to PTX by NVRTC once per process. The PTX is then
//! loaded into each device the first time a kernel is requested there.

use std::collections::HashSet;
use std::sync::Arc;

use cudarc::driver::{CudaDevice, CudaFunction, LaunchConfig};
use cudarc::nvrtc::Ptx;
use parking_lot::Mutex;

use super::context::CudaError;
use crate::GridDims;

const STRIDED_CU: &str = include_str!("kernels/strided.cu");
const STRIDED_MODULE: &str = "vela_strided";

/// Entry points exported by `strided.cu`.
const STRIDED_FUNCS: &[&str] = &[
    "fill_f32", "scale_f32", "add_scalar_f32", "mul_f32", "div_f32",
    "fill_f64", "scale_f64", "add_scalar_f64", "mul_f64", "div_f64",
];

static PTX: Mutex<Option<Ptx>> = parking_lot::const_mutex(None);
static LOADED_ON: Mutex<Option<HashSet<usize>>> = parking_lot::const_mutex(None);

fn strided_ptx() -> Result<Ptx, CudaError> {
    let mut cached = PTX.lock();
    if let Some(ptx) = cached.as_ref() {
        return Ok(ptx.clone());
    }
    let ptx = cudarc::nvrtc::compile_ptx(STRIDED_CU).map_err(|e| CudaError::Compile {
        module: STRIDED_MODULE.to_string(),
        msg: e.to_string(),
    })?;
    tracing::debug!(module = STRIDED_MODULE, "compiled PTX");
    *cached = Some(ptx.clone());
    Ok(ptx)
}

fn load_strided(device: &Arc<CudaDevice>, device_idx: usize) -> Result<(), CudaError> {
    let mut loaded = LOADED_ON.lock();
    let loaded = loaded.get_or_insert_with(HashSet::new);
    if loaded.contains(&device_idx) {
        return Ok(());
    }
    device
        .load_ptx(strided_ptx()?, STRIDED_MODULE, STRIDED_FUNCS)
        .map_err(|e| CudaError::Load {
            module: STRIDED_MODULE.to_string(),
            msg: e.to_string(),
        })?;
    tracing::debug!(device_idx, module = STRIDED_MODULE, "loaded module");
    loaded.insert(device_idx);
    Ok(())
}

/// Handle to strided kernel `name` (e.g. `scale_f64`) on `device`.
pub fn strided_func(
    device: &Arc<CudaDevice>,
    device_idx: usize,
    name: &str,
) -> Result<CudaFunction, CudaError> {
    load_strided(device, device_idx)?;
    device
        .get_func(STRIDED_MODULE, name)
        .ok_or_else(|| CudaError::MissingKernel {
            module: STRIDED_MODULE.to_string(),
            func: name.to_string(),
        })
}

pub fn launch_config(dims: GridDims) -> LaunchConfig {
    LaunchConfig {
        grid_dim: (dims.blocks, 1, 1),
        block_dim: (dims.threads_per_block, 1, 1),
        shared_mem_bytes: 0,
    }
}
