//! Launch settings and the grid-stride sizing policy.
//!
//! Both backends read the same process-wide [`LaunchSettings`]: CUDA uses the
//! block/grid limits, the CPU backend uses `cpu_min_chunk` as the smallest
//! unit of work rayon may split off.

use std::sync::OnceLock;

use parking_lot::RwLock;

/// Threads per block for 1-D launches.
pub const DEFAULT_BLOCK_SIZE: usize = 256;
/// Upper bound on blocks per launch; larger inputs are covered by the grid-stride loop.
pub const DEFAULT_MAX_GRID_BLOCKS: usize = 1024;
/// Minimum elements per rayon task.
pub const DEFAULT_CPU_MIN_CHUNK: usize = 4096;

const ENV_BLOCK_SIZE: &str = "VELA_BLOCK_SIZE";
const ENV_MAX_GRID_BLOCKS: &str = "VELA_MAX_GRID_BLOCKS";
const ENV_CPU_MIN_CHUNK: &str = "VELA_CPU_MIN_CHUNK";

static SETTINGS: OnceLock<RwLock<LaunchSettings>> = OnceLock::new();

fn settings_cell() -> &'static RwLock<LaunchSettings> {
    SETTINGS.get_or_init(|| RwLock::new(LaunchSettings::from_env()))
}

/// Tunables for kernel launches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LaunchSettings {
    pub block_size: usize,
    pub max_grid_blocks: usize,
    pub cpu_min_chunk: usize,
}

impl Default for LaunchSettings {
    fn default() -> Self {
        Self {
            block_size: DEFAULT_BLOCK_SIZE,
            max_grid_blocks: DEFAULT_MAX_GRID_BLOCKS,
            cpu_min_chunk: DEFAULT_CPU_MIN_CHUNK,
        }
    }
}

impl LaunchSettings {
    /// Defaults overridden by `VELA_BLOCK_SIZE`, `VELA_MAX_GRID_BLOCKS` and
    /// `VELA_CPU_MIN_CHUNK`. Unparseable or zero values are ignored.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let read = |key: &str, fallback: usize| -> usize {
            let Some(raw) = lookup(key) else {
                return fallback;
            };
            match raw.trim().parse::<usize>() {
                Ok(v) if v > 0 => v,
                _ => {
                    tracing::warn!("ignoring {}={:?}, using {}", key, raw, fallback);
                    fallback
                }
            }
        };
        Self {
            block_size: read(ENV_BLOCK_SIZE, defaults.block_size),
            max_grid_blocks: read(ENV_MAX_GRID_BLOCKS, defaults.max_grid_blocks),
            cpu_min_chunk: read(ENV_CPU_MIN_CHUNK, defaults.cpu_min_chunk),
        }
    }

    /// Settings currently in effect for this process.
    pub fn current() -> Self {
        *settings_cell().read()
    }

    /// Replace the process-wide settings.
    pub fn install(self) {
        tracing::debug!(settings = ?self, "installing launch settings");
        *settings_cell().write() = self;
    }
}

/// Block and grid sizes for a 1-D launch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDims {
    pub blocks: u32,
    pub threads_per_block: u32,
}

impl GridDims {
    /// Total threads launched; each handles `ceil(n / total)` indices.
    pub fn total_threads(&self) -> usize {
        self.blocks as usize * self.threads_per_block as usize
    }
}

/// Grid sizing for a grid-stride kernel over `n` elements.
///
/// The grid is capped at `max_grid_blocks`; kernels loop with a stride of
/// `total_threads()` so every index below `n` is visited exactly once.
/// Returns `None` when `n == 0` (nothing to launch).
pub fn grid_stride_1d(n: usize, settings: &LaunchSettings) -> Option<GridDims> {
    if n == 0 {
        return None;
    }
    let block = settings.block_size.max(1);
    let blocks = ((n + block - 1) / block).min(settings.max_grid_blocks.max(1));
    Some(GridDims {
        blocks: blocks as u32,
        threads_per_block: block as u32,
    })
}
