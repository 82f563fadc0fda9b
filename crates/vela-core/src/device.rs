//! Device identifiers and parsing.

use std::fmt;
use std::str::FromStr;

/// Memory space a [`Vector`](crate::Vector) lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Device {
    /// Host memory; kernels run on the rayon pool.
    #[default]
    Cpu,
    /// GPU ordinal as seen by the CUDA driver.
    Cuda(usize),
}

impl Device {
    /// Whether memory can be allocated here in this build.
    ///
    /// Opens the GPU on first call for CUDA devices.
    pub fn is_available(&self) -> bool {
        match *self {
            Device::Cpu => true,
            #[cfg(feature = "cuda")]
            Device::Cuda(ordinal) => vela_kernels::cuda::get_device(ordinal).is_ok(),
            #[cfg(not(feature = "cuda"))]
            Device::Cuda(_) => false,
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Device::Cpu => f.write_str("cpu"),
            Device::Cuda(ordinal) => write!(f, "cuda:{ordinal}"),
        }
    }
}

/// Error from parsing a [`Device`] name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown device '{0}' (expected cpu, cuda or cuda:N)")]
pub struct ParseDeviceError(String);

impl FromStr for Device {
    type Err = ParseDeviceError;

    /// Accepts `cpu`, `cuda` (ordinal 0) and `cuda:N`, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        if name == "cpu" {
            return Ok(Device::Cpu);
        }
        let ordinal = match name.strip_prefix("cuda") {
            Some("") => Some(0),
            Some(rest) => rest.strip_prefix(':').and_then(|n| n.parse().ok()),
            None => None,
        };
        ordinal.map(Device::Cuda).ok_or_else(|| ParseDeviceError(s.to_string()))
    }
}
