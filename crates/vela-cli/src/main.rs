use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use vela_core::{Device, LaunchSettings, Vector};

#[derive(Parser)]
#[command(
    name = "vela",
    about = "Vela device vector CLI",
    long_about = "Strided device vectors with elementwise kernels on CPU and CUDA.\n\nUse `info` to inspect devices and launch settings, `demo` to run a\nsmall allocate/fill/scale/print round trip.",
    version,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Show available devices and launch settings
    Info,
    /// Allocate a vector, fill it, scale it and print it
    Demo {
        /// Device to run on: cpu, cuda or cuda:N
        #[arg(long, default_value = "cpu")]
        device: Device,
        /// Number of elements
        #[arg(long, default_value = "5")]
        len: usize,
        /// Fill value
        #[arg(long, default_value = "2.0")]
        fill: f64,
        /// Scale factor applied after the fill
        #[arg(long, default_value = "3.0")]
        scale: f64,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Info => cmd_info(),
        Commands::Demo { device, len, fill, scale } => cmd_demo(device, len, fill, scale),
    }
}

fn cmd_info() -> anyhow::Result<()> {
    println!("vela v{}\n", env!("CARGO_PKG_VERSION"));

    println!("Platform");
    println!("  OS:   {}", std::env::consts::OS);
    println!("  Arch: {}", std::env::consts::ARCH);

    println!("\nDevices");
    println!("  cpu:     [x]");
    print_cuda_devices();

    let settings = LaunchSettings::current();
    println!("\nLaunch settings");
    println!("  block_size:      {}", settings.block_size);
    println!("  max_grid_blocks: {}", settings.max_grid_blocks);
    println!("  cpu_min_chunk:   {}", settings.cpu_min_chunk);

    println!("\nDTypes");
    println!("  float: f32, f64");
    Ok(())
}

#[cfg(feature = "cuda")]
fn print_cuda_devices() {
    if !vela_kernels::cuda::is_cuda_available() {
        println!("  cuda:    [ ] (no devices found)");
        return;
    }
    for idx in 0..vela_kernels::cuda::device_count() {
        let device = Device::Cuda(idx);
        let mark = if device.is_available() { "[x]" } else { "[ ]" };
        println!("  {:<8} {}", format!("{device}:"), mark);
    }
}

#[cfg(not(feature = "cuda"))]
fn print_cuda_devices() {
    println!("  cuda:    [ ] (built without the `cuda` feature)");
}

fn cmd_demo(device: Device, len: usize, fill: f64, scale: f64) -> anyhow::Result<()> {
    let mut v = Vector::<f64>::allocate(device, len)
        .with_context(|| format!("allocating {len} elements on {device}"))?;
    v.fill(fill)?;
    v.scale(scale)?;
    v.print()?;
    v.release()?;
    Ok(())
}
