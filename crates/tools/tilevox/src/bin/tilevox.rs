//! Tilevox CLI - convert a tiled PNG into a `.vox` voxel volume

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tilevox::{convert_file, ConvertOptions, Facing};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tilevox")]
#[command(
    author,
    version,
    about = "Convert an image made of tile slices into a .vox voxel model"
)]
struct Cli {
    /// Input image file
    #[arg(short, long)]
    input: PathBuf,

    /// Output .vox file (default: input path with a .vox extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of tile columns
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    cols: u32,

    /// Number of tile rows
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    rows: u32,

    /// Which way the model faces: front, back, top, bottom, left or right
    #[arg(short, long, default_value_t = Facing::Front)]
    face: Facing,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let options = ConvertOptions::new(cli.cols, cli.rows).with_facing(cli.face);
    let report = convert_file(&cli.input, cli.output.as_deref(), &options)
        .with_context(|| format!("Failed to convert {}", cli.input.display()))?;

    println!("VOX file written to {}", report.output.display());
    println!();
    println!("Statistics:");
    println!(
        "  Tiles:       {} ({}x{} px)",
        report.tile.depth, report.tile.width, report.tile.height
    );
    println!("  Facing:      {}", options.facing);
    println!("  Dimensions:  {}", report.dimensions);
    println!("  Colors:      {}", report.colors);
    println!("  Solid:       {} voxels", report.solid_voxels);
    println!("  File size:   {} bytes", report.bytes_written);

    Ok(())
}
