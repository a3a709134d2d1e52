//! Tilevox - tiled image to voxel volume converter
//!
//! Turns a sprite sheet of equally sized tiles into a voxel model. Each tile
//! is one depth slice of the volume; pixels inside a tile are the voxels of
//! that slice. The volume can be reoriented to one of six facings before it
//! is written in the fixed `.vox` layout (dimensions, dense color indices and
//! a 256 entry palette).
//!
//! ## Architecture
//!
//! ```text
//! PNG tile sheet
//!     ↓ decode::decode_tiles()
//! Vec<VoxelRecord> + Palette (≤ 255 colors, 255 = empty)
//!     ↓ Facing::reorient()
//! Vec<VoxelRecord> in remapped Dimensions
//!     ↓ flatten::flatten()
//! VoxModel (dense color indices)
//!     ↓ vox::save_vox()
//! .vox file
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use tilevox::{convert_file, ConvertOptions, Facing};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // 8 columns x 4 rows of tiles = 32 slices
//!     let options = ConvertOptions::new(8, 4).with_facing(Facing::Top);
//!
//!     let report = convert_file("tower.png", None, &options)?;
//!     println!("{} -> {}", report.dimensions, report.output.display());
//!
//!     Ok(())
//! }
//! ```

pub mod axis;
pub mod convert;
pub mod decode;
pub mod facing;
pub mod flatten;
pub mod palette;
pub mod types;
pub mod vox;

// Re-export main types for convenience
pub use convert::{
    convert_file, default_output_path, load_image, tiles_to_model, ConversionReport,
    ConvertOptions,
};
pub use decode::{decode_tiles, DecodedTiles, PixelSource, TileGrid};
pub use facing::Facing;
pub use flatten::flatten;
pub use palette::{Palette, MAX_COLORS, PALETTE_SIZE};
pub use types::{Dimensions, Result, TilevoxError, VoxModel, VoxelRecord, EMPTY};
pub use vox::{parse_vox, save_vox, serialize_vox, write_vox};
