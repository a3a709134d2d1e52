//! Tile sheet to `.vox` conversion pipeline
//!
//! Runs the stages in order, each consuming the previous stage's output:
//!
//! ```text
//! PixelSource ──decode_tiles──▶ voxels + palette
//!             ──Facing::reorient──▶ voxels in remapped dimensions
//!             ──flatten──▶ dense VoxModel
//!             ──save_vox──▶ .vox file
//! ```

use std::path::{Path, PathBuf};

use crate::decode::{decode_tiles, DecodedTiles, PixelSource, TileGrid};
use crate::facing::Facing;
use crate::flatten::flatten;
use crate::types::{Dimensions, Result, TilevoxError, VoxModel};
use crate::vox::save_vox;

/// Extension given to generated output files
pub const VOX_EXTENSION: &str = "vox";

/// Parameters for a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
    pub grid: TileGrid,
    pub facing: Facing,
}

impl ConvertOptions {
    /// Options for a `cols × rows` tile sheet, facing front
    pub fn new(cols: u32, rows: u32) -> Self {
        Self {
            grid: TileGrid::new(cols, rows),
            facing: Facing::default(),
        }
    }

    pub fn with_facing(mut self, facing: Facing) -> Self {
        self.facing = facing;
        self
    }
}

/// Summary of a finished file conversion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionReport {
    pub output: PathBuf,
    /// `(tile_w, tile_h, slice_count)` before reorientation
    pub tile: Dimensions,
    pub dimensions: Dimensions,
    pub colors: usize,
    pub solid_voxels: usize,
    pub bytes_written: usize,
}

/// Convert a decoded tile sheet into a dense model
///
/// # Example
///
/// ```
/// use image::{Rgba, RgbaImage};
/// use tilevox::{tiles_to_model, ConvertOptions, Dimensions, Facing};
///
/// // Two 2x2 tiles side by side
/// let image = RgbaImage::from_pixel(4, 2, Rgba([200, 10, 10, 255]));
/// let options = ConvertOptions::new(2, 1).with_facing(Facing::Top);
///
/// let model = tiles_to_model(&image, &options).unwrap();
/// assert_eq!(model.dimensions, Dimensions::new(2, 2, 2));
/// assert_eq!(model.palette.len(), 1);
/// assert_eq!(model.solid_count(), 8);
/// ```
pub fn tiles_to_model<S: PixelSource + ?Sized>(
    source: &S,
    options: &ConvertOptions,
) -> Result<VoxModel> {
    let decoded = decode_tiles(source, options.grid)?;
    stack_tiles(decoded, options.facing)
}

/// Reorient decoded tiles and flatten them into a dense model
fn stack_tiles(decoded: DecodedTiles, facing: Facing) -> Result<VoxModel> {
    let (voxels, dimensions) = facing.reorient(decoded.voxels, decoded.tile);
    let dense = flatten(&voxels, dimensions)?;

    Ok(VoxModel {
        dimensions,
        voxels: dense,
        palette: decoded.palette,
    })
}

/// Open an image file as RGBA
pub fn load_image(path: impl AsRef<Path>) -> Result<image::RgbaImage> {
    let path = path.as_ref();
    let image = image::open(path).map_err(|source| TilevoxError::ImageAccess {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(image.to_rgba8())
}

/// Output path used when none is given: the input with a `.vox` extension
///
/// ```
/// use std::path::Path;
/// use tilevox::default_output_path;
///
/// assert_eq!(default_output_path("art/ship.png"), Path::new("art/ship.vox"));
/// assert_eq!(default_output_path("sheet"), Path::new("sheet.vox"));
/// ```
pub fn default_output_path(input: impl AsRef<Path>) -> PathBuf {
    input.as_ref().with_extension(VOX_EXTENSION)
}

/// Load `input`, convert it and write the model to `output`
///
/// `output` defaults to [`default_output_path`]. Nothing is written unless
/// every stage succeeds.
pub fn convert_file(
    input: impl AsRef<Path>,
    output: Option<&Path>,
    options: &ConvertOptions,
) -> Result<ConversionReport> {
    let input = input.as_ref();
    let output = output.map_or_else(|| default_output_path(input), Path::to_path_buf);

    tracing::info!(
        input = %input.display(),
        output = %output.display(),
        cols = options.grid.cols,
        rows = options.grid.rows,
        facing = %options.facing,
        "Converting tile sheet"
    );

    let image = load_image(input)?;
    let decoded = decode_tiles(&image, options.grid)?;
    let tile = decoded.tile;
    let model = stack_tiles(decoded, options.facing)?;
    let bytes_written = save_vox(&output, &model)?;

    tracing::info!(
        %tile,
        dimensions = %model.dimensions,
        colors = model.palette.len(),
        bytes = bytes_written,
        "VOX file written to {}",
        output.display()
    );

    Ok(ConversionReport {
        output,
        tile,
        dimensions: model.dimensions,
        colors: model.palette.len(),
        solid_voxels: model.solid_count(),
        bytes_written,
    })
}
