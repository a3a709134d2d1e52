//! Tile sheet decoding
//!
//! The source image is cut into a `cols × rows` grid of equal tiles. Tiles are
//! read in row-major order and each one becomes a depth slice:
//!
//! ```text
//!  col 0   col 1   col 2
//! +-------+-------+-------+
//! | z = 0 | z = 1 | z = 2 |  row 0
//! +-------+-------+-------+
//! | z = 3 | z = 4 | z = 5 |  row 1
//! +-------+-------+-------+
//! ```
//!
//! Every pixel yields one [`VoxelRecord`] at its tile-local `(x, y)`. Pixels
//! with any transparency become [`EMPTY`]; opaque pixels are indexed into a
//! first-seen [`Palette`].

use image::{DynamicImage, GenericImageView, RgbaImage};

use crate::palette::Palette;
use crate::types::{Dimensions, Result, TilevoxError, VoxelRecord, EMPTY};

/// Read access to RGBA pixels of a decoded image
pub trait PixelSource {
    /// Image size as `(width, height)`
    fn dimensions(&self) -> (u32, u32);

    /// RGBA value of the pixel at `(x, y)`
    fn rgba(&self, x: u32, y: u32) -> [u8; 4];
}

impl PixelSource for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        image::ImageBuffer::dimensions(self)
    }

    fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        self.get_pixel(x, y).0
    }
}

impl PixelSource for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }

    fn rgba(&self, x: u32, y: u32) -> [u8; 4] {
        GenericImageView::get_pixel(self, x, y).0
    }
}

/// Layout of tiles in the source image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileGrid {
    pub cols: u32,
    pub rows: u32,
}

impl TileGrid {
    pub fn new(cols: u32, rows: u32) -> Self {
        Self { cols, rows }
    }

    /// Number of depth slices (one per tile)
    pub fn slice_count(&self) -> u32 {
        self.cols * self.rows
    }

    /// Stacked tile volume for an image of the given size
    ///
    /// Tile size is truncated when the image does not divide evenly. Fails
    /// with [`TilevoxError::InvalidGrid`] if the grid is empty or a tile would
    /// be zero pixels wide or tall.
    pub fn tile_volume(&self, (width, height): (u32, u32)) -> Result<Dimensions> {
        let invalid = || TilevoxError::InvalidGrid {
            cols: self.cols,
            rows: self.rows,
            width,
            height,
        };

        let tile_w = width.checked_div(self.cols).ok_or_else(invalid)?;
        let tile_h = height.checked_div(self.rows).ok_or_else(invalid)?;
        if tile_w == 0 || tile_h == 0 {
            return Err(invalid());
        }

        Ok(Dimensions::new(tile_w, tile_h, self.slice_count()))
    }
}

/// Output of [`decode_tiles`]
#[derive(Debug, Clone)]
pub struct DecodedTiles {
    /// One record per pixel, ordered by (row, col, y, x)
    pub voxels: Vec<VoxelRecord>,
    pub palette: Palette,
    /// `(tile_w, tile_h, slice_count)`
    pub tile: Dimensions,
}

/// Decode every tile of `source` into voxel records and a palette
///
/// Fails with [`TilevoxError::PaletteOverflow`] on the 256th distinct opaque
/// color; nothing is returned in that case.
pub fn decode_tiles<S: PixelSource + ?Sized>(source: &S, grid: TileGrid) -> Result<DecodedTiles> {
    let image_size = source.dimensions();
    let tile = grid.tile_volume(image_size)?;
    let (tile_w, tile_h) = (tile.width, tile.height);

    tracing::debug!(
        width = image_size.0,
        height = image_size.1,
        cols = grid.cols,
        rows = grid.rows,
        tile_w,
        tile_h,
        "Decoding tile sheet"
    );

    let mut voxels = Vec::with_capacity(tile.volume());
    let mut palette = Palette::new();

    for row in 0..grid.rows {
        for col in 0..grid.cols {
            let z = (row * grid.cols + col) as i32;

            for y in 0..tile_h {
                let pixel_y = row * tile_h + y;

                for x in 0..tile_w {
                    let pixel_x = col * tile_w + x;
                    let [r, g, b, a] = source.rgba(pixel_x, pixel_y);

                    let color = if a < u8::MAX {
                        EMPTY
                    } else {
                        palette
                            .register([r, g, b])
                            .ok_or(TilevoxError::PaletteOverflow {
                                color: [r, g, b],
                                x: pixel_x,
                                y: pixel_y,
                            })?
                    };

                    voxels.push(VoxelRecord::new(x as i32, y as i32, z, color));
                }
            }
        }
    }

    tracing::debug!(
        voxels = voxels.len(),
        empty = voxels.iter().filter(|v| v.is_empty()).count(),
        colors = palette.len(),
        "Decoded tile sheet"
    );

    Ok(DecodedTiles {
        voxels,
        palette,
        tile,
    })
}
