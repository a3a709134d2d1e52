//! Binary `.vox` volume format
//!
//! A fixed little-endian layout with no magic number or version:
//!
//! ```text
//! [Header: 12 bytes]
//!   width:  i32
//!   height: i32
//!   depth:  i32
//!
//! [Voxels: width * height * depth bytes]
//!   Color index per cell, x fastest, then y, then z. 255 = empty.
//!
//! [Palette: 768 bytes]
//!   256 RGB entries, each channel divided by 4 (0-63). Unused entries black.
//! ```
//!
//! # Example
//!
//! ```
//! use tilevox::{Dimensions, Palette, VoxModel, vox::{parse_vox, serialize_vox}};
//!
//! let model = VoxModel {
//!     dimensions: Dimensions::new(1, 1, 2),
//!     voxels: vec![0, 255],
//!     palette: Palette::from_colors([[252, 0, 0]]).unwrap(),
//! };
//!
//! let bytes = serialize_vox(&model).unwrap();
//! assert_eq!(bytes.len(), 12 + 2 + 768);
//! assert_eq!(parse_vox(&bytes).unwrap(), model);
//! ```

use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::palette::{Palette, PALETTE_BYTES};
use crate::types::{Dimensions, Result, TilevoxError, VoxModel, EMPTY};

/// Header size in bytes (three i32 dimensions)
pub const HEADER_SIZE: usize = 12;

/// Total serialized size of a volume with the given dimensions
///
/// Returns `None` when the size does not fit in `usize`.
pub fn file_size(dimensions: Dimensions) -> Option<usize> {
    dimensions
        .checked_volume()?
        .checked_add(HEADER_SIZE + PALETTE_BYTES)
}

/// Stream `model` to `writer`
pub fn write_vox<W: Write>(writer: &mut W, model: &VoxModel) -> Result<()> {
    let dims = model.dimensions;
    if dims.checked_volume() != Some(model.voxels.len()) {
        return Err(TilevoxError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "voxel array holds {} cells, does not match {} volume",
                model.voxels.len(),
                dims
            ),
        )));
    }

    for size in dims.to_array() {
        let size = i32::try_from(size).map_err(|_| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("dimension {} does not fit in i32", size),
            )
        })?;
        writer.write_all(&size.to_le_bytes())?;
    }

    writer.write_all(&model.voxels)?;
    writer.write_all(&model.palette.to_vox_bytes())?;
    Ok(())
}

/// Serialize `model` to an in-memory buffer
pub fn serialize_vox(model: &VoxModel) -> Result<Vec<u8>> {
    let mut buffer = Vec::with_capacity(file_size(model.dimensions).unwrap_or(0));
    write_vox(&mut buffer, model)?;
    Ok(buffer)
}

/// Write `model` to `path`
///
/// Data goes to a temporary file next to `path` which is renamed into place
/// once fully written. On error the temporary file is removed and any
/// existing file at `path` is left untouched.
///
/// Returns the number of bytes written.
pub fn save_vox(path: impl AsRef<Path>, model: &VoxModel) -> Result<usize> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let temp = NamedTempFile::new_in(dir)?;
    let mut writer = BufWriter::new(temp);
    write_vox(&mut writer, model)?;
    let temp = writer.into_inner().map_err(|e| e.into_error())?;
    temp.as_file().sync_all()?;
    temp.persist(path).map_err(|e| e.error)?;

    let written = fs::metadata(path)?.len() as usize;
    tracing::debug!(path = %path.display(), bytes = written, "Wrote VOX file");
    Ok(written)
}

/// Parse a serialized volume
///
/// The returned palette holds entries up to the highest color index used by
/// the voxel array, with channels scaled back to 0-252.
pub fn parse_vox(data: &[u8]) -> Result<VoxModel> {
    let header = data.get(..HEADER_SIZE).ok_or(TilevoxError::TruncatedData {
        expected_bytes: HEADER_SIZE,
        available_bytes: data.len(),
    })?;

    let read_i32 = |i: usize| {
        let mut bytes = [0u8; 4];
        bytes.copy_from_slice(&header[i * 4..i * 4 + 4]);
        i32::from_le_bytes(bytes)
    };
    let (width, height, depth) = (read_i32(0), read_i32(1), read_i32(2));

    if width < 0 || height < 0 || depth < 0 {
        return Err(TilevoxError::InvalidDimensions {
            width,
            height,
            depth,
        });
    }
    let dimensions = Dimensions::new(width as u32, height as u32, depth as u32);

    let expected = file_size(dimensions).ok_or(TilevoxError::InvalidDimensions {
        width,
        height,
        depth,
    })?;
    if data.len() < expected {
        return Err(TilevoxError::TruncatedData {
            expected_bytes: expected,
            available_bytes: data.len(),
        });
    }

    let voxel_end = expected - PALETTE_BYTES;
    let voxels = data[HEADER_SIZE..voxel_end].to_vec();
    let palette_bytes = &data[voxel_end..voxel_end + PALETTE_BYTES];

    let used = voxels
        .iter()
        .copied()
        .filter(|&c| c != EMPTY)
        .max()
        .map_or(0, |max| max as usize + 1);

    let mut palette = Palette::new();
    for entry in palette_bytes.chunks_exact(3).take(used) {
        let rgb = [0, 1, 2].map(|i| entry[i].saturating_mul(4));
        // Distinct source colors can collapse to one 6-bit entry
        if palette.index_of(rgb).is_some() {
            tracing::warn!(?rgb, "Duplicate palette entry in VOX data");
        }
        palette.push_unchecked(rgb);
    }

    Ok(VoxModel {
        dimensions,
        voxels,
        palette,
    })
}
