//! Core data types shared by the conversion stages
//!
//! Voxel records flow from the tile decoder through the facing transform into
//! the flattener. [`Dimensions`] describes the volume they live in and
//! [`VoxModel`] is the dense result handed to the serializer.

use std::fmt;
use std::path::PathBuf;

use glam::IVec3;
use thiserror::Error;

use crate::palette::Palette;

/// Color index reserved for "no voxel" (transparent)
pub const EMPTY: u8 = 255;

/// Tilevox error types
#[derive(Debug, Error)]
pub enum TilevoxError {
    #[error(
        "Palette overflow: color {color:?} at pixel ({x}, {y}) exceeds {} distinct colors",
        crate::palette::MAX_COLORS
    )]
    PaletteOverflow { color: [u8; 3], x: u32, y: u32 },

    #[error("Invalid facing: '{0}' (expected front, back, top, bottom, left or right)")]
    InvalidFacing(String),

    #[error("Invalid tile grid: {cols}x{rows} tiles do not fit a {width}x{height} image")]
    InvalidGrid {
        cols: u32,
        rows: u32,
        width: u32,
        height: u32,
    },

    #[error("Failed to read image {}: {source}", .path.display())]
    ImageAccess {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Voxel at {pos} lies outside the {dimensions} volume")]
    OutOfBounds { pos: IVec3, dimensions: Dimensions },

    #[error("Truncated VOX data: expected {expected_bytes} bytes, only {available_bytes} available")]
    TruncatedData {
        expected_bytes: usize,
        available_bytes: usize,
    },

    #[error("Invalid VOX dimensions: {width}x{height}x{depth}")]
    InvalidDimensions { width: i32, height: i32, depth: i32 },
}

/// Result type alias for tilevox operations
pub type Result<T> = std::result::Result<T, TilevoxError>;

/// A single voxel decoded from a tile pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoxelRecord {
    pub pos: IVec3,
    pub color: u8,
}

impl VoxelRecord {
    pub fn new(x: i32, y: i32, z: i32, color: u8) -> Self {
        Self {
            pos: IVec3::new(x, y, z),
            color,
        }
    }

    /// True when this record is the transparent sentinel
    pub fn is_empty(&self) -> bool {
        self.color == EMPTY
    }
}

/// Size of a voxel volume along each axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Dimensions {
    pub const fn new(width: u32, height: u32, depth: u32) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Total number of cells in the volume
    pub fn volume(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    /// Total number of cells, or `None` if the count does not fit in `usize`
    pub fn checked_volume(&self) -> Option<usize> {
        (self.width as usize)
            .checked_mul(self.height as usize)?
            .checked_mul(self.depth as usize)
    }

    /// Axis sizes as an array indexed by component (0=X, 1=Y, 2=Z)
    pub fn to_array(self) -> [u32; 3] {
        [self.width, self.height, self.depth]
    }

    pub fn from_array([width, height, depth]: [u32; 3]) -> Self {
        Self::new(width, height, depth)
    }

    /// Whether `pos` addresses a cell inside the volume
    pub fn contains(&self, pos: IVec3) -> bool {
        pos.cmpge(IVec3::ZERO).all()
            && (pos.x as i64) < self.width as i64
            && (pos.y as i64) < self.height as i64
            && (pos.z as i64) < self.depth as i64
    }

    /// Linear index of `pos` (x fastest, then y, then z)
    ///
    /// Returns `None` for positions outside the volume.
    pub fn index_of(&self, pos: IVec3) -> Option<usize> {
        if !self.contains(pos) {
            return None;
        }
        let (w, h) = (self.width as usize, self.height as usize);
        Some(pos.x as usize + pos.y as usize * w + pos.z as usize * w * h)
    }
}

impl fmt::Display for Dimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}x{}", self.width, self.height, self.depth)
    }
}

/// Dense voxel volume ready for serialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoxModel {
    pub dimensions: Dimensions,
    /// Color indices, `dimensions.volume()` long, [`EMPTY`] where no voxel is set
    pub voxels: Vec<u8>,
    pub palette: Palette,
}

impl VoxModel {
    /// Color index at `pos`, or `None` outside the volume
    pub fn get(&self, pos: IVec3) -> Option<u8> {
        self.dimensions
            .index_of(pos)
            .and_then(|i| self.voxels.get(i).copied())
    }

    /// Number of cells holding a solid color
    pub fn solid_count(&self) -> usize {
        self.voxels.iter().filter(|&&c| c != EMPTY).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_of_is_x_fastest() {
        let dims = Dimensions::new(3, 2, 4);
        assert_eq!(dims.index_of(IVec3::new(0, 0, 0)), Some(0));
        assert_eq!(dims.index_of(IVec3::new(1, 0, 0)), Some(1));
        assert_eq!(dims.index_of(IVec3::new(0, 1, 0)), Some(3));
        assert_eq!(dims.index_of(IVec3::new(0, 0, 1)), Some(6));
        assert_eq!(dims.index_of(IVec3::new(2, 1, 3)), Some(23));
    }

    #[test]
    fn test_index_of_rejects_outside() {
        let dims = Dimensions::new(3, 2, 4);
        assert_eq!(dims.index_of(IVec3::new(3, 0, 0)), None);
        assert_eq!(dims.index_of(IVec3::new(0, 2, 0)), None);
        assert_eq!(dims.index_of(IVec3::new(0, 0, 4)), None);
        assert_eq!(dims.index_of(IVec3::new(-1, 0, 0)), None);
    }

    #[test]
    fn test_checked_volume() {
        assert_eq!(Dimensions::new(3, 2, 4).checked_volume(), Some(24));
        assert_eq!(Dimensions::new(0, 9, 9).checked_volume(), Some(0));
        assert_eq!(
            Dimensions::new(u32::MAX, u32::MAX, u32::MAX).checked_volume(),
            None
        );
    }

    #[test]
    fn test_model_get_matches_index_of() {
        let dimensions = Dimensions::new(3, 2, 2);
        let model = VoxModel {
            dimensions,
            voxels: (0..12).map(|i| if i % 5 == 0 { EMPTY } else { i }).collect(),
            palette: Palette::new(),
        };

        for z in 0..2 {
            for y in 0..2 {
                for x in 0..3 {
                    let pos = IVec3::new(x, y, z);
                    let index = dimensions.index_of(pos).unwrap();
                    assert_eq!(model.get(pos), Some(model.voxels[index]));
                }
            }
        }
        assert_eq!(model.get(IVec3::new(2, 1, 1)), Some(11));
        assert_eq!(model.get(IVec3::new(0, 0, 0)), Some(EMPTY));

        assert_eq!(model.get(IVec3::new(3, 0, 0)), None);
        assert_eq!(model.get(IVec3::new(0, 2, 0)), None);
        assert_eq!(model.get(IVec3::new(0, 0, 2)), None);
        assert_eq!(model.get(IVec3::new(0, -1, 0)), None);
    }

    #[test]
    fn test_error_messages_carry_values() {
        let err = TilevoxError::PaletteOverflow {
            color: [1, 2, 3],
            x: 4,
            y: 5,
        };
        let msg = err.to_string();
        assert!(msg.contains("[1, 2, 3]"));
        assert!(msg.contains("(4, 5)"));
        assert!(msg.contains("255"));

        let err = TilevoxError::OutOfBounds {
            pos: IVec3::new(-1, 0, 2),
            dimensions: Dimensions::new(2, 2, 2),
        };
        assert!(err.to_string().contains("2x2x2"));
    }
}
