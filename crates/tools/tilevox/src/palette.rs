//! First-seen RGB palette
//!
//! Colors are registered in the order the decoder meets them. Index 255 is
//! reserved for [`EMPTY`](crate::EMPTY), so a palette never holds more than
//! [`MAX_COLORS`] entries. On disk the palette is always [`PALETTE_SIZE`]
//! entries with each channel scaled down to 6 bits.

use std::collections::HashMap;

/// Maximum number of real colors (index 255 is the empty sentinel)
pub const MAX_COLORS: usize = 255;

/// Number of palette entries in a serialized file
pub const PALETTE_SIZE: usize = 256;

/// Size of the serialized palette block in bytes
pub const PALETTE_BYTES: usize = PALETTE_SIZE * 3;

/// Ordered set of distinct RGB colors with index lookup
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<[u8; 3]>,
    lookup: HashMap<[u8; 3], u8>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a palette from colors in order, failing on duplicates or overflow
    ///
    /// Returns `None` when `colors` holds more than [`MAX_COLORS`] entries or
    /// repeats a color.
    pub fn from_colors(colors: impl IntoIterator<Item = [u8; 3]>) -> Option<Self> {
        let mut palette = Self::new();
        for rgb in colors {
            if palette.index_of(rgb).is_some() {
                return None;
            }
            palette.register(rgb)?;
        }
        Some(palette)
    }

    /// Index of `rgb`, registering it if unseen
    ///
    /// Returns `None` when the color is new and the palette is already full.
    pub fn register(&mut self, rgb: [u8; 3]) -> Option<u8> {
        if let Some(&index) = self.lookup.get(&rgb) {
            return Some(index);
        }
        if self.is_full() {
            return None;
        }
        let index = self.colors.len() as u8;
        self.colors.push(rgb);
        self.lookup.insert(rgb, index);
        Some(index)
    }

    /// Append `rgb` even if it is already present
    ///
    /// Lookups keep resolving to the first occurrence. Used when reading
    /// palettes whose 6-bit channels may have merged distinct colors.
    pub(crate) fn push_unchecked(&mut self, rgb: [u8; 3]) {
        let index = self.colors.len() as u8;
        self.colors.push(rgb);
        self.lookup.entry(rgb).or_insert(index);
    }

    pub fn index_of(&self, rgb: [u8; 3]) -> Option<u8> {
        self.lookup.get(&rgb).copied()
    }

    pub fn get(&self, index: u8) -> Option<[u8; 3]> {
        self.colors.get(index as usize).copied()
    }

    pub fn colors(&self) -> &[[u8; 3]] {
        &self.colors
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.colors.len() >= MAX_COLORS
    }

    /// Serialized palette block: 256 RGB entries, channels divided by 4,
    /// unused entries black
    pub fn to_vox_bytes(&self) -> [u8; PALETTE_BYTES] {
        let mut bytes = [0u8; PALETTE_BYTES];
        for (entry, [r, g, b]) in bytes.chunks_exact_mut(3).zip(&self.colors) {
            entry.copy_from_slice(&[r / 4, g / 4, b / 4]);
        }
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_first_seen_order() {
        let mut palette = Palette::new();
        assert_eq!(palette.register([10, 20, 30]), Some(0));
        assert_eq!(palette.register([1, 2, 3]), Some(1));
        assert_eq!(palette.register([10, 20, 30]), Some(0));
        assert_eq!(palette.register([0, 0, 0]), Some(2));

        assert_eq!(palette.colors(), &[[10, 20, 30], [1, 2, 3], [0, 0, 0]]);
        assert_eq!(palette.get(1), Some([1, 2, 3]));
        assert_eq!(palette.get(3), None);
    }

    #[test]
    fn test_register_stops_at_255_colors() {
        let mut palette = Palette::new();
        for i in 0..MAX_COLORS {
            assert_eq!(palette.register([i as u8, 0, 0]), Some(i as u8));
        }
        assert!(palette.is_full());

        // Known colors still resolve, new ones do not
        assert_eq!(palette.register([254, 0, 0]), Some(254));
        assert_eq!(palette.register([255, 0, 0]), None);
        assert_eq!(palette.len(), MAX_COLORS);
    }

    #[test]
    fn test_from_colors_rejects_duplicates() {
        assert!(Palette::from_colors([[1, 1, 1], [2, 2, 2]]).is_some());
        assert!(Palette::from_colors([[1, 1, 1], [1, 1, 1]]).is_none());
    }

    #[test]
    fn test_vox_bytes_scaled_and_padded() {
        let palette = Palette::from_colors([[255, 128, 3], [4, 8, 252]]).unwrap();
        let bytes = palette.to_vox_bytes();

        assert_eq!(bytes.len(), 768);
        assert_eq!(&bytes[0..3], &[63, 32, 0]);
        assert_eq!(&bytes[3..6], &[1, 2, 63]);
        assert!(bytes[6..].iter().all(|&b| b == 0));
    }
}
