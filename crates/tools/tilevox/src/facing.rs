//! Volume orientation
//!
//! A tile stack is decoded with tile pixels on X/Y and slices on Z. A
//! [`Facing`] relabels those axes (with optional flips) so the model faces the
//! requested direction:
//!
//! ```text
//! facing   new x   new y   new z      width    height   depth
//! front      y       z       x        tile_h   slices   tile_w
//! back       y      -z      -x        tile_h   slices   tile_w
//! top       -z       y       x        slices   tile_h   tile_w
//! bottom     z      -y       x        slices   tile_h   tile_w
//! left       y       x      -z        tile_h   tile_w   slices
//! right      y      -x       z        tile_h   tile_w   slices
//! ```
//!
//! Both halves of the table come from [`Facing::axes`]. Flipped axes produce
//! negative coordinates; [`Facing::reorient`] shifts them back into the
//! remapped volume so a flip mirrors the model instead of leaving it.

use std::fmt;
use std::str::FromStr;

use glam::IVec3;

use crate::axis::Axis;
use crate::types::{Dimensions, TilevoxError, VoxelRecord};

/// Orientation of the output model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    #[default]
    Front,
    Back,
    Top,
    Bottom,
    Left,
    Right,
}

impl Facing {
    pub const ALL: [Facing; 6] = [
        Facing::Front,
        Facing::Back,
        Facing::Top,
        Facing::Bottom,
        Facing::Left,
        Facing::Right,
    ];

    /// Source axis for each output component
    pub fn axes(self) -> [Axis; 3] {
        use Axis::*;
        match self {
            Facing::Front => [PosY, PosZ, PosX],
            Facing::Back => [PosY, NegZ, NegX],
            Facing::Top => [NegZ, PosY, PosX],
            Facing::Bottom => [PosZ, NegY, PosX],
            Facing::Left => [PosY, PosX, NegZ],
            Facing::Right => [PosY, NegX, PosZ],
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Facing::Front => "front",
            Facing::Back => "back",
            Facing::Top => "top",
            Facing::Bottom => "bottom",
            Facing::Left => "left",
            Facing::Right => "right",
        }
    }

    /// Signed permutation of a single position
    #[inline]
    pub fn rotate(self, pos: IVec3) -> IVec3 {
        let [x, y, z] = self.axes();
        IVec3::new(x.of_i(pos), y.of_i(pos), z.of_i(pos))
    }

    /// Apply [`rotate`](Self::rotate) to every record, keeping colors
    pub fn transform(self, voxels: Vec<VoxelRecord>) -> Vec<VoxelRecord> {
        voxels
            .into_iter()
            .map(|voxel| VoxelRecord {
                pos: self.rotate(voxel.pos),
                ..voxel
            })
            .collect()
    }

    /// Volume size after relabeling the axes of `tile`
    ///
    /// `tile` is `(tile_w, tile_h, slice_count)`. The cell count is unchanged.
    pub fn remap_dimensions(self, tile: Dimensions) -> Dimensions {
        let size = tile.to_array();
        Dimensions::from_array(self.axes().map(|axis| axis.extent(size)))
    }

    /// Translation that moves rotated positions back into the remapped volume
    ///
    /// Flipped components span `(-extent, 0]`, so they are offset by
    /// `extent - 1`. Unflipped components need no offset.
    pub fn origin(self, tile: Dimensions) -> IVec3 {
        let size = tile.to_array();
        let offsets = self.axes().map(|axis| {
            if axis.is_negative() {
                axis.extent(size).saturating_sub(1) as i32
            } else {
                0
            }
        });
        IVec3::from_array(offsets)
    }

    /// Rotate all voxels and remap the volume they live in
    ///
    /// Every returned position lies inside the returned dimensions when the
    /// input positions lie inside `tile`.
    pub fn reorient(
        self,
        voxels: Vec<VoxelRecord>,
        tile: Dimensions,
    ) -> (Vec<VoxelRecord>, Dimensions) {
        let origin = self.origin(tile);
        let dimensions = self.remap_dimensions(tile);
        let axes: String = self.axes().iter().map(|axis| axis.to_char()).collect();

        tracing::debug!(
            facing = %self,
            %axes,
            %tile,
            %dimensions,
            "Reorienting voxels"
        );

        let voxels = self
            .transform(voxels)
            .into_iter()
            .map(|voxel| VoxelRecord {
                pos: voxel.pos + origin,
                ..voxel
            })
            .collect();

        (voxels, dimensions)
    }
}

impl fmt::Display for Facing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facing {
    type Err = TilevoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Facing::ALL
            .into_iter()
            .find(|facing| facing.as_str() == s)
            .ok_or_else(|| TilevoxError::InvalidFacing(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn full_stack(tile: Dimensions) -> Vec<VoxelRecord> {
        let mut voxels = Vec::with_capacity(tile.volume());
        for z in 0..tile.depth as i32 {
            for y in 0..tile.height as i32 {
                for x in 0..tile.width as i32 {
                    voxels.push(VoxelRecord::new(x, y, z, (x + y + z) as u8));
                }
            }
        }
        voxels
    }

    #[test]
    fn test_rotate_table() {
        let p = IVec3::new(1, 2, 3);
        assert_eq!(Facing::Front.rotate(p), IVec3::new(2, 3, 1));
        assert_eq!(Facing::Back.rotate(p), IVec3::new(2, -3, -1));
        assert_eq!(Facing::Top.rotate(p), IVec3::new(-3, 2, 1));
        assert_eq!(Facing::Bottom.rotate(p), IVec3::new(3, -2, 1));
        assert_eq!(Facing::Left.rotate(p), IVec3::new(2, 1, -3));
        assert_eq!(Facing::Right.rotate(p), IVec3::new(2, -1, 3));
    }

    #[test]
    fn test_transform_keeps_color_and_order() {
        let voxels = vec![VoxelRecord::new(1, 2, 3, 7), VoxelRecord::new(0, 0, 1, 255)];
        let rotated = Facing::Back.transform(voxels);

        assert_eq!(
            rotated,
            vec![VoxelRecord::new(2, -3, -1, 7), VoxelRecord::new(0, -1, 0, 255)]
        );
    }

    #[test]
    fn test_remap_dimensions_table() {
        // tile_w = 3, tile_h = 2, slices = 5
        let tile = Dimensions::new(3, 2, 5);
        let expect = |facing: Facing, w, h, d| {
            assert_eq!(
                facing.remap_dimensions(tile),
                Dimensions::new(w, h, d),
                "{facing}"
            )
        };

        expect(Facing::Front, 2, 5, 3);
        expect(Facing::Back, 2, 5, 3);
        expect(Facing::Top, 5, 2, 3);
        expect(Facing::Bottom, 5, 2, 3);
        expect(Facing::Left, 2, 3, 5);
        expect(Facing::Right, 2, 3, 5);
    }

    #[test]
    fn test_remap_preserves_volume() {
        for tile in [
            Dimensions::new(1, 1, 1),
            Dimensions::new(3, 2, 5),
            Dimensions::new(16, 8, 12),
            Dimensions::new(7, 13, 2),
        ] {
            for facing in Facing::ALL {
                assert_eq!(facing.remap_dimensions(tile).volume(), tile.volume());
            }
        }
    }

    #[test]
    fn test_reorient_fills_volume_exactly_once() {
        let tile = Dimensions::new(3, 2, 4);

        for facing in Facing::ALL {
            let (voxels, dims) = facing.reorient(full_stack(tile), tile);

            let mut seen = HashSet::new();
            for voxel in &voxels {
                assert!(dims.contains(voxel.pos), "{facing}: {} outside {dims}", voxel.pos);
                assert!(seen.insert(voxel.pos), "{facing}: {} hit twice", voxel.pos);
            }
            assert_eq!(seen.len(), dims.volume());
        }
    }

    #[test]
    fn test_reorient_mirrors_flipped_axes() {
        let tile = Dimensions::new(3, 2, 4);
        let origin_voxel = vec![VoxelRecord::new(0, 0, 0, 1)];

        // back: (y, -z, -x) shifted by (0, slices - 1, tile_w - 1)
        let (voxels, dims) = Facing::Back.reorient(origin_voxel.clone(), tile);
        assert_eq!(dims, Dimensions::new(2, 4, 3));
        assert_eq!(voxels[0].pos, IVec3::new(0, 3, 2));

        // right: (y, -x, z) shifted by (0, tile_w - 1, 0)
        let (voxels, _) = Facing::Right.reorient(origin_voxel, tile);
        assert_eq!(voxels[0].pos, IVec3::new(0, 2, 0));
    }

    #[test]
    fn test_parse_facing() {
        assert_eq!("front".parse::<Facing>().unwrap(), Facing::Front);
        assert_eq!("bottom".parse::<Facing>().unwrap(), Facing::Bottom);
        for facing in Facing::ALL {
            assert_eq!(facing.to_string().parse::<Facing>().unwrap(), facing);
        }
    }

    #[test]
    fn test_parse_unknown_facing() {
        match "sideways".parse::<Facing>() {
            Err(TilevoxError::InvalidFacing(tag)) => assert_eq!(tag, "sideways"),
            other => panic!("Expected InvalidFacing error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_requires_exact_tag() {
        for tag in ["Front", "TOP", " back", "left ", ""] {
            match tag.parse::<Facing>() {
                Err(TilevoxError::InvalidFacing(reported)) => assert_eq!(reported, tag),
                other => panic!("Expected InvalidFacing error for {tag:?}, got {:?}", other),
            }
        }
    }
}
