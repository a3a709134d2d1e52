//! Sparse voxel records to dense volume

use crate::types::{Dimensions, Result, TilevoxError, VoxelRecord, EMPTY};

/// Write `voxels` into a dense `width * height * depth` array
///
/// Cells without a record hold [`EMPTY`]. When two records share a position
/// the later one wins. Any record outside `dimensions` fails with
/// [`TilevoxError::OutOfBounds`].
pub fn flatten(voxels: &[VoxelRecord], dimensions: Dimensions) -> Result<Vec<u8>> {
    let mut dense = vec![EMPTY; dimensions.volume()];

    for voxel in voxels {
        let index = dimensions
            .index_of(voxel.pos)
            .ok_or(TilevoxError::OutOfBounds {
                pos: voxel.pos,
                dimensions,
            })?;
        dense[index] = voxel.color;
    }

    tracing::debug!(
        %dimensions,
        records = voxels.len(),
        cells = dense.len(),
        "Flattened voxels"
    );

    Ok(dense)
}
