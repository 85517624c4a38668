use crate::error::{try_filled_vec, FieldError};
use crate::record::DistanceRecord;
use crate::sampled_image::SampledImage;
use rayon::prelude::*;


/// The longest grid side whose largest possible squared distance,
/// `2 * MAX_SIDE²`, still stays below `DistanceRecord::FAR.cost_squared`.
pub const MAX_SIDE: u16 = 23170;

/// A row-major buffer of `(width + 2) * (height + 2)` distance records.
/// The outer ring of cells is always `DistanceRecord::FAR`,
/// so that looking at any neighbour of an interior cell
/// never leaves the buffer.
///
/// Coordinates in the public api refer to interior cells,
/// with `(0, 0)` being the top left pixel of the source image.
#[derive(Clone, PartialEq, Debug)]
pub struct DistanceGrid {
    width: u16,
    height: u16,
    records: Vec<DistanceRecord>,
}


impl DistanceGrid {

    /// Allocate a grid for the image and seed it:
    /// all pixels brighter than the threshold become `SEED`, all others `FAR`.
    pub fn seeded(image: &impl SampledImage, threshold: u8) -> Result<Self, FieldError> {
        let width = image.width();
        let height = image.height();

        if width > MAX_SIDE || height > MAX_SIDE {
            return Err(FieldError::TooLarge { width, height, max_side: MAX_SIDE });
        }

        let stride = width as usize + 2;
        let cells = stride.checked_mul(height as usize + 2)
            .ok_or(FieldError::Allocation { cells: usize::MAX })?;

        // this already sets the border ring
        let mut records = try_filled_vec(cells, DistanceRecord::FAR)?;

        // rows are independent, so seed them in parallel
        records.par_chunks_exact_mut(stride)
            .skip(1).take(height as usize)
            .enumerate()
            .for_each(|(y, row)| {
                let interior = &mut row[1 ..= width as usize];

                for (x, record) in interior.iter_mut().enumerate() {
                    if image.intensity(x as u16, y as u16) > threshold {
                        *record = DistanceRecord::SEED;
                    }
                }
            });

        Ok(DistanceGrid { width, height, records })
    }

    #[inline]
    pub fn width(&self) -> u16 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u16 {
        self.height
    }

    /// The record of an interior cell.
    #[inline]
    pub fn record(&self, x: u16, y: u16) -> DistanceRecord {
        debug_assert!(x < self.width && y < self.height, "Coordinates out of range");
        self.get(x as usize + 1, y as usize + 1)
    }

    /// Iterate over all interior records, row by row.
    pub fn records(&self) -> impl Iterator<Item = &DistanceRecord> + '_ {
        let stride = self.stride();
        let width = self.width as usize;

        self.records.chunks_exact(stride)
            .skip(1).take(self.height as usize)
            .flat_map(move |row| row[1 ..= width].iter())
    }

    /// Whether every record in the outer ring is still `FAR`.
    pub fn border_is_intact(&self) -> bool {
        let stride = self.stride();
        let rows = self.height as usize + 2;

        self.records.iter().enumerate().all(|(index, record)| {
            let (x, y) = (index % stride, index / stride);
            let on_border = x == 0 || y == 0 || x == stride - 1 || y == rows - 1;
            !on_border || *record == DistanceRecord::FAR
        })
    }

    /// Map every interior record to an output value, in parallel.
    /// The result is row-major with `width * height` entries.
    pub(crate) fn map_interior<T>(
        &self, fill: T, map: impl Fn(&DistanceRecord) -> T + Sync
    ) -> Result<Vec<T>, FieldError>
        where T: Clone + Send
    {
        let width = self.width as usize;
        let mut output = try_filled_vec(width * self.height as usize, fill)?;

        if width == 0 {
            return Ok(output);
        }

        let stride = self.stride();
        output.par_chunks_exact_mut(width)
            .enumerate()
            .for_each(|(y, output_row)| {
                let start = (y + 1) * stride + 1;
                let row = &self.records[start .. start + width];

                for (output, record) in output_row.iter_mut().zip(row) {
                    *output = map(record);
                }
            });

        Ok(output)
    }

    #[inline]
    pub(crate) fn stride(&self) -> usize {
        self.width as usize + 2
    }

    /// Padded coordinates, where the interior starts at `(1, 1)`.
    #[inline(always)]
    pub(crate) fn get(&self, x: usize, y: usize) -> DistanceRecord {
        self.records[self.flatten_index(x, y)]
    }

    #[inline(always)]
    pub(crate) fn put(&mut self, x: usize, y: usize, record: DistanceRecord) {
        let index = self.flatten_index(x, y);
        self.records[index] = record;
    }

    #[inline(always)]
    fn flatten_index(&self, x: usize, y: usize) -> usize {
        debug_assert!(x < self.stride() && y < self.height as usize + 2, "Padded coordinates out of range");
        self.stride() * y + x
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampled_image::ByteImage;

    #[test]
    fn max_side_stays_below_far() {
        let side = MAX_SIDE as i64;
        assert!(2 * side * side < DistanceRecord::FAR.cost_squared as i64);
    }

    #[test]
    fn rejects_sides_above_max() {
        let buffer = vec![255_u8; MAX_SIDE as usize + 1];

        let wide = ByteImage::from_slice(MAX_SIDE + 1, 1, &buffer);
        assert_eq!(
            DistanceGrid::seeded(&wide, 128),
            Err(FieldError::TooLarge { width: MAX_SIDE + 1, height: 1, max_side: MAX_SIDE })
        );

        let tall = ByteImage::from_slice(1, MAX_SIDE + 1, &buffer);
        assert!(DistanceGrid::seeded(&tall, 128).is_err());

        let widest = ByteImage::from_slice(MAX_SIDE, 1, &buffer[.. MAX_SIDE as usize]);
        let grid = DistanceGrid::seeded(&widest, 128).unwrap();
        assert_eq!(grid.width(), MAX_SIDE);
    }

    #[test]
    fn seeds_pixels_above_threshold() {
        let buffer = [
            0, 128, 129,
            255, 0, 0,
        ];

        let grid = DistanceGrid::seeded(&ByteImage::from_slice(3, 2, &buffer), 128).unwrap();

        assert_eq!(grid.record(0, 0), DistanceRecord::FAR);
        assert_eq!(grid.record(1, 0), DistanceRecord::FAR, "threshold itself is not a seed");
        assert_eq!(grid.record(2, 0), DistanceRecord::SEED);
        assert_eq!(grid.record(0, 1), DistanceRecord::SEED);
        assert_eq!(grid.record(2, 1), DistanceRecord::FAR);
        assert!(grid.border_is_intact());
    }

    #[test]
    fn border_surrounds_interior() {
        let buffer = vec![255_u8; 4 * 3];
        let grid = DistanceGrid::seeded(&ByteImage::from_slice(4, 3, &buffer), 128).unwrap();

        assert_eq!(grid.stride(), 6);
        assert_eq!(grid.get(0, 0), DistanceRecord::FAR);
        assert_eq!(grid.get(5, 4), DistanceRecord::FAR);
        assert_eq!(grid.get(1, 1), DistanceRecord::SEED);
        assert_eq!(grid.get(4, 3), DistanceRecord::SEED);
        assert!(grid.border_is_intact());
        assert_eq!(grid.records().count(), 12);
    }

    #[test]
    fn maps_interior_row_major() {
        let buffer = [
            255, 0,
            0, 0,
            0, 255,
        ];

        let grid = DistanceGrid::seeded(&ByteImage::from_slice(2, 3, &buffer), 128).unwrap();
        let seeds = grid.map_interior(false, |record| *record == DistanceRecord::SEED).unwrap();

        assert_eq!(seeds, vec![true, false, false, false, false, true]);
    }
}
