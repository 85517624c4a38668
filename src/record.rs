/// The best vector found so far from one cell to some seed cell.
/// The offsets count the horizontal and vertical steps
/// the record travelled from its seed to reach this cell, so they are never negative
/// for records that originate from a seed.
///
/// `cost_squared` always equals `offset_x² + offset_y²`.
/// It is only ever updated incrementally, never recomputed.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DistanceRecord {
    pub offset_x: i16,
    pub offset_y: i16,
    pub cost_squared: i32,
}

impl DistanceRecord {

    /// Assigned to every foreground cell: the cell is its own nearest seed.
    pub const SEED: DistanceRecord = DistanceRecord {
        offset_x: 0, offset_y: 0, cost_squared: 0
    };

    /// Placeholder meaning "no seed reached yet".
    /// The cost is only half the maximum, so that adding
    /// a relaxation increment to it can never overflow an `i32`.
    /// Such a candidate is always discarded, as no cost exceeds this one.
    pub const FAR: DistanceRecord = DistanceRecord {
        offset_x: i16::MAX, offset_y: i16::MAX, cost_squared: i32::MAX / 2
    };

    #[inline]
    pub fn is_far(&self) -> bool {
        self.cost_squared >= Self::FAR.cost_squared
    }

    /// Recomputes `offset_x² + offset_y²`, only used for checking.
    #[inline]
    pub fn offset_length_squared(&self) -> i64 {
        let x = self.offset_x as i64;
        let y = self.offset_y as i64;
        x * x + y * y
    }
}
