//! Sequential distance propagation over a seeded grid,
//! as described in `Euclidean distance mapping`
//! by Per-Erik Danielsson (1980), in the raster-scan variant
//! that stores squared costs instead of recomputing them.

use crate::grid::DistanceGrid;


/// Which neighbours a cell learns its distance from.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum Connectivity {
    /// Only axis-aligned neighbours. Cheaper, but less exact near diagonals.
    Four,

    /// Axis-aligned and diagonal neighbours.
    Eight,
}

impl Default for Connectivity {
    fn default() -> Self {
        Connectivity::Four
    }
}


/// Relative position of the neighbour a record is copied from.
/// The horizontal component is either `-1`, `0` or `1`, as is the vertical one.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Neighbour {
    pub x: i8,
    pub y: i8,
}

impl Neighbour {
    pub const UP: Neighbour = Neighbour { x: 0, y: -1 };
    pub const DOWN: Neighbour = Neighbour { x: 0, y: 1 };
    pub const LEFT: Neighbour = Neighbour { x: -1, y: 0 };
    pub const RIGHT: Neighbour = Neighbour { x: 1, y: 0 };
    pub const UP_LEFT: Neighbour = Neighbour { x: -1, y: -1 };
    pub const UP_RIGHT: Neighbour = Neighbour { x: 1, y: -1 };
    pub const DOWN_LEFT: Neighbour = Neighbour { x: -1, y: 1 };
    pub const DOWN_RIGHT: Neighbour = Neighbour { x: 1, y: 1 };
}


/// Offer the record of the neighbour to the cell at the padded coordinates.
/// The neighbour's vector is extended by one step in the direction of the move,
/// and the cost grows by `(a + 1)² - a² = 2a + 1` per extended component,
/// which is `2 (a + b + 1)` for diagonal moves.
/// The cell only takes the candidate if it is strictly cheaper.
///
/// Returns whether the cell was updated.
/// The neighbour must lie inside the padded grid, which holds
/// for every interior cell.
#[inline(always)]
pub fn relax(grid: &mut DistanceGrid, x: usize, y: usize, neighbour: Neighbour) -> bool {
    let neighbour_x = (x as isize + neighbour.x as isize) as usize;
    let neighbour_y = (y as isize + neighbour.y as isize) as usize;
    let mut candidate = grid.get(neighbour_x, neighbour_y);

    let dx = candidate.offset_x as i32;
    let dy = candidate.offset_y as i32;

    // `FAR` has half the maximum cost, so none of these can overflow
    let increment = match (neighbour.x, neighbour.y) {
        (_, 0) => 2 * dx + 1,
        (0, _) => 2 * dy + 1,
        _ => 2 * (dx + dy + 1),
    };

    let cost = candidate.cost_squared + increment;
    if cost >= grid.get(x, y).cost_squared {
        return false;
    }

    // only reached by records that came from a seed,
    // whose offsets are bounded by the grid size
    candidate.cost_squared = cost;
    if neighbour.x != 0 { candidate.offset_x += 1; }
    if neighbour.y != 0 { candidate.offset_y += 1; }

    grid.put(x, y, candidate);
    true
}


/// Propagate the seeds of the grid to every reachable cell,
/// in one forward and one backward pass.
/// Row sweeps run strictly one after another, as every sweep
/// reads the records the previous one has just written.
pub fn propagate(grid: &mut DistanceGrid, connectivity: Connectivity) {
    match connectivity {
        Connectivity::Four => propagate_four(grid),
        Connectivity::Eight => propagate_eight(grid),
    }
}

fn propagate_four(grid: &mut DistanceGrid) {
    let width = grid.width() as usize;
    let height = grid.height() as usize;

    // forward pass, top to bottom
    for y in 1 ..= height {
        for x in 1 ..= width {
            relax(grid, x, y, Neighbour::UP);
            relax(grid, x, y, Neighbour::LEFT);
        }

        for x in (1 .. width).rev() {
            relax(grid, x, y, Neighbour::RIGHT);
        }
    }

    log::trace!("forward pass done");

    // backward pass, bottom to top,
    // skipping the last row, whose lower neighbours are all border
    for y in (1 .. height).rev() {
        for x in 1 ..= width {
            relax(grid, x, y, Neighbour::DOWN);
            relax(grid, x, y, Neighbour::LEFT);
        }

        for x in (1 .. width).rev() {
            relax(grid, x, y, Neighbour::RIGHT);
        }
    }

    log::trace!("backward pass done");
}

fn propagate_eight(grid: &mut DistanceGrid) {
    let width = grid.width() as usize;
    let height = grid.height() as usize;

    for y in 1 ..= height {
        for x in 1 ..= width {
            relax(grid, x, y, Neighbour::UP);
            relax(grid, x, y, Neighbour::LEFT);
            relax(grid, x, y, Neighbour::UP_LEFT);
        }

        // the rightmost cell only has border to its right
        for x in (1 .. width).rev() {
            relax(grid, x, y, Neighbour::RIGHT);
            relax(grid, x, y, Neighbour::UP_RIGHT);
        }
    }

    log::trace!("forward pass done");

    for y in (1 .. height).rev() {
        for x in 1 ..= width {
            relax(grid, x, y, Neighbour::DOWN);
            relax(grid, x, y, Neighbour::LEFT);
            relax(grid, x, y, Neighbour::DOWN_LEFT);
        }

        for x in (1 .. width).rev() {
            relax(grid, x, y, Neighbour::RIGHT);
            relax(grid, x, y, Neighbour::DOWN_RIGHT);
        }
    }

    log::trace!("backward pass done");
}
