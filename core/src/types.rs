use ndarray::Array2;

/// Single coordinate axis used for board rows, columns, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(row, col)`, both 0-based.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

/// Which cells count as neighbors of a position.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Neighborhood {
    /// The up to 8 cells sharing an edge or a corner.
    Moore,
    /// The up to 4 cells sharing an edge.
    VonNeumann,
}

impl Neighborhood {
    const fn displacements(self) -> &'static [(isize, isize)] {
        match self {
            Self::Moore => &MOORE,
            Self::VonNeumann => &VON_NEUMANN,
        }
    }
}

const MOORE: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

const VON_NEUMANN: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

pub trait NeighborIterExt {
    fn iter_neighbors(&self, index: Coord2, kind: Neighborhood) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, index: Coord2, kind: Neighborhood) -> NeighborIter {
        let (rows, cols) = self.dim();
        // grids are built from `Coord` sized dimensions
        let bounds = (
            Coord::try_from(rows).unwrap_or(Coord::MAX),
            Coord::try_from(cols).unwrap_or(Coord::MAX),
        );
        NeighborIter::new(index, bounds, kind)
    }
}

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, delta: (isize, isize), bounds: Coord2) -> Option<Coord2> {
    let (row, col) = coords;
    let (d_row, d_col) = delta;
    let (max_row, max_col) = bounds;

    let next_row = row.checked_add_signed(d_row.try_into().ok()?)?;
    if next_row >= max_row {
        return None;
    }

    let next_col = col.checked_add_signed(d_col.try_into().ok()?)?;
    if next_col >= max_col {
        return None;
    }

    Some((next_row, next_col))
}

/// In-bounds neighbors of a cell, clamped to the grid edges.
#[derive(Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    displacements: &'static [(isize, isize)],
    index: u8,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2, kind: Neighborhood) -> Self {
        Self {
            center,
            bounds,
            displacements: kind.displacements(),
            index: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *self.displacements.get(usize::from(self.index))?;
            self.index += 1;

            if let Some(next_item) = apply_delta(self.center, delta, self.bounds) {
                return Some(next_item);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn neighbors(center: Coord2, kind: Neighborhood) -> Vec<Coord2> {
        NeighborIter::new(center, (18, 25), kind).collect()
    }

    #[test]
    fn moore_neighbor_counts_are_clamped_to_the_grid() {
        assert_eq!(neighbors((0, 0), Neighborhood::Moore).len(), 3);
        assert_eq!(neighbors((0, 5), Neighborhood::Moore).len(), 5);
        assert_eq!(neighbors((5, 5), Neighborhood::Moore).len(), 8);
        assert_eq!(neighbors((17, 24), Neighborhood::Moore).len(), 3);
        assert_eq!(neighbors((9, 24), Neighborhood::Moore).len(), 5);
    }

    #[test]
    fn von_neumann_skips_diagonals() {
        assert_eq!(
            neighbors((5, 5), Neighborhood::VonNeumann),
            [(4, 5), (6, 5), (5, 4), (5, 6)]
        );
        assert_eq!(
            neighbors((0, 0), Neighborhood::VonNeumann),
            [(1, 0), (0, 1)]
        );
    }

    #[test]
    fn single_cell_grid_has_no_neighbors() {
        assert_eq!(NeighborIter::new((0, 0), (1, 1), Neighborhood::Moore).count(), 0);
    }
}
