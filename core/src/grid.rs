/// Uniform bucket grid for fixed-radius neighbor queries.
#[derive(Clone, Debug, Default)]
pub struct SpatialGrid {
    cell_size: f32,
    cols: usize,
    rows: usize,
    cells: Vec<Vec<usize>>,
}

impl SpatialGrid {
    pub fn new(width: f32, height: f32, cell_size: f32) -> Self {
        let cell_size = cell_size.max(1.0);
        let cols = ((width.max(1.0) / cell_size).ceil() as usize).max(1);
        let rows = ((height.max(1.0) / cell_size).ceil() as usize).max(1);
        Self {
            cell_size,
            cols,
            rows,
            cells: vec![Vec::new(); cols * rows],
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Cell of a point; points outside the area clamp to the border cells.
    pub fn cell_of(&self, x: f32, y: f32) -> (usize, usize) {
        let col = (x / self.cell_size).floor().max(0.0) as usize;
        let row = (y / self.cell_size).floor().max(0.0) as usize;
        (col.min(self.cols - 1), row.min(self.rows - 1))
    }

    pub fn rebuild<I>(&mut self, points: I)
    where
        I: IntoIterator<Item = (f32, f32)>,
    {
        for cell in &mut self.cells {
            cell.clear();
        }
        for (index, (x, y)) in points.into_iter().enumerate() {
            let (col, row) = self.cell_of(x, y);
            self.cells[row * self.cols + col].push(index);
        }
    }

    /// Indices stored in the 3x3 block around `(x, y)`.
    pub fn neighbors(&self, x: f32, y: f32) -> impl Iterator<Item = usize> + '_ {
        let (col, row) = self.cell_of(x, y);
        let col_lo = col.saturating_sub(1);
        let row_lo = row.saturating_sub(1);
        let col_hi = (col + 1).min(self.cols - 1);
        let row_hi = (row + 1).min(self.rows - 1);
        (row_lo..=row_hi).flat_map(move |r| {
            (col_lo..=col_hi).flat_map(move |c| self.cells[r * self.cols + c].iter().copied())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outside_points_clamp_to_border() {
        let grid = SpatialGrid::new(300.0, 200.0, 100.0);
        assert_eq!((grid.cols(), grid.rows()), (3, 2));
        assert_eq!(grid.cell_of(-20.0, -5.0), (0, 0));
        assert_eq!(grid.cell_of(350.0, 250.0), (2, 1));
    }

    #[test]
    fn neighbors_cover_adjacent_cells_only() {
        let mut grid = SpatialGrid::new(500.0, 100.0, 100.0);
        grid.rebuild([(10.0, 10.0), (150.0, 10.0), (450.0, 10.0)]);
        let mut found: Vec<usize> = grid.neighbors(20.0, 20.0).collect();
        found.sort_unstable();
        assert_eq!(found, vec![0, 1]);
    }
}
