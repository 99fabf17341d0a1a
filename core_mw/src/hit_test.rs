//! Turning pointer positions into cells and walls
//!
//! A pointer near the middle of a cell side targets that wall. Corners are ambiguous and never
//! target anything.

use crate::grid::{CellPos, Direction};

/// How far into a cell (as a fraction of its size) a side still counts as the wall
pub const WALL_THRESHOLD: f32 = 0.15;
/// Fraction of each cell side, from either end, treated as a corner
pub const CORNER_THRESHOLD: f32 = 0.25;

/// Decide which wall of a cell a point targets
///
/// `x` and `y` are relative to the cell's top left corner. Returns `None` near a corner or away
/// from every wall.
///
/// ```
/// use core_mw::grid::Direction;
/// use core_mw::hit_test::classify;
///
/// assert_eq!(classify(50.0, 5.0, 100.0, 100.0), Some(Direction::North));
/// assert_eq!(classify(5.0, 5.0, 100.0, 100.0), None);
/// assert_eq!(classify(50.0, 50.0, 100.0, 100.0), None);
/// ```
pub fn classify(x: f32, y: f32, cell_width: f32, cell_height: f32) -> Option<Direction> {
    let u = x / cell_width;
    let v = y / cell_height;

    let near_end = |t: f32| t < CORNER_THRESHOLD || t > 1.0 - CORNER_THRESHOLD;
    if near_end(u) && near_end(v) {
        return None;
    }

    let middle = CORNER_THRESHOLD..=1.0 - CORNER_THRESHOLD;
    if v < WALL_THRESHOLD && middle.contains(&u) {
        Some(Direction::North)
    } else if v > 1.0 - WALL_THRESHOLD && middle.contains(&u) {
        Some(Direction::South)
    } else if u < WALL_THRESHOLD && middle.contains(&v) {
        Some(Direction::West)
    } else if u > 1.0 - WALL_THRESHOLD && middle.contains(&v) {
        Some(Direction::East)
    } else {
        None
    }
}

/// An axis aligned rectangle in screen coordinates
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Bounds {
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }
}

/// One wall of one cell
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct WallTarget {
    pub cell: CellPos,
    pub wall: Direction,
}

impl WallTarget {
    pub fn new(cell: CellPos, wall: Direction) -> Self {
        Self { cell, wall }
    }
}

/// Where a grid is drawn on screen
///
/// The grid always occupies a square of side `min(width, height)` of the displayed image,
/// centered in it. Cells are `side / columns` wide and `side / rows` tall, so grids that are not
/// square get rectangular cells.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GridPlacement {
    left: f32,
    top: f32,
    side: f32,
    columns: usize,
    rows: usize,
}

impl GridPlacement {
    pub fn centered(image: Bounds, columns: usize, rows: usize) -> Self {
        let side = image.width.min(image.height);
        Self {
            left: image.left + (image.width - side) / 2.0,
            top: image.top + (image.height - side) / 2.0,
            side,
            columns,
            rows,
        }
    }

    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.left, self.top, self.side, self.side)
    }

    pub fn cell_width(&self) -> f32 {
        self.side / self.columns as f32
    }

    pub fn cell_height(&self) -> f32 {
        self.side / self.rows as f32
    }

    /// The cell under a point, or `None` outside the grid square
    pub fn cell_at(&self, x: f32, y: f32) -> Option<CellPos> {
        let col = ((x - self.left) / self.cell_width()).floor();
        let row = ((y - self.top) / self.cell_height()).floor();
        // written so that NaN (from an empty placement) falls through to None
        if !(col >= 0.0 && row >= 0.0) {
            return None;
        }
        let (col, row) = (col as usize, row as usize);
        (col < self.columns && row < self.rows).then_some(CellPos::new(col, row))
    }

    /// The wall under a point, or `None` outside the grid or away from any wall
    pub fn wall_at(&self, x: f32, y: f32) -> Option<WallTarget> {
        let cell = self.cell_at(x, y)?;
        let rect = self.cell_rect(cell);
        let wall = classify(x - rect.left, y - rect.top, rect.width, rect.height)?;
        Some(WallTarget::new(cell, wall))
    }

    /// Screen rectangle covered by a cell
    pub fn cell_rect(&self, cell: CellPos) -> Bounds {
        let (w, h) = (self.cell_width(), self.cell_height());
        Bounds::new(
            self.left + cell.x as f32 * w,
            self.top + cell.y as f32 * h,
            w,
            h,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    #[test]
    fn classify_walls() {
        assert_eq!(classify(50.0, 10.0, 100.0, 100.0), Some(North));
        assert_eq!(classify(50.0, 90.0, 100.0, 100.0), Some(South));
        assert_eq!(classify(10.0, 50.0, 100.0, 100.0), Some(West));
        assert_eq!(classify(90.0, 50.0, 100.0, 100.0), Some(East));
    }

    #[test]
    fn classify_rejects_corners_and_center() {
        assert_eq!(classify(10.0, 10.0, 100.0, 100.0), None);
        assert_eq!(classify(90.0, 5.0, 100.0, 100.0), None);
        assert_eq!(classify(95.0, 95.0, 100.0, 100.0), None);
        assert_eq!(classify(50.0, 50.0, 100.0, 100.0), None);
        // inside the corner-free band, but not close enough to a side
        assert_eq!(classify(50.0, 20.0, 100.0, 100.0), None);
        // close to the top, but too near the left end
        assert_eq!(classify(20.0, 5.0, 100.0, 100.0), None);
    }

    #[test]
    fn classify_scales_per_axis() {
        // cells twice as wide as they are tall
        assert_eq!(classify(100.0, 5.0, 200.0, 100.0), Some(North));
        assert_eq!(classify(190.0, 50.0, 200.0, 100.0), Some(East));
        assert_eq!(classify(40.0, 50.0, 200.0, 100.0), None);
    }

    #[test]
    fn placement_centers_square() {
        let p = GridPlacement::centered(Bounds::new(0.0, 0.0, 400.0, 200.0), 10, 10);
        assert_eq!(p.bounds(), Bounds::new(100.0, 0.0, 200.0, 200.0));
        assert_eq!(p.cell_width(), 20.0);
        assert_eq!(p.cell_height(), 20.0);

        assert_eq!(p.cell_at(50.0, 50.0), None, "left margin");
        assert_eq!(p.cell_at(100.0, 0.0), Some(CellPos::new(0, 0)));
        assert_eq!(p.cell_at(299.0, 199.0), Some(CellPos::new(9, 9)));
        assert_eq!(p.cell_at(300.0, 100.0), None, "right edge");
        assert_eq!(p.cell_at(150.0, -1.0), None);
    }

    #[test]
    fn placement_non_square_grid() {
        let p = GridPlacement::centered(Bounds::new(10.0, 20.0, 100.0, 100.0), 4, 2);
        assert_eq!(p.cell_width(), 25.0);
        assert_eq!(p.cell_height(), 50.0);
        assert_eq!(p.cell_at(10.0 + 80.0, 20.0 + 60.0), Some(CellPos::new(3, 1)));
        assert_eq!(
            p.cell_rect(CellPos::new(3, 1)),
            Bounds::new(85.0, 70.0, 25.0, 50.0)
        );
        // right side of cell (3, 1), halfway down
        assert_eq!(
            p.wall_at(85.0 + 24.0, 70.0 + 25.0),
            Some(WallTarget::new(CellPos::new(3, 1), East))
        );
    }

    #[test]
    fn wall_at_matches_classify() {
        let p = GridPlacement::centered(Bounds::new(0.0, 0.0, 100.0, 100.0), 5, 5);
        assert_eq!(
            p.wall_at(50.0, 41.0),
            Some(WallTarget::new(CellPos::new(2, 2), North))
        );
        assert_eq!(p.wall_at(50.0, 50.0), None);
        assert_eq!(p.wall_at(150.0, 50.0), None);
    }

    #[test]
    fn empty_placement_hits_nothing() {
        let p = GridPlacement::centered(Bounds::new(0.0, 0.0, 0.0, 0.0), 3, 3);
        assert_eq!(p.cell_at(0.0, 0.0), None);
        assert_eq!(p.wall_at(0.0, 0.0), None);
    }
}
