//! [`WallGrid`] is the W×H array of [`Walls`] masks, kept consistent across shared edges

pub mod standard_grid;

use crate::document::GridDocument;
use anyhow::{anyhow, Error};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One side of a cell
///
/// Rows increase downwards, so [`Direction::North`] points at the row above
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Get a list of all directions, in N, E, S, W order
    pub fn get_all() -> [Self; 4] {
        [Self::North, Self::East, Self::South, Self::West]
    }

    /// The bit this side occupies in a [`Walls`] mask
    pub fn bit(self) -> u8 {
        match self {
            Self::North => 8,
            Self::East => 4,
            Self::South => 2,
            Self::West => 1,
        }
    }

    /// The side of the neighboring cell that shares this edge
    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::East => Self::West,
            Self::South => Self::North,
            Self::West => Self::East,
        }
    }

    /// `(dx, dy)` from a cell to the neighbor across this side
    pub fn offset(self) -> (isize, isize) {
        match self {
            Self::North => (0, -1),
            Self::East => (1, 0),
            Self::South => (0, 1),
            Self::West => (-1, 0),
        }
    }

    pub fn letter(self) -> char {
        match self {
            Self::North => 'N',
            Self::East => 'E',
            Self::South => 'S',
            Self::West => 'W',
        }
    }

    /// Case-insensitive inverse of [`Direction::letter`]
    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(Self::North),
            'E' => Some(Self::East),
            'S' => Some(Self::South),
            'W' => Some(Self::West),
            _ => None,
        }
    }
}

/// The walls of one cell, as a 4-bit mask (N=8, E=4, S=2, W=1)
///
/// ```
/// use core_mw::grid::{Direction, Walls};
///
/// let walls = Walls::NONE.with(Direction::North).with(Direction::West);
/// assert_eq!(walls.bits(), 9);
/// assert!(walls.has(Direction::West));
/// assert_eq!(format!("{walls:b}"), "1001");
/// ```
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Walls(u8);

impl Walls {
    pub const NONE: Walls = Walls(0);
    pub const ALL: Walls = Walls(15);

    /// Returns `None` if `bits` is outside 0-15
    pub const fn new(bits: u8) -> Option<Self> {
        if bits <= 15 {
            Some(Self(bits))
        } else {
            None
        }
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn has(self, dir: Direction) -> bool {
        self.0 & dir.bit() != 0
    }

    pub fn with(self, dir: Direction) -> Self {
        Self(self.0 | dir.bit())
    }

    pub fn without(self, dir: Direction) -> Self {
        Self(self.0 & !dir.bit())
    }

    pub fn toggled(self, dir: Direction) -> Self {
        Self(self.0 ^ dir.bit())
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl TryFrom<u8> for Walls {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| anyhow!("Wall mask {value} is out of range (0-15)"))
    }
}

impl From<Walls> for u8 {
    fn from(walls: Walls) -> Self {
        walls.0
    }
}

/// Always four digits, most significant (North) first
impl fmt::Binary for Walls {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04b}", self.0)
    }
}

/// A cell location; `x` is the column, `y` is the row (increases downwards)
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct CellPos {
    pub x: usize,
    pub y: usize,
}

impl CellPos {
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

fn check_dimensions(width: usize, height: usize) -> Result<(), Error> {
    if width == 0 || height == 0 {
        return Err(anyhow!(
            "Grid dimensions must be positive, got {width}x{height}"
        ));
    }
    Ok(())
}

/// A grid of [`Walls`] where every shared edge agrees on both sides
///
/// Every mutation through [`WallGrid::set_cell_walls`] (and the helpers built on it) rewrites the
/// matching bit of all four neighbors, so two adjacent cells can never disagree about the wall
/// between them. The exceptions are [`WallGrid::load_document`], which trusts its input, and
/// growing with [`WallGrid::resize`], which keeps old border walls facing the new empty cells.
///
/// # Examples
///
/// ```
/// use core_mw::grid::{Direction, WallGrid};
///
/// let mut grid = WallGrid::new(3, 3).unwrap();
/// grid.toggle_wall(1, 1, Direction::East).unwrap();
///
/// assert_eq!(grid.walls(1, 1).unwrap().bits(), 4);
/// assert_eq!(grid.walls(2, 1).unwrap().bits(), 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WallGrid {
    width: usize,
    height: usize,
    /// Indexed by `cells[y][x]`
    cells: Vec<Vec<Walls>>,
    selected: Option<CellPos>,
}

impl Default for WallGrid {
    fn default() -> Self {
        Self::zeroed(
            crate::settings::DEFAULT_GRID_SIZE,
            crate::settings::DEFAULT_GRID_SIZE,
        )
    }
}

impl WallGrid {
    fn zeroed(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![vec![Walls::NONE; width]; height],
            selected: None,
        }
    }

    /// Create a grid with no walls; fails if either dimension is zero
    pub fn new(width: usize, height: usize) -> Result<Self, Error> {
        check_dimensions(width, height)?;
        Ok(Self::zeroed(width, height))
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the walls of the cell, or `None` if it is out of bounds
    pub fn walls(&self, x: usize, y: usize) -> Option<Walls> {
        self.cells.get(y).and_then(|row| row.get(x)).copied()
    }

    /// All rows, top to bottom
    pub fn rows(&self) -> &[Vec<Walls>] {
        &self.cells
    }

    /// Raw masks, indexed by `[y][x]`
    pub fn to_bits(&self) -> Vec<Vec<u8>> {
        self.cells
            .iter()
            .map(|row| row.iter().map(|walls| walls.bits()).collect())
            .collect()
    }

    /// Returns the cell across the given side, or `None` if that would leave the grid
    ///
    /// # Examples
    ///
    /// ```
    /// use core_mw::grid::{CellPos, Direction, WallGrid};
    ///
    /// let grid = WallGrid::new(2, 2).unwrap();
    /// assert_eq!(grid.neighbor(CellPos::new(0, 0), Direction::East), Some(CellPos::new(1, 0)));
    /// assert_eq!(grid.neighbor(CellPos::new(0, 0), Direction::North), None);
    /// ```
    pub fn neighbor(&self, p: CellPos, dir: Direction) -> Option<CellPos> {
        let (dx, dy) = dir.offset();
        let x = p.x.checked_add_signed(dx)?;
        let y = p.y.checked_add_signed(dy)?;
        (x < self.width && y < self.height).then_some(CellPos::new(x, y))
    }

    fn checked_pos(&self, x: usize, y: usize) -> Result<CellPos, Error> {
        if x >= self.width || y >= self.height {
            return Err(anyhow!(
                "Cell ({x}, {y}) is outside the {}x{} grid",
                self.width,
                self.height
            ));
        }
        Ok(CellPos::new(x, y))
    }

    /// Change the grid size, keeping the cells that fit in both the old and new size
    ///
    /// Cells outside the overlap are lost; new cells have no walls. Clears the selection.
    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), Error> {
        check_dimensions(width, height)?;

        let mut cells = vec![vec![Walls::NONE; width]; height];
        for (new_row, old_row) in cells.iter_mut().zip(&self.cells) {
            for (new, old) in new_row.iter_mut().zip(old_row) {
                *new = *old;
            }
        }

        debug!(
            "Resized grid from {}x{} to {width}x{height}",
            self.width, self.height
        );
        self.width = width;
        self.height = height;
        self.cells = cells;
        self.selected = None;
        Ok(())
    }

    /// Overwrite the walls of a cell, then bring every neighbor's shared wall in line with it
    ///
    /// All four neighbors are rewritten on every call, not only the sides that changed, so
    /// calling this twice with the same value is the same as calling it once.
    pub fn set_cell_walls(&mut self, x: usize, y: usize, walls: Walls) -> Result<(), Error> {
        let pos = self.checked_pos(x, y)?;
        self.cells[y][x] = walls;

        for dir in Direction::get_all() {
            if let Some(n) = self.neighbor(pos, dir) {
                let other = &mut self.cells[n.y][n.x];
                *other = if walls.has(dir) {
                    other.with(dir.opposite())
                } else {
                    other.without(dir.opposite())
                };
            }
        }

        trace!("Cell ({x}, {y}) set to {walls:b}");
        Ok(())
    }

    /// Flip one wall of a cell
    pub fn toggle_wall(&mut self, x: usize, y: usize, dir: Direction) -> Result<(), Error> {
        let walls = self.checked_walls(x, y)?;
        self.set_cell_walls(x, y, walls.toggled(dir))
    }

    /// Add one wall to a cell; a no-op if it is already there
    pub fn set_wall(&mut self, x: usize, y: usize, dir: Direction) -> Result<(), Error> {
        let walls = self.checked_walls(x, y)?;
        self.set_cell_walls(x, y, walls.with(dir))
    }

    /// Remove all walls of a cell (and the matching walls of its neighbors)
    pub fn clear_cell(&mut self, x: usize, y: usize) -> Result<(), Error> {
        self.set_cell_walls(x, y, Walls::NONE)
    }

    fn checked_walls(&self, x: usize, y: usize) -> Result<Walls, Error> {
        let pos = self.checked_pos(x, y)?;
        Ok(self.cells[pos.y][pos.x])
    }

    /// Replace the whole grid with the contents of a document
    ///
    /// The document is checked against its own declared dimensions first; if that fails the
    /// grid is left untouched. Cells are copied verbatim with no adjacency propagation, so a
    /// hand-edited document may leave [`WallGrid::inconsistencies`] non-empty.
    pub fn load_document(&mut self, doc: &GridDocument) -> Result<(), Error> {
        let (width, height) = (doc.dimensions.width, doc.dimensions.height);
        check_dimensions(width, height)?;
        doc.validate(width, height)?;

        let cells = doc
            .cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|&bits| Walls::try_from(bits))
                    .collect::<Result<Vec<_>, _>>()
            })
            .collect::<Result<Vec<_>, _>>()?;

        self.resize(width, height)?;
        self.cells = cells;
        self.selected = None;
        debug!("Loaded {width}x{height} grid document");
        Ok(())
    }

    /// Copy the grid into its persisted form
    pub fn to_document(&self) -> GridDocument {
        GridDocument::new(self.width, self.height, self.to_bits())
    }

    /// Select a cell for highlighting; out of bounds cells are ignored
    ///
    /// Returns whether the selection was applied
    pub fn select(&mut self, x: usize, y: usize) -> bool {
        match self.checked_pos(x, y) {
            Ok(pos) => {
                self.selected = Some(pos);
                true
            }
            Err(_) => false,
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected(&self) -> Option<CellPos> {
        self.selected
    }

    /// Every shared edge whose two sides disagree, as `(cell, side)` with side East or South
    ///
    /// Always empty unless a document was loaded that broke the rule.
    pub fn inconsistencies(&self) -> Vec<(CellPos, Direction)> {
        let mut found = vec![];
        for (y, row) in self.cells.iter().enumerate() {
            for (x, walls) in row.iter().enumerate() {
                let pos = CellPos::new(x, y);
                for dir in [Direction::East, Direction::South] {
                    if let Some(n) = self.neighbor(pos, dir) {
                        if walls.has(dir) != self.cells[n.y][n.x].has(dir.opposite()) {
                            found.push((pos, dir));
                        }
                    }
                }
            }
        }
        found
    }

    pub fn is_consistent(&self) -> bool {
        self.inconsistencies().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    fn bits(grid: &WallGrid, x: usize, y: usize) -> u8 {
        grid.walls(x, y).unwrap().bits()
    }

    #[test]
    fn direction_pairs() {
        for dir in Direction::get_all() {
            assert_eq!(dir.opposite().opposite(), dir);
            let (dx, dy) = dir.offset();
            let (ox, oy) = dir.opposite().offset();
            assert_eq!((dx + ox, dy + oy), (0, 0));
            assert_eq!(Direction::from_letter(dir.letter()), Some(dir));
            assert_eq!(
                Direction::from_letter(dir.letter().to_ascii_lowercase()),
                Some(dir)
            );
        }
        assert_eq!(Direction::from_letter('x'), None);
        let total: u8 = Direction::get_all().iter().map(|d| d.bit()).sum();
        assert_eq!(total, 15);
    }

    #[test]
    fn walls_range() {
        assert_eq!(Walls::new(15), Some(Walls::ALL));
        assert_eq!(Walls::new(16), None);
        let v = Walls::try_from(16);
        assert!(v.is_err());
        assert_eq!(
            format!("{}", v.unwrap_err()),
            "Wall mask 16 is out of range (0-15)"
        );
        assert_eq!(format!("{:b}", Walls::new(2).unwrap()), "0010");
    }

    #[test]
    fn new_rejects_zero_dimensions() {
        let v = WallGrid::new(0, 5);
        assert!(v.is_err());
        assert_eq!(
            format!("{}", v.unwrap_err()),
            "Grid dimensions must be positive, got 0x5"
        );
        let grid = WallGrid::new(4, 3).unwrap();
        assert_eq!((grid.width(), grid.height()), (4, 3));
        assert!(grid.rows().iter().flatten().all(|w| w.is_empty()));
    }

    #[test]
    fn set_propagates_to_all_neighbors() {
        let mut grid = WallGrid::new(3, 3).unwrap();
        grid.set_cell_walls(1, 1, Walls::ALL).unwrap();

        assert_eq!(bits(&grid, 1, 1), 15);
        assert_eq!(bits(&grid, 1, 0), 2, "cell above gets a south wall");
        assert_eq!(bits(&grid, 2, 1), 1, "cell to the right gets a west wall");
        assert_eq!(bits(&grid, 1, 2), 8, "cell below gets a north wall");
        assert_eq!(bits(&grid, 0, 1), 4, "cell to the left gets an east wall");
        assert_eq!(bits(&grid, 0, 0), 0, "diagonal cells are untouched");
        assert!(grid.is_consistent());
    }

    #[test]
    fn clearing_removes_neighbor_walls() {
        let mut grid = WallGrid::new(3, 3).unwrap();
        grid.set_cell_walls(1, 1, Walls::ALL).unwrap();
        grid.clear_cell(1, 1).unwrap();
        assert!(grid.rows().iter().flatten().all(|w| w.is_empty()));
    }

    #[test]
    fn propagation_overwrites_stale_neighbor() {
        let mut grid = WallGrid::new(3, 1).unwrap();
        let mut doc = grid.to_document();
        // (2, 0) claims a west wall that (1, 0) doesn't have
        doc.cells[0][2] = 1;
        grid.load_document(&doc).unwrap();
        assert!(!grid.is_consistent());

        // writing (1, 0) without an east wall resynchronizes (2, 0)
        grid.set_cell_walls(1, 0, Walls::NONE.with(North)).unwrap();
        assert_eq!(bits(&grid, 2, 0), 0);
        assert!(grid.is_consistent());
    }

    #[test]
    fn edges_skip_missing_neighbors() {
        let mut grid = WallGrid::new(1, 1).unwrap();
        grid.set_cell_walls(0, 0, Walls::ALL).unwrap();
        assert_eq!(bits(&grid, 0, 0), 15);

        let mut grid = WallGrid::new(2, 2).unwrap();
        grid.set_cell_walls(1, 1, Walls::ALL).unwrap();
        assert_eq!(grid.to_bits(), vec![vec![0, 2], vec![4, 15]]);
    }

    #[test]
    fn set_is_idempotent() {
        let mut once = WallGrid::new(4, 4).unwrap();
        once.set_cell_walls(2, 1, Walls::new(11).unwrap()).unwrap();
        let mut twice = once.clone();
        twice.set_cell_walls(2, 1, Walls::new(11).unwrap()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn toggle_twice_restores() {
        let mut grid = WallGrid::new(3, 3).unwrap();
        grid.set_cell_walls(0, 0, Walls::new(6).unwrap()).unwrap();
        let before = grid.clone();

        for dir in Direction::get_all() {
            grid.toggle_wall(1, 1, dir).unwrap();
            assert_ne!(grid, before);
            grid.toggle_wall(1, 1, dir).unwrap();
            assert_eq!(grid, before);
        }
    }

    #[test]
    fn set_wall_only_adds() {
        let mut grid = WallGrid::new(2, 1).unwrap();
        grid.set_wall(0, 0, East).unwrap();
        grid.set_wall(0, 0, East).unwrap();
        assert_eq!(grid.to_bits(), vec![vec![4, 1]]);
    }

    #[test]
    fn out_of_bounds_mutation_is_rejected() {
        let mut grid = WallGrid::new(2, 2).unwrap();
        let before = grid.clone();

        let v = grid.set_cell_walls(2, 0, Walls::ALL);
        assert!(v.is_err());
        assert_eq!(
            format!("{}", v.unwrap_err()),
            "Cell (2, 0) is outside the 2x2 grid"
        );
        assert!(grid.toggle_wall(0, 5, North).is_err());
        assert!(grid.clear_cell(9, 9).is_err());
        assert_eq!(grid, before);
    }

    #[test]
    fn resize_preserves_overlap() {
        let mut grid = WallGrid::new(3, 3).unwrap();
        grid.set_cell_walls(0, 0, Walls::new(9).unwrap()).unwrap();
        grid.set_cell_walls(2, 2, Walls::ALL).unwrap();
        grid.select(1, 1);
        let old = grid.to_bits();

        grid.resize(2, 4).unwrap();
        assert_eq!((grid.width(), grid.height()), (2, 4));
        assert_eq!(grid.selected(), None);
        for y in 0..4 {
            for x in 0..2 {
                let expected = if y < 3 { old[y][x] } else { 0 };
                assert_eq!(bits(&grid, x, y), expected);
            }
        }
    }

    #[test]
    fn resize_to_zero_fails_unchanged() {
        let mut grid = WallGrid::new(3, 3).unwrap();
        grid.set_cell_walls(1, 1, Walls::ALL).unwrap();
        let before = grid.clone();
        assert!(grid.resize(0, 3).is_err());
        assert_eq!(grid, before);
    }

    #[test]
    fn document_round_trip() {
        let mut grid = WallGrid::new(4, 2).unwrap();
        grid.set_cell_walls(1, 0, Walls::new(10).unwrap()).unwrap();
        grid.set_cell_walls(3, 1, Walls::new(5).unwrap()).unwrap();

        let mut loaded = grid.clone();
        loaded.load_document(&grid.to_document()).unwrap();
        assert_eq!(loaded, grid);
    }

    #[test]
    fn load_replaces_size_and_clears_selection() {
        let mut source = WallGrid::new(5, 2).unwrap();
        source.set_cell_walls(4, 1, Walls::new(3).unwrap()).unwrap();

        let mut grid = WallGrid::new(2, 2).unwrap();
        grid.select(1, 1);
        grid.load_document(&source.to_document()).unwrap();
        assert_eq!((grid.width(), grid.height()), (5, 2));
        assert_eq!(grid.selected(), None);
        assert_eq!(grid.to_bits(), source.to_bits());
    }

    #[test]
    fn invalid_load_leaves_grid_unchanged() {
        let mut grid = WallGrid::new(2, 2).unwrap();
        grid.set_cell_walls(0, 0, Walls::ALL).unwrap();
        let before = grid.clone();

        let mut doc = WallGrid::new(3, 3).unwrap().to_document();
        doc.cells[1][2] = 16;
        assert!(grid.load_document(&doc).is_err());

        let mut doc = WallGrid::new(3, 3).unwrap().to_document();
        doc.cells.pop();
        assert!(grid.load_document(&doc).is_err());

        assert_eq!(grid, before);
    }

    #[test]
    fn selection() {
        let mut grid = WallGrid::new(3, 2).unwrap();
        assert!(grid.select(2, 1));
        assert_eq!(grid.selected(), Some(CellPos::new(2, 1)));
        assert!(!grid.select(3, 1));
        assert_eq!(grid.selected(), Some(CellPos::new(2, 1)));
        grid.clear_selection();
        assert_eq!(grid.selected(), None);
    }

    #[test]
    fn inconsistencies_report_each_edge_once() {
        let mut grid = WallGrid::new(2, 2).unwrap();
        let mut doc = grid.to_document();
        doc.cells[0][0] = 4 | 2;
        grid.load_document(&doc).unwrap();
        assert_eq!(
            grid.inconsistencies(),
            vec![(CellPos::new(0, 0), East), (CellPos::new(0, 0), South)]
        );
    }
}
