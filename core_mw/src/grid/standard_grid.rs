use crate::grid::{Direction, WallGrid, Walls};
use anyhow::Error;
use serde::{Deserialize, Serialize};

/// Starting wall layouts that can be stamped onto a grid of any size
#[derive(Copy, Clone, Debug, Default, PartialOrd, PartialEq, Ord, Eq, Serialize, Deserialize)]
pub enum StandardGrid {
    /// No walls at all
    #[default]
    Blank,
    /// Only the outer boundary
    Outer,
    /// Every wall of every cell
    Closed,
}

impl StandardGrid {
    /// Get a list of all available templates
    pub fn get_all() -> [Self; 3] {
        [Self::Blank, Self::Outer, Self::Closed]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Blank => "Blank",
            Self::Outer => "Outer",
            Self::Closed => "Closed",
        }
    }

    /// Get a new [`WallGrid`] of the given size with this template's walls
    pub fn build(self, width: usize, height: usize) -> Result<WallGrid, Error> {
        let mut grid = WallGrid::new(width, height)?;
        self.apply(&mut grid)?;
        Ok(grid)
    }

    /// Replace every cell of an existing grid with this template's walls
    pub fn apply(self, grid: &mut WallGrid) -> Result<(), Error> {
        let (width, height) = (grid.width(), grid.height());
        for y in 0..height {
            for x in 0..width {
                let walls = match self {
                    Self::Blank => Walls::NONE,
                    Self::Closed => Walls::ALL,
                    Self::Outer => {
                        let mut walls = Walls::NONE;
                        if y == 0 {
                            walls = walls.with(Direction::North);
                        }
                        if x == width - 1 {
                            walls = walls.with(Direction::East);
                        }
                        if y == height - 1 {
                            walls = walls.with(Direction::South);
                        }
                        if x == 0 {
                            walls = walls.with(Direction::West);
                        }
                        walls
                    }
                };
                grid.set_cell_walls(x, y, walls)?;
            }
        }
        Ok(())
    }
}
