//! Converting a [`WallGrid`] into the text formats used by maze solvers

use crate::grid::{Direction, WallGrid, Walls};
use anyhow::{anyhow, Error};
use std::fmt;
use std::str::FromStr;

/// Rows of plain integers, indexed by `[y][x]`
pub type IntGrid = Vec<Vec<u8>>;

/// Which output bit each wall is written to
///
/// Parsed from a string of up to four of the letters N, E, S, W (any case). The first letter
/// gets bit 8, the second bit 4, then 2, then 1. A letter that appears twice keeps its last
/// position; a missing letter is dropped from the output.
///
/// ```
/// use core_mw::export::WallOrder;
/// use core_mw::grid::Walls;
///
/// let order: WallOrder = "WSEN".parse().unwrap();
/// assert_eq!(order.remap(Walls::new(8).unwrap()), 1);
/// assert_eq!(order.to_string(), "WSEN");
/// ```
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WallOrder {
    /// Output bit for each wall, in [`Direction::get_all`] order
    bits: [u8; 4],
}

impl Default for WallOrder {
    fn default() -> Self {
        Self { bits: [8, 4, 2, 1] }
    }
}

impl WallOrder {
    /// Strip everything but the letters N, E, S, W, upper-case the rest and keep at most four
    pub fn sanitize(input: &str) -> String {
        input
            .chars()
            .filter(|c| Direction::from_letter(*c).is_some())
            .map(|c| c.to_ascii_uppercase())
            .take(4)
            .collect()
    }

    /// The output bit for a wall; 0 if the wall was left out of the order
    pub fn bit_for(&self, dir: Direction) -> u8 {
        self.bits[dir as usize]
    }

    /// Whether every wall lands on its own output bit
    pub fn is_permutation(&self) -> bool {
        let mut sorted = self.bits;
        sorted.sort_unstable();
        sorted == [1, 2, 4, 8]
    }

    pub fn remap(&self, walls: Walls) -> u8 {
        Direction::get_all()
            .into_iter()
            .filter(|dir| walls.has(*dir))
            .fold(0, |acc, dir| acc | self.bit_for(dir))
    }
}

impl FromStr for WallOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let letters = s
            .chars()
            .map(|c| {
                Direction::from_letter(c).ok_or_else(|| {
                    anyhow!("Invalid wall letter '{c}' in wall order \"{s}\", expected N, E, S or W")
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        if letters.len() > 4 {
            return Err(anyhow!(
                "Wall order \"{s}\" has {} letters, expected at most 4",
                letters.len()
            ));
        }

        let mut bits = [0; 4];
        for (i, dir) in letters.into_iter().enumerate() {
            bits[dir as usize] = 1 << (3 - i);
        }
        Ok(Self { bits })
    }
}

/// Letters by output bit, most significant first; `-` for an unused bit
impl fmt::Display for WallOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in [8, 4, 2, 1] {
            let letter = Direction::get_all()
                .into_iter()
                .find(|dir| self.bit_for(*dir) == bit)
                .map_or('-', Direction::letter);
            write!(f, "{letter}")?;
        }
        Ok(())
    }
}

/// Rewrite every cell of a grid with the given bit assignment
pub fn remap(grid: &WallGrid, order: &WallOrder) -> IntGrid {
    grid.rows()
        .iter()
        .map(|row| row.iter().map(|walls| order.remap(*walls)).collect())
        .collect()
}

fn horizontal(walls: &Walls, dir: Direction) -> &'static str {
    if walls.has(dir) {
        "---"
    } else {
        "   "
    }
}

fn vertical(walls: &Walls, dir: Direction) -> char {
    if walls.has(dir) {
        '|'
    } else {
        ' '
    }
}

/// Draw the grid as ASCII art, with `o` at every post
///
/// Horizontal walls come from each cell's North bit (and the last row's South bit). Vertical
/// walls come from each cell's West bit, plus the East bit of the last column; the right border
/// is left off entirely when that bit is clear.
///
/// ```
/// use core_mw::export::render_ascii;
/// use core_mw::grid::standard_grid::StandardGrid;
///
/// let grid = StandardGrid::Outer.build(2, 1).unwrap();
/// assert_eq!(render_ascii(&grid), "o---o---o\n|       |\no---o---o\n");
/// ```
pub fn render_ascii(grid: &WallGrid) -> String {
    let mut out = String::new();
    for row in grid.rows() {
        out.push('o');
        for walls in row {
            out.push_str(horizontal(walls, Direction::North));
            out.push('o');
        }
        out.push('\n');

        if let Some(first) = row.first() {
            out.push(vertical(first, Direction::West));
        }
        for (x, _) in row.iter().enumerate() {
            out.push_str("   ");
            if let Some(next) = row.get(x + 1) {
                out.push(vertical(next, Direction::West));
            }
        }
        if row.last().is_some_and(|walls| walls.has(Direction::East)) {
            out.push('|');
        }
        out.push('\n');
    }

    if let Some(last) = grid.rows().last() {
        out.push('o');
        for walls in last {
            out.push_str(horizontal(walls, Direction::South));
            out.push('o');
        }
        out.push('\n');
    }
    out
}

/// One line per row, values separated by single spaces
pub fn render_delimited(cells: &[Vec<u8>]) -> String {
    cells
        .iter()
        .map(|row| {
            let line = row.iter().map(u8::to_string).collect::<Vec<_>>();
            format!("{}\n", line.join(" "))
        })
        .collect()
}

fn format_nested(cells: &[Vec<u8>], open: char, close: char) -> String {
    cells
        .iter()
        .map(|row| {
            let values = row.iter().map(u8::to_string).collect::<Vec<_>>();
            format!("    {open}{}{close}", values.join(", "))
        })
        .collect::<Vec<_>>()
        .join(",\n")
}

/// A Python list-of-lists literal
pub fn format_python(cells: &[Vec<u8>]) -> String {
    format!("[\n{}\n]", format_nested(cells, '[', ']'))
}

/// A C++ brace initializer, terminated with `;`
pub fn format_cpp(cells: &[Vec<u8>]) -> String {
    format!("{{\n{}\n}};", format_nested(cells, '{', '}'))
}
