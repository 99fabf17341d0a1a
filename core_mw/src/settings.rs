use crate::export::WallOrder;
use anyhow::{anyhow, Error};
use serde::{Deserialize, Serialize};

pub const MIN_GRID_SIZE: usize = 1;
pub const MAX_GRID_SIZE: usize = 50;
pub const DEFAULT_GRID_SIZE: usize = 20;

/// Options shown in the gui's side panels
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnnotatorSettings {
    pub grid_width: usize,
    pub grid_height: usize,
    /// Letters N, E, S, W; see [`WallOrder`]
    pub wall_order: String,
    /// Draw the loaded image under the grid
    pub show_image: bool,
    /// Draw grid lines and walls over the image
    pub show_grid: bool,
}

impl Default for AnnotatorSettings {
    fn default() -> Self {
        Self {
            grid_width: DEFAULT_GRID_SIZE,
            grid_height: DEFAULT_GRID_SIZE,
            wall_order: "NESW".to_string(),
            show_image: true,
            show_grid: true,
        }
    }
}

impl AnnotatorSettings {
    pub fn validate_dimensions(&self) -> Result<(), Error> {
        validate_dimensions(self.grid_width, self.grid_height)
    }

    pub fn wall_order(&self) -> Result<WallOrder, Error> {
        self.wall_order.parse()
    }
}

/// Both dimensions must be in [`MIN_GRID_SIZE`]..=[`MAX_GRID_SIZE`]
pub fn validate_dimensions(width: usize, height: usize) -> Result<(), Error> {
    let range = MIN_GRID_SIZE..=MAX_GRID_SIZE;
    if !range.contains(&width) || !range.contains(&height) {
        return Err(anyhow!(
            "Please enter valid grid dimensions ({MIN_GRID_SIZE}-{MAX_GRID_SIZE})"
        ));
    }
    Ok(())
}
