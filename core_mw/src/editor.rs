//! [`GridEditor`] routes pointer and keyboard edits into a [`WallGrid`] and reports each change
//! to its observers

use crate::document::GridDocument;
use crate::grid::standard_grid::StandardGrid;
use crate::grid::{CellPos, Direction, WallGrid, Walls};
use crate::hit_test::WallTarget;
use anyhow::Error;
use log::{debug, info};
use std::sync::mpsc::Sender;

/// A change to an editor's grid
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridEvent {
    /// A cell was written; the neighbors sharing its walls may also have changed
    WallsChanged { cell: CellPos, walls: Walls },
    /// The grid changed size and the selection was cleared
    Resized { width: usize, height: usize },
    /// A cell and its shared walls were cleared
    CellCleared(CellPos),
    /// Every cell was replaced, by a document load or a template
    Loaded { width: usize, height: usize },
    SelectionChanged(Option<CellPos>),
}

/// Receives every [`GridEvent`] an editor produces
pub trait GridObserver {
    fn notify(&mut self, event: &GridEvent);
}

impl GridObserver for Sender<GridEvent> {
    fn notify(&mut self, event: &GridEvent) {
        // the receiver is gone when nobody is listening anymore
        let _ = self.send(event.clone());
    }
}

/// Owns the grid being annotated and the state of the current drag stroke
///
/// A drag stroke adds walls only: the wall under the pointer when the drag starts is set, and
/// each time the pointer moves onto a different wall that one is set too. Moving around on the
/// same wall does nothing, and releasing the pointer never changes a wall.
pub struct GridEditor {
    grid: WallGrid,
    /// Last wall written by the drag in progress
    stroke: Option<WallTarget>,
    observers: Vec<Box<dyn GridObserver>>,
}

impl Default for GridEditor {
    fn default() -> Self {
        Self::new(WallGrid::default())
    }
}

impl GridEditor {
    pub fn new(grid: WallGrid) -> Self {
        Self {
            grid,
            stroke: None,
            observers: vec![],
        }
    }

    pub fn grid(&self) -> &WallGrid {
        &self.grid
    }

    pub fn add_observer(&mut self, observer: impl GridObserver + 'static) {
        self.observers.push(Box::new(observer));
    }

    fn emit(&mut self, event: GridEvent) {
        for observer in &mut self.observers {
            observer.notify(&event);
        }
    }

    fn emit_walls(&mut self, cell: CellPos) {
        if let Some(walls) = self.grid.walls(cell.x, cell.y) {
            self.emit(GridEvent::WallsChanged { cell, walls });
        }
    }

    pub fn selected(&self) -> Option<CellPos> {
        self.grid.selected()
    }

    /// Select a cell; out of bounds cells are ignored
    pub fn select(&mut self, cell: CellPos) {
        let before = self.grid.selected();
        if self.grid.select(cell.x, cell.y) && before != Some(cell) {
            self.emit(GridEvent::SelectionChanged(Some(cell)));
        }
    }

    pub fn clear_selection(&mut self) {
        if self.grid.selected().is_some() {
            self.grid.clear_selection();
            self.emit(GridEvent::SelectionChanged(None));
        }
    }

    /// Move the selection one cell; stays put at the edge of the grid
    ///
    /// Selects the top left cell if nothing is selected.
    pub fn move_selection(&mut self, dir: Direction) {
        let next = match self.grid.selected() {
            Some(cell) => self.grid.neighbor(cell, dir),
            None => Some(CellPos::new(0, 0)),
        };
        if let Some(next) = next {
            self.select(next);
        }
    }

    /// Move the selection to the next cell in reading order, wrapping to the start of the next
    /// row; stays put on the last cell
    pub fn advance_selection(&mut self) {
        let next = match self.grid.selected() {
            None => Some(CellPos::new(0, 0)),
            Some(CellPos { x, y }) if x + 1 < self.grid.width() => Some(CellPos::new(x + 1, y)),
            Some(CellPos { y, .. }) if y + 1 < self.grid.height() => Some(CellPos::new(0, y + 1)),
            Some(_) => None,
        };
        if let Some(next) = next {
            self.select(next);
        }
    }

    pub fn set_cell_walls(&mut self, cell: CellPos, walls: Walls) -> Result<(), Error> {
        self.grid.set_cell_walls(cell.x, cell.y, walls)?;
        self.emit_walls(cell);
        Ok(())
    }

    pub fn toggle_wall(&mut self, cell: CellPos, dir: Direction) -> Result<(), Error> {
        self.grid.toggle_wall(cell.x, cell.y, dir)?;
        self.emit_walls(cell);
        Ok(())
    }

    pub fn clear_cell(&mut self, cell: CellPos) -> Result<(), Error> {
        self.grid.clear_cell(cell.x, cell.y)?;
        self.emit(GridEvent::CellCleared(cell));
        Ok(())
    }

    /// Toggle a wall of the selected cell; does nothing without a selection
    pub fn toggle_selected(&mut self, dir: Direction) -> Result<(), Error> {
        match self.grid.selected() {
            Some(cell) => self.toggle_wall(cell, dir),
            None => Ok(()),
        }
    }

    /// Clear the selected cell; does nothing without a selection
    pub fn clear_selected(&mut self) -> Result<(), Error> {
        match self.grid.selected() {
            Some(cell) => self.clear_cell(cell),
            None => Ok(()),
        }
    }

    /// A click that didn't turn into a drag flips the wall under the pointer
    pub fn click_wall(&mut self, target: WallTarget) -> Result<(), Error> {
        self.stroke = None;
        self.toggle_wall(target.cell, target.wall)
    }

    /// Start a drag stroke on a wall, adding it
    pub fn begin_stroke(&mut self, target: WallTarget) -> Result<(), Error> {
        self.add_wall(target)?;
        self.stroke = Some(target);
        Ok(())
    }

    /// Continue the drag stroke onto a wall
    ///
    /// Returns whether a wall was written: false when there is no stroke in progress or the
    /// pointer is still over the last wall.
    pub fn continue_stroke(&mut self, target: WallTarget) -> Result<bool, Error> {
        match self.stroke {
            Some(last) if last != target => {
                self.add_wall(target)?;
                self.stroke = Some(target);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    pub fn end_stroke(&mut self) {
        self.stroke = None;
    }

    pub fn is_stroking(&self) -> bool {
        self.stroke.is_some()
    }

    fn add_wall(&mut self, target: WallTarget) -> Result<(), Error> {
        let cell = target.cell;
        self.grid.set_wall(cell.x, cell.y, target.wall)?;
        self.emit_walls(cell);
        Ok(())
    }

    pub fn resize(&mut self, width: usize, height: usize) -> Result<(), Error> {
        self.grid.resize(width, height)?;
        self.stroke = None;
        self.emit(GridEvent::Resized { width, height });
        Ok(())
    }

    /// Replace the grid with a document, which must be exactly `expected_width` by
    /// `expected_height`
    ///
    /// The grid is unchanged if the document is rejected.
    pub fn load_document(
        &mut self,
        doc: &GridDocument,
        expected_width: usize,
        expected_height: usize,
    ) -> Result<(), Error> {
        doc.validate(expected_width, expected_height)?;
        self.grid.load_document(doc)?;
        self.stroke = None;
        let (width, height) = (self.grid.width(), self.grid.height());
        info!("Loaded {width}x{height} grid");
        self.emit(GridEvent::Loaded { width, height });
        Ok(())
    }

    pub fn to_document(&self) -> GridDocument {
        self.grid.to_document()
    }

    pub fn apply_template(&mut self, template: StandardGrid) -> Result<(), Error> {
        template.apply(&mut self.grid)?;
        self.stroke = None;
        debug!("Applied {} template", template.name());
        let (width, height) = (self.grid.width(), self.grid.height());
        self.emit(GridEvent::Loaded { width, height });
        Ok(())
    }
}
