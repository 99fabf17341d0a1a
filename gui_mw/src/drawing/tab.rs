use crate::drawing::canvas::{draw_canvas, draw_mode_help};
use crate::drawing::cell::draw_cell_panel;
use crate::drawing::export::draw_export;
use crate::drawing::settings::draw_settings;
use crate::App;
use eframe::egui::{Ui, WidgetText};
use egui_dock::TabViewer;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Tab {
    /// The image with the grid drawn over it
    Canvas,
    /// Grid size, files and templates
    Setup,
    /// Walls of the selected cell
    Cell,
    /// While visible, the canvas edits walls instead of selecting cells
    Draw,
    /// Text exports
    Export,
}

impl TabViewer for App {
    type Tab = Tab;

    fn title(&mut self, tab: &mut Self::Tab) -> WidgetText {
        match tab {
            Tab::Canvas => "Image",
            Tab::Setup => "Setup",
            Tab::Cell => "Cell",
            Tab::Draw => "Draw",
            Tab::Export => "Export",
        }
        .into()
    }

    fn ui(&mut self, ui: &mut Ui, tab: &mut Self::Tab) {
        match tab {
            Tab::Canvas => draw_canvas(self, ui),
            Tab::Setup => draw_settings(self, ui),
            Tab::Cell => draw_cell_panel(self, ui),
            Tab::Draw => {
                self.draw_tab_shown = true;
                draw_mode_help(self, ui)
            }
            Tab::Export => draw_export(self, ui),
        }
    }

    fn closeable(&mut self, _tab: &mut Self::Tab) -> bool {
        false
    }
}
