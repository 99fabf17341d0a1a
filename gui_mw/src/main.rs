mod colors;
mod drawing;
mod files;
mod keybindings;
mod transform;

use crate::colors::{STATUS_ERROR_COLOR, STATUS_OK_COLOR, STATUS_WARN_COLOR};
use crate::drawing::settings::UiSettings;
use crate::drawing::tab::Tab;
use anyhow::Error;
use core_mw::editor::{GridEditor, GridEvent};
use core_mw::settings::AnnotatorSettings;
use eframe::egui;
use eframe::egui::{Align, Color32, RichText, TextureHandle, Visuals};
use egui_dock::{DockArea, DockState, NodeIndex, Style};
use log::{error, info, warn};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::mpsc::{channel, Receiver};

fn main() -> eframe::Result {
    env_logger::Builder::new()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    info!("Maze wall annotator starting up");

    let native_options = eframe::NativeOptions::default();
    eframe::run_native(
        "Maze Wall Annotator",
        native_options,
        Box::new(|cc| Ok(Box::new(App::new(cc)))),
    )
}

/// The image being annotated
pub struct LoadedImage {
    pub path: PathBuf,
    pub texture: TextureHandle,
    /// Pixel size, `[width, height]`
    pub size: [usize; 2],
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warning,
    Error,
}

impl StatusLevel {
    fn color(self) -> Color32 {
        match self {
            StatusLevel::Info => STATUS_OK_COLOR,
            StatusLevel::Warning => STATUS_WARN_COLOR,
            StatusLevel::Error => STATUS_ERROR_COLOR,
        }
    }
}

/// Stores all the data needed for the application
pub struct App {
    dock_state: Option<DockState<Tab>>,

    editor: GridEditor,
    grid_events: Receiver<GridEvent>,
    image: Option<LoadedImage>,

    settings: AnnotatorSettings,
    ui_settings: UiSettings,
    settings_fields: Option<HashMap<String, (String, String)>>,

    /// Contents of the Export tab's text box
    export_text: String,
    status: Option<(StatusLevel, String)>,
    unsaved_changes: bool,

    /// Pointer edits target walls instead of cells; follows the Draw tab's visibility last frame
    draw_mode: bool,
    draw_tab_shown: bool,
    /// Brought to the front after the dock area is drawn
    pending_tab: Option<Tab>,
}

impl eframe::App for App {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.draw_mode = std::mem::take(&mut self.draw_tab_shown);
        if !self.draw_mode && self.editor.is_stroking() {
            self.editor.end_stroke();
        }

        self.update_keybindings(ctx);
        self.draw_layout(ctx);
        self.read_grid_events();
    }
}

impl App {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        cc.egui_ctx
            .style_mut(|style| style.visuals = Visuals::dark());

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);

        cc.egui_ctx.set_fonts(fonts);

        let mut dock_state = DockState::new(vec![Tab::Canvas]);
        let surface = dock_state.main_surface_mut();
        surface.split_right(
            NodeIndex::root(),
            0.7,
            vec![Tab::Setup, Tab::Cell, Tab::Draw, Tab::Export],
        );

        let (tx, grid_events) = channel();
        let mut editor = GridEditor::default();
        editor.add_observer(tx);

        Self {
            dock_state: Some(dock_state),

            editor,
            grid_events,
            image: None,

            settings: Default::default(),
            ui_settings: Default::default(),
            settings_fields: Some(HashMap::new()),

            export_text: String::new(),
            status: None,
            unsaved_changes: false,

            draw_mode: false,
            draw_tab_shown: false,
            pending_tab: None,
        }
    }

    pub fn set_status(&mut self, level: StatusLevel, message: impl Into<String>) {
        self.status = Some((level, message.into()));
    }

    /// Log and display a failed action
    pub fn report(&mut self, result: Result<(), Error>) {
        if let Err(e) = result {
            error!("{e:#}");
            self.set_status(StatusLevel::Error, format!("{e:#}"));
        }
    }

    fn read_grid_events(&mut self) {
        while let Ok(event) = self.grid_events.try_recv() {
            match event {
                GridEvent::WallsChanged { .. } | GridEvent::CellCleared(_) => {
                    self.unsaved_changes = true
                }
                GridEvent::Resized { width, height } => {
                    self.settings.grid_width = width;
                    self.settings.grid_height = height;
                    self.unsaved_changes = true;
                }
                GridEvent::Loaded { width, height } => {
                    self.settings.grid_width = width;
                    self.settings.grid_height = height;
                    let mismatched = self.editor.grid().inconsistencies().len();
                    if mismatched > 0 {
                        warn!("Grid has {mismatched} walls that disagree with their neighbor");
                        self.set_status(
                            StatusLevel::Warning,
                            format!("{mismatched} walls disagree with their neighbor"),
                        );
                    }
                }
                GridEvent::SelectionChanged(_) => {}
            }
        }
    }

    /// Draw the main outer layout
    pub fn draw_layout(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("menu").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.with_layout(egui::Layout::left_to_right(Align::Center), |ui| {
                    egui::menu::bar(ui, |ui| {
                        ui.menu_button("File", |ui| {
                            if ui.button("Open image...").clicked() {
                                ui.close_menu();
                                let result = self.open_image(ctx);
                                self.report(result);
                            }
                            if ui.button("Load grid...").clicked() {
                                ui.close_menu();
                                let result = self.load_grid();
                                self.report(result);
                            }
                            ui.separator();
                            if ui.button("Save").clicked() {
                                ui.close_menu();
                                let result = self.save();
                                self.report(result);
                            }
                            if ui.button("Save as...").clicked() {
                                ui.close_menu();
                                let result = self.save_as();
                                self.report(result);
                            }
                        });
                        ui.menu_button("View", |ui| {
                            ui.checkbox(&mut self.settings.show_image, "Show image");
                            ui.checkbox(&mut self.settings.show_grid, "Show grid");
                        });
                    });
                    if let Some(image) = &self.image {
                        let name = image
                            .path
                            .file_name()
                            .map(|name| name.to_string_lossy().to_string())
                            .unwrap_or_default();
                        let marker = if self.unsaved_changes { " ●" } else { "" };
                        ui.label(format!("{name}{marker}"));
                    }
                });
                ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
                    if let Some((level, message)) = &self.status {
                        ui.label(RichText::new(message).color(level.color()));
                    }
                });
            });
        });

        // take out dock_state to pass it to DockArea::new and allow tabs to use data from App
        let Some(mut dock_state) = self.dock_state.take() else {
            return;
        };
        DockArea::new(&mut dock_state)
            .style(Style::from_egui(ctx.style().as_ref()))
            .show(ctx, self);
        if let Some(tab) = self.pending_tab.take() {
            if let Some(location) = dock_state.find_tab(&tab) {
                dock_state.set_active_tab(location);
            }
        }
        self.dock_state = Some(dock_state);
    }
}
