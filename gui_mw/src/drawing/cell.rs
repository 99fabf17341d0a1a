use crate::colors::WALL_PRESENT_BUTTON_COLOR;
use crate::keybindings::wall_key;
use crate::App;
use core_mw::grid::{CellPos, Direction};
use eframe::egui;
use eframe::egui::{RichText, Ui};

pub fn draw_cell_panel(app: &mut App, ui: &mut Ui) {
    let Some(cell) = app.editor.selected() else {
        ui.label("Click a cell, or use the arrow keys, to select it");
        return;
    };
    let Some(walls) = app.editor.grid().walls(cell.x, cell.y) else {
        return;
    };

    ui.heading(format!("Cell ({}, {})", cell.x, cell.y));

    let mut toggled = None;
    ui.horizontal(|ui| {
        for dir in Direction::get_all() {
            let mut button = egui::Button::new(RichText::new(dir.letter().to_string()).monospace());
            if walls.has(dir) {
                button = button.fill(WALL_PRESENT_BUTTON_COLOR);
            }
            let response = ui
                .add(button)
                .on_hover_text(format!("Toggle {dir:?} wall ({:?})", wall_key(dir)));
            if response.clicked() {
                toggled = Some(dir);
            }
        }
    });
    if let Some(dir) = toggled {
        let result = app.editor.toggle_wall(cell, dir);
        app.report(result);
    }

    ui.label(RichText::new(format!("{walls:b} = {}", walls.bits())).monospace());
    if ui
        .button(format!("{} Clear cell", egui_phosphor::regular::ERASER))
        .clicked()
    {
        let result = app.editor.clear_cell(cell);
        app.report(result);
    }

    ui.separator();
    draw_value_table(app, ui);
}

/// Every cell's mask in a compact table; click one to select it
fn draw_value_table(app: &mut App, ui: &mut Ui) {
    let selected = app.editor.selected();
    let mut clicked = None;

    egui::ScrollArea::both().show(ui, |ui| {
        egui::Grid::new("cell_values")
            .spacing([2.0, 2.0])
            .show(ui, |ui| {
                for (y, row) in app.editor.grid().rows().iter().enumerate() {
                    for (x, walls) in row.iter().enumerate() {
                        let pos = CellPos::new(x, y);
                        let text = if walls.is_empty() {
                            "·".to_string()
                        } else {
                            walls.bits().to_string()
                        };
                        let label = RichText::new(format!("{text:>2}")).monospace();
                        if ui.selectable_label(selected == Some(pos), label).clicked() {
                            clicked = Some(pos);
                        }
                    }
                    ui.end_row();
                }
            });
    });

    if let Some(pos) = clicked {
        app.editor.select(pos);
    }
}
