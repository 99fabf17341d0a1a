use crate::colors::{STATUS_ERROR_COLOR, STATUS_WARN_COLOR};
use crate::{App, StatusLevel};
use core_mw::export::{format_cpp, format_python, remap, render_ascii, render_delimited, WallOrder};
use eframe::egui;
use eframe::egui::{TextEdit, TextStyle, Ui};

pub fn draw_export(app: &mut App, ui: &mut Ui) {
    ui.horizontal(|ui| {
        ui.label("Wall order");
        let field = ui.add(TextEdit::singleline(&mut app.settings.wall_order).desired_width(60.0));
        if field.changed() {
            app.settings.wall_order = WallOrder::sanitize(&app.settings.wall_order);
        }
    });

    let order = match app.settings.wall_order() {
        Ok(order) => order,
        Err(e) => {
            ui.colored_label(STATUS_ERROR_COLOR, e.to_string());
            return;
        }
    };
    if !order.is_permutation() {
        ui.colored_label(
            STATUS_WARN_COLOR,
            format!("Walls missing from the order are dropped ({order})"),
        );
    }

    ui.horizontal_wrapped(|ui| {
        if ui.button("Convert to array").clicked() {
            app.export_text = render_delimited(&remap(app.editor.grid(), &order));
        }
        if ui.button("Convert to MMS").clicked() {
            app.export_text = render_ascii(app.editor.grid());
        }
    });

    let mut copied = None;
    ui.horizontal_wrapped(|ui| {
        if ui
            .button(format!("{} Copy text", egui_phosphor::regular::COPY))
            .clicked()
        {
            copied = Some(("text", app.export_text.clone()));
        }
        if ui.button("Copy Python").clicked() {
            copied = Some(("Python", format_python(&remap(app.editor.grid(), &order))));
        }
        if ui.button("Copy C++").clicked() {
            copied = Some(("C++", format_cpp(&remap(app.editor.grid(), &order))));
        }
    });
    if let Some((what, text)) = copied {
        ui.ctx().copy_text(text);
        app.set_status(StatusLevel::Info, format!("Copied {what} to clipboard"));
    }

    ui.separator();
    let mut text = app.export_text.as_str();
    egui::ScrollArea::both().show(ui, |ui| {
        ui.add(
            TextEdit::multiline(&mut text)
                .font(TextStyle::Monospace)
                .desired_width(f32::INFINITY),
        );
    });
}
