use crate::App;
use core_mw::grid::standard_grid::StandardGrid;
use core_mw::settings::{MAX_GRID_SIZE, MIN_GRID_SIZE};
use eframe::egui;
use eframe::egui::{Align, Color32, Layout, TextEdit, Ui, WidgetText};
use std::collections::HashMap;
use std::fmt::Debug;
use std::str::FromStr;

pub struct UiSettings {
    pub template: StandardGrid,
    pub templates_collapsed: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            template: StandardGrid::Outer,
            templates_collapsed: true,
        }
    }
}

fn validated<T: PartialEq>(
    id: String,
    ui: &mut Ui,
    fields: &mut HashMap<String, (String, String)>,
    value: &mut T,
    text: impl Into<WidgetText>,
    validation: fn(&str) -> Option<T>,
    to_str: fn(&T) -> String,
) {
    let text = text.into();

    ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
        ui.label(text);

        // the first time this field is drawn, its text comes from the value
        let (last_typed, last_valid) = fields.entry(id).or_insert_with(|| {
            let str = to_str(value);
            (str.clone(), str)
        });

        let field = ui.add(TextEdit::singleline(last_typed).desired_width(80.0));
        if let Some(t) = validation(last_typed.as_str()) {
            last_valid.clone_from(last_typed);
            // if they're not in the text box, and a new value has come in, replace it
            if !field.has_focus() && t != *value {
                let str = to_str(value);
                last_typed.clone_from(&str);
                *last_valid = str;
            } else {
                *value = t;
            }
        } else if !field.has_focus() {
            // if they're not in the text box, and they typed something invalid, just go back
            last_typed.clone_from(last_valid);
        }
    });
    ui.end_row();
}

pub fn num<T: FromStr + ToString + PartialEq>(
    id: String,
    ui: &mut Ui,
    fields: &mut HashMap<String, (String, String)>,
    value: &mut T,
    text: impl Into<WidgetText>,
) {
    validated(
        id,
        ui,
        fields,
        value,
        text,
        |x| x.trim().parse().ok(),
        T::to_string,
    )
}

pub fn dropdown<T: Debug + PartialEq + Clone>(
    ui: &mut Ui,
    id: String,
    text: impl Into<WidgetText>,
    value: &mut T,
    options: &[T],
) {
    let s_text = WidgetText::from(format!("{:?}", value));
    egui::ComboBox::new(id, text)
        .selected_text(s_text)
        .show_ui(ui, |ui| {
            for t in options {
                let str = WidgetText::from(format!("{:?}", t));
                ui.selectable_value(value, t.clone(), str);
            }
        });
}

fn collapsable_section(
    ui: &mut Ui,
    collapsed: &mut bool,
    button_color: Color32,
    header_contents: impl FnOnce(&mut Ui),
    body_contents: impl FnOnce(&mut Ui),
    tooltip: Option<impl Into<WidgetText>>,
) {
    ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
        let mut button = ui.add(
            egui::Button::new(match *collapsed {
                true => egui_phosphor::regular::CARET_RIGHT,
                false => egui_phosphor::regular::CARET_DOWN,
            })
            .fill(button_color),
        );
        if let Some(tt) = tooltip {
            button = button.on_hover_text(tt)
        }
        if button.clicked() {
            *collapsed = !*collapsed;
        }
        header_contents(ui);
    });
    ui.end_row();
    if !*collapsed {
        body_contents(ui);
        ui.label("");
        ui.end_row();
    }
}

pub fn draw_settings(app: &mut App, ui: &mut Ui) {
    let Some(mut fields) = app.settings_fields.take() else {
        return;
    };

    egui::Grid::new("settings_grid")
        .num_columns(1)
        .striped(true)
        .show(ui, |ui| draw_settings_inner(app, ui, &mut fields));

    app.settings_fields = Some(fields);
}

/// Reduce indentation
fn draw_settings_inner(app: &mut App, ui: &mut Ui, fields: &mut HashMap<String, (String, String)>) {
    ui.label(format!("Grid size ({MIN_GRID_SIZE}-{MAX_GRID_SIZE})"));
    ui.end_row();
    num(
        "grid_width".to_string(),
        ui,
        fields,
        &mut app.settings.grid_width,
        "Width",
    );
    num(
        "grid_height".to_string(),
        ui,
        fields,
        &mut app.settings.grid_height,
        "Height",
    );
    ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
        if ui
            .button(format!("{} Open image", egui_phosphor::regular::IMAGE))
            .clicked()
        {
            let ctx = ui.ctx().clone();
            let result = app.open_image(&ctx);
            app.report(result);
        }
        if ui.button("Apply size").clicked() {
            let result = app.apply_grid_size();
            app.report(result);
        }
    });
    ui.end_row();

    ui.separator();
    ui.end_row();

    ui.with_layout(Layout::left_to_right(Align::Center), |ui| {
        if ui
            .button(format!("{} Load grid", egui_phosphor::regular::FOLDER_OPEN))
            .clicked()
        {
            let result = app.load_grid();
            app.report(result);
        }
        if ui
            .button(format!("{} Save", egui_phosphor::regular::FLOPPY_DISK))
            .clicked()
        {
            let result = app.save();
            app.report(result);
        }
        if ui.button("Save as").clicked() {
            let result = app.save_as();
            app.report(result);
        }
    });
    ui.end_row();

    ui.separator();
    ui.end_row();

    ui.checkbox(&mut app.settings.show_image, "Show image");
    ui.end_row();
    ui.checkbox(&mut app.settings.show_grid, "Show grid");
    ui.end_row();

    ui.separator();
    ui.end_row();

    let mut apply_template = false;
    collapsable_section(
        ui,
        &mut app.ui_settings.templates_collapsed,
        Color32::TRANSPARENT,
        |ui| {
            ui.label("Templates");
        },
        |ui| {
            dropdown(
                ui,
                "template".to_string(),
                "Layout",
                &mut app.ui_settings.template,
                &StandardGrid::get_all(),
            );
            ui.end_row();
            apply_template = ui.button("Apply template").clicked();
            ui.end_row();
        },
        Some("Replace every wall with a starting layout"),
    );
    if apply_template {
        let result = app.apply_template(app.ui_settings.template);
        app.report(result);
    }
}
