use eframe::egui::Color32;

pub const WALL_COLOR: Color32 = Color32::from_rgb(255, 64, 64);
pub const GRID_LINE_COLOR: Color32 = Color32::from_rgba_premultiplied(120, 120, 120, 120);
pub const INCONSISTENT_WALL_COLOR: Color32 = Color32::YELLOW;

pub const SELECTED_CELL_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 60, 120, 90);
pub const HOVER_WALL_COLOR: Color32 = Color32::from_rgba_premultiplied(0, 160, 0, 160);

pub const STATUS_OK_COLOR: Color32 = Color32::LIGHT_GREEN;
pub const STATUS_WARN_COLOR: Color32 = Color32::YELLOW;
pub const STATUS_ERROR_COLOR: Color32 = Color32::LIGHT_RED;

pub const WALL_PRESENT_BUTTON_COLOR: Color32 = Color32::from_rgb(120, 40, 40);
