use crate::colors::*;
use crate::transform::Transform;
use crate::App;
use core_mw::grid::{CellPos, Direction};
use core_mw::hit_test::{Bounds, GridPlacement};
use eframe::egui::{
    Align2, Color32, FontId, Painter, Pos2, Rect, Response, Rounding, Sense, Stroke, Ui, Vec2,
};

fn to_rect(bounds: Bounds) -> Rect {
    Rect::from_min_size(
        Pos2::new(bounds.left, bounds.top),
        Vec2::new(bounds.width, bounds.height),
    )
}

/// The two screen points of one side of a cell
fn side(rect: Rect, dir: Direction) -> [Pos2; 2] {
    match dir {
        Direction::North => [rect.left_top(), rect.right_top()],
        Direction::East => [rect.right_top(), rect.right_bottom()],
        Direction::South => [rect.left_bottom(), rect.right_bottom()],
        Direction::West => [rect.left_top(), rect.left_bottom()],
    }
}

pub fn draw_canvas(app: &mut App, ui: &mut Ui) {
    let rect = ui.max_rect();
    let response = ui.allocate_rect(rect, Sense::click_and_drag());
    let painter = ui.painter_at(rect);

    let Some(image) = &app.image else {
        painter.text(
            rect.center(),
            Align2::CENTER_CENTER,
            "Open an image to start annotating",
            FontId::proportional(16.0),
            ui.visuals().weak_text_color(),
        );
        return;
    };

    let image_rect = Transform::fit_image(image.size, rect);
    if app.settings.show_image {
        painter.image(
            image.texture.id(),
            image_rect,
            Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
            Color32::WHITE,
        );
    }

    let grid = app.editor.grid();
    let placement = GridPlacement::centered(
        Bounds::new(
            image_rect.left(),
            image_rect.top(),
            image_rect.width(),
            image_rect.height(),
        ),
        grid.width(),
        grid.height(),
    );

    handle_pointer(app, ui, &response, &placement);
    if app.settings.show_grid {
        paint_grid(app, &painter, &placement, response.hover_pos());
    }
}

fn handle_pointer(app: &mut App, ui: &Ui, response: &Response, placement: &GridPlacement) {
    let wall_at = |pos: Option<Pos2>| pos.and_then(|p| placement.wall_at(p.x, p.y));

    if !app.draw_mode {
        if response.clicked() {
            let pos = response.interact_pointer_pos();
            if let Some(cell) = pos.and_then(|p| placement.cell_at(p.x, p.y)) {
                app.editor.select(cell);
            }
        }
        return;
    }

    if response.drag_started() {
        let origin = ui.input(|i| i.pointer.press_origin());
        if let Some(target) = wall_at(origin) {
            let result = app.editor.begin_stroke(target);
            app.report(result);
        }
    }
    if response.dragged() {
        if let Some(target) = wall_at(response.interact_pointer_pos()) {
            let result = if app.editor.is_stroking() {
                app.editor.continue_stroke(target).map(|_| ())
            } else {
                app.editor.begin_stroke(target)
            };
            app.report(result);
        }
    }
    if response.drag_stopped() {
        app.editor.end_stroke();
    }
    if response.clicked() {
        if let Some(target) = wall_at(response.interact_pointer_pos()) {
            let result = app.editor.click_wall(target);
            app.report(result);
        }
    }
}

fn paint_grid(app: &App, painter: &Painter, placement: &GridPlacement, hover: Option<Pos2>) {
    let grid = app.editor.grid();
    let bounds = to_rect(placement.bounds());
    let line = Stroke::new(1.0, GRID_LINE_COLOR);

    for x in 0..=grid.width() {
        let px = bounds.left() + x as f32 * placement.cell_width();
        painter.line_segment(
            [Pos2::new(px, bounds.top()), Pos2::new(px, bounds.bottom())],
            line,
        );
    }
    for y in 0..=grid.height() {
        let py = bounds.top() + y as f32 * placement.cell_height();
        painter.line_segment(
            [Pos2::new(bounds.left(), py), Pos2::new(bounds.right(), py)],
            line,
        );
    }

    if let Some(cell) = grid.selected() {
        painter.rect_filled(
            to_rect(placement.cell_rect(cell)),
            Rounding::ZERO,
            SELECTED_CELL_COLOR,
        );
    }

    let wall_width = (placement.cell_width().min(placement.cell_height()) * 0.1).clamp(1.0, 4.0);
    for (y, row) in grid.rows().iter().enumerate() {
        for (x, walls) in row.iter().enumerate() {
            let rect = to_rect(placement.cell_rect(CellPos::new(x, y)));
            for dir in Direction::get_all() {
                if walls.has(dir) {
                    painter.line_segment(side(rect, dir), Stroke::new(wall_width, WALL_COLOR));
                }
            }
        }
    }

    // only possible after loading a hand-edited file
    for (cell, dir) in grid.inconsistencies() {
        painter.line_segment(
            side(to_rect(placement.cell_rect(cell)), dir),
            Stroke::new(wall_width, INCONSISTENT_WALL_COLOR),
        );
    }

    if app.draw_mode {
        if let Some(target) = hover.and_then(|p| placement.wall_at(p.x, p.y)) {
            painter.line_segment(
                side(to_rect(placement.cell_rect(target.cell)), target.wall),
                Stroke::new(wall_width * 2.0, HOVER_WALL_COLOR),
            );
        }
    }
}

pub fn draw_mode_help(app: &mut App, ui: &mut Ui) {
    ui.label("Click near the middle of a cell side to toggle that wall.");
    ui.label("Drag across walls to add them; dragging never removes a wall.");
    ui.label("Corners are ignored.");
    ui.separator();
    if app.image.is_none() {
        ui.label("Open an image first.");
    } else if app.editor.is_stroking() {
        ui.label(format!("{} Drawing", egui_phosphor::regular::PENCIL_SIMPLE));
    }
}
