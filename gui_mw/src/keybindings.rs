use crate::App;
use core_mw::grid::Direction;
use eframe::egui;
use eframe::egui::{Event, Key, Modifiers};

/// Key that toggles each wall of the selected cell
pub fn wall_key(dir: Direction) -> Key {
    match dir {
        Direction::North => Key::W,
        Direction::East => Key::D,
        Direction::South => Key::S,
        Direction::West => Key::A,
    }
}

impl App {
    pub fn update_keybindings(&mut self, ctx: &egui::Context) {
        // don't activate keybindings if some element (text box, button) is focused
        if ctx.memory(|m| m.focused().is_some()) || self.image.is_none() {
            return;
        }

        let presses: Vec<(Key, Modifiers)> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| match event {
                    Event::Key {
                        key,
                        pressed: true,
                        modifiers,
                        ..
                    } => Some((*key, *modifiers)),
                    _ => None,
                })
                .collect()
        });

        for (key, modifiers) in presses {
            if modifiers.command {
                if key == Key::S {
                    let result = if modifiers.shift {
                        self.save_as()
                    } else {
                        self.save()
                    };
                    self.report(result);
                }
                continue;
            }

            match key {
                Key::ArrowUp => self.editor.move_selection(Direction::North),
                Key::ArrowRight => self.editor.move_selection(Direction::East),
                Key::ArrowDown => self.editor.move_selection(Direction::South),
                Key::ArrowLeft => self.editor.move_selection(Direction::West),
                Key::Enter => self.editor.advance_selection(),
                _ => {
                    let wall = Direction::get_all()
                        .into_iter()
                        .find(|dir| wall_key(*dir) == key);
                    if let Some(dir) = wall {
                        let result = self.editor.toggle_selected(dir);
                        self.report(result);
                    }
                }
            }
        }
    }
}
