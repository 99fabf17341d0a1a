//! Opening images and reading or writing their grid files

use crate::drawing::tab::Tab;
use crate::{App, LoadedImage, StatusLevel};
use anyhow::{Context, Error};
use core_mw::document::{sidecar_path, GridDocument};
use core_mw::grid::standard_grid::StandardGrid;
use core_mw::grid::CellPos;
use eframe::egui;
use eframe::egui::{ColorImage, TextureHandle, TextureOptions};
use log::{info, warn};
use native_dialog::FileDialog;
use std::path::{Path, PathBuf};

const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];
const DEFAULT_GRID_FILE: &str = "grid_config.json";

fn load_texture(ctx: &egui::Context, path: &Path) -> Result<(TextureHandle, [usize; 2]), Error> {
    let image = image::open(path)
        .with_context(|| format!("Failed to open image {}", path.display()))?
        .to_rgba8();
    let size = [image.width() as usize, image.height() as usize];
    let pixels = ColorImage::from_rgba_unmultiplied(size, image.as_flat_samples().as_slice());
    let texture = ctx.load_texture(path.display().to_string(), pixels, TextureOptions::LINEAR);
    Ok((texture, size))
}

impl App {
    /// Pick an image and load the grid stored next to it
    ///
    /// If there is no valid grid file for the image, the grid is resized to the size fields
    /// instead.
    pub fn open_image(&mut self, ctx: &egui::Context) -> Result<(), Error> {
        self.settings.validate_dimensions()?;
        let Some(path) = FileDialog::new()
            .set_title("Select an image")
            .add_filter("Images", &IMAGE_EXTENSIONS)
            .show_open_single_file()?
        else {
            return Ok(());
        };

        let (texture, size) = load_texture(ctx, &path)?;
        let (width, height) = (self.settings.grid_width, self.settings.grid_height);

        let sidecar = sidecar_path(&path);
        let loaded = sidecar.exists()
            && match GridDocument::read(&sidecar)
                .and_then(|doc| self.editor.load_document(&doc, width, height))
            {
                Ok(()) => {
                    info!("Loaded associated grid data from {}", sidecar.display());
                    true
                }
                Err(e) => {
                    warn!("Ignoring {}: {e:#}", sidecar.display());
                    false
                }
            };
        if !loaded {
            self.editor.resize(width, height)?;
        }

        info!("Opened image {} ({}x{})", path.display(), size[0], size[1]);
        self.set_status(
            StatusLevel::Info,
            if loaded {
                format!("Loaded {}", sidecar.display())
            } else {
                format!("New {width}x{height} grid")
            },
        );
        self.image = Some(LoadedImage {
            path,
            texture,
            size,
        });
        self.unsaved_changes = !loaded;
        self.editor.select(CellPos::new(0, 0));
        self.pending_tab = Some(Tab::Cell);
        Ok(())
    }

    /// Resize the grid to the size fields, keeping whatever fits
    pub fn apply_grid_size(&mut self) -> Result<(), Error> {
        self.settings.validate_dimensions()?;
        let (width, height) = (self.settings.grid_width, self.settings.grid_height);
        self.editor.resize(width, height)?;
        self.set_status(StatusLevel::Info, format!("Grid resized to {width}x{height}"));
        Ok(())
    }

    pub fn apply_template(&mut self, template: StandardGrid) -> Result<(), Error> {
        self.editor.apply_template(template)?;
        self.unsaved_changes = true;
        self.set_status(StatusLevel::Info, format!("Applied {} template", template.name()));
        Ok(())
    }

    /// Pick a grid file; it must match the size fields
    pub fn load_grid(&mut self) -> Result<(), Error> {
        let Some(path) = FileDialog::new()
            .set_title("Load grid configuration")
            .add_filter("JSON", &["json"])
            .show_open_single_file()?
        else {
            return Ok(());
        };

        let doc = GridDocument::read(&path)?;
        self.editor
            .load_document(&doc, self.settings.grid_width, self.settings.grid_height)
            .context("Error loading grid configuration")?;
        self.editor.select(CellPos::new(0, 0));
        self.unsaved_changes = true;
        self.set_status(StatusLevel::Info, format!("Loaded {}", path.display()));
        Ok(())
    }

    fn saved(&mut self, path: &Path) {
        self.unsaved_changes = false;
        self.set_status(StatusLevel::Info, format!("Saved {}", path.display()));
    }

    /// Write the grid next to the current image, or ask where to put it
    pub fn save(&mut self) -> Result<(), Error> {
        let Some(image) = &self.image else {
            return self.save_as();
        };
        let path = sidecar_path(&image.path);
        match self.editor.to_document().write(&path) {
            Ok(()) => {
                self.saved(&path);
                Ok(())
            }
            Err(e) => {
                warn!("{e:#}, falling back to save as");
                self.save_as()
            }
        }
    }

    pub fn save_as(&mut self) -> Result<(), Error> {
        let default: Option<PathBuf> = self.image.as_ref().map(|image| sidecar_path(&image.path));
        let file_name = default
            .as_ref()
            .and_then(|path| path.file_name())
            .and_then(|name| name.to_str())
            .unwrap_or(DEFAULT_GRID_FILE)
            .to_string();

        let mut dialog = FileDialog::new()
            .set_title("Save grid configuration")
            .add_filter("JSON", &["json"])
            .set_filename(&file_name);
        if let Some(dir) = default.as_ref().and_then(|path| path.parent()) {
            dialog = dialog.set_location(dir);
        }
        let Some(path) = dialog.show_save_single_file()? else {
            return Ok(());
        };

        self.editor
            .to_document()
            .write(&path)
            .context("Error saving grid configuration")?;
        self.saved(&path);
        Ok(())
    }
}
