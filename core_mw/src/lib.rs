//! Wall model, hit testing, export and persistence for maze wall annotation
//!
//! The gui (gui_mw) owns a single [`editor::GridEditor`] and routes every pointer and keyboard
//! edit through it

pub mod document;
pub mod editor;
pub mod export;
pub mod grid;
pub mod hit_test;
pub mod settings;
