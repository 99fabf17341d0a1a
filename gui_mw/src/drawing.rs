pub mod canvas;
pub mod cell;
pub mod export;
pub mod settings;
pub mod tab;
