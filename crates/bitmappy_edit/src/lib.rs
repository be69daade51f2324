#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_lossless,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::module_name_repetitions
)]
//! Editing state of the bitmappy sprite editor: the canvas with its change notifications,
//! the mini view and the widgets that turn input events into edits.

mod canvas;
pub use canvas::*;

pub mod editor;
pub use editor::{BitmapEditor, EditorKey, EditorLayout, InputEvent};

pub use bitmappy_engine::{
    CellLayout, Color, EngineError, ImageSurface, PixelGrid, Position, Rectangle, RenderSurface, Result, Size, SpriteDocument,
};
