#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_lossless,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::return_self_not_must_use
)]
//! Pixel grids, colors and the sprite file format of the bitmappy tools.

mod error;
pub use error::*;

mod color;
pub use color::*;

mod position;
pub use position::*;

mod pixel_grid;
pub use pixel_grid::*;

pub mod formats;
pub use formats::{PALETTE_KEY_CAPACITY, PaletteKey, SpriteDocument, SpritePalette, decode_sprite, encode_sprite};

pub mod render;
pub use render::{CellLayout, ImageSurface, RenderSurface};
