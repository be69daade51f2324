mod ini;
pub use ini::*;

mod palette_codec;
pub use palette_codec::*;

mod sprite_format;
pub use sprite_format::*;
