//! Sprite files.
//!
//! ```text
//! [sprite]
//! name = Tile
//! pixels = 0110
//!  1001
//!
//! [0]
//! red = 0
//! green = 0
//! blue = 0
//!
//! [1]
//! red = 255
//! green = 255
//! blue = 255
//! ```
//!
//! Every character of `pixels` is the key of a palette section. The first nonempty row
//! defines the width, every following row has to match it.
//!
//! Option values are stripped when read, so whitespace around `name` does not survive a
//! save and load.

use std::{fmt::Write as _, fs, path::Path};

use crate::{EngineError, PixelGrid, Result};

use super::{IniDocument, PaletteKey, SpritePalette};

pub const SPRITE_SECTION: &str = "sprite";
pub const NAME_OPTION: &str = "name";
pub const PIXELS_OPTION: &str = "pixels";

/// Default name for sprites that never got one.
pub const UNTITLED: &str = "Untitled";

/// A named pixel grid, the in-memory form of a sprite file.
///
/// A decoded document remembers the palette keys of its file. They are only used by
/// `describe`, equality looks at name and pixels.
#[derive(Debug, Clone)]
pub struct SpriteDocument {
    pub name: String,
    pub grid: PixelGrid,
    file_palette: Option<SpritePalette>,
}

impl PartialEq for SpriteDocument {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.grid == other.grid
    }
}

impl Eq for SpriteDocument {}

impl SpriteDocument {
    pub fn new(name: impl Into<String>, grid: PixelGrid) -> Self {
        Self {
            name: name.into(),
            grid,
            file_palette: None,
        }
    }

    /// Palette read from the file, `None` for documents built in memory.
    pub fn file_palette(&self) -> Option<&SpritePalette> {
        self.file_palette.as_ref()
    }

    /// Parses a sprite file.
    ///
    /// Nothing is returned unless the whole document is valid.
    ///
    /// # Errors
    ///
    /// - `MissingSection` / `MissingOption` if `[sprite]`, `name` or `pixels` is absent
    /// - `MalformedPaletteEntry` for broken color sections
    /// - `EmptyPixels` if `pixels` has no nonempty row
    /// - `RaggedRow` if a row differs in length from the first nonempty row
    /// - `UnknownPaletteKey` for pixel characters without a color section
    /// - the `IniDocument::parse` errors
    pub fn decode(text: &str) -> Result<Self> {
        let doc = IniDocument::parse(text)?;

        let Some(sprite) = doc.section(SPRITE_SECTION) else {
            return Err(EngineError::missing_section(SPRITE_SECTION));
        };
        let Some(name) = sprite.get(NAME_OPTION) else {
            return Err(EngineError::missing_option(SPRITE_SECTION, NAME_OPTION));
        };
        let Some(pixels) = sprite.get(PIXELS_OPTION) else {
            return Err(EngineError::missing_option(SPRITE_SECTION, PIXELS_OPTION));
        };

        let palette = SpritePalette::decode(&doc)?;

        // "pixels =" followed by the rows on the next lines leaves empty rows in front.
        let rows: Vec<&str> = pixels.split('\n').skip_while(|row| row.is_empty()).collect();
        let Some(first) = rows.first() else {
            return Err(EngineError::EmptyPixels);
        };
        let width = first.chars().count();
        let height = rows.len();

        let mut colors = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            let row_len = row.chars().count();
            if row_len != width {
                return Err(EngineError::RaggedRow {
                    row: y,
                    expected: width,
                    actual: row_len,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                let Some(color) = palette.color(PaletteKey::new(ch)) else {
                    return Err(EngineError::UnknownPaletteKey { key: ch, row: y, column: x });
                };
                colors.push(color);
            }
        }

        let grid = PixelGrid::from_pixels(width, height, colors)?;
        let used = grid.distinct_colors().len();
        if used < palette.len() {
            log::warn!("Sprite '{name}' defines {} palette entries, {used} colors in use", palette.len());
        }
        Ok(Self {
            name: name.to_string(),
            grid,
            file_palette: Some(palette),
        })
    }

    /// Serializes to the sprite file format. Palette keys are assigned from scratch.
    ///
    /// # Errors
    ///
    /// `EngineError::PaletteExhausted` if the grid has more distinct colors than keys.
    pub fn encode(&self) -> Result<String> {
        encode_sprite(&self.grid, &self.name)
    }

    /// Reads and decodes `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|e| EngineError::read_file(path, e))?;
        let doc = Self::decode(&text)?;
        log::info!("Loaded sprite '{}' ({}) from {}", doc.name, doc.grid.size(), path.display());
        Ok(doc)
    }

    /// Encodes and writes to `path`. The file is left alone if encoding fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = self.encode()?;
        fs::write(path, text).map_err(|e| EngineError::write_file(path, e))?;
        log::info!("Saved sprite '{}' ({}) to {}", self.name, self.grid.size(), path.display());
        Ok(())
    }

    /// Human readable dump: name, size, color keys and the key rows.
    ///
    /// Decoded documents are shown with the keys of their file as long as those cover every
    /// color. Other documents get keys assigned the way `encode` would.
    ///
    /// # Errors
    ///
    /// `EngineError::PaletteExhausted` for an in-memory document with more distinct colors
    /// than keys.
    pub fn describe(&self) -> Result<String> {
        let distinct = self.grid.distinct_colors();
        let file_palette = self.file_palette.as_ref().filter(|p| distinct.iter().all(|c| p.key(*c).is_some()));
        let encoded;
        let palette = if let Some(palette) = file_palette {
            palette
        } else {
            encoded = SpritePalette::encode(distinct)?;
            &encoded
        };
        let mut result = String::new();
        let _ = writeln!(result, "Name: {}", self.name);
        let _ = writeln!(result, "Dimensions: {}", self.grid.size());
        let _ = writeln!(result, "Color Key:");
        for (key, color) in palette.iter() {
            let _ = writeln!(result, "  {key} {} {color}", color.to_hex());
        }
        for row in self.grid.rows() {
            for color in row {
                if let Some(key) = palette.key(*color) {
                    result.push(key.as_char());
                }
            }
            result.push('\n');
        }
        Ok(result)
    }
}

/// Decodes sprite file text into its grid and name.
pub fn decode_sprite(text: &str) -> Result<(PixelGrid, String)> {
    let SpriteDocument { name, grid, .. } = SpriteDocument::decode(text)?;
    Ok((grid, name))
}

/// Encodes `grid` under `name` as sprite file text.
pub fn encode_sprite(grid: &PixelGrid, name: &str) -> Result<String> {
    let palette = SpritePalette::encode(grid.distinct_colors())?;

    let mut pixels = Vec::with_capacity(grid.height());
    for row in grid.rows() {
        let mut line = String::with_capacity(row.len());
        for color in row {
            let Some(key) = palette.key(*color) else {
                unreachable!("palette built from the grid lacks {color}");
            };
            line.push(key.as_char());
        }
        log::debug!("Row: {line}");
        pixels.push(line);
    }

    let mut doc = IniDocument::new();
    let sprite = doc.add_section(SPRITE_SECTION)?;
    sprite.set(NAME_OPTION, name);
    sprite.set(PIXELS_OPTION, pixels.join("\n"));
    palette.write_sections(&mut doc)?;
    Ok(doc.to_string())
}
