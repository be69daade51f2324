//! Palette sections of the sprite format.
//!
//! Every section with a single character name describes one color:
//!
//! ```text
//! [0]
//! red = 255
//! green = 0
//! blue = 255
//! ```
//!
//! Keys are handed out fresh on every save, in key space order starting at `0`.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::{Color, EngineError, Result};

use super::{IniDocument, IniSection};

/// Printable ASCII from `0` up to `~`.
const ASCII_KEYS: std::ops::RangeInclusive<char> = '0'..='~';

/// Printable Latin-1 from `¡` up to `ÿ`, the soft hyphen is left out.
const LATIN1_KEYS: std::ops::RangeInclusive<char> = '\u{A1}'..='\u{FF}';
const SOFT_HYPHEN: char = '\u{AD}';

/// Number of distinct colors a single sprite file can hold.
pub const PALETTE_KEY_CAPACITY: usize = 79 + 94;

/// Single character naming one color in a sprite file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaletteKey(char);

impl PaletteKey {
    pub fn new(ch: char) -> Self {
        PaletteKey(ch)
    }

    pub fn as_char(self) -> char {
        self.0
    }

    /// All keys in assignment order.
    pub fn key_space() -> impl Iterator<Item = PaletteKey> {
        ASCII_KEYS.chain(LATIN1_KEYS.filter(|ch| *ch != SOFT_HYPHEN)).map(PaletteKey)
    }

    /// `true` for characters the encoder may hand out.
    pub fn is_in_key_space(ch: char) -> bool {
        ASCII_KEYS.contains(&ch) || (LATIN1_KEYS.contains(&ch) && ch != SOFT_HYPHEN)
    }
}

impl std::fmt::Display for PaletteKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Mapping between palette keys and colors of one sprite file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SpritePalette {
    colors: BTreeMap<PaletteKey, Color>,
    keys: HashMap<Color, PaletteKey>,
}

impl SpritePalette {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: PaletteKey, color: Color) {
        self.colors.insert(key, color);
        self.keys.entry(color).or_insert(key);
    }

    pub fn color(&self, key: PaletteKey) -> Option<Color> {
        self.colors.get(&key).copied()
    }

    pub fn key(&self, color: Color) -> Option<PaletteKey> {
        self.keys.get(&color).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (PaletteKey, Color)> + '_ {
        self.colors.iter().map(|(k, c)| (*k, *c))
    }

    /// Reads every single character section of `doc`.
    ///
    /// Multi character sections are metadata and skipped. Keys outside the encoder key space
    /// are accepted, hand edited files may use any character.
    ///
    /// # Errors
    ///
    /// `EngineError::MalformedPaletteEntry` if a channel is missing, not an integer or
    /// outside of `0..=255`.
    pub fn decode(doc: &IniDocument) -> Result<Self> {
        let mut palette = SpritePalette::new();
        for section in doc.sections() {
            let mut chars = section.name().chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                continue;
            };
            let color = Color::new(
                read_channel(section, ch, "red")?,
                read_channel(section, ch, "green")?,
                read_channel(section, ch, "blue")?,
            );
            palette.insert(PaletteKey(ch), color);
        }
        Ok(palette)
    }

    /// Assigns a fresh key to every distinct color in `colors`, in iteration order.
    ///
    /// # Errors
    ///
    /// `EngineError::PaletteExhausted` if there are more distinct colors than keys.
    pub fn encode(colors: impl IntoIterator<Item = Color>) -> Result<Self> {
        let mut palette = SpritePalette::new();
        let mut seen = HashSet::new();
        let distinct: Vec<Color> = colors.into_iter().filter(|c| seen.insert(*c)).collect();
        if distinct.len() > PALETTE_KEY_CAPACITY {
            return Err(EngineError::PaletteExhausted {
                colors: distinct.len(),
                capacity: PALETTE_KEY_CAPACITY,
            });
        }
        for (key, color) in PaletteKey::key_space().zip(distinct) {
            log::debug!("Key: {color} -> {key}");
            palette.insert(key, color);
        }
        Ok(palette)
    }

    /// Appends one section per key to `doc`.
    pub fn write_sections(&self, doc: &mut IniDocument) -> Result<()> {
        for (key, color) in self.iter() {
            let section = doc.add_section(key.as_char().to_string())?;
            section.set("red", color.red().to_string());
            section.set("green", color.green().to_string());
            section.set("blue", color.blue().to_string());
        }
        Ok(())
    }
}

fn read_channel(section: &IniSection, key: char, channel: &str) -> Result<u8> {
    let Some(value) = section.get(channel) else {
        return Err(EngineError::malformed_palette_entry(key, format!("missing '{channel}'")));
    };
    let Ok(value) = value.trim().parse::<i64>() else {
        return Err(EngineError::malformed_palette_entry(key, format!("'{channel}' is not an integer: '{value}'")));
    };
    u8::try_from(value).map_err(|_| EngineError::malformed_palette_entry(key, format!("'{channel}' out of range 0-255: {value}")))
}

#[cfg(test)]
mod tests {
    use super::{PaletteKey, PALETTE_KEY_CAPACITY};

    #[test]
    fn test_key_space_size() {
        assert_eq!(PALETTE_KEY_CAPACITY, PaletteKey::key_space().count());
    }

    #[test]
    fn test_key_space_starts_above_slash() {
        let keys: String = PaletteKey::key_space().take(13).map(PaletteKey::as_char).collect();
        assert_eq!("0123456789:;<", keys);
    }

    #[test]
    fn test_key_space_is_printable() {
        for key in PaletteKey::key_space() {
            let ch = key.as_char();
            assert!(!ch.is_whitespace() && !ch.is_control(), "{:?}", ch);
            assert!(PaletteKey::is_in_key_space(ch));
        }
        assert!(!PaletteKey::is_in_key_space('/'));
        assert!(!PaletteKey::is_in_key_space('\u{AD}'));
        assert!(!PaletteKey::is_in_key_space('\u{7F}'));
    }
}
