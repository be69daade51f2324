use std::collections::HashSet;

use crate::{Color, EngineError, Position, Result, Size};

/// Rectangular, row major grid of colors.
///
/// Width and height are always positive and `pixels.len() == width * height`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    width: usize,
    height: usize,
    pixels: Vec<Color>,
}

impl PixelGrid {
    /// Allocates a grid filled with `fill`.
    ///
    /// # Errors
    ///
    /// `EngineError::InvalidDimensions` if either dimension is not positive.
    pub fn new(size: impl Into<Size>, fill: Color) -> Result<Self> {
        let size = size.into();
        if size.width <= 0 || size.height <= 0 {
            return Err(EngineError::InvalidDimensions {
                width: size.width,
                height: size.height,
            });
        }
        let width = size.width as usize;
        let height = size.height as usize;
        Ok(Self {
            width,
            height,
            pixels: vec![fill; width * height],
        })
    }

    /// Blank grid filled with the transparent sentinel.
    pub fn blank(size: impl Into<Size>) -> Result<Self> {
        Self::new(size, Color::TRANSPARENT)
    }

    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(EngineError::InvalidDimensions {
                width: width as i32,
                height: height as i32,
            });
        }
        if pixels.len() != width * height {
            return Err(EngineError::PixelDataLength {
                expected: width * height,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// Builds a grid from rows of equal length.
    pub fn from_rows(rows: Vec<Vec<Color>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let mut pixels = Vec::with_capacity(width * height);
        for (y, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(EngineError::RaggedRow {
                    row: y,
                    expected: width,
                    actual: row.len(),
                });
            }
            pixels.extend(row);
        }
        Self::from_pixels(width, height, pixels)
    }

    /// Interprets `data` as packed RGB triplets.
    pub fn from_rgb_bytes(width: usize, height: usize, data: &[u8]) -> Result<Self> {
        if data.len() != width * height * 3 {
            return Err(EngineError::PixelDataLength {
                expected: width * height * 3,
                actual: data.len(),
            });
        }
        let pixels = data.chunks_exact(3).map(|rgb| Color::new(rgb[0], rgb[1], rgb[2])).collect();
        Self::from_pixels(width, height, pixels)
    }

    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut result = Vec::with_capacity(self.pixels.len() * 3);
        for c in &self.pixels {
            result.extend_from_slice(&[c.r, c.g, c.b]);
        }
        result
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn size(&self) -> Size {
        Size::from((self.width, self.height))
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Color] {
        &self.pixels
    }

    pub fn get(&self, index: usize) -> Option<Color> {
        self.pixels.get(index).copied()
    }

    pub fn get_at(&self, pos: impl Into<Position>) -> Option<Color> {
        self.index_of(pos).and_then(|i| self.get(i))
    }

    /// Replaces the cell at `index` and returns the previous color.
    ///
    /// # Errors
    ///
    /// `EngineError::IndexOutOfRange` if `index >= len()`.
    pub fn set(&mut self, index: usize, color: Color) -> Result<Color> {
        let len = self.pixels.len();
        let Some(cell) = self.pixels.get_mut(index) else {
            return Err(EngineError::index_out_of_range(index as i64, len));
        };
        Ok(std::mem::replace(cell, color))
    }

    pub fn fill(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// Row major index of `pos`, `None` outside the grid.
    pub fn index_of(&self, pos: impl Into<Position>) -> Option<usize> {
        let pos = pos.into();
        if pos.x < 0 || pos.y < 0 || pos.x as usize >= self.width || pos.y as usize >= self.height {
            return None;
        }
        Some(pos.y as usize * self.width + pos.x as usize)
    }

    pub fn position_of(&self, index: usize) -> Position {
        Position::new((index % self.width) as i32, (index / self.width) as i32)
    }

    pub fn rows(&self) -> std::slice::ChunksExact<'_, Color> {
        self.pixels.chunks_exact(self.width)
    }

    /// Distinct colors in order of first appearance.
    pub fn distinct_colors(&self) -> Vec<Color> {
        let mut seen = HashSet::new();
        self.pixels.iter().copied().filter(|c| seen.insert(*c)).collect()
    }
}
