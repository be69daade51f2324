//! Rendering collaborators.
//!
//! The canvas and its previews only issue `fill_rect` and `blit` calls; how they end up on
//! screen is up to the `RenderSurface` implementation. `ImageSurface` renders into an
//! in-memory RGB image that can be written as PNG.

use std::path::Path;

use image::RgbImage;

use crate::{Color, EngineError, PixelGrid, Position, Rectangle, Result, Size};

pub trait RenderSurface {
    fn size(&self) -> Size;

    /// Fills `rect`, clipped to the surface.
    fn fill_rect(&mut self, rect: Rectangle, color: Color);

    /// Copies `image` 1:1 with its top left corner at `position`, clipped to the surface.
    fn blit(&mut self, image: &PixelGrid, position: Position);
}

#[derive(Debug)]
pub struct ImageSurface {
    image: RgbImage,
}

impl ImageSurface {
    pub fn new(size: impl Into<Size>, background: Color) -> Result<Self> {
        let size = size.into();
        if size.width <= 0 || size.height <= 0 {
            return Err(EngineError::InvalidDimensions {
                width: size.width,
                height: size.height,
            });
        }
        Ok(Self {
            image: RgbImage::from_pixel(size.width as u32, size.height as u32, background.into()),
        })
    }

    pub fn pixel(&self, pos: impl Into<Position>) -> Option<Color> {
        let pos = pos.into();
        if pos.x < 0 || pos.y < 0 {
            return None;
        }
        self.image.get_pixel_checked(pos.x as u32, pos.y as u32).map(|p| Color::from(*p))
    }

    pub fn image(&self) -> &RgbImage {
        &self.image
    }

    pub fn into_image(self) -> RgbImage {
        self.image
    }

    pub fn save_png(&self, path: &Path) -> Result<()> {
        self.image.save_with_format(path, image::ImageFormat::Png)?;
        log::info!("Wrote {}x{} image to {}", self.image.width(), self.image.height(), path.display());
        Ok(())
    }

    fn bounds(&self) -> Rectangle {
        Rectangle::new(Position::default(), self.size())
    }
}

impl RenderSurface for ImageSurface {
    fn size(&self) -> Size {
        Size::new(self.image.width() as i32, self.image.height() as i32)
    }

    fn fill_rect(&mut self, rect: Rectangle, color: Color) {
        let clipped = rect.intersect(&self.bounds());
        if clipped.is_empty() {
            return;
        }
        let rgb = image::Rgb::from(color);
        for y in clipped.top()..clipped.bottom() {
            for x in clipped.left()..clipped.right() {
                self.image.put_pixel(x as u32, y as u32, rgb);
            }
        }
    }

    fn blit(&mut self, image: &PixelGrid, position: Position) {
        let bounds = self.bounds();
        for (i, color) in image.pixels().iter().enumerate() {
            let pos = position + image.position_of(i);
            if bounds.is_inside(pos) {
                self.image.put_pixel(pos.x as u32, pos.y as u32, (*color).into());
            }
        }
    }
}

/// Places the cells of a grid on screen.
///
/// Cell `(x, y)` covers `cell_size` pixels starting at
/// `origin + (x * cell_size.width, y * cell_size.height)`. With a `border` the outermost
/// `border` pixels of each cell are drawn in `border_color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLayout {
    pub origin: Position,
    pub cell_size: Size,
    pub border: i32,
    pub border_color: Color,
}

impl Default for CellLayout {
    fn default() -> Self {
        Self::new(Position::default(), Size::new(1, 1))
    }
}

impl CellLayout {
    pub fn new(origin: Position, cell_size: Size) -> Self {
        Self {
            origin,
            cell_size,
            border: 0,
            border_color: Color::GRID,
        }
    }

    pub fn with_border(mut self, border: i32) -> Self {
        self.border = border;
        self
    }

    /// Screen area covered by a grid of `grid_size` cells.
    pub fn bounds(&self, grid_size: Size) -> Rectangle {
        Rectangle::new(
            self.origin,
            Size::new(grid_size.width * self.cell_size.width, grid_size.height * self.cell_size.height),
        )
    }

    pub fn cell_rect(&self, grid: &PixelGrid, index: usize) -> Rectangle {
        let pos = grid.position_of(index);
        Rectangle::from(
            self.origin.x + pos.x * self.cell_size.width,
            self.origin.y + pos.y * self.cell_size.height,
            self.cell_size.width,
            self.cell_size.height,
        )
    }

    /// Cell index under the screen position `pos`.
    pub fn index_at(&self, grid: &PixelGrid, pos: Position) -> Option<usize> {
        if self.cell_size.width <= 0 || self.cell_size.height <= 0 || !self.bounds(grid.size()).is_inside(pos) {
            return None;
        }
        let local = pos - self.origin;
        grid.index_of((local.x / self.cell_size.width, local.y / self.cell_size.height))
    }

    pub fn paint_cell(&self, surface: &mut dyn RenderSurface, grid: &PixelGrid, index: usize, color: Color) {
        let rect = self.cell_rect(grid, index);
        surface.fill_rect(rect, color);
        if self.border <= 0 {
            return;
        }
        let b = self.border;
        let Rectangle { start, size } = rect;
        surface.fill_rect(Rectangle::from(start.x, start.y, size.width, b), self.border_color);
        surface.fill_rect(Rectangle::from(start.x, start.y + size.height - b, size.width, b), self.border_color);
        surface.fill_rect(Rectangle::from(start.x, start.y, b, size.height), self.border_color);
        surface.fill_rect(Rectangle::from(start.x + size.width - b, start.y, b, size.height), self.border_color);
    }
}
