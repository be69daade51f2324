//! 1:N scaled preview of the canvas
//!
//! Keeps its own copy of the pixels and only repaints the cells it was told about.
//! `Color::TRANSPARENT` cells are shown in `Color::MINI_VIEW_BACKDROP` so the transparent
//! regions stay visible.

use std::{cell::RefCell, rc::Rc};

use bitmappy_engine::{CellLayout, Color, PixelGrid, Position, Rectangle, RenderSurface, Size};

use super::{CanvasModel, PixelObserver};
use crate::Result;

/// Screen pixels per canvas pixel.
pub const MINI_VIEW_SCALE: i32 = 2;

pub struct MiniatureView {
    grid: PixelGrid,
    dirty: Vec<bool>,
    layout: CellLayout,
}

impl MiniatureView {
    /// Mirrors `grid`, every cell starts dirty.
    pub fn new(grid: PixelGrid, layout: CellLayout) -> Self {
        let dirty = vec![true; grid.len()];
        Self { grid, dirty, layout }
    }

    pub fn scaled(grid: PixelGrid, origin: Position, scale: i32) -> Self {
        Self::new(grid, CellLayout::new(origin, Size::new(scale, scale)))
    }

    /// Creates a view of `canvas` and registers it as observer.
    pub fn attach(canvas: &mut CanvasModel, layout: CellLayout) -> Rc<RefCell<Self>> {
        let view = Rc::new(RefCell::new(Self::new(canvas.grid().clone(), layout)));
        canvas.add_observer(view.clone());
        view
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn layout(&self) -> &CellLayout {
        &self.layout
    }

    /// Moves or rescales the view. Everything is repainted on the next refresh.
    pub fn set_layout(&mut self, layout: CellLayout) {
        self.layout = layout;
        self.mark_all_dirty();
    }

    pub fn mark_all_dirty(&mut self) {
        self.dirty.fill(true);
    }

    pub fn bounds(&self) -> Rectangle {
        self.layout.bounds(self.grid.size())
    }

    pub fn is_dirty(&self, index: usize) -> bool {
        self.dirty.get(index).copied().unwrap_or(false)
    }

    pub fn dirty_count(&self) -> usize {
        self.dirty.iter().filter(|d| **d).count()
    }

    pub fn display_color(color: Color) -> Color {
        if color.is_transparent() {
            Color::MINI_VIEW_BACKDROP
        } else {
            color
        }
    }

    /// Repaints the dirty cells, returns how many were painted.
    pub fn refresh(&mut self, surface: &mut dyn RenderSurface) -> usize {
        let mut count = 0;
        for (index, dirty) in self.dirty.iter_mut().enumerate() {
            if !*dirty {
                continue;
            }
            if let Some(color) = self.grid.get(index) {
                self.layout.paint_cell(surface, &self.grid, index, Self::display_color(color));
            }
            *dirty = false;
            count += 1;
        }
        count
    }
}

impl PixelObserver for MiniatureView {
    fn on_pixel_changed(&mut self, index: usize, color: Color) -> Result<()> {
        self.grid.set(index, color)?;
        self.dirty[index] = true;
        Ok(())
    }

    fn on_canvas_resized(&mut self, size: Size) -> Result<()> {
        self.grid = PixelGrid::blank(size)?;
        self.dirty = vec![true; self.grid.len()];
        Ok(())
    }
}
