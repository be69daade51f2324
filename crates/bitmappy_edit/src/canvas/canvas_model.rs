//! Canvas Model
//!
//! The editable pixel grid. Every cell carries a dirty flag that is set when the cell
//! changes and cleared when it is drawn. Changes are pushed to the registered
//! `PixelObserver`s (the mini view among them) while the mutation is still in progress,
//! so every derived view sees the same sequence of changes as the canvas.
//!
//! Loading is all or nothing: the file is decoded completely before the canvas is touched.

use std::path::{Path, PathBuf};

use bitmappy_engine::{formats::UNTITLED, CellLayout, Color, EngineError, PixelGrid, RenderSurface, Size, SpriteDocument};

use super::{ObserverId, SharedObserver};
use crate::Result;

/// Paint color of a fresh canvas.
pub const DEFAULT_ACTIVE_COLOR: Color = Color::WHITE;

pub struct CanvasModel {
    // ═══════════════════════════════════════════════════════════════════════
    // Document
    // ═══════════════════════════════════════════════════════════════════════
    name: String,
    grid: PixelGrid,

    /// Parallel to `grid`, set when a cell changed since it was last drawn
    dirty: Vec<bool>,

    /// File the canvas was loaded from or saved to
    file_path: Option<PathBuf>,

    /// Set by every accepted edit, cleared by load and save
    is_modified: bool,

    // ═══════════════════════════════════════════════════════════════════════
    // Editing
    // ═══════════════════════════════════════════════════════════════════════
    active_color: Color,

    observers: Vec<(ObserverId, SharedObserver)>,
    next_observer_id: usize,
}

impl CanvasModel {
    // ═══════════════════════════════════════════════════════════════════════
    // Constructors
    // ═══════════════════════════════════════════════════════════════════════

    /// Blank canvas filled with `Color::TRANSPARENT`, every cell dirty.
    pub fn new(size: impl Into<Size>) -> Result<Self> {
        Ok(Self::from_grid(UNTITLED, PixelGrid::blank(size)?))
    }

    pub fn from_grid(name: impl Into<String>, grid: PixelGrid) -> Self {
        let dirty = vec![true; grid.len()];
        Self {
            name: name.into(),
            grid,
            dirty,
            file_path: None,
            is_modified: false,
            active_color: DEFAULT_ACTIVE_COLOR,
            observers: Vec::new(),
            next_observer_id: 0,
        }
    }

    pub fn from_document(doc: SpriteDocument) -> Self {
        Self::from_grid(doc.name, doc.grid)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let mut canvas = Self::from_document(SpriteDocument::load(path)?);
        canvas.file_path = Some(path.to_path_buf());
        Ok(canvas)
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Getters
    // ═══════════════════════════════════════════════════════════════════════

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.is_modified = true;
    }

    pub fn grid(&self) -> &PixelGrid {
        &self.grid
    }

    pub fn size(&self) -> Size {
        self.grid.size()
    }

    pub fn len(&self) -> usize {
        self.grid.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grid.is_empty()
    }

    pub fn pixel(&self, index: usize) -> Option<Color> {
        self.grid.get(index)
    }

    pub fn active_color(&self) -> Color {
        self.active_color
    }

    /// Color used by `paint`. Existing pixels are not affected.
    pub fn set_active_color(&mut self, color: Color) {
        self.active_color = color;
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    pub fn is_dirty(&self, index: usize) -> bool {
        self.dirty.get(index).copied().unwrap_or(false)
    }

    pub fn dirty_count(&self) -> usize {
        self.dirty.iter().filter(|d| **d).count()
    }

    pub fn dirty_indices(&self) -> impl Iterator<Item = usize> + '_ {
        self.dirty.iter().enumerate().filter(|(_, d)| **d).map(|(i, _)| i)
    }

    /// Forces the next `render_dirty` to draw every cell.
    pub fn mark_all_dirty(&mut self) {
        self.dirty.fill(true);
    }

    pub fn to_document(&self) -> SpriteDocument {
        SpriteDocument::new(self.name.clone(), self.grid.clone())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Observers
    // ═══════════════════════════════════════════════════════════════════════

    pub fn add_observer(&mut self, observer: SharedObserver) -> ObserverId {
        let id = ObserverId(self.next_observer_id);
        self.next_observer_id += 1;
        self.observers.push((id, observer));
        id
    }

    /// Returns `false` if `id` was not registered.
    pub fn remove_observer(&mut self, id: ObserverId) -> bool {
        let len = self.observers.len();
        self.observers.retain(|(i, _)| *i != id);
        len != self.observers.len()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    /// Every observer is called even if an earlier one fails. The first error is returned.
    fn notify(&self, index: usize, color: Color) -> Result<()> {
        let mut result = Ok(());
        for (_, observer) in &self.observers {
            if let Err(err) = observer.borrow_mut().on_pixel_changed(index, color) {
                log::error!("Observer failed on pixel {index}: {err}");
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }
        result
    }

    fn notify_resized(&self, size: Size) -> Result<()> {
        let mut result = Ok(());
        for (_, observer) in &self.observers {
            if let Err(err) = observer.borrow_mut().on_canvas_resized(size) {
                log::error!("Observer failed on resize to {size}: {err}");
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }
        result
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Pixel Editing
    // ═══════════════════════════════════════════════════════════════════════

    /// Sets the cell at `index` and notifies the observers.
    ///
    /// Returns `false` without marking or notifying anything if the cell already has
    /// `color`.
    ///
    /// # Errors
    ///
    /// `EngineError::IndexOutOfRange` if `index` is not in `0..len()`, the grid is left
    /// unchanged.
    ///
    /// If an observer fails its error is returned after all observers were called. The
    /// cell has already changed at that point and stays changed.
    pub fn set_pixel(&mut self, index: i32, color: Color) -> Result<bool> {
        let len = self.grid.len();
        if index < 0 || index as usize >= len {
            return Err(EngineError::index_out_of_range(index as i64, len));
        }
        let index = index as usize;
        if self.grid.get(index) == Some(color) {
            return Ok(false);
        }
        self.grid.set(index, color)?;
        self.dirty[index] = true;
        self.is_modified = true;
        self.notify(index, color)?;
        Ok(true)
    }

    /// `set_pixel` with the active color.
    pub fn paint(&mut self, index: i32) -> Result<bool> {
        self.set_pixel(index, self.active_color)
    }

    /// Fills every cell with `fill`. All cells become dirty and every observer gets one
    /// notification per cell, changed or not.
    ///
    /// An observer error does not stop the burst. The canvas is filled regardless and the
    /// first error is returned at the end.
    pub fn reset_all(&mut self, fill: Color) -> Result<()> {
        self.grid.fill(fill);
        self.dirty.fill(true);
        self.is_modified = true;
        let mut result = Ok(());
        for index in 0..self.grid.len() {
            if let Err(err) = self.notify(index, fill) {
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }
        result
    }

    // ═══════════════════════════════════════════════════════════════════════
    // File Operations
    // ═══════════════════════════════════════════════════════════════════════

    /// Replaces name and pixels with `doc`.
    ///
    /// Observers see `on_canvas_resized` first if the dimensions differ, then one
    /// notification per cell. Observer errors are handled as in `reset_all`.
    pub fn load_document(&mut self, doc: SpriteDocument) -> Result<()> {
        let resized = doc.grid.size() != self.grid.size();
        self.name = doc.name;
        self.grid = doc.grid;
        self.dirty = vec![true; self.grid.len()];
        self.is_modified = false;

        let mut result = Ok(());
        if resized {
            log::info!("Canvas resized to {}", self.grid.size());
            result = self.notify_resized(self.grid.size());
        }
        for (index, color) in self.grid.pixels().iter().enumerate() {
            if let Err(err) = self.notify(index, *color) {
                if result.is_ok() {
                    result = Err(err);
                }
            }
        }
        result
    }

    /// Loads `path`. On error the canvas keeps its current content.
    pub fn load_file(&mut self, path: &Path) -> Result<()> {
        let doc = SpriteDocument::load(path)?;
        self.file_path = Some(path.to_path_buf());
        self.load_document(doc)
    }

    pub fn save_file(&mut self, path: &Path) -> Result<()> {
        self.to_document().save(path)?;
        self.file_path = Some(path.to_path_buf());
        self.is_modified = false;
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Rendering
    // ═══════════════════════════════════════════════════════════════════════

    /// Draws the dirty cells and clears their flags. Returns the number of drawn cells.
    pub fn render_dirty(&mut self, surface: &mut dyn RenderSurface, layout: &CellLayout) -> usize {
        let mut count = 0;
        for (index, dirty) in self.dirty.iter_mut().enumerate() {
            if !*dirty {
                continue;
            }
            if let Some(color) = self.grid.get(index) {
                layout.paint_cell(surface, &self.grid, index, color);
            }
            *dirty = false;
            count += 1;
        }
        count
    }
}
