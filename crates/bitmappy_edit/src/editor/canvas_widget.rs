use bitmappy_engine::{CellLayout, Position, Rectangle, RenderSurface};

use super::{Clickable, Draggable, Paintable, WidgetResponse};
use crate::{CanvasModel, MiniatureView, Result};

/// The enlarged, editable view of a `CanvasModel`. Down and drag paint the active color
/// into the cell under the pointer.
pub struct CanvasWidget {
    canvas: CanvasModel,
    layout: CellLayout,
}

impl CanvasWidget {
    pub fn new(canvas: CanvasModel, layout: CellLayout) -> Self {
        Self { canvas, layout }
    }

    pub fn canvas(&self) -> &CanvasModel {
        &self.canvas
    }

    pub fn canvas_mut(&mut self) -> &mut CanvasModel {
        &mut self.canvas
    }

    pub fn layout(&self) -> &CellLayout {
        &self.layout
    }

    pub fn set_layout(&mut self, layout: CellLayout) {
        self.layout = layout;
        self.canvas.mark_all_dirty();
    }

    fn paint_at(&mut self, pos: Position) -> Result<WidgetResponse> {
        let Some(index) = self.layout.index_at(self.canvas.grid(), pos) else {
            return Ok(WidgetResponse::Ignored);
        };
        self.canvas.paint(index as i32)?;
        Ok(WidgetResponse::Handled)
    }
}

impl Clickable for CanvasWidget {
    fn bounds(&self) -> Rectangle {
        self.layout.bounds(self.canvas.size())
    }

    fn on_pointer_down(&mut self, pos: Position) -> Result<WidgetResponse> {
        self.paint_at(pos)
    }
}

impl Draggable for CanvasWidget {
    fn on_pointer_drag(&mut self, pos: Position) -> Result<WidgetResponse> {
        self.paint_at(pos)
    }
}

impl Paintable for CanvasWidget {
    fn paint(&mut self, surface: &mut dyn RenderSurface) {
        let count = self.canvas.render_dirty(surface, &self.layout);
        if count > 0 {
            log::trace!("Canvas repainted {count} cells");
        }
    }

    fn invalidate(&mut self) {
        self.canvas.mark_all_dirty();
    }
}

impl Paintable for MiniatureView {
    fn paint(&mut self, surface: &mut dyn RenderSurface) {
        self.refresh(surface);
    }

    fn invalidate(&mut self) {
        self.mark_all_dirty();
    }
}
