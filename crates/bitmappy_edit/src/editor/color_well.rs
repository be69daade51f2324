use bitmappy_engine::{Color, Rectangle, RenderSurface};

use super::Paintable;

const FRAME: i32 = 2;

/// Swatch of the active color.
pub struct ColorWell {
    color: Color,
    bounds: Rectangle,
    needs_paint: bool,
}

impl ColorWell {
    pub fn new(color: Color, bounds: Rectangle) -> Self {
        Self {
            color,
            bounds,
            needs_paint: true,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        if self.color != color {
            self.color = color;
            self.needs_paint = true;
        }
    }

    pub fn bounds(&self) -> Rectangle {
        self.bounds
    }

    /// Hex label shown next to the swatch, e.g. `#FF00FF`.
    pub fn label(&self) -> String {
        self.color.to_hex()
    }
}

impl Paintable for ColorWell {
    fn paint(&mut self, surface: &mut dyn RenderSurface) {
        if !self.needs_paint {
            return;
        }
        let Rectangle { start, size } = self.bounds;
        surface.fill_rect(self.bounds, Color::GRID);
        surface.fill_rect(
            Rectangle::from(start.x + FRAME, start.y + FRAME, size.width - 2 * FRAME, size.height - 2 * FRAME),
            self.color,
        );
        self.needs_paint = false;
    }

    fn invalidate(&mut self) {
        self.needs_paint = true;
    }
}
