//! Bitmap Editor
//!
//! Glues the canvas, its mini view, three channel sliders and the color well together.
//! Input arrives as `InputEvent`s, output goes to any `RenderSurface`.
//!
//! Pointer routing: the widget under `PointerDown` captures the pointer, drags and the
//! final `PointerUp` go to it even when the pointer leaves its bounds.

use std::{
    cell::{Ref, RefCell},
    path::{Path, PathBuf},
    rc::Rc,
};

use bitmappy_engine::{CellLayout, Color, Position, Rectangle, RenderSurface, Size};

use super::{
    CanvasWidget, Channel, ChannelSlider, Clickable, ColorWell, Draggable, EditorKey, InputEvent, Paintable, WidgetResponse, SLIDER_HEIGHT, SLIDER_TRACK_WIDTH,
};
use crate::{CanvasModel, MiniatureView, Result, MINI_VIEW_SCALE};

/// Document used by the save and load keys when nothing else was given.
pub const DEFAULT_DOCUMENT: &str = "savefile.cfg";

const COLOR_WELL_SIZE: i32 = 64;

/// Screen geometry of the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditorLayout {
    pub screen_size: Size,
    pub mini_view_scale: i32,
}

impl Default for EditorLayout {
    fn default() -> Self {
        Self {
            screen_size: Size::new(640, 480),
            mini_view_scale: MINI_VIEW_SCALE,
        }
    }
}

impl EditorLayout {
    pub fn new(screen_size: Size, mini_view_scale: i32) -> Self {
        Self {
            screen_size,
            mini_view_scale: mini_view_scale.max(1),
        }
    }

    /// The canvas takes a square of three quarters of the screen height in the top left corner.
    pub fn canvas_layout(&self, grid_size: Size) -> CellLayout {
        let side = self.screen_size.height * 3 / 4;
        let cell = (side / grid_size.width.max(grid_size.height).max(1)).max(1);
        let border = i32::from(cell >= 4);
        CellLayout::new(Position::default(), Size::new(cell, cell)).with_border(border)
    }

    /// Top right corner.
    pub fn mini_view_layout(&self, grid_size: Size) -> CellLayout {
        let x = (self.screen_size.width - grid_size.width * self.mini_view_scale).max(0);
        CellLayout::new(Position::new(x, 0), Size::new(self.mini_view_scale, self.mini_view_scale))
    }

    /// Red, green and blue are stacked at the bottom left.
    pub fn slider_origin(&self, channel: Channel) -> Position {
        let from_bottom = match channel {
            Channel::Red => 70,
            Channel::Green => 50,
            Channel::Blue => 30,
        };
        Position::new(0, self.screen_size.height - from_bottom)
    }

    /// Right of the sliders, centered on the green one.
    pub fn color_well_bounds(&self) -> Rectangle {
        let green = self.slider_origin(Channel::Green);
        Rectangle::from(
            SLIDER_TRACK_WIDTH + 16,
            green.y + SLIDER_HEIGHT / 2 - COLOR_WELL_SIZE / 2,
            COLOR_WELL_SIZE,
            COLOR_WELL_SIZE,
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WidgetId {
    Canvas,
    Slider(Channel),
}

pub struct BitmapEditor {
    layout: EditorLayout,
    canvas: CanvasWidget,
    mini_view: Rc<RefCell<MiniatureView>>,
    sliders: [ChannelSlider; 3],
    color_well: ColorWell,

    document_path: PathBuf,

    /// Widget that got the last `PointerDown`
    captured: Option<WidgetId>,
    needs_full_redraw: bool,
    quit_requested: bool,
}

impl BitmapEditor {
    pub fn new(mut canvas: CanvasModel, layout: EditorLayout) -> Self {
        let size = canvas.size();
        let mini_view = MiniatureView::attach(&mut canvas, layout.mini_view_layout(size));
        let active = canvas.active_color();
        let sliders = Channel::ALL.map(|channel| ChannelSlider::new(channel, channel.get(active), layout.slider_origin(channel)));
        let document_path = canvas.file_path().map_or_else(|| PathBuf::from(DEFAULT_DOCUMENT), Path::to_path_buf);
        Self {
            layout,
            canvas: CanvasWidget::new(canvas, layout.canvas_layout(size)),
            mini_view,
            sliders,
            color_well: ColorWell::new(active, layout.color_well_bounds()),
            document_path,
            captured: None,
            needs_full_redraw: true,
            quit_requested: false,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Getters
    // ═══════════════════════════════════════════════════════════════════════

    pub fn layout(&self) -> &EditorLayout {
        &self.layout
    }

    pub fn canvas(&self) -> &CanvasModel {
        self.canvas.canvas()
    }

    pub fn canvas_widget(&self) -> &CanvasWidget {
        &self.canvas
    }

    pub fn mini_view(&self) -> Ref<'_, MiniatureView> {
        self.mini_view.borrow()
    }

    pub fn slider(&self, channel: Channel) -> &ChannelSlider {
        &self.sliders[channel.index()]
    }

    pub fn color_well(&self) -> &ColorWell {
        &self.color_well
    }

    pub fn document_path(&self) -> &Path {
        &self.document_path
    }

    pub fn set_document_path(&mut self, path: impl Into<PathBuf>) {
        self.document_path = path.into();
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Sets the paint color and moves the sliders and the color well along.
    pub fn set_active_color(&mut self, color: Color) {
        self.canvas.canvas_mut().set_active_color(color);
        for slider in &mut self.sliders {
            slider.set_value(slider.channel().get(color));
        }
        self.color_well.set_color(color);
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Input
    // ═══════════════════════════════════════════════════════════════════════

    /// Feeds one event to the editor.
    ///
    /// # Errors
    ///
    /// Save and load errors are passed through, the canvas is untouched when a load fails.
    pub fn handle_event(&mut self, event: InputEvent) -> Result<()> {
        match event {
            InputEvent::PointerDown(pos) => {
                self.captured = self.hit_test(pos);
                if let Some(id) = self.captured {
                    let response = self.widget_mut(id).on_pointer_down(pos)?;
                    self.apply(response);
                }
            }
            InputEvent::PointerDrag(pos) => {
                if let Some(id) = self.captured {
                    let response = self.widget_mut(id).on_pointer_drag(pos)?;
                    self.apply(response);
                }
            }
            InputEvent::PointerUp(pos) => {
                if let Some(id) = self.captured.take() {
                    let response = self.widget_mut(id).on_pointer_up(pos)?;
                    self.apply(response);
                }
            }
            InputEvent::Key(key) => self.handle_key(key)?,
        }
        Ok(())
    }

    fn hit_test(&self, pos: Position) -> Option<WidgetId> {
        if self.canvas.hit_test(pos) {
            return Some(WidgetId::Canvas);
        }
        self.sliders.iter().find(|slider| slider.hit_test(pos)).map(|slider| WidgetId::Slider(slider.channel()))
    }

    fn widget_mut(&mut self, id: WidgetId) -> &mut dyn Draggable {
        match id {
            WidgetId::Canvas => &mut self.canvas,
            WidgetId::Slider(channel) => &mut self.sliders[channel.index()],
        }
    }

    fn apply(&mut self, response: WidgetResponse) {
        if let WidgetResponse::ChannelChanged(channel, value) = response {
            let color = channel.apply(self.canvas.canvas().active_color(), value);
            self.canvas.canvas_mut().set_active_color(color);
            self.color_well.set_color(color);
        }
    }

    fn handle_key(&mut self, key: EditorKey) -> Result<()> {
        match key {
            EditorKey::New => {
                log::info!("New canvas");
                self.canvas.canvas_mut().reset_all(Color::TRANSPARENT)?;
            }
            EditorKey::Save => {
                let path = self.document_path.clone();
                self.canvas.canvas_mut().save_file(&path)?;
            }
            EditorKey::Load => {
                let path = self.document_path.clone();
                let old_size = self.canvas.canvas().size();
                self.canvas.canvas_mut().load_file(&path)?;
                let new_size = self.canvas.canvas().size();
                if old_size != new_size {
                    self.canvas.set_layout(self.layout.canvas_layout(new_size));
                    self.mini_view.borrow_mut().set_layout(self.layout.mini_view_layout(new_size));
                    self.needs_full_redraw = true;
                }
            }
            EditorKey::Quit => {
                log::info!("Quit requested");
                self.quit_requested = true;
            }
            EditorKey::Other(ch) => log::debug!("Unbound key '{ch}'"),
        }
        Ok(())
    }

    // ═══════════════════════════════════════════════════════════════════════
    // Rendering
    // ═══════════════════════════════════════════════════════════════════════

    /// Draws everything that changed since the last call.
    pub fn render(&mut self, surface: &mut dyn RenderSurface) {
        if self.needs_full_redraw {
            let size = surface.size();
            surface.fill_rect(Rectangle::new(Position::default(), size), Color::BLACK);
            self.canvas.invalidate();
            self.mini_view.borrow_mut().invalidate();
            for slider in &mut self.sliders {
                slider.invalidate();
            }
            self.color_well.invalidate();
            self.needs_full_redraw = false;
        }
        self.canvas.paint(surface);
        self.mini_view.borrow_mut().paint(surface);
        for slider in &mut self.sliders {
            slider.paint(surface);
        }
        self.color_well.paint(surface);
    }
}
