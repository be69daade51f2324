//! Widget capabilities
//!
//! A widget implements only the traits for what it can do. The editor finds the widget under
//! the pointer with `Clickable::bounds` and hands it the event; answers travel back as a
//! `WidgetResponse` value.

use bitmappy_engine::{Position, Rectangle, RenderSurface};

use super::Channel;
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetResponse {
    /// The event had no effect
    Ignored,
    Handled,
    /// A color slider moved to a new value
    ChannelChanged(Channel, u8),
}

pub trait Paintable {
    /// Draws whatever changed since the last call.
    fn paint(&mut self, surface: &mut dyn RenderSurface);

    /// Makes the next `paint` draw the whole widget.
    fn invalidate(&mut self);
}

pub trait Clickable {
    fn bounds(&self) -> Rectangle;

    fn hit_test(&self, pos: Position) -> bool {
        self.bounds().is_inside(pos)
    }

    fn on_pointer_down(&mut self, pos: Position) -> Result<WidgetResponse>;

    fn on_pointer_up(&mut self, _pos: Position) -> Result<WidgetResponse> {
        Ok(WidgetResponse::Ignored)
    }
}

pub trait Draggable: Clickable {
    /// Pointer moved while this widget holds the capture. `pos` may be outside `bounds`.
    fn on_pointer_drag(&mut self, pos: Position) -> Result<WidgetResponse>;
}
