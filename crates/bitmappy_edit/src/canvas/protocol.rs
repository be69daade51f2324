//! Pixel change notifications
//!
//! A `CanvasModel` calls every registered `PixelObserver` synchronously, once per accepted
//! pixel change and in mutation order. Setting a pixel to the color it already has is not a
//! change and is never reported.

use std::{cell::RefCell, rc::Rc};

use bitmappy_engine::{Color, Size};

use crate::Result;

/// Receives pixel changes from a `CanvasModel`.
pub trait PixelObserver {
    /// Called after the cell at `index` changed to `color`.
    ///
    /// Replaying the same `(index, color)` must leave the observer in the same state.
    ///
    /// # Errors
    ///
    /// `EngineError::IndexOutOfRange` if `index` is outside the observer's grid.
    fn on_pixel_changed(&mut self, index: usize, color: Color) -> Result<()>;

    /// Called before the per cell burst when the canvas got new dimensions.
    fn on_canvas_resized(&mut self, _size: Size) -> Result<()> {
        Ok(())
    }
}

/// Observer handle shared between the canvas and the observer's owner.
pub type SharedObserver = Rc<RefCell<dyn PixelObserver>>;

/// Identifies a registration, see `CanvasModel::remove_observer`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(pub(crate) usize);
