mod input;
pub use input::*;

mod widget;
pub use widget::*;

mod canvas_widget;
pub use canvas_widget::*;

mod channel_slider;
pub use channel_slider::*;

mod color_well;
pub use color_well::*;

mod bitmap_editor;
pub use bitmap_editor::*;
