mod protocol;
pub use protocol::*;

mod canvas_model;
pub use canvas_model::*;

mod miniature_view;
pub use miniature_view::*;
