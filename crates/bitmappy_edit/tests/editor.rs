use bitmappy_edit::{
    editor::{Channel, DEFAULT_DOCUMENT},
    BitmapEditor, CanvasModel, Color, EditorKey, EditorLayout, EngineError, ImageSurface, InputEvent, Position, Size,
};
use pretty_assertions::assert_eq;

fn editor(width: i32, height: i32) -> BitmapEditor {
    BitmapEditor::new(CanvasModel::new((width, height)).unwrap(), EditorLayout::default())
}

/// Screen position of the center of canvas cell `(x, y)`.
fn cell_center(editor: &BitmapEditor, x: i32, y: i32) -> Position {
    let layout = editor.canvas_widget().layout();
    Position::new(
        layout.origin.x + x * layout.cell_size.width + layout.cell_size.width / 2,
        layout.origin.y + y * layout.cell_size.height + layout.cell_size.height / 2,
    )
}

fn slider_at(editor: &BitmapEditor, channel: Channel, value: i32) -> Position {
    let origin = editor.layout().slider_origin(channel);
    Position::new(origin.x + value, origin.y + 1)
}

#[test]
fn test_default_layout() {
    let layout = EditorLayout::default();
    let canvas = layout.canvas_layout(Size::new(32, 32));
    assert_eq!(Size::new(11, 11), canvas.cell_size);
    let mini = layout.mini_view_layout(Size::new(32, 32));
    assert_eq!(Position::new(576, 0), mini.origin);
    assert_eq!(Size::new(2, 2), mini.cell_size);
}

#[test]
fn test_pointer_down_paints_cell() {
    let mut editor = editor(8, 8);
    let pos = cell_center(&editor, 2, 1);
    editor.handle_event(InputEvent::PointerDown(pos)).unwrap();
    editor.handle_event(InputEvent::PointerUp(pos)).unwrap();

    assert_eq!(Some(Color::WHITE), editor.canvas().pixel(10));
    assert_eq!(Some(Color::WHITE), editor.mini_view().grid().get(10));
}

#[test]
fn test_drag_paints_cells() {
    let mut editor = editor(8, 8);
    editor.handle_event(InputEvent::PointerDown(cell_center(&editor, 0, 0))).unwrap();
    editor.handle_event(InputEvent::PointerDrag(cell_center(&editor, 1, 0))).unwrap();
    editor.handle_event(InputEvent::PointerDrag(cell_center(&editor, 2, 0))).unwrap();
    editor.handle_event(InputEvent::PointerUp(cell_center(&editor, 2, 0))).unwrap();
    // drag without a pressed button goes nowhere
    editor.handle_event(InputEvent::PointerDrag(cell_center(&editor, 3, 0))).unwrap();

    let row: Vec<Color> = editor.canvas().grid().rows().next().unwrap().to_vec();
    assert_eq!(&[Color::WHITE, Color::WHITE, Color::WHITE], &row[..3]);
    assert!(row[3..].iter().all(Color::is_transparent));
}

#[test]
fn test_click_outside_widgets_is_ignored() {
    let mut editor = editor(8, 8);
    editor.handle_event(InputEvent::PointerDown(Position::new(620, 300))).unwrap();
    assert_eq!(0, editor.canvas().grid().pixels().iter().filter(|c| !c.is_transparent()).count());
}

#[test]
fn test_slider_sets_active_color() {
    let mut editor = editor(4, 4);
    editor.handle_event(InputEvent::PointerDown(slider_at(&editor, Channel::Red, 40))).unwrap();
    editor.handle_event(InputEvent::PointerUp(slider_at(&editor, Channel::Red, 40))).unwrap();

    let expected = Color::new(40, 255, 255);
    assert_eq!(40, editor.slider(Channel::Red).value());
    assert_eq!(expected, editor.canvas().active_color());
    assert_eq!(expected, editor.color_well().color());
    assert_eq!("#28FFFF", editor.color_well().label());
}

#[test]
fn test_slider_drag_is_clamped() {
    let mut editor = editor(4, 4);
    editor.handle_event(InputEvent::PointerDown(slider_at(&editor, Channel::Blue, 100))).unwrap();
    editor.handle_event(InputEvent::PointerDrag(slider_at(&editor, Channel::Blue, 400))).unwrap();
    assert_eq!(255, editor.slider(Channel::Blue).value());
    editor.handle_event(InputEvent::PointerDrag(slider_at(&editor, Channel::Blue, -30))).unwrap();
    assert_eq!(0, editor.slider(Channel::Blue).value());
    assert_eq!(Color::new(255, 255, 0), editor.canvas().active_color());
}

#[test]
fn test_painting_after_slider_change() {
    let mut editor = editor(4, 4);
    editor.set_active_color(Color::new(10, 20, 30));
    assert_eq!(20, editor.slider(Channel::Green).value());

    let pos = cell_center(&editor, 3, 3);
    editor.handle_event(InputEvent::PointerDown(pos)).unwrap();
    assert_eq!(Some(Color::new(10, 20, 30)), editor.canvas().pixel(15));
}

#[test]
fn test_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(DEFAULT_DOCUMENT);

    let mut editor = editor(4, 4);
    editor.set_document_path(&path);
    editor.handle_event(InputEvent::PointerDown(cell_center(&editor, 0, 0))).unwrap();
    editor.handle_event(InputEvent::Key(EditorKey::from('s'))).unwrap();
    assert!(path.exists());

    editor.handle_event(InputEvent::Key(EditorKey::New)).unwrap();
    assert!(editor.canvas().grid().pixels().iter().all(Color::is_transparent));

    editor.handle_event(InputEvent::Key(EditorKey::Load)).unwrap();
    assert_eq!(Some(Color::WHITE), editor.canvas().pixel(0));
    assert_eq!(editor.canvas().grid(), editor.mini_view().grid());

    assert!(!editor.quit_requested());
    editor.handle_event(InputEvent::Key(EditorKey::from('x'))).unwrap();
    editor.handle_event(InputEvent::Key(EditorKey::from('q'))).unwrap();
    assert!(editor.quit_requested());
}

#[test]
fn test_load_error_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let mut editor = editor(4, 4);
    editor.set_document_path(dir.path().join("missing.cfg"));
    editor.handle_event(InputEvent::PointerDown(cell_center(&editor, 1, 1))).unwrap();

    let err = editor.handle_event(InputEvent::Key(EditorKey::Load)).unwrap_err();
    assert!(matches!(err, EngineError::ReadFile { .. }));
    assert_eq!(Some(Color::WHITE), editor.canvas().pixel(5));
}

#[test]
fn test_load_resizes_views() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("big.cfg");
    CanvasModel::new((16, 16)).unwrap().save_file(&path).unwrap();

    let mut editor = editor(4, 4);
    editor.set_document_path(&path);
    editor.handle_event(InputEvent::Key(EditorKey::Load)).unwrap();
    assert_eq!(Size::new(16, 16), editor.canvas().size());
    assert_eq!(Size::new(16, 16), editor.mini_view().grid().size());
    assert_eq!(Size::new(22, 22), editor.canvas_widget().layout().cell_size);
}

#[test]
fn test_render_only_repaints_changes() {
    let mut editor = editor(4, 4);
    let mut surface = ImageSurface::new((640, 480), Color::BLACK).unwrap();
    editor.render(&mut surface);
    assert_eq!(0, editor.canvas().dirty_count());
    assert_eq!(0, editor.mini_view().dirty_count());
    assert_eq!(Some(Color::MINI_VIEW_BACKDROP), surface.pixel((639, 0)));

    let pos = cell_center(&editor, 0, 0);
    editor.handle_event(InputEvent::PointerDown(pos)).unwrap();
    assert_eq!(1, editor.canvas().dirty_count());
    editor.render(&mut surface);
    assert_eq!(Some(Color::WHITE), surface.pixel(pos));
    assert_eq!(Some(Color::WHITE), surface.pixel((632, 0)));
}
