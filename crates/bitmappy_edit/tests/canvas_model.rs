use std::{cell::RefCell, rc::Rc};

use bitmappy_edit::{
    CanvasModel, CellLayout, Color, EngineError, ImageSurface, MiniatureView, PixelGrid, PixelObserver, Position, Result, Size, SpriteDocument,
};
use pretty_assertions::assert_eq;

const RED: Color = Color::new(255, 0, 0);
const BLUE: Color = Color::new(0, 0, 255);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PixelChange {
    index: usize,
    color: Color,
}

/// Records every notification it gets.
#[derive(Default)]
struct ChangeRecorder {
    changes: Vec<PixelChange>,
    resizes: Vec<Size>,
}

impl ChangeRecorder {
    fn shared() -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(Self::default()))
    }

    fn changes(&self) -> &[PixelChange] {
        &self.changes
    }

    fn resizes(&self) -> &[Size] {
        &self.resizes
    }
}

impl PixelObserver for ChangeRecorder {
    fn on_pixel_changed(&mut self, index: usize, color: Color) -> Result<()> {
        self.changes.push(PixelChange { index, color });
        Ok(())
    }

    fn on_canvas_resized(&mut self, size: Size) -> Result<()> {
        self.resizes.push(size);
        Ok(())
    }
}

fn small_mini_view() -> Rc<RefCell<MiniatureView>> {
    let view = MiniatureView::new(PixelGrid::blank((2, 2)).unwrap(), CellLayout::default());
    Rc::new(RefCell::new(view))
}

fn clean_canvas(width: i32, height: i32) -> CanvasModel {
    let mut canvas = CanvasModel::new((width, height)).unwrap();
    let mut surface = ImageSurface::new((width, height), Color::BLACK).unwrap();
    canvas.render_dirty(&mut surface, &CellLayout::default());
    canvas
}

#[test]
fn test_new_canvas() {
    let canvas = CanvasModel::new((3, 2)).unwrap();
    assert_eq!(Size::new(3, 2), canvas.size());
    assert_eq!(6, canvas.len());
    assert_eq!(6, canvas.dirty_count());
    assert_eq!(Color::WHITE, canvas.active_color());
    assert!(canvas.grid().pixels().iter().all(Color::is_transparent));
    assert!(!canvas.is_modified());
}

#[test]
fn test_new_canvas_invalid_size() {
    assert!(matches!(CanvasModel::new((0, 4)), Err(EngineError::InvalidDimensions { .. })));
}

#[test]
fn test_set_pixel_notifies() {
    let mut canvas = clean_canvas(4, 4);
    let recorder = ChangeRecorder::shared();
    canvas.add_observer(recorder.clone());

    assert!(canvas.set_pixel(5, RED).unwrap());
    assert_eq!(Some(RED), canvas.pixel(5));
    assert!(canvas.is_dirty(5));
    assert_eq!(1, canvas.dirty_count());
    assert!(canvas.is_modified());
    assert_eq!(&[PixelChange { index: 5, color: RED }], recorder.borrow().changes());
}

#[test]
fn test_set_pixel_same_color_is_noop() {
    let mut canvas = clean_canvas(4, 4);
    canvas.set_pixel(3, RED).unwrap();
    canvas.render_dirty(&mut ImageSurface::new((4, 4), Color::BLACK).unwrap(), &CellLayout::default());

    let recorder = ChangeRecorder::shared();
    canvas.add_observer(recorder.clone());
    assert!(!canvas.set_pixel(3, RED).unwrap());
    assert!(!canvas.is_dirty(3));
    assert!(recorder.borrow().changes().is_empty());
}

#[test]
fn test_set_pixel_out_of_range() {
    let mut canvas = clean_canvas(2, 2);
    let recorder = ChangeRecorder::shared();
    canvas.add_observer(recorder.clone());

    for index in [-1, 4, 100] {
        let err = canvas.set_pixel(index, RED).unwrap_err();
        assert!(matches!(err, EngineError::IndexOutOfRange { index: i, len: 4 } if i == index as i64));
    }
    assert_eq!(0, canvas.dirty_count());
    assert!(recorder.borrow().changes().is_empty());
    assert!(canvas.grid().pixels().iter().all(Color::is_transparent));
}

#[test]
fn test_notifications_follow_mutation_order() {
    let mut canvas = clean_canvas(3, 3);
    let recorder = ChangeRecorder::shared();
    canvas.add_observer(recorder.clone());

    canvas.set_pixel(8, RED).unwrap();
    canvas.set_pixel(0, BLUE).unwrap();
    canvas.set_pixel(0, BLUE).unwrap();
    canvas.set_pixel(8, BLUE).unwrap();

    let expected = vec![
        PixelChange { index: 8, color: RED },
        PixelChange { index: 0, color: BLUE },
        PixelChange { index: 8, color: BLUE },
    ];
    assert_eq!(expected, recorder.borrow().changes());
}

#[test]
fn test_every_observer_is_notified() {
    let mut canvas = clean_canvas(2, 2);
    let first = ChangeRecorder::shared();
    let second = ChangeRecorder::shared();
    canvas.add_observer(first.clone());
    canvas.add_observer(second.clone());

    canvas.set_pixel(1, RED).unwrap();
    assert_eq!(1, first.borrow().changes().len());
    assert_eq!(first.borrow().changes(), second.borrow().changes());
}

#[test]
fn test_failing_observer_does_not_starve_later_ones() {
    let mut canvas = clean_canvas(4, 4);
    let view = small_mini_view();
    let recorder = ChangeRecorder::shared();
    canvas.add_observer(view.clone());
    canvas.add_observer(recorder.clone());

    let err = canvas.set_pixel(10, Color::BLACK).unwrap_err();
    assert!(matches!(err, EngineError::IndexOutOfRange { index: 10, len: 4 }));
    // the cell changed before the observers ran
    assert_eq!(Some(Color::BLACK), canvas.pixel(10));
    assert!(canvas.is_dirty(10));
    assert_eq!(&[PixelChange { index: 10, color: Color::BLACK }], recorder.borrow().changes());

    // an index the view does know still reaches both
    assert!(canvas.set_pixel(1, RED).unwrap());
    assert_eq!(Some(RED), view.borrow().grid().get(1));
    assert_eq!(2, recorder.borrow().changes().len());
}

#[test]
fn test_reset_all_with_failing_observer_notifies_every_cell() {
    let mut canvas = clean_canvas(3, 2);
    let view = small_mini_view();
    let recorder = ChangeRecorder::shared();
    canvas.add_observer(view.clone());
    canvas.add_observer(recorder.clone());

    let err = canvas.reset_all(BLUE).unwrap_err();
    assert!(matches!(err, EngineError::IndexOutOfRange { index: 4, len: 4 }));
    assert_eq!(6, recorder.borrow().changes().len());
    assert!(canvas.grid().pixels().iter().all(|c| *c == BLUE));
    assert!(view.borrow().grid().pixels().iter().all(|c| *c == BLUE));
}

#[test]
fn test_remove_observer() {
    let mut canvas = clean_canvas(2, 2);
    let recorder = ChangeRecorder::shared();
    let id = canvas.add_observer(recorder.clone());
    assert_eq!(1, canvas.observer_count());

    assert!(canvas.remove_observer(id));
    assert!(!canvas.remove_observer(id));
    canvas.set_pixel(0, RED).unwrap();
    assert!(recorder.borrow().changes().is_empty());
}

#[test]
fn test_paint_uses_active_color() {
    let mut canvas = clean_canvas(2, 2);
    canvas.set_active_color(BLUE);
    canvas.paint(2).unwrap();
    assert_eq!(Some(BLUE), canvas.pixel(2));
    // changing the active color leaves painted pixels alone
    canvas.set_active_color(RED);
    assert_eq!(Some(BLUE), canvas.pixel(2));
}

#[test]
fn test_reset_all_notifies_every_cell() {
    let mut canvas = clean_canvas(3, 2);
    canvas.set_pixel(4, RED).unwrap();
    let recorder = ChangeRecorder::shared();
    canvas.add_observer(recorder.clone());

    canvas.reset_all(BLUE).unwrap();
    assert_eq!(6, canvas.dirty_count());
    let indices: Vec<usize> = recorder.borrow().changes().iter().map(|c| c.index).collect();
    assert_eq!(vec![0, 1, 2, 3, 4, 5], indices);
    assert!(recorder.borrow().changes().iter().all(|c| c.color == BLUE));
}

#[test]
fn test_render_dirty_draws_only_dirty_cells() {
    let mut canvas = clean_canvas(4, 4);
    let layout = CellLayout::new(Position::default(), Size::new(2, 2));
    let mut surface = ImageSurface::new((8, 8), Color::BLACK).unwrap();

    canvas.set_pixel(5, RED).unwrap();
    assert_eq!(1, canvas.render_dirty(&mut surface, &layout));
    assert_eq!(Some(RED), surface.pixel((2, 2)));
    assert_eq!(Some(RED), surface.pixel((3, 3)));
    // clean cells were never drawn
    assert_eq!(Some(Color::BLACK), surface.pixel((0, 0)));

    assert_eq!(0, canvas.dirty_count());
    assert_eq!(0, canvas.render_dirty(&mut surface, &layout));
}

#[test]
fn test_load_document_replaces_content() {
    let mut canvas = clean_canvas(2, 2);
    let recorder = ChangeRecorder::shared();
    canvas.add_observer(recorder.clone());

    let grid = PixelGrid::new((3, 1), RED).unwrap();
    canvas.load_document(SpriteDocument::new("wide", grid.clone())).unwrap();

    assert_eq!("wide", canvas.name());
    assert_eq!(&grid, canvas.grid());
    assert_eq!(3, canvas.dirty_count());
    assert!(!canvas.is_modified());
    assert_eq!(&[Size::new(3, 1)], recorder.borrow().resizes());
    assert_eq!(3, recorder.borrow().changes().len());
}

#[test]
fn test_load_same_size_does_not_announce_resize() {
    let mut canvas = clean_canvas(2, 2);
    let recorder = ChangeRecorder::shared();
    canvas.add_observer(recorder.clone());

    canvas.load_document(SpriteDocument::new("same", PixelGrid::new((2, 2), RED).unwrap())).unwrap();
    assert!(recorder.borrow().resizes().is_empty());
    assert_eq!(4, recorder.borrow().changes().len());
}

#[test]
fn test_save_and_load_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("savefile.cfg");

    let mut canvas = CanvasModel::new((4, 4)).unwrap();
    canvas.set_name("Tile");
    canvas.set_pixel(0, RED).unwrap();
    canvas.set_pixel(15, BLUE).unwrap();
    canvas.save_file(&path).unwrap();
    assert!(!canvas.is_modified());
    assert_eq!(Some(path.as_path()), canvas.file_path());

    let mut other = CanvasModel::new((2, 2)).unwrap();
    other.load_file(&path).unwrap();
    assert_eq!(canvas.grid(), other.grid());
    assert_eq!("Tile", other.name());
}

#[test]
fn test_failed_load_leaves_canvas_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.cfg");
    std::fs::write(&path, "[sprite]\nname = broken\npixels = ab\n\n[a]\nred = 1\ngreen = 2\nblue = 3\n").unwrap();

    let mut canvas = clean_canvas(2, 2);
    canvas.set_pixel(1, RED).unwrap();
    let before = canvas.grid().clone();
    let recorder = ChangeRecorder::shared();
    canvas.add_observer(recorder.clone());

    assert!(matches!(canvas.load_file(&path), Err(EngineError::UnknownPaletteKey { key: 'b', .. })));
    assert!(matches!(canvas.load_file(&dir.path().join("missing.cfg")), Err(EngineError::ReadFile { .. })));

    assert_eq!(&before, canvas.grid());
    assert_eq!("Untitled", canvas.name());
    assert!(recorder.borrow().changes().is_empty());
    assert_eq!(None, canvas.file_path());
}
