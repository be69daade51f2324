use std::{fs, path::Path};

use anyhow::{bail, Context};
use bitmappy_edit::{BitmapEditor, CanvasModel, CellLayout, Color, ImageSurface, Position, Size, SpriteDocument};

use crate::{script::parse_script, Options};

pub fn new_sprite(output: &Path, size: Size, name: &str) -> anyhow::Result<()> {
    let mut canvas = CanvasModel::new(size).with_context(|| format!("Can't create a {size} canvas"))?;
    canvas.set_name(name);
    canvas.save_file(output).with_context(|| format!("Can't write {}", output.display()))?;
    println!("Created {} ({size}) in {}", name, output.display());
    Ok(())
}

pub fn show_sprite(file: &Path) -> anyhow::Result<()> {
    let doc = SpriteDocument::load(file).with_context(|| format!("Can't load {}", file.display()))?;
    print!("{}", doc.describe()?);
    Ok(())
}

/// Paints `color` at every position and returns how many pixels actually changed.
pub fn paint_pixels(canvas: &mut CanvasModel, color: Color, positions: &[Position]) -> anyhow::Result<usize> {
    canvas.set_active_color(color);
    let mut changed = 0;
    for pos in positions {
        let Some(index) = canvas.grid().index_of(*pos) else {
            bail!("{pos} is outside the {} sprite", canvas.size());
        };
        if canvas.paint(index as i32)? {
            changed += 1;
        }
    }
    Ok(changed)
}

pub fn paint_sprite(file: &Path, color: Color, positions: &[Position], output: Option<&Path>) -> anyhow::Result<()> {
    let mut canvas = CanvasModel::from_file(file).with_context(|| format!("Can't load {}", file.display()))?;
    let changed = paint_pixels(&mut canvas, color, positions)?;
    let output = output.unwrap_or(file);
    canvas.save_file(output).with_context(|| format!("Can't write {}", output.display()))?;
    println!("Painted {changed} pixel(s) {} in {}", color.to_hex(), output.display());
    Ok(())
}

/// Draws the whole sprite with `scale` x `scale` pixels per cell.
pub fn render_canvas(canvas: &mut CanvasModel, scale: i32) -> anyhow::Result<ImageSurface> {
    if scale <= 0 {
        bail!("Scale must be positive, got {scale}");
    }
    let size = canvas.size();
    let (Some(width), Some(height)) = (size.width.checked_mul(scale), size.height.checked_mul(scale)) else {
        bail!("Scale {scale} is too large for a {size} sprite");
    };
    let mut surface = ImageSurface::new((width, height), Color::BLACK)?;
    canvas.mark_all_dirty();
    canvas.render_dirty(&mut surface, &CellLayout::new(Position::default(), Size::new(scale, scale)));
    Ok(surface)
}

pub fn render_sprite(file: &Path, output: &Path, scale: i32) -> anyhow::Result<()> {
    let mut canvas = CanvasModel::from_file(file).with_context(|| format!("Can't load {}", file.display()))?;
    let surface = render_canvas(&mut canvas, scale)?;
    surface.save_png(output).with_context(|| format!("Can't write {}", output.display()))?;
    Ok(())
}

pub struct ReplayArgs<'a> {
    pub file: &'a Path,
    pub script: &'a Path,
    pub output: Option<&'a Path>,
    pub screenshot: Option<&'a Path>,
}

/// Runs the events of a script against an editor. Stops early on `key q`.
pub fn replay(args: &ReplayArgs<'_>, options: &Options) -> anyhow::Result<()> {
    let text = fs::read_to_string(args.script).with_context(|| format!("Can't read {}", args.script.display()))?;
    let events = parse_script(&text)?;

    let canvas = CanvasModel::from_file(args.file).with_context(|| format!("Can't load {}", args.file.display()))?;
    let mut editor = BitmapEditor::new(canvas, options.editor_layout());

    let mut handled = 0;
    for event in events {
        editor.handle_event(event).with_context(|| format!("Event {event:?} failed"))?;
        handled += 1;
        if editor.quit_requested() {
            break;
        }
    }
    log::info!("Replayed {handled} event(s) on {}", args.file.display());

    if let Some(output) = args.output {
        let doc = editor.canvas().to_document();
        doc.save(output).with_context(|| format!("Can't write {}", output.display()))?;
    }
    if let Some(screenshot) = args.screenshot {
        let mut surface = ImageSurface::new(editor.layout().screen_size, Color::BLACK)?;
        editor.render(&mut surface);
        surface.save_png(screenshot).with_context(|| format!("Can't write {}", screenshot.display()))?;
    }
    Ok(())
}
