//! Input scripts for `bitmappy replay`.
//!
//! ```text
//! # paint a short stroke, then save
//! down 10 10
//! drag 60 10
//! up 60 10
//! key s
//! ```

use anyhow::{bail, Context};
use bitmappy_edit::{EditorKey, InputEvent, Position};

pub fn parse_script(text: &str) -> anyhow::Result<Vec<InputEvent>> {
    let mut events = Vec::new();
    for (i, line) in text.lines().enumerate() {
        if let Some(event) = parse_line(line).with_context(|| format!("line {}: '{}'", i + 1, line.trim()))? {
            events.push(event);
        }
    }
    Ok(events)
}

fn parse_line(line: &str) -> anyhow::Result<Option<InputEvent>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let event = match command {
        "down" => InputEvent::PointerDown(parse_position(&args)?),
        "drag" => InputEvent::PointerDrag(parse_position(&args)?),
        "up" => InputEvent::PointerUp(parse_position(&args)?),
        "key" => {
            let [key] = args.as_slice() else {
                bail!("expected a single key");
            };
            let mut chars = key.chars();
            let (Some(ch), None) = (chars.next(), chars.next()) else {
                bail!("expected a single character key, got '{key}'");
            };
            InputEvent::Key(EditorKey::from(ch))
        }
        _ => bail!("unknown command '{command}'"),
    };
    Ok(Some(event))
}

fn parse_position(args: &[&str]) -> anyhow::Result<Position> {
    let [x, y] = args else {
        bail!("expected X Y");
    };
    let x = x.parse().with_context(|| format!("invalid x coordinate '{x}'"))?;
    let y = y.parse().with_context(|| format!("invalid y coordinate '{y}'"))?;
    Ok(Position::new(x, y))
}
