use bitmappy_engine::{Color, Position, Rectangle, RenderSurface, Size};

use super::{Clickable, Draggable, Paintable, WidgetResponse};
use crate::Result;

pub const SLIDER_TRACK_WIDTH: i32 = 256;
pub const SLIDER_HEIGHT: i32 = 10;

const KNOB_WIDTH: i32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }

    pub fn get(self, color: Color) -> u8 {
        match self {
            Channel::Red => color.red(),
            Channel::Green => color.green(),
            Channel::Blue => color.blue(),
        }
    }

    /// `color` with this channel replaced by `value`.
    pub fn apply(self, color: Color, value: u8) -> Color {
        match self {
            Channel::Red => color.with_red(value),
            Channel::Green => color.with_green(value),
            Channel::Blue => color.with_blue(value),
        }
    }

    /// Pure channel color, used for the track gradient.
    pub fn tint(self, value: u8) -> Color {
        self.apply(Color::BLACK, value)
    }
}

/// Horizontal 0..=255 slider for one color channel. The value is the pointer x relative to
/// the left end of the track.
pub struct ChannelSlider {
    channel: Channel,
    value: u8,
    bounds: Rectangle,
    needs_paint: bool,
}

impl ChannelSlider {
    pub fn new(channel: Channel, value: u8, origin: Position) -> Self {
        Self {
            channel,
            value,
            bounds: Rectangle::new(origin, Size::new(SLIDER_TRACK_WIDTH, SLIDER_HEIGHT)),
            needs_paint: true,
        }
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn value(&self) -> u8 {
        self.value
    }

    /// Returns `true` if the value changed.
    pub fn set_value(&mut self, value: u8) -> bool {
        if self.value == value {
            return false;
        }
        self.value = value;
        self.needs_paint = true;
        true
    }

    pub fn value_at(&self, pos: Position) -> u8 {
        (pos.x - self.bounds.left()).clamp(0, 255) as u8
    }

    fn track(&mut self, pos: Position) -> WidgetResponse {
        let value = self.value_at(pos);
        if self.set_value(value) {
            log::debug!("{:?} slider at {value}", self.channel);
            WidgetResponse::ChannelChanged(self.channel, value)
        } else {
            WidgetResponse::Handled
        }
    }
}

impl Clickable for ChannelSlider {
    fn bounds(&self) -> Rectangle {
        self.bounds
    }

    fn on_pointer_down(&mut self, pos: Position) -> Result<WidgetResponse> {
        Ok(self.track(pos))
    }
}

impl Draggable for ChannelSlider {
    fn on_pointer_drag(&mut self, pos: Position) -> Result<WidgetResponse> {
        Ok(self.track(pos))
    }
}

impl Paintable for ChannelSlider {
    fn paint(&mut self, surface: &mut dyn RenderSurface) {
        if !self.needs_paint {
            return;
        }
        let Rectangle { start, size } = self.bounds;
        surface.fill_rect(self.bounds, Color::BLACK);
        let track_y = start.y + size.height / 2 - 2;
        for x in 0..SLIDER_TRACK_WIDTH {
            surface.fill_rect(Rectangle::from(start.x + x, track_y, 1, 4), self.channel.tint(x as u8));
        }
        let knob_x = start.x + self.value as i32 - KNOB_WIDTH / 2;
        surface.fill_rect(Rectangle::from(knob_x, start.y, KNOB_WIDTH, size.height), Color::WHITE);
        self.needs_paint = false;
    }

    fn invalidate(&mut self) {
        self.needs_paint = true;
    }
}
