use crate::config::Rgb;
use crate::rect::Rect;
use serde::{Deserialize, Serialize};

/// Platform record as written in level files: size first, then position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlatformData {
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
}

/// An immovable rectangular obstacle.
///
/// Floors and elevated platforms are both surfaces; they only differ in size
/// and placement. A surface never moves once its level is built.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    rect: Rect,
    color: Rgb,
}

impl Surface {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Surface {
            rect: Rect::new(x, y, width, height),
            color: Rgb::GREEN,
        }
    }

    pub fn with_color(mut self, color: Rgb) -> Self {
        self.color = color;
        self
    }

    pub fn bounds(&self) -> &Rect {
        &self.rect
    }

    pub fn color(&self) -> Rgb {
        self.color
    }
}

impl From<PlatformData> for Surface {
    fn from(data: PlatformData) -> Self {
        Surface::new(data.x, data.y, data.width, data.height)
    }
}
