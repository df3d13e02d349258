// SPDX-License-Identifier: GPL-3.0-only

//! Overlay primitives and rasterization
//!
//! Viewers compute overlays per tracked subject (possibly in parallel),
//! then [`DisplayImage::apply`] burns the shapes into the image in one
//! sequential pass. Text labels are kept alongside the pixels and rendered
//! by the display surface at their mapped position.

use image::{Rgb, RgbImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_hollow_circle_mut};

/// An integer pixel position known to lie inside the image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelPos {
    pub x: u32,
    pub y: u32,
}

impl PixelPos {
    /// Truncate a projected position to whole pixels
    ///
    /// Returns `None` unless the position lies in `[0, width) x [0, height)`.
    pub fn from_projected(x: f32, y: f32, width: u32, height: u32) -> Option<Self> {
        if !x.is_finite() || !y.is_finite() || x < 0.0 || y < 0.0 {
            return None;
        }
        let (px, py) = (x as u32, y as u32);
        (px < width && py < height).then_some(Self { x: px, y: py })
    }

    /// Integer position given in image coordinates, `None` outside the image
    pub fn checked(x: i32, y: i32, width: u32, height: u32) -> Option<Self> {
        let px = u32::try_from(x).ok()?;
        let py = u32::try_from(y).ok()?;
        (px < width && py < height).then_some(Self { x: px, y: py })
    }

    fn as_center(self) -> (i32, i32) {
        (self.x as i32, self.y as i32)
    }
}

/// Circle stroke style
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    Filled,
    /// Ring of the given thickness in pixels, centered on the radius
    Outline(i32),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextLabel {
    pub origin: PixelPos,
    pub text: String,
    pub color: Rgb<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Circle {
        center: PixelPos,
        radius: i32,
        stroke: Stroke,
        color: Rgb<u8>,
    },
    Label(TextLabel),
}

/// The image shown for one tick: depth gray with overlay shapes burned in,
/// plus the text labels to render on top
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayImage {
    pub pixels: RgbImage,
    pub labels: Vec<TextLabel>,
}

impl DisplayImage {
    pub fn new(pixels: RgbImage) -> Self {
        Self {
            pixels,
            labels: Vec::new(),
        }
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Burn overlays into the image in order
    pub fn apply<I>(&mut self, overlays: I)
    where
        I: IntoIterator<Item = Overlay>,
    {
        for overlay in overlays {
            match overlay {
                Overlay::Circle {
                    center,
                    radius,
                    stroke,
                    color,
                } => self.draw_circle(center, radius, stroke, color),
                Overlay::Label(label) => {
                    if label.origin.x < self.width() && label.origin.y < self.height() {
                        self.labels.push(label);
                    }
                }
            }
        }
    }

    fn draw_circle(&mut self, center: PixelPos, radius: i32, stroke: Stroke, color: Rgb<u8>) {
        if center.x >= self.width() || center.y >= self.height() {
            return;
        }
        match stroke {
            Stroke::Filled => {
                draw_filled_circle_mut(&mut self.pixels, center.as_center(), radius, color)
            }
            Stroke::Outline(thickness) => {
                let inner = (radius - thickness / 2).max(0);
                for r in inner..inner + thickness.max(1) {
                    draw_hollow_circle_mut(&mut self.pixels, center.as_center(), r, color);
                }
            }
        }
    }
}
