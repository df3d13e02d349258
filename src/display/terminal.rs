// SPDX-License-Identifier: GPL-3.0-only

//! Terminal window
//!
//! Renders the display image to the terminal using Unicode half-block
//! characters for improved vertical resolution. Text labels are written as
//! terminal text at the cell their origin pixel maps to.

use super::Window;
use crate::errors::AppResult;
use crate::pipeline::DisplayImage;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use image::RgbImage;
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};
use std::io::{self, Stdout, stdout};
use std::time::Duration;
use tracing::{debug, warn};

/// Full-screen terminal window in raw mode on the alternate screen
///
/// The terminal is restored by [`Window::destroy`], or on drop if the
/// viewer bails out early.
pub struct TerminalWindow {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    restored: bool,
}

impl TerminalWindow {
    pub fn open() -> AppResult<Self> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let terminal = Terminal::new(CrosstermBackend::new(stdout))?;
        debug!("Terminal window opened");

        Ok(Self {
            terminal,
            restored: false,
        })
    }

    fn restore(&mut self) -> io::Result<()> {
        if self.restored {
            return Ok(());
        }
        self.restored = true;
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()
    }
}

impl Window for TerminalWindow {
    fn show(&mut self, title: &str, image: &DisplayImage) -> AppResult<()> {
        self.terminal.draw(|f| {
            let area = f.area();

            // Reserve bottom line for the title bar
            let image_area = Rect {
                x: area.x,
                y: area.y,
                width: area.width,
                height: area.height.saturating_sub(1),
            };
            f.render_widget(ImageWidget { image }, image_area);

            let status_area = Rect {
                x: area.x,
                y: area.y + area.height.saturating_sub(1),
                width: area.width,
                height: 1,
            };
            let message = format!("{} | 'q' quit", title);
            f.render_widget(StatusBar { message: &message }, status_area);
        })?;
        Ok(())
    }

    /// Ctrl-modified keys are ignored. Raw mode swallows Ctrl+C, so the
    /// quit key is the only way out of the loop.
    fn wait_key(&mut self, timeout: Duration) -> AppResult<Option<char>> {
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && !key.modifiers.contains(KeyModifiers::CONTROL)
            && let KeyCode::Char(c) = key.code
        {
            return Ok(Some(c));
        }
        Ok(None)
    }

    fn destroy(&mut self) -> AppResult<()> {
        self.restore()?;
        debug!("Terminal window closed");
        Ok(())
    }
}

impl Drop for TerminalWindow {
    fn drop(&mut self) {
        if let Err(e) = self.restore() {
            warn!(error = %e, "Failed to restore terminal");
        }
    }
}

/// Where the image lands inside a widget area
#[derive(Debug, Clone, Copy, PartialEq)]
struct Placement {
    x_offset: u16,
    y_offset: u16,
    /// Size in cells; each cell row covers two pixel rows
    width: u16,
    height: u16,
    /// Source pixels per cell column
    x_scale: f64,
    /// Source pixels per half-cell row
    y_scale: f64,
}

impl Placement {
    /// Fit the image into `area`, keeping its aspect ratio, centered
    fn fit(image_width: u32, image_height: u32, area: Rect) -> Option<Self> {
        if image_width == 0 || image_height == 0 || area.width == 0 || area.height == 0 {
            return None;
        }

        let aspect = image_width as f64 / image_height as f64;
        let term_width = area.width as f64;
        let term_height = (area.height as f64) * 2.0;

        let (width, height) = if term_width / term_height > aspect {
            // Terminal is wider - fit to height
            let w = term_height * aspect;
            (w as u16, (term_height / 2.0) as u16)
        } else {
            // Terminal is taller - fit to width
            let h = term_width / aspect;
            (term_width as u16, (h / 2.0) as u16)
        };
        if width == 0 || height == 0 {
            return None;
        }

        Some(Self {
            x_offset: area.x + area.width.saturating_sub(width) / 2,
            y_offset: area.y + area.height.saturating_sub(height) / 2,
            width,
            height,
            x_scale: image_width as f64 / width as f64,
            y_scale: image_height as f64 / (height as f64 * 2.0),
        })
    }

    /// Terminal cell showing pixel (x, y)
    fn cell_of(&self, x: u32, y: u32) -> (u16, u16) {
        let column = (x as f64 / self.x_scale) as u16;
        let row = (y as f64 / (self.y_scale * 2.0)) as u16;
        (
            self.x_offset + column.min(self.width - 1),
            self.y_offset + row.min(self.height - 1),
        )
    }
}

struct ImageWidget<'a> {
    image: &'a DisplayImage,
}

impl Widget for ImageWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let pixels = &self.image.pixels;
        let Some(placement) = Placement::fit(pixels.width(), pixels.height(), area) else {
            return;
        };

        // Each terminal cell represents 2 vertical pixels:
        // upper half (▀) colored with fg, lower half with bg
        for ty in 0..placement.height {
            for tx in 0..placement.width {
                let src_x = (tx as f64 * placement.x_scale) as u32;
                let src_y_top = (ty as f64 * 2.0 * placement.y_scale) as u32;
                let src_y_bottom = ((ty as f64 * 2.0 + 1.0) * placement.y_scale) as u32;

                if let Some(cell) =
                    buf.cell_mut((placement.x_offset + tx, placement.y_offset + ty))
                {
                    cell.set_char('▀');
                    cell.set_fg(sample_pixel(pixels, src_x, src_y_top));
                    cell.set_bg(sample_pixel(pixels, src_x, src_y_bottom));
                }
            }
        }

        let right_edge = placement.x_offset + placement.width;
        for label in &self.image.labels {
            let (x, y) = placement.cell_of(label.origin.x, label.origin.y);
            let [r, g, b] = label.color.0;
            buf.set_stringn(
                x,
                y,
                &label.text,
                right_edge.saturating_sub(x) as usize,
                Style::default().fg(Color::Rgb(r, g, b)),
            );
        }
    }
}

fn sample_pixel(image: &RgbImage, x: u32, y: u32) -> Color {
    let x = x.min(image.width() - 1);
    let y = y.min(image.height() - 1);
    let [r, g, b] = image.get_pixel(x, y).0;
    Color::Rgb(r, g, b)
}

/// Status bar widget
struct StatusBar<'a> {
    message: &'a str,
}

impl Widget for StatusBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = Style::default().fg(Color::White).bg(Color::DarkGray);
        for x in area.x..area.x + area.width {
            if let Some(cell) = buf.cell_mut((x, area.y)) {
                cell.set_char(' ');
                cell.set_bg(Color::DarkGray);
            }
        }
        buf.set_stringn(area.x, area.y, self.message, area.width as usize, style);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{PixelPos, TextLabel};
    use image::Rgb;

    #[test]
    fn test_placement_fits_width_in_tall_area() {
        let area = Rect::new(0, 0, 64, 100);
        let placement = Placement::fit(640, 480, area).unwrap();
        assert_eq!(placement.width, 64);
        assert_eq!(placement.height, 24);
        assert_eq!(placement.x_offset, 0);
        assert_eq!(placement.y_offset, 38);
    }

    #[test]
    fn test_placement_maps_corners_inside() {
        let area = Rect::new(0, 0, 80, 24);
        let placement = Placement::fit(640, 480, area).unwrap();
        let (x, y) = placement.cell_of(639, 479);
        assert!(x < placement.x_offset + placement.width);
        assert!(y < placement.y_offset + placement.height);
        assert_eq!(placement.cell_of(0, 0), (placement.x_offset, placement.y_offset));
    }

    #[test]
    fn test_image_widget_draws_labels_as_text() {
        let mut image = DisplayImage::new(RgbImage::from_pixel(64, 48, Rgb([255, 255, 255])));
        image.labels.push(TextLabel {
            origin: PixelPos { x: 0, y: 0 },
            text: "Psi".to_string(),
            color: Rgb([0, 0, 255]),
        });

        let area = Rect::new(0, 0, 64, 24);
        let mut buf = Buffer::empty(area);
        ImageWidget { image: &image }.render(area, &mut buf);

        let placement = Placement::fit(64, 48, area).unwrap();
        let (x, y) = placement.cell_of(0, 0);
        assert_eq!(buf[(x, y)].symbol(), "P");
        assert_eq!(buf[(x + 1, y)].symbol(), "s");
        assert_eq!(buf[(x + 3, y)].symbol(), "▀");
    }
}
