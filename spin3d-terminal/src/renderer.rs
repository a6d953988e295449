/// Half-block rasterizer that shows a pixel framebuffer in a terminal
use crossterm::{
    cursor,
    style::{Color as TermColor, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    QueueableCommand,
};
use spin3d_core::{Color, Framebuffer};
use std::io::Write;

/// Upper half block: foreground paints the top pixel, background the bottom one.
const HALF_BLOCK: char = '\u{2580}';

/// One terminal cell, holding two vertically stacked pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub top: Color,
    pub bottom: Color,
}

/// Downscales a framebuffer onto a `cols` x `rows` cell grid.
///
/// Each output pixel keeps the brightest source pixel of its block so
/// that small point stamps survive the reduction.
pub struct BlockRenderer {
    cols: usize,
    rows: usize,
}

impl BlockRenderer {
    pub fn new(cols: usize, rows: usize) -> Self {
        Self {
            cols: cols.max(1),
            rows: rows.max(1),
        }
    }

    pub fn resize(&mut self, cols: usize, rows: usize) {
        self.cols = cols.max(1);
        self.rows = rows.max(1);
    }

    /// Reduce `framebuffer` to cells, row-major.
    pub fn cells(&self, framebuffer: &Framebuffer) -> Vec<Cell> {
        let block_w = framebuffer.width().div_ceil(self.cols).max(1);
        let block_h = framebuffer.height().div_ceil(self.rows * 2).max(1);

        let mut cells = Vec::with_capacity(self.cols * self.rows);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let x = col * block_w;
                cells.push(Cell {
                    top: brightest(framebuffer, x, row * 2 * block_h, block_w, block_h),
                    bottom: brightest(framebuffer, x, (row * 2 + 1) * block_h, block_w, block_h),
                });
            }
        }
        cells
    }

    pub fn draw<W: Write>(&self, framebuffer: &Framebuffer, writer: &mut W) -> std::io::Result<()> {
        let cells = self.cells(framebuffer);
        let mut last: Option<Cell> = None;

        for (row, line) in cells.chunks(self.cols).enumerate() {
            writer.queue(cursor::MoveTo(0, row as u16))?;
            for &cell in line {
                // Only emit color changes.
                if last.map(|l| l.top) != Some(cell.top) {
                    writer.queue(SetForegroundColor(term_color(cell.top)))?;
                }
                if last.map(|l| l.bottom) != Some(cell.bottom) {
                    writer.queue(SetBackgroundColor(term_color(cell.bottom)))?;
                }
                writer.queue(Print(HALF_BLOCK))?;
                last = Some(cell);
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Brightest pixel in the block at (`x`, `y`); black when the block is off the buffer.
fn brightest(framebuffer: &Framebuffer, x: usize, y: usize, w: usize, h: usize) -> Color {
    let x_end = (x + w).min(framebuffer.width());
    let y_end = (y + h).min(framebuffer.height());

    let mut best = Color::default();
    for py in y..y_end {
        for px in x..x_end {
            if let Some(color) = framebuffer.pixel(px, py) {
                if color.luminance() > best.luminance() {
                    best = color;
                }
            }
        }
    }
    best
}

fn term_color(color: Color) -> TermColor {
    TermColor::Rgb {
        r: color.r,
        g: color.g,
        b: color.b,
    }
}
