//! Terminal backend: rasterizes draw calls into a character grid
//!
//! The play field is scaled onto however many rows and columns the terminal
//! has. Frames are composed in memory and written out in one go on
//! `present`, so a frame is never half drawn.

use std::io::{self, Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Attribute, Color, Print},
};
use glam::Vec2;

use super::{Anchor, Rgb, Sprite, Surface, TextSize, TextStyle, colors};
use crate::sim::Rect;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    ch: char,
    fg: Rgb,
    bg: Rgb,
    bold: bool,
}

impl Cell {
    const fn blank(bg: Rgb) -> Self {
        Self {
            ch: ' ',
            fg: colors::TEXT,
            bg,
            bold: false,
        }
    }
}

/// A [`Surface`] that draws into a terminal through crossterm
pub struct TerminalSurface<W: Write> {
    out: W,
    cols: u16,
    rows: u16,
    /// Play-field size the draw calls are expressed in
    field: Vec2,
    cells: Vec<Cell>,
}

impl<W: Write> TerminalSurface<W> {
    pub fn new(out: W, cols: u16, rows: u16, field: Vec2) -> Self {
        Self {
            out,
            cols,
            rows,
            field,
            cells: vec![Cell::blank(colors::BACKGROUND); cols as usize * rows as usize],
        }
    }

    /// Follow a terminal resize; takes effect on the next `clear`
    pub fn resize(&mut self, cols: u16, rows: u16) {
        if (cols, rows) != (self.cols, self.rows) {
            log::debug!("Terminal resized to {cols}x{rows}");
            self.cols = cols;
            self.rows = rows;
            let len = usize::from(cols) * usize::from(rows);
            self.cells = vec![Cell::blank(colors::BACKGROUND); len];
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Characters of one row of the composed frame
    pub fn row_text(&self, row: u16) -> String {
        let start = row as usize * self.cols as usize;
        self.cells[start..start + self.cols as usize]
            .iter()
            .map(|c| c.ch)
            .collect()
    }

    fn scale(&self) -> Vec2 {
        Vec2::new(
            f32::from(self.cols) / self.field.x,
            f32::from(self.rows) / self.field.y,
        )
    }

    fn cell_mut(&mut self, col: i32, row: i32) -> Option<&mut Cell> {
        if col < 0 || row < 0 || col >= i32::from(self.cols) || row >= i32::from(self.rows) {
            return None;
        }
        self.cells
            .get_mut(row as usize * self.cols as usize + col as usize)
    }
}

/// Character used to fill a sprite's cells
fn glyph(sprite: Sprite) -> char {
    match sprite {
        Sprite::Player => '@',
        Sprite::Coin => 'o',
        Sprite::Monster => 'M',
        Sprite::Door => '#',
    }
}

/// Mix `fg` over `bg` with the given alpha
fn blend(fg: Rgb, bg: Rgb, alpha: u8) -> Rgb {
    let a = u16::from(alpha);
    let mix = |f: u8, b: u8| ((u16::from(f) * a + u16::from(b) * (255 - a)) / 255) as u8;
    [mix(fg[0], bg[0]), mix(fg[1], bg[1]), mix(fg[2], bg[2])]
}

fn to_color([r, g, b]: Rgb) -> Color {
    Color::Rgb { r, g, b }
}

impl<W: Write> Surface for TerminalSurface<W> {
    type Error = io::Error;

    fn clear(&mut self, color: Rgb) {
        self.cells.fill(Cell::blank(color));
    }

    fn draw_sprite(&mut self, sprite: Sprite, rect: Rect, alpha: u8) {
        if alpha == 0 {
            return;
        }
        let scale = self.scale();
        let col0 = (rect.left() * scale.x).floor() as i32;
        let col1 = ((rect.right() * scale.x).ceil() as i32).max(col0 + 1);
        let row0 = (rect.top() * scale.y).floor() as i32;
        let row1 = ((rect.bottom() * scale.y).ceil() as i32).max(row0 + 1);

        let ch = glyph(sprite);
        for row in row0..row1 {
            for col in col0..col1 {
                if let Some(cell) = self.cell_mut(col, row) {
                    cell.ch = ch;
                    cell.fg = blend(sprite.color(), cell.bg, alpha);
                    cell.bold = false;
                }
            }
        }
    }

    fn draw_text(&mut self, text: &str, pos: Vec2, style: TextStyle) {
        let scale = self.scale();
        let len = text.chars().count() as i32;
        let mut col = (pos.x * scale.x).round() as i32;
        if style.anchor == Anchor::Centre {
            col -= len / 2;
        }
        let row = (pos.y * scale.y).round() as i32;
        let bold = style.size == TextSize::Large;

        for ch in text.chars() {
            if let Some(cell) = self.cell_mut(col, row) {
                cell.ch = ch;
                cell.fg = style.color;
                cell.bold = bold;
            }
            col += 1;
        }
    }

    fn present(&mut self) -> io::Result<()> {
        let mut current: Option<(Rgb, Rgb, bool)> = None;
        for row in 0..self.rows {
            self.out.queue(cursor::MoveTo(0, row))?;
            let start = row as usize * self.cols as usize;
            for cell in &self.cells[start..start + self.cols as usize] {
                let look = (cell.fg, cell.bg, cell.bold);
                if current != Some(look) {
                    self.out.queue(style::SetAttribute(Attribute::Reset))?;
                    if cell.bold {
                        self.out.queue(style::SetAttribute(Attribute::Bold))?;
                    }
                    self.out.queue(style::SetForegroundColor(to_color(cell.fg)))?;
                    self.out.queue(style::SetBackgroundColor(to_color(cell.bg)))?;
                    current = Some(look);
                }
                self.out.queue(Print(cell.ch))?;
            }
        }
        self.out.queue(style::ResetColor)?;
        self.out.flush()
    }
}
