use crate::rect::Rect;
use crate::surface::PixelSurface;

pub type Color = [u8; 4];

pub const BLACK: Color = [0, 0, 0, 255];
pub const WHITE: Color = [255, 255, 255, 255];
pub const BLUE: Color = [0, 64, 255, 255];

// Tiny block digits (no external deps).
const GLYPH_W: u32 = 3;
const GLYPH_H: u32 = 5;
const GLYPH_PAD: u32 = 1;

/// Height in pixels of a numeral drawn by [`Canvas2d::draw_number`], padding included.
pub const SMALL_NUMERAL_HEIGHT: u32 = GLYPH_H + 2 * GLYPH_PAD;

/// Ink and paper colours for numeral labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DigitPalette {
    pub ink: Color,
    pub paper: Color,
}

impl DigitPalette {
    pub const BLACK_DIGITS: DigitPalette = DigitPalette {
        ink: BLACK,
        paper: WHITE,
    };

    pub const BLUE_DIGITS: DigitPalette = DigitPalette {
        ink: BLUE,
        paper: WHITE,
    };
}

pub fn numeral_width(value: u32) -> u32 {
    let digits = value.checked_ilog10().unwrap_or(0) + 1;
    digits * (GLYPH_W + GLYPH_PAD) + GLYPH_PAD
}

/// 2D drawing interface used by the overlay annotators.
///
/// Overlay code only talks to this trait; it does not care what owns the pixels.
pub trait Canvas2d {
    fn put_pixel(&mut self, x: i32, y: i32, color: Color);

    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// 1-pixel straight line between two points (inclusive), clipped to the canvas.
    fn draw_line(&mut self, from: (i32, i32), to: (i32, i32), color: Color) {
        let (mut x0, mut y0) = from;
        let (x1, y1) = to;
        let dx = (x1 - x0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let dy = -(y1 - y0).abs();
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.put_pixel(x0, y0, color);
            if x0 == x1 && y0 == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x0 += sx;
            }
            if e2 <= dx {
                err += dx;
                y0 += sy;
            }
        }
    }

    /// Draw `value` in decimal with its top-left corner at `(x, y)`.
    ///
    /// The numeral sits on a paper-coloured box `numeral_width(value)` wide and
    /// `SMALL_NUMERAL_HEIGHT` tall.
    fn draw_number(&mut self, value: u32, palette: DigitPalette, x: u32, y: u32) {
        self.fill_rect(
            Rect::new(x, y, numeral_width(value), SMALL_NUMERAL_HEIGHT),
            palette.paper,
        );

        let text = value.to_string();
        let mut cursor_x = x.saturating_add(GLYPH_PAD);
        let cursor_y = y.saturating_add(GLYPH_PAD);
        for ch in text.chars() {
            let rows = digit_rows(ch);
            for (row, bits) in rows.into_iter().enumerate() {
                for col in 0..GLYPH_W {
                    let mask = 1u8 << (GLYPH_W - 1 - col);
                    if (bits & mask) == 0 {
                        continue;
                    }
                    self.put_pixel(
                        (cursor_x + col) as i32,
                        (cursor_y + row as u32) as i32,
                        palette.ink,
                    );
                }
            }
            cursor_x = cursor_x.saturating_add(GLYPH_W + GLYPH_PAD);
        }
    }
}

/// CPU canvas that draws straight into a [`PixelSurface`].
pub struct CpuCanvas<'a> {
    surface: &'a mut PixelSurface,
}

impl<'a> CpuCanvas<'a> {
    pub fn new(surface: &'a mut PixelSurface) -> Self {
        Self { surface }
    }
}

impl Canvas2d for CpuCanvas<'_> {
    fn put_pixel(&mut self, x: i32, y: i32, color: Color) {
        if x < 0 || y < 0 {
            return;
        }
        self.surface.set_pixel(x as u32, y as u32, color);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.surface.fill_rect(rect, color);
    }
}

fn digit_rows(ch: char) -> [u8; GLYPH_H as usize] {
    match ch {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        _ => [0b000; GLYPH_H as usize],
    }
}
