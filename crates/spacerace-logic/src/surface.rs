//! Drawing surface seam and the in-memory 320×200 legacy screen.
//!
//! The flight-path code only ever talks to [`Surface`]; [`LegacySurface`]
//! is the indexed-colour framebuffer the harness and viewer render into.

use crate::constants::{colors, screen};
use crate::font;

/// Low-level 2D drawing primitives on an 8-bit indexed surface.
///
/// Coordinates outside the surface are clipped on write and read back as
/// the background colour.
pub trait Surface {
    fn get_pixel(&self, x: i32, y: i32) -> u8;
    fn set_pixel(&mut self, x: i32, y: i32, color: u8);
    /// Colour used by `line_to` and `draw_glyph`.
    fn set_foreground_color(&mut self, color: u8);
    /// Move the pen without drawing.
    fn move_to(&mut self, x: i32, y: i32);
    /// Draw from the pen to `(x, y)` inclusive and leave the pen there.
    fn line_to(&mut self, x: i32, y: i32);
    /// Fill the rectangle with inclusive corners `(x1, y1)` and `(x2, y2)`.
    fn fill_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: u8);
    /// Draw `ch` with its baseline-left corner at the pen, then advance the pen.
    fn draw_glyph(&mut self, ch: char);
    /// Push pending drawing to the display.
    fn sync(&mut self) {}
}

/// Indexed-colour framebuffer with a pen, like the game's legacy screen.
#[derive(Debug, Clone)]
pub struct LegacySurface {
    width: i32,
    height: i32,
    pixels: Vec<u8>,
    foreground: u8,
    pen: (i32, i32),
    syncs: u32,
}

impl LegacySurface {
    /// A 320×200 surface cleared to the background colour.
    pub fn new() -> Self {
        Self::with_size(screen::WIDTH, screen::HEIGHT)
    }

    pub fn with_size(width: i32, height: i32) -> Self {
        let len = width.max(0) as usize * height.max(0) as usize;
        Self {
            width,
            height,
            pixels: vec![colors::BACKGROUND; len],
            foreground: colors::FOREGROUND,
            pen: (0, 0),
            syncs: 0,
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    /// Row-major palette indices.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pen(&self) -> (i32, i32) {
        self.pen
    }

    /// How many times the surface has been synced.
    pub fn sync_count(&self) -> u32 {
        self.syncs
    }

    pub fn clear(&mut self, color: u8) {
        self.pixels.fill(color);
    }

    /// Count of pixels currently holding `color`.
    pub fn count_color(&self, color: u8) -> usize {
        self.pixels.iter().filter(|&&c| c == color).count()
    }

    /// Expand to RGBA8 through `palette`.
    pub fn to_rgba(&self, palette: &Palette) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.pixels.len() * 4);
        for &index in &self.pixels {
            let [r, g, b] = palette.rgb(index);
            out.extend_from_slice(&[r, g, b, 255]);
        }
        out
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x >= 0 && x < self.width && y >= 0 && y < self.height {
            Some((y * self.width + x) as usize)
        } else {
            None
        }
    }
}

impl Default for LegacySurface {
    fn default() -> Self {
        Self::new()
    }
}

impl Surface for LegacySurface {
    fn get_pixel(&self, x: i32, y: i32) -> u8 {
        self.index(x, y)
            .map_or(colors::BACKGROUND, |i| self.pixels[i])
    }

    fn set_pixel(&mut self, x: i32, y: i32, color: u8) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    fn set_foreground_color(&mut self, color: u8) {
        self.foreground = color;
    }

    fn move_to(&mut self, x: i32, y: i32) {
        self.pen = (x, y);
    }

    fn line_to(&mut self, x: i32, y: i32) {
        // Bresenham, all octants
        let (mut x0, mut y0) = self.pen;
        let dx = (x - x0).abs();
        let dy = -(y - y0).abs();
        let sx = if x0 < x { 1 } else { -1 };
        let sy = if y0 < y { 1 } else { -1 };
        let mut err = dx + dy;
        let color = self.foreground;

        loop {
            self.set_pixel(x0, y0, color);
            if x0 == x && y0 == y {
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

        self.pen = (x, y);
    }

    fn fill_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: u8) {
        let (left, right) = (x1.min(x2), x1.max(x2));
        let (top, bottom) = (y1.min(y2), y1.max(y2));
        for y in top..=bottom {
            for x in left..=right {
                self.set_pixel(x, y, color);
            }
        }
    }

    fn draw_glyph(&mut self, ch: char) {
        let (px, py) = self.pen;
        let top = py - (font::GLYPH_HEIGHT - 1);
        let color = self.foreground;
        for (dx, dy) in font::lit_cells(ch) {
            self.set_pixel(px + dx, top + dy, color);
        }
        self.pen = (px + font::ADVANCE, py);
    }

    fn sync(&mut self) {
        self.syncs += 1;
    }
}

/// 256-entry RGB palette for turning indexed pixels into colour.
#[derive(Debug, Clone)]
pub struct Palette {
    entries: [[u8; 3]; 256],
}

impl Palette {
    /// The handful of entries the mission screen uses; everything else black.
    pub fn legacy() -> Self {
        let mut entries = [[0u8; 3]; 256];
        entries[colors::FOREGROUND as usize] = [255, 255, 255];
        entries[colors::STAR_DIM as usize] = [72, 72, 96];
        entries[colors::STAR_MID as usize] = [128, 128, 160];
        entries[colors::STAR_BRIGHT as usize] = [200, 200, 224];
        entries[colors::PATH as usize] = [252, 196, 64];
        entries[colors::BUBBLE as usize] = [32, 96, 200];
        entries[colors::HIGHLIGHT as usize] = [240, 40, 40];
        Self { entries }
    }

    /// Build from a raw 768-byte VGA palette dump (6-bit channels).
    pub fn from_vga(raw: &[u8]) -> Option<Self> {
        if raw.len() < 768 {
            return None;
        }
        let mut entries = [[0u8; 3]; 256];
        for (entry, chunk) in entries.iter_mut().zip(raw.chunks_exact(3)) {
            *entry = [chunk[0] << 2, chunk[1] << 2, chunk[2] << 2];
        }
        Some(Self { entries })
    }

    pub fn rgb(&self, index: u8) -> [u8; 3] {
        self.entries[index as usize]
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::legacy()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_size_dimensions() {
        let s = LegacySurface::with_size(4, 3);
        assert_eq!(s.pixels().len(), 12);
        assert_eq!((s.width(), s.height()), (4, 3));
        assert!(LegacySurface::with_size(-1, 5).pixels().is_empty());
        assert!(LegacySurface::with_size(7, -2).pixels().is_empty());
    }

    #[test]
    fn test_out_of_bounds_is_clipped() {
        let mut s = LegacySurface::new();
        s.set_pixel(-1, 0, 9);
        s.set_pixel(320, 199, 9);
        assert_eq!(s.get_pixel(-1, 0), colors::BACKGROUND);
        assert_eq!(s.count_color(9), 0);
    }

    #[test]
    fn test_line_includes_endpoints_and_moves_pen() {
        let mut s = LegacySurface::new();
        s.set_foreground_color(7);
        s.move_to(10, 10);
        s.line_to(20, 15);
        assert_eq!(s.get_pixel(10, 10), 7);
        assert_eq!(s.get_pixel(20, 15), 7);
        assert_eq!(s.pen(), (20, 15));
        // One pixel per column for a shallow line
        assert_eq!(s.count_color(7), 11);
    }

    #[test]
    fn test_zero_length_line_sets_one_pixel() {
        let mut s = LegacySurface::new();
        s.set_foreground_color(7);
        s.move_to(5, 5);
        s.line_to(5, 5);
        assert_eq!(s.count_color(7), 1);
    }

    #[test]
    fn test_fill_rect_is_inclusive() {
        let mut s = LegacySurface::new();
        s.fill_rect(10, 20, 18, 24, 21);
        assert_eq!(s.count_color(21), 9 * 5);
        s.clear(0);
        s.fill_rect(18, 24, 10, 20, 21);
        assert_eq!(s.count_color(21), 9 * 5);
    }

    #[test]
    fn test_glyph_sits_above_baseline() {
        let mut s = LegacySurface::new();
        s.set_foreground_color(1);
        s.move_to(50, 54);
        s.draw_glyph('A');
        // 'A' has its apex in the middle column of the top row
        assert_eq!(s.get_pixel(51, 50), 1);
        assert_eq!(s.get_pixel(50, 50), 0);
        assert_eq!(s.get_pixel(50, 54), 1);
        assert_eq!(s.pen(), (54, 54));
    }

    #[test]
    fn test_sync_counts() {
        let mut s = LegacySurface::new();
        s.sync();
        s.sync();
        assert_eq!(s.sync_count(), 2);
    }

    #[test]
    fn test_rgba_expansion() {
        let mut s = LegacySurface::with_size(2, 1);
        s.set_pixel(1, 0, colors::FOREGROUND);
        let rgba = s.to_rgba(&Palette::legacy());
        assert_eq!(rgba, vec![0, 0, 0, 255, 255, 255, 255, 255]);
    }

    #[test]
    fn test_vga_palette_scaling() {
        let mut raw = vec![0u8; 768];
        raw[3] = 63;
        let pal = Palette::from_vga(&raw).unwrap();
        assert_eq!(pal.rgb(1), [252, 0, 0]);
        assert!(Palette::from_vga(&raw[..10]).is_none());
    }
}
