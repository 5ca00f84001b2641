//! Trail rasterizer and bubble painter.
//!
//! `Painter` walks spline samples onto a [`Surface`], leaving gaps where a
//! sample lands on a bubble, and stamps labelled bubbles into the
//! [`BubbleRegistry`] used later for hit-testing.

use serde::{Deserialize, Serialize};

use crate::constants::{colors, path::BUBBLE_HIT_SIZE};
use crate::error::PathError;
use crate::resolution::PathResolution;
use crate::spline::{self, Point};
use crate::surface::Surface;

/// A labelled marker on the flight path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bubble {
    /// Placement order within the current render; the label is `'A' + index`.
    pub index: usize,
    /// Top-left corner of the painted box.
    pub x: i32,
    pub y: i32,
}

impl Bubble {
    pub fn label(&self) -> char {
        char::from_u32('A' as u32 + self.index as u32).unwrap_or('?')
    }

    /// Whether `(x, y)` falls in the inclusive 8×8 box at the bubble's corner.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && x <= self.x + BUBBLE_HIT_SIZE - 1
            && y >= self.y
            && y <= self.y + BUBBLE_HIT_SIZE - 1
    }
}

/// Ordered bubbles placed during one flight-path render.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BubbleRegistry {
    bubbles: Vec<Bubble>,
}

impl BubbleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.bubbles.clear();
    }

    pub fn len(&self) -> usize {
        self.bubbles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bubbles.is_empty()
    }

    /// Index the next bubble will get.
    pub fn next_index(&self) -> usize {
        self.bubbles.len()
    }

    /// Record a bubble at top-left `(x, y)` and return it.
    pub fn push(&mut self, x: i32, y: i32) -> Bubble {
        let bubble = Bubble {
            index: self.next_index(),
            x,
            y,
        };
        self.bubbles.push(bubble);
        bubble
    }

    pub fn as_slice(&self) -> &[Bubble] {
        &self.bubbles
    }

    /// First bubble, in placement order, whose box contains `(x, y)`.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<usize> {
        self.bubbles
            .iter()
            .find(|b| b.contains(x, y))
            .map(|b| b.index)
    }
}

/// Whether a trail may draw over a pixel of this colour.
#[inline]
fn is_reserved(color: u8) -> bool {
    color == colors::FOREGROUND || color == colors::BUBBLE
}

/// Draws trails and bubbles for one render pass.
pub struct Painter<'a, S: Surface> {
    surface: &'a mut S,
    bubbles: &'a mut BubbleRegistry,
    resolution: PathResolution,
}

impl<'a, S: Surface> Painter<'a, S> {
    pub fn new(
        surface: &'a mut S,
        bubbles: &'a mut BubbleRegistry,
        resolution: PathResolution,
    ) -> Self {
        Self {
            surface,
            bubbles,
            resolution,
        }
    }

    /// Draw the spline through `points` in the path colour.
    ///
    /// Samples landing on a bubble or label pixel are skipped. Every drawn
    /// sample outside the final window is flashed in the highlight colour
    /// until the next sample.
    pub fn trail(&mut self, points: &[Point]) -> Result<(), PathError> {
        let samples = spline::samples(points, self.resolution)?;
        self.surface.set_foreground_color(colors::PATH);

        let mut prev = points[0];
        let mut highlight: Option<Point> = None;

        for sample in samples {
            let Point { x, y } = sample.point;
            let under = self.surface.get_pixel(x, y);

            if let Some(h) = highlight.take() {
                self.surface.set_pixel(h.x, h.y, colors::PATH);
            }

            if !is_reserved(under) {
                self.surface.move_to(prev.x, prev.y);
                self.surface.line_to(x, y);

                if !sample.last_window {
                    self.surface.set_pixel(x, y, colors::HIGHLIGHT);
                    highlight = Some(sample.point);
                }
            }

            prev = sample.point;
        }

        Ok(())
    }

    /// Stamp the next lettered bubble with its anchor at `at`.
    pub fn bubble(&mut self, at: Point) -> Bubble {
        let (x1, y1) = (at.x - 2, at.y);
        let (x2, y2) = (at.x - 1, at.y - 1);
        self.surface
            .fill_rect(x1, y1, x1 + 8, y1 + 4, colors::BUBBLE);
        self.surface
            .fill_rect(x2, y2, x2 + 6, y2 + 6, colors::BUBBLE);

        self.surface.set_foreground_color(colors::FOREGROUND);
        self.surface.move_to(at.x, at.y + 4);
        let bubble = self.bubbles.push(x1, y1);
        self.surface.draw_glyph(bubble.label());
        bubble
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::LegacySurface;

    fn painter<'a>(
        surface: &'a mut LegacySurface,
        bubbles: &'a mut BubbleRegistry,
    ) -> Painter<'a, LegacySurface> {
        Painter::new(surface, bubbles, PathResolution::default())
    }

    #[test]
    fn test_bubble_footprint() {
        let mut surface = LegacySurface::new();
        let mut bubbles = BubbleRegistry::new();
        let b = painter(&mut surface, &mut bubbles).bubble(Point::new(100, 100));

        assert_eq!(b, Bubble { index: 0, x: 98, y: 100 });
        // Wide bar corners
        assert_eq!(surface.get_pixel(98, 100), colors::BUBBLE);
        assert_eq!(surface.get_pixel(106, 104), colors::BUBBLE);
        // Tall bar corners
        assert_eq!(surface.get_pixel(99, 99), colors::BUBBLE);
        assert_eq!(surface.get_pixel(105, 105), colors::BUBBLE);
        // Rounded-off corner stays clear
        assert_eq!(surface.get_pixel(98, 99), colors::BACKGROUND);
        // 'A' apex drawn in the label colour
        assert_eq!(surface.get_pixel(101, 100), colors::FOREGROUND);
        let painted = surface.count_color(colors::BUBBLE) + surface.count_color(colors::FOREGROUND);
        assert_eq!(painted, 9 * 5 + 7 * 7 - 7 * 5);
    }

    #[test]
    fn test_bubble_indices_increase() {
        let mut surface = LegacySurface::new();
        let mut bubbles = BubbleRegistry::new();
        let mut p = painter(&mut surface, &mut bubbles);
        let labels: Vec<char> = (0..4)
            .map(|i| p.bubble(Point::new(20 + i * 20, 50)).label())
            .collect();
        assert_eq!(labels, vec!['A', 'B', 'C', 'D']);
        assert_eq!(bubbles.len(), 4);
    }

    #[test]
    fn test_trail_draws_path_and_no_lingering_highlight() {
        let mut surface = LegacySurface::new();
        let mut bubbles = BubbleRegistry::new();
        painter(&mut surface, &mut bubbles)
            .trail(&[
                Point::new(20, 20),
                Point::new(60, 40),
                Point::new(100, 20),
            ])
            .unwrap();

        assert!(surface.count_color(colors::PATH) > 40);
        assert_eq!(surface.count_color(colors::HIGHLIGHT), 0);
        assert_eq!(surface.get_pixel(20, 20), colors::PATH);
    }

    #[test]
    fn test_sample_on_bubble_draws_nothing() {
        // One window, one step: the only sample is (10, 0)
        let points = [Point::new(0, 0), Point::new(60, 0)];

        let mut surface = LegacySurface::new();
        let mut bubbles = BubbleRegistry::new();
        Painter::new(&mut surface, &mut bubbles, PathResolution::new(1))
            .trail(&points)
            .unwrap();
        assert_eq!(surface.count_color(colors::PATH), 11);

        let mut surface = LegacySurface::new();
        let mut bubbles = BubbleRegistry::new();
        let mut p = Painter::new(&mut surface, &mut bubbles, PathResolution::new(1));
        p.bubble(Point::new(10, 1));
        p.trail(&points).unwrap();
        assert_eq!(surface.count_color(colors::PATH), 0);
    }

    #[test]
    fn test_cursor_advances_past_skipped_sample() {
        // Samples at (10, 0) and (30, 0); the first is on a bubble
        let points = [Point::new(0, 0), Point::new(60, 0)];
        let mut surface = LegacySurface::new();
        let mut bubbles = BubbleRegistry::new();
        let mut p = Painter::new(&mut surface, &mut bubbles, PathResolution::new(2));
        p.bubble(Point::new(10, 1));
        p.trail(&points).unwrap();

        // The gap before the bubble stays open
        for x in 0..9 {
            assert_eq!(surface.get_pixel(x, 0), colors::BACKGROUND, "x={}", x);
        }
        assert_eq!(surface.get_pixel(25, 0), colors::PATH);
    }

    #[test]
    fn test_sample_on_label_pixel_draws_nothing() {
        // One window, one step: the only sample is (10, 0)
        let points = [Point::new(0, 0), Point::new(60, 0)];
        let mut surface = LegacySurface::new();
        surface.set_pixel(10, 0, colors::FOREGROUND);
        let mut bubbles = BubbleRegistry::new();
        Painter::new(&mut surface, &mut bubbles, PathResolution::new(1))
            .trail(&points)
            .unwrap();

        assert_eq!(surface.count_color(colors::PATH), 0);
        assert_eq!(surface.get_pixel(10, 0), colors::FOREGROUND);
    }

    /// Legacy screen that logs direct `set_pixel` calls.
    #[derive(Default)]
    struct PixelLog {
        inner: LegacySurface,
        pixels: Vec<(i32, i32, u8)>,
    }

    impl Surface for PixelLog {
        fn get_pixel(&self, x: i32, y: i32) -> u8 {
            self.inner.get_pixel(x, y)
        }

        fn set_pixel(&mut self, x: i32, y: i32, color: u8) {
            self.pixels.push((x, y, color));
            self.inner.set_pixel(x, y, color);
        }

        fn set_foreground_color(&mut self, color: u8) {
            self.inner.set_foreground_color(color);
        }

        fn move_to(&mut self, x: i32, y: i32) {
            self.inner.move_to(x, y);
        }

        fn line_to(&mut self, x: i32, y: i32) {
            self.inner.line_to(x, y);
        }

        fn fill_rect(&mut self, x1: i32, y1: i32, x2: i32, y2: i32, color: u8) {
            self.inner.fill_rect(x1, y1, x2, y2, color);
        }

        fn draw_glyph(&mut self, ch: char) {
            self.inner.draw_glyph(ch);
        }
    }

    #[test]
    fn test_highlight_only_outside_final_window() {
        let points = [Point::new(20, 20), Point::new(60, 40), Point::new(100, 20)];
        let resolution = PathResolution::new(4);
        let mut surface = PixelLog::default();
        let mut bubbles = BubbleRegistry::new();
        Painter::new(&mut surface, &mut bubbles, resolution)
            .trail(&points)
            .unwrap();

        let first_window: Vec<Point> = spline::samples(&points, resolution)
            .unwrap()
            .filter(|s| !s.last_window)
            .map(|s| s.point)
            .collect();
        assert_eq!(first_window.len(), 4);

        // Each highlight is put back to the path colour by the next sample
        let expected: Vec<(i32, i32, u8)> = first_window
            .iter()
            .flat_map(|p| [(p.x, p.y, colors::HIGHLIGHT), (p.x, p.y, colors::PATH)])
            .collect();
        assert_eq!(surface.pixels, expected);
        assert_eq!(
            first_window,
            vec![
                Point::new(26, 23),
                Point::new(32, 26),
                Point::new(40, 29),
                Point::new(50, 32)
            ]
        );
    }

    #[test]
    fn test_trail_rejects_single_point() {
        let mut surface = LegacySurface::new();
        let mut bubbles = BubbleRegistry::new();
        let err = painter(&mut surface, &mut bubbles)
            .trail(&[Point::new(1, 1)])
            .unwrap_err();
        assert!(matches!(err, PathError::ControlPoints(1)));
    }

    #[test]
    fn test_hit_test_first_match_wins() {
        let mut reg = BubbleRegistry::new();
        reg.push(10, 10);
        reg.push(14, 14);

        assert_eq!(reg.hit_test(10, 10), Some(0));
        assert_eq!(reg.hit_test(17, 17), Some(0)); // overlap
        assert_eq!(reg.hit_test(18, 18), Some(1));
        assert_eq!(reg.hit_test(21, 21), Some(1));
        assert_eq!(reg.hit_test(22, 21), None);
        assert_eq!(reg.hit_test(9, 10), None);
    }
}
