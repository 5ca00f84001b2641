//! Seeded starfield backdrop for the mission screen.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::constants::{colors, screen};
use crate::surface::Surface;

const STAR_COLORS: [u8; 3] = [colors::STAR_DIM, colors::STAR_MID, colors::STAR_BRIGHT];

/// Scatter `count` stars over the screen.
///
/// The same seed always yields the same sky. Star colours never collide
/// with the colours the flight-path trail treats as reserved.
pub fn draw_starfield<S: Surface>(surface: &mut S, seed: u64, count: u32) {
    let mut rng = StdRng::seed_from_u64(seed);
    for _ in 0..count {
        let x = rng.gen_range(0..screen::WIDTH);
        let y = rng.gen_range(0..screen::HEIGHT);
        // Mostly dim stars, a few bright ones
        let color = match rng.gen_range(0..10) {
            0 => STAR_COLORS[2],
            1..=3 => STAR_COLORS[1],
            _ => STAR_COLORS[0],
        };
        surface.set_pixel(x, y, color);
    }
}
