//! Game constants: screen geometry, palette indices, path limits.
//!
//! These are plain numeric constants with no engine dependency.
//! Both the native simtest and the Bevy viewer use these.

/// Legacy screen geometry (the 320×200 indexed "legacy screen").
pub mod screen {
    pub const WIDTH: i32 = 320;
    pub const HEIGHT: i32 = 200;
}

/// Palette indices the flight-path renderer reads and writes.
pub mod colors {
    pub const BACKGROUND: u8 = 0;
    /// Bubble labels. Also reserved: trails never draw over it.
    pub const FOREGROUND: u8 = 1;
    /// Flight path trail.
    pub const PATH: u8 = 5;
    /// Bubble body. Reserved like `FOREGROUND`.
    pub const BUBBLE: u8 = 21;
    /// One-sample highlight trailing the trail cursor.
    pub const HIGHLIGHT: u8 = 40;
    // Starfield
    pub const STAR_DIM: u8 = 2;
    pub const STAR_MID: u8 = 3;
    pub const STAR_BRIGHT: u8 = 4;
}

/// Flight-path limits.
pub mod path {
    /// Minimum spline subdivision count.
    pub const MIN_RESOLUTION: u16 = 1;
    /// Maximum spline subdivision count.
    pub const MAX_RESOLUTION: u16 = 500;
    /// Subdivision count a fresh renderer starts with.
    pub const DEFAULT_RESOLUTION: u16 = 15;
    /// Fewest control points a single spline call accepts.
    pub const MIN_CONTROL_POINTS: usize = 2;
    /// Most control points a single spline call accepts.
    pub const MAX_CONTROL_POINTS: usize = 18;
    /// Side of the square hit box anchored at a bubble's top-left corner.
    pub const BUBBLE_HIT_SIZE: i32 = 8;
    /// Opcode that ends every mission record.
    pub const TERMINATOR: char = 'Z';
    /// Launch pads are numbered 0..PAD_COUNT.
    pub const PAD_COUNT: u8 = 3;
}

/// Crew bookkeeping.
pub mod crew {
    /// `special` code marking an astronaut whose crew was broken up.
    pub const SPECIAL_CREW_BROKEN: u8 = 6;
    /// Compatibility scores wrap around this modulus.
    pub const COMPAT_WRAP: i16 = 10;
}

/// Voice clips.
pub mod audio {
    pub const VOICE_CHANNELS: u32 = 1;
    pub const VOICE_RATE_HZ: u32 = 11_025;
}
