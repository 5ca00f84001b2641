//! Pure game logic for the space-race mission screens.
//!
//! This crate contains everything that is independent of a window or
//! engine: the mission flight-path interpreter and its rasterizer, crew
//! bookkeeping and the legacy asset decoders. Drawing goes through the
//! [`surface::Surface`] trait, so the same code feeds the headless
//! simtest and the Bevy viewer.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`audio`] | Voice clip naming, mono 11025 Hz buffer loading and queueing |
//! | [`config`] | Renderer configuration (JSON) and validation |
//! | [`constants`] | Screen size, palette indices, path and crew limits |
//! | [`crew`] | Astronaut compatibility, crew availability, crew breaking |
//! | [`data`] | Data-file layout and `missSteps.json` mission records |
//! | [`error`] | Flight-path error type |
//! | [`font`] | 3×5 glyphs for bubble labels |
//! | [`painter`] | Trail rasterizer, bubble stamping, bubble registry |
//! | [`player`] | USA / Soviet side |
//! | [`program`] | Opcode record parser (`"07D01E101Z"`) |
//! | [`renderer`] | Path-resolution controller and mission render entry point |
//! | [`resolution`] | Clamped spline subdivision count |
//! | [`rle`] | Signed-count RLE and PCX run decoders |
//! | [`segments`] | Segment library A–W: control points and bubble rules |
//! | [`spline`] | Clamped uniform cubic B-spline sampling |
//! | [`starfield`] | Seeded starfield backdrop |
//! | [`surface`] | Drawing seam and the 320×200 indexed framebuffer |

pub mod audio;
pub mod config;
pub mod constants;
pub mod crew;
pub mod data;
pub mod error;
pub mod font;
pub mod painter;
pub mod player;
pub mod program;
pub mod renderer;
pub mod resolution;
pub mod rle;
pub mod segments;
pub mod spline;
pub mod starfield;
pub mod surface;
