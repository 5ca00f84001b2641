//! Mission flight-path renderer.
//!
//! `MissionPathRenderer` owns everything that outlives a single draw call:
//! the bubble registry of the last rendered path and the spline resolution.
//! A render looks up the mission's opcode program, runs each step through
//! the segment library, syncs the surface and finally registers the
//! mission with the game.

use serde::{Deserialize, Serialize};

use crate::constants::path::PAD_COUNT;
use crate::data::MissionSteps;
use crate::error::PathError;
use crate::painter::{Bubble, BubbleRegistry, Painter};
use crate::player::Player;
use crate::program::MissionProgram;
use crate::resolution::PathResolution;
use crate::surface::Surface;

/// Receives the mission a path was drawn for (pad assignment, code).
pub trait MissionRegistrar {
    fn register_mission(&mut self, player: Player, code: u8, pad: u8);
}

/// One registration, as recorded by the `Vec` registrar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissionRegistration {
    pub player: Player,
    pub code: u8,
    pub pad: u8,
}

impl MissionRegistrar for Vec<MissionRegistration> {
    fn register_mission(&mut self, player: Player, code: u8, pad: u8) {
        self.push(MissionRegistration { player, code, pad });
    }
}

/// Per-render state: the bubbles of the most recent path.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PathRenderState {
    pub bubbles: BubbleRegistry,
}

/// Draws mission flight paths and answers bubble hit-tests.
#[derive(Debug, Clone, Default)]
pub struct MissionPathRenderer {
    resolution: PathResolution,
    state: PathRenderState,
}

impl MissionPathRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolution(resolution: PathResolution) -> Self {
        Self {
            resolution,
            state: PathRenderState::default(),
        }
    }

    pub fn resolution(&self) -> PathResolution {
        self.resolution
    }

    pub fn increase_path_resolution(&mut self) {
        self.resolution.increase();
    }

    pub fn decrease_path_resolution(&mut self) {
        self.resolution.decrease();
    }

    /// Bubbles placed by the last render, in placement order.
    pub fn bubbles(&self) -> &[Bubble] {
        self.state.bubbles.as_slice()
    }

    /// Number of bubbles the last render placed.
    pub fn bubbles_drawn(&self) -> usize {
        self.state.bubbles.len()
    }

    /// Index of the first bubble whose 8×8 box contains `(x, y)`.
    pub fn hit_test_bubble(&self, x: i32, y: i32) -> Option<usize> {
        self.state.bubbles.hit_test(x, y)
    }

    /// Draw the flight path for `code` and register the mission.
    ///
    /// Returns the number of bubbles drawn. On error the bubble registry is
    /// left empty and nothing is registered.
    pub fn render_mission_path<S, R>(
        &mut self,
        player: Player,
        code: u8,
        pad: u8,
        steps: &MissionSteps,
        surface: &mut S,
        registrar: &mut R,
    ) -> Result<usize, PathError>
    where
        S: Surface,
        R: MissionRegistrar + ?Sized,
    {
        log::trace!(
            "->render_mission_path(player {:?}, code {}, pad {})",
            player,
            code,
            pad
        );
        self.state.bubbles.clear();

        if pad >= PAD_COUNT {
            return Err(PathError::InvalidPad(pad));
        }

        let program = steps.program(code).map_err(|e| {
            log::warn!("Mission {:02} has no usable flight path: {}", code, e);
            e
        })?;
        let drawn = self.render_program(&program, surface)?;

        surface.sync();
        registrar.register_mission(player, code, pad);

        log::trace!("<-render_mission_path() drew {} bubbles", drawn);
        Ok(drawn)
    }

    /// Draw an already-parsed program. Resets the bubble registry first.
    pub fn render_program<S: Surface>(
        &mut self,
        program: &MissionProgram,
        surface: &mut S,
    ) -> Result<usize, PathError> {
        self.state.bubbles.clear();

        let result = {
            let mut painter = Painter::new(surface, &mut self.state.bubbles, self.resolution);
            program.steps.iter().try_for_each(|step| {
                log::debug!(
                    "Mission {:02}: segment {} {:?}",
                    program.code,
                    step.opcode.letter(),
                    step.operands
                );
                step.opcode.draw(&step.operands, &mut painter)
            })
        };

        match result {
            Ok(()) => Ok(self.state.bubbles.len()),
            Err(e) => {
                self.state.bubbles.clear();
                Err(e)
            }
        }
    }
}
