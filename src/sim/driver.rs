//! Fixed timestep frame driver
//!
//! Measured frame time goes into an accumulator that is drained in whole
//! fixed steps, capped per frame to prevent a spiral of death. One render
//! follows the steps.

use crate::consts::{MAX_FRAME_TIME, MAX_SUBSTEPS, SIM_DT};
use crate::renderer::Canvas;

/// Something that advances in fixed steps and draws itself
pub trait Simulation {
    /// Advance by `dt` seconds
    fn step(&mut self, dt: f32);
    /// Emit the current frame to a drawing collaborator
    fn render(&self, canvas: &mut dyn Canvas);
}

/// Accumulator that converts frame time into fixed steps
#[derive(Debug, Clone)]
pub struct FixedStep {
    pub dt: f32,
    pub max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(dt: f32, max_substeps: u32) -> Self {
        Self {
            dt,
            max_substeps,
            accumulator: 0.0,
        }
    }

    /// Leftover time not yet consumed by a step
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Feed a frame's elapsed time, returning how many fixed steps to run
    pub fn advance(&mut self, frame_time: f32) -> u32 {
        self.accumulator += frame_time.clamp(0.0, MAX_FRAME_TIME);

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            self.accumulator -= self.dt;
            substeps += 1;
        }

        if self.accumulator >= self.dt {
            log::debug!(
                "dropping {:.4}s of simulation time after {} substeps",
                self.accumulator,
                substeps
            );
            self.accumulator %= self.dt;
        }

        substeps
    }
}

/// Runs a simulation against a canvas one frame at a time
#[derive(Debug, Clone)]
pub struct Driver<S: Simulation> {
    pub sim: S,
    pub clock: FixedStep,
    /// Frames rendered so far
    pub frames: u64,
    /// Fixed steps taken so far
    pub steps: u64,
}

impl<S: Simulation> Driver<S> {
    pub fn new(sim: S, clock: FixedStep) -> Self {
        Self {
            sim,
            clock,
            frames: 0,
            steps: 0,
        }
    }

    /// Step for the elapsed frame time, then render once
    pub fn frame(&mut self, frame_time: f32, canvas: &mut dyn Canvas) {
        let substeps = self.clock.advance(frame_time);
        for _ in 0..substeps {
            self.sim.step(self.clock.dt);
        }
        self.steps += u64::from(substeps);

        self.sim.render(canvas);
        self.frames += 1;
    }
}
