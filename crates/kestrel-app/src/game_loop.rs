//! Fixed-timestep main loop.
//!
//! Real time is measured once per frame and accumulated as lag; the
//! simulation then runs whole steps of `timestep_ms` until the lag is used
//! up or the per-frame cap is hit. Stalls (debugger, window drag, slow disk)
//! are absorbed by dropping the excess time instead of replaying it.

use serde::Serialize;
use tracing::{debug, info, trace};

use kestrel_core::clock::Clock;
use kestrel_core::commands::{EngineCommand, InputEvent};
use kestrel_core::config::SchedulerConfig;
use kestrel_sim::SimulationEngine;

use crate::error::AppError;
use crate::input::InputSource;
use crate::render::Renderer;

/// What happened during one real frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    pub steps: u32,
    pub rendered: bool,
    /// Real milliseconds discarded by the stall clamp this frame.
    pub dropped_ms: u64,
    pub exit_requested: bool,
}

/// Totals of a [`Scheduler::run`] session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub frames: u64,
    pub steps: u64,
    pub time_dropped: u64,
}

/// The main loop scheduler. Owns the engine and the real-time clock.
pub struct Scheduler<C: Clock> {
    config: SchedulerConfig,
    clock: C,
    engine: SimulationEngine,
    lag: u64,
    last_frame_date: u64,
    time_dropped: u64,
    exit_requested: bool,
}

impl<C: Clock> Scheduler<C> {
    pub fn new(config: SchedulerConfig, clock: C, engine: SimulationEngine) -> Result<Self, AppError> {
        config.validate()?;
        let last_frame_date = clock.now_ms();
        Ok(Self {
            config,
            clock,
            engine,
            lag: 0,
            last_frame_date,
            time_dropped: 0,
            exit_requested: false,
        })
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    /// Mutable engine access, for queuing script requests between frames.
    pub fn engine_mut(&mut self) -> &mut SimulationEngine {
        &mut self.engine
    }

    pub fn lag(&self) -> u64 {
        self.lag
    }

    pub fn time_dropped(&self) -> u64 {
        self.time_dropped
    }

    pub fn is_exit_requested(&self) -> bool {
        self.exit_requested
    }

    pub fn request_exit(&mut self) {
        self.exit_requested = true;
    }

    /// Accumulate the real time elapsed since the previous frame, then clamp
    /// the lag to a single step if it reached the stall threshold.
    ///
    /// Returns the number of milliseconds dropped.
    pub fn update_lag(&mut self) -> u64 {
        let now = self.clock.now_ms().saturating_sub(self.time_dropped);
        let elapsed = now.saturating_sub(self.last_frame_date);
        self.lag += elapsed;
        self.last_frame_date = now;

        if self.lag < self.config.stall_threshold_ms {
            return 0;
        }
        let dropped = self.lag - self.config.timestep_ms;
        self.time_dropped += dropped;
        self.lag = self.config.timestep_ms;
        self.last_frame_date = self.clock.now_ms().saturating_sub(self.time_dropped);
        debug!(dropped, total = self.time_dropped, "stall absorbed");
        dropped
    }

    /// Run one real frame: measure time, read input, step, render, sleep.
    pub fn run_frame(
        &mut self,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
    ) -> FrameReport {
        let frame_start = self.clock.now_ms();
        let dropped_ms = self.update_lag();
        self.drain_input(input);

        let timestep = self.config.timestep_ms;
        let mut steps = 0;
        let mut events = Vec::new();
        let mut last_snapshot = None;
        while self.lag >= timestep && steps < self.config.max_steps_per_frame && !self.exit_requested
        {
            let mut snapshot = self.engine.tick();
            self.lag -= timestep;
            steps += 1;
            if self.engine.is_quit_requested() {
                info!(steps, "shutdown requested by the simulation");
                self.exit_requested = true;
                break;
            }
            events.append(&mut snapshot.events);
            last_snapshot = Some(snapshot);
        }
        trace!(steps, lag = self.lag, "frame stepped");

        let rendered = match last_snapshot {
            Some(mut snapshot) if !self.exit_requested => {
                snapshot.events = events;
                renderer.draw(&snapshot);
                true
            }
            _ => false,
        };

        let frame_duration = self.clock.now_ms().saturating_sub(frame_start);
        if !self.exit_requested && frame_duration < timestep {
            self.clock.sleep_ms(timestep - frame_duration);
        }

        FrameReport {
            steps,
            rendered,
            dropped_ms,
            exit_requested: self.exit_requested,
        }
    }

    /// Run frames until an exit is requested or `max_frames` were run.
    pub fn run(
        &mut self,
        input: &mut dyn InputSource,
        renderer: &mut dyn Renderer,
        max_frames: Option<u64>,
    ) -> RunSummary {
        info!(
            timestep_ms = self.config.timestep_ms,
            max_steps = self.config.max_steps_per_frame,
            "main loop started"
        );
        let mut frames = 0;
        let mut steps = 0;
        while !self.exit_requested && max_frames.map_or(true, |max| frames < max) {
            let report = self.run_frame(input, renderer);
            frames += 1;
            steps += u64::from(report.steps);
        }
        info!(frames, steps, time_dropped = self.time_dropped, "main loop stopped");
        RunSummary {
            frames,
            steps,
            time_dropped: self.time_dropped,
        }
    }

    fn drain_input(&mut self, input: &mut dyn InputSource) {
        while let Some(event) = input.poll() {
            if event == InputEvent::WindowClosed {
                info!("window closed");
                self.exit_requested = true;
                break;
            }
            self.engine.queue_command(EngineCommand::Input(event));
        }
    }
}
