//! Input-driven run session
//!
//! A `Session` owns one run plus its tracer and is driven by an explicit
//! queue of input events. Outcomes come back as values; nothing is broadcast.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::completion::Outcome;
use super::level::{Cell, LevelSpec};
use super::state::{Run, RunState};
use super::tracer::{PathTracer, TracerPhase};
use crate::submission::OutcomeSink;
use crate::{GridPos, idx};

/// A single pointer event in screen coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum InputEvent {
    PointerDown { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    /// Release commits the path; `time_ms` is the completion clock
    PointerUp { time_ms: f64 },
}

/// Full redraw data after any mutation
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub level: &'a LevelSpec,
    pub printed: &'a [bool],
    pub path: &'a [GridPos],
    pub phase: TracerPhase,
}

impl FrameView<'_> {
    /// Plain-text projection of the frame, one row per line.
    ///
    /// `#` obstacle, `~` cooling, `*` printed target, `o` unprinted target,
    /// `@` path point, `.` empty.
    pub fn to_ascii(&self) -> String {
        let (w, h) = (self.level.width, self.level.height);
        let mut out = String::with_capacity(((w + 1) * h) as usize);
        for y in 0..h as i32 {
            for x in 0..w as i32 {
                let pos = GridPos::new(x, y);
                let i = idx(pos, w);
                let ch = if self.path.contains(&pos) {
                    '@'
                } else {
                    match self.level.grid[i] {
                        Cell::Obstacle => '#',
                        Cell::CoolingZone => '~',
                        Cell::Target if self.printed[i] => '*',
                        Cell::Target => 'o',
                        Cell::Empty => '.',
                    }
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

/// One active attempt at a level
#[derive(Debug, Clone)]
pub struct Session {
    run: Run,
    tracer: PathTracer,
    outcome: Option<Outcome>,
}

impl Session {
    pub fn new(level: LevelSpec, tile_size: f32, now_ms: f64) -> Self {
        let tracer = PathTracer::new(level.start, tile_size);
        Self {
            run: Run::new(level, now_ms),
            tracer,
            outcome: None,
        }
    }

    pub fn level(&self) -> &LevelSpec {
        &self.run.level
    }

    pub fn run_state(&self) -> &RunState {
        &self.run.state
    }

    pub fn remaining_targets(&self) -> usize {
        self.run.printed.remaining()
    }

    pub fn is_completed(&self) -> bool {
        self.run.state.completed
    }

    /// The outcome, once the run has ended
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Apply one input event, returning the outcome if this event ended the run
    pub fn handle(&mut self, event: InputEvent) -> Option<Outcome> {
        match event {
            InputEvent::PointerDown { x, y } => {
                self.tracer.pointer_down(&mut self.run, Vec2::new(x, y));
                None
            }
            InputEvent::PointerMove { x, y } => {
                self.tracer.pointer_move(&mut self.run, Vec2::new(x, y));
                None
            }
            InputEvent::PointerUp { time_ms } => {
                let outcome = self.tracer.pointer_up(&mut self.run, time_ms);
                if outcome.is_some() {
                    self.outcome = outcome;
                }
                outcome
            }
        }
    }

    /// Drain queued input in order, emitting at most one outcome per run
    pub fn drain(&mut self, queue: &mut VecDeque<InputEvent>, sink: &mut impl OutcomeSink) {
        while let Some(event) = queue.pop_front() {
            if let Some(outcome) = self.handle(event) {
                sink.emit(outcome);
            }
        }
    }

    /// Everything a renderer needs to redraw the whole frame
    pub fn snapshot(&self) -> FrameView<'_> {
        FrameView {
            level: &self.run.level,
            printed: self.run.printed.as_slice(),
            path: self.tracer.path().points(),
            phase: self.tracer.phase(),
        }
    }
}
