//! Renderer collaborators.
//!
//! Drawing is out of scope for the kernel: a renderer only receives the
//! snapshot of each rendered frame.

use tracing::{debug, info};

use kestrel_core::state::FrameSnapshot;

pub trait Renderer {
    /// Draw one frame. Called at most once per real frame.
    fn draw(&mut self, snapshot: &FrameSnapshot);
}

/// Headless renderer that reports frames and events through `tracing`.
#[derive(Debug, Default)]
pub struct LogRenderer {
    frames: u64,
}

impl LogRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

impl Renderer for LogRenderer {
    fn draw(&mut self, snapshot: &FrameSnapshot) {
        self.frames += 1;
        let avatar = &snapshot.avatar;
        debug!(
            tick = snapshot.time.tick,
            x = avatar.position.x,
            y = avatar.position.y,
            state = ?avatar.state,
            entities = snapshot.entities.len(),
            "frame"
        );
        for event in &snapshot.events {
            info!(?event, "game event");
        }
    }
}

/// Keeps every drawn snapshot, for tests and replays.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    pub frames: Vec<FrameSnapshot>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<&FrameSnapshot> {
        self.frames.last()
    }
}

impl Renderer for RecordingRenderer {
    fn draw(&mut self, snapshot: &FrameSnapshot) {
        self.frames.push(snapshot.clone());
    }
}
