//! World services threaded explicitly through states and systems.
//!
//! Holds what would otherwise be process-wide singletons: the simulated
//! clock, the deterministic RNG and the outgoing event queue.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use kestrel_core::events::GameEvent;
use kestrel_core::types::SimTime;

pub struct Services {
    time: SimTime,
    timestep_ms: u64,
    rng: ChaCha8Rng,
    events: Vec<GameEvent>,
}

impl Services {
    pub fn new(seed: u64, timestep_ms: u64) -> Self {
        Self {
            time: SimTime::default(),
            timestep_ms,
            rng: ChaCha8Rng::seed_from_u64(seed),
            events: Vec::new(),
        }
    }

    /// Current simulated date in milliseconds.
    pub fn now(&self) -> u64 {
        self.time.now_ms
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn timestep_ms(&self) -> u64 {
        self.timestep_ms
    }

    /// Advance the simulated clock by one step.
    pub fn advance(&mut self) {
        self.time.advance(self.timestep_ms);
    }

    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    pub fn play_sound(&mut self, name: &str) {
        self.events.push(GameEvent::Sound { name: name.into() });
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }
}
