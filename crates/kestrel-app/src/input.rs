//! Input collaborators.

use std::collections::VecDeque;

use kestrel_core::commands::InputEvent;

/// Source of low-level input events, drained once per real frame.
pub trait InputSource {
    /// Next pending event, or `None` once the queue is empty for this frame.
    fn poll(&mut self) -> Option<InputEvent>;
}

/// An input source that never produces anything.
#[derive(Debug, Default)]
pub struct NoInput;

impl InputSource for NoInput {
    fn poll(&mut self) -> Option<InputEvent> {
        None
    }
}

/// Replays events scheduled on frame numbers.
///
/// Every `None` returned by [`InputSource::poll`] closes the current frame.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    script: VecDeque<(u64, InputEvent)>,
    frame: u64,
}

impl ScriptedInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` for delivery during frame `frame`. Events must be
    /// added in frame order.
    pub fn at_frame(mut self, frame: u64, event: InputEvent) -> Self {
        self.script.push_back((frame, event));
        self
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn is_exhausted(&self) -> bool {
        self.script.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self) -> Option<InputEvent> {
        match self.script.front() {
            Some(&(frame, event)) if frame <= self.frame => {
                self.script.pop_front();
                Some(event)
            }
            _ => {
                self.frame += 1;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(input: &mut impl InputSource) -> Vec<InputEvent> {
        std::iter::from_fn(|| input.poll()).collect()
    }

    #[test]
    fn test_scripted_input_delivers_per_frame() {
        let mut input = ScriptedInput::new()
            .at_frame(0, InputEvent::ActionPressed)
            .at_frame(0, InputEvent::ActionReleased)
            .at_frame(2, InputEvent::AttackPressed);

        assert_eq!(
            drain(&mut input),
            vec![InputEvent::ActionPressed, InputEvent::ActionReleased]
        );
        assert!(drain(&mut input).is_empty(), "nothing scheduled on frame 1");
        assert_eq!(drain(&mut input), vec![InputEvent::AttackPressed]);
        assert!(input.is_exhausted());
        assert_eq!(input.frame(), 3);
    }

    #[test]
    fn test_no_input_is_empty() {
        assert_eq!(NoInput.poll(), None);
    }
}
