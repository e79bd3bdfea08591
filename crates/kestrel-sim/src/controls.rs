//! Translation of raw input events into avatar intents.

use kestrel_core::commands::{InputEvent, Intent};
use kestrel_core::enums::Direction4;
use kestrel_core::types::offset_to_direction8;

/// Game commands state: which directions and buttons are currently held.
#[derive(Debug, Clone, Default)]
pub struct Controls {
    pressed: [bool; 4],
    action_held: bool,
}

impl Controls {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an input event and return the intent it produces, if any.
    /// Window events produce no intent.
    pub fn apply(&mut self, event: InputEvent) -> Option<Intent> {
        match event {
            InputEvent::DirectionPressed { direction } => {
                self.pressed[direction.index() as usize] = true;
                Some(Intent::Move {
                    direction8: self.wanted_direction8(),
                })
            }
            InputEvent::DirectionReleased { direction } => {
                self.pressed[direction.index() as usize] = false;
                Some(Intent::Move {
                    direction8: self.wanted_direction8(),
                })
            }
            InputEvent::ActionPressed => {
                self.action_held = true;
                Some(Intent::Action)
            }
            InputEvent::ActionReleased => {
                self.action_held = false;
                Some(Intent::ActionReleased)
            }
            InputEvent::AttackPressed => Some(Intent::Attack),
            InputEvent::ItemPressed { slot } => Some(Intent::UseItem { slot }),
            InputEvent::WindowClosed => None,
        }
    }

    /// Direction8 resulting from the held arrows. Opposite arrows cancel.
    pub fn wanted_direction8(&self) -> Option<u8> {
        let mut dx = 0;
        let mut dy = 0;
        for (index, pressed) in self.pressed.iter().enumerate() {
            if *pressed {
                let (x, y) = Direction4::from_index(index as u8).offset();
                dx += x;
                dy += y;
            }
        }
        offset_to_direction8(dx, dy)
    }

    pub fn is_action_held(&self) -> bool {
        self.action_held
    }

    /// Forget every held button, e.g. when the avatar is frozen by a script.
    pub fn release_all(&mut self) {
        self.pressed = [false; 4];
        self.action_held = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_from_two_arrows() {
        let mut controls = Controls::new();
        controls.apply(InputEvent::DirectionPressed {
            direction: Direction4::Right,
        });
        let intent = controls.apply(InputEvent::DirectionPressed {
            direction: Direction4::Up,
        });
        assert_eq!(intent, Some(Intent::Move { direction8: Some(1) }));
    }

    #[test]
    fn test_opposite_arrows_cancel() {
        let mut controls = Controls::new();
        controls.apply(InputEvent::DirectionPressed {
            direction: Direction4::Left,
        });
        controls.apply(InputEvent::DirectionPressed {
            direction: Direction4::Right,
        });
        assert_eq!(controls.wanted_direction8(), None);
        controls.apply(InputEvent::DirectionReleased {
            direction: Direction4::Right,
        });
        assert_eq!(controls.wanted_direction8(), Some(4));
    }

    #[test]
    fn test_action_held_tracking() {
        let mut controls = Controls::new();
        assert_eq!(controls.apply(InputEvent::ActionPressed), Some(Intent::Action));
        assert!(controls.is_action_held());
        controls.apply(InputEvent::ActionReleased);
        assert!(!controls.is_action_held());
        assert_eq!(controls.apply(InputEvent::WindowClosed), None);
    }
}
