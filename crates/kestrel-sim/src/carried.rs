//! Objects held above the avatar's head.
//!
//! A carried object is shared between the state holding it and, during a
//! transition, the state taking it over. The handle is reference counted;
//! the object lives as long as some state holds it.

use std::cell::RefCell;
use std::rc::Rc;

use kestrel_core::constants::{BOMB_FUSE_MS, LIFTING_DURATION_MS};
use kestrel_core::enums::CarriedKind;

pub type CarriedRef = Rc<RefCell<CarriedObject>>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarriedObject {
    kind: CarriedKind,
    lift_end: u64,
    explosion_date: Option<u64>,
    broken: bool,
    suspended: bool,
    when_suspended: u64,
}

impl CarriedObject {
    pub fn new(kind: CarriedKind) -> Self {
        Self {
            kind,
            lift_end: 0,
            explosion_date: None,
            broken: false,
            suspended: false,
            when_suspended: 0,
        }
    }

    /// Wrap a new object in a shared handle.
    pub fn shared(kind: CarriedKind) -> CarriedRef {
        Rc::new(RefCell::new(Self::new(kind)))
    }

    pub fn kind(&self) -> CarriedKind {
        self.kind
    }

    /// Begin the lifting animation. Lifting a bomb lights its fuse.
    pub fn start_lifting(&mut self, now: u64) {
        self.lift_end = now + LIFTING_DURATION_MS;
        if self.kind == CarriedKind::Bomb {
            self.explosion_date = Some(now + BOMB_FUSE_MS);
        }
    }

    pub fn is_being_lifted(&self, now: u64) -> bool {
        now < self.lift_end
    }

    /// Advance timers. A bomb whose fuse burnt out breaks.
    pub fn update(&mut self, now: u64) {
        if self.suspended || self.broken {
            return;
        }
        if matches!(self.explosion_date, Some(date) if now >= date) {
            self.broken = true;
        }
    }

    pub fn is_broken(&self) -> bool {
        self.broken
    }

    pub fn explosion_date(&self) -> Option<u64> {
        self.explosion_date
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn set_suspended(&mut self, suspended: bool, now: u64) {
        if self.suspended == suspended {
            return;
        }
        self.suspended = suspended;
        if suspended {
            self.when_suspended = now;
        } else {
            let elapsed = now.saturating_sub(self.when_suspended);
            self.lift_end += elapsed;
            if let Some(date) = self.explosion_date.as_mut() {
                *date += elapsed;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bomb_fuse_respects_suspension() {
        let mut bomb = CarriedObject::new(CarriedKind::Bomb);
        bomb.start_lifting(0);
        assert!(bomb.is_being_lifted(100));
        assert!(!bomb.is_being_lifted(LIFTING_DURATION_MS));

        bomb.set_suspended(true, 1_000);
        bomb.update(5_000);
        assert!(!bomb.is_broken());
        bomb.set_suspended(false, 2_000);
        assert_eq!(bomb.explosion_date(), Some(BOMB_FUSE_MS + 1_000));
        bomb.update(3_500);
        assert!(!bomb.is_broken());
        bomb.update(4_000);
        assert!(bomb.is_broken());
    }

    #[test]
    fn test_pots_never_break_on_their_own() {
        let mut pot = CarriedObject::new(CarriedKind::Pot);
        pot.start_lifting(0);
        pot.update(1_000_000);
        assert!(!pot.is_broken());
        assert_eq!(pot.explosion_date(), None);
    }
}
