//! Frame countdowns for every timed mode in the game: night, power-up
//! effects, the support turret.

/// Remaining frames of a timed mode. Zero means idle.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Countdown(u32);

impl Countdown {
    pub fn idle() -> Self {
        Self(0)
    }

    pub fn started(frames: u32) -> Self {
        Self(frames)
    }

    /// Restart from `frames`. Picking up the same effect twice refreshes the
    /// duration, it does not add to it.
    pub fn start(&mut self, frames: u32) {
        self.0 = frames;
    }

    pub fn is_active(&self) -> bool {
        self.0 > 0
    }

    pub fn remaining(&self) -> u32 {
        self.0
    }

    /// Advance one frame. Returns `true` only on the frame the countdown
    /// reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.0 == 0 {
            return false;
        }
        self.0 -= 1;
        self.0 == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_never_expires() {
        let mut c = Countdown::idle();
        assert!(!c.is_active());
        assert!(!c.tick());
        assert_eq!(c.remaining(), 0);
    }

    #[test]
    fn expires_exactly_once() {
        let mut c = Countdown::started(3);
        assert!(!c.tick());
        assert!(!c.tick());
        assert!(c.tick());
        assert!(!c.is_active());
        assert!(!c.tick());
    }

    #[test]
    fn restart_does_not_stack() {
        let mut c = Countdown::started(5);
        c.tick();
        c.start(10);
        assert_eq!(c.remaining(), 10);
    }
}
