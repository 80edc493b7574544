//! Ghost mode bookkeeping.
//!
//! A ghost alternates between scattering and chasing on a timer. Frightened and eaten are
//! overrides layered on top: while one is active the timer keeps running underneath, and once it
//! clears the ghost resumes whichever phase the timer currently indicates. All changes go through
//! [`ModeController::tick`] and [`ModeController::apply`].

use strum_macros::AsRefStr;

use crate::constants::Ticks;

/// The mode a ghost is visibly in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum GhostMode {
    Scatter,
    Chase,
    Frightened,
    Eaten,
}

impl GhostMode {
    /// Whether the scatter/chase timer currently governs movement.
    pub fn is_scheduled(self) -> bool {
        matches!(self, GhostMode::Scatter | GhostMode::Chase)
    }
}

/// The timer-driven half of the mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Scatter,
    Chase,
}

impl Phase {
    fn flipped(self) -> Phase {
        match self {
            Phase::Scatter => Phase::Chase,
            Phase::Chase => Phase::Scatter,
        }
    }
}

impl From<Phase> for GhostMode {
    fn from(phase: Phase) -> Self {
        match phase {
            Phase::Scatter => GhostMode::Scatter,
            Phase::Chase => GhostMode::Chase,
        }
    }
}

/// External events that change a ghost's mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModeTrigger {
    /// The player ate a power pellet.
    Frighten,
    /// The player caught the ghost.
    Eaten,
    /// An eaten ghost reached the home tile.
    ReachedHome,
}

/// A visible mode change, and whether it requires the ghost to turn around on the spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeChange {
    pub from: GhostMode,
    pub to: GhostMode,
    pub reverse: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Override {
    Frightened { until: Ticks },
    Eaten,
}

/// Phase lengths, in ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeDurations {
    pub scatter: Ticks,
    pub chase: Ticks,
    pub frighten: Ticks,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeController {
    durations: ModeDurations,
    phase: Phase,
    /// When the current phase ends. Armed on the first tick.
    phase_deadline: Option<Ticks>,
    overlay: Option<Override>,
}

impl ModeController {
    /// A controller that starts out scattering.
    pub fn new(durations: ModeDurations) -> Self {
        Self {
            durations,
            phase: Phase::Scatter,
            phase_deadline: None,
            overlay: None,
        }
    }

    pub fn mode(&self) -> GhostMode {
        match self.overlay {
            Some(Override::Frightened { .. }) => GhostMode::Frightened,
            Some(Override::Eaten) => GhostMode::Eaten,
            None => self.phase.into(),
        }
    }

    /// The phase the timer currently indicates, regardless of overrides.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn phase_deadline(&self) -> Option<Ticks> {
        self.phase_deadline
    }

    /// When the current fright wears off, if frightened.
    pub fn frightened_until(&self) -> Option<Ticks> {
        match self.overlay {
            Some(Override::Frightened { until }) => Some(until),
            _ => None,
        }
    }

    fn phase_length(&self, phase: Phase) -> Ticks {
        match phase {
            Phase::Scatter => self.durations.scatter,
            Phase::Chase => self.durations.chase,
        }
    }

    /// Advances the timers to `now`.
    pub fn tick(&mut self, now: Ticks) -> Option<ModeChange> {
        let before = self.mode();

        let mut flipped = false;
        match self.phase_deadline {
            None => self.phase_deadline = Some(now + self.phase_length(self.phase)),
            Some(deadline) if now >= deadline => {
                self.phase = self.phase.flipped();
                self.phase_deadline = Some(now + self.phase_length(self.phase));
                flipped = true;
            }
            Some(_) => {}
        }

        if let Some(Override::Frightened { until }) = self.overlay {
            if now >= until {
                self.overlay = None;
            }
        }

        let after = self.mode();
        (before != after).then_some(ModeChange {
            from: before,
            to: after,
            reverse: flipped && before.is_scheduled() && after.is_scheduled(),
        })
    }

    /// Applies an external trigger at tick `now`.
    ///
    /// Frightening an already frightened ghost only restarts the fright timer and reports no
    /// change. Frightening an eaten ghost, eating an eaten ghost, and reaching home while not
    /// eaten are ignored.
    pub fn apply(&mut self, trigger: ModeTrigger, now: Ticks) -> Option<ModeChange> {
        let before = self.mode();

        match (trigger, self.overlay) {
            (ModeTrigger::Frighten, Some(Override::Eaten)) => return None,
            (ModeTrigger::Frighten, Some(Override::Frightened { .. })) => {
                self.overlay = Some(Override::Frightened {
                    until: now + self.durations.frighten,
                });
                return None;
            }
            (ModeTrigger::Frighten, None) => {
                self.overlay = Some(Override::Frightened {
                    until: now + self.durations.frighten,
                });
            }
            (ModeTrigger::Eaten, Some(Override::Eaten)) => return None,
            (ModeTrigger::Eaten, _) => self.overlay = Some(Override::Eaten),
            (ModeTrigger::ReachedHome, Some(Override::Eaten)) => self.overlay = None,
            (ModeTrigger::ReachedHome, _) => return None,
        }

        Some(ModeChange {
            from: before,
            to: self.mode(),
            reverse: trigger != ModeTrigger::ReachedHome,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controller() -> ModeController {
        ModeController::new(ModeDurations {
            scatter: 10,
            chase: 20,
            frighten: 5,
        })
    }

    #[test]
    fn test_first_tick_arms_scatter_timer() {
        let mut modes = controller();
        assert_eq!(modes.tick(3), None);
        assert_eq!(modes.phase_deadline(), Some(13));
        assert_eq!(modes.mode(), GhostMode::Scatter);
    }

    #[test]
    fn test_phase_flip_reverses() {
        let mut modes = controller();
        modes.tick(0);
        assert_eq!(
            modes.tick(10),
            Some(ModeChange {
                from: GhostMode::Scatter,
                to: GhostMode::Chase,
                reverse: true
            })
        );
        assert_eq!(modes.phase_deadline(), Some(30));
    }
}
