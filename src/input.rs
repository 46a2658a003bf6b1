// StateBeacon — Button Input Manager
//
// Debounced button handler that classifies presses as short or long.  The
// press/long-press race runs against a hold timer owned by the dispatch
// loop: an accepted press arms it, release before it fires is a short
// press, and the timer firing mid-press is a long press (the following
// release is then swallowed).

use crate::config::*;

/// Gesture produced by an accepted edge or a hold-timer expiry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonSignal {
    /// Accepted press edge.  The dispatch loop arms the hold timer
    /// ([`LONG_PRESS_MS`]) when it sees this.
    PressStarted,
    /// Released before the hold timer fired.
    ShortPress,
    /// Hold timer fired while the button was still down.
    LongPress,
}

enum HoldTimer {
    Idle,
    Armed,
    Fired,
}

pub struct ButtonInputManager {
    pressed: bool,
    last_accepted_ms: Option<u64>,
    hold: HoldTimer,
}

impl ButtonInputManager {
    pub fn new() -> Self {
        Self {
            pressed: false,
            last_accepted_ms: None,
            hold: HoldTimer::Idle,
        }
    }

    /// Feed one raw edge.  Returns the gesture it resolved to, if any.
    pub fn on_edge(&mut self, pressed: bool, at_ms: u64) -> Option<ButtonSignal> {
        // ---- debounce filter ----
        if pressed == self.pressed {
            log::trace!("edge repeats current level at {at_ms}ms, dropped");
            return None;
        }
        if let Some(last) = self.last_accepted_ms {
            if at_ms.saturating_sub(last) < DEBOUNCE_MS {
                log::trace!("edge within debounce window at {at_ms}ms, dropped");
                return None;
            }
        }
        self.pressed = pressed;
        self.last_accepted_ms = Some(at_ms);

        // ---- press edge ----
        if pressed {
            self.hold = HoldTimer::Armed;
            return Some(ButtonSignal::PressStarted);
        }

        // ---- release edge ----
        match self.hold {
            HoldTimer::Armed => {
                self.hold = HoldTimer::Idle;
                Some(ButtonSignal::ShortPress)
            }
            HoldTimer::Fired => {
                // The long press already consumed this gesture.
                self.hold = HoldTimer::Idle;
                None
            }
            HoldTimer::Idle => None,
        }
    }

    /// The hold timer fired.  A timer cancelled by an earlier release may
    /// still deliver a stale expiry; those resolve to nothing.
    pub fn on_hold_elapsed(&mut self) -> Option<ButtonSignal> {
        match self.hold {
            HoldTimer::Armed => {
                self.hold = HoldTimer::Fired;
                Some(ButtonSignal::LongPress)
            }
            HoldTimer::Idle | HoldTimer::Fired => None,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.pressed
    }
}

impl Default for ButtonInputManager {
    fn default() -> Self {
        Self::new()
    }
}
