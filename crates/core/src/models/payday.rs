/// Where a hold-to-confirm gesture currently stands.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GateState {
    /// No gesture in progress
    Idle,
    /// Button held; progress runs 0.0–100.0
    Holding { progress: f64 },
    /// The hold completed and the gated effect may fire
    Fired,
    /// Released before completion; progress was discarded
    Cancelled,
}

/// Hold-to-confirm gate for the payday action.
///
/// Payday is the one operation gated by a sustained press instead of a
/// click: progress accumulates on each tick while held, resets on early
/// release, and the gate reaches [`GateState::Fired`] exactly once per
/// completed hold. The gate has no clock of its own — callers feed it
/// elapsed milliseconds, which keeps it deterministic under test.
#[derive(Debug, Clone, PartialEq)]
pub struct PaydayGate {
    hold_duration_ms: u64,
    elapsed_ms: u64,
    state: GateState,
}

impl PaydayGate {
    /// Hold duration matching the reference interaction.
    pub const DEFAULT_HOLD_MS: u64 = 1500;

    pub fn new() -> Self {
        Self::with_duration(Self::DEFAULT_HOLD_MS)
    }

    /// A gate requiring `hold_duration_ms` of sustained press. A zero
    /// duration fires on the first tick.
    pub fn with_duration(hold_duration_ms: u64) -> Self {
        Self {
            hold_duration_ms,
            elapsed_ms: 0,
            state: GateState::Idle,
        }
    }

    /// Begin a hold. Always restarts from zero progress, whatever the
    /// previous gesture left behind.
    pub fn press(&mut self) {
        self.elapsed_ms = 0;
        self.state = GateState::Holding { progress: 0.0 };
    }

    /// Advance the gesture by `delta_ms` of real time. Returns `true`
    /// exactly once, on the tick that completes the hold; ticks while
    /// not holding are ignored.
    pub fn tick(&mut self, delta_ms: u64) -> bool {
        if !matches!(self.state, GateState::Holding { .. }) {
            return false;
        }

        self.elapsed_ms = self.elapsed_ms.saturating_add(delta_ms);
        if self.elapsed_ms >= self.hold_duration_ms {
            self.state = GateState::Fired;
            return true;
        }

        self.state = GateState::Holding {
            progress: self.progress(),
        };
        false
    }

    /// End the gesture. An incomplete hold cancels with progress reset
    /// to zero; a completed one settles back to idle.
    pub fn release(&mut self) {
        self.elapsed_ms = 0;
        self.state = match self.state {
            GateState::Holding { .. } => GateState::Cancelled,
            _ => GateState::Idle,
        };
    }

    /// Progress through the hold, 0.0–100.0.
    pub fn progress(&self) -> f64 {
        match self.state {
            GateState::Fired => 100.0,
            GateState::Holding { .. } => {
                if self.hold_duration_ms == 0 {
                    100.0
                } else {
                    (self.elapsed_ms as f64 / self.hold_duration_ms as f64 * 100.0).min(100.0)
                }
            }
            _ => 0.0,
        }
    }

    pub fn state(&self) -> GateState {
        self.state
    }
}

impl Default for PaydayGate {
    fn default() -> Self {
        Self::new()
    }
}
