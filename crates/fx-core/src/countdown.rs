//! Countdown to a fixed instant, recomputed once per tick.

const SECOND_MS: i64 = 1000;
const MINUTE_MS: i64 = 60 * SECOND_MS;
const HOUR_MS: i64 = 60 * MINUTE_MS;
const DAY_MS: i64 = 24 * HOUR_MS;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Breakdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Breakdown {
    pub fn from_millis(remaining_ms: i64) -> Self {
        let ms = remaining_ms.max(0);
        Self {
            days: ms / DAY_MS,
            hours: (ms % DAY_MS) / HOUR_MS,
            minutes: (ms % HOUR_MS) / MINUTE_MS,
            seconds: (ms % MINUTE_MS) / SECOND_MS,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CountdownState {
    Remaining(Breakdown),
    Reached,
}

#[derive(Clone, Debug)]
pub struct Countdown {
    target_ms: i64,
    reached: bool,
}

impl Countdown {
    pub fn new(target_ms: i64) -> Self {
        Self {
            target_ms,
            reached: false,
        }
    }

    pub fn target_ms(&self) -> i64 {
        self.target_ms
    }

    pub fn is_reached(&self) -> bool {
        self.reached
    }

    /// `Reached` is terminal: once the target has passed, later ticks never
    /// report time remaining again, even if the clock goes backwards.
    pub fn tick(&mut self, now_ms: i64) -> CountdownState {
        if self.reached {
            return CountdownState::Reached;
        }
        let remaining = self.target_ms - now_ms;
        if remaining <= 0 {
            self.reached = true;
            log::info!("[countdown] target reached");
            return CountdownState::Reached;
        }
        CountdownState::Remaining(Breakdown::from_millis(remaining))
    }
}
