/// Synthetic play time, in seconds, against a fixed budget.
///
/// Time only moves forward, so event timestamps taken from the clock never
/// decrease.
#[derive(Debug, Clone)]
pub struct SimClock {
    elapsed: u64,
    budget: u64,
}

impl SimClock {
    /// Create a clock at zero with a budget in minutes.
    pub fn new(budget_minutes: u32) -> Self {
        Self {
            elapsed: 0,
            budget: u64::from(budget_minutes) * 60,
        }
    }

    /// Move the clock forward. Returns the new elapsed time.
    pub fn advance(&mut self, seconds: u64) -> u64 {
        self.elapsed = self.elapsed.saturating_add(seconds);
        self.elapsed
    }

    /// Seconds of play time elapsed.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// The budget in seconds.
    pub fn budget(&self) -> u64 {
        self.budget
    }

    /// Whether the budget is used up.
    pub fn is_exhausted(&self) -> bool {
        self.elapsed >= self.budget
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_initial_state() {
        let clock = SimClock::new(60);
        assert_eq!(clock.elapsed(), 0);
        assert_eq!(clock.budget(), 3600);
        assert!(!clock.is_exhausted());
    }

    #[test]
    fn zero_budget_is_exhausted_immediately() {
        assert!(SimClock::new(0).is_exhausted());
    }

    #[test]
    fn clock_advance_accumulates() {
        let mut clock = SimClock::new(1);
        clock.advance(30);
        assert!(!clock.is_exhausted());
        assert_eq!(clock.advance(30), 60);
        assert!(clock.is_exhausted());
    }
}
