use std::time::Duration;

/// Tuning for a bound calculator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorConfig {
    /// How long the bill text must stay unchanged before it is used.
    pub quiet_period: Duration,
    /// Reset signals buffered per subscriber before older ones are dropped.
    pub reset_capacity: usize,
}

impl CalculatorConfig {
    pub const DEFAULT_QUIET_PERIOD: Duration = Duration::from_millis(300);
    pub const DEFAULT_RESET_CAPACITY: usize = 16;

    pub fn with_quiet_period(
        mut self,
        quiet_period: Duration,
    ) -> Self {
        self.quiet_period = quiet_period;
        self
    }
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            quiet_period: Self::DEFAULT_QUIET_PERIOD,
            reset_capacity: Self::DEFAULT_RESET_CAPACITY,
        }
    }
}
