use std::fmt::Display;
use std::time::Duration;

use crate::utils::format_duration;

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunStats {
    pub parsed: usize,
    pub written: usize,
    pub failed: usize,
    pub skipped: usize,
    pub included: usize,
    pub step_errors: usize,
    pub steps: usize,
    pub duration: Duration,
}

impl Display for RunStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "parsed: {}, written: {}, failed: {}, skipped: {}, included: {}",
               self.parsed, self.written, self.failed, self.skipped, self.included)?;
        if self.step_errors > 0 {
            write!(f, ", failed steps: {}/{}", self.step_errors, self.steps)?;
        }
        write!(f, ", took {}", format_duration(self.duration))
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;
    use crate::model::RunStats;

    #[test]
    fn test_summary() {
        let mut stats = RunStats { parsed: 3, written: 2, skipped: 1, included: 2, steps: 5, duration: Duration::from_millis(1_500), ..RunStats::default() };
        assert_eq!(stats.to_string(), "parsed: 3, written: 2, failed: 0, skipped: 1, included: 2, took 1.500 s");
        stats.step_errors = 1;
        assert_eq!(stats.to_string(), "parsed: 3, written: 2, failed: 0, skipped: 1, included: 2, failed steps: 1/5, took 1.500 s");
    }
}
